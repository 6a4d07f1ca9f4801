pub mod product_detail;
pub mod sweetwater_client;
