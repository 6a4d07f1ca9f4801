pub mod schedule;
pub mod task_scheduler;
pub mod types;
