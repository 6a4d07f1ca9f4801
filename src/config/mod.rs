pub mod watch_config;
