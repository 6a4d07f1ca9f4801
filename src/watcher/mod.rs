pub mod change_detector;
pub mod watcher;
