pub mod ask;
pub mod export_logs;
pub mod sessions;
