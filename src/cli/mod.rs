pub mod clean;
pub mod init;
pub mod merge;
pub mod perf;
pub mod record;
pub mod scan_options;
pub mod show;
