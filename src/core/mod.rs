pub mod dedup;
pub mod filter;
pub mod merge;
pub mod performance;
pub mod reporter;
pub mod scan_options;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
