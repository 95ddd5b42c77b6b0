pub mod models;
pub mod utils;

// Table model and value helpers only; no I/O lives in this crate.
