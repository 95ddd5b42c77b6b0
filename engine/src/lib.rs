// Engine library root
// Declares the modules of the opportunity ETL: configuration, I/O collaborators,
// value parsers, pipeline stages and the service that runs them in order.

pub mod config;
pub mod data;
pub mod error;
pub mod parsing;
pub mod services;
pub mod stages;
