pub mod config;
pub mod logging;

// Classification pipeline, leaf-first.
pub mod checkpoint;
pub mod client;
pub mod event;
pub mod headers;
pub mod subsystem;
pub mod time_mask;
pub mod url_model;

/// Sentinel returned whenever a classification has nothing to go on.
pub const UNDEFINED: &str = "undefined";
