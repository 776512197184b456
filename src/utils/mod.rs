// src/utils/mod.rs

pub mod logging;

pub use logging::initialize_logging;
