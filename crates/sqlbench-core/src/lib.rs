pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod providers;
pub mod report;
pub mod sanitize;
pub mod storage;
pub mod strategies;
