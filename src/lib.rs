// Library surface for the binary and integration tests.
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod literal;
pub mod runtime;
pub mod series;
pub mod stats;
pub mod ui;
