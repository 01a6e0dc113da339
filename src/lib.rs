pub mod channels;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod traits;
pub mod validation;

#[cfg(test)]
mod test_support;
