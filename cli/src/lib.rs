pub mod cli;
pub mod config;
pub mod deploy;
pub mod logging;
