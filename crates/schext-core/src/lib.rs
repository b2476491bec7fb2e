pub mod config;
pub mod error;
pub mod logging;

pub mod extract;
pub mod fetch;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod source;
pub mod workspace;
