//! Signup wizard: configuration, flow operations and the terminal UI.

pub mod config;
pub mod flow;
pub mod wizard;

pub use config::Config;
pub use wizard::Wizard;
