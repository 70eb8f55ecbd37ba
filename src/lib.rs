pub mod argsets;
pub mod command;
pub mod config;
pub mod constants;
pub mod helpers;
pub mod interfaces;
pub mod notifier;
pub mod runner;
pub mod sensor;
