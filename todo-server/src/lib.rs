//! # To-do Server
//!
//! Bootstrap for the to-do HTTP service: read the port from the
//! environment, take the router from [`routes::init`], bind and serve.

pub mod routes;
pub mod server;
pub mod settings;

pub use settings::{Settings, SettingsError};
