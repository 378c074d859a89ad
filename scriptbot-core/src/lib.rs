// src/lib.rs

pub mod config;
pub mod http;
pub mod platforms;
pub mod repositories;
pub mod services;

pub use scriptbot_common::error::Error;
pub use repositories::json::JsonScriptStore;
pub use services::script_service::ScriptService;
