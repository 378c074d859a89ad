pub mod discord;
pub mod menu;
pub mod script_service;

pub use script_service::ScriptService;
