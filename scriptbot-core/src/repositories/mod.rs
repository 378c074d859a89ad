pub mod json;

pub use json::JsonScriptStore;
