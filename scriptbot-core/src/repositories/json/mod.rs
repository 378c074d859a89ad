pub mod scripts;

pub use scripts::JsonScriptStore;
