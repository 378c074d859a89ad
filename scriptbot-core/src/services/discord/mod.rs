pub mod keyword_reply;
pub mod menu_components;
pub mod ready;
pub mod slashcommands;

pub use slashcommands::SlashContext;
