pub mod menu;
pub mod script;

pub use menu::{MenuIcon, MenuLocation, MenuOption, MenuOrigin, MenuView, RefreshOutcome};
pub use script::{GuildId, GuildScripts, ScriptDocument, ScriptEntry};
