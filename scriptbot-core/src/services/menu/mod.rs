pub mod registry;
pub mod renderer;
pub mod sync;

pub use registry::MenuRegistry;
pub use renderer::{MenuRenderer, MenuStyle, DEFAULT_ICONS};
pub use sync::MenuSyncEngine;
