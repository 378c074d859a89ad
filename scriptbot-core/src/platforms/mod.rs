// File: src/platforms/mod.rs

pub mod discord;

pub use scriptbot_common::traits::platform_traits::{ConnectionStatus, PlatformIntegration};
