pub mod menu_traits;
pub mod platform_traits;
