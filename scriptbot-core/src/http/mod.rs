pub mod keepalive;

pub use keepalive::{keepalive_router, start_keepalive_server};
