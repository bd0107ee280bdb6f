pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod sync;
