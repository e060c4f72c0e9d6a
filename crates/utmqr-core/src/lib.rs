pub mod config;
pub mod logging;

pub mod delivery;
pub mod export;
pub mod filename;
pub mod render;
pub mod session;
pub mod url_builder;
