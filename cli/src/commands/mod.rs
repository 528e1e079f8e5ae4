pub mod config;
pub mod generate;
pub mod session;
pub mod theme;
