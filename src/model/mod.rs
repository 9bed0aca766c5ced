pub mod config;
pub mod snippet;

pub use config::*;
pub use snippet::*;
