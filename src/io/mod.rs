pub mod config_io;
pub mod content;
pub mod recovery;
pub mod state;
pub mod store;
