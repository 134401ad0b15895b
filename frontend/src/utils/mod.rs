pub mod chartdata;
pub mod format;
pub mod server;
