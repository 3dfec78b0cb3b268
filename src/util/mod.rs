pub mod file;
pub mod logging;
