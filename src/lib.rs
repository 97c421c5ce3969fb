pub mod analysis;
pub mod args;
pub mod logging;
