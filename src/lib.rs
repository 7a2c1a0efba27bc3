pub mod cli;
pub mod emit;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod selection;

pub use error::{Error, Result};
