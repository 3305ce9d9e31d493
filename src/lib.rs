pub mod encoder;
pub mod error;
pub mod reader;
pub mod snapshot;
pub mod stamp;
pub mod utils;

pub use error::{Error, Result};
pub use stamp::GitState;
