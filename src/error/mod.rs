mod types;

pub use types::{Result, UiError};
