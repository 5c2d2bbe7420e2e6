pub mod dictionaries;
pub mod documents;
pub mod error;
pub mod export;
pub mod serde_utils;
pub mod text;

pub use error::{FieldErrors, ScolariteError, ScolariteResult};
