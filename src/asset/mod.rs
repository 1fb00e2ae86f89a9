//! Asset format keys and standardized path mapping.

mod kind;
mod path;

pub use kind::FormatKey;
pub use path::{extension_of, is_standardized, standardize};
