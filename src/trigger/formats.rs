//! Output formats for parse results
//!
//! Each format implements [`Formatter`] and is looked up by name through a
//! [`FormatRegistry`]:
//! - `json`: the result with the front end's field names
//! - `yaml`: the same structure as YAML
//! - `text`: one line per extracted reference, for terminals

pub mod json;
pub mod registry;
pub mod text;
pub mod yaml;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter, DEFAULT_REGISTRY};
pub use text::{to_text, TextFormatter};
pub use yaml::YamlFormatter;
