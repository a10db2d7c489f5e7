//! Input discovery and reading
//!
//! Patterns are expanded with `glob`; `.vtt` files are parsed as WebVTT,
//! anything else is read as plain UTF-8 text.

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
