//! Concrete capability implementations.

/// Mappable-only labelled value.
pub mod labeled;
/// Optional values.
pub mod maybe;
/// String-consuming parsers.
pub mod parser;

pub use labeled::Labeled;
pub use maybe::{Maybe, cat_maybes, map_maybe};
pub use parser::Parser;
