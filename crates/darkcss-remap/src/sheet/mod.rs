//! A small CSS rule model: parse, filter, merge and re-emit.
//!
//! This is not a general CSS object model. It keeps exactly what the
//! pipeline rewrites: selector lists, declarations and one level of
//! conditional groups.

mod format;
mod model;
mod parser;

pub use format::FormatOptions;
pub use model::{Declaration, Item, Rule, Stylesheet};
pub use parser::{parse_stylesheet, split_selectors};
