//! # Taxon Parser
//!
//! Loads Taxon documents and builds their graphs. A document is a TOML file
//! whose dotted table names form a tree of nodes; tables carrying a `target`
//! (or `source`) key are arcs owned by the node they sit under.
//!
//! ## Usage
//!
//! ```
//! # use taxon_parser::{error::ParseError, parse, Model};
//!
//! fn main() -> Result<(), ParseError> {
//!     let document = parse(r#"
//!         [Animal]
//!         [Animal.Dog]
//!         [Animal.Dog.chases]
//!         target = "Animal.Cat"
//!         [Animal.Cat]
//!     "#)?;
//!
//!     let model = Model::new(&document);
//!     assert_eq!(model.graph().len(), 3);
//!     assert_eq!(model.graph().node("Animal.Dog").unwrap().parent(), Some("Animal"));
//!     Ok(())
//! }
//! ```

pub mod attributes;
pub mod classify;
pub mod document;
pub mod elaborate;
pub mod error;
pub mod header;
pub mod model;
pub mod table;

pub use document::Document;
pub use model::Model;
pub use taxon_core::span::Span;

use error::ParseError;

/// Parse source text into a [`Document`].
///
/// Shorthand for [`Document::parse`].
///
/// # Errors
///
/// Returns a [`ParseError`] when the text is not valid TOML.
pub fn parse(source: impl Into<String>) -> Result<Document, ParseError> {
    Document::parse(source)
}
