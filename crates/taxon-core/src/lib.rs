//! Taxon Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Taxon parser,
//! the exporters and the CLI. It includes:
//!
//! - **Spans**: byte ranges into the source document ([`span::Span`])
//! - **Colors**: RGBA attributes for nodes and arcs ([`color::Rgba`])
//! - **Paths**: dotted table-path helpers ([`path`] module)
//! - **Graph**: the built node/arc model and its traversals ([`graph`] module)

pub mod color;
pub mod graph;
pub mod path;
pub mod span;
