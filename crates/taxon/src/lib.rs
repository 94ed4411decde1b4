//! Taxon - hierarchical TOML tables to Graphviz DOT.
//!
//! A Taxon document names its tables with dotted paths (`[Animal.Mammal]`).
//! The dotted names alone define a tree of nodes; tables with a `target`
//! key are arcs between nodes. This crate ties the parser to the DOT
//! exporters behind one [`GraphBuilder`].

pub mod config;
pub mod export;

mod error;

pub use taxon_core::{color, graph, path};
pub use taxon_parser::{Document, Model};

pub use error::TaxonError;

use std::io::Write;

use log::{debug, info, trace};

use config::{AppConfig, RenderMode};
use export::{ClusterExporter, Exporter, FlatExporter, Heading};

/// Builder for loading Taxon documents and rendering their graphs.
///
/// # Examples
///
/// ```
/// use taxon::{GraphBuilder, config::AppConfig};
///
/// let source = r#"
///     [A]
///     [A.B]
///     [A.B.likes]
///     target = "C"
///     [C]
/// "#;
///
/// let builder = GraphBuilder::new(AppConfig::default());
/// let document = builder.parse(source).expect("Failed to parse");
/// let model = builder.model(&document);
///
/// let dot = builder.render(&model, builder.heading("sample"));
/// assert!(dot.starts_with("graph \"sample\" {"));
/// assert!(dot.contains("n1 -- n2"));
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    config: AppConfig,
}

impl GraphBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a document.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonError::Parse`] when the text is not valid TOML.
    pub fn parse(&self, source: &str) -> Result<Document, TaxonError> {
        info!("Parsing document");

        let document =
            taxon_parser::parse(source).map_err(|err| TaxonError::new_parse_error(err, source))?;

        debug!(tables_count = document.headers().len(); "Document parsed successfully");
        Ok(document)
    }

    /// Create the model for `document` using the configured graph options.
    ///
    /// The graph is built on first use of [`Model::graph`].
    pub fn model<'doc>(&self, document: &'doc Document) -> Model<'doc> {
        Model::new(document).with_descendant_match(self.config.graph().descendants())
    }

    /// A heading named `name` using the configured keyword options.
    pub fn heading(&self, name: impl Into<String>) -> Heading {
        Heading::new(name)
            .with_directed(self.config.render().directed())
            .with_strict(self.config.render().strict())
    }

    /// The exporter selected by the render mode.
    pub fn exporter(&self, heading: Heading) -> Box<dyn Exporter> {
        match self.config.render().mode() {
            RenderMode::Flat => Box::new(FlatExporter::new(heading)),
            RenderMode::Cluster => Box::new(ClusterExporter::new(heading)),
        }
    }

    /// Render the graph of `model` as DOT text.
    pub fn render(&self, model: &Model<'_>, heading: Heading) -> String {
        let graph = model.graph();
        trace!(graph:?; "Rendering graph");

        let exporter = self.exporter(heading);
        let mut output = String::new();
        for line in exporter.lines(graph) {
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// Stream the DOT text for `model` into `writer`, one line at a time.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonError::Io`] when writing fails.
    pub fn write_to(
        &self,
        model: &Model<'_>,
        heading: Heading,
        writer: &mut impl Write,
    ) -> Result<(), TaxonError> {
        let graph = model.graph();
        info!(mode:? = self.config.render().mode(), nodes_count = graph.len(); "Writing graph");

        let exporter = self.exporter(heading);
        for line in exporter.lines(graph) {
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }
}
