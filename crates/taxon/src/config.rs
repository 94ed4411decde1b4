//! Configuration types for Taxon graph rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file:
//!
//! ```toml
//! [render]
//! mode = "cluster"
//! directed = true
//! strict = false
//!
//! [graph]
//! descendants = "segment"
//! ```
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and graph settings.
//! - [`RenderConfig`] - Which exporter runs and how edges are written.
//! - [`GraphConfig`] - How the graph is derived from the document.
//!
//! # Example
//!
//! ```
//! # use taxon::config::{AppConfig, RenderMode};
//! let config = AppConfig::default();
//! assert_eq!(config.render().mode(), RenderMode::Flat);
//! assert!(!config.render().directed());
//! ```

use serde::Deserialize;

use taxon_core::path::DescendantMatch;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    render: RenderConfig,

    #[serde(default)]
    graph: GraphConfig,
}

impl AppConfig {
    pub fn new(render: RenderConfig, graph: GraphConfig) -> Self {
        Self { render, graph }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }

    /// Replace the render section, keeping the graph section.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}

/// Which DOT layout the exporter produces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Every vertex and edge at top level, with summary edges to children.
    #[default]
    Flat,
    /// Interior nodes become nested `subgraph cluster_*` blocks.
    Cluster,
}

/// Output options for the exporters.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    mode: RenderMode,

    /// Emit `digraph` and `->` instead of `graph` and `--`.
    #[serde(default)]
    directed: bool,

    /// Prefix the graph with `strict`.
    #[serde(default)]
    strict: bool,
}

impl RenderConfig {
    pub fn new(mode: RenderMode, directed: bool, strict: bool) -> Self {
        Self {
            mode,
            directed,
            strict,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}

/// Graph derivation options.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GraphConfig {
    /// How descendant names are matched when listing children.
    #[serde(default)]
    descendants: DescendantMatch,
}

impl GraphConfig {
    pub fn new(descendants: DescendantMatch) -> Self {
        Self { descendants }
    }

    pub fn descendants(&self) -> DescendantMatch {
        self.descendants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.render().mode(), RenderMode::Flat);
        assert!(!config.render().strict());
        assert_eq!(config.graph().descendants(), DescendantMatch::Segment);
    }

    #[test]
    fn test_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [render]
            mode = "cluster"
            directed = true
            strict = true

            [graph]
            descendants = "prefix"
            "#,
        )
        .unwrap();

        assert_eq!(config.render().mode(), RenderMode::Cluster);
        assert!(config.render().directed());
        assert!(config.render().strict());
        assert_eq!(config.graph().descendants(), DescendantMatch::Prefix);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[render]\nmode = \"radial\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_with_render_keeps_graph_section() {
        let config = AppConfig::new(
            RenderConfig::default(),
            GraphConfig::new(DescendantMatch::Prefix),
        )
        .with_render(RenderConfig::new(RenderMode::Cluster, true, false));

        assert_eq!(config.render().mode(), RenderMode::Cluster);
        assert_eq!(config.graph().descendants(), DescendantMatch::Prefix);
    }
}
