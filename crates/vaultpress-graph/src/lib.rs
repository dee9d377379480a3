//! # Knowledge Graph
//!
//! Page graph for the site's graph viewer, built with petgraph.
//!
//! Provides:
//! - An append-only accumulator filled while pages are transformed
//! - Edge deduplication and ghost-edge filtering
//! - Degree ranking and pastel coloring of the most connected pages
//! - Graph statistics (isolated pages, connected components, average degree)
//!
//! ## Quick Start
//!
//! ```
//! use vaultpress_graph::{GraphAccumulator, KnowledgeGraph};
//! use vaultpress_core::Edge;
//!
//! let mut acc = GraphAccumulator::new();
//! acc.add_node("/docs/a", "A");
//! acc.add_node("/docs/b", "B");
//! acc.add_edge(Edge::new("/docs/b", "/docs/a"));
//! acc.add_edge(Edge::new("/docs/a", "/docs/ghost"));
//!
//! let graph = KnowledgeGraph::build(&acc);
//! assert_eq!(graph.payload().edges.len(), 1);
//! assert_eq!(graph.stats().ghost_links, 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: Pages, keyed by site URL. IDs follow registration order.
//! - **Edges**: Undirected; a link and its reverse are the same edge.
//! - **Ghosts**: Links to URLs that are not pages (resources, `/404`) are
//!   dropped only after every page is known.
//!
//! ## Modules
//!
//! - [`accumulator`] - Node and edge registry
//! - [`graph`] - Graph construction, payload and statistics

pub mod accumulator;
pub mod graph;

pub use accumulator::GraphAccumulator;
pub use graph::{
    GraphEdge, GraphNode, GraphPayload, GraphStats, KnowledgeGraph, NODE_OPACITY, PASTEL_COLORS,
    node_value,
};

pub mod prelude {
    pub use crate::accumulator::GraphAccumulator;
    pub use crate::graph::{GraphPayload, GraphStats, KnowledgeGraph};
    pub use vaultpress_core::prelude::*;
}
