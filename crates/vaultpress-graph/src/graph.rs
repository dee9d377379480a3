//! Knowledge graph built from the accumulated pages and links

use crate::accumulator::GraphAccumulator;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use vaultpress_core::prelude::*;
use vaultpress_core::to_json_compact;

/// Node colors, handed out from the most connected page down.
pub const PASTEL_COLORS: [&str; 27] = [
    // First tier
    "#FFADAD", "#FFD6A5", "#FDFFB6", "#CAFFBF", "#9BF6FF", "#A0C4FF", "#BDB2FF", "#FFC6FF",
    // Second tier
    "#FBF8CC", "#FDE4CF", "#FFCFD2", "#F1C0E8", "#CFBAF0", "#A3C4F3", "#90DBF4", "#8EECF5",
    "#98F5E1", "#B9FBC0",
    // Third tier
    "#EAE4E9", "#FFF1E6", "#FDE2E4", "#FAD2E1", "#E2ECE9", "#BEE1E6", "#F0EFEB", "#DFE7FD",
    "#CDDAFD",
];

/// Opacity given to every node
pub const NODE_OPACITY: f64 = 0.1;

/// Node as consumed by the graph viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: usize,
    pub label: String,
    pub url: String,
    pub color: Option<String>,
    pub value: f64,
    pub opacity: f64,
}

/// Edge between two node IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
}

/// The `graph_data` object written into `graph_info.js`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphPayload {
    /// Compact JSON form
    pub fn to_json(&self) -> Result<String> {
        to_json_compact(self, "graph payload")
    }
}

/// Summary numbers about the final graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_pages: usize,
    pub total_links: usize,
    /// Distinct links dropped because an endpoint is not a page
    pub ghost_links: usize,
    pub isolated_pages: usize,
    pub connected_components: usize,
    pub average_degree: f64,
}

/// Deduplicated, ranked page graph.
pub struct KnowledgeGraph {
    /// Undirected graph; node index `i` is the page with ID `i`
    graph: UnGraph<String, ()>,
    payload: GraphPayload,
    degrees: Vec<usize>,
    ghost_links: usize,
}

impl KnowledgeGraph {
    /// Build the graph from everything observed during the walk.
    ///
    /// Node IDs follow registration order. Edges are deduplicated, then any
    /// edge touching an unknown URL is dropped. Degree counts only the kept
    /// edges; the [`PASTEL_COLORS`] go to the highest degrees, ties broken by ID.
    pub fn build(acc: &GraphAccumulator) -> Self {
        let nodes = acc.nodes();
        let mut graph = UnGraph::with_capacity(nodes.len(), acc.edges().len());
        for url in nodes.keys() {
            graph.add_node(url.clone());
        }

        let unique: BTreeSet<&Edge> = acc.edges().iter().collect();
        let kept: Vec<(usize, usize)> = unique
            .iter()
            .filter_map(|edge| {
                let from = nodes.get_index_of(edge.low())?;
                let to = nodes.get_index_of(edge.high())?;
                Some((from, to))
            })
            .collect();
        let ghost_links = unique.len() - kept.len();
        if ghost_links > 0 {
            log::debug!("Dropped {} links to unknown pages", ghost_links);
        }

        let mut degrees = vec![0usize; nodes.len()];
        for &(from, to) in &kept {
            degrees[from] += 1;
            degrees[to] += 1;
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }

        let mut ranked: Vec<usize> = (0..nodes.len()).collect();
        ranked.sort_by(|a, b| degrees[*b].cmp(&degrees[*a]));
        let mut colors: Vec<Option<String>> = vec![None; nodes.len()];
        for (rank, &id) in ranked.iter().take(PASTEL_COLORS.len()).enumerate() {
            colors[id] = Some(PASTEL_COLORS[rank].to_string());
        }

        let payload = GraphPayload {
            nodes: nodes
                .iter()
                .zip(colors)
                .enumerate()
                .map(|(id, ((url, title), color))| GraphNode {
                    id,
                    label: title.clone(),
                    url: url.clone(),
                    color,
                    value: node_value(degrees[id]),
                    opacity: NODE_OPACITY,
                })
                .collect(),
            edges: kept
                .iter()
                .map(|&(from, to)| GraphEdge { from, to })
                .collect(),
        };

        Self {
            graph,
            payload,
            degrees,
            ghost_links,
        }
    }

    pub fn payload(&self) -> &GraphPayload {
        &self.payload
    }

    pub fn into_payload(self) -> GraphPayload {
        self.payload
    }

    /// Number of kept edges touching the page with this URL
    pub fn degree(&self, url: &str) -> Option<usize> {
        self.graph
            .node_indices()
            .find(|&idx| self.graph[idx] == url)
            .map(|idx| self.degrees[idx.index()])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let total_pages = self.graph.node_count();
        let total_links = self.graph.edge_count();

        let average_degree = if total_pages > 0 {
            self.degrees.iter().sum::<usize>() as f64 / total_pages as f64
        } else {
            0.0
        };

        GraphStats {
            total_pages,
            total_links,
            ghost_links: self.ghost_links,
            isolated_pages: self.degrees.iter().filter(|&&d| d == 0).count(),
            connected_components: connected_components(&self.graph),
            average_degree,
        }
    }
}

/// Display size of a node: `log10(degree + 1) + 1`
pub fn node_value(degree: usize) -> f64 {
    ((degree + 1) as f64).log10() + 1.0
}
