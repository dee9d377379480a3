//! Append-only node and edge registry filled while pages are processed.

use indexmap::IndexMap;
use vaultpress_core::Edge;

/// Nodes (page URL to title) and raw edges observed during a build.
///
/// Nodes keep insertion order, which later becomes their graph ID. Edges are
/// stored as observed, duplicates and ghosts included; [`crate::KnowledgeGraph`]
/// cleans them up once every node is known.
#[derive(Debug, Clone, Default)]
pub struct GraphAccumulator {
    nodes: IndexMap<String, String>,
    edges: Vec<Edge>,
}

impl GraphAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page. Re-registering a URL updates its title but keeps its
    /// original position.
    pub fn add_node(&mut self, url: impl Into<String>, title: impl Into<String>) -> bool {
        let url = url.into();
        let title = title.into();
        match self.nodes.insert(url.clone(), title) {
            None => true,
            Some(previous) => {
                log::debug!("Page {} registered twice (was '{}')", url, previous);
                false
            }
        }
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn extend<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = Edge>,
    {
        self.edges.extend(edges);
    }

    /// Nodes in registration order
    pub fn nodes(&self) -> &IndexMap<String, String> {
        &self.nodes
    }

    /// Raw edges in observation order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_keep_first_position() {
        let mut acc = GraphAccumulator::new();
        assert!(acc.add_node("/docs/b", "B"));
        assert!(acc.add_node("/docs/a", "A"));
        assert!(!acc.add_node("/docs/b", "B2"));

        let urls: Vec<_> = acc.nodes().keys().cloned().collect();
        assert_eq!(urls, vec!["/docs/b", "/docs/a"]);
        assert_eq!(acc.nodes()["/docs/b"], "B2");
    }

    #[test]
    fn test_edges_are_kept_raw() {
        let mut acc = GraphAccumulator::new();
        acc.add_edge(Edge::new("/docs/a", "/docs/b"));
        acc.extend([Edge::new("/docs/b", "/docs/a"), Edge::new("/docs/a", "/404")]);
        assert_eq!(acc.edges().len(), 3);
        assert!(!acc.is_empty());
    }
}
