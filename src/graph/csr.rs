//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR is optimized for iteration over neighbors, which is exactly what
//! TextRank needs during power iteration. Sentence similarity graphs are
//! usually far from complete, so only positive weights are stored.

/// An undirected weighted graph in Compressed Sparse Row format
///
/// Every edge is stored in both directions with the same weight, so the
/// adjacency is symmetric by construction. There are no self-loops.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge, ascending within a row
    pub col_idx: Vec<u32>,
    /// Edge weights
    pub weights: Vec<f64>,
    /// Total edge weight for each node
    pub total_weight: Vec<f64>,
}

impl CsrGraph {
    /// Build from the strictly upper-triangular rows of an adjacency matrix.
    ///
    /// `upper[i]` holds `(j, w)` pairs with `j > i`, ascending by `j`. Each
    /// pair becomes the edges `i -> j` and `j -> i`.
    pub fn from_upper_rows(num_nodes: usize, upper: &[Vec<(u32, f64)>]) -> Self {
        let mut adjacency: Vec<Vec<(u32, f64)>> = vec![Vec::new(); num_nodes];
        for (i, row) in upper.iter().enumerate() {
            for &(j, weight) in row {
                debug_assert!(j as usize > i, "upper rows must have j > i");
                if weight <= 0.0 || j as usize == i {
                    continue;
                }
                adjacency[i].push((j, weight));
                adjacency[j as usize].push((i as u32, weight));
            }
        }

        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut total_weight = Vec::with_capacity(num_nodes);

        row_ptr.push(0);
        for edges in adjacency {
            // Rows are filled in ascending i, so each list is already sorted
            total_weight.push(edges.iter().map(|(_, w)| w).sum());
            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            total_weight,
        }
    }

    /// A graph with `num_nodes` nodes and no edges.
    pub fn isolated(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            row_ptr: vec![0; num_nodes + 1],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: vec![0.0; num_nodes],
        }
    }

    /// Iterate over neighbors of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Get the degree of a node
    pub fn degree(&self, node: u32) -> usize {
        self.row_ptr[node as usize + 1] - self.row_ptr[node as usize]
    }

    /// Get the total edge weight of a node
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Get the total number of edges (counting each undirected edge twice)
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }
}

#[cfg(test)]
impl CsrGraph {
    /// Weight of the edge between two nodes, 0 if absent
    pub(crate) fn weight(&self, from: u32, to: u32) -> f64 {
        let start = self.row_ptr[from as usize];
        let end = self.row_ptr[from as usize + 1];
        match self.col_idx[start..end].binary_search(&to) {
            Ok(pos) => self.weights[start + pos],
            Err(_) => 0.0,
        }
    }

    /// Nodes with no positive-weight neighbor
    pub(crate) fn isolated_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.degree(n) == 0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::isolated(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_graph() -> CsrGraph {
        // 0-1: 1.0, 0-2: 1.5, 1-2: 2.0, node 3 isolated
        CsrGraph::from_upper_rows(
            4,
            &[
                vec![(1, 1.0), (2, 1.5)],
                vec![(2, 2.0)],
                vec![],
                vec![],
            ],
        )
    }

    #[test]
    fn test_csr_conversion() {
        let csr = build_test_graph();

        assert_eq!(csr.num_nodes, 4);
        assert_eq!(csr.num_edges(), 6);
    }

    #[test]
    fn test_neighbor_iteration_is_symmetric() {
        let csr = build_test_graph();

        let neighbors: Vec<_> = csr.neighbors(2).collect();
        assert_eq!(neighbors, vec![(0, 1.5), (1, 2.0)]);

        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(csr.weight(i, j), csr.weight(j, i));
            }
        }
    }

    #[test]
    fn test_degree_and_weight() {
        let csr = build_test_graph();

        assert_eq!(csr.degree(0), 2);
        assert!((csr.node_total_weight(0) - 2.5).abs() < 1e-10);
        assert!((csr.node_total_weight(2) - 3.5).abs() < 1e-10);
        assert_eq!(csr.weight(0, 3), 0.0);
    }

    #[test]
    fn test_no_self_loops() {
        let csr = build_test_graph();
        for i in 0..4 {
            assert_eq!(csr.weight(i, i), 0.0);
        }
    }

    #[test]
    fn test_isolated_nodes() {
        let csr = build_test_graph();
        assert_eq!(csr.isolated_nodes(), vec![3]);

        let empty = CsrGraph::isolated(3);
        assert_eq!(empty.isolated_nodes(), vec![0, 1, 2]);
        assert!(CsrGraph::default().is_empty());
    }
}
