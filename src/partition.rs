//! Connected-component partitioning of the adjacency graph

use crate::adjacency::AdjacencyGraph;
use std::collections::VecDeque;

/// A maximal connected set of nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Position in partition order, also the output file number
    pub index: usize,

    /// Node indices, ascending
    pub members: Vec<usize>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Split the graph into connected groups
///
/// Nodes are seeded in ascending order and expanded breadth first, so group
/// `k` is the group whose smallest node is the k-th smallest seed. The result
/// is identical for identical graphs.
pub fn connected_components(graph: &AdjacencyGraph) -> Vec<Group> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut groups = Vec::new();
    let mut queue = VecDeque::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }

        visited[seed] = true;
        queue.push_back(seed);
        let mut members = Vec::new();

        while let Some(node) = queue.pop_front() {
            members.push(node);
            for &next in graph.neighbors(node) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        members.sort_unstable();
        groups.push(Group {
            index: groups.len(),
            members,
        });
    }

    groups
}
