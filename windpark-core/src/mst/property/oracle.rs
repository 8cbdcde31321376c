//! Prim oracle for spanning-topology property tests.
//!
//! Grows a minimum spanning tree from each unvisited node in turn, which
//! yields the minimum spanning forest by a route independent of Kruskal.
//! All minimum spanning forests share the same multiset of weights, so the
//! total weight is comparable whatever ties each algorithm breaks.

/// Totals of the minimum spanning forest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct OracleForest {
    pub total_weight: u64,
    pub edge_count: usize,
    pub component_count: usize,
}

/// Dense Prim over the admitted pairs.
pub(super) fn prim_forest(
    node_count: usize,
    edges: impl IntoIterator<Item = (usize, usize, u32)>,
) -> OracleForest {
    let mut matrix = vec![vec![None::<u32>; node_count]; node_count];
    for (left, right, weight) in edges {
        matrix[left][right] = Some(weight);
        matrix[right][left] = Some(weight);
    }

    let mut in_tree = vec![false; node_count];
    let mut forest = OracleForest {
        total_weight: 0,
        edge_count: 0,
        component_count: 0,
    };

    for root in 0..node_count {
        if in_tree[root] {
            continue;
        }
        forest.component_count += 1;
        let mut best: Vec<Option<u32>> = matrix[root].clone();
        in_tree[root] = true;

        loop {
            let next = (0..node_count)
                .filter(|&node| !in_tree[node])
                .filter_map(|node| best[node].map(|weight| (weight, node)))
                .min();
            let Some((weight, node)) = next else {
                break;
            };
            in_tree[node] = true;
            forest.total_weight += u64::from(weight);
            forest.edge_count += 1;
            for other in 0..node_count {
                if let Some(candidate) = matrix[node][other] {
                    if best[other].is_none_or(|current| candidate < current) {
                        best[other] = Some(candidate);
                    }
                }
            }
        }
    }
    forest
}
