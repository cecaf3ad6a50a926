//! Minimum-cost flow on a residual graph, via successive shortest
//! augmenting paths. Path costs are found with queue-based Bellman-Ford,
//! which tolerates the negative reverse-edge costs of the residual graph.

use log::trace;
use std::collections::VecDeque;

const UNREACHABLE: i64 = i64::MAX / 4;

#[derive(Debug, Clone)]
struct Edge {
    to: usize,
    capacity: i64,
    cost: i64,
}

/// A residual flow network. Every call to [`FlowNetwork::add_edge`] stores
/// the forward edge and its reverse at paired indices (`id` and `id ^ 1`).
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    adjacency: Vec<Vec<usize>>,
    edges: Vec<Edge>,
}

/// Net result of an augmentation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSummary {
    pub flow: i64,
    pub cost: i64,
}

impl FlowNetwork {
    pub fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            edges: Vec::new(),
        }
    }

    /// Adds a directed edge and returns its id for later flow queries.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: i64, cost: i64) -> usize {
        let id = self.edges.len();
        self.edges.push(Edge { to, capacity, cost });
        self.adjacency[from].push(id);
        self.edges.push(Edge {
            to: from,
            capacity: 0,
            cost: -cost,
        });
        self.adjacency[to].push(id + 1);
        id
    }

    /// Units currently pushed through the forward edge `id`.
    pub fn flow_on(&self, id: usize) -> i64 {
        self.edges[id ^ 1].capacity
    }

    /// Pushes up to `limit` units from `source` to `sink`, always along a
    /// cheapest residual path, and returns the total flow and cost. Stops
    /// early when no augmenting path remains, so the returned flow may be
    /// less than `limit`.
    ///
    /// `interrupted` is polled once per augmentation round; returning true
    /// abandons the run and yields `None`. Edges are relaxed in insertion
    /// order with strict improvement, so equally-cheap paths resolve toward
    /// the earliest inserted edges and the outcome is reproducible.
    pub fn augment(
        &mut self,
        source: usize,
        sink: usize,
        limit: i64,
        mut interrupted: impl FnMut() -> bool,
    ) -> Option<FlowSummary> {
        let mut summary = FlowSummary { flow: 0, cost: 0 };
        while summary.flow < limit {
            if interrupted() {
                return None;
            }
            let Some(parent) = self.cheapest_path(source, sink) else {
                break;
            };

            let mut bottleneck = limit - summary.flow;
            let mut node = sink;
            while node != source {
                let edge = parent[node];
                bottleneck = bottleneck.min(self.edges[edge].capacity);
                node = self.edges[edge ^ 1].to;
            }

            let mut node = sink;
            while node != source {
                let edge = parent[node];
                self.edges[edge].capacity -= bottleneck;
                self.edges[edge ^ 1].capacity += bottleneck;
                summary.cost += bottleneck * self.edges[edge].cost;
                node = self.edges[edge ^ 1].to;
            }
            summary.flow += bottleneck;
            trace!(
                "Augmented {} unit(s), total flow {} at cost {}",
                bottleneck, summary.flow, summary.cost
            );
        }
        Some(summary)
    }

    /// Queue-based Bellman-Ford over residual capacity. Returns, for every
    /// node on a cheapest source-to-sink path, its parent edge id; `None`
    /// when the sink is unreachable.
    fn cheapest_path(&self, source: usize, sink: usize) -> Option<Vec<usize>> {
        let nodes = self.adjacency.len();
        let mut distance = vec![UNREACHABLE; nodes];
        let mut parent = vec![usize::MAX; nodes];
        let mut queued = vec![false; nodes];
        let mut queue = VecDeque::new();

        distance[source] = 0;
        queue.push_back(source);
        queued[source] = true;
        while let Some(node) = queue.pop_front() {
            queued[node] = false;
            for &id in &self.adjacency[node] {
                let edge = &self.edges[id];
                if edge.capacity > 0 && distance[node] + edge.cost < distance[edge.to] {
                    distance[edge.to] = distance[node] + edge.cost;
                    parent[edge.to] = id;
                    if !queued[edge.to] {
                        queue.push_back(edge.to);
                        queued[edge.to] = true;
                    }
                }
            }
        }
        (distance[sink] < UNREACHABLE).then_some(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never() -> impl FnMut() -> bool {
        || false
    }

    #[test]
    fn test_single_chain_carries_flow_and_cost() {
        let mut network = FlowNetwork::new(3);
        let first = network.add_edge(0, 1, 2, 3);
        let second = network.add_edge(1, 2, 2, 1);
        let summary = network.augment(0, 2, 2, never()).unwrap();
        assert_eq!(summary, FlowSummary { flow: 2, cost: 8 });
        assert_eq!(network.flow_on(first), 2);
        assert_eq!(network.flow_on(second), 2);
    }

    #[test]
    fn test_prefers_cheaper_parallel_path() {
        let mut network = FlowNetwork::new(2);
        let expensive = network.add_edge(0, 1, 1, 5);
        let cheap = network.add_edge(0, 1, 1, 1);
        let summary = network.augment(0, 1, 1, never()).unwrap();
        assert_eq!(summary, FlowSummary { flow: 1, cost: 1 });
        assert_eq!(network.flow_on(cheap), 1);
        assert_eq!(network.flow_on(expensive), 0);
    }

    #[test]
    fn test_flow_stops_at_cut_capacity() {
        let mut network = FlowNetwork::new(3);
        network.add_edge(0, 1, 5, 0);
        network.add_edge(1, 2, 3, 0);
        let summary = network.augment(0, 2, 5, never()).unwrap();
        assert_eq!(summary.flow, 3);
    }

    #[test]
    fn test_reroutes_through_residual_edges() {
        // Both units fit only if the first is pushed back off the shared
        // target: 0->1 and 0->2 supply, node 2 reaches only target 3,
        // node 1 reaches targets 3 and 4.
        let mut network = FlowNetwork::new(6);
        network.add_edge(0, 1, 1, 0);
        network.add_edge(0, 2, 1, 0);
        network.add_edge(1, 3, 1, 0);
        network.add_edge(1, 4, 1, 0);
        network.add_edge(2, 3, 1, 0);
        network.add_edge(3, 5, 1, 0);
        network.add_edge(4, 5, 1, 0);
        let summary = network.augment(0, 5, 2, never()).unwrap();
        assert_eq!(summary.flow, 2);
    }

    #[test]
    fn test_interruption_abandons_the_run() {
        let mut network = FlowNetwork::new(2);
        network.add_edge(0, 1, 1, 0);
        assert!(network.augment(0, 1, 1, || true).is_none());
    }

    #[test]
    fn test_zero_limit_is_a_no_op() {
        let mut network = FlowNetwork::new(2);
        let edge = network.add_edge(0, 1, 1, 0);
        let summary = network.augment(0, 1, 0, never()).unwrap();
        assert_eq!(summary, FlowSummary { flow: 0, cost: 0 });
        assert_eq!(network.flow_on(edge), 0);
    }
}
