use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Graph, Metric, PlaceId};
use crate::place::Place;

/// Shortest-path bookkeeping for one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathNode {
    /// Whether the vertex was settled by the search. Unreachable vertices
    /// stay unvisited.
    pub visited: bool,
    /// Tentative cost from the origin under the query metric; `+inf` for
    /// unreachable vertices.
    pub distance: f64,
    /// Number of edges on the recorded shortest path; 0 for the origin and
    /// for unreachable vertices.
    pub hops: usize,
    /// Predecessor on the recorded shortest path.
    pub parent: Option<PlaceId>,
}

impl PathNode {
    fn unvisited() -> Self {
        Self {
            visited: false,
            distance: f64::INFINITY,
            hops: 0,
            parent: None,
        }
    }
}

/// Per-origin result of [`shortest_paths`]: one [`PathNode`] for every
/// vertex of the graph. Fully determined once the search returns; never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct PathMap {
    origin: PlaceId,
    nodes: BTreeMap<PlaceId, PathNode>,
}

impl PathMap {
    /// Id of the origin vertex the search ran from.
    pub fn origin(&self) -> PlaceId {
        self.origin
    }

    /// Number of vertices covered by the map.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bookkeeping record for a vertex id.
    pub fn get(&self, id: PlaceId) -> Option<&PathNode> {
        self.nodes.get(&id)
    }

    /// Bookkeeping record for a place, resolved through the graph the
    /// search ran over.
    pub fn node(&self, graph: &Graph, place: &Place) -> Option<&PathNode> {
        self.nodes.get(&graph.id_of(&place.city, &place.region)?)
    }

    /// Records in ascending vertex-id order.
    pub fn iter(&self) -> impl Iterator<Item = (PlaceId, &PathNode)> + '_ {
        self.nodes.iter().map(|(&id, node)| (id, node))
    }

    /// Reconstruct the origin-to-`destination` path and its total cost.
    ///
    /// Returns an empty path (and zero cost) when no path exists, which is
    /// the case when the destination is not a vertex or when its hop count
    /// is zero without it being the origin. Otherwise the returned
    /// sequence starts at the origin, ends at the destination, and has
    /// `hops + 1` places.
    pub fn path_to(&self, graph: &Graph, destination: &Place) -> (Vec<Place>, f64) {
        let Some(destination_id) = graph.id_of(&destination.city, &destination.region) else {
            return (Vec::new(), 0.0);
        };
        let Some(node) = self.nodes.get(&destination_id) else {
            return (Vec::new(), 0.0);
        };
        if node.hops == 0 && destination_id != self.origin {
            return (Vec::new(), 0.0);
        }

        let mut path = Vec::with_capacity(node.hops + 1);
        let mut current = Some(destination_id);
        while let Some(id) = current {
            path.push(graph.place(id).clone());
            if id == self.origin {
                break;
            }
            current = self.nodes.get(&id).and_then(|node| node.parent);
        }
        path.reverse();
        (path, node.distance)
    }
}

/// Single-source shortest paths from `origin` over every vertex of
/// `graph`, using Dijkstra's algorithm with a binary heap.
///
/// Edge costs come from `metric` and must be nonnegative; that is a
/// precondition on the caller, not something the engine validates. Ties
/// between equal tentative costs settle the lower vertex id first, so
/// results are reproducible.
///
/// Fails with [`Error::PlaceNotInGraph`] when `origin` is not a vertex.
pub fn shortest_paths(graph: &Graph, origin: &Place, metric: Metric) -> Result<PathMap> {
    let origin_id = graph
        .id_of(&origin.city, &origin.region)
        .ok_or_else(|| Error::PlaceNotInGraph {
            name: origin.name(),
        })?;

    let mut nodes: BTreeMap<PlaceId, PathNode> = graph
        .vertex_ids()
        .map(|id| (id, PathNode::unvisited()))
        .collect();
    if let Some(node) = nodes.get_mut(&origin_id) {
        node.distance = 0.0;
    }

    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry::new(origin_id, 0.0));

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        let (current_distance, current_hops) = match nodes.get_mut(&current) {
            // stale heap entry: a cheaper copy was settled earlier
            Some(node) if node.visited => continue,
            Some(node) => {
                node.visited = true;
                (node.distance, node.hops)
            }
            None => continue,
        };

        for (&next, weight) in graph.edges(current) {
            // edges may point at destination-only mentions outside the
            // vertex set; those cannot be routed through
            let Some(node) = nodes.get_mut(&next) else {
                continue;
            };
            if node.visited {
                continue;
            }
            let candidate = current_distance + metric.cost(weight);
            if candidate < node.distance {
                node.distance = candidate;
                node.hops = current_hops + 1;
                node.parent = Some(current);
                queue.push(QueueEntry::new(next, candidate));
            }
        }
    }

    Ok(PathMap {
        origin: origin_id,
        nodes,
    })
}

/// Total-order wrapper so f64 costs can live in the heap.
#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: PlaceId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: PlaceId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, with
        // the lower vertex id winning ties.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
