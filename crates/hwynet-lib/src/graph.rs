use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::place::{Place, PlaceKey};

/// Dense identifier for an interned place. Ids are assigned in insertion
/// order and double as the deterministic vertex ordering used for
/// enumeration and shortest-path tie-breaking.
pub type PlaceId = usize;

/// Edge attributes: travel distance in meters and travel time by car.
///
/// The zero value denotes "unset", a segment whose weight has not been
/// resolved yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Weight {
    /// Travel distance in meters.
    pub distance: f64,
    /// Travel time by car.
    pub travel_time: Duration,
}

impl Weight {
    pub fn new(distance: f64, travel_time: Duration) -> Self {
        Self {
            distance,
            travel_time,
        }
    }

    /// Travel time projected to fractional minutes.
    pub fn travel_minutes(&self) -> f64 {
        self.travel_time.as_secs_f64() / 60.0
    }

    /// Whether the weight still holds its zero "unset" value.
    pub fn is_unset(&self) -> bool {
        self.distance == 0.0 && self.travel_time == Duration::ZERO
    }
}

/// Scalar projection of a [`Weight`] used as the edge cost by
/// [`crate::search::most_extreme`] and [`crate::route::shortest_paths`].
///
/// Both projections are nonnegative for well-formed weights, which the
/// shortest-path engine relies on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Travel distance in meters.
    #[default]
    Distance,
    /// Travel time in fractional minutes.
    TravelTime,
}

impl Metric {
    /// Project `weight` onto this metric's scalar cost.
    pub fn cost(&self, weight: &Weight) -> f64 {
        match self {
            Metric::Distance => weight.distance,
            Metric::TravelTime => weight.travel_minutes(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Metric::Distance => "distance",
            Metric::TravelTime => "travel-time",
        };
        f.write_str(value)
    }
}

/// Outgoing edges of one vertex, keyed by destination id. Iteration is in
/// ascending id order, which keeps downstream results deterministic.
pub type EdgeMap = BTreeMap<PlaceId, Weight>;

/// Directed weighted graph of places connected by highway segments.
///
/// Places are interned: identity is the case-insensitive `(city, region)`
/// pair, so floating-point coordinates never participate in equality or
/// hashing. Duplicate entries merge into the existing vertex and the
/// first-seen coordinates win (a later sighting only fills in coordinates
/// the stored place lacks).
///
/// The vertex set is the set of origins, places that own an edge map.
/// Destinations mentioned only on edge lists are interned so edges can
/// reference them, but they stay out of the vertex set until a line of
/// their own appears.
///
/// Highway segments are usually symmetric, but the model does not enforce
/// that; [`Graph::asymmetric_edges`] is an offline consistency check.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    places: Vec<Place>,
    index: HashMap<PlaceKey, PlaceId>,
    adjacency: BTreeMap<PlaceId, EdgeMap>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Insert `place` as a vertex, returning its id. A place with the same
    /// normalized identity merges into the existing entry.
    pub fn insert_place(&mut self, place: Place) -> PlaceId {
        let id = self.intern(place);
        self.adjacency.entry(id).or_default();
        id
    }

    /// Add (or overwrite) the directed edge `origin -> destination`. The
    /// origin becomes a vertex if it was not one already.
    pub fn add_edge(&mut self, origin: PlaceId, destination: PlaceId, weight: Weight) {
        self.adjacency
            .entry(origin)
            .or_default()
            .insert(destination, weight);
    }

    /// Intern a place without adding it to the vertex set.
    pub(crate) fn intern(&mut self, place: Place) -> PlaceId {
        let key = place.key();
        if let Some(&id) = self.index.get(&key) {
            let existing = &mut self.places[id];
            if !existing.has_location() && place.has_location() {
                existing.latitude = place.latitude;
                existing.longitude = place.longitude;
            } else if place.has_location()
                && (place.latitude != existing.latitude || place.longitude != existing.longitude)
            {
                warn!(place = %existing, "merged duplicate place with differing coordinates");
            }
            return id;
        }

        let id = self.places.len();
        self.places.push(place);
        self.index.insert(key, id);
        id
    }

    /// The place interned under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this graph.
    pub fn place(&self, id: PlaceId) -> &Place {
        &self.places[id]
    }

    /// Id of the vertex matching `(city, region)` case-insensitively.
    pub fn id_of(&self, city: &str, region: &str) -> Option<PlaceId> {
        let id = *self.index.get(&PlaceKey::new(city, region))?;
        self.is_vertex(id).then_some(id)
    }

    /// Id of the vertex with the same normalized identity as `place`.
    pub(crate) fn vertex_id(&self, place: &Place) -> Option<PlaceId> {
        let id = *self.index.get(&place.key())?;
        self.is_vertex(id).then_some(id)
    }

    /// Id of any interned place (vertex or destination-only mention).
    pub(crate) fn interned_id(&self, place: &Place) -> Option<PlaceId> {
        self.index.get(&place.key()).copied()
    }

    /// Count of all interned places, including destination-only mentions.
    pub(crate) fn interned_count(&self) -> usize {
        self.places.len()
    }

    pub(crate) fn is_vertex(&self, id: PlaceId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub(crate) fn set_location(&mut self, id: PlaceId, latitude: f64, longitude: f64) {
        let place = &mut self.places[id];
        place.latitude = latitude;
        place.longitude = longitude;
    }

    /// Vertex ids in ascending (insertion) order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = PlaceId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Deduplicated vertex set in insertion (id) order. Callers needing a
    /// different order sort with [`Place::by_city_then_region`] or
    /// [`Place::by_region_then_city`].
    pub fn places(&self) -> impl Iterator<Item = &Place> + '_ {
        self.adjacency.keys().map(|&id| &self.places[id])
    }

    /// Outgoing edges of `id`; empty for ids outside the vertex set.
    pub fn edges(&self, id: PlaceId) -> &EdgeMap {
        static EMPTY: EdgeMap = EdgeMap::new();
        self.adjacency.get(&id).unwrap_or(&EMPTY)
    }

    /// Weight of the edge `origin -> destination`, if the two places are
    /// connected.
    pub fn edge(&self, origin: &Place, destination: &Place) -> Option<Weight> {
        let from = self.vertex_id(origin)?;
        let to = self.interned_id(destination)?;
        self.edges(from).get(&to).copied()
    }

    /// Consistency check: ordered pairs `(a, b)` where `a -> b` exists but
    /// `b -> a` does not. Not used by any query-time operation.
    pub fn asymmetric_edges(&self) -> Vec<(&Place, &Place)> {
        let mut missing = Vec::new();
        for (&from, edges) in &self.adjacency {
            for &to in edges.keys() {
                if !self.edges(to).contains_key(&from) {
                    missing.push((self.place(from), self.place(to)));
                }
            }
        }
        missing
    }
}
