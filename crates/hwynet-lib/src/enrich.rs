//! Collaborator seam for filling in geocoded coordinates and travel
//! weights.
//!
//! Geocoding and distance-matrix services live outside the core behind the
//! [`Geocoder`] and [`TravelMatrix`] traits; implementations own their API
//! credentials, passed in at construction rather than read from ambient
//! state. A failed or ambiguous lookup never aborts an enrichment pass:
//! the affected item keeps its zero value and the failure is collected in
//! the returned [`EnrichReport`].

use std::fmt;

use tracing::warn;

use crate::graph::{Graph, PlaceId, Weight};
use crate::place::Place;

/// Resolves a place name (`City,Region`) to `(latitude, longitude)`.
/// `None` covers both failed and ambiguous lookups.
pub trait Geocoder {
    fn resolve_location(&self, name: &str) -> Option<(f64, f64)>;
}

/// Resolves travel distance and time from one origin to a batch of
/// destinations. The result carries one slot per destination, in order;
/// `None` marks a per-item failure.
pub trait TravelMatrix {
    fn resolve_travel(&self, origin: &Place, destinations: &[Place]) -> Vec<Option<Weight>>;
}

/// A single failed lookup recorded during [`enrich_graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichFailure {
    /// Geocoding failed; the place keeps zero coordinates.
    Location { place: String },
    /// The travel lookup failed; the edge keeps its zero weight.
    Travel { origin: String, destination: String },
}

impl fmt::Display for EnrichFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichFailure::Location { place } => {
                write!(f, "no location found for {place}")
            }
            EnrichFailure::Travel {
                origin,
                destination,
            } => write!(f, "no travel data for {origin} -> {destination}"),
        }
    }
}

/// Outcome summary of an enrichment pass.
#[derive(Debug, Clone, Default)]
pub struct EnrichReport {
    pub failures: Vec<EnrichFailure>,
}

impl EnrichReport {
    /// Whether every lookup succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fill unset coordinates and unset edge weights in `graph` using the
/// collaborator services. Items whose lookup fails keep their zero values
/// so the vertex and edge sets stay intact; every failure lands in the
/// report.
pub fn enrich_graph(
    graph: &mut Graph,
    geocoder: &dyn Geocoder,
    travel: &dyn TravelMatrix,
) -> EnrichReport {
    let mut report = EnrichReport::default();
    locate_places(graph, geocoder, &mut report);
    weigh_edges(graph, travel, &mut report);
    report
}

/// Coordinates come first so the travel lookups see located places.
fn locate_places(graph: &mut Graph, geocoder: &dyn Geocoder, report: &mut EnrichReport) {
    for id in 0..graph.interned_count() {
        if graph.place(id).has_location() {
            continue;
        }
        let name = graph.place(id).name();
        match geocoder.resolve_location(&name) {
            Some((latitude, longitude)) => graph.set_location(id, latitude, longitude),
            None => {
                warn!(place = %name, "geocoding failed");
                report.failures.push(EnrichFailure::Location { place: name });
            }
        }
    }
}

fn weigh_edges(graph: &mut Graph, travel: &dyn TravelMatrix, report: &mut EnrichReport) {
    let origins: Vec<PlaceId> = graph.vertex_ids().collect();
    for origin_id in origins {
        let pending: Vec<PlaceId> = graph
            .edges(origin_id)
            .iter()
            .filter(|(_, weight)| weight.is_unset())
            .map(|(&id, _)| id)
            .collect();
        if pending.is_empty() {
            continue;
        }

        let origin = graph.place(origin_id).clone();
        let destinations: Vec<Place> = pending.iter().map(|&id| graph.place(id).clone()).collect();
        let resolved = travel.resolve_travel(&origin, &destinations);

        for (slot, &destination_id) in pending.iter().enumerate() {
            match resolved.get(slot).copied().flatten() {
                Some(weight) => graph.add_edge(origin_id, destination_id, weight),
                None => {
                    let destination = graph.place(destination_id).name();
                    warn!(origin = %origin.name(), destination = %destination, "travel lookup failed");
                    report.failures.push(EnrichFailure::Travel {
                        origin: origin.name(),
                        destination,
                    });
                }
            }
        }
    }
}
