use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::graph::{Graph, Metric, Weight};
use crate::place::Place;

/// Mean Earth radius in meters, used by the spherical law of cosines.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Maximum number of name suggestions attached to lookup errors.
const MAX_SUGGESTIONS: usize = 3;

/// Similarity floor below which a candidate name is not suggested.
const MIN_SIMILARITY: f64 = 0.7;

/// Min/max selector for [`most_extreme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

/// Case-insensitive lookup of a vertex by city and region.
///
/// The interning index and a first-match scan over the vertex list agree on
/// normalization, so the constant-time lookup returns the same vertex a
/// deterministic in-id-order scan would.
pub fn find_by_name<'a>(graph: &'a Graph, city: &str, region: &str) -> Option<&'a Place> {
    graph.id_of(city, region).map(|id| graph.place(id))
}

/// Resolve a `City,Region` name to a vertex, attaching "did you mean"
/// suggestions when the lookup fails.
pub fn resolve_place<'a>(graph: &'a Graph, name: &str) -> Result<&'a Place> {
    let Some((city, region)) = name.split_once(',') else {
        return Err(unknown_place(graph, name));
    };
    find_by_name(graph, city.trim(), region.trim()).ok_or_else(|| unknown_place(graph, name))
}

fn unknown_place(graph: &Graph, name: &str) -> Error {
    Error::UnknownPlace {
        name: name.to_string(),
        suggestions: suggest_names(graph, name, MAX_SUGGESTIONS),
    }
}

/// Vertex names similar to `query`, best first, at most `limit` entries.
pub fn suggest_names(graph: &Graph, query: &str, limit: usize) -> Vec<String> {
    let query = query.to_lowercase();
    let mut scored: Vec<(f64, String)> = graph
        .places()
        .map(|place| {
            let name = place.name();
            let score = strsim::jaro_winkler(&query, &name.to_lowercase());
            (score, name)
        })
        .filter(|(score, _)| *score >= MIN_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    scored.truncate(limit);
    scored.into_iter().map(|(_, name)| name).collect()
}

/// Nearest vertex within `radius_meters` of the probe coordinate, together
/// with its great-circle distance. Ties keep the earlier-id vertex.
pub fn find_within(
    graph: &Graph,
    latitude: f64,
    longitude: f64,
    radius_meters: f64,
) -> Option<(&Place, f64)> {
    let mut best: Option<(&Place, f64)> = None;
    for id in graph.vertex_ids() {
        let place = graph.place(id);
        let distance =
            great_circle_distance(latitude, longitude, place.latitude, place.longitude);
        if distance > radius_meters {
            continue;
        }
        match best {
            Some((_, current)) if current <= distance => {}
            _ => best = Some((place, distance)),
        }
    }
    best
}

/// Great-circle distance in meters between two coordinates, by the
/// spherical law of cosines:
/// `d = R * acos(sin p1 * sin p2 + cos p1 * cos p2 * cos dl)`.
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    // rounding can push the cosine just past 1 for identical or antipodal
    // points, which would make acos return NaN
    let cosine = (phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos())
        .clamp(-1.0, 1.0);
    EARTH_RADIUS_METERS * cosine.acos()
}

/// The outgoing edge of `origin` whose weight is extremal under `metric`,
/// as `(destination, weight)`.
///
/// The fold is seeded from the first edge, so a single edge is returned
/// as-is and an origin with no edges (or absent from the graph) yields
/// `None`. Comparison is strict, so ties keep the earliest edge in edge-map
/// order.
pub fn most_extreme<'a>(
    graph: &'a Graph,
    origin: &Place,
    extremum: Extremum,
    metric: Metric,
) -> Option<(&'a Place, Weight)> {
    let origin_id = graph.id_of(&origin.city, &origin.region)?;
    let mut edges = graph.edges(origin_id).iter();

    let (&first, &first_weight) = edges.next()?;
    let mut best = (first, first_weight);
    for (&destination, &weight) in edges {
        let better = match extremum {
            Extremum::Min => metric.cost(&weight) < metric.cost(&best.1),
            Extremum::Max => metric.cost(&weight) > metric.cost(&best.1),
        };
        if better {
            best = (destination, weight);
        }
    }
    Some((graph.place(best.0), best.1))
}
