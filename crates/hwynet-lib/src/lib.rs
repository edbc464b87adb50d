//! hwynet library entry points.
//!
//! This crate models a weighted directed graph of geographic places
//! connected by highway segments: parsing and serializing the canonical
//! text format, name and nearest-place search, and single-source shortest
//! paths. Higher-level consumers (the CLI, renderers) should depend on the
//! items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod codec;
pub mod enrich;
pub mod error;
pub mod graph;
pub mod place;
pub mod route;
pub mod search;

pub use codec::{
    format_duration, parse_duration, parse_graph, parse_graph_str, serialize_graph,
    serialize_graph_string,
};
pub use enrich::{enrich_graph, EnrichFailure, EnrichReport, Geocoder, TravelMatrix};
pub use error::{Error, Result};
pub use graph::{EdgeMap, Graph, Metric, PlaceId, Weight};
pub use place::Place;
pub use route::{shortest_paths, PathMap, PathNode};
pub use search::{
    find_by_name, find_within, great_circle_distance, most_extreme, resolve_place, suggest_names,
    Extremum, EARTH_RADIUS_METERS,
};
