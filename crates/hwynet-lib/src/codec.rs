//! Canonical text format for highway graphs.
//!
//! One line per vertex:
//! `place;place,weight;place,weight;...` where `place` is
//! `city,region,latitude,longitude` and `weight` is
//! `distanceMeters,travelTime`. Travel times use Go-style duration syntax
//! (`3h0m0s`, `90m`, `2.5s`, `300ms`). Blank lines and lines whose first
//! character is `#` are skipped.
//!
//! Malformed fields are surfaced as line-scoped [`Error::MalformedLine`]
//! values rather than silently zeroed, so a bad data file fails loudly at
//! load time instead of corrupting query results later.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, Weight};
use crate::place::Place;

/// Parse the canonical text format from `reader` into a graph.
pub fn parse_graph<R: BufRead>(reader: R) -> Result<Graph> {
    let mut graph = Graph::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        parse_line(&mut graph, index + 1, trimmed)?;
    }
    debug!(
        places = graph.len(),
        edges = graph.edge_count(),
        "parsed graph"
    );
    Ok(graph)
}

/// Parse the canonical text format from an in-memory string.
pub fn parse_graph_str(text: &str) -> Result<Graph> {
    parse_graph(text.as_bytes())
}

fn parse_line(graph: &mut Graph, line: usize, text: &str) -> Result<()> {
    let mut tokens = text.split(';');
    // split always yields at least one token
    let origin = parse_place(line, tokens.next().unwrap_or_default())?;
    let origin_id = graph.insert_place(origin);

    for token in tokens {
        let (destination, weight) = parse_edge(line, token)?;
        let destination_id = graph.intern(destination);
        graph.add_edge(origin_id, destination_id, weight);
    }
    Ok(())
}

fn parse_place(line: usize, token: &str) -> Result<Place> {
    let fields: Vec<&str> = token.split(',').collect();
    if fields.len() != 4 {
        return Err(malformed(
            line,
            format!("expected 4 place fields, got {}: `{token}`", fields.len()),
        ));
    }
    let latitude = parse_float(line, fields[2], "latitude")?;
    let longitude = parse_float(line, fields[3], "longitude")?;
    Ok(Place::new(fields[0], fields[1], latitude, longitude))
}

fn parse_edge(line: usize, token: &str) -> Result<(Place, Weight)> {
    let fields: Vec<&str> = token.split(',').collect();
    if fields.len() != 6 {
        return Err(malformed(
            line,
            format!("expected 6 edge fields, got {}: `{token}`", fields.len()),
        ));
    }
    let latitude = parse_float(line, fields[2], "latitude")?;
    let longitude = parse_float(line, fields[3], "longitude")?;
    let distance = parse_float(line, fields[4], "distance")?;
    if distance < 0.0 {
        return Err(malformed(line, format!("negative distance `{}`", fields[4])));
    }
    let travel_time = parse_duration(fields[5])
        .ok_or_else(|| malformed(line, format!("invalid duration `{}`", fields[5])))?;

    let destination = Place::new(fields[0], fields[1], latitude, longitude);
    Ok((destination, Weight::new(distance, travel_time)))
}

fn parse_float(line: usize, field: &str, what: &str) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| malformed(line, format!("invalid {what} `{field}`")))
}

fn malformed(line: usize, reason: String) -> Error {
    Error::MalformedLine { line, reason }
}

/// Serialize `graph` in the canonical text format. Vertices are written
/// sorted by region then city so the output is stable; edge order within a
/// line follows the edge map and is not part of the round-trip contract.
pub fn serialize_graph<W: Write>(graph: &Graph, writer: &mut W) -> io::Result<()> {
    let mut ids: Vec<_> = graph.vertex_ids().collect();
    ids.sort_by(|&a, &b| Place::by_region_then_city(graph.place(a), graph.place(b)));

    for id in ids {
        write!(writer, "{}", place_fields(graph.place(id)))?;
        for (&destination, weight) in graph.edges(id) {
            write!(
                writer,
                ";{},{},{}",
                place_fields(graph.place(destination)),
                weight.distance,
                format_duration(weight.travel_time)
            )?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Serialize `graph` to an in-memory string.
pub fn serialize_graph_string(graph: &Graph) -> String {
    let mut buffer = Vec::new();
    // writing to a Vec cannot fail
    let _ = serialize_graph(graph, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn place_fields(place: &Place) -> String {
    format!(
        "{},{},{},{}",
        place.city, place.region, place.latitude, place.longitude
    )
}

/// Parse a Go-style duration literal: one or more `<number><unit>` groups
/// with units `h`, `m`, `s`, `ms`, `us`, `ns` (`3h0m0s`, `90m`, `2.5s`).
/// The bare literal `0` is accepted as zero.
pub fn parse_duration(text: &str) -> Option<Duration> {
    if text == "0" {
        return Some(Duration::ZERO);
    }

    let mut rest = text;
    let mut total_seconds = 0.0_f64;
    let mut any = false;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let value: f64 = rest[..number_end].parse().ok()?;
        rest = &rest[number_end..];

        let (unit_len, seconds_per_unit) = if rest.starts_with("ns") {
            (2, 1e-9)
        } else if rest.starts_with("us") {
            (2, 1e-6)
        } else if rest.starts_with("ms") {
            (2, 1e-3)
        } else if rest.starts_with('s') {
            (1, 1.0)
        } else if rest.starts_with('m') {
            (1, 60.0)
        } else if rest.starts_with('h') {
            (1, 3600.0)
        } else {
            return None;
        };
        rest = &rest[unit_len..];
        total_seconds += value * seconds_per_unit;
        any = true;
    }

    if !any || !total_seconds.is_finite() || total_seconds > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_secs_f64(total_seconds))
}

/// Format a duration in the Go style emitted by the serializer: `0s`,
/// `300ms`, `45s`, `5m30s`, `3h0m0s`. Larger units are omitted when zero;
/// smaller units are always written once a larger unit appears.
pub fn format_duration(duration: Duration) -> String {
    if duration == Duration::ZERO {
        return "0s".to_string();
    }

    let total_seconds = duration.as_secs();
    let nanos = duration.subsec_nanos();

    if total_seconds == 0 {
        return if nanos % 1_000_000 == 0 {
            format!("{}ms", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            format!("{}us", nanos / 1_000)
        } else {
            format!("{nanos}ns")
        };
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = (total_seconds % 60) as f64 + f64::from(nanos) / 1e9;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h{minutes}m"));
    } else if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&format!("{seconds}s"));
    out
}
