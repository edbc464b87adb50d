use std::time::Duration;

use hwynet_lib::{parse_graph_str, serialize_graph_string, Error, Place};

mod common;
use common::{sample_graph, SAMPLE_TEXT};

#[test]
fn parses_single_vertex_with_one_edge() {
    let graph = parse_graph_str(
        "Springfield,IL,39.78,-89.65;Chicago,IL,41.88,-87.63,300000,3h0m0s",
    )
    .expect("line parses");

    assert_eq!(graph.len(), 1, "only the origin is a vertex");
    let names: Vec<String> = graph.places().map(Place::name).collect();
    assert_eq!(names, ["Springfield,IL"]);

    let springfield = Place::new("Springfield", "IL", 39.78, -89.65);
    let chicago = Place::new("Chicago", "IL", 41.88, -87.63);
    let weight = graph.edge(&springfield, &chicago).expect("edge exists");
    assert_eq!(weight.distance, 300_000.0);
    assert_eq!(weight.travel_time, Duration::from_secs(3 * 3600));
}

#[test]
fn skips_comments_and_blank_lines() {
    let graph = parse_graph_str("# heading\n\nAlpha,ZZ,1.0,2.0\n   \n# tail\n").expect("parses");
    assert_eq!(graph.len(), 1);
}

#[test]
fn reports_wrong_place_field_count_with_line_number() {
    let error = parse_graph_str("# heading\n\nSpringfield,IL,39.78\n").expect_err("must fail");
    match error {
        Error::MalformedLine { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("4 place fields"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_invalid_latitude() {
    let error = parse_graph_str("Springfield,IL,north,-89.65\n").expect_err("must fail");
    match error {
        Error::MalformedLine { line, reason } => {
            assert_eq!(line, 1);
            assert!(reason.contains("invalid latitude"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_invalid_duration() {
    let text = "Springfield,IL,39.78,-89.65;Chicago,IL,41.88,-87.63,300000,3x";
    let error = parse_graph_str(text).expect_err("must fail");
    match error {
        Error::MalformedLine { line, reason } => {
            assert_eq!(line, 1);
            assert!(reason.contains("invalid duration"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reports_negative_distance() {
    let text = "Springfield,IL,39.78,-89.65;Chicago,IL,41.88,-87.63,-5,3h0m0s";
    let error = parse_graph_str(text).expect_err("must fail");
    match error {
        Error::MalformedLine { reason, .. } => {
            assert!(reason.contains("negative distance"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn round_trips_vertex_and_edge_sets() {
    let original = sample_graph();
    let text = serialize_graph_string(&original);
    let reparsed = parse_graph_str(&text).expect("serialized output parses");

    let mut original_names: Vec<String> = original.places().map(Place::name).collect();
    let mut reparsed_names: Vec<String> = reparsed.places().map(Place::name).collect();
    original_names.sort();
    reparsed_names.sort();
    assert_eq!(original_names, reparsed_names);
    assert_eq!(original.edge_count(), reparsed.edge_count());

    for origin in original.places() {
        for destination in original.places() {
            assert_eq!(
                original.edge(origin, destination),
                reparsed.edge(origin, destination),
                "edge {} -> {}",
                origin.name(),
                destination.name()
            );
        }
    }
}

#[test]
fn serializes_vertices_sorted_by_region_then_city() {
    let text = serialize_graph_string(&sample_graph());
    let origins: Vec<&str> = text
        .lines()
        .map(|line| line.split(';').next().unwrap_or_default())
        .collect();
    assert_eq!(
        origins,
        [
            "Bloomington,IL,40.48,-88.99",
            "Chicago,IL,41.88,-87.63",
            "Springfield,IL,39.78,-89.65",
            "St Louis,MO,38.63,-90.2",
        ]
    );
}

#[test]
fn sample_fixture_is_fully_symmetric() {
    assert!(sample_graph().asymmetric_edges().is_empty());
    assert_eq!(SAMPLE_TEXT.lines().filter(|l| !l.starts_with('#')).count(), 4);
}
