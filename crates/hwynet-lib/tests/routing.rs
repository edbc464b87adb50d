use hwynet_lib::{parse_graph_str, shortest_paths, Error, Metric, Place};

mod common;
use common::{chain_graph, sample_graph};

fn place(city: &str, region: &str) -> Place {
    Place::new(city, region, 0.0, 0.0)
}

#[test]
fn origin_has_zero_distance_and_zero_hops() {
    let graph = sample_graph();
    for origin in graph.places() {
        let paths = shortest_paths(&graph, origin, Metric::Distance).expect("origin is a vertex");
        let node = paths.node(&graph, origin).expect("origin record exists");
        assert_eq!(node.distance, 0.0);
        assert_eq!(node.hops, 0);
        assert!(node.visited);
        assert!(node.parent.is_none());
    }
}

#[test]
fn chain_route_accumulates_distance_and_hops() {
    let graph = chain_graph();
    let paths = shortest_paths(&graph, &place("Alpha", "ZZ"), Metric::Distance).expect("runs");

    let gamma = place("Gamma", "ZZ");
    let node = paths.node(&graph, &gamma).expect("gamma record exists");
    assert_eq!(node.distance, 150.0);
    assert_eq!(node.hops, 2);

    let (route, total) = paths.path_to(&graph, &gamma);
    let cities: Vec<&str> = route.iter().map(|p| p.city.as_str()).collect();
    assert_eq!(cities, ["Alpha", "Beta", "Gamma"]);
    assert_eq!(total, 150.0);
}

#[test]
fn path_to_origin_is_the_single_place_path() {
    let graph = chain_graph();
    let alpha = place("Alpha", "ZZ");
    let paths = shortest_paths(&graph, &alpha, Metric::Distance).expect("runs");

    let (route, total) = paths.path_to(&graph, &alpha);
    assert_eq!(route.len(), 1);
    assert_eq!(route[0].city, "Alpha");
    assert_eq!(total, 0.0);
}

#[test]
fn unreachable_vertices_keep_infinite_distance() {
    let text = "\
Alpha,ZZ,1.0,1.0;Beta,ZZ,2.0,2.0,100,2m0s
Beta,ZZ,2.0,2.0;Alpha,ZZ,1.0,1.0,100,2m0s
Island,ZZ,9.0,9.0
";
    let graph = parse_graph_str(text).expect("parses");
    let paths = shortest_paths(&graph, &place("Alpha", "ZZ"), Metric::Distance).expect("runs");

    let island = place("Island", "ZZ");
    let node = paths.node(&graph, &island).expect("island record exists");
    assert!(node.distance.is_infinite());
    assert_eq!(node.hops, 0);
    assert!(node.parent.is_none());
    assert!(!node.visited);

    let (route, total) = paths.path_to(&graph, &island);
    assert!(route.is_empty());
    assert_eq!(total, 0.0);
}

#[test]
fn absent_origin_fails_immediately() {
    let graph = chain_graph();
    let error =
        shortest_paths(&graph, &place("Nowhere", "XX"), Metric::Distance).expect_err("must fail");
    assert!(matches!(error, Error::PlaceNotInGraph { .. }));

    // destination-only mentions are not vertices either
    let solo = parse_graph_str("Solo,ZZ,1.0,1.0;Mention,ZZ,2.0,2.0,10,1m0s").expect("parses");
    let error = shortest_paths(&solo, &place("Mention", "ZZ"), Metric::Distance)
        .expect_err("must fail");
    assert!(matches!(error, Error::PlaceNotInGraph { .. }));
}

#[test]
fn metric_changes_the_winning_route() {
    let text = "\
Hub,ZZ,0.0,1.0;Spoke,ZZ,0.0,2.0,50,10m0s;Relay,ZZ,0.0,3.0,100,1m0s
Relay,ZZ,0.0,3.0;Spoke,ZZ,0.0,2.0,100,1m0s
Spoke,ZZ,0.0,2.0
";
    let graph = parse_graph_str(text).expect("parses");
    let hub = place("Hub", "ZZ");
    let spoke = place("Spoke", "ZZ");

    let by_distance = shortest_paths(&graph, &hub, Metric::Distance).expect("runs");
    let (route, total) = by_distance.path_to(&graph, &spoke);
    let cities: Vec<&str> = route.iter().map(|p| p.city.as_str()).collect();
    assert_eq!(cities, ["Hub", "Spoke"]);
    assert_eq!(total, 50.0);

    let by_time = shortest_paths(&graph, &hub, Metric::TravelTime).expect("runs");
    let (route, total) = by_time.path_to(&graph, &spoke);
    let cities: Vec<&str> = route.iter().map(|p| p.city.as_str()).collect();
    assert_eq!(cities, ["Hub", "Relay", "Spoke"]);
    assert_eq!(total, 2.0, "two one-minute hops");
}

#[test]
fn equal_cost_ties_settle_toward_the_lower_id() {
    let text = "\
Start,ZZ,0.0,0.0;Left,ZZ,1.0,0.0,50,1m0s;Right,ZZ,0.0,1.0,50,1m0s
Left,ZZ,1.0,0.0;Goal,ZZ,1.0,1.0,50,1m0s
Right,ZZ,0.0,1.0;Goal,ZZ,1.0,1.0,50,1m0s
Goal,ZZ,1.0,1.0
";
    let graph = parse_graph_str(text).expect("parses");
    let paths = shortest_paths(&graph, &place("Start", "ZZ"), Metric::Distance).expect("runs");

    let (route, total) = paths.path_to(&graph, &place("Goal", "ZZ"));
    let cities: Vec<&str> = route.iter().map(|p| p.city.as_str()).collect();
    assert_eq!(cities, ["Start", "Left", "Goal"], "Left was interned first");
    assert_eq!(total, 100.0);
}

#[test]
fn reconstructed_paths_have_hops_plus_one_places() {
    let graph = sample_graph();
    for origin in graph.places() {
        let paths = shortest_paths(&graph, origin, Metric::Distance).expect("runs");
        for destination in graph.places() {
            let node = paths.node(&graph, destination).expect("record exists");
            if node.distance.is_infinite() {
                continue;
            }
            let (route, _) = paths.path_to(&graph, destination);
            assert_eq!(route.len(), node.hops + 1);
            assert_eq!(route[0].name(), origin.name());
            assert_eq!(
                route.last().map(Place::name),
                Some(destination.name())
            );
        }
    }
}

#[test]
fn path_map_covers_every_vertex() {
    let graph = sample_graph();
    let origin = place("Springfield", "IL");
    let paths = shortest_paths(&graph, &origin, Metric::Distance).expect("runs");
    assert_eq!(paths.len(), graph.len());
}
