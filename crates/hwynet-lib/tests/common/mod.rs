//! Shared fixtures for hwynet-lib integration tests.
#![allow(dead_code)]

use hwynet_lib::{parse_graph_str, Graph};

/// Canonical-format sample: four places with symmetric highway segments.
pub const SAMPLE_TEXT: &str = "\
# sample highway data
Springfield,IL,39.78,-89.65;Bloomington,IL,40.48,-88.99,105000,1h10m0s;St Louis,MO,38.63,-90.2,155000,1h40m0s
Bloomington,IL,40.48,-88.99;Springfield,IL,39.78,-89.65,105000,1h10m0s;Chicago,IL,41.88,-87.63,215000,2h15m0s
Chicago,IL,41.88,-87.63;Bloomington,IL,40.48,-88.99,215000,2h15m0s
St Louis,MO,38.63,-90.2;Springfield,IL,39.78,-89.65,155000,1h40m0s
";

/// Three vertices in a line: Alpha -> Beta (100 m), Beta -> Gamma (50 m).
pub const CHAIN_TEXT: &str = "\
Alpha,ZZ,1.0,1.0;Beta,ZZ,2.0,2.0,100,2m0s
Beta,ZZ,2.0,2.0;Gamma,ZZ,3.0,3.0,50,1m0s
Gamma,ZZ,3.0,3.0
";

pub fn sample_graph() -> Graph {
    parse_graph_str(SAMPLE_TEXT).expect("sample fixture parses")
}

pub fn chain_graph() -> Graph {
    parse_graph_str(CHAIN_TEXT).expect("chain fixture parses")
}
