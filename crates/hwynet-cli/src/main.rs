use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hwynet_lib::{
    find_within, format_duration, most_extreme, parse_graph, resolve_place,
    serialize_graph_string, shortest_paths, Error as LibError, Extremum, Graph, Metric, Place,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Highway graph utilities")]
struct Cli {
    /// Read the graph from this file instead of stdin.
    #[arg(long, global = true)]
    graph: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the unique places in the graph.
    Places {
        /// Sort order for the listing.
        #[arg(long, value_enum, default_value = "city")]
        sort: SortOrder,
    },
    /// Look up a place by name or by geographic location.
    #[command(subcommand)]
    Find(FindCommand),
    /// Compute the shortest route between two places.
    Route {
        /// Origin place as `City,Region`.
        #[arg(long)]
        from: String,
        /// Destination place as `City,Region`.
        #[arg(long)]
        to: String,
        /// Cost to minimize.
        #[arg(long, value_enum, default_value = "distance")]
        metric: CostMetric,
        /// Emit the route as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Pick the extreme outgoing edge of a place.
    Extreme {
        /// Origin place as `City,Region`.
        #[arg(long)]
        origin: String,
        /// Whether to pick the smallest or largest edge.
        #[arg(long, value_enum, default_value = "max")]
        pick: Pick,
        /// Cost to compare edges by.
        #[arg(long, value_enum, default_value = "distance")]
        metric: CostMetric,
    },
    /// Parse the graph and write it back in canonical form.
    Fmt,
    /// Report directed segments whose reverse segment is missing.
    Check,
}

#[derive(Subcommand, Debug)]
enum FindCommand {
    /// Case-insensitive lookup by `City,Region` name.
    Name { name: String },
    /// Nearest place within `radius` meters of a coordinate.
    Near {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        radius: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortOrder {
    City,
    Region,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CostMetric {
    Distance,
    Time,
}

impl From<CostMetric> for Metric {
    fn from(metric: CostMetric) -> Self {
        match metric {
            CostMetric::Distance => Metric::Distance,
            CostMetric::Time => Metric::TravelTime,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Pick {
    Min,
    Max,
}

impl From<Pick> for Extremum {
    fn from(pick: Pick) -> Self {
        match pick {
            Pick::Min => Extremum::Min,
            Pick::Max => Extremum::Max,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let graph = load_graph(cli.graph.as_deref())?;

    match cli.command {
        Command::Places { sort } => handle_places(&graph, sort),
        Command::Find(FindCommand::Name { name }) => handle_find_name(&graph, &name),
        Command::Find(FindCommand::Near {
            latitude,
            longitude,
            radius,
        }) => handle_find_near(&graph, latitude, longitude, radius),
        Command::Route {
            from,
            to,
            metric,
            json,
        } => handle_route(&graph, &from, &to, metric.into(), json),
        Command::Extreme {
            origin,
            pick,
            metric,
        } => handle_extreme(&graph, &origin, pick.into(), metric.into()),
        Command::Fmt => handle_fmt(&graph),
        Command::Check => handle_check(&graph),
    }
}

fn load_graph(path: Option<&Path>) -> Result<Graph> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open graph file {}", path.display()))?;
            parse_graph(BufReader::new(file))
                .with_context(|| format!("failed to parse graph from {}", path.display()))
        }
        None => parse_graph(io::stdin().lock()).context("failed to parse graph from stdin"),
    }
}

fn handle_places(graph: &Graph, sort: SortOrder) -> Result<()> {
    let mut places: Vec<Place> = graph.places().cloned().collect();
    match sort {
        SortOrder::City => places.sort_by(Place::by_city_then_region),
        SortOrder::Region => places.sort_by(Place::by_region_then_city),
    }
    for place in places {
        println!("{place} ({}, {})", place.latitude, place.longitude);
    }
    Ok(())
}

fn handle_find_name(graph: &Graph, name: &str) -> Result<()> {
    let place = resolve_place(graph, name)?;
    println!("{place} ({}, {})", place.latitude, place.longitude);
    Ok(())
}

fn handle_find_near(graph: &Graph, latitude: f64, longitude: f64, radius: f64) -> Result<()> {
    match find_within(graph, latitude, longitude, radius) {
        Some((place, distance)) => {
            println!("{place} ({distance:.0} m away)");
            Ok(())
        }
        None => bail!("no place within {radius} m of ({latitude}, {longitude})"),
    }
}

#[derive(Serialize)]
struct RouteOutput<'a> {
    from: String,
    to: String,
    metric: Metric,
    hops: usize,
    total: f64,
    places: &'a [Place],
}

fn handle_route(graph: &Graph, from: &str, to: &str, metric: Metric, json: bool) -> Result<()> {
    let origin = resolve_place(graph, from)?.clone();
    let destination = resolve_place(graph, to)?.clone();

    let paths = shortest_paths(graph, &origin, metric)?;
    let (route, total) = paths.path_to(graph, &destination);
    if route.is_empty() {
        return Err(LibError::RouteNotFound {
            from: origin.name(),
            to: destination.name(),
        }
        .into());
    }

    let hops = route.len() - 1;
    if json {
        let output = RouteOutput {
            from: origin.name(),
            to: destination.name(),
            metric,
            hops,
            total,
            places: &route,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Route by {metric}: {hops} hops, {}", format_total(metric, total));
    for place in &route {
        println!("- {place}");
    }
    Ok(())
}

fn format_total(metric: Metric, total: f64) -> String {
    match metric {
        Metric::Distance => format!("{total:.0} m"),
        Metric::TravelTime => format!("{total:.1} min"),
    }
}

fn handle_extreme(graph: &Graph, origin: &str, pick: Extremum, metric: Metric) -> Result<()> {
    let origin = resolve_place(graph, origin)?;
    match most_extreme(graph, origin, pick, metric) {
        Some((destination, weight)) => {
            println!(
                "{destination} ({:.0} m, {})",
                weight.distance,
                format_duration(weight.travel_time)
            );
            Ok(())
        }
        None => bail!("{} has no outgoing segments", origin.name()),
    }
}

fn handle_fmt(graph: &Graph) -> Result<()> {
    print!("{}", serialize_graph_string(graph));
    Ok(())
}

fn handle_check(graph: &Graph) -> Result<()> {
    let missing = graph.asymmetric_edges();
    if missing.is_empty() {
        println!("all segments are symmetric");
        return Ok(());
    }
    for (from, to) in &missing {
        println!("{from} -> {to} has no reverse segment");
    }
    bail!("{} asymmetric segment(s)", missing.len());
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
