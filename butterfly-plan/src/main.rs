use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use butterfly_common::Config;
use butterfly_io::{load_ch_snapshot, load_network, save_ch_snapshot, save_network};
use butterfly_plan::{ingest, Algorithm, ChQuery, GraphBuilder, Query};
use butterfly_routing::{BetweennessAlgorithm, BetweennessAnalysis, ContractionHierarchies};

#[derive(Parser)]
#[command(name = "butterfly-plan")]
#[command(about = "Builds and queries the transit shortest-path engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a network from NDJSON stop/variant/path/route dumps and save it as JSON.
    Build {
        #[arg(long)]
        stops: PathBuf,
        #[arg(long)]
        variants: PathBuf,
        #[arg(long)]
        paths: PathBuf,
        #[arg(long)]
        routes: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Preprocess a saved network into a Contraction Hierarchy snapshot.
    Ch {
        /// Input network JSON file
        network: PathBuf,
        /// Output CH snapshot file
        output: PathBuf,
        #[arg(long, value_enum, default_value = "lazy")]
        heuristic: HeuristicArg,
    },
    /// Query the shortest path between two stops.
    Route {
        /// Network JSON file
        network: PathBuf,
        /// Optional CH snapshot; when omitted, runs bidirectional Dijkstra directly
        #[arg(long)]
        ch: Option<PathBuf>,
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
    },
    /// Rank stops by betweenness centrality.
    Betweenness {
        /// Network JSON file
        network: PathBuf,
        #[arg(long, default_value = "10")]
        top: usize,
        #[arg(long, value_enum, default_value = "tree")]
        algorithm: BetweennessArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum HeuristicArg {
    Lazy,
    Periodic,
    Random,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BetweennessArg {
    Tree,
    Brute,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().target(env_logger::Target::Stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build { stops, variants, paths, routes, output } => run_build(stops, variants, paths, routes, output),
        Commands::Ch { network, output, heuristic } => run_ch(network, output, heuristic),
        Commands::Route { network, ch, from, to } => run_route(network, ch, from, to),
        Commands::Betweenness { network, top, algorithm } => run_betweenness(network, top, algorithm),
    }
}

fn run_build(stops: PathBuf, variants: PathBuf, paths: PathBuf, routes: PathBuf, output: PathBuf) -> Result<()> {
    log::info!("loading stop dump from {}", stops.display());
    let stops = ingest::load_stops(&stops).context("loading stops")?;
    log::info!("loading variant dump from {}", variants.display());
    let variants = ingest::load_variants(&variants).context("loading variants")?;
    log::info!("loading path dump from {}", paths.display());
    let paths = ingest::load_paths(&paths).context("loading paths")?;
    log::info!("loading route membership from {}", routes.display());
    let membership = ingest::load_route_membership(&routes).context("loading route membership")?;

    log::info!("building network from {} stops, {} variants", stops.len(), variants.len());
    let start = Instant::now();
    let net = GraphBuilder::build(stops, variants, paths, &membership, &Config::default()).context("building network")?;
    log::info!("built network with {} nodes in {:.2}s", net.len(), start.elapsed().as_secs_f64());

    save_network(&net, &output).context("saving network")?;
    log::info!("saved network to {}", output.display());
    Ok(())
}

fn run_ch(network: PathBuf, output: PathBuf, heuristic: HeuristicArg) -> Result<()> {
    log::info!("loading network from {}", network.display());
    let net = load_network(&network).context("loading network")?;

    let mut config = Config::default();
    config.ch_heuristic = match heuristic {
        HeuristicArg::Lazy => butterfly_common::ChHeuristic::Lazy,
        HeuristicArg::Periodic => butterfly_common::ChHeuristic::Periodic,
        HeuristicArg::Random => butterfly_common::ChHeuristic::Random,
    };

    log::info!("preprocessing {} nodes", net.len());
    let start = Instant::now();
    let ch = ContractionHierarchies::build(&net, &config);
    log::info!("preprocessing complete in {:.2}s, {} shortcuts", start.elapsed().as_secs_f64(), ch.no_shortcuts());

    save_ch_snapshot(&ch, &output).context("saving CH snapshot")?;
    log::info!("saved CH snapshot to {}", output.display());
    Ok(())
}

fn run_route(network: PathBuf, ch: Option<PathBuf>, from: i64, to: i64) -> Result<()> {
    let net = load_network(&network).context("loading network")?;

    match ch {
        Some(ch_path) => {
            let ch = load_ch_snapshot(&net, &ch_path).context("loading CH snapshot")?;
            let query = ChQuery::new(&ch);
            let (dist, path) = query.path(from, to);
            println!("distance: {dist}");
            println!("edges: {}", path.len());
        }
        None => {
            let query = Query::new(&net);
            let result = query.path(from, to, Algorithm::Bidirectional);
            println!("distance: {}", result.dist);
            println!("edges: {}", result.path.len());
        }
    }
    Ok(())
}

fn run_betweenness(network: PathBuf, top: usize, algorithm: BetweennessArg) -> Result<()> {
    let net = load_network(&network).context("loading network")?;
    let alg = match algorithm {
        BetweennessArg::Tree => BetweennessAlgorithm::Tree,
        BetweennessArg::Brute => BetweennessAlgorithm::Brute,
    };

    log::info!("computing betweenness over {} nodes", net.len());
    let analysis = BetweennessAnalysis::compute(&net, alg);
    let top_stops = analysis.top_scores(top.min(net.len())).context("ranking top stops")?;
    for stop in top_stops {
        println!("{stop}\t{}", analysis.score(stop));
    }
    Ok(())
}
