use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use mazegraph::{
    generators::{Algorithm, StrategyWeight, generate},
    graph::build_graph,
    maze::{Cursor, DeadEndMasked, Direction, GridReader, Jumper, Size, StorageKind},
    settings::GenerationSettings,
    solvers::{SolverKind, bfs_distance, k_shortest_paths, solve},
};

/// Generate a maze, compress it into a junction graph and search it.
#[derive(Parser, Debug)]
#[command(name = "mazegraph", version, about)]
struct Cli {
    /// Cells along x
    #[arg(long, default_value_t = 10)]
    width: i32,
    /// Cells along y
    #[arg(long, default_value_t = 10)]
    height: i32,
    /// Cells along z, 1 for a flat maze
    #[arg(long, default_value_t = 1)]
    depth: i32,
    /// backtracker, growing-tree, prim, kruskal or binary-tree
    #[arg(short, long, default_value = "backtracker")]
    algorithm: Algorithm,
    /// Growing tree strategy as name=weight, repeatable
    #[arg(long = "strategy")]
    strategies: Vec<StrategyWeight>,
    /// Extra walls to remove, as a percentage of the cell count
    #[arg(long, default_value_t = 0.0)]
    loops: f64,
    /// Place start and end on random cells instead of opposite corners
    #[arg(long)]
    random_doors: bool,
    /// dense or sparse
    #[arg(long, default_value = "dense")]
    storage: StorageKind,
    #[arg(long)]
    seed: Option<u64>,
    /// dijkstra, astar, astar:manhattan or astar:euclidean
    #[arg(long, default_value = "dijkstra")]
    solver: SolverKind,
    /// Number of loopless paths to list
    #[arg(short, default_value_t = 1)]
    k: usize,
    /// Hide dead ends before building the graph
    #[arg(long)]
    mask_dead_ends: bool,
    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

/// Installs the global subscriber. The returned guard must live until exit so
/// buffered file logs are flushed.
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("mazegraph.log"));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn direction_letters(directions: &[Direction]) -> String {
    directions
        .iter()
        .map(|&d| match d {
            d if d == Direction::LEFT => 'L',
            d if d == Direction::RIGHT => 'R',
            d if d == Direction::DOWN => 'D',
            d if d == Direction::UP => 'U',
            d if d == Direction::BACK => 'B',
            d if d == Direction::FORWARD => 'F',
            _ => '?',
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = init_tracing(&cli);

    let settings = GenerationSettings {
        algorithm: cli.algorithm,
        size: Size::new(cli.width, cli.height, cli.depth),
        strategies: cli.strategies.clone(),
        wall_removal_percent: cli.loops,
        doors_at_edge: !cli.random_doors,
        storage: cli.storage,
        seed: cli.seed,
    };
    settings.validate()?;

    let generated = generate(&settings)?;
    let maze = &generated.maze;
    let hottest = generated.log.heatmap.values().copied().max().unwrap_or(0);
    println!(
        "{} maze {}: {} passages carved, busiest cell visited {} times",
        settings.algorithm,
        settings.size,
        generated.log.carve_events.len(),
        hottest
    );

    let graph = if cli.mask_dead_ends {
        build_graph(&DeadEndMasked::new(maze))?
    } else {
        build_graph(maze)?
    };
    println!(
        "Graph: {} nodes, {} edges (start {}, end {})",
        graph.node_count(),
        graph.edge_count(),
        graph.start(),
        graph.end()
    );

    let result = solve(&graph, cli.solver);
    match &result.path {
        Some(path) => {
            println!(
                "{}: shortest path {} steps through {} nodes",
                cli.solver,
                path.total_distance,
                path.nodes.len()
            );
            println!("{}", direction_letters(&path.directions));
            // Replay the path over the grid itself
            let mut jumper = Jumper::new(maze);
            for &direction in &path.directions {
                if let Err(err) = jumper.jump_in_direction(direction) {
                    tracing::warn!("[main] path does not follow the carved grid: {}", err);
                    break;
                }
            }
            if let Some(steps) = bfs_distance(maze, maze.start(), maze.end()) {
                if steps != path.total_distance {
                    tracing::warn!(
                        "[main] grid BFS found {} steps but the graph search found {}",
                        steps,
                        path.total_distance
                    );
                }
            }
        }
        None => println!("{}: no path from start to end", cli.solver),
    }

    if cli.k > 1 {
        let ranked = k_shortest_paths(&graph, graph.start(), graph.end(), cli.k);
        for (i, entry) in ranked.paths.iter().enumerate() {
            println!(
                "#{} length {} (+{})",
                i + 1,
                entry.path.total_distance,
                entry.distance_from_optimal
            );
        }
        if ranked.is_exhausted() {
            println!(
                "Only {} of {} requested paths exist",
                ranked.paths.len(),
                ranked.requested
            );
        }
    }
    Ok(())
}
