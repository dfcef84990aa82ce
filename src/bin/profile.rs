use std::time::{Duration, Instant};

use mazegraph::{
    generators::{Algorithm, generate_maze, get_rng},
    graph::build_graph,
    maze::Size,
    settings::GenerationSettings,
    solvers::{Heuristic, SolverKind, k_shortest_paths, solve},
};

const DEFAULT_ITERS: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_ITERS);

    let settings = GenerationSettings {
        algorithm: Algorithm::Prim,
        size: Size::flat(255, 255),
        wall_removal_percent: 2.0,
        ..Default::default()
    };

    let mut generation = Duration::ZERO;
    let mut compression = Duration::ZERO;
    let mut dijkstra = Duration::ZERO;
    let mut astar = Duration::ZERO;
    let mut yen = Duration::ZERO;

    for i in 0..num_iters {
        let mut rng = get_rng(Some(i as u64));

        let t = Instant::now();
        let generated = generate_maze(&settings, &mut rng)?;
        generation += t.elapsed();

        let t = Instant::now();
        let graph = build_graph(&generated.maze)?;
        compression += t.elapsed();

        let t = Instant::now();
        let expected = solve(&graph, SolverKind::Dijkstra).shortest_path();
        dijkstra += t.elapsed();

        let t = Instant::now();
        let found = solve(&graph, SolverKind::AStar(Heuristic::Manhattan)).shortest_path();
        astar += t.elapsed();
        if found != expected {
            tracing::warn!("[profile] A* and Dijkstra disagree on iteration {}", i);
        }

        let t = Instant::now();
        k_shortest_paths(&graph, graph.start(), graph.end(), 5);
        yen += t.elapsed();
    }

    let per_iter = |total: Duration| total / num_iters.max(1) as u32;
    println!("{} iterations on {}", num_iters, settings.size);
    println!("generate  {:?}", per_iter(generation));
    println!("compress  {:?}", per_iter(compression));
    println!("dijkstra  {:?}", per_iter(dijkstra));
    println!("astar     {:?}", per_iter(astar));
    println!("yen (k=5) {:?}", per_iter(yen));
    Ok(())
}
