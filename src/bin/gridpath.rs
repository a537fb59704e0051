//! Loads a grid file, searches a path between its start and goal cells and writes the path and
//! the frontier trace as CSV.
//!
//! # Usage
//!
//! ```bash
//! # Uniform-cost search on grid_state.csv, writing path.csv and priority_queue.csv
//! gridpath
//!
//! # Weighted A* on a binary grid with a custom weight
//! gridpath --binary grid_data.bin --heuristic --weight 3
//! ```

use std::env;
use std::process::ExitCode;

use grid_frontier::io::{load_grid_binary, load_grid_csv, save_path, save_trace};
use grid_frontier::{BestFirstSolver, Cost, GridModel, Outcome, TraceOrder, HEURISTIC_WEIGHT};

enum GridSource {
    Csv(String),
    Binary(String),
}

struct Config {
    source: GridSource,
    heuristic: bool,
    weight: Cost,
    trace_order: TraceOrder,
    prune: bool,
    path_out: String,
    trace_out: String,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --grid <file>          CSV grid of cell codes (default: grid_state.csv)");
    eprintln!("  --binary <file>        Binary grid with a rows/cols header instead of CSV");
    eprintln!("  --heuristic            Weighted A* instead of uniform-cost search");
    eprintln!(
        "  --weight <n>           Heuristic weight (default: {})",
        HEURISTIC_WEIGHT
    );
    eprintln!("  --path-out <file>      Path output (default: path.csv)");
    eprintln!("  --trace-out <file>     Trace output (default: priority_queue.csv)");
    eprintln!("  --trace-order <order>  pop | heap (default: pop)");
    eprintln!("  --prune                Skip the search when the goal is on another component");
    eprintln!("  -h, --help             Show this help");
}

fn parse_args(args: &[String]) -> Result<Option<Config>, String> {
    let mut config = Config {
        source: GridSource::Csv("grid_state.csv".to_string()),
        heuristic: false,
        weight: HEURISTIC_WEIGHT,
        trace_order: TraceOrder::PopOrder,
        prune: false,
        path_out: "path.csv".to_string(),
        trace_out: "priority_queue.csv".to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        let mut value = |name: &str| -> Result<String, String> {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("missing value after {}", name))
        };
        match arg {
            "--grid" => config.source = GridSource::Csv(value("--grid")?),
            "--binary" => config.source = GridSource::Binary(value("--binary")?),
            "--heuristic" => config.heuristic = true,
            "--weight" => {
                config.weight = value("--weight")?
                    .parse::<Cost>()
                    .map_err(|_| "weight must be a non-negative integer".to_string())?;
            }
            "--path-out" => config.path_out = value("--path-out")?,
            "--trace-out" => config.trace_out = value("--trace-out")?,
            "--trace-order" => {
                config.trace_order = match value("--trace-order")?.as_str() {
                    "pop" => TraceOrder::PopOrder,
                    "heap" => TraceOrder::HeapLayout,
                    other => return Err(format!("unknown trace order '{}'", other)),
                };
            }
            "--prune" => config.prune = true,
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unrecognized argument '{}'", other)),
        }
        i += 1;
    }
    Ok(Some(config))
}

fn load(source: &GridSource) -> grid_frontier::Result<GridModel> {
    match source {
        GridSource::Csv(file) => load_grid_csv(file),
        GridSource::Binary(file) => load_grid_binary(file),
    }
}

fn run(config: &Config) -> grid_frontier::Result<Outcome> {
    let grid = load(&config.source)?;
    let solver = BestFirstSolver::new(config.heuristic)
        .with_heuristic_weight(config.weight)
        .with_trace_order(config.trace_order)
        .with_prune_unreachable(config.prune);
    let run = solver.solve(&grid, grid.start(), grid.goal())?;
    log::info!(
        "Expanded {} of {} cells",
        run.expanded,
        grid.rows() * grid.cols()
    );
    save_trace(&config.trace_out, &run.trace)?;
    if let Some(path) = run.path() {
        save_path(&config.path_out, path)?;
    }
    Ok(run.outcome)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("gridpath");
    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage(program);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(Outcome::Found(path)) => {
            log::info!("Path of {} steps found", path.len().saturating_sub(1));
            ExitCode::SUCCESS
        }
        Ok(Outcome::NoPathExists) => {
            log::warn!("No path found!");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
