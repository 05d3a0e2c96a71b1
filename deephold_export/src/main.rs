// CLI entry point for the deephold blueprint exporter.
//
// Loads a JSON map snapshot, runs one export invocation over the
// requested region, and prints the files it wrote. The heavy lifting
// lives in `deephold_blueprint`; this binary only parses arguments and
// wires up logging.
//
// Usage:
//   deephold-export --map <FILE> [OPTIONS]
//     --map <FILE>        Map snapshot JSON (required)
//     --start <X,Y,Z>     Region start corner (default: snapshot cursor)
//     --width <N>         Region width in tiles (default: 1)
//     --height <N>        Region height in tiles (default: 1)
//     --depth <N>         Layer count; negative digs downward (default: 1)
//     --format <MODE>     Output mode: pretty or minimal (default: pretty)
//     --name <NAME>       Blueprint basename (default: blueprint)
//     --output-dir <DIR>  Directory for generated files (default: blueprints)
//     --combined          Write all phases into one file
//     --dig / --build / --place / --query
//                         Phases to generate (default: auto-detect all)

use std::path::PathBuf;

use deephold_blueprint::{
    BlueprintOptions, DefaultNamePolicy, MapCoord, MapSnapshot, OutputFormat, SnapshotMap,
    SplitStrategy, generate_blueprints,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct CliArgs {
    map_path: PathBuf,
    output_dir: PathBuf,
    opts: BlueprintOptions,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = parse_args();

    let json = match std::fs::read_to_string(&args.map_path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", args.map_path.display());
            std::process::exit(1);
        }
    };
    let snapshot = match MapSnapshot::from_json(&json) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Failed to parse {}: {e}", args.map_path.display());
            std::process::exit(1);
        }
    };
    let map = SnapshotMap::new(snapshot);

    let policy = DefaultNamePolicy::new(args.output_dir);
    match generate_blueprints(&map, &args.opts, &policy) {
        Ok(files) => {
            for file in files {
                println!("{}", file.display());
            }
        }
        Err(e) => {
            eprintln!("Export failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Parse command-line arguments. Uses simple `std::env::args()`
/// matching — no clap dependency.
fn parse_args() -> CliArgs {
    let mut map_path: Option<PathBuf> = None;
    let mut output_dir = PathBuf::from("blueprints");
    let mut opts = BlueprintOptions { auto_phase: true, ..BlueprintOptions::default() };
    let mut any_phase_flag = false;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--map" => {
                i += 1;
                map_path = args.get(i).map(PathBuf::from).or_else(|| {
                    eprintln!("--map requires a file path");
                    std::process::exit(1);
                });
            }
            "--start" => {
                i += 1;
                opts.start =
                    Some(args.get(i).and_then(|s| parse_coord(s)).unwrap_or_else(|| {
                        eprintln!("--start requires a coordinate like 10,10,5");
                        std::process::exit(1);
                    }));
            }
            "--width" => {
                i += 1;
                opts.width = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--width requires a number");
                    std::process::exit(1);
                });
            }
            "--height" => {
                i += 1;
                opts.height = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--height requires a number");
                    std::process::exit(1);
                });
            }
            "--depth" => {
                i += 1;
                opts.depth = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--depth requires a number");
                    std::process::exit(1);
                });
            }
            "--format" => {
                i += 1;
                opts.format = match args.get(i).map(String::as_str) {
                    Some("pretty") => OutputFormat::Pretty,
                    Some("minimal") => OutputFormat::Minimal,
                    _ => {
                        eprintln!("--format requires 'pretty' or 'minimal'");
                        std::process::exit(1);
                    }
                };
            }
            "--name" => {
                i += 1;
                opts.name = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--name requires a value");
                    std::process::exit(1);
                });
            }
            "--output-dir" => {
                i += 1;
                output_dir = args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--output-dir requires a directory");
                    std::process::exit(1);
                });
            }
            "--combined" => {
                opts.split_strategy = SplitStrategy::Combined;
            }
            "--dig" => {
                opts.dig = true;
                any_phase_flag = true;
            }
            "--build" => {
                opts.build = true;
                any_phase_flag = true;
            }
            "--place" => {
                opts.place = true;
                any_phase_flag = true;
            }
            "--query" => {
                opts.query = true;
                any_phase_flag = true;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if any_phase_flag {
        opts.auto_phase = false;
    }

    let Some(map_path) = map_path else {
        eprintln!("--map is required");
        print_usage();
        std::process::exit(1);
    };

    CliArgs { map_path, output_dir, opts }
}

/// Parse an `x,y,z` triple.
fn parse_coord(s: &str) -> Option<MapCoord> {
    let mut parts = s.split(',').map(str::trim);
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(MapCoord::new(x, y, z))
}

fn print_usage() {
    println!("Usage: deephold-export --map <FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --map <FILE>        Map snapshot JSON (required)");
    println!("  --start <X,Y,Z>     Region start corner (default: snapshot cursor)");
    println!("  --width <N>         Region width in tiles (default: 1)");
    println!("  --height <N>        Region height in tiles (default: 1)");
    println!("  --depth <N>         Layer count; negative digs downward (default: 1)");
    println!("  --format <MODE>     Output mode: pretty or minimal (default: pretty)");
    println!("  --name <NAME>       Blueprint basename (default: blueprint)");
    println!("  --output-dir <DIR>  Directory for generated files (default: blueprints)");
    println!("  --combined          Write all phases into one file");
    println!("  --dig, --build, --place, --query");
    println!("                      Phases to generate (default: auto-detect all)");
    println!("  --help, -h          Show this help");
}
