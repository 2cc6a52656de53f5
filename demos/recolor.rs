//! Command-line interface for wall_colors
//!
//! Prints the dominant colors of a room photograph as JSON and optionally
//! repaints the top wall color.

use log::{info, LevelFilter, Log, Metadata, Record};
use std::{env, path::{Path, PathBuf}, process};
use wall_colors::{image_loader, AnalysisConfig, ColorAnalyzer, NoSeeds};

/// Minimal stderr logger so pipeline debug output is visible with --verbose
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut image_path = None;
    let mut new_color = None;
    let mut output_path = None;
    let mut config_path = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--color" | "-c" => {
                i += 1;
                new_color = args.get(i).cloned();
            }
            "--output" | "-o" => {
                i += 1;
                output_path = args.get(i).map(PathBuf::from);
            }
            "--config" => {
                i += 1;
                config_path = args.get(i).map(PathBuf::from);
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                if image_path.is_none() {
                    image_path = Some(PathBuf::from(arg));
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
    }

    let Some(image_path) = image_path else {
        print_help(&args[0]);
        process::exit(1);
    };

    let config = match config_path {
        Some(path) => AnalysisConfig::from_json_file(&path).unwrap_or_else(|e| {
            eprintln!("Error loading config file: {}", e);
            process::exit(1);
        }),
        None => AnalysisConfig::default(),
    };

    let analyzer = ColorAnalyzer::with_config(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        process::exit(1);
    });

    let image = image_loader::load_rgb(&image_path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    info!("Loaded {} ({}x{})", image_path.display(), image.width(), image.height());

    let clusters = match analyzer.analyze_with_seeds(&image, &NoSeeds) {
        Ok(clusters) => clusters,
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&clusters) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Cannot serialize clusters: {}", e),
    }

    let Some(new_color) = new_color else {
        return;
    };

    let Some(wall) = clusters.iter().find(|c| c.is_wall).or(clusters.first()) else {
        eprintln!("No color to replace");
        process::exit(1);
    };

    let request = analyzer.replacement_request(wall, &new_color);
    let engine = wall_colors::ColorReplacementEngine::with_params(
        analyzer.config().replacement.min_variation_wall_score,
        analyzer.config().replacement.parallel,
    );
    let outcome = match engine.replace(&image, &request) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Replacement failed: {}", e);
            process::exit(1);
        }
    };
    info!(
        "Replaced {} with {}: {} pixels changed",
        wall.hex, new_color, outcome.pixels_changed
    );

    let output_path = output_path.unwrap_or_else(|| default_output(&image_path));
    if let Err(e) = image_loader::save_rgb(&outcome.image, &output_path) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    info!("Saved {}", output_path.display());
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    input.with_file_name(format!("{}_recolored.png", stem))
}

fn print_help(program_name: &str) {
    println!("Usage: {} [OPTIONS] <image_path>", program_name);
    println!();
    println!("Prints the dominant colors of a room photograph as JSON.");
    println!();
    println!("Options:");
    println!("  -c, --color <HEX>     Repaint the top wall color with HEX");
    println!("  -o, --output <PATH>   Output image (default: <input>_recolored.png)");
    println!("      --config <PATH>   JSON configuration file");
    println!("  -v, --verbose         Show pipeline debug logs");
    println!("  -h, --help            Show this help message");
}
