use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dhruv_chart::rashi::rashi_from_longitude;
use dhruv_chart::{ChartContext, Graha, dignity};
use dhruv_yoga::{YogaAnalysis, YogaConfig, analyze};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dhruv", about = "Dhruv yoga analysis CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and score yogas in a chart
    Analyze {
        /// Chart JSON file (ascendant_longitude, positions, house_cusps)
        #[arg(long, conflicts_with_all = ["asc", "lons"])]
        chart: Option<PathBuf>,
        /// Sidereal ascendant longitude in degrees
        #[arg(long, requires = "lons")]
        asc: Option<f64>,
        /// 9 sidereal longitudes: Sun,Moon,Mars,Mercury,Jupiter,Venus,Saturn,Rahu,Ketu
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        lons: Option<Vec<f64>>,
        /// 9 speeds in deg/day; negative marks retrograde
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        speeds: Option<Vec<f64>>,
        /// YogaConfig JSON file; missing fields take defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dignity of a graha at a sidereal longitude
    Dignity {
        /// Graha name (English or Sanskrit)
        graha: String,
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            chart,
            asc,
            lons,
            speeds,
            config,
            json,
        } => {
            let config = match config {
                Some(path) => load_config(&path),
                None => YogaConfig::default(),
            };
            if let Err(msg) = config.validate() {
                eprintln!("Invalid config: {msg}");
                std::process::exit(1);
            }
            let chart = match chart {
                Some(path) => load_chart(&path),
                None => build_chart(asc, lons, speeds),
            };
            info!(ascendant = chart.ascendant_longitude(), "analyzing chart");

            let analysis = analyze(&chart, &config);
            if json {
                match serde_json::to_string_pretty(&analysis) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("Failed to serialize analysis: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                print_analysis(&analysis);
            }
        }

        Commands::Dignity { graha, lon } => {
            let graha = parse_graha_name(&graha);
            let info = rashi_from_longitude(lon);
            let d = dignity(graha, info.rashi_index);
            println!(
                "{} in {} ({}) {:.4} deg: {}",
                graha.english_name(),
                info.rashi.name(),
                info.rashi.western_name(),
                info.degrees_in_rashi,
                d.name()
            );
        }
    }
}

fn parse_graha_name(s: &str) -> Graha {
    match Graha::from_name(s) {
        Some(g) => g,
        None => {
            eprintln!("Invalid graha name: {s}");
            eprintln!("Valid: Sun, Moon, Mars, Mercury, Jupiter, Venus, Saturn, Rahu, Ketu");
            std::process::exit(1);
        }
    }
}

fn read_file(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn load_config(path: &Path) -> YogaConfig {
    debug!(path = %path.display(), "loading config");
    match serde_json::from_str(&read_file(path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to parse config {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn load_chart(path: &Path) -> ChartContext {
    debug!(path = %path.display(), "loading chart");
    match serde_json::from_str(&read_file(path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid chart {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn to_nine(values: Vec<f64>, what: &str) -> [f64; 9] {
    match <[f64; 9]>::try_from(values) {
        Ok(a) => a,
        Err(v) => {
            eprintln!("Expected 9 {what}, got {}", v.len());
            std::process::exit(1);
        }
    }
}

fn build_chart(
    asc: Option<f64>,
    lons: Option<Vec<f64>>,
    speeds: Option<Vec<f64>>,
) -> ChartContext {
    let (Some(asc), Some(lons)) = (asc, lons) else {
        eprintln!("Provide either --chart or both --asc and --lons");
        std::process::exit(1);
    };
    let lons = to_nine(lons, "longitudes");
    let speeds = speeds.map_or([1.0; 9], |s| to_nine(s, "speeds"));
    match ChartContext::from_sidereal(asc, lons, speeds) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid chart: {e}");
            std::process::exit(1);
        }
    }
}

fn print_analysis(analysis: &YogaAnalysis) {
    for y in &analysis.yogas {
        println!(
            "{:<36} {:<24} {:>5.1}%  {:<16} {}",
            y.name(),
            y.category().name(),
            y.strength_percentage(),
            y.strength().name(),
            if y.is_auspicious() { "auspicious" } else { "inauspicious" }
        );
        if y.is_modified() {
            for r in y.cancellation_reasons() {
                println!("    - {r}");
            }
        }
    }
    let (good, bad) = analysis.summary_counts();
    println!();
    println!(
        "Yogas:            {} ({good} auspicious, {bad} inauspicious)",
        analysis.yogas.len()
    );
    match analysis.dominant_category {
        Some(c) => println!("Dominant family:  {}", c.name()),
        None => println!("Dominant family:  none"),
    }
    println!("Overall strength: {:.1}", analysis.overall_strength);
}
