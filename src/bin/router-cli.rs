use std::path::PathBuf;

use clap::{Parser, Subcommand};

use front_router::config::{load_config, AppConfig};
use front_router::lifecycle::startup::{build_route_table, resolve_base_path};
use front_router::routing::{ParamValue, Params};

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Inspect the route table of a front-router configuration", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to the built-in demo routes).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured base path.
    #[arg(short, long)]
    base_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order
    Routes,
    /// Match a request and print the outcome
    Match { method: String, path: String },
    /// Build the URL of a named route from key=value parameters
    Generate { name: String, params: Vec<String> },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    let base_path = cli
        .base_path
        .clone()
        .unwrap_or_else(|| resolve_base_path(&config.routing));
    let table = build_route_table(&config, &base_path)?;

    match cli.command {
        Commands::Routes => {
            for route in table.routes() {
                println!(
                    "{:<10} {:<40} {:<32} {}",
                    route.method.to_string(),
                    route.pattern.source(),
                    route.target,
                    route.name.as_deref().unwrap_or("-"),
                );
            }
        }
        Commands::Match { method, path } => match table.match_request(&method, &path) {
            Some(matched) => println!("{}", serde_json::to_string_pretty(&matched)?),
            None => {
                eprintln!("No route matches {} {}", method, path);
                std::process::exit(1);
            }
        },
        Commands::Generate { name, params } => {
            let params = parse_params(&params)?;
            println!("{}", table.generate(&name, &params)?);
        }
    }

    Ok(())
}

fn parse_params(pairs: &[String]) -> Result<Params, String> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
            let value = match value.parse::<i64>() {
                Ok(n) => ParamValue::Int(n),
                Err(_) => ParamValue::Str(value.to_string()),
            };
            Ok((key.to_string(), value))
        })
        .collect()
}
