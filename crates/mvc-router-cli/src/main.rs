use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use mvc_router::{RouteDescriptor, Router, RouterConfig};
use tracing::debug;

#[derive(Parser)]
#[command(name = "mvc-router")]
#[command(version, about = "Match paths and inspect rules from a route file", long_about = None)]
struct Cli {
    /// Route file (TOML with [routes] and [tokens] tables)
    #[arg(short, long, global = true, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a request path to its controller, method and arguments
    Match {
        /// Request path, e.g. /post/5
        path: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every route pattern with its compiled rule
    Regexes,

    /// Check that every route compiles
    Check,
}

fn main() -> ExitCode {
    // stdout carries match output only
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = RouterConfig::load(&cli.config)
        .with_context(|| format!("Failed to load route file: {:?}", cli.config))?;
    debug!(config = ?cli.config, command = ?cli.command, "dispatching");

    match cli.command {
        Commands::Match { path, json } => {
            let router = strict_router(config, &cli.config)?;
            let matched = router
                .match_routes(&path)
                .with_context(|| format!("Failed to match {path}"))?;

            match matched {
                Some(route) if json => {
                    println!("{}", serde_json::to_string_pretty(&route)?);
                    Ok(ExitCode::SUCCESS)
                }
                Some(route) => {
                    print_descriptor(&route);
                    Ok(ExitCode::SUCCESS)
                }
                None if json => {
                    println!("null");
                    Ok(ExitCode::FAILURE)
                }
                None => {
                    println!("{} {}", "no route matches".yellow(), path);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Regexes => {
            let router = strict_router(config, &cli.config)?;
            for (pattern, rule) in router.regexes()?.iter() {
                println!("{}  {}", pattern.cyan(), rule);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => check(config, &cli.config),
    }
}

fn strict_router(config: RouterConfig, path: &Path) -> Result<Router> {
    Router::from_config(config).with_context(|| format!("Invalid route file: {:?}", path))
}

/// Validates every route without rejecting the file up front
fn check(config: RouterConfig, path: &Path) -> Result<ExitCode> {
    let mut router = Router::new();
    for (pattern, target) in config.routes.iter() {
        router.add_route(pattern, target.as_str());
    }
    for (name, constraint) in config.tokens.iter() {
        router.add_token(name, constraint.as_str());
    }

    router
        .validate()
        .with_context(|| format!("Route file does not compile: {:?}", path))?;

    println!(
        "{} {} routes, {} tokens",
        "ok".green().bold(),
        router.routes().len(),
        router.tokens().len()
    );
    Ok(ExitCode::SUCCESS)
}

fn print_descriptor(route: &RouteDescriptor) {
    let unset = "<unset>".dimmed().to_string();
    println!(
        "{} {}",
        "controller:".bold(),
        route.class().map(str::to_string).unwrap_or_else(|| unset.clone())
    );
    println!(
        "{} {}",
        "method:    ".bold(),
        route.method().map(str::to_string).unwrap_or(unset)
    );
    for (name, value) in route.args().iter() {
        println!("  {} = {}", name.cyan(), value);
    }
}
