use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uri_router::config::load_config;
use uri_router::lifecycle::startup::build_router;
use uri_router::routing::{Negotiation, TraceEntry};

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Inspect the route table of a uri-router configuration", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route, catch-all and group, groups expanded
    List,
    /// Resolve a request and print the match as JSON
    Match {
        /// HTTP method, case-insensitive
        method: String,
        /// Request path
        uri: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let router = build_router(&config.router)?;

    match cli.command {
        Commands::List => {
            let trace = router.trace()?;
            print_table(&trace);
        }
        Commands::Match { method, uri } => {
            let mut negotiation = Negotiation::new();
            let matched = router.dispatch(&method, &uri, (), &mut negotiation)?;
            let mut value = matched.to_value();
            if let Some(object) = value.as_object_mut() {
                object.insert(
                    "content_type".to_string(),
                    negotiation.content_type().into(),
                );
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

fn print_table(trace: &[TraceEntry]) {
    let header = ["METHOD", "URI", "GROUP", "HANDLER"];
    let rows: Vec<[String; 4]> = trace
        .iter()
        .map(|entry| {
            let group = entry
                .options
                .get("group")
                .and_then(|group| group.get("start"))
                .and_then(|start| start.as_str())
                .unwrap_or("")
                .to_string();
            [
                entry.method.to_uppercase(),
                entry.uri.clone(),
                group,
                entry.handler.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: [&str; 4]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", padded.join(" | ").trim_end());
    };

    line(header);
    println!(
        "{}",
        widths.map(|w| "-".repeat(w)).join("-+-")
    );
    for row in &rows {
        line([&row[0], &row[1], &row[2], &row[3]]);
    }
}
