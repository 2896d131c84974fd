use std::env;
use std::io::IsTerminal;

use anyhow::{Context, Result};
use repscore_rs::{DatasetConfig, Lookup, render_text};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repscore_rs=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();

    if positional.len() != 1 {
        eprintln!("Usage: {} [--json] <zipcode>", args[0]);
        eprintln!("  zipcode: 5-digit US ZIP code");
        eprintln!("Datasets are read from $REPSCORE_DATA_DIR (default: ./data)");
        std::process::exit(1);
    }

    let lookup = Lookup::new(DatasetConfig::from_env());
    let report = lookup.run(positional[0]).await;

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", out);
        return Ok(());
    }

    if let Some(district) = &report.district {
        match &report.location {
            Some(location) => println!("ZIP {} ({}) is in district {}\n", report.zipcode, location, district),
            None => println!("ZIP {} is in district {}\n", report.zipcode, district),
        }
    }
    println!("{}", render_text(&report.entries, std::io::stdout().is_terminal()));

    Ok(())
}
