//! Command-line PLZ lookup.
//!
//! Runs the same lookup pipeline as the HTTP service (normalizer, cache,
//! Nominatim client, projection) for a single postal code.
//!
//! # Usage
//!
//! ```bash
//! # WGS84 coordinates
//! cargo run --bin plz-lookup -- 64283
//!
//! # UTM zone 32N, JSON output
//! cargo run --bin plz-lookup -- 64283 --coordsys utm32 --json
//!
//! # List supported coordinate systems
//! cargo run --bin plz-lookup -- --list
//!
//! # Prompt for the postal code
//! cargo run --bin plz-lookup
//! ```
//!
//! # Environment Variables
//!
//! Reads the same `NOMINATIM_*` variables as the server; see
//! [`plz_geocoder::config`]. Logs go to stderr, filtered by `RUST_LOG`
//! (default: `warn`).

use plz_geocoder::api::dto::{CoordinateSystemsResponse, LookupResponse};
use plz_geocoder::{config, logging};
use plz_geocoder::domain::entities::IDENTITY_KEY;
use plz_geocoder::prelude::*;
use plz_geocoder::server::build_lookup_service;

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::Input;
use std::process::ExitCode;

/// Resolves a German postal code to coordinates.
#[derive(Parser)]
#[command(name = "plz-lookup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Five-digit postal code (prompted for if omitted)
    plz: Option<String>,

    /// Target coordinate system key
    #[arg(short, long, default_value = IDENTITY_KEY)]
    coordsys: String,

    /// Print the HTTP API's JSON body instead of formatted text
    #[arg(long)]
    json: bool,

    /// List supported coordinate systems and exit
    #[arg(short, long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_stderr(&std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()));

    if cli.list {
        print_systems(cli.json)?;
        return Ok(ExitCode::SUCCESS);
    }

    let plz = match cli.plz {
        Some(plz) => plz,
        None => Input::new().with_prompt("PLZ").interact_text()?,
    };

    let config = config::load_from_env()?;
    let service = build_lookup_service(&config)?;

    match service.lookup(&plz, &cli.coordsys).await {
        Ok(result) => {
            print_result(result, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_error(&e, cli.json)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_result(result: LookupResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&LookupResponse::from(result))?);
        return Ok(());
    }

    println!("{}", format!("📍 PLZ {}", result.postal_code).bright_blue().bold());
    println!();
    println!("  Latitude:  {}", format!("{:.6}", result.coordinate.latitude).cyan());
    println!("  Longitude: {}", format!("{:.6}", result.coordinate.longitude).cyan());

    if let Some(projected) = result.projected {
        println!();
        println!(
            "  {} ({})",
            result.system.display_name.bright_white().bold(),
            result.system.epsg_code.bright_black()
        );
        println!("  Easting:   {}", format!("{:.2}", projected.x).bright_yellow());
        println!("  Northing:  {}", format!("{:.2}", projected.y).bright_yellow());
    }
    println!();

    Ok(())
}

fn print_error(err: &LookupError, json: bool) -> Result<()> {
    if json {
        let body = serde_json::json!({ "ok": false, "error": err.to_string() });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        eprintln!("{} {}", "❌".red(), err.to_string().red().bold());
        if err.is_transient() {
            eprintln!("{}", "   Bitte später erneut versuchen.".yellow());
        }
    }

    Ok(())
}

/// Prints the coordinate system registry.
///
/// # Output Format
///
/// ```text
/// 🗺  Coordinate systems
///
///   Key      Name                            EPSG
///   ──────────────────────────────────────────────────────────
///   latlon   WGS84 (Lat/Lon)                 EPSG:4326
///   utm32    ETRS89 / UTM Zone 32N           EPSG:25832
/// ```
fn print_systems(json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&CoordinateSystemsResponse::from_registry())?
        );
        return Ok(());
    }

    println!("{}", "🗺  Coordinate systems".bright_blue().bold());
    println!();
    println!(
        "  {:<8} {:<31} {}",
        "Key".bright_white().bold(),
        "Name".bright_white().bold(),
        "EPSG".bright_white().bold()
    );
    println!("  {}", "─".repeat(58).bright_black());

    for system in CoordinateSystem::all() {
        let key = if system.is_identity() {
            system.key.green().bold()
        } else {
            system.key.cyan()
        };
        println!(
            "  {:<8} {:<31} {}",
            key,
            system.display_name,
            system.epsg_code.bright_black()
        );
    }
    println!();

    Ok(())
}
