//! France Travail Offers CSV Export
//!
//! Fetches permanent-contract offers in department 07 and writes them as three
//! `|`-separated files: `offres_emploi.csv`, `entreprises.csv`, `competences.csv`.
//!
//! Usage: `export_offers [OUTPUT_DIR]` (defaults to `data`).
//! Requires FRANCE_TRAVAIL_CLIENT_ID and FRANCE_TRAVAIL_CLIENT_SECRET.

use std::path::PathBuf;

use ftgateway::export::{default_export_filters, export_offers, ExportOutcome};
use ftgateway::{FranceTravailConfig, OffersClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    println!("📋 France Travail Offers Export");
    println!("===============================");

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let config = match FranceTravailConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            eprintln!();
            eprintln!("Set your partner application credentials:");
            eprintln!("  export FRANCE_TRAVAIL_CLIENT_ID=\"your_client_id\"");
            eprintln!("  export FRANCE_TRAVAIL_CLIENT_SECRET=\"your_client_secret\"");
            std::process::exit(1);
        }
    };

    let client = OffersClient::new(config)?;
    let filters = default_export_filters();

    println!("\n🔎 Searching offers (departement=07, typeContrat=CDI)...");
    match export_offers(&client, &filters, &output_dir).await? {
        ExportOutcome::NoResults => {
            println!("\nℹ️  No offers found, nothing written.");
        }
        ExportOutcome::Written {
            directory,
            offers,
            companies,
            skills,
        } => {
            println!("\n✅ Export complete in {}", directory.display());
            println!("   - offres_emploi.csv: {} row(s)", offers);
            println!("   - entreprises.csv: {} row(s)", companies);
            println!("   - competences.csv: {} row(s)", skills);
        }
    }

    Ok(())
}
