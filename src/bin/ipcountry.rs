use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::BufRead;
use std::path::PathBuf;

use ipcountry::{file_reader, Database, Error};

#[derive(Parser)]
#[command(name = "ipcountry")]
#[command(
    about = "IP-to-country lookups over DB1 binary databases",
    long_about = "ipcountry - fast IP-to-country lookups over DB1 binary databases\n\n\
    Query a local DB1 database file for the country an IPv4 or IPv6 address\n\
    belongs to. IPv4 addresses carried inside IPv6 literals (v4-mapped, 6to4,\n\
    Teredo) resolve like the embedded IPv4 address. Uses memory-mapped files\n\
    for fast, zero-copy queries.\n\n\
    The database path comes from --database or the IPCOUNTRY_DB environment\n\
    variable.\n\n\
    Examples:\n\
      ipcountry -d IP-COUNTRY.BIN query 8.8.8.8 2001:4860:4860::8888\n\
      ipcountry query --input addrs.txt.gz --json\n\
      cat addrs.txt | ipcountry query --input -\n\
      ipcountry inspect"
)]
#[command(version)]
struct Cli {
    /// Path to the DB1 database file (falls back to $IPCOUNTRY_DB)
    #[arg(short, long, global = true, value_name = "FILE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the country for one or more IP addresses
    Query {
        /// Addresses to look up
        #[arg(value_name = "ADDRESS")]
        addresses: Vec<String>,

        /// Address-list files (one address per line, .gz supported), or "-" for stdin
        #[arg(short, long, value_name = "FILE")]
        input: Vec<PathBuf>,

        /// Output NDJSON instead of aligned text
        #[arg(long)]
        json: bool,

        /// Quiet mode - no output, only exit code (0 = all found, 1 otherwise)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show database version and range-table statistics
    Inspect {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let database = database_path(cli.database)?;

    match cli.command {
        Commands::Query {
            addresses,
            input,
            json,
            quiet,
        } => cmd_query(database, addresses, input, json, quiet),
        Commands::Inspect { json } => cmd_inspect(database, json),
    }
}

/// Resolve the database path from the flag or the environment.
fn database_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    match std::env::var_os("IPCOUNTRY_DB") {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => bail!("no database given: pass --database or set IPCOUNTRY_DB"),
    }
}

fn cmd_query(
    database: PathBuf,
    addresses: Vec<String>,
    inputs: Vec<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let db = Database::open(database.to_str().unwrap())
        .with_context(|| format!("failed to load database: {}", database.display()))?;

    let mut addresses = addresses;
    let mut inputs = inputs;

    // No addresses anywhere: read from stdin, one per line
    if addresses.is_empty() && inputs.is_empty() {
        inputs.push(PathBuf::from("-"));
    }

    for input in &inputs {
        let reader = file_reader::open(input)
            .with_context(|| format!("failed to open input: {}", input.display()))?;
        for line in reader.lines() {
            let line = line?;
            let addr = line.trim();
            if !addr.is_empty() {
                addresses.push(addr.to_string());
            }
        }
    }

    let mut all_found = true;

    for addr in &addresses {
        match db.query(addr) {
            Ok(result) => {
                if quiet {
                    continue;
                }
                if json {
                    println!(
                        "{}",
                        json!({
                            "address": addr,
                            "country_code": result.country_code,
                            "country_name": result.country_name,
                        })
                    );
                } else {
                    println!(
                        "{:<15} {} ({})",
                        addr, result.country_name, result.country_code
                    );
                }
            }
            Err(err @ (Error::InvalidAddress(_) | Error::NoResults)) => {
                all_found = false;
                if !quiet {
                    eprintln!("{}: {}", addr, err);
                }
            }
            Err(err) => {
                return Err(err).with_context(|| format!("query failed for: {}", addr));
            }
        }
    }

    std::process::exit(if all_found { 0 } else { 1 });
}

fn cmd_inspect(database: PathBuf, json_output: bool) -> Result<()> {
    let db = Database::open(database.to_str().unwrap())
        .with_context(|| format!("failed to load database: {}", database.display()))?;

    if json_output {
        let output = json!({
            "file": database.display().to_string(),
            "version": db.version(),
            "ipv4_ranges": db.ipv4_count(),
            "ipv6_ranges": db.ipv6_count(),
            "ipv4_indexed": db.has_ipv4_index(),
            "ipv6_indexed": db.has_ipv6_index(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Database: {}", database.display());
        println!("Version:  {}", db.version());
        println!();
        println!("Ranges:");
        println!(
            "  IPv4: {:>10}{}",
            db.ipv4_count(),
            if db.has_ipv4_index() { "  (indexed)" } else { "" }
        );
        println!(
            "  IPv6: {:>10}{}",
            db.ipv6_count(),
            if db.has_ipv6_index() { "  (indexed)" } else { "" }
        );
    }

    Ok(())
}
