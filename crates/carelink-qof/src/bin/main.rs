//! QOF command-line interface

use carelink_qof::cli::{catalog, coverage, output, scan};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// QOF command-line tool
#[derive(Parser)]
#[command(name = "qof")]
#[command(author, version, about = "QOF clinical rules engine tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json, pretty)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a patient population and list prioritized clinical actions
    Scan {
        /// Patient cases file (JSON)
        patients: PathBuf,

        /// Catalog file overriding the built-in rule set (JSON)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Evaluation date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        as_of: Option<NaiveDate>,
    },

    /// Report population coverage against indicator targets
    Coverage {
        /// Per-indicator counts file (JSON)
        counts: PathBuf,

        /// Catalog file overriding the built-in rule set (JSON)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// List the indicators in the catalog
    Catalog {
        /// Catalog file overriding the built-in rule set (JSON)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Set up color output
    output::setup_colors(&cli.color);

    let result = match cli.command {
        Commands::Scan {
            patients,
            catalog,
            as_of,
        } => {
            let config = scan::ScanConfig {
                patients,
                catalog,
                as_of,
                verbose: cli.verbose,
                output_format: cli.format.clone(),
                output_file: cli.output.clone(),
            };
            scan::scan(config).await
        }

        Commands::Coverage { counts, catalog } => {
            let config = coverage::CoverageConfig {
                counts,
                catalog,
                output_format: cli.format.clone(),
                output_file: cli.output.clone(),
            };
            coverage::coverage(config).await
        }

        Commands::Catalog { catalog: path } => {
            let config = catalog::CatalogConfig {
                catalog: path,
                output_format: cli.format.clone(),
                output_file: cli.output.clone(),
            };
            catalog::catalog(config).await
        }
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
