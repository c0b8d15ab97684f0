pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rescata_infra::{LoadOptions, MarketplaceConfig};

#[derive(Debug, Parser)]
#[command(
    name = "rescata",
    about = "Offline tools for the surplus-food marketplace",
    long_about = "Classify products, run catalog queries and check product forms against JSON files, \
                  using the same rules as the marketplace services.",
    after_help = "Examples:\n  rescata classify --file products.json\n  rescata catalog --file products.json --filter porVencer --sort precio --desc\n  rescata validate --file form.json"
)]
pub struct Cli {
    /// Config file (defaults to ./rescata.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Print every product with its derived state")]
    Classify {
        #[arg(long, help = "JSON array of product documents")]
        file: PathBuf,
        #[arg(long, help = "Reference time (RFC 3339); defaults to now")]
        now: Option<String>,
    },
    #[command(about = "Filter, sort and paginate products and print the page as JSON")]
    Catalog {
        #[arg(long, help = "JSON array of product documents")]
        file: PathBuf,
        #[arg(long, default_value = "todos", help = "todos|gratuitos|porVencer|agotado|gratuito|vencido|disponible")]
        filter: String,
        #[arg(long, help = "nombre|descripcion|precio|cantidad|vencimiento|estado")]
        sort: Option<String>,
        #[arg(long, help = "Sort descending")]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long)]
        page_size: Option<usize>,
        #[arg(long, help = "Reference time (RFC 3339); defaults to now")]
        now: Option<String>,
    },
    #[command(about = "Validate a product form given as a JSON object of field values")]
    Validate {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, help = "Reference time (RFC 3339); defaults to now")]
        now: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match MarketplaceConfig::load(LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
    }) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("config validation failed: {error}");
            return ExitCode::from(2);
        }
    };
    rescata_observability::init(&config.logging);

    let result = match cli.command {
        Command::Classify { file, now } => commands::classify::run(&config, &file, now.as_deref()),
        Command::Catalog {
            file,
            filter,
            sort,
            desc,
            page,
            page_size,
            now,
        } => commands::catalog::run(
            &config,
            &file,
            &commands::catalog::CatalogArgs {
                filter,
                sort,
                desc,
                page,
                page_size,
            },
            now.as_deref(),
        ),
        Command::Validate { file, now } => commands::validate::run(&config, &file, now.as_deref()),
    };

    match result {
        Ok(outcome) => {
            println!("{}", outcome.output);
            ExitCode::from(outcome.exit_code)
        }
        Err(error) => {
            tracing::error!("command failed: {error:#}");
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
