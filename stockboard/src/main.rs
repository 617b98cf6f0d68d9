use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stockboard_core::{Dashboard, DashboardStore, FieldEdit, Section, StockboardConfig};
use tracing_subscriber::EnvFilter;

mod formatter;

#[derive(Parser)]
#[command(name = "stockboard")]
#[command(about = "Warehouse dashboard data: import spreadsheets, edit and inspect figures", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current dataset
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Only print this section (sheet name or JSON key)
        #[arg(short, long)]
        section: Option<Section>,
    },
    /// Import an Excel/ODS workbook, or a CSV file as one section
    Import {
        /// Path to the spreadsheet
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Section a CSV file stands for
        #[arg(short, long)]
        section: Option<Section>,
    },
    /// Change one field of one row and save
    Edit {
        section: Section,
        /// Row number, starting at 0
        index: usize,
        /// Field key, e.g. `sold` or `trendUp`
        field: String,
        value: String,
    },
    /// Replace the saved dataset with the built-in sample
    Reset,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output, same layout as the saved state
    Json,
}

fn load_config(path: Option<&PathBuf>) -> Result<StockboardConfig> {
    if let Some(config_path) = path {
        return StockboardConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    // Try to load default config from current directory if it exists
    let default_config_path = PathBuf::from("stockboard.toml");
    if default_config_path.exists() {
        StockboardConfig::from_file(&default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(StockboardConfig::default())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Invalid logging level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = DashboardStore::with_key(config.file_storage(), &config.storage.key);
    let mut dashboard = Dashboard::open(store);

    match cli.command {
        Command::Show { format, section } => match format {
            OutputFormat::Human => formatter::print_human(dashboard.data(), section),
            OutputFormat::Json => formatter::print_json(dashboard.data(), section)?,
        },
        Command::Import { file, section } => {
            let is_csv = file
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

            let report = if is_csv {
                let section = section
                    .context("CSV files hold a single section; pass --section to choose it")?;
                let content = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read file: {}", file.display()))?;
                dashboard.import_csv(section, &content)
            } else {
                dashboard.import_file(&file)
            }
            .with_context(|| format!("Failed to import file: {}", file.display()))?;

            formatter::print_import(&file, &report);
        }
        Command::Edit {
            section,
            index,
            field,
            value,
        } => {
            dashboard
                .edit(&FieldEdit::new(section, index, field, value))
                .context("Failed to apply edit")?;
            formatter::print_human(dashboard.data(), Some(section));
        }
        Command::Reset => {
            dashboard.reset().context("Failed to reset dataset")?;
            println!(
                "✓ Dataset reset to sample data (saved in {})",
                dashboard.store().storage().dir().display()
            );
        }
    }

    Ok(())
}
