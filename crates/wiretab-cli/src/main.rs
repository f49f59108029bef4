mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "wiretab",
    version,
    about = "Wire list extraction from wire-harness CAD drawings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a wire table from a drawing (DXF, or a drawing model as JSON)
    Extract {
        /// Path to the drawing
        input_file: PathBuf,

        /// Custom mapping file(s), JSON or XLSX
        #[arg(short, long = "mapping", value_name = "FILE")]
        mapping: Vec<PathBuf>,

        /// Predefined mapping(s): wire-list, wire-list-min (default: wire-list if no --mapping/--preset given)
        #[arg(short, long = "preset", value_name = "NAME")]
        preset: Vec<String>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the result to a file, or to <record_type>.csv inside a directory
        #[arg(short = 'O', long = "out", value_name = "FILE|DIR")]
        out: Option<PathBuf>,

        /// Row grouping tolerance in drawing units (overrides the mapping)
        #[arg(long, value_name = "F")]
        tolerance: Option<f64>,

        /// Show per-row classification details and info logs
        #[arg(long)]
        verbose: bool,
    },
    /// Print normalized text tokens grouped into rows, without classifying
    Tokens {
        /// Path to the drawing
        input_file: PathBuf,

        /// Row grouping tolerance in drawing units
        #[arg(long, value_name = "F")]
        tolerance: Option<f64>,
    },
    /// Manage and inspect mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },
}

#[derive(Subcommand)]
enum MappingAction {
    /// List predefined mappings
    List,
    /// Explain a mapping preset column by column
    Explain {
        /// Preset name (e.g., "wire-list")
        preset: String,
    },
    /// Print the mapping file format with field descriptions and example
    Schema,
    /// Validate a custom mapping file
    Validate {
        /// Path to JSON or XLSX mapping file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "wiretab_core=info"
    } else {
        "wiretab_core=warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Extract { verbose: true, .. });
    init_logging(verbose);

    let result = match cli.command {
        Commands::Extract {
            input_file,
            mapping,
            preset,
            output,
            out,
            tolerance,
            verbose,
        } => commands::extract::run(commands::extract::ExtractArgs {
            input_file,
            mapping_files: mapping,
            presets: preset,
            output_format: output,
            out,
            tolerance,
            verbose,
        }),
        Commands::Tokens {
            input_file,
            tolerance,
        } => commands::tokens::run(input_file, tolerance),
        Commands::Mapping { action } => match action {
            MappingAction::List => commands::mapping::list(),
            MappingAction::Explain { preset } => commands::mapping::explain(&preset),
            MappingAction::Schema => commands::mapping::schema(),
            MappingAction::Validate { file } => commands::mapping::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
