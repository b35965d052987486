use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use vdf_to_reg::{convert, detect_vdf_file, Config};

#[derive(Parser)]
#[command(name = "vdf-to-reg")]
#[command(version)]
#[command(about = "Convert Steam install-script VDF files into Windows .reg imports", long_about = None)]
struct Cli {
    /// VDF file path; by default loads the "installscript.vdf" file located
    /// in the current directory
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// The game's installation directory, substituted for %INSTALLDIR%
    /// (default: the current directory)
    #[arg(short, long)]
    install_dir: Option<String>,

    /// Language to use. Specify the English name of the language, don't use
    /// the native name or ISO codes
    #[arg(short, long, default_value = "english")]
    language: String,

    /// Output file path or name (default: the same basename as the VDF file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not fall back to the closest variation of the language (currently
    /// only Latam, Brazilian and TChinese have one)
    #[arg(long)]
    no_fallback: bool,

    /// Create a batch file to import the registry file
    #[arg(short, long)]
    batch: bool,

    /// Import the reg file right after creation
    #[arg(long)]
    auto_import: bool,

    /// Set the logging level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

// Exit codes:
//   2 = language not in the supported list
//   3 = no registry data inside the VDF file (or no usable input file)
//   4 = supported language absent from the VDF file, no fallback used
//   5 = supported language absent from the VDF file, fallback used
fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&cli.log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let current_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Cannot determine the current directory: {e}");
            return 1;
        }
    };

    let vdf_path = match cli.path {
        Some(path) => path,
        None => match detect_vdf_file(&current_dir) {
            Ok(path) => path,
            Err(e) => {
                error!("{e:#}");
                return 3;
            }
        },
    };

    let config = Config {
        vdf_path,
        language: cli.language,
        no_fallback: cli.no_fallback,
        output: cli.output,
        install_dir: cli
            .install_dir
            .unwrap_or_else(|| current_dir.to_string_lossy().into_owned()),
        batch: cli.batch,
        auto_import: cli.auto_import,
    };

    match convert(&config) {
        Ok(outcome) if outcome.language_present => 0,
        Ok(outcome) if outcome.fallback_used => {
            info!(
                "The specified language wasn't found in the VDF file, \
                 but a fallback has been used to set the language to the closest variation."
            );
            5
        }
        Ok(_) => {
            info!("The specified language wasn't found in the VDF file.");
            4
        }
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    }
}
