use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod commands;

#[derive(Parser)]
#[command(
    name = "pakette",
    about = "Inspect and extract PS2-era game package (.pak) containers",
    version,
    author,
    long_about = "A command-line tool for working with game installations extracted from \
                  disc: identifies the build, lists package contents, and extracts logical \
                  files out of their chunked, compressed containers."
)]
struct Cli {
    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Game installation root (the directory holding DATA, IRX, MOVIES, MUSIC)
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected game build and its packages
    Info,

    /// List every file in a package
    List {
        /// Package name as listed by `info`, e.g. config.pak
        package: String,
    },

    /// List a package's group records
    Groups {
        /// Package name as listed by `info`
        package: String,
    },

    /// Extract a package's files into a directory tree
    Extract {
        /// Package name as listed by `info`
        package: String,

        /// Output directory; defaults to the package name without extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Info => commands::info(&cli.root),
        Commands::List { package } => commands::list(&cli.root, &package),
        Commands::Groups { package } => commands::groups(&cli.root, &package),
        Commands::Extract { package, output } => commands::extract(&cli.root, &package, output),
    }
}
