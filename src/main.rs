use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use plugtrack::{
    config::Config, github::GithubClient, output::print_plugin_table, runner::CheckRunner, table,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const RESOLUTION_ERRORS: u8 = 2;
}

#[derive(Parser)]
#[command(name = "plugtrack")]
#[command(
    author,
    version,
    about = "Check markdown-tracked plugin versions against GitHub and file update issues"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check all plugins and file issues for outdated ones
    Check {
        /// Path to the versions file
        #[arg(long)]
        versions_file: Option<PathBuf>,

        /// GitHub API token (or set GITHUB_TOKEN env var)
        #[arg(long)]
        token: Option<String>,

        /// Target repository for issues (format: owner/repo)
        #[arg(long)]
        repo: Option<String>,

        /// Print what would be done without creating issues
        #[arg(long)]
        dry_run: bool,

        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse the versions file and list plugin records
    List {
        /// Path to the versions file
        #[arg(long)]
        versions_file: Option<PathBuf>,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Commands::Check {
            versions_file,
            token,
            repo,
            dry_run,
            output,
        } => run_check(&config, versions_file, token, repo, dry_run, output).await,
        Commands::List { versions_file } => {
            let path = versions_file.unwrap_or_else(|| PathBuf::from(&config.versions_file));
            let plugins = table::load_plugins(&path)?;
            print_plugin_table(&plugins);
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

async fn run_check(
    config: &Config,
    versions_file: Option<PathBuf>,
    token: Option<String>,
    repo: Option<String>,
    dry_run: bool,
    output: Option<PathBuf>,
) -> Result<u8> {
    let token = token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .filter(|t| !t.is_empty());
    let Some(token) = token else {
        bail!("GitHub token is required. Set GITHUB_TOKEN env var or use --token");
    };

    let Some(repo) = repo.or_else(|| config.repo.clone()) else {
        bail!("Target repository is required. Use --repo owner/repo or set it in the config file");
    };

    let versions_file = versions_file.unwrap_or_else(|| PathBuf::from(&config.versions_file));
    if !versions_file.exists() {
        bail!("Versions file not found: {}", versions_file.display());
    }

    println!("Parsing {}...", versions_file.display());
    let plugins = table::load_plugins(&versions_file)?;
    println!("Found {} plugins to check\n", plugins.len());

    let client = GithubClient::new(token);
    let runner = CheckRunner::new(&client, repo, dry_run);
    let report = runner.run(&plugins).await;

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        println!("Report written to: {}", path.display());
    }

    if report.has_errors() {
        Ok(exit_codes::RESOLUTION_ERRORS)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'plugtrack config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
