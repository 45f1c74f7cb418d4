use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::{self, App};
use crate::config::{APP_NAME, LOG_VAR, Settings};
use crate::error::GopathsError;
use crate::repos::store::RepoStore;
use crate::utils::env::ProcessEnv;

/// Root CLI for gopaths
#[derive(Parser)]
#[command(name = "gopaths", version)]
#[command(about = "Multiple GOPATH manager")]
pub struct Cli {
    /// Directory holding repos.toml (defaults to ~/.config/gopaths)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print `export GOPATH=... GOPATHS_MANAGED=...` for the calling shell to eval
    Init {
        /// Apply to this process instead of printing (does not reach the shell)
        #[arg(long)]
        apply: bool,
    },
    /// Inspect gopaths configuration
    Config {
        /// Print the managed paths and the composed GOPATH
        #[arg(long)]
        show: bool,
        /// Change a setting
        #[arg(long, value_name = "KEY=VALUE")]
        set: Option<String>,
    },
    /// Enable managed paths (all of them, or re-enable the given ones)
    Enable {
        /// Previously disabled paths to include again
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        paths: Vec<String>,
    },
    /// Restore the baseline GOPATH, or exclude the given managed paths
    Disable {
        /// Managed paths to exclude from GOPATH
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        paths: Vec<String>,
    },
    /// Add repos to be maintained by gopaths
    Add {
        /// Directories to manage
        #[arg(required = true, num_args = 1.., value_parser = NonEmptyStringValueParser::new())]
        paths: Vec<String>,
    },
    /// Remove repos maintained by gopaths
    #[command(visible_alias = "rm")]
    Remove {
        /// Directories to stop managing
        #[arg(required_unless_present = "all", value_parser = NonEmptyStringValueParser::new())]
        paths: Vec<String>,
        /// Remove every managed path (requires --force)
        #[arg(long)]
        all: bool,
        /// Confirm destructive removals
        #[arg(long)]
        force: bool,
    },
    /// Shell completion
    Complete,
    /// Restore the environment recorded before gopaths ran
    Restore,
    /// Remove gopaths state from the environment
    Clean,
}

/// Dispatch after parse
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = dispatch(cli) {
        eprintln!("{APP_NAME}: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // stdout is for `eval`; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn open_app(config_dir: Option<PathBuf>) -> Result<App<ProcessEnv>> {
    let settings = Settings::resolve(config_dir).context("config")?;
    let store = RepoStore::new(settings.repos_path());
    App::open(store, ProcessEnv).context("repos info")
}

fn dispatch(cli: Cli) -> Result<()> {
    dispatch_with(cli, app::current_dir)
}

/// The working directory is resolved before the store is opened, so a failure
/// there aborts ahead of any write (including the first baseline capture).
fn dispatch_with(
    cli: Cli,
    current_dir: impl FnOnce() -> Result<PathBuf, GopathsError>,
) -> Result<()> {
    let Cli {
        config_dir, command, ..
    } = cli;

    match command {
        Commands::Init { apply } => {
            let mut app = open_app(config_dir)?;
            match app.init(!apply) {
                Some(line) => println!("{line}"),
                None => eprintln!(
                    "GOPATH updated for this process only; use `eval \"$({APP_NAME} init)\"` in your shell"
                ),
            }
        }
        Commands::Config { show, set } => {
            if set.is_some() {
                return Err(GopathsError::NotImplemented("config --set")).context("config");
            }
            let app = open_app(config_dir)?;
            if show {
                print!("{}", app.show());
            } else {
                println!("{}", app.store_path().display());
            }
        }
        Commands::Enable { paths } => {
            let cwd = if paths.is_empty() {
                None
            } else {
                Some(current_dir().context("enable")?)
            };
            let mut app = open_app(config_dir)?;
            if let Some(cwd) = cwd {
                let enabled = app.enable_paths(&paths, &cwd).context("enable")?;
                report("Enabled", "No disabled paths matched", &enabled);
            }
            app.enable();
            println!("{}", app.shell_line(true));
        }
        Commands::Disable { paths } => {
            let cwd = if paths.is_empty() {
                None
            } else {
                Some(current_dir().context("disable")?)
            };
            let mut app = open_app(config_dir)?;
            match cwd {
                None => {
                    app.disable();
                    println!("{}", app.shell_line(false));
                }
                Some(cwd) => {
                    let disabled = app.disable_paths(&paths, &cwd).context("disable")?;
                    report("Disabled", "No enabled managed paths matched", &disabled);
                    app.enable();
                    println!("{}", app.shell_line(true));
                }
            }
        }
        Commands::Add { paths } => {
            let cwd = current_dir().context("add")?;
            let mut app = open_app(config_dir)?;
            let added = app.add(&paths, &cwd).context("add")?;
            report("Added", "Nothing to add; paths are already managed", &added);
        }
        Commands::Remove { paths, all, force } => {
            if all && !force {
                bail!("remove: refusing to remove every managed path without --force");
            }
            let cwd = current_dir().context("remove")?;
            let mut app = open_app(config_dir)?;
            let removed = app.remove(&paths, all, &cwd).context("remove")?;
            report("Removed", "Nothing removed; paths were not managed", &removed);
        }
        Commands::Complete => return Err(GopathsError::NotImplemented("complete").into()),
        Commands::Restore => return Err(GopathsError::NotImplemented("restore").into()),
        Commands::Clean => return Err(GopathsError::NotImplemented("clean").into()),
    }
    Ok(())
}

/// Status lines go to stderr so `eval "$(gopaths enable ...)"` only sees the export.
fn report(verb: &str, nothing: &str, paths: &[String]) {
    if paths.is_empty() {
        eprintln!("{nothing}.");
    }
    for path in paths {
        eprintln!("{verb} {path}");
    }
}
