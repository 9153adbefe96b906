use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use uci2_config::Config;
use uci2_engine::Document;

mod browse;
mod commands;

#[derive(Parser)]
#[command(name = "uci2")]
#[command(about = "Read and edit UCI configuration files")]
#[command(version)]
struct Cli {
    /// Directory holding the config files (default: settings file, then /etc/config)
    #[arg(short = 'c', long, global = true)]
    config_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a config, section or option in `config.section.option=value` form
    Show {
        config: String,
        /// `section` or `section.option`
        path: Option<String>,
    },

    /// Print a section type, option value or list elements
    Get { config: String, path: String },

    /// Create or change an option
    Set {
        config: String,
        /// `section.option`
        path: String,
        value: String,
    },

    /// Add a section and print its name
    Add {
        config: String,
        #[arg(value_name = "TYPE")]
        section_type: String,
        name: Option<String>,
    },

    /// Append a value to a list, creating the list if needed
    AddList {
        config: String,
        /// `section.list`
        path: String,
        value: String,
    },

    /// Remove a section, option or list
    Delete { config: String, path: String },

    /// Rename a section, option or list
    Rename {
        config: String,
        path: String,
        new_name: String,
    },

    /// Browse a config in the terminal
    Browse { config: String },

    /// Print the settings file, or change and save it
    Settings {
        /// Directory to use when `-c` is not given
        #[arg(long, value_name = "DIR")]
        default_dir: Option<PathBuf>,
        /// Log filter to use when neither `-v` nor `RUST_LOG` is given
        #[arg(long, value_name = "LEVEL")]
        log_level: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("uci2: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Config::load_or_default()
        .with_context(|| format!("loading {}", Config::config_path().display()))?;
    init_logging(cli.verbose, settings.log_level.as_deref());

    let dir = settings.resolve_config_dir(cli.config_dir.as_deref());
    log::debug!("config directory {}", dir.display());

    match cli.command {
        Commands::Show { config, path } => {
            let doc = Document::load(&config, &dir)?;
            print!("{}", commands::show(&doc, package_name(&config), path.as_deref())?);
        }
        Commands::Get { config, path } => {
            let doc = Document::load(&config, &dir)?;
            print!("{}", commands::get(&doc, &path)?);
        }
        Commands::Set {
            config,
            path,
            value,
        } => edit(&config, &dir, |doc| commands::set(doc, &path, &value))?,
        Commands::Add {
            config,
            section_type,
            name,
        } => edit(&config, &dir, |doc| {
            commands::add(doc, &section_type, name.as_deref())
        })?,
        Commands::AddList {
            config,
            path,
            value,
        } => edit(&config, &dir, |doc| commands::add_list(doc, &path, &value))?,
        Commands::Delete { config, path } => {
            edit(&config, &dir, |doc| commands::delete(doc, &path))?
        }
        Commands::Rename {
            config,
            path,
            new_name,
        } => edit(&config, &dir, |doc| commands::rename(doc, &path, &new_name))?,
        Commands::Browse { config } => {
            let doc = Document::load(&config, &dir)?;
            let mut app = browse::App::new(config, doc);
            browse::run(&mut app)?;
        }
        Commands::Settings {
            default_dir,
            log_level,
        } => {
            if update_settings(&mut settings, default_dir, log_level)? {
                settings
                    .save()
                    .with_context(|| format!("saving {}", Config::config_path().display()))?;
                log::info!("saved {}", Config::config_path().display());
            }
            print!("{}", settings.to_toml()?);
        }
    }

    Ok(())
}

/// Load, apply one change, write back and print what the change reported.
fn edit(
    config: &str,
    dir: &Path,
    change: impl FnOnce(&mut Document) -> uci2_engine::Result<String>,
) -> Result<()> {
    let mut doc = match Document::load(config, dir) {
        Ok(doc) => doc,
        Err(err) if err.kind() == uci2_engine::ErrorKind::FileNotFound => {
            log::info!("{config} does not exist yet, starting empty");
            Document::new()
        }
        Err(err) => return Err(err.into()),
    };
    let output = change(&mut doc)?;
    doc.sync(config, dir)?;
    print!("{output}");
    Ok(())
}

/// Apply `settings` flags. Returns whether anything needs saving.
fn update_settings(
    settings: &mut Config,
    default_dir: Option<PathBuf>,
    log_level: Option<String>,
) -> Result<bool> {
    let mut changed = false;
    if let Some(dir) = default_dir {
        settings.config_dir = dir;
        changed = true;
    }
    if let Some(level) = log_level {
        level
            .parse::<log::LevelFilter>()
            .with_context(|| format!("{level:?} is not a log level"))?;
        settings.log_level = Some(level);
        changed = true;
    }
    Ok(changed)
}

/// Prefix for `show` output: the file name without its directory.
fn package_name(config: &str) -> &str {
    Path::new(config)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(config)
}

fn init_logging(verbose: u8, configured: Option<&str>) {
    let level = match verbose {
        0 => configured
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
