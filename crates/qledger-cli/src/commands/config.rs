//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use qledger_core::LedgerConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "master.store_dir")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let location = ConfigLocation::resolve(config_path);

    match args.command {
        ConfigCommand::Show => show_config(&location),
        ConfigCommand::Init(init_args) => init_config(&location, init_args),
        ConfigCommand::Get { key } => get_config(&location, &key),
        ConfigCommand::Set { key, value } => set_config(&location, &key, &value),
        ConfigCommand::Path => show_path(&location),
    }
}

/// Configuration file chosen for this invocation.
struct ConfigLocation {
    path: PathBuf,
    /// Given with `--config` rather than the per-user default.
    explicit: bool,
}

impl ConfigLocation {
    fn resolve(config_path: Option<&str>) -> Self {
        match config_path {
            Some(path) => Self {
                path: PathBuf::from(path),
                explicit: true,
            },
            None => Self {
                path: default_config_path(),
                explicit: false,
            },
        }
    }

    /// Read the file. An explicit path must exist; a missing default file
    /// yields the built-in defaults.
    fn load(&self) -> anyhow::Result<LedgerConfig> {
        if self.explicit || self.path.exists() {
            debug!("Loading config from {}", self.path.display());
            Ok(LedgerConfig::from_file(&self.path)?)
        } else {
            Ok(LedgerConfig::default())
        }
    }

    fn store(&self, config: &LedgerConfig) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        config.save(&self.path)?;
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qledger")
        .join("config.json")
}

/// Load the configuration for a command: the `--config` file when given,
/// otherwise the per-user file when present, otherwise defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LedgerConfig> {
    ConfigLocation::resolve(config_path).load()
}

fn show_config(location: &ConfigLocation) -> anyhow::Result<()> {
    if !location.path.exists() && !location.explicit {
        eprintln!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            location.path.display()
        );
    }

    let config = location.load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(location: &ConfigLocation, args: InitArgs) -> anyhow::Result<()> {
    let target = match args.output {
        Some(path) => ConfigLocation {
            path,
            explicit: true,
        },
        None => ConfigLocation {
            path: location.path.clone(),
            explicit: true,
        },
    };

    if target.path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            target.path.display()
        );
    }

    target.store(&LedgerConfig::default())?;
    eprintln!(
        "{} Created configuration file at {}",
        style("✓").green(),
        target.path.display()
    );
    Ok(())
}

fn get_config(location: &ConfigLocation, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(location.load()?)?;

    let value = key
        .split('.')
        .try_fold(&json, |current, part| current.get(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set_config(location: &ConfigLocation, key: &str, value: &str) -> anyhow::Result<()> {
    // A missing file, explicit or not, starts from the defaults.
    let config = if location.path.exists() {
        LedgerConfig::from_file(&location.path)?
    } else {
        LedgerConfig::default()
    };

    // Numbers and booleans parse as JSON, anything else is a string
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    set_json_path(&mut json, key, parsed_value.clone())?;

    let config: LedgerConfig = serde_json::from_value(json)?;
    config.extraction.parts_layout.validate()?;
    location.store(&config)?;

    eprintln!(
        "{} Set {} = {} in {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?,
        location.path.display()
    );
    Ok(())
}

/// Replace the value at a dotted path; every parent must already exist.
fn set_json_path(json: &mut serde_json::Value, key: &str, value: serde_json::Value) -> anyhow::Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Empty configuration key"))?;

    let mut current = json;
    for part in parents {
        current = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }

    match current.as_object_mut() {
        Some(obj) if obj.contains_key(*last) => {
            obj.insert((*last).to_string(), value);
            Ok(())
        }
        Some(_) => anyhow::bail!("Configuration key not found: {}", key),
        None => anyhow::bail!("Cannot set value at non-object path"),
    }
}

fn show_path(location: &ConfigLocation) -> anyhow::Result<()> {
    println!("Configuration file: {}", location.path.display());

    if location.path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'qledger config init' to create a configuration file.");
    }

    Ok(())
}
