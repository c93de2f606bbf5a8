use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use engine_core::{App, HostConfig, DEFAULT_CONFIG_FILE};
use tracing_subscriber::EnvFilter;

/// Runs the dinosaur game plugin with hot reload.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Host settings file. Missing files fall back to defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Plugin library to load, overriding the config file.
    #[arg(long)]
    plugin: Option<PathBuf>,

    /// Directory plugin image paths are resolved against.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Start with the plugin inspector open.
    #[arg(long)]
    inspector: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, from_file) = load_config(&args)?;
    init_tracing(&config.log_level);

    if from_file {
        tracing::info!(path = %args.config.display(), "config loaded");
    } else {
        tracing::info!(path = %args.config.display(), "no config file, using defaults");
    }
    tracing::info!(plugin = %config.plugin_path.display(), assets = %config.asset_root.display(), "starting");
    App::new(config).run().context("engine stopped with an error")
}

/// Config file (or defaults) with command-line overrides applied.
/// The flag tells whether the file existed.
fn load_config(args: &Args) -> anyhow::Result<(HostConfig, bool)> {
    let file = HostConfig::read(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let from_file = file.is_some();
    let mut config = file.unwrap_or_default();

    if let Some(plugin) = &args.plugin {
        config.plugin_path = plugin.clone();
    }
    if let Some(assets) = &args.assets {
        config.asset_root = assets.clone();
    }
    if args.inspector {
        config.window.show_inspector = true;
    }
    Ok((config, from_file))
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn overrides_are_optional() {
        let args = Args::parse_from(["player"]);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert!(args.plugin.is_none());

        let args = Args::parse_from(["player", "--plugin", "lib/x.so", "--inspector"]);
        assert_eq!(args.plugin, Some(PathBuf::from("lib/x.so")));
        assert!(args.inspector);
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let args = Args::parse_from([
            "player",
            "--config",
            "definitely/not/here/engine.toml",
            "--assets",
            "game/assets",
        ]);
        let (config, from_file) = load_config(&args).unwrap();
        assert!(!from_file);
        assert_eq!(config.asset_root, PathBuf::from("game/assets"));
        assert_eq!(config.plugin_path, HostConfig::default().plugin_path);
        assert!(!config.window.show_inspector);
    }
}
