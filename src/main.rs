use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grip_trial::GripConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod console;

use app::App;

#[derive(Parser, Debug)]
#[command(about = "Two-trial grip strength tester")]
struct Cli {
    /// JSON configuration file; defaults apply when omitted.
    #[arg(long, env = "GRIP_CONFIG")]
    config: Option<PathBuf>,
    /// Stop after this many polls instead of running forever.
    #[arg(long)]
    ticks: Option<u64>,
}

fn load_config(path: Option<&PathBuf>) -> Result<GripConfig> {
    let Some(path) = path else {
        return Ok(GripConfig::default());
    };
    let config = GripConfig::load(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let app = App::new(config, cli.ticks)?;
    app.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ticks_and_config() {
        let cli = Cli::try_parse_from(["grip-test", "--config", "grip.json", "--ticks", "40"])
            .expect("parse args");
        assert_eq!(cli.config, Some(PathBuf::from("grip.json")));
        assert_eq!(cli.ticks, Some(40));
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), GripConfig::default());
    }

    #[test]
    fn loads_config_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("grip_test_config_{suffix}.json"));
        fs::write(&path, r#"{ "cooldown_ms": 300, "replay_countdown": false }"#)
            .expect("write config");

        let config = load_config(Some(&path)).expect("load config");
        assert_eq!(config.cooldown_ms, 300);
        assert!(!config.replay_countdown);

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn bad_config_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/grip.json");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
