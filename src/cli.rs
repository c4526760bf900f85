use clap::Parser;
use std::path::PathBuf;

/// Mirage - A configuration-driven fake REST API server
#[derive(Parser, Debug, Clone)]
#[command(name = "mirage", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "MIRAGE_CONFIG", default_value = "mirage.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "MIRAGE_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "MIRAGE_PORT")]
    pub port: Option<u16>,

    /// Path to the preset fixtures file
    #[arg(long, env = "MIRAGE_FIXTURES")]
    pub fixtures: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["mirage"]);
        assert_eq!(cli.config, PathBuf::from("mirage.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.fixtures.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "mirage",
            "--config",
            "custom.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--fixtures",
            "presets.json",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.fixtures, Some(PathBuf::from("presets.json")));
    }
}
