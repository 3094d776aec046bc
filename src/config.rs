//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "neko-stopwatch")]
#[command(about = "A chroma-keyable stopwatch overlay with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Path of the persisted appearance settings
    #[arg(short, long, default_value = "settings.ini")]
    pub settings: PathBuf,

    /// Display refresh cadence in milliseconds while the timer runs
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Display refresh cadence
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["neko-stopwatch"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.settings, PathBuf::from("settings.ini"));
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn zero_tick_is_rejected() {
        assert!(Config::try_parse_from(["neko-stopwatch", "--tick-ms", "0"]).is_err());
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "neko-stopwatch", "-p", "9000", "-s", "/tmp/overlay.ini", "-v",
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.settings, PathBuf::from("/tmp/overlay.ini"));
        assert_eq!(config.log_level(), "debug");
    }
}
