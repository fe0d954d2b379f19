use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Item catalog service with inline image support")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Sniff an image file and display what the catalog would store
    Inspect {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_overrides() {
        let cli = Cli::parse_from(["catalog", "-v", "start", "--host", "127.0.0.1", "-p", "9000"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Start { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn start_without_flags_keeps_config_values() {
        let cli = Cli::parse_from(["catalog", "start"]);
        assert!(matches!(cli.command, Commands::Start { host: None, port: None }));
    }

    #[test]
    fn parses_inspect_with_global_config() {
        let cli = Cli::parse_from(["catalog", "inspect", "a.png", "--json", "--config", "c.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        match cli.command {
            Commands::Inspect { file, json } => {
                assert_eq!(file, PathBuf::from("a.png"));
                assert!(json);
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
