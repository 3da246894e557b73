use std::net::SocketAddr;
use std::path::PathBuf;

use carlot_server::Backend;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "carlot",
    about = "Carlot — car catalog web application",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the web server
    Serve(ServeArgs),
    /// Print the effective configuration (credentials redacted)
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on (overrides config and CARLOT_BIND)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Storage backend: memory or aws
    #[arg(long)]
    pub backend: Option<Backend>,
    /// Directory of static assets served for unmatched paths
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_flags() {
        let cli = Cli::parse_from([
            "carlot",
            "serve",
            "--bind",
            "127.0.0.1:8080",
            "--backend",
            "memory",
            "--static-dir",
            "views",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind, Some("127.0.0.1:8080".parse().unwrap()));
                assert_eq!(args.backend, Some(Backend::Memory));
                assert_eq!(args.static_dir, Some(PathBuf::from("views")));
                assert!(args.config.is_none());
            }
            Command::Config(_) => panic!("expected serve"),
        }
    }

    #[test]
    fn unknown_backend_rejected() {
        assert!(Cli::try_parse_from(["carlot", "serve", "--backend", "sqlite"]).is_err());
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::parse_from(["carlot", "config", "--config", "carlot.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs { config: Some(ref p) }) if p == &PathBuf::from("carlot.toml")
        ));
    }
}
