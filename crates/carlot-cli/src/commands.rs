use colored::Colorize;

use carlot_server::{CarlotServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Config(args) => cmd_config(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(dir) = args.static_dir {
        config.static_dir = Some(dir);
    }

    println!(
        "{} Carlot on {} (backend: {})",
        "▶".green().bold(),
        config.bind_addr.to_string().bold(),
        config.backend.to_string().cyan()
    );
    CarlotServer::new(config).serve().await?;
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = ServerConfig::load(args.config.as_deref())?;
    if let Err(e) = config.validate() {
        eprintln!("{} {e}", "warning:".yellow().bold());
    }
    print!("{}", config.to_toml_redacted()?);
    Ok(())
}
