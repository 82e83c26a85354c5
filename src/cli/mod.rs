pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "filmrec")]
#[command(about = "Film Recommendation API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overriding API_PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create the schema and admin account, then exit")]
    InitDb,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::InitDb => commands::init_db::handle(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_serves() {
        let cli = Cli::try_parse_from(["filmrec"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_port() {
        let cli = Cli::try_parse_from(["filmrec", "serve", "--port", "8081"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(8081) })));
    }

    #[test]
    fn init_db_subcommand() {
        let cli = Cli::try_parse_from(["filmrec", "init-db"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::InitDb)));
    }
}
