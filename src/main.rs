use anyhow::Result;
use clap::{Parser, Subcommand};

/// agentika - lead capture for the Agentika landing page
#[derive(Parser)]
#[command(name = "agentika")]
#[command(about = "Lead capture and notification server", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Send a sample lead notification through the configured provider
    SendTest {
        /// Inbox receiving the test notification
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = agentika::Config::load(cli.config)?;
    agentika::observability::init_logging(&config.logging)?;

    match cli.command {
        Commands::Serve { host, port } => {
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            agentika::cli::serve(config, host, port).await
        }
        Commands::SendTest { email } => agentika::cli::send_test(config, email).await,
    }
}
