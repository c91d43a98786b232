mod messages;
mod server_config;
mod web_server;
mod ws_handler;

use clap::Parser;
use server_config::{CONFIG_FILE, ServerConfig};
use tictactoe_common::config::{ConfigFile, Validate};
use tictactoe_common::{log, logger};

#[derive(Parser)]
#[command(name = "tictactoe_server", about = "Serves tic-tac-toe against a minimax opponent")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    /// Overrides the address from the config file
    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_file: ConfigFile<ServerConfig> = ConfigFile::yaml(&args.config);

    if args.write_default_config {
        config_file.save(&ServerConfig::default())?;
        log!("Default config written to {}", config_file.source());
        return Ok(());
    }

    let mut config = config_file.load()?;
    if config_file.exists()? {
        log!("Loaded config from {}", config_file.source());
    } else {
        log!("No config at {}, using defaults", config_file.source());
    }

    if let Some(address) = args.address {
        config.address = address;
        config.validate()?;
    }

    log!(
        "Computer move delay {} ms, tie break {:?}",
        config.computer_move_delay_ms,
        config.tie_break
    );

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    web_server::run_web_server(config, shutdown_signal).await?;

    log!("Server shut down gracefully");

    Ok(())
}
