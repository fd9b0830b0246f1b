use clap::Parser;
use tonic::transport::Server;

use common::{log, logger, proto::tic_tac_toe_server::TicTacToeServer};
use tictactoe_server::broadcaster::Broadcaster;
use tictactoe_server::game_manager::GameManager;
use tictactoe_server::grpc_service::GrpcService;
use tictactoe_server::server_config::ServerConfig;
use tictactoe_server::store::InMemoryGameStore;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    /// Path to the yaml config file; missing file means defaults.
    #[arg(long, default_value = "tictactoe_server.yaml")]
    config: String,

    /// Overrides the listen address from the config.
    #[arg(long)]
    listen_addr: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
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

    let mut config = ServerConfig::from_yaml_file(&args.config)?;
    if let Some(listen_addr) = args.listen_addr {
        config.listen_addr = listen_addr;
    }
    config.validate()?;

    let addr = config.listen_addr.parse()?;
    let store = InMemoryGameStore::new();
    let broadcaster = Broadcaster::new();
    let manager = GameManager::new(store, broadcaster.clone());
    let service = GrpcService::new(manager, broadcaster, config.subscriber_channel_capacity);

    log!("Tic-tac-toe server listening on {}", addr);

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        log!("Shutdown signal received");
    };

    Server::builder()
        .add_service(TicTacToeServer::new(service))
        .serve_with_shutdown(addr, shutdown_signal)
        .await?;

    log!("Server shut down gracefully");

    Ok(())
}
