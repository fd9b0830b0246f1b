pub mod broadcaster;
pub mod game;
pub mod game_manager;
pub mod grpc_service;
pub mod server_config;
pub mod store;
