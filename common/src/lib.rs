pub mod proto {
    tonic::include_proto!("tictactoe");
}

pub mod id_generator;
pub mod identifiers;
pub mod logger;

pub use proto::*;
pub use identifiers::*;
