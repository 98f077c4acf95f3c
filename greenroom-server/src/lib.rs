mod app;
mod config;
mod error;
mod registry;
mod relay;
mod rooms;

pub use app::app;
pub use config::ServerConfig;
pub use error::{ConfigError, ProtocolError, SendError};
pub use registry::ConnectionRegistry;
pub use relay::{SignalingRelay, ws_handler};
pub use rooms::RoomDirectory;
