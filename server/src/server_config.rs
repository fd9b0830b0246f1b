use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::net::SocketAddr;

pub const DEFAULT_LISTEN_ADDR: &str = "[::1]:5101";
pub const DEFAULT_SUBSCRIBER_CHANNEL_CAPACITY: usize = 128;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub subscriber_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            subscriber_channel_capacity: DEFAULT_SUBSCRIBER_CHANNEL_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Loads the yaml config file; a missing file means defaults, anything
    /// else unreadable or invalid is an error.
    pub fn from_yaml_file(file_path: &str) -> Result<Self, String> {
        let content = match std::fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(format!("Failed to read config file: {}", err)),
        };

        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_addr, e))?;
        if self.subscriber_channel_capacity == 0 {
            return Err("Subscriber channel capacity must be at least 1".to_string());
        }
        Ok(())
    }
}
