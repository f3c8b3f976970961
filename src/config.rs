use std::{path::PathBuf, time::Duration};
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;

//

pub const DEFAULT_URL: &str = "ws://127.0.0.1:8080/schedule/updates";
pub const DEFAULT_DIR: &str = "./debug";
pub const DEFAULT_PREFIX: &str = "message-";
pub const DEFAULT_EXTENSION: &str = "json";
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

//

/// Everything the receiver needs to know
///
/// [`Config::default`] matches the diagnostic setup:
/// `ws://127.0.0.1:8080/schedule/updates` dumped into
/// `./debug/message-<i>.json`, retrying every second
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `ws://` or `wss://` endpoint
    pub url: String,

    /// Directory the message files are written into
    pub dir: PathBuf,

    /// File name before the message index
    pub prefix: String,

    /// File extension, without the dot
    pub extension: String,

    /// Wait between a failed or closed session and the next connect
    pub retry_delay: Duration,

    pub transport: TransportConfig,
}

/// Payload size limits of the websocket transport
///
/// `None` means unlimited. Both limits are unlimited by
/// default, the messages this tool inspects can be huge
/// and the transport's own defaults (64 MiB / 16 MiB)
/// would drop the session on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub max_message_size: Option<usize>,
    pub max_frame_size: Option<usize>,
}

//

impl Config {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
            dir: PathBuf::from(DEFAULT_DIR),
            prefix: DEFAULT_PREFIX.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
            retry_delay: DEFAULT_RETRY_DELAY,
            transport: TransportConfig::unlimited(),
        }
    }
}

impl TransportConfig {
    /// No limit on either the message or the frame size
    pub const fn unlimited() -> Self {
        Self {
            max_message_size: None,
            max_frame_size: None,
        }
    }

    /// The [`WebSocketConfig`] handed to the handshake
    ///
    /// Both limits are always written explicitly,
    /// never left at the transport's defaults.
    pub fn websocket_config(&self) -> WebSocketConfig {
        let mut config = WebSocketConfig::default();
        config.max_message_size = self.max_message_size;
        config.max_frame_size = self.max_frame_size;
        config
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

//
