use crate::{config::Config, link::Link, payload::Payload, sink::FileSink, socket::Socket};
use std::io;
use thiserror::Error;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite;
use tracing::instrument;

//

/// Connects, dumps every message of the session to
/// its own file and reconnects after any failure
#[derive(Debug)]
pub struct Receiver {
    config: Config,
    sink: FileSink,
    link: Link,
}

#[derive(Debug, Error)]
pub enum ReceiverError {
    #[error(transparent)]
    Connection(#[from] tungstenite::Error),

    #[error("Failed to parse message: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to write message: {0}")]
    Io(#[from] io::Error),
}

/// How a single session ended
#[derive(Debug)]
pub enum Step {
    /// The peer closed the session after `written` messages
    Closed { written: u64 },

    /// The session failed, `reported` if this was the
    /// first failure of the episode and got logged
    Failed {
        error: ReceiverError,
        reported: bool,
    },
}

//

impl Receiver {
    pub fn new(config: Config) -> Self {
        Self {
            sink: FileSink::from_config(&config),
            config,
            link: Link::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn link(&self) -> Link {
        self.link
    }

    /// Reconnect forever
    ///
    /// Waits the retry delay after a failed session only,
    /// a clean close reconnects right away. Only returns by
    /// cancelling the future, i.e. process termination.
    pub async fn run(mut self) {
        loop {
            if let Step::Failed { .. } = self.step().await {
                sleep(self.config.retry_delay).await;
            }
        }
    }

    /// One session plus the error reporting for it
    ///
    /// Does not wait the retry delay.
    pub async fn step(&mut self) -> Step {
        match self.session().await {
            Ok(written) => {
                self.link.closed();
                tracing::debug!(written, "Session closed by peer");
                Step::Closed { written }
            }
            Err(error) => {
                let reported = self.link.failed();
                if reported {
                    tracing::error!("error: {error}");
                } else {
                    tracing::debug!("Still failing: {error}");
                }
                Step::Failed { error, reported }
            }
        }
    }

    /// Connect and dump messages until the session ends
    ///
    /// The file index restarts at 0 for every session.
    /// Returns the number of files written on a clean close,
    /// any error ends the session, a malformed message included.
    #[instrument(skip_all, fields(url = %self.config.url))]
    pub async fn session(&mut self) -> Result<u64, ReceiverError> {
        let mut socket = Socket::connect(&self.config).await?;
        self.link.connected();

        let mut index = 0;
        while let Some(payload) = socket.recv().await? {
            if let Err(err) = self.persist(index, &payload).await {
                socket.close().await;
                return Err(err);
            }
            index += 1;
        }

        Ok(index)
    }

    async fn persist(&self, index: u64, payload: &Payload) -> Result<(), ReceiverError> {
        tracing::info!(index, kind = ?payload.kind, bytes = payload.len(), "new message");

        tracing::info!("parsing...");
        let value = payload.parse()?;

        tracing::info!("writing...");
        self.sink.write(index, &value).await?;

        tracing::info!("wrote");
        Ok(())
    }
}

//
