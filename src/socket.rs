use crate::{config::Config, payload::Payload};
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async_with_config,
    tungstenite::{
        self,
        client::IntoClientRequest,
        http::{header::USER_AGENT, HeaderValue},
        Message,
    },
    MaybeTlsStream, WebSocketStream,
};
use tracing::instrument;

//

/// A single websocket session
///
/// Dropping it closes the underlying connection.
#[derive(Debug)]
pub struct Socket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

//

const AGENT: &str = concat!("wsdump/", env!("CARGO_PKG_VERSION"));

//

impl Socket {
    /// Connect to [`Config::url`]
    ///
    /// The handshake always carries the explicit size limits
    /// from [`Config::transport`], never the transport defaults.
    #[instrument(skip_all, fields(url = %config.url))]
    pub async fn connect(config: &Config) -> Result<Self, tungstenite::Error> {
        let mut request = config.url.as_str().into_client_request()?;
        request
            .headers_mut()
            .insert(USER_AGENT, HeaderValue::from_static(AGENT));

        let transport = config.transport.websocket_config();
        tracing::debug!(
            max_message_size = ?transport.max_message_size,
            max_frame_size = ?transport.max_frame_size,
            "Connecting"
        );

        let (stream, response) = connect_async_with_config(request, Some(transport), false).await?;

        tracing::debug!(status = %response.status(), "Connected");

        Ok(Self { stream })
    }

    /// Wait for the next data message
    ///
    /// `Ok(None)` once the peer closed the session cleanly.
    /// Ping, pong and raw frames are skipped, pings are
    /// answered by the transport while reading.
    pub async fn recv(&mut self) -> Result<Option<Payload>, tungstenite::Error> {
        while let Some(message) = self.stream.next().await {
            match message? {
                message @ Message::Text(_) => {
                    return Ok(Some(Payload::text(message.into_data())))
                }
                message @ Message::Binary(_) => {
                    return Ok(Some(Payload::binary(message.into_data())))
                }
                Message::Close(frame) => {
                    // keep reading, the stream ends after the close reply is flushed
                    tracing::debug!(?frame, "Peer is closing");
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {
                    tracing::debug!("Skipping control frame");
                }
            }
        }

        Ok(None)
    }

    /// Best effort close handshake
    pub async fn close(mut self) {
        if let Err(err) = self.stream.close(None).await {
            tracing::debug!("Close handshake failed: {err}");
        }
    }
}
