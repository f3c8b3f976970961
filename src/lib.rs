//! Reconnecting websocket client that writes every
//! received json message to its own numbered file
//!
//! ```no_run
//! use wsdump::{config::Config, receiver::Receiver};
//!
//! # async fn dump() {
//! let config = Config::new("ws://127.0.0.1:8080/schedule/updates").dir("./debug");
//! Receiver::new(config).run().await;
//! # }
//! ```

pub use serde_json;

//

pub mod config;
pub mod link;
pub mod payload;
pub mod receiver;
pub mod sink;
pub mod socket;
