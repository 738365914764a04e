//! Client for the Klout social influence API.
//!
//! ```no_run
//! # async fn run() -> Result<(), monoklout::KloutError> {
//! let mut klout = monoklout::KloutClient::with_twitter_username("api-key", "jack")?;
//! let identity = klout.get_klout_identity().await?;
//! let score = klout.get_score().await?;
//! println!("{} scores {}", identity.id, score.score);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod request;

pub use client::KloutClient;
pub use config::ClientConfig;
pub use error::{ErrorKind, KloutError};
pub use fetch::{HttpTransport, RawResponse, Transport};
pub use model::{InfluenceEntity, InfluenceGraph, KloutIdentity, Score, ScoreDelta, Topic};
pub use request::{Requests, Resource};
