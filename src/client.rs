use crate::config::ClientConfig;
use crate::error::KloutError;
use crate::fetch::{fetch, fetch_identity, HttpTransport, Transport};
use crate::model::{InfluenceGraph, KloutIdentity, Score, Topic};
use crate::request::{Requests, Resource};
use serde::de::DeserializeOwned;

/// Client for the Klout v2 API.
///
/// A Twitter username must be resolved to a Klout identity with
/// [`get_klout_identity`](Self::get_klout_identity) before any of the per-user resources can be
/// requested. The resolved identity is kept on this instance only.
pub struct KloutClient<T = HttpTransport> {
    transport: T,
    requests: Requests,
    api_key: String,
    twitter_username: Option<String>,
    identity: Option<KloutIdentity>,
}

impl KloutClient<HttpTransport> {
    pub fn new(api_key: impl Into<String>) -> Result<Self, KloutError> {
        Ok(Self::with_transport(
            HttpTransport::new()?,
            Requests::default(),
            api_key,
        ))
    }

    pub fn with_twitter_username(
        api_key: impl Into<String>,
        twitter_username: impl Into<String>,
    ) -> Result<Self, KloutError> {
        let mut client = Self::new(api_key)?;
        client.set_twitter_username(twitter_username);
        Ok(client)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, KloutError> {
        let transport = HttpTransport::with_timeout(config.timeout())?;
        let requests = Requests::new(config.base_url.clone())?;
        let mut client = Self::with_transport(transport, requests, config.api_key.clone());
        if let Some(username) = &config.twitter_username {
            client.set_twitter_username(username.clone());
        }
        Ok(client)
    }
}

impl<T: Transport> KloutClient<T> {
    pub fn with_transport(transport: T, requests: Requests, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            requests,
            api_key: api_key.into(),
            twitter_username: None,
            identity: None,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    pub fn twitter_username(&self) -> Option<&str> {
        self.twitter_username.as_deref()
    }

    /// Switch to another Twitter user. Any previously resolved identity is dropped.
    pub fn set_twitter_username(&mut self, twitter_username: impl Into<String>) {
        self.twitter_username = Some(twitter_username.into());
        if self.identity.take().is_some() {
            log::debug!("Twitter username changed, cleared resolved Klout identity");
        }
    }

    pub fn identity(&self) -> Option<&KloutIdentity> {
        self.identity.as_ref()
    }

    pub fn klout_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.id.as_str())
    }

    /// Resolve the configured Twitter username to a Klout identity and remember it.
    ///
    /// On failure the previously resolved identity, if any, is kept.
    pub async fn get_klout_identity(&mut self) -> Result<KloutIdentity, KloutError> {
        let username = self
            .twitter_username
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(KloutError::MissingUsername)?;
        let url = self.requests.identity(username, &self.api_key);
        let identity = fetch_identity(&self.transport, &url).await?;
        log::debug!("Resolved {} to Klout id {}", username, identity.id);
        self.identity = Some(identity.clone());
        Ok(identity)
    }

    pub async fn get_score(&self) -> Result<Score, KloutError> {
        self.get_resource(Resource::Score).await
    }

    pub async fn get_user_topics(&self) -> Result<Vec<Topic>, KloutError> {
        self.get_resource(Resource::Topics).await
    }

    pub async fn get_influence(&self) -> Result<InfluenceGraph, KloutError> {
        self.get_resource(Resource::Influence).await
    }

    async fn get_resource<R: DeserializeOwned>(&self, resource: Resource) -> Result<R, KloutError> {
        let klout_id = self
            .klout_id()
            .ok_or(KloutError::IdentityNotResolved(resource))?;
        let url = self.requests.resource(klout_id, resource, &self.api_key);
        fetch(&self.transport, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fetch::tests::CannedTransport;

    const IDENTITY: &str = r#"{"id":"42","network":"twitter"}"#;

    fn client(transport: CannedTransport) -> KloutClient<CannedTransport> {
        let mut client = KloutClient::with_transport(transport, Requests::default(), "K");
        client.set_twitter_username("alice");
        client
    }

    #[tokio::test]
    async fn resources_require_identity() {
        let client = client(CannedTransport::default());
        let score = client.get_score().await.unwrap_err();
        let topics = client.get_user_topics().await.unwrap_err();
        let influence = client.get_influence().await.unwrap_err();
        assert!(matches!(
            score,
            KloutError::IdentityNotResolved(Resource::Score)
        ));
        assert!(matches!(
            topics,
            KloutError::IdentityNotResolved(Resource::Topics)
        ));
        assert!(matches!(
            influence,
            KloutError::IdentityNotResolved(Resource::Influence)
        ));
        assert!(client.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn identity_requires_username() {
        let mut client =
            KloutClient::with_transport(CannedTransport::default(), Requests::default(), "K");
        let err = client.get_klout_identity().await.unwrap_err();
        assert!(matches!(err, KloutError::MissingUsername));

        client.set_twitter_username("");
        let err = client.get_klout_identity().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(client.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn resolves_identity_then_fetches_score() {
        let mut client = client(
            CannedTransport::default()
                .respond(200, IDENTITY)
                .respond(200, r#"{"score":50.1,"scoreDelta":{"dayChange":0.2,"weekChange":-1,"monthChange":4}}"#),
        );
        let identity = client.get_klout_identity().await.unwrap();
        assert_eq!(
            identity,
            KloutIdentity {
                id: "42".to_string(),
                network: "twitter".to_string()
            }
        );
        assert_eq!(client.klout_id(), Some("42"));

        let score = client.get_score().await.unwrap();
        assert_eq!(score.score, "50.1");
        assert_eq!(score.score_delta.week_change, "-1");

        let requested: Vec<String> = client
            .transport
            .requests()
            .iter()
            .map(|u| u.to_string())
            .collect();
        assert_eq!(
            requested,
            vec![
                "http://api.klout.com/v2/identity.json/twitter?screenName=alice&key=K",
                "http://api.klout.com/v2/user.json/42/score?key=K",
            ]
        );
    }

    #[tokio::test]
    async fn topics_and_influence_use_resolved_id() {
        let mut client = client(
            CannedTransport::default()
                .respond(200, IDENTITY)
                .respond(
                    200,
                    r#"[{"id":"1","displayName":"Rust","name":"rust","slug":"rust","imageUrl":"x"}]"#,
                )
                .respond(200, r#"{"myInfluencers":[],"myInfluencees":[]}"#),
        );
        client.get_klout_identity().await.unwrap();
        let topics = client.get_user_topics().await.unwrap();
        assert_eq!(topics[0].slug, "rust");
        let influence = client.get_influence().await.unwrap();
        assert!(influence.influencers.is_empty());

        let requested = client.transport.requests();
        assert_eq!(requested[1].path(), "/v2/user.json/42/topics");
        assert_eq!(requested[2].path(), "/v2/user.json/42/influence");
    }

    #[tokio::test]
    async fn failed_resolution_keeps_state() {
        let mut client = client(CannedTransport::default().respond(500, "oops"));
        let err = client.get_klout_identity().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(client.identity().is_none());
        assert!(matches!(
            client.get_score().await,
            Err(KloutError::IdentityNotResolved(_))
        ));
    }

    #[tokio::test]
    async fn malformed_identity_is_decode_error() {
        let mut client = client(CannedTransport::default().respond(200, "<html>"));
        let err = client.get_klout_identity().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(client.identity().is_none());
    }

    #[tokio::test]
    async fn changing_username_clears_identity() {
        let mut client = client(CannedTransport::default().respond(200, IDENTITY));
        client.get_klout_identity().await.unwrap();
        assert!(client.identity().is_some());

        client.set_twitter_username("bob");
        assert_eq!(client.twitter_username(), Some("bob"));
        assert_eq!(client.klout_id(), None);
    }

    #[test]
    fn from_config_rejects_bad_base_url() {
        let mut config = ClientConfig::new("K");
        config.base_url = url::Url::parse("data:text/plain,hello").unwrap();
        assert!(matches!(
            KloutClient::from_config(&config),
            Err(KloutError::InvalidBaseUrl(_))
        ));
    }
}
