use crate::error::KloutError;
use std::fmt;
use std::str::FromStr;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://api.klout.com/v2/";

/// Per-user resources that can be fetched once a Klout id is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Score,
    Influence,
    Topics,
}

impl Resource {
    /// Final path segment selecting this resource.
    pub fn suffix(self) -> &'static str {
        match self {
            Resource::Score => "score",
            Resource::Influence => "influence",
            Resource::Topics => "topics",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Builds request urls for the Klout v2 API relative to a base url.
///
/// Path segments are percent-encoded and query values form-encoded, so usernames and keys
/// containing reserved characters produce well formed urls.
#[derive(Debug, Clone)]
pub struct Requests {
    base: Url,
}

impl Requests {
    pub fn new(base: Url) -> Result<Self, KloutError> {
        if base.cannot_be_a_base() {
            return Err(KloutError::InvalidBaseUrl(base));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `identity.json/twitter?screenName=<name>&key=<key>`
    pub fn identity(&self, twitter_username: &str, api_key: &str) -> Url {
        self.endpoint(
            &["identity.json", "twitter"],
            &[("screenName", twitter_username), ("key", api_key)],
        )
    }

    /// `user.json/<id>/<resource>?key=<key>`
    pub fn resource(&self, klout_id: &str, resource: Resource, api_key: &str) -> Url {
        self.endpoint(
            &["user.json", klout_id, resource.suffix()],
            &[("key", api_key)],
        )
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.set_query(None);
        url.query_pairs_mut().extend_pairs(query);
        url
    }
}

impl Default for Requests {
    fn default() -> Self {
        Self {
            base: Url::from_str(DEFAULT_BASE_URL).expect("default base url is valid"),
        }
    }
}
