//! The boundary to the upstream API: which endpoints exist, how a query against them is
//! described, and the [`Transport`] that performs it.

pub mod features;
mod http;

pub use http::HttpTransport;

use crate::error::Result;
use anyhow::Context;
use async_trait::async_trait;
use features::Features;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// Session credentials, read from a JSON file. Obtaining them is left to the caller.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Authentication {
    pub bearer_token: String,
    #[serde(default)]
    pub guest_token: Option<String>,
    /// `auth_token` cookie of a logged-in session
    #[serde(default)]
    pub auth_token: Option<String>,
    /// `ct0` cookie, echoed back in the `x-csrf-token` header
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl Authentication {
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let auth = fs::read_to_string(path.as_ref())
            .await
            .context("Unable to read auth file")?;
        serde_json::from_str(&auth).context("Unable to deserialize auth file")
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth_token.is_some() && self.csrf_token.is_some()
    }
}

/// Performs one authenticated request and hands back the parsed body.
///
/// Implementations own headers, retries, proxies and rate limiting.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: ApiRequest) -> Result<Value>;
}

const GRAPHQL_BASE: &str = "https://twitter.com/i/api/graphql";

/// Every upstream operation this crate issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    UserByScreenName,
    UserByRestId,
    UserTweets,
    UserTweetsAndReplies,
    LegacyProfileTimeline { user_id: String },
    LegacyConversation { tweet_id: String },
    TweetDetail,
    TweetResultByRestId,
    Bookmarks,
    Following,
    Followers,
    Retweeters,
    HomeLatestTimeline,
    HomeTimeline,
    AudioSpaceById,
    FetchScheduledTweets,
}

impl Endpoint {
    /// GraphQL query id, `None` for the REST endpoints.
    fn query_id(&self) -> Option<&'static str> {
        Some(match self {
            Endpoint::UserByScreenName => "Yka-W8dz7RaEuQNkroPkYw",
            Endpoint::UserByRestId => "Qw77dDjp9xCpUY-AXwt-yQ",
            Endpoint::UserTweets => "UGi7tjRPr-d_U3bCPIko5Q",
            Endpoint::UserTweetsAndReplies => "bt4TKuFz4T7Ckk-VvQVSow",
            Endpoint::TweetDetail => "VWFGPVAGkZMGRKGe3GFFnA",
            Endpoint::TweetResultByRestId => "xBtHv5-Xsk268T5ng_OGNg",
            Endpoint::Bookmarks => "-IyJFt9_jS_9d_vS3NN-fA",
            Endpoint::Following => "g5P4cbXR4ta4oCeE7y2vLQ",
            Endpoint::Followers => "jwbfbSzn0FRL_AMZGsYDag",
            Endpoint::Retweeters => "8019obfgnveiPiJuS2Rtow",
            Endpoint::HomeLatestTimeline => "9EwYy8pLBOSFlEoSP2STiQ",
            Endpoint::HomeTimeline => "1u0Wlkw6Ru1NwBUD-pDiww",
            Endpoint::AudioSpaceById => "d03OdorPdZ_sH9V3D1_yWQ",
            Endpoint::FetchScheduledTweets => "ITtjAzvlZni2wWXwf295Qg",
            Endpoint::LegacyProfileTimeline { .. } | Endpoint::LegacyConversation { .. } => {
                return None
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::UserByScreenName => "UserByScreenName",
            Endpoint::UserByRestId => "UserByRestId",
            Endpoint::UserTweets => "UserTweets",
            Endpoint::UserTweetsAndReplies => "UserTweetsAndReplies",
            Endpoint::LegacyProfileTimeline { .. } => "LegacyProfileTimeline",
            Endpoint::LegacyConversation { .. } => "LegacyConversation",
            Endpoint::TweetDetail => "TweetDetail",
            Endpoint::TweetResultByRestId => "TweetResultByRestId",
            Endpoint::Bookmarks => "Bookmarks",
            Endpoint::Following => "Following",
            Endpoint::Followers => "Followers",
            Endpoint::Retweeters => "Retweeters",
            Endpoint::HomeLatestTimeline => "HomeLatestTimeline",
            Endpoint::HomeTimeline => "HomeTimeline",
            Endpoint::AudioSpaceById => "AudioSpaceById",
            Endpoint::FetchScheduledTweets => "FetchScheduledTweets",
        }
    }

    pub fn is_graphql(&self) -> bool {
        self.query_id().is_some()
    }

    pub fn url(&self) -> String {
        match self {
            // profile lookups still answer on the API host
            Endpoint::UserByScreenName => {
                "https://api.twitter.com/graphql/Yka-W8dz7RaEuQNkroPkYw/UserByScreenName".to_string()
            }
            Endpoint::LegacyProfileTimeline { user_id } => {
                format!("https://api.twitter.com/2/timeline/profile/{user_id}.json")
            }
            Endpoint::LegacyConversation { tweet_id } => {
                format!("https://api.twitter.com/2/timeline/conversation/{tweet_id}.json")
            }
            _ => format!(
                "{GRAPHQL_BASE}/{}/{}",
                self.query_id().unwrap_or_default(),
                self.name()
            ),
        }
    }
}

/// A logical query: the endpoint plus its parameters. Authentication is not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub variables: Map<String, Value>,
    pub features: Features,
    pub field_toggles: Map<String, Value>,
    /// Empty for the first page
    pub cursor: String,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        ApiRequest {
            endpoint,
            variables: Map::new(),
            features: Features::new(),
            field_toggles: Map::new(),
            cursor: String::new(),
        }
    }

    pub fn variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn field_toggle(mut self, name: &str, enabled: bool) -> Self {
        self.field_toggles.insert(name.to_string(), Value::Bool(enabled));
        self
    }

    pub fn cursor(mut self, cursor: &str) -> Self {
        self.cursor = cursor.to_string();
        self
    }

    /// Renders the query string. GraphQL endpoints take JSON encoded `variables`, `features` and
    /// `fieldToggles`, REST endpoints take every variable as its own parameter.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        if !self.endpoint.is_graphql() {
            let mut pairs: Vec<_> = self
                .variables
                .iter()
                .map(|(name, value)| (name.clone(), plain(value)))
                .collect();
            if !self.cursor.is_empty() {
                pairs.push(("cursor".to_string(), self.cursor.clone()));
            }
            return pairs;
        }

        let mut variables = self.variables.clone();
        if !self.cursor.is_empty() {
            variables.insert("cursor".to_string(), Value::String(self.cursor.clone()));
        }
        let mut pairs = vec![(
            "variables".to_string(),
            Value::Object(variables).to_string(),
        )];
        if !self.features.is_empty() {
            let features: Map<_, _> = self
                .features
                .iter()
                .map(|(name, enabled)| (name.to_string(), Value::Bool(*enabled)))
                .collect();
            pairs.push(("features".to_string(), Value::Object(features).to_string()));
        }
        if !self.field_toggles.is_empty() {
            pairs.push((
                "fieldToggles".to_string(),
                Value::Object(self.field_toggles.clone()).to_string(),
            ));
        }
        pairs
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn pair<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn graphql_urls() {
        assert_eq!(
            Endpoint::UserTweets.url(),
            "https://twitter.com/i/api/graphql/UGi7tjRPr-d_U3bCPIko5Q/UserTweets"
        );
        assert_eq!(
            Endpoint::LegacyProfileTimeline {
                user_id: "42".into()
            }
            .url(),
            "https://api.twitter.com/2/timeline/profile/42.json"
        );
        assert!(!Endpoint::LegacyConversation { tweet_id: "1".into() }.is_graphql());
    }

    #[test]
    fn cursor_is_merged_into_variables() {
        let request = ApiRequest::new(Endpoint::Bookmarks)
            .variable("count", 20)
            .features(features::bookmarks())
            .cursor("abc");
        let pairs = request.query_pairs();
        let variables: Value = serde_json::from_str(pair(&pairs, "variables").unwrap()).unwrap();
        assert_eq!(variables, json!({"count": 20, "cursor": "abc"}));
        let features: Value = serde_json::from_str(pair(&pairs, "features").unwrap()).unwrap();
        assert_eq!(features["graphql_timeline_v2_bookmark_timeline"], json!(true));
        assert!(pair(&pairs, "fieldToggles").is_none());
    }

    #[test]
    fn first_page_has_no_cursor() {
        let pairs = ApiRequest::new(Endpoint::FetchScheduledTweets)
            .variable("ascending", true)
            .query_pairs();
        assert_eq!(pairs, vec![("variables".to_string(), r#"{"ascending":true}"#.to_string())]);
    }

    #[test]
    fn rest_parameters_are_flat() {
        let pairs = ApiRequest::new(Endpoint::LegacyProfileTimeline {
            user_id: "42".into(),
        })
        .variable("count", 200)
        .variable("userId", "42")
        .cursor("next")
        .query_pairs();
        assert_eq!(pair(&pairs, "count"), Some("200"));
        assert_eq!(pair(&pairs, "userId"), Some("42"));
        assert_eq!(pair(&pairs, "cursor"), Some("next"));
    }

    #[tokio::test]
    async fn authentication_is_loaded_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"bearer_token": "AAAA", "auth_token": "x", "csrf_token": "y"}}"#).unwrap();
        let auth = Authentication::load(file.path()).await.unwrap();
        assert_eq!(auth.bearer_token, "AAAA");
        assert!(auth.guest_token.is_none());
        assert!(auth.is_logged_in());
    }

    #[tokio::test]
    async fn missing_auth_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = Authentication::load(dir.path().join("auth.json"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").starts_with("Unable to read auth file"));
    }
}
