use super::legacy::{parse_legacy_tweet, parse_profile, LegacyTweet, LegacyUser};
use super::{flexible_count, lenient};
use crate::model::{Profile, Tweet};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The `{"result": ...}` wrapper GraphQL puts around every nested record.
#[derive(Deserialize, Debug, Clone)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub(crate) struct ResultSlot<T> {
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<T>,
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        ResultSlot { result: None }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "__typename")]
pub(crate) enum TweetResult {
    Tweet(Box<RawTweet>),
    TweetWithVisibilityResults { tweet: Box<RawTweet> },
    #[serde(other)]
    Unsupported,
}

impl TweetResult {
    pub fn is_supported(&self) -> bool {
        !matches!(self, TweetResult::Unsupported)
    }

    pub fn into_tweet(self) -> Option<Tweet> {
        match self {
            TweetResult::Tweet(raw) | TweetResult::TweetWithVisibilityResults { tweet: raw } => {
                raw.into_tweet()
            }
            TweetResult::Unsupported => None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct RawTweet {
    pub rest_id: String,
    pub core: TweetCore,
    pub views: RawViews,
    pub note_tweet: NoteTweet,
    pub quoted_status_result: ResultSlot<TweetResult>,
    pub legacy: LegacyTweet,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct TweetCore {
    pub user_results: ResultSlot<UserResult>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct RawViews {
    #[serde(deserialize_with = "flexible_count")]
    pub count: i64,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct NoteTweet {
    pub note_tweet_results: ResultSlot<NoteTweetResult>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct NoteTweetResult {
    pub text: String,
}

impl RawTweet {
    pub fn into_tweet(self) -> Option<Tweet> {
        let RawTweet {
            rest_id,
            core,
            views,
            note_tweet,
            quoted_status_result,
            mut legacy,
        } = self;
        // long-form tweets carry their full text outside the legacy record
        if let Some(note) = note_tweet.note_tweet_results.result {
            if !note.text.is_empty() {
                legacy.full_text = note.text;
            }
        }
        if legacy.id_str.is_empty() {
            legacy.id_str = rest_id;
        }
        let user = core
            .user_results
            .result
            .map(UserResult::into_legacy)
            .unwrap_or_default();

        let mut tweet = parse_legacy_tweet(&user, legacy)?;
        if tweet.views == 0 {
            tweet.views = views.count;
        }
        if let Some(quoted) = quoted_status_result
            .result
            .and_then(TweetResult::into_tweet)
        {
            tweet.is_quoted = true;
            if tweet.quoted_status_id.is_empty() {
                tweet.quoted_status_id = quoted.id.clone();
            }
            tweet.quoted_status = Some(Box::new(quoted));
        }
        Some(tweet)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct UserResult {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub rest_id: String,
    pub is_blue_verified: bool,
    pub message: String,
    pub core: UserCore,
    pub legacy: LegacyUser,
}

/// Newer responses move a few profile fields out of `legacy`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct UserCore {
    pub screen_name: String,
    pub name: String,
    pub created_at: String,
}

impl UserResult {
    pub fn is_user(&self) -> bool {
        self.typename == "User"
    }

    pub fn into_legacy(self) -> LegacyUser {
        let mut legacy = self.legacy;
        if legacy.id_str.is_empty() {
            legacy.id_str = self.rest_id;
        }
        if legacy.screen_name.is_empty() {
            legacy.screen_name = self.core.screen_name;
        }
        if legacy.name.is_empty() {
            legacy.name = self.core.name;
        }
        if legacy.created_at.is_empty() {
            legacy.created_at = self.core.created_at;
        }
        legacy
    }

    pub fn into_profile(self) -> Option<Profile> {
        let blue = self.is_blue_verified;
        let mut profile = parse_profile(self.into_legacy())?;
        profile.is_verified |= blue;
        Some(profile)
    }
}
