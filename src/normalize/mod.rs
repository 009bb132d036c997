//! Entity normalization: turns the nested upstream records into flat [`Tweet`]s and [`Profile`]s.
//!
//! Nothing in here performs I/O. Records that cannot be normalized come back as `None` and are
//! skipped by the caller instead of failing the page they came from.

pub(crate) mod graphql;
mod html;
pub(crate) mod legacy;
pub(crate) mod media;

use crate::error::{Error, Result};
use crate::model::Tweet;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) use graphql::{ResultSlot, TweetResult, UserResult};
pub(crate) use legacy::{parse_legacy_tweet, LegacyTweet, LegacyUser};

/// Format of `created_at` on legacy records, e.g. `Wed Oct 10 20:19:24 +0000 2018`
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Decodes a whole response into one of the raw page types.
///
/// Upstream emits explicit `null` for absent optional fields, so those keys are dropped first and
/// `#[serde(default)]` takes over.
pub(crate) fn from_page<T: DeserializeOwned>(mut raw: Value) -> Result<T> {
    strip_nulls(&mut raw);
    serde_json::from_value(raw).map_err(Error::Decode)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// Deserializes an optional record, treating a record of the wrong shape as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            log::debug!("Skipping undecodable record: {e}");
            None
        }
    }))
}

/// Deserializes a list, dropping the elements that do not decode.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("Skipping undecodable entry: {e}");
                None
            }
        })
        .collect())
}

/// Counters that show up both as JSON strings and as numbers.
pub(crate) fn flexible_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        _ => 0,
    })
}

pub(crate) fn parse_created_at(created_at: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(created_at, CREATED_AT_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub(crate) fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis == 0 {
        return None;
    }
    Utc.timestamp_opt(millis / 1000, 0).single()
}

/// Makes a retweet present itself as the content it retweets while keeping its own identity.
pub(crate) fn attach_retweet(tweet: &mut Tweet, original: Tweet) {
    tweet.is_retweet = true;
    tweet.retweeted_status_id = original.id.clone();
    tweet.text = original.text.clone();
    tweet.html = original.html.clone();
    tweet.hashtags = original.hashtags.clone();
    tweet.urls = original.urls.clone();
    tweet.mentions = original.mentions.clone();
    tweet.photos = original.photos.clone();
    tweet.videos = original.videos.clone();
    tweet.gifs = original.gifs.clone();
    tweet.likes = original.likes;
    tweet.replies = original.replies;
    tweet.retweets = original.retweets;
    tweet.views = original.views;
    tweet.retweeted_status = Some(Box::new(original));
}
