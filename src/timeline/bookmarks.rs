use super::{timeline_at, tweet_of, Page, Timeline};
use crate::error::Result;
use crate::model::Tweet;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default)]
#[serde(default)]
struct BookmarksResponse {
    data: Data,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Data {
    bookmark_timeline_v2: Wrapped,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Wrapped {
    timeline: Timeline,
}

pub(super) fn decode(raw: Value) -> Result<Page<Tweet>> {
    let timeline = timeline_at(raw, |r: BookmarksResponse| r.data.bookmark_timeline_v2.timeline)?;
    Ok(timeline.collect(tweet_of))
}
