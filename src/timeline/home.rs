use super::{timeline_at, tweet_of, Page, Timeline};
use crate::error::Result;
use crate::model::Tweet;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default)]
#[serde(default)]
struct HomeResponse {
    data: Data,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Data {
    home: Home,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Home {
    home_timeline_urt: Timeline,
}

pub(super) fn decode(raw: Value) -> Result<Page<Tweet>> {
    let timeline = timeline_at(raw, |r: HomeResponse| r.data.home.home_timeline_urt)?;
    Ok(timeline.collect(tweet_of))
}
