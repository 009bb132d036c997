//! Scraping client for Twitter's private front-end API.
//!
//! A [`Scraper`] issues queries through a [`Transport`], decodes whichever timeline shape the
//! endpoint answers with and hands back flat [`Tweet`] and [`Profile`] records, either one page at
//! a time (`fetch_*`) or as a lazy, deduplicated stream (`get_*`).

pub mod cache;
pub mod error;
pub mod model;
mod normalize;
pub mod schedule;
pub mod scraper;
pub mod sequence;
pub mod spaces;
pub mod timeline;
pub mod twitter;

#[cfg(test)]
mod fixtures;

pub use cache::ScreenNameCache;
pub use error::{Error, Result};
pub use model::{
    Entity, Gif, Mention, Photo, Place, Profile, ScheduledTweet, Space, SpaceParticipants,
    SpaceUser, ThreadCursor, Topic, Tweet, Video,
};
pub use scraper::{Scraper, ScraperConfig, SessionMode, MAX_PAGE_SIZE};
pub use sequence::{sequence, SequenceConfig};
pub use timeline::{Page, ProfileShape, TweetShape};
pub use twitter::{ApiRequest, Authentication, Endpoint, HttpTransport, Transport};
