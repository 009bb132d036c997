use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything the sequence engine can deduplicate.
pub trait Entity {
    fn entity_id(&self) -> &str;
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Tweet {
    pub id: String,
    pub conversation_id: String,
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub text: String,
    pub html: String,
    pub permanent_url: String,
    pub hashtags: Vec<String>,
    pub urls: Vec<String>,
    pub mentions: Vec<Mention>,
    pub photos: Vec<Photo>,
    pub videos: Vec<Video>,
    pub gifs: Vec<Gif>,
    pub likes: i64,
    pub replies: i64,
    pub retweets: i64,
    pub views: i64,
    pub is_pin: bool,
    pub is_reply: bool,
    pub in_reply_to_status_id: String,
    pub in_reply_to_status: Option<Box<Tweet>>,
    pub is_retweet: bool,
    pub retweeted_status_id: String,
    pub retweeted_status: Option<Box<Tweet>>,
    pub is_quoted: bool,
    pub quoted_status_id: String,
    pub quoted_status: Option<Box<Tweet>>,
    pub is_self_thread: bool,
    pub thread: Vec<Tweet>,
    pub place: Option<Place>,
    pub sensitive_content: bool,
    /// Unix seconds, zero when the creation date could not be parsed
    pub timestamp: i64,
    pub time_parsed: Option<DateTime<Utc>>,
}

impl Entity for Tweet {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Mention {
    pub id: String,
    pub username: String,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Photo {
    pub id: String,
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub preview: String,
    pub url: String,
    pub hls_url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Gif {
    pub id: String,
    pub preview: String,
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Place {
    pub id: String,
    pub place_type: String,
    pub name: String,
    pub full_name: String,
    pub country_code: String,
    pub country: String,
    pub bounding_box: BoundingBox,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BoundingBox {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub banner: String,
    pub biography: String,
    pub location: String,
    pub url: String,
    pub website: String,
    pub joined: Option<DateTime<Utc>>,
    pub followers_count: i64,
    pub following_count: i64,
    pub friends_count: i64,
    pub likes_count: i64,
    pub listed_count: i64,
    pub tweets_count: i64,
    pub pinned_tweet_ids: Vec<String>,
    pub is_private: bool,
    pub is_verified: bool,
    pub sensitive: bool,
    pub following: bool,
    pub followed_by: bool,
}

impl Entity for Profile {
    fn entity_id(&self) -> &str {
        &self.user_id
    }
}

/// A continuation point inside a threaded conversation.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadCursor {
    pub focal_tweet_id: String,
    pub thread_id: String,
    pub cursor: String,
    /// e.g. `Bottom`, `ShowMore`, `ShowMoreThreads`
    pub cursor_type: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ScheduledTweet {
    pub id: String,
    pub state: String,
    pub execute_at: Option<DateTime<Utc>>,
    pub text: String,
    pub photos: Vec<Photo>,
    pub videos: Vec<Video>,
    pub gifs: Vec<Gif>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Space {
    pub id: String,
    pub state: String,
    pub title: String,
    pub content_type: String,
    pub topics: Vec<Topic>,
    pub participants: SpaceParticipants,
    pub created_at: Option<DateTime<Utc>>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Topic {
    pub id: String,
    pub title: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SpaceParticipants {
    pub total_count: i64,
    pub current_count: i64,
    pub admins: Vec<SpaceUser>,
    pub speakers: Vec<SpaceUser>,
    pub listeners: Vec<SpaceUser>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SpaceUser {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub is_verified: bool,
    pub connected_at: Option<DateTime<Utc>>,
}
