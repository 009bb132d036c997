use super::graphql::{ResultSlot, TweetResult};
use super::media::{best_gif_variant, best_video_variant, hls_variant, video_url, Variant};
use super::{attach_retweet, flexible_count, html, parse_created_at};
use crate::model::{Gif, Mention, Photo, Place, Profile, Tweet, Video};
use serde::Deserialize;

/// The flat tweet record nested inside every newer wrapper type.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct LegacyTweet {
    pub id_str: String,
    pub conversation_id_str: String,
    pub user_id_str: String,
    pub created_at: String,
    pub full_text: String,
    pub favorite_count: i64,
    pub reply_count: i64,
    pub retweet_count: i64,
    pub entities: Entities,
    pub extended_entities: ExtendedEntities,
    pub in_reply_to_status_id_str: String,
    pub quoted_status_id_str: String,
    pub retweeted_status_id_str: String,
    pub retweeted_status_result: ResultSlot<TweetResult>,
    pub self_thread: SelfThread,
    pub place: Option<Place>,
    pub ext_views: Views,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Entities {
    pub hashtags: Vec<Hashtag>,
    pub media: Vec<EntityMedia>,
    pub urls: Vec<EntityUrl>,
    pub user_mentions: Vec<UserMention>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Hashtag {
    pub text: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct EntityMedia {
    pub media_url_https: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct EntityUrl {
    pub expanded_url: String,
    pub url: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct UserMention {
    pub id_str: String,
    pub name: String,
    pub screen_name: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct ExtendedEntities {
    pub media: Vec<ExtendedMedia>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct ExtendedMedia {
    pub id_str: String,
    pub media_url_https: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub ext_sensitive_media_warning: SensitiveMediaWarning,
    pub video_info: VideoInfo,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct SensitiveMediaWarning {
    pub adult_content: bool,
    pub graphic_violence: bool,
    pub other: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct VideoInfo {
    pub variants: Vec<Variant>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct SelfThread {
    pub id_str: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Views {
    #[serde(deserialize_with = "flexible_count")]
    pub count: i64,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct LegacyUser {
    pub id_str: String,
    pub screen_name: String,
    pub name: String,
    pub created_at: String,
    pub description: String,
    pub location: String,
    pub entities: UserEntities,
    pub favourites_count: i64,
    pub followers_count: i64,
    pub friends_count: i64,
    pub listed_count: i64,
    pub statuses_count: i64,
    pub pinned_tweet_ids_str: Vec<String>,
    pub profile_banner_url: String,
    pub profile_image_url_https: String,
    pub protected: bool,
    pub verified: bool,
    pub possibly_sensitive: bool,
    pub following: bool,
    pub followed_by: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct UserEntities {
    pub url: UserUrlEntities,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct UserUrlEntities {
    pub urls: Vec<EntityUrl>,
}

/// Flattens a legacy tweet and its author. `None` when the tweet has no ID or the author no
/// screen name.
pub(crate) fn parse_legacy_tweet(user: &LegacyUser, tweet: LegacyTweet) -> Option<Tweet> {
    if tweet.id_str.is_empty() || user.screen_name.is_empty() {
        return None;
    }
    let user_id = if tweet.user_id_str.is_empty() {
        user.id_str.clone()
    } else {
        tweet.user_id_str.clone()
    };
    let mut tw = Tweet {
        id: tweet.id_str.clone(),
        conversation_id: tweet.conversation_id_str.clone(),
        user_id,
        username: user.screen_name.clone(),
        name: user.name.clone(),
        text: tweet.full_text.clone(),
        permanent_url: format!(
            "https://twitter.com/{}/status/{}",
            user.screen_name, tweet.id_str
        ),
        likes: tweet.favorite_count,
        replies: tweet.reply_count,
        retweets: tweet.retweet_count,
        views: tweet.ext_views.count,
        is_pin: user.pinned_tweet_ids_str.contains(&tweet.id_str),
        place: tweet.place.filter(|p| !p.id.is_empty()),
        ..Default::default()
    };

    if let Some(time) = parse_created_at(&tweet.created_at) {
        tw.timestamp = time.timestamp();
        tw.time_parsed = Some(time);
    }
    if !tweet.quoted_status_id_str.is_empty() {
        tw.is_quoted = true;
        tw.quoted_status_id = tweet.quoted_status_id_str.clone();
    }
    if !tweet.in_reply_to_status_id_str.is_empty() {
        tw.is_reply = true;
        tw.in_reply_to_status_id = tweet.in_reply_to_status_id_str.clone();
    }
    let retweeted = tweet
        .retweeted_status_result
        .result
        .and_then(TweetResult::into_tweet);
    if !tweet.retweeted_status_id_str.is_empty() {
        tw.is_retweet = true;
        tw.retweeted_status_id = tweet.retweeted_status_id_str.clone();
    }

    tw.hashtags = tweet
        .entities
        .hashtags
        .iter()
        .map(|h| h.text.clone())
        .collect();
    tw.mentions = tweet
        .entities
        .user_mentions
        .iter()
        .map(|m| Mention {
            id: m.id_str.clone(),
            username: m.screen_name.clone(),
            name: m.name.clone(),
        })
        .collect();
    tw.urls = tweet
        .entities
        .urls
        .iter()
        .map(|u| u.expanded_url.clone())
        .collect();

    for media in &tweet.extended_entities.media {
        let variants = &media.video_info.variants;
        match media.kind.as_str() {
            "photo" => tw.photos.push(Photo {
                id: media.id_str.clone(),
                url: media.media_url_https.clone(),
            }),
            "video" => tw.videos.push(Video {
                id: media.id_str.clone(),
                preview: media.media_url_https.clone(),
                url: best_video_variant(variants)
                    .map(video_url)
                    .unwrap_or_default(),
                hls_url: hls_variant(variants)
                    .map(|v| v.url.clone())
                    .unwrap_or_default(),
            }),
            "animated_gif" => tw.gifs.push(Gif {
                id: media.id_str.clone(),
                preview: media.media_url_https.clone(),
                url: best_gif_variant(variants)
                    .map(|v| v.url.clone())
                    .unwrap_or_default(),
            }),
            other => log::debug!("Ignoring media of type {other:?} on {}", tw.id),
        }
        let warning = &media.ext_sensitive_media_warning;
        tw.sensitive_content |= warning.adult_content || warning.graphic_violence || warning.other;
    }

    tw.html = html::render(&tweet.full_text, &tweet.entities, &tw);

    if let Some(original) = retweeted {
        attach_retweet(&mut tw, original);
    }
    Some(tw)
}

/// `None` when there is no screen name: the account is suspended, deleted or private.
pub(crate) fn parse_profile(user: LegacyUser) -> Option<Profile> {
    if user.screen_name.is_empty() {
        return None;
    }
    let website = user
        .entities
        .url
        .urls
        .first()
        .map(|u| u.expanded_url.clone())
        .unwrap_or_default();
    Some(Profile {
        url: format!("https://twitter.com/{}", user.screen_name),
        joined: parse_created_at(&user.created_at),
        website,
        user_id: user.id_str,
        username: user.screen_name,
        name: user.name,
        avatar: user.profile_image_url_https,
        banner: user.profile_banner_url,
        biography: user.description,
        location: user.location,
        followers_count: user.followers_count,
        following_count: user.friends_count,
        friends_count: user.friends_count,
        likes_count: user.favourites_count,
        listed_count: user.listed_count,
        tweets_count: user.statuses_count,
        pinned_tweet_ids: user.pinned_tweet_ids_str,
        is_private: user.protected,
        is_verified: user.verified,
        sensitive: user.possibly_sensitive,
        following: user.following,
        followed_by: user.followed_by,
    })
}
