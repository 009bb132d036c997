use crate::error::Result;
use crate::model::{Gif, Photo, ScheduledTweet, Video};
use crate::normalize::media::{best_gif_variant, best_video_variant, video_url, Variant};
use crate::normalize::{from_millis, from_page, lenient_seq};
use crate::scraper::Scraper;
use crate::twitter::{ApiRequest, Endpoint};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default)]
#[serde(default)]
struct ScheduleResponse {
    data: ScheduleData,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ScheduleData {
    viewer: Viewer,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Viewer {
    #[serde(deserialize_with = "lenient_seq")]
    scheduled_tweet_list: Vec<RawScheduledTweet>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawScheduledTweet {
    rest_id: String,
    scheduling_info: SchedulingInfo,
    tweet_create_request: CreateRequest,
    media_entities: Vec<MediaEntity>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SchedulingInfo {
    execute_at: i64,
    state: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CreateRequest {
    status: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MediaEntity {
    media_key: String,
    media_info: MediaInfo,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MediaInfo {
    #[serde(rename = "__typename")]
    typename: String,
    original_img_url: String,
    variants: Vec<Variant>,
    preview_image: PreviewImage,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PreviewImage {
    original_img_url: String,
}

impl From<RawScheduledTweet> for ScheduledTweet {
    fn from(raw: RawScheduledTweet) -> Self {
        let mut tweet = ScheduledTweet {
            id: raw.rest_id,
            state: raw.scheduling_info.state,
            execute_at: from_millis(raw.scheduling_info.execute_at),
            text: raw.tweet_create_request.status,
            ..Default::default()
        };
        for media in raw.media_entities {
            // media keys look like `7_1700000000000000000`
            let id = media
                .media_key
                .rsplit('_')
                .next()
                .unwrap_or_default()
                .to_string();
            let info = media.media_info;
            match info.typename.as_str() {
                "ApiVideo" => tweet.videos.push(Video {
                    id,
                    url: best_video_variant(&info.variants)
                        .map(video_url)
                        .unwrap_or_default(),
                    preview: info.preview_image.original_img_url,
                    hls_url: String::new(),
                }),
                "ApiGif" => tweet.gifs.push(Gif {
                    id,
                    url: best_gif_variant(&info.variants)
                        .map(|v| v.url.clone())
                        .unwrap_or_default(),
                    preview: info.preview_image.original_img_url,
                }),
                "ApiImage" => tweet.photos.push(Photo {
                    id,
                    url: info.original_img_url,
                }),
                other => log::debug!("Ignoring scheduled media of type {other:?}"),
            }
        }
        tweet
    }
}

fn parse_scheduled(raw: Value) -> Result<Vec<ScheduledTweet>> {
    let response: ScheduleResponse = from_page(raw)?;
    Ok(response
        .data
        .viewer
        .scheduled_tweet_list
        .into_iter()
        .map(ScheduledTweet::from)
        .collect())
}

impl Scraper {
    /// Posts queued for later publication on the logged-in account, earliest first.
    pub async fn fetch_scheduled_tweets(&self) -> Result<Vec<ScheduledTweet>> {
        let request = ApiRequest::new(Endpoint::FetchScheduledTweets).variable("ascending", true);
        parse_scheduled(self.query(request).await?)
    }
}
