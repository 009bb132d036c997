use crate::error::{Error, Result};
use crate::model::{Space, SpaceParticipants, SpaceUser, Topic};
use crate::normalize::{from_millis, from_page};
use crate::scraper::Scraper;
use crate::twitter::{features, ApiRequest, Endpoint};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SpaceResponse {
    data: SpaceData,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SpaceData {
    audio_space: AudioSpace,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct AudioSpace {
    metadata: Metadata,
    participants: Participants,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Metadata {
    rest_id: String,
    state: String,
    title: String,
    content_type: String,
    created_at: i64,
    scheduled_start: i64,
    started_at: i64,
    updated_at: i64,
    total_live_listeners: i64,
    topics: Vec<TopicEntry>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TopicEntry {
    topic: RawTopic,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawTopic {
    topic_id: String,
    name: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Participants {
    total: i64,
    admins: Vec<Participant>,
    speakers: Vec<Participant>,
    listeners: Vec<Participant>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Participant {
    start: i64,
    twitter_screen_name: String,
    display_name: String,
    avatar_url: String,
    is_verified: bool,
    user_results: ParticipantResults,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ParticipantResults {
    rest_id: String,
}

impl From<Participant> for SpaceUser {
    fn from(user: Participant) -> Self {
        SpaceUser {
            user_id: user.user_results.rest_id,
            username: user.twitter_screen_name,
            name: user.display_name,
            avatar: user.avatar_url,
            is_verified: user.is_verified,
            connected_at: from_millis(user.start),
        }
    }
}

fn parse_space(raw: Value) -> Result<Option<Space>> {
    let response: SpaceResponse = from_page(raw)?;
    let AudioSpace {
        metadata,
        participants,
    } = response.data.audio_space;
    if metadata.rest_id.is_empty() {
        return Ok(None);
    }
    Ok(Some(Space {
        id: metadata.rest_id,
        state: metadata.state,
        title: metadata.title,
        content_type: metadata.content_type,
        topics: metadata
            .topics
            .into_iter()
            .map(|t| Topic {
                id: t.topic.topic_id,
                title: t.topic.name,
            })
            .collect(),
        participants: SpaceParticipants {
            total_count: metadata.total_live_listeners,
            current_count: participants.total,
            admins: participants.admins.into_iter().map(SpaceUser::from).collect(),
            speakers: participants.speakers.into_iter().map(SpaceUser::from).collect(),
            listeners: participants.listeners.into_iter().map(SpaceUser::from).collect(),
        },
        created_at: from_millis(metadata.created_at),
        scheduled_start: from_millis(metadata.scheduled_start),
        started_at: from_millis(metadata.started_at),
        updated_at: from_millis(metadata.updated_at),
    }))
}

impl Scraper {
    /// Audio space metadata and participants. Requires a logged-in session.
    pub async fn get_space(&self, id: &str) -> Result<Space> {
        self.require_login()?;
        let request = ApiRequest::new(Endpoint::AudioSpaceById)
            .variable("id", id)
            .variable("isMetatagsQuery", false)
            .variable("withReplays", true)
            .variable("withListeners", true)
            .features(features::audio_space());
        parse_space(self.query(request).await?)?.ok_or_else(|| Error::SpaceNotFound(id.to_string()))
    }
}
