use super::Scraper;
use crate::error::{Error, Result};
use crate::model::Profile;
use crate::normalize::{from_page, ResultSlot, UserResult};
use crate::twitter::{features, ApiRequest, Endpoint};
use serde::Deserialize;
use serde_json::Value;

const SUSPENDED_MESSAGE: &str = "User is suspended";

#[derive(Deserialize, Default)]
#[serde(default)]
struct UserResponse {
    data: UserData,
    errors: Vec<ApiMessage>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct UserData {
    user: ResultSlot<UserResult>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ApiMessage {
    message: String,
}

impl Scraper {
    pub async fn get_profile(&self, username: &str) -> Result<Profile> {
        let request = ApiRequest::new(Endpoint::UserByScreenName)
            .variable("screen_name", username)
            .variable("withSafetyModeUserFields", true)
            .features(features::profile());
        parse_user_response(self.query(request).await?, username)
    }

    pub async fn get_profile_by_id(&self, user_id: &str) -> Result<Profile> {
        let request = ApiRequest::new(Endpoint::UserByRestId)
            .variable("userId", user_id)
            .variable("withSafetyModeUserFields", true)
            .features(features::profile());
        parse_user_response(self.query(request).await?, user_id)
    }

    /// Resolves a screen name through the profile lookup, once per scraper cache.
    pub async fn get_user_id_by_screen_name(&self, screen_name: &str) -> Result<String> {
        self.ids
            .get_or_try_insert_with(screen_name, || async {
                let profile = self.get_profile(screen_name).await?;
                log::debug!("Resolved @{screen_name} to {}", profile.user_id);
                Ok::<_, Error>(profile.user_id)
            })
            .await
    }
}

fn parse_user_response(raw: Value, lookup: &str) -> Result<Profile> {
    let response: UserResponse = from_page(raw)?;
    let user = response.data.user.result.unwrap_or_default();
    if user.rest_id.is_empty() {
        if let Some(error) = response.errors.first() {
            return Err(Error::from_api_message(&error.message));
        }
        if user.message == SUSPENDED_MESSAGE {
            return Err(Error::UserSuspended);
        }
        return Err(Error::UserNotFound);
    }
    user.into_profile()
        .ok_or_else(|| Error::ProfileUnavailable(lookup.to_string()))
}
