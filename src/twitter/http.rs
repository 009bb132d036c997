use super::{ApiRequest, Authentication, Transport};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::time::Duration;

const TIMEOUT_SEC: u64 = 10;

/// [`Transport`] over reqwest. Credentials become default headers of the client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

async fn deserialize_response(response: Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(Error::BadResponse {
            status: status.as_u16(),
            body: text,
        });
    }
    serde_json::from_str(&text).map_err(Error::InvalidJson)
}

impl HttpTransport {
    pub fn new(auth: &Authentication) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", auth.bearer_token))?;
        headers.insert(AUTHORIZATION, value);
        if let Some(guest_token) = &auth.guest_token {
            headers.insert("x-guest-token", HeaderValue::from_str(guest_token)?);
        }
        if let (Some(auth_token), Some(csrf_token)) = (&auth.auth_token, &auth.csrf_token) {
            let cookie = format!("auth_token={auth_token}; ct0={csrf_token}");
            headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
            headers.insert("x-csrf-token", HeaderValue::from_str(csrf_token)?);
            headers.insert("x-twitter-auth-type", HeaderValue::from_static("OAuth2Session"));
        }
        Ok(Self {
            client: Client::builder()
                .default_headers(headers)
                .timeout(Duration::from_secs(TIMEOUT_SEC))
                .build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: ApiRequest) -> Result<Value> {
        let url = Url::parse_with_params(&request.endpoint.url(), request.query_pairs())?;
        log::debug!("GET {} ({})", request.endpoint.name(), url);
        let response = self.client.get(url).send().await?;
        deserialize_response(response).await
    }
}
