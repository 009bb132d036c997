use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error performing HTTP request: {0}")]
    Request(
        #[source]
        #[from]
        reqwest::Error,
    ),
    #[error("Received unsuccessful response code: {status}\n{body}")]
    BadResponse { status: u16, body: String },
    #[error("Invalid JSON in response")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Unable to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("API returned an error: {0}")]
    Api(String),
    #[error("user is suspended")]
    UserSuspended,
    #[error("user not found")]
    UserNotFound,
    #[error("either @{0} does not exist or is private")]
    ProfileUnavailable(String),
    #[error("tweet with ID {0} not found")]
    TweetNotFound(String),
    #[error("space with ID {0} not found")]
    SpaceNotFound(String),
    #[error("scraper is not logged in")]
    NotLoggedIn,
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Maps an upstream `errors[].message` string onto a typed error.
    pub(crate) fn from_api_message(message: &str) -> Self {
        if message.contains("Missing LdapGroup(visibility-custom-suspension)") {
            Error::UserSuspended
        } else {
            Error::Api(message.to_string())
        }
    }
}
