use super::{clamp_count, Scraper, SessionMode};
use crate::error::{Error, Result};
use crate::model::{Profile, Tweet};
use crate::timeline::{conversation, Page, ProfileShape, TweetShape};
use crate::twitter::{features, ApiRequest, Endpoint};
use futures::stream::BoxStream;
use tokio_util::sync::CancellationToken;

/// Builds a `get_*` sequence out of a `fetch_*` call. The listed owned values are cloned into
/// every page request.
macro_rules! paged {
    ($scraper:expr, $max:expr, $cancel:expr, [$($owned:ident),*], |$s:ident, $count:ident, $cursor:ident| $fetch:expr) => {{
        let scraper = $scraper.clone();
        let $count = $scraper.page_size();
        $scraper.sequence($max, $cancel, move |$cursor: String| {
            let $s = scraper.clone();
            $(let $owned = $owned.clone();)*
            async move { $fetch.await }
        })
    }};
}

impl Scraper {
    async fn tweets_page(&self, request: ApiRequest, shape: TweetShape) -> Result<Page<Tweet>> {
        let raw = self.query(request).await?;
        shape.decode(raw)
    }

    async fn profiles_page(&self, request: ApiRequest, shape: ProfileShape) -> Result<Page<Profile>> {
        let raw = self.query(request).await?;
        shape.decode(raw)
    }

    /// One page of a user's tweets. Open accounts go through the REST timeline.
    pub async fn fetch_tweets(&self, user: &str, count: usize, cursor: &str) -> Result<Page<Tweet>> {
        let user_id = self.get_user_id_by_screen_name(user).await?;
        if self.config.mode == SessionMode::OpenAccount {
            return self.fetch_tweets_by_user_id_legacy(&user_id, count, cursor).await;
        }
        self.fetch_tweets_by_user_id(&user_id, count, cursor).await
    }

    pub async fn fetch_tweets_by_user_id(
        &self,
        user_id: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Tweet>> {
        let request = ApiRequest::new(Endpoint::UserTweets)
            .variable("userId", user_id)
            .variable("count", clamp_count(count))
            .variable("includePromotedContent", false)
            .variable("withQuickPromoteEligibilityTweetFields", false)
            .variable("withVoice", true)
            .variable("withV2Timeline", true)
            .features(features::user_tweets())
            .cursor(cursor);
        self.tweets_page(request, TweetShape::UserTimeline).await
    }

    pub async fn fetch_tweets_by_user_id_legacy(
        &self,
        user_id: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Tweet>> {
        let request = ApiRequest::new(Endpoint::LegacyProfileTimeline {
            user_id: user_id.to_string(),
        })
        .variable("count", clamp_count(count))
        .variable("userId", user_id)
        .cursor(cursor);
        self.tweets_page(request, TweetShape::Legacy).await
    }

    pub async fn fetch_tweets_and_replies(
        &self,
        user: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Tweet>> {
        let user_id = self.get_user_id_by_screen_name(user).await?;
        self.fetch_tweets_and_replies_by_user_id(&user_id, count, cursor)
            .await
    }

    pub async fn fetch_tweets_and_replies_by_user_id(
        &self,
        user_id: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Tweet>> {
        let request = ApiRequest::new(Endpoint::UserTweetsAndReplies)
            .variable("userId", user_id)
            .variable("count", clamp_count(count))
            .variable("includePromotedContent", false)
            .variable("withQuickPromoteEligibilityTweetFields", false)
            .variable("withVoice", true)
            .variable("withV2Timeline", true)
            .features(features::timeline())
            .cursor(cursor);
        self.tweets_page(request, TweetShape::UserTimeline).await
    }

    pub async fn fetch_bookmarks(&self, count: usize, cursor: &str) -> Result<Page<Tweet>> {
        let request = ApiRequest::new(Endpoint::Bookmarks)
            .variable("count", clamp_count(count))
            .variable("includePromotedContent", false)
            .features(features::bookmarks())
            .cursor(cursor);
        self.tweets_page(request, TweetShape::Bookmarks).await
    }

    /// The "Following" tab, newest first.
    pub async fn fetch_home_tweets(&self, count: usize, cursor: &str) -> Result<Page<Tweet>> {
        let request = ApiRequest::new(Endpoint::HomeLatestTimeline)
            .variable("count", clamp_count(count))
            .variable("includePromotedContent", true)
            .variable("withQuickPromoteEligibilityTweetFields", true)
            .variable("requestContext", "launch")
            .features(features::timeline())
            .cursor(cursor);
        self.tweets_page(request, TweetShape::Home).await
    }

    /// The algorithmic "For you" tab.
    pub async fn fetch_for_you_tweets(&self, count: usize, cursor: &str) -> Result<Page<Tweet>> {
        let request = ApiRequest::new(Endpoint::HomeTimeline)
            .variable("count", clamp_count(count))
            .variable("includePromotedContent", true)
            .variable("latestControlAvailable", true)
            .variable("requestContext", "launch")
            .variable("withCommunity", true)
            .features(features::timeline())
            .cursor(cursor);
        self.tweets_page(request, TweetShape::Home).await
    }

    pub async fn fetch_following(
        &self,
        user: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Profile>> {
        let user_id = self.get_user_id_by_screen_name(user).await?;
        self.fetch_following_by_user_id(&user_id, count, cursor).await
    }

    pub async fn fetch_following_by_user_id(
        &self,
        user_id: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Profile>> {
        let request = follow_list(Endpoint::Following, user_id, count, cursor);
        self.profiles_page(request, ProfileShape::UserList).await
    }

    pub async fn fetch_followers(
        &self,
        user: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Profile>> {
        let user_id = self.get_user_id_by_screen_name(user).await?;
        self.fetch_followers_by_user_id(&user_id, count, cursor).await
    }

    pub async fn fetch_followers_by_user_id(
        &self,
        user_id: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Profile>> {
        let request = follow_list(Endpoint::Followers, user_id, count, cursor);
        self.profiles_page(request, ProfileShape::UserList).await
    }

    pub async fn fetch_retweeters(
        &self,
        tweet_id: &str,
        count: usize,
        cursor: &str,
    ) -> Result<Page<Profile>> {
        let request = ApiRequest::new(Endpoint::Retweeters)
            .variable("tweetId", tweet_id)
            .variable("includePromotedContent", false)
            .variable("count", clamp_count(count))
            .features(features::timeline())
            .cursor(cursor);
        self.profiles_page(request, ProfileShape::Retweeters).await
    }

    /// One page of the conversation around `tweet_id`, with the cursors that expand its threads.
    pub async fn fetch_tweet_replies(&self, tweet_id: &str, cursor: &str) -> Result<Page<Tweet>> {
        let request = tweet_detail(tweet_id).cursor(cursor);
        let shape = TweetShape::Conversation {
            focal_tweet_id: tweet_id.to_string(),
        };
        self.tweets_page(request, shape).await
    }

    /// Looks up a single tweet with whichever endpoint the session mode allows.
    pub async fn get_tweet(&self, id: &str) -> Result<Tweet> {
        let found = match self.config.mode {
            SessionMode::OpenAccount => {
                let request = ApiRequest::new(Endpoint::LegacyConversation {
                    tweet_id: id.to_string(),
                });
                let page = self.tweets_page(request, TweetShape::Legacy).await?;
                page.items.into_iter().find(|tweet| tweet.id == id)
            }
            SessionMode::LoggedIn => {
                let page = self.fetch_tweet_replies(id, "").await?;
                page.items.into_iter().find(|tweet| tweet.id == id)
            }
            SessionMode::Guest => {
                let request = ApiRequest::new(Endpoint::TweetResultByRestId)
                    .variable("tweetId", id)
                    .variable("withCommunity", false)
                    .variable("includePromotedContent", false)
                    .variable("withVoice", false)
                    .features(features::tweet_result())
                    .field_toggle("withArticleRichContentState", true);
                conversation::decode_tweet_result(self.query(request).await?)?
            }
        };
        found.ok_or_else(|| Error::TweetNotFound(id.to_string()))
    }

    pub fn get_tweets(
        &self,
        user: &str,
        max: usize,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Tweet>> {
        let user = user.to_string();
        paged!(self, max, cancel, [user], |s, count, cursor| s.fetch_tweets(&user, count, &cursor))
    }

    pub fn get_tweets_and_replies(
        &self,
        user: &str,
        max: usize,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Tweet>> {
        let user = user.to_string();
        paged!(self, max, cancel, [user], |s, count, cursor| s
            .fetch_tweets_and_replies(&user, count, &cursor))
    }

    pub fn get_bookmarks(&self, max: usize, cancel: CancellationToken) -> BoxStream<'static, Result<Tweet>> {
        paged!(self, max, cancel, [], |s, count, cursor| s.fetch_bookmarks(count, &cursor))
    }

    pub fn get_home_tweets(&self, max: usize, cancel: CancellationToken) -> BoxStream<'static, Result<Tweet>> {
        paged!(self, max, cancel, [], |s, count, cursor| s.fetch_home_tweets(count, &cursor))
    }

    pub fn get_for_you_tweets(
        &self,
        max: usize,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Tweet>> {
        paged!(self, max, cancel, [], |s, count, cursor| s.fetch_for_you_tweets(count, &cursor))
    }

    pub fn get_following(
        &self,
        user: &str,
        max: usize,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Profile>> {
        let user = user.to_string();
        paged!(self, max, cancel, [user], |s, count, cursor| s.fetch_following(&user, count, &cursor))
    }

    pub fn get_followers(
        &self,
        user: &str,
        max: usize,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Profile>> {
        let user = user.to_string();
        paged!(self, max, cancel, [user], |s, count, cursor| s.fetch_followers(&user, count, &cursor))
    }

    pub fn get_retweeters(
        &self,
        tweet_id: &str,
        max: usize,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Profile>> {
        let tweet_id = tweet_id.to_string();
        paged!(self, max, cancel, [tweet_id], |s, count, cursor| s
            .fetch_retweeters(&tweet_id, count, &cursor))
    }

    /// Every tweet of the conversation, following the bottom cursor page by page.
    pub fn get_tweet_replies(
        &self,
        tweet_id: &str,
        max: usize,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<Tweet>> {
        let tweet_id = tweet_id.to_string();
        paged!(self, max, cancel, [tweet_id], |s, _count, cursor| s
            .fetch_tweet_replies(&tweet_id, &cursor))
    }
}

fn follow_list(endpoint: Endpoint, user_id: &str, count: usize, cursor: &str) -> ApiRequest {
    ApiRequest::new(endpoint)
        .variable("userId", user_id)
        .variable("includePromotedContent", false)
        .variable("count", clamp_count(count))
        .features(features::follows())
        .cursor(cursor)
}

fn tweet_detail(tweet_id: &str) -> ApiRequest {
    ApiRequest::new(Endpoint::TweetDetail)
        .variable("focalTweetId", tweet_id)
        .variable("with_rux_injections", false)
        .variable("includePromotedContent", true)
        .variable("withCommunity", true)
        .variable("withQuickPromoteEligibilityTweetFields", true)
        .variable("withBirdwatchNotes", true)
        .variable("withVoice", true)
        .variable("withV2Timeline", true)
        .features(features::tweet_detail())
}
