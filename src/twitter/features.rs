//! Feature switches the web client sends along with GraphQL queries. Upstream rejects queries that
//! omit switches it considers mandatory, so these mirror what the web client sends per operation.

use maplit::btreemap;
use std::collections::BTreeMap;

pub type Features = BTreeMap<&'static str, bool>;

/// `UserByScreenName` and `UserByRestId`
pub fn profile() -> Features {
    btreemap! {
        "hidden_profile_subscriptions_enabled" => true,
        "rweb_tipjar_consumption_enabled" => true,
        "responsive_web_graphql_exclude_directive_enabled" => true,
        "verified_phone_label_enabled" => false,
        "subscriptions_verification_info_is_identity_verified_enabled" => true,
        "subscriptions_verification_info_verified_since_enabled" => true,
        "highlights_tweets_tab_ui_enabled" => true,
        "responsive_web_twitter_article_notes_tab_enabled" => true,
        "subscriptions_feature_can_gift_premium" => true,
        "creator_subscriptions_tweet_preview_api_enabled" => true,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled" => false,
        "responsive_web_graphql_timeline_navigation_enabled" => true,
    }
}

/// `UserTweets`
pub fn user_tweets() -> Features {
    btreemap! {
        "rweb_lists_timeline_redesign_enabled" => true,
        "responsive_web_graphql_exclude_directive_enabled" => true,
        "verified_phone_label_enabled" => false,
        "creator_subscriptions_tweet_preview_api_enabled" => true,
        "responsive_web_graphql_timeline_navigation_enabled" => true,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled" => false,
        "tweetypie_unmention_optimization_enabled" => true,
        "vibe_api_enabled" => true,
        "responsive_web_edit_tweet_api_enabled" => true,
        "graphql_is_translatable_rweb_tweet_is_translatable_enabled" => true,
        "view_counts_everywhere_api_enabled" => true,
        "longform_notetweets_consumption_enabled" => true,
        "tweet_awards_web_tipping_enabled" => false,
        "freedom_of_speech_not_reach_fetch_enabled" => true,
        "standardized_nudges_misinfo" => true,
        "tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled" => false,
        "interactive_text_enabled" => true,
        "responsive_web_text_conversations_enabled" => false,
        "longform_notetweets_rich_text_read_enabled" => true,
        "longform_notetweets_inline_media_enabled" => false,
        "responsive_web_enhance_cards_enabled" => false,
    }
}

/// `UserTweetsAndReplies`, `Retweeters`, `HomeTimeline` and `HomeLatestTimeline`
pub fn timeline() -> Features {
    btreemap! {
        "rweb_tipjar_consumption_enabled" => true,
        "responsive_web_graphql_exclude_directive_enabled" => true,
        "verified_phone_label_enabled" => false,
        "creator_subscriptions_tweet_preview_api_enabled" => true,
        "responsive_web_graphql_timeline_navigation_enabled" => true,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled" => false,
        "communities_web_enable_tweet_community_results_fetch" => true,
        "c9s_tweet_anatomy_moderator_badge_enabled" => true,
        "articles_preview_enabled" => true,
        "tweetypie_unmention_optimization_enabled" => true,
        "responsive_web_edit_tweet_api_enabled" => true,
        "graphql_is_translatable_rweb_tweet_is_translatable_enabled" => true,
        "view_counts_everywhere_api_enabled" => true,
        "longform_notetweets_consumption_enabled" => true,
        "responsive_web_twitter_article_tweet_consumption_enabled" => true,
        "tweet_awards_web_tipping_enabled" => false,
        "creator_subscriptions_quote_tweet_preview_enabled" => false,
        "freedom_of_speech_not_reach_fetch_enabled" => true,
        "standardized_nudges_misinfo" => true,
        "tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled" => true,
        "rweb_video_timestamps_enabled" => true,
        "longform_notetweets_rich_text_read_enabled" => true,
        "longform_notetweets_inline_media_enabled" => true,
        "responsive_web_enhance_cards_enabled" => false,
    }
}

/// `Following` and `Followers`
pub fn follows() -> Features {
    btreemap! {
        "responsive_web_graphql_exclude_directive_enabled" => true,
        "verified_phone_label_enabled" => false,
        "creator_subscriptions_tweet_preview_api_enabled" => true,
        "responsive_web_graphql_timeline_navigation_enabled" => true,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled" => false,
        "c9s_tweet_anatomy_moderator_badge_enabled" => true,
        "tweetypie_unmention_optimization_enabled" => true,
        "responsive_web_edit_tweet_api_enabled" => true,
        "graphql_is_translatable_rweb_tweet_is_translatable_enabled" => true,
        "view_counts_everywhere_api_enabled" => true,
        "longform_notetweets_consumption_enabled" => true,
        "responsive_web_twitter_article_tweet_consumption_enabled" => true,
        "tweet_awards_web_tipping_enabled" => false,
        "freedom_of_speech_not_reach_fetch_enabled" => true,
        "standardized_nudges_misinfo" => true,
        "tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled" => true,
        "rweb_video_timestamps_enabled" => true,
        "longform_notetweets_rich_text_read_enabled" => true,
        "longform_notetweets_inline_media_enabled" => true,
        "responsive_web_enhance_cards_enabled" => false,
    }
}

/// `Bookmarks`
pub fn bookmarks() -> Features {
    let mut features = follows();
    features.insert("graphql_timeline_v2_bookmark_timeline", true);
    features
}

/// `TweetDetail`
pub fn tweet_detail() -> Features {
    btreemap! {
        "rweb_lists_timeline_redesign_enabled" => true,
        "responsive_web_graphql_exclude_directive_enabled" => true,
        "verified_phone_label_enabled" => false,
        "creator_subscriptions_tweet_preview_api_enabled" => true,
        "responsive_web_graphql_timeline_navigation_enabled" => true,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled" => false,
        "tweetypie_unmention_optimization_enabled" => true,
        "responsive_web_edit_tweet_api_enabled" => true,
        "graphql_is_translatable_rweb_tweet_is_translatable_enabled" => true,
        "view_counts_everywhere_api_enabled" => true,
        "longform_notetweets_consumption_enabled" => true,
        "tweet_awards_web_tipping_enabled" => false,
        "freedom_of_speech_not_reach_fetch_enabled" => true,
        "standardized_nudges_misinfo" => true,
        "tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled" => false,
        "longform_notetweets_rich_text_read_enabled" => true,
        "longform_notetweets_inline_media_enabled" => true,
        "responsive_web_enhance_cards_enabled" => false,
    }
}

/// `TweetResultByRestId`
pub fn tweet_result() -> Features {
    btreemap! {
        "creator_subscriptions_tweet_preview_api_enabled" => true,
        "c9s_tweet_anatomy_moderator_badge_enabled" => true,
        "tweetypie_unmention_optimization_enabled" => true,
        "responsive_web_edit_tweet_api_enabled" => true,
        "graphql_is_translatable_rweb_tweet_is_translatable_enabled" => true,
        "view_counts_everywhere_api_enabled" => true,
        "longform_notetweets_consumption_enabled" => true,
        "responsive_web_twitter_article_tweet_consumption_enabled" => true,
        "tweet_awards_web_tipping_enabled" => false,
        "freedom_of_speech_not_reach_fetch_enabled" => true,
        "standardized_nudges_misinfo" => true,
        "tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled" => true,
        "rweb_video_timestamps_enabled" => true,
        "longform_notetweets_rich_text_read_enabled" => true,
        "longform_notetweets_inline_media_enabled" => true,
        "responsive_web_graphql_exclude_directive_enabled" => true,
        "verified_phone_label_enabled" => false,
        "responsive_web_graphql_skip_user_profile_image_extensions_enabled" => false,
        "responsive_web_graphql_timeline_navigation_enabled" => true,
        "responsive_web_enhance_cards_enabled" => false,
    }
}

/// `AudioSpaceById`
pub fn audio_space() -> Features {
    let mut features = timeline();
    features.insert("spaces_2022_h2_spaces_communities", true);
    features.insert("spaces_2022_h2_clipping", true);
    features
}
