//! Minimal upstream payloads shared by the unit tests.

use serde_json::{json, Value};

pub fn legacy_user(id: &str, screen_name: &str, name: &str) -> Value {
    json!({
        "id_str": id,
        "screen_name": screen_name,
        "name": name,
        "created_at": "Mon Mar 21 20:50:14 +0000 2011",
        "description": "",
        "followers_count": 10,
        "friends_count": 5,
        "entities": {"url": {"urls": [{"url": "https://t.co/site", "expanded_url": "https://example.com"}]}},
    })
}

pub fn legacy_tweet(id: &str, user_id: &str, text: &str) -> Value {
    json!({
        "id_str": id,
        "conversation_id_str": id,
        "user_id_str": user_id,
        "created_at": "Thu Aug 31 17:45:31 +0000 2023",
        "full_text": text,
        "favorite_count": 1,
        "reply_count": 0,
        "retweet_count": 0,
        "entities": {"hashtags": [], "urls": [], "user_mentions": []},
    })
}

pub fn user_result(id: &str, screen_name: &str) -> Value {
    json!({
        "__typename": "User",
        "rest_id": id,
        "legacy": legacy_user(id, screen_name, screen_name),
    })
}

pub fn tweet_result(id: &str, user_id: &str, screen_name: &str, text: &str) -> Value {
    json!({
        "__typename": "Tweet",
        "rest_id": id,
        "core": {"user_results": {"result": user_result(user_id, screen_name)}},
        "legacy": legacy_tweet(id, user_id, text),
    })
}

fn tweet_content(result: Value, display_type: &str) -> Value {
    json!({
        "itemType": "TimelineTweet",
        "tweetDisplayType": display_type,
        "tweet_results": {"result": result},
    })
}

pub fn tweet_entry(result: Value) -> Value {
    let id = result["rest_id"].as_str().unwrap_or_default().to_string();
    json!({
        "entryId": format!("tweet-{id}"),
        "content": {"entryType": "TimelineTimelineItem", "itemContent": tweet_content(result, "Tweet")},
    })
}

pub fn self_thread_entry(result: Value) -> Value {
    let id = result["rest_id"].as_str().unwrap_or_default().to_string();
    json!({
        "entryId": format!("tweet-{id}"),
        "content": {"entryType": "TimelineTimelineItem", "itemContent": tweet_content(result, "SelfThread")},
    })
}

/// A promoted slot whose result is not a tweet.
pub fn ad_entry() -> Value {
    json!({
        "entryId": "promoted-tweet-1",
        "content": {"entryType": "TimelineTimelineItem", "itemContent": {
            "itemType": "TimelineTweet",
            "tweet_results": {"result": {"__typename": "PromotedTweet", "rest_id": "ad"}},
        }},
    })
}

pub fn user_entry(result: Value) -> Value {
    let id = result["rest_id"].as_str().unwrap_or("unavailable").to_string();
    json!({
        "entryId": format!("user-{id}"),
        "content": {"entryType": "TimelineTimelineItem", "itemContent": {
            "itemType": "TimelineUser",
            "userDisplayType": "User",
            "user_results": {"result": result},
        }},
    })
}

pub fn cursor_entry(cursor_type: &str, value: &str) -> Value {
    json!({
        "entryId": format!("cursor-{}-1", cursor_type.to_lowercase()),
        "content": {"entryType": "TimelineTimelineCursor", "cursorType": cursor_type, "value": value},
    })
}

/// A cursor wrapped in `itemContent`, as conversations send them.
pub fn item_cursor_entry(entry_id: &str, cursor_type: &str, value: &str) -> Value {
    json!({
        "entryId": entry_id,
        "content": {"entryType": "TimelineTimelineItem", "itemContent": {
            "itemType": "TimelineTimelineCursor",
            "cursorType": cursor_type,
            "value": value,
        }},
    })
}

pub fn module_item(result: Value) -> Value {
    let id = result["rest_id"].as_str().unwrap_or_default().to_string();
    json!({"entryId": format!("module-tweet-{id}"), "item": {"itemContent": tweet_content(result, "Tweet")}})
}

pub fn self_thread_item(result: Value) -> Value {
    let id = result["rest_id"].as_str().unwrap_or_default().to_string();
    json!({"entryId": format!("module-tweet-{id}"), "item": {"itemContent": tweet_content(result, "SelfThread")}})
}

pub fn cursor_item(entry_id: &str, cursor_type: &str, value: &str) -> Value {
    json!({"entryId": entry_id, "item": {"itemContent": {
        "itemType": "TimelineTimelineCursor",
        "cursorType": cursor_type,
        "value": value,
    }}})
}

pub fn module_entry(results: Vec<Value>) -> Value {
    module_entry_with_id("profile-conversation-1", results.into_iter().map(module_item).collect())
}

pub fn module_entry_with_id(entry_id: &str, items: Vec<Value>) -> Value {
    json!({
        "entryId": entry_id,
        "content": {"entryType": "TimelineTimelineModule", "items": items},
    })
}
