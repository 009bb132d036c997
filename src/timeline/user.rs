use super::{profile_of, timeline_at, tweet_of, Page, Timeline};
use crate::error::Result;
use crate::model::{Profile, Tweet};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default)]
#[serde(default)]
struct UserResponse {
    data: Data,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Data {
    user: User,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct User {
    result: UserTimelines,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct UserTimelines {
    timeline_v2: Wrapped,
    /// Follow lists, and tweets on accounts that were migrated to the newer layout
    timeline: Wrapped,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Wrapped {
    timeline: Timeline,
}

/// `data.user.result.timeline_v2.timeline`
pub(super) fn decode_tweets(raw: Value) -> Result<Page<Tweet>> {
    let timeline = timeline_at(raw, |r: UserResponse| {
        let UserTimelines {
            timeline_v2,
            timeline,
        } = r.data.user.result;
        if timeline_v2.timeline.instructions.is_empty() {
            timeline.timeline
        } else {
            timeline_v2.timeline
        }
    })?;
    Ok(timeline.collect(tweet_of))
}

/// `data.user.result.timeline.timeline`
pub(super) fn decode_profiles(raw: Value) -> Result<Page<Profile>> {
    let timeline = timeline_at(raw, |r: UserResponse| r.data.user.result.timeline.timeline)?;
    Ok(timeline.collect(profile_of))
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use crate::timeline::{ProfileShape, TweetShape};
    use serde_json::json;

    fn user_timeline(entries: Vec<serde_json::Value>) -> serde_json::Value {
        json!({"data": {"user": {"result": {"__typename": "User", "timeline_v2": {"timeline": {
            "instructions": [{"type": "TimelineAddEntries", "entries": entries}]
        }}}}}})
    }

    fn sample_page() -> serde_json::Value {
        user_timeline(vec![
            fixtures::tweet_entry(fixtures::tweet_result("1", "42", "alice", "first")),
            fixtures::ad_entry(),
            fixtures::tweet_entry(fixtures::tweet_result("2", "42", "alice", "second")),
            fixtures::cursor_entry("Top", "T"),
            fixtures::cursor_entry("Bottom", "X"),
        ])
    }

    #[test]
    fn ads_are_skipped_and_order_kept() {
        let page = TweetShape::UserTimeline.decode(sample_page()).unwrap();
        let ids: Vec<_> = page.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(page.next_cursor, "X");
        assert!(page.thread_cursors.is_empty());
    }

    #[test]
    fn decoding_is_idempotent() {
        let first = TweetShape::UserTimeline.decode(sample_page()).unwrap();
        let second = TweetShape::UserTimeline.decode(sample_page()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_page_keeps_cursor() {
        let page = TweetShape::UserTimeline
            .decode(user_timeline(vec![fixtures::cursor_entry("Bottom", "next")]))
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, "next");
    }

    #[test]
    fn missing_data_is_an_empty_page() {
        let page = TweetShape::UserTimeline.decode(json!({"data": {}})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, "");
    }

    #[test]
    fn follow_list_drops_terminal_cursor() {
        let raw = json!({"data": {"user": {"result": {"timeline": {"timeline": {"instructions": [
            {"type": "TimelineAddEntries", "entries": [
                fixtures::user_entry(fixtures::user_result("7", "bob")),
                fixtures::user_entry(json!({"__typename": "UserUnavailable", "message": "gone"})),
                fixtures::user_entry(fixtures::user_result("8", "carol")),
                fixtures::cursor_entry("Bottom", "0|1700000000"),
            ]}
        ]}}}}}});
        let page = ProfileShape::UserList.decode(raw).unwrap();
        let names: Vec<_> = page.items.iter().map(|p| p.username.as_str()).collect();
        assert_eq!(names, ["bob", "carol"]);
        assert_eq!(page.next_cursor, "");
    }
}
