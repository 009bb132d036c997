//! The REST `2/timeline/*.json` shape: entries only reference tweets by ID and the records
//! themselves live in `globalObjects`.

use super::{Page, BOTTOM};
use crate::error::Result;
use crate::model::Tweet;
use crate::normalize::{attach_retweet, from_page, lenient_seq, parse_legacy_tweet, LegacyTweet, LegacyUser};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Quotes of retweets of quotes are cut off here.
const MAX_DEPTH: usize = 3;

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct TimelineV1 {
    global_objects: GlobalObjects,
    timeline: Instructions,
}

/// Records stay raw until an entry references them, so one malformed record only costs its entry.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct GlobalObjects {
    tweets: HashMap<String, Value>,
    users: HashMap<String, Value>,
}

fn record<T: DeserializeOwned>(objects: &HashMap<String, Value>, id: &str) -> Option<T> {
    let raw = objects.get(id)?.clone();
    match serde_json::from_value(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            log::debug!("Skipping undecodable record {id}: {e}");
            None
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct Instructions {
    #[serde(deserialize_with = "lenient_seq")]
    instructions: Vec<Instruction>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct Instruction {
    add_entries: AddEntries,
    pin_entry: SingleEntry,
    replace_entry: SingleEntry,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct AddEntries {
    #[serde(deserialize_with = "lenient_seq")]
    entries: Vec<Entry>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct SingleEntry {
    entry: Entry,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct Entry {
    entry_id: String,
    content: EntryContent,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct EntryContent {
    item: Item,
    operation: Operation,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct Item {
    content: ItemContent,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ItemContent {
    tweet: TweetRef,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct TweetRef {
    id: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct Operation {
    cursor: Cursor,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct Cursor {
    value: String,
    cursor_type: String,
}

impl Entry {
    fn bottom_cursor(&self) -> Option<&str> {
        let cursor = &self.content.operation.cursor;
        (cursor.cursor_type == BOTTOM).then(|| cursor.value.as_str())
    }

    fn tweet_id(&self) -> &str {
        &self.content.item.content.tweet.id
    }
}

impl GlobalObjects {
    fn parse_tweet(&self, id: &str, depth: usize) -> Option<Tweet> {
        let raw: LegacyTweet = record(&self.tweets, id)?;
        let user: LegacyUser = record(&self.users, &raw.user_id_str)?;
        let mut tweet = parse_legacy_tweet(&user, raw.clone())?;
        if tweet.id.is_empty() {
            tweet.id = id.to_string();
        }
        if !raw.self_thread.id_str.is_empty() && raw.self_thread.id_str == tweet.id {
            tweet.is_self_thread = true;
        }
        if depth == 0 {
            return Some(tweet);
        }
        if !raw.quoted_status_id_str.is_empty() {
            if let Some(quoted) = self.parse_tweet(&raw.quoted_status_id_str, depth - 1) {
                tweet.quoted_status = Some(Box::new(quoted));
            }
        }
        if !raw.retweeted_status_id_str.is_empty() {
            if let Some(original) = self.parse_tweet(&raw.retweeted_status_id_str, depth - 1) {
                attach_retweet(&mut tweet, original);
            }
        }
        Some(tweet)
    }
}

pub(super) fn decode(raw: Value) -> Result<Page<Tweet>> {
    let timeline: TimelineV1 = from_page(raw)?;
    let objects = &timeline.global_objects;

    let mut page = Page::default();
    let mut pinned = None;
    for instruction in &timeline.timeline.instructions {
        for entry in &instruction.add_entries.entries {
            if let Some(cursor) = entry.bottom_cursor() {
                page.next_cursor = cursor.to_string();
                continue;
            }
            if entry.tweet_id().is_empty() {
                continue;
            }
            match objects.parse_tweet(entry.tweet_id(), MAX_DEPTH) {
                Some(tweet) => page.items.push(tweet),
                None => log::debug!("Skipping entry {} without a usable tweet", entry.entry_id),
            }
        }
        let pin = &instruction.pin_entry.entry;
        if !pin.tweet_id().is_empty() {
            pinned = objects.parse_tweet(pin.tweet_id(), MAX_DEPTH);
        }
        if let Some(cursor) = instruction.replace_entry.entry.bottom_cursor() {
            page.next_cursor = cursor.to_string();
        }
    }

    if let Some(mut tweet) = pinned {
        if !page.items.is_empty() {
            tweet.is_pin = true;
            page.items.insert(0, tweet);
        }
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use crate::timeline::TweetShape;
    use serde_json::json;

    fn tweet_entry(id: &str) -> serde_json::Value {
        json!({"entryId": format!("tweet-{id}"), "content": {"item": {"content": {"tweet": {"id": id}}}}})
    }

    fn cursor(kind: &str, value: &str) -> serde_json::Value {
        json!({"entryId": "cursor", "content": {"operation": {"cursor": {"value": value, "cursorType": kind}}}})
    }

    fn page() -> serde_json::Value {
        let mut retweet = fixtures::legacy_tweet("3", "42", "RT @bob: hey");
        retweet["retweeted_status_id_str"] = json!("4");
        let mut quote = fixtures::legacy_tweet("5", "42", "look at this");
        quote["quoted_status_id_str"] = json!("4");
        json!({
            "globalObjects": {
                "tweets": {
                    "1": fixtures::legacy_tweet("1", "42", "pinned"),
                    "2": fixtures::legacy_tweet("2", "42", "regular"),
                    "3": retweet,
                    "4": fixtures::legacy_tweet("4", "7", "hey"),
                    "5": quote,
                },
                "users": {
                    "42": fixtures::legacy_user("42", "alice", "Alice"),
                    "7": fixtures::legacy_user("7", "bob", "Bob"),
                },
            },
            "timeline": {"instructions": [
                {"addEntries": {"entries": [
                    tweet_entry("2"),
                    tweet_entry("3"),
                    tweet_entry("5"),
                    tweet_entry("404"),
                    cursor("Top", "up"),
                    cursor("Bottom", "down"),
                ]}},
                {"pinEntry": {"entry": tweet_entry("1")}},
            ]},
        })
    }

    #[test]
    fn global_objects_are_resolved() {
        let page = TweetShape::Legacy.decode(page()).unwrap();
        let ids: Vec<_> = page.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "5"]);
        assert!(page.items[0].is_pin);
        assert_eq!(page.next_cursor, "down");

        let retweet = &page.items[2];
        assert!(retweet.is_retweet);
        assert_eq!(retweet.text, "hey");
        assert_eq!(retweet.retweeted_status.as_ref().unwrap().username, "bob");

        let quote = &page.items[3];
        assert!(quote.is_quoted);
        assert_eq!(quote.text, "look at this");
        assert_eq!(quote.quoted_status.as_ref().unwrap().id, "4");
    }

    #[test]
    fn pinned_alone_is_not_emitted() {
        let raw = json!({
            "globalObjects": {
                "tweets": {"1": fixtures::legacy_tweet("1", "42", "pinned")},
                "users": {"42": fixtures::legacy_user("42", "alice", "Alice")},
            },
            "timeline": {"instructions": [
                {"pinEntry": {"entry": tweet_entry("1")}},
                {"replaceEntry": {"entry": cursor("Bottom", "replaced")}},
            ]},
        });
        let page = TweetShape::Legacy.decode(raw).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, "replaced");
    }

    #[test]
    fn malformed_record_only_drops_its_entry() {
        let mut broken = fixtures::legacy_tweet("2", "42", "broken");
        broken["favorite_count"] = json!("12");
        let raw = json!({
            "globalObjects": {
                "tweets": {"1": fixtures::legacy_tweet("1", "42", "fine"), "2": broken},
                "users": {"42": fixtures::legacy_user("42", "alice", "Alice"), "7": {"followers_count": "many"}},
            },
            "timeline": {"instructions": [
                {"addEntries": {"entries": [tweet_entry("1"), tweet_entry("2"), cursor("Bottom", "down")]}},
            ]},
        });
        let page = TweetShape::Legacy.decode(raw).unwrap();
        let ids: Vec<_> = page.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1"]);
        assert_eq!(page.next_cursor, "down");
    }
}
