//! Threaded conversations (`TweetDetail`) and single tweet lookups (`TweetResultByRestId`).

use super::{timeline_at, tweet_of, Page, Slot, Timeline, BOTTOM};
use crate::error::Result;
use crate::model::{ThreadCursor, Tweet};
use crate::normalize::{from_page, ResultSlot, TweetResult};
use serde::Deserialize;
use serde_json::Value;

const SELF_THREAD: &str = "SelfThread";

#[derive(Deserialize, Default)]
#[serde(default)]
struct ConversationResponse {
    data: Data,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Data {
    threaded_conversation_with_injections_v2: Timeline,
}

pub(super) fn decode(raw: Value, focal_tweet_id: &str) -> Result<Page<Tweet>> {
    let timeline = timeline_at(raw, |r: ConversationResponse| {
        r.data.threaded_conversation_with_injections_v2
    })?;

    let mut page = Page::default();
    for slot in timeline.into_slots() {
        match slot {
            Slot::Content { entry_id, content } => {
                let self_thread = content.tweet_display_type == SELF_THREAD;
                match tweet_of(content) {
                    Some(mut tweet) => {
                        tweet.is_self_thread |= self_thread;
                        page.items.push(tweet);
                    }
                    None => log::debug!("Skipping conversation entry {entry_id}"),
                }
            }
            Slot::Cursor {
                entry_id,
                cursor_type,
                value,
                nested,
            } => {
                if value.is_empty() {
                    continue;
                }
                let thread_id = if nested {
                    thread_id_of(&entry_id)
                } else {
                    focal_tweet_id.to_string()
                };
                if cursor_type == BOTTOM {
                    page.next_cursor = value.clone();
                }
                page.thread_cursors.push(ThreadCursor {
                    focal_tweet_id: focal_tweet_id.to_string(),
                    thread_id,
                    cursor: value,
                    cursor_type,
                });
            }
        }
    }
    link_thread(&mut page.items);
    Ok(page)
}

/// `conversationthread-<id>-...` names the thread a nested cursor expands.
fn thread_id_of(entry_id: &str) -> String {
    let mut parts = entry_id.split('-');
    match (parts.next(), parts.next()) {
        (Some("conversationthread"), Some(id)) if id.parse::<u64>().map_or(false, |n| n != 0) => {
            id.to_string()
        }
        _ => String::new(),
    }
}

/// Links replies to their decoded parents and assembles self-threads. A tweet only stays a
/// self-thread root if another self-thread tweet of its conversation was decoded.
fn link_thread(tweets: &mut [Tweet]) {
    // parents shown earlier are already linked when their replies copy them
    for i in 0..tweets.len() {
        let parent_id = &tweets[i].in_reply_to_status_id;
        if parent_id.is_empty() {
            continue;
        }
        let parent = tweets
            .iter()
            .find(|parent| &parent.id == parent_id)
            .map(|parent| Box::new(parent.clone()));
        tweets[i].in_reply_to_status = parent;
    }

    let linked = tweets.to_vec();
    for tweet in tweets.iter_mut() {
        if tweet.is_self_thread && tweet.conversation_id == tweet.id {
            tweet.thread = linked
                .iter()
                .filter(|child| {
                    child.is_self_thread && child.id != tweet.id && child.conversation_id == tweet.id
                })
                .cloned()
                .collect();
            if tweet.thread.is_empty() {
                tweet.is_self_thread = false;
            }
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct TweetResultResponse {
    data: TweetResultData,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct TweetResultData {
    tweet_result: ResultSlot<TweetResult>,
}

/// `data.tweetResult.result`
pub(crate) fn decode_tweet_result(raw: Value) -> Result<Option<Tweet>> {
    let response: TweetResultResponse = from_page(raw)?;
    Ok(response
        .data
        .tweet_result
        .result
        .and_then(TweetResult::into_tweet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::timeline::TweetShape;
    use serde_json::json;

    fn conversation(entries: Vec<Value>) -> Value {
        json!({"data": {"threaded_conversation_with_injections_v2": {"instructions": [
            {"type": "TimelineAddEntries", "entries": entries}
        ]}}})
    }

    fn threaded(id: &str, conversation: &str, reply_to: Option<&str>) -> Value {
        let mut raw = fixtures::tweet_result(id, "42", "alice", id);
        raw["legacy"]["conversation_id_str"] = json!(conversation);
        if let Some(parent) = reply_to {
            raw["legacy"]["in_reply_to_status_id_str"] = json!(parent);
        }
        raw
    }

    fn decode_focal(raw: Value) -> Page<Tweet> {
        TweetShape::Conversation {
            focal_tweet_id: "1".to_string(),
        }
        .decode(raw)
        .unwrap()
    }

    #[test]
    fn self_thread_is_assembled() {
        let page = decode_focal(conversation(vec![
            fixtures::self_thread_entry(threaded("1", "1", None)),
            fixtures::module_entry_with_id(
                "conversationthread-2",
                vec![fixtures::self_thread_item(threaded("2", "1", Some("1")))],
            ),
        ]));
        assert_eq!(page.items.len(), 2);
        let root = &page.items[0];
        assert!(root.is_self_thread);
        assert_eq!(root.thread.len(), 1);
        assert_eq!(root.thread[0].id, "2");
        let reply = &page.items[1];
        assert_eq!(reply.in_reply_to_status.as_ref().unwrap().id, "1");
    }

    #[test]
    fn thread_copies_keep_their_links() {
        let page = decode_focal(conversation(vec![
            fixtures::self_thread_entry(threaded("1", "1", None)),
            fixtures::module_entry_with_id(
                "conversationthread-2",
                vec![
                    fixtures::self_thread_item(threaded("2", "1", Some("1"))),
                    fixtures::self_thread_item(threaded("3", "1", Some("2"))),
                ],
            ),
        ]));
        let root = &page.items[0];
        assert_eq!(root.thread.len(), 2);
        for child in &root.thread {
            assert!(child.in_reply_to_status.is_some(), "{} is unlinked", child.id);
        }
        let last = page.items[2].in_reply_to_status.as_ref().unwrap();
        assert_eq!(last.id, "2");
        assert_eq!(last.in_reply_to_status.as_ref().unwrap().id, "1");
    }

    #[test]
    fn lone_self_thread_root_is_demoted() {
        let page = decode_focal(conversation(vec![fixtures::self_thread_entry(threaded(
            "1", "1", None,
        ))]));
        assert!(!page.items[0].is_self_thread);
        assert!(page.items[0].thread.is_empty());
    }

    #[test]
    fn unknown_parent_stays_unlinked() {
        let page = decode_focal(conversation(vec![fixtures::tweet_entry(threaded(
            "3",
            "1",
            Some("99"),
        ))]));
        assert!(page.items[0].is_reply);
        assert!(page.items[0].in_reply_to_status.is_none());
    }

    #[test]
    fn cursors_become_thread_cursors() {
        let page = decode_focal(conversation(vec![
            fixtures::tweet_entry(threaded("1", "1", None)),
            fixtures::module_entry_with_id(
                "conversationthread-5",
                vec![fixtures::cursor_item("conversationthread-5-cursor-showmore-1", "ShowMore", "more-5")],
            ),
            fixtures::item_cursor_entry("cursor-bottom-1", "Bottom", "next-page"),
        ]));
        assert_eq!(page.next_cursor, "next-page");
        assert_eq!(
            page.thread_cursors,
            vec![
                ThreadCursor {
                    focal_tweet_id: "1".into(),
                    thread_id: "5".into(),
                    cursor: "more-5".into(),
                    cursor_type: "ShowMore".into(),
                },
                ThreadCursor {
                    focal_tweet_id: "1".into(),
                    thread_id: "1".into(),
                    cursor: "next-page".into(),
                    cursor_type: "Bottom".into(),
                },
            ]
        );
    }

    #[test]
    fn thread_ids_need_a_nonzero_number() {
        assert_eq!(thread_id_of("conversationthread-123-cursor"), "123");
        assert_eq!(thread_id_of("conversationthread-0-cursor"), "");
        assert_eq!(thread_id_of("tweet-123"), "");
    }

    #[test]
    fn single_result_is_unwrapped() {
        let raw = json!({"data": {"tweetResult": {"result": fixtures::tweet_result("9", "42", "alice", "solo")}}});
        let tweet = decode_tweet_result(raw).unwrap().unwrap();
        assert_eq!(tweet.id, "9");
        assert!(decode_tweet_result(json!({"data": {"tweetResult": {}}})).unwrap().is_none());
    }
}
