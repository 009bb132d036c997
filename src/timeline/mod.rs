//! Timeline decoders: one per upstream response shape.
//!
//! Every GraphQL shape nests the same instruction list at a different path. The list mixes
//! content entries, module entries grouping several items, and cursor markers. [`Timeline`]
//! flattens all of that into [`Slot`]s in display order and the shape modules decide which slots
//! become entities.

mod bookmarks;
pub(crate) mod conversation;
mod home;
mod retweeters;
mod user;
mod v1;

use crate::error::Result;
use crate::model::{Profile, ThreadCursor, Tweet};
use crate::normalize::{from_page, lenient, lenient_seq, ResultSlot, TweetResult, UserResult};
use serde::Deserialize;
use serde_json::Value;

const BOTTOM: &str = "Bottom";

/// Prefix that marks a follow-list cursor as the end of results.
const TERMINAL_CURSOR_PREFIX: &str = "0|";

/// One decoded page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Empty when there are no more pages.
    pub next_cursor: String,
    /// Only filled in by the conversation shape.
    pub thread_cursors: Vec<ThreadCursor>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page {
            items: Vec::new(),
            next_cursor: String::new(),
            thread_cursors: Vec::new(),
        }
    }
}

/// Response shapes that carry tweets. Picked by the caller according to the endpoint queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweetShape {
    /// `UserTweets` and `UserTweetsAndReplies`
    UserTimeline,
    Bookmarks,
    /// `HomeTimeline` and `HomeLatestTimeline`
    Home,
    /// `TweetDetail`
    Conversation { focal_tweet_id: String },
    /// REST `2/timeline/*.json` with `globalObjects`
    Legacy,
}

impl TweetShape {
    pub fn decode(&self, raw: Value) -> Result<Page<Tweet>> {
        match self {
            TweetShape::UserTimeline => user::decode_tweets(raw),
            TweetShape::Bookmarks => bookmarks::decode(raw),
            TweetShape::Home => home::decode(raw),
            TweetShape::Conversation { focal_tweet_id } => conversation::decode(raw, focal_tweet_id),
            TweetShape::Legacy => v1::decode(raw),
        }
    }
}

/// Response shapes that carry user profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileShape {
    /// `Following` and `Followers`
    UserList,
    Retweeters,
}

impl ProfileShape {
    pub fn decode(&self, raw: Value) -> Result<Page<Profile>> {
        let mut page = match self {
            ProfileShape::UserList => user::decode_profiles(raw)?,
            ProfileShape::Retweeters => retweeters::decode(raw)?,
        };
        page.next_cursor = normalize_cursor(page.next_cursor);
        Ok(page)
    }
}

pub(crate) fn normalize_cursor(cursor: String) -> String {
    if cursor.starts_with(TERMINAL_CURSOR_PREFIX) {
        String::new()
    } else {
        cursor
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct Timeline {
    #[serde(deserialize_with = "lenient_seq")]
    pub instructions: Vec<Instruction>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Instruction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub entries: Vec<Entry>,
    /// `TimelinePinEntry` and `TimelineReplaceEntry` carry a single entry
    #[serde(deserialize_with = "lenient")]
    pub entry: Option<Entry>,
    /// `TimelineAddToModule`
    #[serde(deserialize_with = "lenient_seq")]
    pub module_items: Vec<ModuleItem>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Entry {
    pub entry_id: String,
    pub content: EntryContent,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct EntryContent {
    pub entry_type: String,
    pub cursor_type: String,
    pub value: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub items: Vec<ModuleItem>,
    pub item_content: ItemContent,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ModuleItem {
    pub entry_id: String,
    pub item: ModuleItemBody,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ModuleItemBody {
    pub item_content: ItemContent,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ItemContent {
    pub item_type: String,
    pub tweet_display_type: String,
    #[serde(rename = "tweet_results")]
    pub tweet_results: ResultSlot<TweetResult>,
    pub user_display_type: String,
    #[serde(rename = "user_results")]
    pub user_results: ResultSlot<UserResult>,
    pub cursor_type: String,
    pub value: String,
}

/// A single position in the flattened timeline.
#[derive(Debug)]
pub(crate) enum Slot {
    Cursor {
        entry_id: String,
        cursor_type: String,
        value: String,
        /// Found inside a module rather than as a page-level entry
        nested: bool,
    },
    Content {
        entry_id: String,
        content: ItemContent,
    },
}

impl Slot {
    fn from_item(entry_id: String, content: ItemContent, nested: bool) -> Slot {
        if content.cursor_type.is_empty() {
            Slot::Content { entry_id, content }
        } else {
            Slot::Cursor {
                entry_id,
                cursor_type: content.cursor_type,
                value: content.value,
                nested,
            }
        }
    }
}

impl Timeline {
    /// Flattens the instruction list, preserving display order.
    pub fn into_slots(self) -> Vec<Slot> {
        let mut slots = Vec::new();
        for instruction in self.instructions {
            for entry in instruction.entries.into_iter().chain(instruction.entry) {
                push_entry(&mut slots, entry);
            }
            for item in instruction.module_items {
                slots.push(Slot::from_item(item.entry_id, item.item.item_content, true));
            }
        }
        slots
    }

    /// The common decoding rule: page-level `Bottom` markers set the cursor, every other slot may
    /// yield one entity.
    pub fn collect<T>(self, mut extract: impl FnMut(ItemContent) -> Option<T>) -> Page<T> {
        let mut page = Page::default();
        for slot in self.into_slots() {
            match slot {
                Slot::Cursor {
                    cursor_type,
                    value,
                    nested: false,
                    ..
                } if cursor_type == BOTTOM => page.next_cursor = value,
                Slot::Cursor { .. } => {}
                Slot::Content { entry_id, content } => match extract(content) {
                    Some(item) => page.items.push(item),
                    None => log::debug!("Skipping entry {entry_id}"),
                },
            }
        }
        page
    }
}

fn push_entry(slots: &mut Vec<Slot>, entry: Entry) {
    let Entry { entry_id, content } = entry;
    if !content.cursor_type.is_empty() {
        slots.push(Slot::Cursor {
            entry_id,
            cursor_type: content.cursor_type,
            value: content.value,
            nested: false,
        });
        return;
    }
    let has_item = content.item_content.tweet_results.result.is_some()
        || content.item_content.user_results.result.is_some()
        || !content.item_content.cursor_type.is_empty();
    if has_item {
        slots.push(Slot::from_item(entry_id.clone(), content.item_content, false));
    } else if content.items.is_empty() {
        log::debug!("Skipping empty entry {entry_id}");
    }
    for item in content.items {
        slots.push(Slot::from_item(item.entry_id, item.item.item_content, true));
    }
}

/// Tweet extraction shared by the GraphQL tweet shapes.
pub(crate) fn tweet_of(content: ItemContent) -> Option<Tweet> {
    content.tweet_results.result?.into_tweet()
}

pub(crate) fn profile_of(content: ItemContent) -> Option<Profile> {
    let user = content.user_results.result?;
    if !user.is_user() {
        return None;
    }
    user.into_profile()
}

/// Decodes `raw` as `W` and hands back the timeline it wraps.
pub(crate) fn timeline_at<W, F>(raw: Value, path: F) -> Result<Timeline>
where
    W: serde::de::DeserializeOwned,
    F: FnOnce(W) -> Timeline,
{
    from_page::<W>(raw).map(path)
}
