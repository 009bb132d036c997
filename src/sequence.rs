//! The cursor-driven sequence engine.
//!
//! [`sequence`] turns a page fetcher into a lazy stream of deduplicated entities. A new page is
//! only requested once everything from the previous one has been pulled by the consumer.

use crate::error::{Error, Result};
use crate::model::Entity;
use crate::timeline::Page;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::future::Future;
use tokio_util::sync::CancellationToken;

const DEFAULT_STALL_LIMIT: usize = 2;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SequenceConfig {
    /// Consecutive pages without a new entity before the sequence gives up on the cursor
    pub stall_limit: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        SequenceConfig {
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }
}

struct Producer<T, F> {
    fetch: F,
    cursor: String,
    buffer: VecDeque<T>,
    seen: HashSet<String>,
    emitted: usize,
    cap: usize,
    stalls: usize,
    stall_limit: usize,
    done: bool,
    cancel: CancellationToken,
}

impl<T, F, Fut> Producer<T, F>
where
    T: Entity,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    async fn next(&mut self) -> Option<Result<T, Error>> {
        loop {
            if self.emitted >= self.cap {
                return None;
            }
            if let Some(item) = self.buffer.pop_front() {
                self.emitted += 1;
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }
            if self.cancel.is_cancelled() {
                log::debug!("Sequence cancelled after {} items", self.emitted);
                self.done = true;
                return None;
            }
            match (self.fetch)(self.cursor.clone()).await {
                Ok(page) => self.absorb(page),
                Err(e) => {
                    log::warn!("Fetching page at cursor {:?} failed: {e}", self.cursor);
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }

    fn absorb(&mut self, page: Page<T>) {
        let total = page.items.len();
        let mut fresh = 0;
        for item in page.items {
            let id = item.entity_id();
            // entities without an ID cannot be deduplicated
            let unseen = id.is_empty() || self.seen.insert(id.to_string());
            if unseen {
                fresh += 1;
                self.buffer.push_back(item);
            }
        }
        log::debug!(
            "Fetched page at cursor {:?}: {total} items, {fresh} new",
            self.cursor
        );

        let advanced = page.next_cursor != self.cursor;
        if fresh > 0 {
            self.stalls = 0;
        } else if total > 0 || !advanced {
            self.stalls += 1;
        }

        if page.next_cursor.is_empty() {
            log::debug!("Reached the last page after {} unique items", self.seen.len());
            self.done = true;
        } else if self.stalls >= self.stall_limit.max(1) {
            log::warn!(
                "Cursor {:?} made no progress for {} pages, stopping",
                page.next_cursor,
                self.stalls
            );
            self.done = true;
        }
        self.cursor = page.next_cursor;
    }
}

/// Drives `fetch` from an empty cursor until `cap` entities were produced, the cursor runs out,
/// the cursor stalls or `cancel` fires.
///
/// A fetch error is yielded once and ends the stream. Cancellation is checked before each fetch,
/// so entities of a page fetched before `cancel()` are still delivered.
pub fn sequence<'a, T, F, Fut>(
    fetch: F,
    cap: usize,
    cancel: CancellationToken,
    config: SequenceConfig,
) -> BoxStream<'a, Result<T>>
where
    T: Entity + Send + 'a,
    F: FnMut(String) -> Fut + Send + 'a,
    Fut: Future<Output = Result<Page<T>>> + Send + 'a,
{
    let producer = Producer {
        fetch,
        cursor: String::new(),
        buffer: VecDeque::new(),
        seen: HashSet::new(),
        emitted: 0,
        cap,
        stalls: 0,
        stall_limit: config.stall_limit,
        done: false,
        cancel,
    };
    stream::unfold(producer, |mut producer| async move {
        producer.next().await.map(|item| (item, producer))
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tweet;
    use futures::future;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Script = HashMap<&'static str, Result<Page<Tweet>, &'static str>>;

    fn page(ids: &[&str], next: &str) -> Result<Page<Tweet>, &'static str> {
        Ok(Page {
            items: ids
                .iter()
                .map(|id| Tweet {
                    id: id.to_string(),
                    ..Default::default()
                })
                .collect(),
            next_cursor: next.to_string(),
            thread_cursors: Vec::new(),
        })
    }

    /// Serves pages by cursor and records the cursors it was asked for.
    fn scripted(
        script: Script,
    ) -> (
        Arc<Mutex<Vec<String>>>,
        impl FnMut(String) -> future::Ready<Result<Page<Tweet>>> + Send,
    ) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let log = calls.clone();
        let fetch = move |cursor: String| {
            log.lock().unwrap().push(cursor.clone());
            let result = match script.get(cursor.as_str()) {
                Some(Ok(page)) => Ok(page.clone()),
                Some(Err(message)) => Err(Error::Api(message.to_string())),
                None => Err(Error::Api(format!("unexpected cursor {cursor}"))),
            };
            future::ready(result)
        };
        (calls, fetch)
    }

    async fn run(script: Script, cap: usize) -> (Vec<String>, Vec<String>) {
        let (calls, fetch) = scripted(script);
        let ids = sequence(fetch, cap, CancellationToken::new(), SequenceConfig::default())
            .map(|item| item.unwrap().id)
            .collect::<Vec<_>>()
            .await;
        let calls = calls.lock().unwrap().clone();
        (ids, calls)
    }

    #[tokio::test]
    async fn overlapping_pages_are_deduplicated() {
        let script = HashMap::from([
            ("", page(&["1", "2", "3"], "a")),
            ("a", page(&["3", "4", "5"], "b")),
            ("b", page(&["6"], "")),
        ]);
        let (ids, calls) = run(script, 100).await;
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
        assert_eq!(calls, ["", "a", "b"]);
    }

    #[tokio::test]
    async fn cap_bounds_output_and_fetches() {
        let script = HashMap::from([
            ("", page(&["1", "2", "3"], "a")),
            ("a", page(&["4", "5", "6"], "b")),
        ]);
        let (ids, calls) = run(script, 4).await;
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert_eq!(calls, ["", "a"]);
    }

    #[tokio::test]
    async fn zero_cap_never_fetches() {
        let (ids, calls) = run(HashMap::new(), 0).await;
        assert!(ids.is_empty());
        assert!(calls.is_empty());
    }

    #[tokio::test]
    async fn repeated_pages_stall_out() {
        let script = HashMap::from([
            ("", page(&["1"], "a")),
            ("a", page(&["1"], "b")),
            ("b", page(&["1"], "c")),
            ("c", page(&["1"], "d")),
        ]);
        let (ids, calls) = run(script, 100).await;
        assert_eq!(ids, ["1"]);
        assert_eq!(calls, ["", "a", "b"]);
    }

    #[tokio::test]
    async fn stuck_cursor_stalls_out() {
        let script = HashMap::from([("", page(&["1"], "a")), ("a", page(&[], "a"))]);
        let (ids, calls) = run(script, 100).await;
        assert_eq!(ids, ["1"]);
        assert_eq!(calls, ["", "a", "a"]);
    }

    #[tokio::test]
    async fn empty_page_with_cursor_continues() {
        let script = HashMap::from([
            ("", page(&[], "a")),
            ("a", page(&[], "b")),
            ("b", page(&["1"], "")),
        ]);
        let (ids, _) = run(script, 100).await;
        assert_eq!(ids, ["1"]);
    }

    #[tokio::test]
    async fn stall_limit_is_configurable() {
        let script = HashMap::from([
            ("", page(&["1"], "a")),
            ("a", page(&["1"], "b")),
            ("b", page(&["1"], "c")),
            ("c", page(&["2"], "")),
        ]);
        let (calls, fetch) = scripted(script);
        let config = SequenceConfig { stall_limit: 3 };
        let ids: Vec<_> = sequence(fetch, 100, CancellationToken::new(), config)
            .map(|item| item.unwrap().id)
            .collect()
            .await;
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn fetch_error_is_yielded_then_ends() {
        let script = HashMap::from([("", page(&["1"], "a")), ("a", Err("boom"))]);
        let (_, fetch) = scripted(script);
        let items: Vec<_> = sequence(fetch, 100, CancellationToken::new(), SequenceConfig::default())
            .collect()
            .await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().id, "1");
        assert!(matches!(&items[1], Err(Error::Api(message)) if message == "boom"));
    }

    #[tokio::test]
    async fn cancellation_ends_quietly_before_next_fetch() {
        let script = HashMap::from([("", page(&["1", "2"], "a")), ("a", page(&["3"], ""))]);
        let (calls, fetch) = scripted(script);
        let cancel = CancellationToken::new();
        let mut stream = sequence(fetch, 100, cancel.clone(), SequenceConfig::default());
        assert_eq!(stream.next().await.unwrap().unwrap().id, "1");
        cancel.cancel();
        // the page already fetched is still drained
        assert_eq!(stream.next().await.unwrap().unwrap().id, "2");
        assert!(stream.next().await.is_none());
        assert_eq!(*calls.lock().unwrap(), [""]);
    }

    #[tokio::test]
    async fn cancelled_before_start_fetches_nothing() {
        let (calls, fetch) = scripted(HashMap::from([("", page(&["1"], ""))]));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let items: Vec<_> = sequence(fetch, 100, cancel, SequenceConfig::default())
            .collect()
            .await;
        assert!(items.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }
}
