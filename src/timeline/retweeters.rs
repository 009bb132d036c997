use super::{profile_of, timeline_at, Page, Timeline};
use crate::error::Result;
use crate::model::Profile;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default)]
#[serde(default)]
struct RetweetersResponse {
    data: Data,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Data {
    retweeters_timeline: Wrapped,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Wrapped {
    timeline: Timeline,
}

pub(super) fn decode(raw: Value) -> Result<Page<Profile>> {
    let timeline = timeline_at(raw, |r: RetweetersResponse| r.data.retweeters_timeline.timeline)?;
    Ok(timeline.collect(profile_of))
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use crate::timeline::ProfileShape;
    use serde_json::json;

    #[test]
    fn retweeters_are_decoded() {
        let raw = json!({"data": {"retweeters_timeline": {"timeline": {"instructions": [
            {"type": "TimelineAddEntries", "entries": [
                fixtures::user_entry(fixtures::user_result("7", "bob")),
                fixtures::cursor_entry("Top", "up"),
                fixtures::cursor_entry("Bottom", "1|down"),
            ]}
        ]}}}});
        let page = ProfileShape::Retweeters.decode(raw).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].user_id, "7");
        assert_eq!(page.next_cursor, "1|down");
    }
}
