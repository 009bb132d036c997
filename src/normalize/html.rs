use super::legacy::Entities;
use crate::model::Tweet;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\B(#\S+\b)").unwrap());
static USERNAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\B(@\S{1,15}\b)").unwrap());
static SHORT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://t\.co/[A-Za-z0-9]{10}").unwrap());

/// Renders the tweet text as HTML with linked hashtags, mentions and short links. Media that is
/// not referenced by a short link is appended as images.
pub(super) fn render(text: &str, entities: &Entities, tweet: &Tweet) -> String {
    let html = HASHTAG.replace_all(text, |caps: &Captures| {
        let tag = &caps[1];
        format!(
            r#"<a href="https://twitter.com/hashtag/{}">{}</a>"#,
            tag.trim_start_matches('#'),
            tag
        )
    });
    let html = USERNAME.replace_all(&html, |caps: &Captures| {
        let name = &caps[1];
        format!(
            r#"<a href="https://twitter.com/{}">{}</a>"#,
            name.trim_start_matches('@'),
            name
        )
    });

    let mut inlined = HashSet::new();
    let html = SHORT_LINK.replace_all(&html, |caps: &Captures| {
        let tco = &caps[0];
        if let Some(entity) = entities.urls.iter().find(|u| u.url == tco) {
            return format!(r#"<a href="{}">{}</a>"#, entity.expanded_url, tco);
        }
        if let Some(media) = entities.media.iter().find(|m| m.url == tco) {
            inlined.insert(media.media_url_https.clone());
            return format!(
                r#"<br><a href="{}"><img src="{}"/></a>"#,
                tco, media.media_url_https
            );
        }
        tco.to_string()
    });

    let mut html = html.into_owned();
    for photo in &tweet.photos {
        if !inlined.contains(&photo.url) {
            html.push_str(&format!(r#"<br><img src="{}"/>"#, photo.url));
        }
    }
    for preview in tweet
        .videos
        .iter()
        .map(|v| &v.preview)
        .chain(tweet.gifs.iter().map(|g| &g.preview))
    {
        if !inlined.contains(preview) {
            html.push_str(&format!(r#"<br><img src="{}"/>"#, preview));
        }
    }
    html.replace('\n', "<br>")
}
