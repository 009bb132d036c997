use serde::Deserialize;

const HLS_CONTENT_TYPE: &str = "application/x-mpegURL";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Variant {
    pub content_type: String,
    #[serde(alias = "bit_rate")]
    pub bitrate: i64,
    pub url: String,
}

/// Highest bitrate wins, the first one seen on a tie. Variants without a bitrate (playlists)
/// never qualify.
pub(crate) fn best_video_variant(variants: &[Variant]) -> Option<&Variant> {
    // max_by_key keeps the last maximum, so walk backwards to keep the first
    variants
        .iter()
        .filter(|v| v.bitrate > 0)
        .rev()
        .max_by_key(|v| v.bitrate)
}

/// Highest bitrate wins, the last one seen on a tie. GIF bitrates are usually all zero.
pub(crate) fn best_gif_variant(variants: &[Variant]) -> Option<&Variant> {
    variants.iter().max_by_key(|v| v.bitrate)
}

pub(crate) fn hls_variant(variants: &[Variant]) -> Option<&Variant> {
    variants.iter().find(|v| v.content_type == HLS_CONTENT_TYPE)
}

pub(crate) fn video_url(variant: &Variant) -> String {
    variant
        .url
        .strip_suffix("?tag=10")
        .unwrap_or(&variant.url)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(bitrate: i64, url: &str) -> Variant {
        Variant {
            content_type: "video/mp4".to_string(),
            bitrate,
            url: url.to_string(),
        }
    }

    #[test]
    fn video_picks_highest_bitrate() {
        let variants = vec![variant(500, "low"), variant(1200, "high")];
        assert_eq!(best_video_variant(&variants).unwrap().url, "high");
    }

    #[test]
    fn video_tie_keeps_first() {
        let variants = vec![variant(800, "first"), variant(800, "second"), variant(0, "hls")];
        assert_eq!(best_video_variant(&variants).unwrap().url, "first");
    }

    #[test]
    fn video_ignores_zero_bitrate() {
        let variants = vec![variant(0, "playlist")];
        assert!(best_video_variant(&variants).is_none());
    }

    #[test]
    fn gif_tie_keeps_last() {
        let variants = vec![variant(300, "first"), variant(300, "second")];
        assert_eq!(best_gif_variant(&variants).unwrap().url, "second");
        let zeros = vec![variant(0, "a"), variant(0, "b")];
        assert_eq!(best_gif_variant(&zeros).unwrap().url, "b");
    }

    #[test]
    fn tag_suffix_is_trimmed() {
        assert_eq!(video_url(&variant(1, "https://v/x.mp4?tag=10")), "https://v/x.mp4");
        assert_eq!(video_url(&variant(1, "https://v/x.mp4?tag=14")), "https://v/x.mp4?tag=14");
    }
}
