//! Video provider URLs: id extraction and embed player URLs.

use regex::Regex;
use std::sync::LazyLock;

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("static regex")
});

static VIMEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vimeo.*/(\d+)").expect("static regex"));

/// The 11-character video id of a YouTube watch, share or embed URL.
pub fn youtube_id(url: &str) -> Option<&str> {
    let id = YOUTUBE_ID.captures(url)?.get(2)?.as_str();
    (id.len() == 11).then_some(id)
}

/// The numeric id of a Vimeo URL.
pub fn vimeo_id(url: &str) -> Option<&str> {
    Some(VIMEO_ID.captures(url)?.get(1)?.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Youtube,
    Vimeo,
}

impl Provider {
    /// Whether `url` points at this provider's domain.
    pub fn matches_host(self, url: &str) -> bool {
        match self {
            Provider::Youtube => url.contains("youtube.com") || url.contains("youtu.be"),
            Provider::Vimeo => url.contains("vimeo.com"),
        }
    }
}

/// Player URL for an iframe, or `None` if no id can be extracted.
pub fn embed_url(provider: Provider, url: &str) -> Option<String> {
    match provider {
        Provider::Youtube => youtube_id(url).map(|id| format!("https://www.youtube.com/embed/{id}")),
        Provider::Vimeo => vimeo_id(url).map(|id| format!("https://player.vimeo.com/video/{id}")),
    }
}

/// Padding-bottom percentage that keeps an iframe at `ratio` (`"16/9"` …).
pub fn aspect_padding(ratio: &str) -> &'static str {
    match ratio {
        "4/3" => "75%",
        "21/9" => "42.86%",
        "1/1" => "100%",
        _ => "56.25%",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_ids_from_common_url_shapes() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ?start=10",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
        ] {
            assert_eq!(youtube_id(url), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn youtube_id_must_be_eleven_chars() {
        assert_eq!(youtube_id("https://youtu.be/short"), None);
        assert_eq!(youtube_id("https://example.com/video"), None);
    }

    #[test]
    fn vimeo_numeric_id() {
        assert_eq!(vimeo_id("https://vimeo.com/76979871"), Some("76979871"));
        assert_eq!(
            embed_url(Provider::Vimeo, "https://vimeo.com/channels/staff/76979871").as_deref(),
            Some("https://player.vimeo.com/video/76979871")
        );
    }

    #[test]
    fn host_must_match_provider() {
        assert!(Provider::Youtube.matches_host("https://youtu.be/x"));
        assert!(!Provider::Vimeo.matches_host("https://youtu.be/x"));
    }

    #[test]
    fn aspect_ratios_map_to_padding() {
        assert_eq!(aspect_padding("16/9"), "56.25%");
        assert_eq!(aspect_padding("4/3"), "75%");
        assert_eq!(aspect_padding("21/9"), "42.86%");
        assert_eq!(aspect_padding("1/1"), "100%");
    }
}
