//! Media-reference normalization.
//!
//! Stored media fields are either absolute URLs, used verbatim, or relative storage
//! keys served under the upload base. Galleries arrive as a JSON array, a
//! comma-joined string or a native list. Videos are either an external embed
//! target or a locally hosted file.
//!
//! Pure functions only: nothing here performs I/O.

use serde::{Deserialize, Serialize};
use url::Url;

/// Scheme prefixes that mark a reference as absolute.
const ABSOLUTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Returns `true` when `reference` begins with a recognized URL scheme.
pub fn is_absolute(reference: &str) -> bool {
    let head = reference.trim_start();
    ABSOLUTE_SCHEMES.iter().any(|scheme| {
        head.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Resolves stored media references against a fixed upload base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    upload_base: String,
}

impl MediaResolver {
    pub fn new(upload_base: impl Into<String>) -> Self {
        let base: String = upload_base.into();
        Self { upload_base: base.trim_end_matches('/').to_owned() }
    }

    pub fn upload_base(&self) -> &str {
        &self.upload_base
    }

    /// Displayable URL for a stored reference.
    ///
    /// Empty input yields an empty string; absolute URLs come back unchanged.
    pub fn resolve(&self, reference: &str) -> String {
        let reference = reference.trim();
        if reference.is_empty() {
            return String::new();
        }
        if is_absolute(reference) {
            return reference.to_owned();
        }
        format!("{}/{}", self.upload_base, reference.trim_start_matches('/'))
    }

    /// [`resolve`](Self::resolve) for optional fields.
    pub fn resolve_opt(&self, reference: Option<&str>) -> String {
        reference.map(|r| self.resolve(r)).unwrap_or_default()
    }

    /// Decode a gallery and resolve every entry.
    pub fn gallery_urls(&self, raw: Option<&RawGallery>, primary: &str) -> Vec<String> {
        decode_gallery(raw, primary)
            .iter()
            .map(|key| self.resolve(key))
            .collect()
    }

    /// Classify and resolve a video reference. Blank input means no video.
    pub fn video(&self, raw: Option<&str>) -> Option<VideoSource> {
        let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
        if is_absolute(raw) {
            Some(VideoSource::Embed { url: embed_url(raw) })
        } else {
            Some(VideoSource::File { url: self.resolve(raw) })
        }
    }
}

// ── Galleries ─────────────────────────────────────────────────────────────────

/// A gallery field as the backend delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawGallery {
    List(Vec<String>),
    Text(String),
}

/// Which stage of [`decode_gallery`] produced the entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GallerySource {
    Json,
    Delimited,
    List,
    Primary,
}

/// Decode a gallery field into storage keys.
///
/// Stage one reads a JSON array of strings. When the text is not JSON, stage two
/// splits on commas, trimming and dropping empty segments. When neither yields an
/// entry the result is the primary image alone (or nothing if that is blank too).
pub fn decode_gallery(raw: Option<&RawGallery>, primary: &str) -> Vec<String> {
    decode_gallery_with_source(raw, primary).0
}

pub fn decode_gallery_with_source(
    raw: Option<&RawGallery>,
    primary: &str,
) -> (Vec<String>, GallerySource) {
    let decoded = match raw {
        Some(RawGallery::List(items)) => Some((clean(items.iter().map(String::as_str)), GallerySource::List)),
        Some(RawGallery::Text(text)) => Some(decode_text(text)),
        None => None,
    };

    match decoded {
        Some((entries, source)) if !entries.is_empty() => (entries, source),
        _ => {
            let primary = primary.trim();
            let entries = if primary.is_empty() { Vec::new() } else { vec![primary.to_owned()] };
            (entries, GallerySource::Primary)
        }
    }
}

fn decode_text(text: &str) -> (Vec<String>, GallerySource) {
    let text = text.trim();
    if text.is_empty() {
        return (Vec::new(), GallerySource::Primary);
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        // Valid JSON is authoritative, even when it is not a usable array.
        Ok(serde_json::Value::Array(items)) => {
            let keys = clean(items.iter().filter_map(|v| v.as_str()));
            (keys, GallerySource::Json)
        }
        Ok(_) => (Vec::new(), GallerySource::Json),
        Err(_) => (clean(text.split(',')), GallerySource::Delimited),
    }
}

fn clean<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Serialize gallery keys the way the backend stores them.
pub fn encode_gallery(keys: &[String]) -> String {
    serde_json::Value::from(keys.to_vec()).to_string()
}

// ── Videos ────────────────────────────────────────────────────────────────────

/// Where a service video plays from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VideoSource {
    /// External player URL, rewritten for muted looping autoplay.
    Embed { url: String },
    /// Locally hosted file for a direct media element.
    File { url: String },
}

impl VideoSource {
    pub fn url(&self) -> &str {
        match self {
            Self::Embed { url } | Self::File { url } => url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VideoHost {
    YouTube,
    Vimeo,
    Other,
}

fn video_host(url: &Url) -> VideoHost {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    match host {
        "youtube.com" | "m.youtube.com" | "youtu.be" | "youtube-nocookie.com" => VideoHost::YouTube,
        "vimeo.com" | "player.vimeo.com" => VideoHost::Vimeo,
        _ => VideoHost::Other,
    }
}

/// Extract the YouTube video id from watch, short-link and embed URLs.
fn youtube_id(url: &Url) -> Option<String> {
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        return Some(v.into_owned());
    }
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let first = segments.next()?;
    let id = match first {
        "embed" | "shorts" | "live" => segments.next()?,
        _ if url.host_str().is_some_and(|h| h.ends_with("youtu.be")) => first,
        _ => return None,
    };
    Some(id.to_owned())
}

/// Rewrite an external video URL so it autoplays muted and loops.
///
/// Unparseable URLs get the generic parameters appended as text.
pub fn embed_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw.trim()) else {
        let separator = if raw.contains('?') { '&' } else { '?' };
        return format!("{raw}{separator}autoplay=1&muted=1&loop=1");
    };

    match video_host(&url) {
        VideoHost::YouTube => {
            let id = youtube_id(&url);
            let mut query = url.query_pairs_mut();
            query
                .append_pair("autoplay", "1")
                .append_pair("mute", "1")
                .append_pair("loop", "1");
            // Looping a single YouTube video requires it to be its own playlist.
            if let Some(id) = id.as_deref() {
                query.append_pair("playlist", id);
            }
            query
                .append_pair("controls", "0")
                .append_pair("modestbranding", "1")
                .append_pair("rel", "0");
        }
        VideoHost::Vimeo => {
            url.query_pairs_mut()
                .append_pair("autoplay", "1")
                .append_pair("muted", "1")
                .append_pair("loop", "1")
                .append_pair("background", "1");
        }
        VideoHost::Other => {
            url.query_pairs_mut()
                .append_pair("autoplay", "1")
                .append_pair("muted", "1")
                .append_pair("loop", "1");
        }
    }
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000/uploads";

    fn resolver() -> MediaResolver {
        MediaResolver::new(format!("{BASE}/"))
    }

    #[test]
    fn absolute_reference_is_unchanged() {
        assert!(is_absolute("http://x/y.png"));
        assert!(is_absolute("HTTPS://x/y.png"));
        assert_eq!(resolver().resolve("http://x/y.png"), "http://x/y.png");
    }

    #[test]
    fn relative_reference_resolves_under_base() {
        assert!(!is_absolute("services/a.png"));
        assert!(!is_absolute("httpdocs/a.png"));
        assert_eq!(resolver().resolve("services/a.png"), format!("{BASE}/services/a.png"));
        assert_eq!(resolver().resolve("/services/a.png"), format!("{BASE}/services/a.png"));
    }

    #[test]
    fn empty_reference_resolves_to_empty() {
        assert_eq!(resolver().resolve(""), "");
        assert_eq!(resolver().resolve_opt(None), "");
    }

    #[test]
    fn gallery_json_array() {
        let raw = RawGallery::Text(r#"["a.png","b.png"]"#.into());
        assert_eq!(
            decode_gallery_with_source(Some(&raw), "main.png"),
            (vec!["a.png".to_string(), "b.png".to_string()], GallerySource::Json)
        );
    }

    #[test]
    fn gallery_comma_joined() {
        let raw = RawGallery::Text("a.png, b.png,, ".into());
        assert_eq!(
            decode_gallery_with_source(Some(&raw), "main.png"),
            (vec!["a.png".to_string(), "b.png".to_string()], GallerySource::Delimited)
        );
    }

    #[test]
    fn gallery_falls_back_to_primary() {
        let expected = (vec!["main.png".to_string()], GallerySource::Primary);
        assert_eq!(decode_gallery_with_source(None, "main.png"), expected);
        assert_eq!(decode_gallery_with_source(Some(&RawGallery::Text(String::new())), "main.png"), expected);
        assert_eq!(decode_gallery_with_source(Some(&RawGallery::Text("[]".into())), "main.png"), expected);
        assert_eq!(decode_gallery_with_source(Some(&RawGallery::List(vec![])), "main.png"), expected);
        assert!(decode_gallery(None, " ").is_empty());
    }

    #[test]
    fn gallery_native_list_and_raw_deserialization() {
        let raw: RawGallery = serde_json::from_str(r#"["x.png"," y.png "]"#).unwrap();
        assert_eq!(decode_gallery(Some(&raw), ""), vec!["x.png", "y.png"]);
        let raw: RawGallery = serde_json::from_str(r#""x.png,y.png""#).unwrap();
        assert_eq!(raw, RawGallery::Text("x.png,y.png".into()));
    }

    #[test]
    fn gallery_urls_are_resolved() {
        let raw = RawGallery::Text(r#"["services/a.png","https://cdn/b.png"]"#.into());
        assert_eq!(
            resolver().gallery_urls(Some(&raw), ""),
            vec![format!("{BASE}/services/a.png"), "https://cdn/b.png".to_string()]
        );
    }

    #[test]
    fn encoded_gallery_decodes_back() {
        let keys = vec!["a.png".to_string(), "b, c.png".to_string()];
        let raw = RawGallery::Text(encode_gallery(&keys));
        assert_eq!(decode_gallery(Some(&raw), ""), keys);
    }

    #[test]
    fn youtube_embed_gets_playlist_loop() {
        let url = embed_url("https://www.youtube.com/embed/abc123");
        assert_eq!(
            url,
            "https://www.youtube.com/embed/abc123?autoplay=1&mute=1&loop=1&playlist=abc123&controls=0&modestbranding=1&rel=0"
        );
        let url = embed_url("https://youtu.be/xyz?t=3");
        assert!(url.starts_with("https://youtu.be/xyz?t=3&autoplay=1"));
        assert!(url.contains("playlist=xyz"));
        assert!(embed_url("https://www.youtube.com/watch?v=q1").contains("playlist=q1"));
    }

    #[test]
    fn vimeo_and_generic_hosts() {
        assert_eq!(
            embed_url("https://player.vimeo.com/video/42"),
            "https://player.vimeo.com/video/42?autoplay=1&muted=1&loop=1&background=1"
        );
        assert_eq!(
            embed_url("https://videos.example.com/v/1?x=2"),
            "https://videos.example.com/v/1?x=2&autoplay=1&muted=1&loop=1"
        );
    }

    #[test]
    fn video_classification() {
        let r = resolver();
        assert_eq!(r.video(None), None);
        assert_eq!(r.video(Some("  ")), None);
        assert_eq!(
            r.video(Some("services/videos/intro.mp4")),
            Some(VideoSource::File { url: format!("{BASE}/services/videos/intro.mp4") })
        );
        assert!(matches!(
            r.video(Some("https://vimeo.com/42")),
            Some(VideoSource::Embed { .. })
        ));
    }
}
