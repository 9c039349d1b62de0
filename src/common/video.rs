use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use utoipa::ToSchema;

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .expect("valid youtube pattern")
});

static VIMEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"vimeo\.com/(?:channels/(?:\w+/)?|groups/(?:[^/]*)/videos/|)(\d+)")
        .expect("valid vimeo pattern")
});

/// Identifier of a video hosted on a third-party platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoId {
    YouTube(String),
    Vimeo(String),
}

impl VideoId {
    pub fn embed_url(&self) -> String {
        match self {
            VideoId::YouTube(id) => format!("https://www.youtube.com/embed/{}", id),
            VideoId::Vimeo(id) => format!("https://player.vimeo.com/video/{}", id),
        }
    }
}

fn is_youtube(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

pub fn parse_video_id(url: &str) -> Option<VideoId> {
    if is_youtube(url) {
        return YOUTUBE_ID
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| VideoId::YouTube(m.as_str().to_string()));
    }
    if url.contains("vimeo.com") {
        return VIMEO_ID
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| VideoId::Vimeo(m.as_str().to_string()));
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Embed {
    pub url: String,
    /// Plain video file the player can load directly.
    pub direct: bool,
}

/// Platform links become player URLs, anything else is played as-is.
/// Returns `None` for a platform link whose id cannot be found.
pub fn resolve_embed(video_url: &str) -> Option<Embed> {
    let url = if is_youtube(video_url) || video_url.contains("vimeo.com") {
        parse_video_id(video_url)?.embed_url()
    } else {
        video_url.to_string()
    };

    let direct = url.ends_with(".mp4");
    Some(Embed { url, direct })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_links() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
        ] {
            assert_eq!(
                parse_video_id(url),
                Some(VideoId::YouTube("dQw4w9WgXcQ".into())),
                "{url}"
            );
        }
    }

    #[test]
    fn vimeo_links() {
        assert_eq!(
            parse_video_id("https://vimeo.com/76979871"),
            Some(VideoId::Vimeo("76979871".into()))
        );
        assert_eq!(
            parse_video_id("https://vimeo.com/channels/staffpicks/76979871"),
            Some(VideoId::Vimeo("76979871".into()))
        );
        assert_eq!(
            parse_video_id("https://vimeo.com/groups/shortfilms/videos/76979871"),
            Some(VideoId::Vimeo("76979871".into()))
        );
    }

    #[test]
    fn unknown_hosts_have_no_id() {
        assert_eq!(parse_video_id("/uploads/trailers/a.mp4"), None);
        assert_eq!(parse_video_id("https://youtu.be/short"), None);
    }

    #[test]
    fn embeds() {
        assert_eq!(
            resolve_embed("https://youtu.be/dQw4w9WgXcQ"),
            Some(Embed {
                url: "https://www.youtube.com/embed/dQw4w9WgXcQ".into(),
                direct: false
            })
        );
        assert_eq!(
            resolve_embed("/uploads/trailers/a.mp4"),
            Some(Embed {
                url: "/uploads/trailers/a.mp4".into(),
                direct: true
            })
        );
        assert_eq!(resolve_embed("https://www.youtube.com/watch?v=bad"), None);
    }
}
