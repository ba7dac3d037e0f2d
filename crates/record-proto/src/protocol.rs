use serde::{Deserialize, Serialize};

/// A genre tag attached to a station. Two tags with the same `name` are the
/// same genre for filtering purposes, whatever their ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Genre {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Station {
    pub id: i64,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub title: String,
    /// Short description shown next to the title and searched alongside it.
    #[serde(default)]
    pub tooltip: String,
    #[serde(default)]
    pub stream_64: String,
    #[serde(default)]
    pub stream_128: String,
    #[serde(default)]
    pub stream_320: String,
    #[serde(default)]
    pub stream_hls: String,
    #[serde(default, rename = "icon_fill_colored")]
    pub icon: String,
    #[serde(default, rename = "genre")]
    pub genres: Vec<Genre>,
}

impl Station {
    /// Stream URL for the requested quality. Falls back to the best other
    /// non-empty stream (320 → 128 → 64 → HLS) when the catalog leaves the
    /// requested one blank.
    pub fn stream_url(&self, quality: StreamQuality) -> Option<&str> {
        let preferred = self.stream_for(quality);
        if !preferred.is_empty() {
            return Some(preferred);
        }
        [
            StreamQuality::High,
            StreamQuality::Medium,
            StreamQuality::Low,
            StreamQuality::Hls,
        ]
        .into_iter()
        .map(|q| self.stream_for(q))
        .find(|url| !url.is_empty())
    }

    fn stream_for(&self, quality: StreamQuality) -> &str {
        match quality {
            StreamQuality::Low => &self.stream_64,
            StreamQuality::Medium => &self.stream_128,
            StreamQuality::High => &self.stream_320,
            StreamQuality::Hls => &self.stream_hls,
        }
    }

    pub fn has_genre(&self, name: &str) -> bool {
        self.genres.iter().any(|g| g.name == name)
    }
}

/// Which of a station's streams to hand to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StreamQuality {
    Low,
    Medium,
    #[default]
    High,
    Hls,
}

impl StreamQuality {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "64k",
            Self::Medium => "128k",
            Self::High => "320k",
            Self::Hls => "HLS",
        }
    }
}

impl std::str::FromStr for StreamQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "64" => Ok(Self::Low),
            "medium" | "128" => Ok(Self::Medium),
            "high" | "320" => Ok(Self::High),
            "hls" => Ok(Self::Hls),
            other => Err(format!(
                "unknown stream quality '{other}' (expected low, medium, high or hls)"
            )),
        }
    }
}

/// One entry of a station's play history; the first entry is "now playing".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Track {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub image100: String,
    #[serde(default)]
    pub image200: String,
    #[serde(default)]
    pub time_formatted: String,
}

const FALLBACK_ARTIST: &str = "Radio Record";

impl Track {
    pub fn artist_or_default(&self) -> &str {
        if self.artist.trim().is_empty() {
            FALLBACK_ARTIST
        } else {
            &self.artist
        }
    }

    pub fn display(&self) -> String {
        format!("{} — {}", self.artist_or_default(), self.song)
    }

    /// Search URLs for this track on the common music services.
    pub fn search_links(&self) -> Vec<(&'static str, String)> {
        let query = format!("{} {}", self.artist_or_default(), self.song);
        let mut links = Vec::with_capacity(3);

        if let Ok(url) =
            reqwest::Url::parse_with_params("https://music.youtube.com/search", &[("q", &query)])
        {
            links.push(("YT Music", url.to_string()));
        }
        if let Ok(url) =
            reqwest::Url::parse_with_params("https://music.yandex.ru/search", &[("text", &query)])
        {
            links.push(("Yandex", url.to_string()));
        }
        if let Ok(mut url) = reqwest::Url::parse("https://open.spotify.com/search") {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.push(&query);
            }
            links.push(("Spotify", url.to_string()));
        }
        links
    }
}
