//! Video-related types

use serde::{Deserialize, Serialize};

/// A video record hosted on Amara.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Unique identifier for the video
    pub id: String,

    /// How the video was ingested (e.g. "Y" for YouTube)
    #[serde(default)]
    pub video_type: String,

    /// Language code of the primary audio track
    #[serde(default)]
    pub primary_audio_language_code: String,

    /// Original language of the video
    #[serde(default)]
    pub original_language: String,

    /// Video title
    #[serde(default)]
    pub title: String,

    /// Video description
    #[serde(default)]
    pub description: String,

    /// Duration in seconds
    #[serde(default)]
    pub duration: i64,

    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: String,

    /// When the video was created
    pub created: Option<chrono::DateTime<chrono::Utc>>,

    /// Owning team. The API's shape for this field varies, so it is kept
    /// opaque and not interpreted by the client.
    #[serde(default)]
    pub team: serde_json::Value,

    /// Team type, opaque for the same reason as `team`
    #[serde(default)]
    pub team_type: serde_json::Value,

    /// Owning project, opaque for the same reason as `team`
    #[serde(default)]
    pub project: serde_json::Value,

    /// All source URLs registered for this video
    #[serde(default)]
    pub all_urls: Vec<String>,

    /// Free-form metadata attached to the video
    #[serde(default)]
    pub metadata: VideoMetadata,

    /// Subtitle languages available for this video
    #[serde(default)]
    pub languages: Vec<VideoLanguage>,

    /// URI of the activity feed for this video
    #[serde(default)]
    pub activity_uri: String,

    /// URI listing the video's source URLs
    #[serde(default)]
    pub urls_uri: String,

    /// URI listing the video's subtitle languages
    #[serde(default)]
    pub subtitle_languages_uri: String,

    /// Canonical resource URI
    #[serde(default)]
    pub resource_uri: String,
}

/// Free-form metadata fields carried on a video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Speaker name
    #[serde(rename = "speaker-name", default)]
    pub speaker_name: String,

    /// Recording location
    #[serde(default)]
    pub location: String,
}

/// One subtitle language entry on a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoLanguage {
    /// Language code (e.g. "en")
    pub code: String,

    /// Human-readable language name
    #[serde(default)]
    pub name: String,

    /// Whether subtitles in this language are published
    #[serde(default)]
    pub published: bool,

    /// Text direction ("ltr" or "rtl")
    #[serde(default)]
    pub dir: String,

    /// URI of the subtitles for this language
    #[serde(default)]
    pub subtitles_uri: String,

    /// Canonical resource URI
    #[serde(default)]
    pub resource_uri: String,
}
