//! Subtitle-related types

use serde::{Deserialize, Serialize};

/// A subtitle track for one language of a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtitles {
    /// Version number of this subtitle revision
    #[serde(default)]
    pub version_number: i64,

    /// Requested subtitle format (e.g. "vtt", "srt")
    #[serde(default)]
    pub sub_format: String,

    /// The subtitle payload itself, in `sub_format`
    #[serde(default)]
    pub subtitles: String,

    /// Who authored this revision
    #[serde(default)]
    pub author: SubtitlesAuthor,

    /// Language of this track
    #[serde(default)]
    pub language: SubtitlesLanguage,

    /// Title in this language
    #[serde(default)]
    pub title: String,

    /// Description in this language
    #[serde(default)]
    pub description: String,

    /// Free-form metadata in this language
    #[serde(default)]
    pub metadata: crate::types::VideoMetadata,

    /// Title of the parent video
    #[serde(default)]
    pub video_title: String,

    /// Description of the parent video
    #[serde(default)]
    pub video_description: String,

    /// URI of subtitle actions (publish, delete, ...)
    #[serde(default)]
    pub actions_uri: String,

    /// URI of editor notes for this track
    #[serde(default)]
    pub notes_uri: String,

    /// Canonical resource URI
    #[serde(default)]
    pub resource_uri: String,

    /// Public site URI for this track
    #[serde(default)]
    pub site_uri: String,

    /// Identifier of the parent video
    #[serde(default)]
    pub video: String,

    /// Legacy version field kept by the API alongside `version_number`
    #[serde(default)]
    pub version_no: i64,
}

/// Author of a subtitle revision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtitlesAuthor {
    /// Username of the author
    #[serde(default)]
    pub username: String,

    /// User identifier
    #[serde(default)]
    pub id: String,

    /// Profile URI
    #[serde(default)]
    pub uri: String,
}

/// Language descriptor on a subtitle track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtitlesLanguage {
    /// Language code (e.g. "en")
    #[serde(default)]
    pub code: String,

    /// Human-readable language name
    #[serde(default)]
    pub name: String,

    /// Text direction ("ltr" or "rtl")
    #[serde(default)]
    pub dir: String,
}
