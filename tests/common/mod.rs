//! Common test utilities and fixtures
//!
//! - wiremock for HTTP mocking (isolated, parallel-safe)
//! - #[tokio::test] for async testing

// not every test binary uses every helper
#![allow(dead_code)]

use std::time::Duration;

use amara::Client;
use wiremock::MockServer;

/// Build a client pointed at a mock server, with retries disabled for
/// predictability and the cooldown guard left at its default (disabled).
pub fn test_client(server: &MockServer) -> Client {
    Client::builder()
        .api_key("test-api-key")
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .max_retries(0)
        .build()
        .expect("failed to build test client")
}

/// Same as [`test_client`] but with the rate-limit cooldown guard enabled.
pub fn guarded_client(server: &MockServer) -> Client {
    Client::builder()
        .api_key("test-api-key")
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .max_retries(0)
        .rate_limit_guard(true)
        .build()
        .expect("failed to build test client")
}

/// A minimal but representative video JSON payload.
pub fn video_response(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "video_type": "Y",
        "primary_audio_language_code": "en",
        "original_language": "en",
        "title": "A talk about subtitles",
        "description": "Recorded at the annual meetup",
        "duration": 1234,
        "thumbnail": "https://example.org/thumb.jpg",
        "created": "2019-06-19T12:00:00Z",
        "team": "linguists",
        "team_type": null,
        "project": null,
        "all_urls": ["https://youtu.be/abc"],
        "metadata": {"speaker-name": "Ada", "location": "Berlin"},
        "languages": [
            {
                "code": "en",
                "name": "English",
                "published": true,
                "dir": "ltr",
                "subtitles_uri": "/api/videos/abc/languages/en/subtitles/",
                "resource_uri": "/api/videos/abc/languages/en/"
            }
        ],
        "activity_uri": "/api/videos/abc/activity/",
        "urls_uri": "/api/videos/abc/urls/",
        "subtitle_languages_uri": "/api/videos/abc/languages/",
        "resource_uri": "/api/videos/abc/"
    })
}

/// A subtitles JSON payload for one language track.
pub fn subtitles_response(video_id: &str) -> serde_json::Value {
    serde_json::json!({
        "version_number": 3,
        "sub_format": "vtt",
        "subtitles": "WEBVTT\n\n00:00.000 --> 00:02.000\nHello",
        "author": {"username": "ada", "id": "42", "uri": "/api/users/ada/"},
        "language": {"code": "en", "name": "English", "dir": "ltr"},
        "title": "A talk about subtitles",
        "description": "",
        "metadata": {"speaker-name": "Ada", "location": "Berlin"},
        "video_title": "A talk about subtitles",
        "video_description": "Recorded at the annual meetup",
        "actions_uri": format!("/api/videos/{video_id}/languages/en/subtitles/actions/"),
        "notes_uri": format!("/api/videos/{video_id}/languages/en/subtitles/notes/"),
        "resource_uri": format!("/api/videos/{video_id}/languages/en/subtitles/"),
        "site_uri": format!("https://amara.org/videos/{video_id}/en/"),
        "video": video_id,
        "version_no": 3
    })
}
