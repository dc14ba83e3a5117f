//! Videos API endpoint

use crate::{
    client::Client,
    error::{Error, Result},
    types::{Subtitles, Video},
};

/// Videos API resource.
///
/// Covers video records and their subtitle tracks.
#[derive(Clone)]
pub struct Videos {
    client: Client,
}

impl Videos {
    /// Create a new Videos resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a video by its Amara identifier.
    pub async fn get(&self, id: &str) -> Result<Video> {
        let body = self
            .client
            .execute(http::Method::GET, &format!("videos/{id}/"), None)
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Register a new video.
    ///
    /// `params` are form fields as the API expects them, e.g.
    /// `[("video_url", "https://youtu.be/..."), ("team", "my-team")]`.
    pub async fn create(&self, params: &[(&str, &str)]) -> Result<Video> {
        let body = self
            .client
            .execute(http::Method::POST, "videos/", Some(encode_form(params)))
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the subtitles for a video in the given language, in VTT format.
    pub async fn subtitles(&self, video_id: &str, lang_code: &str) -> Result<Subtitles> {
        let path = format!("videos/{video_id}/languages/{lang_code}/subtitles/?sub_format=vtt");
        let body = self.client.execute(http::Method::GET, &path, None).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Upload a new subtitle revision for a video language.
    ///
    /// The `sub_format` field is forced to `format` regardless of what
    /// `params` carries. At least one other field (the subtitle payload)
    /// must be supplied.
    pub async fn create_subtitles(
        &self,
        video_id: &str,
        lang_code: &str,
        format: &str,
        params: &[(&str, &str)],
    ) -> Result<Subtitles> {
        if params.is_empty() {
            return Err(Error::InvalidRequest(
                "subtitle upload requires request body parameters".to_string(),
            ));
        }

        let mut fields: Vec<(&str, &str)> = params
            .iter()
            .filter(|(key, _)| *key != "sub_format")
            .copied()
            .collect();
        fields.push(("sub_format", format));

        let path = format!("videos/{video_id}/languages/{lang_code}/subtitles/");
        let body = self
            .client
            .execute(http::Method::POST, &path, Some(encode_form(&fields)))
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Encode form fields as an `application/x-www-form-urlencoded` body.
fn encode_form(params: &[(&str, &str)]) -> Vec<u8> {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
        .into_bytes()
}
