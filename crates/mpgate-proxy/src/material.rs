//! Permanent material queries.

use serde::Deserialize;

use mpgate_client::{Envelope, ErrorEnvelope, paths};
use mpgate_core::GatewayResult;

use crate::MpProxy;

/// Per-type material counts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialCountPayload {
    #[serde(default)]
    pub voice_count: i64,
    #[serde(default)]
    pub video_count: i64,
    #[serde(default)]
    pub image_count: i64,
    #[serde(default)]
    pub news_count: i64,
}

/// A page of non-news materials.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialListPayload {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub item_count: i64,
    #[serde(default)]
    pub item: Vec<MaterialItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialItem {
    #[serde(default)]
    pub media_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub url: String,
}

/// A page of news materials with their nested articles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialNewsPayload {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub item_count: i64,
    #[serde(default)]
    pub item: Vec<MaterialNewsItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialNewsItem {
    #[serde(default)]
    pub media_id: String,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub content: NewsContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsContent {
    #[serde(default)]
    pub news_item: Vec<NewsArticle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumb_media_id: String,
    #[serde(default)]
    pub show_cover_pic: i32,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content_source_url: String,
}

impl MpProxy {
    /// Count permanent materials by type.
    pub async fn material_count(&self, access_token: &str) -> GatewayResult<MaterialCountPayload> {
        let rsp: Envelope<MaterialCountPayload> = self
            .http
            .get_json(paths::MATERIAL_COUNT, access_token, &[])
            .await?;
        rsp.into_payload()
    }

    /// List a page of non-news materials of the given type.
    pub async fn material_list(
        &self,
        access_token: &str,
        media_type: &str,
        offset: i64,
        count: i64,
    ) -> GatewayResult<MaterialListPayload> {
        let body = serde_json::json!({
            "type": media_type,
            "offset": offset,
            "count": count,
        });
        let rsp: Envelope<MaterialListPayload> = self
            .http
            .post_json(paths::MATERIAL_BATCH_GET, access_token, &body)
            .await?;
        rsp.into_payload()
    }

    /// List a page of news materials of the given type.
    pub async fn material_news_list(
        &self,
        access_token: &str,
        media_type: &str,
        offset: i64,
        count: i64,
    ) -> GatewayResult<MaterialNewsPayload> {
        let body = serde_json::json!({
            "type": media_type,
            "offset": offset,
            "count": count,
        });
        let rsp: Envelope<MaterialNewsPayload> = self
            .http
            .post_json(paths::MATERIAL_BATCH_GET, access_token, &body)
            .await?;
        rsp.into_payload()
    }

    /// Delete a permanent material.
    pub async fn delete_material(&self, access_token: &str, media_id: &str) -> GatewayResult<()> {
        let body = serde_json::json!({ "media_id": media_id });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::MATERIAL_DELETE, access_token, &body)
            .await?;
        rsp.check()
    }
}
