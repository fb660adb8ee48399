//! Member tag management.

use serde::{Deserialize, Serialize};

use mpgate_client::{Envelope, ErrorEnvelope, paths};
use mpgate_core::GatewayResult;

use crate::MpProxy;
use crate::member::OpenIdData;

/// A member tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Default, Deserialize)]
struct TagPayload {
    #[serde(default)]
    tag: Tag,
}

#[derive(Debug, Default, Deserialize)]
struct TagListPayload {
    #[serde(default)]
    tags: Vec<Tag>,
}

/// Members carrying a tag, paged by `next_openid`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagMembersPayload {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub data: OpenIdData,
    #[serde(default)]
    pub next_openid: String,
}

impl MpProxy {
    /// Create a tag and return the created record.
    pub async fn create_tag(&self, access_token: &str, name: &str) -> GatewayResult<Tag> {
        let body = serde_json::json!({ "tag": { "name": name } });
        let rsp: Envelope<TagPayload> = self
            .http
            .post_json(paths::TAG_CREATE, access_token, &body)
            .await?;
        Ok(rsp.into_payload()?.tag)
    }

    /// Rename a tag.
    pub async fn update_tag(&self, access_token: &str, id: i64, name: &str) -> GatewayResult<()> {
        let body = serde_json::json!({ "tag": { "id": id, "name": name } });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::TAG_UPDATE, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Delete a tag.
    pub async fn delete_tag(&self, access_token: &str, id: i64) -> GatewayResult<()> {
        let body = serde_json::json!({ "tag": { "id": id } });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::TAG_DELETE, access_token, &body)
            .await?;
        rsp.check()
    }

    /// List all tags.
    pub async fn tag_list(&self, access_token: &str) -> GatewayResult<Vec<Tag>> {
        let rsp: Envelope<TagListPayload> =
            self.http.get_json(paths::TAG_LIST, access_token, &[]).await?;
        Ok(rsp.into_payload()?.tags)
    }

    /// List members carrying a tag, starting after `next_openid`.
    pub async fn tag_members(
        &self,
        access_token: &str,
        tag_id: i64,
        next_openid: &str,
    ) -> GatewayResult<TagMembersPayload> {
        let body = serde_json::json!({ "tagid": tag_id, "next_openid": next_openid });
        let rsp: Envelope<TagMembersPayload> = self
            .http
            .post_json(paths::TAG_MEMBERS, access_token, &body)
            .await?;
        rsp.into_payload()
    }

    /// Attach a tag to a batch of members.
    pub async fn batch_tagging(
        &self,
        access_token: &str,
        tag_id: i64,
        openids: &[String],
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "tagid": tag_id, "openid_list": openids });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::TAG_BATCH_TAGGING, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Detach a tag from a batch of members.
    pub async fn batch_untagging(
        &self,
        access_token: &str,
        tag_id: i64,
        openids: &[String],
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "tagid": tag_id, "openid_list": openids });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::TAG_BATCH_UNTAGGING, access_token, &body)
            .await?;
        rsp.check()
    }
}
