//! Member (follower) queries and blacklist management.

use serde::{Deserialize, Serialize};

use mpgate_client::{Envelope, ErrorEnvelope, paths};
use mpgate_core::GatewayResult;

use crate::MpProxy;

/// The nested `{"openid": [...]}` list used by paged member responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenIdData {
    #[serde(default)]
    pub openid: Vec<String>,
}

/// A page of the member list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberListPayload {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub data: OpenIdData,
    #[serde(default)]
    pub next_openid: String,
}

/// A page of the blacklist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlacklistPayload {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub data: OpenIdData,
    #[serde(default)]
    pub next_openid: String,
}

/// A member profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberInfo {
    #[serde(default)]
    pub subscribe: i64,
    #[serde(default)]
    pub openid: String,
    #[serde(default)]
    pub subscribe_time: i64,
    #[serde(default)]
    pub unionid: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub groupid: i64,
    #[serde(default)]
    pub tagid_list: Vec<i64>,
    #[serde(default)]
    pub subscribe_scene: String,
    #[serde(default)]
    pub qr_scene: i64,
    #[serde(default)]
    pub qr_scene_str: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Default, Deserialize)]
struct MemberInfoListPayload {
    #[serde(default)]
    user_info_list: Vec<MemberInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct TagIdListPayload {
    #[serde(default)]
    tagid_list: Vec<i64>,
}

impl MpProxy {
    /// List member openids, paged by `next_openid`.
    pub async fn member_list(
        &self,
        access_token: &str,
        next_openid: &str,
    ) -> GatewayResult<MemberListPayload> {
        let rsp: Envelope<MemberListPayload> = self
            .http
            .get_json(
                paths::MEMBER_LIST,
                access_token,
                &[("next_openid", next_openid)],
            )
            .await?;
        rsp.into_payload()
    }

    /// Fetch one member's profile.
    pub async fn member_info(
        &self,
        access_token: &str,
        openid: &str,
        lang: &str,
    ) -> GatewayResult<MemberInfo> {
        let rsp: Envelope<MemberInfo> = self
            .http
            .get_json(
                paths::MEMBER_INFO,
                access_token,
                &[("openid", openid), ("lang", lang)],
            )
            .await?;
        rsp.into_payload()
    }

    /// Fetch up to 100 member profiles in one call.
    pub async fn batch_member_info(
        &self,
        access_token: &str,
        openids: &[String],
    ) -> GatewayResult<Vec<MemberInfo>> {
        #[derive(Serialize)]
        struct UserRef<'a> {
            openid: &'a str,
        }
        let user_list: Vec<UserRef<'_>> = openids
            .iter()
            .map(|openid| UserRef {
                openid: openid.as_str(),
            })
            .collect();
        let body = serde_json::json!({ "user_list": user_list });

        let rsp: Envelope<MemberInfoListPayload> = self
            .http
            .post_json(paths::MEMBER_BATCH_INFO, access_token, &body)
            .await?;
        Ok(rsp.into_payload()?.user_info_list)
    }

    /// List the tag ids carried by one member.
    pub async fn member_tag_ids(
        &self,
        access_token: &str,
        openid: &str,
    ) -> GatewayResult<Vec<i64>> {
        let body = serde_json::json!({ "openid": openid });
        let rsp: Envelope<TagIdListPayload> = self
            .http
            .post_json(paths::MEMBER_TAG_IDS, access_token, &body)
            .await?;
        Ok(rsp.into_payload()?.tagid_list)
    }

    /// Set the operator remark on a member.
    pub async fn update_member_remark(
        &self,
        access_token: &str,
        openid: &str,
        remark: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "openid": openid, "remark": remark });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::MEMBER_UPDATE_REMARK, access_token, &body)
            .await?;
        rsp.check()
    }

    /// List blacklisted openids, paged by `next_openid`.
    pub async fn blacklist(
        &self,
        access_token: &str,
        next_openid: &str,
    ) -> GatewayResult<BlacklistPayload> {
        let body = serde_json::json!({ "next_openid": next_openid });
        let rsp: Envelope<BlacklistPayload> = self
            .http
            .post_json(paths::BLACKLIST_GET, access_token, &body)
            .await?;
        rsp.into_payload()
    }

    /// Add a batch of members to the blacklist.
    pub async fn block_members(
        &self,
        access_token: &str,
        openids: &[String],
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "openid_list": openids });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::BLACKLIST_BATCH_BLOCK, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Remove a batch of members from the blacklist.
    pub async fn unblock_members(
        &self,
        access_token: &str,
        openids: &[String],
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "openid_list": openids });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::BLACKLIST_BATCH_UNBLOCK, access_token, &body)
            .await?;
        rsp.check()
    }
}
