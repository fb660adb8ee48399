//! Customer-service accounts, sessions, and message sending.
//!
//! Every send operation posts to the same message endpoint; the message
//! type discriminator and the typed content block vary per operation.

use serde::{Deserialize, Serialize};

use mpgate_client::{Envelope, ErrorEnvelope, paths};
use mpgate_core::GatewayResult;

use crate::MpProxy;

/// Delivery target shared by every customer-service message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KfTarget {
    /// Recipient openid.
    pub to_user: String,
    /// Sending account; empty means the platform picks one.
    pub kf_account: String,
}

/// The wire header shared by every customer-service message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KfMessageHeader {
    pub touser: String,
    pub msgtype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customservice: Option<KfSelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KfSelector {
    pub kf_account: String,
}

impl KfMessageHeader {
    fn new(target: &KfTarget, msgtype: &str) -> Self {
        Self {
            touser: target.to_user.clone(),
            msgtype: msgtype.to_string(),
            customservice: if target.kf_account.is_empty() {
                None
            } else {
                Some(KfSelector {
                    kf_account: target.kf_account.clone(),
                })
            },
        }
    }
}

/// Video message content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KfVideo {
    pub media_id: String,
    pub thumb_media_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Music message content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KfMusic {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub musicurl: String,
    pub hqmusicurl: String,
    pub thumb_media_id: String,
}

/// An external-link news article; the platform allows one per message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KfArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub picurl: String,
}

/// Menu message content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KfMsgMenu {
    pub head_content: String,
    pub list: Vec<KfMenuItem>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tail_content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KfMenuItem {
    pub id: String,
    pub content: String,
}

/// Mini-program card content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KfMiniProgram {
    pub appid: String,
    pub pagepath: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub thumb_media_id: String,
}

/// A customer-service account record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KfInfo {
    #[serde(default)]
    pub kf_account: String,
    #[serde(default)]
    pub kf_nick: String,
    #[serde(default)]
    pub kf_id: i64,
    #[serde(default)]
    pub kf_headimgurl: String,
    #[serde(default)]
    pub kf_wx: String,
    #[serde(default)]
    pub invite_wx: String,
    #[serde(default)]
    pub invite_expire_time: i64,
    #[serde(default)]
    pub invite_status: String,
}

/// An online customer-service account with its live case count.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KfOnlineInfo {
    #[serde(default)]
    pub kf_account: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub kf_id: i64,
    #[serde(default)]
    pub accepted_case: i64,
}

#[derive(Debug, Default, Deserialize)]
struct KfListPayload {
    #[serde(default)]
    kf_list: Vec<KfInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct KfOnlineListPayload {
    #[serde(default)]
    kf_online_list: Vec<KfOnlineInfo>,
}

/// A page of the customer-service message history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KfMsgRecordsPayload {
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub msgid: i64,
    #[serde(default)]
    pub recordlist: Vec<KfMsgRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KfMsgRecord {
    #[serde(default)]
    pub openid: String,
    #[serde(default)]
    pub worker: String,
    #[serde(default)]
    pub opercode: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub time: i64,
}

/// The active session for one member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KfSessionStatus {
    #[serde(default)]
    pub kf_account: String,
    #[serde(default)]
    pub createtime: i64,
}

/// One session held by a customer-service account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KfSession {
    #[serde(default)]
    pub openid: String,
    #[serde(default)]
    pub createtime: i64,
}

#[derive(Debug, Default, Deserialize)]
struct KfSessionListPayload {
    #[serde(default)]
    sessionlist: Vec<KfSession>,
}

/// Sessions waiting to be accepted, oldest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitCasePayload {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub waitcaselist: Vec<WaitCase>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitCase {
    #[serde(default)]
    pub openid: String,
    #[serde(default)]
    pub latest_time: i64,
}

#[derive(Debug, Serialize)]
struct KfMessage<C: Serialize> {
    #[serde(flatten)]
    header: KfMessageHeader,
    #[serde(flatten)]
    content: C,
}

impl MpProxy {
    async fn send_kf_message<C: Serialize>(
        &self,
        access_token: &str,
        target: &KfTarget,
        msgtype: &str,
        content: C,
    ) -> GatewayResult<()> {
        let body = KfMessage {
            header: KfMessageHeader::new(target, msgtype),
            content,
        };
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::KF_SEND_MESSAGE, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Send a text message.
    pub async fn send_kf_text(
        &self,
        access_token: &str,
        target: &KfTarget,
        content: &str,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "text",
            serde_json::json!({ "text": { "content": content } }),
        )
        .await
    }

    /// Send an image by media id.
    pub async fn send_kf_image(
        &self,
        access_token: &str,
        target: &KfTarget,
        media_id: &str,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "image",
            serde_json::json!({ "image": { "media_id": media_id } }),
        )
        .await
    }

    /// Send a voice clip by media id.
    pub async fn send_kf_voice(
        &self,
        access_token: &str,
        target: &KfTarget,
        media_id: &str,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "voice",
            serde_json::json!({ "voice": { "media_id": media_id } }),
        )
        .await
    }

    /// Send a video message.
    pub async fn send_kf_video(
        &self,
        access_token: &str,
        target: &KfTarget,
        video: &KfVideo,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "video",
            serde_json::json!({ "video": video }),
        )
        .await
    }

    /// Send a music card.
    pub async fn send_kf_music(
        &self,
        access_token: &str,
        target: &KfTarget,
        music: &KfMusic,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "music",
            serde_json::json!({ "music": music }),
        )
        .await
    }

    /// Send a news card linking to an external URL.
    pub async fn send_kf_news_card(
        &self,
        access_token: &str,
        target: &KfTarget,
        article: &KfArticle,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "news",
            serde_json::json!({ "news": { "articles": [article] } }),
        )
        .await
    }

    /// Send a news message linking to a published page by media id.
    pub async fn send_kf_news_page(
        &self,
        access_token: &str,
        target: &KfTarget,
        media_id: &str,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "mpnews",
            serde_json::json!({ "mpnews": { "media_id": media_id } }),
        )
        .await
    }

    /// Send a news message linking to a published article by article id.
    pub async fn send_kf_article(
        &self,
        access_token: &str,
        target: &KfTarget,
        article_id: &str,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "mpnewsarticle",
            serde_json::json!({ "mpnewsarticle": { "article_id": article_id } }),
        )
        .await
    }

    /// Send a menu message.
    pub async fn send_kf_menu(
        &self,
        access_token: &str,
        target: &KfTarget,
        menu: &KfMsgMenu,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "msgmenu",
            serde_json::json!({ "msgmenu": menu }),
        )
        .await
    }

    /// Send a coupon card by card id.
    pub async fn send_kf_card(
        &self,
        access_token: &str,
        target: &KfTarget,
        card_id: &str,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "wxcard",
            serde_json::json!({ "wxcard": { "card_id": card_id } }),
        )
        .await
    }

    /// Send a mini-program card.
    pub async fn send_kf_mini_program(
        &self,
        access_token: &str,
        target: &KfTarget,
        page: &KfMiniProgram,
    ) -> GatewayResult<()> {
        self.send_kf_message(
            access_token,
            target,
            "miniprogrampage",
            serde_json::json!({ "miniprogrampage": page }),
        )
        .await
    }

    /// Create a customer-service account.
    pub async fn add_kf_account(
        &self,
        access_token: &str,
        kf_account: &str,
        nickname: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "kf_account": kf_account, "nickname": nickname });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::KF_ACCOUNT_ADD, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Rename a customer-service account.
    pub async fn update_kf_account(
        &self,
        access_token: &str,
        kf_account: &str,
        nickname: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "kf_account": kf_account, "nickname": nickname });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::KF_ACCOUNT_UPDATE, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Delete a customer-service account.
    pub async fn delete_kf_account(
        &self,
        access_token: &str,
        kf_account: &str,
    ) -> GatewayResult<()> {
        let rsp: ErrorEnvelope = self
            .http
            .get_json(
                paths::KF_ACCOUNT_DEL,
                access_token,
                &[("kf_account", kf_account)],
            )
            .await?;
        rsp.check()
    }

    /// Invite a worker to bind a customer-service account.
    pub async fn invite_kf_worker(
        &self,
        access_token: &str,
        kf_account: &str,
        invite_wx: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "kf_account": kf_account, "invite_wx": invite_wx });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::KF_INVITE_WORKER, access_token, &body)
            .await?;
        rsp.check()
    }

    /// List all customer-service accounts.
    pub async fn kf_list(&self, access_token: &str) -> GatewayResult<Vec<KfInfo>> {
        let rsp: Envelope<KfListPayload> =
            self.http.get_json(paths::KF_LIST, access_token, &[]).await?;
        Ok(rsp.into_payload()?.kf_list)
    }

    /// List customer-service accounts currently online.
    pub async fn kf_online_list(&self, access_token: &str) -> GatewayResult<Vec<KfOnlineInfo>> {
        let rsp: Envelope<KfOnlineListPayload> = self
            .http
            .get_json(paths::KF_ONLINE_LIST, access_token, &[])
            .await?;
        Ok(rsp.into_payload()?.kf_online_list)
    }

    /// Fetch a page of the message history within a time range.
    pub async fn kf_msg_records(
        &self,
        access_token: &str,
        start_time: i64,
        end_time: i64,
        msg_id: i64,
        number: i64,
    ) -> GatewayResult<KfMsgRecordsPayload> {
        let body = serde_json::json!({
            "starttime": start_time,
            "endtime": end_time,
            "msgid": msg_id,
            "number": number,
        });
        let rsp: Envelope<KfMsgRecordsPayload> = self
            .http
            .post_json(paths::KF_MSG_RECORDS, access_token, &body)
            .await?;
        rsp.into_payload()
    }

    /// Open a session between an account and a member.
    pub async fn create_kf_session(
        &self,
        access_token: &str,
        kf_account: &str,
        openid: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "kf_account": kf_account, "openid": openid });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::KF_SESSION_CREATE, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Close a session between an account and a member.
    pub async fn close_kf_session(
        &self,
        access_token: &str,
        kf_account: &str,
        openid: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "kf_account": kf_account, "openid": openid });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::KF_SESSION_CLOSE, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Fetch the session state for one member.
    pub async fn kf_session_status(
        &self,
        access_token: &str,
        openid: &str,
    ) -> GatewayResult<KfSessionStatus> {
        let rsp: Envelope<KfSessionStatus> = self
            .http
            .get_json(paths::KF_SESSION_STATUS, access_token, &[("openid", openid)])
            .await?;
        rsp.into_payload()
    }

    /// List the sessions held by one account.
    pub async fn kf_session_list(
        &self,
        access_token: &str,
        kf_account: &str,
    ) -> GatewayResult<Vec<KfSession>> {
        let rsp: Envelope<KfSessionListPayload> = self
            .http
            .get_json(
                paths::KF_SESSION_LIST,
                access_token,
                &[("kf_account", kf_account)],
            )
            .await?;
        Ok(rsp.into_payload()?.sessionlist)
    }

    /// List sessions not yet accepted by any account.
    pub async fn unaccepted_kf_sessions(
        &self,
        access_token: &str,
    ) -> GatewayResult<WaitCasePayload> {
        let rsp: Envelope<WaitCasePayload> = self
            .http
            .get_json(paths::KF_SESSION_WAIT_CASE, access_token, &[])
            .await?;
        rsp.into_payload()
    }

    /// Publish a typing indicator to a member.
    pub async fn update_kf_typing(
        &self,
        access_token: &str,
        to_user: &str,
        command: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "touser": to_user, "command": command });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::KF_TYPING, access_token, &body)
            .await?;
        rsp.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_header_flattens_with_content() {
        let target = KfTarget {
            to_user: "oUSER1".to_string(),
            kf_account: "kf2001@corp".to_string(),
        };
        let body = KfMessage {
            header: KfMessageHeader::new(&target, "text"),
            content: serde_json::json!({ "text": { "content": "hello" } }),
        };
        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(wire["touser"], "oUSER1");
        assert_eq!(wire["msgtype"], "text");
        assert_eq!(wire["customservice"]["kf_account"], "kf2001@corp");
        assert_eq!(wire["text"]["content"], "hello");
    }

    #[test]
    fn test_unspecified_account_omits_customservice_block() {
        let target = KfTarget {
            to_user: "oUSER1".to_string(),
            kf_account: String::new(),
        };
        let header = KfMessageHeader::new(&target, "image");
        let wire = serde_json::to_value(&header).unwrap();
        assert!(wire.get("customservice").is_none());
    }

    #[test]
    fn test_video_round_trip() {
        let video = KfVideo {
            media_id: "M1".to_string(),
            thumb_media_id: "T1".to_string(),
            title: "demo".to_string(),
            description: String::new(),
        };
        let bytes = serde_json::to_vec(&video).unwrap();
        let back: KfVideo = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.media_id, video.media_id);
        assert_eq!(back.thumb_media_id, video.thumb_media_id);
        assert_eq!(back.title, video.title);
    }
}
