//! Template-message operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use mpgate_client::{Envelope, ErrorEnvelope, paths};
use mpgate_core::GatewayResult;

use crate::MpProxy;

/// A template message to deliver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateMessage {
    pub touser: String,
    pub template_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    pub data: HashMap<String, TemplateDataItem>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_msg_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miniprogram: Option<MiniProgramLink>,
}

/// One `.DATA` slot value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateDataItem {
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

/// A jump target into a bound mini program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiniProgramLink {
    pub appid: String,
    pub pagepath: String,
}

/// The configured industry pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndustryPayload {
    #[serde(default)]
    pub primary_industry: IndustryClass,
    #[serde(default)]
    pub secondary_industry: IndustryClass,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndustryClass {
    #[serde(default)]
    pub first_class: String,
    #[serde(default)]
    pub second_class: String,
}

/// A private template record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateRecord {
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub primary_industry: String,
    #[serde(default)]
    pub deputy_industry: String,
}

#[derive(Debug, Default, Deserialize)]
struct TemplateListPayload {
    #[serde(default)]
    template_list: Vec<TemplateRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct TemplateIdPayload {
    #[serde(default)]
    template_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct MsgIdPayload {
    #[serde(default)]
    msgid: i64,
}

/// A template message the platform withheld from delivery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockedMessage {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub tmpl_msg_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub send_timestamp: i64,
    #[serde(default)]
    pub openid: String,
}

#[derive(Debug, Default, Deserialize)]
struct BlockedMessagesPayload {
    #[serde(default)]
    msginfo: Vec<BlockedMessage>,
}

impl MpProxy {
    /// Fetch the configured industry pair.
    pub async fn get_industry(&self, access_token: &str) -> GatewayResult<IndustryPayload> {
        let rsp: Envelope<IndustryPayload> = self
            .http
            .get_json(paths::TEMPLATE_GET_INDUSTRY, access_token, &[])
            .await?;
        rsp.into_payload()
    }

    /// Set the industry pair the account belongs to.
    pub async fn set_industry(
        &self,
        access_token: &str,
        industry_id1: &str,
        industry_id2: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({
            "industry_id1": industry_id1,
            "industry_id2": industry_id2,
        });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::TEMPLATE_SET_INDUSTRY, access_token, &body)
            .await?;
        rsp.check()
    }

    /// List all private templates.
    pub async fn private_templates(
        &self,
        access_token: &str,
    ) -> GatewayResult<Vec<TemplateRecord>> {
        let rsp: Envelope<TemplateListPayload> = self
            .http
            .get_json(paths::TEMPLATE_GET_ALL_PRIVATE, access_token, &[])
            .await?;
        Ok(rsp.into_payload()?.template_list)
    }

    /// Obtain a template id from a short id and keyword selection.
    pub async fn template_id(
        &self,
        access_token: &str,
        template_id_short: &str,
        keyword_name_list: &[String],
    ) -> GatewayResult<String> {
        let body = serde_json::json!({
            "template_id_short": template_id_short,
            "keyword_name_list": keyword_name_list,
        });
        let rsp: Envelope<TemplateIdPayload> = self
            .http
            .post_json(paths::TEMPLATE_GET_ID, access_token, &body)
            .await?;
        Ok(rsp.into_payload()?.template_id)
    }

    /// Delete a private template.
    pub async fn delete_template(
        &self,
        access_token: &str,
        template_id: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "template_id": template_id });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::TEMPLATE_DELETE, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Send a template message; returns the platform message id.
    pub async fn send_template_message(
        &self,
        access_token: &str,
        message: &TemplateMessage,
    ) -> GatewayResult<i64> {
        let rsp: Envelope<MsgIdPayload> = self
            .http
            .post_json(paths::TEMPLATE_SEND, access_token, message)
            .await?;
        Ok(rsp.into_payload()?.msgid)
    }

    /// Send a one-time subscribe notification shaped like a template
    /// message.
    pub async fn send_template_subscribe_message(
        &self,
        access_token: &str,
        message: &TemplateMessage,
    ) -> GatewayResult<()> {
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::SUBSCRIBE_SEND, access_token, message)
            .await?;
        rsp.check()
    }

    /// Query template messages the platform blocked, paged by
    /// `largest_id`.
    pub async fn blocked_template_messages(
        &self,
        access_token: &str,
        tmpl_msg_id: &str,
        largest_id: i64,
        limit: i64,
    ) -> GatewayResult<Vec<BlockedMessage>> {
        let body = serde_json::json!({
            "tmpl_msg_id": tmpl_msg_id,
            "largest_id": largest_id,
            "limit": limit,
        });
        let rsp: Envelope<BlockedMessagesPayload> = self
            .http
            .post_json(paths::TEMPLATE_BLOCKED_MSG, access_token, &body)
            .await?;
        Ok(rsp.into_payload()?.msginfo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_message_round_trip() {
        let mut data = HashMap::new();
        data.insert(
            "first".to_string(),
            TemplateDataItem {
                value: "Order shipped".to_string(),
                color: "#173177".to_string(),
            },
        );
        let message = TemplateMessage {
            touser: "oUSER1".to_string(),
            template_id: "TPL1".to_string(),
            url: "https://example.com/orders/1".to_string(),
            data,
            miniprogram: Some(MiniProgramLink {
                appid: "wx1234".to_string(),
                pagepath: "pages/order?id=1".to_string(),
            }),
            ..TemplateMessage::default()
        };
        let bytes = serde_json::to_vec(&message).unwrap();
        let back: TemplateMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.touser, message.touser);
        assert_eq!(back.data["first"], message.data["first"]);
        assert_eq!(back.miniprogram, message.miniprogram);
    }

    #[test]
    fn test_optional_template_fields_are_omitted() {
        let message = TemplateMessage {
            touser: "oUSER1".to_string(),
            template_id: "TPL1".to_string(),
            ..TemplateMessage::default()
        };
        let wire = serde_json::to_value(&message).unwrap();
        assert!(wire.get("url").is_none());
        assert!(wire.get("color").is_none());
        assert!(wire.get("client_msg_id").is_none());
        assert!(wire.get("miniprogram").is_none());
    }
}
