//! Subscription-message template management and delivery.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use mpgate_client::{Envelope, ErrorEnvelope, paths};
use mpgate_core::GatewayResult;

use crate::MpProxy;
use crate::template::MiniProgramLink;

/// A subscription message to deliver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeMessage {
    pub touser: String,
    pub template_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub page: String,
    pub data: HashMap<String, SubscribeDataItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miniprogram: Option<MiniProgramLink>,
}

/// One data slot value; subscription messages carry no per-slot color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscribeDataItem {
    pub value: String,
}

/// A private subscription template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeTemplate {
    #[serde(rename = "priTmplId", default)]
    pub pri_tmpl_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub example: String,
    #[serde(rename = "type", default)]
    pub template_type: i64,
}

/// A template category available to the account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A keyword available inside a public template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateKeyword {
    #[serde(default)]
    pub kid: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub example: String,
}

/// A page of public template titles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateTitlesPayload {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub data: Vec<TemplateTitle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateTitle {
    #[serde(default)]
    pub tid: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub template_type: i64,
    #[serde(rename = "categoryId", default)]
    pub category_id: String,
}

/// Keywords of one public template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateKeywordsPayload {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub data: Vec<TemplateKeyword>,
}

#[derive(Debug, Default, Deserialize)]
struct PriTmplIdPayload {
    #[serde(rename = "priTmplId", default)]
    pri_tmpl_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryListPayload {
    #[serde(default)]
    data: Vec<SubscribeCategory>,
}

#[derive(Debug, Default, Deserialize)]
struct SubscribeTemplateListPayload {
    #[serde(default)]
    data: Vec<SubscribeTemplate>,
}

impl MpProxy {
    /// Adopt a public template into the private list; returns the
    /// private template id.
    pub async fn add_subscribe_template(
        &self,
        access_token: &str,
        tid: &str,
        scene_desc: &str,
        kid_list: &[i64],
    ) -> GatewayResult<String> {
        let body = serde_json::json!({
            "tid": tid,
            "sceneDesc": scene_desc,
            "kidList": kid_list,
        });
        let rsp: Envelope<PriTmplIdPayload> = self
            .http
            .post_json(paths::SUBSCRIBE_TPL_ADD, access_token, &body)
            .await?;
        Ok(rsp.into_payload()?.pri_tmpl_id)
    }

    /// Remove a private subscription template.
    pub async fn delete_subscribe_template(
        &self,
        access_token: &str,
        pri_tmpl_id: &str,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "priTmplId": pri_tmpl_id });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::SUBSCRIBE_TPL_DEL, access_token, &body)
            .await?;
        rsp.check()
    }

    /// List the template categories available to the account.
    pub async fn subscribe_categories(
        &self,
        access_token: &str,
    ) -> GatewayResult<Vec<SubscribeCategory>> {
        let rsp: Envelope<CategoryListPayload> = self
            .http
            .get_json(paths::SUBSCRIBE_CATEGORY, access_token, &[])
            .await?;
        Ok(rsp.into_payload()?.data)
    }

    /// List the keywords of one public template.
    pub async fn subscribe_template_keywords(
        &self,
        access_token: &str,
        tid: &str,
    ) -> GatewayResult<TemplateKeywordsPayload> {
        let rsp: Envelope<TemplateKeywordsPayload> = self
            .http
            .get_json(
                paths::SUBSCRIBE_PUB_TPL_KEYWORDS,
                access_token,
                &[("tid", tid)],
            )
            .await?;
        rsp.into_payload()
    }

    /// List a page of public template titles under the given categories.
    pub async fn subscribe_template_titles(
        &self,
        access_token: &str,
        ids: &str,
        start: i64,
        limit: i64,
    ) -> GatewayResult<TemplateTitlesPayload> {
        let rsp: Envelope<TemplateTitlesPayload> = self
            .http
            .get_json(
                paths::SUBSCRIBE_PUB_TPL_TITLES,
                access_token,
                &[
                    ("ids", ids),
                    ("start", &start.to_string()),
                    ("limit", &limit.to_string()),
                ],
            )
            .await?;
        rsp.into_payload()
    }

    /// List the account's private subscription templates.
    pub async fn private_subscribe_templates(
        &self,
        access_token: &str,
    ) -> GatewayResult<Vec<SubscribeTemplate>> {
        let rsp: Envelope<SubscribeTemplateListPayload> = self
            .http
            .get_json(paths::SUBSCRIBE_PRIVATE_TPL, access_token, &[])
            .await?;
        Ok(rsp.into_payload()?.data)
    }

    /// Send a subscription message.
    pub async fn send_subscribe_message(
        &self,
        access_token: &str,
        message: &SubscribeMessage,
    ) -> GatewayResult<()> {
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::SUBSCRIBE_SEND, access_token, message)
            .await?;
        rsp.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_message_round_trip() {
        let mut data = HashMap::new();
        data.insert(
            "thing1".to_string(),
            SubscribeDataItem {
                value: "Desk lamp".to_string(),
            },
        );
        let message = SubscribeMessage {
            touser: "oUSER1".to_string(),
            template_id: "PRI_TPL1".to_string(),
            page: "index?from=notice".to_string(),
            data,
            miniprogram: None,
        };
        let bytes = serde_json::to_vec(&message).unwrap();
        let back: SubscribeMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.touser, message.touser);
        assert_eq!(back.page, message.page);
        assert_eq!(back.data["thing1"], message.data["thing1"]);
    }

    #[test]
    fn test_private_template_list_uses_camel_case_keys() {
        let body = serde_json::json!({
            "data": [{
                "priTmplId": "PRI1",
                "title": "Delivery",
                "content": "thing1: {{thing1.DATA}}",
                "example": "thing1: lamp",
                "type": 2
            }]
        });
        let payload: SubscribeTemplateListPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.data[0].pri_tmpl_id, "PRI1");
        assert_eq!(payload.data[0].template_type, 2);
    }
}
