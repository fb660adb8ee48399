//! Custom menu management.

use serde::{Deserialize, Serialize};

use mpgate_client::{Envelope, ErrorEnvelope, paths};
use mpgate_core::GatewayResult;

use crate::MpProxy;

/// A menu button, possibly with nested sub-buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuButton {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub button_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub media_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub appid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pagepath: String,
    #[serde(rename = "sub_button", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_buttons: Vec<MenuButton>,
}

/// Match rule for a conditional menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_platform_type: String,
}

/// The API-set menu returned by the menu query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuPayload {
    #[serde(default)]
    pub menu: MenuDefinition,
    #[serde(default)]
    pub conditionalmenu: Vec<ConditionalMenu>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuDefinition {
    #[serde(default)]
    pub button: Vec<MenuButton>,
    #[serde(default)]
    pub menuid: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionalMenu {
    #[serde(default)]
    pub button: Vec<MenuButton>,
    #[serde(default)]
    pub matchrule: MatchRule,
    #[serde(default)]
    pub menuid: i64,
}

#[derive(Debug, Default, Deserialize)]
struct TryMatchPayload {
    #[serde(default)]
    button: Vec<MenuButton>,
}

/// The site-configured menu returned by `get_current_selfmenu_info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelfMenuPayload {
    #[serde(default)]
    pub is_menu_open: i64,
    #[serde(default)]
    pub selfmenu_info: SelfMenuInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelfMenuInfo {
    #[serde(default)]
    pub button: Vec<SelfMenuButton>,
}

/// A self-menu button; news buttons carry an article list, parents a
/// sub-button list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelfMenuButton {
    #[serde(rename = "type", default)]
    pub button_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub news_info: NewsButtonList,
    #[serde(default)]
    pub sub_button: SubButtonList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsButtonList {
    #[serde(default)]
    pub list: Vec<NewsButton>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubButtonList {
    #[serde(default)]
    pub list: Vec<SelfMenuButton>,
}

/// An article attached to a self-menu news button.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsButton {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub show_cover: i64,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub content_url: String,
    #[serde(default)]
    pub source_url: String,
}

#[derive(Debug, Serialize)]
struct CreateMenuRequest<'a> {
    button: &'a [MenuButton],
}

#[derive(Debug, Serialize)]
struct CreateConditionalMenuRequest<'a> {
    button: &'a [MenuButton],
    matchrule: &'a MatchRule,
}

impl MpProxy {
    /// Install the custom menu.
    pub async fn create_menu(
        &self,
        access_token: &str,
        buttons: &[MenuButton],
    ) -> GatewayResult<()> {
        let body = CreateMenuRequest { button: buttons };
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::MENU_CREATE, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Fetch the API-set menu, including conditional menus.
    pub async fn get_menu(&self, access_token: &str) -> GatewayResult<MenuPayload> {
        let rsp: Envelope<MenuPayload> =
            self.http.get_json(paths::MENU_GET, access_token, &[]).await?;
        rsp.into_payload()
    }

    /// Delete the custom menu, conditional menus included.
    pub async fn delete_menu(&self, access_token: &str) -> GatewayResult<()> {
        let rsp: ErrorEnvelope = self
            .http
            .get_json(paths::MENU_DELETE, access_token, &[])
            .await?;
        rsp.check()
    }

    /// Install a conditional menu for the given match rule.
    pub async fn create_conditional_menu(
        &self,
        access_token: &str,
        buttons: &[MenuButton],
        match_rule: &MatchRule,
    ) -> GatewayResult<()> {
        let body = CreateConditionalMenuRequest {
            button: buttons,
            matchrule: match_rule,
        };
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::MENU_ADD_CONDITIONAL, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Delete one conditional menu by id.
    pub async fn delete_conditional_menu(
        &self,
        access_token: &str,
        menu_id: i64,
    ) -> GatewayResult<()> {
        let body = serde_json::json!({ "menuid": menu_id });
        let rsp: ErrorEnvelope = self
            .http
            .post_json(paths::MENU_DEL_CONDITIONAL, access_token, &body)
            .await?;
        rsp.check()
    }

    /// Resolve the menu a given user would currently see.
    pub async fn try_match_menu(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> GatewayResult<Vec<MenuButton>> {
        let body = serde_json::json!({ "user_id": user_id });
        let rsp: Envelope<TryMatchPayload> = self
            .http
            .post_json(paths::MENU_TRY_MATCH, access_token, &body)
            .await?;
        Ok(rsp.into_payload()?.button)
    }

    /// Pull the currently effective menu, whether site-configured or
    /// API-set.
    pub async fn pull_self_menu(&self, access_token: &str) -> GatewayResult<SelfMenuPayload> {
        let rsp: Envelope<SelfMenuPayload> = self
            .http
            .get_json(paths::SELF_MENU_INFO, access_token, &[])
            .await?;
        rsp.into_payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_button_round_trip() {
        let button = MenuButton {
            button_type: "click".to_string(),
            name: "Today".to_string(),
            key: "V1001_TODAY".to_string(),
            sub_buttons: vec![MenuButton {
                button_type: "view".to_string(),
                name: "Site".to_string(),
                url: "https://example.com".to_string(),
                ..MenuButton::default()
            }],
            ..MenuButton::default()
        };
        let bytes = serde_json::to_vec(&button).unwrap();
        let back: MenuButton = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, button);
    }

    #[test]
    fn test_empty_button_fields_are_omitted_on_the_wire() {
        let button = MenuButton {
            button_type: "click".to_string(),
            name: "Hi".to_string(),
            key: "K".to_string(),
            ..MenuButton::default()
        };
        let wire = serde_json::to_value(&button).unwrap();
        assert!(wire.get("url").is_none());
        assert!(wire.get("media_id").is_none());
        assert!(wire.get("sub_button").is_none());
    }

    #[test]
    fn test_self_menu_decodes_nested_news_lists() {
        let body = serde_json::json!({
            "is_menu_open": 1,
            "selfmenu_info": {
                "button": [{
                    "type": "news",
                    "name": "News",
                    "news_info": {
                        "list": [{
                            "title": "Launch",
                            "author": "ops",
                            "show_cover": 1,
                            "cover_url": "https://example.com/c.png",
                            "content_url": "https://example.com/a",
                            "source_url": ""
                        }]
                    }
                }]
            }
        });
        let payload: SelfMenuPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.is_menu_open, 1);
        let button = &payload.selfmenu_info.button[0];
        assert_eq!(button.news_info.list[0].title, "Launch");
        assert_eq!(button.news_info.list[0].show_cover, 1);
    }
}
