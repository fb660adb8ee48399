//! Conversions between wire messages and the proxy's domain types.
//!
//! Mechanical field-for-field mapping; the only structure here is the
//! recursion over nested menu buttons.

use std::collections::HashMap;

use mpgate_proxy::kf;
use mpgate_proxy::material;
use mpgate_proxy::member;
use mpgate_proxy::menu;
use mpgate_proxy::subscribe;
use mpgate_proxy::tag;
use mpgate_proxy::template;

use crate::pb;

// ── Menus ────────────────────────────────────────────────────

pub fn menu_buttons_to_domain(buttons: &[pb::MenuButton]) -> Vec<menu::MenuButton> {
    buttons
        .iter()
        .map(|b| menu::MenuButton {
            button_type: b.r#type.clone(),
            name: b.name.clone(),
            key: b.key.clone(),
            url: b.url.clone(),
            media_id: b.media_id.clone(),
            appid: b.appid.clone(),
            pagepath: b.pagepath.clone(),
            sub_buttons: menu_buttons_to_domain(&b.sub_button),
        })
        .collect()
}

pub fn menu_buttons_to_rpc(buttons: Vec<menu::MenuButton>) -> Vec<pb::MenuButton> {
    buttons
        .into_iter()
        .map(|b| pb::MenuButton {
            r#type: b.button_type,
            name: b.name,
            key: b.key,
            url: b.url,
            media_id: b.media_id,
            appid: b.appid,
            pagepath: b.pagepath,
            sub_button: menu_buttons_to_rpc(b.sub_buttons),
        })
        .collect()
}

pub fn match_rule_to_domain(rule: &pb::ConditionalMatchRule) -> menu::MatchRule {
    menu::MatchRule {
        tag_id: rule.tag_id.clone(),
        client_platform_type: rule.client_platform_type.clone(),
    }
}

pub fn match_rule_to_rpc(rule: menu::MatchRule) -> pb::ConditionalMatchRule {
    pb::ConditionalMatchRule {
        tag_id: rule.tag_id,
        client_platform_type: rule.client_platform_type,
    }
}

pub fn menu_payload_to_rpc(payload: menu::MenuPayload) -> pb::GetMenuReply {
    pb::GetMenuReply {
        menu: Some(pb::get_menu_reply::MenuDefinition {
            button: menu_buttons_to_rpc(payload.menu.button),
            menu_id: payload.menu.menuid,
        }),
        conditional_menu: payload
            .conditionalmenu
            .into_iter()
            .map(|m| pb::get_menu_reply::ConditionalMenu {
                button: menu_buttons_to_rpc(m.button),
                matchrule: Some(match_rule_to_rpc(m.matchrule)),
                menu_id: m.menuid,
            })
            .collect(),
    }
}

pub fn self_menu_to_rpc(payload: menu::SelfMenuPayload) -> pb::SelfMenuReply {
    pb::SelfMenuReply {
        is_menu_open: payload.is_menu_open,
        selfmenu_info: Some(pb::self_menu_reply::MenuInfo {
            button: payload
                .selfmenu_info
                .button
                .into_iter()
                .map(self_menu_button_to_rpc)
                .collect(),
        }),
    }
}

fn self_menu_button_to_rpc(button: menu::SelfMenuButton) -> pb::SelfMenuButton {
    pb::SelfMenuButton {
        r#type: button.button_type,
        name: button.name,
        key: button.key,
        url: button.url,
        value: button.value,
        sub_button: Some(pb::self_menu_button::SubButtonList {
            list: button
                .sub_button
                .list
                .into_iter()
                .map(self_menu_button_to_rpc)
                .collect(),
        }),
        news_info: Some(pb::self_menu_button::NewsButtonList {
            list: button
                .news_info
                .list
                .into_iter()
                .map(|news| pb::NewsButton {
                    title: news.title,
                    author: news.author,
                    digest: news.digest,
                    show_cover: news.show_cover,
                    cover_url: news.cover_url,
                    content_url: news.content_url,
                    source_url: news.source_url,
                })
                .collect(),
        }),
    }
}

// ── Members ──────────────────────────────────────────────────

pub fn member_info_to_rpc(info: member::MemberInfo) -> pb::MemberInfoReply {
    pb::MemberInfoReply {
        subscribe: info.subscribe,
        openid: info.openid,
        subscribe_time: info.subscribe_time,
        unionid: info.unionid,
        remark: info.remark,
        groupid: info.groupid,
        tagid_list: info.tagid_list,
        subscribe_scene: info.subscribe_scene,
        qr_scene: info.qr_scene,
        qr_scene_str: info.qr_scene_str,
        language: info.language,
    }
}

// ── Tags ─────────────────────────────────────────────────────

pub fn tag_to_rpc(tag: tag::Tag) -> pb::Tag {
    pb::Tag {
        id: tag.id,
        name: tag.name,
        count: tag.count,
    }
}

// ── Permanent materials ──────────────────────────────────────

pub fn material_item_to_rpc(item: material::MaterialItem) -> pb::MaterialItem {
    pb::MaterialItem {
        media_id: item.media_id,
        name: item.name,
        update_time: item.update_time,
        url: item.url,
    }
}

pub fn material_news_item_to_rpc(item: material::MaterialNewsItem) -> pb::MaterialNewsItem {
    pb::MaterialNewsItem {
        media_id: item.media_id,
        update_time: item.update_time,
        news_item: item
            .content
            .news_item
            .into_iter()
            .map(|article| pb::NewsArticle {
                title: article.title,
                thumb_media_id: article.thumb_media_id,
                show_cover_pic: article.show_cover_pic,
                author: article.author,
                digest: article.digest,
                content: article.content,
                url: article.url,
                content_source_url: article.content_source_url,
            })
            .collect(),
    }
}

// ── Customer service ─────────────────────────────────────────

pub fn kf_target_to_domain(target: Option<pb::KfMessageTarget>) -> kf::KfTarget {
    let target = target.unwrap_or_default();
    kf::KfTarget {
        to_user: target.to_user,
        kf_account: target.kf_account,
    }
}

pub fn kf_info_to_rpc(info: kf::KfInfo) -> pb::KfInfo {
    pb::KfInfo {
        kf_account: info.kf_account,
        kf_nick: info.kf_nick,
        kf_id: info.kf_id,
        kf_headimgurl: info.kf_headimgurl,
        kf_wx: info.kf_wx,
        invite_wx: info.invite_wx,
        invite_expire_time: info.invite_expire_time,
        invite_status: info.invite_status,
    }
}

pub fn kf_online_info_to_rpc(info: kf::KfOnlineInfo) -> pb::KfOnlineInfo {
    pb::KfOnlineInfo {
        kf_account: info.kf_account,
        status: info.status,
        kf_id: info.kf_id,
        accepted_case: info.accepted_case,
    }
}

pub fn kf_msg_record_to_rpc(record: kf::KfMsgRecord) -> pb::KfMsgRecord {
    pb::KfMsgRecord {
        openid: record.openid,
        worker: record.worker,
        opercode: record.opercode,
        text: record.text,
        time: record.time,
    }
}

pub fn kf_session_to_rpc(session: kf::KfSession) -> pb::KfSession {
    pb::KfSession {
        openid: session.openid,
        create_time: session.createtime,
    }
}

pub fn wait_case_to_rpc(case: kf::WaitCase) -> pb::WaitCase {
    pb::WaitCase {
        openid: case.openid,
        latest_time: case.latest_time,
    }
}

// ── Template messages ────────────────────────────────────────

pub fn template_message_to_domain(
    req: &pb::SendTemplateMessageRequest,
) -> template::TemplateMessage {
    let data: HashMap<String, template::TemplateDataItem> = req
        .data
        .iter()
        .map(|(name, item)| {
            (
                name.clone(),
                template::TemplateDataItem {
                    value: item.value.clone(),
                    color: item.color.clone(),
                },
            )
        })
        .collect();

    template::TemplateMessage {
        touser: req.to_user.clone(),
        template_id: req.template_id.clone(),
        url: req.url.clone(),
        color: String::new(),
        data,
        client_msg_id: req.client_msg_id.clone(),
        miniprogram: req.miniprogram.as_ref().map(|link| template::MiniProgramLink {
            appid: link.appid.clone(),
            pagepath: link.pagepath.clone(),
        }),
    }
}

pub fn template_record_to_rpc(record: template::TemplateRecord) -> pb::TemplateRecord {
    pb::TemplateRecord {
        template_id: record.template_id,
        title: record.title,
        content: record.content,
        example: record.example,
        primary_industry: record.primary_industry,
        deputy_industry: record.deputy_industry,
    }
}

pub fn industry_to_rpc(payload: template::IndustryPayload) -> pb::GetIndustryReply {
    let class = |c: template::IndustryClass| pb::get_industry_reply::IndustryClass {
        first_class: c.first_class,
        second_class: c.second_class,
    };
    pb::GetIndustryReply {
        primary_industry: Some(class(payload.primary_industry)),
        secondary_industry: Some(class(payload.secondary_industry)),
    }
}

pub fn blocked_message_to_rpc(message: template::BlockedMessage) -> pb::BlockedMessage {
    pb::BlockedMessage {
        id: message.id,
        tmpl_msg_id: message.tmpl_msg_id,
        title: message.title,
        content: message.content,
        send_timestamp: message.send_timestamp,
        openid: message.openid,
    }
}

// ── Subscription messages ────────────────────────────────────

pub fn subscribe_message_to_domain(
    req: &pb::SendSubscribeMessageRequest,
) -> subscribe::SubscribeMessage {
    let data: HashMap<String, subscribe::SubscribeDataItem> = req
        .data
        .iter()
        .map(|(name, item)| {
            (
                name.clone(),
                subscribe::SubscribeDataItem {
                    value: item.value.clone(),
                },
            )
        })
        .collect();

    subscribe::SubscribeMessage {
        touser: req.to_user.clone(),
        template_id: req.template_id.clone(),
        page: req.page.clone(),
        data,
        miniprogram: req.miniprogram.as_ref().map(|link| template::MiniProgramLink {
            appid: link.appid.clone(),
            pagepath: link.pagepath.clone(),
        }),
    }
}

pub fn subscribe_category_to_rpc(category: subscribe::SubscribeCategory) -> pb::SubscribeCategory {
    pb::SubscribeCategory {
        id: category.id,
        name: category.name,
    }
}

pub fn template_keyword_to_rpc(keyword: subscribe::TemplateKeyword) -> pb::TemplateKeyword {
    pb::TemplateKeyword {
        kid: keyword.kid,
        name: keyword.name,
        rule: keyword.rule,
        example: keyword.example,
    }
}

pub fn template_title_to_rpc(title: subscribe::TemplateTitle) -> pb::TemplateTitle {
    pb::TemplateTitle {
        tid: title.tid,
        title: title.title,
        template_type: title.template_type,
        category_id: title.category_id,
    }
}

pub fn subscribe_template_to_rpc(template: subscribe::SubscribeTemplate) -> pb::SubscribeTemplate {
    pb::SubscribeTemplate {
        pri_tmpl_id: template.pri_tmpl_id,
        title: template.title,
        content: template.content,
        example: template.example,
        template_type: template.template_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_buttons_round_trip_through_wire_types() {
        let rpc_buttons = vec![pb::MenuButton {
            r#type: "view".to_string(),
            name: "Docs".to_string(),
            url: "https://example.com/docs".to_string(),
            sub_button: vec![pb::MenuButton {
                r#type: "click".to_string(),
                name: "Ping".to_string(),
                key: "PING".to_string(),
                ..pb::MenuButton::default()
            }],
            ..pb::MenuButton::default()
        }];

        let domain = menu_buttons_to_domain(&rpc_buttons);
        assert_eq!(domain[0].button_type, "view");
        assert_eq!(domain[0].sub_buttons[0].key, "PING");

        let back = menu_buttons_to_rpc(domain);
        assert_eq!(back, rpc_buttons);
    }

    #[test]
    fn test_template_message_flattens_data_map() {
        let mut data = HashMap::new();
        data.insert(
            "first".to_string(),
            pb::TemplateDataItem {
                value: "shipped".to_string(),
                color: "#173177".to_string(),
            },
        );
        let req = pb::SendTemplateMessageRequest {
            access_token: "TOKEN".to_string(),
            to_user: "oUSER1".to_string(),
            template_id: "TPL1".to_string(),
            data,
            ..pb::SendTemplateMessageRequest::default()
        };

        let message = template_message_to_domain(&req);
        assert_eq!(message.touser, "oUSER1");
        assert_eq!(message.data["first"].value, "shipped");
        assert!(message.miniprogram.is_none());
    }
}
