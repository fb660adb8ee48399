//! Facade behavior: wire-type adaptation, scene selection at the RPC
//! boundary, and error-reply code mapping.

mod common;

use std::sync::Arc;

use tonic::Request;

use common::{StubUpstream, unreachable_proxy};
use mpgate_rpc::MpGateService;
use mpgate_rpc::pb;
use mpgate_rpc::pb::mp_gate_server::MpGate;

fn facade_over(stub: &StubUpstream) -> MpGateService {
    MpGateService::new(Arc::new(stub.proxy()))
}

#[tokio::test]
async fn test_unset_scene_is_rejected_without_an_http_call() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/qrcode/create",
        r#"{"errcode":0,"ticket":"gQH4","url":"u","expire_seconds":60}"#,
    )])
    .await;
    let facade = facade_over(&stub);

    let status = facade
        .create_temporary_qr_code(Request::new(pb::CreateQrCodeRequest {
            access_token: "TOKEN".to_string(),
            scene: None,
            expire_seconds: 60,
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), tonic::Code::InvalidArgument);
    assert_eq!(stub.request_count(), 0);
}

#[tokio::test]
async fn test_scene_variants_select_the_wire_field() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/qrcode/create",
        r#"{"errcode":0,"ticket":"gQH4","url":"u","expire_seconds":60}"#,
    )])
    .await;
    let facade = facade_over(&stub);

    facade
        .create_permanent_qr_code(Request::new(pb::CreateQrCodeRequest {
            access_token: "TOKEN".to_string(),
            scene: Some(pb::create_qr_code_request::Scene::SceneStr(
                "booth-12".to_string(),
            )),
            expire_seconds: 0,
        }))
        .await
        .unwrap();

    let body = &stub.recorded()[0].body;
    assert_eq!(body["action_name"], "QR_LIMIT_STR_SCENE");
    assert_eq!(body["action_info"]["scene"]["scene_str"], "booth-12");
}

#[tokio::test]
async fn test_typed_reply_passes_payload_through() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/tags/create",
        r#"{"errcode":0,"tag":{"id":101,"name":"vip","count":0}}"#,
    )])
    .await;
    let facade = facade_over(&stub);

    let reply = facade
        .create_tag(Request::new(pb::CreateTagRequest {
            access_token: "TOKEN".to_string(),
            name: "vip".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();

    let tag = reply.tag.unwrap();
    assert_eq!(tag.id, 101);
    assert_eq!(tag.name, "vip");
    assert_eq!(tag.count, 0);
}

#[tokio::test]
async fn test_typed_reply_surfaces_upstream_error_as_status() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/tags/create",
        r#"{"errcode":45157,"errmsg":"invalid tag name"}"#,
    )])
    .await;
    let facade = facade_over(&stub);

    let status = facade
        .create_tag(Request::new(pb::CreateTagRequest {
            access_token: "TOKEN".to_string(),
            name: "".to_string(),
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), tonic::Code::Internal);
    assert!(status.message().contains("45157"));
    assert!(status.message().contains("invalid tag name"));
}

#[tokio::test]
async fn test_envelope_only_op_echoes_upstream_code() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/message/custom/typing",
        r#"{"errcode":40003,"errmsg":"invalid openid"}"#,
    )])
    .await;
    let facade = facade_over(&stub);

    let reply = facade
        .update_kf_typing(Request::new(pb::UpdateKfTypingRequest {
            access_token: "TOKEN".to_string(),
            to_user: "bad".to_string(),
            command: "Typing".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.errcode, 40003);
    assert!(reply.errmsg.contains("invalid openid"));
}

#[tokio::test]
async fn test_envelope_only_op_reports_ok_on_success() {
    let stub = StubUpstream::start(&[(
        "/customservice/kfaccount/add",
        r#"{"errcode":0,"errmsg":"ok"}"#,
    )])
    .await;
    let facade = facade_over(&stub);

    let reply = facade
        .add_kf_account(Request::new(pb::KfAccountRequest {
            access_token: "TOKEN".to_string(),
            kf_account: "kf2001@corp".to_string(),
            nickname: "Support".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.errcode, 0);
    assert_eq!(reply.errmsg, "ok");
}

#[tokio::test]
async fn test_transport_failure_maps_to_500_in_error_reply() {
    let facade = MpGateService::new(Arc::new(unreachable_proxy()));

    let reply = facade
        .block_members(Request::new(pb::BlockMembersRequest {
            access_token: "TOKEN".to_string(),
            openids: vec!["oA".to_string()],
        }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.errcode, 500);
}

#[tokio::test]
async fn test_menu_buttons_convert_both_ways() {
    let stub = StubUpstream::start(&[
        ("/cgi-bin/menu/create", r#"{"errcode":0,"errmsg":"ok"}"#),
        (
            "/cgi-bin/menu/trymatch",
            r#"{"errcode":0,"button":[
                {"type":"view","name":"Docs","url":"https://example.com/docs"}
            ]}"#,
        ),
    ])
    .await;
    let facade = facade_over(&stub);

    let reply = facade
        .create_menu(Request::new(pb::CreateMenuRequest {
            access_token: "TOKEN".to_string(),
            button: vec![pb::MenuButton {
                r#type: "click".to_string(),
                name: "Ping".to_string(),
                key: "PING".to_string(),
                ..pb::MenuButton::default()
            }],
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(reply.errcode, 0);

    let body = &stub.recorded()[0].body;
    assert_eq!(body["button"][0]["type"], "click");
    assert_eq!(body["button"][0]["key"], "PING");

    let matched = facade
        .try_match_menu(Request::new(pb::TryMatchMenuRequest {
            access_token: "TOKEN".to_string(),
            user_id: "oUSER1".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(matched.button[0].r#type, "view");
    assert_eq!(matched.button[0].url, "https://example.com/docs");
}
