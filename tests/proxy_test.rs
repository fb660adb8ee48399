//! Handler behavior against a stub upstream: success passthrough,
//! error-code surfacing, transport failures, and wire shapes.

mod common;

use common::{StubUpstream, unreachable_proxy};
use mpgate_core::ErrorKind;
use mpgate_proxy::kf::KfTarget;
use mpgate_proxy::qrcode::{ACTION_SCENE_ID, ACTION_SCENE_STR, Scene};

#[tokio::test]
async fn test_create_tag_returns_created_record() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/tags/create",
        r#"{"errcode":0,"tag":{"id":101,"name":"vip","count":0}}"#,
    )])
    .await;

    let tag = stub.proxy().create_tag("TOKEN", "vip").await.unwrap();
    assert_eq!(tag.id, 101);
    assert_eq!(tag.name, "vip");
    assert_eq!(tag.count, 0);

    let recorded = stub.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(
        recorded[0].body,
        serde_json::json!({ "tag": { "name": "vip" } })
    );
}

#[tokio::test]
async fn test_nonzero_errcode_surfaces_code_and_message() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/message/custom/send",
        r#"{"errcode":45047,"errmsg":"out of response count limit"}"#,
    )])
    .await;

    let target = KfTarget {
        to_user: "oUSER1".to_string(),
        kf_account: String::new(),
    };
    let err = stub
        .proxy()
        .send_kf_text("TOKEN", &target, "hello")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Upstream);
    assert_eq!(err.code, 45047);
    assert!(err.message.contains("out of response count limit"));
}

#[tokio::test]
async fn test_network_failure_is_a_transport_error() {
    let err = unreachable_proxy()
        .member_list("TOKEN", "")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
    assert_eq!(err.code, 500);
}

#[tokio::test]
async fn test_online_kf_list_passes_fields_through() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/customservice/getonlinekflist",
        r#"{"errcode":0,"errmsg":"ok","kf_online_list":[
            {"kf_account":"kf2001@corp","status":1,"kf_id":2001,"accepted_case":3}
        ]}"#,
    )])
    .await;

    let online = stub.proxy().kf_online_list("TOKEN").await.unwrap();
    assert_eq!(online.len(), 1);
    assert_eq!(online[0].kf_account, "kf2001@corp");
    assert_eq!(online[0].status, 1);
    assert_eq!(online[0].kf_id, 2001);
    assert_eq!(online[0].accepted_case, 3);
}

#[tokio::test]
async fn test_member_info_passes_fields_through() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/user/info",
        r#"{"subscribe":1,"openid":"oXYZ","language":"en","subscribe_time":1700000000,
            "unionid":"uABC","remark":"regular","groupid":0,"tagid_list":[101,102],
            "subscribe_scene":"ADD_SCENE_QR_CODE","qr_scene":42,"qr_scene_str":""}"#,
    )])
    .await;

    let info = stub.proxy().member_info("TOKEN", "oXYZ", "en").await.unwrap();
    assert_eq!(info.subscribe, 1);
    assert_eq!(info.openid, "oXYZ");
    assert_eq!(info.subscribe_time, 1700000000);
    assert_eq!(info.tagid_list, vec![101, 102]);
    assert_eq!(info.subscribe_scene, "ADD_SCENE_QR_CODE");
    assert_eq!(info.qr_scene, 42);
}

#[tokio::test]
async fn test_string_scene_sends_string_field_only() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/qrcode/create",
        r#"{"errcode":0,"ticket":"gQH4","url":"https://mp.example/q/x","expire_seconds":60}"#,
    )])
    .await;

    let ticket = stub
        .proxy()
        .create_temporary_qr_code("TOKEN", Scene::Str("channel-7".to_string()), 60)
        .await
        .unwrap();
    assert_eq!(ticket.ticket, "gQH4");

    let body = &stub.recorded()[0].body;
    assert_eq!(body["action_name"], ACTION_SCENE_STR);
    assert_eq!(body["action_info"]["scene"]["scene_str"], "channel-7");
    assert!(body["action_info"]["scene"].get("scene_id").is_none());
}

#[tokio::test]
async fn test_integer_scene_sends_integer_field_only() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/qrcode/create",
        r#"{"errcode":0,"ticket":"gQH5","url":"https://mp.example/q/y","expire_seconds":60}"#,
    )])
    .await;

    stub.proxy()
        .create_temporary_qr_code("TOKEN", Scene::Id(42), 60)
        .await
        .unwrap();

    let body = &stub.recorded()[0].body;
    assert_eq!(body["action_name"], ACTION_SCENE_ID);
    assert_eq!(body["action_info"]["scene"]["scene_id"], 42);
    assert!(body["action_info"]["scene"].get("scene_str").is_none());
}

#[tokio::test]
async fn test_kf_text_message_wire_shape() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/message/custom/send",
        r#"{"errcode":0,"errmsg":"ok"}"#,
    )])
    .await;

    let target = KfTarget {
        to_user: "oUSER1".to_string(),
        kf_account: "kf2001@corp".to_string(),
    };
    stub.proxy()
        .send_kf_text("TOKEN", &target, "hello")
        .await
        .unwrap();

    let body = &stub.recorded()[0].body;
    assert_eq!(body["touser"], "oUSER1");
    assert_eq!(body["msgtype"], "text");
    assert_eq!(body["customservice"]["kf_account"], "kf2001@corp");
    assert_eq!(body["text"]["content"], "hello");
}

#[tokio::test]
async fn test_fire_and_forget_succeeds_on_zero_code() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/message/custom/typing",
        r#"{"errcode":0,"errmsg":"ok"}"#,
    )])
    .await;

    stub.proxy()
        .update_kf_typing("TOKEN", "oUSER1", "Typing")
        .await
        .unwrap();

    let body = &stub.recorded()[0].body;
    assert_eq!(body["touser"], "oUSER1");
    assert_eq!(body["command"], "Typing");
}

#[tokio::test]
async fn test_paged_member_list_decodes_nested_openids() {
    let stub = StubUpstream::start(&[(
        "/cgi-bin/user/get",
        r#"{"total":2,"count":2,"data":{"openid":["oA","oB"]},"next_openid":"oB"}"#,
    )])
    .await;

    let page = stub.proxy().member_list("TOKEN", "").await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.data.openid, vec!["oA", "oB"]);
    assert_eq!(page.next_openid, "oB");
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let stub = StubUpstream::start(&[("/cgi-bin/tags/get", "<html>bad gateway</html>")]).await;

    let err = stub.proxy().tag_list("TOKEN").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
}
