//! The gRPC service facade.
//!
//! Adapts between the wire schema and the proxy handler signatures.
//! Operations whose upstream response is only the error envelope answer
//! with a generic [`pb::ErrorReply`] (code 0 on success, the upstream
//! code on failure, 500 for transport-level failures); operations with
//! typed replies surface failures as `tonic::Status`.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use mpgate_core::{ErrorKind, GatewayError, GatewayResult};
use mpgate_proxy::MpProxy;
use mpgate_proxy::kf::{KfMiniProgram, KfMsgMenu, KfMusic, KfVideo};
use mpgate_proxy::qrcode::Scene;

use crate::convert;
use crate::pb;
use crate::pb::mp_gate_server::MpGate;

/// The RPC facade over the platform proxy.
#[derive(Debug, Clone)]
pub struct MpGateService {
    proxy: Arc<MpProxy>,
}

impl MpGateService {
    /// Create the facade over a constructed proxy.
    pub fn new(proxy: Arc<MpProxy>) -> Self {
        Self { proxy }
    }
}

/// Fold an envelope-only result into the generic error reply.
fn error_reply(result: GatewayResult<()>) -> pb::ErrorReply {
    match result {
        Ok(()) => pb::ErrorReply {
            errcode: 0,
            errmsg: "ok".to_string(),
        },
        Err(err) => {
            tracing::error!(code = err.code, "{err}");
            pb::ErrorReply {
                errcode: err.code,
                errmsg: err.message,
            }
        }
    }
}

/// Surface a handler failure as an RPC error.
fn into_status(err: GatewayError) -> Status {
    tracing::error!(code = err.code, "{err}");
    match err.kind {
        ErrorKind::Scene => Status::invalid_argument(err.to_string()),
        _ => Status::internal(err.to_string()),
    }
}

/// Decide the scene variant once at the RPC boundary.
fn scene_from_request(scene: Option<pb::create_qr_code_request::Scene>) -> GatewayResult<Scene> {
    match scene {
        Some(pb::create_qr_code_request::Scene::SceneId(id)) => Ok(Scene::Id(id)),
        Some(pb::create_qr_code_request::Scene::SceneStr(s)) => Ok(Scene::Str(s)),
        None => Err(GatewayError::scene(
            "scene not supported: expected scene_id or scene_str",
        )),
    }
}

#[tonic::async_trait]
impl MpGate for MpGateService {
    // ── Menus ──────────────────────────────────────────────────

    async fn create_menu(
        &self,
        request: Request<pb::CreateMenuRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let buttons = convert::menu_buttons_to_domain(&req.button);
        let result = self.proxy.create_menu(&req.access_token, &buttons).await;
        Ok(Response::new(error_reply(result)))
    }

    async fn get_menu(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetMenuReply>, Status> {
        let req = request.into_inner();
        let payload = self
            .proxy
            .get_menu(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(convert::menu_payload_to_rpc(payload)))
    }

    async fn delete_menu(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self.proxy.delete_menu(&req.access_token).await;
        Ok(Response::new(error_reply(result)))
    }

    async fn create_conditional_menu(
        &self,
        request: Request<pb::CreateConditionalMenuRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let buttons = convert::menu_buttons_to_domain(&req.button);
        let match_rule = convert::match_rule_to_domain(&req.matchrule.unwrap_or_default());
        let result = self
            .proxy
            .create_conditional_menu(&req.access_token, &buttons, &match_rule)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn delete_conditional_menu(
        &self,
        request: Request<pb::DeleteConditionalMenuRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .delete_conditional_menu(&req.access_token, req.menu_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn try_match_menu(
        &self,
        request: Request<pb::TryMatchMenuRequest>,
    ) -> Result<Response<pb::TryMatchMenuReply>, Status> {
        let req = request.into_inner();
        let buttons = self
            .proxy
            .try_match_menu(&req.access_token, &req.user_id)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::TryMatchMenuReply {
            button: convert::menu_buttons_to_rpc(buttons),
        }))
    }

    async fn pull_self_menu(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::SelfMenuReply>, Status> {
        let req = request.into_inner();
        let payload = self
            .proxy
            .pull_self_menu(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(convert::self_menu_to_rpc(payload)))
    }

    // ── QR codes and short keys ────────────────────────────────

    async fn create_temporary_qr_code(
        &self,
        request: Request<pb::CreateQrCodeRequest>,
    ) -> Result<Response<pb::QrTicketReply>, Status> {
        let req = request.into_inner();
        let scene = scene_from_request(req.scene).map_err(into_status)?;
        let ticket = self
            .proxy
            .create_temporary_qr_code(&req.access_token, scene, req.expire_seconds)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::QrTicketReply {
            ticket: ticket.ticket,
            url: ticket.url,
            expire_seconds: ticket.expire_seconds,
        }))
    }

    async fn create_permanent_qr_code(
        &self,
        request: Request<pb::CreateQrCodeRequest>,
    ) -> Result<Response<pb::QrTicketReply>, Status> {
        let req = request.into_inner();
        let scene = scene_from_request(req.scene).map_err(into_status)?;
        let ticket = self
            .proxy
            .create_permanent_qr_code(&req.access_token, scene, req.expire_seconds)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::QrTicketReply {
            ticket: ticket.ticket,
            url: ticket.url,
            expire_seconds: ticket.expire_seconds,
        }))
    }

    async fn gen_shorten(
        &self,
        request: Request<pb::GenShortenRequest>,
    ) -> Result<Response<pb::GenShortenReply>, Status> {
        let req = request.into_inner();
        let short_key = self
            .proxy
            .gen_shorten(&req.access_token, &req.long_data, req.expire_seconds)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GenShortenReply { short_key }))
    }

    async fn fetch_shorten(
        &self,
        request: Request<pb::FetchShortenRequest>,
    ) -> Result<Response<pb::FetchShortenReply>, Status> {
        let req = request.into_inner();
        let info = self
            .proxy
            .fetch_shorten(&req.access_token, &req.short_key)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::FetchShortenReply {
            long_data: info.long_data,
            expire_seconds: info.expire_seconds,
            create_time: info.create_time,
        }))
    }

    // ── Members ────────────────────────────────────────────────

    async fn get_member_list(
        &self,
        request: Request<pb::GetMemberListRequest>,
    ) -> Result<Response<pb::GetMemberListReply>, Status> {
        let req = request.into_inner();
        let page = self
            .proxy
            .member_list(&req.access_token, &req.next_openid)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetMemberListReply {
            total: page.total,
            count: page.count,
            openids: page.data.openid,
            next_openid: page.next_openid,
        }))
    }

    async fn get_member_info(
        &self,
        request: Request<pb::GetMemberInfoRequest>,
    ) -> Result<Response<pb::MemberInfoReply>, Status> {
        let req = request.into_inner();
        let info = self
            .proxy
            .member_info(&req.access_token, &req.openid, &req.lang)
            .await
            .map_err(into_status)?;
        Ok(Response::new(convert::member_info_to_rpc(info)))
    }

    async fn batch_get_member_info(
        &self,
        request: Request<pb::BatchGetMemberInfoRequest>,
    ) -> Result<Response<pb::BatchGetMemberInfoReply>, Status> {
        let req = request.into_inner();
        let infos = self
            .proxy
            .batch_member_info(&req.access_token, &req.openids)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::BatchGetMemberInfoReply {
            user_info_list: infos.into_iter().map(convert::member_info_to_rpc).collect(),
        }))
    }

    async fn get_member_tag_ids(
        &self,
        request: Request<pb::GetMemberTagIdsRequest>,
    ) -> Result<Response<pb::GetMemberTagIdsReply>, Status> {
        let req = request.into_inner();
        let tagid_list = self
            .proxy
            .member_tag_ids(&req.access_token, &req.openid)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetMemberTagIdsReply { tagid_list }))
    }

    async fn update_member_remark(
        &self,
        request: Request<pb::UpdateMemberRemarkRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .update_member_remark(&req.access_token, &req.openid, &req.remark)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn get_blacklist(
        &self,
        request: Request<pb::GetBlacklistRequest>,
    ) -> Result<Response<pb::GetBlacklistReply>, Status> {
        let req = request.into_inner();
        let page = self
            .proxy
            .blacklist(&req.access_token, &req.next_openid)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetBlacklistReply {
            total: page.total,
            count: page.count,
            openids: page.data.openid,
            next_openid: page.next_openid,
        }))
    }

    async fn block_members(
        &self,
        request: Request<pb::BlockMembersRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self.proxy.block_members(&req.access_token, &req.openids).await;
        Ok(Response::new(error_reply(result)))
    }

    async fn unblock_members(
        &self,
        request: Request<pb::BlockMembersRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .unblock_members(&req.access_token, &req.openids)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    // ── Tags ───────────────────────────────────────────────────

    async fn create_tag(
        &self,
        request: Request<pb::CreateTagRequest>,
    ) -> Result<Response<pb::TagReply>, Status> {
        let req = request.into_inner();
        let tag = self
            .proxy
            .create_tag(&req.access_token, &req.name)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::TagReply {
            tag: Some(convert::tag_to_rpc(tag)),
        }))
    }

    async fn update_tag(
        &self,
        request: Request<pb::UpdateTagRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .update_tag(&req.access_token, req.id, &req.name)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn delete_tag(
        &self,
        request: Request<pb::DeleteTagRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self.proxy.delete_tag(&req.access_token, req.id).await;
        Ok(Response::new(error_reply(result)))
    }

    async fn get_tag_list(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetTagListReply>, Status> {
        let req = request.into_inner();
        let tags = self
            .proxy
            .tag_list(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetTagListReply {
            tags: tags.into_iter().map(convert::tag_to_rpc).collect(),
        }))
    }

    async fn get_tag_members(
        &self,
        request: Request<pb::GetTagMembersRequest>,
    ) -> Result<Response<pb::GetTagMembersReply>, Status> {
        let req = request.into_inner();
        let page = self
            .proxy
            .tag_members(&req.access_token, req.tag_id, &req.next_openid)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetTagMembersReply {
            count: page.count,
            openids: page.data.openid,
            next_openid: page.next_openid,
        }))
    }

    async fn batch_tagging(
        &self,
        request: Request<pb::BatchTaggingRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .batch_tagging(&req.access_token, req.tag_id, &req.openids)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn batch_untagging(
        &self,
        request: Request<pb::BatchTaggingRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .batch_untagging(&req.access_token, req.tag_id, &req.openids)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    // ── Permanent materials ────────────────────────────────────

    async fn get_material_count(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::MaterialCountReply>, Status> {
        let req = request.into_inner();
        let counts = self
            .proxy
            .material_count(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::MaterialCountReply {
            voice_count: counts.voice_count,
            video_count: counts.video_count,
            image_count: counts.image_count,
            news_count: counts.news_count,
        }))
    }

    async fn get_material_list(
        &self,
        request: Request<pb::GetMaterialListRequest>,
    ) -> Result<Response<pb::GetMaterialListReply>, Status> {
        let req = request.into_inner();
        let page = self
            .proxy
            .material_list(&req.access_token, &req.media_type, req.offset, req.count)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetMaterialListReply {
            total_count: page.total_count,
            item_count: page.item_count,
            item: page
                .item
                .into_iter()
                .map(convert::material_item_to_rpc)
                .collect(),
        }))
    }

    async fn get_material_news_list(
        &self,
        request: Request<pb::GetMaterialListRequest>,
    ) -> Result<Response<pb::GetMaterialNewsListReply>, Status> {
        let req = request.into_inner();
        let page = self
            .proxy
            .material_news_list(&req.access_token, &req.media_type, req.offset, req.count)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetMaterialNewsListReply {
            total_count: page.total_count,
            item_count: page.item_count,
            item: page
                .item
                .into_iter()
                .map(convert::material_news_item_to_rpc)
                .collect(),
        }))
    }

    async fn delete_material(
        &self,
        request: Request<pb::DeleteMaterialRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .delete_material(&req.access_token, &req.media_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    // ── Customer-service accounts and sessions ─────────────────

    async fn add_kf_account(
        &self,
        request: Request<pb::KfAccountRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .add_kf_account(&req.access_token, &req.kf_account, &req.nickname)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn update_kf_account(
        &self,
        request: Request<pb::KfAccountRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .update_kf_account(&req.access_token, &req.kf_account, &req.nickname)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn delete_kf_account(
        &self,
        request: Request<pb::DeleteKfAccountRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .delete_kf_account(&req.access_token, &req.kf_account)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn invite_kf_worker(
        &self,
        request: Request<pb::InviteKfWorkerRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .invite_kf_worker(&req.access_token, &req.kf_account, &req.invite_wx)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn get_kf_list(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetKfListReply>, Status> {
        let req = request.into_inner();
        let accounts = self
            .proxy
            .kf_list(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetKfListReply {
            kf_list: accounts.into_iter().map(convert::kf_info_to_rpc).collect(),
        }))
    }

    async fn get_kf_online_list(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetKfOnlineListReply>, Status> {
        let req = request.into_inner();
        let accounts = self
            .proxy
            .kf_online_list(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetKfOnlineListReply {
            kf_online_list: accounts
                .into_iter()
                .map(convert::kf_online_info_to_rpc)
                .collect(),
        }))
    }

    async fn get_kf_msg_records(
        &self,
        request: Request<pb::GetKfMsgRecordsRequest>,
    ) -> Result<Response<pb::GetKfMsgRecordsReply>, Status> {
        let req = request.into_inner();
        let page = self
            .proxy
            .kf_msg_records(
                &req.access_token,
                req.start_time,
                req.end_time,
                req.msg_id,
                req.number,
            )
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetKfMsgRecordsReply {
            number: page.number,
            msg_id: page.msgid,
            records: page
                .recordlist
                .into_iter()
                .map(convert::kf_msg_record_to_rpc)
                .collect(),
        }))
    }

    async fn create_kf_session(
        &self,
        request: Request<pb::KfSessionRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .create_kf_session(&req.access_token, &req.kf_account, &req.openid)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn close_kf_session(
        &self,
        request: Request<pb::KfSessionRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .close_kf_session(&req.access_token, &req.kf_account, &req.openid)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn get_kf_session_status(
        &self,
        request: Request<pb::GetKfSessionStatusRequest>,
    ) -> Result<Response<pb::KfSessionStatusReply>, Status> {
        let req = request.into_inner();
        let status = self
            .proxy
            .kf_session_status(&req.access_token, &req.openid)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::KfSessionStatusReply {
            kf_account: status.kf_account,
            create_time: status.createtime,
        }))
    }

    async fn get_kf_session_list(
        &self,
        request: Request<pb::GetKfSessionListRequest>,
    ) -> Result<Response<pb::GetKfSessionListReply>, Status> {
        let req = request.into_inner();
        let sessions = self
            .proxy
            .kf_session_list(&req.access_token, &req.kf_account)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetKfSessionListReply {
            sessions: sessions.into_iter().map(convert::kf_session_to_rpc).collect(),
        }))
    }

    async fn get_unaccepted_kf_sessions(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetUnacceptedKfSessionsReply>, Status> {
        let req = request.into_inner();
        let page = self
            .proxy
            .unaccepted_kf_sessions(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetUnacceptedKfSessionsReply {
            count: page.count,
            wait_cases: page
                .waitcaselist
                .into_iter()
                .map(convert::wait_case_to_rpc)
                .collect(),
        }))
    }

    async fn update_kf_typing(
        &self,
        request: Request<pb::UpdateKfTypingRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .update_kf_typing(&req.access_token, &req.to_user, &req.command)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    // ── Customer-service message sending ───────────────────────

    async fn send_kf_text_message(
        &self,
        request: Request<pb::SendKfTextMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let result = self
            .proxy
            .send_kf_text(&req.access_token, &target, &req.content)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_image_message(
        &self,
        request: Request<pb::SendKfMediaMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let result = self
            .proxy
            .send_kf_image(&req.access_token, &target, &req.media_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_voice_message(
        &self,
        request: Request<pb::SendKfMediaMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let result = self
            .proxy
            .send_kf_voice(&req.access_token, &target, &req.media_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_video_message(
        &self,
        request: Request<pb::SendKfVideoMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let video = KfVideo {
            media_id: req.media_id,
            thumb_media_id: req.thumb_media_id,
            title: req.title,
            description: req.description,
        };
        let result = self
            .proxy
            .send_kf_video(&req.access_token, &target, &video)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_music_message(
        &self,
        request: Request<pb::SendKfMusicMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let music = KfMusic {
            title: req.title,
            description: req.description,
            musicurl: req.music_url,
            hqmusicurl: req.hq_music_url,
            thumb_media_id: req.thumb_media_id,
        };
        let result = self
            .proxy
            .send_kf_music(&req.access_token, &target, &music)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_news_card_message(
        &self,
        request: Request<pb::SendKfNewsCardMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let article = mpgate_proxy::kf::KfArticle {
            title: req.title,
            description: req.description,
            url: req.url,
            picurl: req.pic_url,
        };
        let result = self
            .proxy
            .send_kf_news_card(&req.access_token, &target, &article)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_news_page_message(
        &self,
        request: Request<pb::SendKfMediaMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let result = self
            .proxy
            .send_kf_news_page(&req.access_token, &target, &req.media_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_article_message(
        &self,
        request: Request<pb::SendKfArticleMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let result = self
            .proxy
            .send_kf_article(&req.access_token, &target, &req.article_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_menu_message(
        &self,
        request: Request<pb::SendKfMenuMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let menu = KfMsgMenu {
            head_content: req.head_content,
            list: req
                .list
                .into_iter()
                .map(|item| mpgate_proxy::kf::KfMenuItem {
                    id: item.id,
                    content: item.content,
                })
                .collect(),
            tail_content: req.tail_content,
        };
        let result = self
            .proxy
            .send_kf_menu(&req.access_token, &target, &menu)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_card_message(
        &self,
        request: Request<pb::SendKfCardMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let result = self
            .proxy
            .send_kf_card(&req.access_token, &target, &req.card_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_kf_mini_program_message(
        &self,
        request: Request<pb::SendKfMiniProgramMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let target = convert::kf_target_to_domain(req.target);
        let page = KfMiniProgram {
            appid: req.appid,
            pagepath: req.pagepath,
            title: req.title,
            thumb_media_id: req.thumb_media_id,
        };
        let result = self
            .proxy
            .send_kf_mini_program(&req.access_token, &target, &page)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    // ── Template messages ──────────────────────────────────────

    async fn get_industry(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetIndustryReply>, Status> {
        let req = request.into_inner();
        let payload = self
            .proxy
            .get_industry(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(convert::industry_to_rpc(payload)))
    }

    async fn set_industry(
        &self,
        request: Request<pb::SetIndustryRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .set_industry(&req.access_token, &req.industry_id1, &req.industry_id2)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn get_private_templates(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetPrivateTemplatesReply>, Status> {
        let req = request.into_inner();
        let records = self
            .proxy
            .private_templates(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetPrivateTemplatesReply {
            template_list: records
                .into_iter()
                .map(convert::template_record_to_rpc)
                .collect(),
        }))
    }

    async fn get_template_id(
        &self,
        request: Request<pb::GetTemplateIdRequest>,
    ) -> Result<Response<pb::GetTemplateIdReply>, Status> {
        let req = request.into_inner();
        let template_id = self
            .proxy
            .template_id(
                &req.access_token,
                &req.template_id_short,
                &req.keyword_name_list,
            )
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetTemplateIdReply { template_id }))
    }

    async fn delete_template(
        &self,
        request: Request<pb::DeleteTemplateRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .delete_template(&req.access_token, &req.template_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn send_template_message(
        &self,
        request: Request<pb::SendTemplateMessageRequest>,
    ) -> Result<Response<pb::SendTemplateMessageReply>, Status> {
        let req = request.into_inner();
        let message = convert::template_message_to_domain(&req);
        let msg_id = self
            .proxy
            .send_template_message(&req.access_token, &message)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::SendTemplateMessageReply { msg_id }))
    }

    async fn send_template_subscribe_message(
        &self,
        request: Request<pb::SendTemplateMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let message = convert::template_message_to_domain(&req);
        let result = self
            .proxy
            .send_template_subscribe_message(&req.access_token, &message)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn get_blocked_template_messages(
        &self,
        request: Request<pb::GetBlockedTemplateMessagesRequest>,
    ) -> Result<Response<pb::GetBlockedTemplateMessagesReply>, Status> {
        let req = request.into_inner();
        let messages = self
            .proxy
            .blocked_template_messages(
                &req.access_token,
                &req.tmpl_msg_id,
                req.largest_id,
                req.limit,
            )
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetBlockedTemplateMessagesReply {
            msg_info: messages
                .into_iter()
                .map(convert::blocked_message_to_rpc)
                .collect(),
        }))
    }

    // ── Subscription messages ──────────────────────────────────

    async fn add_subscribe_template(
        &self,
        request: Request<pb::AddSubscribeTemplateRequest>,
    ) -> Result<Response<pb::AddSubscribeTemplateReply>, Status> {
        let req = request.into_inner();
        let pri_tmpl_id = self
            .proxy
            .add_subscribe_template(&req.access_token, &req.tid, &req.scene_desc, &req.kid_list)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::AddSubscribeTemplateReply { pri_tmpl_id }))
    }

    async fn delete_subscribe_template(
        &self,
        request: Request<pb::DeleteSubscribeTemplateRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let result = self
            .proxy
            .delete_subscribe_template(&req.access_token, &req.pri_tmpl_id)
            .await;
        Ok(Response::new(error_reply(result)))
    }

    async fn get_subscribe_categories(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetSubscribeCategoriesReply>, Status> {
        let req = request.into_inner();
        let categories = self
            .proxy
            .subscribe_categories(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetSubscribeCategoriesReply {
            data: categories
                .into_iter()
                .map(convert::subscribe_category_to_rpc)
                .collect(),
        }))
    }

    async fn get_subscribe_template_keywords(
        &self,
        request: Request<pb::GetSubscribeTemplateKeywordsRequest>,
    ) -> Result<Response<pb::GetSubscribeTemplateKeywordsReply>, Status> {
        let req = request.into_inner();
        let payload = self
            .proxy
            .subscribe_template_keywords(&req.access_token, &req.tid)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetSubscribeTemplateKeywordsReply {
            count: payload.count,
            data: payload
                .data
                .into_iter()
                .map(convert::template_keyword_to_rpc)
                .collect(),
        }))
    }

    async fn get_subscribe_template_titles(
        &self,
        request: Request<pb::GetSubscribeTemplateTitlesRequest>,
    ) -> Result<Response<pb::GetSubscribeTemplateTitlesReply>, Status> {
        let req = request.into_inner();
        let payload = self
            .proxy
            .subscribe_template_titles(&req.access_token, &req.ids, req.start, req.limit)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetSubscribeTemplateTitlesReply {
            count: payload.count,
            data: payload
                .data
                .into_iter()
                .map(convert::template_title_to_rpc)
                .collect(),
        }))
    }

    async fn get_private_subscribe_templates(
        &self,
        request: Request<pb::AccessTokenRequest>,
    ) -> Result<Response<pb::GetPrivateSubscribeTemplatesReply>, Status> {
        let req = request.into_inner();
        let templates = self
            .proxy
            .private_subscribe_templates(&req.access_token)
            .await
            .map_err(into_status)?;
        Ok(Response::new(pb::GetPrivateSubscribeTemplatesReply {
            data: templates
                .into_iter()
                .map(convert::subscribe_template_to_rpc)
                .collect(),
        }))
    }

    async fn send_subscribe_message(
        &self,
        request: Request<pb::SendSubscribeMessageRequest>,
    ) -> Result<Response<pb::ErrorReply>, Status> {
        let req = request.into_inner();
        let message = convert::subscribe_message_to_domain(&req);
        let result = self
            .proxy
            .send_subscribe_message(&req.access_token, &message)
            .await;
        Ok(Response::new(error_reply(result)))
    }
}
