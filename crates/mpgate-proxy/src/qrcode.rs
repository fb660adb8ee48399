//! QR code creation and short-key operations.

use serde::{Deserialize, Serialize};

use mpgate_client::paths;
use mpgate_core::GatewayResult;

use crate::MpProxy;

/// Action name for a temporary QR code with an integer scene.
pub const ACTION_SCENE_ID: &str = "QR_SCENE";
/// Action name for a temporary QR code with a string scene.
pub const ACTION_SCENE_STR: &str = "QR_STR_SCENE";
/// Action name for a permanent QR code with an integer scene.
pub const ACTION_LIMIT_SCENE_ID: &str = "QR_LIMIT_SCENE";
/// Action name for a permanent QR code with a string scene.
pub const ACTION_LIMIT_SCENE_STR: &str = "QR_LIMIT_STR_SCENE";

/// The scene a QR code represents.
///
/// Decided once at the RPC boundary; the wire field and action name
/// follow from the variant, so no runtime type inspection is needed
/// past this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scene {
    /// Integer scene identifier.
    Id(i64),
    /// String scene identifier.
    Str(String),
}

impl Scene {
    /// The action-name constant for this scene and code lifetime.
    pub fn action_name(&self, permanent: bool) -> &'static str {
        match (self, permanent) {
            (Self::Id(_), false) => ACTION_SCENE_ID,
            (Self::Str(_), false) => ACTION_SCENE_STR,
            (Self::Id(_), true) => ACTION_LIMIT_SCENE_ID,
            (Self::Str(_), true) => ACTION_LIMIT_SCENE_STR,
        }
    }
}

/// Wire fields for the scene; exactly one is populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_str: Option<String>,
}

impl From<&Scene> for SceneFields {
    fn from(scene: &Scene) -> Self {
        match scene {
            Scene::Id(id) => Self {
                scene_id: Some(*id),
                scene_str: None,
            },
            Scene::Str(s) => Self {
                scene_id: None,
                scene_str: Some(s.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeRequest {
    pub action_name: String,
    pub expire_seconds: i64,
    pub action_info: QrActionInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrActionInfo {
    pub scene: SceneFields,
}

impl QrCodeRequest {
    fn new(scene: &Scene, permanent: bool, expire_seconds: i64) -> Self {
        Self {
            action_name: scene.action_name(permanent).to_string(),
            expire_seconds,
            action_info: QrActionInfo {
                scene: scene.into(),
            },
        }
    }
}

/// A created QR code ticket.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QrTicket {
    #[serde(default)]
    pub ticket: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub expire_seconds: i64,
}

/// A resolved short key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortKeyInfo {
    #[serde(default)]
    pub long_data: String,
    #[serde(default)]
    pub expire_seconds: i64,
    #[serde(default)]
    pub create_time: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ShortKeyPayload {
    #[serde(default)]
    short_key: String,
}

impl MpProxy {
    /// Create a temporary QR code for the given scene.
    pub async fn create_temporary_qr_code(
        &self,
        access_token: &str,
        scene: Scene,
        expire_seconds: i64,
    ) -> GatewayResult<QrTicket> {
        self.create_qr_code(access_token, QrCodeRequest::new(&scene, false, expire_seconds))
            .await
    }

    /// Create a permanent (limit) QR code for the given scene.
    pub async fn create_permanent_qr_code(
        &self,
        access_token: &str,
        scene: Scene,
        expire_seconds: i64,
    ) -> GatewayResult<QrTicket> {
        self.create_qr_code(access_token, QrCodeRequest::new(&scene, true, expire_seconds))
            .await
    }

    async fn create_qr_code(
        &self,
        access_token: &str,
        request: QrCodeRequest,
    ) -> GatewayResult<QrTicket> {
        let rsp: mpgate_client::Envelope<QrTicket> = self
            .http
            .post_json(paths::QRCODE_CREATE, access_token, &request)
            .await?;
        rsp.into_payload()
    }

    /// Generate a short key for a long piece of data.
    pub async fn gen_shorten(
        &self,
        access_token: &str,
        long_data: &str,
        expire_seconds: i64,
    ) -> GatewayResult<String> {
        let body = serde_json::json!({
            "long_data": long_data,
            "expire_seconds": expire_seconds,
        });
        let rsp: mpgate_client::Envelope<ShortKeyPayload> = self
            .http
            .post_json(paths::SHORTEN_GEN, access_token, &body)
            .await?;
        Ok(rsp.into_payload()?.short_key)
    }

    /// Resolve a short key back to its long data.
    pub async fn fetch_shorten(
        &self,
        access_token: &str,
        short_key: &str,
    ) -> GatewayResult<ShortKeyInfo> {
        let body = serde_json::json!({ "short_key": short_key });
        let rsp: mpgate_client::Envelope<ShortKeyInfo> = self
            .http
            .post_json(paths::SHORTEN_FETCH, access_token, &body)
            .await?;
        rsp.into_payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_scene_selects_string_action_and_field() {
        let scene = Scene::Str("channel-7".to_string());
        let request = QrCodeRequest::new(&scene, false, 60);
        assert_eq!(request.action_name, ACTION_SCENE_STR);

        let wire = serde_json::to_value(&request).unwrap();
        let scene_obj = &wire["action_info"]["scene"];
        assert_eq!(scene_obj["scene_str"], "channel-7");
        assert!(scene_obj.get("scene_id").is_none());
    }

    #[test]
    fn test_integer_scene_selects_integer_action_and_field() {
        let scene = Scene::Id(42);
        let request = QrCodeRequest::new(&scene, false, 60);
        assert_eq!(request.action_name, ACTION_SCENE_ID);

        let wire = serde_json::to_value(&request).unwrap();
        let scene_obj = &wire["action_info"]["scene"];
        assert_eq!(scene_obj["scene_id"], 42);
        assert!(scene_obj.get("scene_str").is_none());
    }

    #[test]
    fn test_permanent_codes_use_limit_action_names() {
        assert_eq!(Scene::Id(1).action_name(true), ACTION_LIMIT_SCENE_ID);
        assert_eq!(
            Scene::Str("s".to_string()).action_name(true),
            ACTION_LIMIT_SCENE_STR
        );
    }

    #[test]
    fn test_qr_request_round_trip() {
        let request = QrCodeRequest::new(&Scene::Id(1001), false, 2592000);
        let bytes = serde_json::to_vec(&request).unwrap();
        let back: QrCodeRequest = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.action_name, request.action_name);
        assert_eq!(back.expire_seconds, request.expire_seconds);
        assert_eq!(back.action_info.scene.scene_id, Some(1001));
    }
}
