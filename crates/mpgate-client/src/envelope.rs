//! Request/response envelope protocol.
//!
//! Every upstream response is a JSON object carrying the fixed
//! `{errcode, errmsg}` pair alongside operation-specific fields. The
//! envelope is decoded generically: [`Envelope<T>`] composes the error
//! header with any payload shape via `#[serde(flatten)]`, so each
//! operation only supplies its payload type.
//!
//! Decoding success does NOT imply business success. The envelope is
//! returned intact and the caller checks the error code explicitly via
//! [`ErrorEnvelope::check`] before trusting the payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use mpgate_core::{GatewayError, GatewayResult};

/// The `{errcode, errmsg}` pair present in every upstream response.
///
/// A zero code signals success. Both fields default when absent, since
/// the platform omits them on some successful responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Upstream error code; zero means success.
    #[serde(default)]
    pub errcode: i64,
    /// Upstream error message.
    #[serde(default)]
    pub errmsg: String,
}

impl ErrorEnvelope {
    /// Whether the envelope signals success.
    pub fn is_ok(&self) -> bool {
        self.errcode == 0
    }

    /// Convert a non-zero error code into an upstream error.
    ///
    /// Called once per handler after decoding; the decode layer itself
    /// never inspects the code.
    pub fn check(&self) -> GatewayResult<()> {
        if self.errcode == 0 {
            Ok(())
        } else {
            Err(GatewayError::upstream(self.errcode, self.errmsg.clone()))
        }
    }
}

/// An upstream response: the fixed error header plus a typed payload.
///
/// Both parts are flattened from the same JSON object.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// The error header.
    #[serde(flatten)]
    pub error: ErrorEnvelope,
    /// Operation-specific payload fields.
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Check the error header and return the payload on success.
    pub fn into_payload(self) -> GatewayResult<T> {
        self.error.check()?;
        Ok(self.payload)
    }
}

/// Serialize an outbound request payload to the JSON bytes the upstream
/// expects.
pub fn build_request_body<B>(body: &B) -> GatewayResult<Vec<u8>>
where
    B: Serialize + ?Sized,
{
    serde_json::to_vec(body)
        .map_err(|e| GatewayError::serialization(format!("build request body: {e}"), e))
}

/// Decode a response body into the target shape.
///
/// A body that does not match the expected shape is a decode error; the
/// error code inside a well-formed body is NOT inspected here.
pub fn decode_response<T>(path: &str, body: &[u8]) -> GatewayResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body)
        .map_err(|e| GatewayError::decode(format!("{path}: malformed response body: {e}"), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpgate_core::ErrorKind;

    #[derive(Debug, Deserialize)]
    struct TicketPayload {
        ticket: String,
        expire_seconds: i64,
    }

    #[test]
    fn test_envelope_decodes_error_and_payload_from_one_object() {
        let body = br#"{"errcode":0,"errmsg":"ok","ticket":"gQH4","expire_seconds":60}"#;
        let rsp: Envelope<TicketPayload> = decode_response("/cgi-bin/qrcode/create", body).unwrap();
        assert!(rsp.error.is_ok());
        assert_eq!(rsp.payload.ticket, "gQH4");
        assert_eq!(rsp.payload.expire_seconds, 60);
    }

    #[test]
    fn test_envelope_fields_default_when_absent() {
        let body = br#"{"ticket":"gQH4","expire_seconds":60}"#;
        let rsp: Envelope<TicketPayload> = decode_response("/cgi-bin/qrcode/create", body).unwrap();
        assert_eq!(rsp.error, ErrorEnvelope::default());
        assert!(rsp.error.check().is_ok());
    }

    #[test]
    fn test_check_converts_nonzero_code_to_upstream_error() {
        let envelope = ErrorEnvelope {
            errcode: 45009,
            errmsg: "reach max api daily quota limit".to_string(),
        };
        let err = envelope.check().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Upstream);
        assert_eq!(err.code, 45009);
        assert!(err.message.contains("reach max api daily quota limit"));
    }

    #[test]
    fn test_into_payload_refuses_payload_on_error() {
        let body = br#"{"errcode":40001,"errmsg":"invalid credential","ticket":"x","expire_seconds":1}"#;
        let rsp: Envelope<TicketPayload> = decode_response("/cgi-bin/qrcode/create", body).unwrap();
        let err = rsp.into_payload().unwrap_err();
        assert_eq!(err.code, 40001);
    }

    #[test]
    fn test_malformed_body_is_a_decode_error() {
        let err = decode_response::<ErrorEnvelope>("/cgi-bin/menu/get", b"<html>502</html>")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert!(err.message.contains("/cgi-bin/menu/get"));
    }

    #[test]
    fn test_request_body_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct RemarkUpdate {
            openid: String,
            remark: String,
        }
        let req = RemarkUpdate {
            openid: "oABC123".to_string(),
            remark: "regular".to_string(),
        };
        let bytes = build_request_body(&req).unwrap();
        let back: RemarkUpdate = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, req);
    }
}
