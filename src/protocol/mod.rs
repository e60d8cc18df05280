//! JSON messages exchanged with the native notes host.
//!
//! There is no request id: a response is matched to the pending request by `mode` alone.

use crate::error::{PopupError, PopupResult};
use crate::profile::ProfileKey;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HostRequest {
    Read { profile: ProfileKey },
    Write { profile: ProfileKey, text: String },
}

impl HostRequest {
    pub fn read(profile: &ProfileKey) -> Self {
        Self::Read {
            profile: profile.clone(),
        }
    }

    pub fn write(profile: &ProfileKey, text: &str) -> Self {
        Self::Write {
            profile: profile.clone(),
            text: text.to_string(),
        }
    }

    pub fn profile(&self) -> &ProfileKey {
        match self {
            Self::Read { profile } | Self::Write { profile, .. } => profile,
        }
    }

    pub fn to_json(&self) -> PopupResult<String> {
        serde_json::to_string(self).map_err(PopupError::protocol)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReadPayload {
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WritePayload {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HostResponse {
    Read { payload: ReadPayload },
    Write { payload: WritePayload },
    /// Any other `mode`; logged and ignored.
    #[serde(other)]
    Unknown,
}

impl HostResponse {
    pub fn from_json(json: &str) -> PopupResult<Self> {
        serde_json::from_str(json).map_err(PopupError::protocol)
    }

    pub fn read(text: Option<&str>) -> Self {
        Self::Read {
            payload: ReadPayload {
                text: text.map(str::to_string),
            },
        }
    }

    pub fn write(success: bool) -> Self {
        Self::Write {
            payload: WritePayload { success },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::extract;

    fn jdoe() -> ProfileKey {
        extract("/in/jdoe/").expect("profile path should match")
    }

    #[test]
    fn test_read_request_contract_serialize() {
        let v = serde_json::to_value(HostRequest::read(&jdoe())).expect("should serialize");
        assert_eq!(v, serde_json::json!({"profile": "/in/jdoe/", "mode": "read"}));
    }

    #[test]
    fn test_write_request_contract_serialize() {
        let v = serde_json::to_value(HostRequest::write(&jdoe(), "Met at RustConf"))
            .expect("should serialize");
        assert_eq!(
            v,
            serde_json::json!({"profile": "/in/jdoe/", "text": "Met at RustConf", "mode": "write"})
        );
    }

    #[test]
    fn test_read_response_contract_deserialize() {
        let parsed = HostResponse::from_json(r#"{"mode":"read","payload":{"text":"Great contact"}}"#)
            .expect("read response should parse");
        assert_eq!(parsed, HostResponse::read(Some("Great contact")));

        let null_text = HostResponse::from_json(r#"{"mode":"read","payload":{"text":null}}"#)
            .expect("null text should parse");
        assert_eq!(null_text, HostResponse::read(None));
    }

    #[test]
    fn test_write_response_contract_deserialize() {
        let parsed = HostResponse::from_json(r#"{"payload":{"success":false},"mode":"write"}"#)
            .expect("write response should parse");
        assert_eq!(parsed, HostResponse::write(false));
    }

    #[test]
    fn test_unknown_mode_is_not_an_error() {
        let parsed = HostResponse::from_json(r#"{"mode":"ping","payload":{}}"#)
            .expect("unknown mode should still parse");
        assert_eq!(parsed, HostResponse::Unknown);
    }

    #[test]
    fn test_missing_mode_is_a_protocol_error() {
        let err = HostResponse::from_json(r#"{"payload":{"text":"x"}}"#)
            .expect_err("mode is required");
        assert_eq!(err.kind, crate::error::PopupErrorKind::Protocol);
    }
}
