use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::*;

/// Event pushed by the host to subscribed applications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BridgeEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    CheckNativeAdsResult { preloaded: bool },
    CheckNativeAdsFailed(PlatformFailure),
    Other(String),
}

impl BridgeEvent {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn classify(&self) -> EventKind {
        match self.kind.as_str() {
            "VKWebAppCheckNativeAdsResult" => EventKind::CheckNativeAdsResult {
                preloaded: self
                    .data
                    .get("result")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
            "VKWebAppCheckNativeAdsFailed" => {
                match serde_json::from_value(self.data.clone()) {
                    Ok(failure) => EventKind::CheckNativeAdsFailed(failure),
                    Err(_) => EventKind::Other(self.kind.clone()),
                }
            }
            other => EventKind::Other(other.to_owned()),
        }
    }

    /// Writes the event to the log. Ad check outcomes are reported at info,
    /// failures at warn and everything else at debug.
    pub fn log(&self) {
        match self.classify() {
            EventKind::CheckNativeAdsResult { preloaded: true } => {
                log::info!("Ad check passed, preloaded material available")
            }
            EventKind::CheckNativeAdsResult { preloaded: false } => {
                log::info!("Ad check passed, no ads")
            }
            EventKind::CheckNativeAdsFailed(failure) => {
                log::warn!("Ad check failed: {} {}", failure.error_type, failure.error_data)
            }
            EventKind::Other(kind) => log::debug!("Bridge event {}: {}", kind, self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_result_event() {
        let event = BridgeEvent::from_json(
            r#"{"type":"VKWebAppCheckNativeAdsResult","data":{"result":true}}"#,
        )
        .unwrap();
        assert_eq!(
            event.classify(),
            EventKind::CheckNativeAdsResult { preloaded: true }
        );
    }

    #[test]
    fn check_failed_event() {
        let event = BridgeEvent {
            kind: "VKWebAppCheckNativeAdsFailed".into(),
            data: json!({ "error_type": "client_error", "error_data": { "reason": "No ads" } }),
        };
        assert_eq!(
            event.classify(),
            EventKind::CheckNativeAdsFailed(PlatformFailure {
                error_type: "client_error".into(),
                error_data: json!({ "reason": "No ads" }),
            })
        );
    }

    #[test]
    fn unknown_event_without_data() {
        let event = BridgeEvent::from_json(r#"{"type":"VKWebAppUpdateConfig"}"#).unwrap();
        assert_eq!(event.data, Value::Null);
        assert_eq!(
            event.classify(),
            EventKind::Other("VKWebAppUpdateConfig".into())
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            BridgeEvent::from_json("{}"),
            Err(BridgeError::Decode(_))
        ));
    }
}
