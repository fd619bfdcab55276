use api_smoke_macros::FromBytes;
use serde::{Deserialize, Serialize};

/// The body returned by the health endpoint, kept verbatim.
#[derive(Deserialize, Serialize, FromBytes, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct HealthResponse(pub serde_json::Value);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_json_body_is_rejected() {
        assert!(matches!(
            HealthResponse::from_slice(b"OK"),
            Err(crate::Error::JsonParse(_))
        ));
    }

    #[test]
    fn any_json_body_is_kept_verbatim() {
        let health = HealthResponse::from_slice(br#"{"status":"ok","ollama":"connected"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&health).unwrap(),
            r#"{"status":"ok","ollama":"connected"}"#
        );
    }
}
