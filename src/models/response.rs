// ============================================================================
// API RESPONSE - Forma uniforme de todas las respuestas del ApiClient
// ============================================================================
// {success: true, ...payload} | {success: false, error: "..."}
// Todos los llamadores ramifican sobre `success`.
// ============================================================================

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, deserialize_with = "error_text", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// `success` con cualquier tipo JSON: se evalúa como condición de JavaScript
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// `error` que no sea texto se conserva como su JSON
fn error_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl ApiResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            payload: Map::new(),
        }
    }

    /// Cuerpo JSON tal cual; solo objetos son respuestas válidas
    pub fn from_body(body: Value) -> Option<Self> {
        match body {
            Value::Object(_) => serde_json::from_value(body).ok(),
            _ => None,
        }
    }

    /// Mensaje de error para mostrar al usuario
    pub fn error_message(&self, fallback: &str) -> String {
        self.error.clone().unwrap_or_else(|| fallback.to_string())
    }

    /// Payload tipado si `success`, mensaje de error si no
    pub fn into_result<T: DeserializeOwned>(self, fallback: &str) -> Result<T, String> {
        if !self.success {
            return Err(self.error_message(fallback));
        }
        serde_json::from_value(Value::Object(self.payload)).map_err(|e| {
            log::error!("❌ [API] Payload inesperado: {}", e);
            crate::utils::UNEXPECTED_RESPONSE_MESSAGE.to_string()
        })
    }

    /// Éxito sin payload interesante
    pub fn into_unit(self, fallback: &str) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.error_message(fallback))
        }
    }

    /// Cuerpo completo como objeto JSON (incluye `success`/`error` si los hay)
    pub fn to_body(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_serializes_to_uniform_shape() {
        let resp = ApiResponse::failure("Session expired. Please login again.");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"success": false, "error": "Session expired. Please login again."})
        );
    }

    #[test]
    fn body_is_kept_as_is() {
        let body = json!({"success": true, "token": "t1", "user": {"id": 1}});
        let resp = ApiResponse::from_body(body.clone()).unwrap();
        assert!(resp.success);
        assert_eq!(resp.payload.get("token"), Some(&json!("t1")));
        assert_eq!(serde_json::to_value(&resp).unwrap(), body);
    }

    #[test]
    fn odd_success_and_error_types_are_tolerated() {
        let resp = ApiResponse::from_body(json!({"success": false, "error": {"code": 7}})).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some(r#"{"code":7}"#));

        let resp = ApiResponse::from_body(json!({"success": 1, "error": null, "rows": []})).unwrap();
        assert!(resp.success);
        assert_eq!(resp.error, None);
        assert_eq!(resp.payload.get("rows"), Some(&json!([])));

        assert!(!ApiResponse::from_body(json!({"success": ""})).unwrap().success);
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(ApiResponse::from_body(json!([1, 2])).is_none());
        assert!(ApiResponse::from_body(json!("ok")).is_none());
    }

    #[test]
    fn into_result_decodes_payload_or_returns_error() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Token {
            token: String,
        }

        let ok = ApiResponse::from_body(json!({"success": true, "token": "t1"})).unwrap();
        assert_eq!(ok.into_result::<Token>("x"), Ok(Token { token: "t1".to_string() }));

        let err = ApiResponse::from_body(json!({"success": false, "error": "Invalid password."})).unwrap();
        assert_eq!(err.into_result::<Token>("x"), Err("Invalid password.".to_string()));

        let bare = ApiResponse::from_body(json!({"success": false})).unwrap();
        assert_eq!(bare.into_unit("Failed to delete workspace"), Err("Failed to delete workspace".to_string()));
    }
}
