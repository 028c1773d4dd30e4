// ============================================================================
// CHAT - Respuesta del endpoint /api/chat como unión etiquetada
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::csv_export::cell_text;
use crate::utils::UNEXPECTED_RESPONSE_MESSAGE;

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct ChatRequest {
    pub query: String,
    pub project_id: Option<i64>,
}

/// Fila de una respuesta tabular (columnas en orden del backend)
pub type Row = Map<String, Value>;

#[derive(Clone, PartialEq, Debug)]
pub enum ChatReply {
    Text { text: String, query: Option<String> },
    Table { rows: Vec<Row>, query: Option<String> },
    Chart { url: String, query: Option<String> },
    Error { message: String },
}

/// Forma cruda del backend: `{type, data, query}`
#[derive(Deserialize)]
struct RawChatReply {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    query: Option<String>,
}

impl ChatReply {
    /// Decodifica el cuerpo de /api/chat. Nunca falla: lo irreconocible es `Error`.
    pub fn from_body(body: &Map<String, Value>) -> Self {
        let raw: RawChatReply = match serde_json::from_value(Value::Object(body.clone())) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("⚠️ [CHAT] Respuesta sin discriminante 'type': {}", e);
                return ChatReply::Error {
                    message: UNEXPECTED_RESPONSE_MESSAGE.to_string(),
                };
            }
        };

        match raw.kind.as_str() {
            "text" => ChatReply::Text {
                text: cell_text(Some(&raw.data)),
                query: raw.query,
            },
            "table" => ChatReply::Table {
                rows: into_rows(raw.data),
                query: raw.query,
            },
            "chart" => ChatReply::Chart {
                url: cell_text(Some(&raw.data)),
                query: raw.query,
            },
            "error" => ChatReply::Error {
                message: cell_text(Some(&raw.data)),
            },
            other => {
                log::warn!("⚠️ [CHAT] Tipo de respuesta desconocido: {}", other);
                ChatReply::Error {
                    message: UNEXPECTED_RESPONSE_MESSAGE.to_string(),
                }
            }
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            ChatReply::Text { query, .. }
            | ChatReply::Table { query, .. }
            | ChatReply::Chart { query, .. } => query.as_deref(),
            ChatReply::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ChatReply::Error { .. })
    }
}

/// Listas de escalares se muestran como una columna `value`
fn into_rows(data: Value) -> Vec<Row> {
    match data {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => map,
                scalar => {
                    let mut row = Map::new();
                    row.insert("value".to_string(), scalar);
                    row
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            let mut row = Map::new();
            row.insert("value".to_string(), other);
            vec![row]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_table_reply() {
        let reply = ChatReply::from_body(&body(json!({
            "type": "table",
            "data": [{"a": 1, "b": 2}],
            "query": "SELECT ..."
        })));
        match &reply {
            ChatReply::Table { rows, query } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].get("a"), Some(&json!(1)));
                assert_eq!(query.as_deref(), Some("SELECT ..."));
            }
            other => panic!("expected table, got {:?}", other),
        }
        assert_eq!(reply.query(), Some("SELECT ..."));
    }

    #[test]
    fn decodes_text_chart_and_error() {
        assert_eq!(
            ChatReply::from_body(&body(json!({"type": "text", "data": "42", "query": "len(df)"}))),
            ChatReply::Text { text: "42".to_string(), query: Some("len(df)".to_string()) }
        );
        assert_eq!(
            ChatReply::from_body(&body(json!({"type": "chart", "data": "https://charts.example/c.png"}))),
            ChatReply::Chart { url: "https://charts.example/c.png".to_string(), query: None }
        );
        let err = ChatReply::from_body(&body(json!({"type": "error", "data": "Missing parameters"})));
        assert_eq!(err, ChatReply::Error { message: "Missing parameters".to_string() });
        assert!(err.is_error());
        assert_eq!(err.query(), None);
    }

    #[test]
    fn scalar_lists_become_value_column() {
        let reply = ChatReply::from_body(&body(json!({"type": "table", "data": [1, 2]})));
        match reply {
            ChatReply::Table { rows, .. } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1].get("value"), Some(&json!(2)));
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn unknown_or_missing_type_is_an_error() {
        assert!(ChatReply::from_body(&body(json!({"type": "video", "data": "x"}))).is_error());
        assert!(ChatReply::from_body(&body(json!({"data": "x"}))).is_error());
    }
}
