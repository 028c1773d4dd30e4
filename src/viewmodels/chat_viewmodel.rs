// ============================================================================
// CHAT VIEWMODEL - Preguntas en lenguaje natural sobre el workspace activo
// ============================================================================

use crate::models::ChatReply;
use crate::services::ApiClient;
use crate::state::AppContext;

#[derive(Clone)]
pub struct ChatViewModel {
    ctx: AppContext,
    api: ApiClient,
}

impl ChatViewModel {
    pub fn new(ctx: AppContext, api: ApiClient) -> Self {
        Self { ctx, api }
    }

    /// `None` si el texto está vacío; si no, la respuesta decodificada
    pub async fn send(&self, text: &str) -> Option<ChatReply> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        let project_id = self.ctx.workspace.active_id();
        log::info!("💬 [CHAT] Pregunta sobre workspace {:?}", project_id);
        let reply = self.api.chat(query, project_id).await;
        if let ChatReply::Error { message } = &reply {
            log::warn!("⚠️ [CHAT] {}", message);
        }
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RequestBody;
    use crate::test_support::{block_on, Harness};
    use serde_json::json;

    #[test]
    fn blank_input_sends_nothing() {
        let h = Harness::new();
        let vm = ChatViewModel::new(h.ctx.clone(), h.api.clone());
        assert_eq!(block_on(vm.send("  \n ")), None);
        assert!(h.transport.requests().is_empty());
    }

    #[test]
    fn sends_trimmed_query_with_active_project() {
        let h = Harness::new();
        let vm = ChatViewModel::new(h.ctx.clone(), h.api.clone());
        h.ctx.workspace.activate(4, "Sales".to_string(), Default::default());
        h.transport.respond(200, r#"{"type": "text", "data": "12", "query": "len(df)"}"#);

        let reply = block_on(vm.send(" how many orders? ")).unwrap();

        assert_eq!(
            reply,
            ChatReply::Text { text: "12".to_string(), query: Some("len(df)".to_string()) }
        );
        assert_eq!(
            h.transport.last_request().unwrap().body,
            Some(RequestBody::Json(json!({"query": "how many orders?", "project_id": 4})))
        );
    }

    #[test]
    fn expired_session_becomes_error_reply() {
        let h = Harness::new();
        let vm = ChatViewModel::new(h.ctx.clone(), h.api.clone());
        h.ctx.session.set_token("t1").unwrap();
        h.transport.respond(401, "{}");

        let reply = block_on(vm.send("hi")).unwrap();
        assert_eq!(
            reply,
            ChatReply::Error { message: "Session expired. Please login again.".to_string() }
        );
        assert!(!h.ctx.session.is_authenticated());
    }
}
