// ============================================================================
// CHAT VIEW - Burbujas de usuario/asistente y resultados
// ============================================================================

use crate::models::{ChatReply, Row};
use crate::utils::csv_export::cell_text;
use crate::utils::{escape_attr, escape_html};

pub const TABLE_INTRO: &str = "Here is the data:";
pub const CHART_INTRO: &str = "Generated visualization:";

pub fn render_user_message(text: &str) -> String {
    format!(
        r#"<div class="chat-row user"><div class="user-bubble">{}</div></div>"#,
        escape_html(text)
    )
}

/// Indicador "pensando" mientras se espera la respuesta
pub fn render_thinking(message_id: &str) -> String {
    assistant_shell(
        message_id,
        r#"<div class="thinking"><span></span><span></span><span></span></div>"#,
        "",
    )
}

pub fn render_assistant_reply(message_id: &str, reply: &ChatReply) -> String {
    let (bubble, mut extra) = match reply {
        ChatReply::Text { text, .. } => (escape_html(text), String::new()),
        ChatReply::Table { rows, .. } => (TABLE_INTRO.to_string(), render_table(message_id, rows)),
        ChatReply::Chart { url, .. } => (CHART_INTRO.to_string(), render_chart(url)),
        ChatReply::Error { message } => (format!("Error: {}", escape_html(message)), String::new()),
    };
    if let Some(query) = reply.query() {
        extra.push_str(&render_query_toggle(query));
    }
    assistant_shell(message_id, &bubble, &extra)
}

fn assistant_shell(message_id: &str, bubble: &str, extra: &str) -> String {
    format!(
        r#"<div id="{id}" class="chat-row assistant group">
    <div class="bot-avatar"><i data-lucide="bot"></i></div>
    <div class="chat-content">
        <div class="ai-bubble">{bubble}</div>
        {extra}
    </div>
</div>"#,
        id = escape_attr(message_id),
        bubble = bubble,
        extra = extra,
    )
}

/// Columnas = claves de la primera fila; tabla vacía → nada
fn render_table(message_id: &str, rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&String> = first.keys().collect();

    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape_html(h)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = headers
                .iter()
                .map(|h| format!("<td>{}</td>", escape_html(&cell_text(row.get(h.as_str())))))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        r#"<div class="result-table">
    <div class="result-table-header">
        <span>Result Table</span>
        <button data-action="export-csv" data-id="{id}"><i data-lucide="download"></i> Export CSV</button>
    </div>
    <div class="result-table-scroll">
        <table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>
    </div>
</div>"#,
        id = escape_attr(message_id),
        head = head,
        body = body,
    )
}

fn render_chart(url: &str) -> String {
    let url = escape_attr(url);
    format!(
        r#"<div class="result-chart">
    <div class="chart-frame" data-action="open-image" data-url="{url}">
        <img src="{url}" alt="Data Visualization">
        <span class="chart-hint">Click to Expand</span>
    </div>
    <div class="chart-footer">
        <span>Generated by AIStora</span>
        <button title="Expand" data-action="open-image" data-url="{url}"><i data-lucide="maximize-2"></i></button>
        <a href="{url}" download="chart.png" title="Download"><i data-lucide="download"></i></a>
    </div>
</div>"#,
        url = url,
    )
}

fn render_query_toggle(query: &str) -> String {
    format!(
        r#"<div class="query-toggle"><button data-action="toggle-query"><i data-lucide="code-2"></i> Show Query</button><div class="hidden code-block">{}</div></div>"#,
        escape_html(query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn user_message_is_escaped() {
        let html = render_user_message("<img src=x onerror=alert(1)>");
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn table_reply_renders_header_body_and_export() {
        let reply = ChatReply::Table {
            rows: rows(json!([{"a": 1, "b": 2}])),
            query: Some("SELECT ...".to_string()),
        };
        let html = render_assistant_reply("msg-1", &reply);

        assert!(html.contains(TABLE_INTRO));
        assert!(html.contains("<tr><th>a</th><th>b</th></tr>"));
        assert!(html.contains("<tr><td>1</td><td>2</td></tr>"));
        assert!(html.contains(r#"data-action="export-csv" data-id="msg-1""#));
        assert!(html.contains("Show Query"));
        assert!(html.contains(r#"<div class="hidden code-block">SELECT ...</div>"#));
    }

    #[test]
    fn table_columns_follow_first_row() {
        let reply = ChatReply::Table {
            rows: rows(json!([{"z": 1, "a": null}, {"a": "<b>", "extra": 9}])),
            query: None,
        };
        let html = render_assistant_reply("m", &reply);
        assert!(html.contains("<tr><th>z</th><th>a</th></tr>"));
        assert!(html.contains("<tr><td>1</td><td></td></tr>"));
        assert!(html.contains("<tr><td></td><td>&lt;b&gt;</td></tr>"));
        assert!(!html.contains("extra"));
        assert!(!html.contains("Show Query"));
    }

    #[test]
    fn empty_table_has_no_grid() {
        let reply = ChatReply::Table { rows: Vec::new(), query: None };
        let html = render_assistant_reply("m", &reply);
        assert!(html.contains(TABLE_INTRO));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn chart_reply_has_expand_and_download() {
        let reply = ChatReply::Chart {
            url: "https://charts.example/c.png?a=1&b=2".to_string(),
            query: None,
        };
        let html = render_assistant_reply("m", &reply);
        assert!(html.contains(CHART_INTRO));
        assert!(html.contains(r#"src="https://charts.example/c.png?a=1&amp;b=2""#));
        assert!(html.contains(r#"data-action="open-image""#));
        assert!(html.contains(r#"download="chart.png""#));
    }

    #[test]
    fn text_and_error_replies() {
        let text = ChatReply::Text { text: "42 rows".to_string(), query: None };
        assert!(render_assistant_reply("m", &text).contains(r#"<div class="ai-bubble">42 rows</div>"#));

        let error = ChatReply::Error { message: "Project access denied or empty.".to_string() };
        assert!(render_assistant_reply("m", &error).contains("Error: Project access denied or empty."));
    }

    #[test]
    fn thinking_indicator_carries_message_id() {
        assert!(render_thinking("msg-7").contains(r#"id="msg-7""#));
    }
}
