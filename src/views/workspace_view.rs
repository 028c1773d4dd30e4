// ============================================================================
// WORKSPACE VIEW - Tarjetas de workspaces, esquema y relaciones
// ============================================================================
// Renderizado puro a HTML: todo texto interpolado pasa por escape_html /
// escape_attr. Los botones declaran data-action, sin onclick inline.
// ============================================================================

use crate::models::{DatabaseSummary, Relationship, TableSchema};
use crate::utils::{escape_attr, escape_html};

/// Columnas visibles por tarjeta de tabla antes del "+N more columns"
pub const VISIBLE_COLUMNS: usize = 3;

pub const NO_RELATIONSHIPS_TEXT: &str = "No direct links detected yet.";

pub fn render_database_cards(databases: &[DatabaseSummary]) -> String {
    databases.iter().map(render_database_card).collect()
}

fn render_database_card(db: &DatabaseSummary) -> String {
    let name = escape_html(&db.name);
    let name_attr = escape_attr(&db.name);
    format!(
        r#"<div class="bento-card db-card group" data-action="select-db" data-id="{id}">
    <div class="db-card-actions">
        <button class="icon-btn" title="Rename" data-action="rename-db" data-id="{id}" data-name="{name_attr}"><i data-lucide="edit-3"></i></button>
        <button class="icon-btn danger" title="Delete" data-action="delete-db" data-id="{id}"><i data-lucide="trash-2"></i></button>
    </div>
    <div class="db-card-icon"><i data-lucide="database"></i></div>
    <h3 class="db-card-title">{name}</h3>
    <p class="db-card-meta">{tables} Tables Active</p>
    <div class="db-card-footer"><span>Last Active</span><span class="ready">Ready</span></div>
</div>"#,
        id = db.id,
        name = name,
        name_attr = name_attr,
        tables = db.table_count,
    )
}

pub fn render_schema_cards(tables: &[(String, TableSchema)]) -> String {
    tables
        .iter()
        .map(|(name, table)| render_schema_card(name, table))
        .collect()
}

fn render_schema_card(name: &str, table: &TableSchema) -> String {
    let columns: String = table
        .types
        .keys()
        .take(VISIBLE_COLUMNS)
        .map(|column| {
            format!(
                r#"<div class="schema-column"><span><i data-lucide="columns"></i> {}</span><span class="schema-type">{}</span></div>"#,
                escape_html(column),
                escape_html(&table.column_type(column)),
            )
        })
        .collect();

    let more = match table.column_count().saturating_sub(VISIBLE_COLUMNS) {
        0 => String::new(),
        hidden => format!(r#"<div class="schema-more">+{} more columns</div>"#, hidden),
    };

    let name_attr = escape_attr(name);
    format!(
        r#"<div class="schema-card group">
    <div class="schema-card-actions">
        <button class="icon-btn" data-action="preview-table" data-name="{name_attr}"><i data-lucide="eye"></i></button>
        <button class="icon-btn" data-action="rename-table" data-id="{id}" data-name="{name_attr}"><i data-lucide="edit-3"></i></button>
        <button class="icon-btn danger" data-action="delete-table" data-id="{id}"><i data-lucide="trash-2"></i></button>
    </div>
    <div class="schema-card-header">
        <div class="schema-card-icon"><i data-lucide="table"></i></div>
        <div>
            <p class="schema-card-title">{name}</p>
            <p class="schema-card-meta">{rows} Rows</p>
        </div>
    </div>
    <div class="schema-columns">{columns}{more}</div>
</div>"#,
        id = table.id,
        name = escape_html(name),
        name_attr = name_attr,
        rows = table.row_count,
        columns = columns,
        more = more,
    )
}

pub fn render_relationships(relationships: &[Relationship]) -> String {
    if relationships.is_empty() {
        return format!(r#"<p class="relationship-empty">{}</p>"#, NO_RELATIONSHIPS_TEXT);
    }
    relationships
        .iter()
        .map(|r| {
            format!(
                r#"<div class="relationship"><i data-lucide="link-2"></i><span>{}.{} → {}.{}</span></div>"#,
                escape_html(&r.from_table),
                escape_html(&r.from_column),
                escape_html(&r.to_table),
                escape_html(&r.to_column),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(columns: &[&str]) -> TableSchema {
        let types = columns
            .iter()
            .map(|c| (c.to_string(), json!("int")))
            .collect();
        TableSchema {
            id: 10,
            filename: None,
            types,
            row_count: 42,
        }
    }

    #[test]
    fn database_card_escapes_name_and_declares_actions() {
        let html = render_database_cards(&[DatabaseSummary {
            id: 3,
            name: "<script>O'Brien</script>".to_string(),
            table_count: 2,
        }]);
        assert!(html.contains(r#"data-action="select-db" data-id="3""#));
        assert!(html.contains(r#"data-action="delete-db" data-id="3""#));
        assert!(html.contains("&lt;script&gt;O'Brien&lt;/script&gt;"));
        assert!(html.contains(r#"data-name="&lt;script&gt;O&#39;Brien&lt;/script&gt;""#));
        assert!(html.contains("2 Tables Active"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn schema_card_shows_three_columns_and_overflow() {
        let html = render_schema_cards(&[("orders".to_string(), table(&["id", "total", "date", "customer_id", "status"]))]);
        assert!(html.contains("42 Rows"));
        assert!(html.contains("</i> date</span>"));
        assert!(!html.contains("customer_id</span>"));
        assert!(html.contains("+2 more columns"));
        assert!(html.contains(r#"data-action="rename-table" data-id="10" data-name="orders""#));
    }

    #[test]
    fn schema_card_without_overflow() {
        let html = render_schema_cards(&[("t".to_string(), table(&["a", "b"]))]);
        assert!(!html.contains("more columns"));
    }

    #[test]
    fn relationships_or_placeholder() {
        assert!(render_relationships(&[]).contains(NO_RELATIONSHIPS_TEXT));
        let html = render_relationships(&[Relationship {
            from_table: "orders".to_string(),
            from_column: "customer_id".to_string(),
            to_table: "customers".to_string(),
            to_column: "id".to_string(),
        }]);
        assert!(html.contains("orders.customer_id → customers.id"));
    }
}
