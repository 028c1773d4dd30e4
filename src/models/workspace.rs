use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Workspace ("database") del usuario
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DatabaseSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub table_count: u32,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct DatabasesResponse {
    #[serde(default)]
    pub databases: Vec<DatabaseSummary>,
}

/// Metadatos de una tabla subida
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct TableSchema {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// columna → tipo detectado (orden del backend)
    #[serde(default)]
    pub types: Map<String, Value>,
    #[serde(default)]
    pub row_count: u64,
}

impl TableSchema {
    pub fn column_count(&self) -> usize {
        self.types.len()
    }

    /// Tipo de una columna como texto
    pub fn column_type(&self, column: &str) -> String {
        match self.types.get(column) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

/// nombre de tabla → metadatos, en el orden del backend
pub type Schema = serde_json::Map<String, Value>;

/// Vista tipada de un esquema; tablas con metadatos ilegibles se omiten
pub fn schema_tables(schema: &Schema) -> Vec<(String, TableSchema)> {
    schema
        .iter()
        .filter_map(|(name, details)| match serde_json::from_value(details.clone()) {
            Ok(table) => Some((name.clone(), table)),
            Err(e) => {
                log::warn!("⚠️ [SCHEMA] Tabla '{}' con metadatos inválidos: {}", name, e);
                None
            }
        })
        .collect()
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct SelectDatabaseResponse {
    pub name: String,
    #[serde(default)]
    pub schema: Schema,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct UploadResponse {
    #[serde(default)]
    pub schema: Schema,
}

/// Clave foránea detectada entre dos tablas
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Relationship {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct RelationshipsResponse {
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct SelectDatabaseRequest {
    pub id: i64,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct ProjectRequest {
    pub project_id: Option<i64>,
}

/// Fichero elegido por el usuario para subir
#[derive(Clone, PartialEq, Debug)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_tables_keeps_backend_order_and_skips_garbage() {
        let schema: Schema = serde_json::from_value(json!({
            "orders": {"id": 2, "types": {"id": "int", "customer_id": "int"}, "row_count": 120},
            "broken": "not an object",
            "customers": {"id": 1, "filename": "customers.csv", "types": {"id": "int"}, "row_count": 5}
        }))
        .unwrap();

        let tables = schema_tables(&schema);
        let names: Vec<&str> = tables.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["orders", "customers"]);
        assert_eq!(tables[0].1.column_count(), 2);
        assert_eq!(tables[0].1.column_type("customer_id"), "int");
        assert_eq!(tables[1].1.filename.as_deref(), Some("customers.csv"));
    }

    #[test]
    fn database_summary_defaults_table_count() {
        let db: DatabaseSummary = serde_json::from_value(json!({"id": 3, "name": "Sales"})).unwrap();
        assert_eq!(db.table_count, 0);
    }
}
