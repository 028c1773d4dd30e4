// ============================================================================
// WORKSPACE VIEWMODEL - Workspaces, subida de ficheros y esquema
// ============================================================================

use crate::models::*;
use crate::router::{Router, Screen};
use crate::services::ApiClient;
use crate::state::AppContext;
use crate::utils::UNEXPECTED_RESPONSE_MESSAGE;

pub const NAME_REQUIRED_MESSAGE: &str = "Please enter a workspace name.";
pub const NO_SCHEMA_MESSAGE: &str = "No schema available to export.";
pub const NO_ACTIVE_WORKSPACE_MESSAGE: &str = "Please select a workspace first.";

const CREATE_FAILED: &str = "Failed to create workspace";
const RENAME_FAILED: &str = "Failed to rename workspace";
const DELETE_FAILED: &str = "Failed to delete workspace";

/// Resultado de una subida: el esquema nuevo y la detección de relaciones que la sigue
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub tables: Vec<(String, TableSchema)>,
    pub relationships: Result<Vec<Relationship>, String>,
}

/// Esquema serializado listo para descargar
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaExport {
    pub filename: String,
    pub json: String,
}

#[derive(Clone)]
pub struct WorkspaceViewModel {
    ctx: AppContext,
    api: ApiClient,
    router: Router,
}

impl WorkspaceViewModel {
    pub fn new(ctx: AppContext, api: ApiClient, router: Router) -> Self {
        Self { ctx, api, router }
    }

    pub fn active_id(&self) -> Option<i64> {
        self.ctx.workspace.active_id()
    }

    pub fn active_name(&self) -> Option<String> {
        self.ctx.workspace.name()
    }

    /// Tablas del esquema activo (para renderizar)
    pub fn tables(&self) -> Vec<(String, TableSchema)> {
        schema_tables(&self.ctx.workspace.schema())
    }

    pub async fn load_databases(&self) -> Result<Vec<DatabaseSummary>, String> {
        let list: DatabasesResponse = self
            .api
            .list_databases()
            .await
            .into_result(UNEXPECTED_RESPONSE_MESSAGE)?;
        log::info!("🗄️ [WORKSPACE] {} workspaces", list.databases.len());
        Ok(list.databases)
    }

    pub async fn create_database(&self, name: &str) -> Result<(), String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NAME_REQUIRED_MESSAGE.to_string());
        }
        log::info!("➕ [WORKSPACE] Creando '{}'", name);
        self.api.create_database(name).await.into_unit(CREATE_FAILED)
    }

    /// Devuelve `Ok(false)` si no había nada que renombrar
    pub async fn rename_database(&self, id: i64, current: &str, new_name: &str) -> Result<bool, String> {
        if new_name.trim().is_empty() || new_name == current {
            return Ok(false);
        }
        self.api
            .rename_database(id, new_name.trim())
            .await
            .into_unit(RENAME_FAILED)?;
        Ok(true)
    }

    pub async fn delete_database(&self, id: i64) -> Result<(), String> {
        log::info!("🗑️ [WORKSPACE] Eliminando workspace {}", id);
        self.api.delete_database(id).await.into_unit(DELETE_FAILED)?;
        if self.active_id() == Some(id) {
            self.ctx.workspace.reset();
        }
        Ok(())
    }

    /// Activa el workspace y abre el uploader con su esquema
    pub async fn select_database(&self, id: i64) -> Result<String, String> {
        let selected: SelectDatabaseResponse = self
            .api
            .select_database(id)
            .await
            .into_result(UNEXPECTED_RESPONSE_MESSAGE)?;

        log::info!("📂 [WORKSPACE] Activo: {} ({} tablas)", selected.name, selected.schema.len());
        self.ctx
            .workspace
            .activate(id, selected.name.clone(), selected.schema);
        self.router.navigate(Screen::Uploader);
        Ok(selected.name)
    }

    /// Sube ficheros al workspace activo; sin ficheros no hace nada
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<Option<UploadOutcome>, String> {
        if files.is_empty() {
            return Ok(None);
        }
        let id = self
            .active_id()
            .ok_or_else(|| NO_ACTIVE_WORKSPACE_MESSAGE.to_string())?;

        log::info!("📤 [WORKSPACE] Subiendo {} ficheros a {}", files.len(), id);
        let uploaded: UploadResponse = self
            .api
            .upload_files(id, files)
            .await
            .into_result(UNEXPECTED_RESPONSE_MESSAGE)?;
        self.ctx.workspace.set_schema(uploaded.schema);

        let relationships = self.detect_relationships().await;
        Ok(Some(UploadOutcome {
            tables: self.tables(),
            relationships,
        }))
    }

    pub async fn detect_relationships(&self) -> Result<Vec<Relationship>, String> {
        let found: RelationshipsResponse = self
            .api
            .detect_relationships(self.active_id())
            .await
            .into_result(UNEXPECTED_RESPONSE_MESSAGE)?;
        log::info!("🔗 [WORKSPACE] {} relaciones detectadas", found.relationships.len());
        Ok(found.relationships)
    }

    /// Devuelve `Ok(false)` si el nombre está vacío
    pub async fn rename_table(&self, id: i64, new_name: &str) -> Result<bool, String> {
        if new_name.is_empty() {
            return Ok(false);
        }
        self.api
            .rename_table(id, new_name)
            .await
            .into_unit(UNEXPECTED_RESPONSE_MESSAGE)?;
        self.reselect().await?;
        Ok(true)
    }

    pub async fn delete_table(&self, id: i64) -> Result<(), String> {
        self.api
            .delete_table(id)
            .await
            .into_unit(UNEXPECTED_RESPONSE_MESSAGE)?;
        self.reselect().await
    }

    /// Refresca el esquema del workspace activo
    async fn reselect(&self) -> Result<(), String> {
        match self.active_id() {
            Some(id) => self.select_database(id).await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// JSON indentado del esquema activo
    pub fn export_schema(&self) -> Result<SchemaExport, String> {
        let schema = self.ctx.workspace.schema();
        if schema.is_empty() {
            return Err(NO_SCHEMA_MESSAGE.to_string());
        }
        let json = serde_json::to_string_pretty(&schema).map_err(|e| e.to_string())?;
        Ok(SchemaExport {
            filename: format!("schema_export_{}.json", chrono::Utc::now().timestamp_millis()),
            json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Method, RequestBody};
    use crate::test_support::{block_on, Harness};
    use serde_json::json;

    const SELECT_BODY: &str = r#"{"success": true, "name": "Sales", "schema": {
        "orders": {"id": 10, "types": {"id": "int", "total": "float"}, "row_count": 2}
    }}"#;

    fn viewmodel(h: &Harness) -> WorkspaceViewModel {
        WorkspaceViewModel::new(h.ctx.clone(), h.api.clone(), h.router.clone())
    }

    #[test]
    fn load_databases_decodes_list() {
        let h = Harness::new();
        h.transport.respond(
            200,
            r#"{"success": true, "databases": [{"id": 1, "name": "Sales", "table_count": 3}]}"#,
        );
        let list = block_on(viewmodel(&h).load_databases()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].table_count, 3);
    }

    #[test]
    fn create_requires_a_name() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        assert_eq!(block_on(vm.create_database("  ")), Err(NAME_REQUIRED_MESSAGE.to_string()));
        assert!(h.transport.requests().is_empty());

        h.transport.respond(500, r#"{"success": false}"#);
        assert_eq!(block_on(vm.create_database("Sales")), Err(CREATE_FAILED.to_string()));
    }

    #[test]
    fn rename_skips_unchanged_names() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        assert_eq!(block_on(vm.rename_database(1, "Sales", "Sales")), Ok(false));
        assert_eq!(block_on(vm.rename_database(1, "Sales", "   ")), Ok(false));
        assert!(h.transport.requests().is_empty());

        h.transport.respond(200, r#"{"success": true}"#);
        assert_eq!(block_on(vm.rename_database(1, "Sales", " Revenue ")), Ok(true));
        let request = h.transport.last_request().unwrap();
        assert_eq!((request.method, request.url.as_str()), (Method::Put, "/api/databases/1"));
        assert_eq!(request.body, Some(RequestBody::Json(json!({"name": "Revenue"}))));
    }

    #[test]
    fn select_activates_and_opens_uploader() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        h.transport.respond(200, SELECT_BODY);

        assert_eq!(block_on(vm.select_database(4)), Ok("Sales".to_string()));
        assert_eq!(vm.active_id(), Some(4));
        assert_eq!(vm.tables()[0].0, "orders");
        assert_eq!(h.router.current(), Some(Screen::Uploader));
    }

    #[test]
    fn failed_select_keeps_previous_workspace() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        h.transport.respond(404, r#"{"success": false, "error": "Database not found"}"#);
        assert_eq!(block_on(vm.select_database(4)), Err("Database not found".to_string()));
        assert_eq!(vm.active_id(), None);
        assert!(h.host.history().is_empty());
    }

    #[test]
    fn delete_active_workspace_resets_state() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        h.ctx.workspace.activate(4, "Sales".to_string(), Default::default());
        h.transport.respond(200, r#"{"success": true}"#);
        assert_eq!(block_on(vm.delete_database(4)), Ok(()));
        assert_eq!(vm.active_id(), None);
    }

    #[test]
    fn upload_stores_schema_then_detects_relationships() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        h.ctx.workspace.activate(4, "Sales".to_string(), Default::default());
        h.transport.respond(200, r#"{"success": true, "schema": {"customers": {"id": 11, "types": {"id": "int"}, "row_count": 5}}}"#);
        h.transport.respond(
            200,
            r#"{"success": true, "relationships": [{"from_table": "orders", "from_column": "customer_id", "to_table": "customers", "to_column": "id"}]}"#,
        );

        let file = UploadFile {
            name: "customers.csv".to_string(),
            content_type: "text/csv".to_string(),
            bytes: b"id\n1\n".to_vec(),
        };
        let outcome = block_on(vm.upload(vec![file])).unwrap().unwrap();

        assert_eq!(outcome.tables[0].0, "customers");
        assert_eq!(outcome.relationships.unwrap()[0].to_table, "customers");
        assert_eq!(h.transport.urls(), vec!["/api/upload", "/api/detect-relationships"]);
        assert_eq!(
            h.transport.last_request().unwrap().body,
            Some(RequestBody::Json(json!({"project_id": 4})))
        );
    }

    #[test]
    fn upload_without_files_or_workspace() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        assert_eq!(block_on(vm.upload(Vec::new())), Ok(None));

        let file = UploadFile {
            name: "a.csv".to_string(),
            content_type: "text/csv".to_string(),
            bytes: Vec::new(),
        };
        assert_eq!(block_on(vm.upload(vec![file])), Err(NO_ACTIVE_WORKSPACE_MESSAGE.to_string()));
        assert!(h.transport.requests().is_empty());
    }

    #[test]
    fn table_changes_reselect_active_workspace() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        h.ctx.workspace.activate(4, "Sales".to_string(), Default::default());

        h.transport.respond(200, r#"{"success": true}"#);
        h.transport.respond(200, SELECT_BODY);
        assert_eq!(block_on(vm.rename_table(10, "purchases")), Ok(true));
        assert_eq!(h.transport.urls(), vec!["/api/tables/10", "/api/databases/select"]);

        h.transport.respond(200, r#"{"success": true}"#);
        h.transport.respond(200, SELECT_BODY);
        assert_eq!(block_on(vm.delete_table(10)), Ok(()));
        assert_eq!(h.transport.requests()[2].method, Method::Delete);

        assert_eq!(block_on(vm.rename_table(10, "")), Ok(false));
        assert_eq!(h.transport.requests().len(), 4);
    }

    #[test]
    fn export_requires_schema() {
        let h = Harness::new();
        let vm = viewmodel(&h);
        assert_eq!(vm.export_schema(), Err(NO_SCHEMA_MESSAGE.to_string()));

        let schema: Schema = serde_json::from_value(json!({"orders": {"id": 10}})).unwrap();
        h.ctx.workspace.set_schema(schema);
        let export = vm.export_schema().unwrap();
        assert!(export.filename.starts_with("schema_export_"));
        assert!(export.filename.ends_with(".json"));
        assert_eq!(export.json, "{\n  \"orders\": {\n    \"id\": 10\n  }\n}");
    }
}
