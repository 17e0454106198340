use std::{
    collections::HashMap,
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::core::{model::ProjectId, store::ProjectStore};

pub const DEFAULT_ROW_PREVIEW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub project_id: ProjectId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub tables: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDto {
    pub table_id: i64,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDto {
    pub column_id: i64,
    pub table_id: i64,
    pub name: String,
    pub data_type: String,
    pub is_primary: bool,
    pub is_nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDto {
    pub row_id: i64,
    pub table_id: i64,
    /// Row cells as a JSON object, keyed by column name.
    pub data: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl RowDto {
    pub fn values(&self) -> serde_json::Result<serde_json::Map<String, serde_json::Value>> {
        serde_json::from_str(&self.data)
    }
}

/// Backend operations behind the project detail page.
///
/// Mirrors the REST surface:
/// `GET /projects/{id}`, `GET /projects/{id}/tables`, `POST /tables`,
/// `PUT /tables/{id}`, `DELETE /tables/{id}`, `GET /tables/{id}/columns`,
/// `GET /tables/{id}/rows?take=N`.
pub trait ProjectDetailBackend {
    fn get_project(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = anyhow::Result<ProjectDto>>;
    fn list_tables(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = anyhow::Result<Vec<TableDto>>>;
    fn create_table(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> impl Future<Output = anyhow::Result<TableDto>>;
    /// `Ok(None)` when no table has that id.
    fn rename_table(
        &self,
        table_id: i64,
        name: &str,
    ) -> impl Future<Output = anyhow::Result<Option<TableDto>>>;
    fn delete_table(&self, table_id: i64) -> impl Future<Output = anyhow::Result<()>>;
    fn list_columns(&self, table_id: i64) -> impl Future<Output = anyhow::Result<Vec<ColumnDto>>>;
    fn list_rows(
        &self,
        table_id: i64,
        take: usize,
    ) -> impl Future<Output = anyhow::Result<Vec<RowDto>>>;
}

/// Artificial round-trip times of the in-memory backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub read: Duration,
    pub write: Duration,
    pub preview: Duration,
}

impl MockLatency {
    pub fn uniform(delay: Duration) -> Self {
        Self {
            read: delay,
            write: delay,
            preview: delay,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(150),
            write: Duration::from_millis(200),
            preview: Duration::from_millis(120),
        }
    }
}

/// Name of the demo project that comes with fixture tables.
pub const FIXTURE_PROJECT_NAME: &str = "Sales Analytics";

#[derive(Debug, Default)]
struct MockData {
    tables: Vec<TableDto>,
    columns: HashMap<i64, Vec<ColumnDto>>,
    rows: HashMap<i64, Vec<RowDto>>,
    next_table_id: i64,
}

impl MockData {
    fn table_count(&self, project_id: ProjectId) -> u32 {
        let count = self.tables.iter().filter(|t| t.project_id == project_id).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

/// In-memory stand-in for the REST backend.
///
/// Projects are the ones held by the [`ProjectStore`] it serves, so every
/// dashboard row has a detail page. Tables, columns and rows live here.
/// Clones share the same data.
#[derive(Debug, Clone)]
pub struct MockBackend {
    store: ProjectStore,
    data: Arc<Mutex<MockData>>,
    latency: MockLatency,
    fail_next: Arc<AtomicBool>,
}

impl MockBackend {
    pub fn new(store: ProjectStore, latency: MockLatency) -> Self {
        Self {
            store,
            data: Arc::new(Mutex::new(MockData {
                next_table_id: 1,
                ..MockData::default()
            })),
            latency,
            fail_next: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Backend over `store` with the fixture tables attached to the project
    /// named [`FIXTURE_PROJECT_NAME`], when the store has one.
    pub fn seeded(store: ProjectStore, latency: MockLatency) -> Self {
        let fixture_project = store
            .list()
            .iter()
            .find(|p| p.name == FIXTURE_PROJECT_NAME)
            .map(|p| p.id);
        let backend = Self::new(store, latency);
        let Some(project_id) = fixture_project else {
            return backend;
        };
        let now = OffsetDateTime::now_utc();
        let column = |column_id, table_id, name: &str, data_type: &str, is_primary| ColumnDto {
            column_id,
            table_id,
            name: name.to_string(),
            data_type: data_type.to_string(),
            is_primary,
            is_nullable: false,
        };
        let row = |row_id, table_id, data: serde_json::Value| RowDto {
            row_id,
            table_id,
            data: data.to_string(),
            created_at: now,
        };
        {
            let mut data = backend.lock();
            data.tables = vec![
                TableDto {
                    table_id: 101,
                    project_id,
                    name: "Products".to_string(),
                    created_at: now,
                },
                TableDto {
                    table_id: 102,
                    project_id,
                    name: "Orders".to_string(),
                    created_at: now,
                },
            ];
            data.columns.insert(
                101,
                vec![
                    column(1, 101, "ProductId", "int", true),
                    column(2, 101, "Name", "text", false),
                    column(3, 101, "Price", "number", false),
                ],
            );
            data.columns.insert(
                102,
                vec![
                    column(4, 102, "OrderId", "int", true),
                    column(5, 102, "ProductId", "int", false),
                    column(6, 102, "Qty", "number", false),
                ],
            );
            data.rows.insert(
                101,
                vec![
                    row(11, 101, serde_json::json!({"ProductId": 1, "Name": "Pen", "Price": 15})),
                    row(12, 101, serde_json::json!({"ProductId": 2, "Name": "Book", "Price": 80})),
                ],
            );
            data.rows.insert(
                102,
                vec![row(
                    21,
                    102,
                    serde_json::json!({"OrderId": 9001, "ProductId": 1, "Qty": 2}),
                )],
            );
            data.next_table_id = 103;
        }
        backend
    }

    /// Makes the next call fail, as a dropped connection would.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockData> {
        // A panic while holding the lock cannot leave the mock data half-written.
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn round_trip(&self, delay: Duration, operation: &str) -> anyhow::Result<()> {
        tokio::time::sleep(delay).await;
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(anyhow!("{operation} failed: backend unavailable"));
        }
        debug!(operation, "mock backend call");
        Ok(())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::seeded(ProjectStore::seeded(), MockLatency::default())
    }
}

impl ProjectDetailBackend for MockBackend {
    async fn get_project(&self, project_id: ProjectId) -> anyhow::Result<ProjectDto> {
        self.round_trip(self.latency.read, "get_project").await?;
        let project = self
            .store
            .get(project_id)
            .ok_or_else(|| anyhow!("Project {project_id} not found"))?;
        Ok(ProjectDto {
            project_id,
            name: project.name,
            updated_at: project.updated_at,
            tables: self.lock().table_count(project_id),
        })
    }

    async fn list_tables(&self, project_id: ProjectId) -> anyhow::Result<Vec<TableDto>> {
        self.round_trip(self.latency.read, "list_tables").await?;
        Ok(self
            .lock()
            .tables
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_table(&self, project_id: ProjectId, name: &str) -> anyhow::Result<TableDto> {
        self.round_trip(self.latency.write, "create_table").await?;
        if self.store.get(project_id).is_none() {
            return Err(anyhow!("Project {project_id} not found"));
        }
        let mut data = self.lock();
        let table = TableDto {
            table_id: data.next_table_id,
            project_id,
            name: name.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        data.next_table_id += 1;
        data.tables.insert(0, table.clone());
        data.columns.insert(table.table_id, Vec::new());
        data.rows.insert(table.table_id, Vec::new());
        Ok(table)
    }

    async fn rename_table(&self, table_id: i64, name: &str) -> anyhow::Result<Option<TableDto>> {
        self.round_trip(self.latency.read, "rename_table").await?;
        let mut data = self.lock();
        Ok(data
            .tables
            .iter_mut()
            .find(|t| t.table_id == table_id)
            .map(|table| {
                table.name = name.to_string();
                table.clone()
            }))
    }

    async fn delete_table(&self, table_id: i64) -> anyhow::Result<()> {
        self.round_trip(self.latency.read, "delete_table").await?;
        let mut data = self.lock();
        let Some(index) = data.tables.iter().position(|t| t.table_id == table_id) else {
            return Ok(());
        };
        data.tables.remove(index);
        data.columns.remove(&table_id);
        data.rows.remove(&table_id);
        Ok(())
    }

    async fn list_columns(&self, table_id: i64) -> anyhow::Result<Vec<ColumnDto>> {
        self.round_trip(self.latency.preview, "list_columns").await?;
        Ok(self.lock().columns.get(&table_id).cloned().unwrap_or_default())
    }

    async fn list_rows(&self, table_id: i64, take: usize) -> anyhow::Result<Vec<RowDto>> {
        self.round_trip(self.latency.preview, "list_rows").await?;
        Ok(self
            .lock()
            .rows
            .get(&table_id)
            .map(|rows| rows.iter().take(take).cloned().collect())
            .unwrap_or_default())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetailError {
    #[error("Please enter a table name.")]
    BlankName,
}

/// Read model of the project detail page.
///
/// Every backend failure leaves the loaded data as it was and records a
/// message in [`ProjectDetail::error`] for the page to show.
#[derive(Debug)]
pub struct ProjectDetail<B> {
    backend: B,
    project_id: ProjectId,
    project: Option<ProjectDto>,
    tables: Vec<TableDto>,
    selected_table: Option<i64>,
    columns: Vec<ColumnDto>,
    rows: Vec<RowDto>,
    error: Option<String>,
}

impl<B: ProjectDetailBackend> ProjectDetail<B> {
    pub fn new(backend: B, project_id: ProjectId) -> Self {
        Self {
            backend,
            project_id,
            project: None,
            tables: Vec::new(),
            selected_table: None,
            columns: Vec::new(),
            rows: Vec::new(),
            error: None,
        }
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn project(&self) -> Option<&ProjectDto> {
        self.project.as_ref()
    }

    pub fn tables(&self) -> &[TableDto] {
        &self.tables
    }

    pub fn selected_table(&self) -> Option<i64> {
        self.selected_table
    }

    pub fn columns(&self) -> &[ColumnDto] {
        &self.columns
    }

    pub fn rows(&self) -> &[RowDto] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn fail(&mut self, message: &str, error: anyhow::Error) {
        warn!(project_id = %self.project_id, %error, "{message}");
        self.error = Some(message.to_string());
    }

    /// Loads the project header and its tables.
    pub async fn load(&mut self) -> bool {
        self.error = None;
        let loaded = async {
            let project = self.backend.get_project(self.project_id).await?;
            let tables = self.backend.list_tables(self.project_id).await?;
            anyhow::Ok((project, tables))
        }
        .await;
        match loaded {
            Ok((project, tables)) => {
                self.project = Some(project);
                self.tables = tables;
                true
            }
            Err(e) => {
                self.fail("Could not load the project. Please try again.", e);
                false
            }
        }
    }

    /// Shows the columns and first rows of a table. Unknown tables are ignored.
    pub async fn select_table(&mut self, table_id: i64) -> bool {
        if !self.tables.iter().any(|t| t.table_id == table_id) {
            return false;
        }
        self.error = None;
        let loaded = async {
            let columns = self.backend.list_columns(table_id).await?;
            let rows = self.backend.list_rows(table_id, DEFAULT_ROW_PREVIEW).await?;
            anyhow::Ok((columns, rows))
        }
        .await;
        match loaded {
            Ok((columns, rows)) => {
                self.selected_table = Some(table_id);
                self.columns = columns;
                self.rows = rows;
                true
            }
            Err(e) => {
                self.fail("Could not load the table. Please try again.", e);
                false
            }
        }
    }

    pub async fn create_table(&mut self, name: &str) -> Result<bool, DetailError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DetailError::BlankName);
        }
        self.error = None;
        match self.backend.create_table(self.project_id, name).await {
            Ok(table) => {
                if let Some(project) = self.project.as_mut() {
                    project.tables += 1;
                }
                self.tables.insert(0, table);
                Ok(true)
            }
            Err(e) => {
                self.fail("Could not create the table. Please try again.", e);
                Ok(false)
            }
        }
    }

    pub async fn rename_table(&mut self, table_id: i64, name: &str) -> Result<bool, DetailError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DetailError::BlankName);
        }
        let Some(index) = self.tables.iter().position(|t| t.table_id == table_id) else {
            return Ok(false);
        };
        self.error = None;
        match self.backend.rename_table(table_id, name).await {
            Ok(Some(table)) => {
                self.tables[index] = table;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                self.fail("Could not rename the table. Please try again.", e);
                Ok(false)
            }
        }
    }

    pub async fn delete_table(&mut self, table_id: i64) -> bool {
        if !self.tables.iter().any(|t| t.table_id == table_id) {
            return false;
        }
        self.error = None;
        match self.backend.delete_table(table_id).await {
            Ok(()) => {
                self.tables.retain(|t| t.table_id != table_id);
                if let Some(project) = self.project.as_mut() {
                    project.tables = project.tables.saturating_sub(1);
                }
                if self.selected_table == Some(table_id) {
                    self.selected_table = None;
                    self.columns.clear();
                    self.rows.clear();
                }
                true
            }
            Err(e) => {
                self.fail("Could not delete the table. Please try again.", e);
                false
            }
        }
    }
}
