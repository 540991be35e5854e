//! SQLite persistence for work requests, their media, and lookup tables
//!
//! Geo-tags are stored exactly as a spatial database hands them to the
//! application: hex WKB text in a nullable `geo_tag` column. The store never
//! decodes them; that is the request handlers' job.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS districts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS towns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    district_id INTEGER NOT NULL REFERENCES districts(id) ON DELETE CASCADE
);
CREATE TABLE IF NOT EXISTS complaint_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS work_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    address TEXT NOT NULL,
    description TEXT,
    district_id INTEGER NOT NULL REFERENCES districts(id),
    town_id INTEGER REFERENCES towns(id),
    complaint_type_id INTEGER NOT NULL REFERENCES complaint_types(id),
    status TEXT NOT NULL DEFAULT 'pending',
    submitted_by TEXT,
    geo_tag TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE TABLE IF NOT EXISTS work_request_images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_request_id INTEGER NOT NULL REFERENCES work_requests(id) ON DELETE CASCADE,
    phase TEXT NOT NULL,
    file_name TEXT NOT NULL,
    description TEXT,
    uploaded_by TEXT,
    geo_tag TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE TABLE IF NOT EXISTS work_request_videos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_request_id INTEGER NOT NULL REFERENCES work_requests(id) ON DELETE CASCADE,
    phase TEXT NOT NULL,
    file_name TEXT NOT NULL,
    description TEXT,
    uploaded_by TEXT,
    geo_tag TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_work_requests_district ON work_requests(district_id);
CREATE INDEX IF NOT EXISTS idx_work_requests_status ON work_requests(status);
CREATE INDEX IF NOT EXISTS idx_images_work_request ON work_request_images(work_request_id);
CREATE INDEX IF NOT EXISTS idx_videos_work_request ON work_request_videos(work_request_id);
";

const WORK_REQUEST_SELECT: &str = "
SELECT wr.id, wr.address, wr.description, wr.district_id, d.name, wr.town_id, t.name,
       wr.complaint_type_id, ct.name, wr.status, wr.submitted_by, wr.geo_tag, wr.created_at
FROM work_requests wr
JOIN districts d ON d.id = wr.district_id
LEFT JOIN towns t ON t.id = wr.town_id
JOIN complaint_types ct ON ct.id = wr.complaint_type_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid {field}: {reason}")]
    InvalidReference { field: &'static str, reason: String },

    #[error("{entity} '{name}' already exists")]
    Duplicate { entity: &'static str, name: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Turn a UNIQUE violation into `Duplicate`, passing other failures through
fn unique_violation<'a>(entity: &'static str, name: &'a str) -> impl FnOnce(rusqlite::Error) -> StoreError + 'a {
    move |err| match err {
        rusqlite::Error::SqliteFailure(ref e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
            StoreError::Duplicate { entity, name: name.to_string() }
        }
        other => StoreError::Database(other),
    }
}

/// Text value that does not name a known variant
#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Lifecycle of a work request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkRequestStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl WorkRequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkRequestStatus::Pending => "pending",
            WorkRequestStatus::InProgress => "in_progress",
            WorkRequestStatus::Completed => "completed",
            WorkRequestStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for WorkRequestStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WorkRequestStatus::Pending),
            "in_progress" => Ok(WorkRequestStatus::InProgress),
            "completed" => Ok(WorkRequestStatus::Completed),
            "cancelled" => Ok(WorkRequestStatus::Cancelled),
            other => Err(ParseEnumError { kind: "status", value: other.to_string() }),
        }
    }
}

/// When a piece of evidence was captured relative to the work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaPhase {
    Before,
    During,
    After,
}

impl MediaPhase {
    /// All phases in report order
    pub const ALL: [MediaPhase; 3] = [MediaPhase::Before, MediaPhase::During, MediaPhase::After];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaPhase::Before => "before",
            MediaPhase::During => "during",
            MediaPhase::After => "after",
        }
    }
}

impl FromStr for MediaPhase {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(MediaPhase::Before),
            "during" => Ok(MediaPhase::During),
            "after" => Ok(MediaPhase::After),
            other => Err(ParseEnumError { kind: "phase", value: other.to_string() }),
        }
    }
}

macro_rules! text_column {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_column!(WorkRequestStatus);
text_column!(MediaPhase);

/// Photo or video evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    fn table(self) -> &'static str {
        match self {
            MediaKind::Image => "work_request_images",
            MediaKind::Video => "work_request_videos",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Lookup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Town {
    pub id: i64,
    pub name: String,
    pub district_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewWorkRequest {
    pub address: String,
    pub description: Option<String>,
    pub district_id: i64,
    pub town_id: Option<i64>,
    pub complaint_type_id: i64,
    pub submitted_by: Option<String>,
    pub geo_tag_hex: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkRequestRow {
    pub id: i64,
    pub address: String,
    pub description: Option<String>,
    pub district_id: i64,
    pub district_name: String,
    pub town_id: Option<i64>,
    pub town_name: Option<String>,
    pub complaint_type_id: i64,
    pub complaint_type_name: String,
    pub status: WorkRequestStatus,
    pub submitted_by: Option<String>,
    #[serde(skip)]
    pub geo_tag_hex: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkRequestFilter {
    pub status: Option<WorkRequestStatus>,
    pub district_id: Option<i64>,
}

/// One page of a listing; `page` starts at 1
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size.max(1)))
    }
}

#[derive(Debug, Clone)]
pub struct NewMedia {
    pub work_request_id: i64,
    pub phase: MediaPhase,
    pub file_name: String,
    pub description: Option<String>,
    pub uploaded_by: Option<String>,
    pub geo_tag_hex: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaRow {
    pub id: i64,
    pub work_request_id: i64,
    pub phase: MediaPhase,
    pub file_name: String,
    pub description: Option<String>,
    pub uploaded_by: Option<String>,
    #[serde(skip)]
    pub geo_tag_hex: Option<String>,
    pub created_at: String,
}

/// Owns the single SQLite connection of the server
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Store { conn })
    }

    fn exists(&self, table: &str, id: i64) -> StoreResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table);
        Ok(self.conn.query_row(&sql, [id], |row| row.get(0))?)
    }

    fn require(&self, table: &str, field: &'static str, id: i64) -> StoreResult<()> {
        if !self.exists(table, id)? {
            return Err(StoreError::InvalidReference {
                field,
                reason: format!("no row with id {}", id),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn insert_district(&self, name: &str) -> StoreResult<i64> {
        self.conn
            .execute("INSERT INTO districts (name) VALUES (?1)", [name])
            .map_err(unique_violation("district", name))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_town(&self, name: &str, district_id: i64) -> StoreResult<i64> {
        self.require("districts", "district_id", district_id)?;
        self.conn.execute(
            "INSERT INTO towns (name, district_id) VALUES (?1, ?2)",
            params![name, district_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_complaint_type(&self, name: &str) -> StoreResult<i64> {
        self.conn
            .execute("INSERT INTO complaint_types (name) VALUES (?1)", [name])
            .map_err(unique_violation("complaint type", name))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_districts(&self) -> StoreResult<Vec<Lookup>> {
        self.list_lookup("SELECT id, name FROM districts ORDER BY name")
    }

    pub fn list_complaint_types(&self) -> StoreResult<Vec<Lookup>> {
        self.list_lookup("SELECT id, name FROM complaint_types ORDER BY name")
    }

    fn list_lookup(&self, sql: &str) -> StoreResult<Vec<Lookup>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| Ok(Lookup { id: row.get(0)?, name: row.get(1)? }))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_towns(&self) -> StoreResult<Vec<Town>> {
        let mut stmt = self.conn.prepare("SELECT id, name, district_id FROM towns ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Town { id: row.get(0)?, name: row.get(1)?, district_id: row.get(2)? })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ------------------------------------------------------------------
    // Work requests
    // ------------------------------------------------------------------

    /// Insert a work request after checking every reference it carries
    pub fn create_work_request(&self, new: &NewWorkRequest) -> StoreResult<i64> {
        self.require("districts", "district_id", new.district_id)?;
        self.require("complaint_types", "complaint_type_id", new.complaint_type_id)?;

        if let Some(town_id) = new.town_id {
            let town_district: Option<i64> = self.conn
                .query_row("SELECT district_id FROM towns WHERE id = ?1", [town_id], |row| row.get(0))
                .optional()?;
            match town_district {
                None => {
                    return Err(StoreError::InvalidReference {
                        field: "town_id",
                        reason: format!("no row with id {}", town_id),
                    });
                }
                Some(district_id) if district_id != new.district_id => {
                    return Err(StoreError::InvalidReference {
                        field: "town_id",
                        reason: format!("town {} is not in district {}", town_id, new.district_id),
                    });
                }
                Some(_) => {}
            }
        }

        self.conn.execute(
            "INSERT INTO work_requests
                (address, description, district_id, town_id, complaint_type_id, submitted_by, geo_tag)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new.address,
                new.description,
                new.district_id,
                new.town_id,
                new.complaint_type_id,
                new.submitted_by,
                new.geo_tag_hex,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "work request inserted");
        Ok(id)
    }

    pub fn get_work_request(&self, id: i64) -> StoreResult<WorkRequestRow> {
        let sql = format!("{} WHERE wr.id = ?1", WORK_REQUEST_SELECT);
        self.conn
            .query_row(&sql, [id], work_request_from_row)
            .optional()?
            .ok_or(StoreError::NotFound { entity: "work request", id })
    }

    /// Newest-first page of work requests matching `filter`
    pub fn list_work_requests(&self, filter: &WorkRequestFilter, page: u32, page_size: u32) -> StoreResult<Page<WorkRequestRow>> {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let mut clauses = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(status) = filter.status {
            values.push(Value::Text(status.as_str().to_string()));
            clauses.push(format!("wr.status = ?{}", values.len()));
        }
        if let Some(district_id) = filter.district_id {
            values.push(Value::Integer(district_id));
            clauses.push(format!("wr.district_id = ?{}", values.len()));
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM work_requests wr{}", where_sql);
        let total: i64 = self.conn.query_row(&count_sql, params_from_iter(values.iter()), |row| row.get(0))?;

        let offset = i64::from(page - 1) * i64::from(page_size);
        values.push(Value::Integer(i64::from(page_size)));
        let limit_idx = values.len();
        values.push(Value::Integer(offset));
        let offset_idx = values.len();

        let sql = format!(
            "{}{} ORDER BY wr.id DESC LIMIT ?{} OFFSET ?{}",
            WORK_REQUEST_SELECT, where_sql, limit_idx, offset_idx
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(params_from_iter(values.iter()), work_request_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Page { items, page, page_size, total: total.max(0) as u64 })
    }

    pub fn update_work_request_status(&self, id: i64, status: WorkRequestStatus) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE work_requests SET status = ?1 WHERE id = ?2",
            params![status, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound { entity: "work request", id });
        }
        Ok(())
    }

    /// Delete a work request and, through the cascade, its media
    pub fn delete_work_request(&self, id: i64) -> StoreResult<()> {
        let changed = self.conn.execute("DELETE FROM work_requests WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound { entity: "work request", id });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Media
    // ------------------------------------------------------------------

    pub fn add_media(&self, kind: MediaKind, new: &NewMedia) -> StoreResult<i64> {
        self.require("work_requests", "work_request_id", new.work_request_id)?;
        let sql = format!(
            "INSERT INTO {} (work_request_id, phase, file_name, description, uploaded_by, geo_tag)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            kind.table()
        );
        self.conn.execute(
            &sql,
            params![
                new.work_request_id,
                new.phase,
                new.file_name,
                new.description,
                new.uploaded_by,
                new.geo_tag_hex,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Media of one work request in upload order
    pub fn list_media(&self, kind: MediaKind, work_request_id: i64) -> StoreResult<Vec<MediaRow>> {
        if !self.exists("work_requests", work_request_id)? {
            return Err(StoreError::NotFound { entity: "work request", id: work_request_id });
        }
        let sql = format!(
            "SELECT id, work_request_id, phase, file_name, description, uploaded_by, geo_tag, created_at
             FROM {} WHERE work_request_id = ?1 ORDER BY id",
            kind.table()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([work_request_id], media_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Overwrite a stored geo-tag column verbatim
    ///
    /// Used to load geometries produced elsewhere, such as exports from the
    /// spatial database.
    pub fn set_work_request_geo_tag(&self, id: i64, geo_tag_hex: Option<&str>) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE work_requests SET geo_tag = ?1 WHERE id = ?2",
            params![geo_tag_hex, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound { entity: "work request", id });
        }
        Ok(())
    }
}

fn work_request_from_row(row: &Row<'_>) -> rusqlite::Result<WorkRequestRow> {
    Ok(WorkRequestRow {
        id: row.get(0)?,
        address: row.get(1)?,
        description: row.get(2)?,
        district_id: row.get(3)?,
        district_name: row.get(4)?,
        town_id: row.get(5)?,
        town_name: row.get(6)?,
        complaint_type_id: row.get(7)?,
        complaint_type_name: row.get(8)?,
        status: row.get(9)?,
        submitted_by: row.get(10)?,
        geo_tag_hex: row.get(11)?,
        created_at: row.get(12)?,
    })
}

fn media_from_row(row: &Row<'_>) -> rusqlite::Result<MediaRow> {
    Ok(MediaRow {
        id: row.get(0)?,
        work_request_id: row.get(1)?,
        phase: row.get(2)?,
        file_name: row.get(3)?,
        description: row.get(4)?,
        uploaded_by: row.get(5)?,
        geo_tag_hex: row.get(6)?,
        created_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (Store, i64, i64, i64) {
        let store = Store::open_in_memory().unwrap();
        let district = store.insert_district("South").unwrap();
        let town = store.insert_town("Saddar", district).unwrap();
        let complaint = store.insert_complaint_type("Road damage").unwrap();
        (store, district, town, complaint)
    }

    fn request(district_id: i64, complaint_type_id: i64) -> NewWorkRequest {
        NewWorkRequest {
            address: "Shahrah-e-Faisal".to_string(),
            district_id,
            complaint_type_id,
            ..NewWorkRequest::default()
        }
    }

    #[test]
    fn test_create_and_get_work_request() {
        let (store, district, town, complaint) = seeded();
        let mut new = request(district, complaint);
        new.town_id = Some(town);
        let id = store.create_work_request(&new).unwrap();

        let row = store.get_work_request(id).unwrap();
        assert_eq!(row.district_name, "South");
        assert_eq!(row.town_name.as_deref(), Some("Saddar"));
        assert_eq!(row.status, WorkRequestStatus::Pending);
        assert!(row.geo_tag_hex.is_none());
    }

    #[test]
    fn test_foreign_keys_validated() {
        let (store, district, _, complaint) = seeded();
        let err = store.create_work_request(&request(district + 100, complaint)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference { field: "district_id", .. }));

        let err = store.create_work_request(&request(district, complaint + 100)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference { field: "complaint_type_id", .. }));
    }

    #[test]
    fn test_town_must_belong_to_district() {
        let (store, _, town, complaint) = seeded();
        let other = store.insert_district("East").unwrap();
        let mut new = request(other, complaint);
        new.town_id = Some(town);
        let err = store.create_work_request(&new).unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference { field: "town_id", .. }));
    }

    #[test]
    fn test_pagination_and_filter() {
        let (store, district, _, complaint) = seeded();
        let other = store.insert_district("West").unwrap();
        for _ in 0..5 {
            store.create_work_request(&request(district, complaint)).unwrap();
        }
        let west = store.create_work_request(&request(other, complaint)).unwrap();
        store.update_work_request_status(west, WorkRequestStatus::Completed).unwrap();

        let page = store.list_work_requests(&WorkRequestFilter::default(), 1, 4).unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.items[0].id, west);

        let page2 = store.list_work_requests(&WorkRequestFilter::default(), 2, 4).unwrap();
        assert_eq!(page2.items.len(), 2);

        let filter = WorkRequestFilter { status: Some(WorkRequestStatus::Completed), district_id: None };
        let completed = store.list_work_requests(&filter, 1, 10).unwrap();
        assert_eq!(completed.total, 1);

        let filter = WorkRequestFilter { status: Some(WorkRequestStatus::Pending), district_id: Some(district) };
        assert_eq!(store.list_work_requests(&filter, 1, 10).unwrap().total, 5);
    }

    #[test]
    fn test_media_cascade_on_delete() {
        let (store, district, _, complaint) = seeded();
        let id = store.create_work_request(&request(district, complaint)).unwrap();
        store.add_media(MediaKind::Image, &NewMedia {
            work_request_id: id,
            phase: MediaPhase::Before,
            file_name: "a.jpg".to_string(),
            description: None,
            uploaded_by: None,
            geo_tag_hex: None,
        }).unwrap();
        assert_eq!(store.list_media(MediaKind::Image, id).unwrap().len(), 1);
        assert!(store.list_media(MediaKind::Video, id).unwrap().is_empty());

        store.delete_work_request(id).unwrap();
        assert!(matches!(store.list_media(MediaKind::Image, id), Err(StoreError::NotFound { .. })));
        assert!(matches!(store.delete_work_request(id), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let (store, _, _, _) = seeded();
        let err = store.insert_district("South").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { entity: "district", ref name } if name == "South"));
        assert_eq!(err.to_string(), "district 'South' already exists");
        let err = store.insert_complaint_type("Road damage").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { entity: "complaint type", .. }));
    }

    #[test]
    fn test_enum_text_round_trip() {
        assert_eq!("in_progress".parse::<WorkRequestStatus>().unwrap(), WorkRequestStatus::InProgress);
        assert_eq!(WorkRequestStatus::Cancelled.as_str(), "cancelled");
        assert!("done".parse::<WorkRequestStatus>().is_err());
        assert_eq!("during".parse::<MediaPhase>().unwrap(), MediaPhase::During);
    }
}
