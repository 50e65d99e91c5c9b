//! SQLite report store

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::record::DiagnosticReport;
use crate::error::{DiagnosError, Result};
use crate::logic::model::RiskLevel;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS diagnostic_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    disease_type TEXT NOT NULL,
    symptoms TEXT NOT NULL,
    prediction_result TEXT NOT NULL,
    confidence REAL NOT NULL,
    risk_level TEXT NOT NULL,
    timestamp TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_reports_timestamp ON diagnostic_reports(timestamp);
"#;

const SELECT_COLUMNS: &str = "SELECT id, disease_type, symptoms, prediction_result, \
     confidence, risk_level, timestamp FROM diagnostic_reports";

/// Report persistence over a single SQLite connection
pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    /// Open (or create) the database file, creating parent directories
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        log::debug!("Report schema ready");
        Ok(Self { conn })
    }

    /// Insert the report and write the new row id back into it
    pub fn save(&self, report: &mut DiagnosticReport) -> Result<i64> {
        let symptoms = serde_json::to_string(&report.symptoms)?;
        self.conn.execute(
            "INSERT INTO diagnostic_reports
             (disease_type, symptoms, prediction_result, confidence, risk_level, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                report.disease_type,
                symptoms,
                report.prediction_result,
                report.confidence,
                report.risk_level.as_str(),
                report.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        report.id = Some(id);
        log::info!("Saved {} report #{}", report.disease_type, id);
        Ok(id)
    }

    /// Every report, newest first
    pub fn all(&self) -> Result<Vec<DiagnosticReport>> {
        self.query(&format!("{} ORDER BY timestamp DESC, id DESC", SELECT_COLUMNS), [])
    }

    pub fn get(&self, id: i64) -> Result<Option<DiagnosticReport>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let raw = self
            .conn
            .query_row(&sql, params![id], RawReport::from_row)
            .optional()?;
        raw.map(RawReport::into_report).transpose()
    }

    /// Reports tiered High, newest first
    pub fn high_risk(&self) -> Result<Vec<DiagnosticReport>> {
        let sql = format!(
            "{} WHERE risk_level = ?1 ORDER BY timestamp DESC, id DESC",
            SELECT_COLUMNS
        );
        self.query(&sql, params![RiskLevel::High.as_str()])
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM diagnostic_reports", [], |r| r.get(0))?;
        Ok(n as usize)
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<DiagnosticReport>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, RawReport::from_row)?;

        let mut reports = Vec::new();
        for raw in rows {
            reports.push(raw?.into_report()?);
        }
        Ok(reports)
    }
}

/// Row as stored, before JSON and timestamp decoding
struct RawReport {
    id: i64,
    disease_type: String,
    symptoms: String,
    prediction_result: String,
    confidence: f64,
    risk_level: String,
    timestamp: String,
}

impl RawReport {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            disease_type: row.get(1)?,
            symptoms: row.get(2)?,
            prediction_result: row.get(3)?,
            confidence: row.get(4)?,
            risk_level: row.get(5)?,
            timestamp: row.get(6)?,
        })
    }

    fn into_report(self) -> Result<DiagnosticReport> {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| DiagnosError::CorruptReport {
                id: self.id,
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);

        Ok(DiagnosticReport {
            id: Some(self.id),
            disease_type: self.disease_type,
            symptoms: serde_json::from_str(&self.symptoms)?,
            prediction_result: self.prediction_result,
            confidence: self.confidence,
            risk_level: RiskLevel::parse(&self.risk_level),
            timestamp,
        })
    }
}
