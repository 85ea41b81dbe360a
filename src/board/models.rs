use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// Work-mode tag attached to a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LocationType {
    Hybrid,
    Remote,
    #[serde(rename = "On Site")]
    OnSite,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Hybrid => "Hybrid",
            LocationType::Remote => "Remote",
            LocationType::OnSite => "On Site",
        }
    }
}

/// One job listing, decoded from an Airtable record
///
/// Jobs are read-only snapshots: fetched fresh on every run, never mutated,
/// never cached.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub title: String,
    /// May be empty; an empty salary is omitted from the listing line
    pub salary: String,
    pub location: String,
    /// None when the record carries no work-mode tags
    pub location_type: Option<Vec<LocationType>>,
    pub url: String,
}

/// Raw record as returned by the Airtable list endpoint
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    pub fields: serde_json::Value,
}

/// Typed view of the record's field bag
#[derive(Debug, Deserialize)]
struct JobFields {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Salary", default)]
    salary: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "LocationType")]
    location_type: Option<Vec<LocationType>>,
    #[serde(rename = "Url")]
    url: String,
}

impl Job {
    /// Decode one raw record into a Job
    ///
    /// Returns None when the record is malformed: unparseable creation
    /// timestamp, missing required fields, or an unknown work-mode tag.
    /// Malformed records are skipped, not treated as a fetch failure.
    pub fn from_record(record: RawRecord) -> Option<Job> {
        let created_time = match DateTime::parse_from_rfc3339(&record.created_time) {
            Ok(t) => t.with_timezone(&Utc),
            Err(e) => {
                warn!("Skipping record {}: bad createdTime: {}", record.id, e);
                return None;
            }
        };

        let fields: JobFields = match serde_json::from_value(record.fields) {
            Ok(fields) => fields,
            Err(e) => {
                warn!("Skipping record {}: malformed fields: {}", record.id, e);
                return None;
            }
        };

        Some(Job {
            id: record.id,
            created_time,
            title: fields.title,
            salary: fields.salary,
            location: fields.location,
            location_type: fields.location_type,
            url: fields.url,
        })
    }
}
