// ABOUTME: Data structures exchanged with the job board API
// ABOUTME: Job records, drafts sent on create/update, and response envelopes

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Server-assigned job identifier.
///
/// The backend uses integers but the client treats the id as opaque, so
/// string ids decode as well. Either kind is written back exactly as read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(RawId);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl JobId {
    /// An id typed by the user; only used to build request paths.
    pub fn new(id: impl Into<String>) -> Self {
        Self(RawId::Text(id.into()))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.0 {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        match i64::try_from(id) {
            Ok(n) => Self(RawId::Number(n)),
            Err(_) => Self(RawId::Text(id.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobType {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        JobType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                BoardError::Validation(format!(
                    "unknown job type '{}' (expected one of: Full-time, Part-time, Contract, Internship)",
                    wanted
                ))
            })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posting_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_type: JobType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posting_date: String,
    pub job_type: JobType,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<Job>,
}

/// Create and update answer either with the job itself or with
/// `{ "message": ..., "job": {...} }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum JobEnvelope {
    Wrapped { job: Job },
    Bare(Job),
}

impl JobEnvelope {
    pub(crate) fn into_job(self) -> Job {
        match self {
            JobEnvelope::Wrapped { job } | JobEnvelope::Bare(job) => job,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DeleteAck {
    #[serde(default)]
    pub message: Option<String>,
}
