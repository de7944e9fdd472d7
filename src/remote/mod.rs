// ABOUTME: Remote job board API access
// ABOUTME: HTTP client plus the data structures it sends and receives

pub mod client;
pub mod models;

pub use client::{JobsApi, JobsClient};
pub use models::{Job, JobDraft, JobId, JobList, JobType};
