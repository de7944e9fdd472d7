// ABOUTME: Library root for the job board client
// ABOUTME: Exposes the REST client, filter/form state holders, renderer and orchestrator

pub mod board;
pub mod config;
pub mod error;
pub mod filters;
pub mod form;
pub mod remote;
pub mod render;
pub mod session;

pub use board::JobBoard;
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use filters::{FilterEvent, FilterField, FilterSort, Filters, SortOrder};
pub use form::{FormField, JobForm, SubmitOutcome, SubmitRejected};
pub use remote::{Job, JobDraft, JobId, JobList, JobType, JobsApi, JobsClient};
