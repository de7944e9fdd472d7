// ABOUTME: Orchestrator owning the job list, filters and page-level status
// ABOUTME: Sequences fetch-on-mount, fetch-on-filter-change and re-fetch after every mutation

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_NOTICE_SECS;
use crate::error::Result;
use crate::filters::{FilterEvent, Filters};
use crate::form::{JobForm, SubmitOutcome, SubmitRejected};
use crate::remote::client::JobsApi;
use crate::remote::models::{Job, JobDraft, JobId};

pub const CREATED_NOTICE: &str = "Job created successfully!";
pub const UPDATED_NOTICE: &str = "Job updated successfully!";
pub const DELETED_NOTICE: &str = "Job deleted successfully!";

#[derive(Debug, Clone)]
struct Notice {
    message: String,
    shown_at: Instant,
}

/// Single owner of the board state.
///
/// The displayed list is always the result of the last successful fetch;
/// mutations never patch it locally, they re-fetch with the stored filters.
pub struct JobBoard<A: JobsApi> {
    api: A,
    jobs: Vec<Job>,
    filters: Filters,
    loading: bool,
    error: Option<String>,
    notice: Option<Notice>,
    notice_ttl: Duration,
    form: Option<JobForm>,
    editing: Option<Job>,
    scroll_to_top: bool,
}

impl<A: JobsApi> JobBoard<A> {
    /// Starts in the loading state until the first fetch completes.
    pub fn new(api: A) -> Self {
        Self {
            api,
            jobs: Vec::new(),
            filters: Filters::default(),
            loading: true,
            error: None,
            notice: None,
            notice_ttl: Duration::from_secs(DEFAULT_NOTICE_SECS),
            form: None,
            editing: None,
            scroll_to_top: false,
        }
    }

    pub fn with_notice_duration(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The success notice, if shown and not yet expired.
    pub fn notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| n.shown_at.elapsed() < self.notice_ttl)
            .map(|n| n.message.as_str())
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn show_notice(&mut self, message: &str) {
        self.notice = Some(Notice {
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }

    pub fn form(&self) -> Option<&JobForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut JobForm> {
        self.form.as_mut()
    }

    pub fn editing(&self) -> Option<&Job> {
        self.editing.as_ref()
    }

    /// Consume a pending request to bring the view back to the top.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    pub async fn mount(&mut self) {
        self.fetch(&Filters::default()).await;
    }

    /// Fetch with `filters` and replace the list wholesale.
    ///
    /// Returns false when the fetch failed; the list is then left as it was.
    pub async fn fetch(&mut self, filters: &Filters) -> bool {
        self.loading = true;
        self.error = None;
        debug!(?filters, "Fetching jobs");

        let result = self.api.list_jobs(filters).await;
        self.loading = false;
        match result {
            Ok(list) => {
                self.jobs = list.jobs;
                true
            }
            Err(err) => {
                self.error = Some(err.user_message());
                false
            }
        }
    }

    /// Re-fetch with the stored filter record.
    pub async fn refresh(&mut self) -> bool {
        let filters = self.filters.clone();
        self.fetch(&filters).await
    }

    pub async fn apply_filter_event(&mut self, event: FilterEvent) {
        match event {
            FilterEvent::Changed(filters) => {
                self.filters = filters;
                self.refresh().await;
            }
            FilterEvent::Reset => {
                self.filters = Filters::default();
                self.fetch(&Filters::default()).await;
            }
        }
    }

    /// Errors are returned to the caller rather than shown page-wide.
    pub async fn create_job(&mut self, draft: &JobDraft) -> Result<Job> {
        let job = self.api.create_job(draft).await?;
        info!(id = %job.id, title = %job.title, "Created job");
        self.refresh().await;
        self.form = None;
        self.show_notice(CREATED_NOTICE);
        Ok(job)
    }

    /// Updates the job selected for editing; `None` when nothing is selected.
    pub async fn update_job(&mut self, draft: &JobDraft) -> Result<Option<Job>> {
        let Some(target) = self.editing.as_ref().map(|job| job.id.clone()) else {
            warn!("Update requested with no job selected for editing");
            return Ok(None);
        };
        let job = self.api.update_job(&target, draft).await?;
        info!(id = %job.id, "Updated job");
        self.refresh().await;
        self.editing = None;
        self.form = None;
        self.show_notice(UPDATED_NOTICE);
        Ok(Some(job))
    }

    /// Failures land in the page-level error and leave the list untouched.
    pub async fn delete_job(&mut self, id: &JobId) -> bool {
        match self.api.delete_job(id).await {
            Ok(_) => {
                info!(%id, "Deleted job");
                self.refresh().await;
                self.show_notice(DELETED_NOTICE);
                true
            }
            Err(err) => {
                self.error = Some(err.user_message());
                false
            }
        }
    }

    pub fn select_edit(&mut self, job: Job) {
        self.form = Some(JobForm::edit(&job));
        self.editing = Some(job);
        self.scroll_to_top = true;
    }

    pub fn select_add(&mut self) {
        self.editing = None;
        self.form = Some(JobForm::create());
        self.scroll_to_top = true;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.editing = None;
    }

    /// Submit the open form as an update when editing, else as a create.
    ///
    /// On failure the form stays open with the error attached.
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let Some(mut form) = self.form.take() else {
            return SubmitOutcome::Rejected(SubmitRejected::NoForm);
        };
        let draft = match form.begin_submit() {
            Ok(draft) => draft,
            Err(rejected) => {
                self.form = Some(form);
                return SubmitOutcome::Rejected(rejected);
            }
        };

        let result = if form.is_edit() {
            self.update_job(&draft).await.map(|_| ())
        } else {
            self.create_job(&draft).await.map(|_| ())
        };
        let failed = result.is_err();
        let outcome = form.finish_submit(result);
        if failed {
            self.form = Some(form);
        }
        outcome
    }
}
