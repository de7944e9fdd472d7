// ABOUTME: Create/edit form state for a single job
// ABOUTME: Field edits, required-field validation, tag conversion and the submitting lifecycle

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use crate::error::{BoardError, Result};
use crate::remote::models::{Job, JobDraft, JobId, JobType};

pub const DEFAULT_POSTING_DATE: &str = "Just posted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Company,
    Location,
    PostingDate,
    JobType,
    Tags,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Company,
        FormField::Location,
        FormField::PostingDate,
        FormField::JobType,
        FormField::Tags,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Company => "company",
            FormField::Location => "location",
            FormField::PostingDate => "posting_date",
            FormField::JobType => "job_type",
            FormField::Tags => "tags",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Job Title",
            FormField::Company => "Company",
            FormField::Location => "Location",
            FormField::PostingDate => "Posting Date",
            FormField::JobType => "Job Type",
            FormField::Tags => "Tags (comma-separated)",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type FieldErrors = BTreeMap<FormField, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(JobId),
}

/// The editable values, tags kept in display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posting_date: String,
    pub job_type: JobType,
    pub tags: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            posting_date: DEFAULT_POSTING_DATE.to_string(),
            job_type: JobType::default(),
            tags: String::new(),
        }
    }
}

impl FormFields {
    fn from_job(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            posting_date: if job.posting_date.is_empty() {
                DEFAULT_POSTING_DATE.to_string()
            } else {
                job.posting_date.clone()
            },
            job_type: job.job_type,
            tags: join_tags(&job.tags),
        }
    }

    pub fn get(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Company => self.company.clone(),
            FormField::Location => self.location.clone(),
            FormField::PostingDate => self.posting_date.clone(),
            FormField::JobType => self.job_type.label().to_string(),
            FormField::Tags => self.tags.clone(),
        }
    }

    fn to_draft(&self) -> JobDraft {
        JobDraft {
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            posting_date: self.posting_date.clone(),
            job_type: self.job_type,
            tags: split_tags(&self.tags),
        }
    }
}

/// Split the display form on commas, trimming and dropping empty pieces.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A previous submit has not finished yet.
    InProgress,
    Invalid(FieldErrors),
    /// There is no open form to submit.
    NoForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Rejected(SubmitRejected),
    /// The handler failed; the message is also kept as the form error.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct JobForm {
    mode: FormMode,
    fields: FormFields,
    errors: FieldErrors,
    form_error: Option<String>,
    submitting: bool,
}

impl JobForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: FormFields::default(),
            errors: FieldErrors::new(),
            form_error: None,
            submitting: false,
        }
    }

    pub fn edit(job: &Job) -> Self {
        Self {
            mode: FormMode::Edit(job.id.clone()),
            fields: FormFields::from_job(job),
            errors: FieldErrors::new(),
            form_error: None,
            submitting: false,
        }
    }

    /// Create mode without a seed, edit mode with one.
    pub fn open(seed: Option<&Job>) -> Self {
        seed.map_or_else(Self::create, Self::edit)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Replace one field; clears any error recorded for it.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.errors.remove(&field);
        match field {
            FormField::Title => self.fields.title = value,
            FormField::Company => self.fields.company = value,
            FormField::Location => self.fields.location = value,
            FormField::PostingDate => self.fields.posting_date = value,
            FormField::Tags => self.fields.tags = value,
            FormField::JobType => match value.parse::<JobType>() {
                Ok(job_type) => self.fields.job_type = job_type,
                Err(err) => {
                    self.errors.insert(field, err.user_message());
                    return Err(err);
                }
            },
        }
        Ok(())
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.fields.title.trim().is_empty() {
            errors.insert(FormField::Title, "Job title is required".to_string());
        }
        if self.fields.company.trim().is_empty() {
            errors.insert(FormField::Company, "Company name is required".to_string());
        }
        if self.fields.location.trim().is_empty() {
            errors.insert(FormField::Location, "Location is required".to_string());
        }
        errors
    }

    /// Validate and enter the submitting state, yielding the draft to send.
    pub fn begin_submit(&mut self) -> std::result::Result<JobDraft, SubmitRejected> {
        if self.submitting {
            return Err(SubmitRejected::InProgress);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(SubmitRejected::Invalid(errors));
        }

        self.errors.clear();
        self.form_error = None;
        self.submitting = true;
        Ok(self.fields.to_draft())
    }

    pub fn finish_submit(&mut self, result: Result<()>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                if !self.is_edit() {
                    self.fields = FormFields::default();
                }
                SubmitOutcome::Submitted
            }
            Err(err) => {
                let message = err.user_message();
                self.form_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Run a full submit through `handler`.
    pub async fn submit<F, Fut>(&mut self, handler: F) -> SubmitOutcome
    where
        F: FnOnce(JobDraft) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let draft = match self.begin_submit() {
            Ok(draft) => draft,
            Err(rejected) => return SubmitOutcome::Rejected(rejected),
        };
        let result = handler(draft).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sample_job() -> Job {
        Job {
            id: JobId::from(12),
            title: "Senior Actuary".into(),
            company: "Acme Life".into(),
            location: "Leeds".into(),
            posting_date: "2 days ago".into(),
            job_type: JobType::Contract,
            tags: vec!["Life".into(), "Pricing".into()],
            created_at: None,
            updated_at: None,
        }
    }

    fn filled_form() -> JobForm {
        let mut form = JobForm::create();
        form.set_field(FormField::Title, "Analyst").unwrap();
        form.set_field(FormField::Company, "Acme").unwrap();
        form.set_field(FormField::Location, "Remote").unwrap();
        form
    }

    #[test]
    fn test_create_defaults() {
        let form = JobForm::open(None);
        assert_eq!(form.mode(), &FormMode::Create);
        assert_eq!(form.fields().posting_date, "Just posted");
        assert_eq!(form.fields().job_type, JobType::FullTime);
        assert!(form.fields().tags.is_empty());
    }

    #[test]
    fn test_edit_seeds_fields_and_joins_tags() {
        let form = JobForm::open(Some(&sample_job()));
        assert_eq!(form.mode(), &FormMode::Edit(JobId::from(12)));
        assert_eq!(form.fields().title, "Senior Actuary");
        assert_eq!(form.fields().tags, "Life, Pricing");
        assert_eq!(form.fields().job_type, JobType::Contract);
    }

    #[test]
    fn test_edit_empty_posting_date_falls_back() {
        let mut job = sample_job();
        job.posting_date.clear();
        assert_eq!(JobForm::edit(&job).fields().posting_date, DEFAULT_POSTING_DATE);
    }

    #[test]
    fn test_split_tags_trims_and_drops_empty() {
        assert_eq!(
            split_tags("Life, Health,  Pricing"),
            vec!["Life", "Health", "Pricing"]
        );
        assert_eq!(split_tags("a,, b ,"), vec!["a", "b"]);
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ").is_empty());
    }

    #[test]
    fn test_validation_errors_are_field_keyed() {
        let mut form = JobForm::create();
        form.set_field(FormField::Company, "Acme").unwrap();
        form.set_field(FormField::Title, "   ").unwrap();

        let errors = form.validate();
        assert_eq!(errors.get(&FormField::Title).unwrap(), "Job title is required");
        assert_eq!(errors.get(&FormField::Location).unwrap(), "Location is required");
        assert!(!errors.contains_key(&FormField::Company));
    }

    #[tokio::test]
    async fn test_empty_title_never_calls_handler() {
        let mut form = JobForm::create();
        form.set_field(FormField::Company, "Acme").unwrap();
        form.set_field(FormField::Location, "Remote").unwrap();
        let called = Cell::new(false);

        let outcome = form
            .submit(|_| {
                called.set(true);
                async { Ok(()) }
            })
            .await;

        assert!(!called.get());
        match outcome {
            SubmitOutcome::Rejected(SubmitRejected::Invalid(errors)) => {
                assert!(errors.contains_key(&FormField::Title));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(form.errors().contains_key(&FormField::Title));
    }

    #[test]
    fn test_editing_field_clears_its_error() {
        let mut form = JobForm::create();
        assert!(form.begin_submit().is_err());
        assert!(form.errors().contains_key(&FormField::Title));

        form.set_field(FormField::Title, "Analyst").unwrap();
        assert!(!form.errors().contains_key(&FormField::Title));
        assert!(form.errors().contains_key(&FormField::Company));
    }

    #[test]
    fn test_invalid_job_type_is_field_error() {
        let mut form = JobForm::create();
        assert!(form.set_field(FormField::JobType, "Seasonal").is_err());
        assert!(form.errors().contains_key(&FormField::JobType));
        assert_eq!(form.fields().job_type, JobType::FullTime);
    }

    #[tokio::test]
    async fn test_create_submit_sends_tag_list_and_resets() {
        let mut form = filled_form();
        form.set_field(FormField::Tags, "Life, Health,  Pricing").unwrap();
        let mut sent = None;

        let outcome = form
            .submit(|draft| {
                sent = Some(draft);
                async { Ok(()) }
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Submitted);
        let draft = sent.unwrap();
        assert_eq!(draft.tags, vec!["Life", "Health", "Pricing"]);
        assert_eq!(draft.posting_date, "Just posted");
        assert_eq!(form.fields(), &FormFields::default());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_edit_submit_keeps_fields() {
        let mut form = JobForm::edit(&sample_job());
        form.set_field(FormField::Title, "Lead Actuary").unwrap();

        let outcome = form.submit(|_| async { Ok(()) }).await;

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(form.fields().title, "Lead Actuary");
    }

    #[tokio::test]
    async fn test_handler_failure_keeps_fields_and_sets_form_error() {
        let mut form = filled_form();

        let outcome = form
            .submit(|_| async {
                Err(BoardError::Api {
                    status: 500,
                    message: "database is locked".into(),
                })
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed("database is locked".into()));
        assert_eq!(form.form_error(), Some("database is locked"));
        assert_eq!(form.fields().title, "Analyst");
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_second_submit_rejected_while_pending() {
        let mut form = filled_form();
        assert!(form.begin_submit().is_ok());
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), Err(SubmitRejected::InProgress));

        form.finish_submit(Ok(()));
        assert!(!form.is_submitting());
    }
}
