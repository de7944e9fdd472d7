// ABOUTME: Interactive terminal session driving the job board orchestrator
// ABOUTME: Menus, prompts and a loading spinner built on dialoguer and indicatif

use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::ProgressBar;
use std::fmt::Write;
use std::future::Future;
use std::time::Duration;

use crate::board::JobBoard;
use crate::filters::{FilterField, FilterSort, SortOrder};
use crate::form::{FormField, JobForm, SubmitOutcome, SubmitRejected};
use crate::remote::client::JobsApi;
use crate::remote::models::{Job, JobType};
use crate::render::{self, Confirm};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Filter,
    ResetFilters,
    AddJob,
    EditJob,
    DeleteJob,
    DismissNotice,
    Refresh,
    Quit,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Filter => "Filter & sort jobs",
            MenuAction::ResetFilters => "Reset all filters",
            MenuAction::AddJob => "+ Add new job",
            MenuAction::EditJob => "Edit a job",
            MenuAction::DeleteJob => "Delete a job",
            MenuAction::DismissNotice => "Dismiss notice",
            MenuAction::Refresh => "Refresh",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Actions offered for the current state of the page.
pub fn menu_actions(has_jobs: bool, can_reset: bool, has_notice: bool) -> Vec<MenuAction> {
    let mut actions = vec![MenuAction::Filter];
    if can_reset {
        actions.push(MenuAction::ResetFilters);
    }
    actions.push(MenuAction::AddJob);
    if has_jobs {
        actions.push(MenuAction::EditJob);
        actions.push(MenuAction::DeleteJob);
    }
    if has_notice {
        actions.push(MenuAction::DismissNotice);
    }
    actions.push(MenuAction::Refresh);
    actions.push(MenuAction::Quit);
    actions
}

/// Banners, filter summary and the list, top to bottom.
pub fn render_page<A: JobsApi>(board: &JobBoard<A>, panel: &FilterSort) -> String {
    let mut out = String::from("Job Listing Portal\n==================\n");
    if let Some(notice) = board.notice() {
        let _ = writeln!(out, "\n✓ {}", notice);
    }
    if let Some(error) = board.error() {
        let _ = writeln!(out, "\nError: {}", error);
    }

    let filters = panel.filters();
    let sort = filters.sort.unwrap_or_default();
    let _ = writeln!(out, "\nSort: {}", sort.label());
    if panel.has_active_filters() {
        let _ = writeln!(out, "Active Filters: {}", filters.chips().join(", "));
    }
    out.push('\n');

    if board.is_loading() {
        out.push_str("Loading jobs...\n");
    } else {
        out.push_str(&render::render_job_list(board.jobs()));
    }
    out
}

/// Form-level and per-field errors of an open form.
pub fn render_form_errors(form: &JobForm) -> String {
    let mut out = String::new();
    if let Some(error) = form.form_error() {
        let _ = writeln!(out, "Error: {}", error);
    }
    for (field, message) in form.errors() {
        let _ = writeln!(out, "  {}: {}", field.label(), message);
    }
    out
}

/// Run `fut` while a spinner with `message` is shown on stderr.
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

/// Asks on the terminal; any prompt failure counts as "no".
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

pub struct Session<A: JobsApi> {
    board: JobBoard<A>,
    panel: FilterSort,
}

impl<A: JobsApi> Session<A> {
    pub fn new(board: JobBoard<A>) -> Self {
        Self {
            board,
            panel: FilterSort::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        with_spinner("Loading jobs...", self.board.mount()).await;

        loop {
            print!("{}", CLEAR_SCREEN);
            println!("{}", render_page(&self.board, &self.panel));

            let actions = menu_actions(
                !self.board.jobs().is_empty(),
                self.panel.can_reset(),
                self.board.notice().is_some(),
            );
            let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
            let choice = Select::new()
                .with_prompt("What would you like to do?")
                .items(&labels)
                .default(0)
                .interact()?;

            match actions[choice] {
                MenuAction::Filter => self.edit_filter().await?,
                MenuAction::ResetFilters => {
                    let event = self.panel.on_reset();
                    with_spinner("Loading jobs...", self.board.apply_filter_event(event)).await;
                }
                MenuAction::AddJob => {
                    self.board.select_add();
                    self.run_form().await?;
                }
                MenuAction::EditJob => {
                    if let Some(job) = self.pick_job("Which job do you want to edit?")? {
                        self.board.select_edit(job);
                        self.run_form().await?;
                    }
                }
                MenuAction::DeleteJob => {
                    if let Some(job) = self.pick_job("Which job do you want to delete?")? {
                        if let Some(id) = render::confirm_delete(&job, &TerminalConfirm) {
                            with_spinner("Deleting job...", self.board.delete_job(&id)).await;
                        }
                    }
                }
                MenuAction::DismissNotice => self.board.dismiss_notice(),
                MenuAction::Refresh => {
                    with_spinner("Loading jobs...", self.board.refresh()).await;
                }
                MenuAction::Quit => return Ok(()),
            }
        }
    }

    async fn edit_filter(&mut self) -> Result<()> {
        let labels: Vec<String> = FilterField::ALL
            .iter()
            .map(|field| format!("{}: {}", field.label(), self.current_filter_value(*field)))
            .collect();
        let choice = Select::new()
            .with_prompt("Which filter?")
            .items(&labels)
            .default(0)
            .interact()?;
        let field = FilterField::ALL[choice];

        let value = match field {
            FilterField::JobType => {
                let mut options = vec!["All Types"];
                options.extend(JobType::ALL.iter().map(|t| t.label()));
                let picked = Select::new()
                    .with_prompt(field.label())
                    .items(&options)
                    .default(0)
                    .interact()?;
                if picked == 0 {
                    String::new()
                } else {
                    options[picked].to_string()
                }
            }
            FilterField::Sort => {
                let orders = [SortOrder::PostingDateDesc, SortOrder::PostingDateAsc];
                let labels: Vec<&str> = orders.iter().map(|o| o.label()).collect();
                let picked = Select::new()
                    .with_prompt(field.label())
                    .items(&labels)
                    .default(0)
                    .interact()?;
                orders[picked].as_str().to_string()
            }
            _ => Input::<String>::new()
                .with_prompt(field.label())
                .with_initial_text(self.current_filter_value(field))
                .allow_empty(true)
                .interact_text()?,
        };

        match self.panel.on_field_change(field, value) {
            Ok(event) => {
                with_spinner("Loading jobs...", self.board.apply_filter_event(event)).await;
            }
            Err(err) => eprintln!("{}", err),
        }
        Ok(())
    }

    fn current_filter_value(&self, field: FilterField) -> String {
        let filters = self.panel.filters();
        match field {
            FilterField::Search => filters.search.clone(),
            FilterField::JobType => filters.job_type.clone(),
            FilterField::Location => filters.location.clone(),
            FilterField::Tag => filters.tag.clone(),
            FilterField::Sort => filters.sort.unwrap_or_default().label().to_string(),
        }
    }

    fn pick_job(&self, prompt: &str) -> Result<Option<Job>> {
        let jobs = self.board.jobs();
        let mut labels: Vec<String> = jobs
            .iter()
            .map(|job| format!("{} at {} ({})", job.title, job.company, job.location))
            .collect();
        labels.push("Back".to_string());
        let choice = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(jobs.get(choice).cloned())
    }

    async fn run_form(&mut self) -> Result<()> {
        if self.board.take_scroll_request() {
            print!("{}", CLEAR_SCREEN);
        }

        loop {
            let Some(form) = self.board.form() else {
                return Ok(());
            };
            println!(
                "{}",
                if form.is_edit() { "Edit Job" } else { "Add New Job" }
            );
            let errors = render_form_errors(form);
            if !errors.is_empty() {
                println!("{}", errors);
            }

            for field in FormField::ALL {
                let value = self.prompt_form_field(field)?;
                if let Some(form) = self.board.form_mut() {
                    if let Err(err) = form.set_field(field, value) {
                        eprintln!("{}", err);
                    }
                }
            }

            let choice = Select::new()
                .items(&["Submit", "Cancel"])
                .default(0)
                .interact()?;
            if choice == 1 {
                self.board.cancel_form();
                return Ok(());
            }

            match with_spinner("Saving job...", self.board.submit_form()).await {
                SubmitOutcome::Submitted
                | SubmitOutcome::Rejected(SubmitRejected::NoForm)
                | SubmitOutcome::Rejected(SubmitRejected::InProgress) => return Ok(()),
                SubmitOutcome::Rejected(SubmitRejected::Invalid(_))
                | SubmitOutcome::Failed(_) => continue,
            }
        }
    }

    fn prompt_form_field(&self, field: FormField) -> Result<String> {
        let current = self
            .board
            .form()
            .map(|form| form.fields().get(field))
            .unwrap_or_default();

        if field == FormField::JobType {
            let labels: Vec<&str> = JobType::ALL.iter().map(|t| t.label()).collect();
            let default = labels.iter().position(|l| *l == current).unwrap_or(0);
            let picked = Select::new()
                .with_prompt(field.label())
                .items(&labels)
                .default(default)
                .interact()?;
            return Ok(labels[picked].to_string());
        }

        Ok(Input::<String>::new()
            .with_prompt(field.label())
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::filters::Filters;
    use crate::remote::models::{JobDraft, JobId, JobList};

    struct StaticApi(Vec<Job>);

    impl JobsApi for StaticApi {
        async fn list_jobs(&self, _filters: &Filters) -> crate::error::Result<JobList> {
            Ok(JobList {
                jobs: self.0.clone(),
            })
        }

        async fn get_job(&self, _id: &JobId) -> crate::error::Result<Job> {
            Err(BoardError::Validation("unused".into()))
        }

        async fn create_job(&self, _draft: &JobDraft) -> crate::error::Result<Job> {
            Err(BoardError::Validation("unused".into()))
        }

        async fn update_job(&self, _id: &JobId, _draft: &JobDraft) -> crate::error::Result<Job> {
            Err(BoardError::Validation("unused".into()))
        }

        async fn delete_job(&self, _id: &JobId) -> crate::error::Result<String> {
            Err(BoardError::Api {
                status: 404,
                message: "Job not found".into(),
            })
        }
    }

    fn job() -> Job {
        Job {
            id: JobId::from(1),
            title: "Actuarial Analyst".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            posting_date: "Just posted".into(),
            job_type: JobType::FullTime,
            tags: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_menu_hides_unavailable_actions() {
        let actions = menu_actions(false, false, false);
        assert!(!actions.contains(&MenuAction::ResetFilters));
        assert!(!actions.contains(&MenuAction::EditJob));
        assert!(!actions.contains(&MenuAction::DismissNotice));
        assert_eq!(actions.last(), Some(&MenuAction::Quit));

        let actions = menu_actions(true, true, true);
        assert!(actions.contains(&MenuAction::ResetFilters));
        assert!(actions.contains(&MenuAction::DeleteJob));
        assert!(actions.contains(&MenuAction::DismissNotice));
    }

    #[test]
    fn test_page_shows_loading_before_mount() {
        let board = JobBoard::new(StaticApi(vec![job()]));
        let page = render_page(&board, &FilterSort::new());
        assert!(page.contains("Loading jobs..."));
        assert!(page.contains("Date: Newest First"));
    }

    #[tokio::test]
    async fn test_page_shows_list_filters_and_error() {
        let mut board = JobBoard::new(StaticApi(vec![job()]));
        board.mount().await;
        board.delete_job(&JobId::from(1)).await;
        let mut panel = FilterSort::new();
        panel.on_field_change(FilterField::Search, "actuar").unwrap();

        let page = render_page(&board, &panel);
        assert!(page.contains("Error: Job not found"));
        assert!(page.contains("Active Filters: Search: actuar"));
        assert!(page.contains("1 job found"));
    }

    #[test]
    fn test_form_errors_listed_by_field() {
        let mut form = JobForm::create();
        assert!(form.begin_submit().is_err());
        let out = render_form_errors(&form);
        assert!(out.contains("Job Title: Job title is required"));
        assert!(out.contains("Company: Company name is required"));
    }
}
