// ABOUTME: Text rendering of the job list and job cards
// ABOUTME: Also gates deletion behind an explicit user confirmation

use std::fmt::Write;

use crate::remote::models::{Job, JobId};

pub const EMPTY_TITLE: &str = "No jobs found";
pub const EMPTY_HINT: &str = "Try adjusting your filters or add a new job to get started.";

/// "1 job found", "3 jobs found".
pub fn count_header(count: usize) -> String {
    format!("{} {} found", count, if count == 1 { "job" } else { "jobs" })
}

pub fn render_job_card(job: &Job) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]", job.title, job.job_type);
    let _ = writeln!(out, "  Company:  {}", job.company);
    let _ = writeln!(out, "  Location: {}", job.location);
    let _ = writeln!(out, "  Posted:   {}", job.posting_date);
    let tags: Vec<&str> = job.tags.iter().map(|t| t.trim()).collect();
    if !tags.is_empty() {
        let _ = writeln!(out, "  Tags:     {}", tags.join(" | "));
    }
    let _ = write!(out, "  id: {}", job.id);
    out
}

/// Render jobs in the order given.
pub fn render_job_list(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return format!("{}\n{}\n", EMPTY_TITLE, EMPTY_HINT);
    }

    let mut out = count_header(jobs.len());
    out.push('\n');
    for job in jobs {
        out.push('\n');
        out.push_str(&render_job_card(job));
        out.push('\n');
    }
    out
}

pub fn delete_prompt(job: &Job) -> String {
    format!(
        "Are you sure you want to delete the job \"{}\" at {}?",
        job.title, job.company
    )
}

/// Yes/no question put to the user.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes without asking (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// The id to delete, only if the user agreed.
pub fn confirm_delete(job: &Job, confirm: &impl Confirm) -> Option<JobId> {
    confirm
        .confirm(&delete_prompt(job))
        .then(|| job.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::models::JobType;
    use std::cell::RefCell;

    fn job(id: u64, title: &str) -> Job {
        Job {
            id: JobId::from(id),
            title: title.into(),
            company: "Acme Re".into(),
            location: "London".into(),
            posting_date: "Just posted".into(),
            job_type: JobType::FullTime,
            tags: vec![" Life".into(), "Pricing ".into()],
            created_at: None,
            updated_at: None,
        }
    }

    struct Scripted {
        answer: bool,
        asked: RefCell<Vec<String>>,
    }

    impl Confirm for Scripted {
        fn confirm(&self, prompt: &str) -> bool {
            self.asked.borrow_mut().push(prompt.to_string());
            self.answer
        }
    }

    #[test]
    fn test_empty_list_shows_empty_state_without_header() {
        let out = render_job_list(&[]);
        assert!(out.contains(EMPTY_TITLE));
        assert!(out.contains(EMPTY_HINT));
        assert!(!out.contains("found\n\n"));
        assert!(!out.contains("0 jobs"));
    }

    #[test]
    fn test_count_header_pluralizes() {
        assert_eq!(count_header(1), "1 job found");
        assert_eq!(count_header(2), "2 jobs found");
        assert!(render_job_list(&[job(1, "A")]).starts_with("1 job found\n"));
        assert!(render_job_list(&[job(1, "A"), job(2, "B")]).starts_with("2 jobs found\n"));
    }

    #[test]
    fn test_cards_keep_input_order() {
        let out = render_job_list(&[job(2, "Zeta"), job(1, "Alpha")]);
        let zeta = out.find("Zeta").unwrap();
        let alpha = out.find("Alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_card_trims_tags_and_omits_empty_tag_line() {
        let mut j = job(1, "A");
        assert!(render_job_card(&j).contains("Tags:     Life | Pricing"));
        j.tags.clear();
        assert!(!render_job_card(&j).contains("Tags:"));
    }

    #[test]
    fn test_confirm_delete_names_title_and_company() {
        let j = job(5, "Pricing Actuary");
        let declined = Scripted {
            answer: false,
            asked: RefCell::new(Vec::new()),
        };
        assert_eq!(confirm_delete(&j, &declined), None);
        assert_eq!(
            declined.asked.borrow()[0],
            "Are you sure you want to delete the job \"Pricing Actuary\" at Acme Re?"
        );

        assert_eq!(confirm_delete(&j, &AssumeYes), Some(JobId::from(5)));
    }
}
