// ABOUTME: Command-line entry point for the job board client
// ABOUTME: One-shot list/show/add/edit/delete commands plus an interactive browse session

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use jobboard::render::{self, AssumeYes};
use jobboard::session::{self, Session, TerminalConfirm};
use jobboard::{
    config, BoardError, FilterField, FilterSort, FormField, Job, JobBoard, JobId, JobsApi,
    JobsClient, SubmitOutcome, SubmitRejected,
};

#[derive(Parser)]
#[command(name = "jobboard", version, about = "Browse and manage job listings on a job board API")]
struct Cli {
    /// API base URL, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Path to a TOML config file (defaults to ./jobboard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List jobs, optionally filtered and sorted
    List(FilterArgs),
    /// Show a single job
    Show {
        id: String,
        /// Print the raw job as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new job
    Add(JobFieldArgs),
    /// Edit an existing job; only the given fields change
    Edit {
        id: String,
        #[command(flatten)]
        fields: JobFieldArgs,
    },
    /// Delete a job after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive session with filters, add, edit and delete
    Browse,
}

#[derive(Args)]
struct FilterArgs {
    /// Search by title or company
    #[arg(long)]
    search: Option<String>,
    /// Full-time, Part-time, Contract or Internship
    #[arg(long)]
    job_type: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    tag: Option<String>,
    /// posting_date_desc (newest first) or posting_date_asc
    #[arg(long)]
    sort: Option<String>,
}

#[derive(Args)]
struct JobFieldArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Free-form, e.g. "2 days ago"
    #[arg(long)]
    posting_date: Option<String>,
    #[arg(long)]
    job_type: Option<String>,
    /// Comma-separated, e.g. "Life, Health, Pricing"
    #[arg(long)]
    tags: Option<String>,
}

impl FilterArgs {
    fn into_changes(self) -> Vec<(FilterField, String)> {
        [
            (FilterField::Search, self.search),
            (FilterField::JobType, self.job_type),
            (FilterField::Location, self.location),
            (FilterField::Tag, self.tag),
            (FilterField::Sort, self.sort),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

impl JobFieldArgs {
    fn into_changes(self) -> Vec<(FormField, String)> {
        [
            (FormField::Title, self.title),
            (FormField::Company, self.company),
            (FormField::Location, self.location),
            (FormField::PostingDate, self.posting_date),
            (FormField::JobType, self.job_type),
            (FormField::Tags, self.tags),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "jobboard=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::resolve_from_env(cli.api_url.clone(), cli.config.as_deref())
        .context("Failed to load configuration")?;
    let client = JobsClient::from_config(&config)?;
    tracing::debug!(api = %client.api_base_url(), "Using job board API");

    match cli.command {
        Commands::List(args) => list(client, args).await,
        Commands::Show { id, json } => show(client, JobId::new(id), json).await,
        Commands::Add(fields) => {
            let mut board = JobBoard::new(client).with_notice_duration(config.notice_duration());
            board.select_add();
            submit(&mut board, fields).await
        }
        Commands::Edit { id, fields } => {
            let id = JobId::new(id);
            let job = load_job(&client, &id, "Failed to load job for editing").await?;
            let mut board = JobBoard::new(client).with_notice_duration(config.notice_duration());
            board.select_edit(job);
            submit(&mut board, fields).await
        }
        Commands::Delete { id, yes } => delete(client, JobId::new(id), yes).await,
        Commands::Browse => {
            let board = JobBoard::new(client).with_notice_duration(config.notice_duration());
            Session::new(board).run().await
        }
    }
}

async fn list(client: JobsClient, args: FilterArgs) -> Result<()> {
    let changes = args.into_changes();
    let mut board = JobBoard::new(client);

    if changes.is_empty() {
        session::with_spinner("Loading jobs...", board.mount()).await;
    } else {
        let mut panel = FilterSort::new();
        let mut last = None;
        for (field, value) in changes {
            last = Some(panel.on_field_change(field, value)?);
        }
        if let Some(event) = last {
            session::with_spinner("Loading jobs...", board.apply_filter_event(event)).await;
        }
        if panel.has_active_filters() {
            println!("Active Filters: {}\n", panel.filters().chips().join(", "));
        }
    }

    if let Some(error) = board.error() {
        anyhow::bail!("{}", error);
    }
    print!("{}", render::render_job_list(board.jobs()));
    Ok(())
}

/// Backend failures name the API that was asked; local ones only the action.
async fn load_job(client: &JobsClient, id: &JobId, action: &str) -> Result<Job> {
    client.get_job(id).await.map_err(|err: BoardError| {
        if err.is_network() {
            let action = format!("{} from {}", action, client.api_base_url());
            anyhow::Error::new(err).context(action)
        } else {
            anyhow::Error::new(err).context(action.to_string())
        }
    })
}

async fn show(client: JobsClient, id: JobId, json: bool) -> Result<()> {
    let job = load_job(&client, &id, "Failed to load job").await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&job)?);
    } else {
        println!("{}", render::render_job_card(&job));
    }
    Ok(())
}

async fn submit<A: JobsApi>(board: &mut JobBoard<A>, fields: JobFieldArgs) -> Result<()> {
    if let Some(form) = board.form_mut() {
        for (field, value) in fields.into_changes() {
            form.set_field(field, value)?;
        }
    }

    match board.submit_form().await {
        SubmitOutcome::Submitted => {
            if let Some(notice) = board.notice() {
                println!("✓ {}", notice);
            }
            if let Some(error) = board.error() {
                eprintln!("Error: {}", error);
            }
            print!("{}", render::render_job_list(board.jobs()));
            Ok(())
        }
        SubmitOutcome::Rejected(SubmitRejected::Invalid(errors)) => {
            for (field, message) in &errors {
                eprintln!("  --{}: {}", field.name().replace('_', "-"), message);
            }
            anyhow::bail!("Job was not saved: {} field(s) invalid", errors.len())
        }
        SubmitOutcome::Rejected(other) => anyhow::bail!("Job was not saved: {:?}", other),
        SubmitOutcome::Failed(message) => anyhow::bail!("{}", message),
    }
}

async fn delete(client: JobsClient, id: JobId, yes: bool) -> Result<()> {
    let job = load_job(&client, &id, "Failed to load job for deletion").await?;

    let confirmed = if yes {
        render::confirm_delete(&job, &AssumeYes)
    } else {
        render::confirm_delete(&job, &TerminalConfirm)
    };
    let Some(id) = confirmed else {
        println!("Cancelled");
        return Ok(());
    };

    let mut board = JobBoard::new(client);
    if !board.delete_job(&id).await {
        anyhow::bail!("{}", board.error().unwrap_or("Failed to delete job"));
    }
    if let Some(notice) = board.notice() {
        println!("✓ {}", notice);
    }
    print!("{}", render::render_job_list(board.jobs()));
    Ok(())
}
