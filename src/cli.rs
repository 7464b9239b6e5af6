// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::core::{JobBackend, ServiceClient};
use crate::forms::{
    resume_criteria, ManualSearchForm, ResumeSearchError, ResumeSearchForm, SkillSet, WizardForm,
};
use crate::render::{self, OutputFormat};
use crate::search::{
    progress_channel, ConsoleNotifier, JobBoard, Notification, Notifier, ProgressReceiver,
    SearchOrchestrator,
};
use crate::types::SearchCriteria;

#[derive(Parser)]
#[command(name = "job-hunter")]
#[command(about = "Search job boards and analyze each posting with an LLM backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL (overrides JOB_HUNTER_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Print each job as its analysis settles
    #[arg(long, global = true)]
    pub live: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search by term and location
    Search(SearchArgs),
    /// Describe your ideal job in plain words
    Wizard {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// Derive the search from a PDF or DOCX resume
    Resume {
        file: PathBuf,
        /// Override the location found in the resume
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        results: Option<u32>,
        #[arg(long)]
        hours_old: Option<u32>,
    },
    /// Check that the backend is reachable
    Health,
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub term: String,
    #[arg(long)]
    pub location: String,
    /// Years of experience
    #[arg(long)]
    pub experience: Option<String>,
    /// Required skill; repeat for several
    #[arg(long = "skill")]
    pub skills: Vec<String>,
    /// Number of results
    #[arg(long)]
    pub results: Option<u32>,
    #[arg(long)]
    pub hours_old: Option<u32>,
    /// Job board to scrape; repeat for several
    #[arg(long = "site")]
    pub sites: Vec<String>,
    #[arg(long)]
    pub country: Option<String>,
}

impl SearchArgs {
    pub fn into_form(self) -> ManualSearchForm {
        ManualSearchForm {
            search_term: self.term,
            location: self.location,
            experience_years: self.experience.unwrap_or_default(),
            results_wanted: self.results,
            hours_old: self.hours_old,
            site_name: self.sites,
            country_indeed: self.country,
            skills: self.skills.iter().collect::<SkillSet>(),
        }
    }
}

pub async fn handle_command(cli: Cli, config: AppConfig) -> Result<()> {
    let backend: Arc<dyn JobBackend> = Arc::new(ServiceClient::from_config(&config)?);
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    let criteria = match cli.command {
        Command::Health => {
            let health = backend
                .health()
                .await
                .context("Backend health check failed")?;
            println!("{}", health.message);
            if let Some(provider) = health.llm_provider {
                println!("LLM provider: {}", provider);
            }
            return Ok(());
        }
        Command::Search(args) => args.into_form().submit(&config.search)?,
        Command::Wizard { prompt } => WizardForm::new(&prompt.join(" ")).submit(&config.search)?,
        Command::Resume {
            file,
            location,
            results,
            hours_old,
        } => {
            let form = ResumeSearchForm {
                results_wanted: results,
                hours_old,
                location,
            };
            match resume_criteria(backend.as_ref(), &file, &form, &config).await {
                Ok(criteria) => criteria,
                Err(ResumeSearchError::Backend(e)) => {
                    notifier.notify(Notification::error(e.to_string()));
                    return Err(e).context("Resume analysis failed");
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    let orchestrator = SearchOrchestrator::new(
        backend,
        JobBoard::new(),
        notifier,
        config.analysis.clone(),
    );
    let (orchestrator, progress) = if cli.live {
        let (tx, rx) = progress_channel();
        (orchestrator.with_progress(tx), Some(rx))
    } else {
        (orchestrator, None)
    };
    run_search(orchestrator, &criteria, cli.format, progress).await
}

async fn run_search(
    orchestrator: SearchOrchestrator,
    criteria: &SearchCriteria,
    format: OutputFormat,
    progress: Option<ProgressReceiver>,
) -> Result<()> {
    let printer = progress.map(|rx| tokio::spawn(print_progress(rx, std::io::stderr())));

    let result = orchestrator.run(criteria).await;
    let jobs = orchestrator.board().jobs();
    // closes the progress channel so the printer drains and exits
    drop(orchestrator);
    if let Some(handle) = printer {
        handle.await.context("Progress printer failed")?;
    }
    let report = result.context("Job search failed")?;

    info!(
        "Search {} finished: {} found, {} displayed, {} filtered as invalid",
        report.generation, report.found, report.displayed, report.filtered_invalid
    );

    let output = render::render(&jobs, format)?;
    print!("{}", output);
    Ok(())
}

/// Print one status line per job transition until every sender is gone
async fn print_progress<W: Write>(mut rx: ProgressReceiver, mut out: W) -> W {
    while let Some(event) = rx.recv().await {
        let _ = writeln!(
            out,
            "{}",
            render::render_status_line(event.index, event.total, &event.job)
        );
    }
    out
}
