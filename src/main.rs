mod assemble;
mod books;
mod error;
mod extract;
mod fetch;
mod output;
mod render;
mod selection;
mod settings;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

use assemble::Assembler;
use books::BookRegistry;
use fetch::HttpFetcher;
use settings::Settings;

const EMPTY_SELECTION_MSG: &str = "Both lists cannot be empty. Please provide at least one.";
const FAILURE_MSG: &str = "An error occurred. Please check the logs for more details.";

#[derive(Parser)]
#[command(
    name = "chapter_sheets",
    about = "Build printable question sheets from OpenStax chapter exercises"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a chapter's exercises and write the selected ones to an HTML sheet
    Generate(GenerateArgs),
    /// List the known books
    Books,
}

#[derive(Args)]
struct GenerateArgs {
    /// Book key, e.g. "University Physics Vol. 1" (see `books`)
    #[arg(short, long)]
    book: String,
    /// Chapter number
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    chapter: u32,
    /// Conceptual question numbers, comma-separated (e.g. "3,1,7")
    #[arg(long, default_value = "")]
    conceptual: String,
    /// Problems & exercises numbers, comma-separated
    #[arg(short, long, default_value = "")]
    problems: String,
    /// Output directory (default: settings `output_dir`)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::load();

    let log_file = settings.as_ref().ok().and_then(|s| s.log_file.clone());
    if let Err(e) = init_tracing(log_file.as_deref()) {
        warn!("{:#}", e);
    }

    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load settings, log_file not applied, logging to stderr: {}", e);
            println!("{}", FAILURE_MSG);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Books => {
            print_books(&BookRegistry::builtin());
            ExitCode::SUCCESS
        }
        Commands::Generate(args) => {
            let outcome = run_generate(args, &settings).await;
            println!("{}", outcome.message());
            outcome.exit_code()
        }
    }
}

/// Logs go to stderr, or to `log_file` when one is configured.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let file = log_file
        .map(|path| {
            File::create(path)
                .with_context(|| format!("Cannot open log file {:?}, logging to stderr", path))
        })
        .transpose();

    match file {
        Ok(Some(file)) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
            Ok(())
        }
        Ok(None) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(())
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Err(e)
        }
    }
}

/// What a `generate` run ended with, and what the user is told about it.
#[derive(Debug)]
enum Outcome {
    Written(PathBuf),
    EmptySelection,
    InvalidSelection(String),
    Failed,
}

impl Outcome {
    fn message(&self) -> String {
        match self {
            Outcome::Written(path) => path.display().to_string(),
            Outcome::EmptySelection => EMPTY_SELECTION_MSG.to_string(),
            Outcome::InvalidSelection(reason) => reason.clone(),
            Outcome::Failed => FAILURE_MSG.to_string(),
        }
    }

    fn is_success(&self) -> bool {
        matches!(self, Outcome::Written(_) | Outcome::EmptySelection)
    }

    fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

async fn run_generate(args: GenerateArgs, settings: &Settings) -> Outcome {
    let t0 = Instant::now();

    let (conceptual, problems) = match parse_selections(&args) {
        Ok(lists) => lists,
        Err(e) => {
            warn!("{}", e);
            return Outcome::InvalidSelection(e.to_string());
        }
    };

    if conceptual.is_empty() && problems.is_empty() {
        return Outcome::EmptySelection;
    }

    match generate(&args, settings, &conceptual, &problems).await {
        Ok(path) => {
            info!(
                path = %path.display(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "HTML generated successfully"
            );
            Outcome::Written(path)
        }
        Err(e) => {
            error!("An error occurred while generating the sheet: {:#}", e);
            Outcome::Failed
        }
    }
}

fn parse_selections(args: &GenerateArgs) -> error::Result<(Vec<usize>, Vec<usize>)> {
    let conceptual = selection::parse_list(&args.conceptual)?;
    let problems = selection::parse_list(&args.problems)?;
    Ok((conceptual, problems))
}

async fn generate(
    args: &GenerateArgs,
    settings: &Settings,
    conceptual: &[usize],
    problems: &[usize],
) -> anyhow::Result<PathBuf> {
    let out_dir = args.out_dir.as_deref().unwrap_or(&settings.output_dir);
    let img_base =
        books::parse_url(&settings.img_base_url).context("Invalid img_base_url setting")?;
    let fetcher = HttpFetcher::new(&settings.user_agent, settings.timeout())?;
    let assembler = Assembler::new(fetcher, BookRegistry::builtin(), img_base);

    output::prepare_dir(out_dir)?;

    let doc = assembler
        .assemble(&args.book, args.chapter, conceptual, problems)
        .await
        .with_context(|| {
            format!("Failed to assemble chapter {} of {:?}", args.chapter, args.book)
        })?;

    let missing = doc
        .questions
        .iter()
        .filter(|q| matches!(q, extract::QuestionOutcome::OutOfRange { .. }))
        .count();
    if missing > 0 {
        warn!("{} of {} question(s) were out of range", missing, doc.questions.len());
    }

    let path = output::write_document(out_dir, doc.chapter, &doc.render())?;
    Ok(path)
}

fn print_books(registry: &BookRegistry) {
    for book in registry.iter() {
        println!("{}", book.key);
        println!("  conceptual: {}", book.conceptual_template);
        println!("  problems:   {}", book.problem_template);
    }
}

// ── Tests ──
