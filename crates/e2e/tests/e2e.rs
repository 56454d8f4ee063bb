//! Workflow runner entry point
//!
//! Runs the CRUD workflows against the in-memory simulated UI and writes a
//! JSON report. Run with: cargo test --package elearn-e2e --test e2e

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use elearn_e2e::{
    report, CourseWorkflow, Session, SimUi, StudentWorkflow, SuiteReport, WorkflowConfig,
    WorkflowReport,
};
use elearn_harness::{fixture, ContentCatalog, Vocabulary};

#[derive(Parser, Debug)]
#[command(name = "elearn-e2e")]
#[command(about = "CRUD workflow runner for the e-learning admin UI")]
struct Args {
    /// Path to the fixtures directory (default is relative to the crate,
    /// where cargo runs test binaries)
    #[arg(short, long, default_value = "../../fixtures")]
    fixtures: PathBuf,

    /// Seed for the random source (omit for entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Which workflow to run (student, course, all)
    #[arg(short, long, default_value = "all")]
    workflow: String,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("info".parse().expect("valid directive")),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}

fn run(args: Args) -> anyhow::Result<bool> {
    let vocab = Vocabulary::load(
        &args.fixtures.join("vietnamese_names.csv"),
        &args.fixtures.join("vietnamese_locations.csv"),
    )?;
    let chapters = fixture::load_content(&args.fixtures.join("chapters.json"))?;
    let lessons = fixture::load_content(&args.fixtures.join("lessons.json"))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = WorkflowConfig::default();

    let start = Instant::now();
    let mut reports = Vec::new();

    if matches!(args.workflow.as_str(), "student" | "all") {
        reports.push(run_student(&vocab, &config, &mut rng));
    }
    if matches!(args.workflow.as_str(), "course" | "all") {
        reports.push(run_course(&chapters, &lessons, &config, &mut rng));
    }
    if reports.is_empty() {
        anyhow::bail!("unknown workflow: {}", args.workflow);
    }

    let suite = SuiteReport::from_reports(reports, start.elapsed().as_millis() as u64);
    report::write_report(&args.output, &suite)?;

    info!(
        "Results: {} passed, {} failed ({} ms)",
        suite.passed, suite.failed, suite.duration_ms
    );
    Ok(suite.all_passed())
}

fn run_student(vocab: &Vocabulary, config: &WorkflowConfig, rng: &mut StdRng) -> WorkflowReport {
    let start = Instant::now();
    let mut session = Session::new(SimUi::new());
    let mut workflow = StudentWorkflow::new(session.driver_mut(), config);

    let result = workflow.run(vocab, rng);
    let stage = workflow.stage();
    finish("student-crud", start, result.map(|_| ()), Some(stage))
}

fn run_course(
    chapters: &ContentCatalog,
    lessons: &ContentCatalog,
    config: &WorkflowConfig,
    rng: &mut StdRng,
) -> WorkflowReport {
    let start = Instant::now();
    let mut session = Session::new(SimUi::new());
    let mut workflow = CourseWorkflow::new(session.driver_mut(), config);

    let result = workflow.run(chapters, lessons, rng);
    finish("course-content", start, result.map(|_| ()), None)
}

fn finish(
    name: &str,
    start: Instant,
    result: elearn_harness::HarnessResult<()>,
    stage: Option<elearn_e2e::Stage>,
) -> WorkflowReport {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(()) => {
            info!("✓ {name} ({duration_ms} ms)");
            WorkflowReport {
                name: name.to_string(),
                success: true,
                duration_ms,
                error: None,
            }
        }
        Err(e) => {
            match stage {
                Some(stage) => error!("✗ {name} at {stage:?} - {e}"),
                None => error!("✗ {name} - {e}"),
            }
            WorkflowReport {
                name: name.to_string(),
                success: false,
                duration_ms,
                error: Some(e.to_string()),
            }
        }
    }
}
