//! Boxlabel: draw object detection results onto images.
//!
//! An object-detection model reports what it found as labels, scores and
//! normalized boxes. Boxlabel turns that report into typed [`Detection`]
//! records and renders them onto the original JPEG as outlined, captioned
//! boxes, so the annotated image can travel downstream with the result.
//!
//! # Modules
//!
//! - [`detection`]: Detection records, bounding boxes and JSON parsing
//! - [`annotate`]: Drawing detections onto JPEG images
//! - [`validation`]: Reporting suspicious detections before drawing
//! - [`stage`]: Building the outbound message of a detection processor
//! - [`error`]: Error types for boxlabel operations

pub mod annotate;
pub mod detection;
pub mod error;
pub mod logging;
pub mod stage;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

pub use annotate::{annotate, AnnotationResult, Annotator, FailurePolicy};
pub use detection::Detection;
pub use error::BoxlabelError;

use logging::LogFormat;
use validation::{ValidateOptions, ValidationIssue, ValidationReport};

/// The boxlabel CLI application.
#[derive(Parser)]
#[command(name = "boxlabel")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log format for diagnostics on stderr (filter with RUST_LOG).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Draw detections onto a JPEG image.
    Annotate(AnnotateArgs),
    /// Check a detections file for suspicious values.
    Validate(ValidateArgs),
}

/// Arguments for the annotate subcommand.
#[derive(clap::Args)]
struct AnnotateArgs {
    /// JPEG image to annotate.
    image: PathBuf,

    /// Detections JSON (tuple or typed form).
    #[arg(long, short)]
    detections: PathBuf,

    /// Where to write the annotated JPEG.
    #[arg(long, short)]
    output: PathBuf,

    /// Fail instead of writing the original image when annotation fails.
    #[arg(long)]
    strict: bool,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Detections JSON file to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the boxlabel CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BoxlabelError> {
    let cli = Cli::parse();
    logging::setup_logging(cli.log_format);

    match cli.command {
        Some(Commands::Annotate(args)) => run_annotate(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("boxlabel {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Draw object detection results onto images.");
            println!();
            println!("Run 'boxlabel --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the annotate subcommand.
fn run_annotate(args: AnnotateArgs) -> Result<(), BoxlabelError> {
    let detections = detection::io_json::read_detections_json(&args.detections)?;
    let image = std::fs::read(&args.image)?;

    let report = validation::validate_detections(&detections, &ValidateOptions::default());
    for issue in &report.issues {
        warn!(%issue, "suspicious detection");
    }

    let policy = if args.strict {
        FailurePolicy::Strict
    } else {
        FailurePolicy::BestEffort
    };

    let annotator = Annotator::new()?;
    let result = annotator.annotate(&image, Some(&detections));
    let annotated = result.is_annotated();
    let bytes = result.resolve(policy)?;

    std::fs::write(&args.output, &bytes)?;
    info!(output = %args.output.display(), annotated, "wrote image");

    if annotated {
        println!(
            "Annotated {} detection(s): {}",
            detections.len(),
            args.output.display()
        );
    } else {
        println!(
            "No annotation applied; wrote original image to {}",
            args.output.display()
        );
    }
    Ok(())
}

/// Machine-readable validate output.
#[derive(Serialize)]
struct ValidateJson<'a> {
    error_count: usize,
    warning_count: usize,
    issues: &'a [ValidationIssue],
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), BoxlabelError> {
    if !matches!(args.output.as_str(), "text" | "json") {
        return Err(BoxlabelError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            args.output
        )));
    }

    let detections = detection::io_json::read_detections_json(&args.input)?;
    let opts = ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_detections(&detections, &opts);

    if args.output == "json" {
        print_report_json(&report)?;
    } else {
        print!("{}", report);
    }

    if opts.accepts(&report) {
        Ok(())
    } else {
        Err(BoxlabelError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    }
}

fn print_report_json(report: &ValidationReport) -> Result<(), BoxlabelError> {
    let json = serde_json::to_string_pretty(&ValidateJson {
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        issues: &report.issues,
    })
    .map_err(|source| BoxlabelError::DetectionJsonWrite {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    println!("{}", json);
    Ok(())
}
