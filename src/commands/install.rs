use crate::core::args::ParsedArgs;
use crate::core::download::{install_course, ArchiveFetcher, ARCHIVE_NAME, COURSE_DIR_NAME};
use crate::core::messages::{HELP_MESSAGE, SUCCESS_MESSAGE};
use crate::core::purchase::{verify_purchase, PaymentVerifier};
use crate::core::report::ReportSink;
use crate::error::{CourseError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub dry_run: bool,
    pub target_dir: PathBuf,
}

impl InstallOptions {
    pub fn new(args: &ParsedArgs, target_dir: PathBuf) -> Self {
        Self {
            dry_run: args.dry_run,
            target_dir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    HelpShown,
    DryRun,
    Installed(PathBuf),
    /// A recoverable error was reported.
    Rejected,
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, InstallOutcome::Rejected)
    }
}

/// Handles everything that needs no network: help, argument errors, dry run
/// and a missing payment id. Returns `None` when a purchase must be verified.
pub fn preflight(
    args: &ParsedArgs,
    options: &InstallOptions,
    sink: &mut dyn ReportSink,
) -> Option<InstallOutcome> {
    if args.help_requested {
        sink.info(HELP_MESSAGE);
        return Some(InstallOutcome::HelpShown);
    }

    if args.has_errors() {
        for error in &args.errors {
            sink.error(error);
        }
        return Some(InstallOutcome::Rejected);
    }

    if options.dry_run {
        for step in dry_run_steps(&args.payment_id, &options.target_dir) {
            sink.info(&step);
        }
        return Some(InstallOutcome::DryRun);
    }

    if !args.has_payment_id() {
        sink.info(HELP_MESSAGE);
        return Some(InstallOutcome::HelpShown);
    }

    None
}

/// The default workflow: [`preflight`], then verify → download → extract.
pub fn install(
    args: &ParsedArgs,
    options: &InstallOptions,
    verifier: &dyn PaymentVerifier,
    fetcher: &dyn ArchiveFetcher,
    sink: &mut dyn ReportSink,
) -> Result<InstallOutcome> {
    if let Some(outcome) = preflight(args, options, sink) {
        return Ok(outcome);
    }

    let purchase = verify_purchase(verifier, &args.payment_id);
    if !purchase.verified {
        tracing::info!(error = ?purchase.error, "purchase rejected");
        let err = CourseError::PaymentNotVerified {
            payment_id: purchase.payment_id,
        };
        sink.error(&err.to_string());
        return Ok(InstallOutcome::Rejected);
    }

    match install_course(&purchase, &options.target_dir, fetcher, sink) {
        Ok(course_dir) => {
            tracing::info!(course_dir = %course_dir.display(), "course installed");
            Ok(InstallOutcome::Installed(course_dir))
        }
        Err(e) if e.is_recoverable() => {
            sink.error(&e.to_string());
            Ok(InstallOutcome::Rejected)
        }
        Err(e) => Err(e),
    }
}

/// What the install would do, one line per step.
pub fn dry_run_steps(payment_id: &str, target_dir: &Path) -> Vec<String> {
    let payment_id = if payment_id.is_empty() {
        "<payment id>"
    } else {
        payment_id
    };
    let archive = target_dir.join(ARCHIVE_NAME);
    let course_dir = target_dir.join(COURSE_DIR_NAME);

    vec![
        format!("[dry-run] verify payment id {payment_id}"),
        format!("[dry-run] download course archive to {}", archive.display()),
        format!(
            "[dry-run] extract {} into {}",
            archive.display(),
            course_dir.display()
        ),
        format!("[dry-run] remove {}", archive.display()),
        format!("[dry-run] print \"{SUCCESS_MESSAGE}\""),
    ]
}
