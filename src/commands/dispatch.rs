//! Routes the raw command line to a workflow.
//!
//! The first token picks the workflow: `start` and `test` are clap
//! subcommands, everything else goes to the install token scanner.
//! Configuration and HTTP clients are only built once a workflow needs them,
//! so help and argument errors never depend on a readable config.

use crate::commands::install::{install, preflight, InstallOptions};
use crate::commands::practice::{check_progress, TestArgs};
use crate::commands::start::{start, StartArgs};
use crate::core::args::parse_args;
use crate::core::config::InstallerConfig;
use crate::core::download::{ArchiveFetcher, HttpFetcher};
use crate::core::purchase::{HttpPaymentVerifier, PaymentVerifier};
use crate::core::report::ReportSink;
use crate::error::Result;
use clap::Parser;
use std::path::Path;

/// Builds configuration and network collaborators on demand.
pub trait Collaborators {
    fn config(&self) -> Result<InstallerConfig>;
    fn verifier(&self, config: &InstallerConfig) -> Result<Box<dyn PaymentVerifier>>;
    fn fetcher(&self, config: &InstallerConfig) -> Result<Box<dyn ArchiveFetcher>>;
}

/// `~/.jp-courses/config.json` plus the reqwest-backed collaborators.
#[derive(Debug, Default)]
pub struct HttpCollaborators;

impl Collaborators for HttpCollaborators {
    fn config(&self) -> Result<InstallerConfig> {
        InstallerConfig::load()
    }

    fn verifier(&self, config: &InstallerConfig) -> Result<Box<dyn PaymentVerifier>> {
        Ok(Box::new(HttpPaymentVerifier::new(config)?))
    }

    fn fetcher(&self, config: &InstallerConfig) -> Result<Box<dyn ArchiveFetcher>> {
        Ok(Box::new(HttpFetcher::new(config)?))
    }
}

/// Runs the workflow named by `tokens` from `cwd`. `Ok(false)` means an
/// error was reported and the process should exit with 1.
pub fn run<S: AsRef<str>>(
    tokens: &[S],
    cwd: &Path,
    deps: &dyn Collaborators,
    sink: &mut dyn ReportSink,
) -> Result<bool> {
    let words = tokens.iter().map(|token| token.as_ref());

    match tokens.first().map(|token| token.as_ref()) {
        Some("start") => {
            let args = StartArgs::parse_from(words);
            let config = deps.config()?;
            start(&args, cwd, &config, sink)
        }
        Some("test") => {
            let args = TestArgs::parse_from(words);
            check_progress(&args, cwd, sink)
        }
        _ => {
            let args = parse_args(tokens);
            let options = InstallOptions::new(&args, cwd.to_path_buf());
            if let Some(outcome) = preflight(&args, &options, sink) {
                return Ok(outcome.is_success());
            }

            let config = deps.config()?;
            let verifier = deps.verifier(&config)?;
            let fetcher = deps.fetcher(&config)?;
            let outcome = install(&args, &options, verifier.as_ref(), fetcher.as_ref(), sink)?;
            Ok(outcome.is_success())
        }
    }
}
