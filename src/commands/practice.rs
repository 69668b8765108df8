use crate::core::progress::verify_practice_content;
use crate::core::report::ReportSink;
use crate::error::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(name = "jp-courses test")]
#[clap(about = "Check practice exercises and report course progress")]
pub struct TestArgs {
    /// Course directory (default: current directory)
    pub dir: Option<PathBuf>,
}

/// Prints the progress report for `args.dir` (or `cwd`). Returns `false`
/// after reporting a missing practice directory or document.
pub fn check_progress(args: &TestArgs, cwd: &Path, sink: &mut dyn ReportSink) -> Result<bool> {
    let dir = args.dir.as_deref().unwrap_or(cwd);

    match verify_practice_content(dir) {
        Ok(report) => {
            report.write_to(sink);
            Ok(true)
        }
        Err(e) if e.is_recoverable() => {
            sink.error(&e.to_string());
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::course::tests::SAMPLE_COURSE;
    use crate::core::messages;
    use crate::core::report::MemorySink;

    #[test]
    fn test_missing_practice_dir_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = MemorySink::new();

        let ok = check_progress(&TestArgs { dir: None }, dir.path(), &mut sink).unwrap();

        assert!(!ok);
        assert_eq!(
            sink.errors(),
            vec![messages::test_with_no_practice_dir(dir.path())]
        );
    }

    #[test]
    fn test_reports_progress_for_explicit_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), SAMPLE_COURSE).unwrap();
        std::fs::create_dir(dir.path().join("practice")).unwrap();
        std::fs::write(
            dir.path().join("practice/exercises.md"),
            "Link(3): https://gitlab.com/some/repo\n",
        )
        .unwrap();

        let mut sink = MemorySink::new();
        let args = TestArgs::parse_from(["test", dir.path().to_str().unwrap()]);
        let ok = check_progress(&args, Path::new("/nonexistent"), &mut sink).unwrap();

        assert!(ok);
        let infos = sink.infos();
        assert_eq!(infos[0], "Determining course progress...");
        assert_eq!(&infos[7..], ["1. FAIL", "2. SKIP", "3. PASS", "Completed: 1/3"]);
    }
}
