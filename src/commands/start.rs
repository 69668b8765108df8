use crate::core::config::InstallerConfig;
use crate::core::report::ReportSink;
use crate::core::server::start_course_server;
use crate::error::{CourseError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(name = "jp-courses start")]
#[clap(about = "Serve the installed course on localhost")]
pub struct StartArgs {
    /// Port to listen on (default: from config, 3000)
    #[clap(short, long)]
    pub port: Option<u16>,
}

/// `<base>/<content_dir>`, or an error naming `base` when it is missing.
pub fn content_root(base: &Path, config: &InstallerConfig) -> Result<PathBuf> {
    let root = config.content_root(base);
    if !root.is_dir() {
        return Err(CourseError::ContentDirNotFound {
            path: base.to_path_buf(),
        });
    }
    Ok(root)
}

/// Returns `false` after reporting a missing content directory.
pub fn start(
    args: &StartArgs,
    base: &Path,
    config: &InstallerConfig,
    sink: &mut dyn ReportSink,
) -> Result<bool> {
    let root = match content_root(base, config) {
        Ok(root) => root,
        Err(e) if e.is_recoverable() => {
            sink.error(&e.to_string());
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    let port = args.port.unwrap_or(config.port);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(start_course_server(root, port, sink))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::messages;
    use crate::core::report::MemorySink;

    #[test]
    fn test_parse_port() {
        let args = StartArgs::parse_from(["start", "--port", "8080"]);
        assert_eq!(args.port, Some(8080));

        let args = StartArgs::parse_from(["start"]);
        assert_eq!(args.port, None);
    }

    #[test]
    fn test_missing_content_dir_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = MemorySink::new();

        let started = start(
            &StartArgs { port: Some(0) },
            dir.path(),
            &InstallerConfig::default(),
            &mut sink,
        )
        .unwrap();

        assert!(!started);
        assert_eq!(
            sink.errors(),
            vec![messages::start_with_no_content_dir(dir.path())]
        );
    }

    #[test]
    fn test_content_root_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("content")).unwrap();

        let root = content_root(dir.path(), &InstallerConfig::default()).unwrap();
        assert_eq!(root, dir.path().join("content"));
    }
}
