use anyhow::Result;
use tracing_subscriber::EnvFilter;

use jp_courses::commands::{run, HttpCollaborators};
use jp_courses::core::report::ConsoleSink;

const LOG_ENV: &str = "JP_COURSES_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    tracing::debug!(?tokens, "starting");

    let cwd = std::env::current_dir()?;
    match run(&tokens, &cwd, &HttpCollaborators, &mut ConsoleSink) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
