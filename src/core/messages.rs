//! Fixed user-facing message templates.
//!
//! Every line the CLI prints for a known situation is built here so the
//! commands and their tests agree on the exact wording.

use std::path::Path;

pub const ERROR_PREFIX: &str = "❌ ERROR:";

pub const HELP_FLAGS: [&str; 2] = ["-h", "--help"];
pub const PAYMENT_ID_FLAGS: [&str; 3] = ["-i", "--paymentId", "--payment-id"];
pub const DRY_RUN_FLAGS: [&str; 3] = ["-d", "--dry-run", "--dryRun"];

pub const SUCCESS_MESSAGE: &str = "✅ Successfully downloaded and unzipped the course.";

pub const HELP_MESSAGE: &str = r#"
Downloads the jp-courses course for paid users.

USAGE:
  jp-courses [OPTIONS] (-i|--paymentId) <paymentId>
  jp-courses start [--port <PORT>]
  jp-courses test [DIR]

OPTIONS:
  -d, --dry-run
      Prints the commands for the download process without running them.

  -h, --help
      Prints help information

ARGS:
  -i, --paymentId, --payment-id
      Required. Verifies course purchase.
      Example: jp-courses --paymentId cs_live_a1VHFUz7lYnXOL3PUus13VbktedDQDubwfew8E70EvnS1BTOfNTSUXqO0i

COMMANDS:
  start    Serves the course content in ./content on localhost
  test     Checks your practice exercises and reports progress

More information can be found at https://github.com/jsjoeio/jp-courses-install
"#;

pub fn unsupported_arg(arg: &str) -> String {
    format!(
        "Received unsupported arg or flag {arg}.\n   Please run with \"--help\" to see all options."
    )
}

pub fn missing_payment_id_value(flag: &str) -> String {
    format!("Missing payment id.\n   {flag} requires a value like \"{flag} your_id_here123\"")
}

pub fn invalid_payment_id_value(value: &str) -> String {
    format!(
        "Invalid payment id.\n   Received: {value}\n   A valid payment id matches this pattern: cs_live_[alphanumeric]+"
    )
}

pub fn could_not_verify_payment_id(payment_id: &str) -> String {
    format!("Could not verify payment id {payment_id}.\n   Please double-check the id or contact support.")
}

pub fn missing_download_link(payment_id: &str) -> String {
    format!("Missing download link for payment id {payment_id}.")
}

pub fn directory_not_found(dir: &Path) -> String {
    format!("Directory not found: {}", dir.display())
}

pub fn file_not_found(file: &Path) -> String {
    format!("File not found: {}", file.display())
}

pub fn start_with_no_content_dir(dir: &Path) -> String {
    format!(
        "No content directory found in {}.\n   Run \"jp-courses start\" from the directory where the course was installed.",
        dir.display()
    )
}

pub fn test_with_no_practice_dir(dir: &Path) -> String {
    format!(
        "No practice directory found in {}.\n   Run \"jp-courses test\" from the course directory.",
        dir.display()
    )
}
