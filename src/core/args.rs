//! Token scanner for the install flow.
//!
//! The install flow takes a flat list of tokens rather than a clap
//! definition: a bare payment id is accepted anywhere, and scanning stops at
//! the first help flag or the first error.

use crate::core::messages::{self, DRY_RUN_FLAGS, HELP_FLAGS, PAYMENT_ID_FLAGS};
use regex::Regex;
use std::sync::LazyLock;

static PAYMENT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cs_live_[A-Za-z0-9]+$").expect("valid payment id pattern"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub help_requested: bool,
    pub dry_run: bool,
    /// Empty when no id was passed.
    pub payment_id: String,
    pub errors: Vec<String>,
}

impl ParsedArgs {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_payment_id(&self) -> bool {
        !self.payment_id.is_empty()
    }
}

pub fn is_valid_payment_id_value(value: &str) -> bool {
    PAYMENT_ID_PATTERN.is_match(value)
}

/// Scans `tokens` left to right into a [`ParsedArgs`].
///
/// An empty token list, or an empty token, counts as asking for help.
pub fn parse_args<S: AsRef<str>>(tokens: &[S]) -> ParsedArgs {
    let mut parsed = ParsedArgs::default();

    if tokens.is_empty() {
        parsed.help_requested = true;
        return parsed;
    }

    let mut index = 0;
    while index < tokens.len() {
        let token = tokens[index].as_ref();

        if token.trim().is_empty() || HELP_FLAGS.contains(&token) {
            parsed.help_requested = true;
            return parsed;
        }

        if DRY_RUN_FLAGS.contains(&token) {
            parsed.dry_run = true;
        } else if PAYMENT_ID_FLAGS.contains(&token) {
            let next: Option<&str> = tokens.get(index + 1).map(|next| next.as_ref());
            let value = match next {
                Some(value) if !value.is_empty() => value,
                _ => {
                    parsed.errors.push(messages::missing_payment_id_value(token));
                    return parsed;
                }
            };

            if !is_valid_payment_id_value(value) {
                parsed.errors.push(messages::invalid_payment_id_value(value));
                return parsed;
            }

            parsed.payment_id = value.to_string();
            index += 1;
        } else if is_valid_payment_id_value(token) {
            parsed.payment_id = token.to_string();
        } else {
            parsed.errors.push(messages::unsupported_arg(token));
            return parsed;
        }

        index += 1;
    }

    parsed
}
