// src/cli/commands.rs
use std::io::Write;

use super::handlers::{self, Context};

pub type Handler = fn(&Context, &mut dyn Write) -> anyhow::Result<()>;

/// The exercises selectable from the command line by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Invert the configured digest of a numeric secret
    BruteForce,
    /// Classify the sample passwords one by one
    CheckStrength,
    /// Classify the sample passwords through the batch interface
    CheckBatch,
    /// Generate one password
    Generate,
}

impl Selector {
    pub const ALL: [Selector; 4] = [
        Selector::BruteForce,
        Selector::CheckStrength,
        Selector::CheckBatch,
        Selector::Generate,
    ];

    pub fn number(&self) -> u8 {
        match self {
            Selector::BruteForce => 1,
            Selector::CheckStrength => 2,
            Selector::CheckBatch => 3,
            Selector::Generate => 4,
        }
    }

    pub fn parse(token: &str) -> Option<Selector> {
        Self::ALL
            .into_iter()
            .find(|selector| token == selector.number().to_string())
    }

    pub fn handler(&self) -> Handler {
        match self {
            Selector::BruteForce => handlers::handle_brute_force,
            Selector::CheckStrength => handlers::handle_check_strength,
            Selector::CheckBatch => handlers::handle_check_batch,
            Selector::Generate => handlers::handle_generate,
        }
    }
}

/// Run each selector token in order; no tokens runs every exercise.
///
/// Unknown tokens and failing exercises are reported and skipped; only a
/// failure to write to `out` ends the run.
pub fn run_selectors<S: AsRef<str>>(
    ctx: &Context,
    tokens: &[S],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let tokens: Vec<String> = if tokens.is_empty() {
        Selector::ALL.iter().map(|s| s.number().to_string()).collect()
    } else {
        tokens.iter().map(|t| t.as_ref().to_string()).collect()
    };

    for token in &tokens {
        writeln!(out, "\nQ{}\n{}", token, "-".repeat(20))?;
        match Selector::parse(token) {
            Some(selector) => {
                log::debug!("Running {:?}", selector);
                if let Err(e) = (selector.handler())(ctx, out) {
                    log::error!("Q{} failed: {:#}", token, e);
                    writeln!(out, "Error: {:#}", e)?;
                }
            }
            None => {
                log::warn!("Ignoring unknown selector {:?}", token);
                writeln!(out, "Invalid question number: {}", token)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_round_trip_through_their_numbers() {
        for selector in Selector::ALL {
            assert_eq!(Selector::parse(&selector.number().to_string()), Some(selector));
        }
        assert_eq!(Selector::parse("5"), None);
        assert_eq!(Selector::parse(" 1"), None);
        assert_eq!(Selector::parse(""), None);
    }

    #[test]
    fn unknown_tokens_do_not_stop_processing() {
        let ctx = Context::for_tests();
        let mut out = Vec::new();
        run_selectors(&ctx, &["x", "4"], &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Invalid question number: x"));
        assert!(out.contains("Generated password: "));
    }

    #[test]
    fn failing_exercise_does_not_stop_later_tokens() {
        let mut ctx = Context::for_tests();
        ctx.config.brute_force_width = 0;
        let mut out = Vec::new();
        run_selectors(&ctx, &["1", "4"], &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\nQ1\n"));
        assert!(out.contains("Error: Brute force search failed"));
        assert!(out.contains("\nQ4\n"));
        assert!(out.contains("Generated password: "));
    }
}
