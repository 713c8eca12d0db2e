// src/cli/handlers.rs
use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{anyhow, bail, Context as _};
use console::style;

use crate::core::Config;
use crate::cracker::BruteForcer;
use crate::crypto::DigestEngine;
use crate::generators::PasswordGenerator;
use crate::models::Digest;
use crate::strength::StrengthPolicy;

/// Passwords used by the strength exercises.
pub const SAMPLE_PASSWORDS: [&str; 4] = ["Abc5", "abcdef123456", "AbCdEf123456", "AbCdEf 123456"];

/// Everything a selector handler needs.
pub struct Context {
    pub config: Config,
    pub engine: DigestEngine,
    pub color: bool,
}

impl Context {
    pub fn new(config: Config, engine: DigestEngine) -> Self {
        Self {
            config,
            engine,
            color: console::colors_enabled(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn verdict(&self, strong: bool) -> String {
        match (self.color, strong) {
            (false, _) => strong.to_string(),
            (true, true) => style("true").green().to_string(),
            (true, false) => style("false").red().to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new(Config::default(), DigestEngine::default()).with_color(false)
    }
}

pub fn handle_brute_force(ctx: &Context, out: &mut dyn Write) -> anyhow::Result<()> {
    let target = Digest::parse(&ctx.config.brute_force_target)
        .ok_or_else(|| anyhow!("Configured target {:?} is not a hex digest", ctx.config.brute_force_target))?;

    // The target is pinned to its own algorithm, not the session's digest engine
    let engine = DigestEngine::from_name(&ctx.config.brute_force_algorithm)?;
    if target.len() != engine.digest_len() {
        bail!(
            "Configured target has {} hex digits but {} digests have {}",
            target.len(),
            engine.algorithm().name(),
            engine.digest_len()
        );
    }

    let forcer = BruteForcer::new(engine).with_workers(ctx.config.brute_force_workers);
    let report = forcer
        .search_report(&target, ctx.config.brute_force_width)
        .context("Brute force search failed")?;

    match report.found {
        Some(candidate) => writeln!(out, "{}", candidate)?,
        None => writeln!(out, "No result found")?,
    }
    log::info!(
        "Brute force tried {} of {} candidates",
        report.candidates_tried,
        report.space_size
    );
    Ok(())
}

pub fn handle_check_strength(ctx: &Context, out: &mut dyn Write) -> anyhow::Result<()> {
    let policy = StrengthPolicy::new();
    for password in SAMPLE_PASSWORDS {
        let violations = policy.violations(password);
        write!(out, "{:<14}-> {}", password, ctx.verdict(violations.is_empty()))?;
        if !violations.is_empty() {
            let reasons: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
            write!(out, " ({})", reasons.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn handle_check_batch(ctx: &Context, out: &mut dyn Write) -> anyhow::Result<()> {
    let verdicts = StrengthPolicy::new().check_passwords(&SAMPLE_PASSWORDS);
    // Sorted so repeated runs print the same order
    let sorted: BTreeMap<_, _> = verdicts.into_iter().collect();
    for (password, strong) in sorted {
        writeln!(out, "{} -> {}", password, ctx.verdict(strong))?;
    }
    Ok(())
}

pub fn handle_generate(ctx: &Context, out: &mut dyn Write) -> anyhow::Result<()> {
    let password = PasswordGenerator::new().generate_password(ctx.config.default_password_length);
    writeln!(out, "Generated password: {}", password)?;
    Ok(())
}
