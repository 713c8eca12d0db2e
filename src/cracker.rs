// src/cracker.rs
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use thiserror::Error;

use crate::crypto::DigestEngine;
use crate::models::{Candidate, Digest};

/// Widest candidate space we enumerate; 10^18 still fits in a `u64`.
pub const MAX_WIDTH: usize = 18;

#[derive(Debug, Error)]
pub enum CrackError {
    #[error("Candidate width must be between 1 and {max}, got {0}", max = MAX_WIDTH)]
    InvalidWidth(usize),

    #[error("Cannot start search workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, CrackError>;

/// Outcome of a search, with the instrumentation needed to prove exhaustiveness.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub found: Option<Candidate>,
    pub candidates_tried: u64,
    pub space_size: u64,
    pub elapsed: Duration,
}

impl SearchReport {
    /// True when nothing matched and every candidate in the space was hashed.
    pub fn is_exhaustive_miss(&self) -> bool {
        self.found.is_none() && self.candidates_tried == self.space_size
    }
}

/// Inverts a digest by hashing every zero-padded number of a given width.
#[derive(Debug, Clone)]
pub struct BruteForcer {
    engine: DigestEngine,
    workers: usize,
}

impl BruteForcer {
    pub fn new(engine: DigestEngine) -> Self {
        Self { engine, workers: 1 }
    }

    /// Search on a pool of `workers` threads. Zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn search(&self, target: &Digest, width: usize) -> Result<Option<Candidate>> {
        self.search_report(target, width).map(|report| report.found)
    }

    pub fn search_report(&self, target: &Digest, width: usize) -> Result<SearchReport> {
        let space_size = space_size(width)?;
        let started = Instant::now();

        if target.len() != self.engine.digest_len() {
            log::warn!(
                "Target digest has {} characters but {} produces {}; no candidate can match",
                target.len(),
                self.engine.algorithm().name(),
                self.engine.digest_len()
            );
            return Ok(SearchReport {
                found: None,
                candidates_tried: 0,
                space_size,
                elapsed: started.elapsed(),
            });
        }

        log::info!(
            "Searching {} candidates of width {} with {} worker(s)",
            space_size,
            width,
            self.workers
        );

        let (found, candidates_tried) = if self.workers == 1 {
            scan(&self.engine, target, width, space_size)
        } else {
            self.scan_parallel(target, width, space_size)?
        };

        let report = SearchReport {
            found: found.map(|value| Candidate::new(value, width)),
            candidates_tried,
            space_size,
            elapsed: started.elapsed(),
        };

        match report.found {
            Some(candidate) => log::info!(
                "Match {} found after {} candidates in {:?}",
                candidate,
                report.candidates_tried,
                report.elapsed
            ),
            None => log::info!(
                "No match after {} candidates in {:?}",
                report.candidates_tried,
                report.elapsed
            ),
        }

        Ok(report)
    }

    // find_first keeps the lowest matching candidate, same as the sequential scan
    fn scan_parallel(
        &self,
        target: &Digest,
        width: usize,
        space_size: u64,
    ) -> Result<(Option<u64>, u64)> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;
        let tried = AtomicU64::new(0);
        let engine = &self.engine;

        let found = pool.install(|| {
            (0..space_size).into_par_iter().find_first(|&value| {
                tried.fetch_add(1, Ordering::Relaxed);
                let candidate = format!("{:0width$}", value, width = width);
                engine.hash(candidate.as_bytes()) == *target
            })
        });

        Ok((found, tried.into_inner()))
    }
}

impl Default for BruteForcer {
    fn default() -> Self {
        Self::new(DigestEngine::default())
    }
}

// Convenience: single-threaded SHA-256 search
pub fn brute_force(target: &Digest, width: usize) -> Result<Option<Candidate>> {
    BruteForcer::default().search(target, width)
}

fn space_size(width: usize) -> Result<u64> {
    if width == 0 || width > MAX_WIDTH {
        return Err(CrackError::InvalidWidth(width));
    }
    Ok(10u64.pow(width as u32))
}

// Hash each candidate in ascending order, stopping at the first match
fn scan(
    engine: &DigestEngine,
    target: &Digest,
    width: usize,
    space_size: u64,
) -> (Option<u64>, u64) {
    let mut buf = String::with_capacity(width);
    let mut tried = 0;

    for value in 0..space_size {
        buf.clear();
        let _ = write!(buf, "{:0width$}", value, width = width);
        tried += 1;

        if engine.hash(buf.as_bytes()) == *target {
            return (Some(value), tried);
        }
    }

    (None, tried)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash_password;

    #[test]
    fn rejects_out_of_range_widths() {
        let target = hash_password("1");
        assert!(matches!(brute_force(&target, 0), Err(CrackError::InvalidWidth(0))));
        assert!(matches!(brute_force(&target, 19), Err(CrackError::InvalidWidth(19))));
    }

    #[test]
    fn finds_zero_padded_secret() {
        let target = hash_password("0042");
        let found = brute_force(&target, 4).unwrap();
        assert_eq!(found, Some(Candidate::new(42, 4)));
    }

    #[test]
    fn single_worker_stops_right_after_match() {
        let target = hash_password("0137");
        let report = BruteForcer::default().search_report(&target, 4).unwrap();
        assert_eq!(report.found.unwrap().padded(), "0137");
        // Ascending scan: exactly value + 1 candidates hashed
        assert_eq!(report.candidates_tried, 138);
    }

    #[test]
    fn exhaustive_miss_counts_every_candidate() {
        let target = hash_password("not-a-4-digit-number");
        let report = BruteForcer::default().search_report(&target, 4).unwrap();
        assert!(report.found.is_none());
        assert_eq!(report.candidates_tried, 10_000);
        assert!(report.is_exhaustive_miss());
    }

    #[test]
    fn mismatched_digest_length_never_matches() {
        let target = Digest::parse("abcd").unwrap();
        let report = BruteForcer::default().search_report(&target, 3).unwrap();
        assert!(report.found.is_none());
        assert_eq!(report.candidates_tried, 0);
    }

    #[test]
    fn parallel_scan_returns_the_lowest_match() {
        let target = hash_password("7301");
        let report = BruteForcer::default()
            .with_workers(3)
            .search_report(&target, 4)
            .unwrap();
        assert_eq!(report.found, Some(Candidate::new(7301, 4)));
    }

    #[test]
    fn parallel_miss_counts_every_candidate() {
        let target = hash_password("not-a-3-digit-number");
        let report = BruteForcer::default()
            .with_workers(4)
            .search_report(&target, 3)
            .unwrap();
        assert_eq!(report.candidates_tried, 1_000);
        assert!(report.is_exhaustive_miss());
    }

    #[test]
    fn widest_space_is_accepted() {
        assert_eq!(space_size(MAX_WIDTH).unwrap(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn zero_workers_is_clamped_to_one() {
        assert_eq!(BruteForcer::default().with_workers(0).workers(), 1);
    }
}
