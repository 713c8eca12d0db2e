//! Brute-force inversion tests across widths and worker counts.

use hashvault::crypto::hash_password;
use hashvault::{BruteForcer, Candidate, CrackError, DigestAlgorithm, DigestEngine};

/// Every candidate of width 2 is recovered from its own digest
#[test]
fn test_inverts_every_two_digit_candidate() {
    let forcer = BruteForcer::default();
    for value in 0..100u64 {
        let candidate = Candidate::new(value, 2);
        let target = hash_password(&candidate.padded());
        assert_eq!(forcer.search(&target, 2).unwrap(), Some(candidate));
    }
}

/// Parallel search returns the same answer as the sequential one
#[test]
fn test_parallel_matches_sequential() {
    let sequential = BruteForcer::default();
    for workers in [2, 3, 7, 16] {
        let parallel = BruteForcer::default().with_workers(workers);
        for secret in ["0000", "0001", "4999", "5000", "9999", "1234"] {
            let target = hash_password(secret);
            let expected = sequential.search(&target, 4).unwrap();
            assert_eq!(parallel.search(&target, 4).unwrap(), expected);
            assert_eq!(expected.unwrap().padded(), secret);
        }
    }
}

/// A six-digit miss hashes all 1,000,000 candidates before giving up
#[test]
fn test_six_digit_miss_is_exhaustive() {
    let target = hash_password("not-a-6-digit-number-digest");
    let report = BruteForcer::default()
        .with_workers(4)
        .search_report(&target, 6)
        .unwrap();

    assert!(report.found.is_none());
    assert_eq!(report.space_size, 1_000_000);
    assert_eq!(report.candidates_tried, 1_000_000);
    assert!(report.is_exhaustive_miss());
}

/// Workers stop early once any of them finds the secret
#[test]
fn test_parallel_hit_short_circuits() {
    let target = hash_password("000003");
    let report = BruteForcer::default()
        .with_workers(4)
        .search_report(&target, 6)
        .unwrap();

    assert_eq!(report.found, Some(Candidate::new(3, 6)));
    assert!(report.candidates_tried < report.space_size);
}

/// The engine used for hashing candidates must match the target's algorithm
#[test]
fn test_sha512_targets_need_a_sha512_engine() {
    let engine = DigestEngine::new(DigestAlgorithm::Sha512);
    let target = engine.hash_password("042");

    let found = BruteForcer::new(engine).search(&target, 3).unwrap();
    assert_eq!(found, Some(Candidate::new(42, 3)));

    let report = BruteForcer::default().search_report(&target, 3).unwrap();
    assert!(report.found.is_none());
    assert_eq!(report.candidates_tried, 0);
}

#[test]
fn test_width_bounds() {
    let target = hash_password("1");
    assert!(matches!(
        BruteForcer::default().search(&target, 0),
        Err(CrackError::InvalidWidth(0))
    ));
    assert_eq!(
        BruteForcer::default().search(&target, 1).unwrap(),
        Some(Candidate::new(1, 1))
    );
}
