//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique (prevents domain collision)
//! 3. All domains are null-terminated (wire format invariant)
//! 4. All domains follow `WAYPOINT::*::V1\0` naming convention
//! 5. No raw `WAYPOINT::` domain literals in production source outside `hash_domain.rs`
//! 6. `canonical_hash` is exactly `sha256(domain || data)`, recomputed here
//!    independently of the kernel

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use waypoint_kernel::proof::hash::canonical_hash;
use waypoint_kernel::proof::hash_domain::HashDomain;

const PRODUCTION_DIRS: [&str; 3] = [
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src"),
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../harness/src"),
];

// ---------------------------------------------------------------------------
// 1. Canonical set count
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        7,
        "expected 7 domain variants; if you added a new domain, update this count"
    );
}

// ---------------------------------------------------------------------------
// 2. All unique bytes
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
    }
}

#[test]
fn same_bytes_in_different_domains_hash_differently() {
    let a = canonical_hash(HashDomain::SearchReport, b"{}");
    let b = canonical_hash(HashDomain::RelaxReport, b"{}");
    assert_ne!(a, b);
}

// ---------------------------------------------------------------------------
// 3. All null-terminated
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_null_terminated() {
    for domain in HashDomain::ALL {
        assert!(
            domain.as_bytes().ends_with(&[0]),
            "{domain} is not null-terminated"
        );
        let interior = &domain.as_bytes()[..domain.as_bytes().len() - 1];
        assert!(!interior.contains(&0), "{domain} has an interior null");
    }
}

// ---------------------------------------------------------------------------
// 4. Naming convention
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"WAYPOINT::"),
            "{domain} does not start with WAYPOINT::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain} does not end with ::V1\\0"
        );
    }
}

// ---------------------------------------------------------------------------
// 5. No raw WAYPOINT:: domain literals in production source
// ---------------------------------------------------------------------------

/// The only file allowed to contain `b"WAYPOINT::` literals is `hash_domain.rs`.
#[test]
fn no_raw_domain_literals_outside_authority() {
    let pattern = "b\"WAYPOINT::";
    let authority_file = "hash_domain.rs";
    let mut violations = Vec::new();
    let mut scanned = 0usize;

    for dir in PRODUCTION_DIRS {
        scanned += scan_dir_for_pattern(Path::new(dir), pattern, authority_file, &mut violations);
    }

    assert!(scanned > 0, "no production sources found to scan");
    assert!(
        violations.is_empty(),
        "raw WAYPOINT:: domain literals found outside {authority_file}:\n{}",
        violations.join("\n")
    );
}

// ---------------------------------------------------------------------------
// 6. Independent recomputation
// ---------------------------------------------------------------------------

#[test]
fn canonical_hash_matches_independent_sha256() {
    let payloads: [&[u8]; 3] = [b"", b"{}", b"\x00\xff waypoint"];
    for domain in HashDomain::ALL {
        for payload in payloads {
            let mut hasher = Sha256::new();
            hasher.update(domain.as_bytes());
            hasher.update(payload);
            let expected = format!("sha256:{}", hex::encode(hasher.finalize()));
            assert_eq!(
                canonical_hash(*domain, payload).as_str(),
                expected,
                "{domain} digest drifted"
            );
        }
    }
}

/// Returns the number of files scanned.
fn scan_dir_for_pattern(
    dir: &Path,
    pattern: &str,
    authority_file: &str,
    violations: &mut Vec<String>,
) -> usize {
    let mut scanned = 0;
    for path in walkdir(dir) {
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(authority_file) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        scanned += 1;

        // Skip #[cfg(test)] module blocks via brace-depth tracking.
        let mut brace_depth: usize = 0;
        let mut skip_depth: Option<usize> = None;
        let mut cfg_test_pending = false;

        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.contains("#[cfg(test)]") {
                cfg_test_pending = true;
                continue;
            }

            let opens = line.chars().filter(|&c| c == '{').count();
            let closes = line.chars().filter(|&c| c == '}').count();

            if cfg_test_pending && opens > 0 {
                skip_depth = Some(brace_depth);
                cfg_test_pending = false;
            }

            brace_depth = brace_depth.saturating_add(opens);
            brace_depth = brace_depth.saturating_sub(closes);

            if let Some(depth) = skip_depth {
                if brace_depth <= depth {
                    skip_depth = None;
                }
                continue;
            }

            if trimmed.starts_with("//") {
                continue;
            }

            if trimmed.contains(pattern) {
                violations.push(format!("  {}:{}: {}", path.display(), i + 1, trimmed));
            }
        }
    }
    scanned
}

/// Simple recursive directory walker (avoids adding walkdir dependency).
fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(walkdir(&path));
            } else {
                results.push(path);
            }
        }
    }
    results
}
