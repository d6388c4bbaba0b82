//! The version comparator used throughout conflict resolution.
//!
//! Deliberately simpler than Maven's qualifier-aware ordering (alpha <
//! beta < milestone < rc < snapshot < release < sp): split both strings
//! on `.` or `-`, compare parts numerically where both parse as integers
//! and lexicographically otherwise, and let the longer version win when
//! one is a strict prefix of the other. This is the comparator the
//! upstream Python resolver actually implements; qualifier precedence is
//! not defined anywhere in this codebase's inputs, so it isn't invented
//! here either.

use std::cmp::Ordering;

fn split(version: &str) -> Vec<&str> {
    version.split(['.', '-']).collect()
}

fn compare_part(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// Compare two version strings. `Greater` means `a` is the higher version.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a_parts = split(a);
    let b_parts = split(b);

    for (pa, pb) in a_parts.iter().zip(b_parts.iter()) {
        match compare_part(pa, pb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

/// `true` if `a` is strictly higher than `b`.
pub fn is_higher(a: &str, b: &str) -> bool {
    compare(a, b) == Ordering::Greater
}
