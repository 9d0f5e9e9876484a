//! Synthetic items for demos and benchmarks.
//!
//! Content is a pure function of `(seed, index)`, so runs are reproducible.

use crate::model::{Entry, EntryId};

const WORDS: &[&str] = &[
    "offset", "window", "measure", "scroll", "extent", "overscan", "frame", "range", "estimate",
    "viewport", "mount", "index", "prefix", "floor", "commit", "resize",
];

/// Upper bound on body lines in a generated entry.
pub const MAX_BODY_LINES: u64 = 8;

/// SplitMix64 finalizer.
fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Generate `count` entries with varying line counts and line lengths.
pub fn generate_entries(count: usize, seed: u64) -> Vec<Entry> {
    (0..count)
        .map(|i| {
            let mut state = mix(seed ^ mix(i as u64));
            let body_lines = state % (MAX_BODY_LINES + 1);

            let mut text = format!("Item {i}");
            for _ in 0..body_lines {
                state = mix(state);
                let words = 2 + (state % 14) as usize;
                let line: Vec<&str> = (0..words)
                    .map(|w| WORDS[(mix(state ^ w as u64) % WORDS.len() as u64) as usize])
                    .collect();
                text.push('\n');
                text.push_str(&line.join(" "));
            }

            Entry::new(EntryId::new(i as u64), text)
        })
        .collect()
}
