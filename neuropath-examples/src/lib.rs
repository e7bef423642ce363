//! Shared fixtures for the neuropath examples.

use neuropath::{MockGenerator, Turn};

/// Fabricated completed history of `rounds` rounds for `topic`.
///
/// The picked option cycles per round so the chosen path bends between
/// branches instead of running straight down one column.
pub fn demo_history(topic: &str, rounds: u32) -> Vec<Turn> {
    (1..=rounds)
        .map(|round| {
            let options = MockGenerator::batch(topic, round);
            let selected = Some(options[(round as usize) % options.len()].clone());
            Turn {
                round,
                options,
                selected,
            }
        })
        .collect()
}
