//! Shared helpers for journey integration tests.

use std::sync::Arc;

use neuropath::{JourneyRunner, MockGenerator, Phase};

/// Runner over an always-succeeding scripted generator.
pub fn scripted_runner() -> JourneyRunner {
    JourneyRunner::new(Arc::new(MockGenerator::new()))
}

/// Runner over a custom-configured scripted generator.
pub fn runner_with(generator: MockGenerator) -> JourneyRunner {
    JourneyRunner::new(Arc::new(generator))
}

/// Plays `rounds` rounds, always choosing the option at `pick`.
pub async fn play_rounds(runner: &mut JourneyRunner, rounds: u32, pick: usize) {
    for _ in 0..rounds {
        assert_eq!(runner.view().phase, Phase::Playing, "not in a playable state");
        let id = runner.view().options[pick].id.clone();
        runner
            .choose(&id)
            .await
            .expect("scripted round should succeed");
    }
}
