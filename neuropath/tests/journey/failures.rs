//! Failure paths: aborted starts, mid-game rollback and retry, summary
//! fallback, contract violations.

use neuropath::{
    EngineError, JourneyError, MockGenerator, Phase, Summary, CARDS_PER_ROUND, TOTAL_ROUNDS,
};

use crate::common::{play_rounds, runner_with, scripted_runner};

/// **Scenario**: A failed opening batch surfaces the error and discards the
/// session; starting again succeeds.
#[tokio::test]
async fn failed_start_discards_session() {
    let mut runner = runner_with(MockGenerator::new().with_failing_batch(1));

    let err = runner.start("Coffee").await.unwrap_err();
    assert!(matches!(err, JourneyError::Generation(_)));
    let view = runner.view();
    assert_eq!(view.phase, Phase::Idle);
    assert!(view.topic.is_empty());
    assert!(view.options.is_empty());

    runner.start("Coffee").await.unwrap();
    assert_eq!(runner.view().phase, Phase::Playing);
}

/// **Scenario**: A mid-game batch failure rolls the selection back; the
/// previous options are offered again and re-selecting retries successfully.
#[tokio::test]
async fn mid_game_failure_rolls_back_then_retries() {
    let mut runner = runner_with(MockGenerator::new().with_failing_batch(3));
    runner.start("Coffee").await.unwrap();
    play_rounds(&mut runner, 1, 0).await;

    let round2 = runner.view().options;
    let picked = round2[2].id.clone();
    let err = runner.choose(&picked).await.unwrap_err();
    assert!(matches!(err, JourneyError::Generation(_)));

    // Rolled back: one completed round, round-2 options restored, playable.
    let view = runner.view();
    assert_eq!(view.phase, Phase::Playing);
    assert_eq!(view.round, 2);
    assert_eq!(view.options, round2);
    assert_eq!(runner.engine().session().completed_rounds(), 1);

    // The retry goes through and the journey continues to the end.
    runner.choose(&picked).await.unwrap();
    assert_eq!(runner.engine().session().completed_rounds(), 2);
    play_rounds(&mut runner, TOTAL_ROUNDS - 2, 0).await;
    assert_eq!(runner.view().phase, Phase::Summary);
}

/// **Scenario**: A failed summary still terminates the session with the
/// fixed fallback summary.
#[tokio::test]
async fn summary_failure_uses_fallback() {
    let mut runner = runner_with(MockGenerator::new().with_failing_summary());
    runner.start("Coffee").await.unwrap();
    play_rounds(&mut runner, TOTAL_ROUNDS, 0).await;

    let view = runner.view();
    assert_eq!(view.phase, Phase::Summary);
    assert_eq!(view.summary, Some(Summary::fallback()));
}

/// **Scenario**: Choosing a card that was never offered is rejected as a
/// contract violation without touching the session.
#[tokio::test]
async fn unoffered_card_is_contract_violation() {
    let mut runner = scripted_runner();
    runner.start("Coffee").await.unwrap();

    let err = runner.choose("round5-opt1").await.unwrap_err();
    assert!(matches!(
        err,
        JourneyError::Engine(EngineError::CardNotOffered(_))
    ));
    let view = runner.view();
    assert_eq!(view.phase, Phase::Playing);
    assert_eq!(view.options.len(), CARDS_PER_ROUND);
    assert!(runner.engine().session().history().is_empty());
}

/// **Scenario**: Starting while a session is underway is rejected; the
/// session must be reset first.
#[tokio::test]
async fn start_requires_idle() {
    let mut runner = scripted_runner();
    runner.start("Coffee").await.unwrap();

    let err = runner.start("Tea").await.unwrap_err();
    assert!(matches!(
        err,
        JourneyError::Engine(EngineError::InvalidPhase { .. })
    ));

    runner.reset();
    runner.start("Tea").await.unwrap();
    assert_eq!(runner.view().topic, "Tea");
}
