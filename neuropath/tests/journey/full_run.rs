//! Complete journeys: phases, history invariants, view model, events.

use tokio_stream::StreamExt;

use neuropath::{Phase, SessionEvent, CARDS_PER_ROUND, TOTAL_ROUNDS};

use crate::common::{play_rounds, scripted_runner};

/// **Scenario**: After 8 successful rounds the session is terminal with a
/// summary and 8 completed turns.
#[tokio::test]
async fn eight_rounds_reach_summary() {
    let mut runner = scripted_runner();
    runner.start("Coffee").await.unwrap();
    play_rounds(&mut runner, TOTAL_ROUNDS, 0).await;

    let view = runner.view();
    assert_eq!(view.phase, Phase::Summary);
    assert!(view.summary.is_some());

    let session = runner.engine().session();
    assert_eq!(session.completed_rounds(), TOTAL_ROUNDS);
    for (i, turn) in session.history().iter().enumerate() {
        assert_eq!(turn.round, i as u32 + 1);
        assert_eq!(turn.options.len(), CARDS_PER_ROUND);
        assert!(turn.selected.is_some());
        let id = turn.selected_id().unwrap();
        assert!(turn.options.iter().any(|c| c.id == id));
    }
}

/// **Scenario**: The view reports round M/8 and the matching progress
/// fraction while playing.
#[tokio::test]
async fn view_progress_tracks_rounds() {
    let mut runner = scripted_runner();
    runner.start("Coffee").await.unwrap();

    for played in 0..3u32 {
        let view = runner.view();
        assert_eq!(view.round, played + 1);
        let expected = (played + 1) as f32 / TOTAL_ROUNDS as f32;
        assert!((view.progress - expected).abs() < f32::EPSILON);
        let id = view.options[0].id.clone();
        runner.choose(&id).await.unwrap();
    }
}

/// **Scenario**: The mock summary reflects the actual chosen path.
#[tokio::test]
async fn summary_reflects_chosen_path() {
    let mut runner = scripted_runner();
    runner.start("Coffee").await.unwrap();
    play_rounds(&mut runner, TOTAL_ROUNDS, 1).await;

    let summary = runner.view().summary.unwrap();
    assert_eq!(summary.key_takeaways.len(), TOTAL_ROUNDS as usize);
    let chosen: Vec<String> = runner
        .engine()
        .session()
        .history()
        .iter()
        .map(|t| t.selected.as_ref().unwrap().title.clone())
        .collect();
    assert_eq!(summary.key_takeaways, chosen);
}

/// **Scenario**: Subscribed events narrate the whole journey in order:
/// options for rounds 1..=8, then the summary.
#[tokio::test]
async fn events_narrate_the_journey() {
    let mut runner = scripted_runner();
    let events = runner.subscribe(256);

    runner.start("Coffee").await.unwrap();
    play_rounds(&mut runner, TOTAL_ROUNDS, 0).await;
    drop(runner);

    let events: Vec<SessionEvent> = events.collect().await;

    let rounds: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::OptionsReady { round } => Some(*round),
            _ => None,
        })
        .collect();
    assert_eq!(rounds, (1..=TOTAL_ROUNDS).collect::<Vec<_>>());

    assert!(events.contains(&SessionEvent::SummaryReady));
    assert_eq!(
        events.last(),
        Some(&SessionEvent::PhaseChanged(Phase::Summary))
    );
    assert!(!events
        .iter()
        .any(|e| matches!(e, SessionEvent::GenerationFailed { .. })));
}
