//! Journey runner: drives the turn engine against a card generator.
//!
//! Wraps the engine's request/apply exchange into plain async calls for
//! callers that do not need the message form: `start` and `choose` issue the
//! engine request, resolve it against the generator, and feed the response
//! back. Generator calls are serialized by construction: each operation
//! requires a stable phase first, so no two calls are ever in flight for the
//! same session.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::{
    ApplyOutcome, EngineError, GeneratorRequest, SessionEvent, SessionView, TurnEngine,
};
use crate::generator::{CardGenerator, GenerationError};
use crate::session::Phase;

/// Error surfaced by runner operations.
///
/// Engine defects pass through unchanged; generator failures are surfaced
/// after the engine has already settled into its recovery state (idle after a
/// failed start, playing with restored options after a failed mid-game fetch).
#[derive(Debug, Error)]
pub enum JourneyError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Runs a journey: engine + generator + optional event stream.
///
/// **Interaction**: Used by the CLI and the examples; holds the only
/// `TurnEngine` for the session and an `Arc<dyn CardGenerator>`.
pub struct JourneyRunner {
    engine: TurnEngine,
    generator: Arc<dyn CardGenerator>,
    event_tx: Option<mpsc::Sender<SessionEvent>>,
}

impl JourneyRunner {
    /// Creates a runner over the given generator.
    pub fn new(generator: Arc<dyn CardGenerator>) -> Self {
        Self {
            engine: TurnEngine::new(),
            generator,
            event_tx: None,
        }
    }

    /// Read access to the engine (and through it, the session).
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Current view model.
    pub fn view(&self) -> SessionView {
        self.engine.view()
    }

    /// Subscribes to session events. Replaces any previous subscription;
    /// events are dropped, not blocked on, when the buffer is full.
    pub fn subscribe(&mut self, capacity: usize) -> ReceiverStream<SessionEvent> {
        let (tx, rx) = mpsc::channel(capacity);
        self.event_tx = Some(tx);
        ReceiverStream::new(rx)
    }

    /// Starts a session for `topic` and resolves the opening batch.
    ///
    /// On generator failure the session is already discarded back to idle
    /// when the error is returned.
    pub async fn start(&mut self, topic: &str) -> Result<(), JourneyError> {
        let request = self.engine.start_session(topic)?;
        self.emit(SessionEvent::PhaseChanged(Phase::Loading));
        self.dispatch(request).await
    }

    /// Records a choice and resolves the follow-up request (next batch or
    /// summary).
    ///
    /// On a mid-game generator failure the selection is already rolled back
    /// when the error is returned; re-selecting retries.
    pub async fn choose(&mut self, card_id: &str) -> Result<(), JourneyError> {
        let request = self.engine.select_card(card_id)?;
        self.emit(SessionEvent::PhaseChanged(Phase::Loading));
        self.dispatch(request).await
    }

    /// Discards the session and returns to idle.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.emit(SessionEvent::PhaseChanged(Phase::Idle));
    }

    async fn dispatch(&mut self, request: GeneratorRequest) -> Result<(), JourneyError> {
        match request {
            GeneratorRequest::InitialBatch { token, topic } => {
                let result = self.generator.initial_batch(&topic).await;
                let outcome = self.engine.apply_batch(token, result)?;
                self.finish_batch(outcome, "initial batch")
            }
            GeneratorRequest::NextBatch {
                token,
                topic,
                history,
                target_round,
            } => {
                let result = self
                    .generator
                    .next_batch(&topic, &history, target_round)
                    .await;
                let outcome = self.engine.apply_batch(token, result)?;
                self.finish_batch(outcome, "next batch")
            }
            GeneratorRequest::Summary {
                token,
                topic,
                history,
            } => {
                let result = self.generator.summary(&topic, &history).await;
                let outcome = self.engine.apply_summary(token, result)?;
                match outcome {
                    ApplyOutcome::SummaryReady => {
                        self.emit(SessionEvent::SummaryReady);
                        self.emit(SessionEvent::PhaseChanged(Phase::Summary));
                        Ok(())
                    }
                    ApplyOutcome::Stale => {
                        self.emit(SessionEvent::StaleResponseDiscarded);
                        Ok(())
                    }
                    other => unreachable!("apply_summary cannot yield {:?}", other),
                }
            }
        }
    }

    fn finish_batch(
        &mut self,
        outcome: ApplyOutcome,
        operation: &'static str,
    ) -> Result<(), JourneyError> {
        match outcome {
            ApplyOutcome::OptionsReady => {
                self.emit(SessionEvent::OptionsReady {
                    round: self.engine.view().round,
                });
                self.emit(SessionEvent::PhaseChanged(Phase::Playing));
                Ok(())
            }
            ApplyOutcome::Aborted { error } => {
                self.emit(SessionEvent::GenerationFailed {
                    operation,
                    rolled_back: false,
                });
                self.emit(SessionEvent::PhaseChanged(Phase::Idle));
                Err(error.into())
            }
            ApplyOutcome::RolledBack { error } => {
                self.emit(SessionEvent::GenerationFailed {
                    operation,
                    rolled_back: true,
                });
                self.emit(SessionEvent::PhaseChanged(Phase::Playing));
                Err(error.into())
            }
            ApplyOutcome::Stale => {
                self.emit(SessionEvent::StaleResponseDiscarded);
                Ok(())
            }
            ApplyOutcome::SummaryReady => unreachable!("apply_batch cannot yield SummaryReady"),
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.event_tx {
            // Ignore send errors (consumer may have dropped or lagged).
            let _ = tx.try_send(event);
        }
    }
}
