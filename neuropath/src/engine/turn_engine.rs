//! The session state machine: owns the session and drives phase transitions.

use super::logging;
use super::{ApplyOutcome, EngineError, GeneratorRequest, RequestToken, SessionView};
use crate::card::{KnowledgeCard, Summary, Turn};
use crate::generator::{validate_batch, GenerationError};
use crate::session::{Phase, Session, TOTAL_ROUNDS};

/// Turn engine: the only owner of session state.
///
/// Operations either reject a caller defect (`EngineError`) or succeed and
/// return the next [`GeneratorRequest`] to resolve. Responses come back via
/// `apply_batch` / `apply_summary`, which check the request token against the
/// current session generation: a response issued before a `reset` is stale
/// and discarded.
///
/// **Interaction**: Driven directly in tests, or through `JourneyRunner`
/// which resolves requests against a `CardGenerator`.
pub struct TurnEngine {
    session: Session,
    /// Bumped on every reset and session start; tokens from older generations
    /// are stale.
    generation: u64,
}

impl TurnEngine {
    /// Creates an engine with an idle session.
    pub fn new() -> Self {
        Self {
            session: Session::default(),
            generation: 0,
        }
    }

    /// Read access to the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current view model for a presentation layer.
    pub fn view(&self) -> SessionView {
        SessionView::of(&self.session)
    }

    fn token(&self) -> RequestToken {
        RequestToken {
            generation: self.generation,
        }
    }

    fn is_stale(&self, token: RequestToken) -> bool {
        token.generation != self.generation
    }

    /// Begins a new session for `topic`.
    ///
    /// Requires the `Idle` phase and a non-empty trimmed topic. Clears any
    /// previous history and summary, parks the session in `Loading`, and
    /// returns the request for the opening batch.
    pub fn start_session(&mut self, topic: &str) -> Result<GeneratorRequest, EngineError> {
        if self.session.phase != Phase::Idle {
            return Err(EngineError::InvalidPhase {
                operation: "start_session",
                phase: self.session.phase,
            });
        }
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(EngineError::EmptyTopic);
        }

        self.generation += 1;
        self.session = Session::begin(topic);
        logging::log_session_started(topic);

        Ok(GeneratorRequest::InitialBatch {
            token: self.token(),
            topic: topic.to_string(),
        })
    }

    /// Records the user's choice for the current round.
    ///
    /// Requires the `Playing` phase; `card_id` must belong to the current
    /// options (anything else is a contract violation, not a recoverable
    /// condition). Appends the completed turn, parks the session in
    /// `Loading`, and returns the summary request when the round count
    /// reaches [`TOTAL_ROUNDS`], otherwise the request for the next batch.
    pub fn select_card(&mut self, card_id: &str) -> Result<GeneratorRequest, EngineError> {
        if self.session.phase != Phase::Playing {
            return Err(EngineError::InvalidPhase {
                operation: "select_card",
                phase: self.session.phase,
            });
        }
        let card = self
            .session
            .current_options
            .iter()
            .find(|c| c.id == card_id)
            .cloned()
            .ok_or_else(|| EngineError::CardNotOffered(card_id.to_string()))?;

        let round = self.session.completed_rounds() + 1;
        let options = std::mem::take(&mut self.session.current_options);
        self.session.history.push(Turn {
            round,
            options,
            selected: Some(card),
        });
        self.session.phase = Phase::Loading;
        logging::log_round_completed(round, card_id);

        let token = self.token();
        let topic = self.session.topic.clone();
        let history = self.session.history.clone();
        if round >= TOTAL_ROUNDS {
            Ok(GeneratorRequest::Summary {
                token,
                topic,
                history,
            })
        } else {
            Ok(GeneratorRequest::NextBatch {
                token,
                topic,
                history,
                target_round: round + 1,
            })
        }
    }

    /// Applies the result of a batch request.
    ///
    /// A stale token discards the response. A valid batch becomes the current
    /// options and the session returns to `Playing`. A failure before the
    /// first round discards the session (`Aborted`); a mid-game failure rolls
    /// the last turn back and restores its options (`RolledBack`), so the
    /// user keeps a way forward and re-selecting retries the fetch.
    pub fn apply_batch(
        &mut self,
        token: RequestToken,
        result: Result<Vec<KnowledgeCard>, GenerationError>,
    ) -> Result<ApplyOutcome, EngineError> {
        if self.is_stale(token) {
            logging::log_stale_response("batch");
            return Ok(ApplyOutcome::Stale);
        }
        if self.session.phase != Phase::Loading {
            return Err(EngineError::InvalidPhase {
                operation: "apply_batch",
                phase: self.session.phase,
            });
        }

        let checked = result.and_then(|batch| self.check_batch(batch));
        match checked {
            Ok(batch) => {
                self.session.current_options = batch;
                self.session.phase = Phase::Playing;
                Ok(ApplyOutcome::OptionsReady)
            }
            Err(error) => {
                if self.session.history.is_empty() {
                    logging::log_generation_failed("initial batch", &error);
                    self.reset();
                    Ok(ApplyOutcome::Aborted { error })
                } else {
                    logging::log_generation_failed("next batch", &error);
                    let turn = self
                        .session
                        .history
                        .pop()
                        .expect("mid-game failure implies a completed turn");
                    self.session.current_options = turn.options;
                    self.session.phase = Phase::Playing;
                    Ok(ApplyOutcome::RolledBack { error })
                }
            }
        }
    }

    /// Applies the result of a summary request.
    ///
    /// A stale token discards the response. On failure the fixed fallback
    /// summary is stored instead, so the session still reaches its terminal,
    /// displayable state.
    pub fn apply_summary(
        &mut self,
        token: RequestToken,
        result: Result<Summary, GenerationError>,
    ) -> Result<ApplyOutcome, EngineError> {
        if self.is_stale(token) {
            logging::log_stale_response("summary");
            return Ok(ApplyOutcome::Stale);
        }
        if self.session.phase != Phase::Loading {
            return Err(EngineError::InvalidPhase {
                operation: "apply_summary",
                phase: self.session.phase,
            });
        }

        let summary = result.unwrap_or_else(|error| {
            logging::log_generation_failed("summary", &error);
            Summary::fallback()
        });
        self.session.summary = Some(summary);
        self.session.phase = Phase::Summary;
        Ok(ApplyOutcome::SummaryReady)
    }

    /// Unconditionally returns to `Idle`, discarding topic, history, options,
    /// and summary. In-flight responses become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.session = Session::default();
        logging::log_session_reset();
    }

    /// Batch validation at the engine seam: the shared id contract plus a
    /// check against ids already used earlier in the session (including the
    /// reserved root id), so graph node identities cannot collide.
    fn check_batch(
        &self,
        batch: Vec<KnowledgeCard>,
    ) -> Result<Vec<KnowledgeCard>, GenerationError> {
        let batch = validate_batch(batch)?;
        for card in &batch {
            if card.id == crate::graph::ROOT_ID {
                return Err(GenerationError::Malformed(format!(
                    "card id {:?} is reserved",
                    card.id
                )));
            }
            let reused = self
                .session
                .history
                .iter()
                .flat_map(|t| t.options.iter())
                .any(|prior| prior.id == card.id);
            if reused {
                return Err(GenerationError::Malformed(format!(
                    "card id {:?} already used this session",
                    card.id
                )));
            }
        }
        Ok(batch)
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}
