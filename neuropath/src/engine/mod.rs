//! Turn engine: the session state machine.
//!
//! `TurnEngine` owns the session and exposes request/apply operations:
//! `start_session` and `select_card` return a [`GeneratorRequest`] instead of
//! calling the generator themselves, and the response is fed back through
//! `apply_batch` / `apply_summary`. [`JourneyRunner`] wraps that exchange
//! into plain async calls for callers that do not need the message form.

mod error;
mod events;
pub mod logging;
mod request;
mod runner;
mod turn_engine;
mod view;

pub use error::EngineError;
pub use events::SessionEvent;
pub use request::{ApplyOutcome, GeneratorRequest, RequestToken};
pub use runner::{JourneyError, JourneyRunner};
pub use turn_engine::TurnEngine;
pub use view::SessionView;
