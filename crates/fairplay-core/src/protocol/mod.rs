//! Move sets, rounds and the reveal transcript.

mod messages;
mod moves;
mod picker;
mod round;
mod types;

pub use messages::RoundResult;
pub use moves::{MoveIndex, MoveSet, MoveSetError, MoveSetViolation};
pub use picker::{FixedPicker, MovePicker, RandomPicker};
pub use round::{GameSession, Round, RoundError};
pub use types::{RoundId, RoundPhase};
