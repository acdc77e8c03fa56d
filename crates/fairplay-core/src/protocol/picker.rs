//! Committer move selection.

use super::{MoveIndex, MoveSet};
use rand::rngs::ThreadRng;
use rand::Rng;

/// Chooses the committer's move for a round.
pub trait MovePicker {
    fn pick(&mut self, moves: &MoveSet) -> MoveIndex;
}

/// Uniform choice from an injected RNG
pub struct RandomPicker<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<ThreadRng> {
    /// Picker backed by the thread-local RNG
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> MovePicker for RandomPicker<R> {
    fn pick(&mut self, moves: &MoveSet) -> MoveIndex {
        MoveIndex(self.rng.gen_range(0..moves.len()))
    }
}

/// Always plays the same move. Out-of-range indices wrap.
#[derive(Clone, Copy, Debug)]
pub struct FixedPicker(pub MoveIndex);

impl MovePicker for FixedPicker {
    fn pick(&mut self, moves: &MoveSet) -> MoveIndex {
        MoveIndex(self.0 .0 % moves.len())
    }
}
