//! Circulant outcome matrix.

use super::{Outcome, RuleError};

/// N x N outcome table indexed `[committer][responder]`.
///
/// Row 0 is `Draw`, then H = (N-1)/2 `Win`s, then H `Lose`s; every following
/// row is the previous one rotated right by one. The cell therefore depends only
/// on `(responder - committer) mod N`, and a `Win` means the responder wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeMatrix {
    size: usize,
    cells: Vec<Outcome>,
}

impl OutcomeMatrix {
    /// Build the matrix for a move set of `size` moves.
    pub fn build(size: usize) -> Result<Self, RuleError> {
        if size < 3 || size % 2 == 0 {
            return Err(RuleError::InvalidMoveSet { size });
        }
        let half = (size - 1) / 2;

        let first_row: Vec<Outcome> = (0..size)
            .map(|col| match col {
                0 => Outcome::Draw,
                c if c <= half => Outcome::Win,
                _ => Outcome::Lose,
            })
            .collect();

        let cells = (0..size)
            .flat_map(|shift| {
                let mut row = first_row.clone();
                row.rotate_right(shift);
                row
            })
            .collect();

        Ok(Self { size, cells })
    }

    /// Number of moves
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of wins (and of losses) in every row
    pub fn half(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Cell at `[committer][responder]`
    pub fn get(&self, committer: usize, responder: usize) -> Result<Outcome, RuleError> {
        self.check(committer)?;
        self.check(responder)?;
        Ok(self.cells[committer * self.size + responder])
    }

    /// Full row for one committer move
    pub fn row(&self, committer: usize) -> Result<&[Outcome], RuleError> {
        self.check(committer)?;
        let start = committer * self.size;
        Ok(&self.cells[start..start + self.size])
    }

    /// All rows in committer order
    pub fn rows(&self) -> impl Iterator<Item = &[Outcome]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Outcome for the responder when the committer played `committer`.
    pub fn resolve(&self, committer: usize, responder: usize) -> Result<Outcome, RuleError> {
        self.get(committer, responder)
    }

    fn check(&self, index: usize) -> Result<(), RuleError> {
        if index < self.size {
            Ok(())
        } else {
            Err(RuleError::IndexOutOfRange {
                index,
                size: self.size,
            })
        }
    }
}
