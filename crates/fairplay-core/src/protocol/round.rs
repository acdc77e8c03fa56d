//! Game session and the per-round commit/resolve/reveal state machine.

use super::{MoveIndex, MovePicker, MoveSet, RoundId, RoundPhase, RoundResult};
use crate::crypto::{self, Commitment, CommitmentKey, CryptoError};
use crate::rules::{Outcome, OutcomeMatrix, RuleError};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while playing a round
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("Invalid move: {index} is not a move index (there are {size} moves)")]
    InvalidMove { index: usize, size: usize },

    #[error("Round already resolved")]
    AlreadyResolved,

    #[error("Round not resolved yet: the responder has not moved")]
    NotResolved,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Rules(#[from] RuleError),
}

/// A validated move set with its outcome matrix, reused for every round.
#[derive(Clone, Debug)]
pub struct GameSession {
    moves: MoveSet,
    matrix: OutcomeMatrix,
}

impl GameSession {
    pub fn new(moves: MoveSet) -> Result<Self, RoundError> {
        let matrix = OutcomeMatrix::build(moves.len())?;
        debug!(moves = moves.len(), "built outcome matrix");
        Ok(Self { moves, matrix })
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    pub fn matrix(&self) -> &OutcomeMatrix {
        &self.matrix
    }

    /// Commit to a fresh committer move under a fresh key.
    pub fn start_round<P: MovePicker + ?Sized>(&self, picker: &mut P) -> Result<Round<'_>, RoundError> {
        let key = crypto::generate_key()?;
        let committer = picker.pick(&self.moves);
        let name = self
            .moves
            .name(committer)
            .ok_or(RuleError::IndexOutOfRange {
                index: committer.get(),
                size: self.moves.len(),
            })?;
        let commitment = crypto::commit(name, &key);
        let id = RoundId::new();

        info!(round_id = %id, %commitment, "round committed");

        Ok(Round {
            id,
            session: self,
            key,
            committer,
            commitment,
            response: None,
        })
    }

    /// Run a whole round against an already chosen responder move.
    pub fn play_round<P: MovePicker + ?Sized>(
        &self,
        picker: &mut P,
        responder: usize,
    ) -> Result<RoundResult, RoundError> {
        let mut round = self.start_round(picker)?;
        round.respond(responder)?;
        round.reveal()
    }
}

/// One round in flight.
///
/// The committer's move and the key stay private until `reveal`, which only
/// succeeds once the responder's move has been recorded.
pub struct Round<'a> {
    id: RoundId,
    session: &'a GameSession,
    key: CommitmentKey,
    committer: MoveIndex,
    commitment: Commitment,
    response: Option<(MoveIndex, Outcome)>,
}

impl<'a> Round<'a> {
    pub fn id(&self) -> RoundId {
        self.id
    }

    /// The published commitment
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    pub fn phase(&self) -> RoundPhase {
        match self.response {
            None => RoundPhase::Committed,
            Some(_) => RoundPhase::Resolved,
        }
    }

    /// The resolved outcome, once the responder has moved
    pub fn outcome(&self) -> Option<Outcome> {
        self.response.map(|(_, outcome)| outcome)
    }

    /// Record the responder's move (0-based) and resolve the outcome.
    ///
    /// An out-of-range index leaves the round committed with the same commitment.
    pub fn respond(&mut self, index: usize) -> Result<Outcome, RoundError> {
        if self.response.is_some() {
            return Err(RoundError::AlreadyResolved);
        }
        let size = self.session.moves.len();
        if index >= size {
            debug!(round_id = %self.id, index, "rejected responder move");
            return Err(RoundError::InvalidMove { index, size });
        }
        let outcome = self.session.matrix.resolve(self.committer.get(), index)?;
        self.response = Some((MoveIndex(index), outcome));
        info!(round_id = %self.id, responder = index, %outcome, "round resolved");
        Ok(outcome)
    }

    /// Disclose the committer's move and key. Consumes the round.
    ///
    /// Calling this before `respond` succeeded abandons the round without
    /// revealing anything.
    pub fn reveal(self) -> Result<RoundResult, RoundError> {
        let (responder_index, outcome) = self.response.ok_or(RoundError::NotResolved)?;
        let moves = &self.session.moves;
        let name_of = |index: MoveIndex| {
            moves
                .name(index)
                .map(str::to_string)
                .ok_or(RuleError::IndexOutOfRange {
                    index: index.get(),
                    size: moves.len(),
                })
        };

        let result = RoundResult {
            round_id: self.id,
            commitment: self.commitment,
            committer_move: name_of(self.committer)?,
            committer_index: self.committer,
            responder_move: name_of(responder_index)?,
            responder_index,
            outcome,
            key: self.key.to_hex(),
        };
        info!(round_id = %self.id, phase = %RoundPhase::Revealed, "round revealed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FixedPicker;

    fn rps() -> GameSession {
        GameSession::new(MoveSet::new(["Rock", "Paper", "Scissors"]).unwrap()).unwrap()
    }

    #[test]
    fn test_round_lifecycle() {
        let session = rps();
        let mut round = session.start_round(&mut FixedPicker(MoveIndex(0))).unwrap();
        assert_eq!(round.phase(), RoundPhase::Committed);
        assert_eq!(round.outcome(), None);

        let outcome = round.respond(1).unwrap();
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(round.phase(), RoundPhase::Resolved);

        let published = *round.commitment();
        let id = round.id();
        let result = round.reveal().unwrap();
        assert_eq!(result.round_id, id);
        assert_eq!(result.committer_move, "Rock");
        assert_eq!(result.responder_move, "Paper");
        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.commitment, published);
        assert!(result.verify());
    }

    #[test]
    fn test_invalid_move_keeps_commitment() {
        let session = rps();
        let mut round = session.start_round(&mut FixedPicker(MoveIndex(2))).unwrap();
        let before = *round.commitment();

        assert!(matches!(
            round.respond(3),
            Err(RoundError::InvalidMove { index: 3, size: 3 })
        ));
        assert_eq!(round.phase(), RoundPhase::Committed);
        assert_eq!(*round.commitment(), before);

        assert_eq!(round.respond(0).unwrap(), Outcome::Win);
        assert_eq!(round.reveal().unwrap().commitment, before);
    }

    #[test]
    fn test_cannot_respond_twice() {
        let session = rps();
        let mut round = session.start_round(&mut FixedPicker(MoveIndex(1))).unwrap();
        round.respond(1).unwrap();
        assert!(matches!(round.respond(2), Err(RoundError::AlreadyResolved)));
        assert_eq!(round.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_reveal_requires_response() {
        let session = rps();
        let round = session.start_round(&mut FixedPicker(MoveIndex(0))).unwrap();
        assert!(matches!(round.reveal(), Err(RoundError::NotResolved)));
    }

    #[test]
    fn test_each_round_gets_fresh_key() {
        let session = rps();
        let mut picker = FixedPicker(MoveIndex(0));
        let a = session.play_round(&mut picker, 0).unwrap();
        let b = session.play_round(&mut picker, 0).unwrap();
        assert_ne!(a.key, b.key);
        assert_ne!(a.commitment, b.commitment);
        assert_ne!(a.round_id, b.round_id);
    }

    #[test]
    fn test_play_round_rejects_bad_index() {
        let session = rps();
        assert!(matches!(
            session.play_round(&mut FixedPicker(MoveIndex(0)), 9),
            Err(RoundError::InvalidMove { index: 9, size: 3 })
        ));
    }
}
