//! Domain-level invariant violations.
//!
//! These represent internal contract breaches — an off-board coordinate
//! reaching a board operation, an action surviving validation that the
//! updater still cannot apply. Per spec, the validator/updater contract
//! should make these unreachable; when one occurs it is fatal for the match
//! (the caller aborts rather than limping on with a possibly-corrupt state).

use thiserror::Error;

use crate::hex::HexCoord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameCoreError {
    #[error("coordinate {0:?} is not on the board")]
    CoordinateNotOnBoard(HexCoord),

    #[error("action passed validation but could not be applied: {0}")]
    ValidatedActionUnapplicable(String),
}
