//! Replaying a list of moves and reporting where the game ended up.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tenchess_core::{Color, PieceKind, Square, SquareParseError, BOARD_SIZE};
use tenchess_engine::{Game, GameError, GameResult, Mode, RuleSet};
use thiserror::Error;

/// Reasons a move from the command line was not played.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReplayError {
    #[error("expected `row,col:row,col`, got {0:?}")]
    Malformed(String),
    #[error("invalid square: {0}")]
    Square(#[from] SquareParseError),
    #[error("unknown promotion letter {0:?}")]
    PromotionLetter(String),
    #[error("{0} does not reach the last row, nothing to promote")]
    UnexpectedPromotion(Square),
    #[error(transparent)]
    Rejected(#[from] GameError),
}

/// A move as typed: `8,4:6,4`, or `1,0:0,0=Q` with a promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl FromStr for PlannedMove {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (squares, letter) = match s.split_once('=') {
            Some((squares, letter)) => (squares, Some(letter)),
            None => (s, None),
        };
        let (from, to) = squares
            .split_once(':')
            .ok_or_else(|| ReplayError::Malformed(s.to_string()))?;
        let promotion = letter.map(parse_promotion).transpose()?;
        Ok(PlannedMove {
            from: from.parse()?,
            to: to.parse()?,
            promotion,
        })
    }
}

fn parse_promotion(letter: &str) -> Result<PieceKind, ReplayError> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PieceKind::from_char(c)
            .map(|(kind, _)| kind)
            .ok_or_else(|| ReplayError::PromotionLetter(letter.to_string())),
        _ => Err(ReplayError::PromotionLetter(letter.to_string())),
    }
}

impl fmt::Display for PlannedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.to_char(Color::White))?;
        }
        Ok(())
    }
}

/// Plays one move, completing the promotion when a choice is given.
///
/// A promoting move without a choice leaves the game waiting, so the next
/// move is refused by the game itself.
pub fn play<R: RuleSet>(game: &mut Game<R>, mv: &PlannedMove) -> Result<(), ReplayError> {
    if let Some(kind) = mv.promotion {
        let promotes = game
            .board()
            .piece_at(mv.from)
            .is_some_and(|p| p.kind == PieceKind::Pawn && mv.to.row() == p.color.promotion_row());
        if !promotes {
            return Err(ReplayError::UnexpectedPromotion(mv.to));
        }
        if !game.rules().promotion_choices().contains(&kind) {
            return Err(GameError::InvalidPromotion(kind).into());
        }
    }

    let outcome = game.execute_move(mv.from, mv.to)?;
    if let (Some(sq), Some(kind)) = (outcome.promotion_pending, mv.promotion) {
        game.complete_promotion(sq, kind)?;
    }
    Ok(())
}

/// The move that stopped a replay.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Rejection {
    /// Zero-based position in the move list.
    pub index: usize,
    pub input: String,
    pub reason: String,
}

/// Where a replay ended up.
#[derive(Debug, Serialize)]
pub struct Report {
    pub mode: Mode,
    /// Board rows, row 0 first.
    pub board: Vec<String>,
    pub side_to_move: Color,
    pub in_check: bool,
    pub plies: usize,
    pub pending_promotion: Option<Square>,
    pub result: Option<GameResult>,
    /// Number of inputs that were played.
    pub played: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<Rejection>,
}

/// Plays `inputs` in order, stopping at the first one that is rejected.
pub fn replay<R: RuleSet>(game: &mut Game<R>, mode: Mode, inputs: &[String]) -> Report {
    let mut played = 0;
    let mut rejected = None;
    for (index, input) in inputs.iter().enumerate() {
        match input.parse::<PlannedMove>().and_then(|mv| play(game, &mv)) {
            Ok(()) => played += 1,
            Err(err) => {
                tracing::debug!("move {} ({}) rejected: {}", index + 1, input, err);
                rejected = Some(Rejection {
                    index,
                    input: input.clone(),
                    reason: err.to_string(),
                });
                break;
            }
        }
    }

    let side = game.side_to_move();
    Report {
        mode,
        board: game.board().to_layout().lines().map(str::to_string).collect(),
        side_to_move: side,
        in_check: game.is_in_check(side),
        plies: game.ply_count(),
        pending_promotion: game.pending_promotion(),
        result: game.result(),
        played,
        rejected,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{}", col)?;
        }
        writeln!(f)?;
        for (row, line) in self.board.iter().enumerate() {
            writeln!(f, "{} {}", row, line)?;
        }
        writeln!(f)?;
        writeln!(f, "Side to move: {}", self.side_to_move)?;
        writeln!(f, "In check: {}", if self.in_check { "yes" } else { "no" })?;
        if let Some(sq) = self.pending_promotion {
            writeln!(f, "Promotion pending on {}", sq)?;
        }
        match self.result {
            Some(result) => writeln!(f, "Result: {}", result)?,
            None => writeln!(f, "Result: in progress")?,
        }
        if let Some(rejection) = &self.rejected {
            writeln!(
                f,
                "Stopped at move {} ({}): {}",
                rejection.index + 1,
                rejection.input,
                rejection.reason
            )?;
        }
        Ok(())
    }
}
