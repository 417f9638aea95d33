//! Evaluation weights for draughts positions
//!
//! All values are in hundredths of a man, so a plain man is worth 100.

/// Score for a side that has no legal move left (equivalent to 1000 men)
pub const WIN_SCORE: i32 = 100_000;

/// Weights for the static evaluator.
///
/// `BASIC` is used by the medium tier; `EXPERT` adds the structural terms
/// (isolation, mobility, material differentials) used by the hard tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    /// Base value of a man
    pub man: i32,
    /// Base value of a king
    pub king: i32,
    /// Per row advanced toward promotion (men only)
    pub advance: i32,
    /// Bonus for a man within two rows of promotion
    pub near_promotion: i32,
    /// Extra bonus for a man one row from promotion
    pub one_from_promotion: i32,
    /// Per step closer to the board center (out of 5)
    pub center: i32,
    /// Bonus for standing on column 0 or 9 (cannot be jumped sideways)
    pub edge: i32,
    /// Bonus for a piece still guarding its own back row
    pub back_row: i32,
    /// Penalty for a man with no friendly diagonal neighbor
    pub isolation: i32,
    /// Per unit of mobility difference (captures count double)
    pub mobility: i32,
    /// Per piece of material difference, counted once for the whole board
    pub material_diff: i32,
    /// Per king of king-count difference, counted once for the whole board
    pub king_diff: i32,
}

impl EvalWeights {
    pub const BASIC: EvalWeights = EvalWeights {
        man: 100,
        king: 500,
        advance: 10,
        near_promotion: 0,
        one_from_promotion: 0,
        center: 5,
        edge: 20,
        back_row: 0,
        isolation: 0,
        mobility: 0,
        material_diff: 0,
        king_diff: 0,
    };

    pub const EXPERT: EvalWeights = EvalWeights {
        man: 100,
        king: 700,
        advance: 15,
        near_promotion: 50,
        one_from_promotion: 30,
        center: 8,
        edge: 25,
        back_row: 15,
        isolation: 20,
        mobility: 10,
        material_diff: 50,
        king_diff: 150,
    };

    /// Whether the mobility term needs a move generation pass
    #[inline]
    pub fn uses_mobility(&self) -> bool {
        self.mobility != 0
    }
}
