//! Extended rock-paper-scissors cards.
//!
//! Each card type is a pair of primitive facets `(primary, secondary)`. Cards
//! are compared on the primary facet first and fall back to the secondary one
//! on a tie.

pub const ROCK: u32 = 0;
pub const PAPER: u32 = 1;
pub const SCISSORS: u32 = 2;

pub const CARD_TYPES: u32 = 9;
pub const HAND_SIZE: u32 = 3;

pub const CARDS: [(u32, u32); CARD_TYPES as usize] = [
    (ROCK, ROCK),
    (PAPER, PAPER),
    (SCISSORS, SCISSORS),
    (ROCK, PAPER),
    (ROCK, SCISSORS),
    (PAPER, ROCK),
    (PAPER, SCISSORS),
    (SCISSORS, ROCK),
    (SCISSORS, PAPER),
];

/// Every arsenal starts with the three pure cards plus one random card type.
pub const STARTING_CARDS: [u32; 3] = [0, 1, 2];

/// +1 if `a` beats `b`, -1 if `b` beats `a`, 0 on equal facets.
pub fn compare_facets(a: u32, b: u32) -> i32 {
    match (a, b) {
        _ if a == b => 0,
        (ROCK, SCISSORS) | (PAPER, ROCK) | (SCISSORS, PAPER) => 1,
        _ => -1,
    }
}

/// Outcome of card type `a` against card type `b` from `a`'s side.
pub fn compare_cards(a: u32, b: u32) -> i32 {
    let (a_primary, a_secondary) = facets(a);
    let (b_primary, b_secondary) = facets(b);
    match compare_facets(a_primary, b_primary) {
        0 => compare_facets(a_secondary, b_secondary),
        outcome => outcome,
    }
}

// Out-of-range types are treated as pure rock; arsenals only ever hold
// values below CARD_TYPES.
fn facets(card: u32) -> (u32, u32) {
    CARDS.get(card as usize).copied().unwrap_or((ROCK, ROCK))
}
