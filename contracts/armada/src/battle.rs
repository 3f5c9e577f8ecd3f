//! Pairwise battle resolution.
//!
//! A battle runs up to [`MAX_BATTLE_ROUNDS`] rounds, stopping early once a
//! side has taken [`ROUNDS_TO_WIN`]. Hands escalate per round:
//!
//! | round | hands played                                         |
//! |-------|------------------------------------------------------|
//! | 0     | committed hands as submitted                         |
//! | 1     | committed hands, pseudo-shuffled in place            |
//! | 2     | freshly derived hands                                |
//! | 3+    | one random arsenal card per side                     |
//!
//! A round goes to the side with a positive net card score; a zero net score
//! awards nothing. After the cap, more round wins decides, then total match
//! wins, then a coin flip. There is never a draw.

use soroban_sdk::{Env, Vec};

use crate::cards::compare_cards;
use crate::random::{coin_flip, random_hand, random_short, random_sort};
use crate::types::{BattleLogRecord, BattleRound, Player, PlayerState};

pub const MAX_BATTLE_ROUNDS: u32 = 11;
pub const ROUNDS_TO_WIN: u32 = 2;

/// Resolve one fight. The winner gains a win and captures a random card from
/// the loser's arsenal; the loser is marked dead.
pub fn resolve(env: &Env, a: &mut Player, b: &mut Player) -> BattleLogRecord {
    let mut record = BattleLogRecord {
        player_a: a.id,
        player_b: b.id,
        ship_a: a.ship,
        ship_b: b.ship,
        arsenal_a: a.arsenal.clone(),
        arsenal_b: b.arsenal.clone(),
        winner: a.id,
        rounds: Vec::new(env),
    };

    let mut score_a: u32 = 0;
    let mut score_b: u32 = 0;
    let mut round: u32 = 0;
    while score_a < ROUNDS_TO_WIN && score_b < ROUNDS_TO_WIN && round < MAX_BATTLE_ROUNDS {
        let (hand_a, hand_b) = round_hands(env, round, a, b);
        let score = score_hands(&a.arsenal, &b.arsenal, &hand_a, &hand_b);
        if score > 0 {
            score_a += 1;
        } else if score < 0 {
            score_b += 1;
        }
        record.rounds.push_back(BattleRound {
            hand_a,
            hand_b,
            score,
        });
        round += 1;
    }

    let a_wins = match score_a.cmp(&score_b) {
        core::cmp::Ordering::Greater => true,
        core::cmp::Ordering::Less => false,
        core::cmp::Ordering::Equal => match a.wins.cmp(&b.wins) {
            core::cmp::Ordering::Greater => true,
            core::cmp::Ordering::Less => false,
            core::cmp::Ordering::Equal => coin_flip(env),
        },
    };

    if a_wins {
        settle(env, a, b);
    } else {
        settle(env, b, a);
    }
    record.winner = if a_wins { a.id } else { b.id };
    record
}

fn round_hands(env: &Env, round: u32, a: &mut Player, b: &mut Player) -> (Vec<u32>, Vec<u32>) {
    match round {
        0 => (a.hand.clone(), b.hand.clone()),
        1 => {
            random_sort(env, &mut a.hand);
            random_sort(env, &mut b.hand);
            (a.hand.clone(), b.hand.clone())
        }
        2 => (
            random_hand(env, a.arsenal.len()),
            random_hand(env, b.arsenal.len()),
        ),
        _ => {
            let mut hand_a = Vec::new(env);
            hand_a.push_back(random_short(env, a.arsenal.len()));
            let mut hand_b = Vec::new(env);
            hand_b.push_back(random_short(env, b.arsenal.len()));
            (hand_a, hand_b)
        }
    }
}

/// Net score of two hands of arsenal indices, compared position by position.
pub fn score_hands(
    arsenal_a: &Vec<u32>,
    arsenal_b: &Vec<u32>,
    hand_a: &Vec<u32>,
    hand_b: &Vec<u32>,
) -> i32 {
    let mut score: i32 = 0;
    let positions = hand_a.len().min(hand_b.len());
    let mut i: u32 = 0;
    while i < positions {
        let card_a = hand_a.get(i).and_then(|idx| arsenal_a.get(idx));
        let card_b = hand_b.get(i).and_then(|idx| arsenal_b.get(idx));
        if let (Some(card_a), Some(card_b)) = (card_a, card_b) {
            score += compare_cards(card_a, card_b);
        }
        i += 1;
    }
    score
}

fn settle(env: &Env, winner: &mut Player, loser: &mut Player) {
    winner.wins = winner.wins.saturating_add(1);
    let pick = random_short(env, loser.arsenal.len());
    if let Some(card) = loser.arsenal.get(pick) {
        winner.arsenal.push_back(card);
    }
    loser.state = PlayerState::Dead;
}
