//! Bounded integers and coin flips derived from the host PRNG.
//!
//! Every call pulls a fresh buffer; draws are never combined into one buffer.

use soroban_sdk::{Env, Vec};

use crate::cards::HAND_SIZE;

/// A flip is `true` for bytes strictly above this value (131 of 256 outcomes).
const COIN_THRESHOLD: u8 = 124;

fn entropy<const N: usize>(env: &Env) -> [u8; N] {
    let mut buf = [0u8; N];
    env.prng().fill(&mut buf);
    buf
}

/// Uniform-ish value in `[0, max)` from four big-endian bytes. `max == 0` yields 0.
pub fn random_int(env: &Env, max: u32) -> u32 {
    let value = u32::from_be_bytes(entropy::<4>(env));
    value.checked_rem(max).unwrap_or(0)
}

/// Same as [`random_int`] over two bytes, for small bounds.
pub fn random_short(env: &Env, max: u32) -> u32 {
    let value = u16::from_be_bytes(entropy::<2>(env)) as u32;
    value.checked_rem(max).unwrap_or(0)
}

pub fn coin_flip(env: &Env) -> bool {
    flip_from(entropy::<1>(env)[0])
}

pub fn flip_from(byte: u8) -> bool {
    byte > COIN_THRESHOLD
}

/// Three-way comparator that ignores its operands and answers from a single
/// coin flip. Never returns 0 and is not transitive.
pub fn shuffle_comparator(env: &Env, _a: u32, _b: u32) -> i32 {
    if coin_flip(env) {
        -1
    } else {
        1
    }
}

/// Reorders `items` by insertion-sorting with [`shuffle_comparator`].
///
/// The result is a pseudo-shuffle, NOT a uniform permutation: elements drift
/// left one coin flip at a time, so late elements stay near the end more often
/// than chance. Each call derives a fresh order, which the battle tie-break
/// rounds rely on. Costs at most `n * (n - 1) / 2` flips.
pub fn random_sort(env: &Env, items: &mut Vec<u32>) {
    let len = items.len();
    let mut i: u32 = 1;
    while i < len {
        let item = items.get_unchecked(i);
        let mut j = i;
        while j > 0 {
            let prev = items.get_unchecked(j - 1);
            if shuffle_comparator(env, item, prev) < 0 {
                items.set(j, prev);
                j -= 1;
            } else {
                break;
            }
        }
        items.set(j, item);
        i += 1;
    }
}

/// Derive a hand: pseudo-shuffle the identity permutation of the arsenal's
/// indices and keep the first [`HAND_SIZE`].
pub fn random_hand(env: &Env, arsenal_len: u32) -> Vec<u32> {
    let mut order = Vec::new(env);
    let mut i: u32 = 0;
    while i < arsenal_len {
        order.push_back(i);
        i += 1;
    }
    random_sort(env, &mut order);
    let take = if arsenal_len < HAND_SIZE { arsenal_len } else { HAND_SIZE };
    order.slice(0..take)
}
