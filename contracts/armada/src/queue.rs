//! FIFO waiting list. New entrants are pushed at the front and admitted from
//! the back, so the oldest entry is always at the back.

use soroban_sdk::{log, Address, Env, Vec};

use crate::events::EvQueued;
use crate::ledger;
use crate::storage::{read_queue, write_queue, DataKey};
use crate::types::{JoinStatus, MatchState};

/// 1-based distance from the front of the line, or -1 when absent.
pub fn position_of(queue: &Vec<Address>, account: &Address) -> i32 {
    let len = queue.len();
    let mut i = len;
    while i > 0 {
        i -= 1;
        if queue.get_unchecked(i) == *account {
            return (len - i) as i32;
        }
    }
    -1
}

/// Spend a credit and join the waiting list.
pub fn enqueue(env: &Env, state: &MatchState, account: &Address) -> JoinStatus {
    if !state.state.accepts_queue() {
        log!(env, "waiting list closed in this phase", account.clone());
        return JoinStatus::LobbyClosed;
    }

    ledger::ensure_account(env, account);

    let mut queue = read_queue(env);
    let seated = env
        .storage()
        .persistent()
        .has(&DataKey::PlayerOf(account.clone()));
    if seated || position_of(&queue, account) != -1 {
        log!(env, "account already queued or seated", account.clone());
        return JoinStatus::AlreadyQueued;
    }

    if ledger::spend_credit(env, account).is_err() {
        log!(env, "account has no credits", account.clone());
        return JoinStatus::NoCredits;
    }

    queue.push_front(account.clone());
    write_queue(env, &queue);

    EvQueued {
        account: account.clone(),
        position: queue.len() as i32,
    }
    .publish(env);

    JoinStatus::Joined
}

/// Pop up to `n` accounts, oldest first.
pub fn admit_up_to(env: &Env, n: u32) -> Vec<Address> {
    let mut queue = read_queue(env);
    let mut admitted = Vec::new(env);
    while admitted.len() < n {
        match queue.pop_back() {
            Some(account) => admitted.push_back(account),
            None => break,
        }
    }
    write_queue(env, &queue);
    admitted
}

pub fn waiting_count(env: &Env) -> u32 {
    read_queue(env).len()
}

/// Empty the waiting list, returning its entries oldest first.
pub fn drain(env: &Env) -> Vec<Address> {
    let len = waiting_count(env);
    admit_up_to(env, len)
}
