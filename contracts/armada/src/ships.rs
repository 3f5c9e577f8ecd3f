//! Ship inventory.
//!
//! A ship id is in exactly one place at a time: the available pool, a live
//! player's `ship` field, or one account's owned list. The pool is an
//! index-addressable arena (`PoolLen` + `PoolSlot(i)`) so a random draw is an
//! O(1) swap-remove.

use soroban_sdk::{Address, Env, Vec};

use crate::error::ArmadaError;
use crate::random::random_int;
use crate::storage::{write_holdings, DataKey};

/// Hard cap on ids ever provisioned.
pub const MAX_SHIPS: u32 = 13 * 1024;
/// Pool top-up applied by every credit purchase.
pub const SHIPS_PER_PURCHASE: u32 = 20;

pub fn pool_len(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::PoolLen)
        .unwrap_or(0)
}

fn set_pool_len(env: &Env, len: u32) {
    write_holdings(env, &DataKey::PoolLen, &len);
}

/// Next id to provision.
pub fn cursor(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ShipCursor)
        .unwrap_or(0)
}

/// Append up to `count` sequential ids starting at the cursor, stopping at
/// [`MAX_SHIPS`]. Returns how many were added.
pub fn provision(env: &Env, count: u32) -> u32 {
    let from = cursor(env);
    let to = from.saturating_add(count).min(MAX_SHIPS);
    if to <= from {
        return 0;
    }
    let mut len = pool_len(env);
    let mut id = from;
    while id < to {
        write_holdings(env, &DataKey::PoolSlot(len), &id);
        len += 1;
        id += 1;
    }
    set_pool_len(env, len);
    env.storage().instance().set(&DataKey::ShipCursor, &to);
    to - from
}

/// Remove and return a random id from the pool.
pub fn draw(env: &Env) -> Result<u32, ArmadaError> {
    let len = pool_len(env);
    if len == 0 {
        return Err(ArmadaError::PoolExhausted);
    }
    let index = random_int(env, len);
    let last = len - 1;
    let ship = read_slot(env, index)?;
    if index != last {
        let moved = read_slot(env, last)?;
        write_holdings(env, &DataKey::PoolSlot(index), &moved);
    }
    env.storage().persistent().remove(&DataKey::PoolSlot(last));
    set_pool_len(env, last);
    Ok(ship)
}

/// Return an id to the pool.
pub fn release(env: &Env, ship: u32) {
    let len = pool_len(env);
    write_holdings(env, &DataKey::PoolSlot(len), &ship);
    set_pool_len(env, len + 1);
}

/// Move an in-play id into `account`'s permanent list.
pub fn grant_ownership(env: &Env, account: &Address, ship: u32) {
    let mut ships = owned_ships(env, account);
    ships.push_back(ship);
    write_holdings(env, &DataKey::Ships(account.clone()), &ships);
    write_holdings(env, &DataKey::ShipOwner(ship), account);
}

/// Strip every ship from `account` and return them to the pool.
pub fn revoke_all(env: &Env, account: &Address) -> u32 {
    let ships = owned_ships(env, account);
    for ship in ships.iter() {
        env.storage().persistent().remove(&DataKey::ShipOwner(ship));
        release(env, ship);
    }
    env.storage()
        .persistent()
        .remove(&DataKey::Ships(account.clone()));
    ships.len()
}

pub fn owned_ships(env: &Env, account: &Address) -> Vec<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::Ships(account.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn owner_of(env: &Env, ship: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::ShipOwner(ship))
}

/// Up to `limit` pool entries starting at `offset`, in arena order.
pub fn page(env: &Env, offset: u32, limit: u32) -> Vec<u32> {
    let len = pool_len(env);
    let end = offset.saturating_add(limit).min(len);
    let mut result = Vec::new(env);
    let mut i = offset;
    while i < end {
        if let Some(ship) = env
            .storage()
            .persistent()
            .get::<DataKey, u32>(&DataKey::PoolSlot(i))
        {
            result.push_back(ship);
        }
        i += 1;
    }
    result
}

fn read_slot(env: &Env, index: u32) -> Result<u32, ArmadaError> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolSlot(index))
        .ok_or(ArmadaError::PoolExhausted)
}
