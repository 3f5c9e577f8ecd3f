//! Last-battle cache. Each record is keyed by the two accounts in pairing
//! order and replaced or deleted at the start of every turn.

use soroban_sdk::{Address, Env, Vec};

use crate::storage::{write_match_data, DataKey};
use crate::types::{BattleKey, BattleLogRecord, Player};

pub fn save(env: &Env, account_a: &Address, account_b: &Address, record: &BattleLogRecord) {
    let key = BattleKey {
        first: account_a.clone(),
        second: account_b.clone(),
    };
    write_match_data(env, &DataKey::Battle(key.clone()), record);
    write_match_data(env, &DataKey::LastBattle(account_a.clone()), &key);
    write_match_data(env, &DataKey::LastBattle(account_b.clone()), &key);
}

pub fn last_for(env: &Env, account: &Address) -> Option<BattleLogRecord> {
    let key: BattleKey = env
        .storage()
        .persistent()
        .get(&DataKey::LastBattle(account.clone()))?;
    env.storage().persistent().get(&DataKey::Battle(key))
}

/// Drop the cached battle of every listed player.
pub fn clear_for(env: &Env, roster: &Vec<Player>) {
    for player in roster.iter() {
        let pointer = DataKey::LastBattle(player.account.clone());
        if let Some(key) = env.storage().persistent().get::<DataKey, BattleKey>(&pointer) {
            env.storage().persistent().remove(&DataKey::Battle(key));
            env.storage().persistent().remove(&pointer);
        }
    }
}
