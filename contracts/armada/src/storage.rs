use soroban_sdk::{contracttype, Address, Env, IntoVal, Val, Vec};

use crate::error::ArmadaError;
use crate::types::{BattleKey, GameState, MatchState, Player};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // Configuration (instance)
    Admin,
    PaymentToken,
    CreditPrice,
    AutoSolve,
    // Match scalars (instance)
    Match,
    ShipCursor,
    // Accounts (persistent)
    Credits(Address),
    Ships(Address),
    ShipOwner(u32),
    PlayerOf(Address),
    // Waiting list and roster (persistent)
    Queue,
    Roster,
    Alive,
    // Ship pool arena (persistent)
    PoolLen,
    PoolSlot(u32),
    // Last-battle cache (persistent)
    Battle(BattleKey),
    LastBattle(Address),
}

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// Match data: 30 days
const MATCH_TTL_SECONDS: u32 = 30 * 24 * 60 * 60;
pub const MATCH_TTL_LEDGERS: u32 = MATCH_TTL_SECONDS / LEDGER_RATE_SECS;

// Holdings (credits, owned ships, ship pool): 120 days
const HOLDINGS_TTL_SECONDS: u32 = 120 * 24 * 60 * 60;
pub const HOLDINGS_TTL_LEDGERS: u32 = HOLDINGS_TTL_SECONDS / LEDGER_RATE_SECS;

// Timeout for a turn: ~10 minutes
const TURN_TIMEOUT_MINUTES: u32 = 10;
pub const TURN_TIMEOUT_LEDGERS: u32 = TURN_TIMEOUT_MINUTES * 60 / LEDGER_RATE_SECS;

// ═══════════════════════════════════════════════════════════════════════════════
//  Configuration
// ═══════════════════════════════════════════════════════════════════════════════

pub fn load_admin(env: &Env) -> Result<Address, ArmadaError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ArmadaError::AdminNotSet)
}

/// Loads the admin and requires its authorisation for the current call.
pub fn require_admin(env: &Env) -> Result<Address, ArmadaError> {
    let admin = load_admin(env)?;
    admin.require_auth();
    Ok(admin)
}

pub fn load_payment_token(env: &Env) -> Result<Address, ArmadaError> {
    env.storage()
        .instance()
        .get(&DataKey::PaymentToken)
        .ok_or(ArmadaError::PaymentTokenNotSet)
}

pub fn load_credit_price(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::CreditPrice)
        .unwrap_or(0)
}

pub fn load_auto_solve(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::AutoSolve)
        .unwrap_or(false)
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Match scalars
// ═══════════════════════════════════════════════════════════════════════════════

pub fn read_match(env: &Env) -> MatchState {
    env.storage()
        .instance()
        .get(&DataKey::Match)
        .unwrap_or(MatchState {
            id: 0,
            state: GameState::Lobby,
            round: 0,
            players_ready: 0,
            turn_deadline: 0,
        })
}

pub fn write_match(env: &Env, state: &MatchState) {
    env.storage().instance().set(&DataKey::Match, state);
    bump_instance(env);
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(MATCH_TTL_LEDGERS, MATCH_TTL_LEDGERS);
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Persistent helpers
// ═══════════════════════════════════════════════════════════════════════════════

pub fn read_roster(env: &Env) -> Vec<Player> {
    env.storage()
        .persistent()
        .get(&DataKey::Roster)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_roster(env: &Env, roster: &Vec<Player>) {
    write_match_data(env, &DataKey::Roster, roster);
}

pub fn read_alive(env: &Env) -> Vec<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::Alive)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_alive(env: &Env, alive: &Vec<u32>) {
    write_match_data(env, &DataKey::Alive, alive);
}

pub fn read_queue(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Queue)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_queue(env: &Env, queue: &Vec<Address>) {
    write_match_data(env, &DataKey::Queue, queue);
}

pub fn write_match_data<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    write_persistent(env, key, value, MATCH_TTL_LEDGERS);
}

pub fn write_holdings<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    write_persistent(env, key, value, HOLDINGS_TTL_LEDGERS);
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V, ttl: u32)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage().persistent().extend_ttl(key, ttl, ttl);
}
