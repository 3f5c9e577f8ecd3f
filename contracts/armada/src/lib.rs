#![no_std]

//! # Armada
//!
//! A last-ship-standing elimination game. Accounts buy credits, spend one to
//! join the waiting list, and are seated into a match of 4 to 8 players. Each
//! player receives a ship from a finite pool and an arsenal of extended
//! rock-paper-scissors cards. Every turn the alive players are paired off and
//! fight a best-of-three card battle; losers are eliminated and winners
//! capture one card from their opponent. The sole survivor keeps their ship.
//!
//! ## Game flow
//! 1. `add_credit` buys a credit (first sight of an account grants one free).
//! 2. `join_game` spends a credit and enters the FIFO waiting list.
//! 3. Admin `start_game` seats queued accounts and deals the first hands.
//! 4. Players may override their dealt hand with `set_hand`.
//! 5. Admin `solve_turn` (or auto-solve, or `resolve_timeout` after the
//!    deadline) pairs players and resolves battles.
//! 6. With one survivor the match is OVER and the ship is paid out; admin
//!    `new_game` reopens the lobby.
//!
//! ## Card encoding
//! Card types 0-8 map to `(primary, secondary)` facets over
//! ROCK=0 / PAPER=1 / SCISSORS=2; see [`CARDS`]. Hands and battle logs
//! hold indices into the player's arsenal, not card types.

mod battle;
mod battle_log;
mod cards;
mod error;
mod events;
mod ledger;
mod queue;
mod random;
mod ships;
mod storage;
mod turn;
mod types;

pub use cards::{CARDS, CARD_TYPES, HAND_SIZE};
pub use error::ArmadaError;
pub use ledger::MAX_CREDITS;
pub use ships::{MAX_SHIPS, SHIPS_PER_PURCHASE};
pub use turn::{MAX_PLAYERS, MIN_PLAYERS};
pub use types::{
    AccountView, BattleKey, BattleLogRecord, BattleRound, Config, GameState, GameView,
    HandStatus, JoinStatus, MatchState, Player, PlayerState,
};

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

use events::{EvAccountPurged, EvShipsProvisioned};
use storage::{
    bump_instance, load_admin, load_auto_solve, load_credit_price, load_payment_token,
    read_match, read_queue, require_admin, DataKey,
};
use turn::ActiveMatch;

#[contract]
pub struct ArmadaContract;

#[contractimpl]
impl ArmadaContract {
    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Constructor
    // ───────────────────────────────────────────────────────────────────────────

    pub fn __constructor(env: Env, admin: Address, payment_token: Address, credit_price: i128) {
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        env.storage()
            .instance()
            .set(&DataKey::CreditPrice, &credit_price);
        env.storage().instance().set(&DataKey::AutoSolve, &false);
        storage::write_match(&env, &read_match(&env));
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Accounts & Queue
    // ───────────────────────────────────────────────────────────────────────────

    /// Buy one credit. `payment` units of the payment token are transferred
    /// from `buyer` and must cover the credit price. Returns the new balance.
    pub fn add_credit(env: Env, buyer: Address, payment: i128) -> Result<u32, ArmadaError> {
        buyer.require_auth();
        let credits = ledger::add_credit(&env, &buyer, payment)?;
        bump_instance(&env);
        Ok(credits)
    }

    /// Spend a credit to enter the waiting list.
    pub fn join_game(env: Env, player: Address) -> JoinStatus {
        player.require_auth();
        let state = read_match(&env);
        queue::enqueue(&env, &state, &player)
    }

    /// Credits, owned ships, seated player and queue position of `account`,
    /// or `None` if the account has never been seen.
    pub fn get_account(env: Env, account: Address) -> Option<AccountView> {
        if !ledger::has_account(&env, &account) {
            return None;
        }
        let active = ActiveMatch::load(&env);
        let mut player = Vec::new(&env);
        if let Some(seated) =
            ActiveMatch::player_of(&env, &account).and_then(|id| active.roster.get(id))
        {
            player.push_back(seated);
        }
        Some(AccountView {
            credits: ledger::credits(&env, &account),
            ships: ships::owned_ships(&env, &account),
            player,
            queue_position: queue::position_of(&read_queue(&env), &account),
        })
    }

    /// 1-based place in the waiting list (1 is next to be seated), -1 if absent.
    pub fn get_queue_position(env: Env, account: Address) -> i32 {
        queue::position_of(&read_queue(&env), &account)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Match
    // ───────────────────────────────────────────────────────────────────────────

    /// Seat queued accounts and deal the first turn (admin).
    pub fn start_game(env: Env) -> Result<(), ArmadaError> {
        require_admin(&env)?;
        let mut active = ActiveMatch::load(&env);
        active.start(&env)?;
        active.save(&env);
        Ok(())
    }

    /// Commit three distinct arsenal indices for the current turn.
    pub fn set_hand(env: Env, player: Address, hand: Vec<u32>) -> Result<HandStatus, ArmadaError> {
        player.require_auth();
        let mut active = ActiveMatch::load(&env);
        let status = active.set_hand(&env, &player, hand);
        if status == HandStatus::Accepted && load_auto_solve(&env) && active.all_ready() {
            active.solve_turn(&env)?;
        }
        active.save(&env);
        Ok(status)
    }

    /// Pair alive players and resolve the turn's battles (admin).
    pub fn solve_turn(env: Env) -> Result<(), ArmadaError> {
        require_admin(&env)?;
        let mut active = ActiveMatch::load(&env);
        active.solve_turn(&env)?;
        active.save(&env);
        Ok(())
    }

    /// Resolve a stalled turn. Any alive player may call this once the
    /// turn deadline ledger has been reached.
    pub fn resolve_timeout(env: Env, caller: Address) -> Result<(), ArmadaError> {
        caller.require_auth();
        let mut active = ActiveMatch::load(&env);
        active.resolve_timeout(&env, &caller)?;
        active.save(&env);
        Ok(())
    }

    /// Close out a finished match and reopen the lobby (admin).
    pub fn new_game(env: Env) -> Result<(), ArmadaError> {
        require_admin(&env)?;
        let mut active = ActiveMatch::load(&env);
        active.reset(&env)?;
        active.save(&env);
        Ok(())
    }

    /// Snapshot of the match phase, alive and waiting counts, and turn progress.
    pub fn get_game(env: Env) -> GameView {
        let active = ActiveMatch::load(&env);
        GameView {
            id: active.state.id,
            state: active.state.state,
            total_alive: active.alive.len(),
            waiting_count: queue::waiting_count(&env),
            round: active.state.round,
            players_ready: active.state.players_ready,
            turn_deadline: active.state.turn_deadline,
        }
    }

    /// Roster entry `id` of the current match. Dead players stay readable
    /// until the next `new_game`.
    pub fn get_player(env: Env, id: u32) -> Option<Player> {
        storage::read_roster(&env).get(id)
    }

    pub fn get_alive_players(env: Env) -> Vec<u32> {
        storage::read_alive(&env)
    }

    /// The most recent battle `account` fought in the current turn cycle.
    pub fn get_last_battle_log(env: Env, account: Address) -> Option<BattleLogRecord> {
        battle_log::last_for(&env, &account)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Ships
    // ───────────────────────────────────────────────────────────────────────────

    /// Append `count` new ship ids to the pool (admin). Returns the cursor.
    pub fn provision_ships(env: Env, count: u32) -> Result<u32, ArmadaError> {
        require_admin(&env)?;
        if count == 0 {
            return Err(ArmadaError::InvalidCount);
        }
        if ships::cursor(&env) >= MAX_SHIPS {
            return Err(ArmadaError::PoolCapReached);
        }
        let added = ships::provision(&env, count);
        let cursor = ships::cursor(&env);
        EvShipsProvisioned { added, cursor }.publish(&env);
        bump_instance(&env);
        Ok(cursor)
    }

    /// A page of the available pool (admin).
    pub fn get_available_ships(env: Env, offset: u32, limit: u32) -> Result<Vec<u32>, ArmadaError> {
        require_admin(&env)?;
        Ok(ships::page(&env, offset, limit))
    }

    pub fn available_ship_count(env: Env) -> u32 {
        ships::pool_len(&env)
    }

    pub fn get_ship_owner(env: Env, ship: u32) -> Option<Address> {
        ships::owner_of(&env, ship)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Maintenance & Config
    // ───────────────────────────────────────────────────────────────────────────

    /// Discard the current match, empty the waiting list (refunding each
    /// queued credit) and purge `account` entirely (admin). Ships held by the
    /// match or the account go back to the pool.
    pub fn empty_all(env: Env, account: Address) -> Result<(), ArmadaError> {
        require_admin(&env)?;

        let mut active = ActiveMatch::load(&env);
        active.discard(&env);
        active.save(&env);

        for queued in queue::drain(&env).iter() {
            ledger::refund_credit(&env, &queued);
        }

        let ships_returned = ships::revoke_all(&env, &account);
        ledger::remove_account(&env, &account);
        env.storage()
            .persistent()
            .remove(&DataKey::PlayerOf(account.clone()));

        EvAccountPurged {
            account,
            ships_returned,
        }
        .publish(&env);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<Config, ArmadaError> {
        Ok(Config {
            admin: load_admin(&env)?,
            payment_token: load_payment_token(&env)?,
            credit_price: load_credit_price(&env),
            auto_solve: load_auto_solve(&env),
        })
    }

    pub fn get_admin(env: Env) -> Result<Address, ArmadaError> {
        load_admin(&env)
    }

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), ArmadaError> {
        require_admin(&env)?;
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        Ok(())
    }

    pub fn set_credit_price(env: Env, credit_price: i128) -> Result<(), ArmadaError> {
        require_admin(&env)?;
        env.storage()
            .instance()
            .set(&DataKey::CreditPrice, &credit_price);
        Ok(())
    }

    /// When enabled, the hand submission that makes every alive player ready
    /// also resolves the turn.
    pub fn set_auto_solve(env: Env, enabled: bool) -> Result<(), ArmadaError> {
        require_admin(&env)?;
        env.storage().instance().set(&DataKey::AutoSolve, &enabled);
        Ok(())
    }

    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), ArmadaError> {
        require_admin(&env)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }
}
