//! Match orchestration: admission, turns, pairing and payout.
//!
//! Every public operation loads an [`ActiveMatch`], mutates it in memory and
//! saves it once at the end. A returned `Err` aborts the invocation, so none
//! of the roster or ship changes made so far are committed.

use soroban_sdk::{log, Address, Env, Vec};

use crate::battle;
use crate::battle_log;
use crate::cards::{CARD_TYPES, HAND_SIZE, STARTING_CARDS};
use crate::error::ArmadaError;
use crate::events::{
    EvBattleResolved, EvHandSet, EvMatchOver, EvMatchReset, EvMatchStarted, EvTurnStarted,
};
use crate::queue;
use crate::random::{random_hand, random_short, random_sort};
use crate::ships;
use crate::storage::{
    read_alive, read_match, read_roster, write_alive, write_match, write_match_data, write_roster,
    DataKey, TURN_TIMEOUT_LEDGERS,
};
use crate::types::{GameState, HandStatus, MatchState, Player, PlayerState};

pub const MIN_PLAYERS: u32 = 4;
pub const MAX_PLAYERS: u32 = 8;

pub struct ActiveMatch {
    pub state: MatchState,
    pub roster: Vec<Player>,
    pub alive: Vec<u32>,
}

impl ActiveMatch {
    pub fn load(env: &Env) -> Self {
        Self {
            state: read_match(env),
            roster: read_roster(env),
            alive: read_alive(env),
        }
    }

    pub fn save(&self, env: &Env) {
        write_match(env, &self.state);
        write_roster(env, &self.roster);
        write_alive(env, &self.alive);
    }

    pub fn player_of(env: &Env, account: &Address) -> Option<u32> {
        env.storage()
            .persistent()
            .get(&DataKey::PlayerOf(account.clone()))
    }

    // ───────────────────────────────────────────────────────────────────────
    //  Start
    // ───────────────────────────────────────────────────────────────────────

    /// Seat up to [`MAX_PLAYERS`] queued accounts, each with a drawn ship and
    /// a starting arsenal, then open the first turn.
    pub fn start(&mut self, env: &Env) -> Result<(), ArmadaError> {
        if self.state.state != GameState::Lobby {
            log!(env, "game is not in lobby");
            return Err(ArmadaError::WrongPhase);
        }
        if queue::waiting_count(env) < MIN_PLAYERS {
            log!(env, "not enough players to start", MIN_PLAYERS);
            return Err(ArmadaError::NotEnoughPlayers);
        }
        self.state.state = GameState::Setup;

        let admitted = queue::admit_up_to(env, MAX_PLAYERS.saturating_sub(self.roster.len()));
        for account in admitted.iter() {
            let id = self.roster.len();
            let ship = ships::draw(env)?;
            let mut arsenal = Vec::from_array(env, STARTING_CARDS);
            arsenal.push_back(random_short(env, CARD_TYPES));

            write_match_data(env, &DataKey::PlayerOf(account.clone()), &id);
            self.roster.push_back(Player {
                id,
                account,
                ship,
                arsenal,
                hand: Vec::from_array(env, STARTING_CARDS),
                state: PlayerState::Setup,
                wins: 0,
            });
            self.alive.push_back(id);
        }

        EvMatchStarted {
            match_id: self.state.id,
            players: self.roster.len(),
        }
        .publish(env);

        self.begin_turn(env);
        Ok(())
    }

    /// Deal every alive player a fresh hand and wait for submissions.
    fn begin_turn(&mut self, env: &Env) {
        for id in self.alive.iter() {
            if let Some(mut player) = self.roster.get(id) {
                player.hand = random_hand(env, player.arsenal.len());
                player.state = PlayerState::Wait;
                self.roster.set(id, player);
            }
        }
        self.state.players_ready = 0;
        self.state.state = GameState::WaitPlayers;
        self.state.turn_deadline = env
            .ledger()
            .sequence()
            .saturating_add(TURN_TIMEOUT_LEDGERS);

        EvTurnStarted {
            match_id: self.state.id,
            round: self.state.round,
            alive: self.alive.len(),
            deadline: self.state.turn_deadline,
        }
        .publish(env);
    }

    // ───────────────────────────────────────────────────────────────────────
    //  Hands
    // ───────────────────────────────────────────────────────────────────────

    /// Commit `hand` for `account`'s player. Re-submission within a turn
    /// overwrites the hand without counting the player twice.
    pub fn set_hand(&mut self, env: &Env, account: &Address, hand: Vec<u32>) -> HandStatus {
        if self.state.state != GameState::WaitPlayers {
            log!(env, "hand can't be set now", account.clone());
            return HandStatus::WrongPhase;
        }
        let Some(mut player) = Self::player_of(env, account).and_then(|id| self.roster.get(id))
        else {
            log!(env, "account is not playing", account.clone());
            return HandStatus::NotPlaying;
        };
        if player.state == PlayerState::Dead {
            log!(env, "player is no longer alive", account.clone());
            return HandStatus::PlayerDead;
        }
        if hand.len() != HAND_SIZE {
            log!(env, "hand must contain exactly 3 cards", hand.len());
            return HandStatus::WrongSize;
        }
        if !is_valid_hand(&hand, player.arsenal.len()) {
            log!(env, "hand can't contain duplicated cards", account.clone());
            return HandStatus::DuplicateCards;
        }

        player.hand = hand;
        if player.state != PlayerState::Ready {
            player.state = PlayerState::Ready;
            self.state.players_ready += 1;
        }
        let id = player.id;
        self.roster.set(id, player);

        EvHandSet {
            match_id: self.state.id,
            player: id,
        }
        .publish(env);

        HandStatus::Accepted
    }

    pub fn all_ready(&self) -> bool {
        self.state.players_ready >= self.alive.len()
    }

    // ───────────────────────────────────────────────────────────────────────
    //  Solve
    // ───────────────────────────────────────────────────────────────────────

    /// Pair the alive players in a pseudo-shuffled order and battle each
    /// full pair. An odd player out gets a bye.
    pub fn solve_turn(&mut self, env: &Env) -> Result<(), ArmadaError> {
        if self.state.state != GameState::WaitPlayers {
            log!(env, "game state is not valid to solve this turn");
            return Err(ArmadaError::WrongPhase);
        }
        self.state.state = GameState::SolvingTurn;
        battle_log::clear_for(env, &self.roster);

        let mut order = self.alive.clone();
        random_sort(env, &mut order);

        let mut i: u32 = 0;
        while i + 1 < order.len() {
            self.battle(env, order.get_unchecked(i), order.get_unchecked(i + 1))?;
            i += 2;
        }

        let mut survivors = Vec::new(env);
        for id in order.iter() {
            let player = self.roster.get(id).ok_or(ArmadaError::PlayerNotFound)?;
            if player.state != PlayerState::Dead {
                survivors.push_back(id);
            }
        }
        self.alive = survivors;

        if self.alive.len() <= 1 {
            self.close(env);
        } else {
            self.state.round += 1;
            self.begin_turn(env);
        }
        Ok(())
    }

    fn battle(&mut self, env: &Env, id_a: u32, id_b: u32) -> Result<(), ArmadaError> {
        let mut a = self.roster.get(id_a).ok_or(ArmadaError::PlayerNotFound)?;
        let mut b = self.roster.get(id_b).ok_or(ArmadaError::PlayerNotFound)?;

        let record = battle::resolve(env, &mut a, &mut b);
        battle_log::save(env, &a.account, &b.account, &record);

        let loser = if record.winner == id_a { id_b } else { id_a };
        EvBattleResolved {
            match_id: self.state.id,
            round: self.state.round,
            winner: record.winner,
            loser,
            rounds_played: record.rounds.len(),
        }
        .publish(env);

        self.roster.set(id_a, a);
        self.roster.set(id_b, b);
        Ok(())
    }

    /// Pay the sole survivor their ship and return every other ship.
    fn close(&mut self, env: &Env) {
        let winner = self.alive.get(0);
        for player in self.roster.iter() {
            if Some(player.id) == winner {
                ships::grant_ownership(env, &player.account, player.ship);
                EvMatchOver {
                    match_id: self.state.id,
                    winner: player.account.clone(),
                    ship: player.ship,
                }
                .publish(env);
            } else {
                ships::release(env, player.ship);
            }
        }
        self.state.state = GameState::Over;
    }

    // ───────────────────────────────────────────────────────────────────────
    //  Timeout
    // ───────────────────────────────────────────────────────────────────────

    /// Force the turn once its deadline has passed. Only alive players of
    /// the current match may do this.
    pub fn resolve_timeout(&mut self, env: &Env, caller: &Address) -> Result<(), ArmadaError> {
        let player = Self::player_of(env, caller)
            .and_then(|id| self.roster.get(id))
            .ok_or(ArmadaError::NotAPlayer)?;
        if player.state == PlayerState::Dead {
            return Err(ArmadaError::NotAPlayer);
        }
        if self.state.state != GameState::WaitPlayers {
            return Err(ArmadaError::WrongPhase);
        }
        if env.ledger().sequence() < self.state.turn_deadline {
            return Err(ArmadaError::TimeoutNotReached);
        }
        self.solve_turn(env)
    }

    // ───────────────────────────────────────────────────────────────────────
    //  Reset
    // ───────────────────────────────────────────────────────────────────────

    /// Tear down a finished match and reopen the lobby.
    pub fn reset(&mut self, env: &Env) -> Result<(), ArmadaError> {
        if self.state.state != GameState::Over {
            log!(env, "only a finished game can be reset");
            return Err(ArmadaError::WrongPhase);
        }
        self.clear(env);
        Ok(())
    }

    /// Abandon whatever is running. Ships still in play go back to the pool.
    pub fn discard(&mut self, env: &Env) {
        if matches!(
            self.state.state,
            GameState::Setup | GameState::WaitPlayers | GameState::SolvingTurn
        ) {
            for player in self.roster.iter() {
                ships::release(env, player.ship);
            }
        }
        self.clear(env);
    }

    fn clear(&mut self, env: &Env) {
        self.state.state = GameState::Busy;
        battle_log::clear_for(env, &self.roster);
        for player in self.roster.iter() {
            env.storage()
                .persistent()
                .remove(&DataKey::PlayerOf(player.account.clone()));
        }
        self.roster = Vec::new(env);
        self.alive = Vec::new(env);
        self.state.players_ready = 0;
        self.state.id += 1;
        self.state.round = 0;
        self.state.turn_deadline = 0;
        self.state.state = GameState::Lobby;

        EvMatchReset {
            match_id: self.state.id,
        }
        .publish(env);
    }
}

/// Distinct indices, all inside the arsenal.
pub fn is_valid_hand(hand: &Vec<u32>, arsenal_len: u32) -> bool {
    let mut i: u32 = 0;
    while i < hand.len() {
        let index = hand.get_unchecked(i);
        if index >= arsenal_len || hand.first_index_of(index) != Some(i) {
            return false;
        }
        i += 1;
    }
    true
}
