use soroban_sdk::{contracttype, Address, Vec};

// ═══════════════════════════════════════════════════════════════════════════════
//  State machines
// ═══════════════════════════════════════════════════════════════════════════════

/// Match-wide phase. Exactly one value is live at a time and it gates every
/// mutating operation.
///
/// ```text
/// LOBBY ─start_game─▶ SETUP ─▶ WAIT_PLAYERS ─solve_turn─▶ SOLVING_TURN
///                                   ▲                          │
///                                   └──── more than 1 alive ───┤
///                                                              ▼
/// LOBBY ◀── BUSY ◀────────── new_game ─────────────────────── OVER
/// ```
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum GameState {
    Busy = 0,
    Lobby = 1,
    Setup = 2,
    WaitPlayers = 3,
    SolvingTurn = 4,
    Over = 5,
}

impl GameState {
    /// Whether accounts may enter the waiting list in this phase. Queueing
    /// for the next match is allowed while one is running.
    pub fn accepts_queue(self) -> bool {
        !matches!(self, GameState::Setup | GameState::Busy | GameState::SolvingTurn)
    }
}

/// Per-player lifecycle within one match. `Dead` is terminal.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PlayerState {
    Joined = 1,
    Setup = 2,
    Ready = 3,
    Wait = 4,
    Dead = 5,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Status codes for player-facing soft rejections
// ═══════════════════════════════════════════════════════════════════════════════

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum JoinStatus {
    LobbyClosed = 0,
    AlreadyQueued = 1,
    NoCredits = 2,
    Joined = 3,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum HandStatus {
    WrongPhase = 0,
    NotPlaying = 1,
    PlayerDead = 2,
    WrongSize = 3,
    /// Repeated indices, or an index past the end of the arsenal.
    DuplicateCards = 4,
    Accepted = 5,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Entities
// ═══════════════════════════════════════════════════════════════════════════════

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Player {
    /// Dense roster index, stable for the match.
    pub id: u32,
    pub account: Address,
    pub ship: u32,
    /// Card-type indices (see `cards::CARDS`). Grows by one per battle won.
    pub arsenal: Vec<u32>,
    /// Three distinct indices into `arsenal`.
    pub hand: Vec<u32>,
    pub state: PlayerState,
    pub wins: u32,
}

/// Scalars shared by the whole match, persisted as one value.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchState {
    pub id: u32,
    pub state: GameState,
    pub round: u32,
    pub players_ready: u32,
    /// Ledger sequence after which any alive player may force the turn.
    pub turn_deadline: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameView {
    pub id: u32,
    pub state: GameState,
    pub total_alive: u32,
    pub waiting_count: u32,
    pub round: u32,
    pub players_ready: u32,
    pub turn_deadline: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountView {
    pub credits: u32,
    pub ships: Vec<u32>,
    /// The seated player of the current match: empty, or exactly one entry.
    pub player: Vec<Player>,
    /// 1-based distance from the front of the line, -1 when not queued.
    pub queue_position: i32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub payment_token: Address,
    pub credit_price: i128,
    pub auto_solve: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Battle log
// ═══════════════════════════════════════════════════════════════════════════════

/// Storage identity of a battle: the two accounts in pairing order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BattleKey {
    pub first: Address,
    pub second: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BattleRound {
    /// Arsenal indices played by side A (3 entries, or 1 from round 3 on).
    pub hand_a: Vec<u32>,
    pub hand_b: Vec<u32>,
    /// Net card score: positive favours A, negative favours B.
    pub score: i32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BattleLogRecord {
    pub player_a: u32,
    pub player_b: u32,
    pub ship_a: u32,
    pub ship_b: u32,
    pub arsenal_a: Vec<u32>,
    pub arsenal_b: Vec<u32>,
    pub winner: u32,
    pub rounds: Vec<BattleRound>,
}
