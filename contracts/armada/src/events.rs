use soroban_sdk::{contractevent, Address};

#[contractevent]
pub struct EvCreditAdded {
    pub account: Address,
    pub credits: u32,
}

#[contractevent]
pub struct EvQueued {
    pub account: Address,
    pub position: i32,
}

#[contractevent]
pub struct EvMatchStarted {
    pub match_id: u32,
    pub players: u32,
}

#[contractevent]
pub struct EvTurnStarted {
    pub match_id: u32,
    pub round: u32,
    pub alive: u32,
    pub deadline: u32,
}

/// Emitted when a player commits a hand (the hand itself is not published).
#[contractevent]
pub struct EvHandSet {
    pub match_id: u32,
    pub player: u32,
}

#[contractevent]
pub struct EvBattleResolved {
    pub match_id: u32,
    pub round: u32,
    pub winner: u32,
    pub loser: u32,
    pub rounds_played: u32,
}

#[contractevent]
pub struct EvMatchOver {
    pub match_id: u32,
    pub winner: Address,
    pub ship: u32,
}

#[contractevent]
pub struct EvMatchReset {
    pub match_id: u32,
}

#[contractevent]
pub struct EvShipsProvisioned {
    pub added: u32,
    pub cursor: u32,
}

#[contractevent]
pub struct EvAccountPurged {
    pub account: Address,
    /// Owned ships put back into the pool.
    pub ships_returned: u32,
}
