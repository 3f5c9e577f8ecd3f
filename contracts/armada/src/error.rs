use soroban_sdk::contracterror;

/// Hard faults and admin-path rejections.
///
/// Any `Err` returned from a contract entry point reverts every storage write
/// made during that invocation.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ArmadaError {
    AdminNotSet = 1,
    PaymentTokenNotSet = 2,
    InsufficientPayment = 3,
    NoCredits = 4,
    WrongPhase = 5,
    NotEnoughPlayers = 6,
    PoolExhausted = 7,
    PoolCapReached = 8,
    PlayerNotFound = 9,
    NotAPlayer = 10,
    TimeoutNotReached = 11,
    InvalidCount = 12,
}
