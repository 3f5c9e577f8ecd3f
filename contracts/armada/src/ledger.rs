//! Per-account credits.
//!
//! An account exists once it has a credit balance; first sight grants one
//! free credit. Balances saturate at [`MAX_CREDITS`].

use soroban_sdk::{log, token, Address, Env};

use crate::error::ArmadaError;
use crate::events::EvCreditAdded;
use crate::ships::{self, SHIPS_PER_PURCHASE};
use crate::storage::{load_credit_price, load_payment_token, write_holdings, DataKey};

pub const MAX_CREDITS: u32 = 255;
const STARTING_CREDITS: u32 = 1;

pub fn has_account(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Credits(account.clone()))
}

pub fn credits(env: &Env, account: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Credits(account.clone()))
        .unwrap_or(0)
}

fn set_credits(env: &Env, account: &Address, credits: u32) {
    write_holdings(env, &DataKey::Credits(account.clone()), &credits);
}

/// Register `account` on first sight. Returns the current balance.
pub fn ensure_account(env: &Env, account: &Address) -> u32 {
    if has_account(env, account) {
        return credits(env, account);
    }
    set_credits(env, account, STARTING_CREDITS);
    STARTING_CREDITS
}

/// Buy one credit with `payment` units of the configured token. Every
/// purchase also tops up the ship pool.
pub fn add_credit(env: &Env, account: &Address, payment: i128) -> Result<u32, ArmadaError> {
    let price = load_credit_price(env);
    if payment < price || payment < 0 {
        return Err(ArmadaError::InsufficientPayment);
    }

    let balance = ensure_account(env, account);
    if balance >= MAX_CREDITS {
        log!(env, "credit balance already at cap", account.clone(), MAX_CREDITS);
        return Ok(balance);
    }

    if payment > 0 {
        let token_contract = load_payment_token(env)?;
        let token_client = token::Client::new(env, &token_contract);
        token_client.transfer(account, &env.current_contract_address(), &payment);
    }

    let balance = balance + 1;
    set_credits(env, account, balance);
    ships::provision(env, SHIPS_PER_PURCHASE);

    EvCreditAdded {
        account: account.clone(),
        credits: balance,
    }
    .publish(env);

    Ok(balance)
}

/// Consume one credit.
pub fn spend_credit(env: &Env, account: &Address) -> Result<u32, ArmadaError> {
    let balance = credits(env, account);
    if balance == 0 {
        return Err(ArmadaError::NoCredits);
    }
    set_credits(env, account, balance - 1);
    Ok(balance - 1)
}

/// Give back a credit spent on a queue slot that was discarded.
pub fn refund_credit(env: &Env, account: &Address) {
    let balance = credits(env, account);
    set_credits(env, account, balance.saturating_add(1).min(MAX_CREDITS));
}

/// Forget the account's balance. Owned ships must be revoked separately.
pub fn remove_account(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Credits(account.clone()));
}
