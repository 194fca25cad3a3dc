//! Fixture helpers shared by the protocol scenarios

use singularity_types::within_tolerance;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, Address, Env};

/// Average ledger close time used when advancing blocks
pub const SECONDS_PER_LEDGER: u64 = 5;

/// Whole token units to base units
pub fn parse_tokens(amount: i128, decimals: u32) -> i128 {
    amount * 10i128.pow(decimals)
}

pub fn create_token(env: &Env) -> Address {
    let admin = Address::generate(env);
    env.register_stellar_asset_contract_v2(admin).address()
}

pub fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}

pub fn balance(env: &Env, token: &Address, id: &Address) -> i128 {
    token::Client::new(env, token).balance(id)
}

pub fn advance_blocks(env: &Env, blocks: u32) {
    env.ledger().with_mut(|li| {
        li.sequence_number += blocks;
        li.timestamp += SECONDS_PER_LEDGER * blocks as u64;
    });
}

pub fn advance_time(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

/// Assert `actual` is within `tolerance_bps` of `expected`
pub fn check_within(expected: i128, actual: i128, tolerance_bps: i128) {
    assert!(
        within_tolerance(expected, actual, tolerance_bps),
        "expected {} within {} bps, got {}",
        expected,
        tolerance_bps,
        actual
    );
}
