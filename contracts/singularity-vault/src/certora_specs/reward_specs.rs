use cvlr::asserts::{cvlr_assert, cvlr_assume};
use cvlr_soroban_derive::rule;
use soroban_sdk::Env;
use vault_math::{earned, next_reward_rate, reward_per_share};

use crate::invariants::reward_per_share_monotonic;
use singularity_types::{AccountPosition, VaultState};

const BOUND: i128 = 1_000_000_000_000_000_000_000; // 1e21

fn stream(total_shares: i128, rate: i128, last_update: u32, finish: u32, stored: u128) -> VaultState {
    VaultState {
        total_shares,
        total_underlying: total_shares,
        reward_rate: rate,
        reward_per_share_stored: stored,
        last_update_ledger: last_update,
        period_finish_ledger: finish,
        reward_reserve: 0,
    }
}

/// RULE: Accumulator never decreases as ledgers advance
#[rule]
pub fn accumulator_monotonic(
    env: Env,
    total_shares: i128,
    rate: i128,
    last_update: u32,
    finish: u32,
    ledger_a: u32,
    ledger_b: u32,
) {
    cvlr_assume!(total_shares > 0 && total_shares < BOUND);
    cvlr_assume!(rate >= 0 && rate < BOUND);
    cvlr_assume!(last_update <= ledger_a && ledger_a <= ledger_b);

    let state = stream(total_shares, rate, last_update, finish, 0);
    if let (Ok(at_a), Ok(at_b)) = (
        reward_per_share(&env, &state, ledger_a),
        reward_per_share(&env, &state, ledger_b),
    ) {
        cvlr_assert!(reward_per_share_monotonic(at_a, at_b));
    }
}

/// RULE: A static position's earnings never decrease
#[rule]
pub fn earned_monotonic(env: Env, shares: i128, paid: u128, rps_a: u128, rps_b: u128, owed: i128) {
    cvlr_assume!(shares >= 0 && shares < BOUND);
    cvlr_assume!(owed >= 0 && owed < BOUND);
    cvlr_assume!(paid <= rps_a && rps_a <= rps_b);
    cvlr_assume!(rps_b < 1_000_000_000_000_000_000_000_000_000);

    let position = AccountPosition {
        shares,
        principal: shares,
        reward_per_share_paid: paid,
        rewards_owed: owed,
        last_checkpoint_ledger: 0,
    };

    if let (Ok(at_a), Ok(at_b)) = (earned(&env, &position, rps_a), earned(&env, &position, rps_b)) {
        cvlr_assert!(at_a <= at_b);
    }
}

/// RULE: A funding round never promises more than it holds
#[rule]
pub fn funding_rate_bounded(amount: i128, duration: u32, rate: i128, finish: u32, ledger: u32) {
    cvlr_assume!(amount > 0 && amount < BOUND);
    cvlr_assume!(rate >= 0 && rate < BOUND);
    cvlr_assume!(duration > 0);

    let state = stream(1, rate, 0, finish, 0);
    let leftover = if ledger < finish {
        (finish - ledger) as i128 * rate
    } else {
        0
    };

    if let Ok(new_rate) = next_reward_rate(&state, amount, duration, ledger) {
        cvlr_assert!(new_rate * duration as i128 <= amount + leftover);
    }
}
