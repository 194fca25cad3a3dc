use cvlr::asserts::{cvlr_assert, cvlr_assume};
use cvlr_soroban_derive::rule;
use soroban_sdk::Env;
use vault_math::{shares_for_deposit, underlying_for_shares};

use crate::invariants::shares_and_underlying_consistent;
use singularity_types::VaultState;

const BOUND: i128 = 1_000_000_000_000_000_000_000; // 1e21

/// RULE: Minted shares never buy more than the deposit is worth
#[rule]
pub fn deposit_does_not_dilute(env: Env, amount: i128, total_shares: i128, total_underlying: i128) {
    cvlr_assume!(amount > 0 && amount < BOUND);
    cvlr_assume!(total_shares > 0 && total_shares < BOUND);
    cvlr_assume!(total_underlying > 0 && total_underlying < BOUND);

    if let Ok(shares) = shares_for_deposit(&env, amount, total_shares, total_underlying) {
        cvlr_assert!(shares * total_underlying <= amount * total_shares);
    }
}

/// RULE: First deposit mints exactly the deposited amount
#[rule]
pub fn first_deposit_one_to_one(env: Env, amount: i128) {
    cvlr_assume!(amount > 0 && amount < BOUND);

    let shares = shares_for_deposit(&env, amount, 0, 0);
    cvlr_assert!(shares == Ok(amount));
}

/// RULE: Withdrawing pays at most the proportional underlying
#[rule]
pub fn withdraw_bounded_by_share(env: Env, shares: i128, total_shares: i128, total_underlying: i128) {
    cvlr_assume!(total_shares > 0 && total_shares < BOUND);
    cvlr_assume!(total_underlying > 0 && total_underlying < BOUND);
    cvlr_assume!(shares > 0 && shares <= total_shares);

    if let Ok(amount) = underlying_for_shares(&env, shares, total_shares, total_underlying) {
        cvlr_assert!(amount <= total_underlying);
        cvlr_assert!(amount * total_shares <= shares * total_underlying);
        if shares == total_shares {
            cvlr_assert!(amount == total_underlying);
        }
    }
}

/// RULE: Full exit leaves no stranded underlying
#[rule]
pub fn full_exit_keeps_totals_consistent(env: Env, total_shares: i128, total_underlying: i128) {
    cvlr_assume!(total_shares > 0 && total_shares < BOUND);
    cvlr_assume!(total_underlying > 0 && total_underlying < BOUND);

    if let Ok(amount) = underlying_for_shares(&env, total_shares, total_shares, total_underlying) {
        let after = VaultState {
            total_shares: 0,
            total_underlying: total_underlying - amount,
            ..VaultState::default()
        };
        cvlr_assert!(shares_and_underlying_consistent(&after));
    }
}
