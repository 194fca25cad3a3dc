use crate::full_math::{checked_mul_div, to_unsigned};
use singularity_types::{
    AccountPosition, VaultError, VaultState, MIN_ACCRUING_SHARES, REWARD_PRECISION,
};
use soroban_sdk::Env;

/// Last ledger rewards are emitted for, as seen from `current_ledger`
pub fn last_applicable_ledger(state: &VaultState, current_ledger: u32) -> u32 {
    if current_ledger < state.period_finish_ledger {
        current_ledger
    } else {
        state.period_finish_ledger
    }
}

/// Reward-per-share accumulator brought forward to `current_ledger`
///
/// Nothing accrues while the share supply is below `MIN_ACCRUING_SHARES`;
/// emissions for those ledgers stay in the reserve.
pub fn reward_per_share(
    env: &Env,
    state: &VaultState,
    current_ledger: u32,
) -> Result<u128, VaultError> {
    let applicable = last_applicable_ledger(state, current_ledger);
    if state.total_shares < MIN_ACCRUING_SHARES || applicable <= state.last_update_ledger {
        return Ok(state.reward_per_share_stored);
    }

    let elapsed = (applicable - state.last_update_ledger) as u128;
    let emitted = to_unsigned(state.reward_rate)
        .checked_mul(elapsed)
        .ok_or(VaultError::MathOverflow)?;
    let delta = checked_mul_div(env, emitted, REWARD_PRECISION, to_unsigned(state.total_shares))
        .ok_or(VaultError::MathOverflow)?;

    state
        .reward_per_share_stored
        .checked_add(delta)
        .ok_or(VaultError::MathOverflow)
}

/// Rewards owed to a position given the current accumulator value
pub fn earned(
    env: &Env,
    position: &AccountPosition,
    reward_per_share: u128,
) -> Result<i128, VaultError> {
    let pending = if position.shares > 0 && reward_per_share > position.reward_per_share_paid {
        checked_mul_div(
            env,
            to_unsigned(position.shares),
            reward_per_share - position.reward_per_share_paid,
            REWARD_PRECISION,
        )
        .ok_or(VaultError::MathOverflow)?
    } else {
        0
    };

    let pending = i128::try_from(pending).map_err(|_| VaultError::MathOverflow)?;
    position
        .rewards_owed
        .checked_add(pending)
        .ok_or(VaultError::MathOverflow)
}

/// Emission rate for a new funding round
///
/// Whatever the active period has not yet emitted rolls into the new one.
pub fn next_reward_rate(
    state: &VaultState,
    amount: i128,
    duration_ledgers: u32,
    current_ledger: u32,
) -> Result<i128, VaultError> {
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    if duration_ledgers == 0 {
        return Err(VaultError::InvalidDuration);
    }

    let leftover = if current_ledger < state.period_finish_ledger {
        let remaining = (state.period_finish_ledger - current_ledger) as i128;
        remaining
            .checked_mul(state.reward_rate)
            .ok_or(VaultError::MathOverflow)?
    } else {
        0
    };

    let total = amount.checked_add(leftover).ok_or(VaultError::MathOverflow)?;
    let rate = total / duration_ledgers as i128;
    if rate == 0 {
        return Err(VaultError::RewardRateTooLow);
    }
    Ok(rate)
}
