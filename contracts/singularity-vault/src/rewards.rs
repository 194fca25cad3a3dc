use crate::invariants;
use crate::storage::{get_config, get_position, get_state, set_position, set_state};
use singularity_types::{AccountPosition, ClaimResult, VaultError, VaultState};
use soroban_sdk::{log, token, Address, Env, Symbol};
use vault_math::{earned, last_applicable_ledger, next_reward_rate, reward_per_share};

/// Bring the global accumulator forward to `ledger`
pub fn update_reward_per_share(
    env: &Env,
    state: &mut VaultState,
    ledger: u32,
) -> Result<(), VaultError> {
    let previous = state.reward_per_share_stored;
    state.reward_per_share_stored = reward_per_share(env, state, ledger)?;
    debug_assert!(invariants::reward_per_share_monotonic(previous, state.reward_per_share_stored));

    let applicable = last_applicable_ledger(state, ledger);
    if applicable > state.last_update_ledger {
        state.last_update_ledger = applicable;
    }
    Ok(())
}

/// Settle a position's rewards against the current accumulator
///
/// Must run before any change to the position's shares.
pub fn checkpoint(
    env: &Env,
    state: &mut VaultState,
    position: &mut AccountPosition,
    ledger: u32,
) -> Result<(), VaultError> {
    update_reward_per_share(env, state, ledger)?;

    position.rewards_owed = earned(env, position, state.reward_per_share_stored)?;
    position.reward_per_share_paid = state.reward_per_share_stored;
    position.last_checkpoint_ledger = ledger;
    Ok(())
}

/// Rewards claimable by `account` at the current ledger, without settling
pub fn pending(env: &Env, account: &Address) -> Result<i128, VaultError> {
    let state = get_state(env);
    let position = get_position(env, account);
    let rps = reward_per_share(env, &state, env.ledger().sequence())?;
    earned(env, &position, rps)
}

/// Pay out everything owed to `account` in the reward token
pub fn claim(env: &Env, account: Address) -> Result<ClaimResult, VaultError> {
    let config = get_config(env);
    config.singularity.require_auth();
    account.require_auth();

    let ledger = env.ledger().sequence();
    let mut state = get_state(env);
    let mut position = get_position(env, &account);

    checkpoint(env, &mut state, &mut position, ledger)?;

    let amount = position.rewards_owed;
    if amount <= 0 {
        return Err(VaultError::NothingToClaim);
    }
    if amount > state.reward_reserve {
        return Err(VaultError::RewardReserveExceeded);
    }

    position.rewards_owed = 0;
    state.reward_reserve -= amount;
    debug_assert!(invariants::reward_reserve_non_negative(&state));

    set_position(env, &account, &position);
    set_state(env, &state);

    let reward_client = token::Client::new(env, &config.reward_token);
    reward_client.transfer(&env.current_contract_address(), &account, &amount);

    env.events().publish(
        (Symbol::new(env, "claim"), account.clone()),
        (amount, ledger),
    );
    log!(env, "claim", account, amount);

    Ok(ClaimResult {
        pool: config.pool,
        account,
        amount,
        ledger,
    })
}

/// Start or extend a linear emission period of `duration_ledgers`
///
/// Returns the new per-ledger reward rate.
pub fn fund(env: &Env, amount: i128, duration_ledgers: u32) -> Result<i128, VaultError> {
    let config = get_config(env);
    config.distributor.require_auth();

    let ledger = env.ledger().sequence();
    let mut state = get_state(env);
    update_reward_per_share(env, &mut state, ledger)?;

    let rate = next_reward_rate(&state, amount, duration_ledgers, ledger)?;
    let period_finish = ledger
        .checked_add(duration_ledgers)
        .ok_or(VaultError::InvalidDuration)?;

    let reward_client = token::Client::new(env, &config.reward_token);
    reward_client.transfer(&config.distributor, &env.current_contract_address(), &amount);

    state.reward_rate = rate;
    state.last_update_ledger = ledger;
    state.period_finish_ledger = period_finish;
    state.reward_reserve += amount;
    set_state(env, &state);

    env.events().publish(
        (Symbol::new(env, "funded"),),
        (amount, rate, period_finish),
    );
    log!(env, "funded", amount, rate, period_finish);

    Ok(rate)
}
