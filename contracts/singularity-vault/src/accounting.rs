use crate::invariants;
use crate::rewards::checkpoint;
use crate::storage::{get_config, get_position, get_state, set_position, set_state};
use singularity_types::VaultError;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::{log, token, Address, Env, Symbol};
use vault_math::{shares_for_deposit, underlying_for_shares};

/// Deposit underlying for `account` and mint shares at the current rate
///
/// # Returns
/// Shares minted
pub fn deposit(env: &Env, account: Address, amount: i128) -> Result<i128, VaultError> {
    let config = get_config(env);
    config.singularity.require_auth();
    account.require_auth();

    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }

    let ledger = env.ledger().sequence();
    let mut state = get_state(env);
    let mut position = get_position(env, &account);

    checkpoint(env, &mut state, &mut position, ledger)?;

    let shares = shares_for_deposit(env, amount, state.total_shares, state.total_underlying)?;
    if shares == 0 {
        return Err(VaultError::ZeroSharesMinted);
    }

    // Pull tokens from the depositor
    let underlying_client = token::Client::new(env, &config.underlying);
    underlying_client.transfer(&account, &env.current_contract_address(), &amount);

    state.total_shares += shares;
    state.total_underlying += amount;
    position.shares += shares;
    position.principal += amount;

    set_position(env, &account, &position);
    set_state(env, &state);

    debug_assert!(invariants::shares_and_underlying_consistent(&state));
    debug_assert!(invariants::position_within_supply(&position, &state));
    debug_assert!(invariants::check_solvency(env, &config, &state));

    env.events().publish(
        (Symbol::new(env, "deposit"), account.clone()),
        (amount, shares),
    );
    log!(env, "deposit", account, amount, shares);

    Ok(shares)
}

/// Burn `shares` from `account` and return the proportional underlying
///
/// # Returns
/// Underlying amount transferred to the account
pub fn withdraw(env: &Env, account: Address, shares: i128) -> Result<i128, VaultError> {
    let config = get_config(env);
    config.singularity.require_auth();
    account.require_auth();

    if shares <= 0 {
        return Err(VaultError::InvalidAmount);
    }

    let ledger = env.ledger().sequence();
    let mut state = get_state(env);
    let mut position = get_position(env, &account);

    if shares > position.shares {
        return Err(VaultError::InsufficientShares);
    }

    checkpoint(env, &mut state, &mut position, ledger)?;

    let amount = underlying_for_shares(env, shares, state.total_shares, state.total_underlying)?;
    if amount == 0 {
        return Err(VaultError::InvalidAmount);
    }

    // Principal leaves in the same proportion as shares
    let principal_out = if shares == position.shares {
        position.principal
    } else {
        position.principal.fixed_mul_floor(env, &shares, &position.shares)
    };

    state.total_shares -= shares;
    state.total_underlying -= amount;
    position.shares -= shares;
    position.principal -= principal_out;

    set_position(env, &account, &position);
    set_state(env, &state);

    let underlying_client = token::Client::new(env, &config.underlying);
    underlying_client.transfer(&env.current_contract_address(), &account, &amount);

    debug_assert!(invariants::shares_and_underlying_consistent(&state));
    debug_assert!(invariants::check_solvency(env, &config, &state));

    env.events().publish(
        (Symbol::new(env, "withdraw"), account.clone()),
        (amount, shares),
    );
    log!(env, "withdraw", account, amount, shares);

    Ok(amount)
}

/// Underlying value of the shares `account` holds
pub fn underlying_balance_of(env: &Env, account: &Address) -> Result<i128, VaultError> {
    let state = get_state(env);
    let position = get_position(env, account);
    underlying_for_shares(env, position.shares, state.total_shares, state.total_underlying)
}
