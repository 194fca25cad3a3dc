// ============================================================================
// INVARIANTS MODULE - For Formal Verification
// ============================================================================
//
// Properties every vault state must satisfy. Used by debug assertions after
// each mutation and by the Certora rules under the `certora` feature.
//
// INVARIANT CATEGORIES:
//
// 1. SHARE INVARIANTS
//    - Shares exist exactly when principal is held
//    - No position holds more than the total supply
//
// 2. REWARD INVARIANTS
//    - Reward-per-share accumulator never decreases
//    - Reserve never goes negative
//
// 3. SOLVENCY INVARIANTS
//    - Token balances cover principal plus unpaid rewards
//
// ============================================================================

use singularity_types::{AccountPosition, VaultConfig, VaultState};
use soroban_sdk::{token, Env};

// ============================================================================
// SHARE INVARIANTS
// ============================================================================

/// Invariant: shares and underlying are zero together
///
/// Property:
///   total_shares == 0 <=> total_underlying == 0
///
/// Withdrawing the final share returns the full remaining principal, so no
/// dust can be stranded behind an empty share supply.
pub fn shares_and_underlying_consistent(state: &VaultState) -> bool {
    (state.total_shares == 0) == (state.total_underlying == 0)
        && state.total_shares >= 0
        && state.total_underlying >= 0
}

/// Invariant: a position never exceeds the share supply
///
/// Property:
///   0 <= position.shares <= total_shares
pub fn position_within_supply(position: &AccountPosition, state: &VaultState) -> bool {
    position.shares >= 0 && position.shares <= state.total_shares
}

// ============================================================================
// REWARD INVARIANTS
// ============================================================================

/// Invariant: reward-per-share is monotonically non-decreasing
///
/// Property:
///   reward_per_share_new >= reward_per_share_old
pub fn reward_per_share_monotonic(old_reward_per_share: u128, new_reward_per_share: u128) -> bool {
    new_reward_per_share >= old_reward_per_share
}

/// Invariant: the reward reserve never goes negative
pub fn reward_reserve_non_negative(state: &VaultState) -> bool {
    state.reward_reserve >= 0
}

// ============================================================================
// SOLVENCY INVARIANTS
// ============================================================================

/// Invariant: held balances back every obligation
///
/// Property (shared token):
///   balance >= total_underlying + reward_reserve
///
/// Property (separate tokens):
///   underlying_balance >= total_underlying && reward_balance >= reward_reserve
pub fn balances_cover_obligations(
    same_token: bool,
    underlying_balance: i128,
    reward_balance: i128,
    state: &VaultState,
) -> bool {
    if same_token {
        underlying_balance >= state.total_underlying + state.reward_reserve
    } else {
        underlying_balance >= state.total_underlying && reward_balance >= state.reward_reserve
    }
}

/// Reads the vault's token balances and checks solvency
pub fn check_solvency(env: &Env, config: &VaultConfig, state: &VaultState) -> bool {
    let vault = env.current_contract_address();
    let underlying_balance = token::Client::new(env, &config.underlying).balance(&vault);
    let same_token = config.underlying == config.reward_token;
    let reward_balance = if same_token {
        underlying_balance
    } else {
        token::Client::new(env, &config.reward_token).balance(&vault)
    };

    balances_cover_obligations(same_token, underlying_balance, reward_balance, state)
}
