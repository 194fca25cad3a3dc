#![no_std]

mod accounting;
mod invariants;
mod rewards;
mod storage;

#[cfg(feature = "certora")]
mod certora_specs;

use singularity_types::{AccountPosition, ClaimResult, VaultConfig, VaultError, VaultState};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env};
use storage::{get_config, get_position, get_state, has_config, set_config, set_state};

#[contract]
pub struct SingularityVault;

#[contractimpl]
impl SingularityVault {
    /// Initialize a vault for one pool
    ///
    /// # Arguments
    /// * `singularity` - Router allowed to deposit, withdraw and claim
    /// * `pool` - Pool identifier served by this vault
    /// * `underlying` - Token accepted as principal
    /// * `reward_token` - Wrapped ETH paid out as bonus
    /// * `distributor` - Address allowed to fund the reward stream
    pub fn initialize(
        env: Env,
        singularity: Address,
        pool: Address,
        underlying: Address,
        reward_token: Address,
        distributor: Address,
    ) -> Result<(), VaultError> {
        if has_config(&env) {
            return Err(VaultError::AlreadyInitialized);
        }

        let config = VaultConfig {
            singularity,
            pool,
            underlying,
            reward_token,
            distributor,
        };
        set_config(&env, &config);

        let state = VaultState {
            last_update_ledger: env.ledger().sequence(),
            ..VaultState::default()
        };
        set_state(&env, &state);

        Ok(())
    }

    /// Deposit underlying and mint shares for `account`
    ///
    /// # Returns
    /// Shares minted
    pub fn deposit(env: Env, account: Address, amount: i128) -> Result<i128, VaultError> {
        accounting::deposit(&env, account, amount)
    }

    /// Burn shares and return the proportional underlying
    ///
    /// # Returns
    /// Underlying amount transferred to the account
    pub fn withdraw(env: Env, account: Address, shares: i128) -> Result<i128, VaultError> {
        accounting::withdraw(&env, account, shares)
    }

    /// Settle and pay out accrued ETH bonus
    pub fn claim(env: Env, account: Address) -> Result<ClaimResult, VaultError> {
        rewards::claim(&env, account)
    }

    /// Fund a linear reward stream lasting `duration_ledgers`
    ///
    /// # Returns
    /// New reward rate per ledger
    pub fn fund_rewards(env: Env, amount: i128, duration_ledgers: u32) -> Result<i128, VaultError> {
        rewards::fund(&env, amount, duration_ledgers)
    }

    /// Replace this vault's logic with `wasm_hash`
    pub fn upgrade(env: Env, wasm_hash: BytesN<32>) {
        let config = get_config(&env);
        config.singularity.require_auth();
        env.deployer().update_current_contract_wasm(wasm_hash);
    }

    // === View Functions ===

    /// Shares held by `account`
    pub fn balance_of(env: Env, account: Address) -> i128 {
        get_position(&env, &account).shares
    }

    /// Underlying value of the shares held by `account`
    pub fn underlying_balance_of(env: Env, account: Address) -> Result<i128, VaultError> {
        accounting::underlying_balance_of(&env, &account)
    }

    /// Rewards `account` could claim at the current ledger
    pub fn earned_eth(env: Env, account: Address) -> Result<i128, VaultError> {
        rewards::pending(&env, &account)
    }

    /// Reward-per-share accumulator at the current ledger
    pub fn reward_per_share(env: Env) -> Result<u128, VaultError> {
        let state = get_state(&env);
        vault_math::reward_per_share(&env, &state, env.ledger().sequence())
    }

    pub fn get_position(env: Env, account: Address) -> AccountPosition {
        get_position(&env, &account)
    }

    pub fn get_state(env: Env) -> VaultState {
        get_state(&env)
    }

    pub fn get_config(env: Env) -> VaultConfig {
        get_config(&env)
    }

    pub fn total_shares(env: Env) -> i128 {
        get_state(&env).total_shares
    }

    pub fn total_underlying(env: Env) -> i128 {
        get_state(&env).total_underlying
    }

    pub fn singularity(env: Env) -> Address {
        get_config(&env).singularity
    }

    pub fn pool(env: Env) -> Address {
        get_config(&env).pool
    }
}
