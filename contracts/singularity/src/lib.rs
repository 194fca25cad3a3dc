#![no_std]

mod storage;
mod vault;

#[cfg(test)]
mod test_tools;

use singularity_types::{
    Call, ClaimResult, PoolListing, PoolRegistration, SingularityError, MAX_PAGE_SIZE,
};
use soroban_sdk::{contract, contractimpl, log, vec, Address, BytesN, Env, IntoVal, Symbol, Vec};
use storage::{
    extend_instance_ttl, get_distributor, get_owner, get_pool_at, get_pool_count,
    get_registration, get_reward_token, get_timelock, get_vault_target, is_initialized,
    push_registration, set_distributor, set_owner, set_reward_token, set_timelock,
    set_vault_target,
};

#[contract]
pub struct Singularity;

// ============================================================================
// REGISTRY
// ============================================================================
// - Pools are appended through `add_pools` (pre-deployed vaults) or
//   `deploy_pool` (vault deployed from the vault target). Both paths check
//   that the vault is bound to this contract and to the same pool id.
// - The pool -> vault binding never changes; `upgrade_vault` swaps the
//   vault's code in place.
// - Indexed storage (PoolCount + PoolAt) keeps each entry small; pagination
//   is capped at MAX_PAGE_SIZE entries per read.
// ============================================================================

#[contractimpl]
impl Singularity {
    /// Initialize the router
    ///
    /// # Arguments
    /// * `owner` - Registry administrator; handed to the timelock after setup
    /// * `timelock` - Only address allowed to change the vault target
    /// * `vault_target` - Vault WASM hash for deployments and upgrades
    /// * `reward_token` - Wrapped ETH paid out by the vaults
    /// * `distributor` - Reward funder wired into deployed vaults
    pub fn initialize(
        env: Env,
        owner: Address,
        timelock: Address,
        vault_target: BytesN<32>,
        reward_token: Address,
        distributor: Address,
    ) -> Result<(), SingularityError> {
        if is_initialized(&env) {
            return Err(SingularityError::AlreadyInitialized);
        }

        owner.require_auth();

        set_owner(&env, &owner);
        set_timelock(&env, &timelock);
        set_vault_target(&env, &vault_target);
        set_reward_token(&env, &reward_token);
        set_distributor(&env, &distributor);

        env.events().publish(
            (Symbol::new(&env, "vault_target"),),
            vault_target,
        );

        Ok(())
    }

    // === Administration ===

    /// Register pre-deployed vaults (owner only)
    pub fn add_pools(env: Env, pools: Vec<PoolRegistration>) -> Result<(), SingularityError> {
        get_owner(&env).require_auth();

        for registration in pools.iter() {
            register_pool(&env, &registration)?;
        }

        Ok(())
    }

    /// Deploy a vault from the vault target and register it (owner only)
    ///
    /// # Returns
    /// Address of the new vault
    pub fn deploy_pool(env: Env, listing: PoolListing) -> Result<Address, SingularityError> {
        get_owner(&env).require_auth();

        if get_registration(&env, &listing.pool).is_some() {
            return Err(SingularityError::PoolAlreadyRegistered);
        }

        // Deterministic salt from the registry index
        let mut salt_bytes = [0u8; 32];
        salt_bytes[0..4].copy_from_slice(&get_pool_count(&env).to_be_bytes());
        let salt = BytesN::from_array(&env, &salt_bytes);

        let vault_address = env
            .deployer()
            .with_current_contract(salt)
            .deploy_v2(get_vault_target(&env), ());

        vault::initialize(
            &env,
            &vault_address,
            &listing.pool,
            &listing.underlying,
            &get_reward_token(&env),
            &get_distributor(&env),
        );

        register_pool(
            &env,
            &PoolRegistration {
                pool: listing.pool,
                vault: vault_address.clone(),
                category: listing.category,
            },
        )?;

        Ok(vault_address)
    }

    /// Move a pool's vault to the current vault target (owner only)
    pub fn upgrade_vault(env: Env, pool: Address) -> Result<(), SingularityError> {
        get_owner(&env).require_auth();

        let registration = require_pool(&env, &pool)?;
        let target = get_vault_target(&env);
        vault::upgrade(&env, &registration.vault, &target);

        env.events().publish(
            (Symbol::new(&env, "vault_upgraded"), pool),
            (registration.vault, target),
        );

        Ok(())
    }

    pub fn transfer_ownership(env: Env, new_owner: Address) {
        let owner = get_owner(&env);
        owner.require_auth();

        set_owner(&env, &new_owner);

        env.events()
            .publish((Symbol::new(&env, "ownership"),), (owner, new_owner));
    }

    /// Replace the vault target. Only the timelock controller may call this.
    pub fn set_vault_target(env: Env, vault_target: BytesN<32>) {
        get_timelock(&env).require_auth();

        set_vault_target(&env, &vault_target);

        env.events().publish(
            (Symbol::new(&env, "vault_target"),),
            vault_target.clone(),
        );
        log!(&env, "vault_target", vault_target);
    }

    /// Call a proposer schedules on the timelock to change the vault target
    pub fn encode_vault_target(env: Env, vault_target: BytesN<32>) -> Call {
        Call {
            target: env.current_contract_address(),
            function: Symbol::new(&env, "set_vault_target"),
            args: vec![&env, vault_target.into_val(&env)],
        }
    }

    // === Pool Operations ===

    /// Deposit `amount` of the pool's underlying on behalf of `account`
    ///
    /// # Returns
    /// Shares minted
    pub fn deposit(
        env: Env,
        pool: Address,
        amount: i128,
        account: Address,
    ) -> Result<i128, SingularityError> {
        if amount <= 0 {
            return Err(SingularityError::InvalidAmount);
        }
        let registration = require_pool(&env, &pool)?;
        account.require_auth();

        let shares = vault::deposit(&env, &registration.vault, &account, amount);
        log!(&env, "deposit", pool, account, amount, shares);

        Ok(shares)
    }

    /// Burn `shares` of `account` in the pool's vault
    ///
    /// # Returns
    /// Underlying amount returned to the account
    pub fn withdraw(
        env: Env,
        pool: Address,
        shares: i128,
        account: Address,
    ) -> Result<i128, SingularityError> {
        if shares <= 0 {
            return Err(SingularityError::InvalidAmount);
        }
        let registration = require_pool(&env, &pool)?;
        account.require_auth();

        let amount = vault::withdraw(&env, &registration.vault, &account, shares);
        log!(&env, "withdraw", pool, account, shares, amount);

        Ok(amount)
    }

    /// Settle and pay out the ETH bonus `account` earned in `pool`
    pub fn claim_eth(
        env: Env,
        pool: Address,
        account: Address,
    ) -> Result<ClaimResult, SingularityError> {
        let registration = require_pool(&env, &pool)?;
        account.require_auth();

        let result = vault::claim(&env, &registration.vault, &account);

        env.events().publish(
            (Symbol::new(&env, "claim_eth"), pool, account),
            result.amount,
        );

        Ok(result)
    }

    // === View Functions ===

    pub fn get_vault(env: Env, pool: Address) -> Result<Address, SingularityError> {
        Ok(require_pool(&env, &pool)?.vault)
    }

    pub fn get_pool(env: Env, pool: Address) -> Option<PoolRegistration> {
        get_registration(&env, &pool)
    }

    pub fn get_pool_count(env: Env) -> u32 {
        extend_instance_ttl(&env);
        get_pool_count(&env)
    }

    pub fn get_pool_at(env: Env, index: u32) -> Option<PoolRegistration> {
        get_pool_at(&env, index).and_then(|pool| get_registration(&env, &pool))
    }

    /// Up to `limit` registrations starting at `start_index`, in
    /// registration order. `limit` is capped at MAX_PAGE_SIZE.
    pub fn get_pools_paginated(env: Env, start_index: u32, limit: u32) -> Vec<PoolRegistration> {
        let safe_limit = limit.min(MAX_PAGE_SIZE);
        let end_index = start_index
            .saturating_add(safe_limit)
            .min(get_pool_count(&env));

        let mut pools = Vec::new(&env);
        for i in start_index..end_index {
            if let Some(registration) = Self::get_pool_at(env.clone(), i) {
                pools.push_back(registration);
            }
        }
        pools
    }

    pub fn owner(env: Env) -> Address {
        get_owner(&env)
    }

    pub fn timelock_controller(env: Env) -> Address {
        get_timelock(&env)
    }

    pub fn vault_target(env: Env) -> BytesN<32> {
        get_vault_target(&env)
    }

    pub fn reward_token(env: Env) -> Address {
        get_reward_token(&env)
    }

    pub fn distributor(env: Env) -> Address {
        get_distributor(&env)
    }

    /// Underlying value of `account`'s shares in `pool`
    pub fn underlying_balance_of(
        env: Env,
        pool: Address,
        account: Address,
    ) -> Result<i128, SingularityError> {
        let registration = require_pool(&env, &pool)?;
        Ok(vault::underlying_balance_of(&env, &registration.vault, &account))
    }

    /// Shares `account` holds in `pool`
    pub fn balance_of(env: Env, pool: Address, account: Address) -> Result<i128, SingularityError> {
        let registration = require_pool(&env, &pool)?;
        Ok(vault::balance_of(&env, &registration.vault, &account))
    }

    /// ETH bonus `account` could claim from `pool` right now
    pub fn earned_eth(env: Env, pool: Address, account: Address) -> Result<i128, SingularityError> {
        let registration = require_pool(&env, &pool)?;
        Ok(vault::earned_eth(&env, &registration.vault, &account))
    }
}

fn require_pool(env: &Env, pool: &Address) -> Result<PoolRegistration, SingularityError> {
    get_registration(env, pool).ok_or(SingularityError::UnknownPool)
}

fn register_pool(env: &Env, registration: &PoolRegistration) -> Result<(), SingularityError> {
    if get_registration(env, &registration.pool).is_some() {
        return Err(SingularityError::PoolAlreadyRegistered);
    }

    if vault::singularity(env, &registration.vault) != env.current_contract_address()
        || vault::pool(env, &registration.vault) != registration.pool
    {
        return Err(SingularityError::VaultMismatch);
    }

    push_registration(env, registration);

    env.events().publish(
        (Symbol::new(env, "pool_added"), registration.pool.clone()),
        (registration.vault.clone(), registration.category),
    );
    log!(env, "pool_added", registration.pool, registration.vault);

    Ok(())
}
