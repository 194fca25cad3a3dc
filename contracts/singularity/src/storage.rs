use singularity_types::{PoolRegistration, SingularityError};
use soroban_sdk::{contracttype, panic_with_error, Address, BytesN, Env, TryFromVal, Val};

/// Storage keys for the Singularity contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Owner address (handed to the timelock after deployment)
    Owner,
    /// Timelock controller allowed to change the vault target
    Timelock,
    /// Vault WASM hash for deployments and upgrades
    VaultTarget,
    /// Wrapped ETH paid out by every vault
    RewardToken,
    /// Reward stream funder wired into deployed vaults
    Distributor,
    /// Pool -> PoolRegistration
    Pool(Address),
    /// Number of registered pools (counter for indexed storage)
    PoolCount,
    /// Pool at index, in registration order
    PoolAt(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

fn get_instance<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> V {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(env, SingularityError::NotInitialized))
}

// === Configuration ===

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn get_owner(env: &Env) -> Address {
    get_instance(env, &DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    extend_instance_ttl(env);
}

pub fn get_timelock(env: &Env) -> Address {
    get_instance(env, &DataKey::Timelock)
}

pub fn set_timelock(env: &Env, timelock: &Address) {
    env.storage().instance().set(&DataKey::Timelock, timelock);
    extend_instance_ttl(env);
}

pub fn get_vault_target(env: &Env) -> BytesN<32> {
    get_instance(env, &DataKey::VaultTarget)
}

pub fn set_vault_target(env: &Env, hash: &BytesN<32>) {
    env.storage().instance().set(&DataKey::VaultTarget, hash);
    extend_instance_ttl(env);
}

pub fn get_reward_token(env: &Env) -> Address {
    get_instance(env, &DataKey::RewardToken)
}

pub fn set_reward_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::RewardToken, token);
    extend_instance_ttl(env);
}

pub fn get_distributor(env: &Env) -> Address {
    get_instance(env, &DataKey::Distributor)
}

pub fn set_distributor(env: &Env, distributor: &Address) {
    env.storage().instance().set(&DataKey::Distributor, distributor);
    extend_instance_ttl(env);
}

// === Registry ===

pub fn get_pool_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

pub fn get_registration(env: &Env, pool: &Address) -> Option<PoolRegistration> {
    env.storage()
        .persistent()
        .get(&DataKey::Pool(pool.clone()))
}

pub fn get_pool_at(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::PoolAt(index))
}

/// Append a registration; callers check for duplicates first
pub fn push_registration(env: &Env, registration: &PoolRegistration) {
    let count = get_pool_count(env);

    let pool_key = DataKey::Pool(registration.pool.clone());
    env.storage().persistent().set(&pool_key, registration);
    extend_persistent_ttl(env, &pool_key);

    let pool_at_key = DataKey::PoolAt(count);
    env.storage()
        .persistent()
        .set(&pool_at_key, &registration.pool);
    extend_persistent_ttl(env, &pool_at_key);

    env.storage()
        .instance()
        .set(&DataKey::PoolCount, &(count + 1));
    extend_instance_ttl(env);
}
