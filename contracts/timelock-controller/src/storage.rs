use singularity_types::{Role, TimelockError, DONE_TIMESTAMP};
use soroban_sdk::{contracttype, panic_with_error, Address, BytesN, Env};

/// Storage keys for the timelock contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Admin address (Instance storage)
    Admin,
    /// Minimum scheduling delay in seconds (Instance storage)
    MinDelay,
    /// (role, account) -> granted (Persistent storage)
    Role(Role, Address),
    /// Operation id -> ready-at timestamp, DONE_TIMESTAMP once executed (Persistent storage)
    Timestamp(BytesN<32>),
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

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Admin / delay ===

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Address {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| panic_with_error!(env, TimelockError::NotInitialized))
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    extend_instance_ttl(env);
}

pub fn get_min_delay(env: &Env) -> u64 {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::MinDelay)
        .unwrap_or_else(|| panic_with_error!(env, TimelockError::NotInitialized))
}

pub fn set_min_delay(env: &Env, delay: u64) {
    env.storage().instance().set(&DataKey::MinDelay, &delay);
    extend_instance_ttl(env);
}

// === Roles ===

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = DataKey::Role(role, account.clone());
    env.storage().persistent().get(&key).unwrap_or(false)
}

pub fn set_role(env: &Env, role: Role, account: &Address, granted: bool) {
    let key = DataKey::Role(role, account.clone());
    if granted {
        env.storage().persistent().set(&key, &true);
        extend_persistent_ttl(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// === Operations ===

pub fn get_timestamp(env: &Env, id: &BytesN<32>) -> u64 {
    let key = DataKey::Timestamp(id.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_timestamp(env: &Env, id: &BytesN<32>, timestamp: u64) {
    let key = DataKey::Timestamp(id.clone());
    env.storage().persistent().set(&key, &timestamp);
    extend_persistent_ttl(env, &key);
}

pub fn mark_done(env: &Env, id: &BytesN<32>) {
    set_timestamp(env, id, DONE_TIMESTAMP);
}

pub fn remove_timestamp(env: &Env, id: &BytesN<32>) {
    let key = DataKey::Timestamp(id.clone());
    env.storage().persistent().remove(&key);
}
