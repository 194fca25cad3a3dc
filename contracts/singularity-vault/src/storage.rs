use singularity_types::{AccountPosition, VaultConfig, VaultError, VaultState};
use soroban_sdk::{contracttype, panic_with_error, Address, Env};

// ============================================================================
// STORAGE LAYOUT
// ============================================================================
// - Config and State live in Instance storage: read by every operation and
//   small enough (~200 bytes) to share one ledger entry with the contract.
// - Positions live in Persistent storage, one entry per account (~100 bytes).
//   Positions are never removed: a fully withdrawn account keeps its reward
//   checkpoint so a later deposit cannot claim emissions it missed.
// - Every write extends the TTL of the touched entry.
// ============================================================================

/// Storage keys for the vault contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Vault configuration (Instance storage)
    Config,
    /// Totals and reward stream (Instance storage)
    State,
    /// Account -> AccountPosition (Persistent storage)
    Position(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> VaultConfig {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(env, VaultError::NotInitialized))
}

pub fn set_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> VaultState {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_else(|| panic_with_error!(env, VaultError::NotInitialized))
}

pub fn set_state(env: &Env, state: &VaultState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Position ===

pub fn get_position(env: &Env, account: &Address) -> AccountPosition {
    let key = DataKey::Position(account.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or_default()
}

pub fn set_position(env: &Env, account: &Address, position: &AccountPosition) {
    let key = DataKey::Position(account.clone());
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
}
