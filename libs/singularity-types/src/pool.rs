use soroban_sdk::{contracttype, Address};

/// Registry grouping of a pool
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolCategory {
    /// USD-pegged assets
    Stablecoin = 0,
    /// Base-chain assets (ETH, BTC wrappers)
    Chain = 1,
}

/// Registry entry: pool identifier bound to its vault instance
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRegistration {
    pub pool: Address,
    pub vault: Address,
    pub category: PoolCategory,
}

/// Pool to be served by a freshly deployed vault
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolListing {
    pub pool: Address,
    /// Token depositors provide
    pub underlying: Address,
    pub category: PoolCategory,
}
