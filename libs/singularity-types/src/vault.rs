use soroban_sdk::{contracttype, Address};

/// Vault configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    /// Router allowed to move funds through this vault
    pub singularity: Address,
    /// Pool identifier this vault serves
    pub pool: Address,
    /// Token held as principal
    pub underlying: Address,
    /// Wrapped ETH paid out as bonus
    pub reward_token: Address,
    /// Address allowed to fund the reward stream
    pub distributor: Address,
}

/// Vault totals and reward stream - stored in Instance storage
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VaultState {
    pub total_shares: i128,
    /// Principal held on behalf of all shareholders
    pub total_underlying: i128,
    /// Reward units emitted per ledger
    pub reward_rate: i128,
    /// Accumulated reward per share, scaled by REWARD_PRECISION
    pub reward_per_share_stored: u128,
    pub last_update_ledger: u32,
    /// Ledger at which the current emission period ends
    pub period_finish_ledger: u32,
    /// Funded reward tokens not yet paid out
    pub reward_reserve: i128,
}

/// Per-account position inside a vault
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountPosition {
    pub shares: i128,
    /// Net underlying deposited (deposits minus withdrawals)
    pub principal: i128,
    /// Accumulator value at the last checkpoint
    pub reward_per_share_paid: u128,
    /// Settled but unclaimed rewards
    pub rewards_owed: i128,
    pub last_checkpoint_ledger: u32,
}

impl AccountPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_position(&self) -> bool {
        self.shares > 0
    }
}

/// Settlement of a reward claim
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimResult {
    pub pool: Address,
    pub account: Address,
    /// Reward tokens transferred to the account
    pub amount: i128,
    /// Ledger the claim settled at
    pub ledger: u32,
}
