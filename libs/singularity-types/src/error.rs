use soroban_sdk::contracterror;

// Error codes are disjoint across contracts: 1xx router, 2xx vault, 3xx timelock.

/// Errors raised by the Singularity router
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SingularityError {
    AlreadyInitialized = 101,
    NotInitialized = 102,
    /// Pool identifier is not registered
    UnknownPool = 103,
    PoolAlreadyRegistered = 104,
    /// Amount or share count must be positive
    InvalidAmount = 105,
    /// Vault is bound to another router or pool
    VaultMismatch = 106,
}

/// Errors raised by a pool vault
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    AlreadyInitialized = 201,
    NotInitialized = 202,
    InvalidAmount = 203,
    InsufficientShares = 204,
    /// Deposit too small to mint a single share
    ZeroSharesMinted = 205,
    NothingToClaim = 206,
    InvalidDuration = 207,
    /// Funding would emit less than one unit per ledger
    RewardRateTooLow = 208,
    /// Shares exist but the vault holds no underlying
    EmptyVault = 209,
    MathOverflow = 210,
    /// Settlement exceeds the funded reward reserve
    RewardReserveExceeded = 211,
}

/// Errors raised by the timelock controller
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TimelockError {
    AlreadyInitialized = 301,
    NotInitialized = 302,
    /// Caller lacks the role required for this operation
    Unauthorized = 303,
    DelayTooShort = 304,
    OperationAlreadyScheduled = 305,
    /// Operation is unset, still waiting, or already done
    OperationNotReady = 306,
    PredecessorNotDone = 307,
    OperationNotPending = 308,
    /// Self-administration call with unknown function or malformed args
    InvalidCall = 309,
}
