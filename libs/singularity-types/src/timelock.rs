use soroban_sdk::{contracttype, Address, BytesN, Symbol, Val, Vec};

/// Contract invocation the timelock executes once ready
#[contracttype]
#[derive(Clone, Debug)]
pub struct Call {
    pub target: Address,
    pub function: Symbol,
    pub args: Vec<Val>,
}

/// Hashed to derive the operation id
#[contracttype]
#[derive(Clone, Debug)]
pub struct OperationKey {
    pub call: Call,
    /// Operation that must be done first (all zeroes for none)
    pub predecessor: BytesN<32>,
    pub salt: BytesN<32>,
}

/// Lifecycle of a timelock operation
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OperationState {
    Unset = 0,
    /// Scheduled, delay not yet elapsed
    Waiting = 1,
    Ready = 2,
    Done = 3,
}

/// Timelock roles
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 0,
    Proposer = 1,
    Executor = 2,
    Canceller = 3,
}
