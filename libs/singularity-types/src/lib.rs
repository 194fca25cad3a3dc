#![no_std]

mod error;
mod pool;
mod timelock;
mod vault;

pub use error::*;
pub use pool::*;
pub use timelock::*;
pub use vault::*;

/// Fixed-point scale of the reward-per-share accumulator (1e18)
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Share supply below which the reward accumulator does not advance
///
/// Keeps each accumulator step at most `emitted * 1e12`, so a dust-only
/// supply cannot push it past u128.
pub const MIN_ACCRUING_SHARES: i128 = 1_000_000;

/// Basis point denominator
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Balance reconciliation tolerance in basis points (1%)
pub const BALANCE_TOLERANCE_BPS: i128 = 100;

/// Maximum entries returned by one paginated registry read
pub const MAX_PAGE_SIZE: u32 = 50;

/// Operation timestamp marking an executed timelock operation
pub const DONE_TIMESTAMP: u64 = 1;

/// Checks `actual` is within `tolerance_bps` of `expected`
pub fn within_tolerance(expected: i128, actual: i128, tolerance_bps: i128) -> bool {
    let difference = (expected - actual).abs();
    difference * BPS_DENOMINATOR <= expected.abs() * tolerance_bps
}
