use singularity_types::VaultError;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::Env;

/// Shares minted for depositing `amount` of underlying
///
/// The first depositor receives shares 1:1. Afterwards shares are priced at
/// `total_underlying / total_shares`, rounding down in favor of the vault.
pub fn shares_for_deposit(
    env: &Env,
    amount: i128,
    total_shares: i128,
    total_underlying: i128,
) -> Result<i128, VaultError> {
    if amount <= 0 {
        return Err(VaultError::InvalidAmount);
    }
    if total_shares == 0 {
        return Ok(amount);
    }
    if total_underlying <= 0 {
        return Err(VaultError::EmptyVault);
    }

    Ok(amount.fixed_mul_floor(env, &total_shares, &total_underlying))
}

/// Underlying value of `shares` at the current exchange rate (rounds down)
pub fn underlying_for_shares(
    env: &Env,
    shares: i128,
    total_shares: i128,
    total_underlying: i128,
) -> Result<i128, VaultError> {
    if shares <= 0 || total_shares <= 0 {
        return Ok(0);
    }
    if shares > total_shares {
        return Err(VaultError::InsufficientShares);
    }

    Ok(shares.fixed_mul_floor(env, &total_underlying, &total_shares))
}
