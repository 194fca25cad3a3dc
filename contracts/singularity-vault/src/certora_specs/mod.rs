// ============================================================================
// CERTORA SUNBEAM FORMAL VERIFICATION SPECIFICATIONS
// ============================================================================
//
// Rules for the vault's share and reward accounting. They exercise the pure
// math the contract entry points delegate to, with nondeterministic inputs
// constrained by `cvlr_assume!`.
//
// - share_specs.rs  : deposit/withdraw share conversion
// - reward_specs.rs : accumulator, earned and funding rate
//
// USAGE:
// - Unit tests: cargo test -p singularity-vault
// - Certora build: cargo build --features certora -p singularity-vault
// - Verification: certoraSorobanProver singularity_vault.conf
//
// ============================================================================

pub mod reward_specs;
pub mod share_specs;
