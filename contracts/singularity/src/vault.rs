// Cross-contract calls into a pool's vault. The Singularity is the direct
// invoker, which satisfies the vault's `singularity.require_auth()`.

use singularity_types::ClaimResult;
use soroban_sdk::{Address, BytesN, Env, IntoVal, Symbol, Vec};

pub fn initialize(
    env: &Env,
    vault: &Address,
    pool: &Address,
    underlying: &Address,
    reward_token: &Address,
    distributor: &Address,
) {
    env.invoke_contract::<()>(
        vault,
        &Symbol::new(env, "initialize"),
        (
            env.current_contract_address(),
            pool,
            underlying,
            reward_token,
            distributor,
        )
            .into_val(env),
    );
}

pub fn deposit(env: &Env, vault: &Address, account: &Address, amount: i128) -> i128 {
    env.invoke_contract(
        vault,
        &Symbol::new(env, "deposit"),
        (account, amount).into_val(env),
    )
}

pub fn withdraw(env: &Env, vault: &Address, account: &Address, shares: i128) -> i128 {
    env.invoke_contract(
        vault,
        &Symbol::new(env, "withdraw"),
        (account, shares).into_val(env),
    )
}

pub fn claim(env: &Env, vault: &Address, account: &Address) -> ClaimResult {
    env.invoke_contract(
        vault,
        &Symbol::new(env, "claim"),
        (account,).into_val(env),
    )
}

pub fn upgrade(env: &Env, vault: &Address, wasm_hash: &BytesN<32>) {
    env.invoke_contract::<()>(
        vault,
        &Symbol::new(env, "upgrade"),
        (wasm_hash,).into_val(env),
    );
}

// === Views ===

pub fn singularity(env: &Env, vault: &Address) -> Address {
    env.invoke_contract(vault, &Symbol::new(env, "singularity"), Vec::new(env))
}

pub fn pool(env: &Env, vault: &Address) -> Address {
    env.invoke_contract(vault, &Symbol::new(env, "pool"), Vec::new(env))
}

pub fn balance_of(env: &Env, vault: &Address, account: &Address) -> i128 {
    env.invoke_contract(
        vault,
        &Symbol::new(env, "balance_of"),
        (account,).into_val(env),
    )
}

pub fn underlying_balance_of(env: &Env, vault: &Address, account: &Address) -> i128 {
    env.invoke_contract(
        vault,
        &Symbol::new(env, "underlying_balance_of"),
        (account,).into_val(env),
    )
}

pub fn earned_eth(env: &Env, vault: &Address, account: &Address) -> i128 {
    env.invoke_contract(
        vault,
        &Symbol::new(env, "earned_eth"),
        (account,).into_val(env),
    )
}
