#![no_std]

mod storage;

use singularity_types::{Call, OperationKey, OperationState, Role, TimelockError, DONE_TIMESTAMP};
use soroban_sdk::{
    contract, contractimpl, log, xdr::ToXdr, Address, BytesN, Env, IntoVal, Symbol, TryFromVal,
    Val, Vec,
};
use storage::{
    get_admin, get_min_delay, get_timestamp, has_admin, has_role, mark_done, remove_timestamp,
    set_admin, set_min_delay, set_role, set_timestamp,
};

#[contract]
pub struct TimelockController;

#[contractimpl]
impl TimelockController {
    /// Initialize with an admin, a minimum delay and the initial role holders
    ///
    /// Proposers are also granted the canceller role. The timelock itself
    /// holds the admin role so roles can be changed through scheduled calls.
    pub fn initialize(
        env: Env,
        admin: Address,
        min_delay: u64,
        proposers: Vec<Address>,
        executors: Vec<Address>,
    ) -> Result<(), TimelockError> {
        if has_admin(&env) {
            return Err(TimelockError::AlreadyInitialized);
        }

        admin.require_auth();

        set_admin(&env, &admin);
        set_min_delay(&env, min_delay);

        apply_role(&env, Role::Admin, &admin, true);
        apply_role(&env, Role::Admin, &env.current_contract_address(), true);

        for proposer in proposers.iter() {
            apply_role(&env, Role::Proposer, &proposer, true);
            apply_role(&env, Role::Canceller, &proposer, true);
        }
        for executor in executors.iter() {
            apply_role(&env, Role::Executor, &executor, true);
        }

        Ok(())
    }

    /// Schedule `call` to become executable after `delay` seconds
    ///
    /// # Returns
    /// Operation id
    pub fn schedule(
        env: Env,
        proposer: Address,
        call: Call,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
        delay: u64,
    ) -> Result<BytesN<32>, TimelockError> {
        proposer.require_auth();
        require_role(&env, Role::Proposer, &proposer)?;

        let id = hash_operation(&env, &call, &predecessor, &salt);
        if get_timestamp(&env, &id) != 0 {
            return Err(TimelockError::OperationAlreadyScheduled);
        }
        if delay < get_min_delay(&env) {
            return Err(TimelockError::DelayTooShort);
        }

        let ready_at = env
            .ledger()
            .timestamp()
            .checked_add(delay)
            .ok_or(TimelockError::DelayTooShort)?;
        if ready_at <= DONE_TIMESTAMP {
            return Err(TimelockError::DelayTooShort);
        }
        set_timestamp(&env, &id, ready_at);

        env.events().publish(
            (Symbol::new(&env, "scheduled"), id.clone()),
            (call.target, call.function, predecessor, delay),
        );
        log!(&env, "scheduled", id, ready_at);

        Ok(id)
    }

    /// Execute a ready operation
    ///
    /// # Returns
    /// Whatever the target call returned
    pub fn execute(
        env: Env,
        executor: Address,
        call: Call,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
    ) -> Result<Val, TimelockError> {
        executor.require_auth();
        require_role(&env, Role::Executor, &executor)?;

        let id = hash_operation(&env, &call, &predecessor, &salt);
        if operation_state(&env, &id) != OperationState::Ready {
            return Err(TimelockError::OperationNotReady);
        }
        if !is_zero(&predecessor) && operation_state(&env, &predecessor) != OperationState::Done {
            return Err(TimelockError::PredecessorNotDone);
        }

        mark_done(&env, &id);

        let result = if call.target == env.current_contract_address() {
            // Re-entry is rejected by the host; self-administration runs inline
            execute_self_call(&env, &call)?
        } else {
            env.invoke_contract::<Val>(&call.target, &call.function, call.args.clone())
        };

        env.events().publish(
            (Symbol::new(&env, "executed"), id.clone()),
            (call.target, call.function),
        );
        log!(&env, "executed", id);

        Ok(result)
    }

    /// Cancel a pending operation
    pub fn cancel(env: Env, canceller: Address, id: BytesN<32>) -> Result<(), TimelockError> {
        canceller.require_auth();
        require_role(&env, Role::Canceller, &canceller)?;

        match operation_state(&env, &id) {
            OperationState::Waiting | OperationState::Ready => {}
            _ => return Err(TimelockError::OperationNotPending),
        }

        remove_timestamp(&env, &id);

        env.events()
            .publish((Symbol::new(&env, "cancelled"), id.clone()), ());
        log!(&env, "cancelled", id);

        Ok(())
    }

    /// Grant `role` to `account` (admin only)
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), TimelockError> {
        caller.require_auth();
        require_role(&env, Role::Admin, &caller)?;
        apply_role(&env, role, &account, true);
        Ok(())
    }

    /// Revoke `role` from `account` (admin only)
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), TimelockError> {
        caller.require_auth();
        require_role(&env, Role::Admin, &caller)?;
        apply_role(&env, role, &account, false);
        Ok(())
    }

    // === View Functions ===

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        has_role(&env, role, &account)
    }

    pub fn get_admin(env: Env) -> Address {
        get_admin(&env)
    }

    pub fn get_min_delay(env: Env) -> u64 {
        get_min_delay(&env)
    }

    /// Operation id for (call, predecessor, salt)
    pub fn hash_operation(
        env: Env,
        call: Call,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
    ) -> BytesN<32> {
        hash_operation(&env, &call, &predecessor, &salt)
    }

    /// Ready-at timestamp; 0 if unset, 1 once executed
    pub fn get_timestamp(env: Env, id: BytesN<32>) -> u64 {
        get_timestamp(&env, &id)
    }

    pub fn get_operation_state(env: Env, id: BytesN<32>) -> OperationState {
        operation_state(&env, &id)
    }

    pub fn is_operation(env: Env, id: BytesN<32>) -> bool {
        operation_state(&env, &id) != OperationState::Unset
    }

    pub fn is_operation_pending(env: Env, id: BytesN<32>) -> bool {
        matches!(
            operation_state(&env, &id),
            OperationState::Waiting | OperationState::Ready
        )
    }

    pub fn is_operation_ready(env: Env, id: BytesN<32>) -> bool {
        operation_state(&env, &id) == OperationState::Ready
    }

    pub fn is_operation_done(env: Env, id: BytesN<32>) -> bool {
        operation_state(&env, &id) == OperationState::Done
    }
}

fn hash_operation(env: &Env, call: &Call, predecessor: &BytesN<32>, salt: &BytesN<32>) -> BytesN<32> {
    let key = OperationKey {
        call: call.clone(),
        predecessor: predecessor.clone(),
        salt: salt.clone(),
    };
    env.crypto().sha256(&key.to_xdr(env)).to_bytes()
}

fn operation_state(env: &Env, id: &BytesN<32>) -> OperationState {
    match get_timestamp(env, id) {
        0 => OperationState::Unset,
        DONE_TIMESTAMP => OperationState::Done,
        ready_at if ready_at <= env.ledger().timestamp() => OperationState::Ready,
        _ => OperationState::Waiting,
    }
}

fn is_zero(id: &BytesN<32>) -> bool {
    id.to_array() == [0u8; 32]
}

fn require_role(env: &Env, role: Role, account: &Address) -> Result<(), TimelockError> {
    if has_role(env, role, account) {
        Ok(())
    } else {
        Err(TimelockError::Unauthorized)
    }
}

fn apply_role(env: &Env, role: Role, account: &Address, granted: bool) {
    set_role(env, role, account, granted);

    let topic = if granted { "role_granted" } else { "role_revoked" };
    env.events()
        .publish((Symbol::new(env, topic), role), account.clone());
}

fn apply_min_delay(env: &Env, delay: u64) {
    let previous = get_min_delay(env);
    set_min_delay(env, delay);

    env.events()
        .publish((Symbol::new(env, "delay"),), (previous, delay));
}

/// Calls the timelock schedules against itself
fn execute_self_call(env: &Env, call: &Call) -> Result<Val, TimelockError> {
    let function = call.function.clone();

    if function == Symbol::new(env, "update_delay") {
        let delay: u64 = arg(env, &call.args, 0)?;
        apply_min_delay(env, delay);
    } else if function == Symbol::new(env, "grant_role") {
        let role: Role = arg(env, &call.args, 0)?;
        let account: Address = arg(env, &call.args, 1)?;
        apply_role(env, role, &account, true);
    } else if function == Symbol::new(env, "revoke_role") {
        let role: Role = arg(env, &call.args, 0)?;
        let account: Address = arg(env, &call.args, 1)?;
        apply_role(env, role, &account, false);
    } else {
        return Err(TimelockError::InvalidCall);
    }

    Ok(().into_val(env))
}

fn arg<T: TryFromVal<Env, Val>>(env: &Env, args: &Vec<Val>, index: u32) -> Result<T, TimelockError> {
    let val = args.get(index).ok_or(TimelockError::InvalidCall)?;
    T::try_from_val(env, &val).map_err(|_| TimelockError::InvalidCall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::{contract, contractimpl, symbol_short, vec, Address, BytesN, Env};

    const DAY: u64 = 86_400;

    /// Minimal target contract for scheduled calls
    #[contract]
    pub struct Counter;

    #[contractimpl]
    impl Counter {
        pub fn set(env: Env, value: u32) -> u32 {
            env.storage().instance().set(&symbol_short!("value"), &value);
            value
        }

        pub fn get(env: Env) -> u32 {
            env.storage()
                .instance()
                .get(&symbol_short!("value"))
                .unwrap_or(0)
        }
    }

    struct Setup<'a> {
        client: TimelockControllerClient<'a>,
        admin: Address,
        proposer: Address,
        executor: Address,
        counter: CounterClient<'a>,
    }

    fn setup_timelock(env: &Env) -> Setup<'_> {
        let admin = Address::generate(env);
        let proposer = Address::generate(env);
        let executor = Address::generate(env);

        let contract_id = env.register(TimelockController, ());
        let client = TimelockControllerClient::new(env, &contract_id);
        client.initialize(
            &admin,
            &DAY,
            &vec![env, proposer.clone()],
            &vec![env, executor.clone()],
        );

        let counter_id = env.register(Counter, ());
        let counter = CounterClient::new(env, &counter_id);

        Setup {
            client,
            admin,
            proposer,
            executor,
            counter,
        }
    }

    fn set_call(env: &Env, target: &Address, value: u32) -> Call {
        Call {
            target: target.clone(),
            function: Symbol::new(env, "set"),
            args: vec![env, value.into_val(env)],
        }
    }

    fn zero(env: &Env) -> BytesN<32> {
        BytesN::from_array(env, &[0u8; 32])
    }

    fn salt(env: &Env, byte: u8) -> BytesN<32> {
        BytesN::from_array(env, &[byte; 32])
    }

    fn advance_time(env: &Env, seconds: u64) {
        env.ledger().with_mut(|li| li.timestamp += seconds);
    }

    // === Initialization Tests ===

    #[test]
    fn test_initialize_timelock() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        assert_eq!(setup.client.get_admin(), setup.admin);
        assert_eq!(setup.client.get_min_delay(), DAY);
        assert!(setup.client.has_role(&Role::Admin, &setup.admin));
        assert!(setup.client.has_role(&Role::Admin, &setup.client.address));
        assert!(setup.client.has_role(&Role::Proposer, &setup.proposer));
        assert!(setup.client.has_role(&Role::Canceller, &setup.proposer));
        assert!(setup.client.has_role(&Role::Executor, &setup.executor));
        assert!(!setup.client.has_role(&Role::Executor, &setup.proposer));
    }

    #[test]
    fn test_initialize_twice_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let result = setup.client.try_initialize(&setup.admin, &DAY, &vec![&env], &vec![&env]);
        assert_eq!(result, Err(Ok(TimelockError::AlreadyInitialized)));
    }

    // === Schedule Tests ===

    #[test]
    fn test_schedule_operation() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 7);
        let id = setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);

        assert_eq!(id, setup.client.hash_operation(&call, &zero(&env), &zero(&env)));
        assert_eq!(setup.client.get_timestamp(&id), env.ledger().timestamp() + DAY);
        assert_eq!(setup.client.get_operation_state(&id), OperationState::Waiting);
        assert!(setup.client.is_operation(&id));
        assert!(setup.client.is_operation_pending(&id));
        assert!(!setup.client.is_operation_ready(&id));
    }

    #[test]
    fn test_schedule_by_non_proposer_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 7);
        let outsider = Address::generate(&env);

        let result = setup
            .client
            .try_schedule(&outsider, &call, &zero(&env), &zero(&env), &DAY);
        assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));

        // Executors cannot propose either
        let result = setup
            .client
            .try_schedule(&setup.executor, &call, &zero(&env), &zero(&env), &DAY);
        assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));
    }

    #[test]
    fn test_schedule_below_min_delay_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 7);
        let result = setup
            .client
            .try_schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &(DAY - 1));
        assert_eq!(result, Err(Ok(TimelockError::DelayTooShort)));
    }

    #[test]
    fn test_schedule_twice_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 7);
        setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);
        let result = setup
            .client
            .try_schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);
        assert_eq!(result, Err(Ok(TimelockError::OperationAlreadyScheduled)));

        // A different salt yields a distinct operation
        let other = setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &salt(&env, 1), &DAY);
        assert_ne!(other, setup.client.hash_operation(&call, &zero(&env), &zero(&env)));
    }

    // === Execute Tests ===

    #[test]
    fn test_execute_after_delay() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 42);
        let id = setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);

        let early = setup
            .client
            .try_execute(&setup.executor, &call, &zero(&env), &zero(&env));
        assert_eq!(early.err(), Some(Ok(TimelockError::OperationNotReady)));

        advance_time(&env, DAY);
        assert_eq!(setup.client.get_operation_state(&id), OperationState::Ready);

        let result = setup
            .client
            .execute(&setup.executor, &call, &zero(&env), &zero(&env));
        let returned: u32 = u32::try_from_val(&env, &result).unwrap();

        assert_eq!(returned, 42);
        assert_eq!(setup.counter.get(), 42);
        assert!(setup.client.is_operation_done(&id));
        assert_eq!(setup.client.get_timestamp(&id), DONE_TIMESTAMP);
    }

    #[test]
    fn test_execute_by_non_executor_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 1);
        setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);
        advance_time(&env, DAY + 1);

        let outsider = Address::generate(&env);
        let result = setup
            .client
            .try_execute(&outsider, &call, &zero(&env), &zero(&env));
        assert_eq!(result.err(), Some(Ok(TimelockError::Unauthorized)));
        assert_eq!(setup.counter.get(), 0);
    }

    #[test]
    fn test_execute_twice_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 3);
        setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);
        advance_time(&env, DAY);
        setup
            .client
            .execute(&setup.executor, &call, &zero(&env), &zero(&env));

        let again = setup
            .client
            .try_execute(&setup.executor, &call, &zero(&env), &zero(&env));
        assert_eq!(again.err(), Some(Ok(TimelockError::OperationNotReady)));
    }

    #[test]
    fn test_execute_unscheduled_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 3);
        let result = setup
            .client
            .try_execute(&setup.executor, &call, &zero(&env), &zero(&env));
        assert_eq!(result.err(), Some(Ok(TimelockError::OperationNotReady)));
    }

    #[test]
    fn test_predecessor_must_be_done() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let first = set_call(&env, &setup.counter.address, 1);
        let second = set_call(&env, &setup.counter.address, 2);

        let first_id = setup
            .client
            .schedule(&setup.proposer, &first, &zero(&env), &zero(&env), &DAY);
        setup
            .client
            .schedule(&setup.proposer, &second, &first_id, &zero(&env), &DAY);
        advance_time(&env, DAY);

        let result = setup
            .client
            .try_execute(&setup.executor, &second, &first_id, &zero(&env));
        assert_eq!(result.err(), Some(Ok(TimelockError::PredecessorNotDone)));

        setup
            .client
            .execute(&setup.executor, &first, &zero(&env), &zero(&env));
        setup
            .client
            .execute(&setup.executor, &second, &first_id, &zero(&env));
        assert_eq!(setup.counter.get(), 2);
    }

    // === Cancel Tests ===

    #[test]
    fn test_cancel_pending_operation() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 9);
        let id = setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);
        setup.client.cancel(&setup.proposer, &id);

        assert_eq!(setup.client.get_operation_state(&id), OperationState::Unset);

        advance_time(&env, DAY);
        let result = setup
            .client
            .try_execute(&setup.executor, &call, &zero(&env), &zero(&env));
        assert_eq!(result.err(), Some(Ok(TimelockError::OperationNotReady)));
        assert_eq!(setup.counter.get(), 0);
    }

    #[test]
    fn test_cancel_requires_canceller_and_pending() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = set_call(&env, &setup.counter.address, 9);
        let id = setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);

        let result = setup.client.try_cancel(&setup.executor, &id);
        assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));

        advance_time(&env, DAY);
        setup
            .client
            .execute(&setup.executor, &call, &zero(&env), &zero(&env));

        let result = setup.client.try_cancel(&setup.proposer, &id);
        assert_eq!(result, Err(Ok(TimelockError::OperationNotPending)));
    }

    // === Self-administration Tests ===

    #[test]
    fn test_update_delay_through_schedule() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = Call {
            target: setup.client.address.clone(),
            function: Symbol::new(&env, "update_delay"),
            args: vec![&env, (2 * DAY).into_val(&env)],
        };
        setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);
        advance_time(&env, DAY);
        setup
            .client
            .execute(&setup.executor, &call, &zero(&env), &zero(&env));

        assert_eq!(setup.client.get_min_delay(), 2 * DAY);

        let next = set_call(&env, &setup.counter.address, 1);
        let result = setup
            .client
            .try_schedule(&setup.proposer, &next, &zero(&env), &zero(&env), &DAY);
        assert_eq!(result, Err(Ok(TimelockError::DelayTooShort)));
    }

    #[test]
    fn test_unknown_self_call_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let call = Call {
            target: setup.client.address.clone(),
            function: Symbol::new(&env, "selfdestruct"),
            args: vec![&env],
        };
        setup
            .client
            .schedule(&setup.proposer, &call, &zero(&env), &zero(&env), &DAY);
        advance_time(&env, DAY);

        let result = setup
            .client
            .try_execute(&setup.executor, &call, &zero(&env), &zero(&env));
        assert_eq!(result.err(), Some(Ok(TimelockError::InvalidCall)));
    }

    // === Role Tests ===

    #[test]
    fn test_grant_and_revoke_role() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let newcomer = Address::generate(&env);
        setup
            .client
            .grant_role(&setup.admin, &Role::Executor, &newcomer);
        assert!(setup.client.has_role(&Role::Executor, &newcomer));

        setup
            .client
            .revoke_role(&setup.admin, &Role::Executor, &newcomer);
        assert!(!setup.client.has_role(&Role::Executor, &newcomer));
    }

    #[test]
    fn test_grant_role_by_non_admin_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let setup = setup_timelock(&env);

        let outsider = Address::generate(&env);
        let result = setup
            .client
            .try_grant_role(&setup.proposer, &Role::Executor, &outsider);
        assert_eq!(result, Err(Ok(TimelockError::Unauthorized)));
        assert!(!setup.client.has_role(&Role::Executor, &outsider));
    }
}
