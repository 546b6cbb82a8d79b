use soroban_sdk::{symbol_short, Env, Symbol};

const LOCKED: Symbol = symbol_short!("LOCKED");

/// Returns `true` while a guarded operation is running.
pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}

/// Marks an operation as in progress.
///
/// Returns `false` (and changes nothing) if one already is.
pub fn enter(env: &Env) -> bool {
    if is_locked(env) {
        return false;
    }
    env.storage().instance().set(&LOCKED, &true);
    true
}

/// Clears the in-progress flag.
pub fn leave(env: &Env) {
    env.storage().instance().remove(&LOCKED);
}

/// Runs `op` with the guard held, failing fast with `busy` if the guard is
/// already taken.
///
/// The flag is cleared whether `op` succeeds or fails; on failure the host
/// discards the invocation's storage writes anyway.
pub fn guarded<T, E>(env: &Env, busy: E, op: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    if !enter(env) {
        return Err(busy);
    }
    let result = op();
    leave(env);
    result
}
