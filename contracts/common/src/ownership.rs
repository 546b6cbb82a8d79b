use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");

// ── Errors ───────────────────────────────────────────────────────────────────

/// Reasons an ownership operation can be refused.
///
/// Contracts map these onto their own error enum.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OwnershipError {
    /// No administrator has been recorded yet.
    NoAdmin,
    /// The caller is not the current administrator.
    NotAdmin,
    /// There is no handover in flight.
    NoPendingAdmin,
    /// The caller is not the account the handover was proposed to.
    NotPendingAdmin,
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Records `admin` as the single privileged account.
/// Only callable internally — callers must verify authorization beforehand.
pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

/// Returns the current administrator, if one has been set.
pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&ADMIN)
}

/// Returns the account a handover has been proposed to, if any.
pub fn get_pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_ADMIN)
}

/// Guard: succeeds only when `caller` is the stored administrator.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), OwnershipError> {
    match get_admin(env) {
        Some(admin) if admin == *caller => Ok(()),
        Some(_) => Err(OwnershipError::NotAdmin),
        None => Err(OwnershipError::NoAdmin),
    }
}

// ── Two-step Handover ────────────────────────────────────────────────────────

/// Proposes `new_admin` as the next administrator.
///
/// The caller must have already been authenticated via `require_auth()`.
/// A later proposal replaces an earlier one.
pub fn propose(env: &Env, caller: &Address, new_admin: &Address) -> Result<(), OwnershipError> {
    require_admin(env, caller)?;
    env.storage().instance().set(&PENDING_ADMIN, new_admin);
    Ok(())
}

/// Completes a handover. Returns the replaced administrator.
pub fn accept(env: &Env, caller: &Address) -> Result<Address, OwnershipError> {
    let pending = get_pending_admin(env).ok_or(OwnershipError::NoPendingAdmin)?;
    if pending != *caller {
        return Err(OwnershipError::NotPendingAdmin);
    }
    let old_admin = get_admin(env).ok_or(OwnershipError::NoAdmin)?;

    set_admin(env, caller);
    env.storage().instance().remove(&PENDING_ADMIN);
    Ok(old_admin)
}

/// Drops the in-flight handover. Returns the account it was proposed to.
pub fn cancel(env: &Env, caller: &Address) -> Result<Address, OwnershipError> {
    require_admin(env, caller)?;
    let pending = get_pending_admin(env).ok_or(OwnershipError::NoPendingAdmin)?;
    env.storage().instance().remove(&PENDING_ADMIN);
    Ok(pending)
}
