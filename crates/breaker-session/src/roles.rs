//! Administrator role derivation.
//!
//! Pure lookup against a fetched roster snapshot. The caller fetches the
//! roster; when the fetch fails it passes nothing and the answer is false,
//! keeping admin-only surfaces hidden.

use crate::types::Identity;
use breaker_api::AdminEntry;

/// Whether `identity` belongs to an administrator.
///
/// True when the identity with its network suffix stripped equals an
/// entry's phone number, or the raw identity equals an entry's full JID.
/// Exact, case-sensitive comparison; an empty roster yields false.
pub fn is_admin(identity: &Identity, roster: &[AdminEntry]) -> bool {
    let number = identity.phone_number();
    let raw = identity.as_str();
    roster
        .iter()
        .any(|admin| admin.number == number || admin.full_id == raw)
}
