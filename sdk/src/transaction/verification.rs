//! Client-side pre-flight checks for a signed transaction.
//!
//! [`verify_transaction`] runs the checks the node would run on the parts of
//! a transaction that do not need chain state. Passing them does not mean
//! the node will accept it (balances, nonces of assets, permissions), but
//! failing them means it certainly won't.
//!
//! Checks run cheapest first so an obviously bad transaction never costs a
//! signature verification.

use super::Transaction;
use crate::config::{MAX_ACTIONS_PER_TX, MILLISECONDS_PER_SECOND, NETWORK_SIZE_LIMIT};
use crate::codec::CodecError;
use crate::error::{Error, ValidationError};

/// Verifies `tx` as of `now_ms` (Unix milliseconds).
///
/// The checks, in order:
///
/// 1. **Signed**: an auth must be attached.
/// 2. **Timestamp alignment**: whole seconds only.
/// 3. **Expiry**: `now_ms <= timestamp <= now_ms + validity_window`.
/// 4. **Action count**: 1 to 255.
/// 5. **Size**: no larger than the network message limit.
/// 6. **Signature**: the auth verifies against the digest.
///
/// # Errors
///
/// The first failing check, as an [`Error`].
pub fn verify_transaction(
    tx: &Transaction,
    now_ms: i64,
    validity_window: i64,
) -> Result<(), Error> {
    // 1. Signed.
    let auth = tx.auth().ok_or(Error::Unsigned)?;

    // 2. Alignment. Also enforced by `BaseTx::new`.
    let timestamp = tx.base().timestamp();
    if timestamp % MILLISECONDS_PER_SECOND != 0 {
        return Err(Error::MisalignedTimestamp(timestamp));
    }

    // 3. Validity window.
    if timestamp < now_ms {
        return Err(Error::Expired {
            timestamp,
            now: now_ms,
        });
    }
    if timestamp > now_ms.saturating_add(validity_window) {
        return Err(Error::FutureTimestamp {
            timestamp,
            now: now_ms,
            window: validity_window,
        });
    }

    // 4. Action count.
    let count = tx.actions().len();
    if count == 0 {
        return Err(Error::NoActions);
    }
    if count > MAX_ACTIONS_PER_TX {
        return Err(ValidationError::TooManyActions {
            count,
            max: MAX_ACTIONS_PER_TX,
        }
        .into());
    }

    // 5. Size.
    let size = tx.size();
    if size > NETWORK_SIZE_LIMIT {
        return Err(CodecError::Oversized {
            declared: size,
            limit: NETWORK_SIZE_LIMIT,
        }
        .into());
    }

    // 6. Signature. Most expensive, so last.
    let digest = tx.digest()?;
    if !auth.verify(&digest) {
        return Err(Error::InvalidSignature);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
