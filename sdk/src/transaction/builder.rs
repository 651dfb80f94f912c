//! Transaction construction via the builder pattern, plus the one-call
//! estimate → price → sign flow most clients want.
//!
//! The [`TransactionBuilder`] does not sign; that is
//! [`Transaction::sign`]. Keeping the two apart lets construction be tested
//! without key material.

use chrono::Utc;
use tracing::debug;

use super::{BaseTx, Transaction};
use crate::actions::Action;
use crate::auth::AuthFactory;
use crate::codec::Id;
use crate::config::{Genesis, MILLISECONDS_PER_SECOND};
use crate::error::Error;
use crate::fees::{estimate_units, mul_sum, Dimensions};

/// `now_ms + window_ms`, rounded down to a whole second. A transaction
/// stamped with this expires as late as the chain allows.
pub fn expiry_timestamp(now_ms: i64, window_ms: i64) -> i64 {
    let expiry = now_ms.saturating_add(window_ms);
    expiry.saturating_sub(expiry.rem_euclid(MILLISECONDS_PER_SECOND))
}

/// Fluent builder for unsigned [`Transaction`]s.
///
/// # Usage
///
/// ```rust,no_run
/// use nova_sdk::actions::Transfer;
/// use nova_sdk::codec::{Address, Id};
/// use nova_sdk::transaction::TransactionBuilder;
///
/// # fn main() -> Result<(), nova_sdk::error::Error> {
/// let to = Address::new(0, &[7u8; 32]);
/// let tx = TransactionBuilder::new(Id::new([1u8; 32]))
///     .max_fee(50_000)
///     .action(Transfer::new(to, Id::EMPTY, 1_000, Vec::new())?)
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// Unless [`timestamp`](Self::timestamp) is called, `build()` stamps the
/// transaction with [`expiry_timestamp`] of the current UTC time and the
/// validity window (60 s by default).
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    chain_id: Id,
    timestamp: Option<i64>,
    validity_window: i64,
    max_fee: u64,
    actions: Vec<Action>,
}

impl TransactionBuilder {
    pub fn new(chain_id: Id) -> Self {
        Self {
            chain_id,
            timestamp: None,
            validity_window: Genesis::default().validity_window,
            max_fee: 0,
            actions: Vec::new(),
        }
    }

    pub fn chain_id(mut self, chain_id: Id) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Explicit expiry in Unix milliseconds. Must be a whole second.
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Window used to derive the timestamp when none is set, in ms.
    pub fn validity_window(mut self, window_ms: i64) -> Self {
        self.validity_window = window_ms;
        self
    }

    pub fn max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    pub fn build(self) -> Result<Transaction, Error> {
        let timestamp = self.timestamp.unwrap_or_else(|| {
            expiry_timestamp(Utc::now().timestamp_millis(), self.validity_window)
        });
        let base = BaseTx::new(timestamp, self.chain_id, self.max_fee)?;
        Transaction::new(base, self.actions)
    }
}

/// Estimates units for `actions`, prices them at `unit_prices`, stamps the
/// header with the genesis validity window and signs with `factory`.
///
/// Returns the signed transaction and the `max_fee` written into it.
pub fn generate_transaction(
    genesis: &Genesis,
    unit_prices: &Dimensions,
    chain_id: Id,
    actions: Vec<Action>,
    factory: &AuthFactory,
) -> Result<(Transaction, u64), Error> {
    let units = estimate_units(genesis, &actions, factory)?;
    let max_fee = mul_sum(unit_prices, &units)?;

    let tx = TransactionBuilder::new(chain_id)
        .validity_window(genesis.validity_window)
        .max_fee(max_fee)
        .actions(actions)
        .build()?
        .sign(factory)?;

    debug!(
        max_fee,
        timestamp = tx.base().timestamp(),
        sponsor = %factory.address(),
        "generated transaction"
    );
    Ok((tx, max_fee))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::tests::addr;
    use crate::actions::Transfer;
    use crate::auth::Ed25519Factory;
    use crate::transaction::verify_transaction;

    fn transfer() -> Transfer {
        Transfer::new(addr(4), Id::EMPTY, 25, b"hi".to_vec()).unwrap()
    }

    #[test]
    fn expiry_rounds_down() {
        assert_eq!(expiry_timestamp(1_700_000_000_123, 60_000), 1_700_000_060_000);
        assert_eq!(expiry_timestamp(1_700_000_000_000, 60_000), 1_700_000_060_000);
        assert_eq!(expiry_timestamp(999, 0), 0);
    }

    #[test]
    fn expiry_saturates_at_the_extremes() {
        assert_eq!(expiry_timestamp(0, i64::MIN), i64::MIN);
        assert_eq!(expiry_timestamp(i64::MIN, -1), i64::MIN);
        assert_eq!(
            expiry_timestamp(i64::MAX, 1),
            i64::MAX - i64::MAX.rem_euclid(1_000)
        );

        // Clamped expiry is not a whole second, so the header refuses it.
        let err = TransactionBuilder::new(Id::new([1; 32]))
            .validity_window(i64::MIN)
            .action(transfer())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MisalignedTimestamp(i64::MIN)));
    }

    #[test]
    fn builder_with_explicit_fields() {
        let tx = TransactionBuilder::new(Id::new([1; 32]))
            .timestamp(5_000)
            .max_fee(77)
            .action(transfer())
            .build()
            .unwrap();
        assert_eq!(tx.base().timestamp(), 5_000);
        assert_eq!(tx.base().max_fee(), 77);
        assert_eq!(tx.actions().len(), 1);
        assert!(!tx.is_signed());
    }

    #[test]
    fn builder_defaults_timestamp_to_window_end() {
        let before = Utc::now().timestamp_millis();
        let tx = TransactionBuilder::new(Id::new([1; 32]))
            .validity_window(30_000)
            .action(transfer())
            .build()
            .unwrap();
        let after = Utc::now().timestamp_millis();

        let ts = tx.base().timestamp();
        assert_eq!(ts % MILLISECONDS_PER_SECOND, 0);
        assert!(ts > before + 30_000 - MILLISECONDS_PER_SECOND);
        assert!(ts <= after + 30_000);
    }

    #[test]
    fn builder_rejects_empty_and_misaligned() {
        assert!(matches!(
            TransactionBuilder::new(Id::new([1; 32])).timestamp(0).build(),
            Err(Error::NoActions)
        ));
        assert!(matches!(
            TransactionBuilder::new(Id::new([1; 32]))
                .timestamp(1_234)
                .action(transfer())
                .build(),
            Err(Error::MisalignedTimestamp(1_234))
        ));
    }

    #[test]
    fn generate_transaction_end_to_end() {
        let genesis = Genesis::default();
        let factory: AuthFactory = Ed25519Factory::from_seed(&[6u8; 32]).into();
        let actions = vec![Action::from(transfer())];

        let units = estimate_units(&genesis, &actions, &factory).unwrap();
        let expected_fee = mul_sum(&genesis.min_unit_price, &units).unwrap();

        let (tx, max_fee) = generate_transaction(
            &genesis,
            &genesis.min_unit_price,
            Id::new([9; 32]),
            actions,
            &factory,
        )
        .unwrap();

        assert_eq!(max_fee, expected_fee);
        assert_eq!(tx.base().max_fee(), max_fee);
        assert!(tx.is_signed());
        assert_eq!(tx.sponsor(), Some(factory.address()));
        let now = Utc::now().timestamp_millis();
        verify_transaction(&tx, now, genesis.validity_window).unwrap();
    }
}
