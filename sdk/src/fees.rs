//! # Fee Estimation
//!
//! A transaction consumes resources along five dimensions: bandwidth,
//! compute, storage reads, storage allocations and storage writes. The node
//! publishes a price per unit of each; the fee is the dot product of the
//! prices with the units the transaction declares.
//!
//! Estimation has to happen before signing because the resulting fee is
//! written into the signed header as `max_fee`.
//!
//! Every addition and multiplication here is checked. A fee that silently
//! wrapped would be wrong in the worst direction, so overflow is an error.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::actions::Action;
use crate::auth::AuthFactory;
use crate::config::{Genesis, BYTE_LEN, MAX_ACTIONS_PER_TX};
use crate::error::{Error, ValidationError};
use crate::transaction::BaseTx;

pub const FEE_DIMENSIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Bandwidth = 0,
    Compute = 1,
    StorageRead = 2,
    StorageAllocate = 3,
    StorageWrite = 4,
}

impl Dimension {
    pub const ALL: [Dimension; FEE_DIMENSIONS] = [
        Self::Bandwidth,
        Self::Compute,
        Self::StorageRead,
        Self::StorageAllocate,
        Self::StorageWrite,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bandwidth => "bandwidth",
            Self::Compute => "compute",
            Self::StorageRead => "storage read",
            Self::StorageAllocate => "storage allocate",
            Self::StorageWrite => "storage write",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("fee arithmetic overflowed in the {dimension} dimension")]
    Overflow { dimension: Dimension },
}

/// One value per fee dimension, in [`Dimension`] order. Serializes as a plain
/// five-element array, the shape the node uses in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimensions([u64; FEE_DIMENSIONS]);

impl Dimensions {
    pub const fn new(values: [u64; FEE_DIMENSIONS]) -> Self {
        Self(values)
    }

    pub fn get(&self, d: Dimension) -> u64 {
        self.0[d as usize]
    }

    pub fn as_array(&self) -> &[u64; FEE_DIMENSIONS] {
        &self.0
    }

    /// Adds `amount` to dimension `d`.
    pub fn add(&mut self, d: Dimension, amount: u64) -> Result<(), FeeError> {
        let slot = &mut self.0[d as usize];
        *slot = slot
            .checked_add(amount)
            .ok_or(FeeError::Overflow { dimension: d })?;
        Ok(())
    }

    /// Element-wise sum.
    pub fn checked_add(&self, other: &Dimensions) -> Result<Dimensions, FeeError> {
        let mut out = *self;
        for d in Dimension::ALL {
            out.add(d, other.get(d))?;
        }
        Ok(out)
    }

    /// True if every dimension is within `limit`.
    pub fn fits_within(&self, limit: &Dimensions) -> bool {
        Dimension::ALL.iter().all(|&d| self.get(d) <= limit.get(d))
    }
}

impl Index<Dimension> for Dimensions {
    type Output = u64;

    fn index(&self, d: Dimension) -> &u64 {
        &self.0[d as usize]
    }
}

impl From<[u64; FEE_DIMENSIONS]> for Dimensions {
    fn from(values: [u64; FEE_DIMENSIONS]) -> Self {
        Self(values)
    }
}

/// `Σ prices[i] × units[i]`, failing instead of wrapping.
pub fn mul_sum(prices: &Dimensions, units: &Dimensions) -> Result<u64, FeeError> {
    Dimension::ALL.iter().try_fold(0u64, |acc, &d| {
        prices
            .get(d)
            .checked_mul(units.get(d))
            .and_then(|product| acc.checked_add(product))
            .ok_or(FeeError::Overflow { dimension: d })
    })
}

/// Units a transaction carrying `actions` and signed by `factory` will
/// consume, under the storage costs in `genesis`.
///
/// The sponsor's balance is touched by every transaction, so its chunk
/// entry is added on top of whatever the actions declare.
pub fn estimate_units(
    genesis: &Genesis,
    actions: &[Action],
    factory: &AuthFactory,
) -> Result<Dimensions, Error> {
    let units = units_with_auth(genesis, actions, factory.max_units())?;
    debug!(
        actions = actions.len(),
        scheme = factory.scheme(),
        units = ?units.as_array(),
        "estimated transaction units"
    );
    Ok(units)
}

/// Shared by estimation (auth not yet produced) and
/// [`Transaction::max_units`](crate::transaction::Transaction::max_units)
/// (auth attached). `auth_units` is `(bandwidth including tag, compute)`.
pub(crate) fn units_with_auth(
    genesis: &Genesis,
    actions: &[Action],
    auth_units: (u64, u64),
) -> Result<Dimensions, Error> {
    if actions.is_empty() {
        return Err(Error::NoActions);
    }
    if actions.len() > MAX_ACTIONS_PER_TX {
        return Err(ValidationError::TooManyActions {
            count: actions.len(),
            max: MAX_ACTIONS_PER_TX,
        }
        .into());
    }

    let (auth_bandwidth, auth_compute) = auth_units;
    let mut units = Dimensions::default();

    units.add(Dimension::Bandwidth, (BaseTx::SIZE + BYTE_LEN) as u64)?;
    units.add(Dimension::Compute, genesis.base_compute_units)?;
    for action in actions {
        units.add(Dimension::Bandwidth, (BYTE_LEN + action.size()) as u64)?;
        units.add(Dimension::Compute, action.compute_units())?;
    }
    units.add(Dimension::Bandwidth, auth_bandwidth)?;
    units.add(Dimension::Compute, auth_compute)?;

    let sponsor = genesis.sponsor_state_keys_max_chunks();
    let chunk_entries = sponsor.iter().copied().chain(
        actions
            .iter()
            .flat_map(|a| a.state_keys_max_chunks().iter().copied()),
    );
    for chunks in chunk_entries {
        let chunks = u64::from(chunks);
        add_storage(
            &mut units,
            Dimension::StorageRead,
            genesis.storage_key_read_units,
            genesis.storage_value_read_units,
            chunks,
        )?;
        add_storage(
            &mut units,
            Dimension::StorageAllocate,
            genesis.storage_key_allocate_units,
            genesis.storage_value_allocate_units,
            chunks,
        )?;
        add_storage(
            &mut units,
            Dimension::StorageWrite,
            genesis.storage_key_write_units,
            genesis.storage_value_write_units,
            chunks,
        )?;
    }
    Ok(units)
}

/// `key_units + chunks × value_units` into dimension `d`.
fn add_storage(
    units: &mut Dimensions,
    d: Dimension,
    key_units: u64,
    value_units: u64,
    chunks: u64,
) -> Result<(), FeeError> {
    let cost = chunks
        .checked_mul(value_units)
        .and_then(|v| v.checked_add(key_units))
        .ok_or(FeeError::Overflow { dimension: d })?;
    units.add(d, cost)
}

/// Estimate then price: the `max_fee` to put in the header.
pub fn estimate_max_fee(
    genesis: &Genesis,
    unit_prices: &Dimensions,
    actions: &[Action],
    factory: &AuthFactory,
) -> Result<u64, Error> {
    let units = estimate_units(genesis, actions, factory)?;
    Ok(mul_sum(unit_prices, &units)?)
}
