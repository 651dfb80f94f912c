// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NOVA SDK: Transaction Core
//!
//! Client-side construction, encoding, signing and costing of transactions
//! for a chain whose wire format we do not own. The node defines every byte;
//! this crate reproduces it exactly, so a transaction signed here verifies
//! there and bytes received from there decode here without loss.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - **codec**: The [`Packer`](codec::Packer) cursor. Big-endian, bounded,
//!   sticky first error, never panics on bad input.
//! - **crypto**: SHA-256 ids and key hex parsing.
//! - **actions**: The fourteen payload types a transaction can carry.
//! - **auth**: Ed25519 and BLS signatures, and the factories that make them.
//! - **transaction**: Header, digest, sign, `to_bytes`/`from_bytes`, id.
//! - **fees**: Five-dimension unit estimation and pricing.
//! - **registry**: Tag → decoder tables for actions and auths.
//! - **config**: Wire constants, field limits and genesis rules.
//! - **logging**: Optional `tracing` subscriber setup.
//!
//! ## Typical Flow
//!
//! ```rust,no_run
//! use nova_sdk::actions::{Action, Transfer};
//! use nova_sdk::auth::AuthFactory;
//! use nova_sdk::codec::{Address, Id};
//! use nova_sdk::config::Genesis;
//! use nova_sdk::transaction::{generate_transaction, Transaction};
//!
//! # fn main() -> Result<(), nova_sdk::error::Error> {
//! let genesis = Genesis::default();
//! let factory = AuthFactory::generate_ed25519();
//! let to = Address::new(0, &[7u8; 32]);
//! let transfer: Action = Transfer::new(to, Id::EMPTY, 1_000, Vec::new())?.into();
//!
//! let (tx, max_fee) = generate_transaction(
//!     &genesis,
//!     &genesis.min_unit_price,
//!     Id::new([1u8; 32]),
//!     vec![transfer],
//!     &factory,
//! )?;
//!
//! let bytes = tx.to_bytes()?;
//! assert_eq!(Transaction::from_bytes(&bytes)?.id()?, tx.id()?);
//! # let _ = max_fee;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Byte-exact or broken. There is no "close enough" on the wire.
//! 2. Errors are values. Nothing here panics on input it did not create.
//! 3. Overflow is an error, never a wrap. Least of all in a fee.

pub mod actions;
pub mod auth;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod fees;
pub mod logging;
pub mod registry;
pub mod transaction;

pub use actions::{Action, ActionPayload, ActionRegistry};
pub use auth::{Auth, AuthFactory, AuthRegistry};
pub use codec::{Address, Id, Packer};
pub use config::Genesis;
pub use error::Error;
pub use fees::{estimate_units, mul_sum, Dimension, Dimensions};
pub use transaction::{BaseTx, Transaction, TransactionBuilder};
