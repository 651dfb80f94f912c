//! Tag → decoder tables for actions and auths.
//!
//! The wire carries a one-byte type tag in front of every action and auth.
//! A [`TypeRegistry`] maps that tag to the function that decodes the payload
//! behind it. The built-in tables come from `ActionRegistry::default()` and
//! `AuthRegistry::default()`. A transport layer that only knows a subset of
//! payloads can build its own and pass it to
//! [`Transaction::from_bytes_with`](crate::transaction::Transaction::from_bytes_with).

use std::collections::HashMap;
use std::fmt;

use crate::codec::Packer;
use crate::error::{Error, TagKind};

/// Decodes one payload of type `T` from the cursor.
pub type Decoder<T> = fn(&mut Packer<'_>) -> Result<T, Error>;

pub struct TypeRegistry<T> {
    kind: TagKind,
    decoders: HashMap<u8, Decoder<T>>,
}

impl<T> TypeRegistry<T> {
    /// An empty registry. `kind` only feeds error messages.
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            decoders: HashMap::new(),
        }
    }

    /// Built-in tables. Later entries replace earlier ones with the same tag,
    /// so callers pass distinct tags.
    pub(crate) fn from_entries(
        kind: TagKind,
        entries: impl IntoIterator<Item = (u8, Decoder<T>)>,
    ) -> Self {
        Self {
            kind,
            decoders: entries.into_iter().collect(),
        }
    }

    /// Registers `decoder` under `tag`. Tags are unique within a registry.
    pub fn register(&mut self, tag: u8, decoder: Decoder<T>) -> Result<(), Error> {
        if self.decoders.contains_key(&tag) {
            return Err(Error::DuplicateTypeTag {
                kind: self.kind,
                tag,
            });
        }
        self.decoders.insert(tag, decoder);
        Ok(())
    }

    pub fn contains(&self, tag: u8) -> bool {
        self.decoders.contains_key(&tag)
    }

    /// Registered tags in ascending order.
    pub fn tags(&self) -> Vec<u8> {
        let mut tags: Vec<u8> = self.decoders.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Dispatches to the decoder for `tag`. Unknown tags fail without
    /// touching the cursor.
    pub fn decode(&self, tag: u8, p: &mut Packer<'_>) -> Result<T, Error> {
        let decoder = self.decoders.get(&tag).ok_or(Error::UnknownTypeTag {
            kind: self.kind,
            tag,
        })?;
        decoder(p)
    }
}

impl<T> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("kind", &self.kind)
            .field("tags", &self.tags())
            .finish()
    }
}
