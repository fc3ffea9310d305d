// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Group instances created by numeric id.
//!
//! The protocol engine only ever sees a [`GroupInstance`]. Which family
//! backend sits behind it is decided once, from the catalog entry, and every
//! call is routed by an exhaustive `match` over [`Backend`].

use crate::catalog::{self, GroupFamily, GroupSpec};
use crate::error::{Error, Result};
use crate::group::KeyExchange;
use crate::groups::{Curve25519Group, Ec2nGroup, EcpGroup, ModpGroup};
use crate::octets::Octets;

/// The closed set of family backends.
enum Backend {
    Modp(ModpGroup),
    EcPrime(EcpGroup),
    EcBinary(Ec2nGroup),
    Curve25519(Curve25519Group),
}

impl Backend {
    fn initialize(spec: &'static GroupSpec) -> Result<Self> {
        Ok(match spec.family {
            GroupFamily::Modp => Backend::Modp(ModpGroup::initialize(spec)?),
            GroupFamily::EcPrime => Backend::EcPrime(EcpGroup::initialize(spec)?),
            GroupFamily::EcBinary => Backend::EcBinary(Ec2nGroup::initialize(spec)?),
            GroupFamily::Curve25519 => Backend::Curve25519(Curve25519Group::initialize(spec)?),
        })
    }

    fn encoded_length(&self) -> usize {
        match self {
            Backend::Modp(group) => group.encoded_length(),
            Backend::EcPrime(group) => group.encoded_length(),
            Backend::EcBinary(group) => group.encoded_length(),
            Backend::Curve25519(group) => group.encoded_length(),
        }
    }

    fn produce_exchange_value(&self) -> Result<Octets> {
        match self {
            Backend::Modp(group) => group.produce_exchange_value(),
            Backend::EcPrime(group) => group.produce_exchange_value(),
            Backend::EcBinary(group) => group.produce_exchange_value(),
            Backend::Curve25519(group) => group.produce_exchange_value(),
        }
    }

    fn derive_shared(&self, peer: &[u8]) -> Result<Octets> {
        match self {
            Backend::Modp(group) => group.derive_shared(peer),
            Backend::EcPrime(group) => group.derive_shared(peer),
            Backend::EcBinary(group) => group.derive_shared(peer),
            Backend::Curve25519(group) => group.derive_shared(peer),
        }
    }
}

/// One Diffie-Hellman exchange for one negotiated group.
///
/// Private material is generated on creation and wiped when the instance is
/// dropped or re-initialized.
///
/// # Example
///
/// ```
/// use ike_dh::GroupInstance;
///
/// let alice = GroupInstance::create(19)?;
/// let bob = GroupInstance::create(19)?;
///
/// let a = alice.produce_exchange_value()?;
/// let b = bob.produce_exchange_value()?;
/// assert_eq!(a.len(), alice.encoded_length());
///
/// assert_eq!(alice.derive_shared(&b)?, bob.derive_shared(&a)?);
/// # Ok::<(), ike_dh::Error>(())
/// ```
pub struct GroupInstance {
    spec: &'static GroupSpec,
    backend: Backend,
}

impl GroupInstance {
    /// Look up `id` and build its backend with a fresh key pair.
    pub fn create(id: u32) -> Result<Self> {
        let spec = catalog::lookup(id)?;
        let backend = Backend::initialize(spec).map_err(|err| {
            tracing::warn!(id, name = spec.name, error = %err, "group initialization failed");
            Error::InitFailed {
                id,
                source: Box::new(err),
            }
        })?;
        tracing::debug!(id, name = spec.name, family = ?spec.family, "created key-exchange group");
        Ok(GroupInstance { spec, backend })
    }

    /// Throw away the current key pair and generate a new one.
    ///
    /// On failure the instance keeps its previous key pair.
    pub fn initialize(&mut self) -> Result<()> {
        let id = self.spec.id;
        let backend = Backend::initialize(self.spec).map_err(|err| {
            tracing::warn!(id, name = self.spec.name, error = %err, "group re-initialization failed");
            Error::InitFailed {
                id,
                source: Box::new(err),
            }
        })?;
        // The old backend drops here and wipes its secrets
        self.backend = backend;
        tracing::debug!(id, name = self.spec.name, "regenerated key pair");
        Ok(())
    }

    /// Numeric group id, as negotiated in IKE.
    pub fn id(&self) -> u32 {
        self.spec.id
    }

    /// Catalog entry this instance was created from.
    pub fn spec(&self) -> &'static GroupSpec {
        self.spec
    }

    /// Family backend serving this group.
    pub fn family(&self) -> GroupFamily {
        self.spec.family
    }

    /// Width in bytes of exchange values and shared secrets for this group.
    pub fn encoded_length(&self) -> usize {
        self.backend.encoded_length()
    }

    /// Our public value, exactly `encoded_length()` bytes.
    pub fn produce_exchange_value(&self) -> Result<Octets> {
        self.backend.produce_exchange_value()
    }

    /// Combine the peer's exchange value with our private material.
    pub fn derive_shared(&self, peer_exchange_value: &[u8]) -> Result<Octets> {
        self.backend.derive_shared(peer_exchange_value).map_err(|err| {
            tracing::warn!(id = self.spec.id, peer_len = peer_exchange_value.len(), error = %err, "rejected peer exchange value");
            err
        })
    }
}

impl std::fmt::Debug for GroupInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupInstance")
            .field("id", &self.spec.id)
            .field("name", &self.spec.name)
            .field("family", &self.spec.family)
            .finish_non_exhaustive()
    }
}
