// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! X25519 (RFC 7748) as private-use group 1034.

use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::catalog::GroupSpec;
use crate::error::{Error, Result};
use crate::group::KeyExchange;
use crate::octets::Octets;

const KEY_LEN: usize = 32;

/// X25519 key pair. Exchange values and shared secrets are 32-byte
/// little-endian u-coordinates, passed through unchanged.
///
/// Peer values are not validated: every 32-byte string is a valid input to
/// X25519, and a low-order peer yields the all-zero output.
pub struct Curve25519Group {
    secret: StaticSecret,
    public: PublicKey,
}

impl Curve25519Group {
    /// Load a fixed private key, for known-answer tests.
    #[doc(hidden)]
    pub fn from_secret(secret: [u8; KEY_LEN]) -> Self {
        let secret = StaticSecret::from(secret);
        let public = PublicKey::from(&secret);
        Curve25519Group { secret, public }
    }
}

impl KeyExchange for Curve25519Group {
    fn initialize(_spec: &'static GroupSpec) -> Result<Self> {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = PublicKey::from(&secret);
        Ok(Curve25519Group { secret, public })
    }

    fn encoded_length(&self) -> usize {
        KEY_LEN
    }

    fn produce_exchange_value(&self) -> Result<Octets> {
        Ok(Octets::from_slice(self.public.as_bytes()))
    }

    fn derive_shared(&self, peer_exchange_value: &[u8]) -> Result<Octets> {
        let peer: [u8; KEY_LEN] = peer_exchange_value.try_into().map_err(|_| {
            Error::InvalidPeerValue(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                peer_exchange_value.len()
            ))
        })?;
        let shared = self.secret.diffie_hellman(&PublicKey::from(peer));
        Ok(Octets::from_slice(shared.as_bytes()))
    }
}

impl Zeroize for Curve25519Group {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl ZeroizeOnDrop for Curve25519Group {}
