// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Key-exchange backend abstraction.
//!
//! This trait gives MODP groups (modular exponentiation), elliptic curve
//! groups (scalar multiplication) and X25519 one lifecycle and one wire
//! encoding, so the IKE engine can drive any negotiated group the same way.

use zeroize::ZeroizeOnDrop;

use crate::catalog::GroupSpec;
use crate::error::Result;
use crate::octets::Octets;

/// The four-operation contract every family backend implements.
///
/// A backend owns its private material exclusively and wipes it when dropped,
/// hence the `ZeroizeOnDrop` bound.
///
/// - **MODP**: exchange value `g^x mod p`, shared secret `y^x mod p`
/// - **Elliptic curves**: exchange value `k*G` as X‖Y, shared secret `k*Q` as X‖Y
/// - **X25519**: exchange value and shared secret are 32-byte u-coordinates
pub trait KeyExchange: ZeroizeOnDrop + Sized {
    /// Build the backend for `spec` and generate a fresh key pair.
    ///
    /// Fails with `KeyGenFailed` if randomness, arithmetic, or validation of
    /// the generated public value fails. Anything secret written before the
    /// failure is wiped as the partial backend is dropped.
    fn initialize(spec: &'static GroupSpec) -> Result<Self>;

    /// Width in bytes of both the exchange value and the shared secret.
    ///
    /// This is the interoperability contract: the peer computes the same
    /// width for the same group id.
    fn encoded_length(&self) -> usize;

    /// Our public value, exactly `encoded_length()` bytes.
    fn produce_exchange_value(&self) -> Result<Octets>;

    /// Combine the peer's exchange value with our private material.
    ///
    /// Fails with `InvalidPeerValue` when the peer value cannot be parsed or
    /// fails validation. The result is exactly `encoded_length()` bytes.
    fn derive_shared(&self, peer_exchange_value: &[u8]) -> Result<Octets>;
}
