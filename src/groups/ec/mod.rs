// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Elliptic-curve backend for prime-field (ECP) and binary-field (EC2N) groups.
//!
//! The backend is the same for every curve: generate and validate a key pair,
//! encode points as X‖Y through the [`PointCodec`], validate the peer's point
//! and multiply it by our scalar. What differs per curve is the arithmetic,
//! supplied by a curve engine behind the [`CurveKey`] trait:
//!
//! - NIST P-192/224/256/384/521: the RustCrypto curve crates ([`NistKey`])
//! - brainpool r1 curves: short Weierstrass over GF(p) ([`WeierstrassKey`])
//! - Oakley EC2N-155/185: curves over GF(2^m) ([`BinaryCurveKey`])

mod binary;
mod codec;
mod nist;
mod prime;

pub use binary::{BinaryCurve, BinaryCurveKey};
pub use codec::PointCodec;
pub use nist::NistKey;
pub use prime::{PrimeCurve, WeierstrassKey};

use p192::NistP192;
use p224::NistP224;
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use zeroize::ZeroizeOnDrop;

use crate::catalog::{CurveId, GroupSpec};
use crate::error::{Error, Result};
use crate::group::KeyExchange;
use crate::octets::Octets;

/// Affine coordinates of a curve point as big-endian field elements.
///
/// The engines hand these out unpadded or padded, the codec fixes the width.
/// Both halves are wiped on drop since shared points pass through here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffineCoordinates {
    x: Octets,
    y: Octets,
}

impl AffineCoordinates {
    pub fn new(x: Octets, y: Octets) -> Self {
        AffineCoordinates { x, y }
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }
}

/// A private scalar with its public point on one curve.
pub trait CurveKey: ZeroizeOnDrop + Sized {
    /// Generate a key pair on `curve` and validate the public point.
    fn generate(curve: CurveId) -> Result<Self>;

    /// Our public point.
    fn public_point(&self) -> Result<AffineCoordinates>;

    /// Validate the peer's point and multiply it by our scalar.
    ///
    /// Fails with `MalformedPoint` when a coordinate is not a field element
    /// and `InvalidPeerValue` when the point is not on the curve or not in
    /// the generator's subgroup.
    fn agree(&self, peer: &AffineCoordinates) -> Result<AffineCoordinates>;
}

/// Key pair on a prime-field curve.
pub enum PrimeCurveKey {
    P192(NistKey<NistP192>),
    P224(NistKey<NistP224>),
    P256(NistKey<NistP256>),
    P384(NistKey<NistP384>),
    P521(NistKey<NistP521>),
    Brainpool(WeierstrassKey),
}

impl CurveKey for PrimeCurveKey {
    fn generate(curve: CurveId) -> Result<Self> {
        match curve {
            CurveId::P192 => NistKey::generate().map(PrimeCurveKey::P192),
            CurveId::P224 => NistKey::generate().map(PrimeCurveKey::P224),
            CurveId::P256 => NistKey::generate().map(PrimeCurveKey::P256),
            CurveId::P384 => NistKey::generate().map(PrimeCurveKey::P384),
            CurveId::P521 => NistKey::generate().map(PrimeCurveKey::P521),
            CurveId::BrainpoolP224r1
            | CurveId::BrainpoolP256r1
            | CurveId::BrainpoolP384r1
            | CurveId::BrainpoolP512r1 => WeierstrassKey::generate(curve).map(PrimeCurveKey::Brainpool),
            CurveId::Ec2n155 | CurveId::Ec2n185 => Err(Error::KeyGenFailed(format!(
                "{:?} is not a prime-field curve",
                curve
            ))),
        }
    }

    fn public_point(&self) -> Result<AffineCoordinates> {
        match self {
            PrimeCurveKey::P192(key) => key.public_point(),
            PrimeCurveKey::P224(key) => key.public_point(),
            PrimeCurveKey::P256(key) => key.public_point(),
            PrimeCurveKey::P384(key) => key.public_point(),
            PrimeCurveKey::P521(key) => key.public_point(),
            PrimeCurveKey::Brainpool(key) => key.public_point(),
        }
    }

    fn agree(&self, peer: &AffineCoordinates) -> Result<AffineCoordinates> {
        match self {
            PrimeCurveKey::P192(key) => key.agree(peer),
            PrimeCurveKey::P224(key) => key.agree(peer),
            PrimeCurveKey::P256(key) => key.agree(peer),
            PrimeCurveKey::P384(key) => key.agree(peer),
            PrimeCurveKey::P521(key) => key.agree(peer),
            PrimeCurveKey::Brainpool(key) => key.agree(peer),
        }
    }
}

impl ZeroizeOnDrop for PrimeCurveKey {}

impl CurveKey for BinaryCurveKey {
    fn generate(curve: CurveId) -> Result<Self> {
        BinaryCurveKey::generate(curve)
    }

    fn public_point(&self) -> Result<AffineCoordinates> {
        BinaryCurveKey::public_point(self)
    }

    fn agree(&self, peer: &AffineCoordinates) -> Result<AffineCoordinates> {
        BinaryCurveKey::agree(self, peer)
    }
}

/// Elliptic-curve group instance: a key pair plus the codec for its curve.
pub struct EcGroup<K> {
    codec: PointCodec,
    key: K,
}

/// Prime-field curve group (ECP).
pub type EcpGroup = EcGroup<PrimeCurveKey>;

/// Binary-field curve group (EC2N).
pub type Ec2nGroup = EcGroup<BinaryCurveKey>;

impl<K: CurveKey> EcGroup<K> {
    /// Bind an existing key pair to the codec of `spec`.
    #[doc(hidden)]
    pub fn from_key(spec: &GroupSpec, key: K) -> Self {
        EcGroup {
            codec: PointCodec::for_spec(spec),
            key,
        }
    }
}

impl<K: CurveKey> KeyExchange for EcGroup<K> {
    fn initialize(spec: &'static GroupSpec) -> Result<Self> {
        let curve = spec
            .curve()
            .ok_or_else(|| Error::KeyGenFailed(format!("group {} has no curve", spec.id)))?;
        let key = K::generate(curve)?;
        Ok(Self::from_key(spec, key))
    }

    fn encoded_length(&self) -> usize {
        self.codec.encoded_length()
    }

    fn produce_exchange_value(&self) -> Result<Octets> {
        self.codec.encode(&self.key.public_point()?)
    }

    fn derive_shared(&self, peer_exchange_value: &[u8]) -> Result<Octets> {
        let peer = self
            .codec
            .decode(peer_exchange_value)
            .map_err(Error::into_peer_error)?;
        let shared = self.key.agree(&peer).map_err(Error::into_peer_error)?;
        self.codec.encode(&shared)
    }
}

impl<K: CurveKey> ZeroizeOnDrop for EcGroup<K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn ecp(id: u32) -> EcpGroup {
        EcpGroup::initialize(catalog::lookup(id).unwrap()).unwrap()
    }

    #[test]
    fn test_encoded_lengths() {
        assert_eq!(ecp(19).encoded_length(), 64);
        assert_eq!(ecp(20).encoded_length(), 96);
        assert_eq!(ecp(21).encoded_length(), 132);
        assert_eq!(ecp(25).encoded_length(), 48);
        assert_eq!(ecp(26).encoded_length(), 56);
        assert_eq!(ecp(27).encoded_length(), 56);
        assert_eq!(ecp(30).encoded_length(), 128);
        let ec2n = Ec2nGroup::initialize(catalog::lookup(3).unwrap()).unwrap();
        assert_eq!(ec2n.encoded_length(), 40);
    }

    #[test]
    fn test_prime_backend_rejects_binary_curve() {
        assert!(PrimeCurveKey::generate(CurveId::Ec2n155).is_err());
        assert!(EcpGroup::initialize(catalog::lookup(14).unwrap()).is_err());
    }

    #[test]
    fn test_p256_agreement_is_symmetric() {
        let alice = ecp(19);
        let bob = ecp(19);
        let a = alice.produce_exchange_value().unwrap();
        let b = bob.produce_exchange_value().unwrap();
        let s1 = alice.derive_shared(&b).unwrap();
        let s2 = bob.derive_shared(&a).unwrap();
        assert_eq!(s1, s2);
        assert_eq!(s1.len(), 64);
        // Shared point, not the exchange values
        assert_ne!(s1, a);
        assert_ne!(s1, b);
    }

    #[test]
    fn test_off_curve_peer_is_invalid_peer_value() {
        let alice = ecp(19);
        let mut peer = alice.produce_exchange_value().unwrap().to_vec();
        let last = peer.len() - 1;
        peer[last] ^= 0x01;
        assert!(matches!(alice.derive_shared(&peer), Err(Error::InvalidPeerValue(_))));
    }

    #[test]
    fn test_short_peer_is_invalid_peer_value() {
        let alice = ecp(28);
        let peer = alice.produce_exchange_value().unwrap();
        assert!(matches!(
            alice.derive_shared(&peer[1..]),
            Err(Error::InvalidPeerValue(_))
        ));
    }
}
