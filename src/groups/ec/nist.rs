// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! NIST prime curves on top of the RustCrypto `elliptic-curve` traits.

use elliptic_curve::group::Curve as _;
use elliptic_curve::sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint};
use elliptic_curve::{
    AffinePoint, CurveArithmetic, FieldBytes, FieldBytesSize, ProjectivePoint, PublicKey, Scalar,
    SecretKey,
};
use rand::rngs::OsRng;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};
use crate::octets::Octets;

use super::AffineCoordinates;

/// Key pair on one of the NIST P-curves.
///
/// The secret is a `SecretKey`, which is wiped on drop. These curves have
/// prime order and cofactor 1, so a decoded point that is on the curve and
/// not the identity is in the generator's subgroup.
pub struct NistKey<C: CurveArithmetic> {
    secret: SecretKey<C>,
    public: PublicKey<C>,
}

impl<C> NistKey<C>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    pub fn generate() -> Result<Self> {
        Self::from_secret(SecretKey::<C>::random(&mut OsRng))
    }

    /// Load a fixed scalar, for known-answer tests.
    #[doc(hidden)]
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        let secret = SecretKey::<C>::from_slice(bytes)
            .map_err(|_| Error::KeyGenFailed("scalar out of range".into()))?;
        Self::from_secret(secret)
    }

    fn from_secret(secret: SecretKey<C>) -> Result<Self> {
        let public = secret.public_key();
        let encoded = public.to_encoded_point(false);
        let reparsed: Option<PublicKey<C>> = PublicKey::<C>::from_encoded_point(&encoded).into();
        if reparsed.as_ref() != Some(&public) {
            return Err(Error::KeyGenFailed(
                "generated public point failed validation".into(),
            ));
        }
        Ok(NistKey { secret, public })
    }

    pub fn public_point(&self) -> Result<AffineCoordinates> {
        coordinates::<C>(self.public.as_affine())
    }

    pub fn agree(&self, peer: &AffineCoordinates) -> Result<AffineCoordinates> {
        let width = FieldBytes::<C>::default().len();
        if peer.x().len() != width || peer.y().len() != width {
            return Err(Error::MalformedPoint(format!(
                "coordinates must be {} bytes each",
                width
            )));
        }
        let x = FieldBytes::<C>::clone_from_slice(peer.x());
        let y = FieldBytes::<C>::clone_from_slice(peer.y());
        let encoded = EncodedPoint::<C>::from_affine_coordinates(&x, &y, false);
        let peer_key: PublicKey<C> = Option::from(PublicKey::<C>::from_encoded_point(&encoded))
            .ok_or_else(|| Error::InvalidPeerValue("point is not on the curve".into()))?;

        let scalar = Zeroizing::new(self.secret.to_nonzero_scalar());
        let k: &Scalar<C> = (*scalar).as_ref();
        let shared = (ProjectivePoint::<C>::from(*peer_key.as_affine()) * k).to_affine();
        coordinates::<C>(&shared)
    }
}

fn coordinates<C>(point: &AffinePoint<C>) -> Result<AffineCoordinates>
where
    C: CurveArithmetic,
    AffinePoint<C>: ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let encoded = Zeroizing::new(point.to_encoded_point(false));
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Ok(AffineCoordinates::new(
            Octets::from_slice(x),
            Octets::from_slice(y),
        )),
        _ => Err(Error::InvalidPeerValue("result is the point at infinity".into())),
    }
}

impl<C: CurveArithmetic> ZeroizeOnDrop for NistKey<C> {}
