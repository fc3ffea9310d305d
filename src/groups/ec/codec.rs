// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Wire encoding of curve points in KE payloads.

use crate::catalog::GroupSpec;
use crate::error::{Error, Result};
use crate::octets::Octets;

use super::AffineCoordinates;

/// Fixed-width `X ‖ Y` point encoding used for IKE exchange values and
/// shared secrets.
///
/// Each coordinate is a big-endian field element left-padded to the field
/// width. There is no SEC1 prefix byte and no compressed form, and the
/// point at infinity has no encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCodec {
    field_len: usize,
}

impl PointCodec {
    pub fn new(field_len: usize) -> Self {
        PointCodec { field_len }
    }

    pub fn for_spec(spec: &GroupSpec) -> Self {
        PointCodec::new(spec.field_len())
    }

    pub fn field_len(&self) -> usize {
        self.field_len
    }

    pub fn encoded_length(&self) -> usize {
        2 * self.field_len
    }

    pub fn encode(&self, point: &AffineCoordinates) -> Result<Octets> {
        Octets::concat_halves(point.x(), point.y(), self.field_len)
    }

    /// Split an encoded point into its coordinates.
    ///
    /// Only the shape is checked here. Whether the coordinates are field
    /// elements and lie on the curve is up to the curve engine.
    pub fn decode(&self, bytes: &[u8]) -> Result<AffineCoordinates> {
        if bytes.len() != self.encoded_length() {
            return Err(Error::MalformedPoint(format!(
                "expected {} bytes, got {}",
                self.encoded_length(),
                bytes.len()
            )));
        }
        let raw = Octets::from_slice(bytes);
        let (x, y) = raw.split_in_half()?;
        Ok(AffineCoordinates::new(
            Octets::from_slice(x),
            Octets::from_slice(y),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads_each_coordinate() {
        let codec = PointCodec::new(4);
        let point = AffineCoordinates::new(Octets::from_slice(&[0x01]), Octets::from_slice(&[0x02, 0x03]));
        let encoded = codec.encode(&point).unwrap();
        assert_eq!(encoded.as_bytes(), &[0, 0, 0, 0x01, 0, 0, 0x02, 0x03]);
    }

    #[test]
    fn test_decode_splits_in_half() {
        let codec = PointCodec::new(2);
        let point = codec.decode(&[0xaa, 0xbb, 0xcc, 0xdd]).unwrap();
        assert_eq!(point.x(), &[0xaa, 0xbb]);
        assert_eq!(point.y(), &[0xcc, 0xdd]);
        assert_eq!(codec.encode(&point).unwrap().as_bytes(), &[0xaa, 0xbb, 0xcc, 0xdd]);
    }

    #[test]
    fn test_decode_wrong_length() {
        let codec = PointCodec::new(32);
        for len in [0usize, 1, 32, 63, 65, 97] {
            let bytes = vec![0x11; len];
            assert!(matches!(codec.decode(&bytes), Err(Error::MalformedPoint(_))));
        }
    }

    #[test]
    fn test_encode_oversized_coordinate() {
        let codec = PointCodec::new(2);
        let point = AffineCoordinates::new(Octets::from_slice(&[1, 2, 3]), Octets::from_slice(&[4]));
        assert!(codec.encode(&point).is_err());
    }

    #[test]
    fn test_odd_field_width() {
        // P-521 and EC2N-155 coordinates do not fill whole words
        let codec = PointCodec::new(66);
        assert_eq!(codec.encoded_length(), 132);
        let point = codec.decode(&[0x01; 132]).unwrap();
        assert_eq!(point.x().len(), 66);
    }
}
