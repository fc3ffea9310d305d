// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Family backends implementing [`KeyExchange`](crate::group::KeyExchange):
//! - `modp`: finite-field Diffie-Hellman over the catalog's MODP primes
//! - `ec`: prime-field and binary-field elliptic curves
//! - `curve25519`: X25519

pub mod curve25519;
pub mod ec;
pub mod modp;

pub use curve25519::Curve25519Group;
pub use ec::{Ec2nGroup, EcGroup, EcpGroup, PointCodec};
pub use modp::{ModpGroup, ModpParams};
