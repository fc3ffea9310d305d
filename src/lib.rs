// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Diffie-Hellman key agreement for IKE.
//!
//! Every negotiable group (MODP, elliptic curves over prime and binary
//! fields, X25519) is driven through the same [`GroupInstance`] lifecycle:
//! create it by IANA group id, send [`produce_exchange_value`], and feed the
//! peer's value to [`derive_shared`]. Both values are big-endian octet
//! strings of exactly [`encoded_length`] bytes.
//!
//! [`produce_exchange_value`]: GroupInstance::produce_exchange_value
//! [`derive_shared`]: GroupInstance::derive_shared
//! [`encoded_length`]: GroupInstance::encoded_length

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod group;
pub mod groups;
pub mod octets;
mod secret;

pub use catalog::{CurveId, DomainParams, GroupFamily, GroupSpec};
pub use dispatch::GroupInstance;
pub use error::{Error, Result};
pub use group::KeyExchange;
pub use octets::Octets;
