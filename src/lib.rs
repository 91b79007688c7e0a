// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![warn(
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::unimplemented,
    missing_docs,
    unreachable_pub
)]

//! DNSSEC RRset signature verification.
//!
//! This crate decides whether a DNS resource-record set is cryptographically
//! authenticated by a given DNSKEY set, and whether a DS record authenticates
//! a child-zone key. It operates directly on wire-format record data: the
//! caller supplies an [`Rrset`] view over `<rdlen><rdata>` entries exactly as
//! they appeared on the wire, and receives a three-valued [`Proof`].
//!
//! Verification reconstructs the signed data in canonical form per
//! [RFC 4034, section 6](https://tools.ietf.org/html/rfc4034#section-6)
//! (canonical ordering, wildcard owner synthesis, embedded-name lowering),
//! checks the RRSIG validity window under RFC 1982 serial-number arithmetic,
//! and hands the result to a pluggable [`Crypto`] provider. A
//! [ring](https://docs.rs/ring)-backed provider is included.
//!
//! ```rust
//! use dnssec_verify::{dnskeyset_verify_rrset, Clock, Env, Proof, Rrset};
//!
//! // An A RRset that arrived without any covering RRSIG.
//! let owner = b"\x07example\x03com\x00";
//! let a = [0, 4, 192, 0, 2, 1];
//! let entries: [&[u8]; 1] = [&a];
//! let rrset = Rrset::new(owner, 1, 1, 1, &entries);
//!
//! let mut env = Env::default();
//! let keys = Rrset::new(owner, 48, 1, 0, &[]);
//! assert_eq!(
//!     dnskeyset_verify_rrset(&mut env, &Clock::default(), &rrset, &keys),
//!     Proof::Bogus,
//! );
//! ```
//!
//! The crate performs no I/O and holds no global state; callers may verify
//! concurrently from distinct threads as long as each thread owns its [`Env`].

mod algorithm;
mod buffer;
pub mod crypto;
mod digest_type;
mod proof;
pub mod rdata;
pub mod ring;
pub mod rrset;
mod serial;
mod tbs;
mod verifier;

pub(crate) mod name;

pub use self::algorithm::Algorithm;
pub use self::buffer::Buffer;
pub use self::crypto::{Crypto, VerifyOutcome};
pub use self::digest_type::DigestType;
pub use self::proof::{Proof, ProofError, ProofErrorKind};
pub use self::ring::RingCrypto;
pub use self::rrset::Rrset;
pub use self::serial::SerialNumber;
pub use self::verifier::{
    dnskey_algo_is_supported, dnskey_calc_keytag, dnskey_get_algo, dnskey_get_flags,
    dnskey_verify_rrset, dnskey_verify_rrset_sig, dnskeyset_verify_rrset,
    dnskeyset_verify_rrset_sig, ds_digest_algo_is_supported, ds_digest_match_dnskey,
    ds_get_key_algo, ds_get_keytag, ds_key_algo_is_supported, Clock, Env,
};

#[cfg(test)]
pub(crate) mod test_util;
