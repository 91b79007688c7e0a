// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The capability boundary between verification and cryptography
//!
//! The verifier never names a crypto library; everything algorithm-specific
//! goes through [`Crypto`]. The [`ring`](crate::ring) module provides the
//! production implementation, and tests substitute scripted ones.

use crate::algorithm::Algorithm;
use crate::digest_type::DigestType;

/// Outcome of a single public-key signature check
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyOutcome {
    /// The signature verifies over the message under the given key
    Valid,
    /// The signature does not verify, or the key material is malformed
    Invalid,
    /// The provider does not implement the algorithm
    Unsupported,
    /// The provider failed internally; the signature is neither good nor bad
    Failed,
}

/// Digest and public-key operations needed for DNSSEC validation.
///
/// Implementations must be cheap to call repeatedly: every candidate
/// (signature, key) pair costs one [`verify`](Self::verify) invocation.
pub trait Crypto: Send + Sync {
    /// Whether [`verify`](Self::verify) implements `algorithm`.
    ///
    /// Callers use this to skip unverifiable keys and signatures without
    /// treating them as bogus.
    fn supports_algorithm(&self, algorithm: Algorithm) -> bool;

    /// Output size in bytes of `digest_type`, `None` if unimplemented
    fn digest_size(&self, digest_type: DigestType) -> Option<usize>;

    /// One-shot digest of `data`, `None` if unimplemented
    fn digest(&self, digest_type: DigestType, data: &[u8]) -> Option<Vec<u8>>;

    /// Check `signature` over `message` with the public key material from a
    /// DNSKEY RDATA (the bytes after flags, protocol, and algorithm)
    fn verify(
        &self,
        algorithm: Algorithm,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> VerifyOutcome;
}

/// Constant-time byte equality, for digest comparison
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    ::ring::constant_time::verify_slices_are_equal(a, b).is_ok()
}
