// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The security verdict returned by signature verification

use core::fmt;

use thiserror::Error;

use crate::algorithm::Algorithm;

/// The security status of an RRset after signature verification.
///
/// Every verification entry point returns exactly one of these values; no
/// failure is reported through unwinding.
#[must_use = "a Proof must be interrogated before the verified data is used"]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Proof {
    /// At least one signature verified end-to-end: the RRset is
    /// authenticated by the supplied key set.
    Secure,

    /// Verification failed structurally or cryptographically: malformed
    /// records, no usable signature or key, a date window violation, or a
    /// signature that does not verify.
    Bogus,

    /// Verification could not be completed because of an internal failure in
    /// the crypto backend. The result is neither good nor bad; callers
    /// should retry and must not cache it.
    Unchecked,
}

impl Proof {
    /// Returns true if this Proof represents a validated RRset
    #[inline]
    pub fn is_secure(&self) -> bool {
        *self == Self::Secure
    }

    /// Returns true if this Proof represents an RRset that failed validation
    #[inline]
    pub fn is_bogus(&self) -> bool {
        *self == Self::Bogus
    }

    /// Returns true if verification was aborted by an internal failure
    #[inline]
    pub fn is_unchecked(&self) -> bool {
        *self == Self::Unchecked
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Secure => "Secure",
            Self::Bogus => "Bogus",
            Self::Unchecked => "Unchecked",
        };

        f.write_str(s)
    }
}

/// The reason a single signature check failed
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ProofErrorKind {
    /// The RRSIG RDATA cannot hold the fixed fields, a signer name, and a
    /// signature
    #[error("signature too short: {len} bytes")]
    SignatureTooShort {
        /// Length of the RRSIG entry, rdlen prefix included
        len: usize,
    },

    /// The DNSKEY does not have the Zone Key flag set
    #[error("dnskey without ZSK flag, key_tag: {key_tag}")]
    NotZoneKey {
        /// The key tag computed from the DNSKEY
        key_tag: u16,
    },

    /// The signer name field does not parse as a domain name
    #[error("malformed signer name")]
    BadSignerName,

    /// Nothing remains after the signer name to use as a signature
    #[error("too short, no signature data")]
    MissingSignatureData,

    /// The signer name differs from the DNSKEY owner name
    #[error("rrsig signed by a different zone than the dnskey owner")]
    SignerMismatch,

    /// The RRSIG type covered field differs from the RRset type
    #[error("wrong type covered: rrsig {covered}, rrset {rrtype}")]
    WrongTypeCovered {
        /// Type covered field of the RRSIG
        covered: u16,
        /// Type of the RRset under validation
        rrtype: u16,
    },

    /// The RRSIG and DNSKEY algorithm numbers differ
    #[error("algorithm mismatch: rrsig {rrsig}, dnskey {dnskey}")]
    AlgorithmMismatch {
        /// Algorithm of the RRSIG
        rrsig: Algorithm,
        /// Algorithm of the DNSKEY
        dnskey: Algorithm,
    },

    /// The RRSIG key tag does not match the tag computed over the DNSKEY
    #[error("wrong keytag: rrsig {rrsig}, dnskey {dnskey}")]
    KeyTagMismatch {
        /// Key tag field of the RRSIG
        rrsig: u16,
        /// Key tag computed over the DNSKEY RDATA
        dnskey: u16,
    },

    /// The RRSIG labels field exceeds the owner name label count
    #[error("labelcount out of range: rrsig {rrsig}, owner has {owner}")]
    ExcessLabels {
        /// Labels field of the RRSIG
        rrsig: u8,
        /// Label count of the RRset owner name
        owner: usize,
    },

    /// The signature inception is after its expiration
    #[error("inception after expiration, signature bad")]
    InceptionAfterExpiration,

    /// The current time is before the signature inception
    #[error("signature bad, current time {now} is before inception date {inception}")]
    SignatureNotYetValid {
        /// Inception field of the RRSIG
        inception: u32,
        /// The validator's notion of the current time
        now: u32,
    },

    /// The signature has expired
    #[error("signature expired, {expiration} is before current time {now}")]
    SignatureExpired {
        /// Expiration field of the RRSIG
        expiration: u32,
        /// The validator's notion of the current time
        now: u32,
    },

    /// The crypto backend rejected the signature over the canonical data
    #[error("signature crypto failed for {algorithm}")]
    SignatureInvalid {
        /// Algorithm the signature was checked under
        algorithm: Algorithm,
    },

    /// The crypto backend does not implement the algorithm
    #[error("unsupported algorithm {algorithm}")]
    UnsupportedAlgorithm {
        /// The unimplemented algorithm
        algorithm: Algorithm,
    },

    /// The crypto backend failed internally
    #[error("crypto backend failure")]
    CryptoFailure,
}

/// A failed signature check: the verdict it maps to and the reason
#[derive(Debug, Clone, Error)]
#[error("{proof}: {kind}")]
pub struct ProofError {
    proof: Proof,
    kind: ProofErrorKind,
}

impl ProofError {
    /// Pair a verdict with the reason for it
    pub fn new(proof: Proof, kind: ProofErrorKind) -> Self {
        Self { proof, kind }
    }

    /// The verdict this failure maps to
    pub fn proof(&self) -> Proof {
        self.proof
    }

    /// The reason for the failure
    pub fn kind(&self) -> &ProofErrorKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Proof::Secure.is_secure());
        assert!(Proof::Bogus.is_bogus());
        assert!(Proof::Unchecked.is_unchecked());
        assert!(!Proof::Bogus.is_secure());
    }

    #[test]
    fn test_display() {
        let err = ProofError::new(
            Proof::Bogus,
            ProofErrorKind::KeyTagMismatch {
                rrsig: 1,
                dnskey: 2,
            },
        );
        assert_eq!(err.to_string(), "Bogus: wrong keytag: rrsig 1, dnskey 2");
    }
}
