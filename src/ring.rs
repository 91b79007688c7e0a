// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! *ring* implementation of the crypto capability

use ::ring::digest;
use ::ring::signature::{self, RsaPublicKeyComponents};

use crate::algorithm::Algorithm;
use crate::crypto::{Crypto, VerifyOutcome};
use crate::digest_type::DigestType;

/// Crypto provider backed by *ring*.
///
/// Implements the RSA, ECDSA, and Ed25519 DNSSEC algorithms and the SHA-1
/// and SHA-256 DS digests. RSAMD5 and the DSA variants are not available in
/// *ring* and report as unsupported.
#[derive(Clone, Copy, Debug, Default)]
pub struct RingCrypto;

impl Crypto for RingCrypto {
    fn supports_algorithm(&self, algorithm: Algorithm) -> bool {
        matches!(
            algorithm,
            Algorithm::RSASHA1
                | Algorithm::RSASHA1NSEC3SHA1
                | Algorithm::RSASHA256
                | Algorithm::RSASHA512
                | Algorithm::ECDSAP256SHA256
                | Algorithm::ECDSAP384SHA384
                | Algorithm::ED25519
        )
    }

    fn digest_size(&self, digest_type: DigestType) -> Option<usize> {
        Some(match digest_type {
            DigestType::SHA1 => digest::SHA1_OUTPUT_LEN,
            DigestType::SHA256 => digest::SHA256_OUTPUT_LEN,
        })
    }

    fn digest(&self, digest_type: DigestType, data: &[u8]) -> Option<Vec<u8>> {
        let algorithm = match digest_type {
            DigestType::SHA1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
            DigestType::SHA256 => &digest::SHA256,
        };
        Some(digest::digest(algorithm, data).as_ref().to_vec())
    }

    fn verify(
        &self,
        algorithm: Algorithm,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> VerifyOutcome {
        match algorithm {
            Algorithm::RSASHA1
            | Algorithm::RSASHA1NSEC3SHA1
            | Algorithm::RSASHA256
            | Algorithm::RSASHA512 => verify_rsa(algorithm, public_key, message, signature),
            Algorithm::ECDSAP256SHA256 | Algorithm::ECDSAP384SHA384 => {
                verify_ecdsa(algorithm, public_key, message, signature)
            }
            Algorithm::ED25519 => {
                let key = signature::UnparsedPublicKey::new(&signature::ED25519, public_key);
                match key.verify(message, signature) {
                    Ok(()) => VerifyOutcome::Valid,
                    Err(_) => VerifyOutcome::Invalid,
                }
            }
            _ => VerifyOutcome::Unsupported,
        }
    }
}

fn verify_rsa(
    algorithm: Algorithm,
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> VerifyOutcome {
    let params = match algorithm {
        Algorithm::RSASHA1 | Algorithm::RSASHA1NSEC3SHA1 => {
            &signature::RSA_PKCS1_1024_8192_SHA1_FOR_LEGACY_USE_ONLY
        }
        Algorithm::RSASHA256 => &signature::RSA_PKCS1_1024_8192_SHA256_FOR_LEGACY_USE_ONLY,
        Algorithm::RSASHA512 => &signature::RSA_PKCS1_1024_8192_SHA512_FOR_LEGACY_USE_ONLY,
        _ => return VerifyOutcome::Unsupported,
    };

    let Some((e, n)) = rsa_exponent_modulus(public_key) else {
        return VerifyOutcome::Invalid;
    };
    let key = RsaPublicKeyComponents { n, e };
    match key.verify(params, message, signature) {
        Ok(()) => VerifyOutcome::Valid,
        Err(_) => VerifyOutcome::Invalid,
    }
}

/// Split a DNSKEY RSA public key into exponent and modulus.
///
/// ```text
/// RFC 3110              RSA SIGs and KEYs in the DNS              May 2001
///
///       2. RSA Public KEY Resource Records
///
///        Field             Size
///        -----             ----
///        exponent length   1 or 3 octets (see text)
///        exponent          as specified by length field
///        modulus           remaining space
///
///  The public key exponent is a variable length unsigned integer.  Its
///  length in octets is represented as one octet if it is in the range of
///  1 to 255 and by a zero octet followed by a two octet unsigned length
///  if it is longer than 255 bytes.
/// ```
fn rsa_exponent_modulus(encoded: &[u8]) -> Option<(&[u8], &[u8])> {
    let (e_len_len, e_len) = match encoded.first() {
        Some(&0) if encoded.len() >= 3 => {
            (3, (usize::from(encoded[1]) << 8) | usize::from(encoded[2]))
        }
        Some(&e_len) if e_len != 0 => (1, usize::from(e_len)),
        _ => return None,
    };

    if encoded.len() < e_len_len + e_len {
        return None;
    }

    Some(encoded[e_len_len..].split_at(e_len))
}

fn verify_ecdsa(
    algorithm: Algorithm,
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> VerifyOutcome {
    let (params, field_len) = match algorithm {
        Algorithm::ECDSAP256SHA256 => (&signature::ECDSA_P256_SHA256_FIXED, 32),
        Algorithm::ECDSAP384SHA384 => (&signature::ECDSA_P384_SHA384_FIXED, 48),
        _ => return VerifyOutcome::Unsupported,
    };

    // DNSSEC encodes the uncompressed curve point "x | y" without the 0x04
    // prefix the crypto side expects
    if public_key.len() != 2 * field_len {
        return VerifyOutcome::Invalid;
    }
    let mut prefixed = Vec::with_capacity(1 + public_key.len());
    prefixed.push(0x04);
    prefixed.extend_from_slice(public_key);

    let key = signature::UnparsedPublicKey::new(params, prefixed);
    match key.verify(message, signature) {
        Ok(()) => VerifyOutcome::Valid,
        Err(_) => VerifyOutcome::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsa_exponent_modulus() {
        // one-octet exponent length
        let (e, n) = rsa_exponent_modulus(&[1, 3, 0xaa, 0xbb]).unwrap();
        assert_eq!(e, &[3]);
        assert_eq!(n, &[0xaa, 0xbb]);

        // three-octet form for exponents longer than 255 bytes
        let mut long = vec![0, 1, 0];
        long.extend_from_slice(&[7; 256]);
        long.extend_from_slice(&[0xcc; 4]);
        let (e, n) = rsa_exponent_modulus(&long).unwrap();
        assert_eq!(e.len(), 256);
        assert_eq!(n, &[0xcc; 4]);

        // truncated and empty keys
        assert!(rsa_exponent_modulus(&[5, 1, 2]).is_none());
        assert!(rsa_exponent_modulus(&[0, 0]).is_none());
        assert!(rsa_exponent_modulus(&[]).is_none());
    }

    #[test]
    fn test_unsupported_algorithms() {
        let ring = RingCrypto;
        assert!(!ring.supports_algorithm(Algorithm::RSAMD5));
        assert!(!ring.supports_algorithm(Algorithm::DSA));
        assert!(!ring.supports_algorithm(Algorithm::Unknown(250)));
        assert_eq!(
            ring.verify(Algorithm::DSA, b"", b"", b""),
            VerifyOutcome::Unsupported
        );
    }

    #[test]
    fn test_digest_sizes() {
        let ring = RingCrypto;
        assert_eq!(ring.digest_size(DigestType::SHA1), Some(20));
        assert_eq!(ring.digest_size(DigestType::SHA256), Some(32));
        assert_eq!(ring.digest(DigestType::SHA256, b"abc").unwrap().len(), 32);
    }
}
