// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! DNSSEC signing and validation algorithm numbers

use core::fmt;

/// DNSSEC signing and validation algorithms.
///
/// The [IANA registry](http://www.iana.org/assignments/dns-sec-alg-numbers/dns-sec-alg-numbers.xhtml)
/// has all officially assigned numbers. The MD5, DSA, and SHA1 based entries
/// are compromised and present only so that records carrying them can be
/// identified; whether any algorithm is actually verifiable is decided by the
/// configured [`Crypto`](crate::Crypto) provider.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[non_exhaustive]
pub enum Algorithm {
    /// Compromised, kept for identification of legacy records
    RSAMD5,
    /// Compromised, kept for identification of legacy records
    DSA,
    /// Compromised, kept for identification of legacy records
    RSASHA1,
    /// DSA for use with NSEC3
    DSANSEC3SHA1,
    /// RSASHA1 for use with NSEC3
    RSASHA1NSEC3SHA1,
    /// RSA public key with SHA256 hash
    RSASHA256,
    /// RSA public key with SHA512 hash
    RSASHA512,
    /// [RFC 6605](https://tools.ietf.org/html/rfc6605)
    ECDSAP256SHA256,
    /// [RFC 6605](https://tools.ietf.org/html/rfc6605)
    ECDSAP384SHA384,
    /// [RFC 8080](https://tools.ietf.org/html/rfc8080)
    ED25519,
    /// An unassigned or unrecognized algorithm number
    Unknown(u8),
}

impl Algorithm {
    /// <http://www.iana.org/assignments/dns-sec-alg-numbers/dns-sec-alg-numbers.xhtml>
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::RSAMD5,
            3 => Self::DSA,
            5 => Self::RSASHA1,
            6 => Self::DSANSEC3SHA1,
            7 => Self::RSASHA1NSEC3SHA1,
            8 => Self::RSASHA256,
            10 => Self::RSASHA512,
            13 => Self::ECDSAP256SHA256,
            14 => Self::ECDSAP384SHA384,
            15 => Self::ED25519,
            _ => Self::Unknown(value),
        }
    }

    /// Convert to string form
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RSAMD5 => "RSAMD5",
            Self::DSA => "DSA",
            Self::RSASHA1 => "RSASHA1",
            Self::DSANSEC3SHA1 => "DSA-NSEC3-SHA1",
            Self::RSASHA1NSEC3SHA1 => "RSASHA1-NSEC3-SHA1",
            Self::RSASHA256 => "RSASHA256",
            Self::RSASHA512 => "RSASHA512",
            Self::ECDSAP256SHA256 => "ECDSAP256SHA256",
            Self::ECDSAP384SHA384 => "ECDSAP384SHA384",
            Self::ED25519 => "ED25519",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl From<Algorithm> for u8 {
    fn from(a: Algorithm) -> Self {
        match a {
            Algorithm::RSAMD5 => 1,
            Algorithm::DSA => 3,
            Algorithm::RSASHA1 => 5,
            Algorithm::DSANSEC3SHA1 => 6,
            Algorithm::RSASHA1NSEC3SHA1 => 7,
            Algorithm::RSASHA256 => 8,
            Algorithm::RSASHA512 => 10,
            Algorithm::ECDSAP256SHA256 => 13,
            Algorithm::ECDSAP384SHA384 => 14,
            Algorithm::ED25519 => 15,
            Algorithm::Unknown(v) => v,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(v) => write!(f, "Unknown({v})"),
            _ => f.write_str(self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Algorithm;

    #[test]
    fn test_roundtrip() {
        for value in 0..=u8::MAX {
            assert_eq!(u8::from(Algorithm::from_u8(value)), value);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Algorithm::RSASHA256.to_string(), "RSASHA256");
        assert_eq!(Algorithm::Unknown(200).to_string(), "Unknown(200)");
    }
}
