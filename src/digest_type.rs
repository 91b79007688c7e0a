// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! DS record digest type numbers

/// DNSSEC Delegation Signer (DS) Resource Record (RR) Type Digest Algorithms
///
/// ```text
/// 0 Reserved - [RFC3658]
/// 1 SHA-1 MANDATORY [RFC3658]
/// 2 SHA-256 MANDATORY [RFC4509]
/// 3 GOST R 34.11-94 OPTIONAL [RFC5933]
/// 4 SHA-384 OPTIONAL [RFC6605]
/// ```
///
/// <https://www.iana.org/assignments/ds-rr-types/ds-rr-types.xhtml>
///
/// Only the two mandatory types are recognized; a DS carrying any other
/// number is treated as unsupported rather than bogus.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[non_exhaustive]
pub enum DigestType {
    /// [RFC 3658](https://tools.ietf.org/html/rfc3658)
    SHA1,
    /// [RFC 4509](https://tools.ietf.org/html/rfc4509)
    SHA256,
}

impl DigestType {
    /// Map a DS digest type number, `None` for anything unassigned or
    /// unimplemented
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::SHA1),
            2 => Some(Self::SHA256),
            _ => None,
        }
    }
}

impl From<DigestType> for u8 {
    fn from(a: DigestType) -> Self {
        match a {
            DigestType::SHA1 => 1,
            DigestType::SHA256 => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DigestType;

    #[test]
    fn test_from_u8() {
        assert_eq!(DigestType::from_u8(1), Some(DigestType::SHA1));
        assert_eq!(DigestType::from_u8(2), Some(DigestType::SHA256));
        assert_eq!(DigestType::from_u8(0), None);
        assert_eq!(DigestType::from_u8(3), None);
        assert_eq!(DigestType::from_u8(4), None);
    }
}
