// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! DS RDATA accessors
//!
//! [RFC 4034, section 5.1](https://tools.ietf.org/html/rfc4034#section-5.1):
//!
//! ```text
//! 5.1.  DS RDATA Wire Format
//!
//!    The RDATA for a DS RR consists of a 2 octet Key Tag field, a 1 octet
//!    Algorithm field, a 1 octet Digest Type field, and a Digest field.
//!
//!                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
//!     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!    |           Key Tag             |  Algorithm    |  Digest Type  |
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!    /                                                               /
//!    /                            Digest                             /
//!    /                                                               /
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use super::{rdata, read_u16, read_u8};
use crate::rrset::Rrset;

/// The tag of the DNSKEY this DS refers to; 0 on short RDATA
pub fn key_tag(k: &Rrset<'_>, idx: usize) -> u16 {
    read_u16(rdata(k.rr(idx)), 0)
}

/// The algorithm number of the referenced DNSKEY; 0 on short RDATA
pub fn key_algorithm(k: &Rrset<'_>, idx: usize) -> u8 {
    read_u8(rdata(k.rr(idx)), 2)
}

/// The digest type number; 0 on short RDATA
pub fn digest_type(k: &Rrset<'_>, idx: usize) -> u8 {
    read_u8(rdata(k.rr(idx)), 3)
}

/// The digest bytes; empty unless at least one digest byte is present
pub fn digest<'a>(k: &Rrset<'a>, idx: usize) -> &'a [u8] {
    let rd = rdata(k.rr(idx));
    if rd.len() < 5 {
        return &[];
    }
    &rd[4..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rrset::rr_type;

    #[test]
    fn test_fields() {
        // rdlen | keytag 20326 | algo 8 | digest type 2 | digest
        let e: &[u8] = b"\x00\x07\x4f\x66\x08\x02\xde\xad\xbe";
        let entries = [e];
        let k = Rrset::new(b"\x00", rr_type::DS, 1, 1, &entries);

        assert_eq!(key_tag(&k, 0), 20326);
        assert_eq!(key_algorithm(&k, 0), 8);
        assert_eq!(digest_type(&k, 0), 2);
        assert_eq!(digest(&k, 0), b"\xde\xad\xbe");
    }

    #[test]
    fn test_short_rdata_sentinels() {
        // fixed fields present but no digest byte
        let e: &[u8] = b"\x00\x04\x4f\x66\x08\x02";
        let entries = [e];
        let k = Rrset::new(b"\x00", rr_type::DS, 1, 1, &entries);

        assert_eq!(key_tag(&k, 0), 20326);
        assert_eq!(digest(&k, 0), b"");

        let e: &[u8] = b"\x00\x01\x4f";
        let entries = [e];
        let k = Rrset::new(b"\x00", rr_type::DS, 1, 1, &entries);
        assert_eq!(key_tag(&k, 0), 0);
        assert_eq!(digest_type(&k, 0), 0);
    }
}
