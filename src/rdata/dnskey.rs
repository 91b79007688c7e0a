// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! DNSKEY RDATA accessors
//!
//! [RFC 4034, section 2.1](https://tools.ietf.org/html/rfc4034#section-2.1):
//!
//! ```text
//!  2.1.  DNSKEY RDATA Wire Format
//!
//!     The RDATA for a DNSKEY RR consists of a 2 octet Flags Field, a 1
//!     octet Protocol Field, a 1 octet Algorithm Field, and the Public Key
//!     Field.
//!
//!                          1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
//!      0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//!     +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!     |              Flags            |    Protocol   |   Algorithm   |
//!     +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!     /                                                               /
//!     /                            Public Key                         /
//!     /                                                               /
//!     +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use super::{rdata, read_u16, read_u8};
use crate::rrset::Rrset;

/// Flags bit 7: this key is a zone signing key
pub const ZONE_KEY_FLAG: u16 = 0x0100;

/// The flags field, host order; 0 on short RDATA
pub fn flags(k: &Rrset<'_>, idx: usize) -> u16 {
    read_u16(rdata(k.rr(idx)), 0)
}

/// The protocol field, which RFC 4034 fixes at 3; 0 on short RDATA
pub fn protocol(k: &Rrset<'_>, idx: usize) -> u8 {
    read_u8(rdata(k.rr(idx)), 2)
}

/// The algorithm number; 0 on short RDATA
pub fn algorithm(k: &Rrset<'_>, idx: usize) -> u8 {
    read_u8(rdata(k.rr(idx)), 3)
}

/// The public key material; empty on short RDATA
pub fn public_key<'a>(k: &Rrset<'a>, idx: usize) -> &'a [u8] {
    rdata(k.rr(idx)).get(4..).unwrap_or(&[])
}

/// The 16-bit key tag over the DNSKEY RDATA.
///
/// [RFC 4034, Appendix B](https://tools.ietf.org/html/rfc4034#appendix-B):
/// a ones-complement-free checksum, summing the RDATA as big-endian 16-bit
/// words and folding the carries once.
pub fn key_tag(k: &Rrset<'_>, idx: usize) -> u16 {
    let rd = rdata(k.rr(idx));

    let mut ac: u32 = 0;
    for (i, b) in rd.iter().enumerate() {
        ac += u32::from(*b) << if i & 1 != 0 { 0 } else { 8 };
    }
    ac += ac >> 16;
    (ac & 0xFFFF) as u16
}
