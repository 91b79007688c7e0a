// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! RRSIG RDATA accessors
//!
//! [RFC 4034, section 3.1](https://tools.ietf.org/html/rfc4034#section-3.1):
//!
//! ```text
//! 3.1.  RRSIG RDATA Wire Format
//!
//!                         1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
//!     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!    |        Type Covered           |  Algorithm    |     Labels    |
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!    |                         Original TTL                          |
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!    |                      Signature Expiration                     |
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!    |                      Signature Inception                      |
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!    |            Key Tag            |                               /
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+         Signer's Name         /
//!    /                                                               /
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!    /                                                               /
//!    /                            Signature                          /
//!    /                                                               /
//!    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! All accessors here take the index of a signature within the RRset's RRSIG
//! partition, not a raw entry index.

use super::{rdata, read_u16, read_u32, read_u8};
use crate::rrset::Rrset;

/// Bytes of RRSIG RDATA before the signer name
pub const FIXED_LEN: usize = 18;

/// The type this signature covers; 0 on short RDATA
pub fn type_covered(k: &Rrset<'_>, sig_idx: usize) -> u16 {
    read_u16(rdata(k.sig(sig_idx)), 0)
}

/// The signing algorithm number; 0 on short RDATA
pub fn algorithm(k: &Rrset<'_>, sig_idx: usize) -> u8 {
    read_u8(rdata(k.sig(sig_idx)), 2)
}

/// The label count of the owner name at signing time; 0 on short RDATA
pub fn labels(k: &Rrset<'_>, sig_idx: usize) -> u8 {
    read_u8(rdata(k.sig(sig_idx)), 3)
}

/// The TTL of the covered RRset in the signed zone; 0 on short RDATA
pub fn original_ttl(k: &Rrset<'_>, sig_idx: usize) -> u32 {
    read_u32(rdata(k.sig(sig_idx)), 4)
}

/// Expiration of the validity window, seconds since the epoch mod 2^32; 0 on
/// short RDATA
pub fn expiration(k: &Rrset<'_>, sig_idx: usize) -> u32 {
    read_u32(rdata(k.sig(sig_idx)), 8)
}

/// Inception of the validity window, seconds since the epoch mod 2^32; 0 on
/// short RDATA
pub fn inception(k: &Rrset<'_>, sig_idx: usize) -> u32 {
    read_u32(rdata(k.sig(sig_idx)), 12)
}

/// The tag of the key that produced this signature; 0 on short RDATA
pub fn key_tag(k: &Rrset<'_>, sig_idx: usize) -> u16 {
    read_u16(rdata(k.sig(sig_idx)), 16)
}

/// Everything after the fixed fields: the signer name followed by the
/// signature block, not yet split or validated; empty on short RDATA
pub fn signer_and_signature<'a>(k: &Rrset<'a>, sig_idx: usize) -> &'a [u8] {
    rdata(k.sig(sig_idx)).get(FIXED_LEN..).unwrap_or(&[])
}
