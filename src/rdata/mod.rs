// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Field accessors over raw RDATA.
//!
//! Every accessor length-checks before reading and returns a sentinel on
//! short input: `0` for numeric fields, an empty slice for byte fields.
//! Callers treat the sentinel as a malformed record and map it to
//! [`Bogus`](crate::Proof::Bogus); nothing here allocates or panics.

pub mod dnskey;
pub mod ds;
pub mod rrsig;

/// The RDATA of an entry, with the rdlen prefix stripped
pub(crate) fn rdata(entry: &[u8]) -> &[u8] {
    entry.get(2..).unwrap_or(&[])
}

/// A big-endian u16 at `offset`, or 0 on a short read
pub(crate) fn read_u16(rdata: &[u8], offset: usize) -> u16 {
    match rdata.get(offset..offset + 2) {
        Some(b) => u16::from_be_bytes([b[0], b[1]]),
        None => 0,
    }
}

/// A big-endian u32 at `offset`, or 0 on a short read
pub(crate) fn read_u32(rdata: &[u8], offset: usize) -> u32 {
    match rdata.get(offset..offset + 4) {
        Some(b) => u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
        None => 0,
    }
}

/// A single byte at `offset`, or 0 on a short read
pub(crate) fn read_u8(rdata: &[u8], offset: usize) -> u8 {
    rdata.get(offset).copied().unwrap_or(0)
}
