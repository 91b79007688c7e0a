// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Builders for wire-format test data

/// Wire encoding of a dotted name; `"."` or `""` is the root
pub(crate) fn wire_name(dotted: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in dotted.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// An RRset entry: `<u16 rdlen><rdata>`
pub(crate) fn entry(rdata: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + rdata.len());
    out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    out.extend_from_slice(rdata);
    out
}

/// DNSKEY RDATA with the protocol field fixed at 3
pub(crate) fn dnskey_rdata(flags: u16, algorithm: u8, public_key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + public_key.len());
    out.extend_from_slice(&flags.to_be_bytes());
    out.push(3);
    out.push(algorithm);
    out.extend_from_slice(public_key);
    out
}

/// RRSIG RDATA up to and including the signer name
#[allow(clippy::too_many_arguments)]
pub(crate) fn rrsig_header(
    type_covered: u16,
    algorithm: u8,
    labels: u8,
    original_ttl: u32,
    expiration: u32,
    inception: u32,
    key_tag: u16,
    signer: &str,
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&type_covered.to_be_bytes());
    out.push(algorithm);
    out.push(labels);
    out.extend_from_slice(&original_ttl.to_be_bytes());
    out.extend_from_slice(&expiration.to_be_bytes());
    out.extend_from_slice(&inception.to_be_bytes());
    out.extend_from_slice(&key_tag.to_be_bytes());
    out.extend_from_slice(&wire_name(signer));
    out
}

/// Complete RRSIG RDATA
#[allow(clippy::too_many_arguments)]
pub(crate) fn rrsig_rdata(
    type_covered: u16,
    algorithm: u8,
    labels: u8,
    original_ttl: u32,
    expiration: u32,
    inception: u32,
    key_tag: u16,
    signer: &str,
    signature: &[u8],
) -> Vec<u8> {
    let mut out = rrsig_header(
        type_covered,
        algorithm,
        labels,
        original_ttl,
        expiration,
        inception,
        key_tag,
        signer,
    );
    out.extend_from_slice(signature);
    out
}

/// DS RDATA
pub(crate) fn ds_rdata(key_tag: u16, algorithm: u8, digest_type: u8, digest: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + digest.len());
    out.extend_from_slice(&key_tag.to_be_bytes());
    out.push(algorithm);
    out.push(digest_type);
    out.extend_from_slice(digest);
    out
}

/// Base64 with embedded whitespace tolerated, for key and signature material
pub(crate) fn base64(data: &str) -> Vec<u8> {
    let compact: String = data.split_whitespace().collect();
    data_encoding::BASE64
        .decode(compact.as_bytes())
        .expect("invalid base64 test vector")
}
