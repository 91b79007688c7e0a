// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Reconstruction of the signed data an RRSIG covers
//!
//! [RFC 4035, section 5.3.2](https://tools.ietf.org/html/rfc4035#section-5.3.2):
//!
//! ```text
//! 5.3.2.  Reconstructing the Signed Data
//!
//!    Once the RRSIG RR has met the validity requirements described in
//!    Section 5.3.1, the validator has to reconstruct the original signed
//!    data.  The original signed data includes RRSIG RDATA (excluding the
//!    Signature field) and the canonical form of the RRset.  Aside from
//!    being ordered, the canonical form of the RRset might also differ from
//!    the received RRset due to DNS name compression, decremented TTLs, or
//!    wildcard expansion.
//! ```

use crate::buffer::Buffer;
use crate::name;
use crate::proof::{Proof, ProofError, ProofErrorKind};
use crate::rdata::{rdata, rrsig};
use crate::rrset::{rr_type, Rrset};

/// Indices of the data RRs in canonical order, bitwise duplicates removed.
///
/// [RFC 4034, section 6.3](https://tools.ietf.org/html/rfc4034#section-6.3):
/// RRs are sorted by treating the RDATA as a left-justified unsigned octet
/// sequence, the absent octet sorting before a zero. Only the index vector
/// is rearranged; the record bytes stay where the caller put them.
fn canonical_order(rrset: &Rrset<'_>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rrset.count()).collect();
    order.sort_by(|&a, &b| rdata(rrset.rr(a)).cmp(rdata(rrset.rr(b))));
    order.dedup_by(|&mut a, &mut b| rdata(rrset.rr(a)) == rdata(rrset.rr(b)));
    order
}

/// Write the canonical owner name for the covered RRset, lowercased, at the
/// buffer cursor and return its span.
///
/// ```text
/// RFC 4035, section 5.3.2:
///            To calculate the name:
///               let rrsig_labels = the value of the RRSIG Labels field
///
///               let fqdn = RRset's fully qualified domain name in
///                               canonical form
///
///               let fqdn_labels = Label count of the fqdn above.
///
///               if rrsig_labels = fqdn_labels,
///                   name = fqdn
///
///               if rrsig_labels < fqdn_labels,
///                  name = "*." | the rightmost rrsig_label labels of the
///                                fqdn
///
///               if rrsig_labels > fqdn_labels
///                  the RRSIG RR did not pass the necessary validation
///                  checks and MUST NOT be used to authenticate this
///                  RRset.
/// ```
fn write_canonical_owner(
    buf: &mut Buffer,
    rrset: &Rrset<'_>,
    rrsig_labels: u8,
) -> Result<(usize, usize), ProofError> {
    let owner = rrset.owner();
    let fqdn_labels = name::label_count(owner);
    let rrsig_labels = usize::from(rrsig_labels);
    let start = buf.position();

    if rrsig_labels == fqdn_labels {
        buf.write(owner);
    } else if rrsig_labels < fqdn_labels {
        let mut rightmost = owner;
        for _ in 0..fqdn_labels - rrsig_labels {
            rightmost = name::strip_label(rightmost);
        }
        buf.write(b"\x01*");
        buf.write(rightmost);
    } else {
        return Err(ProofError::new(
            Proof::Bogus,
            ProofErrorKind::ExcessLabels {
                rrsig: rrsig_labels as u8,
                owner: fqdn_labels,
            },
        ));
    }

    let len = buf.position() - start;
    name::lowercase(buf.region_mut(start, len));
    Ok((start, len))
}

/// Build the byte stream covered by one RRSIG into the scratch buffer.
///
/// `sig_header` is the RRSIG RDATA through the signer name, rdlen prefix
/// stripped, so at least [`rrsig::FIXED_LEN`] bytes; the caller has already
/// bounds-checked it.
///
/// ```text
/// RFC 4035, section 5.3.2:
///    signed_data = RRSIG_RDATA | RR(1) | RR(2)...  where
///
///       "|" denotes concatenation
///
///       RRSIG_RDATA is the wire format of the RRSIG RDATA fields
///          with the Signature field excluded and the Signer's Name
///          in canonical form.
///
///       RR(i) = name | type | class | OrigTTL | RDATA length | RDATA
/// ```
pub(crate) fn signed_data(
    buf: &mut Buffer,
    rrset: &Rrset<'_>,
    sig_header: &[u8],
) -> Result<(), ProofError> {
    let order = canonical_order(rrset);

    buf.clear();
    buf.write(sig_header);
    // canonicalize the signer name
    name::lowercase(buf.region_mut(rrsig::FIXED_LEN, sig_header.len() - rrsig::FIXED_LEN));

    let rrsig_labels = sig_header[3];
    let mut owner_span = None;
    for idx in order {
        // the canonical owner is the same for every RR, synthesize it once
        match owner_span {
            Some((start, len)) => buf.append_from_within(start, len),
            None => owner_span = Some(write_canonical_owner(buf, rrset, rrsig_labels)?),
        }
        buf.write(rrset.rrtype_wire());
        buf.write(rrset.class_wire());
        // OrigTTL is the value from the RRSIG Original TTL field
        buf.write(&sig_header[4..8]);

        let entry = rrset.rr(idx);
        let rr_start = buf.position();
        buf.write(entry);
        canonicalize_rdata(buf.region_mut(rr_start, entry.len()), rrset.rrtype());
    }
    Ok(())
}

/// Lowercase the domain names embedded in one record's RDATA, in place in
/// the scratch copy.
///
/// `entry` is the `<u16 rdlen><rdata>` bytes just written to the buffer.
/// Only the types listed in RFC 4034, section 6.2 (as updated by RFC 6840)
/// carry names subject to case folding; anything else passes through
/// untouched, as does RDATA too short to hold the fields being skipped.
fn canonicalize_rdata(entry: &mut [u8], rrtype: u16) {
    let Some(rd) = entry.get_mut(2..) else {
        return;
    };

    match rrtype {
        // a single name at the start of the RDATA
        rr_type::NS
        | rr_type::MD
        | rr_type::MF
        | rr_type::CNAME
        | rr_type::MB
        | rr_type::MG
        | rr_type::MR
        | rr_type::PTR
        | rr_type::DNAME
        | rr_type::NXT
        | rr_type::NSEC => name::lowercase(rd),

        // two names after another
        rr_type::SOA | rr_type::MINFO | rr_type::RP => lowercase_adjacent_names(rd),

        // 16-bit preference, then a name
        rr_type::MX | rr_type::RT | rr_type::AFSDB | rr_type::KX => {
            if rd.len() < 3 {
                return;
            }
            name::lowercase(&mut rd[2..]);
        }

        // priority, weight, and port, then the target name
        rr_type::SRV => {
            if rd.len() < 7 {
                return;
            }
            name::lowercase(&mut rd[6..]);
        }

        // preference, then two names after another
        rr_type::PX => {
            if rd.len() < 3 {
                return;
            }
            lowercase_adjacent_names(&mut rd[2..]);
        }

        // fixed fields, then the signer name
        rr_type::SIG | rr_type::RRSIG => {
            if rd.len() < rrsig::FIXED_LEN + 1 {
                return;
            }
            name::lowercase(&mut rd[rrsig::FIXED_LEN..]);
        }

        // two character-strings
        rr_type::HINFO => {
            let Some(next) = lowercase_text_field(rd, 0) else {
                return;
            };
            lowercase_text_field(rd, next);
        }

        // order and preference, three character-strings, then the
        // replacement name
        rr_type::NAPTR => {
            if rd.len() < 4 {
                return;
            }
            let mut pos = 4;
            for _ in 0..3 {
                let Some(&len) = rd.get(pos) else { return };
                let end = pos + 1 + usize::from(len);
                if end > rd.len() {
                    return;
                }
                pos = end;
            }
            if pos >= rd.len() {
                return;
            }
            name::lowercase(&mut rd[pos..]);
        }

        // nothing to do for other types
        _ => {}
    }
}

/// Lowercase two adjacent wire names, the second found by walking past the
/// first; a malformed first name leaves the rest alone.
fn lowercase_adjacent_names(rd: &mut [u8]) {
    name::lowercase(rd);
    if let Some(first_len) = name::valid_len(rd) {
        name::lowercase(&mut rd[first_len..]);
    }
}

/// Lowercase the length-prefixed character-string at `pos`, returning the
/// offset just past it; `None` if it does not fit.
fn lowercase_text_field(rd: &mut [u8], pos: usize) -> Option<usize> {
    let &len = rd.get(pos)?;
    let end = pos + 1 + usize::from(len);
    if end > rd.len() {
        return None;
    }
    rd[pos + 1..end].make_ascii_lowercase();
    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{entry, rrsig_header, wire_name};

    fn canon(rrtype: u16, rdata: &[u8]) -> Vec<u8> {
        let mut e = entry(rdata);
        canonicalize_rdata(&mut e, rrtype);
        e[2..].to_vec()
    }

    #[test]
    fn test_canonical_order_sorts_and_dedups() {
        let e1 = entry(b"bbb");
        let e2 = entry(b"aaa");
        let e3 = entry(b"aaa");
        let e4 = entry(b"aa");
        let entries: Vec<&[u8]> = vec![&e1, &e2, &e3, &e4];
        let rrset = Rrset::new(b"\x03nub\x00", rr_type::TXT, 1, 4, &entries);

        // shorter prefix first, duplicates collapsed, first occurrence kept
        assert_eq!(canonical_order(&rrset), vec![3, 1, 0]);
    }

    #[test]
    fn test_signed_data_layout() {
        let owner = wire_name("www.example.com.");
        let a1 = entry(&[192, 0, 2, 2]);
        let a2 = entry(&[192, 0, 2, 1]);
        let entries: Vec<&[u8]> = vec![&a1, &a2];
        let rrset = Rrset::new(&owner, rr_type::A, 1, 2, &entries);
        let header = rrsig_header(rr_type::A, 8, 3, 3600, 100, 50, 11, "example.com.");

        let mut buf = Buffer::new();
        signed_data(&mut buf, &rrset, &header).unwrap();

        let mut expect = header.clone();
        for addr in [&a2, &a1] {
            expect.extend_from_slice(&owner);
            expect.extend_from_slice(&[0, 1, 0, 1]); // type A, class IN
            expect.extend_from_slice(&3600u32.to_be_bytes());
            expect.extend_from_slice(addr);
        }
        assert_eq!(buf.as_slice(), &expect[..]);
    }

    #[test]
    fn test_signed_data_idempotent() {
        let owner = wire_name("a.b.wc.example.");
        let r1 = entry(b"\x02zz");
        let r2 = entry(b"\x01a");
        let entries: Vec<&[u8]> = vec![&r1, &r2];
        let rrset = Rrset::new(&owner, rr_type::TXT, 1, 2, &entries);
        let header = rrsig_header(rr_type::TXT, 8, 2, 60, 100, 50, 11, "example.");

        let mut buf = Buffer::new();
        signed_data(&mut buf, &rrset, &header).unwrap();
        let first = buf.as_slice().to_vec();
        signed_data(&mut buf, &rrset, &header).unwrap();
        assert_eq!(buf.as_slice(), &first[..]);
    }

    #[test]
    fn test_wildcard_owner_synthesis() {
        let owner = wire_name("a.b.wc.example.");
        let r = entry(b"\x01x");
        let entries: Vec<&[u8]> = vec![&r];
        let rrset = Rrset::new(&owner, rr_type::TXT, 1, 1, &entries);
        let header = rrsig_header(rr_type::TXT, 8, 2, 60, 100, 50, 11, "example.");

        let mut buf = Buffer::new();
        signed_data(&mut buf, &rrset, &header).unwrap();

        let canonical_owner = b"\x01*\x02wc\x07example\x00";
        assert_eq!(
            &buf.as_slice()[header.len()..header.len() + canonical_owner.len()],
            canonical_owner
        );
    }

    #[test]
    fn test_owner_and_signer_lowered() {
        let owner = wire_name("WWW.Example.COM.");
        let r = entry(b"\x01x");
        let entries: Vec<&[u8]> = vec![&r];
        let rrset = Rrset::new(&owner, rr_type::TXT, 1, 1, &entries);
        let header = rrsig_header(rr_type::TXT, 8, 3, 60, 100, 50, 11, "Example.COM.");

        let mut buf = Buffer::new();
        signed_data(&mut buf, &rrset, &header).unwrap();

        let out = buf.as_slice();
        let signer = &out[rrsig::FIXED_LEN..header.len()];
        assert_eq!(signer, wire_name("example.com."));
        assert_eq!(
            &out[header.len()..header.len() + owner.len()],
            &wire_name("www.example.com.")[..]
        );
    }

    #[test]
    fn test_excess_labels_is_structural() {
        let owner = wire_name("example.");
        let r = entry(b"\x01x");
        let entries: Vec<&[u8]> = vec![&r];
        let rrset = Rrset::new(&owner, rr_type::TXT, 1, 1, &entries);
        let header = rrsig_header(rr_type::TXT, 8, 3, 60, 100, 50, 11, "example.");

        let mut buf = Buffer::new();
        let err = signed_data(&mut buf, &rrset, &header).unwrap_err();
        assert_eq!(err.proof(), Proof::Bogus);
    }

    #[test]
    fn test_single_name_rdata() {
        assert_eq!(
            canon(rr_type::NS, &wire_name("NS1.Example.")),
            wire_name("ns1.example.")
        );
        assert_eq!(
            canon(rr_type::CNAME, &wire_name("Alias.Example.")),
            wire_name("alias.example.")
        );
    }

    #[test]
    fn test_soa_rdata() {
        let mut rd = Vec::new();
        rd.extend_from_slice(&wire_name("NS1.Example."));
        rd.extend_from_slice(&wire_name("Admin.Example."));
        rd.extend_from_slice(&[0u8; 20]); // serial through minimum

        let mut expect = Vec::new();
        expect.extend_from_slice(&wire_name("ns1.example."));
        expect.extend_from_slice(&wire_name("admin.example."));
        expect.extend_from_slice(&[0u8; 20]);

        assert_eq!(canon(rr_type::SOA, &rd), expect);
    }

    #[test]
    fn test_mx_and_srv_skip_fixed_fields() {
        let mut mx = vec![0, 10];
        mx.extend_from_slice(&wire_name("Mail.Example."));
        let mut expect = vec![0, 10];
        expect.extend_from_slice(&wire_name("mail.example."));
        assert_eq!(canon(rr_type::MX, &mx), expect);

        let mut srv = vec![0, 1, 0, 2, 0, 53];
        srv.extend_from_slice(&wire_name("Host.Example."));
        let mut expect = vec![0, 1, 0, 2, 0, 53];
        expect.extend_from_slice(&wire_name("host.example."));
        assert_eq!(canon(rr_type::SRV, &srv), expect);

        // too short to hold the fixed part: untouched
        assert_eq!(canon(rr_type::MX, b"\x00Z"), b"\x00Z");
        assert_eq!(canon(rr_type::SRV, b"\x00\x01ABC"), b"\x00\x01ABC");
    }

    #[test]
    fn test_rrsig_rdata_signer_lowered() {
        let rd = rrsig_header(rr_type::A, 8, 2, 60, 100, 50, 11, "Example.COM.");
        let out = canon(rr_type::RRSIG, &rd);
        assert_eq!(&out[..rrsig::FIXED_LEN], &rd[..rrsig::FIXED_LEN]);
        assert_eq!(&out[rrsig::FIXED_LEN..], &wire_name("example.com.")[..]);
    }

    #[test]
    fn test_hinfo_text_fields() {
        assert_eq!(canon(rr_type::HINFO, b"\x03CPU\x04UNIX"), b"\x03cpu\x04unix");
        // truncated second field: first lowered, second untouched
        assert_eq!(canon(rr_type::HINFO, b"\x03CPU\x09UN"), b"\x03cpu\x09UN");
        // truncated first field: nothing happens
        assert_eq!(canon(rr_type::HINFO, b"\x09CP"), b"\x09CP");
    }

    #[test]
    fn test_naptr_replacement() {
        let mut rd = vec![0, 1, 0, 2]; // order, preference
        rd.extend_from_slice(b"\x01S"); // flags
        rd.extend_from_slice(b"\x07SIP+D2U"); // services
        rd.extend_from_slice(b"\x00"); // regexp
        rd.extend_from_slice(&wire_name("Gw.Example."));

        let out = canon(rr_type::NAPTR, &rd);
        // character-strings are skipped, not folded; the replacement is
        let text_end = rd.len() - wire_name("Gw.Example.").len();
        assert_eq!(&out[..text_end], &rd[..text_end]);
        assert_eq!(&out[text_end..], &wire_name("gw.example.")[..]);

        // replacement missing entirely: untouched
        let short = &rd[..text_end];
        assert_eq!(canon(rr_type::NAPTR, short), short);
    }

    #[test]
    fn test_unlisted_types_pass_through() {
        assert_eq!(canon(rr_type::TXT, b"\x04ABCD"), b"\x04ABCD");
        assert_eq!(canon(rr_type::A, &[192, 0, 2, 1]), [192, 0, 2, 1]);
        assert_eq!(canon(rr_type::DNSKEY, b"\x01\x01\x03\x08AB"), b"\x01\x01\x03\x08AB");
    }
}
