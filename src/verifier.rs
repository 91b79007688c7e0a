// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Verification of RRsets against DNSKEY sets, and of DNSKEYs against DS
//! records
//!
//! The entry points here bridge wire-format record data and crypto calls:
//! they check every RRSIG field that can be checked without cryptography,
//! reconstruct the canonical signed data, and only then spend cycles in the
//! backend. Multiple signatures and multiple keys are tried in index order
//! and the first full verification wins.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::buffer::Buffer;
use crate::crypto::{constant_time_eq, Crypto, VerifyOutcome};
use crate::digest_type::DigestType;
use crate::name;
use crate::proof::{Proof, ProofError, ProofErrorKind};
use crate::rdata::{dnskey, ds, rdata, rrsig};
use crate::ring::RingCrypto;
use crate::rrset::Rrset;
use crate::serial::SerialNumber;
use crate::tbs;

/// Per-thread verification environment.
///
/// Owns the scratch buffer that canonical reconstruction and digest input
/// are built in, and the crypto provider. The buffer is exclusively borrowed
/// for the duration of each call and its contents are garbage in between, so
/// one `Env` must not be shared between concurrent verifications; the RRsets
/// and keys being verified may be.
pub struct Env {
    scratch: Buffer,
    crypto: Arc<dyn Crypto>,
    /// Refuse DNSKEYs without the Zone Key flag. On by default; this field
    /// is the single point where that policy is decided.
    pub zone_key_required: bool,
}

impl Env {
    /// An environment using the given crypto provider
    pub fn new(crypto: Arc<dyn Crypto>) -> Self {
        Self {
            scratch: Buffer::with_capacity(512),
            crypto,
            zone_key_required: true,
        }
    }
}

impl Default for Env {
    /// An environment backed by [`RingCrypto`]
    fn default() -> Self {
        Self::new(Arc::new(RingCrypto))
    }
}

/// The validator's notion of the current time.
///
/// RRSIG validity fields are 32-bit serial numbers; so is this. The override
/// is honored verbatim when set, for deterministic tests and operational
/// pinning.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clock {
    /// Replaces the system time completely when set
    pub now_override: Option<u32>,
}

impl Clock {
    /// A clock pinned to `now`
    pub fn fixed(now: u32) -> Self {
        Self {
            now_override: Some(now),
        }
    }

    /// Seconds since the epoch, modulo 2^32
    pub fn now(&self) -> u32 {
        match self.now_override {
            Some(now) => now,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_secs() as u32)
                .unwrap_or_default(),
        }
    }
}

/// Whether the digest in DS record `ds_idx` matches DNSKEY `dnskey_idx`.
///
/// [RFC 4034, section 5.1.4](https://tools.ietf.org/html/rfc4034#section-5.1.4):
///
/// ```text
/// 5.1.4.  The Digest Field
///
///    The digest is calculated by concatenating the canonical form of the
///    fully qualified owner name of the DNSKEY RR with the DNSKEY RDATA,
///    and then applying the digest algorithm.
///
///      digest = digest_algorithm( DNSKEY owner name | DNSKEY RDATA);
///
///       "|" denotes concatenation
///
///      DNSKEY RDATA = Flags | Protocol | Algorithm | Public Key.
/// ```
///
/// False when the digest differs, the DS digest length is inconsistent with
/// its digest type, or the digest type is unsupported.
pub fn ds_digest_match_dnskey(
    env: &mut Env,
    dnskey_rrset: &Rrset<'_>,
    dnskey_idx: usize,
    ds_rrset: &Rrset<'_>,
    ds_idx: usize,
) -> bool {
    let Env {
        scratch, crypto, ..
    } = env;

    let Some(digest_type) = DigestType::from_u8(ds::digest_type(ds_rrset, ds_idx)) else {
        return false; // not supported, or DS RR format error
    };
    let Some(digest_len) = crypto.digest_size(digest_type) else {
        return false;
    };

    // check digest length in DS against the length from the hash function
    let ds_digest = ds::digest(ds_rrset, ds_idx);
    if ds_digest.len() != digest_len {
        return false; // DS algorithm and digest do not match
    }

    scratch.clear();
    let owner = dnskey_rrset.owner();
    scratch.write(owner);
    name::lowercase(scratch.region_mut(0, owner.len()));
    scratch.write(rdata(dnskey_rrset.rr(dnskey_idx)));

    let Some(computed) = crypto.digest(digest_type, scratch.as_slice()) else {
        return false;
    };
    constant_time_eq(&computed, ds_digest)
}

/// Whether the digest type of DS record `ds_idx` can be computed at all
pub fn ds_digest_algo_is_supported(env: &Env, ds_rrset: &Rrset<'_>, ds_idx: usize) -> bool {
    DigestType::from_u8(ds::digest_type(ds_rrset, ds_idx))
        .and_then(|digest_type| env.crypto.digest_size(digest_type))
        .is_some()
}

/// Whether the key algorithm named by DS record `ds_idx` is verifiable
pub fn ds_key_algo_is_supported(env: &Env, ds_rrset: &Rrset<'_>, ds_idx: usize) -> bool {
    env.crypto
        .supports_algorithm(Algorithm::from_u8(ds::key_algorithm(ds_rrset, ds_idx)))
}

/// Whether the algorithm of DNSKEY `dnskey_idx` is verifiable
pub fn dnskey_algo_is_supported(env: &Env, dnskey_rrset: &Rrset<'_>, dnskey_idx: usize) -> bool {
    env.crypto
        .supports_algorithm(Algorithm::from_u8(dnskey::algorithm(
            dnskey_rrset,
            dnskey_idx,
        )))
}

/// The key tag of DNSKEY `dnskey_idx`, per RFC 4034 Appendix B
pub fn dnskey_calc_keytag(dnskey_rrset: &Rrset<'_>, dnskey_idx: usize) -> u16 {
    dnskey::key_tag(dnskey_rrset, dnskey_idx)
}

/// The flags field of DNSKEY `dnskey_idx`; 0 when the record is too short
pub fn dnskey_get_flags(dnskey_rrset: &Rrset<'_>, dnskey_idx: usize) -> u16 {
    dnskey::flags(dnskey_rrset, dnskey_idx)
}

/// The algorithm number of DNSKEY `dnskey_idx`; 0 when the record is too
/// short
pub fn dnskey_get_algo(dnskey_rrset: &Rrset<'_>, dnskey_idx: usize) -> u8 {
    dnskey::algorithm(dnskey_rrset, dnskey_idx)
}

/// The key tag field of DS record `ds_idx`; 0 when the record is too short
pub fn ds_get_keytag(ds_rrset: &Rrset<'_>, ds_idx: usize) -> u16 {
    ds::key_tag(ds_rrset, ds_idx)
}

/// The key algorithm number of DS record `ds_idx`; 0 when the record is too
/// short
pub fn ds_get_key_algo(ds_rrset: &Rrset<'_>, ds_idx: usize) -> u8 {
    ds::key_algorithm(ds_rrset, ds_idx)
}

/// Verify an RRset against a DNSKEY set.
///
/// Tries every RRSIG in the set against every key matching its key tag and
/// algorithm; any single full verification makes the RRset [`Proof::Secure`].
pub fn dnskeyset_verify_rrset(
    env: &mut Env,
    clock: &Clock,
    rrset: &Rrset<'_>,
    dnskey_rrset: &Rrset<'_>,
) -> Proof {
    let num = rrset.rrsig_count();
    if num == 0 {
        debug!("rrset failed to verify due to a lack of signatures");
        return Proof::Bogus;
    }
    for sig_idx in 0..num {
        if dnskeyset_verify_rrset_sig(env, clock, rrset, dnskey_rrset, sig_idx).is_secure() {
            return Proof::Secure;
        }
    }
    debug!("rrset failed to verify: all signatures are bogus");
    Proof::Bogus
}

/// Verify an RRset against one DNSKEY.
///
/// Like [`dnskeyset_verify_rrset`], but every signature is tried against the
/// single key at `dnskey_idx`.
pub fn dnskey_verify_rrset(
    env: &mut Env,
    clock: &Clock,
    rrset: &Rrset<'_>,
    dnskey_rrset: &Rrset<'_>,
    dnskey_idx: usize,
) -> Proof {
    let num = rrset.rrsig_count();
    if num == 0 {
        debug!("rrset failed to verify due to a lack of signatures");
        return Proof::Bogus;
    }
    for sig_idx in 0..num {
        if dnskey_verify_rrset_sig(env, clock, rrset, dnskey_rrset, dnskey_idx, sig_idx)
            .is_secure()
        {
            return Proof::Secure;
        }
    }
    debug!("rrset failed to verify: all signatures are bogus");
    Proof::Bogus
}

/// Verify one RRSIG of an RRset against a DNSKEY set.
///
/// Keys whose algorithm or computed key tag do not match the signature are
/// skipped; 16-bit tags collide, so several keys may be tried before one
/// verifies.
pub fn dnskeyset_verify_rrset_sig(
    env: &mut Env,
    clock: &Clock,
    rrset: &Rrset<'_>,
    dnskey_rrset: &Rrset<'_>,
    sig_idx: usize,
) -> Proof {
    let tag = rrsig::key_tag(rrset, sig_idx);
    let algo = rrsig::algorithm(rrset, sig_idx);
    let mut numchecked = 0;

    for dnskey_idx in 0..dnskey_rrset.count() {
        // see if the key matches the keytag and algo
        if dnskey::algorithm(dnskey_rrset, dnskey_idx) != algo
            || dnskey::key_tag(dnskey_rrset, dnskey_idx) != tag
        {
            continue;
        }
        numchecked += 1;

        // see if key verifies
        if dnskey_verify_rrset_sig(env, clock, rrset, dnskey_rrset, dnskey_idx, sig_idx)
            .is_secure()
        {
            return Proof::Secure;
        }
    }

    if numchecked == 0 {
        debug!("could not find appropriate key for tag {tag} algo {algo}");
    }
    Proof::Bogus
}

/// Verify one RRSIG of an RRset against one DNSKEY.
pub fn dnskey_verify_rrset_sig(
    env: &mut Env,
    clock: &Clock,
    rrset: &Rrset<'_>,
    dnskey_rrset: &Rrset<'_>,
    dnskey_idx: usize,
    sig_idx: usize,
) -> Proof {
    match verify_sig_with_key(env, clock, rrset, dnskey_rrset, dnskey_idx, sig_idx) {
        Ok(()) => {
            debug!(
                "verified rrset type {} with dnskey tag {}",
                rrset.rrtype(),
                dnskey::key_tag(dnskey_rrset, dnskey_idx)
            );
            Proof::Secure
        }
        Err(err) => {
            debug!("verify: {}", err.kind());
            err.proof()
        }
    }
}

/// The precondition ladder and crypto call behind
/// [`dnskey_verify_rrset_sig`], with the reason for any failure.
fn verify_sig_with_key(
    env: &mut Env,
    clock: &Clock,
    rrset: &Rrset<'_>,
    dnskey_rrset: &Rrset<'_>,
    dnskey_idx: usize,
    sig_idx: usize,
) -> Result<(), ProofError> {
    let sig = rrset.sig(sig_idx);
    // min length of rdatalen, fixed rrsig fields, root signer, 1 byte sig
    if sig.len() < 2 + rrsig::FIXED_LEN + 1 + 1 {
        return Err(bogus(ProofErrorKind::SignatureTooShort { len: sig.len() }));
    }
    let rd = &sig[2..];

    if env.zone_key_required
        && (dnskey::flags(dnskey_rrset, dnskey_idx) & dnskey::ZONE_KEY_FLAG) == 0
    {
        return Err(bogus(ProofErrorKind::NotZoneKey {
            key_tag: dnskey::key_tag(dnskey_rrset, dnskey_idx),
        }));
    }

    // verify as many fields in the rrsig as possible before the crypto
    let signer_and_sig = &rd[rrsig::FIXED_LEN..];
    let Some(signer_len) = name::valid_len(signer_and_sig) else {
        return Err(bogus(ProofErrorKind::BadSignerName));
    };
    let (signer, signature) = signer_and_sig.split_at(signer_len);
    if signature.is_empty() {
        return Err(bogus(ProofErrorKind::MissingSignatureData));
    }

    // the key's owner name must be the zone that produced the signature
    if !name::eq_ignore_case(signer, dnskey_rrset.owner()) {
        return Err(bogus(ProofErrorKind::SignerMismatch));
    }

    // covered type, in network order on both sides
    if rd[0..2] != rrset.rrtype_wire()[..] {
        return Err(bogus(ProofErrorKind::WrongTypeCovered {
            covered: u16::from_be_bytes([rd[0], rd[1]]),
            rrtype: rrset.rrtype(),
        }));
    }

    let key_algo = dnskey::algorithm(dnskey_rrset, dnskey_idx);
    if rd[2] != key_algo {
        return Err(bogus(ProofErrorKind::AlgorithmMismatch {
            rrsig: Algorithm::from_u8(rd[2]),
            dnskey: Algorithm::from_u8(key_algo),
        }));
    }

    let key_tag = dnskey::key_tag(dnskey_rrset, dnskey_idx);
    if rd[16..18] != key_tag.to_be_bytes() {
        return Err(bogus(ProofErrorKind::KeyTagMismatch {
            rrsig: u16::from_be_bytes([rd[16], rd[17]]),
            dnskey: key_tag,
        }));
    }

    let owner_labels = name::label_count(rrset.owner());
    if usize::from(rd[3]) > owner_labels {
        return Err(bogus(ProofErrorKind::ExcessLabels {
            rrsig: rd[3],
            owner: owner_labels,
        }));
    }

    // original ttl, always ok

    let expiration = u32::from_be_bytes([rd[8], rd[9], rd[10], rd[11]]);
    let inception = u32::from_be_bytes([rd[12], rd[13], rd[14], rd[15]]);
    check_dates(clock, expiration, inception)?;

    // create the rrset canonical form in the scratch buffer, ready for the
    // signature
    let sig_header = &rd[..rrsig::FIXED_LEN + signer_len];
    let Env {
        scratch, crypto, ..
    } = env;
    tbs::signed_data(scratch, rrset, sig_header)?;

    let algorithm = Algorithm::from_u8(key_algo);
    let public_key = dnskey::public_key(dnskey_rrset, dnskey_idx);
    match crypto.verify(algorithm, public_key, scratch.as_slice(), signature) {
        VerifyOutcome::Valid => Ok(()),
        VerifyOutcome::Invalid => Err(bogus(ProofErrorKind::SignatureInvalid { algorithm })),
        VerifyOutcome::Unsupported => Err(ProofError::new(
            Proof::Unchecked,
            ProofErrorKind::UnsupportedAlgorithm { algorithm },
        )),
        VerifyOutcome::Failed => {
            Err(ProofError::new(Proof::Unchecked, ProofErrorKind::CryptoFailure))
        }
    }
}

/// The RRSIG validity window, under serial number arithmetic.
///
/// [RFC 4034, section 3.1.5](https://tools.ietf.org/html/rfc4034#section-3.1.5):
/// the expiration and inception fields specify a validity period, and all
/// comparisons involving them MUST use serial number arithmetic.
fn check_dates(clock: &Clock, expiration: u32, inception: u32) -> Result<(), ProofError> {
    if let Some(now) = clock.now_override {
        debug!("date override option {now}");
    }
    let now = SerialNumber(clock.now());
    let expiration = SerialNumber(expiration);
    let inception = SerialNumber(inception);

    if inception > expiration {
        return Err(bogus(ProofErrorKind::InceptionAfterExpiration));
    }
    if now < inception {
        return Err(bogus(ProofErrorKind::SignatureNotYetValid {
            inception: inception.get(),
            now: now.get(),
        }));
    }
    if now > expiration {
        return Err(bogus(ProofErrorKind::SignatureExpired {
            expiration: expiration.get(),
            now: now.get(),
        }));
    }
    Ok(())
}

fn bogus(kind: ProofErrorKind) -> ProofError {
    ProofError::new(Proof::Bogus, kind)
}
