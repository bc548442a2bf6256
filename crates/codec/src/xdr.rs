//! crates/codec/src/xdr.rs
//!
//! Binary wire format stored in the `nfs4_acl_xdr` extended attribute.
//!
//! All fields are big-endian `u32` values with no padding:
//!
//! ```text
//! header:  aclflags, ace_count
//! per ACE: type, flag, iflag, access_mask, who
//! ```
//!
//! When `iflag` carries [`ACEI4_SPECIAL_WHO`], `who` is one of the
//! `ACE4_SPECIAL_*` sentinels instead of a numeric id.

use acl::{
    ACL_MAX_ACES, AccessMask, Ace, AceFlags, AceType, Acl, AclError, AclFlags, AclResult,
    Principal,
};

use crate::debug_codec::{trace_xdr_decoded, trace_xdr_encoded, trace_xdr_rejected};

/// Size of the `{aclflags, ace_count}` header.
pub const XDR_HEADER_SIZE: usize = 8;
/// Size of one encoded ACE record.
pub const XDR_ACE_SIZE: usize = 20;
/// `iflag` bit marking a well-known principal.
pub const ACEI4_SPECIAL_WHO: u32 = 0x1;
/// Sentinel `who` value for `owner@`.
pub const ACE4_SPECIAL_OWNER: u32 = 1;
/// Sentinel `who` value for `group@`.
pub const ACE4_SPECIAL_GROUP: u32 = 2;
/// Sentinel `who` value for `everyone@`.
pub const ACE4_SPECIAL_EVERYONE: u32 = 3;

/// Returns the payload size for `count` entries.
#[must_use]
pub const fn encoded_len(count: usize) -> usize {
    XDR_HEADER_SIZE + XDR_ACE_SIZE * count
}

/// Returns the entry count implied by a payload of `len` bytes, or `None`
/// when `len` is not `8 + 20 * n`.
#[must_use]
pub const fn ace_count_for_len(len: usize) -> Option<usize> {
    if len < XDR_HEADER_SIZE || (len - XDR_HEADER_SIZE) % XDR_ACE_SIZE != 0 {
        None
    } else {
        Some((len - XDR_HEADER_SIZE) / XDR_ACE_SIZE)
    }
}

fn words(bytes: &[u8]) -> impl Iterator<Item = u32> + '_ {
    bytes
        .chunks_exact(4)
        .map(|w| u32::from_be_bytes([w[0], w[1], w[2], w[3]]))
}

// Named ids above i32::MAX would alias the negative range reserved for
// special principals, so they are refused rather than wrapped.
fn principal_from_wire(iflag: u32, who: u32) -> AclResult<Principal> {
    if iflag & ACEI4_SPECIAL_WHO == 0 {
        return i32::try_from(who).map(Principal::Named).map_err(|_| {
            AclError::InvalidPrincipal(format!("named id {who} is outside 0..=2147483647"))
        });
    }
    match who {
        ACE4_SPECIAL_OWNER => Ok(Principal::Owner),
        ACE4_SPECIAL_GROUP => Ok(Principal::Group),
        ACE4_SPECIAL_EVERYONE => Ok(Principal::Everyone),
        other => Err(AclError::InvalidPrincipal(format!(
            "unknown special principal {other}"
        ))),
    }
}

fn principal_to_wire(principal: Principal) -> (u32, u32) {
    match principal {
        Principal::Owner => (ACEI4_SPECIAL_WHO, ACE4_SPECIAL_OWNER),
        Principal::Group => (ACEI4_SPECIAL_WHO, ACE4_SPECIAL_GROUP),
        Principal::Everyone => (ACEI4_SPECIAL_WHO, ACE4_SPECIAL_EVERYONE),
        Principal::Named(id) => (0, id.unsigned_abs()),
    }
}

/// Decodes a wire payload into an ACL of the given kind.
///
/// # Errors
///
/// - [`AclError::InvalidSize`] unless the length is `8 + 20 * n`, or when the
///   header count disagrees with `n`.
/// - [`AclError::TooLarge`] when `n` exceeds [`ACL_MAX_ACES`].
/// - [`AclError::InvalidArgument`] for an unknown ACE type or directory-only
///   flags in a file ACL.
/// - [`AclError::InvalidPrincipal`] for an unknown special-who sentinel.
pub fn decode(bytes: &[u8], is_directory: bool) -> AclResult<Acl> {
    let Some(count) = ace_count_for_len(bytes.len()) else {
        trace_xdr_rejected(bytes.len(), "size");
        return Err(AclError::InvalidSize { len: bytes.len() });
    };
    if count > ACL_MAX_ACES {
        trace_xdr_rejected(bytes.len(), "too_large");
        return Err(AclError::TooLarge {
            count,
            max: ACL_MAX_ACES,
        });
    }

    let (header, body) = bytes.split_at(XDR_HEADER_SIZE);
    let mut header = words(header);
    let aclflags = header.next().unwrap_or_default();
    let declared = header.next().unwrap_or_default();
    if usize::try_from(declared).ok() != Some(count) {
        trace_xdr_rejected(bytes.len(), "count");
        return Err(AclError::InvalidSize { len: bytes.len() });
    }

    let mut acl = Acl::new(is_directory);
    acl.set_flags(AclFlags::from_raw(aclflags));
    for record in body.chunks_exact(XDR_ACE_SIZE) {
        let mut fields = words(record);
        let mut next = || fields.next().unwrap_or_default();
        let (ace_type, flag, iflag, mask, who) = (next(), next(), next(), next(), next());

        let ace = Ace::new(
            is_directory,
            AceType::try_from(ace_type)?,
            AceFlags::from_raw(flag),
            AccessMask::from_raw(mask),
            principal_from_wire(iflag, who)?,
        )?;
        acl.append(ace)?;
    }

    trace_xdr_decoded(bytes.len(), acl.len(), is_directory);
    Ok(acl)
}

/// Encodes an ACL into exactly [`encoded_len`]`(acl.len())` bytes.
///
/// # Errors
///
/// [`AclError::TooLarge`] when the ACL holds more than [`ACL_MAX_ACES`]
/// entries.
pub fn encode(acl: &Acl) -> AclResult<Vec<u8>> {
    if acl.len() > ACL_MAX_ACES {
        return Err(AclError::TooLarge {
            count: acl.len(),
            max: ACL_MAX_ACES,
        });
    }

    let mut out = Vec::with_capacity(encoded_len(acl.len()));
    out.extend_from_slice(&acl.flags().as_raw().to_be_bytes());
    // Bounded by ACL_MAX_ACES above.
    out.extend_from_slice(&(acl.len() as u32).to_be_bytes());
    for ace in acl {
        let (iflag, who) = principal_to_wire(ace.principal());
        for word in [
            ace.ace_type().as_raw(),
            ace.flags().as_raw(),
            iflag,
            ace.mask().as_raw(),
            who,
        ] {
            out.extend_from_slice(&word.to_be_bytes());
        }
    }

    trace_xdr_encoded(acl.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ace(is_dir: bool, ty: AceType, flags: u32, mask: u32, who: Principal) -> Ace {
        Ace::new(
            is_dir,
            ty,
            AceFlags::from_raw(flags),
            AccessMask::from_raw(mask),
            who,
        )
        .unwrap()
    }

    fn header(flags: u32, count: u32) -> Vec<u8> {
        let mut out = flags.to_be_bytes().to_vec();
        out.extend_from_slice(&count.to_be_bytes());
        out
    }

    fn record(out: &mut Vec<u8>, fields: [u32; 5]) {
        for field in fields {
            out.extend_from_slice(&field.to_be_bytes());
        }
    }

    #[test]
    fn empty_acl_is_header_only() {
        let acl = Acl::new(false);
        let bytes = encode(&acl).unwrap();
        assert_eq!(bytes, header(0, 0));

        let decoded = decode(&bytes, false).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn encodes_fields_big_endian() {
        let mut acl = Acl::new(true);
        acl.set_flags(AclFlags::from_raw(AclFlags::PROTECTED));
        acl.append(ace(
            true,
            AceType::Deny,
            AceFlags::FILE_INHERIT,
            AccessMask::WRITE_DATA,
            Principal::Named(1000),
        ))
        .unwrap();
        acl.append(ace(true, AceType::Allow, 0, AccessMask::READ_DATA, Principal::Group))
            .unwrap();

        let mut expected = header(AclFlags::PROTECTED, 2);
        record(&mut expected, [1, AceFlags::FILE_INHERIT, 0, 0x2, 1000]);
        record(
            &mut expected,
            [
                0,
                AceFlags::GROUP | AceFlags::IDENTIFIER_GROUP,
                ACEI4_SPECIAL_WHO,
                0x1,
                ACE4_SPECIAL_GROUP,
            ],
        );

        let bytes = encode(&acl).unwrap();
        assert_eq!(bytes.len(), encoded_len(2));
        assert_eq!(bytes, expected);
    }

    #[test]
    fn roundtrip_keeps_acl_flags() {
        let mut acl = Acl::new(true);
        acl.set_flags(AclFlags::from_raw(AclFlags::AUTO_INHERIT | AclFlags::DEFAULTED));
        acl.append(ace(
            true,
            AceType::Audit,
            AceFlags::SUCCESSFUL_ACCESS,
            AccessMask::DELETE,
            Principal::Everyone,
        ))
        .unwrap();

        let decoded = decode(&encode(&acl).unwrap(), true).unwrap();
        assert_eq!(decoded, acl);
        assert_eq!(decoded.flags(), acl.flags());
    }

    #[test]
    fn size_checks() {
        assert_eq!(ace_count_for_len(8), Some(0));
        assert_eq!(ace_count_for_len(48), Some(2));
        assert_eq!(ace_count_for_len(7), None);
        assert_eq!(ace_count_for_len(29), None);

        for len in [0, 4, 7, 9, 27, 29] {
            let err = decode(&vec![0; len], true).unwrap_err();
            assert!(matches!(err, AclError::InvalidSize { .. }), "len {len}");
        }
    }

    #[test]
    fn header_count_must_match_size() {
        let mut bytes = header(0, 2);
        record(&mut bytes, [0, 0, 1, 1, ACE4_SPECIAL_OWNER]);
        let err = decode(&bytes, true).unwrap_err();
        assert!(matches!(err, AclError::InvalidSize { len: 28 }));
    }

    #[test]
    fn too_many_entries() {
        let mut bytes = header(0, 129);
        for _ in 0..129 {
            record(&mut bytes, [0, 0, 1, 1, ACE4_SPECIAL_EVERYONE]);
        }
        assert!(matches!(
            decode(&bytes, true),
            Err(AclError::TooLarge { count: 129, max: 128 })
        ));
    }

    #[test]
    fn encode_refuses_oversized_acl() {
        let entry = ace(true, AceType::Allow, 0, AccessMask::READ_DATA, Principal::Owner);
        let mut acl = Acl::new(true);
        for _ in 0..=ACL_MAX_ACES {
            acl.append(entry).unwrap();
        }
        assert!(matches!(encode(&acl), Err(AclError::TooLarge { .. })));
    }

    #[test]
    fn unknown_type_and_sentinel() {
        let mut bad_type = header(0, 1);
        record(&mut bad_type, [7, 0, 0, 1, 10]);
        assert!(matches!(
            decode(&bad_type, true),
            Err(AclError::InvalidArgument(_))
        ));

        let mut bad_who = header(0, 1);
        record(&mut bad_who, [0, 0, ACEI4_SPECIAL_WHO, 1, 9]);
        assert!(matches!(
            decode(&bad_who, true),
            Err(AclError::InvalidPrincipal(_))
        ));
    }

    #[test]
    fn named_id_past_i32_range_is_rejected() {
        let mut top = header(0, 1);
        record(&mut top, [0, 0, 0, 1, 0x7fff_ffff]);
        let acl = decode(&top, false).unwrap();
        assert_eq!(acl.get_at(0).unwrap().principal(), Principal::Named(i32::MAX));

        let mut nobody = header(0, 1);
        record(&mut nobody, [0, 0, 0, 1, 4_294_967_294]);
        let err = decode(&nobody, false).unwrap_err();
        assert!(
            matches!(&err, AclError::InvalidPrincipal(msg) if msg.contains("4294967294")),
            "{err:?}"
        );
    }

    #[test]
    fn file_payload_with_directory_flags_is_rejected() {
        let mut bytes = header(0, 1);
        record(&mut bytes, [0, AceFlags::DIRECTORY_INHERIT, 0, 1, 10]);
        assert!(decode(&bytes, true).is_ok());
        assert!(matches!(
            decode(&bytes, false),
            Err(AclError::InvalidArgument(_))
        ));
    }

    #[test]
    fn file_decode_drops_delete_child() {
        let mut bytes = header(0, 1);
        record(
            &mut bytes,
            [0, 0, 0, AccessMask::DELETE_CHILD | AccessMask::READ_DATA, 10],
        );
        let acl = decode(&bytes, false).unwrap();
        assert_eq!(acl.get_at(0).unwrap().mask().as_raw(), AccessMask::READ_DATA);
    }
}
