//! crates/codec/src/text.rs
//!
//! Human readable ACE grammar used by getfacl/setfacl style tools.
//!
//! One entry per line:
//!
//! ```text
//! tag:permissions[:flags]:type[:numeric_id]
//! ```
//!
//! `tag` is `owner@`, `group@`, `everyone@`, `user:<name-or-id>` or
//! `group:<name-or-id>` (`u:`/`g:` are accepted as short forms). Permissions
//! and flags are either slash separated names (`read_data/write_data`) or a
//! compact letter string (`rw-p----------`). Compact letters are matched
//! anywhere in the field and `-` is ignored.

use std::fmt::Write as _;
use std::io::BufRead;
use std::ops::BitOr;

use acl::{
    AccessMask, Ace, AceFlags, AceType, Acl, AclError, AclFlags, AclResult, IdMapper, ParseError,
    Principal,
};

use crate::debug_codec::{trace_text_parsed, trace_text_spec};

/// Output switches for [`format_ace`] and the JSON encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextOptions(u32);

impl TextOptions {
    /// Print named principals by id instead of resolving names.
    pub const NUMERIC_IDS: Self = Self(0x1);
    /// Spell permissions and flags out instead of using letters.
    pub const VERBOSE: Self = Self(0x2);
    /// Append `:id` after the type of named entries.
    pub const APPEND_ID: Self = Self(0x4);

    /// No options set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every option set.
    #[must_use]
    pub const fn all() -> Self {
        Self(0x7)
    }

    /// Builds options from raw bits, dropping unknown ones.
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::all().0)
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TextOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Largest specification [`read_spec`] accepts, after comment stripping.
pub const MAX_SPEC_LEN: usize = 65536;

struct BitName {
    bit: u32,
    name: &'static str,
    letter: char,
}

const fn bit(bit: u32, name: &'static str, letter: char) -> BitName {
    BitName { bit, name, letter }
}

/// Permission names and letters, in compact output order.
const PERMS: [BitName; 14] = [
    bit(AccessMask::READ_DATA, "read_data", 'r'),
    bit(AccessMask::WRITE_DATA, "write_data", 'w'),
    bit(AccessMask::EXECUTE, "execute", 'x'),
    bit(AccessMask::APPEND_DATA, "append_data", 'p'),
    bit(AccessMask::DELETE_CHILD, "delete_child", 'D'),
    bit(AccessMask::DELETE, "delete", 'd'),
    bit(AccessMask::READ_ATTRIBUTES, "read_attributes", 'a'),
    bit(AccessMask::WRITE_ATTRIBUTES, "write_attributes", 'A'),
    bit(AccessMask::READ_NAMED_ATTRS, "read_xattr", 'R'),
    bit(AccessMask::WRITE_NAMED_ATTRS, "write_xattr", 'W'),
    bit(AccessMask::READ_ACL, "read_acl", 'c'),
    bit(AccessMask::WRITE_ACL, "write_acl", 'C'),
    bit(AccessMask::WRITE_OWNER, "write_owner", 'o'),
    bit(AccessMask::SYNCHRONIZE, "synchronize", 's'),
];

/// Input-only permission names.
const PERM_SETS: [(u32, &str); 4] = [
    (AccessMask::FULL_SET, "full_set"),
    (AccessMask::MODIFY_SET, "modify_set"),
    (AccessMask::READ_SET, "read_set"),
    (AccessMask::WRITE_SET, "write_set"),
];

/// Flag names and letters, in compact output order.
const FLAGS: [BitName; 7] = [
    bit(AceFlags::FILE_INHERIT, "file_inherit", 'f'),
    bit(AceFlags::DIRECTORY_INHERIT, "dir_inherit", 'd'),
    bit(AceFlags::INHERIT_ONLY, "inherit_only", 'i'),
    bit(AceFlags::NO_PROPAGATE_INHERIT, "no_propagate", 'n'),
    bit(AceFlags::SUCCESSFUL_ACCESS, "successful_access", 'S'),
    bit(AceFlags::FAILED_ACCESS, "failed_access", 'F'),
    bit(AceFlags::INHERITED, "inherited", 'I'),
];

/// Input-only flag spellings.
const FLAG_ALIASES: [(u32, &str); 1] = [(AceFlags::SUCCESSFUL_ACCESS, "successfull_access")];

const TYPES: [(AceType, &str); 4] = [
    (AceType::Allow, "allow"),
    (AceType::Deny, "deny"),
    (AceType::Audit, "audit"),
    (AceType::Alarm, "alarm"),
];

const ACL_FLAG_WORDS: [(u32, &str); 3] = [
    (AclFlags::AUTO_INHERIT, "auto-inherit"),
    (AclFlags::PROTECTED, "protected"),
    (AclFlags::DEFAULTED, "defaulted"),
];

/// Minimum width of the right-aligned tag column.
const WHO_WIDTH: usize = 18;

const BLANKS: [char; 2] = [' ', '\t'];
const SEPARATORS: [char; 5] = [' ', ',', '\t', '\n', '\r'];

fn malformed(field: &str, message: impl Into<String>) -> AclError {
    ParseError::at(field, message).into()
}

fn format_bits(value: u32, table: &[BitName], verbose: bool) -> String {
    if verbose {
        let names: Vec<&str> = table
            .iter()
            .filter(|entry| value & entry.bit != 0)
            .map(|entry| entry.name)
            .collect();
        names.join("/")
    } else {
        table
            .iter()
            .map(|entry| if value & entry.bit != 0 { entry.letter } else { '-' })
            .collect()
    }
}

/// Parses a permission or flag field; the flag reports compact notation.
fn parse_bits(
    text: &str,
    table: &[BitName],
    extra: &[(u32, &str)],
    field: &str,
) -> AclResult<(u32, bool)> {
    let mut value = 0;
    let mut recognised = 0usize;
    for token in text.split('/') {
        let found = table
            .iter()
            .find(|entry| entry.name == token)
            .map(|entry| entry.bit)
            .or_else(|| {
                extra
                    .iter()
                    .find(|(_, name)| *name == token)
                    .map(|(bit, _)| *bit)
            });
        match found {
            Some(bit) => {
                value |= bit;
                recognised += 1;
            }
            None if recognised == 0 => return parse_compact(text, table, field).map(|v| (v, true)),
            None => {
                return Err(malformed(
                    field,
                    format!("\"{field}\" field contains invalid name \"{token}\""),
                ));
            }
        }
    }
    Ok((value, false))
}

/// Parses letter notation. Letters are read as a set: position is not
/// checked, repeats are harmless and `-` placeholders are skipped, so both the
/// padded column form that [`format_ace`] writes and short forms like `xr`
/// are accepted.
fn parse_compact(text: &str, table: &[BitName], field: &str) -> AclResult<u32> {
    let mut value = 0;
    for letter in text.chars().filter(|c| *c != '-') {
        let entry = table.iter().find(|entry| entry.letter == letter).ok_or_else(|| {
            malformed(
                field,
                format!("\"{field}\" field contains invalid letter \"{letter}\""),
            )
        })?;
        value |= entry.bit;
    }
    Ok(value)
}

fn type_name(ace_type: AceType) -> &'static str {
    TYPES
        .iter()
        .find(|(ty, _)| *ty == ace_type)
        .map_or("allow", |(_, name)| *name)
}

fn parse_type(text: &str) -> Option<AceType> {
    TYPES
        .iter()
        .find(|(_, name)| *name == text)
        .map(|(ty, _)| *ty)
}

/// Parses a non-negative decimal id.
fn parse_id(text: &str) -> Option<i32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn resolve_qualifier(qualifier: &str, is_group: bool, mapper: &dyn IdMapper) -> AclResult<i32> {
    parse_id(qualifier)
        .or_else(|| mapper.name_to_id(qualifier, is_group))
        .ok_or_else(|| {
            AclError::InvalidPrincipal(format!(
                "unknown {} name \"{qualifier}\"",
                if is_group { "group" } else { "user" }
            ))
        })
}

fn who_text(ace: &Ace, options: TextOptions, mapper: &dyn IdMapper) -> String {
    match ace.principal() {
        Principal::Named(id) => {
            let tag = if ace.is_group() { "group" } else { "user" };
            let name = if options.contains(TextOptions::NUMERIC_IDS) {
                None
            } else {
                mapper.id_to_name(id, ace.is_group())
            };
            match name {
                Some(name) => format!("{tag}:{name}"),
                None => format!("{tag}:{id}"),
            }
        }
        special => special.to_string(),
    }
}

/// Formats one entry as `tag:perms:flags:type[:id]`.
///
/// The tag is right-aligned to 18 columns. Named principals are printed
/// through `mapper` unless [`TextOptions::NUMERIC_IDS`] is set, falling back
/// to the numeric id when the mapper has no name.
///
/// ```
/// use acl::{AccessMask, Ace, AceFlags, AceType, NumericIdMapper, Principal};
/// use codec::text::{format_ace, TextOptions};
///
/// let ace = Ace::new(
///     true,
///     AceType::Allow,
///     AceFlags::from_raw(AceFlags::FILE_INHERIT),
///     AccessMask::from_raw(AccessMask::READ_DATA | AccessMask::EXECUTE),
///     Principal::Named(1000),
/// )?;
/// let text = format_ace(&ace, TextOptions::APPEND_ID, &NumericIdMapper);
/// assert_eq!(text, "         user:1000:r-x-----------:f------:allow:1000");
/// # Ok::<(), acl::AclError>(())
/// ```
#[must_use]
pub fn format_ace(ace: &Ace, options: TextOptions, mapper: &dyn IdMapper) -> String {
    let verbose = options.contains(TextOptions::VERBOSE);
    let who = who_text(ace, options, mapper);
    let mut out = format!(
        "{who:>width$}:{}:{}:{}",
        format_bits(ace.mask().as_raw(), &PERMS, verbose),
        format_bits(ace.flags().as_raw() & AceFlags::DISPLAYED, &FLAGS, verbose),
        type_name(ace.ace_type()),
        width = WHO_WIDTH,
    );
    if options.contains(TextOptions::APPEND_ID)
        && let Principal::Named(id) = ace.principal()
    {
        let _ = write!(out, ":{id}");
    }
    out
}

/// Formats every entry on its own line, each terminated by `\n`.
#[must_use]
pub fn format_acl(acl: &Acl, options: TextOptions, mapper: &dyn IdMapper) -> String {
    let mut out = String::new();
    for ace in acl {
        out.push_str(&format_ace(ace, options, mapper));
        out.push('\n');
    }
    out
}

enum Tag {
    Special(Principal),
    Named { is_group: bool },
}

fn parse_tag(text: &str) -> AclResult<Tag> {
    match text {
        "owner@" => Ok(Tag::Special(Principal::Owner)),
        "group@" => Ok(Tag::Special(Principal::Group)),
        "everyone@" => Ok(Tag::Special(Principal::Everyone)),
        "user" | "u" => Ok(Tag::Named { is_group: false }),
        "group" | "g" => Ok(Tag::Named { is_group: true }),
        other => Err(malformed("tag", format!("invalid tag \"{other}\""))),
    }
}

/// Parses one entry for an ACL of the given kind.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
///
/// # Errors
///
/// - [`AclError::Parse`] for grammar violations.
/// - [`AclError::InvalidPrincipal`] when a named qualifier is neither numeric
///   nor known to `mapper` and no trailing id was given.
/// - [`AclError::InvalidArgument`] for directory-only flags on a file entry.
pub fn parse_ace(line: &str, is_directory: bool, mapper: &dyn IdMapper) -> AclResult<Option<Ace>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split(':');
    let tag = parse_tag(fields.next().unwrap_or_default().trim_matches(BLANKS))?;
    let qualifier = match tag {
        Tag::Named { .. } => {
            let qualifier = fields
                .next()
                .ok_or_else(|| malformed("qualifier", "truncated entry"))?;
            if qualifier.is_empty() {
                return Err(malformed("qualifier", "empty qualifier"));
            }
            Some(qualifier)
        }
        Tag::Special(_) => None,
    };
    let perms = fields
        .next()
        .ok_or_else(|| malformed("permissions", "truncated entry"))?;

    let rest: Vec<&str> = fields.collect();
    let (flags, type_field, id_field) = match rest.as_slice() {
        [] => return Err(malformed("type", "truncated entry")),
        [ty] => (None, *ty, None),
        [ty, id] if parse_type(ty).is_some() && parse_id(id).is_some() => (None, *ty, Some(*id)),
        [flags, ty] => (Some(*flags), *ty, None),
        [flags, ty, id] => (Some(*flags), *ty, Some(*id)),
        _ => return Err(malformed("appended id", "too many fields")),
    };

    let (mask, compact_perms) = parse_bits(perms, &PERMS, &PERM_SETS, "permissions")?;
    let (mut flag_bits, compact_flags) = match flags {
        Some(text) => parse_bits(text, &FLAGS, &FLAG_ALIASES, "flags")?,
        None => (0, false),
    };
    let ace_type = parse_type(type_field)
        .ok_or_else(|| malformed("type", format!("invalid type \"{type_field}\"")))?;
    let appended = id_field
        .map(|raw| {
            parse_id(raw).ok_or_else(|| malformed("appended id", format!("invalid id \"{raw}\"")))
        })
        .transpose()?;

    let principal = match (tag, qualifier) {
        (Tag::Special(principal), _) => principal,
        (Tag::Named { is_group }, qualifier) => {
            if is_group {
                flag_bits |= AceFlags::IDENTIFIER_GROUP;
            }
            let id = match (appended, qualifier) {
                (Some(id), _) => id,
                (None, Some(qualifier)) => resolve_qualifier(qualifier, is_group, mapper)?,
                (None, None) => return Err(malformed("qualifier", "missing qualifier")),
            };
            Principal::Named(id)
        }
    };

    let ace = Ace::new(
        is_directory,
        ace_type,
        AceFlags::from_raw(flag_bits),
        AccessMask::from_raw(mask),
        principal,
    )?;
    trace_text_parsed(line, compact_perms, compact_flags);
    Ok(Some(ace))
}

/// Parses a specification of several entries.
///
/// `#` starts a comment running to the end of its line. Entries are separated
/// by commas, blanks or newlines.
///
/// # Errors
///
/// Any entry error, or [`AclError::Parse`] when tokens were present but no
/// entry came out of them.
pub fn parse_aces(spec: &str, is_directory: bool, mapper: &dyn IdMapper) -> AclResult<Vec<Ace>> {
    let mut tokens = 0usize;
    let mut aces = Vec::new();
    for line in spec.lines() {
        let content = line.split_once('#').map_or(line, |(before, _)| before);
        for token in content.split(SEPARATORS).filter(|t| !t.is_empty()) {
            tokens += 1;
            if let Some(ace) = parse_ace(token, is_directory, mapper)? {
                aces.push(ace);
            }
        }
    }
    trace_text_spec(tokens, aces.len());
    if tokens > 0 && aces.is_empty() {
        return Err(ParseError::new("specification contains no entries").into());
    }
    Ok(aces)
}

/// Parses a specification into a new ACL.
pub fn parse_acl(spec: &str, is_directory: bool, mapper: &dyn IdMapper) -> AclResult<Acl> {
    let mut acl = Acl::new(is_directory);
    for ace in parse_aces(spec, is_directory, mapper)? {
        acl.append(ace)?;
    }
    Ok(acl)
}

/// Inserts the entries of `spec` starting at `index`, keeping their order.
///
/// The ACL is left untouched on any error.
pub fn insert_spec(
    acl: &mut Acl,
    spec: &str,
    index: usize,
    mapper: &dyn IdMapper,
) -> AclResult<()> {
    if index > acl.len() {
        return Err(AclError::OutOfRange {
            index,
            count: acl.len(),
        });
    }
    let aces = parse_aces(spec, acl.is_directory(), mapper)?;
    let mut updated = acl.clone();
    for (offset, ace) in aces.into_iter().enumerate() {
        updated.insert_at(ace, index + offset)?;
    }
    *acl = updated;
    Ok(())
}

/// Removes every entry equal to an entry of `spec`; returns how many went.
pub fn remove_spec(acl: &mut Acl, spec: &str, mapper: &dyn IdMapper) -> AclResult<usize> {
    let targets = parse_aces(spec, acl.is_directory(), mapper)?;
    Ok(acl.remove_matching(&targets))
}

fn parse_single(text: &str, is_directory: bool, mapper: &dyn IdMapper) -> AclResult<Ace> {
    parse_ace(text, is_directory, mapper)?
        .ok_or_else(|| ParseError::new(format!("\"{text}\" holds no entry")).into())
}

/// Replaces every entry equal to the single entry `from` with `to`.
pub fn replace_spec(
    acl: &mut Acl,
    from: &str,
    to: &str,
    mapper: &dyn IdMapper,
) -> AclResult<usize> {
    let from = parse_single(from, acl.is_directory(), mapper)?;
    let to = parse_single(to, acl.is_directory(), mapper)?;
    acl.replace_matching(&from, &to)
}

/// Reads a specification, dropping `#` comments.
///
/// # Errors
///
/// - [`AclError::Io`] on read failure.
/// - [`AclError::InvalidArgument`] past [`MAX_SPEC_LEN`] bytes.
pub fn read_spec<R: BufRead>(mut reader: R) -> AclResult<String> {
    let mut spec = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let kept = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };
        if spec.len() + kept.len() > MAX_SPEC_LEN {
            return Err(AclError::invalid(format!(
                "ACL specification exceeds {MAX_SPEC_LEN} bytes"
            )));
        }
        spec.push_str(kept);
        if kept.len() < line.len() {
            spec.push('\n');
        }
    }
    Ok(spec)
}

/// Renders ACL flags as `auto-inherit,protected,defaulted` or `none`.
#[must_use]
pub fn aclflags_to_text(flags: AclFlags) -> String {
    let words: Vec<&str> = ACL_FLAG_WORDS
        .iter()
        .filter(|(bit, _)| flags.contains(*bit))
        .map(|(_, word)| *word)
        .collect();
    if words.is_empty() {
        "none".to_owned()
    } else {
        words.join(",")
    }
}

/// Parses the output of [`aclflags_to_text`].
pub fn aclflags_from_text(text: &str) -> AclResult<AclFlags> {
    let mut bits = 0;
    for word in text.split(',') {
        if word == "none" {
            continue;
        }
        let (bit, _) = ACL_FLAG_WORDS
            .iter()
            .find(|(_, name)| *name == word)
            .ok_or_else(|| malformed("aclflags", format!("invalid aclflag \"{word}\"")))?;
        bits |= bit;
    }
    Ok(AclFlags::from_raw(bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl::{NumericIdMapper, StaticIdMapper};
    use std::io::Cursor;

    fn mapper() -> StaticIdMapper {
        StaticIdMapper::new()
            .with_user("alice", 1000)
            .with_group("staff", 50)
    }

    fn ace(flags: u32, mask: u32, who: Principal) -> Ace {
        Ace::new(
            true,
            AceType::Allow,
            AceFlags::from_raw(flags),
            AccessMask::from_raw(mask),
            who,
        )
        .unwrap()
    }

    fn parse(line: &str) -> AclResult<Option<Ace>> {
        parse_ace(line, true, &mapper())
    }

    #[test]
    fn formats_compact_entry() {
        let entry = ace(
            AceFlags::FILE_INHERIT | AceFlags::INHERITED,
            AccessMask::READ_SET | AccessMask::EXECUTE,
            Principal::Owner,
        );
        assert_eq!(
            format_ace(&entry, TextOptions::empty(), &NumericIdMapper),
            "            owner@:r-x---a-R-c---:f-----I:allow"
        );
    }

    #[test]
    fn formats_verbose_entry() {
        let entry = ace(
            AceFlags::DIRECTORY_INHERIT,
            AccessMask::WRITE_DATA | AccessMask::SYNCHRONIZE,
            Principal::Named(50),
        );
        let entry = Ace::new(
            true,
            AceType::Deny,
            entry.flags().with(AceFlags::IDENTIFIER_GROUP),
            entry.mask(),
            entry.principal(),
        )
        .unwrap();
        assert_eq!(
            format_ace(&entry, TextOptions::VERBOSE, &mapper()),
            "       group:staff:write_data/synchronize:dir_inherit:deny"
        );
        assert_eq!(
            format_ace(
                &entry,
                TextOptions::VERBOSE | TextOptions::NUMERIC_IDS | TextOptions::APPEND_ID,
                &mapper()
            ),
            "          group:50:write_data/synchronize:dir_inherit:deny:50"
        );
    }

    #[test]
    fn long_tags_are_not_truncated() {
        let mapper = StaticIdMapper::new().with_user("a_rather_long_user_name", 7);
        let entry = ace(0, AccessMask::READ_DATA, Principal::Named(7));
        let text = format_ace(&entry, TextOptions::empty(), &mapper);
        assert!(text.starts_with("user:a_rather_long_user_name:r"));
    }

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   \t").unwrap(), None);
        assert_eq!(parse("  # owner@:r:allow").unwrap(), None);
    }

    #[test]
    fn parses_compact_and_verbose_permissions() {
        let compact = parse("owner@:rwx:allow").unwrap().unwrap();
        let verbose = parse("owner@:read_data/write_data/execute:allow")
            .unwrap()
            .unwrap();
        assert_eq!(compact, verbose);
        assert_eq!(
            compact.mask().as_raw(),
            AccessMask::READ_DATA | AccessMask::WRITE_DATA | AccessMask::EXECUTE
        );

        let dashes = parse("owner@:r-x-----------:allow").unwrap().unwrap();
        assert_eq!(
            dashes.mask().as_raw(),
            AccessMask::READ_DATA | AccessMask::EXECUTE
        );
    }

    #[test]
    fn compact_letters_are_a_set() {
        let canonical = parse("owner@:rx:fd:allow").unwrap().unwrap();
        for spec in ["owner@:xr:df:allow", "owner@:rrx-x:ffd:allow", "owner@:x-r:d-f:allow"] {
            assert_eq!(parse(spec).unwrap(), Some(canonical), "{spec}");
        }
        assert!(parse("owner@:rq:allow").is_err());
    }

    #[test]
    fn permission_sets_are_accepted() {
        let full = parse("everyone@:full_set::allow").unwrap().unwrap();
        assert_eq!(full.mask().as_raw(), AccessMask::FULL_SET);

        let mixed = parse("everyone@:read_set/write_acl::deny").unwrap().unwrap();
        assert_eq!(
            mixed.mask().as_raw(),
            AccessMask::READ_SET | AccessMask::WRITE_ACL
        );
        assert_eq!(mixed.ace_type(), AceType::Deny);
    }

    #[test]
    fn bad_token_after_verbose_name_is_fatal() {
        let err = parse("owner@:read_data/rw:allow").unwrap_err();
        assert!(matches!(err, AclError::Parse(ref e) if e.field() == Some("permissions")));

        let err = parse("owner@:rwq:allow").unwrap_err();
        assert!(matches!(err, AclError::Parse(_)));
    }

    #[test]
    fn flags_field_is_optional() {
        let without = parse("owner@:r:audit").unwrap().unwrap();
        assert_eq!(without.flags().as_raw(), AceFlags::OWNER);
        assert_eq!(without.ace_type(), AceType::Audit);

        let with = parse("owner@:r:fdS:alarm").unwrap().unwrap();
        assert_eq!(
            with.flags().as_raw(),
            AceFlags::OWNER
                | AceFlags::FILE_INHERIT
                | AceFlags::DIRECTORY_INHERIT
                | AceFlags::SUCCESSFUL_ACCESS
        );

        let historic = parse("owner@:r:successfull_access/failed_access:audit")
            .unwrap()
            .unwrap();
        assert!(historic.flags().contains(AceFlags::SUCCESSFUL_ACCESS));
        assert!(historic.flags().contains(AceFlags::FAILED_ACCESS));
    }

    #[test]
    fn named_principals_resolve_through_mapper() {
        let user = parse("user:alice:r:allow").unwrap().unwrap();
        assert_eq!(user.principal(), Principal::Named(1000));
        assert!(!user.is_group());

        let group = parse("g:staff:r::allow").unwrap().unwrap();
        assert_eq!(group.principal(), Principal::Named(50));
        assert!(group.is_group());

        let numeric = parse("u:42:r:allow").unwrap().unwrap();
        assert_eq!(numeric.principal(), Principal::Named(42));

        let err = parse("user:mallory:r:allow").unwrap_err();
        assert!(matches!(err, AclError::InvalidPrincipal(_)));
    }

    #[test]
    fn appended_id_is_authoritative() {
        let ace = parse("user:mallory:r::allow:4242").unwrap().unwrap();
        assert_eq!(ace.principal(), Principal::Named(4242));

        let short = parse("user:alice:r:allow:7").unwrap().unwrap();
        assert_eq!(short.principal(), Principal::Named(7));

        let special = parse("owner@:r::allow:12").unwrap().unwrap();
        assert_eq!(special.principal(), Principal::Owner);

        let err = parse("owner@:r::allow:twelve").unwrap_err();
        assert!(matches!(err, AclError::Parse(ref e) if e.field() == Some("appended id")));
    }

    #[test]
    fn grammar_errors() {
        for line in [
            "nobody@:r:allow",
            "owner@",
            "owner@:r",
            "user::r:allow",
            "owner@:r::permit",
            "owner@:r::allow:1:2",
        ] {
            assert!(
                matches!(parse(line), Err(AclError::Parse(_))),
                "{line} should not parse"
            );
        }
    }

    #[test]
    fn file_entries_reject_inheritance() {
        let err = parse_ace("owner@:r:f:allow", false, &NumericIdMapper).unwrap_err();
        assert!(matches!(err, AclError::InvalidArgument(_)));
    }

    #[test]
    fn roundtrip_formatted_lines() {
        let mapper = mapper();
        let entries = [
            ace(AceFlags::FILE_INHERIT, AccessMask::FULL_SET, Principal::Owner),
            ace(0, 0, Principal::Group),
            ace(
                AceFlags::INHERIT_ONLY | AceFlags::FAILED_ACCESS,
                AccessMask::WRITE_SET,
                Principal::Everyone,
            ),
            ace(AceFlags::IDENTIFIER_GROUP, AccessMask::READ_ACL, Principal::Named(50)),
            ace(0, AccessMask::DELETE, Principal::Named(1000)),
            ace(0, AccessMask::DELETE, Principal::Named(31337)),
        ];
        for bits in 0..8 {
            let options = TextOptions::from_bits_truncate(bits);
            for entry in &entries {
                let text = format_ace(entry, options, &mapper);
                let back = parse_ace(&text, true, &mapper).unwrap().unwrap();
                assert_eq!(&back, entry, "{text}");
            }
        }
    }

    #[test]
    fn spec_lists_strip_comments() {
        let spec = "owner@:rw::allow, group@:r::allow # trailing\n\
                    # whole line\n\
                    \teveryone@:r::allow\r\n";
        let aces = parse_aces(spec, true, &NumericIdMapper).unwrap();
        assert_eq!(aces.len(), 3);
        assert_eq!(aces[2].principal(), Principal::Everyone);

        assert!(parse_aces("", true, &NumericIdMapper).unwrap().is_empty());
        assert!(parse_aces("owner@:rw::allow,bogus", true, &NumericIdMapper).is_err());
    }

    #[test]
    fn format_acl_parses_back() {
        let mapper = mapper();
        let acl = parse_acl(
            "owner@:rwx::allow user:alice:r::deny group:staff:rw:fd:allow",
            true,
            &mapper,
        )
        .unwrap();
        let text = format_acl(&acl, TextOptions::empty(), &mapper);
        assert_eq!(text.lines().count(), 3);
        assert_eq!(parse_acl(&text, true, &mapper).unwrap(), acl);
    }

    #[test]
    fn insert_spec_is_atomic() {
        let mapper = mapper();
        let mut acl = parse_acl("owner@:r::allow everyone@:r::allow", true, &mapper).unwrap();

        insert_spec(&mut acl, "group@:r::allow user:alice:w::deny", 1, &mapper).unwrap();
        let order: Vec<_> = acl.iter().map(Ace::principal).collect();
        assert_eq!(
            order,
            [
                Principal::Owner,
                Principal::Group,
                Principal::Named(1000),
                Principal::Everyone
            ]
        );

        let before = acl.clone();
        assert!(insert_spec(&mut acl, "group@:r::allow user:nobody:w::deny", 0, &mapper).is_err());
        assert!(matches!(
            insert_spec(&mut acl, "group@:r::allow", 9, &mapper),
            Err(AclError::OutOfRange { .. })
        ));
        assert_eq!(acl, before);
    }

    #[test]
    fn remove_and_replace_spec() {
        let mapper = mapper();
        let mut acl = parse_acl(
            "owner@:r::allow group@:r::allow owner@:r::allow everyone@:r::allow",
            true,
            &mapper,
        )
        .unwrap();

        assert_eq!(
            replace_spec(&mut acl, "owner@:r::allow", "owner@:rw::allow", &mapper).unwrap(),
            2
        );
        assert_eq!(
            remove_spec(&mut acl, "owner@:rw::allow,everyone@:r::allow", &mapper).unwrap(),
            3
        );
        assert_eq!(acl.len(), 1);
        assert_eq!(acl.get_at(0).unwrap().principal(), Principal::Group);

        assert!(replace_spec(&mut acl, "# nothing", "owner@:r::allow", &mapper).is_err());
    }

    #[test]
    fn read_spec_strips_comments() {
        let input = "owner@:r::allow # owner\n# skipped\ngroup@:r::allow\n";
        let spec = read_spec(Cursor::new(input)).unwrap();
        let aces = parse_aces(&spec, true, &NumericIdMapper).unwrap();
        assert_eq!(aces.len(), 2);
        assert!(!spec.contains('#'));
    }

    #[test]
    fn read_spec_enforces_limit() {
        let line = format!("{}\n", "x".repeat(1023));
        let input = line.repeat(65);
        let err = read_spec(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, AclError::InvalidArgument(_)));

        let fits = line.repeat(64);
        assert_eq!(read_spec(Cursor::new(fits)).unwrap().len(), MAX_SPEC_LEN);
    }

    #[test]
    fn acl_flag_words() {
        assert_eq!(aclflags_to_text(AclFlags::default()), "none");
        let all = AclFlags::from_raw(AclFlags::ALL);
        assert_eq!(aclflags_to_text(all), "auto-inherit,protected,defaulted");
        assert_eq!(aclflags_from_text("auto-inherit,protected,defaulted").unwrap(), all);
        assert_eq!(aclflags_from_text("none").unwrap(), AclFlags::default());
        assert_eq!(
            aclflags_from_text("protected").unwrap(),
            AclFlags::from_raw(AclFlags::PROTECTED)
        );
        assert!(aclflags_from_text("sticky").is_err());
        assert!(aclflags_from_text("").is_err());
    }
}
