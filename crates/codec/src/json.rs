//! crates/codec/src/json.rs
//!
//! JSON form of an ACL as exchanged with management front ends:
//!
//! ```json
//! {
//!   "acl": [
//!     {"tag": "owner@", "id": -1, "type": "ALLOW",
//!      "perms": {"BASIC": "FULL_CONTROL"}, "flags": {"BASIC": "INHERIT"}}
//!   ],
//!   "nfs41_flags": {"AUTOINHERIT": false, "PROTECTED": false, "DEFAULTED": false}
//! }
//! ```
//!
//! Decoding walks every entry and collects all validation failures before
//! giving up, so a caller can report every problem in one pass.

use serde_json::{Map, Value, json};

use acl::{
    AccessMask, Ace, AceFlags, AceType, Acl, AclError, AclFlags, AclResult, IdMapper, ParseError,
    Principal, ValidationErrors,
};

use crate::debug_codec::{trace_json_decoded, trace_json_encoded};
use crate::text::TextOptions;

const PERMS: [(u32, &str); 14] = [
    (AccessMask::READ_DATA, "READ_DATA"),
    (AccessMask::WRITE_DATA, "WRITE_DATA"),
    (AccessMask::EXECUTE, "EXECUTE"),
    (AccessMask::APPEND_DATA, "APPEND_DATA"),
    (AccessMask::DELETE_CHILD, "DELETE_CHILD"),
    (AccessMask::DELETE, "DELETE"),
    (AccessMask::READ_ATTRIBUTES, "READ_ATTRIBUTES"),
    (AccessMask::WRITE_ATTRIBUTES, "WRITE_ATTRIBUTES"),
    (AccessMask::READ_NAMED_ATTRS, "READ_NAMED_ATTRS"),
    (AccessMask::WRITE_NAMED_ATTRS, "WRITE_NAMED_ATTRS"),
    (AccessMask::READ_ACL, "READ_ACL"),
    (AccessMask::WRITE_ACL, "WRITE_ACL"),
    (AccessMask::WRITE_OWNER, "WRITE_OWNER"),
    (AccessMask::SYNCHRONIZE, "SYNCHRONIZE"),
];

const BASIC_PERMS: [(u32, &str); 4] = [
    (AccessMask::FULL_SET, "FULL_CONTROL"),
    (AccessMask::MODIFY_SET, "MODIFY"),
    (AccessMask::READ_SET | AccessMask::EXECUTE, "READ"),
    (
        AccessMask::EXECUTE
            | AccessMask::READ_ATTRIBUTES
            | AccessMask::READ_NAMED_ATTRS
            | AccessMask::READ_ACL,
        "TRAVERSE",
    ),
];

const FLAGS: [(u32, &str); 7] = [
    (AceFlags::FILE_INHERIT, "FILE_INHERIT"),
    (AceFlags::DIRECTORY_INHERIT, "DIRECTORY_INHERIT"),
    (AceFlags::INHERIT_ONLY, "INHERIT_ONLY"),
    (AceFlags::NO_PROPAGATE_INHERIT, "NO_PROPAGATE_INHERIT"),
    (AceFlags::SUCCESSFUL_ACCESS, "SUCCESSFUL_ACCESS"),
    (AceFlags::FAILED_ACCESS, "FAILED_ACCESS"),
    (AceFlags::INHERITED, "INHERITED"),
];

const BASIC_FLAGS: [(u32, &str); 2] = [
    (AceFlags::FILE_INHERIT | AceFlags::DIRECTORY_INHERIT, "INHERIT"),
    (0, "NOINHERIT"),
];

const TYPES: [(AceType, &str); 4] = [
    (AceType::Allow, "ALLOW"),
    (AceType::Deny, "DENY"),
    (AceType::Audit, "AUDIT"),
    (AceType::Alarm, "ALARM"),
];

const ACL_FLAGS: [(u32, &str); 3] = [
    (AclFlags::AUTO_INHERIT, "AUTOINHERIT"),
    (AclFlags::PROTECTED, "PROTECTED"),
    (AclFlags::DEFAULTED, "DEFAULTED"),
];

fn bitset_to_json(value: u32, names: &[(u32, &str)], basic: &[(u32, &str)], verbose: bool) -> Value {
    let mut out = Map::new();
    if !verbose && let Some((_, alias)) = basic.iter().find(|(bits, _)| *bits == value) {
        out.insert("BASIC".to_owned(), Value::from(*alias));
        return Value::Object(out);
    }
    for (bit, name) in names {
        out.insert((*name).to_owned(), Value::Bool(value & bit != 0));
    }
    Value::Object(out)
}

/// Encodes one entry.
///
/// `id` is always present (`-1` for well-known principals). Named entries
/// also carry `who` unless [`TextOptions::NUMERIC_IDS`] is set.
#[must_use]
pub fn ace_to_json(ace: &Ace, options: TextOptions, mapper: &dyn IdMapper) -> Value {
    let verbose = options.contains(TextOptions::VERBOSE);
    let principal = ace.principal();
    let tag = match principal.special_tag() {
        Some(tag) => tag,
        None if ace.is_group() => "GROUP",
        None => "USER",
    };
    let type_name = TYPES
        .iter()
        .find(|(ty, _)| *ty == ace.ace_type())
        .map_or("ALLOW", |(_, name)| *name);

    let mut out = Map::new();
    out.insert("tag".to_owned(), Value::from(tag));
    out.insert("id".to_owned(), Value::from(principal.id()));
    if let Principal::Named(id) = principal
        && !options.contains(TextOptions::NUMERIC_IDS)
    {
        let who = mapper
            .id_to_name(id, ace.is_group())
            .unwrap_or_else(|| id.to_string());
        out.insert("who".to_owned(), Value::from(who));
    }
    out.insert(
        "perms".to_owned(),
        bitset_to_json(ace.mask().as_raw(), &PERMS, &BASIC_PERMS, verbose),
    );
    out.insert(
        "flags".to_owned(),
        bitset_to_json(
            ace.flags().as_raw() & AceFlags::DISPLAYED,
            &FLAGS,
            &BASIC_FLAGS,
            verbose,
        ),
    );
    out.insert("type".to_owned(), Value::from(type_name));
    Value::Object(out)
}

/// Encodes an ACL with its `nfs41_flags`.
#[must_use]
pub fn acl_to_json(acl: &Acl, options: TextOptions, mapper: &dyn IdMapper) -> Value {
    let aces: Vec<Value> = acl
        .iter()
        .map(|ace| ace_to_json(ace, options, mapper))
        .collect();
    let mut flags = Map::new();
    for (bit, name) in ACL_FLAGS {
        flags.insert(name.to_owned(), Value::Bool(acl.flags().contains(bit)));
    }
    trace_json_encoded(aces.len(), options.contains(TextOptions::VERBOSE));
    json!({ "acl": aces, "nfs41_flags": flags })
}

/// Encodes an ACL as pretty-printed JSON text.
#[must_use]
pub fn acl_to_json_string(acl: &Acl, options: TextOptions, mapper: &dyn IdMapper) -> String {
    format!("{:#}", acl_to_json(acl, options, mapper))
}

/// Renders collected failures as `[{"<field>": "<message>"}, ...]`.
#[must_use]
pub fn validation_report(errors: &ValidationErrors) -> Value {
    Value::Array(
        errors
            .iter()
            .map(|error| {
                let mut entry = Map::new();
                entry.insert(error.field.clone(), Value::from(error.message.as_str()));
                Value::Object(entry)
            })
            .collect(),
    )
}

/// Records failures for one entry; `prefix` is `acl.<index>`.
struct EntryErrors<'a> {
    prefix: String,
    errors: &'a mut ValidationErrors,
}

impl EntryErrors<'_> {
    fn push(&mut self, member: &str, message: impl Into<String>) {
        self.errors.push(format!("{}.{member}", self.prefix), message);
    }
}

fn decode_type(entry: &Map<String, Value>, errors: &mut EntryErrors<'_>) -> Option<AceType> {
    let Some(value) = entry.get("type") else {
        errors.push("type", "ACE 'type' field is required.");
        return None;
    };
    let Some(name) = value.as_str() else {
        errors.push("type", "ACE type must be a string.");
        return None;
    };
    let found = TYPES.iter().find(|(_, n)| *n == name).map(|(ty, _)| *ty);
    if found.is_none() {
        errors.push("type", format!("Invalid ACE type: {name}"));
    }
    found
}

/// Decodes a `perms` or `flags` object.
fn decode_bitset(
    entry: &Map<String, Value>,
    member: &str,
    what: &str,
    names: &[(u32, &str)],
    basic: &[(u32, &str)],
    errors: &mut EntryErrors<'_>,
) -> Option<u32> {
    let Some(value) = entry.get(member) else {
        errors.push(member, format!("ACE '{member}' field is required."));
        return None;
    };
    let Some(object) = value.as_object() else {
        errors.push(member, format!("ACE {member} is not a JSON object."));
        return None;
    };

    if let Some(alias) = object.get("BASIC") {
        let Some(alias) = alias.as_str() else {
            errors.push(member, format!("BASIC ACE {what}set is not a string."));
            return None;
        };
        let found = basic.iter().find(|(_, n)| *n == alias).map(|(bits, _)| *bits);
        if found.is_none() {
            errors.push(member, format!("Invalid BASIC ACE {what}set: {alias}"));
        }
        return found;
    }

    let mut bits = 0;
    for (key, value) in object {
        let Some(set) = value.as_bool() else {
            errors.push(member, format!("ACE {what} [{key}] is not boolean."));
            return None;
        };
        let Some((bit, _)) = names.iter().find(|(_, name)| name == key) else {
            errors.push(member, format!("Invalid ACE {what}: {key}"));
            return None;
        };
        if set {
            bits |= bit;
        }
    }
    Some(bits)
}

fn decode_principal(
    entry: &Map<String, Value>,
    mapper: &dyn IdMapper,
    errors: &mut EntryErrors<'_>,
) -> Option<(Principal, bool)> {
    let Some(value) = entry.get("tag") else {
        errors.push("tag", "ACE 'tag' field is required.");
        return None;
    };
    let Some(tag) = value.as_str() else {
        errors.push("tag", "ACE tag is not a string.");
        return None;
    };
    let is_group = match tag {
        "owner@" => return Some((Principal::Owner, false)),
        "group@" => return Some((Principal::Group, true)),
        "everyone@" => return Some((Principal::Everyone, false)),
        "USER" | "user" => false,
        "GROUP" | "group" => true,
        other => {
            errors.push("tag", format!("ACE tag [{other}] is invalid."));
            return None;
        }
    };

    if let Some(id) = entry.get("id") {
        let Some(id) = id.as_i64() else {
            errors.push("id", "ACE id is not an integer.");
            return None;
        };
        return match i32::try_from(id) {
            Ok(id) if id >= 0 => Some((Principal::Named(id), is_group)),
            _ => {
                errors.push("id", format!("ACE id [{id}] is not a valid user or group id."));
                None
            }
        };
    }

    if let Some(who) = entry.get("who") {
        let Some(who) = who.as_str() else {
            errors.push("who", "ACE who is not a string.");
            return None;
        };
        let id = who
            .parse::<u32>()
            .ok()
            .and_then(|id| i32::try_from(id).ok())
            .or_else(|| mapper.name_to_id(who, is_group));
        if id.is_none() {
            errors.push("who", format!("ACE who [{who}] could not be resolved."));
        }
        return id.map(|id| (Principal::Named(id), is_group));
    }

    errors.push("id", format!("ACE principal for [{tag}] is unspecified."));
    None
}

fn decode_ace(
    value: &Value,
    is_directory: bool,
    mapper: &dyn IdMapper,
    errors: &mut EntryErrors<'_>,
) -> Option<Ace> {
    let Some(entry) = value.as_object() else {
        errors
            .errors
            .push(errors.prefix.clone(), "ACE is not a JSON object.");
        return None;
    };

    let ace_type = decode_type(entry, errors);
    let mask = decode_bitset(entry, "perms", "perm", &PERMS, &BASIC_PERMS, errors);
    let flags = decode_bitset(entry, "flags", "flag", &FLAGS, &BASIC_FLAGS, errors);
    let principal = decode_principal(entry, mapper, errors);

    let (ace_type, mask, flags, (principal, is_group)) = (ace_type?, mask?, flags?, principal?);
    let flags = if is_group {
        flags | AceFlags::IDENTIFIER_GROUP
    } else {
        flags
    };
    match Ace::new(
        is_directory,
        ace_type,
        AceFlags::from_raw(flags),
        AccessMask::from_raw(mask),
        principal,
    ) {
        Ok(ace) => Some(ace),
        Err(err) => {
            errors.push("flags", err.to_string());
            None
        }
    }
}

fn decode_acl_flags(root: &Map<String, Value>, errors: &mut ValidationErrors) -> AclFlags {
    const FIELD: &str = "acl.nfs41_flags";
    let Some(value) = root.get("nfs41_flags") else {
        return AclFlags::default();
    };
    let Some(object) = value.as_object() else {
        errors.push(FIELD, "'nfs41_flags' field must be JSON object.");
        return AclFlags::default();
    };

    let mut bits = 0;
    for (key, value) in object {
        let Some(set) = value.as_bool() else {
            errors.push(FIELD, format!("ACL flag [{key}] is not boolean."));
            continue;
        };
        match ACL_FLAGS.iter().find(|(_, name)| name == key) {
            Some((bit, _)) if set => bits |= bit,
            Some(_) => {}
            None => errors.push(FIELD, format!("Invalid ACL flag: {key}")),
        }
    }
    AclFlags::from_raw(bits)
}

/// Decodes a parsed JSON document into an ACL of the given kind.
///
/// # Errors
///
/// - [`AclError::Parse`] when the document is not an object with an `acl`
///   array.
/// - [`AclError::Validation`] carrying every entry and flag failure.
pub fn acl_from_json(document: &Value, is_directory: bool, mapper: &dyn IdMapper) -> AclResult<Acl> {
    let root = document
        .as_object()
        .ok_or_else(|| ParseError::at("acl", "JSON document is not an object"))?;
    let entries = root
        .get("acl")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::at("acl", "ACES array not found"))?;

    let mut errors = ValidationErrors::new();
    let mut aces = Vec::with_capacity(entries.len());
    for (index, value) in entries.iter().enumerate() {
        let mut entry_errors = EntryErrors {
            prefix: format!("acl.{index}"),
            errors: &mut errors,
        };
        if let Some(ace) = decode_ace(value, is_directory, mapper, &mut entry_errors) {
            aces.push(ace);
        }
    }
    let flags = decode_acl_flags(root, &mut errors);

    trace_json_decoded(aces.len(), errors.len());
    errors.into_result()?;

    let mut acl = Acl::new(is_directory);
    acl.set_flags(flags);
    for ace in aces {
        acl.append(ace)?;
    }
    Ok(acl)
}

/// Parses JSON text and decodes it with [`acl_from_json`].
pub fn acl_from_json_str(text: &str, is_directory: bool, mapper: &dyn IdMapper) -> AclResult<Acl> {
    let document: Value = serde_json::from_str(text).map_err(|err| {
        AclError::from(ParseError::new(format!(
            "JSON error on line {}: {err}",
            err.line()
        )))
    })?;
    acl_from_json(&document, is_directory, mapper)
}
