//! Choice-group resolver
//!
//! The format defines the "exactly one of" rule once and applies it to every
//! choice position, so one routine serves every call site: medication,
//! effective time, dose, rate, as-needed, bounds and annotation author all
//! resolve through [`resolve`]. Call sites map each populated wire field into
//! the target sum type *before* resolving, which is what lets a single
//! signature cover groups whose alternatives have different types.

use crate::error::{Error, Result};

/// Resolve a choice group from its decoded wire fields.
///
/// Zero populated members is "unspecified" (`None`), which the caller treats
/// as an error only where the group is mandatory (see [`require`]). More than
/// one populated member is always a conflict, named after the offending kinds.
pub fn resolve<T>(
    group: &'static str,
    members: Vec<(&'static str, Option<T>)>,
) -> Result<Option<T>> {
    let mut populated = Vec::new();
    let mut selected = None;

    for (kind, value) in members {
        if let Some(value) = value {
            populated.push(kind);
            selected = Some(value);
        }
    }

    match populated.len() {
        0 => Ok(None),
        1 => Ok(selected),
        _ => Err(Error::ChoiceGroupConflict { group, populated }),
    }
}

/// [`resolve`] for groups that are mandatory in their context.
pub fn require<T>(group: &'static str, members: Vec<(&'static str, Option<T>)>) -> Result<T> {
    resolve(group, members)?.ok_or(Error::ChoiceGroupEmpty { group })
}
