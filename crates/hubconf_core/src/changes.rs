//! Human-readable differences between two configurations, and the
//! confirmation gate shown before applying them.

use crate::config::SECRET_KEYS;
use crate::errors::{HubConfError, HubConfResult};
use crate::reconcile::encode;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "changes_tests.rs"]
mod tests;

const MASKED: &str = "********";

/// Old and new value of a changed leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub old_value: Value,
    pub new_value: Value,
}

/// Paths added, removed and changed between two configurations.
///
/// Paths are dotted (`labels.bug.color`). Sequence items are addressed by
/// value (`hooks.ci.events[push]`) since their order is not significant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigChanges {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub changed: BTreeMap<String, ValueChange>,
}

impl ConfigChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// One line per change: `+ path`, `- path` or `~ path: old -> new`.
    /// Values under secret keys are masked.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(self.added.iter().map(|path| format!("+ {}", path)));
        lines.extend(self.removed.iter().map(|path| format!("- {}", path)));
        for (path, change) in &self.changed {
            if is_secret_path(path) {
                lines.push(format!("~ {}: {} -> {}", path, MASKED, MASKED));
            } else {
                lines.push(format!(
                    "~ {}: {} -> {}",
                    path, change.old_value, change.new_value
                ));
            }
        }
        lines
    }
}

/// Compares `desired` against `current`.
///
/// Top-level keys of `current` that `desired` does not mention are ignored:
/// a configuration file only speaks for the sections it contains.
pub fn diff_configs(current: &Value, desired: &Value) -> ConfigChanges {
    let mut changes = ConfigChanges::default();
    let current = match (current, desired) {
        (Value::Object(current), Value::Object(desired)) => Value::Object(
            current
                .iter()
                .filter(|(key, _)| desired.contains_key(*key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<Map<String, Value>>(),
        ),
        _ => current.clone(),
    };
    walk("", &current, desired, &mut changes);
    changes
}

fn walk(path: &str, current: &Value, desired: &Value, changes: &mut ConfigChanges) {
    match (current, desired) {
        (Value::Object(current), Value::Object(desired)) => {
            for (key, desired_value) in desired {
                let child = child_path(path, key);
                match current.get(key) {
                    Some(current_value) => walk(&child, current_value, desired_value, changes),
                    None => {
                        changes.added.insert(child);
                    }
                }
            }
            for key in current.keys().filter(|key| !desired.contains_key(*key)) {
                changes.removed.insert(child_path(path, key));
            }
        }
        (Value::Array(current), Value::Array(desired)) => {
            let mut unmatched: Vec<&Value> = current.iter().collect();
            for item in desired {
                match unmatched.iter().position(|c| equivalent(c, item)) {
                    Some(index) => {
                        unmatched.remove(index);
                    }
                    None => {
                        changes.added.insert(item_path(path, item));
                    }
                }
            }
            for item in unmatched {
                changes.removed.insert(item_path(path, item));
            }
        }
        _ => {
            if !equivalent(current, desired) {
                changes.changed.insert(
                    path.to_string(),
                    ValueChange {
                        old_value: current.clone(),
                        new_value: desired.clone(),
                    },
                );
            }
        }
    }
}

/// Structural equality where numbers compare by value (`1 == 1.0`) and
/// sequences compare as multisets.
fn equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x == y || matches!((x.as_f64(), y.as_f64()), (Some(x), Some(y)) if x == y)
        }
        (Value::Array(x), Value::Array(y)) => {
            if x.len() != y.len() {
                return false;
            }
            let mut unmatched: Vec<&Value> = y.iter().collect();
            x.iter().all(|item| {
                match unmatched.iter().position(|other| equivalent(item, other)) {
                    Some(index) => {
                        unmatched.remove(index);
                        true
                    }
                    None => false,
                }
            })
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| equivalent(value, other)))
        }
        _ => a == b,
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn item_path(path: &str, item: &Value) -> String {
    match item {
        Value::String(s) => format!("{}[{}]", path, s),
        other => format!("{}[{}]", path, other),
    }
}

fn is_secret_path(path: &str) -> bool {
    path.rsplit('.')
        .next()
        .is_some_and(|key| SECRET_KEYS.contains(&key))
}

/// Where proposed changes are shown and approved.
pub trait ChangeSink {
    /// Shows the changes about to be applied.
    fn present(&mut self, changes: &ConfigChanges);

    /// Asks a yes/no question. `true` means go ahead. `default` is the
    /// answer given by an empty reply.
    fn confirm(&mut self, question: &str, default: bool) -> bool;
}

/// Logs changes and approves them without asking anyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ChangeSink for LogSink {
    fn present(&mut self, changes: &ConfigChanges) {
        for line in changes.lines() {
            info!("{}", line);
        }
    }

    fn confirm(&mut self, question: &str, _default: bool) -> bool {
        debug!(question = question, "Approving automatically");
        true
    }
}

/// Question asked before applying changes.
pub const APPLY_QUESTION: &str = "Apply these changes?";

/// Presents the changes from `current` to `desired` and asks whether to
/// apply them.
///
/// Returns `Ok(false)` without asking anything when there is nothing to
/// change, and when the user declines with `abort` unset.
///
/// # Errors
///
/// Returns [`HubConfError::ConfirmationDeclined`] when the user declines and
/// `abort` is set.
pub fn confirm_changes(
    current: &Value,
    desired: &Value,
    abort: bool,
    sink: &mut dyn ChangeSink,
) -> HubConfResult<bool> {
    let changes = diff_configs(current, desired);
    if changes.is_empty() {
        debug!("No changes found");
        return Ok(false);
    }

    sink.present(&changes);
    if sink.confirm(APPLY_QUESTION, false) {
        return Ok(true);
    }

    warn!("Changes declined");
    if abort {
        Err(HubConfError::ConfirmationDeclined)
    } else {
        Ok(false)
    }
}

/// [`confirm_changes`] for typed configurations.
pub fn confirm_config_changes<T: Serialize>(
    current: &T,
    desired: &T,
    abort: bool,
    sink: &mut dyn ChangeSink,
) -> HubConfResult<bool> {
    confirm_changes(&encode(current)?, &encode(desired)?, abort, sink)
}
