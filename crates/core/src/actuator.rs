// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actuator identifiers, actuator sets and the configured universe

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Characters with a meaning in the progress log header line
pub const RESERVED_CHARS: [char; 3] = ['|', ',', ';'];

/// Stable identifier of one binary-state output (a gas valve)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActuatorId(pub String);

impl ActuatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActuatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActuatorId {
    fn from(s: &str) -> Self {
        ActuatorId(s.to_string())
    }
}

impl From<String> for ActuatorId {
    fn from(s: String) -> Self {
        ActuatorId(s)
    }
}

/// The two commands an actuator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorCommand {
    Activate,
    Deactivate,
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorCommand::Activate => f.write_str("activate"),
            ActuatorCommand::Deactivate => f.write_str("deactivate"),
        }
    }
}

/// Unordered set of actuators; empty means "nothing active"
///
/// Iteration is in ascending id order so command traces are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActuatorSet(BTreeSet<ActuatorId>);

impl ActuatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, id: &ActuatorId) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<ActuatorId>) -> bool {
        self.0.insert(id.into())
    }

    pub fn remove(&mut self, id: &ActuatorId) -> bool {
        self.0.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActuatorId> {
        self.0.iter()
    }

    /// Actuators in `self` that are not in `other`
    pub fn difference(&self, other: &ActuatorSet) -> ActuatorSet {
        ActuatorSet(self.0.difference(&other.0).cloned().collect())
    }

    /// Actuators present in both sets
    pub fn intersection(&self, other: &ActuatorSet) -> ActuatorSet {
        ActuatorSet(self.0.intersection(&other.0).cloned().collect())
    }

    /// Ids joined with `sep`, in ascending order
    pub fn joined(&self, sep: &str) -> String {
        self.0
            .iter()
            .map(ActuatorId::as_str)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl fmt::Display for ActuatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("(none)")
        } else {
            f.write_str(&self.joined(" + "))
        }
    }
}

impl<I: Into<ActuatorId>> FromIterator<I> for ActuatorSet {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        ActuatorSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a ActuatorSet {
    type Item = &'a ActuatorId;
    type IntoIter = std::collections::btree_set::Iter<'a, ActuatorId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors in the configured actuator universe
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UniverseError {
    #[error("actuator universe is empty")]
    Empty,
    #[error("invalid actuator id {0:?}: ids must be non-empty and contain no whitespace or '|', ',', ';'")]
    InvalidId(String),
    #[error("duplicate actuator id: {0}")]
    Duplicate(ActuatorId),
}

/// The fixed, known set of actuators a controller drives, in configured order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    ids: Vec<ActuatorId>,
}

impl Universe {
    pub fn new(ids: impl IntoIterator<Item = impl Into<ActuatorId>>) -> Result<Self, UniverseError> {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();
        for id in ids {
            let id: ActuatorId = id.into();
            if !is_valid_id(id.as_str()) {
                return Err(UniverseError::InvalidId(id.0));
            }
            if !seen.insert(id.clone()) {
                return Err(UniverseError::Duplicate(id));
            }
            ordered.push(id);
        }
        if ordered.is_empty() {
            return Err(UniverseError::Empty);
        }
        Ok(Self { ids: ordered })
    }

    pub fn contains(&self, id: &ActuatorId) -> bool {
        self.ids.contains(id)
    }

    /// Ids in configured order
    pub fn iter(&self) -> impl Iterator<Item = &ActuatorId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn to_set(&self) -> ActuatorSet {
        self.ids.iter().cloned().collect()
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(|c| c.is_whitespace() || RESERVED_CHARS.contains(&c))
}

#[cfg(test)]
#[path = "actuator_tests.rs"]
mod tests;
