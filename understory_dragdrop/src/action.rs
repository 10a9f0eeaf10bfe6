// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop actions and their cursor feedback.

use core::fmt;
use core::str::FromStr;

/// What a drop on the current target would do.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DropAction {
    /// Dropping is not possible here.
    #[default]
    None,
    /// The payload would be copied.
    Copy,
    /// The payload would be linked.
    Link,
    /// The payload would be moved.
    Move,
}

impl DropAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 4] = [Self::None, Self::Copy, Self::Link, Self::Move];

    /// The CSS cursor shown while this action is in effect.
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::None => "no-drop",
            Self::Copy => "copy",
            Self::Link => "alias",
            Self::Move => "move",
        }
    }

    /// The lowercase name of this action (`"none"`, `"copy"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Copy => "copy",
            Self::Link => "link",
            Self::Move => "move",
        }
    }

    /// Look up an action by its exact lowercase name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for DropAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a name that is not a [`DropAction`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownDropAction;

impl fmt::Display for UnknownDropAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of `none`, `copy`, `link` or `move`")
    }
}

impl core::error::Error for UnknownDropAction {}

impl FromStr for DropAction {
    type Err = UnknownDropAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(UnknownDropAction)
    }
}
