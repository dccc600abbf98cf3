// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use smol_str::SmolStr;

/// Identifier of a diagram or element, tagged by what it names.
///
/// Ids are embedded in node references (`d:<diagram_id>/<element_id>`) and printed one per
/// line by the CLI, so they are single path segments: non-empty, no `/`, no control
/// characters and no surrounding whitespace. Stored inline; cloning a `NodeRef` for every
/// result leaf does not allocate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _tag: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        check_segment(value)?;
        Ok(Self {
            value: SmolStr::new(value),
            _tag: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must not contain '/'")]
    ContainsSlash,
    #[error("id must not contain control characters")]
    ControlCharacter,
    #[error("id must not start or end with whitespace")]
    SurroundingWhitespace,
}

fn check_segment(value: &str) -> Result<(), IdError> {
    let (Some(first), Some(last)) = (value.chars().next(), value.chars().next_back()) else {
        return Err(IdError::Empty);
    };
    if first.is_whitespace() || last.is_whitespace() {
        return Err(IdError::SurroundingWhitespace);
    }
    for c in value.chars() {
        if c == '/' {
            return Err(IdError::ContainsSlash);
        }
        if c.is_control() {
            return Err(IdError::ControlCharacter);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagramTag {}
pub type DiagramId = Id<DiagramTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementTag {}
pub type ElementId = Id<ElementTag>;
