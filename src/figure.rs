//! Core figure identifiers and list tags.
//!
//! A *figure* is any character or glyph unit the graph tracks: a Unicode
//! character (possibly carrying a variation selector), or a symbolic glyph
//! code for shapes with no codepoint of their own.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique key of a figure.
///
/// Symbolic glyph codes are stored without their `&`/`;` delimiters, so the
/// IDS token `&CDP-8BF1;` resolves to the key `CDP-8BF1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FigureKey(String);

impl FigureKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        FigureKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FigureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FigureKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FigureKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FigureKey {
    fn from(value: &str) -> Self {
        FigureKey(value.to_string())
    }
}

impl From<String> for FigureKey {
    fn from(value: String) -> Self {
        FigureKey(value)
    }
}

impl From<&FigureKey> for FigureKey {
    fn from(value: &FigureKey) -> Self {
        value.clone()
    }
}

impl From<char> for FigureKey {
    fn from(value: char) -> Self {
        FigureKey(value.to_string())
    }
}

/// Membership in one of the external reference lists.
///
/// The declaration order is the rank order used for variant group heads:
/// `Joyo` outranks `Jinmeiyo`, which outranks `Hyogai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListTag {
    /// 常用漢字, the official list of characters for general use.
    Joyo,
    /// 人名用漢字, characters additionally permitted in personal names.
    Jinmeiyo,
    /// 表外漢字 in common reference use.
    Hyogai,
}

impl ListTag {
    pub const ALL: [ListTag; 3] = [ListTag::Joyo, ListTag::Jinmeiyo, ListTag::Hyogai];

    /// Rank of the list; lower is more important.
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListTag::Joyo => "joyo",
            ListTag::Jinmeiyo => "jinmeiyo",
            ListTag::Hyogai => "hyogai",
        }
    }
}

impl fmt::Display for ListTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
