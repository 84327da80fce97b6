//! Placeholder roles.
//!
//! A role is the semantic category of a slot. The set is closed; the
//! PresentationML token for each role is what appears in `<p:ph type="..">`
//! and in the registry data.

use phf::phf_map;
use std::fmt;

/// Semantic category of a placeholder slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlaceholderRole {
    Title,
    Body,
    Picture,
    Footer,
    SlideNumber,
    Date,
}

static ROLE_TOKENS: phf::Map<&'static str, PlaceholderRole> = phf_map! {
    "title" => PlaceholderRole::Title,
    "body" => PlaceholderRole::Body,
    "pic" => PlaceholderRole::Picture,
    "ftr" => PlaceholderRole::Footer,
    "sldNum" => PlaceholderRole::SlideNumber,
    "dt" => PlaceholderRole::Date,
};

impl PlaceholderRole {
    /// All roles, in the order their slots are written to layout markup.
    pub const ALL: [PlaceholderRole; 6] = [
        PlaceholderRole::Title,
        PlaceholderRole::Body,
        PlaceholderRole::Picture,
        PlaceholderRole::Footer,
        PlaceholderRole::SlideNumber,
        PlaceholderRole::Date,
    ];

    /// Parse a PresentationML placeholder type token (`body`, `ftr`, ...).
    pub fn from_token(token: &str) -> Option<Self> {
        ROLE_TOKENS.get(token).copied()
    }

    /// The PresentationML token for this role.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::Picture => "pic",
            Self::Footer => "ftr",
            Self::SlideNumber => "sldNum",
            Self::Date => "dt",
        }
    }

    /// Whether slots of this role carry an index.
    ///
    /// A layout has at most one title, and it is addressed by role alone.
    pub fn is_indexed(&self) -> bool {
        !matches!(self, Self::Title)
    }

    /// Base shape name used when a slot has no label of its own.
    pub(crate) fn display_name(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Body => "Text Placeholder",
            Self::Picture => "Picture Placeholder",
            Self::Footer => "Footer Placeholder",
            Self::SlideNumber => "Slide Number Placeholder",
            Self::Date => "Date Placeholder",
        }
    }
}

impl fmt::Display for PlaceholderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
