//! Frontend Models
//!
//! Data structures shared by the widgets and the backend commands.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::IdError;

/// Opaque seiyuu identifier, as found in page URLs and `data-id` attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SeiyuuId(String);

impl SeiyuuId {
    /// Accepts ASCII letters, digits, `-` and `_`; surrounding whitespace is ignored
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdError::Missing(format!("{:?}", raw)));
        }
        let well_formed = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            return Err(IdError::Malformed(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeiyuuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fails on the first id seen twice
pub fn check_unique<'a, I>(ids: I) -> Result<(), IdError>
where
    I: IntoIterator<Item = &'a SeiyuuId>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(IdError::Duplicate(id.to_string()));
        }
    }
    Ok(())
}

/// Body of the favorite toggle request
#[derive(Debug, Serialize)]
pub struct FavoriteRequest<'a> {
    pub seiyuu_id: &'a SeiyuuId,
}

/// One entry of the user's ranked favorites, with its server-rendered markup
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSeiyuu {
    pub id: SeiyuuId,
    pub content_html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}
