//! Ranking Logic
//!
//! The edit/save button state machine and the rank mapping sent to the
//! backend. Rank order is whatever the rendered list shows when the
//! user clicks save; positions are 1-based.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ApiError, IdError};
use crate::models::{check_unique, SeiyuuId, ToastKind};
use crate::sequence::Settled;

pub const EDIT_BUTTON_ID: &str = "editButton";
pub const SAVE_BUTTON_ID: &str = "saveButton";

pub const DEFAULT_EDIT_LABEL: &str = "Edit seiyuu ranking";
pub const DEFAULT_SAVE_LABEL: &str = "Save your ranking";

pub const SAVED_MESSAGE: &str = "Ranking saved.";
pub const UNREADABLE_LIST_MESSAGE: &str = "Your ranking couldn't be read from the page, so it was not saved.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankMode {
    #[default]
    Viewing,
    Editing,
}

/// What a button click asks the editor to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEffect {
    StartSorting,
    SaveRanking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: RankMode,
    pub effect: ModeEffect,
}

impl RankMode {
    pub fn click(self) -> Transition {
        match self {
            RankMode::Viewing => Transition {
                next: RankMode::Editing,
                effect: ModeEffect::StartSorting,
            },
            RankMode::Editing => Transition {
                next: RankMode::Viewing,
                effect: ModeEffect::SaveRanking,
            },
        }
    }

    pub fn is_editing(self) -> bool {
        self == RankMode::Editing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLabels {
    pub edit: String,
    pub save: String,
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            edit: DEFAULT_EDIT_LABEL.to_string(),
            save: DEFAULT_SAVE_LABEL.to_string(),
        }
    }
}

impl ButtonLabels {
    /// Blank overrides keep the default caption
    pub fn with_overrides(edit: Option<String>, save: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            edit: edit.filter(|s| !s.trim().is_empty()).unwrap_or(defaults.edit),
            save: save.filter(|s| !s.trim().is_empty()).unwrap_or(defaults.save),
        }
    }
}

/// Element id and caption of the toggle button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView<'a> {
    pub id: &'static str,
    pub label: &'a str,
}

pub fn render_button(mode: RankMode, labels: &ButtonLabels) -> ButtonView<'_> {
    match mode {
        RankMode::Viewing => ButtonView { id: EDIT_BUTTON_ID, label: &labels.edit },
        RankMode::Editing => ButtonView { id: SAVE_BUTTON_ID, label: &labels.save },
    }
}

/// Ordered `id -> position` pairs; serializes as a JSON object in list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankMapping(Vec<(SeiyuuId, u32)>);

impl RankMapping {
    pub fn from_ordered_ids<I>(ids: I) -> Result<Self, IdError>
    where
        I: IntoIterator<Item = SeiyuuId>,
    {
        let ids: Vec<SeiyuuId> = ids.into_iter().collect();
        check_unique(&ids)?;
        Ok(Self(
            ids.into_iter()
                .enumerate()
                .map(|(index, id)| (id, index as u32 + 1))
                .collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RankMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, position) in &self.0 {
            map.serialize_entry(id.as_str(), position)?;
        }
        map.end()
    }
}

/// Toast raised by a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub kind: ToastKind,
    pub message: &'static str,
}

impl Notice {
    fn error(message: &'static str) -> Self {
        Self { kind: ToastKind::Error, message }
    }
}

/// Turn the ids read at save time into a mapping, or the toast explaining
/// why nothing was sent
pub fn mapping_for_save(ids: Result<Vec<SeiyuuId>, IdError>) -> Result<RankMapping, (IdError, Notice)> {
    ids.and_then(RankMapping::from_ordered_ids)
        .map_err(|err| (err, Notice::error(UNREADABLE_LIST_MESSAGE)))
}

/// Older saves stay quiet
pub fn save_notice(outcome: &Settled<Result<(), ApiError>>) -> Option<Notice> {
    match outcome {
        Settled::Current(Ok(())) => Some(Notice { kind: ToastKind::Info, message: SAVED_MESSAGE }),
        Settled::Current(Err(err)) => Some(Notice::error(err.user_message())),
        Settled::Superseded(_) => None,
    }
}
