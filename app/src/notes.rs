//! Personal notes with priorities
//!
//! Notes live only in memory. Every operation is total: deleting or
//! re-prioritising an id that does not exist changes nothing.

use chrono::{DateTime, Utc};
use dashboard_core::environment::Clock;
use dashboard_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Note identifier, derived from the creation timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Note urgency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Shown first
    Important,
    /// The default
    #[default]
    Normal,
    /// Shown last
    Delayed,
}

impl Priority {
    /// Display order, most urgent first
    pub const ALL: [Self; 3] = [Self::Important, Self::Normal, Self::Delayed];

    /// Lowercase textual form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Important => "important",
            Self::Normal => "normal",
            Self::Delayed => "delayed",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that names no priority
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority {0:?} (expected important, normal or delayed)")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "important" => Ok(Self::Important),
            "normal" => Ok(Self::Normal),
            "delayed" => Ok(Self::Delayed),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// A user-authored note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Identifier, unique within its list
    pub id: NoteId,
    /// Note body
    pub text: String,
    /// Urgency
    pub priority: Priority,
    /// When the note was added
    pub created_at: DateTime<Utc>,
}

/// Ordered note list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesState {
    notes: Vec<Note>,
}

impl NotesState {
    /// Append a note created at `now`
    ///
    /// The id is `now` in milliseconds, bumped past the newest id when two
    /// notes land in the same millisecond, so ids strictly increase.
    pub fn add(&mut self, text: impl Into<String>, priority: Priority, now: DateTime<Utc>) -> NoteId {
        let stamp = now.timestamp_millis();
        let id = match self.notes.iter().map(|n| n.id.0).max() {
            Some(last) if last >= stamp => NoteId(last + 1),
            _ => NoteId(stamp),
        };

        self.notes.push(Note {
            id,
            text: text.into(),
            priority,
            created_at: now,
        });
        id
    }

    /// Remove the note with `id`; returns whether one was removed
    pub fn delete(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }

    /// Change the priority of `id` in place; returns whether it exists
    pub fn update_priority(&mut self, id: NoteId, priority: Priority) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.priority = priority;
                true
            },
            None => false,
        }
    }

    /// Notes with `priority`, in insertion order
    pub fn by_priority(&self, priority: Priority) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.priority == priority)
    }

    /// All notes, in insertion order
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a note
    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Number of notes
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether there are no notes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Note commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesAction {
    /// Add a note; surrounding whitespace is trimmed and blank text ignored
    Add {
        /// Note body
        text: String,
        /// Urgency
        priority: Priority,
    },
    /// Delete a note
    Delete {
        /// Note to delete
        id: NoteId,
    },
    /// Re-prioritise a note
    UpdatePriority {
        /// Note to change
        id: NoteId,
        /// New urgency
        priority: Priority,
    },
}

/// Reducer for [`NotesState`]; timestamps come from the injected clock
#[derive(Debug, Clone, Copy, Default)]
pub struct NotesReducer;

impl Reducer for NotesReducer {
    type State = NotesState;
    type Action = NotesAction;
    type Environment = Arc<dyn Clock>;

    fn reduce(
        &self,
        state: &mut NotesState,
        action: NotesAction,
        clock: &Arc<dyn Clock>,
    ) -> SmallVec<[Effect<NotesAction>; 4]> {
        match action {
            NotesAction::Add { text, priority } => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!("Ignoring blank note");
                } else {
                    let id = state.add(text, priority, clock.now());
                    tracing::debug!(note_id = %id, %priority, "Note added");
                }
            },
            NotesAction::Delete { id } => {
                if !state.delete(id) {
                    tracing::debug!(note_id = %id, "Delete of unknown note ignored");
                }
            },
            NotesAction::UpdatePriority { id, priority } => {
                if !state.update_priority(id, priority) {
                    tracing::debug!(note_id = %id, "Priority change of unknown note ignored");
                }
            },
        }
        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_testing::{ManualClock, ReducerTest, assertions, test_clock, test_epoch};
    use std::time::Duration;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(test_clock())
    }

    #[test]
    fn test_add_then_delete_restores_list() {
        let mut notes = NotesState::default();
        notes.add("keep me", Priority::Important, test_epoch());
        let before = notes.clone();

        let id = notes.add("x", Priority::Normal, test_epoch());
        assert!(notes.delete(id));

        assert_eq!(notes, before);
    }

    #[test]
    fn test_ids_strictly_increase_within_one_tick() {
        let mut notes = NotesState::default();
        let first = notes.add("a", Priority::Normal, test_epoch());
        let second = notes.add("b", Priority::Normal, test_epoch());

        assert_eq!(first, NoteId(test_epoch().timestamp_millis()));
        assert_eq!(second.0, first.0 + 1);
    }

    #[test]
    fn test_ids_follow_the_clock() {
        let clock = ManualClock::new(test_epoch());
        let mut notes = NotesState::default();

        let first = notes.add("a", Priority::Normal, clock.now());
        clock.advance(Duration::from_secs(2));
        let second = notes.add("b", Priority::Normal, clock.now());

        assert_eq!(second.0 - first.0, 2000);
    }

    #[test]
    fn test_update_priority_keeps_position_and_fields() {
        let mut notes = NotesState::default();
        let a = notes.add("a", Priority::Normal, test_epoch());
        let b = notes.add("b", Priority::Normal, test_epoch());
        let c = notes.add("c", Priority::Delayed, test_epoch());

        assert!(notes.update_priority(b, Priority::Important));

        let ids: Vec<_> = notes.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b, c]);
        let changed = notes.get(b).cloned();
        assert_eq!(changed.as_ref().map(|n| n.priority), Some(Priority::Important));
        assert_eq!(changed.map(|n| n.text), Some("b".to_string()));
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut notes = NotesState::default();
        notes.add("a", Priority::Normal, test_epoch());
        let before = notes.clone();

        assert!(!notes.delete(NoteId(1)));
        assert!(!notes.update_priority(NoteId(1), Priority::Delayed));
        assert_eq!(notes, before);
    }

    #[test]
    fn test_by_priority_preserves_insertion_order() {
        let mut notes = NotesState::default();
        notes.add("first", Priority::Delayed, test_epoch());
        notes.add("second", Priority::Important, test_epoch());
        notes.add("third", Priority::Delayed, test_epoch());

        let delayed: Vec<_> = notes.by_priority(Priority::Delayed).map(|n| n.text.as_str()).collect();
        assert_eq!(delayed, vec!["first", "third"]);
        assert_eq!(notes.by_priority(Priority::Normal).count(), 0);
    }

    #[test]
    fn test_priority_text_forms() {
        assert_eq!("Important".parse::<Priority>(), Ok(Priority::Important));
        assert_eq!(Priority::Delayed.to_string(), "delayed");
        assert_eq!(Priority::default(), Priority::Normal);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_reducer_trims_text() {
        ReducerTest::new(NotesReducer)
            .with_env(clock())
            .given_state(NotesState::default())
            .when_action(NotesAction::Add {
                text: "  buy milk \n".to_string(),
                priority: Priority::Important,
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.notes()[0].text, "buy milk");
                assert_eq!(state.notes()[0].created_at, test_epoch());
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_reducer_ignores_blank_text() {
        ReducerTest::new(NotesReducer)
            .with_env(clock())
            .given_state(NotesState::default())
            .when_action(NotesAction::Add {
                text: "   ".to_string(),
                priority: Priority::Normal,
            })
            .then_state(|state| {
                assert!(state.is_empty());
            })
            .run();
    }
}
