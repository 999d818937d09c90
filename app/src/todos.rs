//! Shared todo list mirrored from the directory service
//!
//! Completion is toggled locally only. Entering a user's detail screen
//! replaces the whole list with that user's todos, so toggles made on a
//! previous user's screen do not survive.

use dashboard_api::{Todo, TodoId, UserId};
use dashboard_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// The shared todo list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListState {
    todos: Vec<Todo>,
}

impl TodoListState {
    /// Replace the whole list
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    /// Flip the completion flag of `id`; returns whether it exists
    pub fn toggle(&mut self, id: TodoId) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                true
            },
            None => false,
        }
    }

    /// Todos owned by `user`
    pub fn for_user(&self, user: UserId) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(move |t| t.user_id == user)
    }

    /// Number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Every todo
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

/// Todo list commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoListAction {
    /// Seed the list from a fetch result
    ReplaceAll(Vec<Todo>),
    /// Flip one todo's completion flag
    Toggle {
        /// Todo to flip
        id: TodoId,
    },
}

/// Reducer for [`TodoListState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoListReducer;

impl Reducer for TodoListReducer {
    type State = TodoListState;
    type Action = TodoListAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut TodoListState,
        action: TodoListAction,
        _env: &(),
    ) -> SmallVec<[Effect<TodoListAction>; 4]> {
        match action {
            TodoListAction::ReplaceAll(todos) => {
                tracing::debug!(count = todos.len(), "Todo list replaced");
                state.replace_all(todos);
            },
            TodoListAction::Toggle { id } => {
                if !state.toggle(id) {
                    tracing::debug!(todo_id = %id, "Toggle of unknown todo ignored");
                }
            },
        }
        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_testing::{ReducerTest, fixtures};

    fn seeded() -> TodoListState {
        let mut state = TodoListState::default();
        state.replace_all(fixtures::todos());
        state
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut state = seeded();
        let original = state.clone();

        assert!(state.toggle(TodoId(2)));
        assert_ne!(state, original);
        assert!(state.toggle(TodoId(2)));
        assert_eq!(state, original);
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut state = seeded();
        let original = state.clone();

        assert!(!state.toggle(TodoId(9999)));
        assert_eq!(state, original);
    }

    #[test]
    fn test_for_user_and_completed_count() {
        let state = seeded();

        assert_eq!(state.for_user(UserId(2)).count(), 4);
        assert_eq!(state.completed_count(), 6);
        assert_eq!(state.len(), 10);
    }

    #[test]
    fn test_replace_all_discards_previous_toggles() {
        let mut state = seeded();
        state.toggle(TodoId(2));

        let user_three: Vec<_> = fixtures::todos()
            .into_iter()
            .filter(|t| t.user_id == UserId(3))
            .collect();
        state.replace_all(user_three.clone());

        assert_eq!(state.todos(), user_three.as_slice());
        assert!(state.for_user(UserId(1)).next().is_none());
    }

    #[test]
    fn test_reducer_toggle() {
        ReducerTest::new(TodoListReducer)
            .with_env(())
            .given_state(seeded())
            .when_action(TodoListAction::Toggle { id: TodoId(41) })
            .then_state(|state| {
                assert_eq!(state.completed_count(), 7);
            })
            .run();
    }
}
