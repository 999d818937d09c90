//! proptest strategies for directory records

use crate::fixtures;
use dashboard_api::{Post, Todo, User};
use proptest::prelude::*;

/// A consistent directory snapshot
#[derive(Debug, Clone)]
pub struct DirectorySample {
    /// Users with ids `1..=users.len()`
    pub users: Vec<User>,
    /// Posts, each authored by one of `users`
    pub posts: Vec<Post>,
    /// Todos, each owned by one of `users`
    pub todos: Vec<Todo>,
}

/// Up to `max_users` users with posts and todos referencing them
///
/// Usernames are unique so per-user counts can be told apart.
pub fn directory_sample(max_users: u64) -> impl Strategy<Value = DirectorySample> {
    (1..=max_users.max(1))
        .prop_flat_map(|user_count| {
            (
                Just(user_count),
                prop::collection::vec(1..=user_count, 0..40),
                prop::collection::vec((1..=user_count, any::<bool>()), 0..60),
            )
        })
        .prop_map(|(user_count, post_owners, todo_owners)| DirectorySample {
            users: (1..=user_count)
                .map(|id| fixtures::user(id, &format!("User {id}"), &format!("user{id}")))
                .collect(),
            posts: post_owners
                .into_iter()
                .zip(1..)
                .map(|(owner, id)| fixtures::post(id, owner, "generated"))
                .collect(),
            todos: todo_owners
                .into_iter()
                .zip(1..)
                .map(|((owner, completed), id)| fixtures::todo(id, owner, "generated", completed))
                .collect(),
        })
}
