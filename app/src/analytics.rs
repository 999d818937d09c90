//! Summary statistics over the resident users, posts and todos

use dashboard_api::{Post, Todo, User, UserId};
use std::collections::HashMap;

/// One user's count for some metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCount {
    /// The user
    pub user_id: UserId,
    /// The user's handle
    pub username: String,
    /// The metric's value
    pub count: usize,
}

/// Derived statistics, recomputed from current snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSummary {
    /// Number of users
    pub total_users: usize,
    /// First user after sorting post counts descending
    pub most_posts: UserCount,
    /// Last user after sorting post counts descending
    pub fewest_posts: UserCount,
    /// First user after sorting completed-todo counts descending
    pub most_completed_todos: UserCount,
    /// Last user after sorting completed-todo counts descending
    pub fewest_completed_todos: UserCount,
}

impl AnalyticsSummary {
    /// Compute the summary, or `None` when there are no users
    ///
    /// Ties keep user order: the earliest tied user is "most", the latest
    /// tied user is "fewest".
    #[must_use]
    pub fn compute(users: &[User], posts: &[Post], todos: &[Todo]) -> Option<Self> {
        let (most_posts, fewest_posts) = extremes(posts_per_user(users, posts))?;
        let (most_completed_todos, fewest_completed_todos) =
            extremes(completed_todos_per_user(users, todos))?;

        Some(Self {
            total_users: users.len(),
            most_posts,
            fewest_posts,
            most_completed_todos,
            fewest_completed_todos,
        })
    }
}

/// Posts authored by each user, in user order
#[must_use]
pub fn posts_per_user(users: &[User], posts: &[Post]) -> Vec<UserCount> {
    count_per_user(users, posts.iter().map(|p| p.user_id))
}

/// Completed todos owned by each user, in user order
#[must_use]
pub fn completed_todos_per_user(users: &[User], todos: &[Todo]) -> Vec<UserCount> {
    count_per_user(
        users,
        todos.iter().filter(|t| t.completed).map(|t| t.user_id),
    )
}

fn count_per_user(users: &[User], owners: impl Iterator<Item = UserId>) -> Vec<UserCount> {
    let mut counts: HashMap<UserId, usize> = HashMap::new();
    for owner in owners {
        *counts.entry(owner).or_default() += 1;
    }

    users
        .iter()
        .map(|user| UserCount {
            user_id: user.id,
            username: user.username.clone(),
            count: counts.get(&user.id).copied().unwrap_or(0),
        })
        .collect()
}

/// First and last entries after a stable descending sort
fn extremes(mut counts: Vec<UserCount>) -> Option<(UserCount, UserCount)> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    let fewest = counts.last()?.clone();
    let most = counts.swap_remove(0);
    Some((most, fewest))
}
