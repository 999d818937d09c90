//! In-memory directory client

use dashboard_api::{DirectoryClient, FetchError, Post, Resource, Todo, User, UserId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct Script {
    failures: HashMap<Resource, FetchError>,
    user_delays: HashMap<UserId, Duration>,
    latency: Duration,
    calls: usize,
}

/// Directory client serving fixed records from memory
///
/// Failures and latency can be scripted per resource or per user, which is
/// how tests provoke out-of-order responses.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    users: Arc<Vec<User>>,
    posts: Arc<Vec<Post>>,
    todos: Arc<Vec<Todo>>,
    script: Arc<Mutex<Script>>,
}

impl StaticDirectory {
    /// Serve the given records
    #[must_use]
    pub fn new(users: Vec<User>, posts: Vec<Post>, todos: Vec<Todo>) -> Self {
        Self {
            users: Arc::new(users),
            posts: Arc::new(posts),
            todos: Arc::new(todos),
            script: Arc::default(),
        }
    }

    /// Fail every request for `resource` with `error`
    #[must_use]
    pub fn failing(self, resource: Resource, error: FetchError) -> Self {
        self.lock().failures.insert(resource, error);
        self
    }

    /// Delay every per-user request for `user` by `delay`
    #[must_use]
    pub fn slow_for(self, user: UserId, delay: Duration) -> Self {
        self.lock().user_delays.insert(user, delay);
        self
    }

    /// Delay every request by `latency`
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = latency;
        self
    }

    /// Number of requests served so far, failed ones included
    #[must_use]
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and return its delay and scripted failure
    fn begin(&self, resource: Resource, user: Option<UserId>) -> (Duration, Option<FetchError>) {
        let mut script = self.lock();
        script.calls += 1;
        let delay = user
            .and_then(|id| script.user_delays.get(&id).copied())
            .unwrap_or(script.latency);
        (delay, script.failures.get(&resource).cloned())
    }

    fn serve<T>(
        &self,
        resource: Resource,
        user: Option<UserId>,
        answer: impl FnOnce() -> Result<T, FetchError> + Send + 'static,
    ) -> impl Future<Output = Result<T, FetchError>> + Send + 'static
    where
        T: Send + 'static,
    {
        let (delay, failure) = self.begin(resource, user);

        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match failure {
                Some(error) => Err(error),
                None => answer(),
            }
        }
    }
}

impl DirectoryClient for StaticDirectory {
    fn users(&self) -> impl Future<Output = Result<Vec<User>, FetchError>> + Send {
        let users = Arc::clone(&self.users);
        self.serve(Resource::Users, None, move || Ok(users.to_vec()))
    }

    fn user(&self, id: UserId) -> impl Future<Output = Result<User, FetchError>> + Send {
        let users = Arc::clone(&self.users);
        self.serve(Resource::User, Some(id), move || {
            users
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or(FetchError::NotFound {
                    resource: Resource::User,
                })
        })
    }

    fn posts(&self) -> impl Future<Output = Result<Vec<Post>, FetchError>> + Send {
        let posts = Arc::clone(&self.posts);
        self.serve(Resource::Posts, None, move || Ok(posts.to_vec()))
    }

    fn posts_for_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Vec<Post>, FetchError>> + Send {
        let posts = Arc::clone(&self.posts);
        self.serve(Resource::Posts, Some(id), move || {
            Ok(posts.iter().filter(|p| p.user_id == id).cloned().collect())
        })
    }

    fn todos_for_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Vec<Todo>, FetchError>> + Send {
        let todos = Arc::clone(&self.todos);
        self.serve(Resource::Todos, Some(id), move || {
            Ok(todos.iter().filter(|t| t.user_id == id).cloned().collect())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn directory() -> StaticDirectory {
        StaticDirectory::new(fixtures::users(), fixtures::posts(), fixtures::todos())
    }

    #[tokio::test]
    async fn test_filters_by_user() {
        let directory = directory();
        let todos = directory.todos_for_user(UserId(2)).await.unwrap();

        assert!(!todos.is_empty());
        assert!(todos.iter().all(|t| t.user_id == UserId(2)));
        assert_eq!(directory.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let err = directory().user(UserId(404)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let directory = directory().failing(
            Resource::Posts,
            FetchError::Status {
                resource: Resource::Posts,
                status: 500,
            },
        );

        assert!(directory.posts().await.is_err());
        assert!(directory.users().await.is_ok());
    }
}
