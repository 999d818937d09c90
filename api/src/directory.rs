//! Directory service client (users, posts, todos)

use crate::error::{FetchError, Resource};
use crate::http::get_json;
use crate::types::{Post, Todo, User, UserId};
use reqwest::Client;
use std::future::Future;

/// Read-only access to the directory service
///
/// Implemented over HTTP by [`HttpDirectoryClient`] and in memory by the
/// testing crate.
pub trait DirectoryClient: Send + Sync {
    /// `GET /users`
    fn users(&self) -> impl Future<Output = Result<Vec<User>, FetchError>> + Send;

    /// `GET /users/{id}`
    fn user(&self, id: UserId) -> impl Future<Output = Result<User, FetchError>> + Send;

    /// `GET /posts`
    fn posts(&self) -> impl Future<Output = Result<Vec<Post>, FetchError>> + Send;

    /// `GET /posts?userId={id}`
    fn posts_for_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Vec<Post>, FetchError>> + Send;

    /// `GET /todos?userId={id}`
    fn todos_for_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Vec<Todo>, FetchError>> + Send;
}

/// Directory client over HTTP
#[derive(Clone, Debug)]
pub struct HttpDirectoryClient {
    client: Client,
    base_url: String,
}

impl HttpDirectoryClient {
    /// Create a client with a default `reqwest` client
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client sharing an existing `reqwest` client
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL requests are issued against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DirectoryClient for HttpDirectoryClient {
    fn users(&self) -> impl Future<Output = Result<Vec<User>, FetchError>> + Send {
        get_json(&self.client, &self.base_url, "/users", &[], Resource::Users)
    }

    fn user(&self, id: UserId) -> impl Future<Output = Result<User, FetchError>> + Send {
        async move {
            let endpoint = format!("/users/{id}");
            get_json(&self.client, &self.base_url, &endpoint, &[], Resource::User).await
        }
    }

    fn posts(&self) -> impl Future<Output = Result<Vec<Post>, FetchError>> + Send {
        get_json(&self.client, &self.base_url, "/posts", &[], Resource::Posts)
    }

    fn posts_for_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Vec<Post>, FetchError>> + Send {
        async move {
            let user_id = id.to_string();
            get_json(
                &self.client,
                &self.base_url,
                "/posts",
                &[("userId", user_id.as_str())],
                Resource::Posts,
            )
            .await
        }
    }

    fn todos_for_user(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Vec<Todo>, FetchError>> + Send {
        async move {
            let user_id = id.to_string();
            get_json(
                &self.client,
                &self.base_url,
                "/todos",
                &[("userId", user_id.as_str())],
                Resource::Todos,
            )
            .await
        }
    }
}
