//! Fixture records shaped like the directory service's data
//!
//! | user | username  | posts | todos | completed |
//! |------|-----------|-------|-------|-----------|
//! | 1    | Bret      | 3     | 3     | 2         |
//! | 2    | Antonette | 1     | 4     | 3         |
//! | 3    | Samantha  | 2     | 2     | 0         |
//! | 4    | Karianne  | 0     | 1     | 1         |

use dashboard_api::{Address, Company, Geo, Post, PostId, Todo, TodoId, User, UserId};

/// Username accepted by test authenticators
pub const FIXTURE_USERNAME: &str = "admin";

/// Password accepted by test authenticators
pub const FIXTURE_PASSWORD: &str = "admin123";

/// Build a user with the given id, name and username
#[must_use]
pub fn user(id: u64, name: &str, username: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username.to_lowercase()),
        address: Address {
            street: "Kulas Light".to_string(),
            suite: format!("Apt. {id}"),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
            geo: Geo {
                lat: "-37.3159".to_string(),
                lng: "81.1496".to_string(),
            },
        },
        phone: "1-770-736-8031".to_string(),
        website: format!("{}.org", username.to_lowercase()),
        company: Company {
            name: "Romaguera-Crona".to_string(),
            catch_phrase: "Multi-layered client-server neural-net".to_string(),
            bs: "harness real-time e-markets".to_string(),
        },
    }
}

/// Build a post
#[must_use]
pub fn post(id: u64, user_id: u64, title: &str) -> Post {
    Post {
        id: PostId(id),
        user_id: UserId(user_id),
        title: title.to_string(),
        body: format!("body of {title}"),
    }
}

/// Build a todo
#[must_use]
pub fn todo(id: u64, user_id: u64, title: &str, completed: bool) -> Todo {
    Todo {
        id: TodoId(id),
        user_id: UserId(user_id),
        title: title.to_string(),
        completed,
    }
}

/// Four users
#[must_use]
pub fn users() -> Vec<User> {
    vec![
        user(1, "Leanne Graham", "Bret"),
        user(2, "Ervin Howell", "Antonette"),
        user(3, "Clementine Bauch", "Samantha"),
        user(4, "Patricia Lebsack", "Karianne"),
    ]
}

/// Six posts spread over users 1 to 3
#[must_use]
pub fn posts() -> Vec<Post> {
    vec![
        post(1, 1, "sunt aut facere"),
        post(2, 1, "qui est esse"),
        post(3, 1, "ea molestias quasi"),
        post(11, 2, "et ea vero quia"),
        post(21, 3, "asperiores ea ipsam"),
        post(22, 3, "dolor sint quo"),
    ]
}

/// Ten todos, six of them completed
#[must_use]
pub fn todos() -> Vec<Todo> {
    vec![
        todo(1, 1, "delectus aut autem", true),
        todo(2, 1, "quis ut nam facilis", false),
        todo(3, 1, "fugiat veniam minus", true),
        todo(21, 2, "suscipit repellat esse", true),
        todo(22, 2, "distinctio vitae autem", true),
        todo(23, 2, "et itaque necessitatibus", false),
        todo(24, 2, "adipisci non ad dicta", true),
        todo(41, 3, "aliquid amet impedit", false),
        todo(42, 3, "rerum perferendis error", false),
        todo(61, 4, "odit optio omnis", true),
    ]
}
