//! Plain-text rendering of the active screen

use crate::analytics::{AnalyticsSummary, UserCount};
use crate::app::AppState;
use crate::notes::{NotesState, Priority};
use crate::screen::{DashboardScreen, Loadable, LoginScreen, Screen, UserDetailScreen, WeatherWidget};
use dashboard_api::FetchError;
use std::fmt::{self, Display, Formatter};

/// Message shown when the weather service does not know the city
pub const CITY_NOT_FOUND: &str = "City not found. Please try a different city name.";

/// Message shown for every other weather failure
pub const WEATHER_UNAVAILABLE: &str = "Error fetching weather data. Please try again.";

/// Shown when the service sends no condition text
pub const DEFAULT_CONDITION: &str = "Clear sky";

/// User-facing text for a failed weather search
#[must_use]
pub const fn weather_error_message(error: &FetchError) -> &'static str {
    if error.is_not_found() {
        CITY_NOT_FOUND
    } else {
        WEATHER_UNAVAILABLE
    }
}

/// Renders the active screen of an [`AppState`]
#[derive(Debug, Clone, Copy)]
pub struct Render<'a>(pub &'a AppState);

/// Render the active screen to a string
#[must_use]
pub fn render(state: &AppState) -> String {
    Render(state).to_string()
}

impl Display for Render<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.0;
        match &state.screen {
            Screen::Login(login) => login_screen(f, login),
            Screen::Dashboard(dashboard) => {
                let username = state.session.identity().map_or("", |i| i.username());
                writeln!(f, "== Dashboard ==  (logged in as {username})")?;
                users_section(f, dashboard)?;
                analytics_section(f, &dashboard.analytics(state.todos.todos()))?;
                notes_section(f, &state.notes)?;
                weather_section(f, &state.weather)
            },
            Screen::UserDetail(detail) => user_detail_screen(f, detail, state),
        }
    }
}

fn login_screen(f: &mut Formatter<'_>, login: &LoginScreen) -> fmt::Result {
    writeln!(f, "== Login ==")?;
    if let Some(error) = &login.error {
        writeln!(f, "! {error}")?;
    }
    writeln!(f, "Sign in with: login <username> <password>")
}

fn users_section(f: &mut Formatter<'_>, dashboard: &DashboardScreen) -> fmt::Result {
    writeln!(f, "\n-- Users --")?;
    match &dashboard.users {
        Loadable::Loading => writeln!(f, "Loading users..."),
        Loadable::Failed(_) => writeln!(f, "Error loading users"),
        Loadable::Loaded(users) => {
            for user in users {
                writeln!(f, "[{}] {} <{}> @{}", user.id, user.name, user.email, user.username)?;
            }
            Ok(())
        },
    }
}

fn analytics_section(
    f: &mut Formatter<'_>,
    analytics: &Loadable<Option<AnalyticsSummary>>,
) -> fmt::Result {
    writeln!(f, "\n-- Analytics --")?;
    match analytics {
        Loadable::Loading => writeln!(f, "Loading analytics..."),
        Loadable::Failed(_) => writeln!(f, "Error loading data"),
        Loadable::Loaded(None) => writeln!(f, "No users to analyse"),
        Loadable::Loaded(Some(summary)) => {
            writeln!(f, "Total Users: {}", summary.total_users)?;
            stat(f, "Most Posts", &summary.most_posts)?;
            stat(f, "Fewest Posts", &summary.fewest_posts)?;
            stat(f, "Most Completed Todos", &summary.most_completed_todos)?;
            stat(f, "Fewest Completed Todos", &summary.fewest_completed_todos)
        },
    }
}

fn stat(f: &mut Formatter<'_>, title: &str, entry: &UserCount) -> fmt::Result {
    writeln!(f, "{title}: {} (@{})", entry.count, entry.username)
}

fn notes_section(f: &mut Formatter<'_>, notes: &NotesState) -> fmt::Result {
    writeln!(f, "\n-- Notes --")?;
    if notes.is_empty() {
        return writeln!(f, "No notes yet. Add one with: note add [priority] <text>");
    }

    for priority in Priority::ALL {
        let group: Vec<_> = notes.by_priority(priority).collect();
        if group.is_empty() {
            continue;
        }
        writeln!(f, "{} ({})", heading(priority), group.len())?;
        for note in group {
            writeln!(
                f,
                "  #{} {}  [{}]",
                note.id,
                note.text,
                note.created_at.format("%Y-%m-%d %H:%M")
            )?;
        }
    }
    Ok(())
}

const fn heading(priority: Priority) -> &'static str {
    match priority {
        Priority::Important => "Important",
        Priority::Normal => "Normal",
        Priority::Delayed => "Delayed",
    }
}

fn weather_section(f: &mut Formatter<'_>, weather: &WeatherWidget) -> fmt::Result {
    writeln!(f, "\n-- Weather --")?;
    match &weather.result {
        None => writeln!(f, "Search with: weather <city>"),
        Some(Loadable::Loading) => writeln!(
            f,
            "Loading weather for {}...",
            weather.query.as_deref().unwrap_or_default()
        ),
        Some(Loadable::Failed(error)) => writeln!(f, "{}", weather_error_message(error)),
        Some(Loadable::Loaded(snapshot)) => {
            writeln!(f, "{}", snapshot.city_name)?;
            let condition = match snapshot.condition_description.as_str() {
                "" => DEFAULT_CONDITION,
                described => described,
            };
            writeln!(f, "  {:.0}°C, {condition}", snapshot.temperature)?;
            writeln!(f, "  Humidity: {:.0}%", snapshot.humidity)?;
            if let Some(icon) = snapshot.icon_url() {
                writeln!(f, "  Icon: {icon}")?;
            }
            Ok(())
        },
    }
}

fn user_detail_screen(
    f: &mut Formatter<'_>,
    detail: &UserDetailScreen,
    state: &AppState,
) -> fmt::Result {
    let user = match &detail.user {
        Loadable::Loading => return writeln!(f, "Loading user..."),
        Loadable::Failed(error) if error.is_not_found() => {
            return writeln!(f, "User not found\n(back: open /dashboard)");
        },
        Loadable::Failed(error) => {
            return writeln!(f, "{error}\n(back: open /dashboard)");
        },
        Loadable::Loaded(user) => user,
    };

    writeln!(f, "== {} ==  (back: open /dashboard)", user.name)?;
    writeln!(f, "\n-- User Information --")?;
    writeln!(f, "Name:     {}", user.name)?;
    writeln!(f, "Username: @{}", user.username)?;
    writeln!(f, "Email:    {}", user.email)?;
    writeln!(f, "Phone:    {}", user.phone)?;
    writeln!(f, "Website:  {}", user.website)?;
    writeln!(f, "Company:  {}", user.company.name)?;

    writeln!(f, "\n-- Posts --")?;
    match &detail.posts {
        Loadable::Loading => writeln!(f, "Loading posts...")?,
        Loadable::Failed(_) => writeln!(f, "Error loading posts")?,
        Loadable::Loaded(posts) => {
            for post in posts {
                writeln!(f, "* {}\n  {}", post.title, post.body.replace('\n', " "))?;
            }
        },
    }

    writeln!(f, "\n-- To-dos --")?;
    if detail.todos_loading {
        return writeln!(f, "Loading todos...");
    }
    if detail.todos_error.is_some() {
        return writeln!(f, "Error loading todos");
    }
    for todo in state.todos.for_user(detail.user_id) {
        let mark = if todo.completed { 'x' } else { ' ' };
        writeln!(f, "[{mark}] #{} {}", todo.id, todo.title)?;
    }
    writeln!(f, "(toggle with: todo <id>)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Identity;
    use crate::router::Route;
    use crate::session::Session;
    use dashboard_api::{Resource, UserId};
    use dashboard_testing::{fixtures, test_epoch};
    use dashboard_testing::weather::snapshot;

    fn dashboard_state() -> AppState {
        AppState {
            session: Session::Authenticated(Identity::new("admin")),
            route: Route::Dashboard,
            screen: Screen::Dashboard(DashboardScreen {
                users: Loadable::Loaded(fixtures::users()),
                posts: Loadable::Loaded(fixtures::posts()),
            }),
            ..AppState::default()
        }
    }

    #[test]
    fn test_login_screen_shows_rejection() {
        let state = AppState {
            screen: Screen::Login(LoginScreen {
                error: Some("Invalid username or password".to_string()),
            }),
            ..AppState::default()
        };

        assert!(render(&state).contains("! Invalid username or password"));
    }

    #[test]
    fn test_dashboard_lists_users_and_analytics() {
        let out = render(&dashboard_state());

        assert!(out.contains("logged in as admin"));
        assert!(out.contains("[1] Leanne Graham <bret@example.com> @Bret"));
        assert!(out.contains("Total Users: 4"));
        assert!(out.contains("Most Posts: 3 (@Bret)"));
        assert!(out.contains("No notes yet"));
    }

    #[test]
    fn test_notes_are_grouped_by_priority() {
        let mut state = dashboard_state();
        state.notes.add("later", Priority::Delayed, test_epoch());
        state.notes.add("now", Priority::Important, test_epoch());

        let out = render(&state);
        let important = out.find("Important (1)");
        let delayed = out.find("Delayed (1)");
        assert!(important.is_some() && delayed.is_some());
        assert!(important < delayed);
        assert!(!out.contains("Normal ("));
    }

    #[test]
    fn test_weather_messages_follow_error_kind() {
        let mut state = dashboard_state();
        state.weather.query = Some("Atlantis".to_string());
        state.weather.result = Some(Loadable::Failed(FetchError::NotFound {
            resource: Resource::Weather,
        }));
        assert!(render(&state).contains(CITY_NOT_FOUND));

        state.weather.result = Some(Loadable::Failed(FetchError::Network {
            resource: Resource::Weather,
            message: "connection reset".to_string(),
        }));
        assert!(render(&state).contains(WEATHER_UNAVAILABLE));

        state.weather.result = Some(Loadable::Loaded(snapshot("Lisbon", 21.4)));
        let out = render(&state);
        assert!(out.contains("Lisbon"));
        assert!(out.contains("21°C, scattered clouds"));
        assert!(out.contains("https://openweathermap.org/img/wn/03d@2x.png"));
    }

    #[test]
    fn test_weather_without_condition_text_reads_clear_sky() {
        let mut state = dashboard_state();
        let mut bare = snapshot("Lisbon", 21.4);
        bare.condition_description.clear();
        state.weather.result = Some(Loadable::Loaded(bare));

        assert!(render(&state).contains("21°C, Clear sky"));
    }

    #[test]
    fn test_user_detail_shows_only_that_users_todos() {
        let mut state = dashboard_state();
        state.todos.replace_all(fixtures::todos());
        state.route = Route::UserDetail(UserId(3));
        state.screen = Screen::UserDetail(UserDetailScreen {
            user_id: UserId(3),
            user: Loadable::Loaded(fixtures::user(3, "Clementine Bauch", "Samantha")),
            posts: Loadable::Loaded(Vec::new()),
            todos_loading: false,
            todos_error: None,
        });

        let out = render(&state);
        assert!(out.contains("== Clementine Bauch =="));
        assert!(out.contains("[ ] #41 aliquid amet impedit"));
        assert!(!out.contains("#1 delectus"));
    }

    #[test]
    fn test_missing_user() {
        let mut state = dashboard_state();
        state.screen = Screen::UserDetail(UserDetailScreen {
            user: Loadable::Failed(FetchError::NotFound {
                resource: Resource::User,
            }),
            ..UserDetailScreen::loading(UserId(99))
        });

        assert!(render(&state).starts_with("User not found"));
    }
}
