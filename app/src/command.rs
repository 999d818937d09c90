//! Line-oriented command language for the terminal front end

use crate::app::AppAction;
use crate::auth::Credentials;
use crate::notes::{NoteId, NotesAction, Priority};
use crate::router::Route;
use crate::todos::TodoListAction;
use dashboard_api::{TodoId, UserId};
use thiserror::Error;

/// Usage summary printed by `help`
pub const HELP: &str = "\
Commands:
  login <username> <password>        sign in
  logout                             sign out
  open <path>                        go to /login, /dashboard or /users/<id>
  users                              go to the dashboard
  user <id>                          open a user's detail screen
  note add [priority] <text>         add a note (important, normal, delayed)
  note rm <id>                       delete a note
  note priority <id> <priority>      change a note's priority
  todo <id>                          toggle a todo
  weather <city>                     look up current weather
  show                               redraw the current screen
  metrics                            print store metrics
  help                               show this help
  quit                               exit";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `login <username> <password>`
    Login {
        /// Username
        username: String,
        /// Password; the rest of the line
        password: String,
    },
    /// `logout`
    Logout,
    /// `open <path>`
    Open {
        /// Requested path
        path: String,
    },
    /// `users`
    Users,
    /// `user <id>`
    User {
        /// User to open
        id: UserId,
    },
    /// `note add [priority] <text>`
    NoteAdd {
        /// Urgency, `normal` unless given
        priority: Priority,
        /// Note body
        text: String,
    },
    /// `note rm <id>`
    NoteRemove {
        /// Note to delete
        id: NoteId,
    },
    /// `note priority <id> <priority>`
    NotePriority {
        /// Note to change
        id: NoteId,
        /// New urgency
        priority: Priority,
    },
    /// `todo <id>`
    Todo {
        /// Todo to toggle
        id: TodoId,
    },
    /// `weather <city>`
    Weather {
        /// City; the rest of the line
        city: String,
    },
    /// `show`
    Show,
    /// `metrics`
    Metrics,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// Why a command line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Nothing but whitespace
    #[error("empty command")]
    Empty,

    /// First word is not a command
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),

    /// Arguments missing or surplus
    #[error("usage: {0}")]
    Usage(&'static str),

    /// An id argument is not a number
    #[error("invalid id {0:?}")]
    InvalidId(String),

    /// A priority argument is not a priority
    #[error("invalid priority {0:?} (expected important, normal or delayed)")]
    InvalidPriority(String),
}

/// Split off the first whitespace-delimited word
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    Some(
        input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(word, rest)| (word, rest.trim_start())),
    )
}

fn parse_id<T>(text: &str, wrap: impl FnOnce(u64) -> T) -> Result<T, CommandError> {
    text.parse::<u64>()
        .map(wrap)
        .map_err(|_| CommandError::InvalidId(text.to_string()))
}

fn parse_note_id(text: &str) -> Result<NoteId, CommandError> {
    text.parse::<i64>()
        .map(NoteId)
        .map_err(|_| CommandError::InvalidId(text.to_string()))
}

fn parse_priority(text: &str) -> Result<Priority, CommandError> {
    text.parse()
        .map_err(|_| CommandError::InvalidPriority(text.to_string()))
}

/// Exactly one argument, or the usage error
fn single<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    match next_word(rest) {
        Some((word, "")) => Ok(word),
        _ => Err(CommandError::Usage(usage)),
    }
}

/// No arguments, or the usage error
const fn bare(rest: &str, usage: &'static str) -> Result<(), CommandError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(CommandError::Usage(usage))
    }
}

impl Command {
    /// Parse one input line
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for blank lines, unknown commands and
    /// malformed arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let (word, rest) = next_word(line).ok_or(CommandError::Empty)?;
        let rest = rest.trim_end();

        match word.to_ascii_lowercase().as_str() {
            "login" => {
                let usage = "login <username> <password>";
                let (username, password) = next_word(rest).ok_or(CommandError::Usage(usage))?;
                if password.is_empty() {
                    return Err(CommandError::Usage(usage));
                }
                Ok(Self::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                })
            },
            "logout" => bare(rest, "logout").map(|()| Self::Logout),
            "open" => Ok(Self::Open {
                path: single(rest, "open <path>")?.to_string(),
            }),
            "users" => bare(rest, "users").map(|()| Self::Users),
            "user" => Ok(Self::User {
                id: parse_id(single(rest, "user <id>")?, UserId)?,
            }),
            "note" => Self::parse_note(rest),
            "todo" => Ok(Self::Todo {
                id: parse_id(single(rest, "todo <id>")?, TodoId)?,
            }),
            "weather" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("weather <city>"));
                }
                Ok(Self::Weather {
                    city: rest.to_string(),
                })
            },
            "show" => bare(rest, "show").map(|()| Self::Show),
            "metrics" => bare(rest, "metrics").map(|()| Self::Metrics),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }

    fn parse_note(rest: &str) -> Result<Self, CommandError> {
        let usage = "note add [priority] <text> | note rm <id> | note priority <id> <priority>";
        let (sub, args) = next_word(rest).ok_or(CommandError::Usage(usage))?;

        match sub {
            "add" => {
                let add_usage = "note add [priority] <text>";
                let (first, remainder) = next_word(args).ok_or(CommandError::Usage(add_usage))?;
                // A leading priority only counts when text follows it
                match first.parse::<Priority>() {
                    Ok(priority) if !remainder.is_empty() => Ok(Self::NoteAdd {
                        priority,
                        text: remainder.to_string(),
                    }),
                    _ => Ok(Self::NoteAdd {
                        priority: Priority::default(),
                        text: args.to_string(),
                    }),
                }
            },
            "rm" | "delete" => Ok(Self::NoteRemove {
                id: parse_note_id(single(args, "note rm <id>")?)?,
            }),
            "priority" => {
                let priority_usage = "note priority <id> <priority>";
                let (id, priority) = next_word(args).ok_or(CommandError::Usage(priority_usage))?;
                Ok(Self::NotePriority {
                    id: parse_note_id(id)?,
                    priority: parse_priority(single(priority, priority_usage)?)?,
                })
            },
            _ => Err(CommandError::Usage(usage)),
        }
    }

    /// The store action this command sends, if any
    ///
    /// `show`, `metrics`, `help` and `quit` are handled by the front end itself.
    #[must_use]
    pub fn into_action(self) -> Option<AppAction> {
        let action = match self {
            Self::Login { username, password } => AppAction::Login {
                credentials: Credentials::new(username, password),
            },
            Self::Logout => AppAction::Logout,
            Self::Open { path } => AppAction::Navigate { path },
            Self::Users => AppAction::Navigate {
                path: Route::Dashboard.path(),
            },
            Self::User { id } => AppAction::Navigate {
                path: Route::UserDetail(id).path(),
            },
            Self::NoteAdd { priority, text } => AppAction::Notes(NotesAction::Add { text, priority }),
            Self::NoteRemove { id } => AppAction::Notes(NotesAction::Delete { id }),
            Self::NotePriority { id, priority } => {
                AppAction::Notes(NotesAction::UpdatePriority { id, priority })
            },
            Self::Todo { id } => AppAction::Todos(TodoListAction::Toggle { id }),
            Self::Weather { city } => AppAction::SearchWeather { city },
            Self::Show | Self::Metrics | Self::Help | Self::Quit => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_keeps_spaces_in_password() {
        assert_eq!(
            Command::parse("login admin correct horse"),
            Ok(Command::Login {
                username: "admin".to_string(),
                password: "correct horse".to_string(),
            })
        );
        assert_eq!(
            Command::parse("login admin"),
            Err(CommandError::Usage("login <username> <password>"))
        );
    }

    #[test]
    fn test_navigation_commands() {
        assert_eq!(
            Command::parse("  open /users/3  "),
            Ok(Command::Open {
                path: "/users/3".to_string()
            })
        );
        assert_eq!(Command::parse("user 7"), Ok(Command::User { id: UserId(7) }));
        assert_eq!(
            Command::parse("user seven"),
            Err(CommandError::InvalidId("seven".to_string()))
        );
        assert_eq!(Command::parse("USERS"), Ok(Command::Users));
    }

    #[test]
    fn test_metrics_is_handled_locally() {
        assert_eq!(Command::parse("metrics"), Ok(Command::Metrics));
        assert_eq!(
            Command::parse("metrics now"),
            Err(CommandError::Usage("metrics"))
        );
        assert_eq!(Command::Metrics.into_action(), None);
    }

    #[test]
    fn test_note_add_with_and_without_priority() {
        assert_eq!(
            Command::parse("note add important call mum"),
            Ok(Command::NoteAdd {
                priority: Priority::Important,
                text: "call mum".to_string(),
            })
        );
        assert_eq!(
            Command::parse("note add water the plants"),
            Ok(Command::NoteAdd {
                priority: Priority::Normal,
                text: "water the plants".to_string(),
            })
        );
        assert_eq!(
            Command::parse("note add delayed"),
            Ok(Command::NoteAdd {
                priority: Priority::Normal,
                text: "delayed".to_string(),
            })
        );
        assert!(Command::parse("note add").is_err());
    }

    #[test]
    fn test_note_edit_commands() {
        assert_eq!(
            Command::parse("note rm 1735689600000"),
            Ok(Command::NoteRemove {
                id: NoteId(1_735_689_600_000)
            })
        );
        assert_eq!(
            Command::parse("note priority 5 delayed"),
            Ok(Command::NotePriority {
                id: NoteId(5),
                priority: Priority::Delayed,
            })
        );
        assert_eq!(
            Command::parse("note priority 5 urgent"),
            Err(CommandError::InvalidPriority("urgent".to_string()))
        );
    }

    #[test]
    fn test_weather_takes_rest_of_line() {
        assert_eq!(
            Command::parse("weather New York"),
            Ok(Command::Weather {
                city: "New York".to_string()
            })
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(Command::parse("logout now"), Err(CommandError::Usage("logout")));
    }

    #[test]
    fn test_into_action() {
        assert!(matches!(
            Command::parse("user 4").ok().and_then(Command::into_action),
            Some(AppAction::Navigate { path }) if path == "/users/4"
        ));
        assert!(matches!(
            Command::parse("todo 12").ok().and_then(Command::into_action),
            Some(AppAction::Todos(TodoListAction::Toggle { id: TodoId(12) }))
        ));
        assert!(Command::Show.into_action().is_none());
        assert!(Command::Quit.into_action().is_none());
    }
}
