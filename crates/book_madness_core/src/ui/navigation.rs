//! Navigation routes between screens.
//!
//! Paths are plain strings: fixed screens use their name, per-book screens
//! append the integer id (`book_detail/7`).

use crate::model::book::BookId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const HOME: &str = "home";
const STATISTICS: &str = "statistics";
const BOOK_ADD: &str = "book_add";
const BOOK_EDIT: &str = "book_edit";
const BOOK_DETAIL: &str = "book_detail";
const COUNT_DOWN_TIMER: &str = "count_down_timer";

/// Name of the id argument in parameterized route templates.
pub const BOOK_ID_ARG: &str = "bookId";

/// One navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Statistics,
    BookAdd,
    BookEdit(BookId),
    BookDetail(BookId),
    CountDownTimer,
}

impl Route {
    /// Screens reachable from the bottom navigation bar, in display order.
    pub const BOTTOM_BAR: [Route; 3] = [Route::Home, Route::Statistics, Route::CountDownTimer];

    /// Route the app opens on.
    pub const START: Route = Route::Home;

    /// Template string with the id placeholder, e.g. `book_edit/{bookId}`.
    pub fn template(&self) -> String {
        match self {
            Self::BookEdit(_) => format!("{BOOK_EDIT}/{{{BOOK_ID_ARG}}}"),
            Self::BookDetail(_) => format!("{BOOK_DETAIL}/{{{BOOK_ID_ARG}}}"),
            other => other.to_string(),
        }
    }

    /// Book id carried by the route, if any.
    pub fn book_id(&self) -> Option<BookId> {
        match self {
            Self::BookEdit(id) | Self::BookDetail(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether the screen shows the bottom navigation bar.
    pub fn shows_bottom_bar(&self) -> bool {
        !matches!(self, Self::BookAdd | Self::BookEdit(_))
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => f.write_str(HOME),
            Self::Statistics => f.write_str(STATISTICS),
            Self::BookAdd => f.write_str(BOOK_ADD),
            Self::BookEdit(id) => write!(f, "{BOOK_EDIT}/{id}"),
            Self::BookDetail(id) => write!(f, "{BOOK_DETAIL}/{id}"),
            Self::CountDownTimer => f.write_str(COUNT_DOWN_TIMER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteParseError {
    UnknownRoute(String),
    InvalidBookId(String),
}

impl Display for RouteParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRoute(path) => write!(f, "unknown route `{path}`"),
            Self::InvalidBookId(value) => write!(f, "invalid book id `{value}` in route"),
        }
    }
}

impl Error for RouteParseError {}

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim_matches('/');
        match path.split_once('/') {
            None => match path {
                HOME => Ok(Self::Home),
                STATISTICS => Ok(Self::Statistics),
                BOOK_ADD => Ok(Self::BookAdd),
                COUNT_DOWN_TIMER => Ok(Self::CountDownTimer),
                other => Err(RouteParseError::UnknownRoute(other.to_string())),
            },
            Some((screen, raw_id)) => {
                let make: fn(BookId) -> Route = match screen {
                    BOOK_EDIT => Self::BookEdit,
                    BOOK_DETAIL => Self::BookDetail,
                    _ => return Err(RouteParseError::UnknownRoute(path.to_string())),
                };
                let id = raw_id
                    .parse::<BookId>()
                    .map_err(|_| RouteParseError::InvalidBookId(raw_id.to_string()))?;
                Ok(make(id))
            }
        }
    }
}
