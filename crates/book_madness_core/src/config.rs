//! Compile-time configuration for the book store.
//!
//! Nothing here is read from the environment or from files; the rating list
//! in particular is a fixed product choice, not user-extensible.

use std::time::Duration;

/// Rating values offered by the entry/edit forms, lowest first.
pub const RATING_OPTIONS: &[&str] = &["1", "1.5", "2", "2.5", "3", "3.5", "4", "4.5", "5"];

/// Default file name for the on-device books database.
pub const DEFAULT_DB_FILE_NAME: &str = "book_madness.sqlite3";

/// How long a statement waits on a locked database before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[cfg(test)]
mod tests {
    use super::RATING_OPTIONS;

    #[test]
    fn rating_options_are_sorted_numerically() {
        let parsed: Vec<f32> = RATING_OPTIONS
            .iter()
            .map(|value| value.parse().expect("rating options are numeric"))
            .collect();
        assert!(parsed.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
