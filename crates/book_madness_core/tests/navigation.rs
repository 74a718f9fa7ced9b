use book_madness_core::{Route, RouteParseError};

#[test]
fn routes_format_to_expected_paths() {
    assert_eq!(Route::Home.to_string(), "home");
    assert_eq!(Route::Statistics.to_string(), "statistics");
    assert_eq!(Route::BookAdd.to_string(), "book_add");
    assert_eq!(Route::BookEdit(12).to_string(), "book_edit/12");
    assert_eq!(Route::BookDetail(3).to_string(), "book_detail/3");
    assert_eq!(Route::CountDownTimer.to_string(), "count_down_timer");
}

#[test]
fn paths_parse_back_to_routes() {
    assert_eq!("home".parse::<Route>(), Ok(Route::Home));
    assert_eq!("/book_detail/7".parse::<Route>(), Ok(Route::BookDetail(7)));
    assert_eq!("book_edit/42".parse::<Route>(), Ok(Route::BookEdit(42)));
    assert_eq!("count_down_timer".parse::<Route>(), Ok(Route::CountDownTimer));
}

#[test]
fn malformed_paths_are_rejected() {
    assert_eq!(
        "settings".parse::<Route>(),
        Err(RouteParseError::UnknownRoute("settings".to_string()))
    );
    assert_eq!(
        "book_edit/abc".parse::<Route>(),
        Err(RouteParseError::InvalidBookId("abc".to_string()))
    );
    assert_eq!(
        "home/1".parse::<Route>(),
        Err(RouteParseError::UnknownRoute("home/1".to_string()))
    );
}

#[test]
fn templates_and_bottom_bar() {
    assert_eq!(Route::BookEdit(1).template(), "book_edit/{bookId}");
    assert_eq!(Route::BookDetail(1).template(), "book_detail/{bookId}");
    assert_eq!(Route::Home.template(), "home");
    assert_eq!(Route::START, Route::Home);
    assert!(Route::BOTTOM_BAR.iter().all(Route::shows_bottom_bar));
    assert!(!Route::BookAdd.shows_bottom_bar());
    assert_eq!(Route::BookDetail(9).book_id(), Some(9));
}
