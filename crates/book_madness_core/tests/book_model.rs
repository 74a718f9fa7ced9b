use book_madness_core::{Book, BookDetails, BookUiState};

#[test]
fn book_new_has_unassigned_id_and_no_metadata() {
    let book = Book::new("Dune", "SciFi", true);

    assert!(!book.has_assigned_id());
    assert_eq!(book.rating, None);
    assert_eq!(book.author, None);
    assert!(book.validate().is_ok());
}

#[test]
fn book_serialization_uses_camel_case_fields() {
    let book = Book {
        rating: Some("4.5".to_string()),
        start_date: Some("02.11.2023".to_string()),
        finish_date: Some("23.01.2024".to_string()),
        ..Book::with_id(1, "Fourth Wing", "Fantasy", true)
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["paper"], true);
    assert_eq!(json["startDate"], "02.11.2023");
    assert_eq!(json["finishDate"], "23.01.2024");
    assert!(json["notes"].is_null());

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn ui_state_from_book_round_trips_through_details() {
    let book = Book {
        author: Some("Frank Herbert".to_string()),
        ..Book::with_id(2, "Dune", "SciFi", false)
    };

    let state = BookUiState::from(&book);
    assert!(state.is_entry_valid);
    assert_eq!(state.book_details, BookDetails::from(&book));
    assert_eq!(state.book_details.to_book(), book);
}

#[test]
fn empty_ui_state_is_invalid() {
    let state = BookUiState::empty();
    assert!(!state.is_entry_valid);
    assert_eq!(state.book_details.id, 0);
}
