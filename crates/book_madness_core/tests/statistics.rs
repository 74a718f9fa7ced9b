use book_madness_core::{statistics_stream, Book, BookStatistics, BooksRepository};
use book_madness_core::{OfflineBooksRepository, SqliteBookStore};

fn book(
    id: i64,
    paper: bool,
    rating: Option<&str>,
    start: Option<&str>,
    finish: Option<&str>,
) -> Book {
    Book {
        rating: rating.map(str::to_string),
        start_date: start.map(str::to_string),
        finish_date: finish.map(str::to_string),
        ..Book::with_id(id, format!("Book {id}"), "Genre", paper)
    }
}

#[test]
fn statistics_count_formats_states_and_years() {
    let books = vec![
        book(1, true, Some("4.5"), Some("02.11.2023"), Some("23.01.2024")),
        book(2, false, Some("3"), Some("2024-02-01"), Some("2024-03-10")),
        book(3, true, Some("5"), Some("05.05.2023"), Some("30.06.2023")),
        book(4, true, None, Some("01.04.2024"), None),
        book(5, false, Some("4.5"), None, None),
        book(6, true, Some("great"), None, Some("someday")),
    ];

    let stats = BookStatistics::from_books(&books);

    assert_eq!(stats.total, 6);
    assert_eq!(stats.paper, 4);
    assert_eq!(stats.other_format, 2);
    assert_eq!(stats.to_read, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.finished, 4);
    assert_eq!(stats.finished_in(2024), 2);
    assert_eq!(stats.finished_in(2023), 1);
    assert_eq!(stats.finished_in(2022), 0);
    assert_eq!(stats.per_rating.get("4.5"), Some(&2));
    assert_eq!(stats.per_rating.get("great"), Some(&1));
    assert_eq!(stats.average_rating, Some((4.5 + 3.0 + 5.0 + 4.5) / 4.0));
}

#[test]
fn statistics_of_empty_library_are_zero() {
    let stats = BookStatistics::from_books(&[]);

    assert_eq!(stats, BookStatistics::default());
    assert_eq!(stats.average_rating, None);
}

#[test]
fn statistics_serialize_with_year_keys() {
    let stats = BookStatistics::from_books(&[book(1, true, None, None, Some("23.01.2024"))]);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["finished_per_year"]["2024"], 1);
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn statistics_stream_recomputes_after_writes() {
    let repo = OfflineBooksRepository::new(SqliteBookStore::open_in_memory().unwrap());
    let mut stats = statistics_stream(&repo);
    assert_eq!(stats.next().await.unwrap().unwrap().total, 0);

    repo.insert_book(&book(1, true, Some("4"), None, Some("01.01.2024"))).unwrap();

    let updated = stats.next().await.unwrap().unwrap();
    assert_eq!(updated.total, 1);
    assert_eq!(updated.finished_in(2024), 1);
}
