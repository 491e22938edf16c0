use bookpost::book::flatten_fields;
use bookpost::{Author, BookPost, Genre};

fn confirmed(id: i64) -> Author {
    Author {
        id: Some(id),
        first_name: "Jane".to_string(),
        middle_name: None,
        last_name: "Doe".to_string(),
        is_confirmed: Some(true),
    }
}

fn draft() -> BookPost {
    BookPost {
        name: "Dune".to_string(),
        authors: vec![confirmed(7)],
        genres: vec![Genre {
            id: 3,
            name: "Science Fiction".to_string(),
        }],
        publisher: Some("Chilton".to_string()),
        notice: None,
        rating: 0,
        user_id: 12,
    }
}

#[test]
fn test_arrays_flatten_to_indexed_id_fields() {
    let fields = flatten_fields(&draft());

    // Only the id travels for array elements; no nested object fields.
    let expected: Vec<(String, String)> = [
        ("name", "Dune"),
        ("authors[0][id]", "7"),
        ("genres[0][id]", "3"),
        ("publisher", "Chilton"),
        ("userId", "12"),
    ]
    .iter()
    .map(|(n, v)| (n.to_string(), v.to_string()))
    .collect();

    assert_eq!(fields, expected);
}

#[test]
fn test_multiple_array_elements_keep_their_order() {
    let mut book = draft();
    book.authors.push(confirmed(9));
    book.genres.push(Genre {
        id: 4,
        name: "Classic".to_string(),
    });

    let fields = flatten_fields(&book);
    let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();

    let a0 = names.iter().position(|n| *n == "authors[0][id]").unwrap();
    let a1 = names.iter().position(|n| *n == "authors[1][id]").unwrap();
    assert!(a0 < a1);
    assert!(fields.contains(&("authors[1][id]".to_string(), "9".to_string())));
    assert!(fields.contains(&("genres[1][id]".to_string(), "4".to_string())));
}

#[test]
fn test_falsy_scalars_are_omitted() {
    let mut book = draft();
    book.publisher = Some(String::new());
    book.notice = Some(String::new());
    book.rating = 0;
    book.user_id = 0;

    let fields = flatten_fields(&book);
    let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();

    assert!(!names.contains(&"publisher"));
    assert!(!names.contains(&"notice"));
    assert!(!names.contains(&"rating"));
    assert!(!names.contains(&"userId"));
}

#[test]
fn test_present_scalars_are_sent() {
    let mut book = draft();
    book.notice = Some("First edition".to_string());
    book.rating = 4;

    let fields = flatten_fields(&book);

    assert!(fields.contains(&("name".to_string(), "Dune".to_string())));
    assert!(fields.contains(&("publisher".to_string(), "Chilton".to_string())));
    assert!(fields.contains(&("notice".to_string(), "First edition".to_string())));
    assert!(fields.contains(&("rating".to_string(), "4".to_string())));
    assert!(fields.contains(&("userId".to_string(), "12".to_string())));
}

#[test]
fn test_author_without_id_is_skipped() {
    let mut book = draft();
    book.authors.push(Author::unconfirmed("Mark", "Twain"));

    let fields = flatten_fields(&book);
    let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();

    assert!(names.contains(&"authors[0][id]"));
    assert!(!names.contains(&"authors[1][id]"));
}
