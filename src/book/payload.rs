use crate::BookPost;

/// Flatten a book draft into ordered multipart text fields.
///
/// Array values are serialized as `<field>[<index>][id]` carrying only the
/// element's id, never the full object. Falsy scalars vanish from the
/// payload entirely: an empty publisher, a zero rating, and a zero user id
/// are all omitted rather than sent. The backend has always been fed this
/// shape, so the omission is kept on purpose.
pub fn flatten_fields(book: &BookPost) -> Vec<(String, String)> {
    let mut fields = Vec::new();

    push_text(&mut fields, "name", &book.name);

    for (index, author) in book.authors.iter().enumerate() {
        if let Some(id) = author.id {
            fields.push((format!("authors[{}][id]", index), id.to_string()));
        }
    }

    for (index, genre) in book.genres.iter().enumerate() {
        fields.push((format!("genres[{}][id]", index), genre.id.to_string()));
    }

    if let Some(publisher) = &book.publisher {
        push_text(&mut fields, "publisher", publisher);
    }
    if let Some(notice) = &book.notice {
        push_text(&mut fields, "notice", notice);
    }
    if book.rating != 0 {
        fields.push(("rating".to_string(), book.rating.to_string()));
    }
    if book.user_id != 0 {
        fields.push(("userId".to_string(), book.user_id.to_string()));
    }

    fields
}

fn push_text(fields: &mut Vec<(String, String)>, name: &str, value: &str) {
    if !value.is_empty() {
        fields.push((name.to_string(), value.to_string()));
    }
}
