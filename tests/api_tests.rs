use bookpost::api::LibraryClient;
use bookpost::Author;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_search_authors_sends_the_filter_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/author"))
        .and(query_param("filter", "Ja"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 7, "firstName": "Jane", "lastName": "Doe", "isConfirmed": true}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LibraryClient::new(mock_server.uri(), 5).unwrap();
    let authors = client.search_authors("Ja").await.unwrap();

    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].id, Some(7));
    assert_eq!(authors[0].is_confirmed, Some(true));
}

#[tokio::test]
async fn test_create_author_round_trips_camel_case_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/author"))
        .and(body_partial_json(serde_json::json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "isConfirmed": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 11, "firstName": "Jane", "lastName": "Doe", "isConfirmed": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LibraryClient::new(mock_server.uri(), 5).unwrap();
    let created = client
        .create_author(&Author::unconfirmed("Jane", "Doe"))
        .await
        .unwrap();

    assert_eq!(created.id, Some(11));
}

#[tokio::test]
async fn test_update_author_puts_to_the_record_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/author/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7, "firstName": "Jane", "lastName": "Doe", "isConfirmed": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LibraryClient::new(mock_server.uri(), 5).unwrap();
    let mut author = Author::unconfirmed("Jane", "Doe");
    author.id = Some(7);
    author.is_confirmed = Some(true);

    let updated = client.update_author(&author).await.unwrap();
    assert_eq!(updated.id, Some(7));
}

#[tokio::test]
async fn test_update_author_without_id_fails_locally() {
    let client = LibraryClient::new("http://localhost:1".to_string(), 5).unwrap();

    let result = client.update_author(&Author::unconfirmed("Jane", "Doe")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_merge_authors_sends_canonical_record_and_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/author/merge"))
        .and(body_partial_json(serde_json::json!({
            "author": {"id": 2, "firstName": "Jane", "lastName": "Doe"},
            "authorIds": [2, 5, 8]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 2, "firstName": "Jane", "lastName": "Doe", "isConfirmed": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LibraryClient::new(mock_server.uri(), 5).unwrap();
    let mut canonical = Author::unconfirmed("Jane", "Doe");
    canonical.id = Some(2);
    canonical.is_confirmed = Some(true);

    let merged = client.merge_authors(&canonical, &[2, 5, 8]).await.unwrap();
    assert_eq!(merged.id, Some(2));
}

#[tokio::test]
async fn test_current_user_id_and_genres() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(12)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/genre"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 3, "name": "Science Fiction"}
        ])))
        .mount(&mock_server)
        .await;

    let client = LibraryClient::new(mock_server.uri(), 5).unwrap();

    assert_eq!(client.current_user_id().await.unwrap(), 12);

    let genres = client.genres().await.unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Science Fiction");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/genre"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = LibraryClient::new(mock_server.uri(), 5).unwrap();
    let err = client.genres().await.unwrap_err();
    assert!(err.to_string().contains("503"));
}
