//! Library adapter tests against a mocked Zotero Web API.

use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zotero_mcp::config::Config;
use zotero_mcp::error::ClientError;
use zotero_mcp::library::LibraryManager;
use zotero_mcp::models::ExportFormat;

const PREFIX: &str = "/users/12345";

fn library(mock_server: &MockServer) -> LibraryManager {
    LibraryManager::new(&Config::for_testing(&mock_server.uri())).unwrap()
}

fn item_json(key: &str, version: u64, title: &str) -> Value {
    json!({
        "key": key,
        "version": version,
        "library": {"type": "user", "id": 12345},
        "meta": {"creatorSummary": "Lovelace"},
        "data": {
            "key": key,
            "version": version,
            "itemType": "book",
            "title": title,
            "creators": [{"creatorType": "author", "firstName": "Ada", "lastName": "Lovelace"}],
            "collections": ["A"]
        }
    })
}

fn book_template() -> Value {
    json!({
        "itemType": "book",
        "title": "",
        "creators": [{"creatorType": "author", "firstName": "", "lastName": ""}],
        "date": "",
        "ISBN": "",
        "tags": [],
        "collections": []
    })
}

fn write_ack(key: &str) -> Value {
    json!({
        "successful": {"0": {"key": key, "version": 1}},
        "success": {"0": key},
        "unchanged": {},
        "failed": {}
    })
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

async fn mount_book_template(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/items/new"))
        .and(query_param("itemType", "book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(book_template()))
        .mount(mock_server)
        .await;
}

/// Query pairs of every received request to `path`.
async fn queries_for(mock_server: &MockServer, request_path: &str) -> Vec<Vec<(String, String)>> {
    mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .map(|r| r.url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect())
        .collect()
}

// =============================================================================
// Listing and search
// =============================================================================

#[tokio::test]
async fn test_list_all_items_follows_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .and(query_param("start", "0"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Results", "3")
                .set_body_json(json!([item_json("K1", 1, "One"), item_json("K2", 1, "Two")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .and(query_param("start", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Results", "3")
                .set_body_json(json!([item_json("K3", 1, "Three")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config::for_testing(&mock_server.uri()).with_page_size(2);
    let library = LibraryManager::new(&config).unwrap();

    let items = library.list_all_items().await.unwrap();
    let keys: Vec<_> = items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["K1", "K2", "K3"]);
}

#[tokio::test]
async fn test_requests_carry_api_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/collections")))
        .and(header("Zotero-API-Key", "test-key"))
        .and(header("Zotero-API-Version", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let collections = library(&mock_server).list_collections().await.unwrap();
    assert!(collections.is_empty());
}

#[tokio::test]
async fn test_group_library_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/groups/777/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([item_json("G1", 1, "G")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config::new("777", zotero_mcp::config::LibraryType::Group, "")
        .with_api_url(&mock_server.uri());
    let items = LibraryManager::new(&config).unwrap().list_all_items().await.unwrap();
    assert_eq!(items[0].key, "G1");
}

#[tokio::test]
async fn test_search_sends_only_query_when_filters_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let library = library(&mock_server);
    library.search_items("x", "", "").await.unwrap();
    library.search_items("x", "book", "").await.unwrap();

    let queries = queries_for(&mock_server, &format!("{PREFIX}/items")).await;
    assert_eq!(queries.len(), 2);

    let filters: Vec<Vec<(String, String)>> = queries
        .into_iter()
        .map(|q| q.into_iter().filter(|(k, _)| k != "limit").collect())
        .collect();
    assert_eq!(filters[0], vec![("q".to_string(), "x".to_string())]);
    assert_eq!(
        filters[1],
        vec![("q".to_string(), "x".to_string()), ("itemType".to_string(), "book".to_string())]
    );
}

#[tokio::test]
async fn test_search_requests_a_full_page() {
    let mock_server = MockServer::start().await;

    let items: Vec<Value> = (0..30).map(|i| item_json(&format!("K{i}"), 1, "Hit")).collect();
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .and(query_param("q", "x"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(items)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let found = library(&mock_server).search_items("x", "", "").await.unwrap();
    assert_eq!(found.len(), 30);
}

#[tokio::test]
async fn test_search_with_tag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .and(query_param("q", "engines"))
        .and(query_param("tag", "history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([item_json("K1", 1, "Engines")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = library(&mock_server).search_items("engines", "", "history").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title(), Some("Engines"));
}

// =============================================================================
// Item writes
// =============================================================================

#[tokio::test]
async fn test_create_item_drops_unknown_fields() {
    let mock_server = MockServer::start().await;
    mount_book_template(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(write_ack("NEW1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = library(&mock_server)
        .create_item(&fields(json!({"itemType": "book", "title": "X", "bogusField": "y"})))
        .await
        .unwrap();
    assert!(created);

    let requests = mock_server.received_requests().await.unwrap();
    let post = requests.iter().find(|r| r.method.as_str() == "POST").unwrap();
    let body: Vec<Value> = post.body_json().unwrap();

    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["title"], "X");
    assert_eq!(body[0]["itemType"], "book");
    assert!(body[0].get("bogusField").is_none());
    assert_eq!(body[0]["ISBN"], "");
}

#[tokio::test]
async fn test_create_item_defaults_to_journal_article() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/new"))
        .and(query_param("itemType", "journalArticle"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"itemType": "journalArticle", "title": ""})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(write_ack("NEW2")))
        .mount(&mock_server)
        .await;

    let created = library(&mock_server).create_item(&fields(json!({"title": "T"}))).await.unwrap();
    assert!(created);
}

#[tokio::test]
async fn test_create_item_rejected_write() {
    let mock_server = MockServer::start().await;
    mount_book_template(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "successful": {},
            "success": {},
            "unchanged": {},
            "failed": {"0": {"key": null, "code": 400, "message": "Invalid date"}}
        })))
        .mount(&mock_server)
        .await;

    let created = library(&mock_server)
        .create_item(&fields(json!({"itemType": "book", "date": 42})))
        .await
        .unwrap();
    assert!(!created);
}

#[tokio::test]
async fn test_unknown_item_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/new"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid item type 'spaceship'"))
        .mount(&mock_server)
        .await;

    let err = library(&mock_server)
        .create_item(&fields(json!({"itemType": "spaceship"})))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnknownItemType { .. }));
}

#[tokio::test]
async fn test_update_item_patches_recognized_fields() {
    let mock_server = MockServer::start().await;
    mount_book_template(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items/K1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json("K1", 3, "Old")))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{PREFIX}/items/K1")))
        .and(header("If-Unmodified-Since-Version", "3"))
        .and(body_json(json!({"title": "New"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let updated = library(&mock_server)
        .update_item("K1", &fields(json!({"title": "New", "bogusField": 1})))
        .await
        .unwrap();
    assert!(updated);
}

#[tokio::test]
async fn test_update_item_without_recognized_fields_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_book_template(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items/K1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json("K1", 3, "Old")))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let updated = library(&mock_server)
        .update_item("K1", &fields(json!({"bogusField": 1})))
        .await
        .unwrap();
    assert!(!updated);
}

#[tokio::test]
async fn test_update_item_version_conflict() {
    let mock_server = MockServer::start().await;
    mount_book_template(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items/K1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json("K1", 3, "Old")))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{PREFIX}/items/K1")))
        .respond_with(ResponseTemplate::new(412).set_body_string("Item has been modified"))
        .mount(&mock_server)
        .await;

    let err = library(&mock_server)
        .update_item("K1", &fields(json!({"title": "New"})))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::PreconditionFailed { .. }));
}

#[tokio::test]
async fn test_delete_item_sends_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items/K9")))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json("K9", 7, "Gone")))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{PREFIX}/items/K9")))
        .and(header("If-Unmodified-Since-Version", "7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(library(&mock_server).delete_item("K9").await.unwrap());
}

#[tokio::test]
async fn test_delete_missing_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items/NOPE")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Item not found"))
        .mount(&mock_server)
        .await;

    let err = library(&mock_server).delete_item("NOPE").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}

// =============================================================================
// Collections
// =============================================================================

#[tokio::test]
async fn test_create_collection_omits_empty_parent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/collections")))
        .and(body_json(json!([{"name": "Notes"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(write_ack("C9")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let library = library(&mock_server);
    assert!(library.create_collection("Notes", None).await.unwrap());
    assert!(library.create_collection("Notes", Some("")).await.unwrap());
}

#[tokio::test]
async fn test_create_collection_with_parent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/collections")))
        .and(body_json(json!([{"name": "Notes", "parentCollection": "P1"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(write_ack("C9")))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(library(&mock_server).create_collection("Notes", Some("P1")).await.unwrap());
}

#[tokio::test]
async fn test_add_item_to_collection_appends_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items/K1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json("K1", 5, "One")))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{PREFIX}/items/K1")))
        .and(header("If-Unmodified-Since-Version", "5"))
        .and(body_json(json!({"collections": ["A", "C1"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    library(&mock_server).add_item_to_collection("K1", "C1").await.unwrap();
}

#[tokio::test]
async fn test_add_item_already_in_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items/K1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json("K1", 5, "One")))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{PREFIX}/items/K1")))
        .and(body_json(json!({"collections": ["A"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    library(&mock_server).add_item_to_collection("K1", "A").await.unwrap();
}

// =============================================================================
// Export
// =============================================================================

const BIBTEX: &str = "\n@book{lovelace_one,\n\ttitle = {One},\n}\n\n@book{lovelace_two,\n\ttitle = {Two},\n}\n";

#[tokio::test]
async fn test_export_collection_is_one_batched_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/collections/C1/items")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([item_json("K1", 1, "One"), item_json("K2", 1, "Two")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .and(query_param("itemKey", "K1,K2"))
        .and(query_param("format", "bibtex"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BIBTEX))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bundle = library(&mock_server)
        .export_collection("C1", ExportFormat::Bibtex)
        .await
        .unwrap();

    assert_eq!(bundle.len(), 2);
    assert!(bundle.entries[0].starts_with("@book{lovelace_one"));
    assert!(bundle.entries[1].starts_with("@book{lovelace_two"));
}

#[tokio::test]
async fn test_export_sends_limit_covering_every_key() {
    let mock_server = MockServer::start().await;

    let items: Vec<Value> = (0..30).map(|i| item_json(&format!("K{i}"), 1, "Entry")).collect();
    let keys: Vec<String> = (0..30).map(|i| format!("K{i}")).collect();
    let body: String = (0..30).map(|i| format!("@book{{entry{i},\n\ttitle = {{Entry}},\n}}\n\n")).collect();

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/collections/C1/items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(items)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .and(query_param("itemKey", keys.join(",")))
        .and(query_param("format", "bibtex"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bundle = library(&mock_server)
        .export_collection("C1", ExportFormat::Bibtex)
        .await
        .unwrap();
    assert_eq!(bundle.len(), 30);
}

#[tokio::test]
async fn test_export_library_in_ris() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([item_json("K1", 1, "One")])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .and(query_param("itemKey", "K1"))
        .and(query_param("format", "ris"))
        .respond_with(ResponseTemplate::new(200).set_body_string("TY  - BOOK\nTI  - One\nER  - \n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bundle = library(&mock_server).export_library(ExportFormat::Ris).await.unwrap();
    assert_eq!(bundle.entries, vec!["TY  - BOOK\nTI  - One\nER  -"]);
}

#[tokio::test]
async fn test_export_empty_collection_skips_export_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/collections/EMPTY/items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let bundle = library(&mock_server)
        .export_collection("EMPTY", ExportFormat::Bibtex)
        .await
        .unwrap();
    assert!(bundle.is_empty());
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_rate_limited_reads_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/collections")))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&mock_server)
        .await;

    let err = library(&mock_server).list_collections().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::RateLimited { retry_after } if retry_after == std::time::Duration::from_secs(12)
    ));
}

#[tokio::test]
async fn test_forbidden_is_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/collections")))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&mock_server)
        .await;

    let err = library(&mock_server).list_collections().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { status: 403, .. }));
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/items")))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let err = library(&mock_server).list_all_items().await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 503, .. }));
}
