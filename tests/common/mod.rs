//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use maikani::aggregator::Aggregator;
use maikani::cache::SubjectCache;
use maikani::data::{Subject, SubjectId, WaniKaniClient};
use reqwest::Client;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

/// JSON of a subject resource as WaniKani returns it
pub fn subject_json(id: SubjectId) -> Value {
    json!({
        "id": id,
        "object": "kanji",
        "url": format!("https://api.wanikani.com/v2/subjects/{}", id),
        "data_updated_at": "2018-03-29T23:14:30.805034Z",
        "data": {
            "created_at": "2012-02-27T19:55:19.000000Z",
            "level": 1,
            "slug": format!("kanji-{}", id),
            "hidden_at": null,
            "document_url": format!("https://www.wanikani.com/kanji/{}", id),
            "characters": "一",
            "meanings": [{"meaning": "One", "primary": true, "accepted_answer": true}],
            "auxiliary_meanings": [],
            "readings": [
                {"type": "onyomi", "primary": true, "accepted_answer": true, "reading": "いち"}
            ],
            "component_subject_ids": [1],
            "amalgamation_subject_ids": [],
            "visually_similar_subject_ids": [],
            "meaning_mnemonic": "Lying on the ground.",
            "meaning_hint": null,
            "reading_mnemonic": "Itchy.",
            "reading_hint": null
        }
    })
}

pub fn subject(id: SubjectId) -> Subject {
    serde_json::from_value(subject_json(id)).expect("fixture subject should parse")
}

/// JSON of a review statistics collection for `ids`
pub fn statistics_json(ids: &[SubjectId]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": 1000 + id,
                "object": "review_statistic",
                "data": {
                    "subject_id": id,
                    "subject_type": "kanji",
                    "percentage_correct": 50
                }
            })
        })
        .collect();
    json!({ "object": "collection", "total_count": ids.len(), "data": data })
}

/// Mounts a review statistics endpoint returning `ids`
pub async fn mount_statistics(server: &MockServer, ids: &[SubjectId]) {
    Mock::given(method("GET"))
        .and(path("/review_statistics"))
        .and(query_param("percentages_less_than", "75"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(statistics_json(ids)))
        .mount(server)
        .await;
}

/// Mounts a subjects endpoint expecting exactly `requested` and answering with `returned`
pub async fn mount_subjects(
    server: &MockServer,
    requested: &str,
    returned: &[SubjectId],
    expected_calls: u64,
) {
    let data: Vec<Value> = returned.iter().map(|id| subject_json(*id)).collect();
    Mock::given(method("GET"))
        .and(path("/subjects"))
        .and(query_param("ids", requested))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Number of requests the mock server received on the subjects endpoint
pub async fn subject_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/subjects")
        .count()
}

/// URI of a local port with nothing listening on it
pub fn unreachable_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn aggregator(server_uri: &str) -> (Aggregator, Arc<SubjectCache>) {
    let cache = Arc::new(SubjectCache::new());
    let client = WaniKaniClient::with_client(Client::new(), server_uri);
    (Aggregator::new(client, Arc::clone(&cache)), cache)
}
