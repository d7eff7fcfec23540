use std::sync::Arc;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use talentboard::api::Client;
use talentboard::search::SearchAggregator;
use talentboard::session::{MemoryStorage, SessionStore};

fn aggregator(server: &ServerGuard) -> SearchAggregator {
    let session = SessionStore::load(Arc::new(MemoryStorage::new()));
    let client = Client::new(format!("{}/api", server.url()), session).unwrap();
    SearchAggregator::new(client)
}

fn search_query(text: &str) -> Matcher {
    Matcher::UrlEncoded("search".into(), text.into())
}

#[tokio::test]
async fn test_short_query_issues_no_requests() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let search = aggregator(&server);
    for query in ["a", "", "   ", " b "] {
        let result = search.search(query).await;
        assert!(result.is_empty(), "query {query:?} should short-circuit");
    }
    assert!(search.search(None::<&str>).await.is_empty());

    any.assert_async().await;
}

#[tokio::test]
async fn test_partial_failure_keeps_other_results() {
    let mut server = Server::new_async().await;
    let projects = server
        .mock("GET", "/api/projects")
        .match_query(search_query("engineer"))
        .with_status(200)
        .with_body(json!([{"id": "p1", "title": "Design system"}]).to_string())
        .create_async()
        .await;
    let talents = server
        .mock("GET", "/api/talents")
        .match_query(search_query("engineer"))
        .with_status(503)
        .create_async()
        .await;
    let jobs = server
        .mock("GET", "/api/jobs")
        .match_query(search_query("engineer"))
        .with_status(200)
        .with_body(json!([{"id": "1", "title": "Ingénieur Frontend Senior"}]).to_string())
        .create_async()
        .await;

    let result = aggregator(&server).search("engineer").await;

    projects.assert_async().await;
    talents.assert_async().await;
    jobs.assert_async().await;
    assert_eq!(result.projects.len(), 1);
    assert!(result.talents.is_empty());
    assert_eq!(result.jobs.len(), 1);
    assert_eq!(result.jobs[0].id, "1");
}

#[tokio::test]
async fn test_query_is_trimmed_and_wrapped_jobs_unwrapped() {
    let mut server = Server::new_async().await;
    let _projects = server
        .mock("GET", "/api/projects")
        .match_query(search_query("react"))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let _talents = server
        .mock("GET", "/api/talents")
        .match_query(search_query("react"))
        .with_status(200)
        .with_body(json!([{"id": "dev1", "skills": ["React"]}]).to_string())
        .create_async()
        .await;
    let jobs = server
        .mock("GET", "/api/jobs")
        .match_query(search_query("react"))
        .with_status(200)
        .with_body(json!({"jobs": [{"id": "1"}, {"id": "2"}]}).to_string())
        .create_async()
        .await;

    let result = aggregator(&server).search("  react ").await;

    jobs.assert_async().await;
    assert!(result.projects.is_empty());
    assert_eq!(result.talents[0].skills, vec!["React".to_string()]);
    let ids: Vec<_> = result.jobs.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
}

#[tokio::test]
async fn test_all_branches_failing_still_succeeds() {
    let mut server = Server::new_async().await;
    let _projects = server
        .mock("GET", "/api/projects")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let _talents = server
        .mock("GET", "/api/talents")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;
    let _jobs = server
        .mock("GET", "/api/jobs")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let result = aggregator(&server).search("devops").await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_yields_empty_result() {
    let session = SessionStore::load(Arc::new(MemoryStorage::new()));
    let client = Client::new("http://127.0.0.1:1/api", session).unwrap();

    let result = SearchAggregator::new(client).search("kubernetes").await;
    assert!(result.is_empty());
}
