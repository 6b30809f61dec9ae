//! Integration tests for the HTTP package lister and stats fetcher using wiremock

use core::time::Duration;
use npm_rank_lib::facts::{Client, HttpPackageLister, HttpStatsFetcher};
use npm_rank_lib::ranking::{LAST_MONTH, PackageLister, PackageName, RangeResponse, RankError, StatsFetcher};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> Client {
    Client::new(Duration::from_secs(10)).expect("client should build")
}

fn names(list: &[&str]) -> Vec<PackageName> {
    list.iter().map(|&name| PackageName::from(name)).collect()
}

fn series_json(package: &str, downloads: &[(&str, u64)]) -> serde_json::Value {
    json!({
        "start": downloads.first().map_or("2024-05-01", |d| d.0),
        "end": downloads.last().map_or("2024-05-31", |d| d.0),
        "package": package,
        "downloads": downloads
            .iter()
            .map(|(day, count)| json!({"downloads": count, "day": day}))
            .collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn test_lister_returns_sorted_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/user/alice/package"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "zeta": "write",
            "alpha": "read",
            "@alice/tools": "write",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let lister = HttpPackageLister::new(client(), mock_server.uri());
    let packages = lister.list("alice").await.expect("listing should succeed");

    assert_eq!(packages, names(&["@alice/tools", "alpha", "zeta"]));
}

#[tokio::test]
async fn test_lister_empty_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/user/nobody/package"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let lister = HttpPackageLister::new(client(), mock_server.uri());
    let packages = lister.list("nobody").await.expect("listing should succeed");

    assert!(packages.is_empty());
}

#[tokio::test]
async fn test_lister_unknown_user_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/user/ghost/package"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let lister = HttpPackageLister::new(client(), mock_server.uri());
    let err = lister.list("ghost").await.unwrap_err();

    assert!(matches!(err, RankError::NotFound(_)), "unexpected error: {err:?}");
    assert!(err.to_string().contains("ghost"));
}

#[tokio::test]
async fn test_lister_server_error_is_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/user/alice/package"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let lister = HttpPackageLister::new(client(), mock_server.uri());
    let err = lister.list("alice").await.unwrap_err();

    assert!(matches!(err, RankError::Transport(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_lister_malformed_body_is_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/-/user/alice/package"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let lister = HttpPackageLister::new(client(), mock_server.uri());
    let err = lister.list("alice").await.unwrap_err();

    assert!(matches!(err, RankError::Transport(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_fetch_single_package() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/downloads/range/last-month/left-pad"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(series_json("left-pad", &[("2024-05-30", 5), ("2024-05-31", 9)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpStatsFetcher::new(client(), vec![mock_server.uri()]);
    let response = fetcher
        .fetch_range(LAST_MONTH, &names(&["left-pad"]))
        .await
        .expect("fetch should succeed");

    let RangeResponse::Single(range) = &response else {
        panic!("expected single response, got {response:?}");
    };
    assert_eq!(range.package, "left-pad");
    assert_eq!(range.downloads.iter().map(|d| d.downloads).collect::<Vec<_>>(), [5, 9]);
}

#[tokio::test]
async fn test_fetch_bulk_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/downloads/range/last-month/left-pad,is-odd,missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "left-pad": series_json("left-pad", &[("2024-05-31", 3)]),
            "is-odd": series_json("is-odd", &[("2024-05-31", 8)]),
            "missing": null,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpStatsFetcher::new(client(), vec![mock_server.uri()]);
    let batch = names(&["left-pad", "is-odd", "missing"]);
    let response = fetcher.fetch_range(LAST_MONTH, &batch).await.expect("fetch should succeed");

    let series = response.into_series(&batch);
    let totals: Vec<(&str, u64)> = series
        .iter()
        .map(|(name, downloads)| (name.as_str(), downloads.iter().map(|d| d.downloads).sum()))
        .collect();

    assert_eq!(totals, [("left-pad", 3), ("is-odd", 8), ("missing", 0)]);
}

#[tokio::test]
async fn test_fetch_falls_back_to_next_host() {
    let failing = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/downloads/range/last-month/left-pad"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&failing)
        .await;

    Mock::given(method("GET"))
        .and(path("/downloads/range/last-month/left-pad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(series_json("left-pad", &[("2024-05-31", 1)])))
        .expect(1)
        .mount(&healthy)
        .await;

    let fetcher = HttpStatsFetcher::new(client(), vec![failing.uri(), healthy.uri()]);
    let response = fetcher
        .fetch_range(LAST_MONTH, &names(&["left-pad"]))
        .await
        .expect("second host should answer");

    assert!(matches!(response, RangeResponse::Single(_)));
}

#[tokio::test]
async fn test_fetch_not_found_is_empty_series() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/downloads/range/last-month/ghost-a,ghost-b"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "package ghost-a not found"})))
        .mount(&mock_server)
        .await;

    let fetcher = HttpStatsFetcher::new(client(), vec![mock_server.uri()]);
    let batch = names(&["ghost-a", "ghost-b"]);
    let response = fetcher.fetch_range(LAST_MONTH, &batch).await.expect("404 should not fail");

    assert_eq!(
        response.into_series(&batch),
        vec![(PackageName::from("ghost-a"), Vec::new()), (PackageName::from("ghost-b"), Vec::new())]
    );
}

#[tokio::test]
async fn test_fetch_all_hosts_failing_is_transport() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    for server in [&first, &second] {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(server)
            .await;
    }

    let fetcher = HttpStatsFetcher::new(client(), vec![first.uri(), second.uri()]);
    let err = fetcher.fetch_range(LAST_MONTH, &names(&["left-pad"])).await.unwrap_err();

    let RankError::Transport(message) = &err else {
        panic!("expected transport error, got {err:?}");
    };
    assert!(message.contains(&second.uri()), "last host's failure should be reported: {message}");
}
