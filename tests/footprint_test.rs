// tests/footprint_test.rs
//
// Footprinting and API discovery against a local mock server.

use gscan_rs::core::http::build_client;
use gscan_rs::core::http::PATH_PROBE_TIMEOUT;
use gscan_rs::core::scanner::{api_scanner, footprint_scanner};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, at: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn robots_preview_lists_five_and_counts_the_rest() {
    let server = MockServer::start().await;
    let body: String = std::iter::once("User-agent: *".to_string())
        .chain((0..7).map(|i| format!("Disallow: /secret{}", i)))
        .collect::<Vec<_>>()
        .join("\n");
    mount(&server, "/robots.txt", ResponseTemplate::new(200).set_body_string(body)).await;

    let client = build_client().unwrap();
    let summary = footprint_scanner::check_robots(&client, &server.uri())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.preview.len(), 5);
    assert_eq!(summary.preview[4], "Disallow: /secret4");
    assert_eq!(summary.remaining, 2);
    assert_eq!(
        footprint_scanner::robots_preview_lines(&summary).last().unwrap(),
        "... and 2 more disallowed paths"
    );
}

#[tokio::test]
async fn missing_robots_and_sitemap_are_not_errors() {
    let server = MockServer::start().await;
    let client = build_client().unwrap();

    assert_eq!(footprint_scanner::check_robots(&client, &server.uri()).await, Ok(None));
    assert_eq!(footprint_scanner::check_sitemap(&client, &server.uri()).await, Ok(None));
}

#[tokio::test]
async fn sitemap_urls_are_counted() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_string(
            "<urlset><url><loc>/a</loc></url><url><loc>/b</loc></url><url><loc>/c</loc></url></urlset>",
        ),
    )
    .await;

    let client = build_client().unwrap();
    let sitemap = footprint_scanner::check_sitemap(&client, &server.uri())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sitemap.approx_urls, 3);
}

#[tokio::test]
async fn hidden_dirs_and_exposed_files_are_found() {
    let server = MockServer::start().await;
    mount(&server, "/admin", ResponseTemplate::new(200).set_body_string("login")).await;
    mount(&server, "/.env", ResponseTemplate::new(200).set_body_string("DB_PASSWORD=x")).await;
    // A 200 with an empty body is not an exposed file.
    mount(&server, "/config.php", ResponseTemplate::new(200)).await;
    mount(&server, "/.git", ResponseTemplate::new(403)).await;

    let client = build_client().unwrap();
    let mut dirs = footprint_scanner::find_hidden_dirs(&client, &server.uri()).await;
    dirs.sort();
    assert_eq!(dirs, vec!["/.env", "/admin"]);

    let files = footprint_scanner::find_exposed_files(&client, &server.uri()).await;
    assert_eq!(files, vec!["/.env"]);
}

#[tokio::test]
async fn slow_directory_is_dropped_after_the_timeout() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/admin",
        ResponseTemplate::new(200)
            .set_body_string("login")
            .set_delay(PATH_PROBE_TIMEOUT + Duration::from_secs(2)),
    )
    .await;
    mount(&server, "/backup", ResponseTemplate::new(200).set_body_string("dump")).await;

    let client = build_client().unwrap();
    let started = Instant::now();
    let dirs = footprint_scanner::find_hidden_dirs(&client, &server.uri()).await;

    assert_eq!(dirs, vec!["/backup"]);
    assert!(started.elapsed() < PATH_PROBE_TIMEOUT + Duration::from_secs(2));
}

#[tokio::test]
async fn footprint_captures_server_banners() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/",
        ResponseTemplate::new(200)
            .insert_header("x-powered-by", "PHP/8.2")
            .set_body_string("home"),
    )
    .await;

    let client = build_client().unwrap();
    let results = footprint_scanner::run_footprint(&client, &server.uri()).await;

    assert_eq!(results.server_info.powered_by.as_deref(), Some("PHP/8.2"));
    assert_eq!(results.ip_address.as_deref(), Some("127.0.0.1"));
    assert!(matches!(results.dns, Ok(None)));
    assert!(results.exposed_files.is_empty());
}

#[tokio::test]
async fn api_endpoints_come_from_links_scripts_and_probes() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/",
        ResponseTemplate::new(200).set_body_raw(
            r#"<a href="/api/users">users</a><a href="/about">about</a>
               <script src="/static/app.js"></script>"#,
            "text/html",
        ),
    )
    .await;
    mount(
        &server,
        "/static/app.js",
        ResponseTemplate::new(200).set_body_raw(
            "fetch('/v2/orders').then(r => r.json()); fetch('/img/logo.png');",
            "application/javascript",
        ),
    )
    .await;
    mount(
        &server,
        "/graphql",
        ResponseTemplate::new(200).set_body_raw("{\"data\":null}", "application/json"),
    )
    .await;
    // An HTML answer is not an API.
    mount(
        &server,
        "/auth",
        ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"),
    )
    .await;

    let client = build_client().unwrap();
    let endpoints = api_scanner::discover_apis(&client, &server.uri()).await;

    assert_eq!(endpoints, vec!["/api/users", "/v2/orders", "/graphql"]);
}

#[tokio::test]
async fn api_discovery_tolerates_an_unreachable_target() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = build_client().unwrap();
    let endpoints = api_scanner::discover_apis(&client, &format!("http://127.0.0.1:{}", port)).await;
    assert!(endpoints.is_empty());
}
