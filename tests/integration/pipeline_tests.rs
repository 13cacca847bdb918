//! End-to-end runs against mock shops

use price_tracker::config::{parse_config, Config};
use price_tracker::crawler::{run_tracker, Coordinator};
use price_tracker::output::{read_csv, write_csv_file, write_html_report};
use price_tracker::SiteId;
use std::fs::File;
use std::net::TcpListener;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with fast retries and outputs inside `dir`
fn create_test_config(urls: &[String], category: &str, dir: &Path) -> Config {
    let urls = urls
        .iter()
        .map(|u| format!("\"{}\"", u))
        .collect::<Vec<_>>()
        .join(", ");

    let content = format!(
        r#"
[targets]
urls = [{urls}]

{category}

[fetcher]
timeout-secs = 5
max-retries = 2
backoff-unit-ms = 1
request-delay-ms = 10

[output]
csv-path = "{csv}"
report-path = "{report}"
debug-html-path = "{debug}"
"#,
        csv = dir.join("output.csv").display(),
        report = dir.join("product-report.html").display(),
        debug = dir.join("last-page.html").display(),
    );

    parse_config(&content).expect("Invalid test config")
}

fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}/dp/GONE", addr)
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_one_success_one_exhausted_failure() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");

    let page = "<html><head><title> Ceramic Mug </title></head><body><h1>Mug</h1></body></html>";
    Mock::given(method("GET"))
        .and(path("/dp/MUG"))
        .respond_with(html_response(page.to_string()))
        .mount(&mock_server)
        .await;

    let good = format!("{}/dp/MUG", mock_server.uri());
    let config = create_test_config(&[good.clone(), dead_url()], "", dir.path());

    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let records = coordinator.run().await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, good);
    assert_eq!(records[0].title, "Ceramic Mug");
    assert_eq!(records[0].site, SiteId::Unknown);
    assert_eq!(records[0].product_name, "");
    assert_eq!(records[0].stock_status, "unknown");

    let csv_path = Path::new(&config.output.csv_path);
    write_csv_file(&records, csv_path).expect("Failed to write CSV");
    let csv = std::fs::read_to_string(csv_path).expect("Failed to read CSV");
    assert_eq!(csv.lines().count(), 2);

    let parsed = read_csv(File::open(csv_path).expect("Missing CSV")).expect("Bad CSV");
    assert_eq!(parsed, records);

    let dump = std::fs::read_to_string(dir.path().join("last-page.html"))
        .expect("Debug dump not written");
    assert_eq!(dump, page);
}

#[tokio::test]
async fn test_all_failures_still_produce_outputs() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&[dead_url()], "", dir.path());

    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let records = coordinator.run().await;
    assert!(records.is_empty());

    let csv_path = Path::new(&config.output.csv_path);
    let report_path = Path::new(&config.output.report_path);
    write_csv_file(&records, csv_path).expect("Failed to write CSV");
    write_html_report(&records, report_path).expect("Failed to write report");

    let csv = std::fs::read_to_string(csv_path).expect("Failed to read CSV");
    assert_eq!(csv.lines().count(), 1);

    let report = std::fs::read_to_string(report_path).expect("Failed to read report");
    assert!(report.contains("No products found"));
}

#[tokio::test]
async fn test_category_mode_visits_capped_product_list() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");

    let listing: String = (1..=12)
        .map(|i| format!(r#"<li><a href="/dp/P{i:02}">Product {i}</a></li>"#))
        .collect();
    Mock::given(method("GET"))
        .and(path("/category/lamps"))
        .respond_with(html_response(format!(
            "<html><body><a href=\"/help\">Help</a><ul>{listing}</ul></body></html>"
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    for i in 1..=12 {
        Mock::given(method("GET"))
            .and(path(format!("/dp/P{i:02}")))
            .respond_with(html_response(format!(
                "<html><head><title>Lamp {i}</title></head><body></body></html>"
            )))
            .mount(&mock_server)
            .await;
    }

    let category_url = format!("{}/category/lamps", mock_server.uri());
    let config = create_test_config(
        &[category_url],
        "[category]\nenable-category-mode = true\nmax-products = 10",
        dir.path(),
    );

    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let records = coordinator.run().await;

    assert_eq!(records.len(), 10);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(
            record.url,
            format!("{}/dp/P{:02}", mock_server.uri(), i + 1)
        );
        assert_eq!(record.title, format!("Lamp {}", i + 1));
    }

    let received = mock_server
        .received_requests()
        .await
        .expect("Request recording disabled");
    let paths: Vec<String> = received.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths.len(), 11);
    assert_eq!(paths[0], "/category/lamps");
    assert!(!paths.contains(&"/dp/P11".to_string()));
    assert!(!paths.contains(&"/dp/P12".to_string()));
    assert!(!paths.contains(&"/help".to_string()));
}

#[tokio::test]
async fn test_unreachable_category_yields_no_records() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        &[dead_url()],
        "[category]\nenable-category-mode = true",
        dir.path(),
    );

    let records = run_tracker(&config).await.expect("Failed to run tracker");
    assert!(records.is_empty());
}
