#![cfg(feature = "cli")]

use clap::Parser;
use httpmock::prelude::*;
use seafood_reports::{
    CliConfig, LocalStorage, ReportEngine, ReportError, ReportPipeline, TomlConfig,
};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_individual_spreadsheet_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/shipments/")
            .header("Authorization", "Bearer back-office-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([
                {"shipment_code": "SHP-1", "status": "COMPLETED", "kg_purchased": 500},
                {"shipment_code": "SHP-2", "status": "IN_TRANSIT", "kg_purchased": 320.5}
            ]));
    });

    let config = CliConfig::try_parse_from([
        "seafood-reports",
        "--api-base-url",
        &server.url("/api"),
        "--token",
        "back-office-token",
        "--output-path",
        &output_path,
        "--kind",
        "individual-xlsx",
        "--dataset",
        "Shipments=shipments",
        "--file-name",
        "Shipment_Report",
    ])
    .unwrap();

    let storage = LocalStorage::new(output_path.clone());
    let engine = ReportEngine::new(ReportPipeline::new(storage, config));
    let saved = engine.run().await.unwrap();

    api_mock.assert();
    assert!(saved.contains("Shipment_Report_"));
    assert!(saved.ends_with(".xlsx"));

    let bytes = std::fs::read(&saved).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_executive_pdf_end_to_end_with_lookups() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let sales = server.mock(|when, then| {
        when.method(GET).path("/api/sales/");
        then.status(200).json_body(json!([
            {"total_sale_amount": 100, "currency": "cur-1"},
            {"total_sale_amount": 300, "currency": "cur-1"}
        ]));
    });
    let payments = server.mock(|when, then| {
        when.method(GET).path("/api/payments/");
        then.status(200).json_body(json!({
            "count": 1,
            "next": null,
            "results": [{"amount_paid": 150, "sale": {"total_sale_amount": 300}}]
        }));
    });
    let currencies = server.mock(|when, then| {
        when.method(GET).path("/api/currencies/");
        then.status(200).json_body(json!([{"id": "cur-1", "code": "USD"}]));
    });
    let shipments = server.mock(|when, then| {
        when.method(GET).path("/api/shipments/");
        then.status(200).json_body(json!([]));
    });

    let toml_content = format!(
        r#"
[api]
base_url = "{}"

[report]
kind = "executive-pdf"
prepared_by = "Finance Desk"

[[datasets]]
name = "Sales"
resource = "sales"

[[datasets]]
name = "Payments"
resource = "payments"

[output]
path = "{}"

[branding]
company_name = "LAKE VICTORIA FISH EXPORTS"
tagline = "Fresh from the lake"
"#,
        server.url("/api"),
        output_path.replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    let branding = config.branding();

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ReportPipeline::new(storage, config).with_branding(branding);
    let saved = ReportEngine::new(pipeline).run().await.unwrap();

    sales.assert();
    payments.assert();
    currencies.assert();
    shipments.assert();
    assert!(saved.contains("Executive_Business_Report_"));
    assert!(saved.ends_with(".pdf"));
    assert!(std::fs::read(&saved).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_api_failure_stops_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/payments/");
        then.status(500);
    });

    let config = CliConfig::try_parse_from([
        "seafood-reports",
        "--api-base-url",
        &server.url("/api"),
        "--output-path",
        &output_path,
        "--dataset",
        "Payments=payments",
    ])
    .unwrap();

    let storage = LocalStorage::new(output_path.clone());
    let result = ReportEngine::new(ReportPipeline::new(storage, config)).run().await;

    assert!(matches!(result, Err(ReportError::ApiStatus { status: 500, .. })));
    assert!(!std::path::Path::new(&output_path).exists());
}
