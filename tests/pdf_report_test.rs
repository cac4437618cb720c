use chrono::{NaiveDate, NaiveDateTime};
use seafood_reports::report::exporter;
use seafood_reports::report::pdf::{layout_executive, layout_professional};
use seafood_reports::{Branding, LookupTable, Record, ReportDefinition};
use serde_json::{json, Value};

fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

#[test]
fn test_professional_layout_hides_ids_and_free_text() {
    let data = records(vec![json!({
        "id": "4e2d1c0b-9a8f-4e7d-b6c5-a4b3c2d1e0f9",
        "sale_id": 12,
        "amount": 120,
        "notes": "Paid via M-Pesa",
        "entered_by": "clerk"
    })]);

    let doc = layout_professional(
        &data,
        "Payment Report",
        "Jane Achieng",
        None,
        &Branding::default(),
        &generated_at(),
    );
    let texts = doc.all_texts();

    assert!(texts.contains(&"PAYMENT REPORT"));
    assert!(texts.contains(&"Amount"));
    assert!(texts.contains(&"120"));
    assert!(!texts.contains(&"Notes"));
    assert!(!texts.contains(&"Sale Id"));
    assert!(!texts.contains(&"Entered By"));

    assert!(texts.contains(&"COMMENTS / NOTES"));
    assert!(texts.contains(&"- Paid via M-Pesa"));

    assert!(texts.contains(&"PREPARED BY"));
    assert!(texts.contains(&"Jane Achieng"));
    assert!(texts.contains(&"Project Manager / Lead"));
    assert!(texts.contains(&"Director / CEO"));
    assert!(texts.contains(&"Date: March 15, 2024"));
}

#[test]
fn test_professional_layout_uses_lookups() {
    let mut lookups = LookupTable::default();
    lookups.shipments.insert(
        "a3c9e8f1-1b2d-4e5f-8a9b-0c1d2e3f4a5b".to_string(),
        "SHP-2024-014".to_string(),
    );
    let data = records(vec![json!({
        "shipment": "a3c9e8f1-1b2d-4e5f-8a9b-0c1d2e3f4a5b",
        "kg_received": 940
    })]);

    let doc = layout_professional(
        &data,
        "Receiving",
        "System Administrator",
        Some(&lookups),
        &Branding::default(),
        &generated_at(),
    );
    let texts = doc.all_texts();

    assert!(texts.contains(&"SHP-2024-014"));
    assert!(texts.contains(&"KG Received"));
}

#[test]
fn test_long_table_repeats_header_on_every_page() {
    let data: Vec<Record> = (0..120)
        .map(|i| {
            json!({"product_name": format!("Tilapia lot {}", i), "amount": i})
                .as_object()
                .cloned()
                .unwrap()
        })
        .collect();

    let doc = layout_professional(
        &data,
        "Stock Report",
        "System Administrator",
        None,
        &Branding::default(),
        &generated_at(),
    );

    assert!(doc.page_count() > 1);
    let texts = doc.all_texts();
    assert!(texts.contains(&"Tilapia lot 0"));
    assert!(texts.contains(&"Tilapia lot 119"));

    for page in &doc.pages {
        let page_texts: Vec<&str> = page.texts().collect();
        if page_texts.iter().any(|t| t.starts_with("Tilapia lot")) {
            assert!(page_texts.contains(&"Product"));
        }
    }
}

#[test]
fn test_executive_layout_cover_and_dataset_pages() {
    let reports = vec![
        ReportDefinition::new(
            "Sales",
            records(vec![
                json!({"total_sale_amount": 100}),
                json!({"total_sale_amount": 250}),
                json!({"total_sale_amount": 50}),
            ]),
        ),
        ReportDefinition::new(
            "Payments",
            records(vec![json!({
                "amount_paid": 150,
                "sale": {"id": 2, "total_sale_amount": 250}
            })]),
        ),
        ReportDefinition::new("Shipments", vec![]),
    ];

    let doc = layout_executive(
        &reports,
        "Finance Desk",
        None,
        &Branding::default(),
        &generated_at(),
    );
    let texts = doc.all_texts();

    assert_eq!(doc.page_count(), 4);
    assert!(texts.contains(&"EXECUTIVE BUSINESS REPORT"));
    assert!(texts.contains(&"Financial Highlights"));
    assert!(texts.contains(&"Total Revenue"));
    assert!(texts.contains(&"400.00"));
    assert!(texts.contains(&"Outstanding Balance"));
    assert!(texts.contains(&"250.00"));
    assert!(texts.contains(&"CEO / Managing Director"));
    assert!(texts.contains(&"Board of Directors"));

    let sales_page: Vec<&str> = doc.pages[1].texts().collect();
    assert!(sales_page.contains(&"SALES"));
    assert!(sales_page.contains(&"3 record(s)"));
    assert!(sales_page.contains(&"Total Sale"));

    let shipments_page: Vec<&str> = doc.pages[3].texts().collect();
    assert!(shipments_page.contains(&"SHIPMENTS"));
    assert!(shipments_page.contains(&"0 record(s)"));
    assert!(shipments_page.contains(&"No records available."));
}

#[test]
fn test_pdf_artifacts_render() {
    let data = records(vec![json!({"amount": 10, "status": "PENDING"})]);
    let branding = Branding {
        company_name: "LAKE VICTORIA FISH EXPORTS".to_string(),
        tagline: String::new(),
    };

    let professional = exporter::professional_pdf(
        &data,
        "Payments",
        "Payment_Report",
        None,
        None,
        &branding,
        &generated_at(),
    )
    .unwrap();
    assert_eq!(professional.file_name, "Payment_Report_20240315_1030.pdf");
    assert!(professional.bytes.starts_with(b"%PDF"));

    let executive = exporter::executive_pdf(
        &[ReportDefinition::new("Payments", data)],
        Some("Finance Desk"),
        None,
        &branding,
        &generated_at(),
    )
    .unwrap();
    assert_eq!(executive.file_name, "Executive_Business_Report_20240315_1030.pdf");
    assert!(executive.bytes.starts_with(b"%PDF"));
}
