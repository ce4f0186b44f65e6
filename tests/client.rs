mod common;

use common::{journals_json, serve, Reply};
use hjrs_client::{
    CatalogClient, FilterDimension, FilterState, HjrsError, LookupKind, PageSize, ScalarBound,
    SearchRequest, Sort,
};

fn client(base_url: &str) -> CatalogClient {
    CatalogClient::new().unwrap().with_base_url(base_url)
}

#[tokio::test]
async fn test_lookup_sends_type_and_query() {
    let stub = serve(|_| Reply::json(journals_json(1, 2))).await;
    let journals = client(&stub.base_url)
        .lookup(LookupKind::Issn, " 1234-5678 ")
        .await
        .unwrap();

    assert_eq!(journals.len(), 2);
    let seen = stub.requests_to("/api/journals/search");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].query(), "type=issn&query=1234-5678");
}

#[tokio::test]
async fn test_blank_lookup_sends_nothing() {
    let stub = serve(|_| Reply::json("[]")).await;
    let err = client(&stub.base_url)
        .lookup(LookupKind::Title, "   ")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Please enter a search term");
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_filtered_search_object_payload() {
    let stub = serve(|_| {
        Reply::json(format!(
            r#"{{"results": {}, "total": 237, "page": 2}}"#,
            journals_json(26, 25)
        ))
    })
    .await;

    let mut filters = FilterState::new();
    filters.toggle(FilterDimension::Country, "PK");
    filters.toggle(FilterDimension::Country, "US");
    filters.set_scalar(ScalarBound::MinJpi, Some(10.0));
    filters.set_scalar(ScalarBound::MaxJpi, Some(90.0));
    let request = SearchRequest::new(filters)
        .page(2)
        .page_size(PageSize::Fifty)
        .sort(Some(Sort::jpi_desc()));

    let result = client(&stub.base_url).filtered_search(&request).await.unwrap();
    assert_eq!(result.total_count, 237);
    assert_eq!(result.page, 2);
    assert_eq!(result.items.len(), 25);

    let seen = stub.requests_to("/api/journals/filtered-search");
    assert_eq!(seen.len(), 1);
    let echoed = SearchRequest::from_query_string(seen[0].query()).unwrap();
    assert_eq!(echoed, request);
}

#[tokio::test]
async fn test_filtered_search_bare_array_payload() {
    let stub = serve(|_| Reply::json(journals_json(1, 7))).await;
    let mut filters = FilterState::new();
    filters.toggle(FilterDimension::Category, "1");

    let result = client(&stub.base_url)
        .filtered_search(&SearchRequest::new(filters))
        .await
        .unwrap();
    assert_eq!(result.total_count, 7);
    assert_eq!(result.items[6].id().as_deref(), Some("7"));
}

#[tokio::test]
async fn test_status_codes_mapped() {
    let stub = serve(|seen| match seen.path() {
        "/api/reference/countries" => Reply::status(404),
        "/api/reference/publishers" => Reply::status(401),
        _ => Reply::status(500),
    })
    .await;
    let client = client(&stub.base_url);

    assert!(matches!(
        client.reference_options(FilterDimension::Country).await,
        Err(HjrsError::NotFound(_))
    ));
    assert!(matches!(
        client.reference_options(FilterDimension::Publisher).await,
        Err(HjrsError::Unauthorized { status: 401 })
    ));
    assert!(matches!(
        client.reference_options(FilterDimension::Year).await,
        Err(HjrsError::Api { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_reference_options_normalized() {
    let stub = serve(|seen| match seen.path() {
        "/api/reference/publishing-years" => {
            Reply::json(r#"[{"year_id": 1, "range_val": "2019-2020"}, {"year_id": 2, "range_val": "2021-2022"}]"#)
        }
        _ => Reply::status(404),
    })
    .await;

    let options = client(&stub.base_url)
        .reference_options(FilterDimension::Year)
        .await
        .unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[1].id, "2");
    assert_eq!(options[1].label, "2021-2022");
}

#[tokio::test]
async fn test_predict_posts_title_and_subject() {
    let stub = serve(|_| {
        Reply::json(
            r#"{"prediction": {"predictedYear": "2025", "predictedJPI": 77.4, "predictedCategory": "X", "confidence": 0.82, "explanation": "Steady"}}"#,
        )
    })
    .await;

    let prediction = client(&stub.base_url)
        .predict_performance("Journal of Tests", "Physics")
        .await
        .unwrap();
    assert_eq!(prediction.predicted_jpi, Some(77.4));
    assert_eq!(prediction.confidence_percent().as_deref(), Some("82.0%"));

    let seen = stub.requests_to("/api/prediction/predict-performance");
    assert_eq!(seen[0].method, "POST");
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["title"], "Journal of Tests");
    assert_eq!(body["subject_area"], "Physics");
}

#[tokio::test]
async fn test_prediction_failure_message() {
    let stub = serve(|_| Reply::status(503)).await;
    let err = client(&stub.base_url)
        .predict_performance("T", "S")
        .await
        .unwrap_err();
    assert!(hjrs_client::prediction::prediction_error_message(&err).starts_with("Prediction failed: "));
}

#[tokio::test]
async fn test_analysis_defaults_to_all() {
    let stub = serve(|seen| match seen.path() {
        "/api/analysis/country" => Reply::json(
            r#"[{"country_name": "Pakistan", "journal_count": "12"}, {"country_name": "UK", "journal_count": 30}]"#,
        ),
        "/api/analysis/publishing-year" => Reply::json(r#"{"message": "no data"}"#),
        _ => Reply::status(404),
    })
    .await;
    let client = client(&stub.base_url);

    let rows = client.country_distribution(None, Some("2")).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].journal_count, Some(12));
    assert_eq!(
        stub.requests_to("/api/analysis/country")[0].query(),
        "year=all&category=2"
    );

    let years = client.publishing_year_distribution(None).await.unwrap();
    assert!(years.is_empty());
}
