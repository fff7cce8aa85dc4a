use async_trait::async_trait;
use device_pricer::domain::model::PriceResponse;
use device_pricer::domain::ports::{PriceGateway, PriceRequest};
use device_pricer::{
    DisplayNode, HeadlessForm, HttpPriceGateway, ModelOption, PriceCalculator, PricerError,
    Region, TextField,
};
use httpmock::prelude::*;
use std::time::Duration;

const CALCULATE_PATH: &str = "/calculator/calculate/";

fn filled_form() -> HeadlessForm {
    let mut form = HeadlessForm::new();
    form.select_device_type("laptop");
    form.type_into(TextField::Brand, "Dell");
    form.type_into(TextField::Model, "XPS13");
    form.select_model(Some(ModelOption::new("17").with_metadata("20000", "2021")));
    form.set_field("age", "2");
    form.set_field("condition", "working");
    form.set_cookies("sessionid=s3ss10n; csrftoken=tok123");
    form
}

#[tokio::test]
async fn test_successful_calculation_is_rendered() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CALCULATE_PATH)
                .header("X-CSRFToken", "tok123")
                .body_contains("item_type=laptop")
                .body_contains("model_id=17")
                .body_contains("base_price=20000")
                .body_contains("release_year=2021")
                .body_contains("condition=working");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "success": true,
                    "total_price": 15000,
                    "base_price": 20000,
                    "age": 2,
                    "condition": "working",
                    "material_values": {"rare_earth_metals": 50}
                }));
        })
        .await;

    let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
    let mut calculator = PriceCalculator::new(filled_form(), gateway);

    let result = calculator.submit().await.unwrap();
    api_mock.assert_async().await;

    assert_eq!(result.total_price, 15000.0);

    let form = calculator.view();
    assert_eq!(form.visible_region(), Region::Result);
    assert_eq!(form.text(DisplayNode::TotalPrice), "₹15,000.00");
    assert_eq!(form.text(DisplayNode::BasePrice), "₹20,000.00");
    assert_eq!(form.text(DisplayNode::DeviceAge), "2");
    assert_eq!(form.text(DisplayNode::DeviceCondition), "Working (100%)");

    let lines: Vec<String> = form.material_lines().iter().map(|l| l.to_string()).collect();
    assert_eq!(lines, vec!["Rare Earth Metals: ₹50.00".to_string()]);

    assert!(form.submit_enabled());
    assert_eq!(form.submit_label(), "Calculate Price");
    assert_eq!(form.submit_state_changes(), 2);
}

#[tokio::test]
async fn test_material_lines_keep_server_order() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CALCULATE_PATH);
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "total_price": 1234567,
                "base_price": 90000.5,
                "age": "3",
                "condition": "refurbished",
                "material_values": {"plastics": 12.5, "metals": 40, "electronics": 7.25}
            }));
        })
        .await;

    let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
    let mut calculator = PriceCalculator::new(filled_form(), gateway);
    calculator.submit().await.unwrap();

    let form = calculator.view();
    assert_eq!(form.text(DisplayNode::TotalPrice), "₹12,34,567.00");
    assert_eq!(form.text(DisplayNode::BasePrice), "₹90,000.50");
    assert_eq!(form.text(DisplayNode::DeviceAge), "3");
    // 不認得的狀態代碼原樣顯示
    assert_eq!(form.text(DisplayNode::DeviceCondition), "refurbished");

    let labels: Vec<&str> = form
        .material_lines()
        .iter()
        .map(|l| l.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Plastics", "Metals", "Electronics"]);
}

#[tokio::test]
async fn test_missing_model_selection_never_hits_network() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(CALCULATE_PATH);
            then.status(200).json_body(serde_json::json!({"success": true}));
        })
        .await;

    for option in [None, Some(ModelOption::new(""))] {
        let mut form = filled_form();
        form.select_model(option);

        let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
        let mut calculator = PriceCalculator::new(form, gateway);

        let err = calculator.submit().await.unwrap_err();
        assert!(matches!(err, PricerError::ValidationError { .. }));

        let form = calculator.view();
        assert_eq!(form.visible_region(), Region::Error);
        assert_eq!(form.error_text(), "Please select a device model");
        assert_eq!(form.submit_state_changes(), 0);
    }

    assert_eq!(api_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_logical_failure_shows_server_message() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(CALCULATE_PATH);
            then.status(200).json_body(serde_json::json!({
                "success": false,
                "error": "Model not supported"
            }));
        })
        .await;

    let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
    let mut calculator = PriceCalculator::new(filled_form(), gateway);

    let err = calculator.submit().await.unwrap_err();
    api_mock.assert_async().await;
    assert!(matches!(err, PricerError::RequestError { .. }));

    let form = calculator.view();
    assert_eq!(form.error_text(), "Model not supported");
    assert!(form.is_visible(Region::Error));
    assert!(!form.is_visible(Region::Result));
    assert!(!form.is_visible(Region::Initial));
    assert!(form.submit_enabled());
}

#[tokio::test]
async fn test_logical_failure_without_message_uses_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CALCULATE_PATH);
            then.status(200).json_body(serde_json::json!({"success": false}));
        })
        .await;

    let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
    let mut calculator = PriceCalculator::new(filled_form(), gateway);
    calculator.submit().await.unwrap_err();

    assert_eq!(calculator.view().error_text(), "Failed to calculate price");
}

#[tokio::test]
async fn test_http_error_status_shows_generic_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CALCULATE_PATH);
            then.status(404).json_body(serde_json::json!({
                "success": false,
                "error": "Device model not found"
            }));
        })
        .await;

    let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
    let mut calculator = PriceCalculator::new(filled_form(), gateway);
    calculator.submit().await.unwrap_err();

    let form = calculator.view();
    assert_eq!(
        form.error_text(),
        "Failed to calculate price. Please try again."
    );
    assert_eq!(form.visible_region(), Region::Error);
    assert!(form.submit_enabled());
    assert_eq!(form.submit_label(), "Calculate Price");
}

#[tokio::test]
async fn test_non_json_success_body_shows_generic_message() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(CALCULATE_PATH);
            then.status(200)
                .header("Content-Type", "text/html")
                .body("<html><body>Server Error</body></html>");
        })
        .await;

    let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
    let mut calculator = PriceCalculator::new(filled_form(), gateway);

    let err = calculator.submit().await.unwrap_err();
    api_mock.assert_async().await;
    assert!(matches!(err, PricerError::SerializationError(_)));

    let form = calculator.view();
    assert_eq!(
        form.error_text(),
        "Failed to calculate price. Please try again."
    );
    assert_eq!(form.visible_region(), Region::Error);
    assert!(form.submit_enabled());
    assert_eq!(form.submit_label(), "Calculate Price");
}

#[tokio::test]
async fn test_error_then_success_switches_regions() {
    let server = MockServer::start_async().await;
    let mut failing = server
        .mock_async(|when, then| {
            when.method(POST).path(CALCULATE_PATH);
            then.status(500);
        })
        .await;

    let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
    let mut calculator = PriceCalculator::new(filled_form(), gateway);
    calculator.submit().await.unwrap_err();
    assert_eq!(calculator.view().visible_region(), Region::Error);

    failing.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CALCULATE_PATH);
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "total_price": 500,
                "base_price": 800,
                "age": 1,
                "condition": "not_working"
            }));
        })
        .await;

    calculator.submit().await.unwrap();
    let form = calculator.view();
    assert_eq!(form.visible_region(), Region::Result);
    assert_eq!(form.text(DisplayNode::DeviceCondition), "Not Working (30%)");
    assert!(form.material_lines().is_empty());
}

#[tokio::test]
async fn test_missing_csrf_cookie_sends_empty_token() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CALCULATE_PATH)
                .header_exists("X-CSRFToken");
            then.status(403);
        })
        .await;

    let mut form = filled_form();
    form.set_cookies("");

    let gateway = HttpPriceGateway::new(server.url(CALCULATE_PATH));
    let mut calculator = PriceCalculator::new(form, gateway);
    calculator.submit().await.unwrap_err();

    api_mock.assert_async().await;
}

struct StalledGateway;

#[async_trait]
impl PriceGateway for StalledGateway {
    async fn calculate(&self, _request: &PriceRequest) -> device_pricer::Result<PriceResponse> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(PriceResponse::default())
    }
}

#[tokio::test]
async fn test_unresponsive_backend_times_out_and_releases_busy_state() {
    let mut calculator =
        PriceCalculator::new(filled_form(), StalledGateway).with_timeout(Duration::from_millis(50));

    let err = calculator.submit().await.unwrap_err();
    assert!(matches!(err, PricerError::Timeout { .. }));

    let form = calculator.view();
    assert_eq!(form.visible_region(), Region::Error);
    assert_eq!(
        form.error_text(),
        "Price calculation timed out after 50ms. Please try again."
    );
    assert!(form.submit_enabled());
    assert_eq!(form.submit_label(), "Calculate Price");
}

#[tokio::test]
async fn test_cancelled_submission_restores_submit_control() {
    let mut calculator = PriceCalculator::new(filled_form(), StalledGateway);

    let cancelled =
        tokio::time::timeout(Duration::from_millis(20), calculator.submit()).await;
    assert!(cancelled.is_err());

    let form = calculator.view();
    assert!(form.submit_enabled());
    assert_eq!(form.submit_state_changes(), 2);
    assert_eq!(form.visible_region(), Region::Initial);
}
