use crate::domain::model::PriceResponse;
use crate::domain::ports::{PriceGateway, PriceRequest};
use crate::utils::error::{PricerError, Result};
use reqwest::Client;

const TRANSPORT_FAILED: &str = "Failed to calculate price. Please try again.";

/// 以 form-encoded POST 呼叫計算端點
pub struct HttpPriceGateway {
    client: Client,
    endpoint: String,
}

impl HttpPriceGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl PriceGateway for HttpPriceGateway {
    async fn calculate(&self, request: &PriceRequest) -> Result<PriceResponse> {
        tracing::debug!("Making price request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-CSRFToken", &request.csrf_token)
            .form(&request.fields)
            .send()
            .await?;

        tracing::debug!("Price response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PricerError::request(TRANSPORT_FAILED));
        }

        let body = response.text().await?;
        let parsed: PriceResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}
