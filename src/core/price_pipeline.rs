use crate::adapters::csrf::csrf_token;
use crate::core::format::{condition_label, format_inr, material_label};
use crate::domain::model::{ModelOption, PriceResult};
use crate::domain::ports::{
    DisplayNode, MaterialLine, PriceGateway, PriceRequest, PriceView, Region,
};
use crate::utils::error::{PricerError, Result};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const SUBMIT_LABEL: &str = "Calculate Price";
const BUSY_LABEL: &str = "Calculating...";
const NO_MODEL_SELECTED: &str = "Please select a device model";

/// 送出期間讓按鈕維持忙碌狀態，drop 時 (含 future 被取消) 一定恢復
struct BusyGuard<'a, V: PriceView> {
    view: &'a mut V,
}

impl<'a, V: PriceView> BusyGuard<'a, V> {
    fn acquire(view: &'a mut V) -> Self {
        view.set_submit_state(false, BUSY_LABEL);
        Self { view }
    }
}

impl<V: PriceView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_state(true, SUBMIT_LABEL);
    }
}

/// 收集表單、呼叫計算端點、把結果或錯誤畫到畫面上。
///
/// `submit` 需要 `&mut self`，同一個 calculator 不會同時有兩個請求在跑。
pub struct PriceCalculator<V: PriceView, G: PriceGateway> {
    view: V,
    gateway: G,
    timeout: Duration,
}

impl<V: PriceView, G: PriceGateway> PriceCalculator<V, G> {
    pub fn new(view: V, gateway: G) -> Self {
        Self {
            view,
            gateway,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// 處理一次表單送出。錯誤會先寫進錯誤區塊，再回傳給呼叫端。
    pub async fn submit(&mut self) -> Result<PriceResult> {
        match self.calculate().await {
            Ok(result) => {
                tracing::info!(
                    "Price calculated: total {} (base {})",
                    result.total_price,
                    result.base_price
                );
                self.render(&result);
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Price calculation error: {} ({:?})", e, e.category());
                self.show_error(&e.user_friendly_message());
                Err(e)
            }
        }
    }

    async fn calculate(&mut self) -> Result<PriceResult> {
        let option = self
            .view
            .selected_model_option()
            .filter(|option| !option.value.is_empty())
            .ok_or_else(|| PricerError::validation(NO_MODEL_SELECTED))?;

        let request = build_request(
            self.view.form_fields(),
            &option,
            csrf_token(&self.view.cookies()),
        );
        tracing::debug!("Submitting {} form fields", request.fields.len());

        let timeout = self.timeout;
        let response = {
            let _busy = BusyGuard::acquire(&mut self.view);
            tokio::time::timeout(timeout, self.gateway.calculate(&request))
                .await
                .map_err(|_| PricerError::Timeout { after: timeout })??
        };

        response.into_result()
    }

    fn render(&mut self, result: &PriceResult) {
        let age = result
            .age
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        self.view
            .set_text(DisplayNode::TotalPrice, &format_inr(result.total_price));
        self.view
            .set_text(DisplayNode::BasePrice, &format_inr(result.base_price));
        self.view.set_text(DisplayNode::DeviceAge, &age);
        self.view.set_text(
            DisplayNode::DeviceCondition,
            &condition_label(&result.condition),
        );

        let lines: Vec<MaterialLine> = result
            .material_values
            .iter()
            .map(|m| MaterialLine {
                label: material_label(&m.material),
                amount: format_inr(m.value),
            })
            .collect();
        self.view.set_material_lines(&lines);

        self.view.show_region(Region::Result);
    }

    fn show_error(&mut self, message: &str) {
        self.view.set_error_text(message);
        self.view.show_region(Region::Error);
    }
}

fn build_request(
    mut fields: Vec<(String, String)>,
    option: &ModelOption,
    csrf_token: String,
) -> PriceRequest {
    if option.base_price.is_none() || option.release_year.is_none() {
        tracing::warn!(
            "Model option '{}' is missing base_price/release_year metadata",
            option.value
        );
    }

    fields.push(("model_id".to_string(), option.value.clone()));
    fields.push((
        "base_price".to_string(),
        option.base_price.clone().unwrap_or_default(),
    ));
    fields.push((
        "release_year".to_string(),
        option.release_year.clone().unwrap_or_default(),
    ));

    PriceRequest { fields, csrf_token }
}
