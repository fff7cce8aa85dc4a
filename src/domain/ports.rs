use crate::domain::model::{Component, ComponentFieldState, ModelOption, PriceResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;

/// 帶有建議清單的文字輸入欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextField {
    Brand,
    Model,
}

impl TextField {
    /// 綁定在輸入欄位上的建議清單 id，每個欄位只有一份
    pub fn suggestion_list_id(&self) -> &'static str {
        match self {
            TextField::Brand => "brandSuggestions",
            TextField::Model => "modelSuggestions",
        }
    }
}

/// 三個互斥的顯示區塊
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Initial,
    Error,
    Result,
}

/// 價格結果中的文字節點
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayNode {
    TotalPrice,
    BasePrice,
    DeviceAge,
    DeviceCondition,
}

/// 材料價值清單的一行，例如 `Rare Earth Metals: ₹50.00`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialLine {
    pub label: String,
    pub amount: String,
}

impl fmt::Display for MaterialLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.amount)
    }
}

/// 裝置選擇器讀寫的表單介面
pub trait SelectorView {
    fn device_type(&self) -> String;
    fn input_value(&self, field: TextField) -> String;
    fn set_input_value(&mut self, field: TextField, value: &str);
    fn set_placeholder(&mut self, field: TextField, placeholder: &str);
    /// 以新內容取代欄位的建議清單 (不存在時建立並綁定)
    fn set_suggestions(&mut self, field: TextField, suggestions: &[String]);
    fn set_field_state(&mut self, component: Component, state: ComponentFieldState);
}

/// 價格計算表單讀寫的介面
pub trait PriceView {
    /// 表單中所有具名欄位 (disabled 欄位不包含在內)
    fn form_fields(&self) -> Vec<(String, String)>;
    fn selected_model_option(&self) -> Option<ModelOption>;
    /// session 的 cookie 字串，格式同 `document.cookie`
    fn cookies(&self) -> String;
    fn set_submit_state(&mut self, enabled: bool, label: &str);
    fn set_text(&mut self, node: DisplayNode, text: &str);
    fn set_material_lines(&mut self, lines: &[MaterialLine]);
    fn set_error_text(&mut self, message: &str);
    /// 顯示指定區塊並隱藏其他兩個
    fn show_region(&mut self, region: Region);
}

/// 送往計算端點的請求內容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRequest {
    pub fields: Vec<(String, String)>,
    pub csrf_token: String,
}

impl PriceRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[async_trait]
pub trait PriceGateway: Send + Sync {
    /// 非 2xx 回應要回傳 `RequestError`，其餘照原樣解析 JSON
    async fn calculate(&self, request: &PriceRequest) -> Result<PriceResponse>;
}
