use crate::domain::model::{Component, ComponentFieldState, DeviceCatalog};
use crate::domain::ports::{SelectorView, TextField};
use std::sync::Arc;

const BRAND_PROMPT: &str = "Enter brand name";
const MODEL_PROMPT: &str = "Enter model name";

/// 依裝置類型連動品牌/機型建議清單與零件欄位。
///
/// 查不到的類型或品牌不會回錯誤，只會得到空的建議清單，欄位仍可自由輸入。
pub struct DeviceAttributeResolver<V: SelectorView> {
    catalog: Arc<DeviceCatalog>,
    view: V,
}

impl<V: SelectorView> DeviceAttributeResolver<V> {
    pub fn new(catalog: Arc<DeviceCatalog>, view: V) -> Self {
        Self { catalog, view }
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

    /// 頁面載入時呼叫：若已預選類型 (例如表單回填)，跑一次完整連動
    pub fn initialize(&mut self) {
        let device_type = self.view.device_type();
        if device_type.is_empty() {
            return;
        }

        let prefilled_brand = self.view.input_value(TextField::Brand);
        tracing::debug!(
            "Initializing selector for pre-selected type '{}' (brand '{}')",
            device_type,
            prefilled_brand
        );

        self.refresh_brands(&device_type);
        self.reset_component_fields(&device_type);
        if !prefilled_brand.is_empty() {
            self.view.set_input_value(TextField::Brand, &prefilled_brand);
            self.on_brand_input_changed(&device_type, &prefilled_brand);
        }
    }

    pub fn on_device_type_changed(&mut self, device_type: &str) {
        tracing::debug!("Device type changed to '{}'", device_type);
        self.refresh_brands(device_type);
        let brand = self.view.input_value(TextField::Brand);
        self.on_brand_input_changed(device_type, &brand);
        self.reset_component_fields(device_type);
    }

    pub fn on_brand_input_changed(&mut self, device_type: &str, brand: &str) {
        let catalog = Arc::clone(&self.catalog);
        let models = catalog.models(device_type, brand);
        if models.is_empty() && !brand.is_empty() {
            tracing::debug!("No models known for '{}' / '{}'", device_type, brand);
        }
        self.fill_suggestions(TextField::Model, models, MODEL_PROMPT);
    }

    pub fn reset_component_fields(&mut self, device_type: &str) {
        if device_type.is_empty() {
            return;
        }

        for component in Component::ALL {
            self.view
                .set_field_state(component, ComponentFieldState::default());
        }

        if let Some(component) = self.catalog.not_applicable(device_type) {
            tracing::debug!("'{}' has no {:?}, marking as n/a", device_type, component);
            self.view
                .set_field_state(component, ComponentFieldState::not_applicable());
        }
    }

    fn refresh_brands(&mut self, device_type: &str) {
        let catalog = Arc::clone(&self.catalog);
        let brands = catalog.brands(device_type);
        if brands.is_empty() {
            tracing::debug!("Unknown device type '{}', brand list left empty", device_type);
        }
        self.fill_suggestions(TextField::Brand, brands, BRAND_PROMPT);
    }

    fn fill_suggestions(&mut self, field: TextField, options: &[String], prompt: &str) {
        self.view.set_input_value(field, "");
        self.view.set_placeholder(field, &placeholder_for(options, prompt));
        self.view.set_suggestions(field, options);
    }
}

fn placeholder_for(options: &[String], prompt: &str) -> String {
    if options.is_empty() {
        prompt.to_string()
    } else {
        format!("Select from: {}", options.join(", "))
    }
}
