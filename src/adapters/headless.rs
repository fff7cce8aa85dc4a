use crate::domain::model::{Component, ComponentFieldState, ModelOption};
use crate::domain::ports::{
    DisplayNode, MaterialLine, PriceView, Region, SelectorView, TextField,
};
use std::collections::BTreeMap;

/// 記憶體內的表單，實作兩個 view 介面；CLI 與測試都用它取代真正的頁面
#[derive(Debug, Clone)]
pub struct HeadlessForm {
    device_type: String,
    inputs: BTreeMap<TextField, String>,
    placeholders: BTreeMap<TextField, String>,
    suggestion_lists: BTreeMap<&'static str, Vec<String>>,
    components: BTreeMap<Component, ComponentFieldState>,
    extra_fields: Vec<(String, String)>,
    selected_model: Option<ModelOption>,
    cookies: String,
    submit_enabled: bool,
    submit_label: String,
    texts: BTreeMap<DisplayNode, String>,
    material_lines: Vec<MaterialLine>,
    error_text: String,
    visible_region: Region,
    submit_state_changes: usize,
}

impl Default for HeadlessForm {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessForm {
    pub fn new() -> Self {
        Self {
            device_type: String::new(),
            inputs: BTreeMap::new(),
            placeholders: BTreeMap::new(),
            suggestion_lists: BTreeMap::new(),
            components: Component::ALL
                .into_iter()
                .map(|c| (c, ComponentFieldState::default()))
                .collect(),
            extra_fields: Vec::new(),
            selected_model: None,
            cookies: String::new(),
            submit_enabled: true,
            submit_label: "Calculate Price".to_string(),
            texts: BTreeMap::new(),
            material_lines: Vec::new(),
            error_text: String::new(),
            visible_region: Region::Initial,
            submit_state_changes: 0,
        }
    }

    // --- 模擬使用者輸入 ---

    pub fn select_device_type(&mut self, device_type: impl Into<String>) {
        self.device_type = device_type.into();
    }

    pub fn type_into(&mut self, field: TextField, value: impl Into<String>) {
        self.inputs.insert(field, value.into());
    }

    pub fn select_model(&mut self, option: Option<ModelOption>) {
        self.selected_model = option;
    }

    /// 其他具名欄位，例如 `age`、`condition`；同名時覆寫
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.extra_fields.iter_mut().find(|(key, _)| *key == name) {
            Some(existing) => existing.1 = value,
            None => self.extra_fields.push((name, value)),
        }
    }

    pub fn set_cookies(&mut self, cookies: impl Into<String>) {
        self.cookies = cookies.into();
    }

    // --- 觀察畫面狀態 ---

    pub fn placeholder(&self, field: TextField) -> &str {
        self.placeholders.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn suggestions(&self, field: TextField) -> &[String] {
        self.suggestion_lists
            .get(field.suggestion_list_id())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn suggestion_list_count(&self) -> usize {
        self.suggestion_lists.len()
    }

    pub fn field_state(&self, component: Component) -> ComponentFieldState {
        self.components
            .get(&component)
            .copied()
            .unwrap_or_default()
    }

    pub fn text(&self, node: DisplayNode) -> &str {
        self.texts.get(&node).map(String::as_str).unwrap_or("")
    }

    pub fn material_lines(&self) -> &[MaterialLine] {
        &self.material_lines
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    pub fn visible_region(&self) -> Region {
        self.visible_region
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible_region == region
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// 送出按鈕狀態被切換的次數
    pub fn submit_state_changes(&self) -> usize {
        self.submit_state_changes
    }
}

impl SelectorView for HeadlessForm {
    fn device_type(&self) -> String {
        self.device_type.clone()
    }

    fn input_value(&self, field: TextField) -> String {
        self.inputs.get(&field).cloned().unwrap_or_default()
    }

    fn set_input_value(&mut self, field: TextField, value: &str) {
        self.inputs.insert(field, value.to_string());
    }

    fn set_placeholder(&mut self, field: TextField, placeholder: &str) {
        self.placeholders.insert(field, placeholder.to_string());
    }

    fn set_suggestions(&mut self, field: TextField, suggestions: &[String]) {
        self.suggestion_lists
            .insert(field.suggestion_list_id(), suggestions.to_vec());
    }

    fn set_field_state(&mut self, component: Component, state: ComponentFieldState) {
        self.components.insert(component, state);
    }
}

impl PriceView for HeadlessForm {
    fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("item_type".to_string(), self.device_type.clone()),
            ("brand".to_string(), self.input_value(TextField::Brand)),
            ("model".to_string(), self.input_value(TextField::Model)),
        ];

        // disabled 欄位和瀏覽器一樣不送出
        fields.extend(
            self.components
                .iter()
                .filter(|(_, state)| state.is_enabled())
                .map(|(component, state)| {
                    (
                        component.field_name().to_string(),
                        state.condition().to_string(),
                    )
                }),
        );

        fields.extend(self.extra_fields.iter().cloned());
        fields
    }

    fn selected_model_option(&self) -> Option<ModelOption> {
        self.selected_model.clone()
    }

    fn cookies(&self) -> String {
        self.cookies.clone()
    }

    fn set_submit_state(&mut self, enabled: bool, label: &str) {
        self.submit_enabled = enabled;
        self.submit_label = label.to_string();
        self.submit_state_changes += 1;
    }

    fn set_text(&mut self, node: DisplayNode, text: &str) {
        self.texts.insert(node, text.to_string());
    }

    fn set_material_lines(&mut self, lines: &[MaterialLine]) {
        self.material_lines = lines.to_vec();
    }

    fn set_error_text(&mut self, message: &str) {
        self.error_text = message.to_string();
    }

    fn show_region(&mut self, region: Region) {
        self.visible_region = region;
    }
}
