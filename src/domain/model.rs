use crate::utils::error::{PricerError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_unique};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 會被裝置類型影響的零件欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Battery,
    Screen,
    Motherboard,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::Battery, Component::Screen, Component::Motherboard];

    /// 表單上的欄位名稱
    pub fn field_name(&self) -> &'static str {
        match self {
            Component::Battery => "battery_status",
            Component::Screen => "screen_condition",
            Component::Motherboard => "motherboard_status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCondition {
    #[default]
    Good,
    Fair,
    Poor,
    Na,
}

impl ComponentCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCondition::Good => "good",
            ComponentCondition::Fair => "fair",
            ComponentCondition::Poor => "poor",
            ComponentCondition::Na => "na",
        }
    }
}

impl fmt::Display for ComponentCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 零件欄位的狀態。`na` 一定是 disabled，由建構方式保證。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentFieldState {
    enabled: bool,
    condition: ComponentCondition,
}

impl ComponentFieldState {
    pub fn new(condition: ComponentCondition) -> Self {
        Self {
            enabled: condition != ComponentCondition::Na,
            condition,
        }
    }

    pub fn not_applicable() -> Self {
        Self::new(ComponentCondition::Na)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn condition(&self) -> ComponentCondition {
        self.condition
    }
}

impl Default for ComponentFieldState {
    fn default() -> Self {
        Self::new(ComponentCondition::Good)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTypeEntry {
    pub brands: Vec<String>,
    #[serde(default)]
    pub models: HashMap<String, Vec<String>>,
    /// 此類型沒有的零件 (電視沒有電池、遊戲機沒有螢幕)
    #[serde(default)]
    pub not_applicable: Option<Component>,
}

impl DeviceTypeEntry {
    pub fn new(brands: &[&str]) -> Self {
        Self {
            brands: brands.iter().map(|b| b.to_string()).collect(),
            models: HashMap::new(),
            not_applicable: None,
        }
    }

    pub fn with_models(mut self, brand: &str, models: &[&str]) -> Self {
        self.models.insert(
            brand.to_string(),
            models.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    pub fn without_component(mut self, component: Component) -> Self {
        self.not_applicable = Some(component);
        self
    }

    pub fn models_for(&self, brand: &str) -> &[String] {
        self.models.get(brand).map(Vec::as_slice).unwrap_or(&[])
    }

    fn validate(&self, device_type: &str) -> Result<()> {
        let brands_field = format!("catalog.{}.brands", device_type);
        for brand in &self.brands {
            validate_non_empty_string(&brands_field, brand)?;
        }
        validate_unique(&brands_field, &self.brands)?;

        let models_field = format!("catalog.{}.models", device_type);
        for models in self.models.values() {
            for model in models {
                validate_non_empty_string(&models_field, model)?;
            }
        }
        for brand in self.models.keys() {
            if !self.brands.contains(brand) {
                return Err(PricerError::InvalidConfigValueError {
                    field: models_field,
                    value: brand.clone(),
                    reason: "Brand has models but is not listed in brands".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// 裝置類型 → 品牌/機型 的靜態對照表，建立後不可變動
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceCatalog {
    entries: HashMap<String, DeviceTypeEntry>,
}

impl DeviceCatalog {
    /// 建立並驗證對照表；類型名稱一律轉小寫
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, DeviceTypeEntry)>,
        K: AsRef<str>,
    {
        let mut normalized = HashMap::new();
        for (name, entry) in entries {
            let key = name.as_ref().trim().to_lowercase();
            entry.validate(&key)?;
            if normalized.insert(key.clone(), entry).is_some() {
                return Err(PricerError::InvalidConfigValueError {
                    field: "catalog".to_string(),
                    value: key,
                    reason: "Device type defined more than once".to_string(),
                });
            }
        }
        Ok(Self {
            entries: normalized,
        })
    }

    pub fn get(&self, device_type: &str) -> Option<&DeviceTypeEntry> {
        self.entries.get(&device_type.trim().to_lowercase())
    }

    pub fn brands(&self, device_type: &str) -> &[String] {
        self.get(device_type)
            .map(|entry| entry.brands.as_slice())
            .unwrap_or(&[])
    }

    pub fn models(&self, device_type: &str, brand: &str) -> &[String] {
        self.get(device_type)
            .map(|entry| entry.models_for(brand))
            .unwrap_or(&[])
    }

    pub fn not_applicable(&self, device_type: &str) -> Option<Component> {
        self.get(device_type).and_then(|entry| entry.not_applicable)
    }

    /// 依字母排序的類型清單
    pub fn device_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn builtin() -> Self {
        let smartphone = DeviceTypeEntry::new(&[
            "Apple", "Samsung", "OnePlus", "Xiaomi", "Google", "Oppo", "Vivo", "Realme",
        ])
        .with_models(
            "Apple",
            &[
                "iPhone 15 Pro Max",
                "iPhone 15 Pro",
                "iPhone 15",
                "iPhone 14 Pro Max",
                "iPhone 14 Pro",
                "iPhone 14",
                "iPhone 13 Pro Max",
                "iPhone 13",
            ],
        )
        .with_models(
            "Samsung",
            &[
                "Galaxy S23 Ultra",
                "Galaxy S23+",
                "Galaxy S23",
                "Galaxy S22 Ultra",
                "Galaxy S22+",
                "Galaxy A54",
                "Galaxy A34",
            ],
        )
        .with_models(
            "OnePlus",
            &["11 5G", "10 Pro", "10T", "Nord 3", "Nord CE 3", "Nord N30"],
        )
        .with_models(
            "Xiaomi",
            &[
                "13 Pro",
                "13",
                "12 Pro",
                "12",
                "Redmi Note 12 Pro+",
                "Redmi Note 12 Pro",
            ],
        )
        .with_models(
            "Google",
            &["Pixel 8 Pro", "Pixel 8", "Pixel 7 Pro", "Pixel 7", "Pixel 6a"],
        )
        .with_models(
            "Oppo",
            &["Find X6 Pro", "Find X6", "Reno 10 Pro+", "Reno 10 Pro", "Reno 10"],
        )
        .with_models("Vivo", &["X90 Pro+", "X90 Pro", "X90", "V29 Pro", "V29"])
        .with_models(
            "Realme",
            &["11 Pro+", "11 Pro", "GT Neo 5", "GT 3", "GT Neo 3"],
        );

        let laptop = DeviceTypeEntry::new(&[
            "Apple", "Dell", "HP", "Lenovo", "Asus", "Acer", "MSI", "Microsoft",
        ])
        .with_models(
            "Apple",
            &[
                "MacBook Pro 16\"",
                "MacBook Pro 14\"",
                "MacBook Pro 13\"",
                "MacBook Air M2",
                "MacBook Air M1",
            ],
        )
        .with_models(
            "Dell",
            &["XPS 15", "XPS 13", "Latitude 7430", "Inspiron 15", "Precision 5570"],
        )
        .with_models(
            "HP",
            &["Spectre x360", "Envy x360", "Pavilion 15", "EliteBook 840", "ProBook 450"],
        )
        .with_models(
            "Lenovo",
            &["ThinkPad X1 Carbon", "ThinkPad T14", "IdeaPad 5", "Yoga 9i", "Legion 5"],
        )
        .with_models(
            "Asus",
            &["ROG Zephyrus G14", "ROG Strix", "ZenBook 14", "TUF Gaming A15", "VivoBook 15"],
        )
        .with_models(
            "Acer",
            &["Predator Helios 300", "Swift 5", "Aspire 5", "Nitro 5", "ConceptD 7"],
        )
        .with_models(
            "MSI",
            &["GE76 Raider", "GS66 Stealth", "Creator Z16", "Prestige 14", "Modern 14"],
        )
        .with_models(
            "Microsoft",
            &[
                "Surface Laptop 5",
                "Surface Laptop 4",
                "Surface Book 3",
                "Surface Laptop Studio",
                "Surface Laptop Go 2",
            ],
        );

        let tablet = DeviceTypeEntry::new(&["Apple", "Samsung", "Microsoft", "Lenovo", "Huawei"])
            .with_models(
                "Apple",
                &["iPad Pro 12.9\"", "iPad Pro 11\"", "iPad Air", "iPad mini", "iPad"],
            )
            .with_models(
                "Samsung",
                &[
                    "Galaxy Tab S9 Ultra",
                    "Galaxy Tab S9+",
                    "Galaxy Tab S9",
                    "Galaxy Tab S8",
                    "Galaxy Tab A8",
                ],
            )
            .with_models(
                "Microsoft",
                &["Surface Pro 9", "Surface Pro 8", "Surface Pro 7+", "Surface Go 3"],
            )
            .with_models(
                "Lenovo",
                &["Tab P12 Pro", "Tab P11 Pro", "Tab M10 Plus", "Yoga Tab 11"],
            )
            .with_models(
                "Huawei",
                &["MatePad Pro", "MatePad 11", "MatePad 10.4", "MatePad T10s"],
            );

        let tv = DeviceTypeEntry::new(&["Samsung", "LG", "Sony", "TCL", "Hisense"])
            .with_models(
                "Samsung",
                &["Neo QLED 8K", "Neo QLED 4K", "QLED", "Crystal UHD"],
            )
            .with_models("LG", &["OLED G3", "OLED C3", "QNED", "NanoCell"])
            .with_models(
                "Sony",
                &["Bravia XR A95K", "Bravia XR X95K", "Bravia X85K"],
            )
            .with_models("TCL", &["6-Series", "5-Series", "4-Series"])
            .with_models("Hisense", &["U8K", "U7K", "U6K"])
            .without_component(Component::Battery);

        let gaming_console = DeviceTypeEntry::new(&["Sony", "Microsoft", "Nintendo"])
            .with_models(
                "Sony",
                &["PlayStation 5", "PlayStation 4 Pro", "PlayStation 4"],
            )
            .with_models(
                "Microsoft",
                &["Xbox Series X", "Xbox Series S", "Xbox One X", "Xbox One S"],
            )
            .with_models("Nintendo", &["Switch OLED", "Switch", "Switch Lite"])
            .without_component(Component::Screen);

        let entries = [
            ("smartphone", smartphone),
            ("laptop", laptop),
            ("tablet", tablet),
            ("tv", tv),
            ("gaming console", gaming_console),
        ];

        // 內建資料已知合法，不需要再跑一次驗證
        Self {
            entries: entries
                .into_iter()
                .map(|(name, entry)| (name.to_string(), entry))
                .collect(),
        }
    }
}

/// 機型選單中被選取的選項，附帶基本價格與上市年份
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub value: String,
    pub base_price: Option<String>,
    pub release_year: Option<String>,
}

impl ModelOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, base_price: impl Into<String>, release_year: impl Into<String>) -> Self {
        self.base_price = Some(base_price.into());
        self.release_year = Some(release_year.into());
        self
    }
}

/// 後端回傳的年齡可能是數字或字串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceAge {
    Years(f64),
    Text(String),
}

impl fmt::Display for DeviceAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 的 Display 對整數值不帶小數點，也不會截斷大數
            DeviceAge::Years(years) => write!(f, "{}", years),
            DeviceAge::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialValue {
    pub material: String,
    pub value: f64,
}

/// 一次成功計算的結果，render 完即丟棄
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResult {
    pub total_price: f64,
    pub base_price: f64,
    pub age: Option<DeviceAge>,
    pub condition: String,
    pub material_values: Vec<MaterialValue>,
}

/// `/calculator/calculate/` 的 JSON 回應
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub success: bool,
    pub total_price: Option<f64>,
    pub base_price: Option<f64>,
    pub age: Option<DeviceAge>,
    pub condition: Option<String>,
    pub material_values: Option<serde_json::Map<String, serde_json::Value>>,
    pub error: Option<String>,
}

pub const CALCULATION_FAILED: &str = "Failed to calculate price";

impl PriceResponse {
    /// 把 wire 格式轉成結果；`success: false` 或缺少價格都視為失敗
    pub fn into_result(self) -> Result<PriceResult> {
        if !self.success {
            return Err(PricerError::request(
                self.error
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| CALCULATION_FAILED.to_string()),
            ));
        }

        let (Some(total_price), Some(base_price)) = (self.total_price, self.base_price) else {
            tracing::warn!("Successful response without total_price/base_price");
            return Err(PricerError::request(CALCULATION_FAILED));
        };

        let material_values = self
            .material_values
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(material, value)| match value.as_f64() {
                Some(value) => Some(MaterialValue { material, value }),
                None => {
                    tracing::warn!("Ignoring non-numeric material value for {}", material);
                    None
                }
            })
            .collect();

        Ok(PriceResult {
            total_price,
            base_price,
            age: self.age,
            condition: self.condition.unwrap_or_default(),
            material_values,
        })
    }
}
