use serde::{
    Serialize,
    Deserialize
};

/// 只取出 JSON 物件中的 `name` 欄位，其餘欄位交給各型別自行解析
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
