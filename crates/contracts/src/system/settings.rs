use serde::{Deserialize, Serialize};

use crate::domain::common::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: i64,
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Record for Setting {
    fn record_id(&self) -> i64 {
        self.id
    }
}
