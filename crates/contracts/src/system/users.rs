use serde::{Deserialize, Serialize};

use crate::domain::common::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_staff_user: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub date_joined: Option<String>,
}

impl User {
    pub fn role_label(&self) -> &'static str {
        if self.is_admin {
            "Admin"
        } else if self.is_staff_user {
            "Staff"
        } else {
            "User"
        }
    }
}

impl Record for User {
    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Body of `PATCH users/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivationDto {
    pub is_active: bool,
}
