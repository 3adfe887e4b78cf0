// src/models/notification.rs

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
    Warning,
}

/// Aviso transitório exibido pelo cliente (toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(title: &str, description: impl Into<String>) -> Self {
        Self { title: title.to_string(), description: description.into(), variant: Variant::Default }
    }

    pub fn error(title: &str, description: impl Into<String>) -> Self {
        Self { title: title.to_string(), description: description.into(), variant: Variant::Destructive }
    }

    pub fn warning(title: &str, description: impl Into<String>) -> Self {
        Self { title: title.to_string(), description: description.into(), variant: Variant::Warning }
    }
}
