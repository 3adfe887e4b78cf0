// src/models/template.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Variáveis que o consumidor do modelo substitui no envio
pub const PLACEHOLDERS: [&str; 7] = [
    "[nome_cliente]",
    "[id_processo]",
    "[status_processo]",
    "[valor_honorarios]",
    "[data_vencimento]",
    "[data_audiencia]",
    "[hora_audiencia]",
];

pub const COPY_SUFFIX: &str = " (Cópia)";

// Linha da tabela `message_templates`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_default: bool,
    pub user_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

// Dados de inserção (criação e duplicação)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
}

impl NewTemplate {
    pub fn copy_of(source: &Template, owner: Uuid) -> Self {
        Self {
            title: format!("{}{}", source.title, COPY_SUFFIX),
            content: source.content.clone(),
            user_id: owner,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenEditorPayload {
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorFieldsPayload {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InsertVariablePayload {
    pub variable: String,
}
