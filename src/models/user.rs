// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::format::format_date_br;

// Linha da tabela `profiles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Como a lista exibe cada perfil
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub id: Uuid,
    pub display_name: String,
    pub secondary: String,
    pub member_since: String,
}

impl From<&UserProfile> for UserListItem {
    fn from(profile: &UserProfile) -> Self {
        let full_name = profile
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        Self {
            id: profile.id,
            display_name: full_name.unwrap_or(&profile.email).to_string(),
            secondary: if full_name.is_some() { profile.email.clone() } else { String::new() },
            member_since: format_date_br(profile.created_at.date_naive()),
        }
    }
}

// Formulário de cadastro (só simulado; ver UserDirectoryController)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O nome completo é obrigatório."))]
    pub full_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile(full_name: Option<&str>) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            email: "ana@escritorio.com".into(),
            full_name: full_name.map(String::from),
            created_at: Utc.with_ymd_and_hms(2025, 8, 3, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn full_name_takes_precedence_over_email() {
        let item = UserListItem::from(&profile(Some("Ana Souza")));
        assert_eq!(item.display_name, "Ana Souza");
        assert_eq!(item.secondary, "ana@escritorio.com");
        assert_eq!(item.member_since, "03/08/2025");
    }

    #[test]
    fn falls_back_to_email_without_name() {
        let item = UserListItem::from(&profile(None));
        assert_eq!(item.display_name, "ana@escritorio.com");
        assert!(item.secondary.is_empty());
    }

    #[test]
    fn create_form_enforces_field_constraints() {
        let payload = CreateUserPayload {
            full_name: String::new(),
            email: "nao-e-email".into(),
            password: "123".into(),
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
