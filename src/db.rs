use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::CurrentUser,
        finance::LedgerEntry,
        template::{NewTemplate, Template},
        user::UserProfile,
    },
};

pub mod ledger_repo;
pub use ledger_repo::LedgerRepository;
pub mod profile_repo;
pub use profile_repo::ProfileRepository;
pub mod template_repo;
pub use template_repo::TemplateRepository;

// Fronteiras com o armazenamento remoto. Cada chamada é uma ida e volta
// independente; o `Result` é a forma tipada do par `{ data, error }`.

#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Ordenado por `created_at` crescente.
    async fn list_templates(&self, user: &CurrentUser) -> Result<Vec<Template>, AppError>;

    async fn insert_template(&self, user: &CurrentUser, new: &NewTemplate) -> Result<Template, AppError>;

    /// Persiste apenas título e conteúdo.
    async fn update_template(
        &self,
        user: &CurrentUser,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<(), AppError>;

    async fn delete_template(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Todos os lançamentos visíveis ao usuário, mais recentes primeiro.
    async fn list_entries(&self, user: &CurrentUser) -> Result<Vec<LedgerEntry>, AppError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn list_profiles(&self, user: &CurrentUser) -> Result<Vec<UserProfile>, AppError>;
}
