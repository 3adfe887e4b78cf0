// src/screens/templates.rs
//
// Tela de configurações: modelos de mensagem e o editor aberto.

use std::{collections::HashMap, sync::Arc, time::Duration};

use serde::Serialize;
use tokio::{sync::Mutex, time::Instant};
use uuid::Uuid;

use crate::{
    db::TemplateStore,
    models::{
        auth::CurrentUser,
        notification::Notification,
        template::{NewTemplate, Template, PLACEHOLDERS},
    },
    screens::Transition,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateScreen {
    pub templates: Vec<Template>,
    pub current_user_id: Option<Uuid>,
    /// `Some` enquanto o editor estiver aberto.
    pub editor: Option<TemplateEditor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEditor {
    /// `None` = criando um modelo novo.
    pub selected: Option<Uuid>,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOp {
    Load,
    Create,
    Update,
    Duplicate,
    Delete,
}

#[derive(Debug, Clone)]
pub enum TemplateAction {
    Loaded { user_id: Uuid, templates: Vec<Template> },
    OpenCreate,
    OpenEdit(Uuid),
    CloseEditor,
    SetTitle(String),
    SetContent(String),
    InsertVariable(String),
    ContentCopied,
    /// `from_editor`: veio do "salvar" do editor, que então fecha.
    Created { template: Template, from_editor: bool },
    Updated { id: Uuid, title: String, content: String, from_editor: bool },
    Duplicated(Template),
    Deleted(Uuid),
    Failed(TemplateOp),
}

/// O que salvar o editor significa, decidido antes de qualquer chamada remota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create { title: String, content: String },
    Update { id: Uuid, title: String, content: String },
}

fn error(description: &str) -> Notification {
    Notification::error("Erro", description)
}

fn failure_message(op: TemplateOp) -> &'static str {
    match op {
        TemplateOp::Load => "Não foi possível carregar modelos.",
        TemplateOp::Create => "Falha ao criar modelo.",
        TemplateOp::Update => "Falha ao editar modelo.",
        TemplateOp::Duplicate => "Falha ao duplicar.",
        TemplateOp::Delete => "Falha ao remover modelo.",
    }
}

fn require_fields(title: &str, content: &str) -> Result<(), Notification> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(error("Título e conteúdo obrigatórios."));
    }
    Ok(())
}

pub fn plan_save(screen: &TemplateScreen) -> Result<SaveRequest, Notification> {
    let editor = screen
        .editor
        .as_ref()
        .ok_or_else(|| error("Nenhum modelo aberto para edição."))?;

    require_fields(&editor.title, &editor.content)?;

    match editor.selected {
        Some(id) if !screen.templates.iter().any(|t| t.id == id) => {
            Err(error("Modelo não encontrado."))
        }
        Some(id) => Ok(SaveRequest::Update {
            id,
            title: editor.title.clone(),
            content: editor.content.clone(),
        }),
        None => Ok(SaveRequest::Create {
            title: editor.title.clone(),
            content: editor.content.clone(),
        }),
    }
}

// Ações que só fazem sentido com o editor aberto
fn with_editor(
    mut screen: TemplateScreen,
    f: impl FnOnce(&mut TemplateEditor) -> Option<Notification>,
) -> Transition<TemplateScreen> {
    let notification = match screen.editor.as_mut() {
        Some(editor) => f(editor),
        None => return Transition::rejected(screen, error("Nenhum modelo aberto para edição.")),
    };

    let transition = Transition::applied(screen);
    match notification {
        Some(n) => transition.notify(n),
        None => transition,
    }
}

pub fn reduce(mut screen: TemplateScreen, action: TemplateAction) -> Transition<TemplateScreen> {
    match action {
        TemplateAction::Loaded { user_id, templates } => {
            screen.current_user_id = Some(user_id);
            screen.templates = templates;
            Transition::applied(screen)
        }
        TemplateAction::OpenCreate => {
            screen.editor = Some(TemplateEditor::default());
            Transition::applied(screen)
        }
        TemplateAction::OpenEdit(id) => {
            let editor = screen.templates.iter().find(|t| t.id == id).map(|t| TemplateEditor {
                selected: Some(t.id),
                title: t.title.clone(),
                content: t.content.clone(),
            });
            match editor {
                Some(editor) => {
                    screen.editor = Some(editor);
                    Transition::applied(screen)
                }
                None => Transition::rejected(screen, error("Modelo não encontrado.")),
            }
        }
        TemplateAction::CloseEditor => {
            screen.editor = None;
            Transition::applied(screen)
        }
        TemplateAction::SetTitle(title) => with_editor(screen, |editor| {
            editor.title = title;
            None
        }),
        TemplateAction::SetContent(content) => with_editor(screen, |editor| {
            editor.content = content;
            None
        }),
        TemplateAction::InsertVariable(variable) => {
            if !PLACEHOLDERS.contains(&variable.as_str()) {
                return Transition::rejected(screen, error("Variável desconhecida."));
            }
            // Sempre no fim do texto, independente do cursor
            with_editor(screen, |editor| {
                editor.content.push(' ');
                editor.content.push_str(&variable);
                None
            })
        }
        TemplateAction::ContentCopied => with_editor(screen, |_| {
            Some(Notification::success(
                "Copiado!",
                "Mensagem copiada para a área de transferência.",
            ))
        }),
        TemplateAction::Created { template, from_editor } => {
            screen.templates.insert(0, template);
            if from_editor {
                screen.editor = None;
            }
            Transition::applied(screen)
                .notify(Notification::success("Criado!", "Novo modelo salvo com sucesso."))
        }
        TemplateAction::Updated { id, title, content, from_editor } => {
            for template in screen.templates.iter_mut().filter(|t| t.id == id) {
                template.title = title.clone();
                template.content = content.clone();
            }
            if from_editor {
                screen.editor = None;
            }
            Transition::applied(screen)
                .notify(Notification::success("Atualizado!", "Modelo editado com sucesso."))
        }
        TemplateAction::Duplicated(template) => {
            screen.templates.insert(0, template);
            Transition::applied(screen)
                .notify(Notification::success("Duplicado!", "Modelo copiado com sucesso."))
        }
        TemplateAction::Deleted(id) => {
            screen.templates.retain(|t| t.id != id);
            if screen.editor.as_ref().is_some_and(|e| e.selected == Some(id)) {
                screen.editor = None;
            }
            Transition::applied(screen)
                .notify(Notification::success("Removido!", "Modelo apagado com sucesso."))
        }
        TemplateAction::Failed(op) => Transition::remote_failed(screen, error(failure_message(op))),
    }
}

// ===============================
// CONTROLADOR
// ===============================

/// Sessões sem uso por mais que isso são descartadas (e remontadas se voltarem).
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

struct Session {
    screen: TemplateScreen,
    touched: Instant,
}

/// Mantém a tela de cada usuário em memória e faz as idas ao banco.
/// O lock nunca fica preso durante uma chamada remota: edições simultâneas
/// seguem "última escrita vence". As rotas de CRUD gravam exatamente o que
/// receberam e não mexem no editor aberto.
#[derive(Clone)]
pub struct TemplateController {
    store: Arc<dyn TemplateStore>,
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl TemplateController {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store, sessions: Arc::new(Mutex::new(HashMap::new())) }
    }

    async fn apply(&self, user: &CurrentUser, action: TemplateAction) -> Transition<TemplateScreen> {
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|id, session| *id == user.id || session.touched.elapsed() < SESSION_IDLE_TTL);

        let screen = sessions.remove(&user.id).map(|s| s.screen).unwrap_or_default();
        let transition = reduce(screen, action);
        sessions.insert(
            user.id,
            Session { screen: transition.state.clone(), touched: Instant::now() },
        );
        transition
    }

    /// Tela atual do usuário; monta se não houver sessão. Se a montagem
    /// falhar, devolve a própria falha para quem chamou.
    async fn snapshot(&self, user: &CurrentUser) -> Result<TemplateScreen, Transition<TemplateScreen>> {
        if let Some(session) = self.sessions.lock().await.get(&user.id) {
            return Ok(session.screen.clone());
        }
        let mounted = self.mount(user).await;
        if mounted.is_applied() { Ok(mounted.state) } else { Err(mounted) }
    }

    /// Carga inicial da tela.
    pub async fn mount(&self, user: &CurrentUser) -> Transition<TemplateScreen> {
        match self.store.list_templates(user).await {
            Ok(templates) => self.apply(user, TemplateAction::Loaded { user_id: user.id, templates }).await,
            Err(e) => {
                tracing::error!(user_id = %user.id, "Falha ao carregar modelos: {}", e);
                // Nada é guardado: a próxima ação tenta carregar de novo
                let screen = self
                    .sessions
                    .lock()
                    .await
                    .get(&user.id)
                    .map(|s| s.screen.clone())
                    .unwrap_or_default();
                reduce(screen, TemplateAction::Failed(TemplateOp::Load))
            }
        }
    }

    /// Estado atual da sessão, montando a tela se ainda não existir.
    pub async fn current(&self, user: &CurrentUser) -> Transition<TemplateScreen> {
        match self.snapshot(user).await {
            Ok(screen) => Transition::applied(screen),
            Err(failed) => failed,
        }
    }

    /// Ações locais do editor (sem ida ao banco).
    pub async fn dispatch(&self, user: &CurrentUser, action: TemplateAction) -> Transition<TemplateScreen> {
        if let Err(failed) = self.snapshot(user).await {
            return failed;
        }
        self.apply(user, action).await
    }

    async fn insert(&self, user: &CurrentUser, new: NewTemplate, from_editor: bool) -> TemplateAction {
        match self.store.insert_template(user, &new).await {
            Ok(template) => TemplateAction::Created { template, from_editor },
            Err(e) => {
                tracing::error!(user_id = %user.id, "Falha ao criar modelo: {}", e);
                TemplateAction::Failed(TemplateOp::Create)
            }
        }
    }

    async fn update(
        &self,
        user: &CurrentUser,
        id: Uuid,
        title: String,
        content: String,
        from_editor: bool,
    ) -> TemplateAction {
        match self.store.update_template(user, id, &title, &content).await {
            Ok(()) => TemplateAction::Updated { id, title, content, from_editor },
            Err(e) => {
                tracing::error!(user_id = %user.id, template_id = %id, "Falha ao editar modelo: {}", e);
                TemplateAction::Failed(TemplateOp::Update)
            }
        }
    }

    /// Salva o que está no editor e o fecha em caso de sucesso.
    pub async fn save(&self, user: &CurrentUser) -> Transition<TemplateScreen> {
        let screen = match self.snapshot(user).await {
            Ok(screen) => screen,
            Err(failed) => return failed,
        };
        let request = match plan_save(&screen) {
            Ok(request) => request,
            Err(notification) => return Transition::rejected(screen, notification),
        };

        let action = match request {
            SaveRequest::Create { title, content } => {
                self.insert(user, NewTemplate { title, content, user_id: user.id }, true).await
            }
            SaveRequest::Update { id, title, content } => {
                self.update(user, id, title, content, true).await
            }
        };
        self.apply(user, action).await
    }

    pub async fn create(&self, user: &CurrentUser, title: String, content: String) -> Transition<TemplateScreen> {
        let screen = match self.snapshot(user).await {
            Ok(screen) => screen,
            Err(failed) => return failed,
        };
        if let Err(notification) = require_fields(&title, &content) {
            return Transition::rejected(screen, notification);
        }

        let action = self.insert(user, NewTemplate { title, content, user_id: user.id }, false).await;
        self.apply(user, action).await
    }

    pub async fn edit(
        &self,
        user: &CurrentUser,
        id: Uuid,
        title: String,
        content: String,
    ) -> Transition<TemplateScreen> {
        let screen = match self.snapshot(user).await {
            Ok(screen) => screen,
            Err(failed) => return failed,
        };
        if !screen.templates.iter().any(|t| t.id == id) {
            return Transition::rejected(screen, error("Modelo não encontrado."));
        }
        if let Err(notification) = require_fields(&title, &content) {
            return Transition::rejected(screen, notification);
        }

        let action = self.update(user, id, title, content, false).await;
        self.apply(user, action).await
    }

    pub async fn duplicate(&self, user: &CurrentUser, id: Uuid) -> Transition<TemplateScreen> {
        let screen = match self.snapshot(user).await {
            Ok(screen) => screen,
            Err(failed) => return failed,
        };
        let copy = screen
            .templates
            .iter()
            .find(|t| t.id == id)
            .map(|source| NewTemplate::copy_of(source, user.id));
        let Some(copy) = copy else {
            return Transition::rejected(screen, error("Modelo não encontrado."));
        };

        let action = match self.store.insert_template(user, &copy).await {
            Ok(template) => TemplateAction::Duplicated(template),
            Err(e) => {
                tracing::error!(user_id = %user.id, template_id = %id, "Falha ao duplicar modelo: {}", e);
                TemplateAction::Failed(TemplateOp::Duplicate)
            }
        };
        self.apply(user, action).await
    }

    /// Remove no banco e só então da lista local.
    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Transition<TemplateScreen> {
        if let Err(failed) = self.snapshot(user).await {
            return failed;
        }
        let action = match self.store.delete_template(user, id).await {
            Ok(()) => TemplateAction::Deleted(id),
            Err(e) => {
                tracing::error!(user_id = %user.id, template_id = %id, "Falha ao remover modelo: {}", e);
                TemplateAction::Failed(TemplateOp::Delete)
            }
        };
        self.apply(user, action).await
    }
}
