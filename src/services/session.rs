// src/services/session.rs

use std::sync::{PoisonError, RwLock};

use tokio::sync::watch;

use crate::{common::error::AppError, models::auth::User, storage::SessionStore};

/// Estado de autenticação observado pela navegação.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    // Ainda lendo a sessão salva (só no início do processo)
    #[default]
    Restoring,
    Authenticated(User),
    Unauthenticated,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Estado de sessão do processo: o que está gravado no aparelho, o token
/// padrão do cliente HTTP e o estado publicado para a navegação.
///
/// Só é alterado pelas operações nomeadas do `AuthService` e pelo
/// interceptor de 401, ambos passando por [`Session::invalidate`] para
/// encerrar a sessão.
pub struct Session {
    store: SessionStore,
    default_token: RwLock<Option<String>>,
    state: watch::Sender<AuthState>,
}

impl Session {
    pub fn new(store: SessionStore) -> Self {
        let (state, _rx) = watch::channel(AuthState::Restoring);
        Self {
            store,
            default_token: RwLock::new(None),
            state,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Valor do header `Authorization` padrão, se houver.
    pub fn default_authorization(&self) -> Option<String> {
        self.default_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| format!("Bearer {token}"))
    }

    pub(crate) fn install_token(&self, token: &str) {
        *self.default_token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    pub(crate) fn clear_token(&self) {
        *self.default_token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub(crate) fn set_state(&self, next: AuthState) {
        self.state.send_replace(next);
    }

    /// Encerra a sessão: limpa o armazenamento e o header padrão e publica
    /// `Unauthenticated`.
    ///
    /// A transição acontece mesmo se a limpeza do armazenamento falhar; nesse
    /// caso o erro é registrado e devolvido depois da transição.
    pub async fn invalidate(&self) -> Result<(), AppError> {
        let cleared = self.store.clear().await;
        if let Err(e) = &cleared {
            tracing::error!("🔥 Falha ao limpar a sessão salva: {}", e);
        }

        self.clear_token();
        self.set_state(AuthState::Unauthenticated);
        cleared
    }
}
