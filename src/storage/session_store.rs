// src/storage/session_store.rs

use std::sync::Arc;

use crate::{common::error::AppError, models::auth::User, storage::kv::KeyValueStore};

pub const TOKEN_KEY: &str = "@RLSApp:token";
pub const USER_KEY: &str = "@RLSApp:user";
pub const SAVED_EMAIL_KEY: &str = "@RLSApp:savedEmail";
pub const REMEMBER_USER_KEY: &str = "@RLSApp:rememberUser";

/// Sessão completa lida do armazenamento.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

// O repositório da sessão, responsável por todas as chaves do app no aparelho
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub async fn load_token(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .kv
            .get_item(TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    pub async fn load_user(&self) -> Result<Option<User>, AppError> {
        match self.kv.get_item(USER_KEY).await? {
            Some(json) if !json.is_empty() => Ok(Some(serde_json::from_str(&json)?)),
            _ => Ok(None),
        }
    }

    /// Lê token e usuário em paralelo. Par incompleto conta como sem sessão.
    pub async fn load(&self) -> Result<Option<StoredSession>, AppError> {
        let (token, user) = tokio::try_join!(self.load_token(), self.load_user())?;
        Ok(match (token, user) {
            (Some(token), Some(user)) => Some(StoredSession { token, user }),
            _ => None,
        })
    }

    /// Grava token e usuário. Só retorna depois que as duas escritas terminam.
    pub async fn save(&self, token: &str, user: &User) -> Result<(), AppError> {
        let user_json = serde_json::to_string(user)?;
        let (token_result, user_result) = tokio::join!(
            self.kv.set_item(TOKEN_KEY, token),
            self.kv.set_item(USER_KEY, &user_json)
        );
        token_result.and(user_result)
    }

    pub async fn save_user(&self, user: &User) -> Result<(), AppError> {
        let user_json = serde_json::to_string(user)?;
        self.kv.set_item(USER_KEY, &user_json).await
    }

    /// Remove token e usuário. As duas remoções sempre são tentadas;
    /// o primeiro erro é devolvido.
    pub async fn clear(&self) -> Result<(), AppError> {
        let (token_result, user_result) = tokio::join!(
            self.kv.remove_item(TOKEN_KEY),
            self.kv.remove_item(USER_KEY)
        );
        token_result.and(user_result)
    }

    /// E-mail lembrado para preencher o login, só quando a opção está marcada.
    pub async fn remembered_email(&self) -> Result<Option<String>, AppError> {
        let (email, flag) = tokio::try_join!(
            self.kv.get_item(SAVED_EMAIL_KEY),
            self.kv.get_item(REMEMBER_USER_KEY)
        )?;
        Ok(match flag.as_deref() {
            Some("true") => email.filter(|e| !e.is_empty()),
            _ => None,
        })
    }

    pub async fn remember_email(&self, email: &str) -> Result<(), AppError> {
        self.kv.set_item(SAVED_EMAIL_KEY, email).await?;
        self.kv.set_item(REMEMBER_USER_KEY, "true").await
    }

    pub async fn forget_email(&self) -> Result<(), AppError> {
        self.kv.remove_item(SAVED_EMAIL_KEY).await?;
        self.kv.remove_item(REMEMBER_USER_KEY).await
    }
}
