// src/services/auth.rs

use std::sync::Arc;

use tokio::sync::watch;
use validator::Validate;

use crate::{
    common::error::AppError,
    models::auth::{LoginPayload, LoginResponse, User},
    services::{
        api_client::ApiClient,
        colaborador_service::ColaboradorService,
        session::{AuthState, Session},
    },
};

/// Dono do usuário atual durante toda a vida do processo.
///
/// Máquina de estados `Restoring → Authenticated | Unauthenticated`; cada
/// transição é publicada para a navegação via [`AuthService::subscribe`].
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    session: Arc<Session>,
    colaboradores: ColaboradorService,
}

impl AuthService {
    pub fn new(api: ApiClient, session: Arc<Session>, colaboradores: ColaboradorService) -> Self {
        Self {
            api,
            session,
            colaboradores,
        }
    }

    pub fn state(&self) -> AuthState {
        self.session.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.session.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.state().user().cloned()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_admin())
    }

    /// Restaura a sessão salva. Roda uma vez no início do processo; depois
    /// que o estado sai de `Restoring`, novas chamadas só devolvem o estado atual.
    pub async fn restore(&self) -> AuthState {
        if self.session.state() != AuthState::Restoring {
            return self.session.state();
        }

        let store = self.session.store();
        let (token, user) = tokio::join!(store.load_token(), store.load_user());

        let next = match (token, user) {
            (Ok(Some(token)), Ok(Some(user))) => {
                self.api.set_default_authorization(&token);
                tracing::info!("✅ Sessão restaurada para {}", user.email);
                AuthState::Authenticated(user)
            }
            (token, user) => {
                if let Err(e) = token.as_ref().and(user.as_ref()) {
                    tracing::error!("Erro ao carregar dados armazenados: {}", e);
                }
                AuthState::Unauthenticated
            }
        };

        self.session.set_state(next.clone());
        next
    }

    /// Faz login e grava a sessão. Em caso de falha nada fica gravado.
    pub async fn sign_in(&self, email: &str, senha: &str) -> Result<User, AppError> {
        let payload = LoginPayload {
            email: email.to_string(),
            senha: senha.to_string(),
        };
        payload.validate()?;

        let LoginResponse { token, user } = self
            .api
            .post_json("/auth/login", &payload)
            .await
            .inspect_err(|e| tracing::error!("Erro ao fazer login: {}", e))?;

        if let Err(e) = self.session.store().save(&token, &user).await {
            tracing::error!("🔥 Falha ao gravar a sessão, desfazendo: {}", e);
            let _ = self.session.store().clear().await;
            return Err(e);
        }

        self.api.set_default_authorization(&token);
        self.session.set_state(AuthState::Authenticated(user.clone()));
        tracing::info!("🔑 Login realizado: {}", user.email);

        Ok(user)
    }

    /// Encerra a sessão. O estado vai para `Unauthenticated` mesmo se a
    /// limpeza do armazenamento falhar; o erro ainda é devolvido.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        let result = self.session.invalidate().await;
        tracing::info!("👋 Sessão encerrada");
        result
    }

    /// Grava o usuário atualizado e publica o novo estado. Não toca no token.
    pub async fn update_user(&self, user: User) -> Result<(), AppError> {
        self.session
            .store()
            .save_user(&user)
            .await
            .inspect_err(|e| tracing::error!("Erro ao atualizar usuário: {}", e))?;
        self.session.set_state(AuthState::Authenticated(user));
        Ok(())
    }

    /// Busca o perfil no backend (`GET /me`) e aplica com `update_user`.
    pub async fn refresh_user(&self) -> Result<User, AppError> {
        let user = self.colaboradores.obter_perfil().await?;
        self.update_user(user.clone()).await?;
        Ok(user)
    }
}
