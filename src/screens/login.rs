// src/screens/login.rs

use validator::Validate;

use crate::{
    common::{error::AppError, notice::Notice},
    config::AppState,
    models::auth::LoginPayload,
    screens::screen_state::ScreenState,
};

#[derive(Debug, Clone, Default)]
pub struct LoginData {
    pub email: String,
    pub senha: String,
    pub mostrar_senha: bool,
    pub lembrar_usuario: bool,
    pub carregando: bool,
}

pub struct LoginScreen {
    app: AppState,
    state: ScreenState<LoginData>,
}

impl LoginScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: ScreenState::new(LoginData::default()),
        }
    }

    pub fn state(&self) -> &ScreenState<LoginData> {
        &self.state
    }

    /// Preenche o e-mail lembrado, se a opção estava marcada.
    pub async fn mount(&self) {
        match self.app.session.store().remembered_email().await {
            Ok(Some(email)) => self.state.update(|d| {
                d.email = email;
                d.lembrar_usuario = true;
            }),
            Ok(None) => {}
            Err(e) => tracing::error!("Erro ao carregar email salvo: {}", e),
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.state.update(|d| d.email = email);
    }

    pub fn set_senha(&self, senha: impl Into<String>) {
        let senha = senha.into();
        self.state.update(|d| d.senha = senha);
    }

    pub fn toggle_mostrar_senha(&self) {
        self.state.update(|d| d.mostrar_senha = !d.mostrar_senha);
    }

    pub fn set_lembrar_usuario(&self, lembrar: bool) {
        self.state.update(|d| d.lembrar_usuario = lembrar);
    }

    /// Valida, faz login e grava (ou esquece) o e-mail conforme a opção.
    ///
    /// Erros já viram aviso na tela; o `Result` serve para quem quiser
    /// reagir além disso.
    pub async fn submit(&self) -> Result<(), AppError> {
        let (email, senha, lembrar) =
            self.state.read(|d| (d.email.trim().to_string(), d.senha.clone(), d.lembrar_usuario));

        let payload = LoginPayload { email, senha };
        if let Err(errors) = payload.validate() {
            self.state.notify(Notice::error("Email e senha são obrigatórios"));
            return Err(errors.into());
        }

        let _carregando = self.state.begin(|d| &mut d.carregando)?;

        if let Err(e) = self.app.auth.sign_in(&payload.email, &payload.senha).await {
            self.state.notify(Notice::error("Erro ao fazer login. Tente novamente."));
            return Err(e);
        }

        let store = self.app.session.store();
        let lembrado = if lembrar {
            store.remember_email(&payload.email).await
        } else {
            store.forget_email().await
        };
        if let Err(e) = lembrado {
            tracing::warn!("Não foi possível atualizar o email lembrado: {}", e);
        }

        self.state.update(|d| d.senha.clear());
        Ok(())
    }
}
