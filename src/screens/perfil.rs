// src/screens/perfil.rs

use std::collections::HashMap;

use crate::{
    common::{error::AppError, formatacao::data_curta, notice::Notice},
    config::AppState,
    models::auth::{AlterarSenhaPayload, AtualizarPerfilPayload, User},
    screens::screen_state::ScreenState,
};

#[derive(Debug, Clone, Default)]
pub struct PerfilData {
    // Diálogo "Tem certeza que deseja sair?" aberto
    pub confirmando_saida: bool,
    pub saindo: bool,
    pub salvando: bool,
    pub alterando_senha: bool,
    pub errors: HashMap<String, String>,
}

pub struct PerfilScreen {
    app: AppState,
    state: ScreenState<PerfilData>,
}

impl PerfilScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: ScreenState::new(PerfilData::default()),
        }
    }

    pub fn state(&self) -> &ScreenState<PerfilData> {
        &self.state
    }

    pub fn user(&self) -> Option<User> {
        self.app.auth.current_user()
    }

    pub fn nome_cargo(&self) -> &'static str {
        self.user().map(|u| u.cargo_id.nome()).unwrap_or("Colaborador")
    }

    /// "Admissão: 16/10/2026", quando o backend informa a data.
    pub fn admissao(&self) -> Option<String> {
        let data = self.user()?.data_admissao?;
        Some(format!("Admissão: {}", data_curta(data.date_naive())))
    }

    pub fn status(&self) -> Option<String> {
        let user = self.user()?;
        let status = if user.is_ativo() { "Ativo".to_string() } else { user.status };
        Some(format!("Status: {status}"))
    }

    // --- Saída com confirmação ---

    pub fn request_sign_out(&self) {
        self.state.update(|d| d.confirmando_saida = true);
        self.state.notify(Notice::blocking(
            "Sair",
            "Tem certeza que deseja sair do aplicativo?",
        ));
    }

    pub fn cancel_sign_out(&self) {
        self.state.update(|d| d.confirmando_saida = false);
    }

    /// Só age depois de `request_sign_out`.
    pub async fn confirm_sign_out(&self) -> Result<(), AppError> {
        if !self.state.read(|d| d.confirmando_saida) {
            return Ok(());
        }
        let _saindo = self.state.begin(|d| &mut d.saindo)?;
        self.state.update(|d| d.confirmando_saida = false);

        // A sessão já foi encerrada mesmo quando a limpeza local falha
        self.app.auth.sign_out().await.inspect_err(|e| {
            tracing::error!("Erro ao limpar dados locais na saída: {}", e);
        })
    }

    // --- Perfil ---

    pub async fn atualizar_perfil(&self, dados: AtualizarPerfilPayload) -> Result<(), AppError> {
        let _salvando = self.state.begin(|d| &mut d.salvando)?;

        let resultado = async {
            let user = self.app.colaboradores.atualizar_perfil(&dados).await?;
            self.app.auth.update_user(user).await
        }
        .await;

        match resultado {
            Ok(()) => {
                self.state.update(|d| d.errors.clear());
                self.state.notify(Notice::success("Perfil atualizado com sucesso"));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Erro ao atualizar perfil: {}", e);
                let mensagens = e.field_messages();
                self.state.update(|d| d.errors = mensagens);
                self.state
                    .notify(Notice::error(e.user_message("Não foi possível atualizar o perfil")));
                Err(e)
            }
        }
    }

    /// Recarrega o usuário do backend (`GET /me`).
    pub async fn refresh(&self) -> Result<(), AppError> {
        self.app
            .auth
            .refresh_user()
            .await
            .map(|_| ())
            .inspect_err(|e| tracing::error!("Erro ao recarregar perfil: {}", e))
    }

    pub async fn alterar_senha(
        &self,
        senha_atual: &str,
        nova_senha: &str,
        confirmacao: &str,
    ) -> Result<(), AppError> {
        let _alterando = self.state.begin(|d| &mut d.alterando_senha)?;

        let dados = AlterarSenhaPayload {
            senha_atual: senha_atual.to_string(),
            nova_senha: nova_senha.to_string(),
            confirmacao: confirmacao.to_string(),
        };

        match self.app.colaboradores.alterar_senha(&dados).await {
            Ok(resposta) => {
                self.state.update(|d| d.errors.clear());
                let mensagem = resposta
                    .message
                    .unwrap_or_else(|| "Senha alterada com sucesso".to_string());
                self.state.notify(Notice::success(mensagem));
                Ok(())
            }
            Err(e) => {
                let mensagens = e.field_messages();
                if mensagens.is_empty() {
                    tracing::error!("Erro ao alterar senha: {}", e);
                    self.state
                        .notify(Notice::error(e.user_message("Não foi possível alterar a senha")));
                }
                self.state.update(|d| d.errors = mensagens);
                Err(e)
            }
        }
    }
}
