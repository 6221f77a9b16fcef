// src/services/colaborador_service.rs

use validator::Validate;

use crate::{
    common::error::AppError,
    models::{
        auth::{AlterarSenhaPayload, AtualizarPerfilPayload, User},
        documento::MessageResponse,
    },
    services::api_client::ApiClient,
};

// Perfil do próprio colaborador (/me)
#[derive(Clone)]
pub struct ColaboradorService {
    api: ApiClient,
}

impl ColaboradorService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn obter_perfil(&self) -> Result<User, AppError> {
        self.api.get_json("/me", &[]).await
    }

    pub async fn atualizar_perfil(&self, dados: &AtualizarPerfilPayload) -> Result<User, AppError> {
        dados.validate()?;
        self.api.put_json("/me", dados).await
    }

    pub async fn alterar_senha(&self, dados: &AlterarSenhaPayload) -> Result<MessageResponse, AppError> {
        dados.validate()?;
        self.api.put_json("/me/senha", dados).await
    }
}
