// src/common/error.rs

use std::collections::HashMap;

use thiserror::Error;
use validator::ValidationErrors;

use crate::device::Permission;

/// Mensagem padrão quando a requisição nem chegou a ter resposta.
pub const MSG_SEM_CONEXAO: &str = "Não foi possível conectar ao servidor";

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante corresponde a uma classe de falha que a tela precisa tratar.
#[derive(Debug, Error)]
pub enum AppError {
    // Erros de formulário: nunca chegam à rede
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    // 401: a sessão local já foi limpa pelo interceptor quando este erro chega
    #[error("Sessão expirada ou inválida")]
    Unauthorized,

    #[error("Erro da API (HTTP {status})")]
    Api {
        status: u16,
        // Campo "error" do corpo da resposta, quando existir
        message: Option<String>,
    },

    #[error("Falha de comunicação: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Permissão negada: {0}")]
    PermissionDenied(Permission),

    #[error("Localização indisponível")]
    LocationUnavailable,

    #[error("Erro no armazenamento local: {0}")]
    Storage(String),

    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    // Ação que o papel do usuário ou o status atual não permitem; não vai à rede
    #[error("Ação não permitida: {0}")]
    Forbidden(String),

    // Ação recusada porque a mesma ação ainda está em andamento
    #[error("Operação já em andamento")]
    Busy,

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl AppError {
    /// Converte o erro no texto que a tela mostra ao usuário.
    ///
    /// A mensagem do backend tem prioridade; falhas de transporte viram a
    /// mensagem de conexão; o resto usa o `fallback` da tela.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".to_string(),
            AppError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            AppError::Network(e) if !e.is_decode() => MSG_SEM_CONEXAO.to_string(),
            AppError::Forbidden(message) => message.clone(),
            AppError::PermissionDenied(permission) => permission.notice_message().to_string(),
            AppError::LocationUnavailable => {
                "Não foi possível obter sua localização".to_string()
            }
            ref e => {
                tracing::debug!("Erro convertido em mensagem genérica: {}", e);
                fallback.to_string()
            }
        }
    }

    /// Mensagens por campo, para exibir ao lado de cada input.
    /// Vazio quando o erro não é de validação.
    pub fn field_messages(&self) -> HashMap<String, String> {
        match self {
            AppError::ValidationError(errors) => field_messages(errors),
            _ => HashMap::new(),
        }
    }
}

/// Primeira mensagem de cada campo inválido.
pub fn field_messages(errors: &ValidationErrors) -> HashMap<String, String> {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let message = field_errors
            .iter()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Valor inválido".to_string());
        details.insert(field.to_string(), message);
    }
    details
}
