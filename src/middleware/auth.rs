// src/middleware/auth.rs
// Interceptores do cliente HTTP: entrada (token) e saída (401).

use reqwest::{RequestBuilder, Response, StatusCode, header::AUTHORIZATION};
use serde::Deserialize;

use crate::{common::error::AppError, services::session::Session};

// Formato dos erros do backend: {"error": "..."}
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Lê o token salvo imediatamente antes do envio e coloca
/// `Authorization: Bearer <token>`. Sem token salvo, usa o header padrão;
/// sem nenhum dos dois, a requisição vai sem autenticação.
pub async fn attach_bearer(request: RequestBuilder, session: &Session) -> RequestBuilder {
    let stored = match session.store().load_token().await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!("Não foi possível ler o token salvo: {}", e);
            None
        }
    };

    match stored
        .map(|token| format!("Bearer {token}"))
        .or_else(|| session.default_authorization())
    {
        Some(value) => request.header(AUTHORIZATION, value),
        None => request,
    }
}

/// Trata a resposta antes de ela chegar à tela.
///
/// 401 encerra a sessão (sem retry, sem refresh) pela mesma transição do
/// logout. Outros códigos de erro viram `AppError::Api` com a mensagem do
/// corpo, quando houver.
pub async fn intercept_response(response: Response, session: &Session) -> Result<Response, AppError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("🔒 {} respondeu 401, encerrando a sessão local", response.url().path());
        // O erro de armazenamento já foi registrado; a tela recebe o 401
        let _ = session.invalidate().await;
        return Err(AppError::Unauthorized);
    }

    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        tracing::warn!("Requisição falhou com HTTP {}: {:?}", status.as_u16(), message);
        return Err(AppError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response)
}
