// src/services/api_client.rs

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    common::error::AppError,
    config::AppConfig,
    middleware::auth::{attach_bearer, intercept_response},
    services::session::Session,
};

/// Cliente HTTP único do app, ligado a uma URL base e a um timeout fixo.
///
/// Toda requisição passa pelos interceptores de `middleware::auth`: o token
/// é lido logo antes do envio e um 401 encerra a sessão antes de o erro
/// chegar a quem chamou.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<Session>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL absoluta para um caminho da API (`/documentos/1/arquivo`).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Header padrão instalado pelo login ou pela restauração da sessão.
    pub fn default_authorization(&self) -> Option<String> {
        self.session.default_authorization()
    }

    pub fn set_default_authorization(&self, token: &str) {
        self.session.install_token(token);
    }

    pub fn clear_default_authorization(&self) {
        self.session.clear_token();
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let request = self.http.get(self.url_for(path)).query(query);
        Self::parse_response(self.send(request).await?).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.http.post(self.url_for(path)).json(body);
        Self::parse_response(self.send(request).await?).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.http.put(self.url_for(path)).json(body);
        Self::parse_response(self.send(request).await?).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, AppError> {
        let request = self.http.post(self.url_for(path)).multipart(form);
        Self::parse_response(self.send(request).await?).await
    }

    /// Baixa o corpo cru (arquivos dos documentos).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, AppError> {
        let response = self.send(self.http.get(self.url_for(path))).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // ---- helpers privados ----

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let request = attach_bearer(request, &self.session).await;
        let response = request.send().await?;
        intercept_response(response, &self.session).await
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        // Corpo vazio (204 ou PUT sem retorno) vira `null`, para `T` como `()`
        // ou `Option<_>` funcionarem
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
