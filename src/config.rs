// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    common::error::AppError,
    services::{
        api_client::ApiClient, auth::AuthService, colaborador_service::ColaboradorService,
        documento_service::DocumentoService, ponto_service::PontoService, session::Session,
    },
    storage::{FileStore, KeyValueStore, SessionStore},
};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // URL base do backend, já incluindo o prefixo `/api`
    pub api_base_url: String,
    pub request_timeout: Duration,
    // Onde o armazenamento local grava o arquivo de sessão
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: PathBuf::from(".rls-app"),
        }
    }
}

impl AppConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Lê a configuração do ambiente (e do `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = env::var("API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(secs) = env::var("API_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| anyhow::anyhow!("API_TIMEOUT_SECS inválido ({}): {}", secs, e))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Ok(dir) = env::var("RLS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

/// O contexto compartilhado que é injetado em todas as telas.
///
/// A sessão é o único estado mutável compartilhado; só o `AuthService` e o
/// interceptor de 401 a alteram.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<Session>,
    pub api: ApiClient,
    pub auth: AuthService,
    pub colaboradores: ColaboradorService,
    pub pontos: PontoService,
    pub documentos: DocumentoService,
}

impl AppState {
    pub fn new(config: AppConfig, kv: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let session = Arc::new(Session::new(SessionStore::new(kv)));
        let api = ApiClient::new(&config, session.clone())?;

        // --- Monta o gráfico de dependências ---
        let colaboradores = ColaboradorService::new(api.clone());
        let auth = AuthService::new(api.clone(), session.clone(), colaboradores.clone());
        let pontos = PontoService::new(api.clone());
        let documentos = DocumentoService::new(api.clone());

        Ok(Self {
            config,
            session,
            api,
            auth,
            colaboradores,
            pontos,
            documentos,
        })
    }

    /// Contexto com armazenamento em arquivo, a partir do ambiente.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let kv = Arc::new(FileStore::new(config.storage_path()));
        tracing::info!("📦 Armazenamento local em {}", config.storage_path().display());
        Ok(Self::new(config, kv)?)
    }
}
