// src/screens/ponto.rs

use std::sync::Arc;

use chrono::Local;

use crate::{
    common::{
        error::AppError,
        formatacao::{data_por_extenso, hora_completa},
        notice::Notice,
    },
    config::AppState,
    device::{LocationProvider, Localizacao, Permission},
    models::ponto::{RegistroPonto, TipoPonto},
    screens::screen_state::ScreenState,
};

#[derive(Debug, Clone, Default)]
pub struct PontoData {
    pub registros: Vec<RegistroPonto>,
    pub localizacao: Option<Localizacao>,
    pub obtendo_localizacao: bool,
    pub carregando_registros: bool,
    pub registrando: bool,
}

/// Registro de ponto com geolocalização.
///
/// Os quatro tipos ficam sempre disponíveis: quem decide a ordem válida
/// é o backend.
pub struct PontoScreen {
    app: AppState,
    location: Arc<dyn LocationProvider>,
    state: ScreenState<PontoData>,
}

impl PontoScreen {
    pub fn new(app: AppState, location: Arc<dyn LocationProvider>) -> Self {
        Self {
            app,
            location,
            state: ScreenState::new(PontoData::default()),
        }
    }

    pub fn state(&self) -> &ScreenState<PontoData> {
        &self.state
    }

    pub fn tipos(&self) -> [TipoPonto; 4] {
        TipoPonto::TODOS
    }

    /// Relógio exibido acima dos botões (`HH:mm:ss`).
    pub fn relogio(&self) -> String {
        hora_completa(&Local::now())
    }

    pub fn data_de_hoje(&self) -> String {
        data_por_extenso(Local::now().date_naive())
    }

    /// Pede a localização e carrega os registros de hoje ao mesmo tempo.
    /// Sem localização os registros continuam visíveis.
    pub async fn mount(&self) {
        let (localizacao, registros) = tokio::join!(self.obter_localizacao(), self.carregar_registros());
        if let Err(e) = localizacao {
            tracing::warn!("Localização indisponível ao abrir o ponto: {}", e);
        }
        if let Err(e) = registros {
            tracing::warn!("Registros de ponto não carregados: {}", e);
        }
    }

    pub async fn obter_localizacao(&self) -> Result<Localizacao, AppError> {
        let _obtendo = self.state.begin(|d| &mut d.obtendo_localizacao)?;

        let status = self.location.request_permission().await.inspect_err(|e| {
            tracing::error!("Erro ao pedir permissão de localização: {}", e);
            self.state.notify(Notice::error("Não foi possível obter sua localização"));
        })?;

        if !status.is_granted() {
            self.state.notify(Notice::blocking(
                "Permissão necessária",
                Permission::Location.notice_message(),
            ));
            return Err(AppError::PermissionDenied(Permission::Location));
        }

        match self.location.current_position().await {
            Ok(localizacao) => {
                self.state.update(|d| d.localizacao = Some(localizacao));
                Ok(localizacao)
            }
            Err(e) => {
                tracing::error!("Erro ao obter localização: {}", e);
                self.state.notify(Notice::error("Não foi possível obter sua localização"));
                Err(AppError::LocationUnavailable)
            }
        }
    }

    pub async fn carregar_registros(&self) -> Result<(), AppError> {
        let _carregando = self.state.begin(|d| &mut d.carregando_registros)?;

        let hoje = Local::now().date_naive();
        match self.app.pontos.listar(Some(hoje)).await {
            Ok(registros) => {
                self.state.update(|d| d.registros = registros);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Erro ao carregar registros: {}", e);
                self.state.notify(Notice::error("Não foi possível carregar os registros"));
                Err(e)
            }
        }
    }

    /// Registra um ponto. Sem localização resolvida, dispara uma nova
    /// tentativa de obtê-la e aborta sem chamar o backend.
    pub async fn registrar(&self, tipo: TipoPonto) -> Result<(), AppError> {
        let Some(localizacao) = self.state.read(|d| d.localizacao) else {
            self.state.notify(Notice::blocking(
                "Localização necessária",
                "Aguarde enquanto obtemos sua localização",
            ));
            if let Err(e) = self.obter_localizacao().await {
                tracing::warn!("Nova tentativa de localização falhou: {}", e);
            }
            return Err(AppError::LocationUnavailable);
        };

        {
            let _registrando = self.state.begin(|d| &mut d.registrando)?;
            if let Err(e) = self.app.pontos.registrar(tipo, Some(&localizacao), "").await {
                tracing::error!("Erro ao registrar ponto: {}", e);
                self.state
                    .notify(Notice::error(e.user_message("Não foi possível registrar o ponto")));
                return Err(e);
            }
        }

        self.state.notify(Notice::success("Ponto registrado com sucesso"));
        if let Err(e) = self.carregar_registros().await {
            tracing::warn!("Lista de pontos não recarregada: {}", e);
        }
        Ok(())
    }
}
