// src/screens/home.rs

use chrono::Local;

use crate::{
    common::{error::AppError, formatacao::dia_por_extenso},
    config::AppState,
    models::{
        documento::{Documento, FiltroStatus, ListarDocumentosParams, StatusDocumento},
        ponto::RegistroPonto,
    },
    screens::{
        navigation::{DocumentosRoute, MainTab, NavIntent},
        screen_state::ScreenState,
    },
};

// Quantos documentos recentes aparecem no painel
const DOCUMENTOS_RECENTES: u32 = 5;

#[derive(Debug, Clone, Default)]
pub struct HomeData {
    pub pontos: Vec<RegistroPonto>,
    pub documentos: Vec<Documento>,
    pub refreshing: bool,
}

/// Painel inicial: pontos de hoje, documentos recentes e atalhos.
pub struct HomeScreen {
    app: AppState,
    state: ScreenState<HomeData>,
}

impl HomeScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: ScreenState::new(HomeData::default()),
        }
    }

    pub fn state(&self) -> &ScreenState<HomeData> {
        &self.state
    }

    pub fn nome_usuario(&self) -> Option<String> {
        self.app.auth.current_user().map(|u| u.nome)
    }

    pub fn nome_cargo(&self) -> &'static str {
        self.app
            .auth
            .current_user()
            .map(|u| u.cargo_id.nome())
            .unwrap_or("Colaborador")
    }

    pub fn data_de_hoje(&self) -> String {
        dia_por_extenso(Local::now().date_naive())
    }

    /// Atalho de aprovações, só para administradores.
    pub fn is_admin(&self) -> bool {
        self.app.auth.is_admin()
    }

    /// Carrega pontos de hoje e documentos recentes. Falhas só vão para o log.
    pub async fn load(&self) -> Result<(), AppError> {
        let _refreshing = self.state.begin(|d| &mut d.refreshing)?;

        let hoje = Local::now().date_naive();
        let params = ListarDocumentosParams {
            status: None,
            limit: Some(DOCUMENTOS_RECENTES),
        };
        let (pontos, documentos) = tokio::join!(
            self.app.pontos.listar(Some(hoje)),
            self.app.documentos.listar(params)
        );

        match pontos {
            Ok(pontos) => self.state.update(|d| d.pontos = pontos),
            Err(e) => tracing::error!("Erro ao carregar pontos de hoje: {}", e),
        }
        match documentos {
            Ok(documentos) => self.state.update(|d| d.documentos = documentos),
            Err(e) => tracing::error!("Erro ao carregar documentos recentes: {}", e),
        }
        Ok(())
    }

    pub async fn refresh(&self) -> Result<(), AppError> {
        self.load().await
    }

    pub fn open_ponto(&self) {
        self.state.navigate(NavIntent::Tab(MainTab::Ponto));
    }

    pub fn open_novo_documento(&self) {
        self.state.navigate(NavIntent::Documentos(DocumentosRoute::Novo));
    }

    pub fn open_documento(&self, id: i64) {
        self.state.navigate(NavIntent::Documentos(DocumentosRoute::Detalhes { id }));
    }

    pub fn open_pendentes(&self) {
        if !self.is_admin() {
            return;
        }
        self.state.navigate(NavIntent::Documentos(DocumentosRoute::Lista {
            filtro: FiltroStatus::Status(StatusDocumento::Pendente),
        }));
    }
}
