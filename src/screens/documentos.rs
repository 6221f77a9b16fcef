// src/screens/documentos.rs

use crate::{
    common::error::AppError,
    config::AppState,
    models::documento::{Documento, FiltroStatus, ListarDocumentosParams},
    screens::{
        navigation::{DocumentosRoute, NavIntent},
        screen_state::ScreenState,
    },
};

#[derive(Debug, Clone, Default)]
pub struct DocumentosData {
    pub documentos: Vec<Documento>,
    pub filtro: FiltroStatus,
    pub loading: bool,
    pub refreshing: bool,
}

pub struct DocumentosScreen {
    app: AppState,
    state: ScreenState<DocumentosData>,
}

impl DocumentosScreen {
    /// `filtro` vem da rota (o atalho de pendentes da tela inicial).
    pub fn new(app: AppState, filtro: FiltroStatus) -> Self {
        Self {
            app,
            state: ScreenState::new(DocumentosData {
                filtro,
                ..Default::default()
            }),
        }
    }

    pub fn state(&self) -> &ScreenState<DocumentosData> {
        &self.state
    }

    /// Só administradores veem o seletor de status.
    pub fn show_filter(&self) -> bool {
        self.app.auth.is_admin()
    }

    /// Busca a lista com o filtro atual. Em caso de falha a lista fica vazia
    /// e o erro só vai para o log.
    pub async fn load(&self) -> Result<(), AppError> {
        let _loading = self.state.begin(|d| &mut d.loading)?;
        self.fetch().await;
        Ok(())
    }

    /// Puxar para atualizar: mesma busca, com a flag de refresh.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let _refreshing = self.state.begin(|d| &mut d.refreshing)?;
        self.fetch().await;
        Ok(())
    }

    /// Troca o filtro e busca de novo. Com uma busca em andamento a troca é
    /// recusada e o filtro anterior continua valendo.
    pub async fn select_filter(&self, filtro: FiltroStatus) -> Result<(), AppError> {
        if self.state.read(|d| d.filtro == filtro) {
            return Ok(());
        }
        let _loading = self.state.begin(|d| &mut d.loading)?;
        self.state.update(|d| d.filtro = filtro);
        self.fetch().await;
        Ok(())
    }

    pub fn open_detalhes(&self, id: i64) {
        self.state.navigate(NavIntent::Documentos(DocumentosRoute::Detalhes { id }));
    }

    pub fn open_novo(&self) {
        self.state.navigate(NavIntent::Documentos(DocumentosRoute::Novo));
    }

    async fn fetch(&self) {
        let params = ListarDocumentosParams {
            status: self.state.read(|d| d.filtro.status()),
            limit: None,
        };

        match self.app.documentos.listar(params).await {
            Ok(documentos) => self.state.update(|d| d.documentos = documentos),
            Err(e) => {
                tracing::error!("Erro ao carregar documentos: {}", e);
                self.state.update(|d| d.documentos.clear());
            }
        }
    }
}
