// src/screens/detalhes_documento.rs

use validator::ValidationErrors;

use crate::{
    common::{error::AppError, notice::Notice, validation::erro},
    config::AppState,
    models::documento::{Documento, MessageResponse},
    screens::{navigation::NavIntent, screen_state::ScreenState},
};

#[derive(Debug, Clone, Default)]
pub struct DetalhesData {
    pub documento: Option<Documento>,
    pub loading: bool,
    // Uma única flag para aprovar, rejeitar e enviar
    pub action_loading: bool,
}

pub struct DetalhesDocumentoScreen {
    app: AppState,
    id: i64,
    state: ScreenState<DetalhesData>,
}

impl DetalhesDocumentoScreen {
    pub fn new(app: AppState, id: i64) -> Self {
        Self {
            app,
            id,
            state: ScreenState::new(DetalhesData::default()),
        }
    }

    pub fn state(&self) -> &ScreenState<DetalhesData> {
        &self.state
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Busca o documento. Se a primeira carga falhar, avisa e volta.
    pub async fn load(&self) -> Result<(), AppError> {
        let _loading = self.state.begin(|d| &mut d.loading)?;

        match self.app.documentos.obter(self.id).await {
            Ok(documento) => {
                self.state.update(|d| d.documento = Some(documento));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Erro ao carregar documento #{}: {}", self.id, e);
                if self.state.read(|d| d.documento.is_none()) {
                    self.state
                        .notify(Notice::error("Não foi possível carregar o documento"));
                    self.state.navigate(NavIntent::GoBack);
                }
                Err(e)
            }
        }
    }

    pub fn can_review(&self) -> bool {
        self.app.auth.is_admin()
            && self.state.read(|d| d.documento.as_ref().is_some_and(Documento::aguarda_revisao))
    }

    pub fn can_send_to_finance(&self) -> bool {
        self.app.auth.is_admin()
            && self.state.read(|d| {
                d.documento
                    .as_ref()
                    .is_some_and(Documento::pode_ir_para_financas)
            })
    }

    /// Aprova. Só para administradores e documentos pendentes; fora disso
    /// recusa sem chamar o backend.
    pub async fn approve(&self, observacoes: &str) -> Result<(), AppError> {
        self.exigir(self.can_review(), "Apenas documentos pendentes podem ser revisados")?;

        let resultado = {
            let _acting = self.state.begin(|d| &mut d.action_loading)?;
            self.app.documentos.aprovar(self.id, observacoes).await
        };
        self.concluir(resultado, "Documento aprovado com sucesso", "Não foi possível aprovar o documento")
            .await
    }

    /// Rejeita com motivo obrigatório; motivo em branco nem chega a ser enviado.
    pub async fn reject(&self, motivo: &str) -> Result<(), AppError> {
        self.exigir(self.can_review(), "Apenas documentos pendentes podem ser revisados")?;
        if motivo.trim().is_empty() {
            self.state.notify(Notice::error("Informe o motivo da rejeição"));
            return Err(AppError::ValidationError(validation_motivo()));
        }

        let resultado = {
            let _acting = self.state.begin(|d| &mut d.action_loading)?;
            self.app.documentos.rejeitar(self.id, motivo.trim()).await
        };
        self.concluir(resultado, "Documento rejeitado com sucesso", "Não foi possível rejeitar o documento")
            .await
    }

    pub async fn send_to_finance(&self, observacoes: &str) -> Result<(), AppError> {
        self.exigir(
            self.can_send_to_finance(),
            "Apenas documentos aprovados e ainda não enviados podem ir para finanças",
        )?;

        let resultado = {
            let _acting = self.state.begin(|d| &mut d.action_loading)?;
            self.app.documentos.enviar_para_financas(self.id, observacoes).await
        };
        self.concluir(
            resultado,
            "Documento marcado como enviado para finanças",
            "Não foi possível enviar o documento",
        )
        .await
    }

    pub fn arquivo_url(&self) -> String {
        self.app.documentos.arquivo_url(self.id)
    }

    pub async fn download(&self) -> Result<Vec<u8>, AppError> {
        self.app.documentos.baixar_arquivo(self.id).await.inspect_err(|e| {
            tracing::error!("Erro ao baixar arquivo do documento #{}: {}", self.id, e);
            self.state
                .notify(Notice::error(e.user_message("Não foi possível abrir o arquivo")));
        })
    }

    // Papel e status do documento carregado decidem se a ação segue
    fn exigir(&self, permitido: bool, fora_do_status: &str) -> Result<(), AppError> {
        if permitido {
            return Ok(());
        }
        let mensagem = if self.app.auth.is_admin() {
            fora_do_status
        } else {
            "Sem permissão de administrador"
        };
        tracing::warn!("Ação recusada no documento #{}: {}", self.id, mensagem);
        self.state.notify(Notice::error(mensagem));
        Err(AppError::Forbidden(mensagem.to_string()))
    }

    // Aviso de sucesso e recarga, ou aviso de erro
    async fn concluir(
        &self,
        resultado: Result<MessageResponse, AppError>,
        sucesso: &str,
        falha: &str,
    ) -> Result<(), AppError> {
        match resultado {
            Ok(_) => {
                tracing::info!("📄 Documento #{}: {}", self.id, sucesso);
                self.state.notify(Notice::success(sucesso));
                if let Err(e) = self.load().await {
                    tracing::warn!("Documento #{} não recarregado: {}", self.id, e);
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Erro na ação do documento #{}: {}", self.id, e);
                self.state.notify(Notice::error(e.user_message(falha)));
                Err(e)
            }
        }
    }
}

fn validation_motivo() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("motivo", erro("required", "Informe o motivo da rejeição"));
    errors
}
