// src/services/documento_service.rs

use reqwest::multipart::{Form, Part};

use crate::{
    common::error::AppError,
    models::documento::{
        AprovarPayload, Documento, EnviarPayload, ListarDocumentosParams, MessageResponse,
        NovoDocumento, RejeitarPayload,
    },
    services::api_client::ApiClient,
};

#[derive(Clone)]
pub struct DocumentoService {
    api: ApiClient,
}

impl DocumentoService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn upload(&self, novo: NovoDocumento) -> Result<Documento, AppError> {
        let titulo = novo.titulo.clone();
        let form = Self::montar_formulario(novo)?;
        let documento: Documento = self.api.post_multipart("/documentos", form).await?;
        tracing::info!("📄 Documento enviado: {} (#{})", titulo, documento.id);
        Ok(documento)
    }

    pub async fn listar(&self, params: ListarDocumentosParams) -> Result<Vec<Documento>, AppError> {
        let documentos: Option<Vec<Documento>> =
            self.api.get_json("/documentos", &params.query()).await?;
        Ok(documentos.unwrap_or_default())
    }

    pub async fn obter(&self, id: i64) -> Result<Documento, AppError> {
        self.api.get_json(&format!("/documentos/{id}"), &[]).await
    }

    pub async fn aprovar(&self, id: i64, observacoes: &str) -> Result<MessageResponse, AppError> {
        let body = AprovarPayload {
            observacoes: observacoes.to_string(),
        };
        self.api.put_json(&format!("/documentos/{id}/aprovar"), &body).await
    }

    /// O motivo é obrigatório; a tela garante isso antes de chamar.
    pub async fn rejeitar(&self, id: i64, motivo: &str) -> Result<MessageResponse, AppError> {
        let body = RejeitarPayload {
            motivo: motivo.to_string(),
        };
        self.api.put_json(&format!("/documentos/{id}/rejeitar"), &body).await
    }

    pub async fn enviar_para_financas(&self, id: i64, observacoes: &str) -> Result<MessageResponse, AppError> {
        let body = EnviarPayload {
            observacoes: observacoes.to_string(),
        };
        self.api.put_json(&format!("/documentos/{id}/enviar"), &body).await
    }

    /// URL do arquivo, para abrir em um visualizador externo.
    pub fn arquivo_url(&self, id: i64) -> String {
        self.api.url_for(&format!("/documentos/{id}/arquivo"))
    }

    pub async fn baixar_arquivo(&self, id: i64) -> Result<Vec<u8>, AppError> {
        self.api.get_bytes(&format!("/documentos/{id}/arquivo")).await
    }

    fn montar_formulario(novo: NovoDocumento) -> Result<Form, AppError> {
        let mime = novo.arquivo.mime_efetivo();
        let arquivo = Part::bytes(novo.arquivo.conteudo.clone())
            .file_name(novo.arquivo.nome_envio())
            .mime_str(&mime)?;

        let mut form = Form::new().text("titulo", novo.titulo);
        if let Some(descricao) = novo.descricao.filter(|d| !d.trim().is_empty()) {
            form = form.text("descricao", descricao);
        }
        form = form
            .text("tipo_documento", novo.tipo_documento.as_str())
            .text("data_documento", novo.data_documento.format("%Y-%m-%d").to_string());
        if let Some(valor) = novo.valor {
            form = form.text("valor", valor.normalize().to_string());
        }

        Ok(form.part("arquivo", arquivo))
    }
}
