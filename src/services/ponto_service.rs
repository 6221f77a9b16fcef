// src/services/ponto_service.rs

use chrono::{NaiveDate, Utc};

use crate::{
    common::error::AppError,
    device::Localizacao,
    models::ponto::{RegistrarPontoPayload, RegistroPonto, TipoPonto},
    services::api_client::ApiClient,
};

#[derive(Clone)]
pub struct PontoService {
    api: ApiClient,
}

impl PontoService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Registra um ponto com o horário do momento do envio.
    ///
    /// A ordem entrada → intervalo → saída é regra do backend; aqui qualquer
    /// tipo pode ser enviado a qualquer momento.
    pub async fn registrar(
        &self,
        tipo: TipoPonto,
        localizacao: Option<&Localizacao>,
        observacao: &str,
    ) -> Result<RegistroPonto, AppError> {
        let payload = RegistrarPontoPayload::new(tipo, Utc::now(), localizacao, observacao)?;
        let registro = self.api.post_json("/pontos", &payload).await?;
        tracing::info!("⏱️ Ponto registrado: {:?}", tipo);
        Ok(registro)
    }

    /// Registros de um dia (`GET /pontos?data=YYYY-MM-DD`); sem data, o backend usa hoje.
    pub async fn listar(&self, data: Option<NaiveDate>) -> Result<Vec<RegistroPonto>, AppError> {
        let query: Vec<(&str, String)> = data
            .map(|d| vec![("data", d.format("%Y-%m-%d").to_string())])
            .unwrap_or_default();
        let registros: Option<Vec<RegistroPonto>> = self.api.get_json("/pontos", &query).await?;
        Ok(registros.unwrap_or_default())
    }
}
