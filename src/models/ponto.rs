// src/models/ponto.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{common::formatacao::hora_curta, device::Localizacao};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoPonto {
    Entrada,
    IntervaloInicio,
    IntervaloFim,
    Saida,
}

impl TipoPonto {
    // Ordem em que os botões aparecem; o cliente não impõe sequência
    pub const TODOS: [TipoPonto; 4] = [
        TipoPonto::Entrada,
        TipoPonto::IntervaloInicio,
        TipoPonto::IntervaloFim,
        TipoPonto::Saida,
    ];

    pub fn nome(&self) -> &'static str {
        match self {
            TipoPonto::Entrada => "Entrada",
            TipoPonto::IntervaloInicio => "Início Intervalo",
            TipoPonto::IntervaloFim => "Fim Intervalo",
            TipoPonto::Saida => "Saída",
        }
    }
}

// Um registro de ponto como o backend devolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistroPonto {
    pub id: i64,
    pub tipo: TipoPonto,
    pub data_hora: DateTime<Utc>,
    // O backend devolve o que recebeu, em formato livre
    #[serde(default)]
    pub localizacao: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,
}

impl RegistroPonto {
    /// Horário do registro no fuso do aparelho (`HH:mm`).
    pub fn hora(&self) -> String {
        hora_curta(&self.data_hora)
    }
}

// Corpo de POST /pontos
#[derive(Debug, Clone, Serialize)]
pub struct RegistrarPontoPayload {
    pub tipo: TipoPonto,
    pub data_hora: String,
    pub observacao: String,
    // O backend espera a localização como uma string contendo um objeto JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizacao: Option<String>,
}

impl RegistrarPontoPayload {
    pub fn new(
        tipo: TipoPonto,
        data_hora: DateTime<Utc>,
        localizacao: Option<&Localizacao>,
        observacao: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        let localizacao = localizacao.map(serde_json::to_string).transpose()?;
        Ok(Self {
            tipo,
            data_hora: data_hora.to_rfc3339_opts(SecondsFormat::Millis, true),
            observacao: observacao.into(),
            localizacao,
        })
    }
}
