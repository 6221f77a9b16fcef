// src/models/documento.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{common::moeda::formatar_reais, device::ArquivoSelecionado};

// --- Enums (mapeando os valores do backend) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoDocumento {
    Recibo,
    Fatura,
    NotaFiscal,
    Contrato,
    Outro,
}

impl TipoDocumento {
    pub const TODOS: [TipoDocumento; 5] = [
        TipoDocumento::Recibo,
        TipoDocumento::Fatura,
        TipoDocumento::NotaFiscal,
        TipoDocumento::Contrato,
        TipoDocumento::Outro,
    ];

    /// Valor usado no multipart e nos filtros.
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoDocumento::Recibo => "recibo",
            TipoDocumento::Fatura => "fatura",
            TipoDocumento::NotaFiscal => "nota_fiscal",
            TipoDocumento::Contrato => "contrato",
            TipoDocumento::Outro => "outro",
        }
    }

    pub fn nome(&self) -> &'static str {
        match self {
            TipoDocumento::Recibo => "Recibo",
            TipoDocumento::Fatura => "Fatura",
            TipoDocumento::NotaFiscal => "Nota Fiscal",
            TipoDocumento::Contrato => "Contrato",
            TipoDocumento::Outro => "Outro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusDocumento {
    Pendente,
    Aprovado,
    Rejeitado,
}

impl StatusDocumento {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusDocumento::Pendente => "pendente",
            StatusDocumento::Aprovado => "aprovado",
            StatusDocumento::Rejeitado => "rejeitado",
        }
    }

    pub fn nome(&self) -> &'static str {
        match self {
            StatusDocumento::Pendente => "Pendente",
            StatusDocumento::Aprovado => "Aprovado",
            StatusDocumento::Rejeitado => "Rejeitado",
        }
    }
}

/// Filtro da lista de documentos. `Todos` não envia o parâmetro `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiltroStatus {
    #[default]
    Todos,
    Status(StatusDocumento),
}

impl FiltroStatus {
    pub const OPCOES: [FiltroStatus; 4] = [
        FiltroStatus::Todos,
        FiltroStatus::Status(StatusDocumento::Pendente),
        FiltroStatus::Status(StatusDocumento::Aprovado),
        FiltroStatus::Status(StatusDocumento::Rejeitado),
    ];

    pub fn status(&self) -> Option<StatusDocumento> {
        match self {
            FiltroStatus::Todos => None,
            FiltroStatus::Status(status) => Some(*status),
        }
    }

    pub fn nome(&self) -> &'static str {
        match self {
            FiltroStatus::Todos => "Todos",
            FiltroStatus::Status(status) => status.nome(),
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documento {
    pub id: i64,
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub tipo_documento: TipoDocumento,
    #[serde(with = "data_flexivel")]
    pub data_documento: NaiveDate,
    #[serde(default)]
    pub valor: Option<Decimal>,
    pub status: StatusDocumento,
    #[serde(default)]
    pub aprovado_por: Option<i64>,
    #[serde(default)]
    pub data_aprovacao: Option<DateTime<Utc>>,
    #[serde(default)]
    pub enviado_para_financas: bool,
    #[serde(default)]
    pub data_envio: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes_envio: Option<String>,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colaborador_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tamanho_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<DateTime<Utc>>,
}

impl Documento {
    pub fn is_pdf(&self) -> bool {
        self.mime_type == "application/pdf"
    }

    /// O backend grava valor ausente como zero.
    pub fn valor_formatado(&self) -> Option<String> {
        self.valor.filter(|v| !v.is_zero()).map(formatar_reais)
    }

    pub fn descricao(&self) -> Option<&str> {
        self.descricao.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Aprovar/rejeitar só faz sentido enquanto pendente.
    pub fn aguarda_revisao(&self) -> bool {
        self.status == StatusDocumento::Pendente
    }

    /// Envio para finanças: aprovado e ainda não enviado.
    pub fn pode_ir_para_financas(&self) -> bool {
        self.status == StatusDocumento::Aprovado && !self.enviado_para_financas
    }
}

// Parâmetros de GET /documentos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListarDocumentosParams {
    pub status: Option<StatusDocumento>,
    pub limit: Option<u32>,
}

impl ListarDocumentosParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AprovarPayload {
    pub observacoes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejeitarPayload {
    pub motivo: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnviarPayload {
    pub observacoes: String,
}

// Dados já validados de um novo documento (POST /documentos, multipart)
#[derive(Debug, Clone, PartialEq)]
pub struct NovoDocumento {
    pub titulo: String,
    pub descricao: Option<String>,
    pub tipo_documento: TipoDocumento,
    pub data_documento: NaiveDate,
    pub valor: Option<Decimal>,
    pub arquivo: ArquivoSelecionado,
}

// Resposta genérica das transições ({"message": "..."})
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// O backend grava `data_documento` como data, mas devolve como timestamp
/// RFC 3339. Aceitamos os dois formatos e serializamos como `YYYY-MM-DD`.
mod data_flexivel {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMATO: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(data: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&data.format(FORMATO).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let texto = String::deserialize(deserializer)?;
        if let Ok(data) = NaiveDate::parse_from_str(&texto, FORMATO) {
            return Ok(data);
        }
        DateTime::parse_from_rfc3339(&texto)
            .map(|momento| momento.date_naive())
            .map_err(|_| D::Error::custom(format!("data inválida: {texto}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "id": 12,
            "uuid": "d1f0",
            "colaborador_id": 3,
            "titulo": "Almoço cliente",
            "descricao": "",
            "tipo_documento": "nota_fiscal",
            "data_documento": "2026-10-01T00:00:00Z",
            "valor": 123.45,
            "caminho_arquivo": "uploads/abc.pdf",
            "mime_type": "application/pdf",
            "tamanho_bytes": 2048,
            "status": "aprovado",
            "aprovado_por": 9,
            "data_aprovacao": "2026-10-02T12:30:00Z",
            "enviado_para_financas": false,
            "data_envio": null,
            "observacoes_envio": ""
        })
    }

    #[test]
    fn deserializes_backend_document() {
        let doc: Documento = serde_json::from_value(payload()).unwrap();
        assert_eq!(doc.tipo_documento, TipoDocumento::NotaFiscal);
        assert_eq!(doc.data_documento, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        assert_eq!(doc.valor, Some(Decimal::new(12345, 2)));
        assert_eq!(doc.aprovado_por, Some(9));
        assert_eq!(doc.descricao(), None);
        assert_eq!(doc.valor_formatado().as_deref(), Some("R$ 123,45"));
        assert!(doc.is_pdf());
        assert!(doc.pode_ir_para_financas());
        assert!(!doc.aguarda_revisao());
    }

    #[test]
    fn accepts_plain_dates() {
        let mut value = payload();
        value["data_documento"] = json!("2026-09-30");
        let doc: Documento = serde_json::from_value(value).unwrap();
        assert_eq!(doc.data_documento, NaiveDate::from_ymd_opt(2026, 9, 30).unwrap());
    }

    #[test]
    fn list_query_omits_unset_params() {
        assert!(ListarDocumentosParams::default().query().is_empty());
        let params = ListarDocumentosParams {
            status: FiltroStatus::Status(StatusDocumento::Pendente).status(),
            limit: Some(5),
        };
        assert_eq!(
            params.query(),
            vec![("status", "pendente".to_string()), ("limit", "5".to_string())]
        );
    }
}
