// src/device.rs
// Contratos dos recursos do aparelho (localização, câmera, galeria, seletor de PDF).
// O app hospedeiro fornece as implementações; as telas só dependem dos traits.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
    MediaLibrary,
    Location,
}

impl Permission {
    /// Texto do aviso bloqueante quando a permissão é negada.
    pub fn notice_message(&self) -> &'static str {
        match self {
            Permission::Camera | Permission::MediaLibrary => {
                "Precisamos das permissões de câmera e galeria para funcionar corretamente."
            }
            Permission::Location => "Precisamos da sua localização para registrar o ponto",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nome = match self {
            Permission::Camera => "câmera",
            Permission::MediaLibrary => "galeria",
            Permission::Location => "localização",
        };
        f.write_str(nome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Posição do aparelho no momento do registro de ponto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Localizacao {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precisao: Option<f64>,
}

#[async_trait]
pub trait LocationProvider: Send + Sync + 'static {
    async fn request_permission(&self) -> Result<PermissionStatus, AppError>;
    async fn current_position(&self) -> Result<Localizacao, AppError>;
}

/// De onde o arquivo do documento veio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrigemArquivo {
    Camera,
    Galeria,
    // Seletor de documentos, restrito a PDF
    Documento,
}

/// Arquivo escolhido pelo usuário, já lido para memória.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArquivoSelecionado {
    pub nome: String,
    pub mime_type: Option<String>,
    // Fora dos parâmetros dos erros de validação
    #[serde(skip)]
    pub conteudo: Vec<u8>,
}

impl ArquivoSelecionado {
    pub fn extensao(&self) -> Option<&str> {
        self.nome
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    /// Tipo informado pelo seletor; sem ele, PDF pela extensão ou JPEG.
    pub fn mime_efetivo(&self) -> String {
        if let Some(mime) = self.mime_type.as_deref().filter(|m| !m.is_empty()) {
            return mime.to_string();
        }
        match self.extensao().map(str::to_ascii_lowercase).as_deref() {
            Some("pdf") => "application/pdf".to_string(),
            Some("png") => "image/png".to_string(),
            _ => "image/jpeg".to_string(),
        }
    }

    /// Nome enviado no multipart: `documento.<ext>`.
    pub fn nome_envio(&self) -> String {
        let ext = match self.extensao() {
            Some(ext) => ext.to_ascii_lowercase(),
            None if self.mime_efetivo() == "application/pdf" => "pdf".to_string(),
            None => "jpg".to_string(),
        };
        format!("documento.{ext}")
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_efetivo() == "application/pdf"
    }
}

#[async_trait]
pub trait FilePicker: Send + Sync + 'static {
    async fn request_permission(&self, permission: Permission) -> Result<PermissionStatus, AppError>;

    /// `Ok(None)` quando o usuário cancela a seleção.
    async fn pick(&self, origem: OrigemArquivo) -> Result<Option<ArquivoSelecionado>, AppError>;
}
