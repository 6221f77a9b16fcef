// src/common/notice.rs

/// Como a interface deve apresentar o aviso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    // Aviso que exige confirmação (permissões, localização)
    Blocking,
}

/// Notificação de disparo único produzida por uma tela.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Sucesso".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Erro".to_string(),
            message: message.into(),
        }
    }

    pub fn blocking(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Blocking,
            title: title.into(),
            message: message.into(),
        }
    }
}
