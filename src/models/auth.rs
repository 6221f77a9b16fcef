// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::validation::nao_vazio;

// Cargos da empresa, pelo código que o backend devolve em `cargo_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Cargo {
    SegurancaDoTrabalho,
    GenteEGestao,
    Eletrica,
    TI,
    Gerente,
    Socio,
    Estagiario,
    // Código que o app ainda não conhece
    Outro(i32),
}

impl Cargo {
    pub fn nome(&self) -> &'static str {
        match self {
            Cargo::SegurancaDoTrabalho => "Segurança do Trabalho",
            Cargo::GenteEGestao => "Gente e Gestão",
            Cargo::Eletrica => "Elétrica",
            Cargo::TI => "TI",
            Cargo::Gerente => "Gerente",
            Cargo::Socio => "Sócio",
            Cargo::Estagiario => "Estagiário",
            Cargo::Outro(_) => "Colaborador",
        }
    }

    /// Único ponto de decisão sobre quem pode aprovar, rejeitar e enviar
    /// documentos para finanças.
    pub fn is_admin(&self) -> bool {
        matches!(self, Cargo::GenteEGestao | Cargo::Gerente | Cargo::Socio)
    }
}

impl From<i32> for Cargo {
    fn from(codigo: i32) -> Self {
        match codigo {
            1 => Cargo::SegurancaDoTrabalho,
            2 => Cargo::GenteEGestao,
            3 => Cargo::Eletrica,
            4 => Cargo::TI,
            5 => Cargo::Gerente,
            6 => Cargo::Socio,
            7 => Cargo::Estagiario,
            outro => Cargo::Outro(outro),
        }
    }
}

impl From<Cargo> for i32 {
    fn from(cargo: Cargo) -> Self {
        match cargo {
            Cargo::SegurancaDoTrabalho => 1,
            Cargo::GenteEGestao => 2,
            Cargo::Eletrica => 3,
            Cargo::TI => 4,
            Cargo::Gerente => 5,
            Cargo::Socio => 6,
            Cargo::Estagiario => 7,
            Cargo::Outro(codigo) => codigo,
        }
    }
}

// O colaborador autenticado, como o backend devolve no login e em /me.
// Também é o JSON guardado no armazenamento local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub uuid: Uuid,
    pub nome: String,
    pub email: String,
    pub cargo_id: Cargo,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_perfil: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_admissao: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.cargo_id.is_admin()
    }

    pub fn is_ativo(&self) -> bool {
        self.status == "ativo"
    }

    /// Inicial exibida no avatar quando não há foto.
    pub fn inicial(&self) -> char {
        self.nome
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }

    pub fn foto(&self) -> Option<&str> {
        self.foto_perfil.as_deref().filter(|f| !f.is_empty())
    }
}

fn email_obrigatorio(email: &str) -> Result<(), ValidationError> {
    nao_vazio(email, "Email e senha são obrigatórios")
}

fn senha_obrigatoria(senha: &str) -> Result<(), ValidationError> {
    nao_vazio(senha, "Email e senha são obrigatórios")
}

fn senha_atual_obrigatoria(senha: &str) -> Result<(), ValidationError> {
    nao_vazio(senha, "Informe a senha atual")
}

// Dados para login
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginPayload {
    #[validate(custom(function = "email_obrigatorio"))]
    pub email: String,
    #[validate(custom(function = "senha_obrigatoria"))]
    pub senha: String,
}

// Resposta de autenticação com o token e o colaborador
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

// Troca de senha (PUT /me/senha). A confirmação fica só no cliente.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AlterarSenhaPayload {
    #[validate(custom(function = "senha_atual_obrigatoria"))]
    pub senha_atual: String,

    #[validate(length(min = 6, message = "A nova senha deve ter no mínimo 6 caracteres."))]
    pub nova_senha: String,

    #[serde(skip_serializing)]
    #[validate(must_match(other = "nova_senha", message = "As senhas não conferem."))]
    pub confirmacao: String,
}

// Campos editáveis do próprio perfil (PUT /me)
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct AtualizarPerfilPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub nome: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto_perfil: Option<String>,
}
