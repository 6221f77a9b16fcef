// src/common/validation.rs
// Auxiliares para as validações customizadas dos formulários (crate `validator`).

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Monta um `ValidationError` com código e mensagem já em português.
pub fn erro(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Falha quando o texto está vazio ou só tem espaços.
pub fn nao_vazio(valor: &str, message: &'static str) -> Result<(), ValidationError> {
    if valor.trim().is_empty() {
        return Err(erro("required", message));
    }
    Ok(())
}

/// Junta o resultado do `validate()` derivado com erros calculados à mão.
pub fn combinar(
    derivado: Result<(), ValidationErrors>,
    extras: Vec<(&'static str, ValidationError)>,
) -> Result<(), ValidationErrors> {
    let mut errors = match derivado {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    for (field, err) in extras {
        errors.add(field, err);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
