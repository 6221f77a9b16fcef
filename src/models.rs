pub mod auth;
pub mod documento;
pub mod ponto;

pub use auth::{Cargo, User};
pub use documento::{Documento, FiltroStatus, StatusDocumento, TipoDocumento};
pub use ponto::{RegistroPonto, TipoPonto};
