pub mod error;
pub mod formatacao;
pub mod moeda;
pub mod notice;
pub mod validation;

pub use error::AppError;
pub use notice::Notice;
