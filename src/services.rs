pub mod api_client;
pub mod auth;
pub mod colaborador_service;
pub mod documento_service;
pub mod ponto_service;
pub mod session;

pub use api_client::ApiClient;
pub use auth::AuthService;
pub use session::{AuthState, Session};
