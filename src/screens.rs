pub mod detalhes_documento;
pub mod documentos;
pub mod home;
pub mod login;
pub mod navigation;
pub mod novo_documento;
pub mod perfil;
pub mod ponto;
pub mod screen_state;

pub use navigation::{DocumentosRoute, MainTab, NavIntent, NavigationGate, Route};
pub use screen_state::{Screen, ScreenState};
