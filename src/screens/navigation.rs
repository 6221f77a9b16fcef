// src/screens/navigation.rs

use tokio::sync::watch;

use crate::{models::documento::FiltroStatus, services::session::AuthState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainTab {
    #[default]
    Home,
    Documentos,
    Ponto,
    Perfil,
}

impl MainTab {
    pub fn titulo(&self) -> &'static str {
        match self {
            MainTab::Home => "Início",
            MainTab::Documentos => "Documentos",
            MainTab::Ponto => "Ponto",
            MainTab::Perfil => "Perfil",
        }
    }
}

/// Telas empilhadas dentro da aba de documentos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentosRoute {
    Lista { filtro: FiltroStatus },
    Detalhes { id: i64 },
    Novo,
}

/// Pedido de navegação emitido por uma tela.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    GoBack,
    Tab(MainTab),
    Documentos(DocumentosRoute),
}

/// Fluxo raiz escolhido a partir do estado de autenticação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Loading,
    Login,
    Main(MainTab),
}

impl Route {
    pub fn for_state(state: &AuthState) -> Route {
        match state {
            AuthState::Restoring => Route::Loading,
            AuthState::Authenticated(_) => Route::Main(MainTab::default()),
            AuthState::Unauthenticated => Route::Login,
        }
    }
}

/// Escolhe entre o fluxo de login e as abas, reavaliando a cada mudança
/// do estado de autenticação. Não guarda estado próprio além da aba ativa.
pub struct NavigationGate {
    auth: watch::Receiver<AuthState>,
    tab: MainTab,
}

impl NavigationGate {
    pub fn new(auth: watch::Receiver<AuthState>) -> Self {
        Self {
            auth,
            tab: MainTab::default(),
        }
    }

    pub fn current(&self) -> Route {
        match Route::for_state(&self.auth.borrow()) {
            Route::Main(_) => Route::Main(self.tab),
            route => route,
        }
    }

    pub fn select_tab(&mut self, tab: MainTab) {
        self.tab = tab;
    }

    /// Espera a próxima mudança de estado e devolve a nova rota.
    /// `None` quando o `AuthService` deixou de existir.
    pub async fn changed(&mut self) -> Option<Route> {
        self.auth.changed().await.ok()?;
        if !matches!(Route::for_state(&self.auth.borrow_and_update()), Route::Main(_)) {
            // Um novo login começa sempre na aba inicial
            self.tab = MainTab::default();
        }
        Some(self.current())
    }
}
