//src/main.rs

use std::env;

use rls_app::{
    config::AppState,
    screens::{NavigationGate, Route, home::HomeScreen},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger com filtro por RUST_LOG (padrão: info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let app = AppState::from_env()?;
    tracing::info!("🌐 Backend em {}", app.config.api_base_url);

    let gate = NavigationGate::new(app.auth.subscribe());
    app.auth.restore().await;
    tracing::info!("🧭 Rota inicial: {:?}", gate.current());

    // Login opcional pelo ambiente, útil para testar contra um backend real
    if gate.current() == Route::Login {
        if let (Ok(email), Ok(senha)) = (env::var("RLS_EMAIL"), env::var("RLS_SENHA")) {
            app.auth.sign_in(&email, &senha).await?;
        }
    }

    match gate.current() {
        Route::Main(tab) => {
            let home = HomeScreen::new(app.clone());
            home.load().await?;
            let resumo = home.state().data();
            tracing::info!(
                "✅ {} | aba {} | {} ponto(s) hoje, {} documento(s) recente(s)",
                home.nome_usuario().unwrap_or_default(),
                tab.titulo(),
                resumo.pontos.len(),
                resumo.documentos.len()
            );
        }
        route => tracing::info!("Nenhuma sessão ativa ({:?})", route),
    }

    Ok(())
}
