// tests/common/mod.rs
// Backend falso (axum + JWT) e recursos de aparelho falsos para os testes de integração.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use rls_app::{
    AppError,
    config::{AppConfig, AppState},
    device::{
        ArquivoSelecionado, FilePicker, LocationProvider, Localizacao, OrigemArquivo, Permission,
        PermissionStatus,
    },
    storage::MemoryStore,
};

pub const SENHA: &str = "senha123";
pub const COLABORADOR: &str = "ana@empresa.com";
pub const GESTOR: &str = "gestor@empresa.com";

const JWT_SECRET: &str = "rls-test-secret";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    user_id: i64,
    cargo_id: i32,
    exp: i64,
}

/// Uma requisição que chegou ao backend falso.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub requests: Vec<Recorded>,
    pub documentos: Vec<Value>,
    pub pontos: Vec<Value>,
    // Faz toda rota autenticada responder 401
    pub token_expirado: bool,
    next_id: i64,
}

impl MockState {
    fn proximo_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn anotar_corpo(&mut self, body: Value) {
        if let Some(ultima) = self.requests.last_mut() {
            ultima.body = Some(body);
        }
    }
}

type Shared = Arc<Mutex<MockState>>;
type Resposta = (StatusCode, Json<Value>);

pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            next_id: 100,
            ..Default::default()
        }));

        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/me", get(get_me).put(put_me))
            .route("/me/senha", put(put_senha))
            .route("/pontos", get(listar_pontos).post(registrar_ponto))
            .route("/documentos", get(listar_documentos).post(upload_documento))
            .route("/documentos/{id}", get(obter_documento))
            .route("/documentos/{id}/aprovar", put(aprovar))
            .route("/documentos/{id}/rejeitar", put(rejeitar))
            .route("/documentos/{id}/enviar", put(enviar))
            .route("/documentos/{id}/arquivo", get(arquivo));

        let app = Router::new()
            .nest("/api", api)
            .layer(middleware::from_fn_with_state(state.clone(), gravar_requisicao))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn app(&self) -> AppState {
        AppState::new(AppConfig::new(&self.base_url), Arc::new(MemoryStore::new())).unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn expirar_tokens(&self) {
        self.state.lock().unwrap().token_expirado = true;
    }

    /// Cadastra um documento e devolve o id.
    pub fn seed_documento(&self, titulo: &str, status: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.proximo_id();
        state.documentos.push(json!({
            "id": id,
            "colaborador_id": 1,
            "titulo": titulo,
            "descricao": "",
            "tipo_documento": "recibo",
            "data_documento": "2026-10-10T00:00:00Z",
            "valor": 150.5,
            "status": status,
            "aprovado_por": null,
            "data_aprovacao": null,
            "enviado_para_financas": false,
            "mime_type": "application/pdf",
            "tamanho_bytes": 13,
            "criado_em": "2026-10-10T12:00:00Z"
        }));
        id
    }

    pub fn token_para(email: &str) -> String {
        let (user_id, cargo_id) = perfil(email);
        let claims = Claims {
            sub: email.to_string(),
            user_id,
            cargo_id,
            exp: Utc::now().timestamp() + 3600,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET.as_bytes())).unwrap()
    }
}

pub fn user_json(email: &str) -> Value {
    let (id, cargo_id) = perfil(email);
    let nome = if email == GESTOR { "Carlos Gestor" } else { "Ana Souza" };
    json!({
        "id": id,
        "uuid": format!("5a3b1c2d-0000-4000-8000-{:012}", id),
        "nome": nome,
        "email": email,
        "cargo_id": cargo_id,
        "status": "ativo",
        "data_admissao": "2024-03-01T00:00:00Z"
    })
}

fn perfil(email: &str) -> (i64, i32) {
    if email == GESTOR { (2, 5) } else { (1, 4) }
}

fn erro(status: StatusCode, mensagem: &str) -> Resposta {
    (status, Json(json!({ "error": mensagem })))
}

async fn gravar_requisicao(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let recorded = Recorded {
        method: req.method().to_string(),
        path: req.uri().path().trim_start_matches("/api").to_string(),
        query: req.uri().query().map(str::to_string),
        authorization: req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: None,
    };
    state.lock().unwrap().requests.push(recorded);
    next.run(req).await
}

fn autenticar(state: &Shared, headers: &HeaderMap) -> Result<Claims, Resposta> {
    if state.lock().unwrap().token_expirado {
        return Err(erro(StatusCode::UNAUTHORIZED, "Token expirado"));
    }
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| erro(StatusCode::UNAUTHORIZED, "Token não fornecido"))?;

    decode::<Claims>(token, &DecodingKey::from_secret(JWT_SECRET.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| erro(StatusCode::UNAUTHORIZED, "Token inválido"))
}

fn exigir_admin(claims: &Claims) -> Result<(), Resposta> {
    if matches!(claims.cargo_id, 2 | 5 | 6) {
        Ok(())
    } else {
        Err(erro(StatusCode::FORBIDDEN, "Sem permissão de administrador"))
    }
}

// --- Handlers ---

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Resposta {
    state.lock().unwrap().anotar_corpo(body.clone());
    let email = body["email"].as_str().unwrap_or_default();
    let senha = body["senha"].as_str().unwrap_or_default();

    if senha != SENHA || (email != COLABORADOR && email != GESTOR) {
        return erro(StatusCode::UNAUTHORIZED, "Credenciais inválidas");
    }
    (
        StatusCode::OK,
        Json(json!({ "token": MockBackend::token_para(email), "user": user_json(email) })),
    )
}

async fn get_me(State(state): State<Shared>, headers: HeaderMap) -> Resposta {
    match autenticar(&state, &headers) {
        Ok(claims) => (StatusCode::OK, Json(user_json(&claims.sub))),
        Err(e) => e,
    }
}

async fn put_me(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Resposta {
    let claims = match autenticar(&state, &headers) {
        Ok(claims) => claims,
        Err(e) => return e,
    };
    state.lock().unwrap().anotar_corpo(body.clone());

    let mut user = user_json(&claims.sub);
    for campo in ["nome", "telefone", "foto_perfil"] {
        if let Some(valor) = body.get(campo) {
            user[campo] = valor.clone();
        }
    }
    (StatusCode::OK, Json(user))
}

async fn put_senha(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Resposta {
    if let Err(e) = autenticar(&state, &headers) {
        return e;
    }
    state.lock().unwrap().anotar_corpo(body.clone());

    if body["senha_atual"] != SENHA {
        return erro(StatusCode::BAD_REQUEST, "Senha atual incorreta");
    }
    (StatusCode::OK, Json(json!({ "message": "Senha alterada com sucesso" })))
}

async fn listar_pontos(State(state): State<Shared>, headers: HeaderMap) -> Resposta {
    if let Err(e) = autenticar(&state, &headers) {
        return e;
    }
    let pontos = state.lock().unwrap().pontos.clone();
    // Como o backend real: lista vazia sai como null
    if pontos.is_empty() {
        return (StatusCode::OK, Json(Value::Null));
    }
    (StatusCode::OK, Json(Value::Array(pontos)))
}

async fn registrar_ponto(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Resposta {
    if let Err(e) = autenticar(&state, &headers) {
        return e;
    }
    let mut state = state.lock().unwrap();
    state.anotar_corpo(body.clone());

    let localizacao = body["localizacao"]
        .as_str()
        .and_then(|s| serde_json::from_str::<Value>(s).ok());
    let id = state.proximo_id();
    let registro = json!({
        "id": id,
        "colaborador_id": 1,
        "tipo": body["tipo"],
        "data_hora": body["data_hora"],
        "localizacao": localizacao,
        "observacao": body["observacao"],
    });
    state.pontos.push(registro.clone());
    (StatusCode::CREATED, Json(registro))
}

async fn listar_documentos(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Resposta {
    if let Err(e) = autenticar(&state, &headers) {
        return e;
    }
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    let documentos: Vec<Value> = state
        .lock()
        .unwrap()
        .documentos
        .iter()
        .filter(|d| params.get("status").is_none_or(|s| d["status"] == s.as_str()))
        .take(limit)
        .cloned()
        .collect();
    (StatusCode::OK, Json(Value::Array(documentos)))
}

async fn upload_documento(State(state): State<Shared>, headers: HeaderMap, mut multipart: Multipart) -> Resposta {
    if let Err(e) = autenticar(&state, &headers) {
        return e;
    }

    let mut campos = serde_json::Map::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let nome = field.name().unwrap_or_default().to_string();
        if nome == "arquivo" {
            campos.insert("arquivo_nome".into(), json!(field.file_name()));
            campos.insert("arquivo_tipo".into(), json!(field.content_type()));
            let bytes = field.bytes().await.unwrap_or_default();
            campos.insert("arquivo_tamanho".into(), json!(bytes.len()));
        } else {
            campos.insert(nome, json!(field.text().await.unwrap_or_default()));
        }
    }

    let mut state = state.lock().unwrap();
    state.anotar_corpo(Value::Object(campos.clone()));

    if campos.get("titulo").and_then(Value::as_str).is_none_or(str::is_empty) {
        return erro(StatusCode::BAD_REQUEST, "título é obrigatório");
    }

    let id = state.proximo_id();
    let valor: f64 = campos
        .get("valor")
        .and_then(Value::as_str)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0);
    let documento = json!({
        "id": id,
        "colaborador_id": 1,
        "titulo": campos["titulo"],
        "descricao": campos.get("descricao").cloned().unwrap_or(json!("")),
        "tipo_documento": campos["tipo_documento"],
        "data_documento": format!("{}T00:00:00Z", campos["data_documento"].as_str().unwrap_or_default()),
        "valor": valor,
        "status": "pendente",
        "enviado_para_financas": false,
        "mime_type": campos["arquivo_tipo"],
        "tamanho_bytes": campos["arquivo_tamanho"],
    });
    state.documentos.push(documento.clone());
    (StatusCode::CREATED, Json(documento))
}

async fn obter_documento(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Resposta {
    if let Err(e) = autenticar(&state, &headers) {
        return e;
    }
    let state = state.lock().unwrap();
    match state.documentos.iter().find(|d| d["id"] == id) {
        Some(documento) => (StatusCode::OK, Json(documento.clone())),
        None => erro(StatusCode::NOT_FOUND, "Documento não encontrado"),
    }
}

// Aplica uma transição de status validando as permissões
fn transicionar(
    state: &Shared,
    headers: &HeaderMap,
    id: i64,
    body: Value,
    aplicar: impl FnOnce(&Claims, &mut Value, &Value) -> Result<&'static str, Resposta>,
) -> Resposta {
    let claims = match autenticar(state, headers).and_then(|c| exigir_admin(&c).map(|_| c)) {
        Ok(claims) => claims,
        Err(e) => return e,
    };
    let mut state = state.lock().unwrap();
    state.anotar_corpo(body.clone());

    let Some(documento) = state.documentos.iter_mut().find(|d| d["id"] == id) else {
        return erro(StatusCode::NOT_FOUND, "Documento não encontrado");
    };
    match aplicar(&claims, documento, &body) {
        Ok(mensagem) => (StatusCode::OK, Json(json!({ "message": mensagem }))),
        Err(e) => e,
    }
}

async fn aprovar(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Resposta {
    transicionar(&state, &headers, id, body, |claims, documento, _| {
        if documento["status"] != "pendente" {
            return Err(erro(StatusCode::BAD_REQUEST, "Documento não está pendente"));
        }
        documento["status"] = json!("aprovado");
        documento["aprovado_por"] = json!(claims.user_id);
        documento["data_aprovacao"] = json!(Utc::now().to_rfc3339());
        Ok("Documento aprovado com sucesso")
    })
}

async fn rejeitar(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Resposta {
    transicionar(&state, &headers, id, body, |claims, documento, body| {
        if body["motivo"].as_str().is_none_or(|m| m.trim().is_empty()) {
            return Err(erro(StatusCode::BAD_REQUEST, "Motivo é obrigatório"));
        }
        documento["status"] = json!("rejeitado");
        documento["aprovado_por"] = json!(claims.user_id);
        documento["data_aprovacao"] = json!(Utc::now().to_rfc3339());
        Ok("Documento rejeitado com sucesso")
    })
}

async fn enviar(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Resposta {
    transicionar(&state, &headers, id, body, |_, documento, body| {
        if documento["status"] != "aprovado" {
            return Err(erro(StatusCode::BAD_REQUEST, "Documento precisa estar aprovado"));
        }
        documento["enviado_para_financas"] = json!(true);
        documento["data_envio"] = json!(Utc::now().to_rfc3339());
        documento["observacoes_envio"] = body["observacoes"].clone();
        Ok("Documento enviado para finanças")
    })
}

async fn arquivo(State(state): State<Shared>, headers: HeaderMap, Path(_id): Path<i64>) -> Response {
    if let Err(e) = autenticar(&state, &headers) {
        return e.into_response();
    }
    (StatusCode::OK, b"%PDF-1.4 mock".to_vec()).into_response()
}

// --- Aparelho falso ---

pub struct FakeLocation {
    pub permission: Mutex<PermissionStatus>,
    pub position: Mutex<Option<Localizacao>>,
}

impl FakeLocation {
    pub fn new(permission: PermissionStatus, position: Option<Localizacao>) -> Arc<Self> {
        Arc::new(Self {
            permission: Mutex::new(permission),
            position: Mutex::new(position),
        })
    }

    pub fn resolver(&self, localizacao: Localizacao) {
        *self.position.lock().unwrap() = Some(localizacao);
    }
}

#[async_trait]
impl LocationProvider for FakeLocation {
    async fn request_permission(&self) -> Result<PermissionStatus, AppError> {
        Ok(*self.permission.lock().unwrap())
    }

    async fn current_position(&self) -> Result<Localizacao, AppError> {
        self.position
            .lock()
            .unwrap()
            .ok_or(AppError::LocationUnavailable)
    }
}

pub fn sao_paulo() -> Localizacao {
    Localizacao {
        latitude: -23.5505,
        longitude: -46.6333,
        precisao: Some(12.0),
    }
}

pub struct FakePicker {
    pub negadas: Vec<Permission>,
    pub proximo: Mutex<Option<ArquivoSelecionado>>,
}

impl FakePicker {
    pub fn new(negadas: Vec<Permission>) -> Arc<Self> {
        Arc::new(Self {
            negadas,
            proximo: Mutex::new(None),
        })
    }

    pub fn preparar(&self, arquivo: ArquivoSelecionado) {
        *self.proximo.lock().unwrap() = Some(arquivo);
    }
}

#[async_trait]
impl FilePicker for FakePicker {
    async fn request_permission(&self, permission: Permission) -> Result<PermissionStatus, AppError> {
        if self.negadas.contains(&permission) {
            Ok(PermissionStatus::Denied)
        } else {
            Ok(PermissionStatus::Granted)
        }
    }

    async fn pick(&self, _origem: OrigemArquivo) -> Result<Option<ArquivoSelecionado>, AppError> {
        Ok(self.proximo.lock().unwrap().take())
    }
}

pub fn foto() -> ArquivoSelecionado {
    ArquivoSelecionado {
        nome: "IMG_0001.jpg".into(),
        mime_type: Some("image/jpeg".into()),
        conteudo: vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3],
    }
}
