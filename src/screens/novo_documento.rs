// src/screens/novo_documento.rs

use std::{collections::HashMap, sync::Arc};

use chrono::{Local, NaiveDate};
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::{AppError, field_messages},
        formatacao::data_curta,
        moeda::{formatar_moeda, interpretar_moeda},
        notice::Notice,
        validation::{combinar, erro, nao_vazio},
    },
    config::AppState,
    device::{ArquivoSelecionado, FilePicker, OrigemArquivo, Permission},
    models::documento::{NovoDocumento, TipoDocumento},
    screens::{navigation::NavIntent, screen_state::ScreenState},
};

// Mesmos limites que o backend aplica no upload
pub const MAX_ARQUIVO_BYTES: usize = 10 * 1024 * 1024;
pub const MIME_ACEITOS: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

fn titulo_obrigatorio(titulo: &str) -> Result<(), ValidationError> {
    nao_vazio(titulo, "Título é obrigatório")
}

fn valor_valido(valor: &str) -> Result<(), ValidationError> {
    if valor.trim().is_empty() || interpretar_moeda(valor).is_some() {
        return Ok(());
    }
    Err(erro("invalid", "Valor inválido"))
}

/// Campos do formulário, como o usuário preencheu.
#[derive(Debug, Clone, Validate)]
pub struct FormularioDocumento {
    #[validate(custom(function = "titulo_obrigatorio"))]
    pub titulo: String,

    pub descricao: String,

    #[validate(required(message = "Tipo de documento é obrigatório"))]
    pub tipo_documento: Option<TipoDocumento>,

    #[validate(required(message = "Data do documento é obrigatória"))]
    pub data_documento: Option<NaiveDate>,

    // Já formatado como moeda (`R$ 1.000,50`)
    #[validate(custom(function = "valor_valido"))]
    pub valor: String,

    #[validate(required(message = "Arquivo é obrigatório"))]
    pub arquivo: Option<ArquivoSelecionado>,
}

impl Default for FormularioDocumento {
    fn default() -> Self {
        Self {
            titulo: String::new(),
            descricao: String::new(),
            tipo_documento: None,
            data_documento: Some(Local::now().date_naive()),
            valor: String::new(),
            arquivo: None,
        }
    }
}

impl FormularioDocumento {
    /// Valida tudo antes de qualquer requisição. `hoje` limita a data.
    pub fn validar(&self, hoje: NaiveDate) -> Result<(), validator::ValidationErrors> {
        let mut extras = Vec::new();

        if self.data_documento.is_some_and(|data| data > hoje) {
            extras.push(("data_documento", erro("future", "Data não pode ser futura")));
        }

        if let Some(arquivo) = &self.arquivo {
            if arquivo.conteudo.len() > MAX_ARQUIVO_BYTES {
                extras.push(("arquivo", erro("too_large", "Arquivo muito grande (máximo 10MB)")));
            } else if !MIME_ACEITOS.contains(&arquivo.mime_efetivo().as_str()) {
                extras.push((
                    "arquivo",
                    erro("mime", "Tipo de arquivo não permitido. Use PDF, JPEG ou PNG"),
                ));
            }
        }

        combinar(self.validate(), extras)
    }

    /// Converte o formulário já validado no documento a enviar.
    fn montar(&self) -> Option<NovoDocumento> {
        let descricao = Some(self.descricao.trim().to_string()).filter(|d| !d.is_empty());
        Some(NovoDocumento {
            titulo: self.titulo.trim().to_string(),
            descricao,
            tipo_documento: self.tipo_documento?,
            data_documento: self.data_documento?,
            valor: interpretar_moeda(&self.valor),
            arquivo: self.arquivo.clone()?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NovoDocumentoData {
    pub form: FormularioDocumento,
    // Mensagem por campo; some quando o campo é editado
    pub errors: HashMap<String, String>,
    pub loading: bool,
}

pub struct NovoDocumentoScreen {
    app: AppState,
    picker: Arc<dyn FilePicker>,
    state: ScreenState<NovoDocumentoData>,
}

impl NovoDocumentoScreen {
    pub fn new(app: AppState, picker: Arc<dyn FilePicker>) -> Self {
        Self {
            app,
            picker,
            state: ScreenState::new(NovoDocumentoData::default()),
        }
    }

    pub fn state(&self) -> &ScreenState<NovoDocumentoData> {
        &self.state
    }

    pub fn tipos(&self) -> [TipoDocumento; 5] {
        TipoDocumento::TODOS
    }

    /// Data escolhida, como aparece no campo (`dd/MM/yyyy`).
    pub fn data_formatada(&self) -> Option<String> {
        self.state.read(|d| d.form.data_documento.map(data_curta))
    }

    /// Pede câmera e galeria ao abrir a tela.
    pub async fn mount(&self) {
        let (camera, galeria) = tokio::join!(
            self.picker.request_permission(Permission::Camera),
            self.picker.request_permission(Permission::MediaLibrary)
        );

        let concedidas = matches!(
            (&camera, &galeria),
            (Ok(c), Ok(g)) if c.is_granted() && g.is_granted()
        );
        if !concedidas {
            tracing::warn!("Permissões de câmera/galeria negadas: {:?} {:?}", camera, galeria);
            self.state.notify(Notice::blocking(
                "Permissões necessárias",
                Permission::Camera.notice_message(),
            ));
        }
    }

    pub fn set_titulo(&self, titulo: impl Into<String>) {
        let titulo = titulo.into();
        self.editar("titulo", |f| f.titulo = titulo);
    }

    pub fn set_descricao(&self, descricao: impl Into<String>) {
        let descricao = descricao.into();
        self.editar("descricao", |f| f.descricao = descricao);
    }

    pub fn set_tipo(&self, tipo: TipoDocumento) {
        self.editar("tipo_documento", |f| f.tipo_documento = Some(tipo));
    }

    pub fn set_data(&self, data: NaiveDate) {
        self.editar("data_documento", |f| f.data_documento = Some(data));
    }

    /// Recebe a digitação crua e guarda já formatada como moeda.
    pub fn set_valor(&self, digitado: &str) {
        let valor = formatar_moeda(digitado);
        self.editar("valor", |f| f.valor = valor);
    }

    /// Abre a câmera, a galeria ou o seletor de PDF.
    /// Um arquivo novo substitui o anterior; cancelar mantém o anterior.
    pub async fn selecionar_arquivo(&self, origem: OrigemArquivo) -> Result<(), AppError> {
        match self.picker.pick(origem).await {
            Ok(Some(mut arquivo)) => {
                if origem == OrigemArquivo::Documento {
                    arquivo.mime_type = Some("application/pdf".to_string());
                }
                self.editar("arquivo", |f| f.arquivo = Some(arquivo));
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                tracing::error!("Erro ao selecionar arquivo ({:?}): {}", origem, e);
                let mensagem = match origem {
                    OrigemArquivo::Camera => "Não foi possível tirar a foto",
                    OrigemArquivo::Galeria => "Não foi possível selecionar a imagem",
                    OrigemArquivo::Documento => "Não foi possível selecionar o documento",
                };
                self.state.notify(Notice::error(mensagem));
                Err(e)
            }
        }
    }

    pub fn remover_arquivo(&self) {
        self.editar("arquivo", |f| f.arquivo = None);
    }

    /// Valida e envia. Sucesso avisa e volta; falha mostra a mensagem do
    /// backend, a de conexão ou a genérica, nessa ordem.
    pub async fn submit(&self) -> Result<(), AppError> {
        let form = self.state.read(|d| d.form.clone());
        if let Err(errors) = form.validar(Local::now().date_naive()) {
            let mensagens = field_messages(&errors);
            self.state.update(|d| d.errors = mensagens);
            return Err(errors.into());
        }
        let Some(novo) = form.montar() else {
            return Err(anyhow::anyhow!("formulário validado sem campos obrigatórios").into());
        };

        let _loading = self.state.begin(|d| &mut d.loading)?;

        match self.app.documentos.upload(novo).await {
            Ok(_) => {
                self.state.notify(Notice::success("Documento enviado com sucesso!"));
                self.state.navigate(NavIntent::GoBack);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Erro ao enviar documento: {}", e);
                self.state.notify(Notice::error(e.user_message("Erro ao enviar documento")));
                Err(e)
            }
        }
    }

    // Aplica a edição e limpa o erro do campo
    fn editar(&self, campo: &str, f: impl FnOnce(&mut FormularioDocumento)) {
        self.state.update(|d| {
            f(&mut d.form);
            d.errors.remove(campo);
        });
    }
}
