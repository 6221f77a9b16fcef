// src/screens/screen_state.rs

use tokio::sync::watch;

use crate::{
    common::{error::AppError, notice::Notice},
    screens::navigation::NavIntent,
};

/// O que a interface lê de uma tela: os dados, os avisos pendentes e o
/// pedido de navegação pendente.
#[derive(Debug, Clone, Default)]
pub struct Screen<S> {
    pub data: S,
    pub notices: Vec<Notice>,
    pub intent: Option<NavIntent>,
}

/// Estado local de uma tela, observável pela interface.
pub struct ScreenState<S> {
    tx: watch::Sender<Screen<S>>,
}

impl<S: Clone> ScreenState<S> {
    pub fn new(data: S) -> Self {
        let (tx, _rx) = watch::channel(Screen {
            data,
            notices: Vec::new(),
            intent: None,
        });
        Self { tx }
    }

    pub fn data(&self) -> S {
        self.tx.borrow().data.clone()
    }

    /// Lê um pedaço dos dados sem clonar tudo.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow().data)
    }

    pub fn subscribe(&self) -> watch::Receiver<Screen<S>> {
        self.tx.subscribe()
    }

    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(|screen| f(&mut screen.data));
    }

    pub fn notify(&self, notice: Notice) {
        self.tx.send_modify(|screen| screen.notices.push(notice));
    }

    pub fn navigate(&self, intent: NavIntent) {
        self.tx.send_modify(|screen| screen.intent = Some(intent));
    }

    pub fn take_notices(&self) -> Vec<Notice> {
        let mut taken = Vec::new();
        self.tx.send_if_modified(|screen| {
            std::mem::swap(&mut taken, &mut screen.notices);
            !taken.is_empty()
        });
        taken
    }

    pub fn take_intent(&self) -> Option<NavIntent> {
        let mut taken = None;
        self.tx.send_if_modified(|screen| {
            taken = screen.intent.take();
            taken.is_some()
        });
        taken
    }

    /// Liga a flag de carregamento de uma ação.
    ///
    /// Se a flag já estiver ligada, a ação é recusada com `AppError::Busy`.
    /// A flag volta a `false` quando o guard é descartado, com sucesso,
    /// erro ou cancelamento.
    pub fn begin(&self, flag: fn(&mut S) -> &mut bool) -> Result<InFlight<'_, S>, AppError> {
        let acquired = self.tx.send_if_modified(|screen| {
            let busy = flag(&mut screen.data);
            if *busy {
                false
            } else {
                *busy = true;
                true
            }
        });

        if !acquired {
            return Err(AppError::Busy);
        }
        Ok(InFlight { state: self, flag })
    }
}

/// Guard de uma ação em andamento; desliga a flag no `Drop`.
pub struct InFlight<'a, S: Clone> {
    state: &'a ScreenState<S>,
    flag: fn(&mut S) -> &mut bool,
}

impl<S: Clone> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        let flag = self.flag;
        self.state.update(|data| *flag(data) = false);
    }
}
