//! # App State Module
//!
//! Central application state for the MindTrace desktop client.
//!
//! ## Key Types:
//! - `MindTraceApp` - owns the backend client, the async runtime and the session
//! - `Session` - signed out, loading the profile, failed, or ready
//! - `Screen` - home or the partner screen
//! - `AppEvent` - results of background work delivered to the UI thread
//!
//! ## Threading:
//! egui runs on the main thread. Backend calls run on a tokio runtime owned by
//! the app; each task sends its `AppEvent` back over a channel and requests a
//! repaint. Events are drained at the start of every frame, so UI state is only
//! ever touched from the UI thread.

use anyhow::Context as _;
use eframe::egui;
use log::{debug, error, info, warn};
use shared::{HealthResponse, UserInfo};
use std::future::Future;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use crate::api::{ApiError, HttpPartnerApi, PartnerApi, SelfUserInfoCache, StaticTokenProvider, TokenProvider};
use crate::config::AppConfig;
use crate::ui::controller::PartnerController;
use crate::ui::state::{Command, Outcome, PartnerScreenState, Ticket};

/// Background work finished
#[derive(Debug)]
pub enum AppEvent {
    SessionLoaded(Result<UserInfo, ApiError>),
    HealthChecked(Result<HealthResponse, ApiError>),
    Partner { ticket: Ticket, outcome: Outcome },
}

#[derive(Debug)]
pub enum Screen {
    Home,
    Partners(PartnerScreenState),
}

#[derive(Debug)]
pub enum Session {
    SignedOut,
    Loading,
    Failed(String),
    Ready { user: UserInfo, screen: Screen },
}

/// Main application struct for the egui MindTrace client
pub struct MindTraceApp {
    pub config: AppConfig,
    pub session: Session,
    /// Backend reachability: `Some(Ok(status))` or `Some(Err(reason))` once checked
    pub backend_status: Option<Result<String, String>>,
    /// Token typed on the sign-in screen
    pub token_input: String,

    runtime: tokio::runtime::Runtime,
    api: Arc<dyn PartnerApi>,
    tokens: Arc<StaticTokenProvider>,
    user_cache: Arc<SelfUserInfoCache>,
    controller: PartnerController<dyn PartnerApi>,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,
    egui_ctx: egui::Context,
}

impl MindTraceApp {
    /// Create the app and start loading the signed-in user's profile
    pub fn new(egui_ctx: egui::Context, config: AppConfig) -> anyhow::Result<Self> {
        info!("🚀 Initializing MindTrace client against {}", config.api.base_url);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let tokens = Arc::new(StaticTokenProvider::new(config.auth.id_token.clone()));
        let api: Arc<dyn PartnerApi> = Arc::new(
            HttpPartnerApi::new(&config.api, tokens.clone()).context("Failed to create backend client")?,
        );
        let controller = PartnerController::new(Arc::clone(&api));
        let (events_tx, events_rx) = channel();

        let mut app = Self {
            config,
            session: Session::SignedOut,
            backend_status: None,
            token_input: String::new(),
            runtime,
            api,
            tokens,
            user_cache: Arc::new(SelfUserInfoCache::new()),
            controller,
            events_tx,
            events_rx,
            egui_ctx,
        };

        app.check_health();
        if app.tokens.bearer_token().is_some() {
            app.load_session();
        } else {
            info!("No ID token configured, waiting for sign-in");
        }

        Ok(app)
    }

    /// Run `task` on the runtime and deliver its event to the UI thread
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let events = self.events_tx.clone();
        let ctx = self.egui_ctx.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            if events.send(event).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Execute a partner-screen command in the background
    pub fn dispatch(&self, command: Option<Command>) {
        let Some(command) = command else {
            return;
        };
        let controller = self.controller.clone();
        self.spawn(async move {
            let outcome = controller.execute(command.effect).await;
            AppEvent::Partner {
                ticket: command.ticket,
                outcome,
            }
        });
    }

    pub fn check_health(&self) {
        let api = Arc::clone(&self.api);
        self.spawn(async move { AppEvent::HealthChecked(api.health().await) });
    }

    pub fn load_session(&mut self) {
        self.session = Session::Loading;
        let api = Arc::clone(&self.api);
        let cache = Arc::clone(&self.user_cache);
        self.spawn(async move { AppEvent::SessionLoaded(cache.get_or_fetch(api.as_ref()).await) });
    }

    pub fn sign_in(&mut self) {
        let token = self.token_input.trim().to_string();
        if token.is_empty() {
            return;
        }
        info!("🔑 Signing in with a pasted ID token");
        self.tokens.sign_in(token);
        self.token_input.clear();
        self.load_session();
    }

    pub fn sign_out(&mut self) {
        info!("👋 Signing out");
        self.tokens.sign_out();
        let cache = Arc::clone(&self.user_cache);
        self.runtime.spawn(async move { cache.clear().await });
        self.session = Session::SignedOut;
    }

    /// Enter the partner screen with a fresh state; the list is fetched at once
    pub fn open_partners(&mut self) {
        let command = self.session.open_partners();
        self.dispatch(command);
    }

    pub fn go_home(&mut self) {
        self.session.go_home();
    }

    pub fn partner_state_mut(&mut self) -> Option<&mut PartnerScreenState> {
        self.session.partner_state_mut()
    }

    /// Apply every finished background task to the UI state
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AppEvent::SessionLoaded(Ok(user)) => {
                    info!("✅ Signed in as {} ({})", user.name, user.role);
                    self.session = Session::Ready {
                        user,
                        screen: Screen::Home,
                    };
                }
                AppEvent::SessionLoaded(Err(e)) => {
                    error!("❌ Failed to load profile: {}", e);
                    self.session = match e {
                        ApiError::Unauthenticated => Session::SignedOut,
                        e => Session::Failed(format!("Could not load your profile: {}", e)),
                    };
                }
                AppEvent::HealthChecked(result) => {
                    if let Err(e) = &result {
                        warn!("Backend health check failed: {}", e);
                    }
                    self.backend_status = Some(result.map(|h| h.status).map_err(|e| e.to_string()));
                }
                AppEvent::Partner { ticket, outcome } => {
                    let next = self.session.route_partner_outcome(ticket, outcome);
                    self.dispatch(next);
                }
            }
        }
    }
}

impl Session {
    /// Replace the current screen with a fresh partner screen. Returns the
    /// initial list fetch, or `None` when nobody is signed in.
    pub fn open_partners(&mut self) -> Option<Command> {
        let Session::Ready { user, screen } = self else {
            return None;
        };
        let mut state = PartnerScreenState::new(user.clone());
        let command = state.enter();
        *screen = Screen::Partners(state);
        Some(command)
    }

    pub fn go_home(&mut self) {
        if let Session::Ready { screen, .. } = self {
            *screen = Screen::Home;
        }
    }

    pub fn partner_state_mut(&mut self) -> Option<&mut PartnerScreenState> {
        match self {
            Session::Ready {
                screen: Screen::Partners(state),
                ..
            } => Some(state),
            _ => None,
        }
    }

    /// Hand a background outcome to the open partner screen
    pub fn route_partner_outcome(&mut self, ticket: Ticket, outcome: Outcome) -> Option<Command> {
        match self.partner_state_mut() {
            Some(state) => state.apply(ticket, outcome),
            None => {
                debug!("No partner screen open, dropping outcome for {:?}", ticket);
                None
            }
        }
    }
}
