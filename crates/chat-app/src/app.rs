//! Main egui application — owns the chat view state and spawns the stream
//! consumer for each accepted submit.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, TopBottomPanel};

use chat_core::conversation::SendTicket;
use chat_core::event_bus::EventBus;
use chat_core::ports::{AuthPort, PersistencePort, ReplyTransport};
use chat_core::stream::stream_reply;
use chat_platform::auth::{SessionAuth, StaticAuth};
use chat_platform::http::{HttpHistory, HttpReplyTransport};
use chat_platform::storage::MemoryStore;
use chat_types::{
    ChatError,
    config::{Backend, ChatConfig},
    event::{ChatEvent, ReplyOutcome},
    message::{Message, Persona},
    session::{ChatContext, Identity},
};
use chat_ui::panels::chat;
use chat_ui::state::UiState;
use chat_ui::theme;

/// Result of the async startup: who is chatting with whom, and the
/// persisted history to seed from.
struct Bootstrap {
    context: ChatContext,
    persona: Option<Persona>,
    history: Vec<Message>,
}

type BootSlot = Rc<RefCell<Option<Result<Bootstrap, ChatError>>>>;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    config: ChatConfig,
    event_bus: EventBus,
    context: Option<ChatContext>,
    transport: Rc<dyn ReplyTransport>,
    store: Rc<dyn PersistencePort>,
    boot: BootSlot,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ChatConfig, persona_id: String) -> Self {
        let transport: Rc<dyn ReplyTransport> = Rc::new(HttpReplyTransport::new(config.clone()));
        let (store, auth): (Rc<dyn PersistencePort>, Rc<dyn AuthPort>) = match config.backend {
            Backend::Server => (
                Rc::new(HttpHistory::new(config.clone())),
                Rc::new(SessionAuth::new(config.clone())),
            ),
            Backend::Memory => (
                Rc::new(MemoryStore::new()),
                Rc::new(StaticAuth::signed_in(Identity::new("local"))),
            ),
        };
        log::info!("Using {} backend", store.backend_name());

        let boot: BootSlot = Rc::new(RefCell::new(None));
        Self::bootstrap(
            auth,
            store.clone(),
            persona_id,
            boot.clone(),
            cc.egui_ctx.clone(),
        );

        Self {
            ui_state: UiState::new(config.user_label.clone()),
            config,
            event_bus: EventBus::new(),
            context: None,
            transport,
            store,
            boot,
            first_frame: true,
        }
    }

    /// Resolve the identity, then load persona and history (async)
    fn bootstrap(
        auth: Rc<dyn AuthPort>,
        store: Rc<dyn PersistencePort>,
        persona_id: String,
        slot: BootSlot,
        ctx: egui::Context,
    ) {
        wasm_bindgen_futures::spawn_local(async move {
            let result = async {
                let identity = auth.current_identity().await?;
                let persona = store.get_persona(&identity, &persona_id).await?;
                let history = store.load_history(&identity, &persona_id).await?;
                Ok::<_, ChatError>(Bootstrap {
                    context: ChatContext::new(persona_id, identity),
                    persona,
                    history,
                })
            }
            .await;

            match &result {
                Ok(boot) => log::info!(
                    "Loaded {} messages from {}",
                    boot.history.len(),
                    store.backend_name()
                ),
                Err(e) => log::warn!("Startup failed: {}", e),
            }
            *slot.borrow_mut() = Some(result);
            ctx.request_repaint();
        });
    }

    /// Seed the view once the startup task has finished
    fn take_bootstrap(&mut self) {
        let Some(result) = self.boot.borrow_mut().take() else {
            return;
        };
        match result {
            Ok(boot) => {
                self.context = Some(boot.context);
                self.ui_state.seed_once(boot.persona, boot.history);
            }
            Err(ChatError::Unauthenticated) => {
                self.ui_state.status_text = "Sign in to start chatting".to_string();
            }
            Err(e) => {
                self.ui_state.status_text = format!("Could not load chat: {}", e);
            }
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        self.take_bootstrap();

        // Drain events from the stream consumer
        if self.event_bus.has_pending() && self.ui_state.process_events(self.event_bus.drain()) {
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Persona Chat")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                if !self.config.api_base.is_empty() {
                    ui.separator();
                    ui.label(
                        RichText::new(&self.config.api_base)
                            .color(theme::TEXT_SECONDARY)
                            .small(),
                    );
                }
            });
        });

        // ── Conversation ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            if let Some(ticket) = chat::chat_panel(ui, &mut self.ui_state) {
                self.dispatch_send(ticket, ctx);
            }
        });
    }
}

impl ChatApp {
    /// Run the stream consumer for an accepted submit (async)
    fn dispatch_send(&self, ticket: SendTicket, ctx: &egui::Context) {
        let Some(chat_ctx) = self.context.clone() else {
            // not signed in yet: close the send so the view returns to idle
            log::warn!("Send {} dropped: no chat context", ticket.send_id.0);
            self.event_bus.emit(ChatEvent::ReplyEnd {
                send_id: ticket.send_id,
                outcome: ReplyOutcome::Failed(ChatError::Unauthenticated.to_string()),
            });
            self.event_bus.emit(ChatEvent::HistorySynced {
                send_id: ticket.send_id,
                messages: None,
            });
            return;
        };

        let transport = self.transport.clone();
        let store = self.store.clone();
        let bus = self.event_bus.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome =
                stream_reply(&chat_ctx, ticket, transport.as_ref(), store.as_ref(), &bus).await;
            if let ReplyOutcome::Failed(reason) = outcome {
                log::error!("Reply failed: {}", reason);
            }
            ctx.request_repaint();
        });
    }
}
