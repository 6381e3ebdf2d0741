//! The REPL event loop.
//!
//! Only this loop touches the [`ShowroomSession`]. Input arrives from the
//! readline thread, and insight calls and model loads run as tasks that
//! report back through [`AppEvent`]s. Output produced by those late events
//! goes through rustyline's external printer so it does not garble the prompt.

use std::sync::Arc;
use std::sync::mpsc as std_mpsc;

use anyhow::Result;
use aura_application::scene_presenter::ProxyEvent;
use aura_application::{
    Effect, InsightService, InsightTicket, ProxyVisual, SceneLayout, ScenePresenter,
    ShowroomSession,
};
use aura_core::SceneType;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{Editor, ExternalPrinter};
use tokio::sync::{mpsc, oneshot};

use crate::commands::Command;
use crate::helper::CliHelper;
use crate::render;

const PROMPT: &str = "aura> ";

/// Lines coming from the readline thread.
enum InputEvent {
    Line(String),
    Closed,
}

type Printer = Box<dyn ExternalPrinter + Send>;

/// Completed background work.
#[derive(Debug)]
pub enum AppEvent {
    InsightResolved {
        ticket: InsightTicket,
        text: String,
    },
    /// One product's model finished loading for the layout built at `generation`.
    ModelResolved {
        generation: u64,
        product_id: String,
        visual: ProxyVisual,
    },
}

enum Flow {
    Continue,
    Quit,
}

pub struct App {
    session: ShowroomSession,
    insight: Arc<InsightService>,
    presenter: ScenePresenter,
    layout: Option<SceneLayout>,
    /// Bumped on every scene load; model results from older loads are dropped.
    generation: u64,
    events_tx: mpsc::Sender<AppEvent>,
    printer: Option<Printer>,
}

impl App {
    pub fn new(
        session: ShowroomSession,
        insight: Arc<InsightService>,
        presenter: ScenePresenter,
        events_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            session,
            insight,
            presenter,
            layout: None,
            generation: 0,
            events_tx,
            printer: None,
        }
    }

    /// Runs until `/quit` or end of input.
    pub async fn run(mut self, mut events_rx: mpsc::Receiver<AppEvent>) -> Result<()> {
        let (input_tx, mut input_rx) = mpsc::channel::<InputEvent>(16);
        let (ready_tx, ready_rx) = std_mpsc::channel::<()>();
        let (printer_tx, printer_rx) = oneshot::channel::<Option<Printer>>();
        spawn_input_thread(input_tx, ready_rx, printer_tx)?;
        self.printer = printer_rx.await.ok().flatten();

        render::banner();
        render::navbar(&self.session.navbar_view());
        let effects = self.session.start();
        self.apply(effects);
        render::hint(self.session.hint());

        loop {
            tokio::select! {
                input = input_rx.recv() => {
                    let Some(InputEvent::Line(line)) = input else {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    };
                    if let Flow::Quit = self.handle_line(&line) {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    if ready_tx.send(()).is_err() {
                        break;
                    }
                }
                Some(event) = events_rx.recv() => self.handle_event(event),
            }
        }

        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                render::error(&message);
                return Flow::Continue;
            }
        };
        tracing::debug!("[Aura] Command: {:?}", command);

        match command {
            Command::Scene(scene) => {
                let effects = self.session.change_scene(scene);
                render::navbar(&self.session.navbar_view());
                self.apply(effects);
            }
            Command::List => {
                let layout = self
                    .layout
                    .as_ref()
                    .filter(|layout| layout.scene == self.session.state().current_scene());
                render::products(self.session.products(), layout);
            }
            Command::Select(id) => self.select(&id),
            Command::Hover(target) => {
                let Some(layout) = self.layout.as_mut() else {
                    render::error("The room is still loading.");
                    return Flow::Continue;
                };
                let events = match target {
                    Some(id) => {
                        let events = layout.hover_enter(&id);
                        if events.is_empty() && layout.hovered() != Some(id.as_str()) {
                            render::error(&format!("Nothing called '{id}' in this room."));
                        }
                        events
                    }
                    None => layout.hover_exit().into_iter().collect(),
                };
                render::hover(&events);
            }
            Command::Back => {
                let effects = self.session.clear_selection();
                self.apply(effects);
            }
            Command::Add => match self.session.add_selected_to_cart() {
                Ok(effects) => {
                    self.apply(effects);
                    render::navbar(&self.session.navbar_view());
                    render::cart(&self.session.cart_view());
                }
                Err(_) => render::error("Select a piece first."),
            },
            Command::Cart => {
                self.session.toggle_cart();
                if self.session.state().is_cart_open() {
                    render::cart(&self.session.cart_view());
                } else {
                    println!("{}", "Cart closed.".bright_black());
                }
            }
            Command::Close => self.session.close_cart(),
            Command::Inc(id) => self.change_quantity(&id, 1),
            Command::Dec(id) => self.change_quantity(&id, -1),
            Command::Remove(id) => {
                if self.session.remove_from_cart(&id) {
                    render::navbar(&self.session.navbar_view());
                }
                self.show_cart_if_open();
            }
            Command::Help => render::help(),
            Command::Quit => return Flow::Quit,
        }

        render::hint(self.session.hint());
        Flow::Continue
    }

    /// Clicks the proxy when the room is laid out, otherwise goes by catalog id.
    fn select(&mut self, id: &str) {
        let clicked = self
            .layout
            .as_ref()
            .filter(|layout| layout.scene == self.session.state().current_scene())
            .and_then(|layout| layout.click(id));

        let result = match clicked {
            Some(ProxyEvent::Click(product)) => Ok(self.session.select(product)),
            _ => self.session.select_product(id),
        };

        match result {
            Ok(effects) => {
                self.apply(effects);
                if let Some(view) = self.session.detail_view() {
                    render::detail(&view);
                }
            }
            Err(err) if err.is_not_found() => {
                render::error(&format!("Nothing called '{id}' in this room."))
            }
            Err(err) => render::error(&err.to_string()),
        }
    }

    fn change_quantity(&mut self, id: &str, delta: i64) {
        if self.session.update_quantity(id, delta) {
            render::navbar(&self.session.navbar_view());
        }
        self.show_cart_if_open();
    }

    fn show_cart_if_open(&self) {
        if self.session.state().is_cart_open() {
            render::cart(&self.session.cart_view());
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::InsightResolved { ticket, text } => {
                if self.session.apply_insight(&ticket, text) {
                    if let Some(view) = self.session.detail_view() {
                        self.notify(render::insight_text(&view.insight));
                    }
                } else {
                    tracing::debug!(
                        "[Aura] Dropped stale insight #{} for '{}'",
                        ticket.seq,
                        ticket.product_id
                    );
                }
            }
            AppEvent::ModelResolved {
                generation,
                product_id,
                visual,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        "[Aura] Dropped model for '{}' from an earlier scene load",
                        product_id
                    );
                    return;
                }
                let Some(layout) = self.layout.as_mut() else {
                    return;
                };
                if !layout.apply_model(&product_id, visual) {
                    return;
                }
                if let Some(proxy) = layout.proxy(&product_id) {
                    let line = render::model_resolved(proxy);
                    self.notify(line);
                }
            }
        }
    }

    /// Prints output that arrives while the prompt may be on screen.
    fn notify(&mut self, text: String) {
        match self.printer.as_mut() {
            Some(printer) => {
                if let Err(err) = printer.print(text) {
                    tracing::warn!("[Aura] External print failed: {}", err);
                }
            }
            None => println!("{text}"),
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Camera(directive) => render::camera(&directive),
                Effect::RequestInsight { ticket, product } => {
                    let service = self.insight.clone();
                    let tx = self.events_tx.clone();
                    tokio::spawn(async move {
                        let text = service.get_insight(&product).await;
                        let _ = tx.send(AppEvent::InsightResolved { ticket, text }).await;
                    });
                }
                Effect::LoadScene(scene) => self.load_scene(scene),
            }
        }
    }

    /// Lays the room out at once and loads each model in its own task.
    fn load_scene(&mut self, scene: SceneType) {
        self.generation += 1;
        let layout = self.presenter.layout(scene, self.session.products());
        render::layout_ready(&layout);

        for product in layout.pending_models() {
            let presenter = self.presenter.clone();
            let tx = self.events_tx.clone();
            let generation = self.generation;
            tokio::spawn(async move {
                let product_id = product.id.clone();
                if let Some(visual) = presenter.resolve_model(product).await {
                    let _ = tx
                        .send(AppEvent::ModelResolved {
                            generation,
                            product_id,
                            visual,
                        })
                        .await;
                }
            });
        }

        self.layout = Some(layout);
    }
}

/// Runs rustyline on its own thread. After each line it waits for the loop to
/// finish handling it, so output and the next prompt do not interleave.
fn spawn_input_thread(
    tx: mpsc::Sender<InputEvent>,
    ready: std_mpsc::Receiver<()>,
    printer_tx: oneshot::Sender<Option<Printer>>,
) -> Result<()> {
    std::thread::Builder::new()
        .name("aura-readline".to_string())
        .spawn(move || {
            let mut rl = match Editor::new() {
                Ok(rl) => rl,
                Err(err) => {
                    eprintln!("{}", format!("Failed to start line editor: {err}").red());
                    let _ = tx.blocking_send(InputEvent::Closed);
                    return;
                }
            };
            rl.set_helper(Some(CliHelper::new()));

            let printer = match rl.create_external_printer() {
                Ok(printer) => Some(Box::new(printer) as Printer),
                Err(err) => {
                    tracing::debug!("[Aura] No external printer, using stdout: {}", err);
                    None
                }
            };
            let _ = printer_tx.send(printer);

            loop {
                match rl.readline(PROMPT) {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            let _ = rl.add_history_entry(line.as_str());
                        }
                        if tx.blocking_send(InputEvent::Line(line)).is_err() {
                            break;
                        }
                        if ready.recv().is_err() {
                            break;
                        }
                    }
                    Err(ReadlineError::Interrupted) => {
                        println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
                    }
                    Err(ReadlineError::Eof) => {
                        let _ = tx.blocking_send(InputEvent::Closed);
                        break;
                    }
                    Err(err) => {
                        eprintln!("{}", format!("Error: {:?}", err).red());
                        let _ = tx.blocking_send(InputEvent::Closed);
                        break;
                    }
                }
            }
        })?;

    Ok(())
}
