//! The hosting shell: terminal lifecycle, the event channel, and effect
//! execution around the pure reducer.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use spoterm_remote::api::SpotifyClient;
use spoterm_remote::launcher;

use crate::event::{Effect, Event};
use crate::executor::Executor;
use crate::model::Model;
use crate::theme::Palette;
use crate::update::{init_effects, update, STATUS_CLEAR_SECS};
use crate::view;

pub struct App {
    client: Arc<SpotifyClient>,
    palette: Palette,
    model: Model,
    should_quit: bool,
}

impl App {
    pub fn new(client: Arc<SpotifyClient>, palette: Palette) -> Self {
        Self {
            client,
            palette,
            model: Model::new(),
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let size = terminal.size()?;
        self.model.dims.width = size.width;
        self.model.dims.height = size.height;

        let (tx, mut rx) = mpsc::channel::<Event>(1024);
        let executor = Executor::new(Arc::clone(&self.client), tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    let msg = match ev {
                        TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                            Event::Key(key)
                        }
                        TermEvent::Mouse(mouse) => Event::Mouse(mouse),
                        TermEvent::Resize(width, height) => Event::Resize(width, height),
                        _ => continue,
                    };
                    if event_tx.blocking_send(msg).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        info!("controller started");
        self.apply_effects(init_effects(), &executor, &tx);

        // ── Main loop ─────────────────────────────────────────────────────────
        loop {
            terminal.draw(|f| view::draw(f, &self.model, &self.palette))?;
            if self.should_quit {
                break;
            }

            let Some(event) = rx.recv().await else { break };
            let effects = update(&mut self.model, event);
            self.apply_effects(effects, &executor, &tx);
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn apply_effects(
        &mut self,
        effects: Vec<Effect>,
        executor: &Executor,
        tx: &mpsc::Sender<Event>,
    ) {
        for effect in effects {
            match effect {
                Effect::Run(command) => executor.run(command),
                Effect::Refresh => executor.refresh(),

                Effect::ScheduleTick(rate) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_millis(rate.millis())).await;
                        let _ = tx.send(Event::Tick).await;
                    });
                }

                Effect::ClearStatusAfter(seq) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(STATUS_CLEAR_SECS)).await;
                        let _ = tx.send(Event::ClearStatus(seq)).await;
                    });
                }

                Effect::LaunchPlayer => {
                    tokio::task::spawn_blocking(|| {
                        if let Err(e) = launcher::launch_player() {
                            warn!("could not launch player: {}", e);
                        }
                    });
                }

                Effect::Quit => self.should_quit = true,
            }
        }
    }
}
