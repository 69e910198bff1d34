mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use escaperoom::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::SessionController,
    decoration::Decorations,
    guard::{is_refresh_key, RefreshGuard, REFRESH_WARNING},
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::{Outcome, SessionConfig, SessionState},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    sync::mpsc::Receiver,
};
use tracing::{info, warn};

/// festive escape room countdown for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A festive escape room countdown. Start the 90 minute timer, then type the password before time runs out to save Xmas."
)]
pub struct Cli {
    /// session length in seconds (default: 5400, i.e. 90 minutes)
    #[clap(short = 'd', long)]
    duration_secs: Option<u64>,

    /// password that unlocks the room
    #[clap(long)]
    password: Option<String>,

    /// disable the falling particle background
    #[clap(long)]
    no_particles: bool,

    /// read settings from this file instead of the default config location
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the config file
    fn merge_into_config(&self, mut cfg: Config) -> Config {
        if let Some(secs) = self.duration_secs {
            cfg.duration_secs = secs;
        }
        if let Some(password) = &self.password {
            cfg.secret = password.clone();
        }
        if self.no_particles {
            cfg.particles = false;
        }
        cfg
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub controller: SessionController,
    /// Latest snapshot received from the controller
    pub snapshot: SessionState,
    snapshots: Receiver<SessionState>,
    pub guard: RefreshGuard,
    pub decorations: Decorations,
    pub warning: Option<&'static str>,
    /// UI ticks since launch, drives the success glow
    pub frame: u64,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut controller = SessionController::new(SessionConfig::from(config));
        let snapshots = controller.subscribe();
        let snapshot = snapshots.try_recv().unwrap_or_default();

        Self {
            controller,
            snapshot,
            snapshots,
            guard: RefreshGuard::new(),
            decorations: Decorations::new(config.particles, config.particle_count),
            warning: None,
            frame: 0,
        }
    }

    /// Pull pending snapshots. Returns true if anything changed.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        while let Ok(snapshot) = self.snapshots.try_recv() {
            self.snapshot = snapshot;
            changed = true;
        }
        self.guard.sync(self.snapshot.running);
        changed
    }

    /// Advance timers and decorations by one UI tick. Returns true if a redraw is due.
    pub fn on_tick(&mut self, width: u16, height: u16) -> bool {
        self.controller.poll();
        let changed = self.sync();

        self.frame = self.frame.wrapping_add(1);
        self.decorations
            .update(self.snapshot.outcome == Outcome::Success, width, height);

        changed || self.decorations.field.is_some() || self.decorations.snow.is_active
    }

    /// Equivalent of reloading the page
    pub fn reload(&mut self) {
        self.controller.restart();
        self.warning = None;
        self.decorations.snow.set_active(false);
        self.sync();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
            self.controller.teardown();
            return Flow::Quit;
        }

        // Any key dismisses the warning, like an alert box
        if self.warning.take().is_some() {
            return Flow::Continue;
        }

        if is_refresh_key(&key) {
            if self.guard.intercepts(&key) {
                warn!("refresh blocked while timer is running");
                self.warning = Some(REFRESH_WARNING);
            } else {
                info!("reload requested");
                self.reload();
            }
            return Flow::Continue;
        }

        if !self.snapshot.has_started() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('s')) {
                self.controller.start();
            }
        } else if self.snapshot.accepts_input() {
            match key.code {
                KeyCode::Enter => {
                    self.controller.submit_password();
                }
                KeyCode::Backspace => {
                    let mut text = self.controller.state().password_input.clone();
                    text.pop();
                    self.controller.set_password_input(text);
                }
                KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                    let mut text = self.controller.state().password_input.clone();
                    text.push(c);
                    self.controller.set_password_input(text);
                }
                _ => {}
            }
        } else if self.snapshot.show_restart
            && matches!(key.code, KeyCode::Enter | KeyCode::Char('r'))
        {
            self.reload();
        }

        self.sync();
        Flow::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = match logging::init_logging(&AppDirs::log_dir()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: file logging disabled: {err}");
            None
        }
    };

    let store = cli.config_store();
    let config = cli.merge_into_config(store.load());
    info!(
        config = %store.path().display(),
        duration_secs = config.duration_secs,
        particles = config.particles,
        "configuration loaded"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let result = start_tui(&mut terminal, &mut app);
    app.controller.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let redraw = match runner.step() {
            AppEvent::Tick => {
                let size = terminal.size()?;
                app.on_tick(size.width, size.height)
            }
            AppEvent::Resize => true,
            AppEvent::Closed => {
                warn!("terminal input closed, quitting");
                app.controller.teardown();
                break;
            }
            AppEvent::Key(key) => match app.handle_key(key) {
                Flow::Quit => break,
                Flow::Continue => true,
            },
        };

        if redraw {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    Ok(())
}
