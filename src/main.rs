use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::KeyEventKind,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{info, warn};

use turnclock::{
    app::{App, AppAction},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    roster::{MAX_PLAYERS, MIN_PLAYERS},
    rotation::RotationMode,
    runtime::{CrosstermEventSource, FixedTicker, Runner, Ticker, TimerEvent, TimerEventSource},
    session::SessionConfig,
};

/// board game turn timer with per-player clocks
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A board game turn timer for the terminal. Tracks how long every player spends on their turns and passes the turn clockwise, anticlockwise or by hand."
)]
pub struct Cli {
    /// number of players at the table (2-8)
    #[clap(short = 'p', long, value_parser = clap::value_parser!(u8).range(2..=8))]
    players: Option<u8>,

    /// comma separated player names, in seating order
    #[clap(short = 'n', long, value_delimiter = ',')]
    names: Vec<String>,

    /// how the turn moves round the table
    #[clap(short = 'm', long, value_enum)]
    mode: Option<RotationMode>,

    /// write logs here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// ignore the saved table setup
    #[clap(long)]
    no_config: bool,
}

impl Cli {
    /// Merge CLI flags over the saved table setup.
    fn session_config(&self, saved: &Config) -> SessionConfig {
        let mut config = saved.to_session_config();
        if !self.names.is_empty() {
            config.names = self.names.clone();
            config.number_of_players = self.names.len().clamp(MIN_PLAYERS, MAX_PLAYERS);
        }
        if let Some(players) = self.players {
            config.number_of_players = usize::from(players);
        }
        if let Some(mode) = self.mode {
            config.rotation_mode = mode;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_warning = cli
        .log_file
        .clone()
        .or_else(AppDirs::log_path)
        .and_then(|path| logging::init_file_logging(&path).err())
        .map(|err| format!("Logging disabled: {err}"));

    let store = FileConfigStore::new();
    let saved = if cli.no_config {
        Config::default()
    } else {
        store.load()
    };
    let mut app = App::new(&cli.session_config(&saved));
    app.status = log_warning;
    info!(
        players = app.session.players().len(),
        mode = %app.session.rotation_mode(),
        "turnclock starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::one_second());
    let result = start_tui(&mut terminal, &mut app, &mut runner, &store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: TimerEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
    store: &impl ConfigStore,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        // the tick schedule only exists while the clock runs
        runner.set_armed(app.session.is_running());

        match runner.step() {
            TimerEvent::Tick => app.on_tick(),
            TimerEvent::Idle => continue,
            TimerEvent::Resize => {}
            TimerEvent::Closed => break,
            TimerEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let active = app.session.active_index();
                match app.handle_key(key) {
                    AppAction::Quit => break,
                    AppAction::SaveSetup => save_setup(app, store),
                    AppAction::Continue => {}
                }
                // a new turn starts its first second from scratch
                if app.session.active_index() != active {
                    runner.rearm();
                }
            }
        }

        terminal.draw(|f| ui(app, f))?;
    }

    runner.set_armed(false);
    info!(total_secs = app.session.total_secs(), "turnclock exiting");
    Ok(())
}

fn save_setup(app: &mut App, store: &impl ConfigStore) {
    match store.save(&Config::from(&app.session)) {
        Ok(()) => app.status = Some("Table setup saved".to_string()),
        Err(err) => {
            warn!(%err, "saving table setup failed");
            app.status = Some(format!("Could not save setup: {err}"));
        }
    }
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::{sync::mpsc, time::Duration};
    use turnclock::runtime::TestEventSource;

    fn key(c: char) -> TimerEvent {
        TimerEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["turnclock"]);

        assert_eq!(cli.players, None);
        assert!(cli.names.is_empty());
        assert_eq!(cli.mode, None);
        assert_eq!(cli.log_file, None);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_cli_players_range() {
        let cli = Cli::parse_from(["turnclock", "-p", "5"]);
        assert_eq!(cli.players, Some(5));

        assert!(Cli::try_parse_from(["turnclock", "--players", "1"]).is_err());
        assert!(Cli::try_parse_from(["turnclock", "--players", "9"]).is_err());
    }

    #[test]
    fn test_cli_names_split_on_commas() {
        let cli = Cli::parse_from(["turnclock", "-n", "Ann,Bob,Cy"]);
        assert_eq!(cli.names, vec!["Ann", "Bob", "Cy"]);
    }

    #[test]
    fn test_cli_mode() {
        let cli = Cli::parse_from(["turnclock", "-m", "anticlockwise"]);
        assert_eq!(cli.mode, Some(RotationMode::Anticlockwise));

        let cli = Cli::parse_from(["turnclock", "--mode", "manual"]);
        assert_eq!(cli.mode, Some(RotationMode::Manual));

        assert!(Cli::try_parse_from(["turnclock", "--mode", "sideways"]).is_err());
    }

    #[test]
    fn test_session_config_uses_saved_setup() {
        let cli = Cli::parse_from(["turnclock"]);
        let saved = Config {
            players: 4,
            names: vec!["Ann".into()],
            rotation_mode: RotationMode::Manual,
        };
        let config = cli.session_config(&saved);
        assert_eq!(config.number_of_players, 4);
        assert_eq!(config.names, vec!["Ann"]);
        assert_eq!(config.rotation_mode, RotationMode::Manual);
    }

    #[test]
    fn test_session_config_flags_override_saved_setup() {
        let cli = Cli::parse_from(["turnclock", "-n", "X,Y,Z", "-m", "clockwise"]);
        let saved = Config {
            players: 6,
            names: Vec::new(),
            rotation_mode: RotationMode::Manual,
        };
        let config = cli.session_config(&saved);
        assert_eq!(config.number_of_players, 3);
        assert_eq!(config.rotation_mode, RotationMode::Clockwise);

        let cli = Cli::parse_from(["turnclock", "-n", "X,Y,Z", "-p", "5"]);
        assert_eq!(cli.session_config(&saved).number_of_players, 5);
    }

    #[test]
    fn test_save_setup_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut app = App::default();
        save_setup(&mut app, &store);
        assert_eq!(app.status.as_deref(), Some("Table setup saved"));

        // a directory in the way of the file makes the write fail
        let blocked = FileConfigStore::with_path(dir.path());
        save_setup(&mut app, &blocked);
        assert!(app
            .status
            .as_deref()
            .is_some_and(|s| s.starts_with("Could not save setup")));
    }

    #[test]
    fn test_ui_function_renders() {
        let app = App::default();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Player 1"));
    }

    #[test]
    fn test_start_tui_quits_on_q() {
        let (tx, rx) = mpsc::channel();
        tx.send(key(' ')).unwrap();
        tx.send(key('n')).unwrap();
        tx.send(key('q')).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_secs(60)),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::default();

        start_tui(&mut terminal, &mut app, &mut runner, &store).unwrap();

        assert!(app.session.is_running());
        assert_eq!(app.session.active_index(), 1);
        assert!(!runner.is_armed());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn test_start_tui_restarts_tick_on_turn_change() {
        // ticks every 400ms; the turn passes at ~300ms and the game ends at
        // ~450ms, before a full interval has run for the second player
        let (tx, rx) = mpsc::channel();
        let feeder = std::thread::spawn(move || {
            tx.send(key(' ')).unwrap();
            std::thread::sleep(Duration::from_millis(300));
            tx.send(key('n')).unwrap();
            std::thread::sleep(Duration::from_millis(150));
            tx.send(key('q')).unwrap();
        });

        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(400)),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::default();

        start_tui(&mut terminal, &mut app, &mut runner, &store).unwrap();
        feeder.join().unwrap();

        assert_eq!(app.session.active_index(), 1);
        assert_eq!(app.session.players()[0].accumulated_secs(), 0);
        assert_eq!(app.session.players()[0].turn_count(), 1);
        assert_eq!(app.session.current_turn_secs(), 0);
        assert_eq!(app.session.total_secs(), 0);
    }

    #[test]
    fn test_start_tui_exits_when_source_closes() {
        let (tx, rx) = mpsc::channel::<TimerEvent>();
        drop(tx);
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::default();

        start_tui(&mut terminal, &mut app, &mut runner, &store).unwrap();
    }

    #[test]
    fn test_start_tui_saves_setup() {
        let (tx, rx) = mpsc::channel();
        tx.send(key('a')).unwrap();
        tx.send(key('u')).unwrap();
        tx.send(key('s')).unwrap();
        tx.send(key('q')).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_secs(60)),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::default();

        start_tui(&mut terminal, &mut app, &mut runner, &store).unwrap();

        let saved = store.load();
        assert_eq!(saved.players, 3);
        assert_eq!(saved.rotation_mode, RotationMode::Manual);
        assert_eq!(saved.names, vec!["Player 1", "Player 2", "Player 3"]);
    }
}
