use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use bingo_caller::audio::open_driver;
use bingo_caller::card::{CardSheet, SHEET_FILE};
use bingo_caller::config::AppConfig;
use bingo_caller::console::{
    Command, HELP, is_confirmation, render_board, render_celebration, render_reveal,
    render_shuffle, render_status, spawn_line_reader,
};
use bingo_caller::game::{AnimationPhase, DrawOrchestrator, Snapshot};
use bingo_caller::state::SavedState;
use bingo_caller::theme::Theme;
use bingo_caller::traits::audio::CueDriver;
use bingo_caller::traits::time::{SessionClock, TimeSource};
use bingo_caller::util::logging::init_logging;

const FRAME: Duration = Duration::from_millis(16);

type Orchestrator = DrawOrchestrator<Box<dyn CueDriver>>;

#[derive(Parser, Debug)]
#[command(name = "bingo-caller", about = "Bingo number caller for the terminal")]
struct Args {
    /// Path to the config JSON file.
    #[arg(long, env = "BINGO_CALLER_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the saved game state.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Also write logs to a daily rotating file in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Disable sound and speech for this session.
    #[arg(long)]
    mute: bool,

    /// Theme for this session (default, christmas).
    #[arg(long)]
    theme: Option<Theme>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(args.log_dir.as_deref(), args.verbose)?;
    info!("bingo-caller starting");

    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load_or_default(&config_path);

    let state_path = args.state.clone().unwrap_or_else(|| config.state_path());
    let saved = SavedState::load_or_default(&state_path);

    let mut session_config = config.clone();
    session_config.theme = args
        .theme
        .or_else(|| state_path.exists().then_some(saved.theme))
        .unwrap_or(config.theme);
    if args.mute {
        session_config.sound_enabled = false;
        session_config.voice_enabled = false;
    }

    let driver = open_driver(&session_config);
    let mut orchestrator: Orchestrator = DrawOrchestrator::new(driver, &session_config);
    orchestrator.restore(saved.to_history());

    let mut session = Session {
        config: &mut config,
        config_path: &config_path,
        state_path: &state_path,
        saved,
        awaiting_reset: false,
    };
    let result = session.run(&mut orchestrator).await;

    orchestrator.shutdown();
    session.persist(&orchestrator.snapshot());
    info!("bingo-caller exiting");
    result
}

struct Session<'a> {
    config: &'a mut AppConfig,
    config_path: &'a Path,
    state_path: &'a Path,
    /// Last state written to disk.
    saved: SavedState,
    awaiting_reset: bool,
}

impl Session<'_> {
    async fn run(&mut self, orchestrator: &mut Orchestrator) -> Result<()> {
        let mut lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));

        let clock = SessionClock::start();
        let mut frame = tokio::time::interval(FRAME);
        frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut shown = orchestrator.snapshot();
        println!("{}", render_status(&shown, orchestrator.settings()));
        if let Some(line) = render_reveal(&shown) {
            println!("{line}");
        }
        println!("Type 'help' for commands, enter to draw.");

        loop {
            tokio::select! {
                _ = frame.tick() => orchestrator.update(clock.now_us()),
                line = lines.recv() => {
                    let Some(line) = line else { break };
                    if !self.handle_line(orchestrator, &line) {
                        break;
                    }
                }
            }

            let snapshot = orchestrator.snapshot();
            if snapshot != shown {
                present(&shown, &snapshot);
                self.persist(&snapshot);
                shown = snapshot;
            }
        }
        Ok(())
    }

    /// Returns false when the session should end.
    fn handle_line(&mut self, orchestrator: &mut Orchestrator, line: &str) -> bool {
        if std::mem::take(&mut self.awaiting_reset) {
            if is_confirmation(line) {
                orchestrator.reset();
                println!("Nieuw spel.");
            } else {
                println!("Reset geannuleerd.");
            }
            return true;
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                return true;
            }
        };

        match command {
            Command::Draw => {
                let snapshot = orchestrator.snapshot();
                if !snapshot.can_draw() && snapshot.phase != AnimationPhase::Shuffling {
                    println!("Alle ballen zijn getrokken.");
                }
                orchestrator.draw();
            }
            Command::Undo => {
                if orchestrator.snapshot().can_undo() {
                    orchestrator.undo();
                } else if orchestrator.phase().is_quiescent() {
                    println!("Nog geen ballen getrokken.");
                }
            }
            Command::Reset => {
                if orchestrator.history().is_empty() && orchestrator.phase().is_quiescent() {
                    println!("Nog geen ballen getrokken.");
                } else {
                    print!("Nieuw spel starten? Alle getrokken ballen worden gewist (y/n) ");
                    let _ = std::io::stdout().flush();
                    self.awaiting_reset = true;
                }
            }
            Command::Theme => {
                orchestrator.toggle_theme();
                self.config.theme = orchestrator.theme();
                self.save_config();
            }
            Command::Phrases => {
                let show = !orchestrator.settings().show_phrases;
                orchestrator.set_show_phrases(show);
                self.config.show_phrases = show;
                self.save_config();
            }
            Command::Sound => {
                let enabled = !orchestrator.settings().sound_enabled;
                orchestrator.set_sound_enabled(enabled);
                self.config.sound_enabled = enabled;
                self.save_config();
            }
            Command::Voice => {
                let enabled = !orchestrator.settings().voice_enabled;
                orchestrator.set_voice_enabled(enabled);
                self.config.voice_enabled = enabled;
                self.save_config();
            }
            Command::Board => print!("{}", render_board(&orchestrator.snapshot())),
            Command::Cards(path) => export_cards(path.unwrap_or_else(|| PathBuf::from(SHEET_FILE))),
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        true
    }

    fn persist(&mut self, snapshot: &Snapshot) {
        let state = SavedState::from_snapshot(snapshot);
        if state == self.saved {
            return;
        }
        match state.save_to(self.state_path) {
            Ok(()) => self.saved = state,
            Err(e) => warn!("Failed to save state: {e:#}"),
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save_to(self.config_path) {
            warn!("Failed to save config: {e:#}");
        }
    }
}

fn present(before: &Snapshot, after: &Snapshot) {
    if after.celebration > before.celebration {
        println!("\n{}", render_celebration(after.theme));
    }
    if let Some(line) = render_shuffle(after) {
        print!("{line}");
        let _ = std::io::stdout().flush();
        return;
    }

    let ball_changed =
        after.history != before.history || after.announcement != before.announcement;
    if after.theme != before.theme {
        println!("Thema: {}", after.theme.title());
    }
    if ball_changed || before.phase == AnimationPhase::Shuffling {
        match render_reveal(after) {
            Some(line) => println!("\n{line}"),
            None => println!("\nNog geen bal."),
        }
    }
}

/// Writes a card sheet off the interactive loop.
fn export_cards(path: PathBuf) {
    tokio::spawn(async move {
        let target = path.clone();
        let written = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::from_entropy();
            CardSheet::generate(&mut rng).write_to(&target)
        })
        .await;
        match written {
            Ok(Ok(())) => {
                info!(path = %path.display(), "Cards written");
                println!("Kaarten opgeslagen in {}", path.display());
            }
            Ok(Err(e)) => warn!("{e:#}"),
            Err(e) => warn!("Card export task failed: {e}"),
        }
    });
}
