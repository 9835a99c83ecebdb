mod clock;
mod export;
mod ui;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

use stopwatch_core::{LapLedger, Stopwatch, SwState};

use crate::clock::Clock;

const EXPORT_PATH: &str = "laps.csv";

// Redraw cadence while the clock is moving; when idle nothing on screen
// changes between keystrokes, so the poll can block much longer.
const RUN_TICK: Duration = Duration::from_millis(100);
const IDLE_TICK: Duration = Duration::from_millis(500);

const HELP_TEXT: &str = "STOPWATCH HELP\n\
    \n\
    space  Start/Pause\n\
    l      Record lap\n\
    r      Reset clock (laps are kept)\n\
    d      Clear laps\n\
    e      Export laps to laps.csv\n\
    Up/Dn  Scroll lap list\n\
    h, ?   This help\n\
    q      Quit";

struct StopwatchApp {
    clock: Clock,
    stopwatch: Stopwatch,
    laps: LapLedger,
    lap_scroll_offset: usize,
    help_visible: bool,
    status: Option<String>,
    quit: bool,
}

impl StopwatchApp {
    fn new() -> Self {
        Self {
            clock: Clock::new(),
            stopwatch: Stopwatch::new(),
            laps: LapLedger::new(),
            lap_scroll_offset: 0,
            help_visible: false,
            status: None,
            quit: false,
        }
    }

    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn redraw(&self, out: &mut impl Write) -> io::Result<()> {
        let size = terminal::size()?;
        if self.help_visible {
            return ui::draw_help(out, size, HELP_TEXT);
        }
        ui::draw_stopwatch(
            out,
            size,
            &self.stopwatch,
            self.laps.entries(),
            self.lap_scroll_offset,
            self.status.as_deref(),
            self.now_ms(),
        )
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Any key dismisses the help screen
        if self.help_visible {
            self.help_visible = false;
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        self.status = None;
        match key.code {
            KeyCode::Char(' ') => self.toggle_run(),
            KeyCode::Char('l') => self.record_lap(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('d') | KeyCode::Delete => self.clear_laps(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.help_visible = true,
            KeyCode::Up => {
                if self.lap_scroll_offset + 1 < self.laps.len() {
                    self.lap_scroll_offset += 1;
                }
            }
            KeyCode::Down => {
                self.lap_scroll_offset = self.lap_scroll_offset.saturating_sub(1);
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn toggle_run(&mut self) {
        let now = self.now_ms();
        match self.stopwatch.state {
            SwState::Stopped | SwState::Paused => {
                self.stopwatch.start(now);
                log::debug!("started at {} ms", now);
            }
            SwState::Running => {
                self.stopwatch.pause(now);
                log::debug!("paused, elapsed {} ms", self.stopwatch.elapsed_ms(now));
            }
        }
    }

    // Laps may be recorded in any state; a paused stopwatch yields a
    // zero-length split, which the ledger accepts.
    fn record_lap(&mut self) {
        let elapsed = self.stopwatch.elapsed_ms(self.now_ms());
        let entry = self.laps.record(elapsed);
        self.lap_scroll_offset = 0;
        log::debug!("lap {}: split {} ms, total {} ms", entry.index, entry.lap_ms, entry.total_ms);
    }

    // Reset zeroes the clock but keeps recorded laps; clearing the
    // ledger is its own operation.
    fn reset(&mut self) {
        self.stopwatch.reset();
        log::debug!("reset");
    }

    fn clear_laps(&mut self) {
        self.laps.clear();
        self.lap_scroll_offset = 0;
    }

    fn export(&mut self) {
        if self.laps.is_empty() {
            return;
        }
        // stderr shares the screen while raw mode is active, so in-session
        // logs stay at debug; the status line is the user-facing report.
        match export::export_csv(EXPORT_PATH, self.laps.entries()) {
            Ok(()) => {
                log::debug!("exported {} laps to {}", self.laps.len(), EXPORT_PATH);
                self.status = Some(format!(
                    "Exported {} laps to {}",
                    self.laps.len(),
                    EXPORT_PATH
                ));
            }
            Err(e) => {
                log::debug!("failed to export laps: {}", e);
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }
}

fn run(app: &mut StopwatchApp, out: &mut impl Write) -> io::Result<()> {
    while !app.quit {
        app.redraw(out)?;

        let timeout = if app.stopwatch.is_running() {
            RUN_TICK
        } else {
            IDLE_TICK
        };
        // Poll expiry is the redraw tick; key events arrive through the
        // same call, so there is no callback handle to cancel.
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {} // Resize is picked up on the next redraw
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("stopwatch starting");

    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let mut app = StopwatchApp::new();
    let result = run(&mut app, &mut out);

    // Restore the terminal on every exit path before surfacing errors.
    execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;
    Ok(())
}
