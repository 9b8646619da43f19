mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use tracing::{info, warn};

use chicken_chop::compute::{Control, Game, Key};
use chicken_chop::config::{self, Args, Settings};
use chicken_chop::entities::{Level, Viewport};
use chicken_chop::name_store::{FileNameStore, MemoryNameStore, NameStore};
use chicken_chop::telemetry;

use display::CellScale;

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Pointer and key events are drained between frames, then the game advances
/// one frame and is redrawn.  Returns when the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    scale: &CellScale,
    frame: Duration,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind == KeyEventKind::Release {
                        continue;
                    }
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    if let Some(key) = map_key(code) {
                        if game.key(key) == Control::Quit {
                            return Ok(());
                        }
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    let (x, y) = scale.to_world(column, row);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => game.pointer_down(x, y),
                        MouseEventKind::Up(MouseButton::Left) => game.pointer_up(x, y),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        game.frame();
        display::render(out, game, scale)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = config::project_paths()?;
    telemetry::init(&paths.log_path)?;

    let mut settings = Settings::load(&paths.settings_path);
    settings.apply(&args);
    info!(?settings, "starting");

    let names: Box<dyn NameStore> = if args.no_save {
        Box::new(MemoryNameStore::default())
    } else {
        Box::new(FileNameStore::new(paths.name_path))
    };

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                warn!("terminal input closed: {e}");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &settings, names, args.level);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
    names: Box<dyn NameStore>,
    level: Option<u8>,
) -> Result<()> {
    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let scale = CellScale {
        width: settings.cell_width,
        height: settings.cell_height,
    };
    let viewport = Viewport::new(cols as f32 * scale.width, rows as f32 * scale.height);
    let mut game = Game::new(viewport, settings.seed, names);

    if let Some(level) = level.and_then(Level::from_number) {
        game.start_level(level);
    }

    let frame = Duration::from_secs_f64(1.0 / settings.fps_cap.max(1) as f64);
    game_loop(out, &mut game, &scale, frame, rx)?;
    info!(score = game.store.score, "quit");
    Ok(())
}
