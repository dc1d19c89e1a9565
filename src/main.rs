mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use riptide::entities::WorldContext;
use riptide::input::{InputState, Key};
use riptide::session::GameSession;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// World dimensions in pixels; 700×500 is the widescreen variant.
const WORLD_WIDTH: f32 = 500.0;
const WORLD_HEIGHT: f32 = 500.0;

/// A key is considered "held" if its last press/repeat event arrived
/// within this many frames.  Covers terminals that don't emit
/// key-release events: the OS key-repeat rate is ≥ 15 Hz, so a window
/// of 4 frames (≈133 ms) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Title screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_title<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "≈≈≈  R I P T I D E  ≈≈≈";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Outscore the deep before time runs out!"))?;

    // Enemy legend
    let legend: &[(&str, Color, &str)] = &[
        ("<(o)≡", Color::Green,  "  Angler      — 2 hits, 2 points"),
        ("<{@}=", Color::Red,    "  Big Angler  — 3 hits, 3 points"),
        ("<($)~", Color::Yellow, "  Lucky Fish  — ram it for a power-up!"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("↑ ↓ / W S : Move   SPACE : Shoot   D : Debug   Q : Quit"))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Press ENTER to dive in"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to title (restart).
///
/// Input model: instead of acting on each key event individually, we
/// maintain a `key_frame` map that records the frame number of the
/// last press/repeat event for every key.  Each frame the fresh keys
/// are folded into an `InputState` the session reads.  Fire and the
/// debug toggle stay edge-triggered: they run once per press event,
/// routed straight to the session.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames
///   of silence, which is shorter than the OS repeat interval, so the key
///   stays live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut input = InputState::new();
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        // Wall-clock gap between frames, in milliseconds.
        let delta = frame_start.duration_since(last_frame).as_secs_f32() * 1000.0;
        last_frame = frame_start;
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if session.game_over => {
                            return Ok(false);
                        }
                        KeyCode::Char(' ') => session.fire(),
                        KeyCode::Char('d') | KeyCode::Char('D') => session.toggle_debug(),
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Fold held keys into the session's input state ─────────────────────
        input.clear();
        if is_held(&key_frame, &KeyCode::Up, frame)
            || is_held(&key_frame, &KeyCode::Char('w'), frame)
            || is_held(&key_frame, &KeyCode::Char('W'), frame)
        {
            input.press(Key::MoveUp);
        }
        if is_held(&key_frame, &KeyCode::Down, frame)
            || is_held(&key_frame, &KeyCode::Char('s'), frame)
            || is_held(&key_frame, &KeyCode::Char('S'), frame)
        {
            input.press(Key::MoveDown);
        }

        // One advance + one render per frame; the renderer always sees
        // the fully settled post-advance state.
        session.advance(&input, delta, &mut rng);
        display::render(out, session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        match show_title(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let world = WorldContext::new(WORLD_WIDTH, WORLD_HEIGHT);
                let mut session = GameSession::new(world);
                let quit = game_loop(out, &mut session, rx)?;
                if quit {
                    break;
                }
                // Otherwise loop back to the title screen
            }
        }
    }
    Ok(())
}
