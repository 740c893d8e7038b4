//! Interactive terminal host.
//!
//! Single-threaded event loop: waits on terminal input with a timeout
//! derived from the controller's next deadline, feeds key presses to
//! the command surface, and runs playback ticks when the step timer
//! expires. The controller's `Updated` outcomes drive redraws.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};

use crate::buffer::{FrameBuffer, MemoryBuffer, INVALID_INDEX};
use crate::config::PlayerConfig;
use crate::player::controller::{CommandOutcome, Direction, PlaybackController};

/// Upper bound on the event-poll wait so the status line stays fresh
/// even while fully idle.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// How far PageUp/PageDown scrub, in frames.
const PAGE_STEP: usize = 50;

/// Result of processing one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputResult {
    Continue,
    Redraw,
    Quit,
}

/// Run the interactive player until quit.
pub fn run(buffer: &mut MemoryBuffer, config: &PlayerConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = run_loop(&mut stdout, buffer, config);

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run_loop(
    stdout: &mut io::Stdout,
    buffer: &mut MemoryBuffer,
    config: &PlayerConfig,
) -> Result<()> {
    let mut player = PlaybackController::new(config);
    // Digits typed so far for a go-to-cycle entry; `Some` while the
    // prompt is open.
    let mut cycle_entry: Option<String> = None;

    render(stdout, buffer, &player, cycle_entry.as_deref())?;

    loop {
        let timeout = player
            .next_deadline_in()
            .map(|d| d.min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);

        let mut redraw = false;

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    match handle_key(key, &mut player, buffer, config, &mut cycle_entry) {
                        InputResult::Quit => return Ok(()),
                        InputResult::Redraw => redraw = true,
                        InputResult::Continue => {}
                    }
                }
                Event::Resize(..) => redraw = true,
                _ => {}
            }
        }

        if player.poll_tick(buffer, config) == CommandOutcome::Updated {
            redraw = true;
        }

        if player.quit_due() {
            return Ok(());
        }

        if redraw {
            render(stdout, buffer, &player, cycle_entry.as_deref())?;
        }
    }
}

/// Map one key press onto the playback command surface.
fn handle_key(
    key: KeyEvent,
    player: &mut PlaybackController,
    buffer: &mut MemoryBuffer,
    config: &PlayerConfig,
    cycle_entry: &mut Option<String>,
) -> InputResult {
    // An open go-to-cycle prompt captures digits, Enter, and Esc.
    if let Some(entry) = cycle_entry.as_mut() {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                entry.push(c);
                InputResult::Redraw
            }
            KeyCode::Backspace => {
                entry.pop();
                InputResult::Redraw
            }
            KeyCode::Enter => {
                if let Ok(cycle) = entry.parse::<u32>() {
                    player.go_to_cycle(buffer, cycle);
                }
                *cycle_entry = None;
                InputResult::Redraw
            }
            KeyCode::Esc => {
                *cycle_entry = None;
                InputResult::Redraw
            }
            _ => InputResult::Continue,
        }
    } else {
        match key.code {
            // === Quit ===
            KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputResult::Quit
            }

            // === Single stepping ===
            KeyCode::Right => outcome_result(player.step_forward(buffer, config)),
            KeyCode::Left => outcome_result(player.step_back(buffer)),

            // === Continuous playback ===
            KeyCode::Char(' ') => {
                player.play_or_stop(config);
                InputResult::Redraw
            }
            KeyCode::Char('p') => {
                player.play_forward(config);
                InputResult::Redraw
            }
            KeyCode::Char('b') => {
                player.play_back(config);
                InputResult::Redraw
            }
            KeyCode::Char('s') => {
                player.stop();
                InputResult::Redraw
            }

            // === Speed ===
            KeyCode::Char('+') | KeyCode::Char('=') => {
                player.accelerate();
                InputResult::Redraw
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                player.decelerate();
                InputResult::Redraw
            }
            KeyCode::Char(']') => {
                player.accelerate_forward(config);
                InputResult::Redraw
            }
            KeyCode::Char('[') => {
                player.accelerate_back(config);
                InputResult::Redraw
            }

            // === Absolute positioning ===
            KeyCode::Home => outcome_result(player.go_to_first(buffer)),
            KeyCode::End => outcome_result(player.go_to_last(buffer)),
            KeyCode::PageDown => {
                let target = current_or_zero(buffer).saturating_add(PAGE_STEP);
                let target = target.min(buffer.len().saturating_sub(1));
                outcome_result(player.go_to_index(buffer, target))
            }
            KeyCode::PageUp => {
                let target = current_or_zero(buffer).saturating_sub(PAGE_STEP);
                outcome_result(player.go_to_index(buffer, target))
            }
            KeyCode::Char('g') => {
                *cycle_entry = Some(String::new());
                InputResult::Redraw
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                *cycle_entry = Some(c.to_string());
                InputResult::Redraw
            }

            // === Live display ===
            KeyCode::Char('v') => outcome_result(player.show_live(buffer, config)),
            KeyCode::Char('l') => {
                player.set_live_mode(buffer);
                InputResult::Redraw
            }

            _ => InputResult::Continue,
        }
    }
}

fn outcome_result(outcome: CommandOutcome) -> InputResult {
    match outcome {
        CommandOutcome::Updated => InputResult::Redraw,
        CommandOutcome::Unchanged => InputResult::Continue,
    }
}

fn current_or_zero(buffer: &impl FrameBuffer) -> usize {
    let current = buffer.current_index();
    if current == INVALID_INDEX {
        0
    } else {
        current
    }
}

/// Redraw the whole screen: frame body on top, status line at the
/// bottom.
fn render(
    stdout: &mut io::Stdout,
    buffer: &MemoryBuffer,
    player: &PlaybackController,
    cycle_entry: Option<&str>,
) -> Result<()> {
    const RESET: &str = "\x1b[0m";
    const DIM: &str = "\x1b[90m";

    let mut output = String::with_capacity(1024);
    output.push_str("\x1b[2J\x1b[H"); // clear + home

    match buffer.current_frame() {
        Some(frame) => {
            output.push_str(&format!("{}cycle {}{}\r\n\r\n", DIM, frame.cycle, RESET));
            for line in frame.body.lines() {
                output.push_str(line);
                output.push_str("\r\n");
            }
        }
        None => {
            output.push_str(&format!("{}(no frames){}\r\n", DIM, RESET));
        }
    }

    output.push_str("\r\n");
    output.push_str(&status_line(buffer, player, cycle_entry));
    output.push_str("\r\n");

    write!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}

fn status_line(
    buffer: &MemoryBuffer,
    player: &PlaybackController,
    cycle_entry: Option<&str>,
) -> String {
    const RESET: &str = "\x1b[0m";
    const CYAN: &str = "\x1b[36m";
    const YELLOW: &str = "\x1b[33m";
    const GREEN: &str = "\x1b[32m";

    let state = if player.is_live_mode() {
        "LIVE"
    } else if player.is_playing() {
        match player.direction() {
            Direction::Forward => "PLAY>",
            Direction::Backward => "<PLAY",
        }
    } else {
        "STOP"
    };

    let position = if buffer.current_index() == INVALID_INDEX {
        format!("-/{}", buffer.len())
    } else {
        format!("{}/{}", buffer.current_index() + 1, buffer.len())
    };

    let mut line = format!(
        "{}{}{} {} {}{} ms{}",
        GREEN,
        state,
        RESET,
        position,
        CYAN,
        player.interval().as_millis(),
        RESET,
    );

    if player.is_catching_up() {
        line.push_str(&format!(" {}buffering{}", YELLOW, RESET));
    }
    if player.quit_scheduled() {
        line.push_str(&format!(" {}quitting{}", YELLOW, RESET));
    }
    if let Some(entry) = cycle_entry {
        line.push_str(&format!(" go to cycle: {}_", entry));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Frame;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (PlaybackController, MemoryBuffer, PlayerConfig) {
        let config = PlayerConfig::default();
        let player = PlaybackController::new(&config);
        let mut buf = MemoryBuffer::new();
        for c in 0..100 {
            buf.push(Frame::new(c, format!("frame {}", c)));
        }
        (player, buf, config)
    }

    #[test]
    fn q_quits() {
        let (mut player, mut buf, config) = setup();
        let mut entry = None;
        let result = handle_key(key(KeyCode::Char('q')), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(result, InputResult::Quit);
    }

    #[test]
    fn space_toggles_playback() {
        let (mut player, mut buf, config) = setup();
        let mut entry = None;
        handle_key(key(KeyCode::Char(' ')), &mut player, &mut buf, &config, &mut entry);
        assert!(player.is_playing());
        handle_key(key(KeyCode::Char(' ')), &mut player, &mut buf, &config, &mut entry);
        assert!(!player.is_playing());
    }

    #[test]
    fn arrows_step_and_redraw() {
        let (mut player, mut buf, config) = setup();
        let mut entry = None;
        let result = handle_key(key(KeyCode::Right), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(result, InputResult::Redraw);
        assert_eq!(buf.current_index(), 1);
        let result = handle_key(key(KeyCode::Left), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(result, InputResult::Redraw);
        assert_eq!(buf.current_index(), 0);
        // At the first frame, stepping back does nothing.
        let result = handle_key(key(KeyCode::Left), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(result, InputResult::Continue);
    }

    #[test]
    fn page_keys_scrub_with_clamping() {
        let (mut player, mut buf, config) = setup();
        let mut entry = None;
        handle_key(key(KeyCode::PageDown), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(buf.current_index(), 50);
        handle_key(key(KeyCode::PageDown), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(buf.current_index(), 99); // clamped to last
        handle_key(key(KeyCode::PageUp), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(buf.current_index(), 49);
    }

    #[test]
    fn cycle_prompt_collects_digits_and_jumps() {
        let (mut player, mut buf, config) = setup();
        let mut entry = None;

        handle_key(key(KeyCode::Char('g')), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(entry.as_deref(), Some(""));

        handle_key(key(KeyCode::Char('4')), &mut player, &mut buf, &config, &mut entry);
        handle_key(key(KeyCode::Char('2')), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(entry.as_deref(), Some("42"));

        handle_key(key(KeyCode::Enter), &mut player, &mut buf, &config, &mut entry);
        assert!(entry.is_none());
        assert_eq!(buf.current_index(), 42);
    }

    #[test]
    fn bare_digit_opens_cycle_prompt() {
        let (mut player, mut buf, config) = setup();
        let mut entry = None;
        handle_key(key(KeyCode::Char('7')), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(entry.as_deref(), Some("7"));
    }

    #[test]
    fn esc_cancels_cycle_prompt_without_jump() {
        let (mut player, mut buf, config) = setup();
        let mut entry = Some("42".to_string());
        let result = handle_key(key(KeyCode::Esc), &mut player, &mut buf, &config, &mut entry);
        assert_eq!(result, InputResult::Redraw);
        assert!(entry.is_none());
        assert_eq!(buf.current_index(), 0);
    }

    #[test]
    fn status_line_reflects_state() {
        let (mut player, buf, config) = setup();
        assert!(status_line(&buf, &player, None).contains("STOP"));
        player.play_forward(&config);
        assert!(status_line(&buf, &player, None).contains("PLAY>"));
        player.play_back(&config);
        assert!(status_line(&buf, &player, None).contains("<PLAY"));
        assert!(status_line(&buf, &player, Some("12")).contains("go to cycle: 12"));
    }
}
