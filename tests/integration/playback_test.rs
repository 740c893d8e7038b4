//! End-to-end playback scenarios against the library API.

use std::time::Duration;

use logplay::{
    CommandOutcome, Frame, FrameBuffer, MatchLog, MemoryBuffer, PlaybackController, PlayerConfig,
};

use crate::helpers::SAMPLE_LOG;

#[test]
fn loaded_log_plays_to_the_end_and_schedules_quit() {
    let mut config = PlayerConfig::default();
    config.auto_quit = true;

    let mut buffer = MatchLog::parse_str(SAMPLE_LOG).unwrap().into_buffer();
    assert!(buffer.terminal_reached());

    let mut player = PlaybackController::new(&config);
    player.play_forward(&config);

    let mut updates = 0;
    loop {
        match player.handle_timer(&mut buffer, &config) {
            CommandOutcome::Updated => updates += 1,
            CommandOutcome::Unchanged => break,
        }
    }

    // 5 frames starting at index 0: four successful steps.
    assert_eq!(updates, 4);
    assert_eq!(buffer.current_index(), 4);
    assert!(!player.is_playing());
    assert!(player.quit_scheduled());
}

#[test]
fn live_capture_throttles_until_the_cushion_fills() {
    let mut config = PlayerConfig::default();
    config.cache_size = 4;

    let mut buffer = MemoryBuffer::new();
    let mut player = PlaybackController::new(&config);

    // Nothing buffered yet: the data-arrival path cannot start
    // playback.
    player.start_timer(&buffer, &config);
    assert!(!player.is_playing());

    // First frames trickle in; playback starts slowed down while the
    // cushion builds.
    for c in 0..3 {
        buffer.push(Frame::new(c, format!("cycle {}", c)));
    }
    player.start_timer(&buffer, &config);
    assert!(player.is_playing());

    player.handle_timer(&mut buffer, &config);
    assert!(!player.is_cache_primed());
    assert_eq!(player.interval(), Duration::from_millis(500));

    // The producer gets far enough ahead: full rate.
    for c in 3..10 {
        buffer.push(Frame::new(c, format!("cycle {}", c)));
    }
    player.handle_timer(&mut buffer, &config);
    assert!(player.is_cache_primed());
    assert_eq!(player.interval(), Duration::from_millis(100));

    // The producer stalls; playback eats into the cushion until the
    // throttle engages.
    let mut throttled = false;
    for _ in 0..10 {
        if player.handle_timer(&mut buffer, &config) == CommandOutcome::Unchanged {
            break;
        }
        if player.is_catching_up() {
            throttled = true;
            assert_eq!(player.interval(), Duration::from_millis(110));
            break;
        }
    }
    assert!(throttled);

    // Fresh frames recover the cushion fully: throttle releases.
    let next = buffer.len() as u32;
    for c in next..next + 8 {
        buffer.push(Frame::new(c, format!("cycle {}", c)));
    }
    player.handle_timer(&mut buffer, &config);
    assert!(!player.is_catching_up());
    assert_eq!(player.interval(), Duration::from_millis(100));
}

#[test]
fn exhausted_live_buffer_waits_for_new_data() {
    let config = PlayerConfig::default();

    let mut buffer = MemoryBuffer::new();
    buffer.push(Frame::new(0, "kickoff"));

    let mut player = PlaybackController::new(&config);
    player.play_forward(&config);

    // Only one frame: the first tick hits the boundary and playback
    // stops without scheduling a quit (no terminal state).
    assert_eq!(
        player.handle_timer(&mut buffer, &config),
        CommandOutcome::Unchanged
    );
    assert!(!player.is_playing());
    assert!(!player.quit_scheduled());

    // New data arrives; the arrival path restarts the timer.
    buffer.push(Frame::new(1, "play on"));
    player.start_timer(&buffer, &config);
    assert!(player.is_playing());
    assert_eq!(
        player.handle_timer(&mut buffer, &config),
        CommandOutcome::Updated
    );
    assert_eq!(buffer.current_index(), 1);
}

#[test]
fn scrubbing_during_playback_keeps_the_timer_running() {
    let config = PlayerConfig::default();
    let mut buffer = MemoryBuffer::new();
    for c in 0..50 {
        buffer.push(Frame::new(c, format!("cycle {}", c)));
    }

    let mut player = PlaybackController::new(&config);
    player.play_forward(&config);

    assert_eq!(player.go_to_cycle(&mut buffer, 30), CommandOutcome::Updated);
    assert_eq!(buffer.current_index(), 30);
    assert!(player.is_playing());

    assert_eq!(
        player.handle_timer(&mut buffer, &config),
        CommandOutcome::Updated
    );
    assert_eq!(buffer.current_index(), 31);
}
