//! Keyboard input handling for the player.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::InputResult;
use super::widget::VideoPlayer;

/// Key hints shown in the footer while a video plays.
pub const KEY_HINTS: &[(&str, &str)] = &[("space", "pause"), ("+/-", "speed"), ("q", "quit")];

/// Handle any input event.
pub fn handle_event(event: Event, player: &mut VideoPlayer, now: Instant) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, player, now),
        Event::Resize(_, _) => {
            player.request_render();
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}

/// Handle a keyboard event.
pub fn handle_key_event(key: KeyEvent, player: &mut VideoPlayer, now: Instant) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        KeyCode::Char(' ') | KeyCode::Char('p') => {
            player.toggle_pause(now);
            InputResult::Continue
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            change_speed(player, now, true);
            InputResult::Continue
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            change_speed(player, now, false);
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}

fn change_speed(player: &mut VideoPlayer, now: Instant, faster: bool) {
    let Some(session) = player.session() else {
        return;
    };
    let speed = if faster {
        session.faster()
    } else {
        session.slower()
    };
    if let Err(e) = player.set_speed(speed, now) {
        tracing::warn!("speed change rejected: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::ImageType;
    use crate::player::PlayerOptions;
    use crate::video::TestPattern;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mounted() -> VideoPlayer {
        let mut player = VideoPlayer::with_options(
            PlayerOptions::new("pattern").with_image_type(ImageType::Unicode),
        )
        .unwrap();
        player
            .mount_source(Box::new(TestPattern::new(8, 8, 10.0, 10)), Instant::now())
            .unwrap();
        player
    }

    #[test]
    fn quit_keys() {
        let mut player = mounted();
        let now = Instant::now();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mut player, now), InputResult::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mut player, now), InputResult::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &mut player, now), InputResult::Quit);
    }

    #[test]
    fn plain_c_does_not_quit() {
        let mut player = mounted();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c')), &mut player, Instant::now()),
            InputResult::Continue
        );
    }

    #[test]
    fn space_toggles_pause() {
        let mut player = mounted();
        let now = Instant::now();
        handle_key_event(key(KeyCode::Char(' ')), &mut player, now);
        assert!(player.session().unwrap().paused);
        handle_key_event(key(KeyCode::Char(' ')), &mut player, now);
        assert!(!player.session().unwrap().paused);
    }

    #[test]
    fn plus_and_minus_change_speed() {
        let mut player = mounted();
        let now = Instant::now();
        handle_key_event(key(KeyCode::Char('+')), &mut player, now);
        assert_eq!(player.session().unwrap().speed, 1.5);
        handle_key_event(key(KeyCode::Char('-')), &mut player, now);
        handle_key_event(key(KeyCode::Char('-')), &mut player, now);
        assert!((player.session().unwrap().speed - 1.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn speed_keys_before_mount_are_ignored() {
        let mut player = VideoPlayer::new("clip.mp4");
        handle_key_event(key(KeyCode::Char('+')), &mut player, Instant::now());
        assert_eq!(player.options().speed, 1.0);
    }

    #[test]
    fn resize_requests_render() {
        let mut player = mounted();
        let area = ratatui::layout::Rect::new(0, 0, 10, 5);
        let mut buf = ratatui::buffer::Buffer::empty(area);
        ratatui::widgets::Widget::render(&mut player, area, &mut buf);
        assert!(!player.needs_render());

        handle_event(Event::Resize(80, 24), &mut player, Instant::now());
        assert!(player.needs_render());
    }
}
