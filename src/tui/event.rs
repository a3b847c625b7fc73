use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use crate::core::surface::{BarSide, MenuSide};

/// Demo shell input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Show,
    Next,
    Prev,
    Clear,
    OpenModal,
    CloseModal,
    ToggleMenu(MenuSide),
    ToggleStatusBar(BarSide),
    Click(u16, u16), // column, row
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('s')) => Some(TuiEvent::Show),
                (_, KeyCode::Char('n')) | (_, KeyCode::Right) => Some(TuiEvent::Next),
                (_, KeyCode::Char('p')) | (_, KeyCode::Left) => Some(TuiEvent::Prev),
                (_, KeyCode::Char('x')) => Some(TuiEvent::Clear),
                (_, KeyCode::Char('o')) => Some(TuiEvent::OpenModal),
                (_, KeyCode::Char('c')) => Some(TuiEvent::CloseModal),
                (_, KeyCode::Char('m')) => Some(TuiEvent::ToggleMenu(MenuSide::Left)),
                (_, KeyCode::Char('M')) => Some(TuiEvent::ToggleMenu(MenuSide::Right)),
                (_, KeyCode::Char('b')) => Some(TuiEvent::ToggleStatusBar(BarSide::Top)),
                (_, KeyCode::Char('B')) => Some(TuiEvent::ToggleStatusBar(BarSide::Bottom)),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::Click(mouse_event.column, mouse_event.row))
            }
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_event(key(KeyCode::Char('n'))), Some(TuiEvent::Next));
        assert_eq!(map_event(key(KeyCode::Left)), Some(TuiEvent::Prev));
        assert_eq!(map_event(key(KeyCode::Char('o'))), Some(TuiEvent::OpenModal));
        assert_eq!(
            map_event(key(KeyCode::Char('M'))),
            Some(TuiEvent::ToggleMenu(MenuSide::Right))
        );
        assert_eq!(
            map_event(key(KeyCode::Char('B'))),
            Some(TuiEvent::ToggleStatusBar(BarSide::Bottom))
        );
        assert_eq!(map_event(key(KeyCode::Esc)), Some(TuiEvent::Quit));
        assert_eq!(map_event(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(event), Some(TuiEvent::Quit));
    }

    #[test]
    fn test_left_click_maps_to_click() {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(event), Some(TuiEvent::Click(7, 3)));
    }
}
