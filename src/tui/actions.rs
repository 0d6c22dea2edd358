use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};

#[derive(Debug, Clone, Copy)]
pub enum TuiAction {
    PrevMonth,
    NextMonth,
    Exit,
}

pub fn key_pressed() -> Option<KeyCode> {
    if poll(Duration::from_millis(50)).ok()? {
        if let Event::Key(key) = read().ok()? {
            if key.kind == KeyEventKind::Press {
                return Some(key.code);
            }
        }
    }
    None
}

pub fn widget_action() -> Option<TuiAction> {
    match key_pressed()? {
        KeyCode::Char('h') | KeyCode::Left => Some(TuiAction::PrevMonth),
        KeyCode::Char('l') | KeyCode::Right => Some(TuiAction::NextMonth),
        KeyCode::Char('q') | KeyCode::Esc => Some(TuiAction::Exit),
        _ => None,
    }
}
