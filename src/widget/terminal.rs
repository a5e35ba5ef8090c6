use std::{
    collections::HashMap,
    io::{self, Write},
    sync::{Arc, Mutex},
};

use crate::{
    declare::Trend,
    widget::{DisplayHost, DisplayItem},
};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[39m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Renders every visible item as one ANSI status line on stdout, ordered by
/// priority (highest first). Stands in for an editor status bar so the binary
/// runs standalone.
pub struct Terminal {
    state: Arc<Mutex<State>>,
    next_id: u64,
}

#[derive(Default)]
struct State {
    slots: HashMap<u64, Slot>,
}

struct Slot {
    priority: i32,
    text: String,
    color: Option<Trend>,
    visible: bool,
}

pub struct TerminalItem {
    id: u64,
    state: Arc<Mutex<State>>,
}

impl Terminal {
    pub fn new() -> Self {
        Terminal {
            state: Arc::new(Mutex::new(State::default())),
            next_id: 0,
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayHost for Terminal {
    type Item = TerminalItem;

    fn create(&mut self, priority: i32) -> TerminalItem {
        let id = self.next_id;
        self.next_id += 1;

        if let Ok(mut state) = self.state.lock() {
            state.slots.insert(
                id,
                Slot {
                    priority,
                    text: String::new(),
                    color: None,
                    visible: false,
                },
            );
        }

        TerminalItem {
            id,
            state: Arc::clone(&self.state),
        }
    }
}

impl State {
    fn compose(&self) -> String {
        let mut slots: Vec<&Slot> = self.slots.values().filter(|slot| slot.visible).collect();
        slots.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut line = String::from(CLEAR_LINE);
        for (index, slot) in slots.iter().enumerate() {
            if index > 0 {
                line.push_str("  ");
            }

            match slot.color {
                Some(Trend::Up) => {
                    line.push_str(GREEN);
                    line.push_str(&slot.text);
                    line.push_str(RESET);
                }
                Some(Trend::Down) => {
                    line.push_str(RED);
                    line.push_str(&slot.text);
                    line.push_str(RESET);
                }
                Some(Trend::Flat) | None => line.push_str(&slot.text),
            }
        }

        line
    }

    fn redraw(&self) {
        let line = self.compose();
        let mut stdout = io::stdout();
        let _ = stdout.write_all(line.as_bytes());
        let _ = stdout.flush();
    }
}

impl TerminalItem {
    fn with_slot(&self, apply: impl FnOnce(&mut Slot)) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(slot) = state.slots.get_mut(&self.id) {
                apply(slot);
            }
            state.redraw();
        }
    }
}

impl DisplayItem for TerminalItem {
    fn set_text(&mut self, text: &str) {
        self.with_slot(|slot| slot.text = text.to_string());
    }

    fn set_color(&mut self, trend: Option<Trend>) {
        self.with_slot(|slot| slot.color = trend);
    }

    fn show(&mut self) {
        self.with_slot(|slot| slot.visible = true);
    }

    fn hide(&mut self) {
        self.with_slot(|slot| slot.visible = false);
    }

    fn dispose(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.slots.remove(&self.id);
            state.redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(terminal: &Terminal) -> String {
        terminal.state.lock().expect("state lock").compose()
    }

    #[test]
    fn test_compose_orders_by_priority() {
        let mut terminal = Terminal::new();
        let mut low = terminal.create(1);
        let mut high = terminal.create(2);

        low.set_text("MSFT $310.00");
        low.show();
        high.set_text("AAPL $150.50");
        high.show();

        assert_eq!(
            compose(&terminal),
            format!("{}AAPL $150.50  MSFT $310.00", CLEAR_LINE)
        );
    }

    #[test]
    fn test_compose_skips_hidden_items() {
        let mut terminal = Terminal::new();
        let mut item = terminal.create(1);

        item.set_text("AAPL $150.50");
        item.show();
        item.hide();

        assert_eq!(compose(&terminal), CLEAR_LINE);
    }

    #[test]
    fn test_compose_colors_by_trend() {
        let mut terminal = Terminal::new();
        let mut item = terminal.create(1);

        item.set_text("AAPL $150.50");
        item.set_color(Some(Trend::Up));
        item.show();
        assert_eq!(
            compose(&terminal),
            format!("{}{}AAPL $150.50{}", CLEAR_LINE, GREEN, RESET)
        );

        item.set_color(Some(Trend::Down));
        assert_eq!(
            compose(&terminal),
            format!("{}{}AAPL $150.50{}", CLEAR_LINE, RED, RESET)
        );

        item.set_color(None);
        assert_eq!(compose(&terminal), format!("{}AAPL $150.50", CLEAR_LINE));
    }

    #[test]
    fn test_dispose_releases_slot() {
        let mut terminal = Terminal::new();
        let mut item = terminal.create(1);

        item.set_text("AAPL $150.50");
        item.show();
        item.dispose();

        assert_eq!(compose(&terminal), CLEAR_LINE);
        assert!(terminal.state.lock().expect("state lock").slots.is_empty());
    }
}
