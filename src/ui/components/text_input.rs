use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Single-line text field with a placeholder shown while empty.
pub struct TextInputState {
    pub value: String,
    pub editing: bool,
    placeholder: &'static str,
}

impl TextInputState {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            editing: false,
            placeholder,
        }
    }

    pub fn with_value(placeholder: &'static str, value: &str) -> Self {
        Self {
            value: value.to_string(),
            editing: false,
            placeholder,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    /// Returns true when the value changed.
    pub fn handle_input(&mut self, key: KeyCode) -> bool {
        if !self.editing {
            return false;
        }

        match key {
            KeyCode::Char(c) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => self.value.pop().is_some(),
            _ => false,
        }
    }

    pub fn get_display_string(&self) -> String {
        if self.editing {
            format!("{}_", self.value)
        } else {
            self.value.clone()
        }
    }
}

pub fn render_text_input<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    title: &str,
    state: &TextInputState,
) {
    let content = if state.value.is_empty() && !state.editing {
        Span::styled(state.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.get_display_string())
    };

    let border_style = if state.editing {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let input = Paragraph::new(Spans::from(content)).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(input, area);
}
