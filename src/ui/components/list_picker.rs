use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;
use crate::words::WordListId;

/// Selection state of the word list picker.
#[derive(Clone, Debug, Default)]
pub struct ListPicker {
    pub items: Vec<WordListId>,
    pub selected: usize,
}

impl ListPicker {
    /// Open on `items`, with the cursor on `current` when it is listed.
    pub fn open(items: Vec<WordListId>, current: &str) -> Self {
        let selected = items
            .iter()
            .position(|id| id.as_str() == current)
            .unwrap_or(0);
        Self { items, selected }
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn selected_id(&self) -> Option<&WordListId> {
        self.items.get(self.selected)
    }
}

pub struct ListPickerView<'a> {
    picker: &'a ListPicker,
    current: &'a str,
    theme: &'a Theme,
}

impl<'a> ListPickerView<'a> {
    pub fn new(picker: &'a ListPicker, current: &'a str, theme: &'a Theme) -> Self {
        Self {
            picker,
            current,
            theme,
        }
    }
}

impl Widget for ListPickerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Word lists ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let header = Paragraph::new(Line::from(Span::styled(
            "Enter to switch, Esc to go back",
            Style::default().fg(colors.text_pending()),
        )))
        .alignment(Alignment::Center);
        header.render(layout[0], buf);

        if self.picker.items.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  no word lists found",
                Style::default().fg(colors.error()),
            )))
            .render(layout[1], buf);
            return;
        }

        let visible = usize::from(layout[1].height).max(1);
        let first = self.picker.selected.saturating_sub(visible - 1);

        let lines: Vec<Line> = self
            .picker
            .items
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, id)| {
                let is_selected = i == self.picker.selected;
                let indicator = if is_selected { ">" } else { " " };
                let active = if id.as_str() == self.current { " *" } else { "" };
                Line::from(Span::styled(
                    format!(" {indicator} {id}{active}"),
                    Style::default()
                        .fg(if is_selected { colors.accent() } else { colors.fg() })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                ))
            })
            .collect();

        Paragraph::new(lines).render(layout[1], buf);
    }
}
