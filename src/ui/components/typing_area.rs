use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, StatefulWidget, Widget};

use crate::session::caret::{CaretRef, ElementRefs, WordRef};
use crate::session::surface::{Mark, Surface, WordBlock, WordState};
use crate::ui::theme::Theme;

/// Cells between two word blocks.
const WORD_GAP: u16 = 1;

/// Where a word block sits in the wrapped text, before scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedBlock {
    pub index: usize,
    pub x: u16,
    pub row: u16,
    pub width: u16,
}

fn cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Flow word blocks left to right, wrapping at `width`.
///
/// A block wider than the whole line still gets a row of its own and is
/// clipped when drawn.
pub fn layout_blocks(surface: &Surface, width: u16) -> Vec<PlacedBlock> {
    let mut placed = Vec::with_capacity(surface.blocks.len());
    let mut x: u16 = 0;
    let mut row: u16 = 0;

    for block in &surface.blocks {
        let w = cells(block.width());
        if x > 0 && x.saturating_add(w) > width {
            x = 0;
            row = row.saturating_add(1);
        }
        placed.push(PlacedBlock {
            index: block.key.index,
            x,
            row,
            width: w,
        });
        x = x.saturating_add(w).saturating_add(WORD_GAP);
    }

    placed
}

/// First visible row so that `active_row` is on screen, with one row of
/// already typed text above it when there is room.
pub fn scroll_for(active_row: u16, current: u16, height: u16) -> u16 {
    if height == 0 {
        return current;
    }
    let context = if height >= 3 { 1 } else { 0 };
    if active_row < current || active_row >= current.saturating_add(height) {
        active_row.saturating_sub(context)
    } else {
        current
    }
}

/// Per-frame state kept between renders.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypingAreaState {
    pub refs: ElementRefs,
    pub scroll: u16,
}

impl TypingAreaState {
    /// Publish the active block and caret in wrapped-text coordinates
    /// (x from the left edge of the text, y in rows from the first row).
    fn publish_refs(&mut self, surface: &Surface, placed: &[PlacedBlock], text_width: u16) {
        let active = surface
            .blocks
            .iter()
            .zip(placed)
            .find(|(block, _)| block.state == WordState::Active)
            .and_then(|(block, place)| {
                let caret = block.caret?;
                let caret_x = place
                    .x
                    .saturating_add(caret.offset)
                    .min(text_width.saturating_sub(1));
                Some((
                    WordRef {
                        index: place.index,
                        area: Rect::new(place.x, place.row, place.width, 1),
                    },
                    CaretRef {
                        position: Position::new(caret_x, place.row),
                    },
                ))
            });
        self.refs.publish(active);
    }
}

pub struct TypingArea<'a> {
    surface: &'a Surface,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(surface: &'a Surface, theme: &'a Theme) -> Self {
        Self { surface, theme }
    }

    fn glyph_style(&self, block: &WordBlock, mark: Mark) -> Style {
        let colors = &self.theme.colors;
        match mark {
            Mark::Correct => Style::default().fg(colors.text_correct()),
            Mark::Extra => Style::default()
                .fg(colors.text_extra())
                .bg(colors.text_extra_bg())
                .add_modifier(Modifier::UNDERLINED),
            Mark::Plain if block.state == WordState::Done => Style::default().fg(colors.fg()),
            Mark::Plain => Style::default().fg(colors.text_pending()),
        }
    }
}

impl StatefulWidget for TypingArea<'_> {
    type State = TypingAreaState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let colors = &self.theme.colors;
        let frame = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = frame.inner(area);
        frame.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            state.refs.clear();
            return;
        }

        let placed = layout_blocks(self.surface, inner.width);
        state.publish_refs(self.surface, &placed, inner.width);

        if let Some(active) = state.refs.active_word() {
            state.scroll = scroll_for(active.area.y, state.scroll, inner.height);
        }
        let first_row = state.scroll;
        let last_row = first_row.saturating_add(inner.height);

        for (block, place) in self.surface.blocks.iter().zip(&placed) {
            if place.row < first_row || place.row >= last_row {
                continue;
            }
            let y = inner.y + (place.row - first_row);
            let glyphs = block.glyphs.iter().chain(&block.extras);
            for (i, glyph) in glyphs.enumerate() {
                let col = place.x.saturating_add(cells(i));
                if col >= inner.width {
                    break;
                }
                buf.set_string(
                    inner.x + col,
                    y,
                    glyph.ch.to_string(),
                    self.glyph_style(block, glyph.mark),
                );
            }
        }

        if let Some(caret) = state.refs.caret() {
            let row = caret.position.y;
            if row >= first_row && row < last_row {
                let cell = Rect::new(inner.x + caret.position.x, inner.y + (row - first_row), 1, 1);
                buf.set_style(
                    cell,
                    Style::default()
                        .fg(colors.caret_fg())
                        .bg(colors.caret_bg())
                        .add_modifier(Modifier::SLOW_BLINK),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::caret::CaretPositioner;
    use crate::session::store::Snapshot;
    use crate::session::surface::build_surface;

    fn surface(words: &[&str], input: &str, history: &[&str]) -> Surface {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let history: Vec<String> = history.iter().map(|w| w.to_string()).collect();
        let snapshot = Snapshot {
            words: &words,
            active_word: words.get(history.len()).map(String::as_str),
            user_input: input,
            history: &history,
        };
        build_surface(&snapshot, &CaretPositioner::new(1))
    }

    #[test]
    fn test_layout_wraps_at_width() {
        let s = surface(&["abc", "de", "fgh"], "", &[]);
        // "abc de" fits in 7, "fgh" wraps
        let placed = layout_blocks(&s, 7);
        assert_eq!((placed[0].x, placed[0].row), (0, 0));
        assert_eq!((placed[1].x, placed[1].row), (4, 0));
        assert_eq!((placed[2].x, placed[2].row), (0, 1));
    }

    #[test]
    fn test_layout_counts_extras() {
        let s = surface(&["ab", "cd"], "", &["abxx"]);
        let placed = layout_blocks(&s, 80);
        assert_eq!(placed[0].width, 4);
        assert_eq!(placed[1].x, 5);
    }

    #[test]
    fn test_layout_long_word_own_row() {
        let s = surface(&["a", "abcdefghij", "b"], "", &[]);
        let placed = layout_blocks(&s, 5);
        assert_eq!(placed[1].row, 1);
        assert_eq!(placed[1].x, 0);
        assert_eq!(placed[2].row, 2);
    }

    #[test]
    fn test_scroll_keeps_active_visible() {
        assert_eq!(scroll_for(0, 0, 3), 0);
        assert_eq!(scroll_for(2, 0, 3), 0);
        assert_eq!(scroll_for(3, 0, 3), 2);
        assert_eq!(scroll_for(0, 2, 3), 0);
        assert_eq!(scroll_for(5, 0, 1), 5);
        assert_eq!(scroll_for(5, 4, 0), 4);
    }

    #[test]
    fn test_render_publishes_refs_and_draws_caret() {
        let theme = Theme::default();
        let s = surface(&["cat", "dog"], "", &["cat"]);
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let mut state = TypingAreaState::default();
        TypingArea::new(&s, &theme).render(area, &mut buf, &mut state);

        let word = state.refs.active_word().unwrap();
        assert_eq!(word.index, 1);
        assert_eq!(word.area, Rect::new(4, 0, 3, 1));
        let caret = state.refs.caret().unwrap();
        assert_eq!(caret.position, Position::new(4, 0));

        // Inside the border: first row starts at (1, 1).
        let cell = &buf[(1 + 4, 1)];
        assert_eq!(cell.symbol(), "d");
        assert_eq!(cell.bg, theme.colors.caret_bg());
        assert!(cell.modifier.contains(Modifier::SLOW_BLINK));
    }

    #[test]
    fn test_render_clears_refs_when_finished() {
        let theme = Theme::default();
        let mut state = TypingAreaState::default();
        let area = Rect::new(0, 0, 20, 5);

        let typing = surface(&["cat"], "c", &[]);
        TypingArea::new(&typing, &theme).render(area, &mut Buffer::empty(area), &mut state);
        assert!(state.refs.active_word().is_some());

        let done = surface(&["cat"], "", &["cat"]);
        TypingArea::new(&done, &theme).render(area, &mut Buffer::empty(area), &mut state);
        assert!(state.refs.active_word().is_none());
        assert!(state.refs.caret().is_none());
    }

    #[test]
    fn test_render_styles_correct_and_extra() {
        let theme = Theme::default();
        let s = surface(&["ab", "cd"], "c", &["abz"]);
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        let mut state = TypingAreaState::default();
        TypingArea::new(&s, &theme).render(area, &mut buf, &mut state);

        // "abz" at x 1..4, "cd" at x 5..7 on row y=1
        assert_eq!(buf[(3, 1)].symbol(), "z");
        assert_eq!(buf[(3, 1)].fg, theme.colors.text_extra());
        assert_eq!(buf[(5, 1)].symbol(), "c");
        assert_eq!(buf[(5, 1)].fg, theme.colors.text_correct());
    }

    #[test]
    fn test_caret_after_last_char_sits_in_gap() {
        let theme = Theme::default();
        let s = surface(&["ab", "cd"], "ab", &[]);
        let area = Rect::new(0, 0, 20, 4);
        let mut state = TypingAreaState::default();
        TypingArea::new(&s, &theme).render(area, &mut Buffer::empty(area), &mut state);
        assert_eq!(state.refs.caret().unwrap().position, Position::new(2, 0));
    }

    #[test]
    fn test_scrolls_to_active_row() {
        let theme = Theme::default();
        let words = ["aaaa"; 12];
        let history = ["aaaa"; 9];
        let s = surface(&words, "", &history);
        // inner width 9 fits one "aaaa " pair per row: 2 words per row
        let area = Rect::new(0, 0, 11, 5);
        let mut state = TypingAreaState::default();
        TypingArea::new(&s, &theme).render(area, &mut Buffer::empty(area), &mut state);
        let active_row = state.refs.active_word().unwrap().area.y;
        assert_eq!(active_row, 4);
        assert!(state.scroll <= active_row && active_row < state.scroll + 3);
    }
}
