//! Draws the navigation stack as cascading boxes over a shaded background.
//!
//! Composition happens on an in-memory cell grid first and is written to the terminal
//! in one go, which keeps redraws flicker-free.

use super::colors::*;
use crate::constants::labels;
use crate::constants::overlay::{BACKGROUND, MIN_HEIGHT, MIN_WIDTH, STATUS_ROWS};
use crate::error::AppError;
use crate::ui::navigation::{NavigationFrame, NavigationStack};
use crossterm::execute;
use crossterm::style::Print;
use std::io::Write;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Background,
    Header,
    Border,
    Title,
    Text,
    Focused,
    Status,
}

impl Style {
    fn ansi(self) -> String {
        let (fg, bg) = match self {
            Style::Background => (get_ansi_code(background_fg(), 240), get_ansi_code(box_bg(), 16)),
            Style::Header => (get_ansi_code(header_fg(), 231), get_ansi_code(header_bg(), 21)),
            Style::Border => (get_ansi_code(border_fg(), 51), get_ansi_code(box_bg(), 16)),
            Style::Title => (get_ansi_code(title_fg(), 46), get_ansi_code(box_bg(), 16)),
            Style::Text | Style::Focused => {
                (get_ansi_code(text_fg(), 231), get_ansi_code(box_bg(), 16))
            }
            Style::Status => (get_ansi_code(status_fg(), 226), get_ansi_code(box_bg(), 16)),
        };
        let reverse = if self == Style::Focused { "\x1b[7m" } else { "" };
        format!("\x1b[0m\x1b[38;5;{fg}m\x1b[48;5;{bg}m{reverse}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    /// `None` marks the right half of a double-width character.
    ch: Option<char>,
    style: Style,
}

/// Composed screen contents.
#[derive(Debug, Clone)]
pub struct Screen {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl Screen {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![
                Cell {
                    ch: Some(BACKGROUND),
                    style: Style::Background,
                };
                width * height
            ],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Writes one cell, blanking any double-width character it cuts in half.
    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.cells[i].ch.is_none() && x > 0 {
            self.cells[i - 1].ch = Some(' ');
        }
        let was_wide = self.cells[i]
            .ch
            .is_some_and(|c| c.width().unwrap_or(0) == 2);
        if was_wide && let Some(next) = self.index(x + 1, y) {
            self.cells[next].ch = Some(' ');
        }
        self.cells[i] = cell;
    }

    fn fill(&mut self, rect: Rect, ch: char, style: Style) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.set(x, y, Cell { ch: Some(ch), style });
            }
        }
    }

    /// Writes `text` from `(x, y)`, stopping before `max_cols` display columns.
    fn put_str(&mut self, x: usize, y: usize, text: &str, max_cols: usize, style: Style) -> usize {
        let mut col = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w > max_cols {
                break;
            }
            self.set(x + col, y, Cell { ch: Some(ch), style });
            if w == 2 {
                self.set(x + col + 1, y, Cell { ch: None, style });
            }
            col += w;
        }
        col
    }

    fn draw_box(&mut self, rect: Rect) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        self.fill(rect, ' ', Style::Text);
        for x in rect.x + 1..right {
            self.set(x, rect.y, border('─'));
            self.set(x, bottom, border('─'));
        }
        for y in rect.y + 1..bottom {
            self.set(rect.x, y, border('│'));
            self.set(right, y, border('│'));
        }
        self.set(rect.x, rect.y, border('┌'));
        self.set(right, rect.y, border('┐'));
        self.set(rect.x, bottom, border('└'));
        self.set(right, bottom, border('┘'));
    }

    /// Rows as plain text, without styling.
    pub fn plain_lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().filter_map(|cell| cell.ch).collect())
            .collect()
    }

    /// ANSI byte stream that repaints the whole screen.
    pub fn to_ansi(&self) -> String {
        let mut buffer = String::with_capacity(self.cells.len() * 4 + self.height * 16);
        buffer.push_str("\x1b[H");
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            buffer.push_str(&format!("\x1b[{};1H", y + 1));
            let mut current = None;
            for cell in row {
                let Some(ch) = cell.ch else {
                    continue;
                };
                if current != Some(cell.style) {
                    buffer.push_str(&cell.style.ansi());
                    current = Some(cell.style);
                }
                buffer.push(ch);
            }
        }
        buffer.push_str("\x1b[0m");
        buffer
    }
}

fn border(ch: char) -> Cell {
    Cell {
        ch: Some(ch),
        style: Style::Border,
    }
}

/// Box of stack level `level` inside the area between the header and the status line.
fn frame_rect(stack: &NavigationStack, level: usize, area: Rect) -> Rect {
    let insets = stack.insets(level);
    let left = usize::from(insets.left);
    let right = usize::from(insets.right);
    let top = usize::from(insets.top);
    let bottom = usize::from(insets.bottom);

    // one column of background stays visible on each side
    let avail_w = area.width.saturating_sub(2);
    let avail_h = area.height;
    let x = area.x + 1 + left.min(avail_w);
    let y = area.y + top.min(avail_h);
    let max_w = avail_w.saturating_sub(left);
    let max_h = avail_h.saturating_sub(top);

    let width = avail_w
        .saturating_sub(left + right)
        .max(usize::from(MIN_WIDTH).min(max_w));
    let height = avail_h
        .saturating_sub(top + bottom)
        .max(usize::from(MIN_HEIGHT).min(max_h));
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn draw_frame(screen: &mut Screen, frame: &NavigationFrame, rect: Rect, focused: bool) {
    screen.draw_box(rect);
    if rect.width < 3 || rect.height < 3 {
        return;
    }
    let inner = Rect {
        x: rect.x + 1,
        y: rect.y + 1,
        width: rect.width - 2,
        height: rect.height - 2,
    };

    let lines = frame.view().lines();
    let offset = if frame.scrolls_content() {
        frame.scroll().min(lines.len().saturating_sub(inner.height))
    } else {
        let cursor_line = lines
            .iter()
            .position(|line| line.button == Some(frame.cursor()))
            .unwrap_or(0);
        (cursor_line + 1).saturating_sub(inner.height)
    };

    for (row, (index, line)) in lines
        .iter()
        .enumerate()
        .skip(offset)
        .take(inner.height)
        .enumerate()
    {
        let y = inner.y + row;
        let is_focus = focused && line.button == Some(frame.cursor());
        let style = if is_focus {
            screen.fill(
                Rect {
                    x: inner.x,
                    y,
                    width: inner.width,
                    height: 1,
                },
                ' ',
                Style::Focused,
            );
            Style::Focused
        } else if index == 0 {
            Style::Title
        } else {
            Style::Text
        };
        screen.put_str(inner.x, y, &line.text, inner.width, style);
    }
}

/// Lays out the whole screen: header row, every stack frame from the root up, and the
/// status line. `status` replaces the key hints when set.
pub fn compose_screen(
    stack: &NavigationStack,
    width: u16,
    height: u16,
    date: &str,
    status: Option<&str>,
) -> Screen {
    let width = usize::from(width);
    let height = usize::from(height);
    let mut screen = Screen::new(width, height);
    if width == 0 || height == 0 {
        return screen;
    }

    screen.fill(
        Rect {
            x: 0,
            y: 0,
            width,
            height: 1,
        },
        ' ',
        Style::Header,
    );
    let used = screen.put_str(0, 0, labels::TERMINAL_TITLE, width, Style::Header);
    let date_col = width.saturating_sub(date.chars().count() + 1).max(used + 1);
    screen.put_str(date_col, 0, date, width.saturating_sub(date_col), Style::Header);

    let status_rows = usize::from(STATUS_ROWS);
    let area = Rect {
        x: 0,
        y: 1,
        width,
        height: height.saturating_sub(1 + status_rows),
    };

    let top_level = stack.depth().saturating_sub(1);
    for (level, frame) in stack.frames().iter().enumerate() {
        let rect = frame_rect(stack, level, area);
        draw_frame(&mut screen, frame, rect, level == top_level);
    }

    if height > 1 {
        let status_y = height - 1;
        screen.fill(
            Rect {
                x: 0,
                y: status_y,
                width,
                height: 1,
            },
            ' ',
            Style::Status,
        );
        screen.put_str(
            0,
            status_y,
            status.unwrap_or(labels::KEY_HINTS),
            width,
            Style::Status,
        );
    }

    screen
}

/// Renders the stack to the terminal with a single write.
pub fn render_buffered<W: Write>(
    out: &mut W,
    stack: &NavigationStack,
    date: &str,
    status: Option<&str>,
) -> Result<(), AppError> {
    let (width, height) = crossterm::terminal::size()?;
    let screen = compose_screen(stack, width, height, date, status);
    execute!(out, crossterm::cursor::Hide, Print(screen.to_ansi()))?;
    out.flush()?;
    Ok(())
}
