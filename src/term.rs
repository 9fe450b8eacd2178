use crate::{TermInt, Coords};
use crate::engine::GameState;
use crate::error::{GameError, Result};
use crate::game::{InputSource, Intent, Presenter};
use crate::grid::{Cell, Grid};
use crate::snake::Direction::*;
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read, poll};

// One character covers 10x20 surface pixels, so a 20px cell is two columns wide
const PX_PER_COL: i32 = 10;
const PX_PER_ROW: i32 = 20;

const SCORE_ROW: TermInt = 0;
const FIELD_LEFT: TermInt = 1;
const FIELD_TOP: TermInt = 2;

const FILL_CHAR: char = '█';

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Tile {
    Empty,
    Body,
    Head(char),
    Reward,
    Hazard,
}

impl Tile {
    fn look(self) -> (char, Color) {
        match self {
            Tile::Empty => (' ', Color::Reset),
            Tile::Body => (FILL_CHAR, Color::Green),
            Tile::Head(ch) => (ch, Color::Green),
            Tile::Reward => (FILL_CHAR, Color::Red),
            Tile::Hazard => (FILL_CHAR, Color::Blue),
        }
    }
}

/// Draws the playfield into the terminal, touching only what changed since
/// the previous frame.
pub struct TermManager {
    grid: Grid,
    size: Coords,
    stdout: Stdout,
    screen: Vec<Tile>,
    shown_score: Option<i32>,
    active: bool,
}

/// Reads key presses from the terminal without blocking the game loop.
pub struct TermInput;

impl TermManager {
    pub fn new(grid: Grid) -> Result<Self> {
        let size = terminal::size().map_err(GameError::TerminalSetup)?;
        check_fits(&grid, size)?;

        Ok(TermManager {
            grid,
            size,
            stdout: stdout(),
            screen: vec![Tile::Empty; grid.cell_count()],
            shown_score: None,
            active: false,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        self.enter().map_err(GameError::TerminalSetup)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.size.0 / 2, self.size.1 / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        queue!(self.stdout, style::ResetColor)?;

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn enter(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    fn draw_borders(&mut self) -> io::Result<()> {
        let (width, height) = required_size(&self.grid);
        let end_x = width - 1;
        let top = FIELD_TOP - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, top), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in FIELD_TOP..end_y {
            queue!(self.stdout, cursor::MoveTo(0, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        self.stdout.flush()
    }

    fn draw_tile(&mut self, cell: Cell, tile: Tile) -> io::Result<()> {
        let rect = self.grid.to_pixel_rect(cell);
        let col = FIELD_LEFT + (rect.x / PX_PER_COL) as TermInt;
        let row = FIELD_TOP + (rect.y / PX_PER_ROW) as TermInt;
        let (ch, color) = tile.look();
        let text: String = std::iter::repeat(ch).take((rect.w / PX_PER_COL) as usize).collect();

        queue!(self.stdout, cursor::MoveTo(col, row), style::SetForegroundColor(color), style::Print(text))
    }

    fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.grid.width() as usize + cell.x as usize
    }
}

impl Presenter for TermManager {
    fn present(&mut self, state: &GameState) -> io::Result<()> {
        let mut frame = vec![Tile::Empty; self.grid.cell_count()];

        // Later writes win: snake over items, hazard over reward
        frame[self.index(state.reward())] = Tile::Reward;
        if state.hazard().visible {
            frame[self.index(state.hazard().cell)] = Tile::Hazard;
        }
        let snake = state.snake();
        for seg in snake.segments().skip(1) {
            frame[self.index(*seg)] = Tile::Body;
        }
        frame[self.index(snake.head())] = Tile::Head(snake.head_char());

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let cell = Cell::new(x, y);
                let idx = self.index(cell);
                if frame[idx] != self.screen[idx] {
                    self.draw_tile(cell, frame[idx])?;
                }
            }
        }
        self.screen = frame;

        if self.shown_score != Some(state.score()) {
            queue!(
                self.stdout,
                style::ResetColor,
                cursor::MoveTo(0, SCORE_ROW),
                terminal::Clear(ClearType::UntilNewLine),
                style::Print(format!("Score: {}", state.score()))
            )?;
            self.shown_score = Some(state.score());
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl TermInput {
    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    pub fn read_key_events_queue(&self) -> io::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }
}

impl InputSource for TermInput {
    fn poll_intents(&mut self) -> io::Result<Vec<Intent>> {
        Ok(self.read_key_events_queue()?.iter().filter_map(intent_for).collect())
    }
}

pub fn intent_for(ev: &KeyEvent) -> Option<Intent> {
    if is_ctrl_c(ev) {
        return Some(Intent::Quit);
    }

    match ev.code {
        KeyCode::Up => Some(Intent::Steer(Up)),
        KeyCode::Down => Some(Intent::Steer(Down)),
        KeyCode::Left => Some(Intent::Steer(Left)),
        KeyCode::Right => Some(Intent::Steer(Right)),
        _ => None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Columns and rows needed for the score line, the border and the field.
pub fn required_size(grid: &Grid) -> Coords {
    let cols = grid.width() * grid.cell_size() / PX_PER_COL + 2;
    let rows = grid.height() * grid.cell_size() / PX_PER_ROW + 3;
    (cols as TermInt, rows as TermInt)
}

fn check_fits(grid: &Grid, size: Coords) -> Result<()> {
    let avail_px = (
        (size.0 as i32 - 2) * PX_PER_COL,
        (size.1 as i32 - 3) * PX_PER_ROW,
    );
    // Number of whole cells that fit on each axis
    let whole = grid.to_cell(avail_px.0, avail_px.1);

    if whole.x < grid.width() || whole.y < grid.height() {
        return Err(GameError::TerminalTooSmall { needed: required_size(grid), actual: size });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn arrows_map_to_directions() {
        assert_eq!(intent_for(&key(KeyCode::Up, KeyModifiers::NONE)), Some(Intent::Steer(Up)));
        assert_eq!(intent_for(&key(KeyCode::Down, KeyModifiers::NONE)), Some(Intent::Steer(Down)));
        assert_eq!(intent_for(&key(KeyCode::Left, KeyModifiers::NONE)), Some(Intent::Steer(Left)));
        assert_eq!(intent_for(&key(KeyCode::Right, KeyModifiers::NONE)), Some(Intent::Steer(Right)));
    }

    #[test]
    fn ctrl_c_quits_and_other_keys_are_ignored() {
        assert_eq!(intent_for(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Intent::Quit));
        assert_eq!(intent_for(&key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(intent_for(&key(KeyCode::Char('w'), KeyModifiers::NONE)), None);
        assert_eq!(intent_for(&key(KeyCode::Esc, KeyModifiers::NONE)), None);
    }

    #[test]
    fn default_grid_needs_66_by_27() {
        let grid = Grid::default();
        assert_eq!(required_size(&grid), (66, 27));
        assert!(check_fits(&grid, (66, 27)).is_ok());
        assert!(check_fits(&grid, (200, 60)).is_ok());
    }

    #[test]
    fn small_terminals_are_refused() {
        let grid = Grid::default();
        for size in [(65, 27), (66, 26), (0, 0), (1, 1)].iter() {
            match check_fits(&grid, *size) {
                Err(GameError::TerminalTooSmall { needed, actual }) => {
                    assert_eq!(needed, (66, 27));
                    assert_eq!(actual, *size);
                }
                other => panic!("expected too-small error for {:?}, got {:?}", size, other),
            }
        }
    }
}
