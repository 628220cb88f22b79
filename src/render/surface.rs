//! Cell-level drawing primitives and the board projection built on them.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::game::{GameState, Grid, Position};

pub const FOOD_COLOR: Color = Color::Rgb(0xff, 0x4d, 0x4d);
pub const HEAD_COLOR: Color = Color::Rgb(0x0b, 0x8b, 0x3a);
pub const BODY_COLOR: Color = Color::Rgb(0x6f, 0xe0, 0x8b);
pub const OUTLINE_COLOR: Color = Color::Rgb(0x14, 0x5c, 0x2f);

/// Something cells can be painted onto
pub trait Surface {
    /// Blank the whole board
    fn clear(&mut self, grid: &Grid);

    fn fill_cell(&mut self, cell: Position, color: Color);

    fn stroke_cell(&mut self, cell: Position, color: Color);
}

/// Paint food and snake; the same state always yields the same calls
pub fn draw_board<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear(&state.grid);

    if let Some(food) = state.food {
        surface.fill_cell(food, FOOD_COLOR);
    }

    for (i, &segment) in state.snake.segments().iter().enumerate() {
        let fill = if i == 0 { HEAD_COLOR } else { BODY_COLOR };
        surface.fill_cell(segment, fill);
        surface.stroke_cell(segment, OUTLINE_COLOR);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Paint {
    fill: Option<Color>,
    outline: Option<Color>,
}

/// Terminal surface: each cell becomes two character columns
#[derive(Debug, Clone, Default)]
pub struct GridCanvas {
    cols: usize,
    cells: Vec<Paint>,
}

impl GridCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn paint_mut(&mut self, cell: Position) -> Option<&mut Paint> {
        let x = usize::try_from(cell.x).ok().filter(|&x| x < self.cols)?;
        let y = usize::try_from(cell.y).ok()?;
        self.cells.get_mut(y * self.cols + x)
    }

    /// One styled line per board row
    pub fn lines(&self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| Line::from(row.iter().map(|paint| paint_span(*paint)).collect::<Vec<_>>()))
            .collect()
    }
}

fn paint_span(paint: Paint) -> Span<'static> {
    match (paint.fill, paint.outline) {
        (Some(fill), Some(outline)) => Span::styled("[]", Style::default().fg(outline).bg(fill)),
        (Some(fill), None) => Span::styled("  ", Style::default().bg(fill)),
        (None, Some(outline)) => Span::styled("[]", Style::default().fg(outline)),
        (None, None) => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

impl Surface for GridCanvas {
    fn clear(&mut self, grid: &Grid) {
        self.cols = usize::from(grid.cols_u16());
        self.cells.clear();
        self.cells.resize(grid.area(), Paint::default());
    }

    fn fill_cell(&mut self, cell: Position, color: Color) {
        if let Some(paint) = self.paint_mut(cell) {
            paint.fill = Some(color);
        }
    }

    fn stroke_cell(&mut self, cell: Position, color: Color) {
        if let Some(paint) = self.paint_mut(cell) {
            paint.outline = Some(color);
        }
    }
}
