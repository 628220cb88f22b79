//! Board geometry: pixel dimensions quantized into square cells.

use super::state::Position;
use thiserror::Error;

/// Reasons a board configuration is rejected at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("board must be at least one cell wide and tall, got {width}x{height} px")]
    EmptyBoard { width: u32, height: u32 },
    #[error("board {axis} of {pixels} px is not a multiple of the {cell_size} px cell size")]
    Misaligned {
        axis: &'static str,
        pixels: u32,
        cell_size: u32,
    },
    #[error("board of {cols}x{rows} cells exceeds the {max} cells-per-side limit")]
    TooLarge { cols: u32, rows: u32, max: u16 },
    #[error("state was built for a {cols}x{rows} board, not the configured one")]
    StateGridMismatch { cols: u32, rows: u32 },
    #[error("speed_step_every must be non-zero")]
    ZeroSpeedStep,
    #[error("speed_min ({min} ms) exceeds speed_init ({init} ms)")]
    SpeedRange { init: u64, min: u64 },
}

/// Largest number of cells along either side of the board
pub const MAX_CELLS_PER_SIDE: u16 = 1024;

/// The discrete playfield: `cols x rows` cells of `cell_size` pixels each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell_size: u32,
    cols: u16,
    rows: u16,
}

impl Grid {
    /// Build a grid from a pixel board, failing when the board does not
    /// divide evenly into cells
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if width < cell_size || height < cell_size {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if width % cell_size != 0 {
            return Err(ConfigError::Misaligned {
                axis: "width",
                pixels: width,
                cell_size,
            });
        }
        if height % cell_size != 0 {
            return Err(ConfigError::Misaligned {
                axis: "height",
                pixels: height,
                cell_size,
            });
        }

        let (cols, rows) = (width / cell_size, height / cell_size);
        let too_large = ConfigError::TooLarge {
            cols,
            rows,
            max: MAX_CELLS_PER_SIDE,
        };
        let cols = u16::try_from(cols)
            .ok()
            .filter(|&c| c <= MAX_CELLS_PER_SIDE)
            .ok_or(too_large.clone())?;
        let rows = u16::try_from(rows)
            .ok()
            .filter(|&r| r <= MAX_CELLS_PER_SIDE)
            .ok_or(too_large)?;

        Ok(Self {
            cell_size,
            cols,
            rows,
        })
    }

    pub fn cols(&self) -> u32 {
        u32::from(self.cols)
    }

    pub fn rows(&self) -> u32 {
        u32::from(self.rows)
    }

    /// Column count in terminal units
    pub fn cols_u16(&self) -> u16 {
        self.cols
    }

    /// Row count in terminal units
    pub fn rows_u16(&self) -> u16 {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Total number of cells on the board
    pub fn area(&self) -> usize {
        usize::from(self.cols) * usize::from(self.rows)
    }

    /// The cell the snake starts on
    pub fn center(&self) -> Position {
        Position::new(i32::from(self.cols / 2), i32::from(self.rows / 2))
    }

    /// Check if a position is within `[0, cols) x [0, rows)`
    pub fn contains(&self, pos: Position) -> bool {
        (0..i32::from(self.cols)).contains(&pos.x) && (0..i32::from(self.rows)).contains(&pos.y)
    }

    /// The on-board cell at column `x`, row `y`
    pub fn cell(&self, x: u32, y: u32) -> Option<Position> {
        let pos = Position::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?);
        self.contains(pos).then_some(pos)
    }

    /// Quantize a pixel coordinate to the cell containing it
    pub fn cell_at_pixel(&self, px: u32, py: u32) -> Option<Position> {
        self.cell(px / self.cell_size, py / self.cell_size)
    }

    /// Top-left pixel of a cell
    pub fn pixel_origin(&self, pos: Position) -> Option<(u32, u32)> {
        if !self.contains(pos) {
            return None;
        }
        let x = u32::try_from(pos.x).ok()?;
        let y = u32::try_from(pos.y).ok()?;
        Some((x * self.cell_size, y * self.cell_size))
    }
}
