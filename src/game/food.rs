use rand::Rng;

use super::grid::Grid;
use super::state::{Position, Snake};

/// Pick a uniformly random cell the snake does not occupy
///
/// Returns `None` when the snake covers the whole board, which the engine
/// treats as a win; otherwise rejection sampling always finds a free cell.
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, grid: &Grid, snake: &Snake) -> Option<Position> {
    if snake.len() >= grid.area() {
        return None;
    }

    loop {
        let x = rng.gen_range(0..grid.cols());
        let y = rng.gen_range(0..grid.rows());

        if let Some(pos) = grid.cell(x, y).filter(|&pos| !snake.occupies(pos)) {
            return Some(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_food_avoids_snake() {
        let grid = Grid::new(60, 20, 20).unwrap();
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(1, 0)],
            Direction::Left,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        // Only (2, 0) is free
        for _ in 0..50 {
            assert_eq!(place_food(&mut rng, &grid, &snake), Some(Position::new(2, 0)));
        }
    }

    #[test]
    fn test_food_in_bounds() {
        let grid = Grid::new(400, 400, 20).unwrap();
        let snake = Snake::new(grid.center(), Direction::Right);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let food = place_food(&mut rng, &grid, &snake).unwrap();
            assert!(grid.contains(food));
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn test_full_board_has_no_food() {
        let grid = Grid::new(40, 20, 20).unwrap();
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(1, 0)],
            Direction::Left,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(place_food(&mut rng, &grid, &snake), None);
    }
}
