use crate::car::{slot_color, Car};
use crate::error::SimulationError;
use crossterm::{
    execute,
    style::{Color, Print, SetForegroundColor},
};
use std::io::{stdout, Write};

/// The rectangular field the cars drive on. Immutable after construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    width: i64,
    height: i64,
}

impl Grid {
    /// Creates a grid, rejecting non-positive dimensions.
    pub fn new(width: i64, height: i64) -> Result<Grid, SimulationError> {
        if width <= 0 || height <= 0 {
            return Err(SimulationError::InvalidDimension { width, height });
        }

        Ok(Grid { width, height })
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    /// Whether `(x, y)` lies inside the bounds.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Draws the grid to the console with one character per cell.
    ///
    /// Cars are drawn with their heading glyph (`X` once collided), colored by
    /// registration slot. `(0, 0)` is the bottom-left corner, so the top row
    /// printed is `y = height - 1`.
    pub fn draw(&self, cars: &[Car]) {
        let mut stdout = stdout();

        for y in (0..self.height).rev() {
            for x in 0..self.width {
                match cars.iter().position(|car| car.position() == (x, y)) {
                    Some(slot) => execute!(
                        stdout,
                        SetForegroundColor(slot_color(slot)),
                        Print(cars[slot].glyph()),
                        SetForegroundColor(Color::Reset)
                    )
                    .unwrap(),
                    None => execute!(
                        stdout,
                        SetForegroundColor(Color::Grey),
                        Print('.'),
                        SetForegroundColor(Color::Reset)
                    )
                    .unwrap(),
                }
            }
            execute!(stdout, Print("\n")).unwrap();
        }
        stdout.flush().unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_creating_a_grid_with_non_positive_dimensions_the_construction_fails() {
        assert_eq!(
            Grid::new(0, 5).unwrap_err(),
            SimulationError::InvalidDimension { width: 0, height: 5 }
        );
        assert_eq!(
            Grid::new(5, 0).unwrap_err(),
            SimulationError::InvalidDimension { width: 5, height: 0 }
        );
        assert_eq!(
            Grid::new(-3, 4).unwrap_err(),
            SimulationError::InvalidDimension {
                width: -3,
                height: 4
            }
        );
    }

    #[test]
    fn when_checking_containment_only_cells_inside_the_bounds_are_contained() {
        let grid = Grid::new(10, 8).unwrap();

        assert!(grid.contains(0, 0));
        assert!(grid.contains(9, 7));
        assert!(!grid.contains(10, 0));
        assert!(!grid.contains(0, 8));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(0, -1));
    }
}
