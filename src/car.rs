use crate::error::SimulationError;
use crossterm::style::Color;

/// The direction a car is facing.
///
/// The grid origin `(0, 0)` is the bottom-left corner: moving north increases
/// `y`, moving east increases `x`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn from_char(value: char) -> Option<Direction> {
        match value {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Rotates counter-clockwise: N -> W -> S -> E -> N.
    pub fn left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// Rotates clockwise: N -> E -> S -> W -> N.
    pub fn right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// The `(dx, dy)` offset of one forward step.
    pub fn forward_offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// The character used when drawing a car heading this way.
    pub fn glyph(self) -> char {
        match self {
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        }
    }
}

/// One atomic move from a car's command string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Left,
    Right,
    Forward,
}

impl Command {
    /// Parses a full command string, one command per character.
    ///
    /// # Arguments
    /// * `commands` - The command string; every character must be `L`, `R` or `F`.
    pub fn parse(commands: &str) -> Result<Vec<Command>, SimulationError> {
        commands
            .chars()
            .enumerate()
            .map(|(position, value)| match value {
                'L' => Ok(Command::Left),
                'R' => Ok(Command::Right),
                'F' => Ok(Command::Forward),
                _ => Err(SimulationError::InvalidCommand {
                    command: value,
                    position,
                }),
            })
            .collect()
    }

    pub fn as_char(self) -> char {
        match self {
            Command::Left => 'L',
            Command::Right => 'R',
            Command::Forward => 'F',
        }
    }
}

/// A car on the grid.
///
/// Created when it is registered with a simulation and never destroyed: a car
/// involved in a collision is only marked collided and keeps its final
/// position for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct Car {
    name: String,
    x: i64,
    y: i64,
    facing: Direction,
    commands: Vec<Command>,
    cursor: usize,
    collided_at: Option<usize>,
}

impl Car {
    pub fn new(name: &str, x: i64, y: i64, facing: Direction, commands: Vec<Command>) -> Car {
        Car {
            name: name.to_string(),
            x,
            y,
            facing,
            commands,
            cursor: 0,
            collided_at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_collided(&self) -> bool {
        self.collided_at.is_some()
    }

    /// The 1-based tick at which the car collided, if it did.
    pub fn collided_at(&self) -> Option<usize> {
        self.collided_at
    }

    /// Whether the car still has moves to make: not collided and commands left.
    pub fn is_active(&self) -> bool {
        !self.is_collided() && self.cursor < self.commands.len()
    }

    /// Returns the next command and advances the cursor, or `None` when the
    /// car is collided or its command string is exhausted.
    pub fn next_command(&mut self) -> Option<Command> {
        if !self.is_active() {
            return None;
        }

        let command = self.commands[self.cursor];
        self.cursor += 1;
        Some(command)
    }

    pub fn turn_left(&mut self) {
        self.facing = self.facing.left();
    }

    pub fn turn_right(&mut self) {
        self.facing = self.facing.right();
    }

    pub fn move_to(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    pub fn mark_collided(&mut self, tick: usize) {
        self.collided_at = Some(tick);
    }

    /// The character used when drawing the car on the grid.
    pub fn glyph(&self) -> char {
        match self.is_collided() {
            true => 'X',
            false => self.facing.glyph(),
        }
    }
}

/// The display color for the car registered in the given slot.
pub fn slot_color(slot: usize) -> Color {
    match slot % 8 {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Blue,
        3 => Color::Yellow,
        4 => Color::Magenta,
        5 => Color::Cyan,
        6 => Color::DarkRed,
        _ => Color::DarkGreen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_rotating_left_the_facing_cycles_counter_clockwise() {
        assert_eq!(Direction::North.left(), Direction::West);
        assert_eq!(Direction::West.left(), Direction::South);
        assert_eq!(Direction::South.left(), Direction::East);
        assert_eq!(Direction::East.left(), Direction::North);
    }

    #[test]
    fn when_rotating_right_the_facing_cycles_clockwise() {
        assert_eq!(Direction::North.right(), Direction::East);
        assert_eq!(Direction::East.right(), Direction::South);
        assert_eq!(Direction::South.right(), Direction::West);
        assert_eq!(Direction::West.right(), Direction::North);
    }

    #[test]
    fn when_stepping_forward_the_offset_follows_the_facing() {
        assert_eq!(Direction::North.forward_offset(), (0, 1));
        assert_eq!(Direction::South.forward_offset(), (0, -1));
        assert_eq!(Direction::East.forward_offset(), (1, 0));
        assert_eq!(Direction::West.forward_offset(), (-1, 0));
    }

    #[test]
    fn when_parsing_a_command_string_each_character_maps_to_one_move() {
        assert_eq!(
            Command::parse("LRF").unwrap(),
            vec![Command::Left, Command::Right, Command::Forward]
        );
    }

    #[test]
    fn when_parsing_an_empty_command_string_no_moves_are_produced() {
        assert_eq!(Command::parse("").unwrap(), vec![]);
    }

    #[test]
    fn when_parsing_an_unknown_character_the_error_names_it_and_its_position() {
        assert_eq!(
            Command::parse("LRX").unwrap_err(),
            SimulationError::InvalidCommand {
                command: 'X',
                position: 2
            }
        );
    }

    #[test]
    fn when_a_car_runs_out_of_commands_it_becomes_inactive() {
        let mut car = Car::new("A", 0, 0, Direction::North, Command::parse("L").unwrap());

        assert!(car.is_active());
        assert_eq!(car.next_command(), Some(Command::Left));
        assert!(!car.is_active());
        assert_eq!(car.next_command(), None);
    }

    #[test]
    fn when_a_car_is_marked_collided_it_stops_yielding_commands() {
        let mut car = Car::new("A", 0, 0, Direction::North, Command::parse("FFF").unwrap());
        car.mark_collided(1);

        assert!(!car.is_active());
        assert_eq!(car.next_command(), None);
        assert_eq!(car.collided_at(), Some(1));
        assert_eq!(car.glyph(), 'X');
    }
}
