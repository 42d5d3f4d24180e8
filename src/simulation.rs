use crate::car::{Car, Command, Direction};
use crate::collision::{detect, CollisionRecord};
use crate::error::SimulationError;
use crate::grid::Grid;
use crate::replay::{create_run_logger, RunLogger};

/// The auto-driving car simulation.
/// Main entry point for registering cars and running their command strings.
pub struct Simulation {
    grid: Grid,
    cars: Vec<Car>,
    state: RunState,
    collisions: Vec<CollisionRecord>,
    run_logger: Box<dyn RunLogger>,
}

/// Where the simulation is in its lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunState {
    /// Grid defined, cars may be registered, no moves applied yet.
    Idle,
    /// The tick loop is advancing cars.
    Running,
    /// Every car is either exhausted or collided.
    Finished,
}

/// The final state of one car after a run.
#[derive(Clone, Debug, PartialEq)]
pub struct CarReport {
    pub name: String,
    pub position: (i64, i64),
    pub facing: Direction,
    /// The collision the car was part of, if any.
    pub collision: Option<CollisionRecord>,
}

/// What applying one atomic move did to a car.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The car rotated in place.
    Turned { facing: Direction },
    /// The car stepped one cell forward.
    Moved { from: (i64, i64), to: (i64, i64) },
    /// The forward step would have left the grid; the car held position.
    Rejected { at: (i64, i64) },
}

/// Applies one atomic move to a car against the grid bounds.
///
/// A forward step whose target cell is outside the grid is silently absorbed:
/// the car keeps its position and facing. This mirrors the rule that cars
/// ignore the boundary and hold position rather than error out.
pub fn step(grid: &Grid, car: &mut Car, command: Command) -> MoveOutcome {
    match command {
        Command::Left => {
            car.turn_left();
            MoveOutcome::Turned {
                facing: car.facing(),
            }
        }
        Command::Right => {
            car.turn_right();
            MoveOutcome::Turned {
                facing: car.facing(),
            }
        }
        Command::Forward => {
            let (x, y) = car.position();
            let (dx, dy) = car.facing().forward_offset();
            let (to_x, to_y) = (x + dx, y + dy);

            if grid.contains(to_x, to_y) {
                car.move_to(to_x, to_y);
                MoveOutcome::Moved {
                    from: (x, y),
                    to: (to_x, to_y),
                }
            } else {
                MoveOutcome::Rejected { at: (x, y) }
            }
        }
    }
}

impl Simulation {
    /// Creates a simulation on a fresh grid.
    ///
    /// # Arguments
    /// * `width` - The grid width; must be positive.
    /// * `height` - The grid height; must be positive.
    pub fn new(width: i64, height: i64) -> Result<Simulation, SimulationError> {
        Simulation::with_run_log(width, height, None)
    }

    /// Creates a simulation that writes a JSON log of every run.
    ///
    /// # Arguments
    /// * `width` - The grid width; must be positive.
    /// * `height` - The grid height; must be positive.
    /// * `log_filename` - Where to save the run log. `None` disables logging.
    pub fn with_run_log(
        width: i64,
        height: i64,
        log_filename: Option<String>,
    ) -> Result<Simulation, SimulationError> {
        let grid = Grid::new(width, height)?;
        let run_logger = create_run_logger(log_filename, grid.width(), grid.height());

        Ok(Simulation {
            grid,
            cars: Vec::new(),
            state: RunState::Idle,
            collisions: Vec::new(),
            run_logger,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The collisions found so far, in the order they were detected.
    pub fn collisions(&self) -> &[CollisionRecord] {
        &self.collisions
    }

    /// Checks that `(x, y)` is a legal starting cell: inside the grid and not
    /// already taken by a registered car.
    pub fn validate_position(&self, x: i64, y: i64) -> Result<(), SimulationError> {
        if !self.grid.contains(x, y) {
            return Err(SimulationError::OutOfBounds {
                x,
                y,
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }

        if let Some(occupant) = self.cars.iter().find(|car| car.position() == (x, y)) {
            return Err(SimulationError::OccupiedStart {
                x,
                y,
                occupant: occupant.name().to_string(),
            });
        }

        Ok(())
    }

    /// Registers a car.
    ///
    /// # Arguments
    /// * `name` - Unique identifier within the simulation.
    /// * `x`, `y` - Starting cell; must be inside the grid and unoccupied.
    /// * `facing` - Starting direction.
    /// * `commands` - Command string over `L`, `R`, `F`; may be empty.
    ///
    /// A rejected registration leaves the car collection unchanged.
    pub fn add_car(
        &mut self,
        name: &str,
        x: i64,
        y: i64,
        facing: Direction,
        commands: &str,
    ) -> Result<(), SimulationError> {
        if self.cars.iter().any(|car| car.name() == name) {
            return Err(SimulationError::DuplicateName(name.to_string()));
        }
        self.validate_position(x, y)?;
        let commands = Command::parse(commands)?;

        self.run_logger.log_add_car(name, (x, y), facing.as_char());
        self.cars.push(Car::new(name, x, y, facing, commands));
        self.state = RunState::Idle;
        Ok(())
    }

    /// Runs the tick loop to completion and reports every car's final state.
    ///
    /// Each tick advances every active car by exactly one atomic move, in
    /// registration order, and then checks all un-collided cars for shared
    /// cells. Every member of a collision group is frozen at that tick and
    /// never moves again. The loop ends when no car has moves left; running
    /// again without registering new cars returns the same reports.
    pub fn run(&mut self) -> Vec<CarReport> {
        self.state = RunState::Running;

        let mut tick = 0;
        while self.cars.iter().any(|car| car.is_active()) {
            tick += 1;
            self.step_tick(tick);
        }

        self.state = RunState::Finished;
        self.run_logger.save();
        self.reports()
    }

    /// Clears all cars and collisions but keeps the grid dimensions.
    pub fn reset(&mut self) {
        self.cars.clear();
        self.collisions.clear();
        self.state = RunState::Idle;
        self.run_logger.clear();
    }

    fn step_tick(&mut self, tick: usize) {
        for index in 0..self.cars.len() {
            let Some(command) = self.cars[index].next_command() else {
                continue;
            };

            let outcome = step(&self.grid, &mut self.cars[index], command);
            let name = self.cars[index].name().to_string();
            match outcome {
                MoveOutcome::Turned { facing } => {
                    let location = self.cars[index].position();
                    self.run_logger
                        .log_turn(tick, &name, location, facing.as_char());
                }
                MoveOutcome::Moved { from, to } => self.run_logger.log_move(tick, &name, from, to),
                MoveOutcome::Rejected { at } => self.run_logger.log_rejected(tick, &name, at),
            }
        }

        for record in detect(&self.cars, tick) {
            self.run_logger
                .log_collision(tick, record.location, record.cars.clone());

            for name in &record.cars {
                if let Some(car) = self.cars.iter_mut().find(|car| car.name() == name) {
                    car.mark_collided(tick);
                }
            }
            self.collisions.push(record);
        }
    }

    fn reports(&self) -> Vec<CarReport> {
        self.cars
            .iter()
            .map(|car| CarReport {
                name: car.name().to_string(),
                position: car.position(),
                facing: car.facing(),
                collision: self
                    .collisions
                    .iter()
                    .find(|record| record.cars.iter().any(|name| name == car.name()))
                    .cloned(),
            })
            .collect()
    }
}
