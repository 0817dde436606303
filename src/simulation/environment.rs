//! Games the organism can play.
//!
//! Both mazes are hallways with a single bend. The organism only sees which
//! exits are open and whether it has won, and only acts through one-hot
//! command vectors; anything else is ignored as ambiguous.

use crate::simulation::params::MAZE_TURN_LIMIT;
use crate::simulation::vectors::{ActuatorVector, SensoryVector};
use rand::Rng;

/// Vector layout a game exposes to its player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    pub n_sensors: usize,
    pub n_actuators: usize,
    /// Sensor that reads 1 on victory
    pub utility_index: usize,
}

/// An environment that supplies sensor vectors and accepts actuator vectors.
pub trait Environment {
    fn title(&self) -> String;

    fn player_config(&self) -> PlayerConfig;

    fn sensors(&self) -> SensoryVector;

    /// Applies an action. Returns `None` if the action was ambiguous or
    /// the game is over, otherwise whether it changed anything.
    fn act(&mut self, action: &ActuatorVector) -> Option<bool>;

    fn eof(&self) -> bool;

    /// Whether the victory sensor is on, as opposed to running out of turns.
    fn won(&self) -> bool {
        self.sensors()
            .get(self.player_config().utility_index)
            .unwrap_or(false)
    }

    /// Number of actions submitted so far.
    fn turn(&self) -> u32;

    /// Text rendering, one line per row.
    fn render(&self) -> Vec<String>;

    /// Human-readable names of sensors and actuators.
    fn labels(&self) -> (Vec<&'static str>, Vec<&'static str>);
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn title(&self) -> String {
        (**self).title()
    }

    fn player_config(&self) -> PlayerConfig {
        (**self).player_config()
    }

    fn sensors(&self) -> SensoryVector {
        (**self).sensors()
    }

    fn act(&mut self, action: &ActuatorVector) -> Option<bool> {
        (**self).act(action)
    }

    fn eof(&self) -> bool {
        (**self).eof()
    }

    fn won(&self) -> bool {
        (**self).won()
    }

    fn turn(&self) -> u32 {
        (**self).turn()
    }

    fn render(&self) -> Vec<String> {
        (**self).render()
    }

    fn labels(&self) -> (Vec<&'static str>, Vec<&'static str>) {
        (**self).labels()
    }
}

/// Compass heading, clockwise from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Heading after turning `quarter_turns` clockwise.
    #[must_use]
    pub const fn turned(self, quarter_turns: usize) -> Self {
        Self::ALL[(self.index() + quarter_turns) % 4]
    }

    #[must_use]
    pub const fn arrow(self) -> char {
        match self {
            Self::North => '^',
            Self::East => '>',
            Self::South => 'v',
            Self::West => '<',
        }
    }
}

const EL_SENSOR_LABELS: [&str; 5] = ["FORWARD", "RIGHT", "BACK", "LEFT", "VICTORY"];
const EL_ACTUATOR_LABELS: [&str; 4] = ["GO", "TURN LEFT", "TURN RIGHT", "TURN BACK"];

/// A hallway that runs north, bends west, and ends in the goal.
///
/// The organism starts at the south end facing a random direction. Sensors
/// are `[FORWARD, RIGHT, BACK, LEFT, VICTORY]`, relative to its heading.
/// Actuators are `[GO, TURN LEFT, TURN RIGHT, TURN BACK]`.
#[derive(Clone, Debug)]
pub struct ElMazeGame {
    steps_before_bend: u32,
    steps_after_bend: u32,
    position: u32,
    orientation: Cardinal,
    turn: u32,
    turn_limit: u32,
}

impl ElMazeGame {
    /// Creates a game with a random starting heading.
    pub fn new(steps_before_bend: u32, steps_after_bend: u32, rng: &mut impl Rng) -> Self {
        let orientation = Cardinal::ALL[rng.random_range(0..4)];
        Self::with_orientation(steps_before_bend, steps_after_bend, orientation)
    }

    #[must_use]
    pub const fn with_orientation(
        steps_before_bend: u32,
        steps_after_bend: u32,
        orientation: Cardinal,
    ) -> Self {
        Self {
            steps_before_bend,
            steps_after_bend,
            position: 0,
            orientation,
            turn: 0,
            turn_limit: MAZE_TURN_LIMIT,
        }
    }

    #[must_use]
    pub const fn with_turn_limit(mut self, turn_limit: u32) -> Self {
        self.turn_limit = turn_limit;
        self
    }

    /// Turns a perfect player needs, allowing for a bad starting heading.
    #[must_use]
    pub const fn par(&self) -> u32 {
        3 + self.steps_before_bend + 1 + self.steps_after_bend
    }

    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    #[must_use]
    pub const fn orientation(&self) -> Cardinal {
        self.orientation
    }

    const fn victory_position(&self) -> u32 {
        self.steps_before_bend + self.steps_after_bend
    }

    #[must_use]
    pub const fn is_victory(&self) -> bool {
        self.position >= self.victory_position()
    }

    /// Open exits as compass headings.
    fn cardinal_exits(&self) -> [bool; 4] {
        let p = self.position;
        let bend = self.steps_before_bend;
        let mut exits = [false; 4];
        if self.is_victory() {
            return exits;
        }
        exits[Cardinal::North.index()] = p < bend;
        exits[Cardinal::South.index()] = p > 0 && p <= bend;
        exits[Cardinal::East.index()] = p > bend;
        exits[Cardinal::West.index()] = p >= bend;
        exits
    }

    /// Open exits relative to the current heading.
    fn relative_exits(&self) -> [bool; 4] {
        let cardinal = self.cardinal_exits();
        let mut relative = [false; 4];
        for (quarter_turns, open) in relative.iter_mut().enumerate() {
            *open = cardinal[self.orientation.turned(quarter_turns).index()];
        }
        relative
    }

    /// Moves one step along the hallway in the current heading.
    fn go(&mut self) -> bool {
        if !self.relative_exits()[0] {
            return false;
        }
        match self.orientation {
            Cardinal::North | Cardinal::West => self.position += 1,
            Cardinal::South | Cardinal::East => self.position -= 1,
        }
        true
    }
}

impl Environment for ElMazeGame {
    fn title(&self) -> String {
        format!(
            "El Maze Game {}x{}",
            self.steps_before_bend, self.steps_after_bend
        )
    }

    fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            n_sensors: EL_SENSOR_LABELS.len(),
            n_actuators: EL_ACTUATOR_LABELS.len(),
            utility_index: 4,
        }
    }

    fn sensors(&self) -> SensoryVector {
        let mut bits = self.relative_exits().to_vec();
        bits.push(self.is_victory());
        SensoryVector::new(bits)
    }

    fn act(&mut self, action: &ActuatorVector) -> Option<bool> {
        if self.eof() {
            return None;
        }
        self.turn += 1;

        let command = action.single_active()?;
        let changed = match command {
            0 => self.go(),
            1 => {
                self.orientation = self.orientation.turned(3);
                true
            }
            2 => {
                self.orientation = self.orientation.turned(1);
                true
            }
            3 => {
                self.orientation = self.orientation.turned(2);
                true
            }
            _ => return None,
        };
        Some(changed)
    }

    fn eof(&self) -> bool {
        self.is_victory() || self.turn >= self.turn_limit
    }

    fn turn(&self) -> u32 {
        self.turn
    }

    fn render(&self) -> Vec<String> {
        let bend = self.steps_before_bend as usize;
        let after = self.steps_after_bend as usize;
        let width = after + 3;
        let height = bend + 3;
        let mut grid = vec![vec!['#'; width]; height];

        // Vertical leg from the start (bottom) up to the bend, then west.
        let bend_col = width - 2;
        for step in 0..=bend {
            grid[height - 2 - step][bend_col] = ' ';
        }
        for step in 1..=after {
            grid[1][bend_col - step] = ' ';
        }
        grid[1][bend_col - after] = '*';

        let p = self.position as usize;
        let (row, col) = if p <= bend {
            (height - 2 - p, bend_col)
        } else {
            (1, bend_col - (p - bend))
        };
        grid[row][col] = self.orientation.arrow();

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    fn labels(&self) -> (Vec<&'static str>, Vec<&'static str>) {
        (EL_SENSOR_LABELS.to_vec(), EL_ACTUATOR_LABELS.to_vec())
    }
}

const TEE_SENSOR_LABELS: [&str; 5] = ["NORTH", "SOUTH", "EAST", "WEST", "VICTORY"];
const TEE_ACTUATOR_LABELS: [&str; 4] = ["NORTH", "SOUTH", "EAST", "WEST"];

/// A hallway that runs north and turns west at its end.
///
/// Sensors are `[NORTH, SOUTH, EAST, WEST, VICTORY]` open exits; actuators
/// move in the matching compass direction.
#[derive(Clone, Debug)]
pub struct TeeMazeGame {
    steps_before_turn: u32,
    steps_after_turn: u32,
    position: u32,
    turn: u32,
    turn_limit: u32,
}

impl TeeMazeGame {
    #[must_use]
    pub const fn new(steps_before_turn: u32, steps_after_turn: u32) -> Self {
        Self {
            steps_before_turn,
            steps_after_turn,
            position: 0,
            turn: 0,
            turn_limit: MAZE_TURN_LIMIT,
        }
    }

    #[must_use]
    pub const fn with_turn_limit(mut self, turn_limit: u32) -> Self {
        self.turn_limit = turn_limit;
        self
    }

    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    const fn victory_position(&self) -> u32 {
        self.steps_before_turn + self.steps_after_turn
    }

    #[must_use]
    pub const fn is_victory(&self) -> bool {
        self.position == self.victory_position()
    }

    fn exits(&self) -> [bool; 4] {
        let p = self.position;
        let turn = self.steps_before_turn;
        let north = p < turn;
        let west = !north && p < self.victory_position();
        let south = p > 0 && p <= turn;
        let east = p > turn;
        [north, south, east, west]
    }
}

impl Environment for TeeMazeGame {
    fn title(&self) -> String {
        format!(
            "Tee Maze Game {}x{}",
            self.steps_before_turn, self.steps_after_turn
        )
    }

    fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            n_sensors: TEE_SENSOR_LABELS.len(),
            n_actuators: TEE_ACTUATOR_LABELS.len(),
            utility_index: 4,
        }
    }

    fn sensors(&self) -> SensoryVector {
        let mut bits = self.exits().to_vec();
        bits.push(self.is_victory());
        SensoryVector::new(bits)
    }

    fn act(&mut self, action: &ActuatorVector) -> Option<bool> {
        if self.eof() {
            return None;
        }
        self.turn += 1;

        let command = action.single_active()?;
        let [north, south, east, west] = self.exits();
        let changed = match command {
            0 if north => {
                self.position += 1;
                true
            }
            3 if west => {
                self.position += 1;
                true
            }
            1 if south => {
                self.position -= 1;
                true
            }
            2 if east => {
                self.position -= 1;
                true
            }
            0..=3 => false,
            _ => return None,
        };
        Some(changed)
    }

    fn eof(&self) -> bool {
        self.is_victory() || self.turn >= self.turn_limit
    }

    fn turn(&self) -> u32 {
        self.turn
    }

    fn render(&self) -> Vec<String> {
        let before = self.steps_before_turn as usize;
        let after = self.steps_after_turn as usize;
        let width = after + 3;
        let height = before + 3;
        let mut grid = vec![vec!['#'; width]; height];

        let turn_col = width - 2;
        for step in 0..=before {
            grid[height - 2 - step][turn_col] = ' ';
        }
        for step in 1..=after {
            grid[1][turn_col - step] = ' ';
        }
        grid[1][turn_col - after] = '*';

        let p = self.position as usize;
        let (row, col) = if p <= before {
            (height - 2 - p, turn_col)
        } else {
            (1, turn_col - (p - before))
        };
        grid[row][col] = 'O';

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    fn labels(&self) -> (Vec<&'static str>, Vec<&'static str>) {
        (TEE_SENSOR_LABELS.to_vec(), TEE_ACTUATOR_LABELS.to_vec())
    }
}
