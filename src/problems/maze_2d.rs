//! Grid mazes.
//!
//! Mazes are read from text, one row per line:
//!
//! ```text
//! #######
//! #S  # #
//! # #   #
//! #   #G#
//! #######
//! ```
//!
//! `#` is a wall, ` ` and `.` are empty, `S` marks starts and `G` marks goals.

use std::rc::Rc;

use derive_more::Display;
use nonmax::NonMaxU32;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::puzzle::Puzzle;

const MAX_ELEMENTS_DISPLAYED: usize = 80;
const RANDOM_STATE_MAX_TRIES: usize = 10_000;

pub(crate) type CoordIntrinsic = u32;
pub type Coord = NonMaxU32;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display("({x},{y})")]
pub struct Maze2DState {
    pub(crate) x: Coord,
    pub(crate) y: Coord,
}

impl Maze2DState {
    pub fn new(x: CoordIntrinsic, y: CoordIntrinsic) -> Option<Maze2DState> {
        Some(Maze2DState {
            x: Coord::new(x)?,
            y: Coord::new(y)?,
        })
    }
    pub fn new_from_usize(x: usize, y: usize) -> Option<Maze2DState> {
        let x = CoordIntrinsic::try_from(x).ok()?;
        let y = CoordIntrinsic::try_from(y).ok()?;

        Self::new(x, y)
    }

    pub fn x(&self) -> CoordIntrinsic {
        self.x.get()
    }
    pub fn y(&self) -> CoordIntrinsic {
        self.y.get()
    }
}

/// Moves through the maze.
///
/// Rows grow downwards, so going up decreases `y`.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Maze2DAction {
    #[display("↑")]
    Up = 0, // y--
    #[display("↓")]
    Down = 1, // y++
    #[display("←")]
    Left = 2, // x--
    #[display("→")]
    Right = 3, // x++
}

impl Maze2DAction {
    /// Actions in exploration order.
    pub const ALL: [Maze2DAction; 4] = [
        Maze2DAction::Up,
        Maze2DAction::Down,
        Maze2DAction::Left,
        Maze2DAction::Right,
    ];
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Maze2DCell {
    #[display("░")]
    Empty,
    #[display("█")]
    Wall,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Maze2DCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Maze2DCell {
    type Error = Maze2DCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' => Ok(Maze2DCell::Empty),
            '#' | '█' => Ok(Maze2DCell::Wall),
            ch => Err(Maze2DCellParseError::InvalidCharacter(ch)),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Maze2DSpace {
    pub(crate) map: Vec<Vec<Maze2DCell>>,
}

impl Maze2DSpace {
    pub fn new_from_map(map: Vec<Vec<Maze2DCell>>) -> Self {
        Self { map }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        if self.map.is_empty() {
            return (0, 0);
        }
        (self.map[0].len(), self.map.len())
    }

    #[inline(always)]
    pub fn at(&self, state: &Maze2DState) -> Option<Maze2DCell> {
        self.map
            .get(state.y() as usize)?
            .get(state.x() as usize)
            .copied()
    }

    #[inline(always)]
    pub fn apply(&self, state: &Maze2DState, action: &Maze2DAction) -> Option<Maze2DState> {
        let x = state.x();
        let y = state.y();

        #[rustfmt::skip]
        let (x, y) = match action {
            Maze2DAction::Up    => (Some(x),          y.checked_sub(1)),
            Maze2DAction::Down  => (Some(x),          y.checked_add(1)),
            Maze2DAction::Left  => (x.checked_sub(1), Some(y)          ),
            Maze2DAction::Right => (x.checked_add(1), Some(y)          ),
        };

        let s = Maze2DState::new(x?, y?)?;
        (self.at(&s)? == Maze2DCell::Empty).then_some(s)
    }

    /// Gets the neighbours of a given position.
    ///
    /// NOTE: These states can only be used with the current Maze
    pub fn neighbours(&self, state: &Maze2DState) -> Vec<(Maze2DState, Maze2DAction)> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Neighbours");

        Maze2DAction::ALL
            .iter()
            .filter_map(|a| self.apply(state, a).map(|s| (s, *a)))
            .collect()
    }

    pub fn random_state<R: rand::Rng>(&self, r: &mut R) -> Option<Maze2DState> {
        let (max_x, max_y) = self.dimensions();
        if max_x == 0 || max_y == 0 {
            return None;
        }

        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            let x = r.random_range(0..max_x);
            let y = r.random_range(0..max_y);
            if self.map[y][x] == Maze2DCell::Empty {
                return Maze2DState::new_from_usize(x, y);
            }
        }

        None
    }
}

impl std::fmt::Display for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.dimensions();
        writeln!(f, "Maze2D({}x{}):", d.0, d.1)?;
        for line in self.map.iter().take(MAX_ELEMENTS_DISPLAYED) {
            for cell in line.iter().take(MAX_ELEMENTS_DISPLAYED) {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze2D{:?}", self.dimensions())
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Maze2DProblemCell {
    Cell(Maze2DCell),
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

impl std::convert::TryFrom<char> for Maze2DProblemCell {
    type Error = Maze2DCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'S' => Ok(Maze2DProblemCell::Start),
            'G' => Ok(Maze2DProblemCell::Goal),
            ch => Ok(Maze2DProblemCell::Cell(Maze2DCell::try_from(ch)?)),
        }
    }
}

#[derive(Debug, Error)]
pub enum Maze2DProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid cell {e} found at ({x},{y})")]
    InvalidCell {
        e: Maze2DCellParseError,
        x: usize,
        y: usize,
    },
    #[error("Row {y} has {found} cells, expected {expected}")]
    RaggedRow {
        y: usize,
        expected: usize,
        found: usize,
    },
    #[error("Maze is too large ({x}x{y})")]
    TooLarge { x: usize, y: usize },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

/// A maze along with its starts and goals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze2DProblem {
    space: Maze2DSpace,
    starts: Vec<Maze2DState>,
    goals: Vec<Maze2DState>,
}

impl Maze2DProblem {
    pub fn space(&self) -> &Maze2DSpace {
        &self.space
    }
    pub fn starts(&self) -> &[Maze2DState] {
        &self.starts
    }
    pub fn goals(&self) -> &[Maze2DState] {
        &self.goals
    }

    /// A puzzle for each start, sharing the maze.
    pub fn puzzles(&self, max_moves: Option<u32>) -> Vec<Maze2DPuzzle> {
        let maze = Rc::new(Maze2D {
            space: self.space.clone(),
            goals: FxHashSet::from_iter(self.goals.iter().copied()),
            max_moves,
        });

        self.starts
            .iter()
            .map(|&position| Maze2DPuzzle {
                maze: Rc::clone(&maze),
                position,
                moves: 0,
                last_action: None,
            })
            .collect()
    }

    /// The puzzle for the first start.
    pub fn puzzle(&self) -> Option<Maze2DPuzzle> {
        self.puzzles(None).into_iter().next()
    }

    /// Same maze with random starts and goals.
    pub fn randomize<R: rand::Rng>(
        &self,
        r: &mut R,
        num_starts: u16,
        num_goals: u16,
    ) -> Option<Maze2DProblem> {
        let mut starts = vec![];
        let mut goals = vec![];

        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            if starts.len() == num_starts as usize && goals.len() == num_goals as usize {
                return Some(Maze2DProblem {
                    space: self.space.clone(),
                    starts,
                    goals,
                });
            }
            let Some(random_state) = self.space.random_state::<R>(r) else {
                return None;
            };
            if starts.len() < num_starts as usize {
                starts.push(random_state);
            } else {
                goals.push(random_state);
            }
        }

        None
    }

    /// Draws the maze with a path of puzzles on it.
    pub fn render_path(&self, path: &[Maze2DPuzzle]) -> String {
        let mut rows: Vec<Vec<String>> = self
            .space
            .map
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();

        let mut mark = |s: &Maze2DState, symbol: String| {
            if let Some(cell) = rows
                .get_mut(s.y() as usize)
                .and_then(|row| row.get_mut(s.x() as usize))
            {
                *cell = symbol;
            }
        };
        for step in path.iter().skip(1) {
            if let Some(action) = step.last_action {
                mark(&step.position, action.to_string());
            }
        }
        for s in &self.starts {
            mark(s, Maze2DProblemCell::Start.to_string());
        }
        for g in &self.goals {
            mark(g, Maze2DProblemCell::Goal.to_string());
        }

        rows.into_iter()
            .map(|row| row.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::convert::TryFrom<&str> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().filter(|l| !l.trim().is_empty()).collect();

        if lines.is_empty() {
            return Err(Maze2DProblemParseError::EmptyInput);
        }

        let max_x = lines[0].chars().count();
        let max_y = lines.len();
        if Maze2DState::new_from_usize(max_x, max_y).is_none() {
            return Err(Maze2DProblemParseError::TooLarge { x: max_x, y: max_y });
        }

        let mut problem = Maze2DProblem {
            space: Maze2DSpace::new_from_map(Vec::with_capacity(max_y)),
            starts: vec![],
            goals: vec![],
        };

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != max_x {
                return Err(Maze2DProblemParseError::RaggedRow {
                    y,
                    expected: max_x,
                    found,
                });
            }

            let mut row = Vec::with_capacity(max_x);
            for (x, ch) in line.chars().enumerate() {
                let cell = Maze2DProblemCell::try_from(ch)
                    .map_err(|e| Maze2DProblemParseError::InvalidCell { e, x, y })?;
                let state = Maze2DState::new_from_usize(x, y)
                    .ok_or(Maze2DProblemParseError::TooLarge { x: max_x, y: max_y })?;

                row.push(match cell {
                    Maze2DProblemCell::Start => {
                        problem.starts.push(state);
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::Goal => {
                        problem.goals.push(state);
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::Cell(c) => c,
                });
            }
            problem.space.map.push(row);
        }

        Ok(problem)
    }
}

impl std::convert::TryFrom<&std::path::Path> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(p).map_err(|e| Maze2DProblemParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;

        Maze2DProblem::try_from(s.as_str())
    }
}

impl std::fmt::Display for Maze2DProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.space.dimensions();

        writeln!(
            f,
            "Maze2DProblem({}x{}) (s:{:?}, g:{:?}):",
            d.0, d.1, self.starts, self.goals
        )?;
        write!(f, "{}", self.render_path(&[]))
    }
}

/// Maze data shared by all the states of a search.
#[derive(Debug)]
struct Maze2D {
    space: Maze2DSpace,
    goals: FxHashSet<Maze2DState>,
    max_moves: Option<u32>,
}

/// A position in a maze, reached after some moves.
#[derive(Clone, Debug)]
pub struct Maze2DPuzzle {
    maze: Rc<Maze2D>,
    position: Maze2DState,
    moves: u32,
    last_action: Option<Maze2DAction>,
}

impl Maze2DPuzzle {
    pub fn position(&self) -> Maze2DState {
        self.position
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// The move that led here, if any.
    pub fn last_action(&self) -> Option<Maze2DAction> {
        self.last_action
    }
}

impl Puzzle for Maze2DPuzzle {
    type Fingerprint = Maze2DState;

    fn is_goal(&self) -> bool {
        self.maze.goals.contains(&self.position)
    }

    /// Positions reached with more moves than allowed are given up.
    fn should_prune(&self) -> bool {
        self.maze
            .max_moves
            .is_some_and(|max_moves| self.moves > max_moves)
    }

    fn fingerprint(&self) -> Maze2DState {
        self.position
    }

    fn expand(&self) -> Vec<Self> {
        self.maze
            .space
            .neighbours(&self.position)
            .into_iter()
            .map(|(position, action)| Maze2DPuzzle {
                maze: Rc::clone(&self.maze),
                position,
                moves: self.moves + 1,
                last_action: Some(action),
            })
            .collect()
    }
}

impl std::fmt::Display for Maze2DPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.last_action {
            Some(a) => write!(f, "{a}{}", self.position),
            None => write!(f, "{}", self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    const CORRIDOR: &str = indoc! {"
        #####
        #S G#
        #####
    "};

    #[test]
    fn parse() {
        let problem = Maze2DProblem::try_from(CORRIDOR).unwrap();
        assert_eq!(problem.space().dimensions(), (5, 3));
        assert_eq!(problem.starts(), [Maze2DState::new(1, 1).unwrap()]);
        assert_eq!(problem.goals(), [Maze2DState::new(3, 1).unwrap()]);
        assert_eq!(
            problem.space().at(&Maze2DState::new(0, 0).unwrap()),
            Some(Maze2DCell::Wall)
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Maze2DProblem::try_from(""),
            Err(Maze2DProblemParseError::EmptyInput)
        ));
        assert!(matches!(
            Maze2DProblem::try_from("#S#\n#?#"),
            Err(Maze2DProblemParseError::InvalidCell { x: 1, y: 1, .. })
        ));
        assert!(matches!(
            Maze2DProblem::try_from("#S#\n##"),
            Err(Maze2DProblemParseError::RaggedRow {
                y: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn expansion_order() {
        let problem = Maze2DProblem::try_from(indoc! {"
            #####
            ## ##
            #.S.#
            ## ##
            #####
        "})
        .unwrap();
        let start = problem.puzzle().unwrap();
        assert!(!start.is_goal());

        let actions: Vec<Maze2DAction> = start
            .expand()
            .iter()
            .filter_map(Maze2DPuzzle::last_action)
            .collect();
        assert_eq!(actions, Maze2DAction::ALL);
    }

    #[test]
    fn move_budget() {
        let problem = Maze2DProblem::try_from(CORRIDOR).unwrap();
        let start = problem.puzzles(Some(1)).pop().unwrap();
        assert!(!start.should_prune());

        let one = start.expand().pop().unwrap();
        assert_eq!(one.moves(), 1);
        assert!(!one.should_prune());

        let two = one
            .expand()
            .into_iter()
            .find(|p| p.last_action() == Some(Maze2DAction::Right))
            .unwrap();
        assert!(two.is_goal());
        assert!(two.should_prune());
    }

    #[test]
    fn render() {
        let problem = Maze2DProblem::try_from(CORRIDOR).unwrap();
        let start = problem.puzzle().unwrap();
        let one = start.expand().pop().unwrap();
        let two = one
            .expand()
            .into_iter()
            .find(|p| p.last_action() == Some(Maze2DAction::Right))
            .unwrap();
        assert_eq!(format!("{two}"), "→(3,1)");

        let drawing = problem.render_path(&[start, one]);
        assert_eq!(drawing.lines().nth(1), Some("█S→G█"));
    }

    #[test]
    fn randomize() {
        use rand::SeedableRng;

        let problem = Maze2DProblem::try_from(CORRIDOR).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let random = problem.randomize(&mut rng, 1, 2).unwrap();
        assert_eq!(random.starts().len(), 1);
        assert_eq!(random.goals().len(), 2);
        for s in random.starts().iter().chain(random.goals()) {
            assert_eq!(random.space().at(s), Some(Maze2DCell::Empty));
        }
    }
}
