//! World state and the per-turn update protocol.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Instant;

use crate::error::{ParseError, UpdateError};

use super::grid::{Cell, Grid, Loc, ME, OwnerId};
use super::vision::VisionCache;

/// Game constants supplied by the engine before the first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameParams {
    /// Maximum number of turns in the game.
    pub turns: u32,
    /// Time budget per turn in milliseconds.
    pub turn_time_ms: u64,
    /// Extra setup time before the first turn in milliseconds.
    pub load_time_ms: u64,
    /// Squared view radius.
    pub view_radius2: u32,
    /// Squared attack radius.
    pub attack_radius2: u32,
    /// Squared food-spawn radius.
    pub spawn_radius2: u32,
    /// Number of grid rows.
    pub rows: u16,
    /// Number of grid columns.
    pub cols: u16,
    /// Seed for stochastic tie-breaking in the decision layer.
    ///
    /// The world model itself never draws from it.
    pub player_seed: i64,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            turns: 1000,
            turn_time_ms: 1000,
            load_time_ms: 3000,
            view_radius2: 77,
            attack_radius2: 5,
            spawn_radius2: 1,
            rows: 64,
            cols: 64,
            player_seed: 42,
        }
    }
}

/// Parse a single integer token.
fn parse_int<T: FromStr>(token: &str) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidInteger(token.to_string()))
}

impl GameParams {
    /// Parse the pre-game `key value` lines the engine sends before `ready`.
    ///
    /// Unknown keys and lines that are not key-value pairs are ignored so
    /// newer engines stay compatible; keys the engine omits keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a recognized key carries a non-integer value.
    pub fn parse_setup<'a, I>(lines: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut params = Self::default();
        for line in lines {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let [key, value] = tokens.as_slice() else {
                continue;
            };
            match key.to_ascii_lowercase().as_str() {
                "turns" => params.turns = parse_int(value)?,
                "turntime" => params.turn_time_ms = parse_int(value)?,
                "loadtime" => params.load_time_ms = parse_int(value)?,
                "viewradius2" => params.view_radius2 = parse_int(value)?,
                "attackradius2" => params.attack_radius2 = parse_int(value)?,
                "spawnradius2" => params.spawn_radius2 = parse_int(value)?,
                "rows" => params.rows = parse_int(value)?,
                "cols" => params.cols = parse_int(value)?,
                "player_seed" => params.player_seed = parse_int(value)?,
                _ => {}
            }
        }
        Ok(params)
    }
}

/// One parsed engine report line.
///
/// The per-turn input grammar is a closed set of five tags; parsing into
/// this enum up front keeps the update loop an exhaustive match instead of
/// stringly-typed branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine {
    /// `w row col` — water at the location.
    Water(Loc),
    /// `f row col` — food at the location.
    Food(Loc),
    /// `a row col owner` — a live unit.
    Unit(Loc, OwnerId),
    /// `d row col owner` — a unit died here this turn.
    Dead(Loc, OwnerId),
    /// `h row col owner` — a hill.
    Hill(Loc, OwnerId),
}

impl ReportLine {
    /// Parse a single whitespace-tokenized report line.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown tag, a wrong token count, or a
    /// non-integer coordinate or owner.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = tokens.first() else {
            return Err(ParseError::Empty);
        };

        let (tag, expected) = match first.to_ascii_lowercase().as_str() {
            "w" => ('w', 3),
            "f" => ('f', 3),
            "a" => ('a', 4),
            "d" => ('d', 4),
            "h" => ('h', 4),
            other => return Err(ParseError::UnknownTag(other.to_string())),
        };
        if tokens.len() != expected {
            return Err(ParseError::WrongArity {
                tag,
                expected,
                found: tokens.len(),
            });
        }

        let loc = Loc::new(parse_int(tokens[1])?, parse_int(tokens[2])?);
        Ok(match tag {
            'w' => Self::Water(loc),
            'f' => Self::Food(loc),
            'a' => Self::Unit(loc, parse_int(tokens[3])?),
            'd' => Self::Dead(loc, parse_int(tokens[3])?),
            _ => Self::Hill(loc, parse_int(tokens[3])?),
        })
    }

    /// The location this line reports on.
    #[must_use]
    pub const fn loc(self) -> Loc {
        match self {
            Self::Water(loc) | Self::Food(loc) => loc,
            Self::Unit(loc, _) | Self::Dead(loc, _) | Self::Hill(loc, _) => loc,
        }
    }
}

/// The agent's model of the game world, rebuilt incrementally each turn.
///
/// The grid is the render/query cache; the entity indices are the
/// authoritative per-kind lists. `update` keeps the two in sync.
#[derive(Debug)]
pub struct WorldState {
    params: GameParams,
    grid: Grid,
    /// All currently visible live units by location.
    units: HashMap<Loc, OwnerId>,
    /// Owners recorded dead this turn, by location, in report order.
    dead: HashMap<Loc, Vec<OwnerId>>,
    /// Food locations in report order.
    food: Vec<Loc>,
    /// Known hills by location. The one index that persists across turns.
    hills: HashMap<Loc, OwnerId>,
    /// Wall-clock start of the current turn.
    turn_start: Instant,
    vision: VisionCache,
}

impl WorldState {
    /// Create a world from the engine's game parameters.
    ///
    /// The grid starts as all land with every entity index empty, and the
    /// turn timer starts immediately. Returns `None` if either grid
    /// dimension is zero.
    #[must_use]
    pub fn new(params: GameParams) -> Option<Self> {
        let grid = Grid::new(params.rows, params.cols)?;
        Some(Self {
            params,
            grid,
            units: HashMap::new(),
            dead: HashMap::new(),
            food: Vec::new(),
            hills: HashMap::new(),
            turn_start: Instant::now(),
            vision: VisionCache::new(),
        })
    }

    /// Get the game parameters.
    #[must_use]
    pub const fn params(&self) -> &GameParams {
        &self.params
    }

    /// Get the grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the vision cache.
    #[must_use]
    pub const fn vision(&self) -> &VisionCache {
        &self.vision
    }

    /// Apply one turn's report block to the world.
    ///
    /// In order: restarts the turn timer, invalidates the vision cache,
    /// erases last turn's units, dead markers and food from the grid, clears
    /// those three indices, then applies each line. Hills are deliberately
    /// not cleared: a hill keeps its last known owner until a new `h` line
    /// supersedes it, so the engine need not re-announce static structures
    /// every turn. Hill ownership is metadata only and never touches the
    /// grid tags.
    ///
    /// A `d` line writes the dead marker to the grid only over land; food or
    /// a unit reported on the same cell keeps the tile, while the death is
    /// still recorded in the dead index.
    ///
    /// # Errors
    ///
    /// Returns an [`UpdateError`] naming the first malformed or out-of-range
    /// line. Lines before it have been applied, lines after it have not; the
    /// caller decides whether to skip the turn or terminate.
    pub fn update(&mut self, data: &str) -> Result<(), UpdateError> {
        self.turn_start = Instant::now();
        self.vision.invalidate();

        for &loc in self.units.keys() {
            self.grid.set(loc, Cell::Land);
        }
        for &loc in self.dead.keys() {
            self.grid.set(loc, Cell::Land);
        }
        for &loc in &self.food {
            self.grid.set(loc, Cell::Land);
        }
        self.units.clear();
        self.dead.clear();
        self.food.clear();

        for (idx, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            ReportLine::parse(line)
                .and_then(|report| self.apply(report))
                .map_err(|source| UpdateError {
                    line: idx + 1,
                    source,
                })?;
        }
        Ok(())
    }

    /// Apply a single parsed report line.
    fn apply(&mut self, report: ReportLine) -> Result<(), ParseError> {
        let loc = report.loc();
        if loc.row >= self.params.rows || loc.col >= self.params.cols {
            return Err(ParseError::OutOfRange {
                loc,
                rows: self.params.rows,
                cols: self.params.cols,
            });
        }

        match report {
            ReportLine::Water(loc) => self.grid.set(loc, Cell::Water),
            ReportLine::Food(loc) => {
                self.grid.set(loc, Cell::Food);
                self.food.push(loc);
            }
            ReportLine::Unit(loc, owner) => {
                self.grid.set(loc, Cell::Unit(owner));
                self.units.insert(loc, owner);
            }
            ReportLine::Dead(loc, owner) => {
                // food or a unit reported on this cell keeps the tile
                if self.grid.get(loc) == Cell::Land {
                    self.grid.set(loc, Cell::Dead);
                }
                self.dead.entry(loc).or_default().push(owner);
            }
            ReportLine::Hill(loc, owner) => {
                self.hills.insert(loc, owner);
            }
        }
        Ok(())
    }

    /// Milliseconds left in the current turn's budget.
    ///
    /// Negative once the deadline has passed; callers treat negative as "no
    /// time left", not as an error.
    #[must_use]
    pub fn time_remaining(&self) -> i64 {
        let budget = i64::try_from(self.params.turn_time_ms).unwrap_or(i64::MAX);
        let elapsed = i64::try_from(self.turn_start.elapsed().as_millis()).unwrap_or(i64::MAX);
        budget.saturating_sub(elapsed)
    }

    /// Iterate over all visible live units with their owners.
    pub fn units(&self) -> impl Iterator<Item = (Loc, OwnerId)> + '_ {
        self.units.iter().map(|(&loc, &owner)| (loc, owner))
    }

    /// Iterate over this turn's death sites with the owners that died there.
    pub fn deaths(&self) -> impl Iterator<Item = (Loc, &[OwnerId])> + '_ {
        self.dead
            .iter()
            .map(|(&loc, owners)| (loc, owners.as_slice()))
    }

    /// Owners recorded dead at a location this turn, in report order.
    #[must_use]
    pub fn dead_at(&self, loc: Loc) -> &[OwnerId] {
        self.dead.get(&loc).map_or(&[], Vec::as_slice)
    }

    /// Iterate over all known hills with their owners.
    pub fn hills(&self) -> impl Iterator<Item = (Loc, OwnerId)> + '_ {
        self.hills.iter().map(|(&loc, &owner)| (loc, owner))
    }

    /// Locations of all of our live units.
    #[must_use]
    pub fn my_units(&self) -> Vec<Loc> {
        self.units()
            .filter(|&(_, owner)| owner == ME)
            .map(|(loc, _)| loc)
            .collect()
    }

    /// All visible enemy units with their owners.
    #[must_use]
    pub fn enemy_units(&self) -> Vec<(Loc, OwnerId)> {
        self.units().filter(|&(_, owner)| owner != ME).collect()
    }

    /// Locations of our hills.
    #[must_use]
    pub fn my_hills(&self) -> Vec<Loc> {
        self.hills()
            .filter(|&(_, owner)| owner == ME)
            .map(|(loc, _)| loc)
            .collect()
    }

    /// All known enemy hills with their owners.
    #[must_use]
    pub fn enemy_hills(&self) -> Vec<(Loc, OwnerId)> {
        self.hills().filter(|&(_, owner)| owner != ME).collect()
    }

    /// Locations of all visible food, in report order.
    #[must_use]
    pub fn food_locations(&self) -> &[Loc] {
        &self.food
    }

    /// Check whether any of our units can currently see the location.
    ///
    /// The first query after an update rebuilds the cached visibility grid;
    /// every later query in the same turn is an O(1) lookup.
    pub fn is_visible(&mut self, loc: Loc) -> bool {
        if self.vision.is_stale() {
            let mine = self.my_units();
            self.vision
                .rebuild(&self.grid, &mine, self.params.view_radius2);
        }
        self.vision.contains(&self.grid, loc)
    }
}
