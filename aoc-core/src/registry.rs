//! Solver registry for managing and creating solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;
use std::collections::BTreeMap;

/// First year of Advent of Code
pub const BASE_YEAR: u16 = 2015;
/// Days per year (1-25)
pub const DAYS_PER_YEAR: u8 = 25;

fn check_year_day(year: u16, day: u8) -> Result<(), RegistrationError> {
    if year < BASE_YEAR || day == 0 || day > DAYS_PER_YEAR {
        return Err(RegistrationError::InvalidYearDay(year, day));
    }
    Ok(())
}

/// Factory function type for creating solver instances
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverInfo {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// Number of parts this solver supports
    pub parts: u8,
}

struct RegistryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Builder for constructing a [`SolverRegistry`] with a fluent API
///
/// Registration detects duplicates and out-of-range dates; the registry is
/// immutable once built.
///
/// # Example
///
/// ```no_run
/// # use aoc_core::RegistryBuilder;
/// let registry = RegistryBuilder::new()
///     .register_all_plugins()
///     .unwrap()
///     .build();
/// ```
pub struct RegistryBuilder {
    solvers: BTreeMap<(u16, u8), RegistryEntry>,
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("solvers", &self.solvers.keys())
            .finish()
    }
}

impl RegistryBuilder {
    /// Create a new empty registry builder
    pub fn new() -> Self {
        Self {
            solvers: BTreeMap::new(),
        }
    }

    /// Register a solver factory function for a specific year and day
    ///
    /// # Arguments
    /// * `year` - The Advent of Code year
    /// * `day` - The day number (1-25)
    /// * `parts` - Number of parts the solver supports
    /// * `factory` - A function that parses input and returns a boxed [`DynSolver`]
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        check_year_day(year, day)?;
        if self.solvers.contains_key(&(year, day)) {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        self.solvers.insert(
            (year, day),
            RegistryEntry {
                factory: Box::new(factory),
                parts,
            },
        );
        Ok(self)
    }

    /// Register all solver plugins submitted via `inventory::submit!`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_plugins_where(|_| true)
    }

    /// Register solver plugins that match the given filter predicate
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use aoc_core::RegistryBuilder;
    /// // Register only 2025 solvers tagged "graph"
    /// let registry = RegistryBuilder::new()
    ///     .register_plugins_where(|p| p.year == 2025 && p.tags.contains(&"graph"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_plugins_where<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder and create an immutable registry
    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            solvers: self.solvers,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registry for looking up and creating solvers
pub struct SolverRegistry {
    solvers: BTreeMap<(u16, u8), RegistryEntry>,
}

impl SolverRegistry {
    /// Create a solver instance for a specific year and day
    ///
    /// # Returns
    /// * `Ok(Box<dyn DynSolver>)` - Successfully created solver
    /// * `Err(SolverError)` - Solver not found or parsing failed
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let entry = self
            .solvers
            .get(&(year, day))
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }

    /// Iterate over metadata for all registered solvers, in (year, day) order
    pub fn iter_info(&self) -> impl Iterator<Item = SolverInfo> + '_ {
        self.solvers.iter().map(|(&(year, day), entry)| SolverInfo {
            year,
            day,
            parts: entry.parts,
        })
    }

    /// Get metadata for a specific solver
    pub fn get_info(&self, year: u16, day: u8) -> Option<SolverInfo> {
        self.solvers.get(&(year, day)).map(|entry| SolverInfo {
            year,
            day,
            parts: entry.parts,
        })
    }

    /// Check if a solver exists for year/day
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.solvers.contains_key(&(year, day))
    }

    /// Number of registered solvers
    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }
}

/// Trait for solvers that can register themselves with a registry builder
///
/// Type-erased counterpart of [`Solver`]: no associated types, so plugin
/// instances of different solver types can share a collection. Implemented
/// automatically for every `Solver` through a blanket impl.
pub trait RegisterableSolver: Sync {
    /// Register this solver type with the builder for a specific year and day
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<RegistryBuilder, RegistrationError>;

    /// Number of parts this solver supports
    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<RegistryBuilder, RegistrationError> {
        builder.register(year, day, S::PARTS, move |input: &str| {
            Ok(Box::new(SolverInstance::<S>::new(year, day, input)?))
        })
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// Plugin information for automatic solver registration
///
/// # Example
///
/// ```ignore
/// inventory::submit! {
///     SolverPlugin {
///         year: 2025,
///         day: 8,
///         solver: &Day8Solver,
///         tags: &["2025", "graph"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// The solver instance (type-erased)
    pub solver: &'static dyn RegisterableSolver,
    /// Tags for filtering (e.g., "2025", "graph", "grid")
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::AocParser;

    struct Echo;

    impl AocParser for Echo {
        type SharedData<'a> = &'a str;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            Ok(input.trim())
        }
    }

    impl Solver for Echo {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.to_string()),
                2 => Ok(shared.chars().rev().collect()),
                p => Err(SolveError::PartNotImplemented(p)),
            }
        }
    }

    #[test]
    fn register_and_solve() {
        let registry = Echo
            .register_with(RegistryBuilder::new(), 2025, 3)
            .unwrap()
            .build();

        let mut solver = registry.create_solver(2025, 3, "abc\n").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "abc");
        assert_eq!(solver.solve(2).unwrap().answer, "cba");
        assert_eq!(solver.parts(), 2);
    }

    #[test]
    fn duplicate_registration_rejected() {
        let builder = Echo
            .register_with(RegistryBuilder::new(), 2025, 3)
            .unwrap();
        let err = Echo.register_with(builder, 2025, 3).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateSolver(2025, 3)));
    }

    #[test]
    fn invalid_date_rejected() {
        let err = Echo
            .register_with(RegistryBuilder::new(), 2025, 26)
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidYearDay(2025, 26)));

        let err = Echo
            .register_with(RegistryBuilder::new(), 2014, 1)
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidYearDay(2014, 1)));
    }

    #[test]
    fn missing_solver_not_found() {
        let registry = RegistryBuilder::new().build();
        let err = registry.create_solver(2025, 1, "").unwrap_err();
        assert!(matches!(err, SolverError::NotFound(2025, 1)));
    }

    #[test]
    fn part_out_of_range() {
        let registry = Echo
            .register_with(RegistryBuilder::new(), 2025, 3)
            .unwrap()
            .build();
        let mut solver = registry.create_solver(2025, 3, "abc").unwrap();
        assert!(matches!(
            solver.solve(3),
            Err(SolveError::PartOutOfRange(3))
        ));
    }

    #[test]
    fn info_iteration_is_ordered() {
        let builder = Echo
            .register_with(RegistryBuilder::new(), 2025, 8)
            .unwrap();
        let registry = Echo.register_with(builder, 2025, 2).unwrap().build();

        let info: Vec<_> = registry.iter_info().map(|i| (i.year, i.day)).collect();
        assert_eq!(info, vec![(2025, 2), (2025, 8)]);
        assert_eq!(registry.get_info(2025, 8).unwrap().parts, 2);
        assert!(registry.contains(2025, 2));
        assert!(!registry.contains(2025, 5));
    }
}
