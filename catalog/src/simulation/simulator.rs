//! Main simulator harness for deterministic simulation testing.
//!
//! Drives an `OrderedIndex` with generated operations, mirrors every
//! operation on a `ReferenceModel`, and runs the invariant checks after each
//! step.

use crate::finder::{self, Disambiguation, SearchField};
use crate::index::OrderedIndex;

use super::invariants::{InvariantChecker, InvariantViolation, ReferenceModel};
use super::op_gen::{OpGenConfig, Operation, OperationGenerator};

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Operation generation configuration.
    pub op_config: OpGenConfig,
    /// Run the full model comparison every `full_check_interval` operations.
    pub full_check_interval: usize,
}

impl SimulatorConfig {
    /// Create a new simulator config with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            op_config: OpGenConfig::default(),
            full_check_interval: 1,
        }
    }

    /// Set the operation configuration.
    #[must_use]
    pub fn with_op_config(mut self, config: OpGenConfig) -> Self {
        self.op_config = config;
        self
    }

    /// Only compare against the model every `interval` operations.
    #[must_use]
    pub const fn with_full_check_interval(mut self, interval: usize) -> Self {
        self.full_check_interval = interval;
        self
    }
}

/// Results from a simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The seed used for this simulation.
    pub seed: u64,
    /// Number of operations applied.
    pub operations: usize,
    /// Number of mutations the index accepted.
    pub mutations_applied: usize,
    /// Number of mutations rejected (duplicate titles) or not found.
    pub mutations_rejected: usize,
    /// Items left in the index at the end.
    pub final_count: usize,
    /// Height of the index at the end.
    pub final_height: usize,
    /// Titles in ascending order at the end.
    pub final_titles: Vec<String>,
    /// Invariant violations detected.
    pub invariant_violations: Vec<InvariantViolation>,
}

impl SimulationResult {
    /// Check if the simulation passed (no invariant violations).
    #[must_use]
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }
}

/// The main simulator harness.
pub struct Simulator {
    config: SimulatorConfig,
    generator: OperationGenerator,
    index: OrderedIndex,
    model: ReferenceModel,
    checker: InvariantChecker,
    mutations_applied: usize,
    mutations_rejected: usize,
}

impl Simulator {
    /// Create a new simulator with the given configuration.
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        let generator = OperationGenerator::with_config(config.seed, config.op_config.clone());
        Self {
            config,
            generator,
            index: OrderedIndex::new(),
            model: ReferenceModel::new(),
            checker: InvariantChecker::new(),
            mutations_applied: 0,
            mutations_rejected: 0,
        }
    }

    /// Apply `operations` generated operations and report the outcome.
    pub fn run(&mut self, operations: usize) -> SimulationResult {
        for step in 0..operations {
            let operation = self.generator.next_operation();
            self.apply(operation, step);

            self.checker.check_ordering(&self.index, step);
            self.checker.check_count(&self.index, step);
            let interval = self.config.full_check_interval.max(1);
            if step % interval == 0 || step + 1 == operations {
                self.checker
                    .check_model_agreement(&self.index, &self.model, step);
            }
        }

        SimulationResult {
            seed: self.config.seed,
            operations,
            mutations_applied: self.mutations_applied,
            mutations_rejected: self.mutations_rejected,
            final_count: self.index.count(),
            final_height: self.index.height(),
            final_titles: self.index.in_order().map(|item| item.title.clone()).collect(),
            invariant_violations: self.checker.take_violations(),
        }
    }

    fn apply(&mut self, operation: Operation, step: usize) {
        match operation {
            Operation::Insert(item) => {
                let expected = self.model.insert(item.clone());
                let actual = self.index.insert(item);
                self.tally(actual.is_ok());
                self.checker.check_outcome(&actual, &expected, step);
            }
            Operation::Remove(title) => {
                let expected = self.model.remove(&title);
                let actual = self.index.remove(&title);
                self.tally(actual.is_some());
                self.checker.check_outcome(&actual, &expected, step);
            }
            Operation::Update { old_title, item } => {
                let expected = self.model.update(&old_title, item.clone());
                let actual = self.index.update(&old_title, item);
                self.tally(matches!(actual, Ok(Some(_))));
                self.checker.check_outcome(&actual, &expected, step);
            }
            Operation::Search(title) => {
                let actual = self.index.search(&title);
                let expected = self.model.get(&title);
                self.checker.check_outcome(&actual, &expected, step);
            }
            Operation::Fuzzy { field, keyword } => {
                let actual = finder::search_by_field(&self.index, &keyword, field);
                let expected = self.model.matching(field, &keyword);
                self.checker.check_outcome(&actual, &expected, step);
            }
            Operation::Disambiguate(keyword) => {
                let actual = finder::disambiguate(&self.index, &keyword);
                let matches = self.model.matching(SearchField::Title, &keyword);
                let expected = match matches.len() {
                    0 => Disambiguation::NoMatch,
                    1 => Disambiguation::Unique(matches[0]),
                    _ => Disambiguation::Ambiguous(finder::rank_matches(&keyword, matches)),
                };
                self.checker.check_outcome(&actual, &expected, step);
            }
            Operation::Clear => {
                self.index.clear();
                self.model.clear();
            }
        }
    }

    const fn tally(&mut self, applied: bool) {
        if applied {
            self.mutations_applied += 1;
        } else {
            self.mutations_rejected += 1;
        }
    }
}
