use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SweepError;

use super::condition::{EvalContext, SkipCondition};
use super::feedback::Feedback;
use super::grid::{DURATION_DIMENSION, ParamValue, ParameterGrid, THROUGHPUT_DIMENSION, TestIndex};
use super::materialize::{MaterializedParameters, materialize};
use super::odometer::{Exhausted, increment_from};

/// Test and series identifiers are drawn from this inclusive range. Wide
/// enough to avoid collisions within one suite; callers needing global
/// uniqueness should namespace by run.
const MAX_RANDOM_ID: u32 = 100_000;

/// Validated test specification: the ordered grid, an optional compiled
/// skip condition, and the optional credit-depletion settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSpec {
    pub grid: ParameterGrid,
    pub skip_remaining_throughput: Option<SkipCondition>,
    pub depletion: Option<DepletionConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepletionConfig {
    pub approximate_timeout_hours: i64,
}

/// Result of one session step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    NextTest(MaterializedParameters),
    Completed,
}

/// Single-owner sweep cursor. Each `advance` call consumes the previous
/// test's feedback and yields either the next configuration to run or the
/// completion marker. The session never performs I/O; running the test and
/// parsing its output belong to the caller.
#[derive(Debug)]
pub struct SweepSession {
    spec: TestSpec,
    index: Option<TestIndex>,
    current: Option<MaterializedParameters>,
    completed: bool,
    steps: u64,
    step_limit: u64,
    rng: StdRng,
}

impl SweepSession {
    pub fn new(spec: TestSpec) -> Self {
        Self::with_rng(spec, StdRng::from_entropy())
    }

    /// Session with a fixed RNG seed, for reproducible id sequences.
    pub fn with_seed(spec: TestSpec, seed: u64) -> Self {
        Self::with_rng(spec, StdRng::seed_from_u64(seed))
    }

    fn with_rng(spec: TestSpec, rng: StdRng) -> Self {
        // The grid's exact combination count bounds the sweep; a correct
        // engine can never take more steps than that, skip or no skip.
        let step_limit = spec.grid.combination_count();
        Self {
            spec,
            index: None,
            current: None,
            completed: false,
            steps: 0,
            step_limit,
            rng,
        }
    }

    /// Overrides the step safety cap computed from the grid.
    #[must_use]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn spec(&self) -> &TestSpec {
        &self.spec
    }

    pub fn current(&self) -> Option<&MaterializedParameters> {
        self.current.as_ref()
    }

    pub fn index(&self) -> Option<&TestIndex> {
        self.index.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Advances to the next test configuration.
    ///
    /// The first call seeds the all-zero index and ignores `feedback`. Later
    /// calls evaluate the configured skip condition against `feedback`; when
    /// it holds, the remaining throughput candidates under the current outer
    /// configuration are abandoned in one bulk skip.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::SessionCompleted` when called after completion
    /// and `SweepError::DidNotTerminate` when the step safety cap is hit.
    pub fn advance(&mut self, feedback: Option<&Feedback>) -> Result<StepOutcome, SweepError> {
        if self.completed {
            return Err(SweepError::SessionCompleted);
        }

        let next = match self.index.clone() {
            None => {
                let series_id = self.mint_id();
                Some((TestIndex::zeroed(&self.spec.grid), series_id))
            }
            Some(index) => self.next_index(index, feedback),
        };

        let Some((index, series_id)) = next else {
            self.completed = true;
            self.index = None;
            self.current = None;
            return Ok(StepOutcome::Completed);
        };

        self.steps += 1;
        if self.steps > self.step_limit {
            return Err(SweepError::DidNotTerminate {
                limit: self.step_limit,
            });
        }

        let test_id = self.mint_id();
        let parameters = materialize(&self.spec.grid, &index, test_id, series_id)?;
        self.index = Some(index);
        self.current = Some(parameters.clone());
        Ok(StepOutcome::NextTest(parameters))
    }

    /// Computes the successor of `index`, or `None` on exhaustion.
    fn next_index(
        &mut self,
        mut index: TestIndex,
        feedback: Option<&Feedback>,
    ) -> Option<(TestIndex, u32)> {
        let throughput_pos = self.spec.grid.throughput_position();
        let previous_series = self.current.as_ref().map(|cur| cur.throughput_series_id);

        if self.should_skip(feedback) {
            // Saturation: every larger throughput target under this outer
            // configuration is assumed futile. Reset everything up to and
            // including the throughput dimension and carry past it.
            for position in 0..=throughput_pos {
                index.set_slot(position, 0);
            }
            match increment_from(&mut index, &self.spec.grid, throughput_pos + 1) {
                Ok(_) => {
                    let series_id = self.mint_id();
                    Some((index, series_id))
                }
                Err(Exhausted) => None,
            }
        } else {
            match increment_from(&mut index, &self.spec.grid, 0) {
                Ok(rollover) => {
                    let series_id = match previous_series {
                        Some(series_id) if !rollover.contains(throughput_pos) => series_id,
                        Some(_) | None => self.mint_id(),
                    };
                    Some((index, series_id))
                }
                Err(Exhausted) => None,
            }
        }
    }

    fn should_skip(&self, feedback: Option<&Feedback>) -> bool {
        let (Some(condition), Some(feedback), Some(current)) = (
            self.spec.skip_remaining_throughput.as_ref(),
            feedback,
            self.current.as_ref(),
        ) else {
            return false;
        };
        let ctx = EvalContext {
            requested_mb_per_sec: current.cluster_throughput_mb_per_sec,
            feedback,
        };
        condition.evaluate(&ctx).is_truthy()
    }

    /// Parameters for the credit-depletion phase of the test in flight: the
    /// same grid and index, with every duration forced to the depletion
    /// timeout and every throughput forced to the uncapped sentinel.
    ///
    /// # Errors
    ///
    /// Fails when the specification has no `depletion_configuration` or no
    /// test is currently in flight.
    pub fn depletion_parameters(&self) -> Result<MaterializedParameters, SweepError> {
        let depletion = self
            .spec
            .depletion
            .as_ref()
            .ok_or(SweepError::DepletionNotConfigured)?;
        let current = self.current.as_ref().ok_or(SweepError::NoCurrentTest)?;
        let index = self.index.as_ref().ok_or(SweepError::NoCurrentTest)?;

        let duration_sec = depletion.approximate_timeout_hours * 60 * 60;
        let mut grid = self.spec.grid.clone();
        grid.override_dimension(DURATION_DIMENSION, ParamValue::Int(duration_sec));
        grid.override_dimension(THROUGHPUT_DIMENSION, ParamValue::Int(-1));

        materialize(&grid, index, current.test_id, current.throughput_series_id)
    }

    fn mint_id(&mut self) -> u32 {
        self.rng.gen_range(0..=MAX_RANDOM_ID)
    }
}
