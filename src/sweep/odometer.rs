use super::grid::{ParameterGrid, TestIndex};

/// Carry past the most-significant dimension: the sweep is complete. This is
/// the normal termination signal, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Exhausted;

/// Dimensions (by position) that were reset to 0 while carrying.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Rollover {
    rolled: Vec<usize>,
}

impl Rollover {
    pub(crate) fn contains(&self, position: usize) -> bool {
        self.rolled.contains(&position)
    }
}

/// Advances the mixed-radix index by one, starting the carry chain at
/// `start`. Position 0 is the least-significant (fastest-varying) dimension;
/// a slot that cannot be incremented resets to 0 and the carry moves one
/// position up.
pub(crate) fn increment_from(
    index: &mut TestIndex,
    grid: &ParameterGrid,
    start: usize,
) -> Result<Rollover, Exhausted> {
    let mut rollover = Rollover::default();
    let mut position = start;

    loop {
        let Some(dimension) = grid.dimension(position) else {
            return Err(Exhausted);
        };
        let slot = index.slot(position).unwrap_or(0);
        if slot + 1 < dimension.values.len() {
            index.set_slot(position, slot + 1);
            return Ok(rollover);
        }
        index.set_slot(position, 0);
        rollover.rolled.push(position);
        position += 1;
    }
}
