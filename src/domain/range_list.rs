use crate::domain::arithmetic::{StepOutcome, add_seconds, to_offset_seconds};
use crate::domain::models::{CandidateList, RangeConfig};

/// Enumerates every step boundary from `min` up to and including `max`.
pub fn generate(config: &RangeConfig) -> CandidateList {
    let span = to_offset_seconds(config.max()) - to_offset_seconds(config.min());
    let mut times = Vec::with_capacity((span / config.step()) as usize + 1);

    let mut current = config.min();
    loop {
        times.push(current);
        match add_seconds(current, i64::from(config.step())) {
            StepOutcome::Within(next) if next <= config.max() => current = next,
            _ => break,
        }
    }
    CandidateList::from_times(times)
}
