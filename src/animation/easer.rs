use crate::animation::ease::Ease;
use crate::foundation::error::{TextfxError, TextfxResult};

/// Steps an easing function over a fixed number of steps.
#[derive(Clone, Debug)]
pub struct EasingTracker {
    ease: Ease,
    total_steps: usize,
    clamp: bool,
    current_step: usize,
    progress_ratio: f64,
    eased_value: f64,
    step_delta: f64,
}

impl EasingTracker {
    pub fn new(ease: Ease, total_steps: usize, clamp: bool) -> TextfxResult<Self> {
        if total_steps == 0 {
            return Err(TextfxError::validation("EasingTracker total_steps must be > 0"));
        }
        Ok(Self {
            ease,
            total_steps,
            clamp,
            current_step: 0,
            progress_ratio: 0.0,
            eased_value: 0.0,
            step_delta: 0.0,
        })
    }

    /// Advance one step and return the new eased value. Saturates at `total_steps`.
    pub fn step(&mut self) -> f64 {
        if self.current_step < self.total_steps {
            self.current_step += 1;
        }
        self.progress_ratio = self.current_step as f64 / self.total_steps as f64;
        let mut eased = self.ease.apply(self.progress_ratio);
        if self.clamp {
            eased = eased.clamp(0.0, 1.0);
        }
        self.step_delta = eased - self.eased_value;
        self.eased_value = eased;
        eased
    }

    pub fn reset(&mut self) {
        self.current_step = 0;
        self.progress_ratio = 0.0;
        self.eased_value = 0.0;
        self.step_delta = 0.0;
    }

    pub fn is_complete(&self) -> bool {
        self.current_step >= self.total_steps
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn progress_ratio(&self) -> f64 {
        self.progress_ratio
    }

    pub fn eased_value(&self) -> f64 {
        self.eased_value
    }

    /// Signed change of the eased value produced by the last step.
    pub fn step_delta(&self) -> f64 {
        self.step_delta
    }
}

/// Elements that entered or left coverage on one [`SequenceEaser::step`].
///
/// At most one of the two slices is non-empty.
#[derive(Debug, PartialEq, Eq)]
pub struct EasedStep<'a, T> {
    pub added: &'a [T],
    pub removed: &'a [T],
}

/// Applies an easing function to progress through an ordered sequence.
///
/// Coverage is the prefix `sequence[..floor(eased * len)]` (clamped to the sequence). Each step
/// reports the contiguous run that entered or left coverage, so for any curve (bounce, elastic)
/// "all added minus all removed" is always exactly the covered prefix.
#[derive(Clone, Debug)]
pub struct SequenceEaser<T> {
    sequence: Vec<T>,
    tracker: EasingTracker,
    covered: usize,
}

impl<T> SequenceEaser<T> {
    pub fn new(sequence: Vec<T>, ease: Ease, total_steps: usize) -> TextfxResult<Self> {
        Ok(Self {
            sequence,
            tracker: EasingTracker::new(ease, total_steps, false)?,
            covered: 0,
        })
    }

    pub fn step(&mut self) -> EasedStep<'_, T> {
        let eased = self.tracker.step();
        let next = self.coverage_for(eased);
        let prev = self.covered;
        self.covered = next;
        if next >= prev {
            EasedStep {
                added: &self.sequence[prev..next],
                removed: &[],
            }
        } else {
            EasedStep {
                added: &[],
                removed: &self.sequence[next..prev],
            }
        }
    }

    fn coverage_for(&self, eased: f64) -> usize {
        let len = self.sequence.len();
        let raw = (eased * len as f64).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(len)
        }
    }

    /// Elements currently covered by the eased progress.
    pub fn visible(&self) -> &[T] {
        &self.sequence[..self.covered]
    }

    pub fn is_complete(&self) -> bool {
        self.tracker.is_complete()
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.covered = 0;
    }

    pub fn tracker(&self) -> &EasingTracker {
        &self.tracker
    }

    pub fn sequence(&self) -> &[T] {
        &self.sequence
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/easer.rs"]
mod tests;
