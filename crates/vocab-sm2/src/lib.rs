//! Pure SuperMemo-2 kernel.
//!
//! <https://en.wikipedia.org/wiki/SuperMemo>
//!
//! The kernel is a single function threading `(repetition, interval,
//! easiness)` through one graded recall. Intervals are real numbers of days:
//! the caller feeds the elapsed days between sightings, not the previously
//! computed interval.

/// Complete blackout
pub const GRADE_BLACKOUT: i32 = 0;
/// Incorrect response; the correct one remembered
pub const GRADE_INCORRECT_REMEMBERED: i32 = 1;
/// Incorrect response; the correct one seemed easy to recall
pub const GRADE_INCORRECT_EASY: i32 = 2;
/// Correct response recalled with serious difficulty
pub const GRADE_CORRECT_HARD: i32 = 3;
/// Correct response after a hesitation
pub const GRADE_CORRECT_HESITATION: i32 = 4;
/// Perfect response
pub const GRADE_PERFECT: i32 = 5;

/// Easiness factor assigned to a word never seen before
pub const INITIAL_EASINESS_FACTOR: f64 = 2.5;

/// Easiness never drops below this floor
pub const MIN_EASINESS_FACTOR: f64 = 1.3;

/// One SuperMemo-2 step.
///
/// `grade` is the recall quality in `0..=5`, `repetition` the count of
/// consecutive successful recalls so far, `interval` the days elapsed since
/// the previous sighting, `easiness` the current easiness factor. Returns the
/// updated `(repetition, interval, easiness)` triple; the returned interval
/// is the days until the next review is due.
pub fn sm2(grade: i32, repetition: u32, interval: f64, easiness: f64) -> (u32, f64, f64) {
    let (repetition, interval) = if grade >= GRADE_CORRECT_HARD {
        let next = match repetition {
            0 => 1.0,
            1 => 6.0,
            _ => (interval * easiness).round(),
        };
        (repetition + 1, next)
    } else {
        (0, 1.0)
    };

    let q = f64::from(5 - grade);
    let easiness = (easiness + (0.1 - q) * (0.08 + q * 0.02)).max(MIN_EASINESS_FACTOR);

    (repetition, interval, easiness)
}
