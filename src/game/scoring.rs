/// Scoring engine for duels.
///
/// Pure mapping from (correctness, answer latency) to points; owns no state.

use crate::config::game::{MAX_POINTS_PER_ROUND, SPEED_BONUS_MULTIPLIER};

/// Points for one guess.
///
/// Incorrect answers and answers at or past the timeout score zero. Correct
/// answers earn the base points plus a speed bonus proportional to the time
/// left on the clock. Integer arithmetic at millisecond resolution with floor
/// division, so a faster correct answer never scores less than a slower one.
pub fn score(correct: bool, elapsed_ms: u64, timeout_ms: u64) -> u32 {
    if !correct || elapsed_ms >= timeout_ms {
        return 0;
    }
    let remaining_ms = timeout_ms - elapsed_ms;
    MAX_POINTS_PER_ROUND + ((remaining_ms * SPEED_BONUS_MULTIPLIER as u64) / 1000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::game::round_timeout_ms;

    #[test]
    fn incorrect_answer_scores_zero() {
        assert_eq!(score(false, 0, round_timeout_ms()), 0);
    }

    #[test]
    fn answer_at_or_past_timeout_scores_zero() {
        assert_eq!(score(true, round_timeout_ms(), round_timeout_ms()), 0);
        assert_eq!(score(true, round_timeout_ms() + 1, round_timeout_ms()), 0);
    }

    #[test]
    fn instant_answer_earns_full_bonus() {
        // 100 base + 10 bonus points per second left on a 10s clock.
        assert_eq!(score(true, 0, 10_000), 200);
    }

    #[test]
    fn bonus_has_millisecond_resolution() {
        // 2.5s left -> 25 bonus points.
        assert_eq!(score(true, 7_500, 10_000), 125);
    }

    #[test]
    fn faster_correct_answer_never_scores_less() {
        let timeout = round_timeout_ms();
        let mut last = u32::MAX;
        for elapsed in (0..=timeout).step_by(250) {
            let points = score(true, elapsed, timeout);
            assert!(points <= last, "score increased as answers got slower");
            last = points;
        }
    }
}
