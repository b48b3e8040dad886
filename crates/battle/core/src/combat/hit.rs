//! Percent-roll checks.

/// A skill lands when the `[0, 100)` roll is below its accuracy.
///
/// Accuracy 100 never misses; accuracy 0 always misses.
pub fn check_hit(roll: u32, accuracy: u8) -> bool {
    roll < u32::from(accuracy)
}

/// A landed skill is critical when a second `[0, 100)` roll is below its
/// critical chance.
pub fn check_critical(roll: u32, critical_chance: u8) -> bool {
    roll < u32::from(critical_chance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_bounds() {
        assert!(check_hit(99, 100));
        assert!(!check_hit(0, 0));
        assert!(check_hit(79, 80));
        assert!(!check_hit(80, 80));
    }

    #[test]
    fn critical_bounds() {
        assert!(!check_critical(5, 5));
        assert!(check_critical(4, 5));
        assert!(!check_critical(0, 0));
    }
}
