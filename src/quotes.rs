//! Motivation lines shown on the dashboard

use rand::seq::SliceRandom;

pub const MOTIVATIONS: &[&str] = &[
    "Cold builds resilience. Step into the discomfort.",
    "Your habits today are your hormones tomorrow.",
    "Discipline is biohacking at its core.",
    "Sunlight, movement, and stillness: nature's stack.",
    "Small protocols lead to massive shifts.",
];

/// Random motivation line
pub fn random_motivation() -> &'static str {
    let mut rng = rand::thread_rng();
    MOTIVATIONS.choose(&mut rng).copied().unwrap_or(MOTIVATIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_motivation_from_list() {
        for _ in 0..20 {
            assert!(MOTIVATIONS.contains(&random_motivation()));
        }
    }
}
