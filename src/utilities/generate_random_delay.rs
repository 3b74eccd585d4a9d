use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{sleep, Duration};

/// Courtesy pause between two requests, uniform in `[min_delay, max_delay)` milliseconds.
pub async fn generate_random_delay(min_delay: u64, max_delay: u64) {
    let delay = random_delay_ms(min_delay, max_delay);

    println!("{}", format!("Delay: {} milliseconds", delay).dimmed());
    sleep(Duration::from_millis(delay)).await;
}

fn random_delay_ms(min_delay: u64, max_delay: u64) -> u64 {
    if max_delay <= min_delay {
        return min_delay;
    }
    let mut rng = StdRng::from_entropy();
    rng.gen_range(min_delay..max_delay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_stays_within_range() {
        for _ in 0..100 {
            let delay = random_delay_ms(800, 1600);
            assert!((800..1600).contains(&delay));
        }
    }

    #[test]
    fn empty_range_uses_minimum() {
        assert_eq!(random_delay_ms(500, 500), 500);
        assert_eq!(random_delay_ms(900, 100), 900);
    }
}
