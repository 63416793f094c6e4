/// Fraction of the row searched for the starboard edge.
const SEARCH_FRACTION: f64 = 0.4;
const EDGE_WINDOW: usize = 50;
const EDGE_RATIO: f64 = 0.9;

/// Finds the first starboard index where the return begins: a nonzero
/// sample followed by a window that is more than 90% nonzero.
///
/// Only the first 40% of the row is searched and the window never reaches
/// past that limit. Returns 0 when nothing qualifies.
pub fn track_starboard_ping(samples: &[u8]) -> usize {
    let limit = (samples.len() as f64 * SEARCH_FRACTION) as usize;

    (0..limit)
        .find(|&i| {
            if samples[i] == 0 {
                return false;
            }
            let window = &samples[i..(i + EDGE_WINDOW).min(limit)];
            let lit = window.iter().filter(|&&v| v > 0).count();
            lit as f64 > window.len() as f64 * EDGE_RATIO
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_first_sustained_return() {
        let mut samples = vec![0u8; 10];
        samples.extend(vec![40u8; 90]);
        assert_eq!(track_starboard_ping(&samples), 10);
    }

    #[test]
    fn test_isolated_return_is_skipped() {
        let mut samples = vec![0u8; 100];
        samples[3] = 80;
        samples[20..].fill(30);
        assert_eq!(track_starboard_ping(&samples), 20);
    }

    #[test]
    fn test_return_beyond_search_limit_defaults_to_zero() {
        let mut samples = vec![0u8; 100];
        samples[50..].fill(30);
        assert_eq!(track_starboard_ping(&samples), 0);
        assert_eq!(track_starboard_ping(&[]), 0);
    }
}
