use tracing::trace;

/// Fraction of the row where the port search starts.
const START_FRACTION: f64 = 0.7;

/// Window scanned forward from a candidate edge.
const EDGE_WINDOW: usize = 50;
/// Share of the edge window that must be dark.
const EDGE_RATIO: f64 = 0.9;

/// Averaging window used to refine the first ping.
const SEED_WINDOW: usize = 100;
/// Averaging window used when re-searching after a jump.
const JUMP_WINDOW: usize = 120;
/// Largest accepted ping-to-ping change of the raw edge.
const MAX_JUMP: usize = 150;

/// Samples at or below this level count as water column.
const DARK_SAMPLE: u8 = 3;
/// Largest forward mean accepted for a refined index.
const DARK_MEAN: usize = 5;

/// Thresholds for the backward search in `adjust_start`.
const START_RETURN: u8 = 3;
const START_RETURN_FALLBACK: u8 = 5;

/// Moves a start index that landed in a dark region back to just past the
/// last return before it.
///
/// If neither `samples[start]` nor `samples[start - 1]` is zero the index is
/// kept as is.
pub fn adjust_start(samples: &[u8], start: usize) -> usize {
    if start == 0 || start >= samples.len() {
        return start;
    }
    if samples[start] != 0 && samples[start - 1] != 0 {
        return start;
    }

    let head = &samples[..=start];
    head.iter()
        .rposition(|&v| v >= START_RETURN)
        .or_else(|| head.iter().rposition(|&v| v >= START_RETURN_FALLBACK))
        .map_or(start, |i| i + 1)
}

/// Integer mean of up to `window` samples starting at `from`.
fn forward_mean(samples: &[u8], from: usize, window: usize) -> usize {
    let end = from.saturating_add(window).min(samples.len());
    let slice = &samples[from..end];
    let sum: usize = slice.iter().map(|&v| v as usize).sum();
    sum / slice.len().max(1)
}

/// First index at or after `from` where the water column begins: a zero
/// sample followed by a window that is more than 90% zeros.
fn find_edge(samples: &[u8], from: usize) -> Option<usize> {
    (from..samples.len()).find(|&i| {
        if samples[i] != 0 {
            return false;
        }
        let window = &samples[i..(i + EDGE_WINDOW).min(samples.len())];
        let dark = window.iter().filter(|&&v| v < 1).count();
        dark as f64 > window.len() as f64 * EDGE_RATIO
    })
}

/// Sequential port-side tracker.
///
/// Each ping is checked against the previously accepted index, so rows must
/// be fed in ping order.
#[derive(Debug, Default)]
pub struct PortTracker {
    previous: Option<usize>,
}

impl PortTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refines the first ping: the earliest darkest position from `from`
    /// onward whose own sample is dark and whose forward mean is in (0, 5].
    fn seed(samples: &[u8], from: usize) -> usize {
        let mut idx = from;
        let mut best = usize::MAX;
        for i in from..samples.len() {
            if samples[i] > DARK_SAMPLE {
                continue;
            }
            let mean = forward_mean(samples, i, SEED_WINDOW);
            if mean > 0 && mean <= DARK_MEAN && mean < best {
                best = mean;
                idx = i;
            }
        }
        idx
    }

    /// Searches between the previous and the raw index for the darkest
    /// position, never starting before `start`.
    fn reacquire(samples: &[u8], raw: Option<usize>, previous: usize, start: usize) -> Option<usize> {
        let raw = raw.map_or(-1, |r| r as isize);
        let previous = previous as isize;
        let lo = raw.min(previous).max(start as isize);
        let hi = raw.max(previous).min(samples.len() as isize - 1);
        if hi < lo {
            return None;
        }

        let mut candidate = None;
        let mut best = usize::MAX;
        for i in lo as usize..=hi as usize {
            if samples[i] > DARK_SAMPLE {
                continue;
            }
            let mean = forward_mean(samples, i, JUMP_WINDOW);
            if mean <= DARK_MEAN && mean <= best {
                best = mean;
                candidate = Some(i);
            }
        }
        candidate
    }

    /// Tracks one ping and records the result for the next one.
    pub fn next(&mut self, samples: &[u8]) -> usize {
        if samples.is_empty() {
            self.previous = Some(0);
            return 0;
        }

        let custom_start = (samples.len() as f64 * START_FRACTION) as usize;
        let start = adjust_start(samples, custom_start);
        let raw = find_edge(samples, start);

        let idx = match self.previous {
            None => Some(Self::seed(samples, raw.unwrap_or(custom_start))),
            Some(previous) => {
                let jumped = raw.is_none_or(|r| r.abs_diff(previous) > MAX_JUMP);
                if jumped {
                    trace!(?raw, previous, "Port edge jumped, re-searching");
                    Self::reacquire(samples, raw, previous, start).or(raw)
                } else {
                    raw
                }
            }
        };

        let idx = idx.unwrap_or(samples.len() - 1);
        self.previous = Some(idx);
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_start_keeps_bright_start() {
        let samples = [9u8; 10];
        assert_eq!(adjust_start(&samples, 7), 7);
    }

    #[test]
    fn test_adjust_start_moves_past_last_return() {
        let samples = [5, 5, 5, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(adjust_start(&samples, 7), 3);
    }

    #[test]
    fn test_adjust_start_checks_previous_sample() {
        let samples = [4, 4, 0, 2, 1, 1];
        // samples[3] is nonzero but samples[2] is zero
        assert_eq!(adjust_start(&samples, 3), 2);
    }

    #[test]
    fn test_adjust_start_without_returns_keeps_start() {
        let samples = [1u8, 2, 0, 0, 0];
        assert_eq!(adjust_start(&samples, 3), 3);
    }

    #[test]
    fn test_find_edge_needs_mostly_zero_window() {
        // window from index 2 is [0, 1, 0, 0]: only 75% zero
        let samples = [9u8, 9, 0, 1, 0, 0];
        assert_eq!(find_edge(&samples, 0), Some(4));
        assert_eq!(find_edge(&[9u8; 8], 0), None);
    }

    #[test]
    fn test_forward_mean_clips_at_row_end() {
        let samples = [0u8, 0, 6, 6];
        assert_eq!(forward_mean(&samples, 2, 100), 6);
        assert_eq!(forward_mean(&samples, 0, 3), 2);
    }

    #[test]
    fn test_seed_ties_keep_earliest_index() {
        // no edge anywhere, every position from the start has mean 1
        let samples = [1u8; 200];
        let mut tracker = PortTracker::new();
        assert_eq!(tracker.next(&samples), 140);
    }

    #[test]
    fn test_small_change_keeps_raw_edge() {
        let mut tracker = PortTracker::new();
        let first = [5, 5, 5, 0, 0, 0, 0, 0, 0, 0];
        let second = [5, 5, 5, 5, 0, 0, 0, 0, 0, 0];
        assert_eq!(tracker.next(&first), 3);
        assert_eq!(tracker.next(&second), 4);
    }

    #[test]
    fn test_no_edge_falls_back_to_row_end() {
        let mut tracker = PortTracker::new();
        tracker.next(&[5, 5, 5, 0, 0, 0, 0, 0, 0, 0]);
        // no zeros at all and the previous index is bright
        assert_eq!(tracker.next(&[9u8; 10]), 9);
    }

    #[test]
    fn test_jump_is_reacquired() {
        let mut first = vec![10u8; 300];
        first.extend(vec![0u8; 700]);
        let mut tracker = PortTracker::new();
        assert_eq!(tracker.next(&first), 300);

        // raw edge at 900 is 600 samples from the previous index and its
        // forward mean is bright, so the dim band at 700..800 wins
        let mut second = vec![10u8; 1000];
        second[700..800].fill(2);
        second[900..950].fill(0);
        second[950..].fill(255);
        assert_eq!(tracker.next(&second), 709);
    }

    #[test]
    fn test_reacquire_never_searches_before_start() {
        let mut first = vec![10u8; 100];
        first.extend(vec![0u8; 900]);
        let mut tracker = PortTracker::new();
        assert_eq!(tracker.next(&first), 100);

        // the dim band at 200..300 lies between the previous index and the
        // start at 700, so it is out of range and the raw edge is kept
        let mut second = vec![10u8; 1000];
        second[200..300].fill(2);
        second[900..950].fill(0);
        second[950..].fill(255);
        assert_eq!(tracker.next(&second), 900);
    }

    #[test]
    fn test_missing_edge_is_reacquired_up_to_previous() {
        let mut first = vec![10u8; 900];
        first.extend(vec![0u8; 100]);
        let mut tracker = PortTracker::new();
        assert_eq!(tracker.next(&first), 900);

        // no zero sample, so no raw edge; the search covers 700..=900 and the
        // forward mean of the dim band stays at 1 up to index 793
        let mut second = vec![10u8; 1000];
        second[780..900].fill(1);
        assert_eq!(tracker.next(&second), 793);
    }
}
