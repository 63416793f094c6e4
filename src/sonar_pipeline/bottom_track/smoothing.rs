/// Centered moving average with half-width `half_window`.
///
/// Near either end the window is clipped to the available indices and the
/// mean divides by the clipped size, so no padding values leak in.
pub fn smooth_line(line: &[usize], half_window: usize) -> Vec<usize> {
    let Some(last) = line.len().checked_sub(1) else {
        return Vec::new();
    };

    (0..line.len())
        .map(|i| {
            let lo = i.saturating_sub(half_window);
            let hi = i.saturating_add(half_window).min(last);
            let window = &line[lo..=hi];
            window.iter().sum::<usize>() / window.len()
        })
        .collect()
}
