/// Water bookkeeping for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnProfile {
    /// The column's own height, in units.
    pub height: u32,
    /// Tallest height at or left of this column.
    pub left_max: u32,
    /// Tallest height at or right of this column.
    pub right_max: u32,
    /// Resting water surface over this column: min(left_max, right_max).
    pub water_level: u32,
    /// Units of water standing on this column: water_level - height.
    pub trapped: u32,
}

/// Total units of water the row retains, by two-pointer sweep.
///
/// Rows shorter than three columns cannot hold anything.
pub fn trapped_total(heights: &[u32]) -> u64 {
    if heights.len() < 3 {
        return 0;
    }

    let mut left = 0;
    let mut right = heights.len() - 1;
    let mut left_max = 0u32;
    let mut right_max = 0u32;
    let mut total = 0u64;

    // Advance whichever side has the lower wall; the opposite wall is
    // already known to be at least as tall, so the running max on the
    // advancing side alone bounds the water there.
    while left < right {
        if heights[left] < heights[right] {
            if heights[left] >= left_max {
                left_max = heights[left];
            } else {
                total += u64::from(left_max - heights[left]);
            }
            left += 1;
        } else {
            if heights[right] >= right_max {
                right_max = heights[right];
            } else {
                total += u64::from(right_max - heights[right]);
            }
            right -= 1;
        }
    }

    total
}

/// Per-column water profile, by forward and backward prefix-max passes.
///
/// Both maxima include the column itself, so `water_level >= height`
/// always holds and boundary columns get `trapped == 0` for free.
pub fn water_profile(heights: &[u32]) -> Vec<ColumnProfile> {
    let n = heights.len();
    if n == 0 {
        return Vec::new();
    }

    let mut left_max = vec![0u32; n];
    left_max[0] = heights[0];
    for i in 1..n {
        left_max[i] = left_max[i - 1].max(heights[i]);
    }

    let mut right_max = vec![0u32; n];
    right_max[n - 1] = heights[n - 1];
    for i in (0..n - 1).rev() {
        right_max[i] = right_max[i + 1].max(heights[i]);
    }

    (0..n)
        .map(|i| {
            let water_level = left_max[i].min(right_max[i]);
            ColumnProfile {
                height: heights[i],
                left_max: left_max[i],
                right_max: right_max[i],
                water_level,
                trapped: water_level - heights[i],
            }
        })
        .collect()
}

/// Sum of the per-column trapped amounts.
pub fn profile_total(profile: &[ColumnProfile]) -> u64 {
    profile.iter().map(|c| u64::from(c.trapped)).sum()
}
