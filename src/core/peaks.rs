//! Local-maximum peak detection with a minimum spacing constraint.

/// Indices of strict local maxima.
///
/// A flat-topped peak (a plateau whose neighbours on both sides are lower)
/// reports its middle sample, rounded down. The first and last samples are
/// never peaks.
pub fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }

    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}

/// Local maxima no closer than `min_distance` samples to each other.
///
/// Conflicts are resolved by height: the tallest remaining peak suppresses
/// every neighbour within `min_distance`, then the next tallest survivor does
/// the same. Equal heights favour the later peak. The result is strictly
/// increasing.
pub fn find_peaks(x: &[f64], min_distance: usize) -> Vec<usize> {
    let peaks = local_maxima(x);
    let min_distance = min_distance.max(1);
    if min_distance == 1 || peaks.len() < 2 {
        return peaks;
    }

    let mut by_height: Vec<usize> = (0..peaks.len()).collect();
    by_height.sort_by(|&a, &b| x[peaks[a]].total_cmp(&x[peaks[b]]));

    let mut keep = vec![true; peaks.len()];
    for &j in by_height.iter().rev() {
        if !keep[j] {
            continue;
        }

        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < min_distance {
            keep[k - 1] = false;
            k -= 1;
        }

        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < min_distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(peak, kept)| kept.then_some(peak))
        .collect()
}
