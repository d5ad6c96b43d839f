use crate::{bin::Bin, tie_break::TieBreaker};

/// Reduces a sorted bin sequence toward `target_bin_count` bins by merging the closest neighbors.
///
/// The cutoff is the gap that would have to be discarded to keep `target_bin_count` bins:
/// neighbors closer than the cutoff are merged, farther ones are kept, and exact ties are
/// left to `tie_breaker` once the first of them has been merged. The result is never larger
/// than the input but may miss the target by a few bins.
pub fn trim_bins<T: TieBreaker>(
    bins: Vec<Bin>,
    target_bin_count: usize,
    tie_breaker: &mut T,
) -> Vec<Bin> {
    if bins.len() < 2 || bins.len() < target_bin_count {
        return bins;
    }

    let mut gaps: Vec<f64> = bins
        .windows(2)
        .map(|pair| pair[1].position - pair[0].position)
        .collect();
    gaps.sort_by(f64::total_cmp);
    // a single target bin discards every gap
    let cutoff = gaps
        .get(bins.len() - target_bin_count)
        .copied()
        .unwrap_or(f64::INFINITY);

    let nb_bins_before = bins.len();
    let mut trimmed = Vec::with_capacity(bins.len());
    let mut cutoff_merged = false;
    let mut nb_ties = 0;
    let mut iter = bins.into_iter();
    let Some(mut last_kept) = iter.next() else {
        return trimmed;
    };
    for next in iter {
        let diff = next.position - last_kept.position;
        let merge = if diff < cutoff {
            true
        } else if diff == cutoff {
            let merge = !cutoff_merged || tie_breaker.merge_tie(nb_ties);
            nb_ties += 1;
            cutoff_merged |= merge;
            merge
        } else {
            false
        };

        if merge {
            last_kept.merge_from(&next);
        } else {
            trimmed.push(last_kept);
            last_kept = next;
        }
    }
    trimmed.push(last_kept);

    log::debug!(
        "trimmed histogram from {nb_bins_before} to {} bins (target {target_bin_count}, cutoff {cutoff})",
        trimmed.len()
    );
    trimmed
}
