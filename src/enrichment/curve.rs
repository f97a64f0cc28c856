use anyhow::{Result, anyhow};
use serde::Serialize;
use single_utilities::traits::FloatOps;
use std::collections::{HashMap, HashSet};

/// A running-score enrichment curve for one pathway.
///
/// `running_score[i]` is the cumulative score after rank `i + 1`; plotted
/// against ranks `1..=N` it forms the step curve. Hit ranks mark the
/// positions of pathway members for tick marks, and the signed peak is the
/// enrichment statistic with its rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentCurve<T> {
    /// Cumulative running score after each rank, length N.
    pub running_score: Vec<T>,
    /// 1-based ranks at which pathway members occur, ascending.
    pub hit_ranks: Vec<usize>,
    /// Signed maximum deviation of the running score (the enrichment score).
    pub peak_score: T,
    /// 1-based rank at which the peak occurs (first occurrence on ties).
    pub peak_rank: usize,
}

/// Rank features by statistic, descending.
///
/// Ties are broken by feature name, ascending, so the ranking is
/// deterministic regardless of map iteration order.
pub fn rank_features<T>(stats: &HashMap<String, T>) -> Vec<(String, T)>
where
    T: FloatOps,
{
    let mut ranked: Vec<(String, T)> = stats.iter().map(|(f, &s)| (f.clone(), s)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}

/// Compute the running-score enrichment curve for one pathway.
///
/// Features are ranked by `stats` descending; walking down the ranking, the
/// score increments at each member of `members` by `|s|^weight / N_R` (where
/// `N_R` sums `|s|^weight` over the members) and decrements at each
/// non-member by `1 / (N - n_hits)`. Total increments and total decrements
/// both equal one, so the walk returns to zero. `weight = 1` matches the
/// classic GSEA convention; `weight = 0` gives the unweighted
/// Kolmogorov-Smirnov statistic.
///
/// Members absent from `stats` are excluded silently: the ranked universe is
/// the statistic vector as embedded, with no cross-check against the assay.
///
/// # Arguments
///
/// * `stats` - Feature id → ranking statistic (the ranked universe)
/// * `members` - Feature ids belonging to the pathway
/// * `weight` - Exponent applied to statistic magnitudes at hits
///
/// # Returns
///
/// The [`EnrichmentCurve`], or an error if `stats` is empty or no member of
/// the pathway occurs in `stats`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use pathway_panels::enrichment::running_score;
///
/// let stats = HashMap::from([
///     ("g1".to_string(), 2.0),
///     ("g2".to_string(), 1.0),
///     ("g3".to_string(), -0.5),
///     ("g4".to_string(), -1.0),
/// ]);
/// let members = vec!["g1".to_string(), "g2".to_string(), "g3".to_string()];
/// let curve = running_score(&stats, &members, 1.0).unwrap();
/// assert_eq!(curve.hit_ranks, vec![1, 2, 3]);
/// assert!(curve.peak_score > 0.0);
/// ```
pub fn running_score<T>(
    stats: &HashMap<String, T>,
    members: &[String],
    weight: T,
) -> Result<EnrichmentCurve<T>>
where
    T: FloatOps,
{
    if stats.is_empty() {
        return Err(anyhow!("Feature statistics cannot be empty"));
    }

    let member_set: HashSet<&str> = members.iter().map(|m| m.as_str()).collect();
    let ranked = rank_features(stats);
    let n = ranked.len();
    let n_hits = ranked
        .iter()
        .filter(|(f, _)| member_set.contains(f.as_str()))
        .count();
    if n_hits == 0 {
        return Err(anyhow!(
            "None of the {} pathway members occur in the feature statistics",
            members.len()
        ));
    }

    // N_R normalizes hit increments so they sum to one; all-zero member
    // statistics fall back to uniform steps.
    let mut n_r = T::zero();
    for (feature, stat) in &ranked {
        if member_set.contains(feature.as_str()) {
            n_r = n_r + num_traits::Float::powf(num_traits::Float::abs(*stat), weight);
        }
    }
    let uniform_hit = T::one() / T::from(n_hits).unwrap();

    let n_miss = n - n_hits;
    let miss_penalty = if n_miss > 0 {
        T::one() / T::from(n_miss).unwrap()
    } else {
        T::zero()
    };

    let mut running = T::zero();
    let mut running_score = Vec::with_capacity(n);
    let mut hit_ranks = Vec::with_capacity(n_hits);
    let mut peak_score = T::zero();
    let mut peak_abs = T::zero();
    let mut peak_rank = 1;

    for (i, (feature, stat)) in ranked.iter().enumerate() {
        let rank = i + 1;
        if member_set.contains(feature.as_str()) {
            let increment = if n_r > T::zero() {
                num_traits::Float::powf(num_traits::Float::abs(*stat), weight) / n_r
            } else {
                uniform_hit
            };
            running = running + increment;
            hit_ranks.push(rank);
        } else {
            running = running - miss_penalty;
        }
        running_score.push(running);

        let deviation = num_traits::Float::abs(running);
        if deviation > peak_abs {
            peak_abs = deviation;
            peak_score = running;
            peak_rank = rank;
        }
    }

    Ok(EnrichmentCurve {
        running_score,
        hit_ranks,
        peak_score,
        peak_rank,
    })
}
