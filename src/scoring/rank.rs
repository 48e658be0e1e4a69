//! Cohort-wide ranking: stable descending sort, dense ranks with near-tie
//! merging, advisory tie lists and min/max score normalization.

use crate::types::scoring::{Score, ScoredProject};
use std::cmp::Ordering;

/// Maximum gap between adjacent sorted totals for which two projects still
/// share a rank number.
pub const RANK_MERGE_EPSILON: Score = 0.05;

/// Window for the advisory `tied_with` list. Deliberately looser than the
/// rank-merge epsilon: it answers "roughly comparable", not "same rank".
pub const TIE_WINDOW: Score = 0.5;

fn round1(value: Score) -> Score {
    (value * 10.0).round() / 10.0
}

/// Rank the full cohort. Returns the list sorted by descending weighted
/// total with rank, tied_with and normalized_score populated. Total on
/// empty and single-element cohorts.
pub fn rank_projects(mut cohort: Vec<ScoredProject>) -> Vec<ScoredProject> {
    if cohort.is_empty() {
        return cohort;
    }

    // Stable sort keeps input order for exactly equal totals, which makes
    // rank assignment deterministic under reordering.
    cohort.sort_by(|a, b| {
        b.weighted_total
            .partial_cmp(&a.weighted_total)
            .unwrap_or(Ordering::Equal)
    });

    let totals: Vec<(String, String, Score)> = cohort
        .iter()
        .map(|scored| {
            (
                scored.project.id.clone(),
                scored.project.name.clone(),
                scored.weighted_total,
            )
        })
        .collect();

    let max_total = totals[0].2;
    let min_total = totals[totals.len() - 1].2;

    let mut current_rank = 1;
    for index in 0..cohort.len() {
        let total = cohort[index].weighted_total;
        cohort[index].rank = current_rank;

        cohort[index].tied_with = totals
            .iter()
            .filter(|(id, _, other_total)| {
                *id != cohort[index].project.id && (other_total - total).abs() <= TIE_WINDOW
            })
            .map(|(_, name, _)| name.clone())
            .collect();

        cohort[index].normalized_score = if max_total > min_total {
            round1((total - min_total) / (max_total - min_total) * 100.0)
        } else {
            100.0
        };

        if index + 1 < cohort.len()
            && (cohort[index + 1].weighted_total - total).abs() > RANK_MERGE_EPSILON
        {
            // Rank skips over the merged run rather than counting up by one.
            current_rank = index + 2;
        }
    }

    cohort
}
