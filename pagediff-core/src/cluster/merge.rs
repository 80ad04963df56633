//! Merge raw change fragments into regions of interest.

use crate::foundation::core::{Rect, Size};
use crate::foundation::math::{near, union};

/// How far merging is carried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStrategy {
    /// One left-to-right fold over the input.
    ///
    /// Clusters that become near each other only after absorbing a later fragment are not merged
    /// with each other, so the result can contain overlapping clusters.
    #[default]
    SinglePass,
    /// Repeat the fold over its own output until the cluster count stops shrinking.
    ///
    /// No two output clusters are near each other.
    FixedPoint,
}

/// Cluster `raw` rectangles whose `near_size`-inflated bounds intersect.
///
/// Output is stable-sorted by top edge. An empty input yields an empty output.
pub fn cluster_regions(raw: &[Rect], near_size: Size, strategy: ClusterStrategy) -> Vec<Rect> {
    let mut clusters = merge_pass(raw.iter().copied(), near_size);

    if strategy == ClusterStrategy::FixedPoint {
        loop {
            let before = clusters.len();
            clusters = merge_pass(clusters, near_size);
            if clusters.len() >= before {
                break;
            }
        }
    }

    clusters.sort_by(|a, b| a.y0.total_cmp(&b.y0));
    clusters
}

fn merge_pass(rects: impl IntoIterator<Item = Rect>, near_size: Size) -> Vec<Rect> {
    rects.into_iter().fold(Vec::new(), |mut acc: Vec<Rect>, r| {
        let mut matched = false;
        for cluster in acc.iter_mut() {
            if near(*cluster, r, near_size) {
                *cluster = union(r, *cluster);
                matched = true;
            }
        }
        if !matched {
            acc.push(r);
        }
        acc
    })
}

#[cfg(test)]
#[path = "../../tests/unit/cluster/merge.rs"]
mod tests;
