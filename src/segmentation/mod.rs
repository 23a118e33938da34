//! Plain k-means clustering over per-worker feature vectors, used to place a
//! worker among named peer segments. Deterministic: centroids initialize from
//! the first `k` points, Lloyd's iterations cap at 100.

use std::collections::HashMap;

use uuid::Uuid;

const MAX_ITERATIONS: usize = 100;

/// Display labels for the four canonical segments.
pub const SEGMENT_NAMES: [&str; 4] = [
    "Stable Compounding Earners",
    "High-Growth, Cash-Tight Strivers",
    "Low-Earning High-Risk Workers",
    "Under-utilized but Safe",
];

/// One worker's feature vector: margin, liquidity, growth, stability.
#[derive(Debug, Clone)]
pub struct DataPoint {
    pub id: Uuid,
    pub features: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ClusterResult {
    pub centroids: Vec<Vec<f64>>,
    pub assignments: HashMap<Uuid, usize>,
}

/// Lloyd's algorithm with first-k initialization and Euclidean distance.
/// Empty input yields an empty result; fewer points than `k` simply produce
/// fewer centroids.
pub fn k_means(data: &[DataPoint], k: usize) -> ClusterResult {
    if data.is_empty() || k == 0 {
        return ClusterResult::default();
    }

    let dims = data[0].features.len();
    let mut centroids: Vec<Vec<f64>> = data
        .iter()
        .take(k)
        .map(|point| {
            let mut centroid = point.features.clone();
            centroid.truncate(dims);
            centroid
        })
        .collect();
    let mut assignments: HashMap<Uuid, usize> = HashMap::new();

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;

        for point in data {
            let nearest = centroids
                .iter()
                .enumerate()
                .map(|(index, centroid)| (index, euclidean_distance(&point.features, centroid)))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(index, _)| index)
                .unwrap_or(0);
            if assignments.get(&point.id) != Some(&nearest) {
                assignments.insert(point.id, nearest);
                changed = true;
            }
        }

        let mut sums = vec![vec![0.0; dims]; centroids.len()];
        let mut counts = vec![0usize; centroids.len()];
        for point in data {
            let cluster = assignments[&point.id];
            counts[cluster] += 1;
            // Dimensions past the first point's length are ignored, matching
            // the distance metric's zip semantics.
            for (slot, value) in sums[cluster].iter_mut().zip(&point.features) {
                *slot += value;
            }
        }
        for (cluster, sum) in sums.iter().enumerate() {
            if counts[cluster] > 0 {
                for (slot, total) in centroids[cluster].iter_mut().zip(sum) {
                    *slot = *total / counts[cluster] as f64;
                }
            }
        }

        if !changed {
            break;
        }
    }

    ClusterResult {
        centroids,
        assignments,
    }
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
