use std::collections::{HashMap, HashSet};

use arrow::array::{Float64Array, Int64Array};
use log::{debug, warn};

use crate::xml::Track;

/// Default labeling: every row is its own trajectory, `label[i] == i`
pub fn sequential_labels(num_rows: usize) -> Int64Array {
    Int64Array::from_iter_values(0..num_rows as i64)
}

/// Key used to match spot identifiers read from different attributes
fn id_key(id: f64) -> Option<u64> {
    if id.is_nan() {
        None
    } else if id == 0.0 {
        // -0.0 and 0.0 name the same spot
        Some(0)
    } else {
        Some(id.to_bits())
    }
}

/// Label rows by trajectory.
///
/// Each track whose id is in `retained` takes the next label, in document
/// order, and every row whose identifier appears on one of its edges gets that
/// label. A later track overwrites an earlier one for a shared spot. Rows left
/// unlabeled then receive singleton labels continuing the same counter.
pub fn track_labels(spot_ids: &Float64Array, tracks: &[Track], retained: &[i64]) -> Int64Array {
    let retained: HashSet<i64> = retained.iter().copied().collect();

    let mut rows_by_id: HashMap<u64, Vec<usize>> = HashMap::new();
    for (row, id) in spot_ids.iter().enumerate() {
        if let Some(key) = id.and_then(id_key) {
            rows_by_id.entry(key).or_default().push(row);
        }
    }

    let mut labels: Vec<Option<i64>> = vec![None; spot_ids.len()];
    let mut next_label: i64 = 0;
    let mut seen_tracks = HashSet::new();

    for track in tracks {
        if !retained.contains(&track.id) {
            continue;
        }
        seen_tracks.insert(track.id);

        let members: HashSet<u64> = track.spot_ids().filter_map(id_key).collect();
        let mut labeled = 0;
        for key in &members {
            if let Some(rows) = rows_by_id.get(key) {
                for &row in rows {
                    labels[row] = Some(next_label);
                    labeled += 1;
                }
            }
        }
        debug!(
            "Track {} -> label {} ({} spots)",
            track.id, next_label, labeled
        );
        next_label += 1;
    }

    for id in &retained {
        if !seen_tracks.contains(id) {
            warn!("Filtered track {} does not appear under AllTracks", id);
        }
    }

    labels
        .into_iter()
        .map(|label| {
            label.unwrap_or_else(|| {
                let singleton = next_label;
                next_label += 1;
                singleton
            })
        })
        .map(Some)
        .collect()
}
