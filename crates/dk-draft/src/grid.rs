use std::collections::BTreeSet;

/// The six standard 3x3 grid slices: rows 0-2 then columns 0-2, in that
/// order, matching the source's fixed slice table.
const SLICES: [[usize; 3]; 6] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
];

/// Recompute, from scratch, which lines are still fully pickable: for each
/// of the six slices, the set-difference against `taken`. A slice with no
/// remaining positions is omitted. Returns `(slice_index, available_positions)`.
pub fn available_lines(taken: &BTreeSet<usize>) -> Vec<(usize, BTreeSet<usize>)> {
    SLICES
        .iter()
        .enumerate()
        .filter_map(|(slice_index, slice)| {
            let remaining: BTreeSet<usize> = slice.iter().copied().filter(|p| !taken.contains(p)).collect();
            if remaining.is_empty() {
                None
            } else {
                Some((slice_index, remaining))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_six_slices_available_when_empty() {
        let taken = BTreeSet::new();
        let lines = available_lines(&taken);
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn termination_sequence_matches_fixture() {
        // Scenario 4: row0, col0, row1, col1, row2, col2 taken in order.
        let mut taken = BTreeSet::new();
        taken.extend([0, 1, 2]); // row 0
        let lines = available_lines(&taken);
        assert!(lines.iter().any(|(i, _)| *i == 3)); // col0 partial {3,6}

        taken.extend([3, 6]); // col 0 fully taken now
        let lines = available_lines(&taken);
        assert!(!lines.iter().any(|(i, _)| *i == 0)); // row 0 gone
        assert!(!lines.iter().any(|(i, _)| *i == 3)); // col 0 gone

        taken.extend([4, 5]); // row 1
        taken.extend([7]); // col 1 remaining position
        let lines = available_lines(&taken);
        assert!(!lines.iter().any(|(i, _)| *i == 4)); // col1 gone after 7 taken

        taken.extend([8]); // row 2
        taken.extend([]); // col 2 already fully in taken via {2,5,8}
        let lines = available_lines(&taken);
        assert!(lines.is_empty());
        assert_eq!(taken.len(), 9);
    }
}
