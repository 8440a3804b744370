use gridsearch_core::{Classification, Grid};

/// Walk predecessor links back from `goal`, marking every cell between START
/// and `goal` as PATH.
///
/// Returns the path as arena indices from START to `goal`, both included.
/// When `goal` has no predecessor (START == END) the result is just
/// `[goal]`. Predecessor links are left untouched, so calling this again
/// marks the same cells and returns the same path.
pub fn reconstruct(grid: &mut Grid, goal: usize) -> Vec<usize> {
    let mut path = vec![goal];
    let mut cur = grid.cell(goal).parent;

    while let Some(i) = cur {
        if path.len() > grid.cell_count() {
            log::warn!("predecessor chain from {} loops; path truncated", grid.point(goal));
            break;
        }
        path.push(i);
        if i == grid.start() {
            break;
        }
        grid.mark(i, Classification::Path);
        cur = grid.cell(i).parent;
    }

    path.reverse();
    path
}
