//! Grid planning: maps a source image onto a node grid that tiles it evenly.
//!
//! The column count follows the source aspect ratio, then both working
//! dimensions are padded up until every cell gets the same whole number of
//! pixels. The padding implies a slight resize of the source, which the
//! pipeline performs; planning itself is pure arithmetic.

/// Sources narrower than this are scaled up before tiling, otherwise the
/// padding step dominates the cell size and wrecks the aspect ratio.
pub const MIN_WORKING_WIDTH: u32 = 120;

const SMALL_SOURCE_SCALE: u32 = 3;

/// The node grid shape and the pixel geometry backing it.
///
/// `working_width`/`working_height` are the padded dimensions the source
/// gets resized to; they divide evenly by `cols`/`rows` respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub working_width: u32,
    pub working_height: u32,
    /// Horizontal pixels per cell: `working_width / cols`.
    pub step_x: u32,
    /// Vertical pixels per cell. Equals `working_height / rows` unless the
    /// legacy single-scalar step was requested.
    pub step_y: u32,
}

impl GridSpec {
    /// Total cell count, used for progress deciles and the summary line.
    pub fn total(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("requested rows must be at least 1")]
    ZeroRows,
    #[error("source image has zero height")]
    ZeroHeight,
    #[error("aspect ratio {0:.4} rounds to zero columns; request more rows")]
    ZeroCols(f64),
}

/// Rounds `value` up to the next multiple of `divisor`.
fn next_multiple(value: u32, divisor: u32) -> u32 {
    value + (divisor - value % divisor) % divisor
}

/// Plans the node grid for a `source_width` x `source_height` image split
/// into `requested_rows` rows.
///
/// `legacy_step` reuses the horizontal cell size vertically, byte-matching
/// the historical output when width and height pad differently.
pub fn plan(
    source_width: u32,
    source_height: u32,
    requested_rows: u32,
    legacy_step: bool,
) -> Result<GridSpec, PlanError> {
    if requested_rows == 0 {
        return Err(PlanError::ZeroRows);
    }
    if source_height == 0 {
        return Err(PlanError::ZeroHeight);
    }

    let aspect = source_width as f64 / source_height as f64;
    let cols = (requested_rows as f64 * aspect) as u32;
    if cols == 0 {
        return Err(PlanError::ZeroCols(aspect));
    }

    let (mut width, mut height) = (source_width, source_height);
    if width < MIN_WORKING_WIDTH {
        width *= SMALL_SOURCE_SCALE;
        height *= SMALL_SOURCE_SCALE;
    }

    let working_width = next_multiple(width, cols);
    let working_height = next_multiple(height, requested_rows);

    let step_x = working_width / cols;
    let step_y = if legacy_step {
        step_x
    } else {
        working_height / requested_rows
    };

    Ok(GridSpec {
        rows: requested_rows,
        cols,
        working_width,
        working_height,
        step_x,
        step_y,
    })
}
