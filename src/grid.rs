use crate::error::{LayoutError, LayoutResult};

/// Row-major grid coordinate. `x` is the column, `y` the row.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Placement {
    pub x: u64,
    pub y: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GridSpec {
    width: u64, // always > 0
    height: i64, // informational only, never bounds placement
}

impl GridSpec {
    pub fn new(width: i64, height: i64) -> LayoutResult<Self> {
        if width <= 0 {
            return Err(LayoutError::invalid_config(format!(
                "width must be positive (got {width})"
            )));
        }
        Ok(Self {
            width: width.unsigned_abs(),
            height,
        })
    }

    pub fn width(self) -> u64 {
        self.width
    }

    pub fn height(self) -> i64 {
        self.height
    }

    pub fn placement_for(self, index: u64) -> Placement {
        Placement {
            x: index % self.width,
            y: index / self.width,
        }
    }

    /// Number of rows needed for `count` placements.
    pub fn rows_for(self, count: u64) -> u64 {
        count.div_ceil(self.width)
    }

    /// True when `rows` rows would not fit into the declared height.
    pub fn exceeds_height(self, rows: u64) -> bool {
        match u64::try_from(self.height) {
            Ok(h) => rows > h,
            Err(_) => rows > 0,
        }
    }
}
