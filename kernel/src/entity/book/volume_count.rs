use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Number of tomes in the series.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct BookVolumeCount(i32);

impl BookVolumeCount {
    pub fn new(count: impl Into<i32>) -> Self {
        Self(count.into())
    }
}
