use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookRating(f64);

impl BookRating {
    pub fn new(rating: impl Into<f64>) -> Self {
        Self(rating.into())
    }
}
