use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookPrice(f64);

impl BookPrice {
    pub fn new(price: impl Into<f64>) -> Self {
        Self(price.into())
    }
}
