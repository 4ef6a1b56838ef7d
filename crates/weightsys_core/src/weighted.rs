use std::fmt::Display;

/// An item paired with its weight at the time it was listed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeightedItem<T> {
    pub item: T,
    pub weight: f64,
}

impl<T> WeightedItem<T> {
    pub fn new(item: T, weight: f64) -> WeightedItem<T> {
        Self { item, weight }
    }
}

impl<T: Display> Display for WeightedItem<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.3}", self.item, self.weight)
    }
}
