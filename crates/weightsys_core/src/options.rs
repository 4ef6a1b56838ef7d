pub const DEFAULT_MIN_WEIGHT: f64 = 1.0;
pub const DEFAULT_MAX_WEIGHT: f64 = 1000.0;

/// Bounds of a [`WeightSystem`](crate::system::WeightSystem).
///
/// Out of range values are not rejected, they get normalized on construction
/// so that `1 <= min_weight <= max_weight`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NewOptions {
    pub min_weight: f64,
    pub max_weight: f64,
}

impl Default for NewOptions {
    fn default() -> Self {
        Self {
            min_weight: DEFAULT_MIN_WEIGHT,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

impl NewOptions {
    pub fn with_min_weight(self, min_weight: f64) -> Self {
        Self { min_weight, ..self }
    }

    pub fn with_max_weight(self, max_weight: f64) -> Self {
        Self { max_weight, ..self }
    }

    /// Returns the bounds the system will actually use.
    pub fn normalized(&self) -> (f64, f64) {
        let min_weight = DEFAULT_MIN_WEIGHT.max(self.min_weight);
        let max_weight = min_weight.max(self.max_weight);
        (min_weight, max_weight)
    }
}

/// Per item options for [`WeightSystem::add_item`](crate::system::WeightSystem::add_item).
///
/// With no weight the item starts at the system's current average weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AddItemOptions {
    pub weight: Option<f64>,
}

impl AddItemOptions {
    pub fn with_weight(weight: f64) -> Self {
        Self {
            weight: Some(weight),
        }
    }
}
