/// A histogram bin: a representative position and the number of observations it stands for.
///
/// The weight is fractional only when the bin comes from a foreign serialized state;
/// bins built by `add` and by weighted merges of such bins hold whole counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub position: f64,
    pub weight: f64,
}

impl Bin {
    pub fn new(position: f64, weight: f64) -> Self {
        Self { position, weight }
    }

    /// Absorbs `other` into this bin: the position moves to the weighted average
    /// of both positions and the weights add up.
    pub fn merge_from(&mut self, other: &Bin) {
        let total_weight = self.weight + other.weight;
        assert!(
            total_weight > 0.0,
            "merging bins with a total weight of {total_weight}"
        );
        // each term is divided separately, summing first rounds differently
        self.position =
            self.position * self.weight / total_weight + other.position * other.weight / total_weight;
        self.weight = total_weight;
    }
}
