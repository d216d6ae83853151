/// Online scalar estimator.
///
/// Both operations are O(1) and total. Before the first `update`, `get`
/// returns the estimator's seed, which is a cold-start artifact rather than
/// a meaningful statistic.
pub trait Estimator {
    /// Absorb one observation.
    fn update(&mut self, value: f64);

    /// Current estimate.
    fn get(&self) -> f64;
}
