/// Index-based reference to the ring boundaries inside a `ContourSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSelection {
    /// Largest top-level contour
    pub outer: usize,
    /// Largest contour directly enclosed by `outer` (the hole)
    pub inner: Option<usize>,
}

impl RingSelection {
    pub fn has_hole(&self) -> bool {
        self.inner.is_some()
    }
}
