/// Accepted window center with its Harris response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPoint {
    pub x: usize,
    pub y: usize,
    pub response: f32,
}

/// Windowed sums of the three gradient moment maps: the entries of the
/// local 2×2 structure tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureTensor {
    pub sxx: f64,
    pub syy: f64,
    pub sxy: f64,
}

impl StructureTensor {
    #[inline]
    pub fn det(&self) -> f64 {
        self.sxx * self.syy - self.sxy * self.sxy
    }

    #[inline]
    pub fn trace(&self) -> f64 {
        self.sxx + self.syy
    }

    /// `R = det(M) - alpha * trace(M)^2`
    #[inline]
    pub fn harris_response(&self, alpha: f64) -> f64 {
        let trace = self.trace();
        self.det() - alpha * trace * trace
    }
}
