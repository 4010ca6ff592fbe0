/// Run-time knobs for the fallback engine.
///
/// The defaults are the classical EISPACK/LAPACK choices: a total budget of
/// 30 QR sweeps per row/column of the problem and an exceptional shift
/// every 10 sweeps without deflation in the Hessenberg QR.
///
/// ```
/// use decompose::DecompConfig;
///
/// let cfg = DecompConfig::default().sweeps_per_dim(60).compute_vectors(false);
/// assert_eq!(cfg.max_sweeps(4), 240);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompConfig {
    /// Sweep budget per row/column; the cap for an n×n problem is `n` times this.
    pub sweeps_per_dim: usize,
    /// Inject an exceptional shift after this many sweeps without
    /// deflation. `None` disables exceptional shifts.
    pub exceptional_shift_period: Option<usize>,
    /// Accumulate singular vectors / eigenvectors.
    pub compute_vectors: bool,
}

impl DecompConfig {
    pub const DEFAULT_SWEEPS_PER_DIM: usize = 30;
    pub const DEFAULT_EXCEPTIONAL_SHIFT_PERIOD: usize = 10;

    pub const fn new() -> Self {
        Self {
            sweeps_per_dim: Self::DEFAULT_SWEEPS_PER_DIM,
            exceptional_shift_period: Some(Self::DEFAULT_EXCEPTIONAL_SHIFT_PERIOD),
            compute_vectors: true,
        }
    }

    pub const fn sweeps_per_dim(mut self, sweeps: usize) -> Self {
        self.sweeps_per_dim = sweeps;
        self
    }

    pub const fn exceptional_shift_period(mut self, period: Option<usize>) -> Self {
        self.exceptional_shift_period = period;
        self
    }

    pub const fn compute_vectors(mut self, yes: bool) -> Self {
        self.compute_vectors = yes;
        self
    }

    /// Total sweep budget for a problem of dimension `n`.
    #[inline]
    pub fn max_sweeps(&self, n: usize) -> usize {
        self.sweeps_per_dim.saturating_mul(n.max(1))
    }

    /// Whether sweep number `iter` (1-based, counted since the last
    /// deflation) should use an exceptional shift.
    #[inline]
    pub(crate) fn is_exceptional(&self, iter: usize) -> bool {
        match self.exceptional_shift_period {
            Some(p) if p > 0 => iter > 0 && iter % p == 0,
            _ => false,
        }
    }
}

impl Default for DecompConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = DecompConfig::default();
        assert_eq!(cfg.sweeps_per_dim, 30);
        assert_eq!(cfg.exceptional_shift_period, Some(10));
        assert!(cfg.compute_vectors);
        assert_eq!(cfg.max_sweeps(0), 30);
    }

    #[test]
    fn exceptional_schedule() {
        let cfg = DecompConfig::default();
        assert!(!cfg.is_exceptional(0));
        assert!(!cfg.is_exceptional(9));
        assert!(cfg.is_exceptional(10));
        assert!(cfg.is_exceptional(20));

        let off = cfg.exceptional_shift_period(None);
        assert!(!off.is_exceptional(10));
    }
}
