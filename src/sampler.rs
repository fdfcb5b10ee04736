/// Chooses which frames of a stream are sent through detection.
///
/// Replaces a shared frame counter: the processor owns one sampler per run.
#[derive(Debug, Clone)]
pub struct FrameSampler {
    every: usize,
    seen: u64,
}

impl FrameSampler {
    /// Creates a sampler that keeps every `every`-th frame (0 and 1 keep all frames)
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            seen: 0,
        }
    }

    /// Registers a new frame and returns true if it should be processed.
    /// The `every`-th, `2 * every`-th, ... frames are kept; counting starts at 1.
    pub fn tick(&mut self) -> bool {
        self.seen += 1;
        self.seen % self.every as u64 == 0
    }

    /// Number of frames registered so far
    pub fn seen(&self) -> u64 {
        self.seen
    }

    pub fn every(&self) -> usize {
        self.every
    }
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tenth_frame() {
        let mut sampler = FrameSampler::default();
        let kept: Vec<u64> = (1..=35).filter(|_| sampler.tick()).collect();
        assert_eq!(kept, vec![10, 20, 30]);
        assert_eq!(sampler.seen(), 35);
    }

    #[test]
    fn test_zero_and_one_keep_all() {
        for every in [0, 1] {
            let mut sampler = FrameSampler::new(every);
            assert_eq!(sampler.every(), 1);
            assert!((0..5).all(|_| sampler.tick()));
        }
    }
}
