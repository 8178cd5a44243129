use crate::nodes::frame_timing::FrameTiming;
use crate::nodes::sink_config::DumpMode;

/// Frame budget for the current tick: the declared animation length when
/// frame-timing data carries one, otherwise `fallback`.
pub fn max_frames(timing: Option<&FrameTiming>, fallback: usize) -> usize {
    timing.and_then(|t| t.max_frames).unwrap_or(fallback)
}

pub fn threshold_reached(
    mode: DumpMode,
    buffered: usize,
    max_frames: usize,
    dump_every: usize,
) -> bool {
    match mode {
        DumpMode::MaxFrames => buffered >= max_frames,
        DumpMode::PerNFrames => buffered >= dump_every,
    }
}

/// Outcome of the flush check for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushDecision {
    pub threshold_reached: bool,
    pub forced: bool,
}

impl FlushDecision {
    pub fn evaluate(
        mode: DumpMode,
        buffered: usize,
        max_frames: usize,
        dump_every: usize,
        forced: bool,
    ) -> Self {
        Self {
            threshold_reached: threshold_reached(mode, buffered, max_frames, dump_every),
            forced,
        }
    }

    pub fn should_flush(&self) -> bool {
        self.threshold_reached || self.forced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_max_frames_prefers_timing() {
        let timing = FrameTiming::with_max_frames(120);
        assert_eq!(max_frames(Some(&timing), 7), 120);
    }

    #[test]
    fn test_max_frames_falls_back() {
        assert_eq!(max_frames(None, 7), 7);
        assert_eq!(max_frames(Some(&FrameTiming::reset()), 7), 7);
    }

    #[rstest]
    #[case(0, false)]
    #[case(9, false)]
    #[case(10, true)]
    #[case(11, true)]
    fn test_max_frames_mode(#[case] buffered: usize, #[case] expected: bool) {
        assert_eq!(
            threshold_reached(DumpMode::MaxFrames, buffered, 10, 3),
            expected
        );
    }

    #[rstest]
    #[case(2, false)]
    #[case(3, true)]
    #[case(10, true)]
    fn test_per_n_frames_mode_ignores_budget(#[case] buffered: usize, #[case] expected: bool) {
        assert_eq!(
            threshold_reached(DumpMode::PerNFrames, buffered, 10, 3),
            expected
        );
    }

    #[test]
    fn test_zero_interval_always_reached() {
        assert!(threshold_reached(DumpMode::PerNFrames, 0, 10, 0));
    }

    #[test]
    fn test_forced_flush_ignores_threshold() {
        let decision = FlushDecision::evaluate(DumpMode::MaxFrames, 1, 100, 0, true);
        assert!(!decision.threshold_reached);
        assert!(decision.should_flush());
    }

    #[test]
    fn test_no_flush_below_threshold() {
        let decision = FlushDecision::evaluate(DumpMode::MaxFrames, 1, 100, 0, false);
        assert!(!decision.should_flush());
    }
}
