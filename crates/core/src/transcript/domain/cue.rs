/// One timed caption unit. Timing is carried through but never inspected
/// by segmentation or scoring.
#[derive(Clone, Debug, PartialEq)]
pub struct Cue {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl Cue {
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
        }
    }

    /// A cue with zeroed timing, for callers that only have text.
    pub fn untimed(text: impl Into<String>) -> Self {
        Self::new(text, 0.0, 0.0)
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
