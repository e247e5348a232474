use super::*;

pub const DEFAULT_VIEW_STEP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleAction {
    #[serde(rename = "View More")]
    ViewMore,
    #[serde(rename = "Show Less")]
    ShowLess,
}

/// "View more / show less" state of one repository ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub initial: usize,
    pub step: usize,
    pub shown: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_STEP)
    }
}

impl Window {
    /// Starts at `step` entries and moves by `step`.
    pub const fn new(step: usize) -> Self {
        Self {
            initial: step,
            step,
            shown: step,
        }
    }

    /// Restores a window from a client supplied value.
    ///
    /// The value is clamped between the initial size and the first size
    /// reachable by "View More" steps that covers all `total` entries.
    pub fn with_shown(self, shown: usize, total: usize) -> Self {
        Self {
            shown: shown.clamp(self.initial, self.full(total)),
            ..self
        }
    }

    fn full(&self, total: usize) -> usize {
        if total <= self.initial {
            return self.initial;
        }
        let steps = (total - self.initial).div_ceil(self.step.max(1));
        self.initial + steps * self.step.max(1)
    }

    pub fn visible(&self, total: usize) -> usize {
        self.shown.min(total)
    }

    pub fn slice<'a, T>(&self, ranking: &'a [T]) -> &'a [T] {
        &ranking[..self.visible(ranking.len())]
    }

    /// `None` when the whole list fits in the initial window.
    pub fn action(&self, total: usize) -> Option<ToggleAction> {
        if total <= self.initial {
            None
        } else if self.shown >= total {
            Some(ToggleAction::ShowLess)
        } else {
            Some(ToggleAction::ViewMore)
        }
    }

    pub fn toggle(self, total: usize) -> Self {
        let shown = match self.action(total) {
            None => self.shown,
            Some(ToggleAction::ShowLess) => self.shown.saturating_sub(self.step).max(self.initial),
            Some(ToggleAction::ViewMore) => self.shown + self.step,
        };
        Self { shown, ..self }
    }
}
