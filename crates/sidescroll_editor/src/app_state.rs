//! Top-level application state with a single pending transition

/// Screen the editor application is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Welcome,
    Editing,
    Exiting,
}

impl AppState {
    pub fn label(&self) -> &'static str {
        match self {
            AppState::Welcome => "Welcome",
            AppState::Editing => "Editing",
            AppState::Exiting => "Exiting",
        }
    }
}

/// Owns the current state; transitions are requested anywhere and applied once per frame
#[derive(Debug, Clone, Default)]
pub struct AppStateMachine {
    current: AppState,
    pending: Option<AppState>,
}

impl AppStateMachine {
    pub fn current(&self) -> AppState {
        self.current
    }

    /// Queue a transition. A later request in the same frame replaces it.
    pub fn request_transition(&mut self, next: AppState) {
        if self.current == AppState::Exiting {
            return;
        }
        self.pending = Some(next);
    }

    /// Apply the queued transition, returning `(from, to)` if the state changed
    pub fn apply_pending(&mut self) -> Option<(AppState, AppState)> {
        let next = self.pending.take()?;
        if next == self.current {
            return None;
        }
        let from = std::mem::replace(&mut self.current, next);
        Some((from, next))
    }

    pub fn is_exiting(&self) -> bool {
        self.current == AppState::Exiting
    }
}
