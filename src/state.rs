/// The operation category currently awaiting a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// list / find
    Loading,
    /// create
    Creating,
    /// replace / partial-update
    Updating,
    /// delete
    Deleting,
}

/// Per-category busy flags exposed to the UI layer.
///
/// Each operation clears every flag before raising its own, so at most one
/// flag is true at a time in normal usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestState {
    pub loading: bool,
    pub creating: bool,
    pub updating: bool,
    pub deleting: bool,
}

impl RequestState {
    /// Lower every flag.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Lower every flag, then raise the one for `category`.
    pub fn begin(&mut self, category: Category) {
        self.clear();
        match category {
            Category::Loading => self.loading = true,
            Category::Creating => self.creating = true,
            Category::Updating => self.updating = true,
            Category::Deleting => self.deleting = true,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.creating || self.updating || self.deleting
    }

    pub fn is_idle(&self) -> bool {
        !self.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        let state = RequestState::default();
        assert!(state.is_idle());
        assert!(!state.is_busy());
    }

    #[test]
    fn begin_raises_exactly_one_flag() {
        let mut state = RequestState::default();

        state.begin(Category::Creating);
        assert!(state.creating);
        assert!(!state.loading && !state.updating && !state.deleting);

        state.begin(Category::Deleting);
        assert!(state.deleting);
        assert!(!state.loading && !state.creating && !state.updating);
    }

    #[test]
    fn clear_lowers_all_flags() {
        let mut state = RequestState::default();
        state.begin(Category::Updating);
        assert!(state.is_busy());

        state.clear();
        assert!(state.is_idle());
        assert_eq!(state, RequestState::default());
    }
}
