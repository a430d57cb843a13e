//! Access decisions made against a client's session.

use crate::session::SessionState;
use crate::store::LookupField;

/// Article detail views a session may make before being refused.
pub const DEFAULT_VIEW_LIMIT: u64 = 3;

/// Policy knobs shared by the handlers as `web::Data<AccessPolicy>`.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    pub login_field: LookupField,
    pub view_limit: u64,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            login_field: LookupField::default(),
            view_limit: DEFAULT_VIEW_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDecision {
    UnderLimit,
    OverLimit,
}

/// Counts one detail view and decides whether it may be served.
///
/// The counter is bumped before the decision and keeps growing past the
/// limit; only the decision is capped.
pub fn record_view(state: &mut SessionState, limit: u64) -> ViewDecision {
    state.page_views = state.page_views.saturating_add(1);
    if state.page_views <= limit {
        ViewDecision::UnderLimit
    } else {
        ViewDecision::OverLimit
    }
}

/// Forgets the logged-in user and restarts the view allowance.
pub fn clear(state: &mut SessionState) {
    state.page_views = 0;
    state.user_id = None;
}
