mod score;
mod summary;

pub use score::{value_score, ScoreTuning};
pub use summary::{summarize, DashboardSummary, UPCOMING_WINDOW_DAYS};
