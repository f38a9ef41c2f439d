//! RegenLab Demo Service
//!
//! Three small regenerative-medicine demo endpoints behind one JSON API:
//! - `recipes`: hardcoded cell-differentiation protocol lookup
//! - `aging`: rule-based aging clock (threshold band dispatch)
//! - `similarity`: donor match scoring via longest common substring
//!
//! The similarity scorer is the only algorithmic component; the other two
//! are a static table and a three-branch rule.

pub mod aging;
pub mod recipes;
pub mod similarity;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use aging::{predict_age, AgePrediction};
pub use recipes::{RecipeDb, NOT_FOUND_SENTINEL};
pub use similarity::{longest_common_run, similarity_score, MatchSpan};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
