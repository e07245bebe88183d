/// Easing curves applied to stored (linear) progress.
pub mod ease;
