pub mod gemini;
mod restaurant;
mod view_state;

pub use restaurant::{GeminiRestaurant, Restaurant};
pub use view_state::ViewState;
