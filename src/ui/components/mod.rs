// src/ui/components/mod.rs
//! UI components used by the stride pages

pub mod button;
pub mod progress_ring;
pub mod text;
pub mod toast;

pub use button::Button;
pub use progress_ring::ProgressRing;
pub use text::{TextComponent, TextSize};
pub use toast::Toast;
