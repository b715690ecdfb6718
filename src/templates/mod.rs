pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::car_card;
pub use layouts::admin::admin_layout;
pub use layouts::desktop::{desktop_layout, PageCtx};
