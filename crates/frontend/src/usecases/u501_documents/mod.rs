pub mod api;
pub mod selection;
pub mod view;

pub use view::DocumentsPage;
