mod view;
mod view_model;

pub use view::SubjectDetails;
pub use view_model::SubjectDetailsViewModel;
