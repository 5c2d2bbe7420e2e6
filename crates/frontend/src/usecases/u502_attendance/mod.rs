pub mod view;

pub use view::AttendancePage;
