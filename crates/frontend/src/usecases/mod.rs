pub mod u501_documents;
pub mod u502_attendance;
