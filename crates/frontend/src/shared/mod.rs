pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod export;
pub mod file_utils;
pub mod icons;
pub mod modal;
pub mod page_frame;
pub mod page_standard;
pub mod phone_input;
pub mod print;
