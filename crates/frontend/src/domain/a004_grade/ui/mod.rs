pub mod blank_sheet;
pub mod entry;
pub mod preview;
