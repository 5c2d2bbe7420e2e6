pub mod entry;
pub mod preview;

pub use entry::{GradeEntryForm, GradeStatus, Mention, SaveNotesRequest, SaveNotesResponse, Session};
pub use preview::{build_groups, LocalNotes, NotesFilter, NotesGroup, NotesPreview, PreviewStudent};
