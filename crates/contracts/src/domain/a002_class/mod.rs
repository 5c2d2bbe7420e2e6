pub mod aggregate;
pub mod classifier;
pub mod roster;

pub use aggregate::{ClassMember, ClassRecord};
pub use classifier::{add_class_to_selection, class_key, group_by_class, ClassDescriptor, Classifiable};
pub use roster::{filter_classes, level_options, roster_rows, ClassFilter, ClassStats, RosterRow};
