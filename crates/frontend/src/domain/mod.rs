pub mod a001_student;
pub mod a002_class;
pub mod a003_subject;
pub mod a004_grade;
