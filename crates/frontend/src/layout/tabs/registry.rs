//! Clé d'onglet → contenu. Toutes les clés connues sont rassemblées ici.

use super::tab_labels::*;
use crate::dashboards::d400_overview::OverviewDashboard;
use crate::domain::a001_student::ui::list::StudentList;
use crate::domain::a002_class::ui::list::ClassList;
use crate::domain::a003_subject::ui::list::SubjectList;
use crate::domain::a004_grade::ui::preview::NotesPage;
use crate::usecases::u501_documents::DocumentsPage;
use crate::usecases::u502_attendance::AttendancePage;
use leptos::prelude::*;

pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        TAB_OVERVIEW => view! { <OverviewDashboard /> }.into_any(),
        TAB_STUDENTS => view! { <StudentList /> }.into_any(),
        TAB_CLASSES => view! { <ClassList /> }.into_any(),
        TAB_SUBJECTS => view! { <SubjectList /> }.into_any(),
        TAB_GRADES => view! { <NotesPage /> }.into_any(),
        TAB_DOCUMENTS => view! { <DocumentsPage /> }.into_any(),
        TAB_ATTENDANCE => view! { <AttendancePage /> }.into_any(),
        unknown => {
            log::warn!("onglet inconnu : '{}'", unknown);
            view! {
                <div class="page">
                    <div class="warning-box">{format!("Page inconnue : {}", unknown)}</div>
                </div>
            }
            .into_any()
        }
    }
}
