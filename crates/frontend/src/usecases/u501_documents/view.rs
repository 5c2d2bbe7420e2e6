//! Page Documents : recherche d'un étudiant, certificat, carte, relevé et
//! planches de badges.

use super::api::{card_url, certificate_url};
use super::selection::{anchor, result_meta, selection_label, toggle_badge, transcript_items, with_classmates};
use crate::domain::a001_student::api::fetch_students;
use crate::domain::a003_subject::api::fetch_subjects;
use crate::domain::a004_grade::ui::blank_sheet::BlankSheet;
use crate::shared::components::PageHeader;
use crate::shared::date_utils::today;
use crate::shared::export::{download_bytes, MIME_PDF};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::print::{alert, alert_on_error, open_in_new_tab, open_print_window};
use contracts::domain::a001_student::Student;
use contracts::shared::documents::badge_sheet::{badge_sheet_document, badge_summary, BadgeData};
use contracts::shared::documents::card::card_document;
use contracts::shared::documents::certificate::certificate_document;
use contracts::shared::documents::dates::file_date;
use contracts::shared::documents::pdf::{badges_file_name, badges_pdf};
use contracts::shared::documents::transcript::transcript_document;
use contracts::shared::documents::HtmlDocument;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const SEARCH_DEBOUNCE_MS: u32 = 350;
const NO_STUDENT: &str = "Veuillez d’abord sélectionner un étudiant.";

/// Aperçu ouvert dans la fenêtre modale
#[derive(Clone)]
enum DocPreview {
    Certificate(Student),
    Card(Student),
    Transcript(HtmlDocument),
    Badges(Vec<Student>),
    BlankSheet,
}

impl DocPreview {
    fn title(&self) -> &'static str {
        match self {
            DocPreview::Certificate(_) => "Certificat de scolarité",
            DocPreview::Card(_) => "Carte d’étudiant",
            DocPreview::Transcript(_) => "Relevé de notes",
            DocPreview::Badges(_) => "Badges étudiants (A6)",
            DocPreview::BlankSheet => "Fiche de report de notes",
        }
    }

    fn document(&self) -> Option<HtmlDocument> {
        match self {
            DocPreview::Certificate(s) => Some(certificate_document(&[s])),
            DocPreview::Card(s) => Some(card_document(s, s.academic_year.as_deref())),
            DocPreview::Transcript(doc) => Some(doc.clone()),
            DocPreview::Badges(list) => {
                let badges: Vec<BadgeData> = list.iter().map(BadgeData::from).collect();
                Some(badge_sheet_document(&badges))
            }
            DocPreview::BlankSheet => None,
        }
    }
}

fn download_badges_pdf(students: &[Student]) {
    let badges: Vec<BadgeData> = students.iter().map(BadgeData::from).collect();
    match badges_pdf(&badges) {
        Ok(bytes) => alert_on_error(download_bytes(&bytes, MIME_PDF, &badges_file_name(&file_date(today())))),
        Err(e) => {
            log::error!("PDF badges : {}", e);
            alert(&e.to_string());
        }
    }
}

#[component]
fn DocumentTile(
    icon_name: &'static str,
    title: &'static str,
    #[prop(into)] description: Signal<String>,
    #[prop(into)] disabled: Signal<bool>,
    on_open: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class="doc-tile"
            class:doc-tile--disabled=move || disabled.get()
            disabled=move || disabled.get()
            on:click=move |_| on_open.run(())
        >
            <span class="doc-tile__icon">{icon(icon_name)}</span>
            <span class="doc-tile__title">{title}</span>
            <span class="doc-tile__description">{move || description.get()}</span>
        </button>
    }
}

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let query = RwSignal::new(String::new());
    let (results, set_results) = signal::<Vec<Student>>(Vec::new());
    let selected = RwSignal::new(None::<Student>);
    let badges = RwSignal::new(Vec::<Student>::new());
    let all_students = RwSignal::new(Vec::<Student>::new());
    let (loading, set_loading) = signal(false);
    let (loading_all, set_loading_all) = signal(false);
    let preview = RwSignal::new(None::<DocPreview>);
    let search_round = RwSignal::new(0u32);

    let run_search = move || {
        let q = query.get_untracked().trim().to_string();
        if q.is_empty() {
            set_results.set(Vec::new());
            selected.set(None);
            badges.set(Vec::new());
            return;
        }
        set_loading.set(true);
        spawn_local(async move {
            match fetch_students(&q).await {
                Ok(found) => {
                    // Un seul résultat : sélection automatique
                    if found.len() == 1 {
                        selected.set(found.first().cloned());
                        badges.set(found.clone());
                    } else {
                        selected.set(None);
                        badges.set(Vec::new());
                    }
                    set_results.set(found);
                }
                Err(e) => {
                    log::error!("recherche « {} » : {}", q, e);
                    set_results.set(Vec::new());
                    selected.set(None);
                    badges.set(Vec::new());
                }
            }
            set_loading.set(false);
        });
    };

    let on_query_input = move |value: String| {
        query.set(value);
        search_round.update(|r| *r += 1);
        let round = search_round.get_untracked();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if search_round.get_untracked() == round {
                run_search();
            }
        });
    };

    let add_class = move || {
        let add = move |all: Vec<Student>| {
            let merged = selected.with_untracked(|sel| {
                badges.with_untracked(|current| with_classmates(&all, current, sel.as_ref()))
            });
            match merged {
                Ok(list) => badges.set(list),
                Err(e) => alert(&e),
            }
        };

        if selected.with_untracked(|s| anchor(s.as_ref(), &badges.get_untracked()).is_none()) {
            alert("Sélectionnez d'abord un étudiant.");
            return;
        }
        if !all_students.with_untracked(Vec::is_empty) {
            add(all_students.get_untracked());
            return;
        }
        set_loading_all.set(true);
        spawn_local(async move {
            let all = match fetch_students("").await {
                Ok(v) => v,
                Err(e) => {
                    log::error!("liste complète des étudiants : {}", e);
                    Vec::new()
                }
            };
            set_loading_all.set(false);
            if all.is_empty() {
                alert("Impossible de charger la liste complète des étudiants.");
                return;
            }
            all_students.set(all.clone());
            add(all);
        });
    };

    let target = move || {
        let list = badges.get_untracked();
        selected.get_untracked().or_else(|| list.first().cloned())
    };

    let open_single = move |make: fn(Student) -> DocPreview| {
        match target() {
            Some(s) => preview.set(Some(make(s))),
            None => alert(NO_STUDENT),
        }
    };

    let open_transcript = move || {
        let Some(student) = target() else {
            alert(NO_STUDENT);
            return;
        };
        spawn_local(async move {
            let subjects = match fetch_subjects(None).await {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("matières du relevé : {}", e);
                    Vec::new()
                }
            };
            let items = transcript_items(&subjects, &student);
            let doc = transcript_document(&student, student.academic_year.as_deref(), &items);
            preview.set(Some(DocPreview::Transcript(doc)));
        });
    };

    let open_badges = move || {
        let mut list = badges.get_untracked();
        if list.is_empty() {
            match target() {
                Some(s) => {
                    list.push(s);
                    badges.set(list.clone());
                }
                None => {
                    alert(NO_STUDENT);
                    return;
                }
            }
        }
        preview.set(Some(DocPreview::Badges(list)));
    };

    let has_student = Signal::derive(move || selected.with(Option::is_some) || badges.with(|b| !b.is_empty()));
    let needs_student = move |text: &'static str| {
        Signal::derive(move || {
            if has_student.get() {
                text.to_string()
            } else {
                "Sélectionnez un étudiant pour continuer.".to_string()
            }
        })
    };
    let badge_description = Signal::derive(move || {
        let count = badges.with(Vec::len);
        if count > 0 {
            format!("{} étudiant(s) sélectionné(s). {}", count, badge_summary(count))
        } else if has_student.get() {
            "Utilisez la liste au-dessus pour ajouter des étudiants.".to_string()
        } else {
            "Recherchez des étudiants puis ajoutez-les aux badges.".to_string()
        }
    });

    let close = Callback::new(move |_| preview.set(None));

    view! {
        <PageFrame page_id="u501_documents--usecase" category=PAGE_CAT_USECASE>
            <PageHeader title="Génération de documents" subtitle="Certificats, relevés, cartes et fiches de notes.".to_string()>
                <span class="selection-chip">
                    {move || selected.with(|s| badges.with(|b| selection_label(s.as_ref(), b.len())))}
                </span>
            </PageHeader>

            <div class="page__content">
                <Card class="documents__search">
                    <div class="documents__hint">
                        "Entrez le nom, les prénoms ou le matricule. Pour les badges, sélectionnez autant d'étudiants que nécessaire (4 badges par page)."
                    </div>
                    <div class="search-row">
                        <input
                            class="form__input"
                            type="text"
                            placeholder="Rechercher..."
                            prop:value=move || query.get()
                            on:input=move |ev| on_query_input(event_target_value(&ev))
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    search_round.update(|r| *r += 1);
                                    run_search();
                                }
                            }
                        />
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| run_search() disabled=loading>
                            {icon("search")}
                            {move || if loading.get() { " Recherche..." } else { " Rechercher" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| add_class()
                            disabled=Signal::derive(move || !has_student.get())
                        >
                            {icon("users")}
                            {move || if loading_all.get() { " Chargement..." } else { " Ajouter sa classe" }}
                        </Button>
                    </div>

                    <div class="documents__results">
                        <For
                            each=move || results.get()
                            key=|s| s.id.clone()
                            children=move |student| {
                                let id = student.id.clone();
                                let id_badge = student.id.clone();
                                let for_select = student.clone();
                                let for_badge = student.clone();
                                let in_badges = Signal::derive(move || badges.with(|b| b.iter().any(|x| x.id == id_badge)));
                                view! {
                                    <div
                                        class="result-row"
                                        class:result-row--active=move || selected.with(|s| s.as_ref().map(|x| x.id == id).unwrap_or(false))
                                    >
                                        <button class="result-row__main" on:click=move |_| selected.set(Some(for_select.clone()))>
                                            <div class="result-row__name">{student.full_name()}</div>
                                            <div class="result-row__meta">{result_meta(&student)}</div>
                                        </button>
                                        <button
                                            class="result-row__badge"
                                            class:result-row__badge--on=move || in_badges.get()
                                            on:click=move |_| badges.update(|b| toggle_badge(b, &for_badge))
                                        >
                                            {move || if in_badges.get() { "Retirer" } else { "Ajouter au badge" }}
                                        </button>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Card>

                <Card class="documents__types">
                    <div class="documents__grid">
                        <DocumentTile
                            icon_name="file-text"
                            title="Certificat de scolarité"
                            description=needs_student("Document officiel attestant de l’inscription de l’étudiant.")
                            disabled=Signal::derive(move || !has_student.get())
                            on_open=Callback::new(move |_| open_single(DocPreview::Certificate))
                        />
                        <DocumentTile
                            icon_name="download"
                            title="Relevé de notes"
                            description=needs_student("Aperçu du relevé ; impression à venir.")
                            disabled=Signal::derive(move || !has_student.get())
                            on_open=Callback::new(move |_| open_transcript())
                        />
                        <DocumentTile
                            icon_name="eye"
                            title="Carte d’étudiant"
                            description=needs_student("Carte format ID-1 (85,6×54mm) avec photo.")
                            disabled=Signal::derive(move || !has_student.get())
                            on_open=Callback::new(move |_| open_single(DocPreview::Card))
                        />
                        <DocumentTile
                            icon_name="users"
                            title="Badge étudiant (A6)"
                            description=badge_description
                            disabled=Signal::derive(move || !has_student.get())
                            on_open=Callback::new(move |_| open_badges())
                        />
                        <DocumentTile
                            icon_name="clipboard"
                            title="Fiche de report de notes (classe)"
                            description="Fiche vierge par classe pour CC / 20 et SN / 20.".to_string()
                            disabled=false
                            on_open=Callback::new(move |_| preview.set(Some(DocPreview::BlankSheet)))
                        />
                    </div>
                    <Show when=move || !has_student.get()>
                        <p class="documents__info">
                            "Pour les documents individuels (certificat, carte, badge), sélectionnez d'abord un étudiant. La fiche de report de notes fonctionne par classe."
                        </p>
                    </Show>
                </Card>
            </div>

            {move || preview.get().map(|current| {
                if matches!(current, DocPreview::BlankSheet) {
                    return view! {
                        <Modal title=current.title() on_close=close max_width="820px">
                            <BlankSheet on_close=close />
                        </Modal>
                    }.into_any();
                }
                let doc = current.document();
                let html = doc.as_ref().map(HtmlDocument::to_preview_html).unwrap_or_default();
                let summary = match &current {
                    DocPreview::Badges(list) => badge_summary(list.len()),
                    _ => doc.as_ref().map(|d| format!("{} page(s)", d.page_count())).unwrap_or_default(),
                };
                view! {
                    <Modal title=current.title() on_close=close max_width="1000px">
                        <div class="doc-preview__toolbar">
                            <span class="doc-preview__summary">{summary}</span>
                            {preview_actions(current.clone(), doc)}
                        </div>
                        <div class="doc-preview" inner_html=html></div>
                    </Modal>
                }.into_any()
            })}
        </PageFrame>
    }
}

/// Boutons de la fenêtre d'aperçu selon le document
fn preview_actions(current: DocPreview, doc: Option<HtmlDocument>) -> impl IntoView {
    let print = move |_| {
        if let Some(d) = &doc {
            alert_on_error(open_print_window(d));
        }
    };
    match current {
        DocPreview::Certificate(s) => {
            let id = s.id.clone();
            view! {
                <Button appearance=ButtonAppearance::Primary on_click=print>{icon("printer")} " Imprimer"</Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| alert_on_error(open_in_new_tab(&certificate_url(&id)))>
                    "Version serveur"
                </Button>
            }
            .into_any()
        }
        DocPreview::Card(s) => {
            let id = s.id.clone();
            view! {
                <Button appearance=ButtonAppearance::Primary on_click=print>{icon("printer")} " Imprimer"</Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| alert_on_error(open_in_new_tab(&card_url(&id)))>
                    "Version serveur"
                </Button>
            }
            .into_any()
        }
        DocPreview::Badges(list) => view! {
            <Button appearance=ButtonAppearance::Primary on_click=print>{icon("printer")} " Imprimer"</Button>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| download_badges_pdf(&list)>
                {icon("download")}
                " PDF"
            </Button>
        }
        .into_any(),
        DocPreview::Transcript(_) => view! { <span class="badge">"Impression à venir"</span> }.into_any(),
        DocPreview::BlankSheet => view! { <span></span> }.into_any(),
    }
}
