use crate::dashboards::d400_overview::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::components::{CardAnimated, PageHeader, StatCard};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d400_overview::dto::{DashboardOverview, QuickAction};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn action_icon(action: QuickAction) -> &'static str {
    match action {
        QuickAction::EnrollStudent => "users",
        QuickAction::PrintDocuments => "printer",
        QuickAction::TakeAttendance => "calendar-check",
    }
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (overview, set_overview) = signal::<Option<DashboardOverview>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        spawn_local(async move {
            match api::fetch_overview().await {
                Ok(data) => {
                    set_overview.set(Some(data));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("tableau de bord : {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    };

    load();

    let stat = move |f: fn(&DashboardOverview) -> String| {
        Signal::derive(move || overview.with(|o| o.as_ref().map(f)))
    };

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Tableau de bord" subtitle="Vue d'ensemble de l'année en cours".to_string()>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                    {icon("refresh")}
                    " Actualiser"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

                <div class="stat-grid">
                    <StatCard label="Étudiants actifs" icon_name="users" value=stat(|o| o.active_students.to_string()) />
                    <StatCard label="Classes" icon_name="school" value=stat(|o| o.class_count.to_string()) />
                    <StatCard
                        label="Assiduité"
                        icon_name="calendar-check"
                        tone="success"
                        value=stat(DashboardOverview::assiduite_display)
                    />
                    <StatCard
                        label="Documents édités"
                        icon_name="file-text"
                        tone="accent"
                        value=stat(|o| o.documents_count.to_string())
                    />
                </div>

                <div class="dashboard__columns">
                    <CardAnimated delay_ms=50>
                        <h3 class="dashboard__section-title">"Activités récentes"</h3>
                        {move || {
                            let activities = overview.with(|o| o.as_ref().map(|o| o.activities.clone()).unwrap_or_default());
                            if activities.is_empty() {
                                return view! { <div class="empty">"Aucune activité récente."</div> }.into_any();
                            }
                            view! {
                                <ul class="activity-list">
                                    {activities.into_iter().map(|a| view! {
                                        <li class="activity-list__item">
                                            <div class="activity-list__title">{a.title}</div>
                                            <div class="activity-list__description">{a.description}</div>
                                            <div class="activity-list__time">{a.time}</div>
                                        </li>
                                    }).collect_view()}
                                </ul>
                            }.into_any()
                        }}
                    </CardAnimated>

                    <CardAnimated delay_ms=100>
                        <h3 class="dashboard__section-title">"Actions rapides"</h3>
                        <div class="quick-actions">
                            {QuickAction::all().into_iter().map(|action| {
                                view! {
                                    <Button
                                        appearance=ButtonAppearance::Secondary
                                        on_click=move |_| {
                                            let target = action.target();
                                            ctx.open_tab(target, tab_label_for_key(target));
                                        }
                                    >
                                        {icon(action_icon(action))}
                                        " "
                                        {action.label()}
                                    </Button>
                                }
                            }).collect_view()}
                        </div>
                    </CardAnimated>
                </div>
            </div>
        </PageFrame>
    }
}
