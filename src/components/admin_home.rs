//! Admin Dashboard
//!
//! Donor and recipient counts with a bar and a pie chart.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::DashboardStats;
use crate::components::charts::{account_series, BarChart, PieChart};
use crate::components::product_feed::FetchGuard;
use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AdminHome() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let stats = RwSignal::new(DashboardStats::default());
    let (loading, set_loading) = signal(true);
    let error = RwSignal::new(None::<String>);
    let guard = FetchGuard::new();

    let load = move || {
        let ticket = guard.begin();
        set_loading.set(true);
        let api = ctx.api();
        spawn_local(async move {
            let result = api.dashboard_stats().await;
            if !guard.is_current(ticket) {
                return;
            }
            match result {
                Ok(loaded) => {
                    log::info!("[admin] {} donors, {} recipients", loaded.sellers, loaded.buyers);
                    stats.set(loaded);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("[admin] loading dashboard failed: {e}");
                    error.set(Some(e.user_message("Failed to load dashboard data")));
                }
            }
            set_loading.set(false);
        });
    };
    load();

    let name = move || store.session().with(|session| session.display_name());
    let series = Signal::derive(move || {
        let current = stats.get();
        account_series(current.sellers, current.buyers)
    });

    view! {
        <div class="admin-home">
            <section class="admin-header">
                <h1>"Welcome, " {name}</h1>
                <button class="btn btn-outline" disabled=move || loading.get() on:click=move |_| load()>
                    "Refresh"
                </button>
            </section>

            <ErrorBanner title="Error loading dashboard" message=error />

            <section class="stats-row">
                <div class="stat-card donors">
                    <span class="stat-value">
                        {move || if loading.get() { "…".to_string() } else { stats.get().sellers.to_string() }}
                    </span>
                    <span class="stat-label">"Donors"</span>
                </div>
                <div class="stat-card recipients">
                    <span class="stat-value">
                        {move || if loading.get() { "…".to_string() } else { stats.get().buyers.to_string() }}
                    </span>
                    <span class="stat-label">"Recipients"</span>
                </div>
            </section>

            <section class="charts">
                <div class="chart-card">
                    <h2>"Accounts"</h2>
                    <BarChart series=series />
                </div>
                <div class="chart-card">
                    <h2>"Distribution"</h2>
                    <PieChart series=series />
                </div>
            </section>
        </div>
    }
}
