// Dashboard service - Application state driving navigation, charts and refresh
use crate::application::chart_lifecycle::{ChartLifecycle, ChartRenderer};
use crate::application::refresh_loop::Jitter;
use crate::application::route_service::RouteLookup;
use crate::application::telemetry_store::SharedStore;
use crate::application::translations::{TranslationTable, FALLBACK_LANGUAGE};
use crate::application::view::{Control, DashboardView, UiEvent};
use crate::application::view_router::{PendingLoad, ViewRouter};
use crate::domain::dashboard::{ModelPerformance, SectionData};
use crate::domain::route::Route;
use crate::domain::section::Section;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// A section was activated; run this load after the layout settles.
    Load(PendingLoad),
    Handled,
    Ignored,
    /// The caller owns the credential and must clear it.
    LogoutRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub tick: u64,
    pub rerendered: bool,
}

pub struct Dashboard<V, C> {
    store: SharedStore,
    translations: Arc<TranslationTable>,
    language: String,
    router: ViewRouter,
    charts: ChartLifecycle,
    routes: RouteLookup,
    last_route: Option<Route>,
    jitter: Jitter,
    ticks: u64,
    view: V,
    renderer: C,
}

impl<V: DashboardView, C: ChartRenderer> Dashboard<V, C> {
    pub fn new(
        store: SharedStore,
        translations: Arc<TranslationTable>,
        view: V,
        renderer: C,
        jitter: Jitter,
    ) -> Self {
        Self {
            store,
            translations,
            language: FALLBACK_LANGUAGE.to_string(),
            router: ViewRouter::new(Section::Dashboard),
            charts: ChartLifecycle::new(),
            routes: RouteLookup::default(),
            last_route: None,
            jitter,
            ticks: 0,
            view,
            renderer,
        }
    }

    /// Bind controls, translate tagged text and show the overview.
    /// Returns the load for the initial section.
    pub fn init(&mut self, language: &str) -> PendingLoad {
        for section in Section::ALL {
            self.view.bind_control(Control::Nav(section));
            self.view.set_section_visible(section, false);
            self.view.set_nav_selected(section, false);
        }
        self.view.bind_control(Control::LanguageSelector);
        self.view.bind_control(Control::CalculateRoute);
        self.view.bind_control(Control::Logout);

        if !self.set_language(language) {
            self.apply_translations();
        }
        self.activate(Section::Dashboard)
    }

    pub fn handle_event(&mut self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::Navigate(id) => match self.navigate_to(&id) {
                Some(load) => EventOutcome::Load(load),
                None => EventOutcome::Ignored,
            },
            UiEvent::LanguageChanged(code) => {
                if self.set_language(&code) {
                    EventOutcome::Handled
                } else {
                    EventOutcome::Ignored
                }
            }
            UiEvent::CalculateRoute { origin, destination } => {
                self.compute_route(&origin, &destination);
                EventOutcome::Handled
            }
            UiEvent::Resized => {
                self.charts.resize_all(&mut self.renderer);
                EventOutcome::Handled
            }
            UiEvent::Logout => EventOutcome::LogoutRequested,
        }
    }

    /// Switch the active section. Unknown identifiers and sections missing
    /// from the view are ignored without touching any state.
    pub fn navigate_to(&mut self, section_id: &str) -> Option<PendingLoad> {
        let Some(section) = Section::from_id(section_id) else {
            tracing::debug!("Ignoring navigation to unknown section {:?}", section_id);
            return None;
        };
        if !self.view.has_section(section) {
            tracing::warn!("Section {} not present in view, skipping navigation", section);
            return None;
        }
        Some(self.activate(section))
    }

    fn activate(&mut self, section: Section) -> PendingLoad {
        let previous = self.router.active();
        self.view.set_section_visible(previous, false);
        self.view.set_nav_selected(previous, false);
        self.charts.teardown(previous, &mut self.renderer);

        let transition = self.router.activate(section);
        self.view.set_section_visible(section, true);
        self.view.set_nav_selected(section, true);

        tracing::info!("Navigated {} -> {}", transition.from, transition.to);
        transition.load
    }

    /// Render the section's data and rebuild its charts. Returns false when
    /// the load went stale because another navigation happened first.
    pub fn load_section(&mut self, load: PendingLoad) -> bool {
        if !self.router.is_current(&load) {
            tracing::debug!("Skipping stale load for {}", load.section);
            return false;
        }
        let section = load.section;
        if !self.view.has_section(section) {
            tracing::warn!("Section {} disappeared before load", section);
            return false;
        }

        let data = self.section_data(section);
        self.view.render(section, &data);
        if let SectionData::Dashboard { summary, batteries } = &data {
            self.view.render_kpis(summary);
            self.view.render_battery_grid(batteries);
        }

        self.charts.teardown(section, &mut self.renderer);
        let store = self.store.read();
        let view = &self.view;
        self.charts
            .build(section, &store, |slot| view.has_canvas(slot), &mut self.renderer);
        true
    }

    pub fn section_data(&self, section: Section) -> SectionData {
        let store = self.store.read();
        match section {
            Section::Dashboard => SectionData::Dashboard {
                summary: store.summary(),
                batteries: store.batteries().to_vec(),
            },
            Section::BatteryHealth => SectionData::BatteryHealth {
                batteries: store.batteries().to_vec(),
            },
            Section::RouteOptimizer => SectionData::RouteOptimizer {
                route: self.last_route.clone(),
            },
            Section::CircularEconomy => SectionData::CircularEconomy {
                materials: store.materials().to_vec(),
            },
            Section::StationPlacement => SectionData::StationPlacement {
                stations: store.stations().to_vec(),
            },
            Section::Analytics => SectionData::Analytics {
                performance: ModelPerformance::default(),
            },
        }
    }

    /// Perturb every battery, then re-render the overview if it is showing.
    pub fn refresh_tick(&mut self) -> TickOutcome {
        {
            let mut store = self.store.write();
            self.jitter.perturb(store.batteries_mut());
        }
        self.ticks += 1;

        let rerendered = self.router.active() == Section::Dashboard;
        if rerendered {
            let store = self.store.read();
            self.view.render_kpis(&store.summary());
            self.view.render_battery_grid(store.batteries());
        }

        tracing::debug!("Refresh tick {} (rerendered: {})", self.ticks, rerendered);
        TickOutcome {
            tick: self.ticks,
            rerendered,
        }
    }

    /// Switch display language and re-render every tagged element.
    pub fn set_language(&mut self, code: &str) -> bool {
        if !TranslationTable::is_supported(code) {
            tracing::warn!("Unsupported language {:?}", code);
            return false;
        }
        self.language = code.to_string();
        self.apply_translations();
        true
    }

    fn apply_translations(&mut self) {
        for key in self.view.tagged_keys() {
            let text = self.translations.lookup(&self.language, &key).to_string();
            self.view.set_text(&key, &text);
        }
    }

    pub fn compute_route(&mut self, origin: &str, destination: &str) -> Route {
        let route = self.routes.compute(origin, destination);
        self.last_route = Some(route.clone());
        if self.router.active() == Section::RouteOptimizer {
            let data = self.section_data(Section::RouteOptimizer);
            self.view.render(Section::RouteOptimizer, &data);
        }
        route
    }

    pub fn active_section(&self) -> Section {
        self.router.active()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn renderer(&self) -> &C {
        &self.renderer
    }
}

#[cfg(test)]
impl<V: DashboardView, C: ChartRenderer> Dashboard<V, C> {
    pub fn fleet_summary(&self) -> crate::domain::fleet::FleetSummary {
        self.store.read().summary()
    }

    pub fn charts(&self) -> &ChartLifecycle {
        &self.charts
    }
}
