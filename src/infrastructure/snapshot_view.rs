// Headless view and chart renderer that record what the dashboard shows.
// The HTTP layer serializes their state for the browser client.
use crate::application::chart_lifecycle::{ChartHandle, ChartRenderer};
use crate::application::dashboard_service::Dashboard;
use crate::application::view::{Control, DashboardView};
use crate::domain::battery::Battery;
use crate::domain::dashboard::SectionData;
use crate::domain::fleet::FleetSummary;
use crate::domain::section::{ChartSlot, Section};
use crate::domain::telemetry::ChartConfig;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Element tags present in the dashboard markup.
pub const TAGGED_KEYS: &[&str] = &[
    "app.title",
    "app.logout",
    "nav.dashboard",
    "nav.battery-health",
    "nav.route-optimizer",
    "nav.circular-economy",
    "nav.station-placement",
    "nav.analytics",
    "kpi.total-batteries",
    "kpi.avg-health",
    "kpi.active-stations",
    "kpi.avg-utilization",
    "battery.soc",
    "battery.temperature",
    "battery.cycles",
    "status.active",
    "status.charging",
    "status.maintenance",
    "route.origin",
    "route.destination",
    "route.calculate",
    "route.distance",
    "route.elevation-gain",
    "route.predicted-range",
    "route.confidence",
    "economy.lithium",
    "economy.cobalt",
    "economy.nickel",
    "economy.recovered",
    "economy.target",
    "stations.demand",
    "analytics.ml-performance",
    "analytics.accuracy",
];

#[derive(Debug, Clone)]
pub struct SnapshotView {
    sections: HashSet<Section>,
    canvases: HashSet<ChartSlot>,
    visible: BTreeSet<Section>,
    selected_nav: Option<Section>,
    last_rendered: Option<SectionData>,
    kpis: Option<FleetSummary>,
    kpi_renders: usize,
    battery_grid: Vec<Battery>,
    texts: BTreeMap<String, String>,
    controls: Vec<Control>,
}

impl SnapshotView {
    pub fn new() -> Self {
        Self {
            sections: Section::ALL.into_iter().collect(),
            canvases: Section::ALL
                .iter()
                .flat_map(|s| s.chart_slots().iter().copied())
                .collect(),
            visible: BTreeSet::new(),
            selected_nav: None,
            last_rendered: None,
            kpis: None,
            kpi_renders: 0,
            battery_grid: Vec::new(),
            texts: BTreeMap::new(),
            controls: Vec::new(),
        }
    }

    pub fn visible_sections(&self) -> Vec<Section> {
        self.visible.iter().copied().collect()
    }

    pub fn selected_nav(&self) -> Option<Section> {
        self.selected_nav
    }

    pub fn last_rendered(&self) -> Option<&SectionData> {
        self.last_rendered.as_ref()
    }

    pub fn kpis(&self) -> Option<&FleetSummary> {
        self.kpis.as_ref()
    }

    pub fn kpi_renders(&self) -> usize {
        self.kpi_renders
    }

    pub fn battery_grid(&self) -> &[Battery] {
        &self.battery_grid
    }

    pub fn texts(&self) -> &BTreeMap<String, String> {
        &self.texts
    }
}

#[cfg(test)]
impl SnapshotView {
    pub fn without_section(mut self, section: Section) -> Self {
        self.sections.remove(&section);
        self
    }

    pub fn without_canvas(mut self, slot: ChartSlot) -> Self {
        self.canvases.remove(&slot);
        self
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }

    pub fn bound_controls(&self) -> &[Control] {
        &self.controls
    }
}

impl Default for SnapshotView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView for SnapshotView {
    fn has_section(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    fn has_canvas(&self, slot: ChartSlot) -> bool {
        self.canvases.contains(&slot)
    }

    fn set_section_visible(&mut self, section: Section, visible: bool) {
        if visible {
            self.visible.insert(section);
        } else {
            self.visible.remove(&section);
        }
    }

    fn set_nav_selected(&mut self, section: Section, selected: bool) {
        if selected {
            self.selected_nav = Some(section);
        } else if self.selected_nav == Some(section) {
            self.selected_nav = None;
        }
    }

    fn render(&mut self, _section: Section, data: &SectionData) {
        self.last_rendered = Some(data.clone());
    }

    fn render_kpis(&mut self, summary: &FleetSummary) {
        self.kpis = Some(*summary);
        self.kpi_renders += 1;
    }

    fn render_battery_grid(&mut self, batteries: &[Battery]) {
        self.battery_grid = batteries.to_vec();
    }

    fn tagged_keys(&self) -> Vec<String> {
        TAGGED_KEYS.iter().map(|k| k.to_string()).collect()
    }

    fn set_text(&mut self, key: &str, text: &str) {
        self.texts.insert(key.to_string(), text.to_string());
    }

    fn bind_control(&mut self, control: Control) {
        if !self.controls.contains(&control) {
            self.controls.push(control);
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveChart {
    pub handle: u64,
    pub canvas_id: String,
    pub config: ChartConfig,
}

/// Keeps the config of every live chart so a client can draw it.
#[derive(Debug, Clone, Default)]
pub struct RecordingChartRenderer {
    next_handle: u64,
    live: BTreeMap<ChartHandle, (String, ChartConfig)>,
    created: usize,
    destroyed: usize,
    resized: usize,
}

impl RecordingChartRenderer {
    pub fn live_charts(&self) -> Vec<LiveChart> {
        self.live
            .iter()
            .map(|(handle, (canvas_id, config))| LiveChart {
                handle: handle.0,
                canvas_id: canvas_id.clone(),
                config: config.clone(),
            })
            .collect()
    }

    /// Number of live charts bound to `canvas_id`.
    pub fn live_on(&self, canvas_id: &str) -> usize {
        self.live.values().filter(|(c, _)| c == canvas_id).count()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    pub fn resized(&self) -> usize {
        self.resized
    }
}

#[cfg(test)]
impl RecordingChartRenderer {
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn config_on(&self, canvas_id: &str) -> Option<&ChartConfig> {
        self.live
            .values()
            .find(|(c, _)| c == canvas_id)
            .map(|(_, config)| config)
    }
}

impl ChartRenderer for RecordingChartRenderer {
    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> anyhow::Result<ChartHandle> {
        if self.live_on(canvas_id) > 0 {
            anyhow::bail!("canvas {} already has a live chart", canvas_id);
        }
        self.next_handle += 1;
        let handle = ChartHandle(self.next_handle);
        self.live.insert(handle, (canvas_id.to_string(), config.clone()));
        self.created += 1;
        Ok(handle)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }

    fn resize(&mut self, handle: ChartHandle) {
        if self.live.contains_key(&handle) {
            self.resized += 1;
        }
    }
}

/// Serializable picture of the dashboard as the browser should draw it.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub active_section: Section,
    pub language: String,
    pub visible_sections: Vec<Section>,
    pub selected_nav: Option<Section>,
    pub kpis: Option<FleetSummary>,
    pub battery_grid: Vec<Battery>,
    pub content: Option<SectionData>,
    pub charts: Vec<LiveChart>,
    pub texts: BTreeMap<String, String>,
    pub refresh_ticks: u64,
    pub kpi_renders: usize,
    pub chart_stats: ChartStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartStats {
    pub created: usize,
    pub destroyed: usize,
    pub resized: usize,
}

impl DashboardSnapshot {
    pub fn capture(dashboard: &Dashboard<SnapshotView, RecordingChartRenderer>) -> Self {
        let view = dashboard.view();
        let renderer = dashboard.renderer();
        Self {
            active_section: dashboard.active_section(),
            language: dashboard.language().to_string(),
            visible_sections: view.visible_sections(),
            selected_nav: view.selected_nav(),
            kpis: view.kpis().copied(),
            battery_grid: view.battery_grid().to_vec(),
            content: view.last_rendered().cloned(),
            charts: renderer.live_charts(),
            texts: view.texts().clone(),
            refresh_ticks: dashboard.tick_count(),
            kpi_renders: view.kpi_renders(),
            chart_stats: ChartStats {
                created: renderer.created(),
                destroyed: renderer.destroyed(),
                resized: renderer.resized(),
            },
        }
    }
}
