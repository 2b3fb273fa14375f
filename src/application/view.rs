// View capability used by the dashboard core; implementations own all rendering detail
use crate::domain::battery::Battery;
use crate::domain::dashboard::SectionData;
use crate::domain::fleet::FleetSummary;
use crate::domain::section::{ChartSlot, Section};

/// Interactive controls the dashboard binds at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Nav(Section),
    LanguageSelector,
    CalculateRoute,
    Logout,
}

/// Events raised by bound controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Carries the raw identifier; it may be stale or malformed.
    Navigate(String),
    LanguageChanged(String),
    CalculateRoute { origin: String, destination: String },
    Resized,
    Logout,
}

pub trait DashboardView: Send {
    /// Whether the section container exists in the view.
    fn has_section(&self, section: Section) -> bool;

    fn has_canvas(&self, slot: ChartSlot) -> bool;

    fn set_section_visible(&mut self, section: Section, visible: bool);

    fn set_nav_selected(&mut self, section: Section, selected: bool);

    fn render(&mut self, section: Section, data: &SectionData);

    fn render_kpis(&mut self, summary: &FleetSummary);

    fn render_battery_grid(&mut self, batteries: &[Battery]);

    /// Translation keys of every tagged text element.
    fn tagged_keys(&self) -> Vec<String>;

    fn set_text(&mut self, key: &str, text: &str);

    fn bind_control(&mut self, control: Control);
}
