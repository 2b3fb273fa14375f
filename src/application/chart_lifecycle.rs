// Chart lifecycle: at most one live chart handle per canvas
use crate::application::telemetry_store::TelemetryStore;
use crate::domain::section::{ChartSlot, Section};
use crate::domain::telemetry::{self, ChartConfig};
use std::collections::BTreeMap;

/// Opaque binding between a canvas and a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartHandle(pub u64);

pub trait ChartRenderer: Send {
    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> anyhow::Result<ChartHandle>;

    fn destroy(&mut self, handle: ChartHandle);

    fn resize(&mut self, handle: ChartHandle);
}

/// Derive the chart for `slot` from the current store. Only health and
/// materials read live data; the rest are fixed illustrative series.
pub fn chart_config(slot: ChartSlot, store: &TelemetryStore) -> ChartConfig {
    match slot {
        ChartSlot::Health => telemetry::health_chart(store.batteries()),
        ChartSlot::Degradation => telemetry::degradation_chart(),
        ChartSlot::Elevation => telemetry::elevation_chart(),
        ChartSlot::Materials => telemetry::materials_chart(store.materials()),
        ChartSlot::Demand => telemetry::demand_chart(),
        ChartSlot::Ml => telemetry::ml_chart(),
        ChartSlot::Accuracy => telemetry::accuracy_chart(),
    }
}

#[derive(Debug, Default)]
pub struct ChartLifecycle {
    live: BTreeMap<ChartSlot, ChartHandle>,
}

impl ChartLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the handle bound to `slot`, if any.
    pub fn destroy(&mut self, slot: ChartSlot, renderer: &mut dyn ChartRenderer) {
        if let Some(handle) = self.live.remove(&slot) {
            tracing::debug!("Destroying chart {:?} on {}", handle, slot.canvas_id());
            renderer.destroy(handle);
        }
    }

    pub fn teardown(&mut self, section: Section, renderer: &mut dyn ChartRenderer) {
        for slot in section.chart_slots() {
            self.destroy(*slot, renderer);
        }
    }

    /// Create the charts for `section`. Slots whose canvas is missing, or whose
    /// creation fails, are skipped after logging.
    pub fn build(
        &mut self,
        section: Section,
        store: &TelemetryStore,
        has_canvas: impl Fn(ChartSlot) -> bool,
        renderer: &mut dyn ChartRenderer,
    ) {
        for &slot in section.chart_slots() {
            // Never bind a second chart to a canvas.
            self.destroy(slot, renderer);

            if !has_canvas(slot) {
                tracing::warn!("Canvas {} not found, skipping chart", slot.canvas_id());
                continue;
            }

            let config = chart_config(slot, store);
            match renderer.create(slot.canvas_id(), &config) {
                Ok(handle) => {
                    tracing::debug!("Created chart {:?} on {}", handle, slot.canvas_id());
                    self.live.insert(slot, handle);
                }
                Err(e) => {
                    tracing::warn!("Failed to create chart on {}: {}", slot.canvas_id(), e);
                }
            }
        }
    }

    pub fn resize_all(&self, renderer: &mut dyn ChartRenderer) {
        for handle in self.live.values() {
            renderer.resize(*handle);
        }
    }
}

#[cfg(test)]
impl ChartLifecycle {
    pub fn handle(&self, slot: ChartSlot) -> Option<ChartHandle> {
        self.live.get(&slot).copied()
    }

    pub fn live_slots(&self) -> Vec<ChartSlot> {
        self.live.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct CountingRenderer {
        next: u64,
        live: HashSet<ChartHandle>,
        created: usize,
        destroyed: usize,
        fail_on: Option<&'static str>,
    }

    impl ChartRenderer for CountingRenderer {
        fn create(&mut self, canvas_id: &str, _config: &ChartConfig) -> anyhow::Result<ChartHandle> {
            if self.fail_on == Some(canvas_id) {
                anyhow::bail!("no 2d context");
            }
            self.next += 1;
            self.created += 1;
            let handle = ChartHandle(self.next);
            self.live.insert(handle);
            Ok(handle)
        }

        fn destroy(&mut self, handle: ChartHandle) {
            assert!(self.live.remove(&handle), "double destroy of {:?}", handle);
            self.destroyed += 1;
        }

        fn resize(&mut self, _handle: ChartHandle) {}
    }

    #[test]
    fn test_rebuilding_replaces_instead_of_leaking() {
        let store = TelemetryStore::default();
        let mut renderer = CountingRenderer::default();
        let mut charts = ChartLifecycle::new();

        charts.build(Section::BatteryHealth, &store, |_| true, &mut renderer);
        charts.build(Section::BatteryHealth, &store, |_| true, &mut renderer);

        assert_eq!(renderer.created, 4);
        assert_eq!(renderer.destroyed, 2);
        assert_eq!(renderer.live.len(), 2);
        assert_eq!(charts.live_slots(), vec![ChartSlot::Health, ChartSlot::Degradation]);
    }

    #[test]
    fn test_teardown_without_live_handles_is_noop() {
        let mut renderer = CountingRenderer::default();
        let mut charts = ChartLifecycle::new();

        charts.teardown(Section::Analytics, &mut renderer);
        charts.destroy(ChartSlot::Ml, &mut renderer);

        assert_eq!(renderer.destroyed, 0);
    }

    #[test]
    fn test_missing_canvas_and_failed_create_are_skipped() {
        let store = TelemetryStore::default();
        let mut renderer = CountingRenderer {
            fail_on: Some("accuracyChart"),
            ..Default::default()
        };
        let mut charts = ChartLifecycle::new();

        charts.build(Section::Analytics, &store, |_| true, &mut renderer);
        assert_eq!(charts.live_slots(), vec![ChartSlot::Ml]);

        charts.build(Section::BatteryHealth, &store, |slot| slot != ChartSlot::Health, &mut renderer);
        assert_eq!(charts.handle(ChartSlot::Health), None);
        assert!(charts.handle(ChartSlot::Degradation).is_some());
    }
}
