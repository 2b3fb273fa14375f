// Async runtime around the dashboard: deferred section loads and the refresh timer
use crate::application::chart_lifecycle::ChartRenderer;
use crate::application::dashboard_service::{Dashboard, EventOutcome, TickOutcome};
use crate::application::view::{DashboardView, UiEvent};
use crate::application::view_router::PendingLoad;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub struct DashboardSession<V, C> {
    dashboard: Arc<Mutex<Dashboard<V, C>>>,
    load_delay: Duration,
}

impl<V, C> Clone for DashboardSession<V, C> {
    fn clone(&self) -> Self {
        Self {
            dashboard: self.dashboard.clone(),
            load_delay: self.load_delay,
        }
    }
}

impl<V, C> DashboardSession<V, C>
where
    V: DashboardView + 'static,
    C: ChartRenderer + 'static,
{
    /// Initialise the dashboard in `language` and schedule its first load.
    pub fn start(mut dashboard: Dashboard<V, C>, language: &str, load_delay: Duration) -> Self {
        let initial = dashboard.init(language);
        let session = Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            load_delay,
        };
        session.schedule_load(initial);
        session
    }

    fn schedule_load(&self, load: PendingLoad) {
        let dashboard = self.dashboard.clone();
        let delay = self.load_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dashboard.lock().await.load_section(load);
        });
    }

    /// Route a UI event; section activations load after the configured delay.
    pub async fn dispatch(&self, event: UiEvent) -> EventOutcome {
        let outcome = self.dashboard.lock().await.handle_event(event);
        if let EventOutcome::Load(load) = outcome {
            self.schedule_load(load);
        }
        outcome
    }

    pub async fn navigate(&self, section_id: &str) -> bool {
        matches!(
            self.dispatch(UiEvent::Navigate(section_id.to_string())).await,
            EventOutcome::Load(_)
        )
    }

    pub async fn tick(&self) -> TickOutcome {
        self.dashboard.lock().await.refresh_tick()
    }

    /// Read the dashboard under the lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&Dashboard<V, C>) -> R) -> R {
        let dashboard = self.dashboard.lock().await;
        f(&dashboard)
    }

    /// Tick every `period` until `cancel` fires. The first tick happens one
    /// full period after the call.
    pub fn spawn_refresh_loop(&self, period: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        let session = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("Refresh loop stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        let outcome = session.tick().await;
                        tracing::trace!("Tick {} done (overview re-rendered: {})", outcome.tick, outcome.rerendered);
                    }
                }
            }
        })
    }
}
