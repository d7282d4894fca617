//! REST API over a live grid simulation.
//!
//! Read endpoints:
//! - `GET /assets`, `/stats`, `/history`, `/events`, `/advice`
//!
//! Mutations:
//! - `POST /scenario/{name}` (400 on unknown name), `/reset`, `/advice`
//!
//! The grid lives behind a single `RwLock` and is replaced wholesale on
//! every transition, so readers only ever observe complete states.

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::advisory::Advisor;
use crate::sim::GridState;
use crate::sim::random::StdSource;

/// Application state shared across request handlers and the tick task.
pub struct AppState {
    grid: RwLock<GridState>,
    rng: Mutex<StdSource>,
    advisor: Arc<dyn Advisor>,
}

impl AppState {
    /// Wraps an initial grid, its random source and an advisor.
    pub fn new(grid: GridState, rng: StdSource, advisor: Arc<dyn Advisor>) -> Self {
        Self {
            grid: RwLock::new(grid),
            rng: Mutex::new(rng),
            advisor,
        }
    }

    /// Clone of the current grid state.
    pub async fn snapshot(&self) -> GridState {
        self.grid.read().await.clone()
    }

    /// Replaces the grid with `f(current)` under the write lock.
    ///
    /// The lock is downgraded, not released, so the returned guard reads
    /// exactly the state `f` produced.
    pub async fn transition(
        &self,
        f: impl FnOnce(GridState) -> GridState,
    ) -> RwLockReadGuard<'_, GridState> {
        let mut guard = self.grid.write().await;
        let current = std::mem::take(&mut *guard);
        *guard = f(current);
        guard.downgrade()
    }

    /// Advances the simulation by one tick.
    pub async fn tick(&self) {
        let mut rng = self.rng.lock().await;
        drop(self.transition(|grid| grid.tick(&mut *rng)).await);
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/assets", get(handlers::get_assets))
        .route("/stats", get(handlers::get_stats))
        .route("/history", get(handlers::get_history))
        .route("/events", get(handlers::get_events))
        .route(
            "/advice",
            get(handlers::get_advice).post(handlers::post_advice),
        )
        .route("/scenario/{name}", post(handlers::post_scenario))
        .route("/reset", post(handlers::post_reset))
        .with_state(state)
}

/// Spawns the periodic tick task.
///
/// The first tick fires one `period` after the call.
pub fn spawn_ticker(state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            state.tick().await;
            debug!("api tick");
        }
    })
}

/// Binds to the given address, starts the ticker and serves the API.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr, period: Duration) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let ticker = spawn_ticker(Arc::clone(&state), period);
    info!(%addr, "API server listening");
    let result = axum::serve(listener, router(state)).await;
    ticker.abort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::OfflineAdvisor;
    use crate::assets::seed::default_fleet;
    use crate::sim::Scenario;
    use crate::sim::types::SimConfig;

    fn state() -> AppState {
        AppState::new(
            GridState::new(default_fleet(), SimConfig::default()),
            StdSource::seeded(5),
            Arc::new(OfflineAdvisor),
        )
    }

    #[tokio::test]
    async fn tick_advances_shared_state() {
        let app = state();
        app.tick().await;
        app.tick().await;
        let grid = app.snapshot().await;
        assert_eq!(grid.tick_count(), 2);
        assert_eq!(grid.history().len(), 2);
    }

    #[tokio::test]
    async fn transition_hands_back_the_produced_state() {
        let app = state();
        let grid = app
            .transition(|g| g.apply_scenario(Scenario::Blackout))
            .await;
        assert_eq!(grid.active_scenario(), Some(Scenario::Blackout));
        assert_eq!(grid.assets().len(), 6);
        assert!(app.grid.try_write().is_err());
        drop(grid);

        assert!(app.grid.try_write().is_ok());
        assert_eq!(app.snapshot().await.active_scenario(), Some(Scenario::Blackout));
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_drives_ticks() {
        let app = Arc::new(state());
        let handle = spawn_ticker(Arc::clone(&app), Duration::from_secs(3));
        tokio::time::sleep(Duration::from_millis(9500)).await;
        handle.abort();
        assert_eq!(app.snapshot().await.tick_count(), 3);
    }
}
