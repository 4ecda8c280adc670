use crate::countdown::{Countdown, CountdownState};
use crate::error::{ReleaseError, ReleaseErrorExt};
use lectern_kernel::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

/// Background re-evaluation of a [`Countdown`] on a fixed period.
///
/// The latest state is available through [`CountdownTicker::subscribe`]. The task ends by
/// itself once the countdown is released and is aborted when the ticker is dropped.
#[derive(Debug)]
pub struct CountdownTicker {
    rx: watch::Receiver<CountdownState>,
    task: JoinHandle<()>,
}

impl CountdownTicker {
    /// Spawns the ticker on the current tokio runtime.
    ///
    /// # Errors
    /// Returns [`ReleaseError::InvalidPeriod`] for a zero period, or
    /// [`ReleaseError::Runtime`] when called outside a runtime.
    pub fn spawn(
        mut countdown: Countdown,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> Result<Self, ReleaseError> {
        if period.is_zero() {
            return Err(ReleaseError::InvalidPeriod {
                message: "period must be non-zero".into(),
                context: None,
            });
        }
        let runtime = tokio::runtime::Handle::try_current().context("Countdown ticker")?;

        let initial = countdown.tick(clock.now());
        let (tx, rx) = watch::channel(initial);

        let task = runtime.spawn(async move {
            if initial.is_released() {
                return;
            }

            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await;

            loop {
                interval.tick().await;
                let state = countdown.tick(clock.now());
                trace!(?state, "Countdown tick");
                tx.send_replace(state);

                if state.is_released() {
                    debug!(release = %countdown.release(), "Countdown released");
                    break;
                }
            }
        });

        Ok(Self { rx, task })
    }

    #[must_use]
    pub fn state(&self) -> CountdownState {
        *self.rx.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.rx.clone()
    }

    /// Waits until the countdown is released. Returns immediately if it already is.
    pub async fn released(&self) {
        let mut rx = self.rx.clone();
        // An error means the task ended, which only happens after release or abort.
        let _ = rx.wait_for(CountdownState::is_released).await;
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
