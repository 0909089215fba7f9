//! Countdown against the server-supplied board expiry.
//!
//! One ticker at most is ever alive: re-arming aborts the previous task
//! before spawning the next under the same lock, so overlapping timers
//! cannot occur. The tick itself is a pure function of `now` and the
//! expiry instant.

use chrono::NaiveDateTime;
use log::{debug, error};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;

use crate::interface::{ClockPort, RenderInstruction, RenderPort};

/// One countdown reading. Fields are clamped: once `now` passes the
/// expiry the breakdown is all zeros with `expired` set, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub expired: bool,
}

impl Countdown {
    /// Remaining time as a day-wrapped breakdown.
    pub fn until(expire_at: NaiveDateTime, now: NaiveDateTime) -> Self {
        let remaining = (expire_at - now).num_seconds();
        if remaining <= 0 {
            return Self::expired();
        }
        let within_day = remaining % 86_400;
        Self {
            hours: (within_day / 3_600) as u32,
            minutes: (within_day % 3_600 / 60) as u32,
            seconds: (within_day % 60) as u32,
            expired: false,
        }
    }

    pub fn expired() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            expired: true,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Drives the countdown ticker for the active board view.
pub struct ExpiryClock {
    render: Arc<dyn RenderPort>,
    clock: Arc<dyn ClockPort>,
    tick_interval: Duration,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl ExpiryClock {
    pub fn new(
        render: Arc<dyn RenderPort>,
        clock: Arc<dyn ClockPort>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            render,
            clock,
            tick_interval,
            ticker: Mutex::new(None),
        }
    }

    /// Cancels any running ticker and starts a fresh one against the new
    /// expiry. `None` (a gone or already-expired board) emits a single
    /// expired reading and leaves no ticker behind.
    pub async fn arm(&self, expire_at: Option<NaiveDateTime>) {
        let mut ticker = self.ticker.lock().await;
        if let Some(handle) = ticker.take() {
            handle.abort();
        }

        let Some(expire_at) = expire_at else {
            debug!("Board snapshot carries no expiry, countdown reads expired");
            Self::push(&self.render, Countdown::expired()).await;
            return;
        };

        let render = Arc::clone(&self.render);
        let clock = Arc::clone(&self.clock);
        let mut interval = time::interval(self.tick_interval);
        *ticker = Some(tokio::spawn(async move {
            loop {
                interval.tick().await;
                let countdown = Countdown::until(expire_at, clock.now());
                let done = countdown.expired;
                Self::push(&render, countdown).await;
                if done {
                    break;
                }
            }
        }));
    }

    /// Stops the ticker; used on navigation away or teardown.
    pub async fn disarm(&self) {
        let mut ticker = self.ticker.lock().await;
        if let Some(handle) = ticker.take() {
            handle.abort();
        }
    }

    /// Whether a ticker task is currently alive.
    pub async fn is_armed(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    async fn push(render: &Arc<dyn RenderPort>, countdown: Countdown) {
        if let Err(err) = render.apply(RenderInstruction::Countdown(countdown)).await {
            error!("Countdown render failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct CaptureRender {
        countdowns: StdMutex<Vec<Countdown>>,
    }

    #[async_trait::async_trait]
    impl RenderPort for CaptureRender {
        async fn apply(&self, instruction: RenderInstruction) -> Result<()> {
            if let RenderInstruction::Countdown(countdown) = instruction {
                self.countdowns.lock().unwrap().push(countdown);
            }
            Ok(())
        }
    }

    impl CaptureRender {
        fn countdowns(&self) -> Vec<Countdown> {
            self.countdowns.lock().unwrap().clone()
        }
    }

    struct FrozenClock(NaiveDateTime);

    impl ClockPort for FrozenClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn clock_with(
        now: NaiveDateTime,
        tick_ms: u64,
    ) -> (ExpiryClock, Arc<CaptureRender>) {
        let render = Arc::new(CaptureRender::default());
        let clock = ExpiryClock::new(
            render.clone(),
            Arc::new(FrozenClock(now)),
            Duration::from_millis(tick_ms),
        );
        (clock, render)
    }

    #[test]
    fn breakdown_of_one_hour_one_minute_one_second() {
        let now = noon();
        let expire_at = now + chrono::Duration::seconds(3_661);
        let countdown = Countdown::until(expire_at, now);
        assert_eq!(
            countdown,
            Countdown {
                hours: 1,
                minutes: 1,
                seconds: 1,
                expired: false
            }
        );
        assert_eq!(countdown.to_string(), "01:01:01");
    }

    #[test]
    fn past_expiry_clamps_to_expired() {
        let now = noon();
        assert_eq!(Countdown::until(now, now), Countdown::expired());
        let long_gone = now - chrono::Duration::hours(3);
        let countdown = Countdown::until(long_gone, now);
        assert!(countdown.expired);
        assert_eq!((countdown.hours, countdown.minutes, countdown.seconds), (0, 0, 0));
    }

    #[tokio::test]
    async fn arm_without_expiry_reports_expired_once() {
        let (clock, render) = clock_with(noon(), 20);
        clock.arm(None).await;
        time::sleep(Duration::from_millis(80)).await;

        assert_eq!(render.countdowns(), vec![Countdown::expired()]);
        assert!(!clock.is_armed().await);
    }

    #[tokio::test]
    async fn ticker_repeats_until_disarmed() {
        let (clock, render) = clock_with(noon(), 20);
        clock.arm(Some(noon() + chrono::Duration::hours(6))).await;
        time::sleep(Duration::from_millis(100)).await;

        assert!(clock.is_armed().await);
        let ticks = render.countdowns();
        assert!(ticks.len() >= 2, "expected repeated ticks, got {:?}", ticks);
        assert!(ticks.iter().all(|c| !c.expired && c.hours == 6));

        clock.disarm().await;
        let settled = render.countdowns().len();
        time::sleep(Duration::from_millis(60)).await;
        assert_eq!(render.countdowns().len(), settled);
        assert!(!clock.is_armed().await);
    }

    #[tokio::test]
    async fn rearm_leaves_exactly_one_tick_source() {
        let (clock, render) = clock_with(noon(), 20);
        // 先用远期过期时间启动，再立即换成近期的
        clock.arm(Some(noon() + chrono::Duration::hours(6))).await;
        clock.arm(Some(noon() + chrono::Duration::seconds(30))).await;
        time::sleep(Duration::from_millis(100)).await;

        let ticks = render.countdowns();
        let from_first = ticks.iter().filter(|c| c.hours == 6).count();
        let from_second = ticks.iter().filter(|c| c.hours == 0 && c.seconds == 30).count();
        assert!(from_first <= 1, "stale ticker kept running: {:?}", ticks);
        assert!(from_second >= 2, "replacement ticker not running: {:?}", ticks);
    }

    #[tokio::test]
    async fn ticker_stops_by_itself_at_expiry() {
        let (clock, render) = clock_with(noon(), 20);
        clock.arm(Some(noon() - chrono::Duration::seconds(1))).await;
        time::sleep(Duration::from_millis(100)).await;

        let ticks = render.countdowns();
        assert_eq!(ticks, vec![Countdown::expired()]);
        assert!(!clock.is_armed().await);
    }
}
