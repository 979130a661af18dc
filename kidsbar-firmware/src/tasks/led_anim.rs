//! Background LED animation task
//!
//! Keeps breathing and party animations running at a fixed rate while the
//! main loop is blocked (display refreshes take hundreds of milliseconds).

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::Led;

/// Run background LED ticks every `period_ms`
#[embassy_executor::task]
pub async fn led_anim_task(led: &'static Led, period_ms: u32) {
    info!("LED animation task started ({} ms)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));

    loop {
        led.background_tick();
        ticker.next().await;
    }
}
