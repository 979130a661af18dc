//! Encoder edge counting task

use defmt::*;
use embassy_rp::gpio::Input;
use kidsbar_hal_rp2040::PcntUnit;

/// Count A/B edges into the shared pulse counter
#[embassy_executor::task]
pub async fn pcnt_task(unit: &'static PcntUnit, a: Input<'static>, b: Input<'static>) {
    info!("Pulse counter task started");
    unit.run(a, b).await
}
