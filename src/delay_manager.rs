use log::debug;
use std::time::Duration;
use tokio::time::sleep;

/// Fixed pause applied before every request, listing and detail alike.
pub async fn page_delay(delay: Duration) {
    debug!("Waiting for {} ms (Page Delay)...", delay.as_millis());
    sleep(delay).await;
}
