//! Scroll-to-bottom loop that waits for lazy-loaded content to finish
//! rendering.
//!
//! The page is considered complete once a scroll no longer grows
//! `document.body.scrollHeight`. Pages that keep streaming content are cut
//! off after [`ScrollSettings::max_rounds`] scrolls.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Something that can report its scrollable height and be scrolled to the end.
pub trait ScrollSurface {
    fn scroll_height(&mut self) -> impl Future<Output = Result<i64, ScraperError>> + Send;
    fn scroll_to_bottom(&mut self) -> impl Future<Output = Result<(), ScraperError>> + Send;
}

/// Delay source for the loop. Production uses [`TokioPause`].
pub trait Pause {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSettings {
    /// Wait after navigation before the first height reading.
    pub settle: Duration,
    /// Wait after each scroll before re-reading the height.
    pub step: Duration,
    /// Maximum number of scrolls before giving up on convergence.
    pub max_rounds: u32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            settle: Duration::from_secs(2),
            step: Duration::from_secs(1),
            max_rounds: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollReport {
    /// Number of scrolls performed.
    pub rounds: u32,
    pub final_height: i64,
    /// `false` when the loop stopped at `max_rounds` with the height still growing.
    pub converged: bool,
}

/// Scrolls until two consecutive height readings show no growth.
///
/// # Errors
///
/// Propagates any error from the surface; the caller decides whether a
/// partially scrolled page is still usable.
pub async fn scroll_until_stable<S, P>(
    surface: &mut S,
    pause: &P,
    settings: &ScrollSettings,
) -> Result<ScrollReport, ScraperError>
where
    S: ScrollSurface + Send,
    P: Pause + Sync,
{
    pause.pause(settings.settle).await;
    let mut last_height = surface.scroll_height().await?;

    for round in 1..=settings.max_rounds {
        surface.scroll_to_bottom().await?;
        pause.pause(settings.step).await;
        let height = surface.scroll_height().await?;
        if height <= last_height {
            return Ok(ScrollReport {
                rounds: round,
                final_height: height,
                converged: true,
            });
        }
        last_height = height;
    }

    tracing::warn!(
        max_rounds = settings.max_rounds,
        height = last_height,
        "page height still growing at scroll cap; capturing page as-is"
    );
    Ok(ScrollReport {
        rounds: settings.max_rounds,
        final_height: last_height,
        converged: false,
    })
}
