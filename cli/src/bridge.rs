use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::{Future, ready};

use futures_util::FutureExt;
use sapper_protocol::{AdFormat, BridgeEvent, BridgeExt, PlatformBridge, Result};
use serde_json::{Value, json};

/// Stand-in host for a terminal run: every call is logged and succeeds, and
/// the matching `...Result` event is queued the way a real host reports it.
#[derive(Debug, Default)]
pub struct LoggingBridge {
    events: RefCell<VecDeque<BridgeEvent>>,
}

impl PlatformBridge for LoggingBridge {
    fn send(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> {
        log::info!("Platform call {method} {params}");
        let reply = json!({ "result": true });
        self.events.borrow_mut().push_back(BridgeEvent {
            kind: format!("{method}Result"),
            data: reply.clone(),
        });
        ready(Ok(reply))
    }

    fn poll_event(&self) -> Option<BridgeEvent> {
        self.events.borrow_mut().pop_front()
    }
}

/// Tells the host the app is up. Failures are logged and otherwise ignored.
pub fn announce(bridge: &impl PlatformBridge) {
    match bridge.init().now_or_never() {
        Some(Ok(reply)) => log::debug!("Platform ready: {reply}"),
        Some(Err(err)) => log::warn!("Platform init failed: {err}"),
        None => log::debug!("Platform init still pending"),
    }
    bridge.log_events();
}

/// Asks for a rewarded ad and shows it when the host has one preloaded.
/// Returns whether an ad was shown.
pub fn offer_ad(bridge: &impl PlatformBridge) -> bool {
    let shown = match bridge.check_native_ads(AdFormat::Reward).now_or_never() {
        Some(Ok(true)) => match bridge.show_native_ads(AdFormat::Reward).now_or_never() {
            Some(Ok(shown)) => shown,
            Some(Err(err)) => {
                log::warn!("Showing the ad failed: {err}");
                false
            }
            None => false,
        },
        Some(Ok(false)) => {
            log::info!("No ad material loaded");
            false
        }
        Some(Err(err)) => {
            log::warn!("Ad check failed: {err}");
            false
        }
        None => false,
    };
    bridge.log_events();
    shown
}
