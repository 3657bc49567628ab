use core::future::Future;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::*;

/// The capabilities the application needs from its host.
pub trait PlatformBridge {
    fn send(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>>;

    /// Next host event not yet handed to the application, if any.
    fn poll_event(&self) -> Option<BridgeEvent> {
        None
    }
}

/// Calls the application makes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "VKWebAppInit")]
    Init,
    #[serde(rename = "VKWebAppAddToFavorites")]
    AddToFavorites,
    #[serde(rename = "VKWebAppGetAds")]
    GetAds,
    #[serde(rename = "VKWebAppCheckNativeAds")]
    CheckNativeAds,
    #[serde(rename = "VKWebAppShowNativeAds")]
    ShowNativeAds,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "VKWebAppInit",
            Self::AddToFavorites => "VKWebAppAddToFavorites",
            Self::GetAds => "VKWebAppGetAds",
            Self::CheckNativeAds => "VKWebAppCheckNativeAds",
            Self::ShowNativeAds => "VKWebAppShowNativeAds",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdFormat {
    Reward,
    Interstitial,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Flag {
    result: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct AdParams {
    ad_format: AdFormat,
}

fn decode_flag(value: Value) -> Result<bool> {
    Ok(serde_json::from_value::<Flag>(value)?.result)
}

/// Typed calls on top of [`PlatformBridge::send`].
pub trait BridgeExt: PlatformBridge {
    fn call(&self, method: Method, params: Value) -> impl Future<Output = Result<Value>> {
        log::debug!("Bridge call {} {}", method.as_str(), params);
        self.send(method.as_str(), params)
    }

    fn init(&self) -> impl Future<Output = Result<Value>> {
        self.call(Method::Init, json!({}))
    }

    /// Banner material, returned as the host sends it.
    fn get_ads(&self) -> impl Future<Output = Result<Value>> {
        self.call(Method::GetAds, Value::Null)
    }

    fn add_to_favorites(&self) -> impl Future<Output = Result<bool>> {
        async move { decode_flag(self.call(Method::AddToFavorites, Value::Null).await?) }
    }

    /// Whether the host has ad material preloaded for `format`.
    fn check_native_ads(&self, format: AdFormat) -> impl Future<Output = Result<bool>> {
        async move {
            let params = serde_json::to_value(AdParams { ad_format: format })?;
            decode_flag(self.call(Method::CheckNativeAds, params).await?)
        }
    }

    fn show_native_ads(&self, format: AdFormat) -> impl Future<Output = Result<bool>> {
        async move {
            let params = serde_json::to_value(AdParams { ad_format: format })?;
            decode_flag(self.call(Method::ShowNativeAds, params).await?)
        }
    }

    /// Logs every pending host event and returns how many there were.
    fn log_events(&self) -> usize {
        let mut count = 0;
        while let Some(event) = self.poll_event() {
            event.log();
            count += 1;
        }
        count
    }
}

impl<B: PlatformBridge + ?Sized> BridgeExt for B {}
