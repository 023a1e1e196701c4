use log::{Level, LevelFilter, Log, Metadata, Record, debug};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the console logger. Later calls only adjust the level.
pub fn init_logging(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    join_base(&base, path)
}

fn join_base(base: &str, path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    format!("{}{}", base, p.trim_start_matches('/'))
}

/// Returns the body of the first URL in `urls` that answers with a success
/// status.
pub async fn fetch_text_with_fallbacks(window: &Window, urls: &[&str]) -> Option<String> {
    for url in urls {
        match fetch_text(window, url).await {
            Ok(text) => return Some(text),
            Err(err) => debug!("fetch {url} failed: {err:?}"),
        }
    }
    None
}

async fn fetch_text(window: &Window, url: &str) -> Result<String, JsValue> {
    let resp: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("status {}", resp.status())));
    }
    JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("body is not text"))
}

/// Page query parameters: `n` (tile count), `seed` and `config` (URL of a
/// JSON config). Unknown keys and unparseable values are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartParams {
    pub tile_count: Option<usize>,
    pub seed: Option<u64>,
    pub config_url: Option<String>,
}

impl StartParams {
    pub fn parse(search: &str) -> Self {
        let mut params = Self::default();
        for pair in search.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = url_decode(value);
            match key {
                "n" => params.tile_count = value.parse().ok(),
                "seed" => params.seed = value.parse().ok(),
                "config" if !value.is_empty() => params.config_url = Some(value),
                _ => {}
            }
        }
        params
    }
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}

/// Generator for the tray shuffle. Without a seed, one is drawn from
/// `Math.random`.
pub fn shuffle_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        (hi << 32) | lo
    });
    StdRng::seed_from_u64(seed)
}
