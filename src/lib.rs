mod api;
mod app;
mod components;
mod debounce;
mod models;
mod pages;
mod query;
mod state;
mod telemetry;
mod util;
mod validation;

use crate::api::{ApiClient, EnvConfig};
use crate::app::App;
use crate::pages::ConfigErrorPage;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn set_env(pairs: &[(&str, &str)]) {
        let env = js_sys::Object::new();
        for (k, v) in pairs {
            js_sys::Reflect::set(&env, &JsValue::from_str(k), &JsValue::from_str(v))
                .expect("set ENV key");
        }
        let window = web_sys::window().expect("window");
        js_sys::Reflect::set(&window, &JsValue::from_str("ENV"), &env).expect("set ENV");
    }

    #[wasm_bindgen_test]
    fn test_env_config_reads_window_env() {
        set_env(&[
            ("API_URL", "https://example.test/api/"),
            ("NOTEHUB_TOKEN", "t1"),
            ("LOG_LEVEL", "debug"),
        ]);
        let cfg = EnvConfig::new();
        assert_eq!(cfg.token.as_deref(), Some("t1"));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));

        let client = ApiClient::from_config(&cfg).expect("token present");
        assert_eq!(client.base_url(), "https://example.test/api");
    }

    #[wasm_bindgen_test]
    fn test_env_config_lowercase_keys() {
        set_env(&[("api_url", "https://lower.test"), ("token", "t2")]);
        let cfg = EnvConfig::new();
        assert_eq!(cfg.api_url, "https://lower.test");
        assert_eq!(cfg.token.as_deref(), Some("t2"));
    }

    #[wasm_bindgen_test]
    fn test_env_config_without_token_refuses_client() {
        set_env(&[("API_URL", "https://example.test/api")]);
        assert!(ApiClient::from_config(&EnvConfig::new()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_console_logging_initializes_twice() {
        telemetry::init(Some("debug"));
        telemetry::init(Some("warn"));
        tracing::info!("console writer smoke test");
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let cfg = EnvConfig::new();
    telemetry::init(cfg.log_level.as_deref());

    match ApiClient::from_config(&cfg) {
        Ok(api_client) => {
            tracing::info!(api_url = %api_client.base_url(), "starting notes app");
            mount_to_body(move || view! { <App api_client=api_client /> });
        }
        Err(error) => {
            tracing::error!(%error, "refusing to start");
            mount_to_body(move || view! { <ConfigErrorPage error=error /> });
        }
    }
}
