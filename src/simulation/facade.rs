use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::settings::EngineConfig;
use super::FieldFacade;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Host clocks hand us `performance.now()`-style doubles.
fn host_millis(now: f64) -> u64 {
    if now.is_finite() && now > 0.0 {
        now as u64
    } else {
        0
    }
}

#[wasm_bindgen]
pub struct ThermalField {
    core: FieldFacade,
}

#[wasm_bindgen]
impl ThermalField {
    /// Create an uninitialized field. `config_json` is an optional
    /// `EngineConfig` object; missing keys take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ThermalField, JsValue> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json(&json).map_err(js_error)?,
            None => EngineConfig::default(),
        };
        Ok(Self {
            core: FieldFacade::new(config),
        })
    }

    /// Build the grid. Throws if no backend can construct it.
    pub fn initialize(&mut self, width: u32, height: u32, ambient_temperature: f64) -> Result<(), JsValue> {
        self.core
            .initialize(width, height, ambient_temperature)
            .map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter = ambientTemperature)]
    pub fn ambient_temperature(&self) -> f64 { self.core.ambient_temperature() }

    #[wasm_bindgen(getter = isInitialized)]
    pub fn is_initialized(&self) -> bool { self.core.is_initialized() }

    /// "optimized", "portable", or "none" before a backend is settled
    #[wasm_bindgen(getter)]
    pub fn backend(&self) -> String {
        self.core
            .backend_kind()
            .map_or("none", |kind| kind.as_str())
            .to_string()
    }

    #[wasm_bindgen(getter = updateIntervalMs)]
    pub fn update_interval_ms(&self) -> f64 { self.core.update_interval_ms() as f64 }

    #[wasm_bindgen(setter = updateIntervalMs)]
    pub fn set_update_interval_ms(&mut self, interval_ms: f64) {
        self.core.set_update_interval_ms(host_millis(interval_ms));
    }

    /// Advance the field if at least the update interval has passed since
    /// the last step. Returns whether a step ran.
    pub fn update(&mut self, now: f64) -> bool {
        self.core.update(host_millis(now))
    }

    #[wasm_bindgen(js_name = getTemperature)]
    pub fn get_temperature(&self, x: i32, y: i32) -> f64 {
        self.core.get_temperature(x.into(), y.into())
    }

    #[wasm_bindgen(js_name = setTemperature)]
    pub fn set_temperature(&mut self, x: i32, y: i32, value: f64) {
        self.core.set_temperature(x.into(), y.into(), value);
    }

    #[wasm_bindgen(js_name = applyBrush)]
    pub fn apply_brush(&mut self, cx: i32, cy: i32, radius: i32, value: f64) -> u32 {
        let touched = self.core.apply_brush(cx.into(), cy.into(), radius.into(), value);
        u32::try_from(touched).unwrap_or(u32::MAX)
    }

    /// `[width, height, ...temperatures]` as a Float64Array
    #[wasm_bindgen(js_name = temperatureData)]
    pub fn temperature_data(&self) -> Vec<f64> {
        self.core.temperature_data()
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        match self.core.snapshot_json() {
            Some(json) => json.map_err(js_error),
            None => Err(JsValue::from_str("thermal field is not initialized")),
        }
    }

    #[wasm_bindgen(js_name = restoreSnapshotJson)]
    pub fn restore_snapshot_json(&mut self, json: &str) -> bool {
        self.core.restore_snapshot_json(json)
    }

    #[wasm_bindgen(js_name = snapshotBytes)]
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, JsValue> {
        match self.core.snapshot_bytes() {
            Some(bytes) => bytes.map_err(js_error),
            None => Err(JsValue::from_str("thermal field is not initialized")),
        }
    }

    #[wasm_bindgen(js_name = restoreSnapshotBytes)]
    pub fn restore_snapshot_bytes(&mut self, data: &[u8]) -> bool {
        self.core.restore_snapshot_bytes(data)
    }

    #[wasm_bindgen(js_name = perfStats)]
    pub fn perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }
}
