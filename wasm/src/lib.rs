use cricom_core::{DecodeParameters, Decoder, EncodeParameters, Encoder, SampleBuffer};
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[wasm_bindgen]
pub struct WasmEncoder {
    inner: Encoder,
}

#[wasm_bindgen]
impl WasmEncoder {
    #[wasm_bindgen(constructor)]
    pub fn new(
        message: &str,
        carrier_hz: u32,
        sample_rate: u32,
        slot_ms: u32,
    ) -> Result<WasmEncoder, JsValue> {
        let params =
            EncodeParameters::new(message, carrier_hz, sample_rate, slot_ms).map_err(to_js_error)?;
        Encoder::new(params)
            .map(|encoder| WasmEncoder { inner: encoder })
            .map_err(to_js_error)
    }

    /// Render the message into audio samples
    /// Returns a Float32Array at the configured sample rate
    #[wasm_bindgen]
    pub fn encode(&self) -> Result<Vec<f32>, JsValue> {
        self.inner
            .render()
            .map(|buffer| buffer.samples)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter, js_name = sampleRate)]
    pub fn sample_rate(&self) -> u32 {
        self.inner.params().sample_rate_hz
    }
}

#[wasm_bindgen]
pub struct WasmDecoder {
    inner: Decoder,
}

#[wasm_bindgen]
impl WasmDecoder {
    #[wasm_bindgen(constructor)]
    pub fn new(carrier_hz: u32, slot_ms: u32) -> Result<WasmDecoder, JsValue> {
        DecodeParameters::new(carrier_hz, slot_ms)
            .map(|params| WasmDecoder {
                inner: Decoder::new(params),
            })
            .map_err(to_js_error)
    }

    /// Decode a Float32Array recorded at `sample_rate` back to text
    #[wasm_bindgen]
    pub fn decode(&mut self, samples: &[f32], sample_rate: u32) -> Result<String, JsValue> {
        let buffer = SampleBuffer::new(sample_rate, samples.to_vec());
        self.inner
            .decode_buffer(&buffer)
            .map(str::to_string)
            .map_err(to_js_error)
    }
}
