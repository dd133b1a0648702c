//! WASM bindings for skin-mesher.
//!
//! Exposes a [`SkinViewer`] handle that a browser page drives from its file
//! input and toggle events, and reads GLB bytes back from.

use crate::session::{SkinSession, UploadOutcome, UploadTicket};
use crate::skin::PixelBuffer;
use crate::types::ModelVariant;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// Browser-side viewer state.
#[wasm_bindgen]
#[derive(Default)]
pub struct SkinViewer {
    session: SkinSession,
}

#[wasm_bindgen]
impl SkinViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SkinViewer {
        SkinViewer::default()
    }

    /// Start an upload and return its ticket id.
    pub fn begin_upload(&mut self) -> f64 {
        self.session.begin_upload().id() as f64
    }

    /// Finish upload `ticket` with PNG bytes.
    ///
    /// Returns `false` if a newer upload already completed and this one was
    /// discarded. Throws on an invalid image; the previous skin stays.
    pub fn finish_upload(&mut self, ticket: f64, data: &[u8]) -> Result<bool, JsError> {
        let outcome = self
            .session
            .finish_upload(UploadTicket::from_id(ticket as u64), data)
            .map_err(js_error)?;
        Ok(outcome == UploadOutcome::Applied)
    }

    /// Finish upload `ticket` with RGBA pixels already decoded by a canvas.
    pub fn finish_upload_rgba(
        &mut self,
        ticket: f64,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<bool, JsError> {
        let outcome = self
            .session
            .complete_upload(
                UploadTicket::from_id(ticket as u64),
                PixelBuffer::from_rgba(width, height, pixels),
            )
            .map_err(js_error)?;
        Ok(outcome == UploadOutcome::Applied)
    }

    /// Load PNG bytes immediately.
    pub fn load_skin(&mut self, data: &[u8]) -> Result<(), JsError> {
        self.session.upload(data).map(|_| ()).map_err(js_error)
    }

    pub fn clear_skin(&mut self) {
        self.session.clear_skin();
    }

    #[wasm_bindgen(getter)]
    pub fn has_skin(&self) -> bool {
        self.session.skin().is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn is_legacy(&self) -> bool {
        self.session.skin().map_or(false, |skin| skin.is_legacy())
    }

    /// Set the arm variant: "classic" or "slim".
    #[wasm_bindgen(setter)]
    pub fn set_variant(&mut self, value: &str) -> Result<(), JsError> {
        let variant = ModelVariant::from_str(value)
            .ok_or_else(|| JsError::new(&format!("Unknown variant: {}", value)))?;
        self.session.set_variant(variant);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn variant(&self) -> String {
        self.session.variant().to_string()
    }

    #[wasm_bindgen(setter)]
    pub fn set_show_outer(&mut self, value: bool) {
        self.session.set_show_outer(value);
    }

    #[wasm_bindgen(getter)]
    pub fn show_outer(&self) -> bool {
        self.session.show_outer()
    }

    /// Number of distinct face textures in the current character.
    pub fn face_texture_count(&mut self) -> usize {
        self.session.character().face_texture_count()
    }

    /// The current character as GLB bytes.
    pub fn to_glb(&mut self) -> Result<Vec<u8>, JsError> {
        let output = self.session.mesh().map_err(js_error)?;
        crate::export_glb(&output).map_err(js_error)
    }

    /// Every face texture of the current character as a ZIP of PNGs.
    pub fn faces_zip(&mut self) -> Result<Vec<u8>, JsError> {
        let character = self.session.character();
        crate::export_faces_zip(&character).map_err(js_error)
    }
}
