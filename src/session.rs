//! Viewer session state.
//!
//! Holds the current skin and the viewer toggles, and rebuilds the character
//! only when one of them changed. Uploads are last-write-wins: each upload
//! takes a ticket, and a result whose ticket is older than the newest
//! completed upload is dropped without touching the displayed skin.

use crate::error::{ImageError, Result};
use crate::mesher::{build_character_with_config, mesh_character, Character, MeshedCharacter, ViewerConfig};
use crate::skin::{load_skin, PixelBuffer};
use crate::types::ModelVariant;
use std::sync::Arc;

/// Handle for one in-flight upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadTicket(u64);

impl UploadTicket {
    /// Numeric id, for passing tickets across an FFI boundary.
    pub fn id(&self) -> u64 {
        self.0
    }

    pub fn from_id(id: u64) -> Self {
        Self(id)
    }
}

/// What happened to a completed upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The skin replaced the displayed one.
    Applied,
    /// A newer upload completed first; this result was discarded.
    Superseded,
    /// The ticket was never handed out by this session; nothing changed.
    UnknownTicket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    skin_generation: u64,
    variant: ModelVariant,
    show_outer: bool,
}

/// Current skin, toggles and memoized character.
#[derive(Debug, Default)]
pub struct SkinSession {
    config: ViewerConfig,
    skin: Option<Arc<PixelBuffer>>,
    /// Ticket number of the skin currently displayed (0 = none).
    skin_generation: u64,
    /// Highest ticket number that has completed, successfully or not.
    latest_completed: u64,
    next_ticket: u64,
    cache: Option<(CacheKey, Arc<Character>)>,
}

impl SkinSession {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Replace the whole configuration. Drops the memoized character.
    pub fn set_config(&mut self, config: ViewerConfig) {
        if config != self.config {
            self.config = config;
            self.cache = None;
        }
    }

    pub fn variant(&self) -> ModelVariant {
        self.config.variant
    }

    pub fn set_variant(&mut self, variant: ModelVariant) {
        self.config.variant = variant;
    }

    pub fn show_outer(&self) -> bool {
        self.config.show_outer
    }

    pub fn set_show_outer(&mut self, show_outer: bool) {
        self.config.show_outer = show_outer;
    }

    /// The displayed skin, if any.
    pub fn skin(&self) -> Option<&PixelBuffer> {
        self.skin.as_deref()
    }

    /// Start an upload. Later tickets supersede earlier ones.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.next_ticket += 1;
        UploadTicket(self.next_ticket)
    }

    /// Decode `data` and apply it for `ticket`.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        data: &[u8],
    ) -> std::result::Result<UploadOutcome, ImageError> {
        if !self.is_issued(ticket) {
            return Ok(self.reject_unknown(ticket));
        }
        if self.is_stale(ticket) {
            return Ok(self.discard(ticket));
        }
        self.complete_upload(ticket, load_skin(data))
    }

    /// Apply an upload whose decode ran elsewhere.
    ///
    /// A stale ticket is discarded even if its result is an error. A failed
    /// upload leaves the displayed skin unchanged and returns the error.
    /// A ticket this session never issued is ignored.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        result: std::result::Result<PixelBuffer, ImageError>,
    ) -> std::result::Result<UploadOutcome, ImageError> {
        if !self.is_issued(ticket) {
            return Ok(self.reject_unknown(ticket));
        }
        if self.is_stale(ticket) {
            return Ok(self.discard(ticket));
        }
        self.latest_completed = ticket.0;

        match result {
            Ok(buffer) => {
                self.skin = Some(Arc::new(buffer));
                self.skin_generation = ticket.0;
                log::debug!("applied skin upload #{}", ticket.0);
                Ok(UploadOutcome::Applied)
            }
            Err(err) => {
                log::warn!("rejected skin upload #{}: {}", ticket.0, err);
                Err(err)
            }
        }
    }

    /// Begin and finish an upload in one step.
    pub fn upload(&mut self, data: &[u8]) -> std::result::Result<UploadOutcome, ImageError> {
        let ticket = self.begin_upload();
        self.finish_upload(ticket, data)
    }

    /// Forget the displayed skin; the character falls back to the placeholder.
    pub fn clear_skin(&mut self) {
        self.skin = None;
        self.skin_generation = 0;
    }

    /// The character for the current skin and toggles.
    ///
    /// Rebuilt from scratch whenever the skin, variant or outer toggle
    /// changed since the last call; otherwise the previous build is returned.
    pub fn character(&mut self) -> Arc<Character> {
        let key = CacheKey {
            skin_generation: self.skin_generation,
            variant: self.config.variant,
            show_outer: self.config.show_outer,
        };

        if let Some((cached_key, character)) = &self.cache {
            if *cached_key == key {
                return Arc::clone(character);
            }
        }

        let character = Arc::new(build_character_with_config(self.skin.as_deref(), &self.config));
        self.cache = Some((key, Arc::clone(&character)));
        character
    }

    /// Triangulate the current character for export.
    pub fn mesh(&mut self) -> Result<MeshedCharacter> {
        let character = self.character();
        mesh_character(&character, &self.config)
    }

    fn is_issued(&self, ticket: UploadTicket) -> bool {
        ticket.0 != 0 && ticket.0 <= self.next_ticket
    }

    fn is_stale(&self, ticket: UploadTicket) -> bool {
        ticket.0 < self.latest_completed
    }

    fn discard(&self, ticket: UploadTicket) -> UploadOutcome {
        log::debug!(
            "discarding upload #{}: #{} already completed",
            ticket.0,
            self.latest_completed
        );
        UploadOutcome::Superseded
    }

    fn reject_unknown(&self, ticket: UploadTicket) -> UploadOutcome {
        log::warn!(
            "ignoring upload #{}: only {} tickets issued",
            ticket.0,
            self.next_ticket
        );
        UploadOutcome::UnknownTicket
    }
}
