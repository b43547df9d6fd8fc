//! Dynamic-field config editor.
//!
//! Holds the working copy of the bot configuration: the last loaded or
//! saved [`BotConfig`], the prompt text being edited, and the field list
//! derived from `voice_settings.dynamic_fields`.
//!
//! ```text
//! loading ──ok──▶ ready ──save──▶ saving ──ok──▶ ready
//!    │                              │
//!    └─err─▶ load-failed            └─err──▶ ready (edits kept)
//! ```
//!
//! Saving is last-write-wins: the whole object is rebuilt from the
//! working copy and posted in one request. Only one save may be in
//! flight; a second one is refused before it reaches the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use va_client::{AdminApi, BotConfig};
use va_domain::error::{Error, Result};
use va_domain::trace::TraceEvent;

use crate::fields::{DynamicField, FieldAttr, FieldList};
use crate::notify::{Notifier, Toast};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Loading,
    Ready,
    LoadFailed,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Ready,
    LoadFailed,
}

#[derive(Debug)]
struct Working {
    phase: Phase,
    config: Option<BotConfig>,
    system_prompt: String,
    fields: FieldList,
}

pub struct ConfigEditor {
    api: Arc<dyn AdminApi>,
    notifier: Arc<dyn Notifier>,
    working: Mutex<Working>,
    saving: AtomicBool,
}

/// Clears the in-flight flag when the save finishes or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ConfigEditor {
    pub fn new(api: Arc<dyn AdminApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            working: Mutex::new(Working {
                phase: Phase::Loading,
                config: None,
                system_prompt: String::new(),
                fields: FieldList::new(),
            }),
            saving: AtomicBool::new(false),
        }
    }

    // ── read access ──────────────────────────────────────────────────

    pub fn status(&self) -> EditorStatus {
        if self.saving.load(Ordering::Acquire) {
            return EditorStatus::Saving;
        }
        match self.working.lock().phase {
            Phase::Loading => EditorStatus::Loading,
            Phase::Ready => EditorStatus::Ready,
            Phase::LoadFailed => EditorStatus::LoadFailed,
        }
    }

    pub fn system_prompt(&self) -> String {
        self.working.lock().system_prompt.clone()
    }

    pub fn fields(&self) -> Vec<DynamicField> {
        self.working.lock().fields.as_slice().to_vec()
    }

    /// Last loaded or successfully saved configuration.
    pub fn config(&self) -> Option<BotConfig> {
        self.working.lock().config.clone()
    }

    /// Whether the prompt or field list differ from the last loaded or
    /// saved configuration.
    pub fn has_unsaved_edits(&self) -> bool {
        let w = self.working.lock();
        match &w.config {
            Some(cfg) => {
                w.system_prompt != cfg.system_prompt
                    || w.fields != FieldList::from_mapping(&cfg.voice_settings.dynamic_fields)
            }
            None => false,
        }
    }

    // ── edits ────────────────────────────────────────────────────────

    pub fn set_system_prompt(&self, text: impl Into<String>) {
        self.working.lock().system_prompt = text.into();
    }

    /// Append an empty field and return its index.
    pub fn add_field(&self) -> usize {
        self.working.lock().fields.push_empty()
    }

    /// Remove the field at `index`; out of range does nothing.
    pub fn remove_field(&self, index: usize) {
        if self.working.lock().fields.remove(index).is_none() {
            tracing::debug!(index, "remove_field ignored: index out of range");
        }
    }

    /// Replace the key or description of the field at `index`.
    pub fn update_field(&self, index: usize, attr: FieldAttr, value: impl Into<String>) -> bool {
        self.working.lock().fields.update(index, attr, value)
    }

    // ── backend sync ─────────────────────────────────────────────────

    /// Fetch the configuration and reseed the working copy from it.
    pub async fn load(&self) -> Result<()> {
        self.working.lock().phase = Phase::Loading;

        match self.api.fetch_config().await {
            Ok(cfg) => {
                let fields = FieldList::from_mapping(&cfg.voice_settings.dynamic_fields);
                TraceEvent::ConfigLoaded {
                    fields: fields.len(),
                    prompt_chars: cfg.system_prompt.chars().count(),
                }
                .emit();

                let mut w = self.working.lock();
                w.system_prompt = cfg.system_prompt.clone();
                w.fields = fields;
                w.config = Some(cfg);
                w.phase = Phase::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load configuration");
                {
                    let mut w = self.working.lock();
                    w.config = None;
                    w.system_prompt.clear();
                    w.fields = FieldList::new();
                    w.phase = Phase::LoadFailed;
                }
                self.notifier
                    .notify(Toast::error("Failed to load configuration"));
                Err(e)
            }
        }
    }

    /// Rebuild the configuration from the working copy and submit it.
    ///
    /// On success the local config becomes exactly the submitted object
    /// and is returned. On failure the local config and the working
    /// edits are left as they were.
    pub async fn save(&self) -> Result<BotConfig> {
        let Some(_flight) = InFlight::acquire(&self.saving) else {
            tracing::debug!("save refused: another save is in flight");
            self.notifier
                .notify(Toast::info("A save is already in progress"));
            return Err(Error::SaveInFlight);
        };

        let (updated, projection) = {
            let w = self.working.lock();
            let Some(base) = w.config.as_ref() else {
                tracing::debug!("save ignored: configuration not loaded");
                return Err(Error::NotLoaded);
            };
            let projection = w.fields.project();
            let mut updated = base.clone();
            updated.system_prompt = w.system_prompt.clone();
            updated.voice_settings.dynamic_fields = projection.mapping.clone();
            (updated, projection)
        };

        if projection.overwritten > 0 {
            tracing::debug!(
                overwritten = projection.overwritten,
                "duplicate field keys collapsed to their last entry"
            );
        }

        match self.api.update_config(&updated).await {
            Ok(()) => {
                self.working.lock().config = Some(updated.clone());
                TraceEvent::ConfigSaved {
                    fields: projection.mapping.len(),
                    dropped_blank: projection.dropped_blank,
                    prompt_chars: updated.system_prompt.chars().count(),
                }
                .emit();
                self.notifier
                    .notify(Toast::success("Configuration saved and reloaded"));
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save configuration");
                self.notifier
                    .notify(Toast::error("Failed to save configuration"));
                Err(e)
            }
        }
    }
}
