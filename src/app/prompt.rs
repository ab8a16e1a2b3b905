// SPDX-License-Identifier: GPL-3.0-only

//! Modal informational prompts

use crate::fl;

/// Tone of a prompt, used for the dialog icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Info,
    Warning,
    Error,
}

/// A title/body pair shown as a modal dialog with a single dismiss action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub body: String,
    pub kind: PromptKind,
}

impl Prompt {
    pub fn new(kind: PromptKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind,
        }
    }

    fn permission_denied(body: String) -> Self {
        Self::new(PromptKind::Warning, fl!("prompt-permission-denied"), body)
    }

    fn error(body: String) -> Self {
        Self::new(PromptKind::Error, fl!("prompt-error"), body)
    }

    /// Gallery read access was refused at startup
    pub fn gallery_permission_required() -> Self {
        Self::permission_denied(fl!("gallery-permission-required"))
    }

    /// Pick attempted without gallery read access
    pub fn gallery_read_denied() -> Self {
        Self::error(fl!("gallery-read-denied"))
    }

    pub fn capture_failed() -> Self {
        Self::error(fl!("capture-failed"))
    }

    pub fn picker_failed() -> Self {
        Self::error(fl!("picker-failed"))
    }

    pub fn camera_unavailable() -> Self {
        Self::error(fl!("camera-unavailable"))
    }

    pub fn save_permission_denied() -> Self {
        Self::permission_denied(fl!("save-permission-denied"))
    }

    pub fn save_succeeded() -> Self {
        Self::new(PromptKind::Info, fl!("prompt-done"), fl!("save-succeeded"))
    }

    pub fn save_failed() -> Self {
        Self::error(fl!("save-failed"))
    }

    pub fn icon_name(&self) -> &'static str {
        match self.kind {
            PromptKind::Info => "dialog-information-symbolic",
            PromptKind::Warning => "dialog-warning-symbolic",
            PromptKind::Error => "dialog-error-symbolic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_texts() {
        let prompt = Prompt::gallery_read_denied();
        assert_eq!(prompt.title, "Error");
        assert_eq!(prompt.body, "No tienes permiso para acceder a la galería");

        let prompt = Prompt::save_permission_denied();
        assert_eq!(prompt.title, "Permiso denegado");
        assert_eq!(
            prompt.body,
            "No se concedió permiso para guardar en la galería."
        );

        let prompt = Prompt::save_succeeded();
        assert_eq!(prompt.title, "Listo");
        assert_eq!(prompt.body, "Imagen guardada en la galería.");
        assert_eq!(prompt.kind, PromptKind::Info);
    }
}
