use console::Style;

use crate::theme::Palette;

/// Kind of transient notice, mapped to an icon and a palette style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
            ToastKind::Info => "ℹ",
        }
    }

    fn style<'a>(&self, palette: &'a Palette) -> &'a Style {
        match self {
            ToastKind::Success => &palette.success,
            ToastKind::Error => &palette.error,
            ToastKind::Info => &palette.info,
        }
    }
}

/// A single transient notice.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// Notices collected while a command runs, flushed to stderr afterwards.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast. Duplicate messages are dropped.
    pub fn push(&mut self, toast: Toast) {
        if self.toasts.iter().any(|t| t.message == toast.message) {
            return;
        }
        self.toasts.push(toast);
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[cfg(test)]
    pub fn messages(&self) -> Vec<(&str, ToastKind)> {
        self.toasts
            .iter()
            .map(|t| (t.message.as_str(), t.kind))
            .collect()
    }

    /// Print and drain every queued toast, styled by the active palette.
    pub fn flush(&mut self, palette: &Palette) {
        for toast in self.toasts.drain(..) {
            let style = toast.kind.style(palette);
            eprintln!("{} {}", style.apply_to(toast.kind.icon()), toast.message);
        }
    }
}
