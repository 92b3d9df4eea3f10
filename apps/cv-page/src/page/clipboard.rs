/// How a copy request ended on the host: the clipboard API, the
/// select-and-copy fallback, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardWrite {
    Copied,
    CopiedWithFallback,
    Failed,
}

impl ClipboardWrite {
    /// Analytics action for a successful copy; failures are not recorded.
    pub fn action(&self) -> Option<&'static str> {
        match self {
            ClipboardWrite::Copied => Some("copy"),
            ClipboardWrite::CopiedWithFallback => Some("copy_fallback"),
            ClipboardWrite::Failed => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ClipboardWrite::Copied | ClipboardWrite::CopiedWithFallback => {
                "Copié dans le presse-papiers."
            }
            ClipboardWrite::Failed => "Impossible de copier.",
        }
    }
}
