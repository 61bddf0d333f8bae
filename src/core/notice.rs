use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Success => write!(f, "ok"),
            NoticeLevel::Warning => write!(f, "aviso"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A user-facing message produced by a workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Pending notices, drained by whoever renders them. Every push is also logged.
#[derive(Debug, Default)]
pub struct Notices {
    pending: Vec<Notice>,
}

impl Notices {
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    fn push(&mut self, level: NoticeLevel, message: String) {
        match level {
            NoticeLevel::Info | NoticeLevel::Success => tracing::info!("{}", message),
            NoticeLevel::Warning => tracing::warn!("{}", message),
            NoticeLevel::Error => tracing::error!("{}", message),
        }
        self.pending.push(Notice { level, message });
    }
}
