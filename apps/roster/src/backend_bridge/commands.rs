//! Backend commands queued from the UI loop to the backend worker.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    LoadUsers,
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadUsers => "load_users",
            Self::Shutdown => "shutdown",
        }
    }
}
