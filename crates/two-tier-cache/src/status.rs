/// Connection state of the remote tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// Sign-in in flight, local values already shown
    #[default]
    Loading,
    /// Signed in, remote reads and writes enabled
    Online,
    /// Local cache only
    Offline,
}

impl SyncStatus {
    pub fn is_online(self) -> bool {
        self == SyncStatus::Online
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SyncStatus::Loading => "loading",
            SyncStatus::Online => "online",
            SyncStatus::Offline => "offline",
        }
    }
}
