/// Point-in-time transfer counters for one task or for a whole registry.
///
/// Values are produced by the transfer manager on demand and have no
/// independent lifetime; the reporter recomputes them on every sample and
/// never feeds them back.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TransferStat {
    download_speed: u64,
    upload_speed: u64,
    session_upload_length: u64,
    all_time_upload_length: u64,
}

impl TransferStat {
    /// Creates a statistic from precomputed counters.
    ///
    /// Speeds are bytes per second; lengths are byte totals.
    #[must_use]
    pub const fn new(
        download_speed: u64,
        upload_speed: u64,
        session_upload_length: u64,
        all_time_upload_length: u64,
    ) -> Self {
        Self {
            download_speed,
            upload_speed,
            session_upload_length,
            all_time_upload_length,
        }
    }

    /// Returns the current download speed in bytes per second.
    #[must_use]
    pub const fn download_speed(&self) -> u64 {
        self.download_speed
    }

    /// Returns the current upload speed in bytes per second.
    #[must_use]
    pub const fn upload_speed(&self) -> u64 {
        self.upload_speed
    }

    /// Returns the bytes uploaded during the current session.
    #[must_use]
    pub const fn session_upload_length(&self) -> u64 {
        self.session_upload_length
    }

    /// Returns the bytes uploaded over the task's entire history.
    #[must_use]
    pub const fn all_time_upload_length(&self) -> u64 {
        self.all_time_upload_length
    }

    /// Combines two statistics by summing each counter.
    ///
    /// Registries aggregate their per-task statistics with this; the sums
    /// saturate rather than wrap.
    #[must_use]
    pub const fn merged(self, other: Self) -> Self {
        Self {
            download_speed: self.download_speed.saturating_add(other.download_speed),
            upload_speed: self.upload_speed.saturating_add(other.upload_speed),
            session_upload_length: self
                .session_upload_length
                .saturating_add(other.session_upload_length),
            all_time_upload_length: self
                .all_time_upload_length
                .saturating_add(other.all_time_upload_length),
        }
    }
}
