#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunMode {
    Development,
    Packaged,
}

impl RunMode {
    /// An explicit override wins: development only when it parses as `1`.
    /// Without one, debug builds are development and release builds are
    /// packaged.
    pub(crate) fn resolve(override_value: Option<&str>, debug_build: bool) -> Self {
        let is_development = match override_value {
            Some(raw) => raw.trim().parse::<i64>().ok() == Some(1),
            None => debug_build,
        };

        if is_development {
            Self::Development
        } else {
            Self::Packaged
        }
    }

    pub(crate) fn is_development(self) -> bool {
        self == Self::Development
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Packaged => "packaged",
        }
    }
}
