use crate::utils::constants::{KWH_ALIASES, TIMESTAMP_ALIASES};

/// A header matched to a canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub name: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnResolution {
    pub timestamp: Option<ResolvedColumn>,
    pub kwh: Option<ResolvedColumn>,
}

impl ColumnResolution {
    /// Both required columns, if both resolved
    pub fn required(&self) -> Option<(&ResolvedColumn, &ResolvedColumn)> {
        self.timestamp.as_ref().zip(self.kwh.as_ref())
    }
}

/// Trim and lowercase a header cell
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Resolve the timestamp and value columns among normalized headers.
///
/// Aliases are tried in priority order and the first alias present wins.
/// When a header appears twice, its first position is used.
pub fn resolve_columns(headers: &[String]) -> ColumnResolution {
    ColumnResolution {
        timestamp: find_first_alias(headers, TIMESTAMP_ALIASES),
        kwh: find_first_alias(headers, KWH_ALIASES),
    }
}

fn find_first_alias(headers: &[String], aliases: &[&str]) -> Option<ResolvedColumn> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|h| h == alias)
            .map(|index| ResolvedColumn {
                name: (*alias).to_string(),
                index,
            })
    })
}
