use crate::error::{Result, SheetError};

/// Parse a comma-separated list of question numbers, keeping order and
/// duplicates. Blank input means "no questions".
pub fn parse_list(input: &str) -> Result<Vec<usize>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(',')
        .map(|item| {
            item.trim()
                .parse::<usize>()
                .map_err(|_| SheetError::InvalidSelection {
                    input: input.to_string(),
                    item: item.trim().to_string(),
                })
        })
        .collect()
}

pub fn join_list(items: &[usize]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Tests ──
