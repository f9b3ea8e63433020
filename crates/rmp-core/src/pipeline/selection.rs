use crate::error::{Result, RmpError};

/// Which slices of a stack to process. Indices are 1-based.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SliceSelection {
    #[default]
    All,
    Indices(Vec<usize>),
}

impl SliceSelection {
    /// Parse `"5-10"` (inclusive range, either order) or `"1,3,5"`, checking
    /// every index against `slice_count`. `"all"` selects every slice.
    pub fn parse(text: &str, slice_count: usize) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RmpError::InvalidSliceSelection("no slices given".into()));
        }
        if text.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let in_range = |i: usize| (1..=slice_count).contains(&i);

        // A leading '-' belongs to a number, not a range.
        if let Some(pos) = text.find('-').filter(|&p| p > 0) {
            let (a, b) = (&text[..pos], &text[pos + 1..]);
            let first = parse_index(a)?;
            let last = parse_index(b)?;
            let (first, last) = if first <= last { (first, last) } else { (last, first) };
            if !in_range(first) || !in_range(last) {
                return Err(RmpError::InvalidSliceSelection(format!(
                    "range {first}-{last} is outside 1-{slice_count}"
                )));
            }
            return Ok(Self::Indices((first..=last).collect()));
        }

        let mut indices = text
            .split(',')
            .map(parse_index)
            .collect::<Result<Vec<_>>>()?;
        if let Some(&bad) = indices.iter().find(|&&i| !in_range(i)) {
            return Err(RmpError::InvalidSliceSelection(format!(
                "slice {bad} is outside 1-{slice_count}"
            )));
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(Self::Indices(indices))
    }

    /// Selected indices for a stack of `slice_count` slices.
    pub fn indices(&self, slice_count: usize) -> Vec<usize> {
        match self {
            Self::All => (1..=slice_count).collect(),
            Self::Indices(v) => v.iter().copied().filter(|&i| i <= slice_count).collect(),
        }
    }
}

fn parse_index(s: &str) -> Result<usize> {
    let s = s.trim();
    let value = s
        .parse::<i64>()
        .map_err(|_| RmpError::InvalidSliceSelection(format!("not a number: {s:?}")))?;
    usize::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| RmpError::InvalidSliceSelection(format!("slice {value} is not positive")))
}
