//! Marker-region replacement in the client template.

use crate::error::SpliceError;

pub const START_MARKER: &str = "/* MARKER: types */";
pub const END_MARKER: &str = "/* MARKER END: types */";

/// Replace everything between the start-marker line and the end-marker line
/// with `generated`. Both markers stay in place, so splicing an already
/// spliced file again gives the same result as splicing the pristine one.
pub fn splice(template: &str, generated: &str) -> Result<String, SpliceError> {
    let start = template
        .find(START_MARKER)
        .ok_or(SpliceError::MissingMarker(START_MARKER))?;
    let end = template
        .find(END_MARKER)
        .ok_or(SpliceError::MissingMarker(END_MARKER))?;
    if end < start {
        return Err(SpliceError::MarkersOutOfOrder);
    }

    let region_start = match template[start..].find('\n') {
        Some(offset) => start + offset + 1,
        None => return Err(SpliceError::MarkersOutOfOrder),
    };
    if region_start > end {
        return Err(SpliceError::MarkersOutOfOrder);
    }
    // the end marker keeps its indentation
    let region_end = template[..end].rfind('\n').map_or(end, |nl| nl + 1).max(region_start);

    let mut out = String::with_capacity(template.len() + generated.len());
    out.push_str(&template[..region_start]);
    out.push_str(generated.trim_end_matches('\n'));
    out.push('\n');
    out.push_str(&template[region_end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "head\n/* MARKER: types */\ntype Old = {};\n/* MARKER END: types */\ntail\n";

    #[test]
    fn test_replaces_region() {
        let out = splice(TEMPLATE, "type New = 1;\n").unwrap();
        assert_eq!(
            out,
            "head\n/* MARKER: types */\ntype New = 1;\n/* MARKER END: types */\ntail\n"
        );
    }

    #[test]
    fn test_splice_is_idempotent() {
        let once = splice(TEMPLATE, "type A = 1;\ntype B = 2;").unwrap();
        let twice = splice(&once, "type A = 1;\ntype B = 2;").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_adjacent_markers() {
        let out = splice("/* MARKER: types */\n/* MARKER END: types */\n", "type X = 0;").unwrap();
        assert_eq!(out, "/* MARKER: types */\ntype X = 0;\n/* MARKER END: types */\n");
    }

    #[test]
    fn test_missing_markers() {
        assert_eq!(
            splice("no markers", "x").unwrap_err(),
            SpliceError::MissingMarker(START_MARKER)
        );
        assert_eq!(
            splice("/* MARKER: types */\n", "x").unwrap_err(),
            SpliceError::MissingMarker(END_MARKER)
        );
    }

    #[test]
    fn test_markers_out_of_order() {
        assert_eq!(
            splice("/* MARKER END: types */\n/* MARKER: types */\n", "x").unwrap_err(),
            SpliceError::MarkersOutOfOrder
        );
    }
}
