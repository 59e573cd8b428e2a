//! Glyph width arrays.
//!
//! Simple fonts carry a dense `/Widths` array starting at `/FirstChar`;
//! CIDFonts carry a sparse `/W` array mixing two forms:
//!
//! ```text
//! [ 120 [400 325 500]      % CIDs 120, 121, 122
//!   7080 8032 1000 ]       % CIDs 7080..=8032 all 1000
//! ```
//!
//! PDF Spec: ISO 32000-1:2008, Sections 9.6.2.1 and 9.7.4.3

use crate::object::Object;
use std::collections::HashMap;

/// Decode a simple font `/Widths` array into one width per byte code.
///
/// `first_char` is clamped to 0; codes before it and past the end of the
/// array get width 0, as do non-numeric entries.
///
/// # Examples
///
/// ```
/// use pdf_docfont::fonts::simple_widths;
/// use pdf_docfont::object::Object;
///
/// let array = vec![Object::Integer(600), Object::Integer(700)];
/// let widths = simple_widths(Some(&array), 65);
/// assert_eq!(widths[65], 600);
/// assert_eq!(widths[66], 700);
/// assert_eq!(widths[67], 0);
/// ```
pub fn simple_widths(array: Option<&[Object]>, first_char: i64) -> [i32; 256] {
    let mut widths = [0i32; 256];
    let Some(array) = array else {
        return widths;
    };

    let first = first_char.clamp(0, 256) as usize;
    for (slot, value) in widths.iter_mut().skip(first).zip(array) {
        *slot = value.as_int().unwrap_or(0);
    }

    if first + array.len() > 256 {
        log::debug!(
            "Widths array of {} entries from FirstChar {} overruns code 255, extra entries ignored",
            array.len(),
            first
        );
    }
    widths
}

/// Sparse CID to width table decoded from a CIDFont `/W` array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CidWidths {
    widths: HashMap<u32, i32>,
}

impl CidWidths {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Width declared for `cid`.
    pub fn get(&self, cid: u32) -> Option<i32> {
        self.widths.get(&cid).copied()
    }

    /// Whether `cid` has a declared width.
    pub fn contains(&self, cid: u32) -> bool {
        self.widths.contains_key(&cid)
    }

    /// Number of CIDs with a declared width.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Declare a width. Later declarations replace earlier ones.
    pub fn insert(&mut self, cid: u32, width: i32) {
        self.widths.insert(cid, width);
    }
}

fn as_cid(obj: &Object) -> Option<u32> {
    obj.as_number()
        .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

/// Decode a CIDFont `/W` array.
///
/// Ranges spanning more than `max_cid_range` CIDs are skipped, as is any
/// entry that does not fit either form.
pub fn composite_widths(array: &[Object], max_cid_range: u32) -> CidWidths {
    let mut table = CidWidths::new();
    let mut i = 0;

    while i < array.len() {
        let Some(first) = as_cid(&array[i]) else {
            log::warn!("W array: expected a CID at index {}, found {}", i, array[i].type_name());
            i += 1;
            continue;
        };

        match array.get(i + 1) {
            Some(Object::Array(list)) => {
                for (offset, w) in list.iter().enumerate() {
                    if let (Some(width), Some(cid)) = (w.as_int(), first.checked_add(offset as u32)) {
                        table.insert(cid, width);
                    }
                }
                i += 2;
            },
            Some(last) if last.as_number().is_some() => {
                let Some(width) = array.get(i + 2).and_then(Object::as_int) else {
                    log::warn!("W array: range starting at CID {} has no width", first);
                    break;
                };
                match as_cid(last) {
                    Some(last) if last >= first && last - first <= max_cid_range => {
                        for cid in first..=last {
                            table.insert(cid, width);
                        }
                    },
                    _ => log::warn!("W array: skipping invalid range starting at CID {}", first),
                }
                i += 3;
            },
            Some(other) => {
                log::warn!("W array: unexpected {} after CID {}", other.type_name(), first);
                i += 2;
            },
            None => {
                log::warn!("W array: trailing CID {} without widths", first);
                break;
            },
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Object> {
        values.iter().map(|&v| Object::Integer(v)).collect()
    }

    #[test]
    fn test_simple_widths_first_char_offset() {
        let array = ints(&[600, 700, 800]);
        let widths = simple_widths(Some(&array), 65);
        assert_eq!(widths[64], 0);
        assert_eq!(widths[65], 600);
        assert_eq!(widths[66], 700);
        assert_eq!(widths[67], 800);
        assert_eq!(widths[68], 0);
    }

    #[test]
    fn test_simple_widths_negative_first_char() {
        let array = ints(&[250, 333]);
        let widths = simple_widths(Some(&array), -5);
        assert_eq!(widths[0], 250);
        assert_eq!(widths[1], 333);
    }

    #[test]
    fn test_simple_widths_overrun_and_junk() {
        let array = vec![Object::Real(510.7), Object::Name("x".into()), Object::Integer(9)];
        let widths = simple_widths(Some(&array), 254);
        assert_eq!(widths[254], 510);
        assert_eq!(widths[255], 0);
    }

    #[test]
    fn test_simple_widths_absent() {
        assert!(simple_widths(None, 0).iter().all(|&w| w == 0));
    }

    #[test]
    fn test_composite_widths_list_form() {
        let array = vec![Object::Integer(120), Object::Array(ints(&[400, 325, 500]))];
        let table = composite_widths(&array, 10_000);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(120), Some(400));
        assert_eq!(table.get(122), Some(500));
        assert!(!table.contains(123));
    }

    #[test]
    fn test_composite_widths_range_form() {
        let array = ints(&[10, 12, 1000, 20, 20, 500]);
        let table = composite_widths(&array, 10_000);
        assert_eq!(table.get(10), Some(1000));
        assert_eq!(table.get(11), Some(1000));
        assert_eq!(table.get(12), Some(1000));
        assert_eq!(table.get(20), Some(500));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_composite_widths_mixed_forms() {
        let array = vec![
            Object::Integer(1),
            Object::Array(vec![Object::Real(556.2), Object::Integer(277)]),
            Object::Integer(5),
            Object::Integer(6),
            Object::Real(500.9),
        ];
        let table = composite_widths(&array, 10_000);
        assert_eq!(table.get(1), Some(556));
        assert_eq!(table.get(2), Some(277));
        assert_eq!(table.get(6), Some(500));
    }

    #[test]
    fn test_composite_widths_hostile_range_skipped() {
        let array = ints(&[0, 4_000_000, 1000, 7, 7, 250]);
        let table = composite_widths(&array, 10_000);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(7), Some(250));
    }

    #[test]
    fn test_composite_widths_inverted_range_skipped() {
        let table = composite_widths(&ints(&[9, 3, 1000]), 10_000);
        assert!(table.is_empty());
    }

    #[test]
    fn test_composite_widths_truncated_tail() {
        let table = composite_widths(&ints(&[5, 6]), 10_000);
        assert!(table.is_empty());
    }
}
