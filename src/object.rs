//! PDF object types.
//!
//! Font dictionaries reach this crate already materialized as an [`Object`]
//! tree. [`DictExt`] provides the typed lookups the font builders rely on:
//! every accessor answers `None` for a missing key *or* a value of the wrong
//! type, so callers never have to distinguish the two.

use crate::decoders;
use crate::error::{Error, Result};
use crate::fonts::encoding::pdfdoc_encoding_lookup;
use std::collections::HashMap;

/// A PDF dictionary.
pub type Dict = HashMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dict),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dict,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream { .. } => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to real number.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Any numeric object (integer or real) as `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Any numeric object as `i32`, truncating reals toward zero.
    ///
    /// Out-of-range values saturate at the `i32` bounds.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Object::Integer(i) => Some((*i).clamp(i32::MIN as i64, i32::MAX as i64) as i32),
            Object::Real(r) => Some(*r as i32),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns `self` if it is a stream object.
    pub fn as_stream(&self) -> Option<&Object> {
        match self {
            Object::Stream { .. } => Some(self),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Decode stream data using the filters named in the stream dictionary.
    ///
    /// `max_size` bounds the decoded length (0 disables the check).
    pub fn decode_stream_data(&self, max_size: usize) -> Result<Vec<u8>> {
        match self {
            Object::Stream { dict, data } => {
                let filters = dict
                    .get("Filter")
                    .map(extract_filter_names)
                    .unwrap_or_default();
                decoders::decode_stream(data, &filters, max_size)
            },
            _ => Err(Error::InvalidObjectType {
                expected: "Stream".to_string(),
                found: self.type_name().to_string(),
            }),
        }
    }
}

/// Extract filter names from a Filter object.
///
/// The Filter entry can be either a single Name or an Array of Names.
fn extract_filter_names(filter_obj: &Object) -> Vec<String> {
    match filter_obj {
        Object::Name(name) => vec![name.clone()],
        Object::Array(arr) => arr
            .iter()
            .filter_map(|obj| obj.as_name().map(|s| s.to_string()))
            .collect(),
        _ => vec![],
    }
}

/// Typed dictionary lookups.
///
/// Each getter returns `None` when the key is missing or holds a value of an
/// unexpected type.
pub trait DictExt {
    /// Name value for `key`.
    fn get_name(&self, key: &str) -> Option<&str>;
    /// Numeric value (integer or real) for `key`.
    fn get_number(&self, key: &str) -> Option<f64>;
    /// Numeric value for `key`, truncated to `i32`.
    fn get_int(&self, key: &str) -> Option<i32>;
    /// Array value for `key`.
    fn get_array(&self, key: &str) -> Option<&[Object]>;
    /// Dictionary value for `key` (stream dictionaries included).
    fn get_dict(&self, key: &str) -> Option<&Dict>;
    /// Stream object for `key`.
    fn get_stream(&self, key: &str) -> Option<&Object>;
    /// Text string value for `key`, decoded to UTF-8.
    fn get_string(&self, key: &str) -> Option<String>;
    /// Whether `key` is present, whatever its type.
    fn has_key(&self, key: &str) -> bool;
}

impl DictExt for Dict {
    fn get_name(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Object::as_name)
    }

    fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Object::as_number)
    }

    fn get_int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(Object::as_int)
    }

    fn get_array(&self, key: &str) -> Option<&[Object]> {
        self.get(key).and_then(Object::as_array).map(Vec::as_slice)
    }

    fn get_dict(&self, key: &str) -> Option<&Dict> {
        self.get(key).and_then(Object::as_dict)
    }

    fn get_stream(&self, key: &str) -> Option<&Object> {
        self.get(key).and_then(Object::as_stream)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Object::as_string).map(decode_text_string)
    }

    fn has_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Decode a PDF text string.
///
/// Strings starting with the UTF-16BE byte order mark are decoded as UTF-16;
/// everything else is treated as PDFDocEncoding.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    bytes
        .iter()
        .map(|&b| pdfdoc_encoding_lookup(b).unwrap_or('\u{FFFD}'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: Vec<(&str, Object)>) -> Dict {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_object_integer() {
        let obj = Object::Integer(42);
        assert_eq!(obj.as_integer(), Some(42));
        assert_eq!(obj.as_int(), Some(42));
        assert!(obj.as_name().is_none());
        assert!(!obj.is_null());
    }

    #[test]
    fn test_object_real_truncates_to_int() {
        let obj = Object::Real(-12.75);
        assert_eq!(obj.as_number(), Some(-12.75));
        assert_eq!(obj.as_int(), Some(-12));
        assert!(obj.as_integer().is_none());
    }

    #[test]
    fn test_object_int_saturates() {
        assert_eq!(Object::Integer(i64::MAX).as_int(), Some(i32::MAX));
        assert_eq!(Object::Integer(i64::MIN).as_int(), Some(i32::MIN));
    }

    #[test]
    fn test_object_stream_dict_access() {
        let obj = Object::Stream {
            dict: dict(vec![("Length", Object::Integer(100))]),
            data: bytes::Bytes::from_static(b"stream data"),
        };

        let d = obj.as_dict().unwrap();
        assert_eq!(d.get("Length").unwrap().as_integer(), Some(100));
        assert!(obj.as_stream().is_some());
        assert!(Object::Dictionary(Dict::new()).as_stream().is_none());
    }

    #[test]
    fn test_object_ref_display() {
        let obj_ref = ObjectRef::new(10, 0);
        assert_eq!(format!("{}", obj_ref), "10 0 R");
        assert_eq!(Object::Reference(obj_ref).as_reference(), Some(obj_ref));
    }

    #[test]
    fn test_dict_ext_missing_and_mistyped() {
        let d = dict(vec![
            ("Ascent", Object::Integer(718)),
            ("FontName", Object::Name("Helvetica".to_string())),
        ]);

        assert_eq!(d.get_int("Ascent"), Some(718));
        assert_eq!(d.get_number("Ascent"), Some(718.0));
        assert_eq!(d.get_name("FontName"), Some("Helvetica"));

        // Mistyped lookups answer None rather than failing
        assert!(d.get_name("Ascent").is_none());
        assert!(d.get_int("FontName").is_none());
        assert!(d.get_array("Ascent").is_none());
        assert!(d.get_dict("Ascent").is_none());
        assert!(d.get_stream("Ascent").is_none());

        // Missing key
        assert!(d.get_int("Descent").is_none());
        assert!(d.has_key("Ascent"));
        assert!(!d.has_key("Descent"));
    }

    #[test]
    fn test_dict_ext_string_pdfdoc() {
        let d = dict(vec![("FontFamily", Object::String(b"Times".to_vec()))]);
        assert_eq!(d.get_string("FontFamily"), Some("Times".to_string()));
    }

    #[test]
    fn test_dict_ext_string_utf16() {
        let d = dict(vec![(
            "FontFamily",
            Object::String(vec![0xFE, 0xFF, 0x00, 0x4D, 0x00, 0x53]),
        )]);
        assert_eq!(d.get_string("FontFamily"), Some("MS".to_string()));
    }

    #[test]
    fn test_decode_stream_no_filter() {
        let obj = Object::Stream {
            dict: Dict::new(),
            data: bytes::Bytes::from_static(b"Hello"),
        };
        assert_eq!(obj.decode_stream_data(0).unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_stream_filter_array() {
        let obj = Object::Stream {
            dict: dict(vec![(
                "Filter",
                Object::Array(vec![Object::Name("ASCIIHexDecode".to_string())]),
            )]),
            data: bytes::Bytes::from_static(b"48656C6C6F>"),
        };
        assert_eq!(obj.decode_stream_data(0).unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_stream_not_a_stream() {
        let result = Object::Integer(42).decode_stream_data(0);
        match result {
            Err(Error::InvalidObjectType { expected, found }) => {
                assert_eq!(expected, "Stream");
                assert_eq!(found, "Integer");
            },
            _ => panic!("Expected InvalidObjectType error"),
        }
    }

    #[test]
    fn test_extract_filter_names() {
        let filter = Object::Array(vec![
            Object::Name("ASCIIHexDecode".to_string()),
            Object::Name("FlateDecode".to_string()),
        ]);
        assert_eq!(extract_filter_names(&filter), vec!["ASCIIHexDecode", "FlateDecode"]);
        assert!(extract_filter_names(&Object::Integer(42)).is_empty());
    }
}
