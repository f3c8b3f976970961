use bytes::Bytes;
use serde_json::Value;

//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Text frame, UTF-8 already checked by the transport
    Text,

    /// Binary frame, expected to carry UTF-8 json anyway
    Binary,
}

/// One inbound data message
///
/// Only lives for a single receive -> parse -> write cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub kind: PayloadKind,
    pub bytes: Bytes,
}

//

impl Payload {
    pub fn text<B: Into<Bytes>>(bytes: B) -> Self {
        Self {
            kind: PayloadKind::Text,
            bytes: bytes.into(),
        }
    }

    pub fn binary<B: Into<Bytes>>(bytes: B) -> Self {
        Self {
            kind: PayloadKind::Binary,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Parse the payload as json
    ///
    /// Object key order is kept as received.
    pub fn parse(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.bytes)
    }
}

/// Pretty print `value` with 2 space indentation
///
/// Non-ASCII characters are written as is, not `\u` escaped,
/// and there is no trailing newline.
pub fn to_pretty(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

//

#[cfg(test)]
mod tests {
    use super::{to_pretty, Payload};
    use serde_json::{json, Value};

    #[test]
    fn pretty_uses_two_spaces_and_no_trailing_newline() {
        let value = Payload::text(r#"{"a":1}"#).parse().unwrap();
        assert_eq!(to_pretty(&value).unwrap(), "{\n  \"a\": 1\n}");

        let nested = Payload::text(r#"{"a":[1,{"b":null}],"c":{}}"#)
            .parse()
            .unwrap();
        assert_eq!(
            to_pretty(&nested).unwrap(),
            "{\n  \"a\": [\n    1,\n    {\n      \"b\": null\n    }\n  ],\n  \"c\": {}\n}"
        );
    }

    #[test]
    fn non_ascii_is_kept_literal() {
        let value = Payload::text(r#"{"группа":"ИС-21","emoji":"é"}"#)
            .parse()
            .unwrap();
        let pretty = to_pretty(&value).unwrap();
        assert!(pretty.contains("\"группа\": \"ИС-21\""));
        assert!(pretty.contains("\"emoji\": \"é\""));
        assert!(!pretty.contains("\\u"));
    }

    #[test]
    fn key_order_is_preserved() {
        let value = Payload::text(r#"{"z":1,"a":2,"m":3}"#).parse().unwrap();
        let pretty = to_pretty(&value).unwrap();
        let z = pretty.find("\"z\"").unwrap();
        let a = pretty.find("\"a\"").unwrap();
        let m = pretty.find("\"m\"").unwrap();
        assert!(z < a && a < m);
    }

    #[test]
    fn binary_frames_parse_too() {
        let value = Payload::binary(br#"{"b":2}"#.to_vec()).parse().unwrap();
        assert_eq!(value, json!({ "b": 2 }));
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        assert!(Payload::text("{\"a\":").parse().is_err());
        assert!(Payload::text("not json").parse().is_err());
        assert!(Payload::binary(vec![0xffu8, 0xfe]).parse().is_err());
        assert!(Payload::text("").parse().is_err());
    }

    #[test]
    fn non_finite_numbers_are_a_parse_error() {
        assert!(Payload::text(r#"{"x":NaN}"#).parse().is_err());
        assert!(Payload::text(r#"{"x":Infinity}"#).parse().is_err());
        assert!(Payload::text(r#"[-Infinity]"#).parse().is_err());
    }

    #[test]
    fn reparsing_the_pretty_text_is_lossless() {
        let raw = r#"{"big":123456789012345678901234567890,"f":1.5,"s":"ü","l":[true,false,null]}"#;
        let value = Payload::text(raw).parse().unwrap();
        let back: Value = serde_json::from_str(&to_pretty(&value).unwrap()).unwrap();
        assert_eq!(back, value);
    }
}
