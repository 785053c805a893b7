//! Conversion of call-site arguments into structured fields.
//!
//! Both conversions are lenient: malformed input yields fewer fields, never
//! an error.

use crate::domain::Field;
use crate::domain::field::display_value;
use serde_json::Value;

/// Builds fields from a flat `key, value, key, value, ...` sequence.
///
/// Keys are rendered to their display string; values keep their type.
/// Duplicate keys are kept in call order. With an odd number of arguments the
/// trailing key has no value and is dropped.
pub fn fields_from_pairs<I, V>(args: I) -> Vec<Field>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut fields = Vec::with_capacity(args.size_hint().0 / 2);

    while let Some(key) = args.next() {
        let Some(value) = args.next() else {
            break;
        };
        fields.push(Field {
            key: display_value(&key),
            value,
        });
    }

    fields
}

/// Builds one field per map entry.
///
/// Order follows the map's iteration order, which for `HashMap` is
/// unspecified and may differ between calls.
pub fn fields_from_map<M, K, V>(map: M) -> Vec<Field>
where
    M: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    map.into_iter()
        .map(|(key, value)| Field::new(key, value))
        .collect()
}

/// Builds a `Vec<Field>` from `key, value` pairs, converting each argument
/// with `serde_json::json!`.
///
/// ```
/// use rask_log_fanout::fields;
///
/// let fields = fields!("retries", 3, "host", "db1");
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].key, "retries");
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::args::fields_from_pairs::<_, $crate::serde_json::Value>([
            $($crate::serde_json::json!($arg)),+
        ])
    };
}
