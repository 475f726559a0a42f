//! Deterministic debug rendering for resource types.
//!
//! Every resource struct implements [`Stringify`] (through the
//! `impl_stringify!` macro) and `Display` as a delegation to [`stringify`]:
//!
//! ```
//! use github::{stringify, User};
//!
//! let user = User {
//!     id: Some(123),
//!     name: Some("n".to_string()),
//!     ..Default::default()
//! };
//! assert_eq!(stringify(&user), r#"github.User{ID:123, Name:"n"}"#);
//! assert_eq!(user.to_string(), stringify(&user));
//! ```
//!
//! Rendering rules:
//! - absent optionals render as `<nil>`; present ones render their value
//! - strings are wrapped in double quotes without escaping
//! - sequences render as `[a b]`
//! - records render as `github.Name{Field:value, Field:value}`, skipping
//!   absent optionals and empty sequences
//! - floats use the shortest round-trip digits, switching to exponent form
//!   outside `[1e-4, 1e6)`

use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Prefix used for named record types.
pub const PACKAGE_NAME: &str = "github";

/// Rendered form of an absent optional.
pub const NIL: &str = "<nil>";

/// Acronyms rendered fully upper-cased in field labels.
const INITIALISMS: &[&str] = &[
    "acl", "api", "ascii", "cpu", "css", "dns", "eof", "guid", "html", "http", "https", "id", "ip",
    "json", "lhs", "os", "qps", "ram", "rhs", "rpc", "scim", "sha", "sku", "sla", "smtp", "sql",
    "ssh", "tcp", "tls", "ttl", "udp", "ui", "uid", "uri", "url", "utf8", "uuid", "vm", "xml",
    "xmpp", "xsrf", "xss",
];

/// A value with a debug rendering.
pub trait Stringify {
    /// Appends the rendering of `self` to `out`.
    fn write_to(&self, out: &mut String);

    /// Returns true if a record should leave this field out entirely.
    fn is_omitted(&self) -> bool {
        false
    }
}

/// Renders a value to its debug string.
pub fn stringify<T: Stringify + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    value.write_to(&mut out);
    out
}

/// Writes the fields of a record, e.g. `github.User{ID:1, Login:"a"}`.
pub struct RecordWriter<'a> {
    out: &'a mut String,
    has_fields: bool,
}

impl<'a> RecordWriter<'a> {
    /// Starts a record for a named type of this crate.
    pub fn named(out: &'a mut String, type_name: &str) -> Self {
        out.push_str(PACKAGE_NAME);
        out.push('.');
        out.push_str(type_name);
        out.push('{');
        Self {
            out,
            has_fields: false,
        }
    }

    /// Starts a record without a type prefix.
    pub fn anonymous(out: &'a mut String) -> Self {
        out.push('{');
        Self {
            out,
            has_fields: false,
        }
    }

    /// Writes one field unless the value is omitted.
    pub fn field<T: Stringify + ?Sized>(&mut self, label: &str, value: &T) -> &mut Self {
        if value.is_omitted() {
            return self;
        }
        if self.has_fields {
            self.out.push_str(", ");
        }
        self.out.push_str(label);
        self.out.push(':');
        value.write_to(self.out);
        self.has_fields = true;
        self
    }

    /// Closes the record.
    pub fn finish(self) {
        self.out.push('}');
    }
}

/// Converts a snake_case field name to its exported label.
///
/// `html_url` becomes `HTMLURL`, `network_settings_ids` becomes
/// `NetworkSettingsIDs`.
#[doc(hidden)]
pub fn exported_name(field: &str) -> Cow<'static, str> {
    let mut name = String::with_capacity(field.len());
    for part in field.split('_').filter(|p| !p.is_empty()) {
        if INITIALISMS.contains(&part) {
            name.push_str(&part.to_ascii_uppercase());
        } else if let Some(stem) = part.strip_suffix('s').filter(|s| INITIALISMS.contains(s)) {
            name.push_str(&stem.to_ascii_uppercase());
            name.push('s');
        } else {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                name.extend(first.to_uppercase());
                name.push_str(chars.as_str());
            }
        }
    }
    Cow::Owned(name)
}

/// Implements [`Stringify`] and `Display` for resource structs.
///
/// Labels default to the exported form of the field name; `field as "Label"`
/// overrides it.
macro_rules! impl_stringify {
    (@label $field:ident) => {
        $crate::stringify::exported_name(stringify!($field))
    };
    (@label $field:ident $label:literal) => {
        ::std::borrow::Cow::<'static, str>::Borrowed($label)
    };
    ($($ty:ident { $($field:ident $(as $label:literal)?),* $(,)? })+) => {
        $(
            impl $crate::stringify::Stringify for $ty {
                fn write_to(&self, out: &mut String) {
                    #[allow(unused_mut)]
                    let mut record = $crate::stringify::RecordWriter::named(out, stringify!($ty));
                    $(
                        record.field(
                            &$crate::stringify::impl_stringify!(@label $field $($label)?),
                            &self.$field,
                        );
                    )*
                    record.finish();
                }
            }

            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&$crate::stringify::stringify(self))
                }
            }
        )+
    };
}

/// Declares a closed string enum with serde names, `as_str`, `Display` and
/// [`Stringify`] (rendered as a quoted string).
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Returns the wire value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::stringify::Stringify for $name {
            fn write_to(&self, out: &mut String) {
                out.push('"');
                out.push_str(self.as_str());
                out.push('"');
            }
        }
    };
}

pub(crate) use impl_stringify;
pub(crate) use string_enum;

impl<T: Stringify> Stringify for Option<T> {
    fn write_to(&self, out: &mut String) {
        match self {
            Some(value) => value.write_to(out),
            None => out.push_str(NIL),
        }
    }

    fn is_omitted(&self) -> bool {
        self.is_none()
    }
}

impl<T: Stringify + ?Sized> Stringify for Box<T> {
    fn write_to(&self, out: &mut String) {
        (**self).write_to(out)
    }

    fn is_omitted(&self) -> bool {
        (**self).is_omitted()
    }
}

impl<T: Stringify + ?Sized> Stringify for &T {
    fn write_to(&self, out: &mut String) {
        (**self).write_to(out)
    }

    fn is_omitted(&self) -> bool {
        (**self).is_omitted()
    }
}

impl<T: Stringify> Stringify for [T] {
    fn write_to(&self, out: &mut String) {
        out.push('[');
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            item.write_to(out);
        }
        out.push(']');
    }

    fn is_omitted(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Stringify> Stringify for Vec<T> {
    fn write_to(&self, out: &mut String) {
        self.as_slice().write_to(out)
    }

    fn is_omitted(&self) -> bool {
        self.is_empty()
    }
}

impl<V: Stringify> Stringify for BTreeMap<String, V> {
    fn write_to(&self, out: &mut String) {
        out.push_str("map[");
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(key);
            out.push(':');
            value.write_to(out);
        }
        out.push(']');
    }

    fn is_omitted(&self) -> bool {
        self.is_empty()
    }
}

impl Stringify for str {
    fn write_to(&self, out: &mut String) {
        out.push('"');
        out.push_str(self);
        out.push('"');
    }
}

impl Stringify for String {
    fn write_to(&self, out: &mut String) {
        self.as_str().write_to(out)
    }
}

impl Stringify for bool {
    fn write_to(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

/// Raw JSON renders as its compact text.
impl Stringify for Value {
    fn write_to(&self, out: &mut String) {
        let _ = write!(out, "{}", self);
    }

    fn is_omitted(&self) -> bool {
        self.is_null()
    }
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl Stringify for $t {
                fn write_to(&self, out: &mut String) {
                    let _ = write!(out, "{}", self);
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl Stringify for $t {
                fn write_to(&self, out: &mut String) {
                    if self.is_nan() {
                        out.push_str("NaN");
                    } else if self.is_infinite() {
                        out.push_str(if *self > 0.0 { "+Inf" } else { "-Inf" });
                    } else {
                        write_float(out, &format!("{:e}", self), self);
                    }
                }
            }
        )*
    };
}

impl_float!(f32, f64);

/// Writes a finite float given its shortest scientific form (`1.5e6`).
fn write_float(out: &mut String, scientific: &str, plain: &dyn std::fmt::Display) {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..6).contains(&exponent) {
        let _ = write!(out, "{}", plain);
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(out, "{}e{}{:02}", mantissa, sign, exponent.abs());
    }
}
