//! Named-field records.
//!
//! A record type publishes a static [`RecordShape`]: its fields in declaration
//! order, each with the aliases its annotations declare. Incoming keys are
//! matched exactly (case-sensitive) against the accepted names of each field,
//! first declared field wins, and unmatched keys are skipped.
//!
//! Which annotation a field's accepted names come from is decided by the
//! [`AliasPolicy`] passed in through the decode options: the first source in
//! the policy for which the field declares any alias is used, otherwise the
//! field's own name. An alias of `-` removes the field from decoding.
use super::{Context, Decode, Segment, TargetKind};
use crate::error::DecodeError;
use crate::value::Value;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Where an alias was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagSource {
    /// Format-specific annotation.
    Json5,
    /// Generic annotation shared with plain JSON.
    Json,
}

/// Annotation sources to consult, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPolicy {
    sources: Vec<TagSource>,
}

#[derive(Debug)]
pub struct FieldShape {
    name: &'static str,
    kind: fn() -> TargetKind,
    tags: Vec<(TagSource, &'static str)>,
}

#[derive(Debug)]
pub struct RecordShape {
    name: &'static str,
    fields: Vec<FieldShape>,
}

/// Implemented by structs decodable from records, usually via [`crate::record!`].
pub trait Record {
    fn shape() -> &'static RecordShape
    where
        Self: Sized;

    /// Mutable access to the field declared as `name` in the shape.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Decode>;
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TagSource {
    pub fn name(self) -> &'static str {
        match self {
            Self::Json5 => "json5",
            Self::Json => "json",
        }
    }
}

impl Default for AliasPolicy {
    fn default() -> Self {
        Self { sources: vec![TagSource::Json5, TagSource::Json] }
    }
}

impl AliasPolicy {
    pub fn new(sources: impl IntoIterator<Item = TagSource>) -> Self {
        Self { sources: sources.into_iter().collect() }
    }

    pub fn sources(&self) -> &[TagSource] { &self.sources }
}

impl FieldShape {
    /// `kind` is taken lazily so self-referential records can build their shape.
    pub fn new(name: &'static str, kind: fn() -> TargetKind) -> Self {
        Self { name, kind, tags: Vec::new() }
    }

    pub fn tag(mut self, source: TagSource, alias: &'static str) -> Self {
        self.tags.push((source, alias));
        self
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn kind(&self) -> TargetKind { (self.kind)() }
    pub fn tags(&self) -> &[(TagSource, &'static str)] { &self.tags }

    /// Source names this field answers to under `policy`; empty if skipped.
    pub fn accepted_names(&self, policy: &AliasPolicy) -> Vec<&'static str> {
        for source in policy.sources() {
            let aliases: Vec<&'static str> = self
                .tags
                .iter()
                .filter(|(s, _)| s == source)
                .map(|(_, alias)| *alias)
                .collect();
            if aliases.is_empty() {
                continue;
            }
            if aliases.contains(&"-") {
                return Vec::new();
            }
            // an empty alias keeps the field name (e.g. options-only annotations)
            return aliases.into_iter().map(|a| if a.is_empty() { self.name } else { a }).collect();
        }
        vec![self.name]
    }

    pub fn accepts(&self, key: &str, policy: &AliasPolicy) -> bool {
        self.accepted_names(policy).contains(&key)
    }
}

impl RecordShape {
    pub fn new(name: &'static str) -> Self {
        Self { name, fields: Vec::new() }
    }

    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn fields(&self) -> &[FieldShape] { &self.fields }

    /// First declared field accepting `key`.
    pub fn resolve(&self, key: &str, policy: &AliasPolicy) -> Option<&FieldShape> {
        self.fields.iter().find(|f| f.accepts(key, policy))
    }
}

/// Decode a record value into `record`, field by field.
pub fn decode_record<R: Record>(record: &mut R, value: &Value, cx: &mut Context<'_>) -> Result<(), DecodeError> {
    let shape = R::shape();
    let Value::Record(entries) = value else {
        return Err(cx.mismatch(TargetKind::Record(shape), value));
    };
    for (key, item) in entries {
        let Some(field) = shape.resolve(key, cx.alias_policy()) else {
            tracing::trace!(record = shape.name(), key = %key, "ignoring unknown key");
            continue;
        };
        let Some(slot) = record.field_mut(field.name()) else {
            tracing::warn!(record = shape.name(), field = field.name(), "record shape names a field with no slot");
            continue;
        };
        cx.descend(Segment::Key(key.clone()), |cx| slot.decode(item, cx))?;
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATION MACRO
// ————————————————————————————————————————————————————————————————————————————

/// Declare a struct decodable from records.
///
/// Each field may carry aliases after `=>`:
///
/// ```
/// json5b::record! {
///     #[derive(Debug, Default)]
///     pub struct Floats {
///         pub fr: f32 => { json5 = "fr" },
///         pub fs: f64 => { json = "fs", json5 = "float_s" },
///         pub plain: Option<String>,
///     }
/// }
///
/// let mut f = Floats::default();
/// json5b::unmarshal("{fr: 1.5, float_s: '2', plain: 'x'}", &mut f).unwrap();
/// assert_eq!(f.fr, 1.5);
/// assert_eq!(f.fs, 2.0);
/// assert_eq!(f.plain.as_deref(), Some("x"));
/// ```
#[macro_export]
macro_rules! record {
    (@source json5) => { $crate::decode::TagSource::Json5 };
    (@source json) => { $crate::decode::TagSource::Json };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> { $($source:ident = $alias:literal),* $(,)? })?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($(#[$field_meta])* $field_vis $field: $ty,)*
        }

        impl $crate::decode::Record for $name {
            fn shape() -> &'static $crate::decode::RecordShape {
                static SHAPE: $crate::__private::Lazy<$crate::decode::RecordShape> =
                    $crate::__private::Lazy::new(|| {
                        $crate::decode::RecordShape::new(::core::stringify!($name))
                            $(.field(
                                $crate::decode::FieldShape::new(
                                    ::core::stringify!($field),
                                    <$ty as $crate::decode::Decode>::kind,
                                )
                                $($(.tag($crate::record!(@source $source), $alias))*)?
                            ))*
                    });
                &SHAPE
            }

            #[allow(unused_variables)]
            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn $crate::decode::Decode> {
                $(if name == ::core::stringify!($field) {
                    return ::core::option::Option::Some(&mut self.$field as &mut dyn $crate::decode::Decode);
                })*
                ::core::option::Option::None
            }
        }

        impl $crate::decode::Decode for $name {
            fn kind() -> $crate::decode::TargetKind {
                $crate::decode::TargetKind::Record(<Self as $crate::decode::Record>::shape())
            }

            fn decode(
                &mut self,
                value: &$crate::Value,
                cx: &mut $crate::decode::Context<'_>,
            ) -> ::core::result::Result<(), $crate::DecodeError> {
                $crate::decode::decode_record(self, value, cx)
            }
        }
    };
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodeOptions, IntKind, decode_value};

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Tagged {
            both: i32 => { json = "generic", json5 = "specific" },
            generic_only: i32 => { json = "g" },
            untagged: i32,
            skipped: i32 => { json5 = "-" },
            renamed_twice: i32 => { json5 = "r1", json5 = "r2" },
            options_only: i32 => { json5 = "" },
        }
    }

    crate::record! {
        #[derive(Debug, Default)]
        struct Tree {
            label: String,
            children: Vec<Tree>,
        }
    }

    fn decode<T: Decode + Default>(src: &str, options: &DecodeOptions) -> Result<T, DecodeError> {
        let value: Value = src.parse().unwrap();
        let mut out = T::default();
        decode_value(&value, &mut out, options)?;
        Ok(out)
    }

    #[test]
    fn format_specific_alias_wins() {
        let t: Tagged = decode("{specific: 1, generic: 2}", &DecodeOptions::default()).unwrap();
        assert_eq!(t.both, 1);

        let t: Tagged = decode("{generic: 2}", &DecodeOptions::default()).unwrap();
        assert_eq!(t.both, 0, "generic alias is shadowed by the format-specific one");
    }

    #[test]
    fn policy_is_explicit() {
        let json_first = DecodeOptions { alias_policy: AliasPolicy::new([TagSource::Json]), ..Default::default() };
        let t: Tagged = decode("{specific: 1, generic: 2, skipped: 3}", &json_first).unwrap();
        assert_eq!(t.both, 2);
        // `-` only applies under the json5 source
        assert_eq!(t.skipped, 3);
    }

    #[test]
    fn fallback_names_and_skips() {
        let t: Tagged = decode(
            "{g: 1, untagged: 2, skipped: 3, r1: 4, options_only: 5, Untagged: 99, generic_only: 98}",
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            t,
            Tagged { both: 0, generic_only: 1, untagged: 2, skipped: 0, renamed_twice: 4, options_only: 5 }
        );
        let t: Tagged = decode("{r2: 7}", &DecodeOptions::default()).unwrap();
        assert_eq!(t.renamed_twice, 7);
    }

    #[test]
    fn shape_is_cached_and_described() {
        let a = <Tagged as Record>::shape();
        let b = <Tagged as Record>::shape();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.name(), "Tagged");
        assert_eq!(a.fields().len(), 6);
        assert_eq!(a.fields()[0].kind(), TargetKind::Int(IntKind::I32));
        assert_eq!(a.fields()[0].tags(), [(TagSource::Json, "generic"), (TagSource::Json5, "specific")]);
        assert_eq!(a.resolve("g", &AliasPolicy::default()).map(FieldShape::name), Some("generic_only"));
        assert!(a.resolve("nope", &AliasPolicy::default()).is_none());
    }

    #[test]
    fn self_referential_records() {
        let t: Tree = decode(
            "{label: 'root', children: [{label: 'a'}, {label: 'b', children: [{label: 'c'}]}]}",
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(t.children.len(), 2);
        assert_eq!(t.children[1].children[0].label, "c");
        assert_eq!(Tree::kind().to_string(), "record Tree");
    }

    #[test]
    fn non_record_source_is_a_mismatch() {
        let err = decode::<Tree>("'root'", &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "at .: cannot decode string into record Tree");
    }

    #[derive(Default)]
    struct Point {
        x: f64,
        y: f64,
    }

    impl Record for Point {
        fn shape() -> &'static RecordShape {
            static SHAPE: once_cell::sync::Lazy<RecordShape> = once_cell::sync::Lazy::new(|| {
                RecordShape::new("Point")
                    .field(FieldShape::new("x", f64::kind).tag(TagSource::Json, "X"))
                    .field(FieldShape::new("y", f64::kind))
            });
            &SHAPE
        }

        fn field_mut(&mut self, name: &str) -> Option<&mut dyn Decode> {
            match name {
                "x" => Some(&mut self.x),
                "y" => Some(&mut self.y),
                _ => None,
            }
        }
    }

    #[test]
    fn hand_written_records() {
        let value: Value = "{X: 1, y: '-2.5', x: 9}".parse().unwrap();
        let mut p = Point::default();
        decode_record(&mut p, &value, &mut Context::new(&DecodeOptions::default())).unwrap();
        assert_eq!((p.x, p.y), (1.0, -2.5));
    }

    #[test]
    fn error_path_follows_incoming_keys() {
        let err = decode::<Tree>("{children: [{}, {label: 5}]}", &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.path().to_string(), ".children[1].label");
    }
}
