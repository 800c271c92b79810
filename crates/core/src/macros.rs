//! Declarative macros expanding one compact type declaration into the domain
//! struct, its builder and its wire form.
//!
//! Attributes are declared as `<category> <name>: <type> => "<json name>"`:
//!
//! - `copy`: `Copy` scalars (`bool`, `i32`, `f64`, `DateTime<Utc>`); getter returns `Option<T>`.
//! - `text`: `String`; getter returns `Option<&str>`, setter takes `impl Into<String>`.
//! - `value`: anything else implementing [`Wire`](crate::Wire); getter returns
//!   `Option<&T>`, setter takes `impl Into<T>`.
//!
//! ```ignore
//! ocm_class! {
//!     /// Description of a cloud provider.
//!     pub struct CloudProvider: "CloudProvider" {
//!         text name: String => "name",
//!         text display_name: String => "display_name",
//!     }
//! }
//! ```

/// Declares a plain structured type (no identity, no `kind`).
#[macro_export]
macro_rules! ocm_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $cat:ident $field:ident : $fty:ty => $json:literal
            ),* $(,)?
        }
    ) => {
        $crate::__private::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct $name {
                $( $field: ::core::option::Option<$fty>, )*
            }

            impl $name {
                pub fn builder() -> [<$name Builder>] {
                    <[<$name Builder>] as ::core::default::Default>::default()
                }

                /// True when no attribute is set.
                pub fn is_empty(&self) -> bool {
                    true $( && self.$field.is_none() )*
                }

                pub fn to_builder(&self) -> [<$name Builder>] {
                    Self::builder().copy(self)
                }

                /// Overwrites the attributes that are set in `patch`.
                #[allow(unused_variables)]
                pub fn merge(&mut self, patch: Self) {
                    $(
                        if patch.$field.is_some() {
                            self.$field = patch.$field;
                        }
                    )*
                }

                $( $crate::__ocm_getter!([$(#[$fmeta])*] $cat $field : $fty); )*
            }

            #[doc = concat!("Builder of [`", stringify!($name), "`] values.")]
            #[derive(Debug, Clone, Default)]
            pub struct [<$name Builder>] {
                $( $field: ::core::option::Option<$fty>, )*
            }

            impl [<$name Builder>] {
                $( $crate::__ocm_setter!([$(#[$fmeta])*] $cat $field : $fty); )*

                /// Replaces every value of the builder with the ones of `object`.
                #[allow(unused_mut, unused_variables)]
                pub fn copy(mut self, object: &$name) -> Self {
                    $( self.$field = object.$field.clone(); )*
                    self
                }

                pub fn build(self) -> $name {
                    $name {
                        $( $field: self.$field, )*
                    }
                }
            }

            impl ::core::convert::From<[<$name Builder>]> for $name {
                fn from(builder: [<$name Builder>]) -> Self {
                    builder.build()
                }
            }

            #[doc(hidden)]
            #[derive(Debug, Default, ::serde::Serialize, ::serde::Deserialize)]
            pub struct [<$name Data>] {
                $(
                    #[serde(rename = $json, default, skip_serializing_if = "Option::is_none")]
                    pub $field: ::core::option::Option< <$fty as $crate::Wire>::Data >,
                )*
            }

            impl $crate::Wire for $name {
                type Data = [<$name Data>];

                fn wrap(&self) -> Self::Data {
                    [<$name Data>] {
                        $( $field: self.$field.as_ref().map(<$fty as $crate::Wire>::wrap), )*
                    }
                }

                #[allow(unused_variables)]
                fn unwrap(data: Self::Data) -> $crate::Result<Self> {
                    ::core::result::Result::Ok(Self {
                        $(
                            $field: data
                                .$field
                                .map(<$fty as $crate::Wire>::unwrap)
                                .transpose()?,
                        )*
                    })
                }
            }
        }
    };
}

/// Declares an object type: a structured type with identity (`id`, `href`), a
/// `link` flag and a `kind`.
#[macro_export]
macro_rules! ocm_class {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $kind:literal {
            $(
                $(#[$fmeta:meta])*
                $cat:ident $field:ident : $fty:ty => $json:literal
            ),* $(,)?
        }
    ) => {
        $crate::__private::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct $name {
                id: ::core::option::Option<String>,
                href: ::core::option::Option<String>,
                link: bool,
                $( $field: ::core::option::Option<$fty>, )*
            }

            impl $name {
                pub const KIND: &'static str = $kind;
                pub const LINK_KIND: &'static str = concat!($kind, "Link");

                pub fn builder() -> [<$name Builder>] {
                    <[<$name Builder>] as ::core::default::Default>::default()
                }

                /// Returns `LINK_KIND` when the object is a link, `KIND` otherwise.
                pub fn kind(&self) -> &'static str {
                    if self.link { Self::LINK_KIND } else { Self::KIND }
                }

                pub fn id(&self) -> ::core::option::Option<&str> {
                    self.id.as_deref()
                }

                pub fn href(&self) -> ::core::option::Option<&str> {
                    self.href.as_deref()
                }

                /// True when the object is only a reference to the real object.
                pub fn link(&self) -> bool {
                    self.link
                }

                /// True when neither the identity nor any attribute is set.
                pub fn is_empty(&self) -> bool {
                    self.id.is_none() && self.href.is_none() && !self.link
                        $( && self.$field.is_none() )*
                }

                pub fn to_builder(&self) -> [<$name Builder>] {
                    Self::builder().copy(self)
                }

                /// Overwrites the attributes that are set in `patch`. Identity is kept.
                #[allow(unused_variables)]
                pub fn merge(&mut self, patch: Self) {
                    $(
                        if patch.$field.is_some() {
                            self.$field = patch.$field;
                        }
                    )*
                }

                $( $crate::__ocm_getter!([$(#[$fmeta])*] $cat $field : $fty); )*
            }

            #[doc = concat!("Builder of [`", stringify!($name), "`] values.")]
            #[derive(Debug, Clone, Default)]
            pub struct [<$name Builder>] {
                id: ::core::option::Option<String>,
                href: ::core::option::Option<String>,
                link: bool,
                $( $field: ::core::option::Option<$fty>, )*
            }

            impl [<$name Builder>] {
                pub fn id(mut self, value: impl Into<String>) -> Self {
                    self.id = Some(value.into());
                    self
                }

                pub fn href(mut self, value: impl Into<String>) -> Self {
                    self.href = Some(value.into());
                    self
                }

                pub fn link(mut self, value: bool) -> Self {
                    self.link = value;
                    self
                }

                $( $crate::__ocm_setter!([$(#[$fmeta])*] $cat $field : $fty); )*

                /// Replaces every value of the builder with the ones of `object`.
                pub fn copy(mut self, object: &$name) -> Self {
                    self.id = object.id.clone();
                    self.href = object.href.clone();
                    self.link = object.link;
                    $( self.$field = object.$field.clone(); )*
                    self
                }

                pub fn build(self) -> $name {
                    $name {
                        id: self.id,
                        href: self.href,
                        link: self.link,
                        $( $field: self.$field, )*
                    }
                }
            }

            impl ::core::convert::From<[<$name Builder>]> for $name {
                fn from(builder: [<$name Builder>]) -> Self {
                    builder.build()
                }
            }

            #[doc(hidden)]
            #[derive(Debug, Default, ::serde::Serialize, ::serde::Deserialize)]
            pub struct [<$name Data>] {
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub kind: ::core::option::Option<String>,
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub id: ::core::option::Option<String>,
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub href: ::core::option::Option<String>,
                $(
                    #[serde(rename = $json, default, skip_serializing_if = "Option::is_none")]
                    pub $field: ::core::option::Option< <$fty as $crate::Wire>::Data >,
                )*
            }

            impl $crate::Wire for $name {
                type Data = [<$name Data>];

                fn wrap(&self) -> Self::Data {
                    [<$name Data>] {
                        kind: Some(self.kind().to_string()),
                        id: self.id.clone(),
                        href: self.href.clone(),
                        $( $field: self.$field.as_ref().map(<$fty as $crate::Wire>::wrap), )*
                    }
                }

                fn unwrap(data: Self::Data) -> $crate::Result<Self> {
                    let link = match data.kind.as_deref() {
                        None => false,
                        Some(kind) if kind == Self::KIND => false,
                        Some(kind) if kind == Self::LINK_KIND => true,
                        Some(kind) => return Err($crate::Error::unexpected_kind(Self::KIND, kind)),
                    };
                    ::core::result::Result::Ok(Self {
                        id: data.id,
                        href: data.href,
                        link,
                        $(
                            $field: data
                                .$field
                                .map(<$fty as $crate::Wire>::unwrap)
                                .transpose()?,
                        )*
                    })
                }
            }

            impl $crate::Class for $name {
                const KIND: &'static str = $kind;
                const LINK_KIND: &'static str = concat!($kind, "Link");
                const LIST_KIND: &'static str = concat!($kind, "List");
                const LIST_LINK_KIND: &'static str = concat!($kind, "ListLink");

                fn id(&self) -> ::core::option::Option<&str> {
                    self.id.as_deref()
                }

                fn href(&self) -> ::core::option::Option<&str> {
                    self.href.as_deref()
                }

                fn is_link(&self) -> bool {
                    self.link
                }

                fn set_id(&mut self, id: ::core::option::Option<String>) {
                    self.id = id;
                }

                fn set_href(&mut self, href: ::core::option::Option<String>) {
                    self.href = href;
                }

                fn merge(&mut self, patch: Self) {
                    $name::merge(self, patch)
                }
            }
        }
    };
}

/// Declares a string enumeration. Values the SDK doesn't know are kept in
/// `Other` so they survive a round trip.
#[macro_export]
macro_rules! ocm_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// A value not known to this version of the SDK.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $value, )*
                    Self::Other(value) => value.as_str(),
                }
            }
        }

        impl ::core::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $value => Self::$variant, )*
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl ::core::convert::From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $value => Self::$variant, )*
                    _ => Self::Other(value),
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::core::result::Result<Self, D::Error> {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(value))
            }
        }

        impl $crate::Wire for $name {
            type Data = $name;

            fn wrap(&self) -> Self::Data {
                self.clone()
            }

            fn unwrap(data: Self::Data) -> $crate::Result<Self> {
                Ok(data)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ocm_getter {
    ([$($attr:tt)*] copy $field:ident : $fty:ty) => {
        $($attr)*
        pub fn $field(&self) -> ::core::option::Option<$fty> {
            self.$field
        }
    };
    ([$($attr:tt)*] text $field:ident : $fty:ty) => {
        $($attr)*
        pub fn $field(&self) -> ::core::option::Option<&str> {
            self.$field.as_deref()
        }
    };
    ([$($attr:tt)*] value $field:ident : $fty:ty) => {
        $($attr)*
        pub fn $field(&self) -> ::core::option::Option<&$fty> {
            self.$field.as_ref()
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ocm_setter {
    ([$($attr:tt)*] copy $field:ident : $fty:ty) => {
        $($attr)*
        pub fn $field(mut self, value: $fty) -> Self {
            self.$field = Some(value);
            self
        }
    };
    ([$($attr:tt)*] text $field:ident : $fty:ty) => {
        $($attr)*
        pub fn $field(mut self, value: impl Into<String>) -> Self {
            self.$field = Some(value.into());
            self
        }
    };
    ([$($attr:tt)*] value $field:ident : $fty:ty) => {
        $($attr)*
        pub fn $field(mut self, value: impl Into<$fty>) -> Self {
            self.$field = Some(value.into());
            self
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    use crate::{Class, List, Wire, marshal, unmarshal};

    crate::ocm_enum! {
        pub enum Phase {
            Pending => "pending",
            Ready => "ready",
        }
    }

    crate::ocm_struct! {
        pub struct Limits {
            copy cpu: i32 => "cpu",
            copy ratio: f64 => "ratio",
            text unit: String => "unit",
        }
    }

    crate::ocm_class! {
        pub struct Widget: "Widget" {
            text name: String => "name",
            text type_: String => "type",
            copy enabled: bool => "enabled",
            copy created: chrono::DateTime<chrono::Utc> => "creation_timestamp",
            value phase: Phase => "phase",
            value limits: Limits => "limits",
            value tags: Vec<String> => "tags",
            value labels: BTreeMap<String, String> => "labels",
            value parts: List<Widget> => "parts",
        }
    }

    #[test]
    fn class_kind_follows_link_flag() {
        let full = Widget::builder().id("123").build();
        assert_eq!(full.kind(), "Widget");
        assert_eq!(Widget::LINK_KIND, "WidgetLink");
        assert_eq!(<Widget as Class>::LIST_KIND, "WidgetList");
        assert_eq!(<Widget as Class>::LIST_LINK_KIND, "WidgetListLink");

        let link = Widget::builder().id("123").href("/widgets/123").link(true).build();
        let json: serde_json::Value = serde_json::from_str(&marshal(&link).unwrap()).unwrap();
        assert_eq!(json["kind"], "WidgetLink");
        assert_eq!(json["href"], "/widgets/123");

        let back: Widget = unmarshal(marshal(&link).unwrap()).unwrap();
        assert!(back.link());
        assert_eq!(back, link);
    }

    #[test]
    fn class_rejects_foreign_kind() {
        let err = unmarshal::<Widget>(r#"{"kind":"Gadget","id":"1"}"#).unwrap_err();
        assert_eq!(err.to_string(), "expected kind 'Widget' but got 'Gadget'");
    }

    #[test]
    fn unset_attributes_are_omitted() {
        let widget = Widget::builder().name("w1").build();
        assert_eq!(marshal(&widget).unwrap(), r#"{"kind":"Widget","name":"w1"}"#);
        assert_eq!(widget.enabled(), None);
        assert_eq!(widget.name(), Some("w1"));
    }

    #[test]
    fn json_names_are_used_on_the_wire() {
        let widget = Widget::builder()
            .type_("small")
            .created(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap())
            .build();
        let json: serde_json::Value = serde_json::from_str(&marshal(&widget).unwrap()).unwrap();
        assert_eq!(json["type"], "small");
        assert_eq!(json["creation_timestamp"], "2020-01-02T03:04:05Z");
    }

    #[test]
    fn nested_builders_are_accepted() {
        let widget = Widget::builder()
            .limits(Limits::builder().cpu(4).unit("cores"))
            .parts(vec![Widget::builder().id("p1").build()])
            .build();
        assert_eq!(widget.limits().and_then(Limits::cpu), Some(4));
        let parts = widget.parts().unwrap();
        assert_eq!(parts.len(), 1);

        let json: serde_json::Value = serde_json::from_str(&marshal(&widget).unwrap()).unwrap();
        assert_eq!(json["parts"]["kind"], "WidgetList");
        assert_eq!(json["parts"]["items"][0]["id"], "p1");
    }

    #[test]
    fn unknown_enum_values_survive() {
        let widget: Widget = unmarshal(r#"{"phase":"hibernating"}"#).unwrap();
        assert_eq!(widget.phase(), Some(&Phase::Other("hibernating".into())));
        assert_eq!(marshal(&widget).unwrap(), r#"{"kind":"Widget","phase":"hibernating"}"#);

        let known: Widget = unmarshal(r#"{"phase":"ready"}"#).unwrap();
        assert_eq!(known.phase(), Some(&Phase::Ready));
    }

    #[test]
    fn merge_keeps_identity_and_unset_attributes() {
        let mut widget = Widget::builder().id("1").name("old").enabled(true).build();
        widget.merge(Widget::builder().id("2").name("new").build());
        assert_eq!(widget.id(), Some("1"));
        assert_eq!(widget.name(), Some("new"));
        assert_eq!(widget.enabled(), Some(true));
    }

    #[test]
    fn emptiness_and_copy() {
        assert!(Widget::default().is_empty());
        assert!(!Widget::builder().link(true).build().is_empty());
        assert!(Limits::default().is_empty());

        let original = Widget::builder().id("9").name("copied").build();
        assert_eq!(original.to_builder().build(), original);
        assert_eq!(Widget::builder().name("x").copy(&original).build(), original);
    }

    fn phase() -> impl Strategy<Value = Phase> {
        prop_oneof![
            Just(Phase::Pending),
            Just(Phase::Ready),
            "[a-z]{1,6}"
                .prop_filter("known value", |s| s != "pending" && s != "ready")
                .prop_map(Phase::Other),
        ]
    }

    fn limits() -> impl Strategy<Value = Limits> {
        (
            proptest::option::of(any::<i32>()),
            proptest::option::of((-4000i32..4000).prop_map(|n| f64::from(n) / 4.0)),
            proptest::option::of("[a-z]{0,8}"),
        )
            .prop_map(|(cpu, ratio, unit)| {
                let mut builder = Limits::builder();
                if let Some(cpu) = cpu {
                    builder = builder.cpu(cpu);
                }
                if let Some(ratio) = ratio {
                    builder = builder.ratio(ratio);
                }
                if let Some(unit) = unit {
                    builder = builder.unit(unit);
                }
                builder.build()
            })
    }

    fn widget() -> impl Strategy<Value = Widget> {
        (
            proptest::option::of("[a-z0-9]{1,12}"),
            any::<bool>(),
            proptest::option::of("\\PC{0,16}"),
            proptest::option::of(any::<bool>()),
            proptest::option::of(0i64..4_000_000_000),
            proptest::option::of(phase()),
            proptest::option::of(limits()),
            proptest::option::of(proptest::collection::vec("[a-z]{1,5}", 0..4)),
            proptest::option::of(proptest::collection::btree_map("[a-z]{1,5}", "[a-z]{0,5}", 0..4)),
        )
            .prop_map(|(id, link, name, enabled, created, phase, limits, tags, labels)| {
                let mut builder = Widget::builder().link(link);
                if let Some(id) = id {
                    builder = builder.id(id.clone()).href(format!("/widgets/{id}"));
                }
                if let Some(name) = name {
                    builder = builder.name(name);
                }
                if let Some(enabled) = enabled {
                    builder = builder.enabled(enabled);
                }
                if let Some(secs) = created {
                    builder = builder.created(Utc.timestamp_opt(secs, 0).unwrap());
                }
                if let Some(phase) = phase {
                    builder = builder.phase(phase);
                }
                if let Some(limits) = limits {
                    builder = builder.limits(limits);
                }
                if let Some(tags) = tags {
                    builder = builder.tags(tags);
                }
                if let Some(labels) = labels {
                    builder = builder.labels(labels);
                }
                builder.build()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

        #[test]
        fn wrap_then_unwrap_is_identity(widget in widget()) {
            let back = Widget::unwrap(widget.wrap()).unwrap();
            prop_assert_eq!(back, widget);
        }

        #[test]
        fn json_is_stable_across_round_trips(widget in widget()) {
            let first = marshal(&widget).unwrap();
            let decoded: Widget = unmarshal(&first).unwrap();
            let second = marshal(&decoded).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
