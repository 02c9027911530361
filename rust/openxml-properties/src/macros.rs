//! Accessor generation
//!
//! [`has_properties!`](crate::has_properties) declares a host struct together
//! with its property schema, typed accessors and the [`HasProperties`]
//! implementation rendering it.
//!
//! [`HasProperties`]: crate::HasProperties

/// Declare a host element with properties and properties-attributes
///
/// ```
/// use openxml_properties::{has_properties, Element, SomeProperty, ValueProperty};
///
/// has_properties! {
///     #[derive(Default)]
///     pub struct Paragraph {}
///     properties {
///         value_property justification: ValueProperty,
///         property spacing: SomeProperty,
///     }
///     attributes {
///         bold => "b" as Boolean,
///     }
/// }
///
/// impl Element for Paragraph {
///     fn tag(&self) -> Option<&str> { Some("p") }
///     fn namespace(&self) -> Option<&str> { Some("w") }
/// }
///
/// let mut paragraph = Paragraph::default();
/// paragraph.set_justification("center").unwrap();
/// paragraph.set_bold(true);
/// assert!(paragraph.justification().is_some());
/// ```
///
/// `value_property` slots get a reader returning `Option<&T>` and a
/// `set_<name>` writer building `T` through [`FromValue`]. `property` slots get
/// a reader only, which builds `T::default()` on first use and keeps it.
/// Attributes get a reader and writer over a raw [`Scalar`].
///
/// [`FromValue`]: crate::FromValue
/// [`Scalar`]: crate::Scalar
#[macro_export]
macro_rules! has_properties {
    (
        $(#[$meta:meta])*
        $vis:vis struct $host:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty ),* $(,)?
        }
        properties {
            $( $kind:ident $name:ident : $pty:ty ),* $(,)?
        }
    ) => {
        $crate::has_properties! {
            $(#[$meta])*
            $vis struct $host {
                $( $(#[$fmeta])* $fvis $field : $fty ),*
            }
            properties {
                $( $kind $name : $pty ),*
            }
            attributes {}
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $host:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty ),* $(,)?
        }
        properties {
            $( $kind:ident $name:ident : $pty:ty ),* $(,)?
        }
        attributes {
            $( $attr:ident => $display:literal as $coercion:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $host {
            $( $(#[$fmeta])* $fvis $field: $fty, )*
            $( $name: ::core::option::Option<$pty>, )*
            $( $attr: ::core::option::Option<$crate::Scalar>, )*
        }

        impl $host {
            /// Property schema shared by every instance of this type
            pub fn property_schema() -> $crate::Result<&'static $crate::PropertySchema> {
                static SCHEMA: ::std::sync::OnceLock<$crate::Result<$crate::PropertySchema>> =
                    ::std::sync::OnceLock::new();
                SCHEMA
                    .get_or_init(|| -> $crate::Result<$crate::PropertySchema> {
                        let builder = $crate::SchemaBuilder::new();
                        $( let builder = $crate::has_properties!(@declare builder $kind $name)?; )*
                        $(
                            let builder = builder.attribute(
                                stringify!($attr),
                                $display,
                                $crate::Coercion::$coercion,
                            )?;
                        )*
                        Ok(builder.build())
                    })
                    .as_ref()
                    .map_err(::core::clone::Clone::clone)
            }

            $( $crate::has_properties!(@accessor $kind $name $pty); )*

            $(
                $crate::paste::paste! {
                    /// The stored raw value, if set
                    pub fn $attr(&self) -> ::core::option::Option<&$crate::Scalar> {
                        self.$attr.as_ref()
                    }

                    /// Store the raw value; `Nil` leaves the attribute unset
                    pub fn [<set_ $attr>](&mut self, value: impl ::core::convert::Into<$crate::Scalar>) {
                        let value: $crate::Scalar = value.into();
                        self.$attr = if value.is_nil() {
                            ::core::option::Option::None
                        } else {
                            ::core::option::Option::Some(value)
                        };
                    }
                }
            )*
        }

        impl $crate::HasProperties for $host {
            fn schema(&self) -> $crate::Result<&'static $crate::PropertySchema> {
                Self::property_schema()
            }

            #[allow(unused_variables)]
            fn property_slot(&self, name: &str) -> ::core::option::Option<&dyn $crate::Property> {
                $(
                    if name == stringify!($name) {
                        return self.$name.as_ref().map(|property| property as &dyn $crate::Property);
                    }
                )*
                ::core::option::Option::None
            }

            #[allow(unused_variables)]
            fn attribute_slot(&self, name: &str) -> ::core::option::Option<&$crate::Scalar> {
                $(
                    if name == stringify!($attr) {
                        return self.$attr.as_ref();
                    }
                )*
                ::core::option::Option::None
            }
        }
    };

    (@declare $builder:ident value_property $name:ident) => {
        $builder.value_property(stringify!($name))
    };

    (@declare $builder:ident property $name:ident) => {
        $builder.property(stringify!($name))
    };

    (@accessor value_property $name:ident $pty:ty) => {
        $crate::paste::paste! {
            /// The current property, if one was assigned
            pub fn $name(&self) -> ::core::option::Option<&$pty> {
                self.$name.as_ref()
            }

            /// Replace the property with one built from `value`
            ///
            /// Fails with `InvalidArgument` on an absent value, leaving the
            /// current property in place.
            pub fn [<set_ $name>](
                &mut self,
                value: impl ::core::convert::Into<$crate::Scalar>,
            ) -> $crate::Result<()> {
                let property = <$pty as $crate::FromValue>::from_value(value.into())?;
                self.$name = ::core::option::Option::Some(property);
                ::core::result::Result::Ok(())
            }
        }
    };

    (@accessor property $name:ident $pty:ty) => {
        /// The property, created with no arguments on first read
        pub fn $name(&mut self) -> &mut $pty {
            self.$name.get_or_insert_with(::core::default::Default::default)
        }
    };
}
