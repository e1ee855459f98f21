// Copyright 2025 Cowboy AI, LLC.

//! Domain values that presenters can wrap

use std::any::Any;
use std::fmt::Debug;

use serde::Serialize;

use crate::inflector::demodulize;

/// Value returned by dynamic attribute lookups
pub type AttributeValue = serde_json::Value;

/// Trait for domain values that can be wrapped by a presenter
///
/// The runtime type name drives presenter resolution, so a value of type
/// `Children` resolves to `ChildPresenter` under the default naming policy.
/// Both `type_name` and `static_type_name` default to the unqualified Rust
/// type name; override them together (the [`presentable!`](crate::presentable!)
/// macro does this with its `as "Name"` form).
///
/// # Example
///
/// ```
/// use cim_presenter::Presentable;
/// use std::any::Any;
///
/// #[derive(Debug, Clone)]
/// struct Lesson { title: String }
///
/// impl Presentable for Lesson {
///     fn as_any(&self) -> &dyn Any { self }
///     fn clone_box(&self) -> Box<dyn Presentable> { Box::new(self.clone()) }
/// }
///
/// let lesson = Lesson { title: "Ownership".into() };
/// assert_eq!(lesson.type_name(), "Lesson");
/// ```
pub trait Presentable: Any + Send + Sync + Debug {
    /// Get the value as Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Clone the value into a box
    fn clone_box(&self) -> Box<dyn Presentable>;

    /// Runtime type name used for presenter resolution
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Type name known without an instance; must agree with `type_name`
    fn static_type_name() -> &'static str
    where
        Self: Sized,
    {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Named attribute lookup used when a presenter forwards a call it does
    /// not declare itself
    fn attribute(&self, _name: &str) -> Option<AttributeValue> {
        None
    }
}

impl Clone for Box<dyn Presentable> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Borrow anything that stands for a presentable value as `&dyn Presentable`
///
/// Relation accessors call this on whatever the subject returns, so a relation
/// may yield concrete values, references to them, or boxed trait objects.
pub trait Related {
    /// View this value as a presentable trait object
    fn as_presentable(&self) -> &dyn Presentable;
}

impl<T: Presentable> Related for T {
    fn as_presentable(&self) -> &dyn Presentable {
        self
    }
}

impl Related for Box<dyn Presentable> {
    fn as_presentable(&self) -> &dyn Presentable {
        self.as_ref()
    }
}

/// Unqualified type name without module path or generic arguments
///
/// `alloc::vec::Vec<my_app::Lesson>` becomes `Vec`.
pub fn short_type_name(full: &'static str) -> &'static str {
    let without_generics = full.split('<').next().unwrap_or(full);
    demodulize(without_generics)
}

/// Answer an attribute lookup from a value's serde representation
///
/// Object fields are returned by name; any other shape has no attributes.
pub fn serialized_attribute<T: Serialize + ?Sized>(value: &T, name: &str) -> Option<AttributeValue> {
    match serde_json::to_value(value) {
        Ok(AttributeValue::Object(mut fields)) => fields.remove(name),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(attribute = name, error = %err, "attribute lookup failed to serialize subject");
            None
        }
    }
}

/// Implement [`Presentable`] for a `Clone` domain type
///
/// ```rust
/// use cim_presenter::{presentable, Presentable};
/// use serde::Serialize;
///
/// #[derive(Debug, Clone, Serialize)]
/// struct Lesson { title: String }
/// presentable!(Lesson, serialize);
///
/// #[derive(Debug, Clone)]
/// struct Kids(Vec<String>);
/// presentable!(Kids as "Children");
///
/// let lesson = Lesson { title: "Traits".into() };
/// assert_eq!(lesson.attribute("title"), Some(serde_json::json!("Traits")));
/// assert_eq!(Kids(vec![]).type_name(), "Children");
/// ```
#[macro_export]
macro_rules! presentable {
    (@attribute serialize) => {
        fn attribute(&self, name: &str) -> ::std::option::Option<$crate::AttributeValue> {
            $crate::presentable::serialized_attribute(self, name)
        }
    };

    ($ty:ty $(as $name:literal)? $(, $flag:ident)?) => {
        impl $crate::Presentable for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn clone_box(&self) -> ::std::boxed::Box<dyn $crate::Presentable> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            $(
                fn type_name(&self) -> &'static str {
                    $name
                }

                fn static_type_name() -> &'static str {
                    $name
                }
            )?

            $( $crate::presentable!(@attribute $flag); )?
        }
    };
}
