// Copyright 2025 Cowboy AI, LLC.

//! The presenter base: delegation, declared members and the `presenter!` macro
//!
//! A presenter owns exactly one subject. Everything the presenter does not
//! declare itself is forwarded to the subject:
//!
//! - statically, through `Deref<Target = Subject>` and `DerefMut`, so subject
//!   methods (including `&mut self` ones) can be called on the presenter and a
//!   capability missing on both is a compile error;
//! - dynamically, through [`AnyPresenter::call`], which checks the declared
//!   members first and then the subject's [`Presentable::attribute`].

use std::any::Any;
use std::fmt;
use std::ops::Deref;

use tracing::warn;

use crate::errors::{PresenterError, PresenterResult};
use crate::presentable::{AttributeValue, Presentable};
use crate::registry::{Namespace, PresenterRegistry};

/// How a declared member answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Returns the subject itself under a domain name
    Passthrough,
    /// Wraps a single related value in its presenter
    One,
    /// Wraps every element of a related collection in its presenter
    Many,
}

/// A member declared on a presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Member {
    /// Accessor name
    pub name: &'static str,
    /// What the accessor returns
    pub kind: MemberKind,
}

/// Result of a dynamic call on a presenter
#[derive(Debug)]
pub enum Presented<'a> {
    /// The subject, from a passthrough member
    Subject(&'a dyn Presentable),
    /// A presenter for a single related value
    One(PresenterBox),
    /// Presenters for a related collection, in source order
    Many(Vec<PresenterBox>),
    /// An attribute forwarded from the subject
    Value(AttributeValue),
}

impl<'a> Presented<'a> {
    /// The subject, if this came from a passthrough member
    pub fn as_subject(&self) -> Option<&'a dyn Presentable> {
        match self {
            Presented::Subject(subject) => Some(*subject),
            _ => None,
        }
    }

    /// The forwarded attribute value, if any
    pub fn as_value(&self) -> Option<&AttributeValue> {
        match self {
            Presented::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Take the single related presenter
    pub fn into_one(self) -> Option<PresenterBox> {
        match self {
            Presented::One(presenter) => Some(presenter),
            _ => None,
        }
    }

    /// Take the related presenters
    pub fn into_many(self) -> Option<Vec<PresenterBox>> {
        match self {
            Presented::Many(presenters) => Some(presenters),
            _ => None,
        }
    }
}

/// Object-safe view of any presenter
pub trait AnyPresenter: Any + Send + Sync + fmt::Debug {
    /// The presenter's type name, e.g. `LessonPresenter`
    fn presenter_name(&self) -> &'static str;

    /// The wrapped subject
    fn presentable(&self) -> &dyn Presentable;

    /// Members declared on this presenter, in declaration order
    fn members(&self) -> &'static [Member];

    /// Get the presenter as Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Convert a boxed presenter into a boxed Any for owned downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// Answer a member by name, falling back to the subject's attributes
    ///
    /// # Errors
    ///
    /// `MissingCapability` when neither a declared member nor a subject
    /// attribute has that name, or any resolution error raised by a relation
    /// member.
    fn call(&self, name: &str) -> PresenterResult<Presented<'_>>;
}

/// The presenter base implemented by every declared presenter
///
/// Use the [`presenter!`](crate::presenter!) macro rather than implementing
/// this by hand.
pub trait Presenter: AnyPresenter + Sized {
    /// Presenter type name; must follow the naming convention for `Subject`
    const NAME: &'static str;

    /// Type of the wrapped value
    type Subject: Presentable + Clone;

    /// Wrap a subject, resolving relations in `namespace`
    fn within(subject: Self::Subject, namespace: Namespace) -> Self;

    /// Wrap a subject, resolving relations in the global namespace
    fn new(subject: Self::Subject) -> Self {
        Self::within(subject, PresenterRegistry::global())
    }

    /// The wrapped subject
    fn subject(&self) -> &Self::Subject;

    /// Unwrap the subject
    fn into_subject(self) -> Self::Subject;

    /// Namespace used for relation lookups
    fn namespace(&self) -> &Namespace;
}

/// A presenter produced by resolve-and-wrap
///
/// Relations resolve by runtime type, so their presenters come back boxed.
/// Downcast to the concrete presenter to use its typed accessors.
pub struct PresenterBox(Box<dyn AnyPresenter>);

impl PresenterBox {
    /// Box a presenter
    pub fn new<P: AnyPresenter>(presenter: P) -> Self {
        Self(Box::new(presenter))
    }

    /// Check the concrete presenter type
    pub fn is<P: AnyPresenter>(&self) -> bool {
        self.0.as_any().is::<P>()
    }

    /// Borrow as a concrete presenter
    pub fn downcast_ref<P: AnyPresenter>(&self) -> Option<&P> {
        self.0.as_any().downcast_ref::<P>()
    }

    /// Take the concrete presenter; `None` if it is another presenter type
    ///
    /// Check with [`is`](Self::is) first to keep the box on a mismatch.
    pub fn downcast<P: AnyPresenter>(self) -> Option<P> {
        self.0
            .into_any()
            .downcast::<P>()
            .ok()
            .map(|presenter| *presenter)
    }
}

impl Deref for PresenterBox {
    type Target = dyn AnyPresenter;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for PresenterBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Forward an undeclared call to the subject's attributes
///
/// This is the fallback used by every generated [`AnyPresenter::call`].
pub fn forward<'a>(
    presenter: &'static str,
    subject: &'a dyn Presentable,
    name: &str,
) -> PresenterResult<Presented<'a>> {
    match subject.attribute(name) {
        Some(value) => Ok(Presented::Value(value)),
        None => {
            warn!(
                presenter,
                capability = name,
                subject = subject.type_name(),
                "call answered by neither presenter nor subject"
            );
            Err(PresenterError::missing_capability(presenter, name))
        }
    }
}

/// Declare a presenter for a domain type
///
/// The presenter exposes its subject type through `Presenter::Subject`, so it
/// cannot be more visible than the subject: a `pub` presenter needs a `pub`
/// subject.
///
/// ```rust
/// use cim_presenter::{presentable, presenter, Presenter, PresenterRegistry};
/// use std::sync::Arc;
///
/// #[derive(Debug, Clone)]
/// struct Step { title: String }
/// presentable!(Step);
///
/// #[derive(Debug, Clone)]
/// struct Lesson { title: String, steps: Vec<Step> }
/// presentable!(Lesson);
///
/// impl Lesson {
///     fn steps(&self) -> &[Step] { &self.steps }
/// }
///
/// presenter! {
///     struct StepPresenter(Step) {}
/// }
///
/// presenter! {
///     /// Lessons as shown to students
///     struct LessonPresenter(Lesson) {
///         presents lesson;
///         presents_many steps;
///     }
/// }
///
/// impl LessonPresenter {
///     fn heading(&self) -> String {
///         self.lesson().title.to_uppercase()
///     }
/// }
///
/// let namespace = Arc::new(PresenterRegistry::new());
/// namespace.register::<StepPresenter>().unwrap();
///
/// let lesson = Lesson {
///     title: "Traits".into(),
///     steps: vec![Step { title: "Define".into() }, Step { title: "Implement".into() }],
/// };
/// let presenter = LessonPresenter::within(lesson, namespace);
///
/// assert_eq!(presenter.heading(), "TRAITS");
/// assert_eq!(presenter.title, "Traits"); // forwarded to the subject
///
/// let steps = presenter.steps().unwrap();
/// let first = steps[0].downcast_ref::<StepPresenter>().unwrap();
/// assert_eq!(first.title, "Define");
/// ```
#[macro_export]
macro_rules! presenter {
    (@member presents $member:ident, $subject:ty) => {
        /// Returns the wrapped subject
        pub fn $member(&self) -> &$subject {
            &self.subject
        }
    };

    (@member presents_one $member:ident, $subject:ty) => {
        /// Wraps the related value in its presenter
        pub fn $member(&self) -> $crate::PresenterResult<$crate::PresenterBox> {
            #[allow(unused_imports)]
            use $crate::Related as _;
            let related = self.subject.$member();
            self.namespace.present(related.as_presentable())
        }
    };

    (@member presents_many $member:ident, $subject:ty) => {
        /// Wraps every related value in its presenter, preserving order
        pub fn $member(
            &self,
        ) -> $crate::PresenterResult<::std::vec::Vec<$crate::PresenterBox>> {
            #[allow(unused_imports)]
            use $crate::Related as _;
            ::std::iter::IntoIterator::into_iter(self.subject.$member())
                .map(|related| self.namespace.present(related.as_presentable()))
                .collect()
        }
    };

    (@member $other:ident $member:ident, $subject:ty) => {
        ::std::compile_error!(::std::concat!(
            "unknown presenter declaration `",
            ::std::stringify!($other),
            "`; expected `presents`, `presents_one` or `presents_many`"
        ));
    };

    (@kind presents) => { $crate::MemberKind::Passthrough };
    (@kind presents_one) => { $crate::MemberKind::One };
    (@kind presents_many) => { $crate::MemberKind::Many };

    (@call $this:ident, presents, $member:ident) => {
        ::std::result::Result::Ok($crate::Presented::Subject(&$this.subject))
    };
    (@call $this:ident, presents_one, $member:ident) => {
        $this.$member().map($crate::Presented::One)
    };
    (@call $this:ident, presents_many, $member:ident) => {
        $this.$member().map($crate::Presented::Many)
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($subject:ty) {
            $($kind:ident $member:ident;)*
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            subject: $subject,
            namespace: $crate::Namespace,
        }

        impl $name {
            /// Wrap a subject, resolving relations in the global namespace
            pub fn new(subject: $subject) -> Self {
                <Self as $crate::Presenter>::new(subject)
            }

            /// Wrap a subject, resolving relations in `namespace`
            pub fn within(subject: $subject, namespace: $crate::Namespace) -> Self {
                Self { subject, namespace }
            }

            $( $crate::presenter!(@member $kind $member, $subject); )*
        }

        impl $crate::Presenter for $name {
            const NAME: &'static str = ::std::stringify!($name);
            type Subject = $subject;

            fn within(subject: $subject, namespace: $crate::Namespace) -> Self {
                Self { subject, namespace }
            }

            fn subject(&self) -> &$subject {
                &self.subject
            }

            fn into_subject(self) -> $subject {
                self.subject
            }

            fn namespace(&self) -> &$crate::Namespace {
                &self.namespace
            }
        }

        impl $crate::AnyPresenter for $name {
            fn presenter_name(&self) -> &'static str {
                ::std::stringify!($name)
            }

            fn presentable(&self) -> &dyn $crate::Presentable {
                &self.subject
            }

            fn members(&self) -> &'static [$crate::Member] {
                &[$(
                    $crate::Member {
                        name: ::std::stringify!($member),
                        kind: $crate::presenter!(@kind $kind),
                    },
                )*]
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::std::any::Any + ::std::marker::Send + ::std::marker::Sync> {
                self
            }

            fn call(&self, name: &str) -> $crate::PresenterResult<$crate::Presented<'_>> {
                $(
                    if name == ::std::stringify!($member) {
                        return $crate::presenter!(@call self, $kind, $member);
                    }
                )*
                $crate::presenter::forward(::std::stringify!($name), &self.subject, name)
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $subject;

            fn deref(&self) -> &$subject {
                &self.subject
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $subject {
                &mut self.subject
            }
        }

        impl ::std::convert::AsRef<$subject> for $name {
            fn as_ref(&self) -> &$subject {
                &self.subject
            }
        }

        impl ::std::convert::AsMut<$subject> for $name {
            fn as_mut(&mut self) -> &mut $subject {
                &mut self.subject
            }
        }

        impl ::std::clone::Clone for $name {
            fn clone(&self) -> Self {
                Self {
                    subject: ::std::clone::Clone::clone(&self.subject),
                    namespace: ::std::sync::Arc::clone(&self.namespace),
                }
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(::std::stringify!($name))
                    .field("subject", &self.subject)
                    .finish_non_exhaustive()
            }
        }
    };
}
