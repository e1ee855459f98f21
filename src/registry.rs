// Copyright 2025 Cowboy AI, LLC.

//! Presenter registry: the namespace in which relation presenters resolve
//!
//! Presenters are registered by the type of the subject they wrap, and the
//! registry checks at registration time that each presenter carries the name
//! its subject's type name implies. Resolve-and-wrap then looks the related
//! value's type tag up and builds the registered presenter around a clone of
//! the value.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::errors::{PresenterError, PresenterResult};
use crate::naming::NamingPolicy;
use crate::presentable::Presentable;
use crate::presenter::{Presenter, PresenterBox};

/// Shared handle to a registry; presenters keep one to resolve relations
pub type Namespace = Arc<PresenterRegistry>;

type Constructor =
    Arc<dyn Fn(&dyn Presentable, &Namespace) -> PresenterResult<PresenterBox> + Send + Sync>;

/// A registered presenter for one subject type
struct Registration {
    presenter_name: &'static str,
    subject_type: &'static str,
    construct: Constructor,
}

static GLOBAL: Lazy<Namespace> = Lazy::new(|| Arc::new(PresenterRegistry::new()));

/// Registry of presenters keyed by subject type
///
/// # Examples
///
/// ```rust
/// use cim_presenter::{presentable, presenter, NamingPolicy, PresenterRegistry};
/// use std::sync::Arc;
///
/// #[derive(Debug, Clone)]
/// struct Child { name: String }
/// presentable!(Child);
///
/// presenter! {
///     struct ChildDecorator(Child) {}
/// }
///
/// let policy = NamingPolicy::with_suffix("Decorator").unwrap();
/// let namespace = Arc::new(PresenterRegistry::with_policy(policy).unwrap());
/// namespace.register::<ChildDecorator>().unwrap();
///
/// let child = Child { name: "Ada".into() };
/// let presented = namespace.present(&child).unwrap();
/// assert_eq!(presented.presenter_name(), "ChildDecorator");
/// ```
pub struct PresenterRegistry {
    policy: NamingPolicy,
    by_type: DashMap<TypeId, Registration>,
    by_name: DashMap<String, TypeId>,
}

impl PresenterRegistry {
    /// Create an empty registry with the default naming policy
    pub fn new() -> Self {
        Self {
            policy: NamingPolicy::default(),
            by_type: DashMap::new(),
            by_name: DashMap::new(),
        }
    }

    /// Create an empty registry with a custom naming policy
    ///
    /// # Errors
    ///
    /// Returns an error if the policy does not validate
    pub fn with_policy(policy: NamingPolicy) -> PresenterResult<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            ..Self::new()
        })
    }

    /// The process-wide namespace used by `Presenter::new`
    pub fn global() -> Namespace {
        Arc::clone(&GLOBAL)
    }

    /// Naming policy of this namespace
    pub fn policy(&self) -> &NamingPolicy {
        &self.policy
    }

    /// Presenter name this namespace expects for a runtime type name
    pub fn presenter_name_for(&self, type_name: &str) -> String {
        self.policy.presenter_name_for(type_name)
    }

    /// Register presenter `P` for its subject type
    ///
    /// # Errors
    ///
    /// - `ConventionMismatch` if `P::NAME` is not the name the naming policy
    ///   derives from the subject's type name
    /// - `AlreadyRegistered` if the subject type, or another type with the
    ///   same presenter name, already has a presenter
    pub fn register<P: Presenter>(&self) -> PresenterResult<()> {
        let subject_type = <P::Subject as Presentable>::static_type_name();
        let expected = self.presenter_name_for(subject_type);
        if P::NAME != expected {
            return Err(PresenterError::ConventionMismatch {
                presenter: P::NAME.to_string(),
                expected,
            });
        }

        let type_id = TypeId::of::<P::Subject>();
        let name_entry = match self.by_name.entry(expected) {
            Entry::Occupied(_) => {
                return Err(PresenterError::AlreadyRegistered(P::NAME.to_string()));
            }
            Entry::Vacant(entry) => entry,
        };
        match self.by_type.entry(type_id) {
            Entry::Occupied(_) => {
                return Err(PresenterError::AlreadyRegistered(P::NAME.to_string()));
            }
            Entry::Vacant(entry) => {
                entry.insert(Registration {
                    presenter_name: P::NAME,
                    subject_type,
                    construct: Arc::new(construct::<P>),
                });
            }
        }
        name_entry.insert(type_id);

        debug!(presenter = P::NAME, subject = subject_type, "registered presenter");
        Ok(())
    }

    /// Check whether values of type `T` have a presenter
    pub fn is_registered<T: Presentable>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Check whether a presenter with this name is registered
    pub fn is_registered_name(&self, presenter_name: &str) -> bool {
        self.by_name.contains_key(presenter_name)
    }

    /// Subject type name served by a registered presenter name
    pub fn subject_type_of(&self, presenter_name: &str) -> Option<&'static str> {
        let type_id = *self.by_name.get(presenter_name)?;
        self.by_type.get(&type_id).map(|r| r.subject_type)
    }

    /// Names of all registered presenters, sorted
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .by_type
            .iter()
            .map(|r| r.value().presenter_name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Number of registered presenters
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Resolve-and-wrap: build the registered presenter around a clone of `value`
    ///
    /// A fresh presenter is built on every call.
    ///
    /// # Errors
    ///
    /// `NameResolution` if no presenter is registered for the value's type.
    /// When the conventional name is taken by a presenter for another type,
    /// the error names that type.
    pub fn present(self: &Arc<Self>, value: &dyn Presentable) -> PresenterResult<PresenterBox> {
        let type_id = Any::type_id(value.as_any());
        let build = self.by_type.get(&type_id).map(|r| Arc::clone(&r.construct));

        match build {
            Some(build) => {
                let presenter = build(value, self)?;
                debug!(
                    presenter = presenter.presenter_name(),
                    subject = value.type_name(),
                    "resolved presenter"
                );
                Ok(presenter)
            }
            None => {
                let presenter_name = self.presenter_name_for(value.type_name());
                match self.subject_type_of(&presenter_name) {
                    Some(served) => {
                        warn!(
                            presenter = %presenter_name,
                            subject = value.type_name(),
                            registered_for = served,
                            "presenter name serves another type"
                        );
                        Err(PresenterError::name_registered_for(
                            value.type_name(),
                            presenter_name,
                            served,
                        ))
                    }
                    None => {
                        warn!(
                            presenter = %presenter_name,
                            subject = value.type_name(),
                            "no presenter registered"
                        );
                        Err(PresenterError::name_resolution(value.type_name(), presenter_name))
                    }
                }
            }
        }
    }
}

fn construct<P: Presenter>(value: &dyn Presentable, namespace: &Namespace) -> PresenterResult<PresenterBox> {
    let subject = value
        .as_any()
        .downcast_ref::<P::Subject>()
        .ok_or_else(|| PresenterError::SubjectMismatch {
            expected: P::NAME.to_string(),
            found: value.type_name().to_string(),
        })?;
    Ok(PresenterBox::new(P::within(subject.clone(), Arc::clone(namespace))))
}

impl Default for PresenterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PresenterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterRegistry")
            .field("policy", &self.policy)
            .field("presenters", &self.registered_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{presentable, presenter};

    #[derive(Debug, Clone, PartialEq)]
    struct Child {
        name: String,
    }
    presentable!(Child);

    #[derive(Debug, Clone, PartialEq)]
    struct Kids(Vec<String>);
    presentable!(Kids as "Children");

    #[derive(Debug, Clone, PartialEq)]
    struct Orphan;
    presentable!(Orphan);

    presenter! {
        struct ChildPresenter(Child) {}
    }

    presenter! {
        struct ChildrenPresenter(Kids) {}
    }

    presenter! {
        struct KidPresenter(Child) {}
    }

    mod other {
        #[derive(Debug, Clone)]
        pub struct Child;
        crate::presentable!(Child);

        crate::presenter! {
            pub struct ChildPresenter(Child) {}
        }
    }

    fn namespace() -> Namespace {
        Arc::new(PresenterRegistry::new())
    }

    #[test]
    fn test_register_and_present() {
        let ns = namespace();
        ns.register::<ChildPresenter>().unwrap();

        assert!(ns.is_registered::<Child>());
        assert!(ns.is_registered_name("ChildPresenter"));
        assert_eq!(ns.subject_type_of("ChildPresenter"), Some("Child"));
        assert_eq!(ns.len(), 1);

        let child = Child {
            name: "Grace".to_string(),
        };
        let presented = ns.present(&child).unwrap();
        let presenter = presented.downcast_ref::<ChildPresenter>().unwrap();
        assert_eq!(presenter.subject(), &child);
        assert!(Arc::ptr_eq(presenter.namespace(), &ns));
    }

    #[test]
    fn test_convention_is_checked_at_registration() {
        let ns = namespace();
        let err = ns.register::<KidPresenter>().unwrap_err();
        assert_eq!(
            err,
            PresenterError::ConventionMismatch {
                presenter: "KidPresenter".to_string(),
                expected: "ChildPresenter".to_string(),
            }
        );
        assert!(ns.is_empty());
    }

    #[test]
    fn test_plural_type_name_is_singularized() {
        let ns = namespace();
        let err = ns.register::<ChildrenPresenter>().unwrap_err();
        assert!(err.is_registration_error());
        assert_eq!(ns.presenter_name_for("Children"), "ChildPresenter");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let ns = namespace();
        ns.register::<ChildPresenter>().unwrap();
        assert_eq!(
            ns.register::<ChildPresenter>(),
            Err(PresenterError::AlreadyRegistered("ChildPresenter".to_string()))
        );
        // A different type answering to the same presenter name is rejected too.
        assert!(matches!(
            ns.register::<other::ChildPresenter>(),
            Err(PresenterError::AlreadyRegistered(_))
        ));
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_unregistered_type_fails_resolution() {
        let ns = namespace();
        ns.register::<ChildPresenter>().unwrap();

        let err = ns.present(&Orphan).unwrap_err();
        assert_eq!(err, PresenterError::name_resolution("Orphan", "OrphanPresenter"));
    }

    #[test]
    fn test_resolution_error_names_type_served_by_presenter_name() {
        let ns = namespace();
        ns.register::<ChildPresenter>().unwrap();

        // `Kids` reports the type name `Children`, whose presenter name is taken.
        let err = ns.present(&Kids(vec!["Ada".to_string()])).unwrap_err();
        assert_eq!(
            err,
            PresenterError::name_registered_for("Children", "ChildPresenter", "Child")
        );
        assert!(err.is_resolution_error());
        assert_eq!(
            err.to_string(),
            "Name resolution failed: ChildPresenter is registered for Child, not Children"
        );
    }

    #[test]
    fn test_presenters_are_fresh_per_call() {
        let ns = namespace();
        ns.register::<ChildPresenter>().unwrap();
        let child = Child {
            name: "Alan".to_string(),
        };

        let first = ns.present(&child).unwrap();
        let second = ns.present(&child).unwrap();
        let first = first.downcast_ref::<ChildPresenter>().unwrap();
        let second = second.downcast_ref::<ChildPresenter>().unwrap();
        assert!(!std::ptr::eq(first.subject(), second.subject()));
        assert_eq!(first.subject(), second.subject());
    }

    #[test]
    fn test_custom_policy() {
        let policy = NamingPolicy::with_suffix("View").unwrap();
        let ns = Arc::new(PresenterRegistry::with_policy(policy).unwrap());
        assert!(ns.register::<ChildPresenter>().unwrap_err().is_registration_error());
        assert_eq!(ns.presenter_name_for("OnlyChild"), "OnlyChildView");

        let bad = NamingPolicy {
            suffix: String::new(),
            singularize: true,
        };
        assert!(PresenterRegistry::with_policy(bad).is_err());
    }

    #[test]
    fn test_registered_names() {
        let ns = namespace();
        ns.register::<other::ChildPresenter>().unwrap();
        assert_eq!(ns.registered_names(), vec!["ChildPresenter".to_string()]);
        assert!(format!("{:?}", ns).contains("ChildPresenter"));
    }

    #[test]
    fn test_construct_rejects_foreign_subject() {
        let ns = namespace();
        let err = construct::<ChildPresenter>(&Orphan, &ns).unwrap_err();
        assert_eq!(
            err,
            PresenterError::SubjectMismatch {
                expected: "ChildPresenter".to_string(),
                found: "Orphan".to_string(),
            }
        );
    }
}
