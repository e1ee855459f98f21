// Copyright 2025 Cowboy AI, LLC.

//! # CIM Presenter
//!
//! Presenters wrap a single domain value (the *subject*) to add view-oriented
//! behavior without touching the domain type.
//!
//! - **Delegation**: a presenter derefs to its subject, so everything it does
//!   not declare is answered by the subject. [`AnyPresenter::call`] offers the
//!   same fallback for name-based calls.
//! - **Passthrough** (`presents lesson;`): exposes the subject under a
//!   domain-meaningful accessor.
//! - **Relations** (`presents_one author;`, `presents_many steps;`): wrap
//!   related values in their own presenters, resolved by naming convention.
//!   A value of type `Children` resolves to `ChildPresenter`.
//!
//! ## Design Principles
//!
//! 1. **Explicit registry**: presenters are registered per subject type at
//!    startup; names are checked against the convention when registering
//! 2. **Strict failure**: a relation without a registered presenter is a
//!    [`PresenterError::NameResolution`], never a silent fallback
//! 3. **Ownership**: each presenter owns its subject; relation presenters are
//!    built fresh from clones on every call
//!
//! ```rust
//! use cim_presenter::{presentable, presenter, PresenterRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone)]
//! struct Child { name: String }
//! presentable!(Child);
//!
//! #[derive(Debug, Clone)]
//! struct Parent { children: Vec<Child>, only_child: Child }
//! presentable!(Parent);
//!
//! impl Parent {
//!     fn children(&self) -> &[Child] { &self.children }
//!     fn only_child(&self) -> &Child { &self.only_child }
//! }
//!
//! presenter! {
//!     struct ChildPresenter(Child) {}
//! }
//!
//! presenter! {
//!     struct ParentPresenter(Parent) {
//!         presents parent;
//!         presents_many children;
//!         presents_one only_child;
//!     }
//! }
//!
//! let namespace = Arc::new(PresenterRegistry::new());
//! namespace.register::<ChildPresenter>().unwrap();
//!
//! let ada = Child { name: "Ada".into() };
//! let parent = Parent { children: vec![ada.clone()], only_child: ada };
//! let presenter = ParentPresenter::within(parent, namespace);
//!
//! assert_eq!(presenter.children().unwrap().len(), 1);
//! assert!(presenter.only_child().unwrap().is::<ChildPresenter>());
//! ```

#![warn(missing_docs)]

mod errors;
pub mod inflector;
mod naming;
pub mod presentable;
pub mod presenter;
mod registry;

pub use errors::{PresenterError, PresenterResult};
pub use naming::{NamingPolicy, DEFAULT_SUFFIX};
pub use presentable::{short_type_name, AttributeValue, Presentable, Related};
pub use presenter::{AnyPresenter, Member, MemberKind, Presented, Presenter, PresenterBox};
pub use registry::{Namespace, PresenterRegistry};
