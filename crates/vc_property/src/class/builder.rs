use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;

use log::warn;
use vc_utils::hash::HashMap;

use crate::Value;
use crate::class::{
    AccessorSet, Class, ClassInfo, FieldInfo, Getter, LazySetter, Method, Setter, Visibility,
};
use crate::format::{Convention, FormatName};

// -----------------------------------------------------------------------------
// ClassBuilder

/// Writes a [`ClassInfo`].
///
/// Created by [`ClassInfo::builder`]. Accessors are registered by property
/// name; their method names are formatted with the class convention in
/// [`build`](Self::build).
///
/// # Inheritance
///
/// [`extends`](Self::extends) makes the built class inherit the parent's
/// convention, fields, methods and accessors. Registrations on the child
/// override the parent's.
///
/// # Examples
///
/// ```
/// use vc_property::class::{Class, ClassInfo, Visibility};
/// use vc_property::Value;
///
/// struct Base;
/// struct Derived;
///
/// impl Class for Base {
///     fn class_info() -> ClassInfo {
///         ClassInfo::builder::<Self>("Base")
///             .camel_case()
///             .private("secret", 1_i32)
///             .getter("secret", |obj| Ok(obj.field("secret").cloned().unwrap_or_else(Value::unit)))
///             .build()
///     }
/// }
///
/// impl Class for Derived {
///     fn class_info() -> ClassInfo {
///         ClassInfo::builder::<Self>("Derived")
///             .extends::<Base>()
///             .protected("level", 2_i32)
///             .build()
///     }
/// }
///
/// let info = Derived::class_info();
/// assert!(info.has_method("getSecret"));
/// assert_eq!(info.fields().len(), 2);
/// assert_eq!(info.fields()[0].visibility(), Visibility::Protected);
/// assert_eq!(info.root().name(), "Base");
/// ```
pub struct ClassBuilder {
    type_id: TypeId,
    name: &'static str,
    convention: Option<Convention>,
    parent: Option<Arc<ClassInfo>>,
    fields: Vec<FieldInfo>,
    methods: Vec<(Box<str>, Method)>,
    accessors: Vec<(&'static str, Method)>,
}

impl ClassBuilder {
    pub(crate) fn new(type_id: TypeId, name: &'static str) -> Self {
        Self {
            type_id,
            name,
            convention: None,
            parent: None,
            fields: Vec::new(),
            methods: Vec::new(),
            accessors: Vec::new(),
        }
    }

    /// Sets the naming convention.
    ///
    /// Defaults to the parent's convention, or [`Convention::Snake`].
    #[inline]
    pub fn convention(mut self, convention: Convention) -> Self {
        self.convention = Some(convention);
        self
    }

    /// Shorthand of `convention(Convention::Camel)`.
    #[inline]
    pub fn camel_case(self) -> Self {
        self.convention(Convention::Camel)
    }

    /// Inherits from `P`.
    #[inline]
    pub fn extends<P: Class>(self) -> Self {
        self.extends_info(Arc::new(P::class_info()))
    }

    /// Inherits from an already built descriptor.
    ///
    /// Useful to share one parent descriptor between several children,
    /// for example one obtained from a [`ClassRegistry`](crate::registry::ClassRegistry).
    #[inline]
    pub fn extends_info(mut self, parent: Arc<ClassInfo>) -> Self {
        self.parent = Some(parent);
        self
    }

    // -------------------------------------------------------------------------
    // Fields

    /// Declares a field with an initial value.
    ///
    /// Declaring the same name twice on one class keeps the last declaration.
    pub fn field(
        self,
        name: &'static str,
        visibility: Visibility,
        default: impl Into<Value>,
    ) -> Self {
        self.push_field(name, visibility, Some(default.into()))
    }

    /// Declares a field that starts unset.
    #[inline]
    pub fn unset_field(self, name: &'static str, visibility: Visibility) -> Self {
        self.push_field(name, visibility, None)
    }

    #[inline]
    pub fn public(self, name: &'static str, default: impl Into<Value>) -> Self {
        self.field(name, Visibility::Public, default)
    }

    #[inline]
    pub fn protected(self, name: &'static str, default: impl Into<Value>) -> Self {
        self.field(name, Visibility::Protected, default)
    }

    #[inline]
    pub fn private(self, name: &'static str, default: impl Into<Value>) -> Self {
        self.field(name, Visibility::Private, default)
    }

    fn push_field(
        mut self,
        name: &'static str,
        visibility: Visibility,
        default: Option<Value>,
    ) -> Self {
        let field = FieldInfo::new(name, visibility, self.name, self.type_id, default);
        if let Some(old) = self.fields.iter_mut().find(|f| f.name() == name) {
            warn!("field `{}::{name}` is declared twice", self.name);
            *old = field;
        } else {
            self.fields.push(field);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Methods

    /// Registers the eager getter of `property`.
    #[inline]
    pub fn getter(mut self, property: &'static str, f: Getter) -> Self {
        self.accessors.push((property, Method::Getter(f)));
        self
    }

    /// Registers the lazy getter of `property`.
    ///
    /// Its result is cached into the field named `property` on first read.
    #[inline]
    pub fn lazy_getter(mut self, property: &'static str, f: Getter) -> Self {
        self.accessors.push((property, Method::LazyGetter(f)));
        self
    }

    /// Registers the eager setter of `property`.
    #[inline]
    pub fn setter(mut self, property: &'static str, f: Setter) -> Self {
        self.accessors.push((property, Method::Setter(f)));
        self
    }

    /// Registers the lazy setter of `property`.
    ///
    /// Its result is stored into the field named `property`.
    #[inline]
    pub fn lazy_setter(mut self, property: &'static str, f: LazySetter) -> Self {
        self.accessors.push((property, Method::LazySetter(f)));
        self
    }

    /// Registers a plain method.
    ///
    /// A plain method never replaces an accessor of the same name.
    #[inline]
    pub fn method(mut self, name: &'static str, f: Getter) -> Self {
        self.methods.push((Box::from(name), Method::Call(f)));
        self
    }

    // -------------------------------------------------------------------------
    // Build

    /// Finishes the descriptor.
    ///
    /// # Panics
    ///
    /// Panics if an ancestor has the same class name. Private storage keys
    /// are qualified by class name and must be unique along a chain.
    pub fn build(self) -> ClassInfo {
        let Self {
            type_id,
            name,
            convention,
            parent,
            fields,
            methods: calls,
            accessors: bindings,
        } = self;

        if let Some(parent) = parent.as_deref()
            && parent.ancestors().any(|ancestor| ancestor.name == name)
        {
            panic!("class `{name}` extends an ancestor with the same name");
        }

        let convention = match (convention, parent.as_deref()) {
            (Some(convention), Some(parent)) => {
                if convention != parent.convention {
                    warn!(
                        "class `{name}` uses {convention:?} names but extends `{}` with {:?} names",
                        parent.name, parent.convention,
                    );
                }
                convention
            }
            (Some(convention), None) => convention,
            (None, Some(parent)) => parent.convention,
            (None, None) => Convention::default(),
        };

        let (mut methods, mut accessors) = match parent.as_deref() {
            Some(parent) => (parent.methods.clone(), parent.accessors.clone()),
            None => (HashMap::default(), HashMap::default()),
        };

        for (property, method) in bindings {
            let Some((kind, lazy)) = method.accessor() else {
                continue;
            };
            let method_name = convention.format_name(property, kind, lazy);
            methods.insert(method_name.into_boxed_str(), method);
            accessors
                .entry(Box::from(property))
                .or_insert(AccessorSet::EMPTY)
                .bind(method);
        }

        for (method_name, method) in calls {
            if methods.get(&method_name).is_some_and(Method::is_accessor) {
                warn!("method `{name}::{method_name}` is shadowed by an accessor");
                continue;
            }
            methods.insert(method_name, method);
        }

        let mut layout = fields.clone();
        if let Some(parent) = parent.as_deref() {
            let inherited = parent.layout.iter().filter(|inherited| {
                inherited.visibility().is_private()
                    || !fields.iter().any(|own| own.name() == inherited.name())
            });
            layout.extend(inherited.cloned());
        }

        ClassInfo {
            type_id,
            name,
            convention,
            parent,
            own_fields: fields,
            layout,
            methods,
            accessors,
        }
    }
}
