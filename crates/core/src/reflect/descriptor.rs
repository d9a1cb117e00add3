//! Statically declared type metadata.
//!
//! Every type that takes part in interception publishes a [`TypeDescriptor`]
//! describing its markers, its declared methods and the interfaces it implements.
//! Descriptors are built once, usually inside a `OnceLock` behind [`Reflect`].

use std::collections::HashSet;

/// Payload-free tag attachable to a type or to a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Request before/after logging around every call of the type
    Logged,
}

/// Whether a descriptor describes a concrete type or a call surface only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
}

/// Metadata for a single declared method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    name: &'static str,
    markers: Vec<Marker>,
}

impl MethodDescriptor {
    /// Create a new method descriptor without markers
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            markers: Vec::new(),
        }
    }

    /// Attach a marker to this method
    pub fn marked(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}

/// Metadata for a type: markers, declared methods, interfaces and supertype
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: &'static str,
    kind: TypeKind,
    markers: Vec<Marker>,
    methods: Vec<MethodDescriptor>,
    interfaces: Vec<TypeDescriptor>,
    supertype: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Create a descriptor for a concrete type
    pub fn class(name: &'static str) -> Self {
        Self::with_kind(name, TypeKind::Class)
    }

    /// Create a descriptor for an interface
    pub fn interface(name: &'static str) -> Self {
        Self::with_kind(name, TypeKind::Interface)
    }

    fn with_kind(name: &'static str, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            markers: Vec::new(),
            methods: Vec::new(),
            interfaces: Vec::new(),
            supertype: None,
        }
    }

    /// Attach a type-level marker
    pub fn marked(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    /// Declare a method
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare an implemented interface
    pub fn implements(mut self, interface: TypeDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Declare the supertype this type extends
    pub fn extends(mut self, supertype: TypeDescriptor) -> Self {
        self.supertype = Some(Box::new(supertype));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn supertype(&self) -> Option<&TypeDescriptor> {
        self.supertype.as_deref()
    }

    /// Check for a type-level marker, including markers inherited from supertypes
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
            || self
                .supertype()
                .map(|parent| parent.has_marker(marker))
                .unwrap_or(false)
    }

    /// Methods declared directly on this type
    pub fn declared_methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Methods declared on this type and its supertypes. A supertype method is
    /// skipped when a subtype declares a method with the same name.
    pub fn unique_methods(&self) -> Vec<&MethodDescriptor> {
        let mut seen = HashSet::new();
        let mut methods = Vec::new();
        let mut current = Some(self);

        while let Some(ty) = current {
            for method in &ty.methods {
                if seen.insert(method.name()) {
                    methods.push(method);
                }
            }
            current = ty.supertype();
        }

        methods
    }

    /// Find a method by name on this type or one of its supertypes
    pub fn find_method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.unique_methods()
            .into_iter()
            .find(|method| method.name() == name)
    }

    /// Interfaces implemented by this type, including those of its supertypes
    pub fn interfaces(&self) -> Vec<&TypeDescriptor> {
        let mut interfaces: Vec<&TypeDescriptor> = self.interfaces.iter().collect();
        if let Some(parent) = self.supertype() {
            for interface in parent.interfaces() {
                if !interfaces.iter().any(|known| known.name() == interface.name()) {
                    interfaces.push(interface);
                }
            }
        }
        interfaces
    }

    /// Check whether this type is, extends or implements the named type
    pub fn is_assignable_to(&self, name: &str) -> bool {
        self.name == name
            || self
                .interfaces()
                .iter()
                .any(|interface| interface.is_assignable_to(name))
            || self
                .supertype()
                .map(|parent| parent.is_assignable_to(name))
                .unwrap_or(false)
    }
}

/// Types that publish static metadata about themselves
pub trait Reflect: 'static {
    fn type_descriptor() -> &'static TypeDescriptor;
}
