use crate::reflect::{Marker, TypeDescriptor};

/// Decide whether calls on a type should be intercepted.
///
/// True when the type carries [`Marker::Logged`] (directly or through its
/// supertype) or when any of its unique declared methods does. An absent type
/// never matches.
pub fn matches(ty: Option<&TypeDescriptor>) -> bool {
    match ty {
        Some(ty) => {
            ty.has_marker(Marker::Logged)
                || ty
                    .unique_methods()
                    .iter()
                    .any(|method| method.has_marker(Marker::Logged))
        }
        None => false,
    }
}

/// Interception decision recorded for a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptionPolicy {
    Intercept,
    Passthrough,
}

impl InterceptionPolicy {
    pub fn for_type(ty: Option<&TypeDescriptor>) -> Self {
        if matches(ty) {
            Self::Intercept
        } else {
            Self::Passthrough
        }
    }

    pub fn is_intercepted(&self) -> bool {
        *self == Self::Intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::MethodDescriptor;

    #[test]
    fn test_absent_type_never_matches() {
        assert!(!matches(None));
        assert_eq!(InterceptionPolicy::for_type(None), InterceptionPolicy::Passthrough);
    }

    #[test]
    fn test_type_marker_matches() {
        let ty = TypeDescriptor::class("Service").marked(Marker::Logged);
        assert!(matches(Some(&ty)));
        assert!(InterceptionPolicy::for_type(Some(&ty)).is_intercepted());
    }

    #[test]
    fn test_method_marker_matches() {
        let ty = TypeDescriptor::class("Greeter")
            .method(MethodDescriptor::new("wave"))
            .method(MethodDescriptor::new("greet").marked(Marker::Logged));
        assert!(matches(Some(&ty)));
    }

    #[test]
    fn test_unmarked_type_does_not_match() {
        let ty = TypeDescriptor::class("Cart").method(MethodDescriptor::new("add"));
        assert!(!matches(Some(&ty)));
        assert!(!InterceptionPolicy::for_type(Some(&ty)).is_intercepted());
    }

    #[test]
    fn test_inherited_markers_match() {
        let marked_parent = TypeDescriptor::class("Base").marked(Marker::Logged);
        let child = TypeDescriptor::class("Child").extends(marked_parent);
        assert!(matches(Some(&child)));

        let parent_with_method = TypeDescriptor::class("Base")
            .method(MethodDescriptor::new("load").marked(Marker::Logged));
        let child = TypeDescriptor::class("Child").extends(parent_with_method);
        assert!(matches(Some(&child)));
    }

    #[test]
    fn test_shadowed_marked_method_does_not_match() {
        let parent = TypeDescriptor::class("Base")
            .method(MethodDescriptor::new("load").marked(Marker::Logged));
        let child = TypeDescriptor::class("Child")
            .extends(parent)
            .method(MethodDescriptor::new("load"));
        assert!(!matches(Some(&child)));
    }

    #[test]
    fn test_interface_markers_are_ignored() {
        let interface = TypeDescriptor::interface("Auditable").marked(Marker::Logged);
        let ty = TypeDescriptor::class("Ledger").implements(interface);
        assert!(!matches(Some(&ty)));
    }

    #[test]
    fn test_matching_is_repeatable() {
        let ty = TypeDescriptor::class("Greeter")
            .method(MethodDescriptor::new("greet").marked(Marker::Logged));
        let first = matches(Some(&ty));
        assert!((0..10).all(|_| matches(Some(&ty)) == first));
    }
}
