use alloc::vec::Vec;

use crate::class::{ClassInfo, FieldInfo};
use crate::format::AccessorKind;

// -----------------------------------------------------------------------------
// Private fields

/// Collects the non-public fields declared by `class` and its ancestors,
/// most-derived level first.
pub(crate) fn collect_private_fields(class: &ClassInfo) -> Vec<FieldInfo> {
    class
        .ancestors()
        .flat_map(ClassInfo::own_fields)
        .filter(|field| !field.visibility().is_public())
        .cloned()
        .collect()
}

// -----------------------------------------------------------------------------
// Facade fields

/// The façade fields of a class.
///
/// A façade field is a non-public field with both an eager getter and an
/// eager setter. Entries keep the order of
/// [`resolve_private_fields`](super::ClassRegistry::resolve_private_fields);
/// when several levels declare the same name, the most-derived one is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacadeFields(Vec<FieldInfo>);

impl FacadeFields {
    #[inline]
    pub fn get(&self, name: &str) -> Option<&FieldInfo> {
        self.0.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldInfo> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(FieldInfo::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a FacadeFields {
    type Item = &'a FieldInfo;
    type IntoIter = core::slice::Iter<'a, FieldInfo>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub(crate) fn collect_facade_fields(class: &ClassInfo, private: &[FieldInfo]) -> FacadeFields {
    let mut facade: Vec<FieldInfo> = Vec::new();
    for field in private {
        let name = field.name();
        if facade.iter().any(|f| f.name() == name) {
            continue;
        }
        if class.has_accessor(name, AccessorKind::Getter, false)
            && class.has_accessor(name, AccessorKind::Setter, false)
        {
            facade.push(field.clone());
        }
    }
    FacadeFields(facade)
}
