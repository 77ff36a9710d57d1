//! Shallow lookup helpers over slices of landmarks, objects, params and scenes.
//!
//! The helpers only look at the slice they are given. To search a whole
//! tree, flatten it first with [`Object::flatten`].

use super::landmark::Landmark;
use super::object::Object;
use super::param::ObjectParam;
use super::scene::Scene;

/// Anything carrying a classification key.
pub trait Typed {
    fn type_id(&self) -> &str;
}

/// Anything carrying an instance identity.
pub trait Tracked {
    fn tracking_id(&self) -> &str;
}

impl<TSpace> Typed for Landmark<TSpace> {
    fn type_id(&self) -> &str {
        &self.type_id
    }
}

impl<TSpace> Typed for Object<TSpace> {
    fn type_id(&self) -> &str {
        &self.type_id
    }
}

impl<TSpace> Typed for Scene<TSpace> {
    fn type_id(&self) -> &str {
        &self.as_object().type_id
    }
}

impl Typed for ObjectParam {
    fn type_id(&self) -> &str {
        &self.type_id
    }
}

impl<TSpace> Tracked for Object<TSpace> {
    fn tracking_id(&self) -> &str {
        &self.tracking_id
    }
}

impl<TSpace> Tracked for Scene<TSpace> {
    fn tracking_id(&self) -> &str {
        &self.as_object().tracking_id
    }
}

impl<T: Typed + ?Sized> Typed for &T {
    fn type_id(&self) -> &str {
        (**self).type_id()
    }
}

impl<T: Tracked + ?Sized> Tracked for &T {
    fn tracking_id(&self) -> &str {
        (**self).tracking_id()
    }
}

/// All items whose type id equals `type_id`, in their original order.
pub fn get_by_type<'a, T: Typed>(items: &'a [T], type_id: &str) -> Vec<&'a T> {
    items.iter().filter(|i| i.type_id() == type_id).collect()
}

/// All items whose type id starts with `prefix` (plain string prefix, not a
/// pattern), in their original order.
pub fn get_by_type_prefix<'a, T: Typed>(items: &'a [T], prefix: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|i| i.type_id().starts_with(prefix))
        .collect()
}

/// The first item whose type id equals `type_id`.
pub fn first_by_type<'a, T: Typed>(items: &'a [T], type_id: &str) -> Option<&'a T> {
    items.iter().find(|i| i.type_id() == type_id)
}

/// The first item with the given tracking id.
///
/// Tracking ids are expected to be unique among siblings, so the first
/// match is normally the only one.
pub fn get_by_tracking_id<'a, T: Tracked>(items: &'a [T], tracking_id: &str) -> Option<&'a T> {
    items.iter().find(|i| i.tracking_id() == tracking_id)
}

/// Method-call form of the lookup helpers.
///
/// ```
/// use scenemark::model::{Lookup, Object, Rect};
///
/// let objects = vec![
///     Object::new("face", "f1", Rect::new(0.0, 0.0, 10.0, 10.0)),
///     Object::new("face_mesh", "m1", Rect::new(0.0, 0.0, 10.0, 10.0)),
/// ];
/// assert_eq!(objects.by_type_prefix("face").len(), 2);
/// assert!(objects.by_tracking_id("m1").is_some());
/// ```
pub trait Lookup<T> {
    fn by_type(&self, type_id: &str) -> Vec<&T>;
    fn by_type_prefix(&self, prefix: &str) -> Vec<&T>;
    fn first_by_type(&self, type_id: &str) -> Option<&T>;
    fn by_tracking_id(&self, tracking_id: &str) -> Option<&T>
    where
        T: Tracked;
}

impl<T: Typed> Lookup<T> for [T] {
    fn by_type(&self, type_id: &str) -> Vec<&T> {
        get_by_type(self, type_id)
    }

    fn by_type_prefix(&self, prefix: &str) -> Vec<&T> {
        get_by_type_prefix(self, prefix)
    }

    fn first_by_type(&self, type_id: &str) -> Option<&T> {
        first_by_type(self, type_id)
    }

    fn by_tracking_id(&self, tracking_id: &str) -> Option<&T>
    where
        T: Tracked,
    {
        get_by_tracking_id(self, tracking_id)
    }
}
