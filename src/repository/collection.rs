//! Id-based helpers shared by the in-memory stores.

use crate::domain::Entity;

pub fn find<'a, T: Entity>(items: &'a [T], id: &T::Id) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_mut<'a, T: Entity>(items: &'a mut [T], id: &T::Id) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

/// Remove the entity with `id`; `false` if there was none
pub fn remove<T: Entity>(items: &mut Vec<T>, id: &T::Id) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}
