//! Collection editor
//!
//! One ordered list of favorite, disliked or allergy items with its duplicate
//! policy. Lists keep insertion order; updates replace fields in place.

use std::fmt::Debug;

use serde::Serialize;

use super::ids::IdGenerator;
use crate::error::{PreferenceError, PreferenceResult};
use crate::models::ListKind;
use crate::notify::{NotificationKind, Notifier};

/// An item that can live in a [`CollectionEditor`]
pub trait ListEntry: Clone + Debug + Serialize {
    /// Category (favorites) or severity (dislikes, allergies)
    type Extra: Copy + PartialEq + Debug;

    const LIST: ListKind;

    fn new(id: i64, name: String, extra: Self::Extra) -> Self;
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn extra(&self) -> Self::Extra;
    fn replace(&mut self, name: String, extra: Self::Extra);

    /// Whether items carrying these two extras compete for the same name
    fn same_scope(a: Self::Extra, b: Self::Extra) -> bool;

    /// Human wording of the list a duplicate was found in
    fn duplicate_scope(extra: Self::Extra) -> String;
    fn added_message(name: &str, extra: Self::Extra) -> String;
    fn removed_message(name: &str) -> String;

    fn parse_extra(s: &str) -> Option<Self::Extra>;
    fn extra_str(extra: Self::Extra) -> &'static str;
}

/// Trimmed, lowercased name used for duplicate detection.
/// Internal whitespace is left alone.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An item before and after an in-place update
#[derive(Debug, Clone, PartialEq)]
pub struct Replaced<T> {
    pub before: T,
    pub after: T,
}

#[derive(Debug, Clone)]
pub struct CollectionEditor<T: ListEntry> {
    items: Vec<T>,
}

impl<T: ListEntry> Default for CollectionEditor<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: ListEntry> CollectionEditor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Find an item other than `exclude` that collides with `name` under `extra`
    pub fn find_duplicate(&self, name: &str, extra: T::Extra, exclude: Option<i64>) -> Option<&T> {
        let key = normalize_name(name);
        self.items.iter().find(|item| {
            Some(item.id()) != exclude
                && T::same_scope(item.extra(), extra)
                && normalize_name(item.name()) == key
        })
    }

    /// Append a new item.
    ///
    /// A blank name is rejected without a notification. A duplicate is
    /// rejected with an error notification. On success the new item is
    /// returned and a success notification is sent.
    pub fn add(
        &mut self,
        name: &str,
        extra: T::Extra,
        ids: &mut dyn IdGenerator,
        notifier: &mut dyn Notifier,
    ) -> PreferenceResult<T> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PreferenceError::EmptyName);
        }

        if self.find_duplicate(name, extra, None).is_some() {
            return Err(reject_duplicate::<T>(name, extra, notifier));
        }

        let item = T::new(ids.next_id(), name.to_string(), extra);
        self.items.push(item.clone());
        tracing::info!(list = T::LIST.as_str(), id = item.id(), name = %name, "item added");
        notifier.notify(NotificationKind::Success, &T::added_message(name, extra));
        Ok(item)
    }

    /// Remove an item and announce it. Unknown ids are a silent no-op.
    pub fn remove(&mut self, id: i64, notifier: &mut dyn Notifier) -> Option<T> {
        let removed = self.take(id)?;
        notifier.notify(NotificationKind::Success, &T::removed_message(removed.name()));
        Some(removed)
    }

    /// Remove an item without notifying; the caller words the announcement
    pub fn take(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let removed = self.items.remove(index);
        tracing::info!(list = T::LIST.as_str(), id, name = %removed.name(), "item removed");
        Some(removed)
    }

    /// Remove every item matching `predicate`, keeping the rest in order
    pub fn take_where<F>(&mut self, mut predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (taken, kept): (Vec<T>, Vec<T>) =
            self.items.drain(..).partition(|item| predicate(item));
        self.items = kept;
        taken
    }

    /// Rename and re-categorize an item in place, keeping its id and position.
    ///
    /// Returns `Ok(None)` for an unknown id. A blank name or a collision with
    /// a different item is rejected with an error notification and nothing
    /// changes.
    pub fn update(
        &mut self,
        id: i64,
        name: &str,
        extra: T::Extra,
        notifier: &mut dyn Notifier,
    ) -> PreferenceResult<Option<Replaced<T>>> {
        let name = name.trim();
        if self.get(id).is_none() {
            return Ok(None);
        }

        if name.is_empty() {
            let err = PreferenceError::EmptyName;
            notifier.notify(NotificationKind::Error, &err.to_string());
            return Err(err);
        }

        if self.find_duplicate(name, extra, Some(id)).is_some() {
            return Err(reject_duplicate::<T>(name, extra, notifier));
        }

        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return Ok(None);
        };
        let before = item.clone();
        item.replace(name.to_string(), extra);
        let after = item.clone();

        tracing::info!(
            list = T::LIST.as_str(),
            id,
            from = %before.name(),
            to = %after.name(),
            "item updated"
        );
        notifier.notify(
            NotificationKind::Success,
            &format!("Updated \"{}\" in {}", name, T::LIST.as_str()),
        );
        Ok(Some(Replaced { before, after }))
    }
}

fn reject_duplicate<T: ListEntry>(
    name: &str,
    extra: T::Extra,
    notifier: &mut dyn Notifier,
) -> PreferenceError {
    let err = PreferenceError::Duplicate {
        name: name.to_string(),
        scope: T::duplicate_scope(extra),
    };
    tracing::warn!(list = T::LIST.as_str(), name = %name, "duplicate rejected");
    notifier.notify(NotificationKind::Error, &err.to_string());
    err
}
