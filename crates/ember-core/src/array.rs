//! Tableau dynamique à croissance amortie.
//!
//! `DynArray<T>` ne sait que deux choses : ajouter en fin (`append`) et tout
//! libérer (`release`). La lecture se fait par index. La capacité logique est
//! suivie par le tableau lui-même : elle ne change qu'à la croissance, selon
//! [`grow_capacity`], indépendamment de l'arrondi éventuel de l'allocateur.

use core::{fmt, ops::Index, slice};

use crate::{CoreError, CoreResult};

/// Capacité atteinte lors de la première croissance.
pub const MIN_CAPACITY: usize = 8;

/// Politique de croissance : `max(8, 2 × capacity)`.
#[must_use]
pub const fn grow_capacity(capacity: usize) -> usize {
    let doubled = capacity.saturating_mul(2);
    if doubled < MIN_CAPACITY { MIN_CAPACITY } else { doubled }
}

/// Buffer contigu possédé, append-only.
///
/// Invariants : `len() <= capacity()` ; les éléments `[0, len())` sont valides.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DynArray<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Default for DynArray<T> {
    fn default() -> Self { Self::new() }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .finish()
    }
}

impl<T> DynArray<T> {
    /// Tableau vide, sans stockage.
    #[must_use]
    pub const fn new() -> Self { Self { items: Vec::new(), capacity: 0 } }

    /// Nombre d'éléments utilisés.
    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    /// Vrai si aucun élément n'a été ajouté.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Capacité logique (slots alloués selon la politique de croissance).
    #[must_use]
    pub const fn capacity(&self) -> usize { self.capacity }

    /// Ajoute `value` en fin, en doublant la capacité si le tableau est plein.
    ///
    /// Un échec d'allocation est fatal (abandon du processus par l'allocateur).
    /// Voir [`DynArray::try_append`] pour la variante récupérable.
    pub fn append(&mut self, value: T) {
        if self.is_full() {
            let requested = grow_capacity(self.capacity);
            self.items.reserve_exact(requested - self.items.len());
            self.set_capacity(requested);
        }
        self.items.push(value);
    }

    /// Comme [`DynArray::append`], mais remonte l'échec d'allocation.
    ///
    /// # Errors
    /// `CoreError::Alloc` si l'allocateur refuse la nouvelle capacité ; le
    /// tableau reste alors inchangé.
    pub fn try_append(&mut self, value: T) -> CoreResult<()> {
        if self.is_full() {
            let requested = grow_capacity(self.capacity);
            self.items
                .try_reserve_exact(requested - self.items.len())
                .map_err(|_| CoreError::Alloc { requested })?;
            self.set_capacity(requested);
        }
        self.items.push(value);
        Ok(())
    }

    /// Libère le stockage et remet le tableau à l'état vide. Idempotent.
    pub fn release(&mut self) {
        self.items = Vec::new();
        self.capacity = 0;
    }

    /// Élément à l'index `i`, s'il est dans `[0, len())`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&T> { self.items.get(i) }

    /// Dernier élément ajouté.
    #[must_use]
    pub fn last(&self) -> Option<&T> { self.items.last() }

    /// Vue sur les éléments utilisés.
    #[must_use]
    pub fn as_slice(&self) -> &[T] { &self.items }

    /// Itère dans l'ordre d'ajout.
    pub fn iter(&self) -> slice::Iter<'_, T> { self.items.iter() }

    #[inline]
    fn is_full(&self) -> bool { self.items.len() == self.capacity }

    fn set_capacity(&mut self, capacity: usize) {
        trace_log!("dynarray grow: {} -> {} slots", self.capacity, capacity);
        self.capacity = capacity;
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T { &self.items[i] }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

/* ─────────────────────────── Tests ─────────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Capacité attendue après `n` ajouts depuis le vide.
    fn expected_capacity(n: usize) -> usize {
        let mut cap = 0;
        while cap < n {
            cap = grow_capacity(cap);
        }
        cap
    }

    #[test]
    fn starts_empty() {
        let a: DynArray<u8> = DynArray::new();
        assert_eq!(a.len(), 0);
        assert_eq!(a.capacity(), 0);
        assert!(a.is_empty());
        assert_eq!(a.get(0), None);
    }

    #[test]
    fn growth_policy() {
        assert_eq!(grow_capacity(0), 8);
        assert_eq!(grow_capacity(8), 16);
        assert_eq!(grow_capacity(16), 32);
        assert_eq!(grow_capacity(usize::MAX), usize::MAX);
    }

    #[test]
    fn first_growth_is_eight_for_any_type() {
        let mut bytes = DynArray::new();
        bytes.append(1u8);
        let mut lines = DynArray::new();
        lines.append(1u32);
        let mut strings = DynArray::new();
        strings.append(String::from("x"));
        assert_eq!(bytes.capacity(), 8);
        assert_eq!(lines.capacity(), 8);
        assert_eq!(strings.capacity(), 8);
    }

    #[test]
    fn doubles_when_full() {
        let mut a = DynArray::new();
        for i in 0..8u32 {
            a.append(i);
        }
        assert_eq!(a.capacity(), 8);
        a.append(8);
        assert_eq!(a.capacity(), 16);
        assert_eq!(a.len(), 9);
        assert_eq!(a[8], 8);
    }

    #[test]
    fn try_append_follows_same_policy() -> CoreResult<()> {
        let mut a = DynArray::new();
        for i in 0..9i64 {
            a.try_append(i)?;
        }
        assert_eq!(a.capacity(), 16);
        assert_eq!(a.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        Ok(())
    }

    #[test]
    fn release_resets_and_is_idempotent() {
        let mut a = DynArray::new();
        a.extend([1.0f64, 2.0, 3.0]);
        a.release();
        assert_eq!(a.len(), 0);
        assert_eq!(a.capacity(), 0);
        a.release();
        assert_eq!(a, DynArray::new());
        a.append(4.0);
        assert_eq!(a.capacity(), 8);
        assert_eq!(a.last(), Some(&4.0));
    }

    proptest! {
        #[test]
        fn append_then_read(values in proptest::collection::vec(any::<i32>(), 0..300)) {
            let mut a = DynArray::new();
            for (n, v) in values.iter().enumerate() {
                a.append(*v);
                prop_assert!(a.len() <= a.capacity());
                prop_assert_eq!(a.len(), n + 1);
            }
            prop_assert_eq!(a.len(), values.len());
            prop_assert_eq!(a.capacity(), expected_capacity(values.len()));
            for (i, v) in values.iter().enumerate() {
                prop_assert_eq!(a.get(i), Some(v));
            }
            prop_assert_eq!(a.iter().copied().collect::<Vec<_>>(), values);
        }
    }
}
