use std::sync::Arc;

use tracing::debug;

use spool_keys::{list_count_slot, list_item_slot, SlotId};
use spool_store::PrimitiveStore;
use spool_types::{Address, ScalarValue, StorageKey};

use crate::error::{ListError, ListResult};

/// Typed list collections addressed through the primitive store.
///
/// A list of kind `T` under a [`StorageKey`] is a `u64` length counter plus
/// item slots for indices `[0, length)`. The kind participates in every slot
/// derivation, so lists of different kinds under one nominal key occupy
/// disjoint sub-namespaces and never alias.
///
/// `count` and `get` are public; every mutation requires an authorized
/// writer. A list comes into existence with its first `push` and is never
/// destroyed, only drained to length 0.
pub struct ListStore {
    store: Arc<PrimitiveStore>,
}

impl ListStore {
    /// Create a list store over the shared primitive store.
    pub fn new(store: Arc<PrimitiveStore>) -> Self {
        Self { store }
    }

    /// The underlying primitive store.
    pub fn store(&self) -> &PrimitiveStore {
        &self.store
    }

    /// Number of items in the `T`-valued list under `key`.
    ///
    /// 0 if the list was never pushed to.
    pub fn count<T: ScalarValue>(&self, key: &StorageKey) -> ListResult<u64> {
        let raw: u128 = self.store.read_at(self.count_slot::<T>(key))?;
        Ok(raw as u64)
    }

    /// The item at `index`.
    pub fn get<T: ScalarValue>(&self, key: &StorageKey, index: u64) -> ListResult<T> {
        let len = self.count::<T>(key)?;
        check_bounds(index, len)?;
        Ok(self.store.read_at(self.item_slot::<T>(key, index))?)
    }

    /// All items in order. Convenience for collaborators that scan a whole
    /// registry list.
    pub fn to_vec<T: ScalarValue>(&self, key: &StorageKey) -> ListResult<Vec<T>> {
        let len = self.count::<T>(key)?;
        let mut out = Vec::with_capacity(len as usize);
        for i in 0..len {
            out.push(self.store.read_at(self.item_slot::<T>(key, i))?);
        }
        Ok(out)
    }

    /// Append `value` at the end of the list. The only way a list grows by
    /// one from nothing; there is no capacity bound.
    pub fn push<T: ScalarValue>(
        &self,
        caller: &Address,
        key: &StorageKey,
        value: T,
    ) -> ListResult<()> {
        self.store.access().require_writer(caller)?;
        let len = self.count::<T>(key)?;
        self.store
            .write_at(caller, self.item_slot::<T>(key, len), value)?;
        self.set_count::<T>(caller, key, len + 1)?;
        debug!(key = %key.short_hex(), index = len, "list push");
        Ok(())
    }

    /// Overwrite the item at `index` in place. Length unchanged.
    pub fn set<T: ScalarValue>(
        &self,
        caller: &Address,
        key: &StorageKey,
        index: u64,
        value: T,
    ) -> ListResult<()> {
        self.store.access().require_writer(caller)?;
        let len = self.count::<T>(key)?;
        check_bounds(index, len)?;
        self.store
            .write_at(caller, self.item_slot::<T>(key, index), value)?;
        Ok(())
    }

    /// Insert `value` at `index`, shifting the tail one slot toward the end.
    ///
    /// `index == length` is a valid insert-at-end, equivalent to
    /// [`ListStore::push`]. The shift walks highest index first so no slot is
    /// overwritten before it has been read. Preserves the relative order of
    /// all untouched items; O(n - index).
    pub fn insert<T: ScalarValue>(
        &self,
        caller: &Address,
        key: &StorageKey,
        index: u64,
        value: T,
    ) -> ListResult<()> {
        self.store.access().require_writer(caller)?;
        let len = self.count::<T>(key)?;
        if index > len {
            return Err(ListError::IndexOutOfBounds { index, len });
        }
        let mut i = len;
        while i > index {
            let moved: T = self.store.read_at(self.item_slot::<T>(key, i - 1))?;
            self.store.write_at(caller, self.item_slot::<T>(key, i), moved)?;
            i -= 1;
        }
        self.store
            .write_at(caller, self.item_slot::<T>(key, index), value)?;
        self.set_count::<T>(caller, key, len + 1)?;
        debug!(key = %key.short_hex(), index, len = len + 1, "list insert");
        Ok(())
    }

    /// Remove the item at `index`, shifting everything above it one slot
    /// toward the start.
    ///
    /// Preserves the relative order of the remaining items; use when index
    /// encodes meaning (e.g. registration order). The vacated last slot sits
    /// beyond the new length and is not zeroed. O(n - index).
    pub fn remove_ordered<T: ScalarValue>(
        &self,
        caller: &Address,
        key: &StorageKey,
        index: u64,
    ) -> ListResult<()> {
        self.store.access().require_writer(caller)?;
        let len = self.count::<T>(key)?;
        check_bounds(index, len)?;
        for i in index..len - 1 {
            let moved: T = self.store.read_at(self.item_slot::<T>(key, i + 1))?;
            self.store.write_at(caller, self.item_slot::<T>(key, i), moved)?;
        }
        self.set_count::<T>(caller, key, len - 1)?;
        debug!(key = %key.short_hex(), index, len = len - 1, "list remove (ordered)");
        Ok(())
    }

    /// Remove the item at `index` by moving the last item into its slot.
    ///
    /// A single move, O(1). Does NOT preserve relative order; use only when
    /// index position carries no external meaning (e.g. an unordered
    /// membership set). Removing the last item is a pure decrement.
    pub fn remove_unordered<T: ScalarValue>(
        &self,
        caller: &Address,
        key: &StorageKey,
        index: u64,
    ) -> ListResult<()> {
        self.store.access().require_writer(caller)?;
        let len = self.count::<T>(key)?;
        check_bounds(index, len)?;
        if index != len - 1 {
            let last: T = self.store.read_at(self.item_slot::<T>(key, len - 1))?;
            self.store
                .write_at(caller, self.item_slot::<T>(key, index), last)?;
        }
        self.set_count::<T>(caller, key, len - 1)?;
        debug!(key = %key.short_hex(), index, len = len - 1, "list remove (unordered)");
        Ok(())
    }

    fn count_slot<T: ScalarValue>(&self, key: &StorageKey) -> SlotId {
        list_count_slot(T::KIND, key)
    }

    fn item_slot<T: ScalarValue>(&self, key: &StorageKey, index: u64) -> SlotId {
        list_item_slot(T::KIND, key, index)
    }

    fn set_count<T: ScalarValue>(
        &self,
        caller: &Address,
        key: &StorageKey,
        len: u64,
    ) -> ListResult<()> {
        self.store
            .write_at(caller, self.count_slot::<T>(key), len as u128)?;
        Ok(())
    }
}

fn check_bounds(index: u64, len: u64) -> ListResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(ListError::IndexOutOfBounds { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spool_store::{StoreConfig, StoreError};

    fn fixture() -> (ListStore, Address) {
        let deployer = Address::ephemeral();
        let writer = Address::ephemeral();
        let store = PrimitiveStore::in_memory(StoreConfig::new(deployer).with_writer(writer));
        store.freeze(&deployer).unwrap();
        (ListStore::new(Arc::new(store)), writer)
    }

    // Addresses in the 0x…01 style the registries use.
    fn addr(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        Address::from_raw(bytes)
    }

    fn key(path: &str) -> StorageKey {
        StorageKey::from_path(path)
    }

    fn items(lists: &ListStore, k: &StorageKey) -> Vec<Address> {
        lists.to_vec::<Address>(k).unwrap()
    }

    // -----------------------------------------------------------------------
    // Count / push
    // -----------------------------------------------------------------------

    #[test]
    fn count_is_zero_before_first_push() {
        let (lists, _) = fixture();
        assert_eq!(lists.count::<Address>(&key("empty")).unwrap(), 0);
    }

    #[test]
    fn push_grows_count_by_one() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        for n in 1..=5 {
            lists.push(&writer, &k, addr(n)).unwrap();
            assert_eq!(lists.count::<Address>(&k).unwrap(), n as u64);
        }
        assert_eq!(
            items(&lists, &k),
            vec![addr(1), addr(2), addr(3), addr(4), addr(5)]
        );
    }

    // -----------------------------------------------------------------------
    // Get / set
    // -----------------------------------------------------------------------

    #[test]
    fn get_returns_pushed_items() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        lists.push(&writer, &k, addr(2)).unwrap();
        assert_eq!(lists.get::<Address>(&k, 0).unwrap(), addr(1));
        assert_eq!(lists.get::<Address>(&k, 1).unwrap(), addr(2));
    }

    #[test]
    fn get_at_count_is_out_of_bounds() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        assert_eq!(
            lists.get::<Address>(&k, 1).unwrap_err(),
            ListError::IndexOutOfBounds { index: 1, len: 1 }
        );
    }

    #[test]
    fn get_on_empty_list_is_out_of_bounds() {
        let (lists, _) = fixture();
        assert_eq!(
            lists.get::<Address>(&key("empty"), 0).unwrap_err(),
            ListError::IndexOutOfBounds { index: 0, len: 0 }
        );
    }

    #[test]
    fn set_overwrites_in_place() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        lists.push(&writer, &k, addr(2)).unwrap();
        lists.set(&writer, &k, 1, addr(9)).unwrap();
        assert_eq!(items(&lists, &k), vec![addr(1), addr(9)]);
        assert_eq!(lists.count::<Address>(&k).unwrap(), 2);
    }

    #[test]
    fn set_out_of_bounds_fails_and_mutates_nothing() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        let err = lists.set(&writer, &k, 99, addr(9)).unwrap_err();
        assert_eq!(err, ListError::IndexOutOfBounds { index: 99, len: 1 });
        assert_eq!(items(&lists, &k), vec![addr(1)]);
    }

    // -----------------------------------------------------------------------
    // Insert
    // -----------------------------------------------------------------------

    #[test]
    fn insert_shifts_tail_and_preserves_order() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        for n in [1, 2, 3] {
            lists.push(&writer, &k, addr(n)).unwrap();
        }
        lists.insert(&writer, &k, 1, addr(5)).unwrap();
        assert_eq!(items(&lists, &k), vec![addr(1), addr(5), addr(2), addr(3)]);
    }

    #[test]
    fn insert_at_count_behaves_like_push() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        lists.insert(&writer, &k, 1, addr(2)).unwrap();
        assert_eq!(items(&lists, &k), vec![addr(1), addr(2)]);
    }

    #[test]
    fn insert_into_empty_list_at_zero() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.insert(&writer, &k, 0, addr(7)).unwrap();
        assert_eq!(items(&lists, &k), vec![addr(7)]);
    }

    #[test]
    fn insert_past_count_fails() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        let err = lists.insert(&writer, &k, 2, addr(9)).unwrap_err();
        assert_eq!(err, ListError::IndexOutOfBounds { index: 2, len: 1 });
        assert_eq!(items(&lists, &k), vec![addr(1)]);
    }

    // -----------------------------------------------------------------------
    // Ordered removal
    // -----------------------------------------------------------------------

    #[test]
    fn remove_ordered_preserves_relative_order() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        for n in [1, 2, 3, 4] {
            lists.push(&writer, &k, addr(n)).unwrap();
        }
        lists.remove_ordered::<Address>(&writer, &k, 1).unwrap();
        assert_eq!(items(&lists, &k), vec![addr(1), addr(3), addr(4)]);
    }

    #[test]
    fn remove_ordered_at_last_index_is_pure_decrement() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        for n in [1, 2, 3] {
            lists.push(&writer, &k, addr(n)).unwrap();
        }
        lists.remove_ordered::<Address>(&writer, &k, 2).unwrap();
        assert_eq!(items(&lists, &k), vec![addr(1), addr(2)]);
    }

    #[test]
    fn remove_ordered_drains_to_empty() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        for n in [1, 2, 3] {
            lists.push(&writer, &k, addr(n)).unwrap();
        }
        for _ in 0..3 {
            lists.remove_ordered::<Address>(&writer, &k, 0).unwrap();
        }
        assert_eq!(lists.count::<Address>(&k).unwrap(), 0);
    }

    #[test]
    fn remove_ordered_sole_element() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        lists.remove_ordered::<Address>(&writer, &k, 0).unwrap();
        assert_eq!(lists.count::<Address>(&k).unwrap(), 0);
    }

    #[test]
    fn remove_ordered_at_count_fails() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        assert_eq!(
            lists.remove_ordered::<Address>(&writer, &k, 1).unwrap_err(),
            ListError::IndexOutOfBounds { index: 1, len: 1 }
        );
    }

    // -----------------------------------------------------------------------
    // Unordered removal
    // -----------------------------------------------------------------------

    #[test]
    fn remove_unordered_moves_last_into_hole() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        for n in [1, 2, 3, 4] {
            lists.push(&writer, &k, addr(n)).unwrap();
        }
        lists.remove_unordered::<Address>(&writer, &k, 1).unwrap();
        assert_eq!(items(&lists, &k), vec![addr(1), addr(4), addr(3)]);
    }

    #[test]
    fn remove_unordered_at_last_index_is_pure_decrement() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        for n in [1, 2, 3] {
            lists.push(&writer, &k, addr(n)).unwrap();
        }
        lists.remove_unordered::<Address>(&writer, &k, 2).unwrap();
        assert_eq!(items(&lists, &k), vec![addr(1), addr(2)]);
    }

    #[test]
    fn remove_unordered_sole_element() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        lists.remove_unordered::<Address>(&writer, &k, 0).unwrap();
        assert_eq!(lists.count::<Address>(&k).unwrap(), 0);
    }

    #[test]
    fn remove_unordered_at_count_fails() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        assert_eq!(
            lists
                .remove_unordered::<Address>(&writer, &k, 1)
                .unwrap_err(),
            ListError::IndexOutOfBounds { index: 1, len: 1 }
        );
    }

    // -----------------------------------------------------------------------
    // Full lifecycle
    // -----------------------------------------------------------------------

    #[test]
    fn push_set_insert_remove_scenario() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        let (a, b, c, d, e, f) = (addr(1), addr(2), addr(3), addr(4), addr(5), addr(6));

        lists.push(&writer, &k, a).unwrap();
        lists.push(&writer, &k, b).unwrap();
        lists.push(&writer, &k, c).unwrap();
        assert_eq!(lists.count::<Address>(&k).unwrap(), 3);

        lists.set(&writer, &k, 1, d).unwrap();
        assert_eq!(items(&lists, &k), vec![a, d, c]);

        lists.insert(&writer, &k, 1, e).unwrap();
        assert_eq!(items(&lists, &k), vec![a, e, d, c]);

        lists.insert(&writer, &k, 4, f).unwrap();
        assert_eq!(items(&lists, &k), vec![a, e, d, c, f]);

        lists.remove_ordered::<Address>(&writer, &k, 2).unwrap();
        assert_eq!(items(&lists, &k), vec![a, e, c, f]);

        lists.remove_unordered::<Address>(&writer, &k, 1).unwrap();
        assert_eq!(items(&lists, &k), vec![a, f, c]);
    }

    // -----------------------------------------------------------------------
    // Kind and key separation
    // -----------------------------------------------------------------------

    #[test]
    fn lists_of_different_kinds_never_alias() {
        let (lists, writer) = fixture();
        let k = key("shared.name");
        lists.push(&writer, &k, addr(1)).unwrap();
        lists.push(&writer, &k, 10u128).unwrap();
        lists.push(&writer, &k, 20u128).unwrap();

        assert_eq!(lists.count::<Address>(&k).unwrap(), 1);
        assert_eq!(lists.count::<u128>(&k).unwrap(), 2);
        assert_eq!(lists.get::<Address>(&k, 0).unwrap(), addr(1));
        assert_eq!(lists.to_vec::<u128>(&k).unwrap(), vec![10, 20]);
    }

    #[test]
    fn lists_under_different_keys_never_alias() {
        let (lists, writer) = fixture();
        lists.push(&writer, &key("nodes.active"), addr(1)).unwrap();
        assert_eq!(lists.count::<Address>(&key("nodes.inactive")).unwrap(), 0);
    }

    #[test]
    fn non_identity_kinds_share_removal_semantics() {
        let (lists, writer) = fixture();
        let k = key("fees.history");
        for v in [10u128, 20, 30, 40] {
            lists.push(&writer, &k, v).unwrap();
        }
        lists.remove_ordered::<u128>(&writer, &k, 0).unwrap();
        assert_eq!(lists.to_vec::<u128>(&k).unwrap(), vec![20, 30, 40]);
        lists.remove_unordered::<u128>(&writer, &k, 0).unwrap();
        assert_eq!(lists.to_vec::<u128>(&k).unwrap(), vec![40, 30]);
    }

    // -----------------------------------------------------------------------
    // Authorization
    // -----------------------------------------------------------------------

    #[test]
    fn unauthorized_mutations_fail_and_leave_list_unchanged() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        lists.push(&writer, &k, addr(2)).unwrap();

        let stranger = Address::ephemeral();
        let unauthorized = ListError::Store(StoreError::Unauthorized { caller: stranger });

        assert_eq!(
            lists.push(&stranger, &k, addr(9)).unwrap_err(),
            unauthorized
        );
        assert_eq!(
            lists.set(&stranger, &k, 0, addr(9)).unwrap_err(),
            unauthorized
        );
        assert_eq!(
            lists.insert(&stranger, &k, 0, addr(9)).unwrap_err(),
            unauthorized
        );
        assert_eq!(
            lists.remove_ordered::<Address>(&stranger, &k, 0).unwrap_err(),
            unauthorized
        );
        assert_eq!(
            lists
                .remove_unordered::<Address>(&stranger, &k, 0)
                .unwrap_err(),
            unauthorized
        );

        assert_eq!(items(&lists, &k), vec![addr(1), addr(2)]);
    }

    #[test]
    fn unauthorized_caller_gets_unauthorized_even_when_index_is_bad() {
        // Authorization resolves before bounds validation.
        let (lists, _) = fixture();
        let stranger = Address::ephemeral();
        let err = lists
            .remove_ordered::<Address>(&stranger, &key("x"), 99)
            .unwrap_err();
        assert_eq!(
            err,
            ListError::Store(StoreError::Unauthorized { caller: stranger })
        );
    }

    #[test]
    fn reads_need_no_authorization() {
        let (lists, writer) = fixture();
        let k = key("test.addresses");
        lists.push(&writer, &k, addr(1)).unwrap();
        // count/get take no caller identity at all.
        assert_eq!(lists.count::<Address>(&k).unwrap(), 1);
        assert_eq!(lists.get::<Address>(&k, 0).unwrap(), addr(1));
    }
}
