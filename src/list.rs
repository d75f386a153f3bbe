use alloc::boxed::Box;
use core::fmt;
use core::mem;
use core::ptr::{self, NonNull};

extern crate alloc;

/// A node in the doubly linked list.
///
/// Contains a value and pointers to the previous and next entries.
/// This structure is not meant to be used directly by users of the `List`.
pub(crate) struct ListEntry<T> {
    /// The value stored in this entry. Uses MaybeUninit to allow for sigil nodes.
    val: mem::MaybeUninit<T>,
    /// Pointer to the previous entry in the list.
    prev: *mut ListEntry<T>,
    /// Pointer to the next entry in the list.
    next: *mut ListEntry<T>,
}

impl<T> ListEntry<T> {
    /// Creates a new entry with the given value.
    fn new(val: T) -> Self {
        ListEntry {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a new sigil (sentinel) entry without initializing the value.
    ///
    /// Sigil entries are used as head and tail markers in the list.
    fn new_sigil() -> Self {
        ListEntry {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Returns a reference to the value stored in this entry.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be a sigil node.
    pub(crate) unsafe fn get_value(&self) -> &T {
        unsafe { self.val.assume_init_ref() }
    }

    /// Returns a mutable reference to the value stored in this entry.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be a sigil node.
    pub(crate) unsafe fn get_value_mut(&mut self) -> &mut T {
        unsafe { self.val.assume_init_mut() }
    }

    /// Consumes a detached entry and returns its value by move.
    ///
    /// The node allocation is freed and the value is handed back with
    /// normal ownership, so eviction paths never need to clone.
    ///
    /// # Safety
    ///
    /// The entry must hold an initialized value and must no longer be
    /// linked into any list.
    pub(crate) unsafe fn take_value(mut self: Box<Self>) -> T {
        // SAFETY: caller guarantees the value is initialized; replacing it
        // with uninit means dropping the box afterwards frees only memory.
        unsafe { mem::replace(&mut self.val, mem::MaybeUninit::uninit()).assume_init() }
    }
}

/// A doubly linked list with sentinel head and tail nodes.
///
/// All operations are O(1). The list owns its nodes (allocated with `Box`,
/// linked through raw pointers) and hands out raw node pointers that stay
/// stable until the node is unlinked. Capacity enforcement is the caller's
/// concern; the engines that embed this list bound it through their key
/// maps.
///
/// The sentinels are never exposed as user data. Unlinking a node that does
/// not belong to the list is a programmer error; debug builds assert on the
/// cheap-to-check cases.
pub(crate) struct List<T> {
    /// Current number of items in the list.
    len: usize,
    /// Pointer to the head sentinel node. The front of the list is `head.next`.
    head: *mut ListEntry<T>,
    /// Pointer to the tail sentinel node. The back of the list is `tail.prev`.
    tail: *mut ListEntry<T>,
}

impl<T> List<T> {
    /// Creates a new, empty list.
    pub(crate) fn new() -> List<T> {
        let head = Box::into_raw(Box::new(ListEntry::new_sigil()));
        let tail = Box::into_raw(Box::new(ListEntry::new_sigil()));

        let list = List { len: 0, head, tail };

        unsafe {
            // SAFETY: head and tail are newly allocated and valid pointers
            (*list.head).next = list.tail;
            (*list.tail).prev = list.head;
        }

        list
    }

    /// Returns the current number of items in the list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a value at the front of the list, returning a pointer to the
    /// newly allocated entry.
    pub(crate) fn push_front(&mut self, v: T) -> *mut ListEntry<T> {
        // SAFETY: Box::into_raw never returns null
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(ListEntry::new(v)))) };
        // SAFETY: node is a newly allocated entry that is not part of any list yet
        unsafe { self.attach_front(node.as_ptr()) };
        self.len += 1;
        node.as_ptr()
    }

    /// Adds a value at the back of the list, returning a pointer to the
    /// newly allocated entry.
    pub(crate) fn push_back(&mut self, v: T) -> *mut ListEntry<T> {
        // SAFETY: Box::into_raw never returns null
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(ListEntry::new(v)))) };
        // SAFETY: node is a newly allocated entry that is not part of any list yet
        unsafe { self.attach_back(node.as_ptr()) };
        self.len += 1;
        node.as_ptr()
    }

    /// Removes the first item from the list, if any.
    pub(crate) fn pop_front(&mut self) -> Option<Box<ListEntry<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: head is a valid sentinel and the list is non-empty, so
        // head.next is a real node
        let next = unsafe { (*self.head).next };
        debug_assert!(next != self.tail);
        unsafe {
            // SAFETY: next is a node of this list
            self.detach(next);
        }
        self.len -= 1;
        // SAFETY: next was allocated by Box::into_raw and is now detached
        unsafe { Some(Box::from_raw(next)) }
    }

    /// Removes the last item from the list, if any.
    pub(crate) fn pop_back(&mut self) -> Option<Box<ListEntry<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: tail is a valid sentinel and the list is non-empty, so
        // tail.prev is a real node
        let prev = unsafe { (*self.tail).prev };
        debug_assert!(prev != self.head);
        unsafe {
            // SAFETY: prev is a node of this list
            self.detach(prev);
        }
        self.len -= 1;
        // SAFETY: prev was allocated by Box::into_raw and is now detached
        unsafe { Some(Box::from_raw(prev)) }
    }

    /// Unlinks a node from the list and returns it as a Box.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a non-sigil node of *this* list.
    pub(crate) unsafe fn unlink(&mut self, node: *mut ListEntry<T>) -> Option<Box<ListEntry<T>>> {
        debug_assert!(!node.is_null());
        debug_assert!(node != self.head && node != self.tail);
        if self.is_empty() || node.is_null() || node == self.head || node == self.tail {
            return None;
        }

        unsafe {
            // SAFETY: caller guarantees node is a live member of this list
            self.detach(node);
            self.len -= 1;
            Some(Box::from_raw(node))
        }
    }

    /// Unlinks a node from the list without deallocating it.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a non-sigil node of this list.
    unsafe fn detach(&mut self, node: *mut ListEntry<T>) {
        // SAFETY: the caller guarantees that node is a valid entry in the
        // list, which means its prev and next pointers are also valid entries.
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
        }
    }

    /// Links a detached node in directly behind the head sentinel.
    ///
    /// Does not touch `len`; used for repositioning nodes that already
    /// count toward this list.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a node that is not currently
    /// linked into any list.
    unsafe fn attach_front(&mut self, node: *mut ListEntry<T>) {
        // SAFETY: head is a valid sentinel; caller guarantees node is
        // detached and valid
        unsafe {
            (*node).next = (*self.head).next;
            (*node).prev = self.head;
            (*self.head).next = node;
            (*(*node).next).prev = node;
        }
    }

    /// Links a detached node in directly before the tail sentinel.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a node that is not currently
    /// linked into any list.
    unsafe fn attach_back(&mut self, node: *mut ListEntry<T>) {
        // SAFETY: tail is a valid sentinel; caller guarantees node is
        // detached and valid
        unsafe {
            (*node).next = self.tail;
            (*node).prev = (*self.tail).prev;
            (*self.tail).prev = node;
            (*(*node).prev).next = node;
        }
    }

    /// Takes ownership of a node unlinked from another list and attaches it
    /// at the front. Increments the length, since this list gains a node.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a node that is not currently
    /// linked into any list.
    #[allow(dead_code)]
    pub(crate) unsafe fn attach_front_from_other_list(&mut self, node: *mut ListEntry<T>) {
        // SAFETY: forwarded to attach_front under the same contract
        unsafe { self.attach_front(node) };
        self.len += 1;
    }

    /// Takes ownership of a node unlinked from another list and attaches it
    /// at the back. Increments the length, since this list gains a node.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a node that is not currently
    /// linked into any list.
    pub(crate) unsafe fn attach_back_from_other_list(&mut self, node: *mut ListEntry<T>) {
        // SAFETY: forwarded to attach_back under the same contract
        unsafe { self.attach_back(node) };
        self.len += 1;
    }

    /// Moves a node to the front of the list (directly behind the head
    /// sentinel).
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a non-sigil node of this list.
    pub(crate) unsafe fn move_to_front(&mut self, node: *mut ListEntry<T>) {
        debug_assert!(!node.is_null());
        if node.is_null() || node == self.head || node == self.tail {
            return;
        }

        unsafe {
            // Already the first item, nothing to do
            if (*self.head).next == node {
                return;
            }

            // SAFETY: caller guarantees node is a live member of this list
            self.detach(node);
            self.attach_front(node);
        }
    }

    /// Clears the list, removing and dropping all entries.
    pub(crate) fn clear(&mut self) {
        while let Some(node) = self.pop_front() {
            // SAFETY: pop_front only yields non-sigil nodes with
            // initialized values
            drop(unsafe { node.take_value() });
        }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();

        // SAFETY: head and tail are the sentinels allocated in `new`; no
        // regular nodes remain after clear(), so nothing else refers to them.
        unsafe {
            let _ = Box::from_raw(self.head);
            let _ = Box::from_raw(self.tail);
            self.head = ptr::null_mut();
            self.tail = ptr::null_mut();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("length", &self.len).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn test_new_list_is_empty() {
        let list = List::<u32>::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(!list.head.is_null());
        assert!(!list.tail.is_null());
    }

    #[test]
    fn test_push_front_and_pop_back_order() {
        let mut list = List::<u32>::new();
        list.push_front(10);
        list.push_front(20);
        list.push_front(30);
        assert_eq!(list.len(), 3);

        // Front is 30, back is 10
        let back = list.pop_back().unwrap();
        assert_eq!(unsafe { back.take_value() }, 10);
        let back = list.pop_back().unwrap();
        assert_eq!(unsafe { back.take_value() }, 20);
        let back = list.pop_back().unwrap();
        assert_eq!(unsafe { back.take_value() }, 30);
        assert!(list.pop_back().is_none());
    }

    #[test]
    fn test_push_back_and_pop_front_order() {
        let mut list = List::<u32>::new();
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);

        let front = list.pop_front().unwrap();
        assert_eq!(unsafe { front.take_value() }, 1);
        let front = list.pop_front().unwrap();
        assert_eq!(unsafe { front.take_value() }, 2);
        let front = list.pop_front().unwrap();
        assert_eq!(unsafe { front.take_value() }, 3);
        assert!(list.pop_front().is_none());
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::<u32>::new();

        // Front -> 30 -> 20 -> 10 -> back
        let node1 = list.push_front(10);
        let _node2 = list.push_front(20);
        let _node3 = list.push_front(30);

        // Move the back item (10) to front: 10 -> 30 -> 20
        unsafe { list.move_to_front(node1) };
        assert_eq!(list.len(), 3);

        // Moving the current front is a no-op
        unsafe { list.move_to_front(node1) };

        let first = list.pop_front().unwrap();
        assert_eq!(unsafe { first.take_value() }, 10);
        let second = list.pop_front().unwrap();
        assert_eq!(unsafe { second.take_value() }, 30);
        let third = list.pop_front().unwrap();
        assert_eq!(unsafe { third.take_value() }, 20);
    }

    #[test]
    fn test_unlink_middle_node() {
        let mut list = List::<u32>::new();
        let _a = list.push_back(1);
        let b = list.push_back(2);
        let _c = list.push_back(3);

        let removed = unsafe { list.unlink(b) }.unwrap();
        assert_eq!(unsafe { removed.take_value() }, 2);
        assert_eq!(list.len(), 2);

        let first = list.pop_front().unwrap();
        assert_eq!(unsafe { first.take_value() }, 1);
        let second = list.pop_front().unwrap();
        assert_eq!(unsafe { second.take_value() }, 3);
    }

    #[test]
    fn test_get_value_and_get_value_mut() {
        let mut list = List::<String>::new();
        let node = list.push_front(String::from("test"));

        unsafe {
            assert_eq!((*node).get_value(), "test");
            (*node).get_value_mut().push_str("_modified");
            assert_eq!((*node).get_value(), "test_modified");
        }
    }

    #[test]
    fn test_cross_list_transfer() {
        let mut list1 = List::<u32>::new();
        let mut list2 = List::<u32>::new();

        let node1 = list1.push_front(10);
        list1.push_front(20);
        assert_eq!(list1.len(), 2);

        let removed = unsafe { list1.unlink(node1) }.unwrap();
        assert_eq!(list1.len(), 1);

        unsafe {
            list2.attach_back_from_other_list(Box::into_raw(removed));
        }
        assert_eq!(list2.len(), 1);

        let from_list2 = list2.pop_front().unwrap();
        assert_eq!(unsafe { from_list2.take_value() }, 10);
    }

    #[test]
    fn test_clear_drops_values() {
        let mut list = List::<String>::new();
        list.push_front(String::from("a"));
        list.push_front(String::from("b"));
        list.push_front(String::from("c"));
        assert_eq!(list.len(), 3);

        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());

        // Reusable after clear
        list.push_front(String::from("d"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_mixed_operations_length_consistency() {
        let mut list = List::<u32>::new();
        let a = list.push_front(1);
        let _b = list.push_back(2);
        let c = list.push_front(3);
        assert_eq!(list.len(), 3);

        unsafe { list.move_to_front(a) };
        assert_eq!(list.len(), 3);

        let _ = unsafe { list.unlink(c) }.unwrap();
        assert_eq!(list.len(), 2);

        list.pop_back();
        assert_eq!(list.len(), 1);

        list.clear();
        assert!(list.is_empty());
    }
}
