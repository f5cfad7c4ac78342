use super::error::RuntimeError;
use super::heap::Heap;

#[test]
fn alloc_is_zeroed() {
    let mut heap = Heap::new();
    let handle = heap.alloc(4).unwrap();

    assert_eq!(heap.read(handle, 4), Ok(&[0u8; 4][..]));
    assert_eq!(heap.live(), 1);
}

#[test]
fn write_then_read_at_offset() {
    let mut heap = Heap::new();
    let handle = heap.alloc(8).unwrap();

    heap.write(handle + 2, &[1, 2, 3]).unwrap();

    assert_eq!(heap.read(handle, 6), Ok(&[0, 0, 1, 2, 3, 0][..]));
}

#[test]
fn handles_are_distinct() {
    let mut heap = Heap::new();
    let a = heap.alloc(1).unwrap();
    let b = heap.alloc(1).unwrap();

    assert_ne!(a, b);
    assert_ne!(a, 0);
}

#[test]
fn access_past_block_is_out_of_bounds() {
    let mut heap = Heap::new();
    let handle = heap.alloc(4).unwrap();

    assert_eq!(
        heap.write(handle + 2, &[0; 4]),
        Err(RuntimeError::OutOfBounds {
            offset: 2,
            size: 4,
            len: 4
        })
    );
    assert!(heap.read(handle + 4, 1).is_err());
}

#[test]
fn freed_handle_is_invalid() {
    let mut heap = Heap::new();
    let handle = heap.alloc(4).unwrap();
    heap.free(handle).unwrap();

    assert_eq!(
        heap.read(handle, 1),
        Err(RuntimeError::InvalidHandle(handle))
    );
    assert_eq!(heap.free(handle), Err(RuntimeError::InvalidHandle(handle)));
    assert_eq!(heap.live(), 0);
}

#[test]
fn slots_are_not_reused() {
    let mut heap = Heap::new();
    let first = heap.alloc(4).unwrap();
    heap.free(first).unwrap();

    let second = heap.alloc(4).unwrap();

    assert_ne!(first, second);
    assert!(heap.read(first, 1).is_err());
}

#[test]
fn free_needs_block_start() {
    let mut heap = Heap::new();
    let handle = heap.alloc(4).unwrap();

    assert_eq!(
        heap.free(handle + 1),
        Err(RuntimeError::InvalidHandle(handle + 1))
    );
    assert_eq!(heap.free(0), Err(RuntimeError::InvalidHandle(0)));
}

#[test]
fn live_bytes_are_capped() {
    let mut heap = Heap::with_limit(10);
    let a = heap.alloc(6).unwrap();

    assert_eq!(
        heap.alloc(5),
        Err(RuntimeError::HeapExhausted {
            requested: 5,
            live: 6,
            limit: 10
        })
    );
    assert_eq!(heap.live(), 1);

    heap.free(a).unwrap();
    assert_eq!(heap.live_bytes(), 0);
    assert!(heap.alloc(10).is_ok());
}
