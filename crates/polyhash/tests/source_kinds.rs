//! The same bytes hash identically whatever storage exposes them.

use polyhash::{ByteSource, ByteWindow, RawRegion, hash, scalar_hash};
use proptest::prelude::*;

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 131 + 7) as u8).collect()
}

#[test]
fn owned_window_and_raw_region_agree() {
    for len in [0usize, 1, 15, 16, 31, 32, 33, 100, 1000] {
        let owned = sample(len);
        let boxed: Box<[u8]> = owned.clone().into_boxed_slice();

        let mut padded = vec![0xEEu8; 5];
        padded.extend_from_slice(&owned);
        padded.extend_from_slice(&[0xDD; 9]);
        let window = ByteWindow::with_range(&padded, 5, len).unwrap();

        let mut cursor = ByteWindow::new(&padded);
        cursor.set_limit(5 + len).unwrap();
        cursor.set_position(5).unwrap();

        // SAFETY: `owned` outlives the region and is not written while it exists.
        let region = unsafe { RawRegion::from_raw_parts(owned.as_ptr(), owned.len()) };

        let expected = scalar_hash(&owned);
        assert_eq!(hash(&owned), expected, "vec len {len}");
        assert_eq!(hash(&boxed), expected, "box len {len}");
        assert_eq!(hash(&window), expected, "range window len {len}");
        assert_eq!(hash(&cursor), expected, "cursor window len {len}");
        assert_eq!(hash(&region), expected, "raw region len {len}");
    }
}

#[test]
fn hashing_a_window_does_not_move_its_cursor() {
    let data = sample(64);
    let mut window = ByteWindow::new(&data);
    window.set_position(10).unwrap();

    let first = hash(&window);
    assert_eq!(window.position(), 10);
    assert_eq!(hash(&window), first);
    assert_eq!(first, scalar_hash(&data[10..]));
}

#[test]
fn sliced_window_hashes_like_its_parent() {
    let data = sample(80);
    let mut window = ByteWindow::new(&data);
    window.set_position(7).unwrap();
    window.set_limit(71).unwrap();

    assert_eq!(hash(&window.slice()), hash(&window));
}

#[test]
fn trait_objects_hash_like_concrete_sources() {
    let data = sample(99);
    let window = ByteWindow::new(&data);
    let sources: Vec<&dyn ByteSource> = vec![&data, &window];
    for source in sources {
        assert_eq!(hash(source), scalar_hash(&data));
    }
}

#[cfg(unix)]
#[test]
fn mapped_file_hashes_like_its_contents() {
    use std::io::Write;

    use polyhash::MappedRegion;

    for len in [0usize, 3, 32, 4097] {
        let contents = sample(len);
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(&contents).expect("write contents");
        file.flush().expect("flush contents");

        let region = MappedRegion::open(file.path()).expect("map file");
        assert_eq!(region.len(), len);
        assert_eq!(hash(&region), scalar_hash(&contents), "mapped len {len}");
    }
}

#[cfg(unix)]
#[test]
fn mapping_a_missing_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = polyhash::MappedRegion::open(dir.path().join("absent")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

proptest! {
    #[test]
    fn arbitrary_windows_hash_like_their_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..300),
        start in 0usize..300,
        len in 0usize..300,
    ) {
        let start = start.min(data.len());
        let len = len.min(data.len() - start);
        let window = ByteWindow::with_range(&data, start, len).unwrap();
        prop_assert_eq!(hash(&window), scalar_hash(&data[start..start + len]));
    }
}
