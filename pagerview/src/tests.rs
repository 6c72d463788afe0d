use crate::*;

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() as usize % (end_exclusive - start))
    }
}

#[derive(Debug)]
struct HostView {
    tag: String,
    frame: Rect,
    alpha: f64,
    z: i32,
    attached: bool,
}

/// Records every host command; views live in a map keyed by id.
#[derive(Debug, Default)]
struct RecordingHost {
    next_id: u64,
    views: HashMap<ViewId, HostView>,
    created: usize,
    destroyed: usize,
    content_size: f64,
    offset_commands: Vec<(f64, bool)>,
    feedback: usize,
}

impl RecordingHost {
    fn view(&self, id: ViewId) -> &HostView {
        self.views.get(&id).expect("unknown view id")
    }
}

impl ViewHost for RecordingHost {
    fn create_view(&mut self, tag: &str, frame: Rect) -> ViewId {
        self.next_id += 1;
        self.created += 1;
        let id = ViewId(self.next_id);
        self.views.insert(
            id,
            HostView {
                tag: tag.to_owned(),
                frame,
                alpha: 1.0,
                z: 0,
                attached: false,
            },
        );
        id
    }

    fn destroy_view(&mut self, id: ViewId) {
        self.views.remove(&id);
        self.destroyed += 1;
    }

    fn attach_view(&mut self, id: ViewId) {
        if let Some(v) = self.views.get_mut(&id) {
            v.attached = true;
        }
    }

    fn detach_view(&mut self, id: ViewId) {
        if let Some(v) = self.views.get_mut(&id) {
            v.attached = false;
        }
    }

    fn set_view_frame(&mut self, id: ViewId, frame: Rect) {
        if let Some(v) = self.views.get_mut(&id) {
            v.frame = frame;
        }
    }

    fn set_view_alpha(&mut self, id: ViewId, alpha: f64) {
        if let Some(v) = self.views.get_mut(&id) {
            v.alpha = alpha;
        }
    }

    fn set_view_z_index(&mut self, id: ViewId, z: i32) {
        if let Some(v) = self.views.get_mut(&id) {
            v.z = z;
        }
    }
}

impl ScrollHost for RecordingHost {
    fn set_content_size(&mut self, main: f64) {
        self.content_size = main;
    }

    fn set_scroll_offset(&mut self, offset: f64, animated: bool) {
        self.offset_commands.push((offset, animated));
    }

    fn selection_feedback(&mut self) {
        self.feedback += 1;
    }
}

struct Items {
    count: usize,
}

impl PagerDataSource for Items {
    fn count(&mut self) -> usize {
        self.count
    }

    fn view_for(&mut self, scope: &mut DequeueScope<'_>, _index: usize) -> Option<PageCell> {
        Some(scope.dequeue_reusable("page"))
    }
}

/// Bounds 400×100 with a 0.25 scale factor: page size 100, four whole pages
/// visible, so the window margin is 2 on each side (bucket cap 5).
fn fixture(count: usize) -> (PagerView, Items, RecordingHost) {
    let options = PagerOptions::new(Axis::Horizontal)
        .with_middle_item_scale_factor(0.25)
        .with_initial_bounds(Some(Rect::new(0.0, 0.0, 400.0, 100.0)));
    (PagerView::new(options), Items { count }, RecordingHost::default())
}

fn managed_indexes(pager: &PagerView) -> Vec<usize> {
    let mut out: Vec<usize> = pager.registry().iter().map(|m| m.index).collect();
    out.sort_unstable();
    out
}

// ---- window ---------------------------------------------------------------

#[test]
fn margin_follows_viewport_to_page_ratio() {
    assert_eq!(window::margin(100.0, 100.0), 1);
    assert_eq!(window::margin(50.0, 100.0), 1);
    assert_eq!(window::margin(300.0, 100.0), 2);
    assert_eq!(window::margin(400.0, 100.0), 2);
    assert_eq!(window::margin(500.0, 100.0), 3);
}

#[test]
fn range_around_contains_focus_and_stays_in_bounds() {
    assert_eq!(window::range_around(12, 0, 2, 2), Some(0..=2));
    assert_eq!(window::range_around(12, 5, 2, 2), Some(3..=7));
    assert_eq!(window::range_around(12, 11, 2, 2), Some(9..=11));
    assert_eq!(window::range_around(1, 0, 5, 5), Some(0..=0));

    for count in 0..20usize {
        for focus in 0..count {
            let r = window::range_around(count, focus, 2, 2).unwrap();
            assert!(r.contains(&focus));
            assert!(*r.start() < count && *r.end() < count);
        }
    }
}

#[test]
fn range_around_rejects_empty_and_out_of_bounds() {
    assert_eq!(window::range_around(0, 0, 2, 2), None);
    assert_eq!(window::range_around(5, 5, 2, 2), None);
    assert_eq!(window::range_around(5, 100, 2, 2), None);
}

// ---- pool -----------------------------------------------------------------

#[test]
fn pool_is_a_per_tag_stack() {
    let mut pool = ReusePool::new();
    let a = PageCell {
        id: ViewId(1),
        tag: "a".into(),
    };
    let b = PageCell {
        id: ViewId(2),
        tag: "a".into(),
    };
    assert!(pool.retire(a, 4).is_none());
    assert!(pool.retire(b, 4).is_none());

    // Last retired comes back first.
    assert_eq!(pool.dequeue("a").unwrap().id, ViewId(2));
    assert_eq!(pool.dequeue("a").unwrap().id, ViewId(1));
    assert!(pool.dequeue("a").is_none());
    assert!(pool.dequeue("b").is_none());
}

#[test]
fn pool_rejects_overflow_and_drains() {
    let mut pool = ReusePool::new();
    for i in 0..4u64 {
        let rejected = pool.retire(
            PageCell {
                id: ViewId(i),
                tag: "a".into(),
            },
            3,
        );
        assert_eq!(rejected.is_some(), i >= 3);
    }
    assert_eq!(pool.bucket_len("a"), 3);
    assert_eq!(pool.drain().len(), 3);
    assert!(pool.is_empty());
}

// ---- registry -------------------------------------------------------------

fn registry_with(indexes: &[usize]) -> ViewRegistry {
    let mut registry = ViewRegistry::new();
    for &index in indexes {
        registry.push(ManagedCell {
            cell: PageCell {
                id: ViewId(index as u64 + 1),
                tag: "page".into(),
            },
            index,
            frame: Rect::default(),
        });
    }
    registry
}

#[test]
fn registry_shift_renumbers_tail() {
    let mut registry = registry_with(&[2, 3, 4]);
    registry.shift_from(3, 1);
    let mut ix: Vec<usize> = registry.iter().map(|m| m.index).collect();
    ix.sort_unstable();
    assert_eq!(ix, vec![2, 4, 5]);
}

#[test]
fn removal_renumbering_is_monotonic_and_injective() {
    // items 0..10, remove {3, 5}: old 4 -> 3, old 6 -> 4, old 9 -> 7.
    let mut registry = registry_with(&(0..10).collect::<Vec<_>>());
    let removed = [3usize, 5].into_iter().collect();
    let gone = registry.renumber_for_removals(&removed);
    assert_eq!(gone.len(), 2);

    let mut mapping: Vec<(u64, usize)> = registry.iter().map(|m| (m.cell.id.0, m.index)).collect();
    mapping.sort_unstable();
    let new_indexes: Vec<usize> = mapping.iter().map(|&(_, ix)| ix).collect();
    assert_eq!(new_indexes, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    // ids were index+1, so this checks the closed-form mapping directly
    assert_eq!(mapping[3], (5, 3)); // old 4
    assert_eq!(mapping[4], (7, 4)); // old 6
    assert_eq!(mapping[7], (10, 7)); // old 9
}

#[test]
#[should_panic(expected = "already manages a view")]
fn registry_rejects_duplicate_index() {
    let mut registry = registry_with(&[1]);
    registry.push(ManagedCell {
        cell: PageCell {
            id: ViewId(99),
            tag: "page".into(),
        },
        index: 1,
        frame: Rect::default(),
    });
}

// ---- reload & windowing ---------------------------------------------------

#[test]
fn reload_builds_window_and_snaps_to_selection() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);

    assert_eq!(pager.count(), 12);
    assert_eq!(managed_indexes(&pager), vec![0, 1, 2]);
    assert_eq!(host.content_size, 1200.0);
    assert_eq!(host.offset_commands, vec![(0.0, false)]);
    assert_eq!(host.created, 3);
    assert!(host.views.values().all(|v| v.attached && v.tag == "page"));
}

#[test]
fn reload_is_idempotent_for_unchanged_state() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);
    let created = host.created;

    pager.reload_data(&mut ds, &mut host, None);
    assert_eq!(host.created, created);
    assert_eq!(host.destroyed, 0);
    assert_eq!(managed_indexes(&pager), vec![0, 1, 2]);
}

#[test]
fn reload_clamps_requested_selection() {
    let (mut pager, mut ds, mut host) = fixture(3);
    pager.reload_data(&mut ds, &mut host, Some(50));
    assert_eq!(host.offset_commands.last(), Some(&(200.0, false)));
    assert_eq!(managed_indexes(&pager), vec![0, 1, 2]);
}

#[test]
fn window_slides_and_recycles_views() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);
    assert_eq!(host.created, 3);

    // The three retired views are reused for the new window; only two of the
    // five slots need fresh views.
    pager.on_scroll(&mut ds, &mut host, 500.0);
    assert_eq!(pager.selected_index(), 5);
    assert_eq!(managed_indexes(&pager), vec![3, 4, 5, 6, 7]);
    assert_eq!(host.created, 5);
    assert!(pager.pool().is_empty());

    // Scrolling back pools the five old views and reuses three of them.
    pager.on_scroll(&mut ds, &mut host, 0.0);
    assert_eq!(managed_indexes(&pager), vec![0, 1, 2]);
    assert_eq!(host.created, 5);
    assert_eq!(pager.pool().bucket_len("page"), 2);
}

#[test]
fn pool_bucket_never_exceeds_window_capacity() {
    let (mut pager, mut ds, mut host) = fixture(50);
    pager.reload_data(&mut ds, &mut host, None);
    let cap = pager.visible_index_bounds().max_visible();

    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let page = pager.page_size();
        let offset = rng.gen_range_usize(0, 50) as f64 * page;
        pager.on_scroll(&mut ds, &mut host, offset);
        assert!(pager.pool().bucket_len("page") <= cap);
    }
}

#[test]
fn disabling_reuse_destroys_evicted_views() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.set_reuse_cache_enabled(false);
    pager.reload_data(&mut ds, &mut host, None);

    pager.on_scroll(&mut ds, &mut host, 500.0);
    assert!(pager.pool().is_empty());
    assert_eq!(host.destroyed, 3);
}

// ---- scroll translation ---------------------------------------------------

#[test]
fn scroll_offset_rounds_to_nearest_page() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);

    pager.on_scroll(&mut ds, &mut host, 149.0);
    assert_eq!(pager.selected_index(), 1);

    // Half-page boundary rounds away from zero.
    pager.on_scroll(&mut ds, &mut host, 150.0);
    assert_eq!(pager.selected_index(), 2);

    // Within the snap tolerance the first page wins regardless of rounding.
    pager.on_scroll(&mut ds, &mut host, 0.9);
    assert_eq!(pager.selected_index(), 0);
}

#[test]
fn selection_and_feedback_fire_once_per_distinct_focus() {
    let selections: Arc<Mutex<Vec<usize>>> = Arc::default();
    let sink = Arc::clone(&selections);

    let options = PagerOptions::new(Axis::Horizontal)
        .with_middle_item_scale_factor(0.25)
        .with_initial_bounds(Some(Rect::new(0.0, 0.0, 400.0, 100.0)))
        .with_on_select(Some(move |_view, index| {
            sink.lock().unwrap().push(index);
        }));
    let mut pager = PagerView::new(options);
    let mut ds = Items { count: 12 };
    let mut host = RecordingHost::default();
    pager.reload_data(&mut ds, &mut host, None);

    pager.on_scroll(&mut ds, &mut host, 300.0);
    pager.on_scroll(&mut ds, &mut host, 301.0);
    pager.on_scroll(&mut ds, &mut host, 299.0);

    assert_eq!(*selections.lock().unwrap(), vec![3]);
    assert_eq!(host.feedback, 1);
}

#[test]
fn scroll_focus_clamps_to_last_item() {
    let (mut pager, mut ds, mut host) = fixture(3);
    pager.reload_data(&mut ds, &mut host, None);
    pager.on_scroll(&mut ds, &mut host, 10_000.0);
    assert_eq!(pager.selected_index(), 2);
}

// ---- batch mutations ------------------------------------------------------

#[test]
fn batch_removal_renumbers_and_corrects_offset() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);
    pager.on_scroll(&mut ds, &mut host, 500.0);
    assert_eq!(pager.selected_index(), 5);

    let id_old_4 = pager.registry().lookup(4).unwrap().cell.id;
    let id_old_6 = pager.registry().lookup(6).unwrap().cell.id;
    let id_old_7 = pager.registry().lookup(7).unwrap().cell.id;

    ds.count = 10;
    let transition = pager.perform_batch_updates(
        &mut ds,
        &mut host,
        |batch| {
            batch.remove(3);
            batch.remove(5);
        },
        None,
    );
    assert!(transition.is_none());

    assert_eq!(pager.count(), 10);
    assert_eq!(pager.selected_index(), 5);
    assert_eq!(managed_indexes(&pager), vec![3, 4, 5, 6, 7]);

    // Survivors kept their views under the closed-form renumbering.
    assert_eq!(pager.registry().lookup(3).unwrap().cell.id, id_old_4);
    assert_eq!(pager.registry().lookup(4).unwrap().cell.id, id_old_6);
    assert_eq!(pager.registry().lookup(5).unwrap().cell.id, id_old_7);

    // Two removed indices at or below the focus: offset shifts back two pages.
    assert_eq!(pager.scroll_offset(), 300.0);
    assert_eq!(host.offset_commands.last(), Some(&(300.0, false)));
    assert_eq!(host.content_size, 1000.0);
}

#[test]
fn insert_then_remove_same_index_cancels_out() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);
    pager.on_scroll(&mut ds, &mut host, 500.0);

    let before = managed_indexes(&pager);
    let id_at_4 = pager.registry().lookup(4).unwrap().cell.id;

    pager.perform_batch_updates(
        &mut ds,
        &mut host,
        |batch| {
            batch.insert(4);
            batch.remove(4);
        },
        None,
    );

    assert_eq!(pager.count(), 12);
    assert_eq!(managed_indexes(&pager), before);
    assert_eq!(pager.scroll_offset(), 500.0);
    // The slot is occupied by a different view instance now.
    assert_ne!(pager.registry().lookup(4).unwrap().cell.id, id_at_4);
}

#[test]
fn batch_coalesces_into_one_flush_and_one_completion() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);

    let completions = Rc::new(Cell::new(0usize));
    let seen = Rc::clone(&completions);
    ds.count = 13;
    let commands_before = host.offset_commands.len();

    pager.perform_batch_updates(
        &mut ds,
        &mut host,
        |batch| {
            batch.insert(0);
            batch.insert(1);
            batch.remove(5);
        },
        Some(Box::new(move |success| {
            assert!(success);
            seen.set(seen.get() + 1);
        })),
    );

    assert_eq!(completions.get(), 1);
    assert_eq!(pager.count(), 13);
    assert!(!pager.is_performing_batch_updates());
    // One coalesced offset correction, not one per mutation.
    assert_eq!(host.offset_commands.len(), commands_before + 1);
}

#[test]
fn insert_into_empty_pager_needs_no_offset_correction() {
    let (mut pager, mut ds, mut host) = fixture(0);
    pager.reload_data(&mut ds, &mut host, None);
    assert_eq!(pager.count(), 0);

    ds.count = 1;
    let commands_before = host.offset_commands.len();
    pager.insert_item(&mut ds, &mut host, 0, false);

    assert_eq!(pager.count(), 1);
    assert_eq!(pager.selected_index(), 0);
    assert_eq!(pager.scroll_offset(), 0.0);
    assert_eq!(host.offset_commands.len(), commands_before);
    assert_eq!(host.content_size, 100.0);
    assert_eq!(managed_indexes(&pager), vec![0]);
}

#[test]
fn animated_batch_hands_out_a_transition() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);

    ds.count = 11;
    let transition = pager
        .delete_item(&mut ds, &mut host, 1, true)
        .expect("animated removal should produce a transition");

    assert_eq!(transition.fade_out.len(), 1);
    assert_eq!(transition.duration_ms, 333);
    assert!(pager.is_performing_batch_updates());

    // Fade-in views start transparent and below the live pages.
    for &id in &transition.fade_in {
        assert_eq!(host.view(id).alpha, 0.0);
        assert!(host.view(id).z < 0);
    }

    let completions = Rc::new(Cell::new(0usize));
    let seen = Rc::clone(&completions);
    pager.perform_batch_updates(
        &mut ds,
        &mut host,
        |_| {},
        Some(Box::new(move |success| {
            assert!(success);
            seen.set(seen.get() + 1);
        })),
    );

    let destroyed_before = host.destroyed;
    pager.finish_batch_updates(&mut host, true);
    assert_eq!(completions.get(), 1);
    assert!(!pager.is_performing_batch_updates());
    assert!(host.destroyed > destroyed_before);

    // Finishing twice is a no-op.
    pager.finish_batch_updates(&mut host, false);
    assert_eq!(completions.get(), 1);
}

#[test]
fn reload_of_unmanaged_index_is_tolerated() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);

    // Index 9 is outside the managed window: nothing to fade out, no panic.
    let transition = pager.reload_item(&mut ds, &mut host, 9, true);
    assert!(transition.is_none());
    assert_eq!(pager.count(), 12);
    assert_eq!(managed_indexes(&pager), vec![0, 1, 2]);
}

#[test]
fn reload_item_swaps_the_managed_view() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);
    let id_before = pager.registry().lookup(1).unwrap().cell.id;

    pager.reload_item(&mut ds, &mut host, 1, false);
    let id_after = pager.registry().lookup(1).unwrap().cell.id;
    assert_ne!(id_before, id_after);
    // The replaced view is gone, not pooled: flushes bypass the reuse cache.
    assert!(!host.views.contains_key(&id_before));
    assert_eq!(pager.pool().bucket_len("page"), 0);
}

#[test]
#[should_panic(expected = "batch removes")]
fn removing_from_an_empty_pager_is_fatal() {
    let (mut pager, mut ds, mut host) = fixture(0);
    pager.reload_data(&mut ds, &mut host, None);
    pager.delete_item(&mut ds, &mut host, 0, false);
}

// ---- configuration --------------------------------------------------------

#[test]
fn scale_factor_is_clamped_not_rejected() {
    let options = PagerOptions::new(Axis::Vertical).with_middle_item_scale_factor(5.0);
    assert_eq!(options.middle_item_scale_factor, 1.0);

    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);
    pager.set_middle_item_scale_factor(&mut ds, &mut host, 0.001);
    assert_eq!(pager.options().middle_item_scale_factor, 0.01);
}

#[test]
fn vertical_axis_lays_pages_down_the_y_axis() {
    let options = PagerOptions::new(Axis::Vertical)
        .with_initial_bounds(Some(Rect::new(0.0, 0.0, 100.0, 200.0)));
    let pager = PagerView::new(options);
    let frame = pager.page_frame(3);
    assert_eq!(frame.origin.y, 600.0);
    assert_eq!(frame.origin.x, 0.0);
    assert_eq!(frame.size.height, 200.0);
}

#[test]
fn page_insets_shrink_item_frames() {
    let (mut pager, mut ds, mut host) = fixture(12);
    pager.reload_data(&mut ds, &mut host, None);

    pager.set_page_insets(&mut ds, &mut host, Insets::uniform(10.0));
    let managed = pager.registry().lookup(0).unwrap();
    let frame = managed.frame;
    assert_eq!(frame.origin.x, 10.0);
    assert_eq!(frame.size.width, 80.0);
    assert_eq!(frame.size.height, 80.0);
    // The host saw the same frame the registry tracks.
    assert_eq!(host.view(managed.cell.id).frame, frame);
}

#[test]
fn operations_before_geometry_are_silent_noops() {
    let mut pager = PagerView::new(PagerOptions::new(Axis::Horizontal));
    let mut ds = Items { count: 5 };
    let mut host = RecordingHost::default();

    pager.reload_data(&mut ds, &mut host, None);
    pager.on_scroll(&mut ds, &mut host, 250.0);
    let transition = pager.insert_item(&mut ds, &mut host, 0, true);

    assert!(transition.is_none());
    assert_eq!(host.created, 0);
    assert!(host.offset_commands.is_empty());
    assert!(pager.registry().is_empty());
    assert!(!pager.is_performing_batch_updates());
}
