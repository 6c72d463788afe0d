// Example: drive an animated batch mutation headlessly with MemoryHost.
use pagerview::{
    Axis, DequeueScope, PageCell, PagerDataSource, PagerOptions, PagerView, Rect,
};
use pagerview_adapter::{BatchAnimator, Easing, MemoryHost};

struct Items {
    count: usize,
}

impl PagerDataSource for Items {
    fn count(&mut self) -> usize {
        self.count
    }
    fn view_for(&mut self, scope: &mut DequeueScope<'_>, _index: usize) -> Option<PageCell> {
        Some(scope.dequeue_reusable("card"))
    }
}

fn main() {
    let mut pager = PagerView::new(
        PagerOptions::new(Axis::Horizontal)
            .with_initial_bounds(Some(Rect::new(0.0, 0.0, 320.0, 240.0))),
    );
    let mut ds = Items { count: 5 };
    let mut host = MemoryHost::new();
    pager.reload_data(&mut ds, &mut host, None);
    println!("live views after reload: {}", host.len());

    // Swap item 1 out for a fresh view while inserting a new item 2, as one
    // coalesced, animated change.
    ds.count = 6;
    let transition = pager
        .perform_batch_updates(
            &mut ds,
            &mut host,
            |batch| {
                batch.reload(1);
                batch.insert(2);
                batch.set_animated(true);
            },
            Some(Box::new(|success| println!("batch settled (success: {success})"))),
        )
        .expect("animated batch produces a transition");
    println!(
        "fading {} in, {} out over {}ms",
        transition.fade_in.len(),
        transition.fade_out.len(),
        transition.duration_ms
    );

    let mut animator = BatchAnimator::new();
    animator.begin(&mut pager, &mut host, transition.clone(), 0, Easing::SmoothStep);
    let mut now_ms = 0;
    while animator.tick(&mut pager, &mut host, now_ms) {
        let alphas: Vec<f64> = transition
            .fade_in
            .iter()
            .filter_map(|&id| host.view(id))
            .map(|record| (record.alpha * 100.0).round() / 100.0)
            .collect();
        println!("t={now_ms:3}ms entering alphas: {alphas:?}");
        now_ms += 50;
    }

    println!("live views after settle: {}", host.len());
    println!("count: {}", pager.count());
}
