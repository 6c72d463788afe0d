// Example: minimal embedding with an inline host and data source.
use pagerview::{
    Axis, DequeueScope, PageCell, PagerDataSource, PagerOptions, PagerView, Rect, ScrollHost,
    ViewHost, ViewId,
};

#[derive(Default)]
struct PrintHost {
    next_id: u64,
}

impl ViewHost for PrintHost {
    fn create_view(&mut self, tag: &str, _frame: Rect) -> ViewId {
        self.next_id += 1;
        println!("create #{} ({tag})", self.next_id);
        ViewId(self.next_id)
    }
    fn destroy_view(&mut self, id: ViewId) {
        println!("destroy #{}", id.0);
    }
    fn attach_view(&mut self, _id: ViewId) {}
    fn detach_view(&mut self, _id: ViewId) {}
    fn set_view_frame(&mut self, _id: ViewId, _frame: Rect) {}
    fn set_view_alpha(&mut self, _id: ViewId, _alpha: f64) {}
    fn set_view_z_index(&mut self, _id: ViewId, _z: i32) {}
}

impl ScrollHost for PrintHost {
    fn set_content_size(&mut self, main: f64) {
        println!("content size -> {main}");
    }
    fn set_scroll_offset(&mut self, offset: f64, animated: bool) {
        println!("scroll to {offset} (animated: {animated})");
    }
}

struct Numbers;

impl PagerDataSource for Numbers {
    fn count(&mut self) -> usize {
        1_000
    }
    fn view_for(&mut self, scope: &mut DequeueScope<'_>, _index: usize) -> Option<PageCell> {
        Some(scope.dequeue_reusable("number"))
    }
}

fn main() {
    let mut pager = PagerView::new(
        PagerOptions::new(Axis::Horizontal)
            .with_initial_bounds(Some(Rect::new(0.0, 0.0, 320.0, 240.0)))
            .with_on_select(Some(|view: ViewId, index| {
                println!("selected index {index} (view #{})", view.0);
            })),
    );
    let mut ds = Numbers;
    let mut host = PrintHost::default();

    pager.reload_data(&mut ds, &mut host, None);
    println!("window bounds: {:?}", pager.visible_index_bounds());

    // Swipe a few pages forward; off-screen views retire into the pool.
    for offset in [320.0, 640.0, 960.0] {
        pager.on_scroll(&mut ds, &mut host, offset);
    }
    println!("managed: {}, pooled: {}", pager.registry().len(), pager.pool().len());

    // Drop the page that is two ahead of the focus.
    pager.delete_item(&mut ds, &mut host, 5, false);
    println!("count after delete: {}", pager.count());
}
