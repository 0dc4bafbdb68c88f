// Example: drive a controller the way a host event loop would.
//
// The host forwards scroll notifications, runs requested frames and ticks the idle timer.
use recycle_list_adapter::{
    Controller, ListConfig, ListOptions, ScrollBehavior, ScrollContainer, Surface,
};

struct Terminal {
    viewport: u32,
    offset: u64,
    content_height: u64,
    frame_requested: bool,
}

struct Line {
    text: String,
    top: u64,
}

impl Surface for Terminal {
    type Node = Line;

    fn create_node(&mut self) -> Line {
        Line {
            text: String::new(),
            top: 0,
        }
    }

    fn attach(&mut self, _node: &mut Line) {}

    fn detach(&mut self, _node: &mut Line) {}

    fn place(&mut self, node: &mut Line, top: u64, _height: u32) {
        node.top = top;
    }

    fn write_text(&mut self, node: &mut Line, text: &str) {
        node.text.clear();
        node.text.push_str(text);
    }
}

impl ScrollContainer for Terminal {
    fn viewport_size(&self) -> u32 {
        self.viewport
    }

    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn scroll_to(&mut self, offset: u64, _behavior: ScrollBehavior) {
        self.offset = offset.min(self.content_height.saturating_sub(self.viewport as u64));
    }

    fn set_content_height(&mut self, height: u64) {
        self.content_height = height;
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

fn run_frame(list: &mut Controller<String, Terminal>) {
    if std::mem::take(&mut list.container_mut().frame_requested) {
        list.on_frame();
    }
}

fn print_window(list: &Controller<String, Terminal>) {
    let mut rows: Vec<_> = list
        .rendered()
        .map(|(_, row)| (row.node.top, row.node.text.as_str()))
        .collect();
    rows.sort();
    let first = rows.first().map(|(_, text)| *text);
    let last = rows.last().map(|(_, text)| *text);
    println!(
        "range={:?} first={first:?} last={last:?}",
        list.visible_range()
    );
}

fn main() {
    let terminal = Terminal {
        viewport: 600,
        offset: 0,
        content_height: 0,
        frame_requested: false,
    };
    let options = ListOptions::new(ListConfig::new(30).with_overscan(3));
    let mut list = Controller::create(terminal, options);
    list.set_items((0..10_000).map(|i| format!("message #{i}")).collect());
    print_window(&list);

    // A scroll burst: five notifications, one frame.
    for (now_ms, offset) in [(0u64, 100u64), (4, 220), (8, 400), (12, 650), (16, 900)] {
        list.container_mut().offset = offset;
        list.on_scroll(now_ms);
    }
    run_frame(&mut list);
    print_window(&list);
    println!("scrolling={} idle_at={:?}", list.is_scrolling(), list.idle_deadline());
    list.tick(200);
    println!("scrolling={}", list.is_scrolling());

    list.update_item(31, String::from("message #31 (edited)"));
    list.remove_item(0);
    list.prepend_items(["pinned".to_string()]);
    print_window(&list);

    list.scroll_to_bottom(ScrollBehavior::Smooth);
    list.on_scroll(300);
    run_frame(&mut list);
    print_window(&list);
    println!("{:?}", list.stats());

    list.destroy();
    println!("after destroy: {:?}", list.stats());
}
